pub mod about;
pub mod admin_cars;
pub mod admin_leads;
pub mod car_detail;
pub mod car_form;
pub mod carrosserie;
pub mod contact;
pub mod dashboard;
pub mod home;
pub mod inventory;
pub mod login;
pub mod sitemap;
pub mod thank_you;

pub use about::about_page;
pub use admin_cars::{admin_cars_page, AdminCarsVm};
pub use admin_leads::{bodyshop_leads_page, leads_page};
pub use car_detail::{car_detail_page, CarDetailVm};
pub use car_form::{car_form_page, CarFormVm};
pub use carrosserie::carrosserie_page;
pub use contact::contact_page;
pub use dashboard::{dashboard_page, DashboardVm};
pub use home::home_page;
pub use inventory::{inventory_page, InventoryVm};
pub use login::login_page;
pub use sitemap::sitemap_xml;
pub use thank_you::thank_you_page;
