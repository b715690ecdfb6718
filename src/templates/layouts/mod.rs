pub mod admin;
pub mod desktop;
