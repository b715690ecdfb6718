mod admin_auth_tests;
mod admin_cars_tests;
mod admin_leads_tests;
mod api_tests;
mod lead_tests;
mod public_tests;
