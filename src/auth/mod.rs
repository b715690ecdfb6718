pub mod admin;
pub mod sessions;
pub mod token;
