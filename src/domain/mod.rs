pub mod car;
pub mod expiry;
pub mod inventory;
pub mod lead;
