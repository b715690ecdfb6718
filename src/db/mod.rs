pub mod cars;
pub mod connection;
pub mod leads;
