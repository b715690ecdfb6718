pub mod csv_export;
pub mod csv_import;
pub mod export_xlsx;

pub use csv_export::cars_to_csv;
pub use csv_import::{import_cars, ImportSummary};
pub use export_xlsx::export_cars_xlsx;
