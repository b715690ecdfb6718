use crate::domain::car::Car;
use crate::errors::ServerError;
use crate::spreadsheets::csv_export::CSV_COLUMNS;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

fn xlsx_err(what: &str) -> impl Fn(rust_xlsxwriter::XlsxError) -> ServerError + '_ {
    move |e| ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}

fn write_opt_number(ws: &mut Worksheet, r: u32, c: u16, v: Option<i64>) -> Result<(), ServerError> {
    if let Some(v) = v {
        ws.write_number(r, c, v as f64).map_err(xlsx_err(CSV_COLUMNS[c as usize]))?;
    }
    Ok(())
}

/// Inventory workbook with the same columns as the CSV export.
pub fn export_cars_xlsx(cars: &[Car]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in CSV_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, car) in cars.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_number(r, 0, car.id as f64)
            .map_err(xlsx_err("id"))?;

        let texts: [(u16, &str); 13] = [
            (1, car.short_id.as_str()),
            (2, car.title.as_str()),
            (3, car.brand.as_str()),
            (4, car.model.as_str()),
            (8, car.fuel_type.as_str()),
            (9, car.transmission.as_str()),
            (10, car.body_type.as_str()),
            (11, car.condition.as_str()),
            (12, car.color_exterior.as_str()),
            (13, car.color_interior.as_deref().unwrap_or("")),
            (15, car.engine.as_deref().unwrap_or("")),
            (16, car.drivetrain.as_deref().unwrap_or("")),
            (20, car.description.as_str()),
        ];
        for (c, value) in texts {
            worksheet
                .write_string(r, c, value)
                .map_err(xlsx_err(CSV_COLUMNS[c as usize]))?;
        }

        for (c, value) in [(5u16, car.year), (6, car.price), (7, car.mileage)] {
            worksheet
                .write_number(r, c, value as f64)
                .map_err(xlsx_err(CSV_COLUMNS[c as usize]))?;
        }

        write_opt_number(worksheet, r, 14, car.power_hp)?;
        write_opt_number(worksheet, r, 17, car.seats)?;
        write_opt_number(worksheet, r, 18, car.doors)?;

        worksheet
            .write_string(r, 19, car.features.join(", "))
            .map_err(xlsx_err("features"))?;
        worksheet
            .write_string(r, 21, car.images.join(", "))
            .map_err(xlsx_err("images"))?;
        worksheet
            .write_boolean(r, 22, car.is_featured)
            .map_err(xlsx_err("isFeatured"))?;
        worksheet
            .write_string(r, 23, car.status.as_str())
            .map_err(xlsx_err("status"))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

pub fn export_filename(now: i64) -> String {
    crate::spreadsheets::csv_export::export_filename(now).replace(".csv", ".xlsx")
}
