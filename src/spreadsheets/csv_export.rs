// src/spreadsheets/csv_export.rs
use chrono::{DateTime, Utc};

use crate::domain::car::Car;

/// Column order shared by the CSV export, the XLSX export and the importer.
pub const CSV_COLUMNS: [&str; 24] = [
    "id",
    "shortId",
    "title",
    "brand",
    "model",
    "year",
    "price",
    "mileage",
    "fuelType",
    "transmission",
    "bodyType",
    "condition",
    "colorExterior",
    "colorInterior",
    "powerHP",
    "engine",
    "drivetrain",
    "seats",
    "doors",
    "features",
    "description",
    "images",
    "isFeatured",
    "status",
];

/// Always quoted, inner quotes doubled.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn opt_num(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn opt_text(value: Option<&str>) -> String {
    quote(value.unwrap_or_default())
}

/// One line, no trailing newline.
pub fn car_to_csv_row(car: &Car) -> String {
    let description = car.description.replace("\r\n", " ").replace(['\n', '\r'], " ");

    let fields = [
        car.id.to_string(),
        quote(&car.short_id),
        quote(&car.title),
        quote(&car.brand),
        quote(&car.model),
        car.year.to_string(),
        car.price.to_string(),
        car.mileage.to_string(),
        quote(car.fuel_type.as_str()),
        quote(car.transmission.as_str()),
        quote(car.body_type.as_str()),
        quote(car.condition.as_str()),
        quote(&car.color_exterior),
        opt_text(car.color_interior.as_deref()),
        opt_num(car.power_hp),
        opt_text(car.engine.as_deref()),
        opt_text(car.drivetrain.as_deref()),
        opt_num(car.seats),
        opt_num(car.doors),
        quote(&car.features.join(", ")),
        quote(&description),
        quote(&car.images.join(", ")),
        car.is_featured.to_string(),
        quote(car.status.as_str()),
    ];
    fields.join(",")
}

pub fn cars_to_csv(cars: &[Car]) -> String {
    let mut lines = Vec::with_capacity(cars.len() + 1);
    lines.push(CSV_COLUMNS.join(","));
    lines.extend(cars.iter().map(car_to_csv_row));
    lines.join("\n")
}

pub fn export_filename(now: i64) -> String {
    let date = DateTime::<Utc>::from_timestamp(now, 0).unwrap_or_default();
    format!("cars-export-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::cars::insert_car;
    use crate::db::connection::test_conn;
    use crate::domain::car::{sample_input, TEST_NOW};

    #[test]
    fn header_has_every_column() {
        let csv = cars_to_csv(&[]);
        assert_eq!(csv.split(',').count(), 24);
        assert!(csv.starts_with("id,shortId,title,"));
        assert!(csv.ends_with("isFeatured,status"));
    }

    #[test]
    fn row_quotes_text_and_flattens_description() {
        let conn = test_conn();
        let mut input = sample_input();
        input.title = "The \"Green\" one".into();
        input.description = "Line one\nLine two".into();
        input.engine = None;
        let car = insert_car(&conn, &input, TEST_NOW + 1).unwrap();

        let row = car_to_csv_row(&car);
        assert!(row.contains("\"The \"\"Green\"\" one\""));
        assert!(row.contains("\"Line one Line two\""));
        assert!(row.contains(",2023,89500,15600,\"petrol\","));
        assert!(row.contains(",510,\"\",\"AWD\",4,2,"));
        assert!(row.contains("\"Carbon Roof, Head-Up Display\""));
        assert!(row.ends_with(",true,\"available\""));
        assert!(!row.contains('\n'));
    }

    #[test]
    fn filename_uses_utc_date() {
        assert_eq!(export_filename(1_700_000_000), "cars-export-2023-11-14.csv");
    }
}
