// src/spreadsheets/csv_import.rs
use std::collections::HashMap;

use rusqlite::Connection;
use serde::Serialize;
use tracing::warn;

use crate::db::cars::import_car;
use crate::domain::car::{BodyType, CarInput, CarStatus, Condition, FuelType, Transmission};
use crate::errors::ServerError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
    pub total: usize,
}

/// Split CSV text into records.
///
/// Handles quoted fields with doubled quotes, commas and line breaks inside
/// quotes, and both `\n` and `\r\n` endings. Blank lines are dropped.
pub fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        push_record(&mut records, record);
    }
    records
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    let blank = record.len() == 1 && record[0].trim().is_empty();
    if !blank {
        records.push(record);
    }
}

/// Fields of a single CSV line.
#[cfg(test)]
pub fn parse_csv_line(line: &str) -> Vec<String> {
    parse_records(line).into_iter().next().unwrap_or_default()
}

/// Header name (lowercased) to column index.
struct Columns(HashMap<String, usize>);

impl Columns {
    fn new(header: &[String]) -> Self {
        Columns(
            header
                .iter()
                .enumerate()
                .map(|(i, name)| (name.trim().to_lowercase(), i))
                .collect(),
        )
    }

    fn get<'a>(&self, record: &'a [String], name: &str) -> &'a str {
        self.0
            .get(&name.to_lowercase())
            .and_then(|&i| record.get(i))
            .map(|v| v.trim())
            .unwrap_or_default()
    }
}

fn lenient_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
}

fn opt_text(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn enum_or<T>(raw: &str, column: &str, default: T, parse: fn(&str) -> Option<T>) -> Result<T, String> {
    if raw.is_empty() {
        return Ok(default);
    }
    parse(raw).ok_or_else(|| format!("{column}: unknown value {raw:?}"))
}

/// Map one data record to a car. `id` and `shortId` are ignored.
fn record_to_input(cols: &Columns, record: &[String]) -> Result<CarInput, String> {
    let get = |name: &str| cols.get(record, name);

    let input = CarInput {
        title: get("title").to_string(),
        brand: get("brand").to_string(),
        model: get("model").to_string(),
        year: lenient_int(get("year")).unwrap_or(0),
        price: lenient_int(get("price")).unwrap_or(0),
        mileage: lenient_int(get("mileage")).unwrap_or(0),
        fuel_type: enum_or(get("fuelType"), "fuelType", FuelType::Petrol, FuelType::parse)?,
        transmission: enum_or(
            get("transmission"),
            "transmission",
            Transmission::Automatic,
            Transmission::parse,
        )?,
        body_type: enum_or(get("bodyType"), "bodyType", BodyType::Sedan, BodyType::parse)?,
        condition: enum_or(get("condition"), "condition", Condition::Used, Condition::parse)?,
        color_exterior: get("colorExterior").to_string(),
        color_interior: opt_text(get("colorInterior")),
        power_hp: lenient_int(get("powerHP")),
        engine: opt_text(get("engine")),
        drivetrain: opt_text(get("drivetrain")),
        seats: lenient_int(get("seats")),
        doors: lenient_int(get("doors")),
        features: split_list(get("features")),
        description: get("description").to_string(),
        images: split_list(get("images")),
        car_pass_url: None,
        is_featured: get("isFeatured").eq_ignore_ascii_case("true"),
        status: enum_or(get("status"), "status", CarStatus::Available, CarStatus::parse)?,
    };

    if input.brand.is_empty() || input.model.is_empty() || input.title.is_empty() {
        return Err("brand, model and title are required".into());
    }
    if input.year == 0 {
        return Err("year is required".into());
    }
    Ok(input)
}

/// Parse every data row. Row numbers in errors are 1-based, header excluded.
pub fn parse_csv(text: &str) -> Result<Vec<Result<CarInput, String>>, ServerError> {
    let mut records = parse_records(text.trim_start_matches('\u{feff}')).into_iter();
    let header = records
        .next()
        .ok_or_else(|| ServerError::BadRequest("CSV file is empty".into()))?;
    let cols = Columns::new(&header);

    Ok(records.map(|r| record_to_input(&cols, &r)).collect())
}

/// Import all rows in one transaction. Bad rows are counted and logged,
/// the rest go in. Zero importable rows is a 400.
pub fn import_cars(conn: &mut Connection, text: &str, now: i64) -> Result<ImportSummary, ServerError> {
    let rows = parse_csv(text)?;
    let mut summary = ImportSummary {
        total: rows.len(),
        ..Default::default()
    };

    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin import tx failed: {e}")))?;

    for (i, row) in rows.iter().enumerate() {
        let outcome = match row {
            Ok(input) => import_car(&tx, input, now).map(|_| ()).map_err(|e| e.to_string()),
            Err(reason) => Err(reason.clone()),
        };
        match outcome {
            Ok(()) => summary.imported += 1,
            Err(reason) => {
                warn!(row = i + 1, %reason, "skipping CSV row");
                summary.failed += 1;
            }
        }
    }

    if summary.imported == 0 {
        return Err(ServerError::BadRequest(format!(
            "no importable rows ({} failed)",
            summary.failed
        )));
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit import tx failed: {e}")))?;

    Ok(summary)
}
