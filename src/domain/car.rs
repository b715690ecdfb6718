// src/domain/car.rs

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use serde::Serialize;
use validator::Validate;

use crate::errors::ServerError;

/// Lowercase ASCII alphabet used for short ids.
const SHORT_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
pub const SHORT_ID_LEN: usize = 6;

/// Declares a string-backed enum with `as_str`, `parse` and `ALL`.
macro_rules! string_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Case-insensitive parse of the stored/form value.
            pub fn parse(raw: &str) -> Option<Self> {
                let raw = raw.trim().to_ascii_lowercase();
                match raw.as_str() {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(FuelType {
    Petrol => "petrol",
    Diesel => "diesel",
    Hybrid => "hybrid",
    Electric => "electric",
    Other => "other",
});

string_enum!(Transmission {
    Automatic => "automatic",
    Manual => "manual",
    Other => "other",
});

string_enum!(BodyType {
    Sedan => "sedan",
    Suv => "suv",
    Coupe => "coupe",
    Hatchback => "hatchback",
    Wagon => "wagon",
    Convertible => "convertible",
    Van => "van",
    Other => "other",
});

string_enum!(Condition {
    New => "new",
    Used => "used",
});

string_enum!(CarStatus {
    Available => "available",
    Reserved => "reserved",
    Sold => "sold",
});

impl CarStatus {
    pub fn label(self) -> &'static str {
        match self {
            CarStatus::Available => "Available",
            CarStatus::Reserved => "Reserved",
            CarStatus::Sold => "Sold",
        }
    }

    /// Visible on the public catalog and in the sitemap.
    pub fn is_listed(self) -> bool {
        matches!(self, CarStatus::Available | CarStatus::Reserved)
    }
}

/// A vehicle as stored in the `cars` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: i64,
    pub short_id: String,
    pub slug: String,
    pub title: String,
    pub brand: String,
    pub model: String,
    pub year: i64,
    pub price: i64,
    pub mileage: i64,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub body_type: BodyType,
    pub condition: Condition,
    pub color_exterior: String,
    pub color_interior: Option<String>,
    #[serde(rename = "powerHP")]
    pub power_hp: Option<i64>,
    pub engine: Option<String>,
    pub drivetrain: Option<String>,
    pub seats: Option<i64>,
    pub doors: Option<i64>,
    pub features: Vec<String>,
    pub description: String,
    pub images: Vec<String>,
    pub car_pass_url: Option<String>,
    pub is_featured: bool,
    pub status: CarStatus,
    pub sold_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Car {
    pub fn url(&self) -> String {
        build_car_url(&self.slug, &self.short_id)
    }

    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.year)
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Everything an admin (or a CSV row) supplies for a vehicle.
/// Identity, slug and timestamps are derived on write.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CarInput {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    #[validate(range(min = 1900, message = "Year must be 1900 or later"))]
    pub year: i64,
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i64,
    #[validate(range(min = 0, message = "Mileage must not be negative"))]
    pub mileage: i64,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub body_type: BodyType,
    pub condition: Condition,
    #[validate(length(min = 1, message = "Exterior color is required"))]
    pub color_exterior: String,
    pub color_interior: Option<String>,
    #[validate(range(min = 0))]
    pub power_hp: Option<i64>,
    pub engine: Option<String>,
    pub drivetrain: Option<String>,
    #[validate(range(min = 1, max = 99))]
    pub seats: Option<i64>,
    #[validate(range(min = 1, max = 9))]
    pub doors: Option<i64>,
    pub features: Vec<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub images: Vec<String>,
    #[validate(url(message = "Must be a valid URL"))]
    pub car_pass_url: Option<String>,
    pub is_featured: bool,
    pub status: CarStatus,
}

impl CarInput {
    /// Run the derived rules plus the ones that depend on today's date.
    pub fn check(&self, now: i64) -> Result<(), ServerError> {
        self.validate()?;

        let this_year = DateTime::<Utc>::from_timestamp(now, 0)
            .map(|t| i64::from(t.year()))
            .ok_or(ServerError::InternalError)?;
        let max_year = this_year + 1;
        if self.year > max_year {
            return Err(ServerError::BadRequest(format!(
                "Year must be {max_year} or earlier"
            )));
        }
        Ok(())
    }

    pub fn slug(&self) -> String {
        generate_slug(&self.brand, &self.model, self.year, Some(&self.title))
    }
}

impl From<&Car> for CarInput {
    fn from(car: &Car) -> Self {
        CarInput {
            title: car.title.clone(),
            brand: car.brand.clone(),
            model: car.model.clone(),
            year: car.year,
            price: car.price,
            mileage: car.mileage,
            fuel_type: car.fuel_type,
            transmission: car.transmission,
            body_type: car.body_type,
            condition: car.condition,
            color_exterior: car.color_exterior.clone(),
            color_interior: car.color_interior.clone(),
            power_hp: car.power_hp,
            engine: car.engine.clone(),
            drivetrain: car.drivetrain.clone(),
            seats: car.seats,
            doors: car.doors,
            features: car.features.clone(),
            description: car.description.clone(),
            images: car.images.clone(),
            car_pass_url: car.car_pass_url.clone(),
            is_featured: car.is_featured,
            status: car.status,
        }
    }
}

/// Sale timestamp to store after a status write.
///
/// `previous` is the stored `(status, sold_at)` or `None` when the car is new.
pub fn sold_at_after(
    previous: Option<(CarStatus, Option<i64>)>,
    next: CarStatus,
    now: i64,
) -> Option<i64> {
    match (previous, next) {
        (None, CarStatus::Sold) => Some(now),
        (None, _) => None,
        (Some((CarStatus::Sold, sold_at)), CarStatus::Sold) => sold_at.or(Some(now)),
        (Some(_), CarStatus::Sold) => Some(now),
        (Some((CarStatus::Sold, _)), _) => None,
        (Some((_, sold_at)), _) => sold_at,
    }
}

pub fn generate_short_id() -> String {
    let mut rng = rand::thread_rng();
    (0..SHORT_ID_LEN)
        .map(|_| SHORT_ID_ALPHABET[rng.gen_range(0..SHORT_ID_ALPHABET.len())] as char)
        .collect()
}

/// `brand model year` plus the first three words of the title, slugified.
pub fn generate_slug(brand: &str, model: &str, year: i64, title: Option<&str>) -> String {
    let mut source = format!("{brand} {model} {year}");
    if let Some(title) = title {
        let head: Vec<&str> = title.split_whitespace().take(3).collect();
        if !head.is_empty() {
            source.push(' ');
            source.push_str(&head.join(" "));
        }
    }
    slugify(&source)
}

/// Lower-case ASCII slug: accents folded, everything else becomes a single dash.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        let folded = fold_char(c);
        match folded {
            Some(f) if f.is_ascii_alphanumeric() => {
                if pending_dash && !out.is_empty() {
                    out.push('-');
                }
                pending_dash = false;
                out.push(f.to_ascii_lowercase());
            }
            // strict mode drops punctuation but keeps word breaks
            _ if c.is_whitespace() || c == '-' || c == '_' || c == '/' => pending_dash = true,
            _ => {}
        }
    }
    out
}

fn fold_char(c: char) -> Option<char> {
    if c.is_ascii() {
        return Some(c);
    }
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'a',
        'ç' | 'Ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => 'i',
        'ñ' | 'Ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => 'u',
        'ý' | 'ÿ' | 'Ý' => 'y',
        'ß' => 's',
        _ => return None,
    };
    Some(folded)
}

pub fn build_car_url(slug: &str, short_id: &str) -> String {
    format!("/cars/{slug}-{short_id}")
}

/// Split `slug-shortid` at the last dash.
pub fn parse_car_url(slug_with_id: &str) -> Option<(&str, &str)> {
    let idx = slug_with_id.rfind('-')?;
    Some((&slug_with_id[..idx], &slug_with_id[idx + 1..]))
}

/// `189900` -> `€ 189.900`
pub fn format_price(price: i64) -> String {
    format!("€ {}", group_thousands(price))
}

/// `12500` -> `12.500 km`
pub fn format_mileage(mileage: i64) -> String {
    format!("{} km", group_thousands(mileage))
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// wa.me link with the number reduced to digits.
pub fn whatsapp_url(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let text: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    format!("https://wa.me/{digits}?text={text}")
}

/// 2025-06-15, a clock for tests that store or validate cars.
#[cfg(test)]
pub const TEST_NOW: i64 = 1_750_000_000;

#[cfg(test)]
pub fn sample_input() -> CarInput {
    CarInput {
        title: "M4 Competition xDrive".to_string(),
        brand: "BMW".to_string(),
        model: "M4".to_string(),
        year: 2023,
        price: 89_500,
        mileage: 15_600,
        fuel_type: FuelType::Petrol,
        transmission: Transmission::Automatic,
        body_type: BodyType::Coupe,
        condition: Condition::Used,
        color_exterior: "Isle of Man Green".to_string(),
        color_interior: Some("Black".to_string()),
        power_hp: Some(510),
        engine: Some("3.0L Twin-Turbo I6".to_string()),
        drivetrain: Some("AWD".to_string()),
        seats: Some(4),
        doors: Some(2),
        features: vec!["Carbon Roof".to_string(), "Head-Up Display".to_string()],
        description: "Stunning M4 Competition.".to_string(),
        images: vec!["https://img.example/m4-1.jpg".to_string()],
        car_pass_url: None,
        is_featured: true,
        status: CarStatus::Available,
    }
}
