// src/forms.rs
use std::io::Read;

use astra::Request;
use validator::Validate;

use crate::domain::car::{BodyType, CarInput, CarStatus, Condition, FuelType, Transmission};
use crate::domain::lead::{BodyShopLeadInput, LeadInput};
use crate::errors::ServerError;

pub const MAX_FORM_BYTES: u64 = 1024 * 1024;
pub const MAX_UPLOAD_BYTES: u64 = 8 * 1024 * 1024;

/// Read at most `limit` bytes of the request body. Anything longer is a 400.
pub fn read_body(req: Request, limit: u64) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.into_body()
        .reader()
        .take(limit + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("failed to read body: {e}")))?;

    if buf.len() as u64 > limit {
        return Err(ServerError::BadRequest("request body too large".into()));
    }
    Ok(buf)
}

pub fn read_text_body(req: Request, limit: u64) -> Result<String, ServerError> {
    let bytes = read_body(req, limit)?;
    String::from_utf8(bytes).map_err(|_| ServerError::BadRequest("body is not UTF-8".into()))
}

/// Decoded `application/x-www-form-urlencoded` pairs, order kept.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(bytes: &[u8]) -> Self {
        let pairs = url::form_urlencoded::parse(bytes).into_owned().collect();
        Self { pairs }
    }

    pub fn from_request(req: Request) -> Result<Self, ServerError> {
        Ok(Self::parse(&read_body(req, MAX_FORM_BYTES)?))
    }

    pub fn from_query(req: &Request) -> Self {
        Self::parse(req.uri().query().unwrap_or("").as_bytes())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Trimmed value; empty counts as missing.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    pub fn opt_text(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    /// Raw value, untrimmed. Honeypots must see whitespace too.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Checkbox semantics: present and not `false`/`0`/`off`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some(v) if !matches!(v, "false" | "0" | "off"))
    }

    /// Whole number. Spaces and dot thousands separators (`89.500`) are accepted,
    /// fractions are not.
    pub fn int(&self, key: &str) -> Result<Option<i64>, ServerError> {
        self.get(key)
            .map(|v| {
                parse_grouped_int(v)
                    .ok_or_else(|| ServerError::BadRequest(format!("{key}: not a whole number")))
            })
            .transpose()
    }

    pub fn required_int(&self, key: &str) -> Result<i64, ServerError> {
        self.int(key)?
            .ok_or_else(|| ServerError::BadRequest(format!("{key}: required")))
    }

    /// One entry per non-empty line (textarea lists).
    pub fn lines(&self, key: &str) -> Vec<String> {
        self.get(key)
            .map(|v| {
                v.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn choice<T>(&self, key: &str, parse: fn(&str) -> Option<T>) -> Result<T, ServerError> {
        let raw = self
            .get(key)
            .ok_or_else(|| ServerError::BadRequest(format!("{key}: required")))?;
        parse(raw).ok_or_else(|| ServerError::BadRequest(format!("{key}: unknown value {raw:?}")))
    }
}

fn parse_grouped_int(raw: &str) -> Option<i64> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let (sign, digits) = match compact.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", compact.as_str()),
    };

    let mut groups = digits.split('.');
    let head = groups.next()?;
    let tail: Vec<&str> = groups.collect();
    if !tail.is_empty() {
        let head_ok = (1..=3).contains(&head.len());
        let tail_ok = tail.iter().all(|g| g.len() == 3);
        if !head_ok || !tail_ok {
            return None;
        }
    }

    let joined: String = std::iter::once(head).chain(tail).collect();
    if joined.is_empty() || !joined.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    format!("{sign}{joined}").parse().ok()
}

#[derive(Debug, Clone, Validate)]
pub struct LoginInput {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginInput {
    pub fn from_form(form: &FormData) -> Self {
        Self {
            username: form.text("username"),
            password: form.raw("password").unwrap_or_default().to_string(),
        }
    }
}

impl CarInput {
    /// Admin vehicle form. Features and images are one per line.
    pub fn from_form(form: &FormData) -> Result<Self, ServerError> {
        Ok(CarInput {
            title: form.text("title"),
            brand: form.text("brand"),
            model: form.text("model"),
            year: form.required_int("year")?,
            price: form.required_int("price")?,
            mileage: form.int("mileage")?.unwrap_or(0),
            fuel_type: form.choice("fuel_type", FuelType::parse)?,
            transmission: form.choice("transmission", Transmission::parse)?,
            body_type: form.choice("body_type", BodyType::parse)?,
            condition: form.choice("condition", Condition::parse)?,
            color_exterior: form.text("color_exterior"),
            color_interior: form.opt_text("color_interior"),
            power_hp: form.int("power_hp")?,
            engine: form.opt_text("engine"),
            drivetrain: form.opt_text("drivetrain"),
            seats: form.int("seats")?,
            doors: form.int("doors")?,
            features: form.lines("features"),
            description: form.text("description"),
            images: form.lines("images"),
            car_pass_url: form.opt_text("car_pass_url"),
            is_featured: form.flag("is_featured"),
            status: form.choice("status", CarStatus::parse)?,
        })
    }
}

impl LeadInput {
    pub fn from_form(form: &FormData) -> Result<Self, ServerError> {
        Ok(LeadInput {
            name: form.text("name"),
            email: form.text("email"),
            phone: form.opt_text("phone"),
            message: form.text("message"),
            car_id: form.int("car_id")?,
        })
    }
}

impl BodyShopLeadInput {
    pub fn from_form(form: &FormData) -> Self {
        BodyShopLeadInput {
            name: form.text("name"),
            email: form.text("email"),
            phone: form.text("phone"),
            chassis_number: form.text("chassis_number"),
            service_type: form.text("service_type"),
            message: form.opt_text("message"),
        }
    }
}
