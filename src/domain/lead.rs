// src/domain/lead.rs

use serde::Serialize;
use validator::Validate;

/// General inquiry, optionally about one car.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub car_id: Option<i64>,
    /// Title of the referenced car, filled by listing queries.
    pub car_title: Option<String>,
    pub handled: bool,
    pub created_at: i64,
}

/// Body-shop (carrosserie) service request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyShopLead {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub chassis_number: String,
    pub service_type: String,
    pub message: Option<String>,
    pub handled: bool,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct LeadInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub car_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct BodyShopLeadInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Chassis number is required"))]
    pub chassis_number: String,
    #[validate(length(min = 1, message = "Service type is required"))]
    pub service_type: String,
    pub message: Option<String>,
}

pub const SERVICE_TYPES: &[(&str, &str)] = &[
    ("damage_repair", "Damage repair"),
    ("paintwork", "Paintwork"),
    ("dent_removal", "Dent removal"),
    ("polishing", "Polishing & detailing"),
    ("insurance_claim", "Insurance claim"),
    ("other", "Other"),
];

/// Name of the hidden form field humans leave empty.
pub const HONEYPOT_FIELD: &str = "website";

pub fn is_spam(honeypot: Option<&str>) -> bool {
    honeypot.map(|v| !v.is_empty()).unwrap_or(false)
}
