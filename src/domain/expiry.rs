// src/domain/expiry.rs

use serde::Serialize;

use crate::domain::car::Car;

const HOUR: i64 = 60 * 60;
const DAY: i64 = 24 * HOUR;

/// A sold car waiting for the retention sweep.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingDeletion {
    pub id: i64,
    pub title: String,
    pub brand: String,
    pub model: String,
    pub sold_at: i64,
    pub delete_at: i64,
    /// Negative once overdue.
    pub remaining_secs: i64,
    pub remaining_text: String,
    pub is_overdue: bool,
    /// Less than a day left.
    pub is_urgent: bool,
}

/// Latest sale time that is already past the retention window.
pub fn cutoff(now: i64, retention_secs: i64) -> i64 {
    now - retention_secs
}

/// Countdown for one sold car. `None` if the car has no sale timestamp.
pub fn pending_deletion(car: &Car, now: i64, retention_secs: i64) -> Option<PendingDeletion> {
    let sold_at = car.sold_at?;
    let delete_at = sold_at + retention_secs;
    let remaining_secs = delete_at - now;
    let is_overdue = remaining_secs <= 0;

    Some(PendingDeletion {
        id: car.id,
        title: car.title.clone(),
        brand: car.brand.clone(),
        model: car.model.clone(),
        sold_at,
        delete_at,
        remaining_secs,
        remaining_text: remaining_text(remaining_secs),
        is_overdue,
        is_urgent: !is_overdue && remaining_secs < DAY,
    })
}

/// `2d 5h`, `7h`, or a notice once the window has passed.
pub fn remaining_text(remaining_secs: i64) -> String {
    if remaining_secs <= 0 {
        return "deleting soon".to_string();
    }
    let hours = remaining_secs / HOUR;
    let (days, hours) = (hours / 24, hours % 24);
    if days > 0 {
        format!("{days}d {hours}h")
    } else {
        format!("{hours}h")
    }
}
