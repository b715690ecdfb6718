use chrono::{DateTime, Utc};
use maud::{html, Markup};

pub mod car_card;
pub mod error;
pub mod lead_forms;
pub mod pagination;

pub use car_card::{car_card, status_badge};
pub use error::error_page;
pub use lead_forms::{bodyshop_form, inquiry_form};
pub use pagination::pagination;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h3 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// `2024-03-01 14:05` in UTC.
pub fn fmt_datetime(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
