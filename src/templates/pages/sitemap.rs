use crate::domain::car::Car;
use crate::i18n::Locale;
use chrono::{DateTime, Utc};
use maud::{html, Markup, PreEscaped};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const STATIC_PATHS: &[(&str, &str, &str)] = &[
    ("/", "daily", "1.0"),
    ("/cars", "daily", "0.9"),
    ("/carrosserie", "monthly", "0.6"),
    ("/about", "monthly", "0.5"),
    ("/contact", "monthly", "0.5"),
];

fn url_entry(loc: &str, lastmod: Option<i64>, freq: &str, priority: &str) -> Markup {
    let lastmod = lastmod
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
        .map(|d| d.format("%Y-%m-%d").to_string());

    html! {
        url {
            loc { (loc) }
            @if let Some(day) = lastmod {
                lastmod { (day) }
            }
            changefreq { (freq) }
            priority { (priority) }
        }
    }
}

/// Every public page in every locale. `cars` should already be limited to
/// listed (available/reserved) cars.
pub fn sitemap_xml(site_url: &str, cars: &[Car]) -> String {
    let base = site_url.trim_end_matches('/');

    html! {
        (PreEscaped(XML_DECLARATION))
        urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" {
            @for locale in Locale::ALL {
                @for (path, freq, priority) in STATIC_PATHS {
                    (url_entry(&format!("{base}{}", locale.href(path)), None, freq, priority))
                }
                @for car in cars {
                    (url_entry(
                        &format!("{base}{}", locale.href(&car.url())),
                        Some(car.updated_at),
                        "weekly",
                        "0.8",
                    ))
                }
            }
        }
    }
    .into_string()
}
