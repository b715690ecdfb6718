// src/config.rs
use crate::errors::ServerError;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

#[derive(Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    /// Absolute base used for sitemap entries, no trailing slash.
    pub site_url: String,
    /// Adds `Secure` to the admin session cookie.
    pub secure_cookies: bool,
    pub sold_retention_days: i64,
    pub whatsapp_number: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: "carcity.sqlite3".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            site_url: "http://localhost:3000".to_string(),
            secure_cookies: false,
            sold_retention_days: 3,
            whatsapp_number: "+32123456789".to_string(),
            admin_username: "admin".to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("db_path", &self.db_path)
            .field("bind_addr", &self.bind_addr)
            .field("max_workers", &self.max_workers)
            .field("site_url", &self.site_url)
            .field("secure_cookies", &self.secure_cookies)
            .field("sold_retention_days", &self.sold_retention_days)
            .field("admin_username", &self.admin_username)
            .finish_non_exhaustive()
    }
}

impl AppConfig {
    /// Read settings from the process environment (after `.env` is loaded).
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("CARCITY_DB_PATH") {
            cfg.db_path = v;
        }
        if let Some(v) = lookup("CARCITY_BIND_ADDR") {
            cfg.bind_addr = parse_value("CARCITY_BIND_ADDR", &v)?;
        }
        if let Some(v) = lookup("CARCITY_MAX_WORKERS") {
            cfg.max_workers = parse_value("CARCITY_MAX_WORKERS", &v)?;
            if cfg.max_workers == 0 {
                return Err(ServerError::Config(
                    "CARCITY_MAX_WORKERS must be at least 1".into(),
                ));
            }
        }
        if let Some(v) = lookup("CARCITY_SITE_URL") {
            cfg.site_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup("CARCITY_SECURE_COOKIES") {
            cfg.secure_cookies = parse_bool("CARCITY_SECURE_COOKIES", &v)?;
        }
        if let Some(v) = lookup("CARCITY_SOLD_RETENTION_DAYS") {
            cfg.sold_retention_days = parse_value("CARCITY_SOLD_RETENTION_DAYS", &v)?;
            if cfg.sold_retention_days < 0 {
                return Err(ServerError::Config(
                    "CARCITY_SOLD_RETENTION_DAYS must not be negative".into(),
                ));
            }
        }
        if let Some(v) = lookup("CARCITY_WHATSAPP_NUMBER") {
            cfg.whatsapp_number = v;
        }
        if let Some(v) = lookup("ADMIN_USERNAME") {
            cfg.admin_username = v;
        }
        if let Some(v) = lookup("ADMIN_PASSWORD") {
            cfg.admin_password = v;
        }

        Ok(cfg)
    }

    pub fn retention_secs(&self) -> i64 {
        self.sold_retention_days * 24 * 60 * 60
    }

    pub fn uses_default_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ServerError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ServerError::Config(format!("{key}={raw:?}: {e}")))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ServerError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ServerError::Config(format!(
            "{key}={other:?}: expected true or false"
        ))),
    }
}
