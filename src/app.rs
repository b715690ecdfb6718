use chrono::Utc;

use crate::config::AppConfig;
use crate::db::connection::Database;

/// Everything a request handler needs.
#[derive(Debug, Clone)]
pub struct App {
    pub db: Database,
    pub config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            db: Database::new(config.db_path.clone()),
            config,
        }
    }
}

pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}
