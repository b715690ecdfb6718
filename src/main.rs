use std::time::Instant;

use astra::Server;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::{now_unix, App};
use crate::config::AppConfig;
use crate::i18n::Locale;
use crate::db::connection::init_db;
use crate::responses::error_response;
use crate::router::handle;

mod app;
mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod forms;
mod handlers;
mod i18n;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    if config.uses_default_password() {
        warn!("ADMIN_PASSWORD is not set, the default admin password is in use");
    }

    let app = App::new(config);
    if let Err(e) = init_db(&app.db) {
        error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let addr = app.config.bind_addr;
    info!(%addr, workers = app.config.max_workers, "starting server");

    let server = Server::bind(&addr).max_workers(app.config.max_workers);

    let result = server.serve(move |req: astra::Request, _info| {
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let is_api = path.starts_with("/api/");

        let resp = match handle(req, &app, now_unix()) {
            Ok(resp) => resp,
            Err(err) => {
                if err.status() >= 500 {
                    error!(%method, %path, error = %err, "request failed");
                }
                error_response(&err, is_api, Locale::of_path(&path))
            }
        };

        info!(
            %method,
            %path,
            status = resp.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request"
        );
        resp
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down");
}
