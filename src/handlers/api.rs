//! JSON endpoints. Public callers only ever see listed cars.

use astra::Request;
use serde_json::json;
use tracing::info;

use crate::app::App;
use crate::db::cars::{get_car, list_cars, pending_deletions, sweep_expired_sold_cars, CarFilter};
use crate::domain::car::CarStatus;
use crate::errors::{ResultResp, ServerError};
use crate::forms::FormData;
use crate::handlers::viewer_is_admin;
use crate::responses::json_response;

/// GET /api/cars?featured=true&status=sold
pub fn cars(req: &Request, app: &App, now: i64) -> ResultResp {
    let is_admin = viewer_is_admin(req, app, now)?;
    let query = FormData::from_query(req);

    let status = match query.get("status") {
        Some(raw) => Some(
            CarStatus::parse(raw)
                .ok_or_else(|| ServerError::BadRequest(format!("unknown status {raw:?}")))?,
        ),
        None => None,
    };
    let filter = CarFilter {
        status,
        featured: query.get("featured").map(|v| v == "true"),
        limit: None,
    };

    let mut cars = app.db.with_conn(|conn| list_cars(conn, &filter))?;
    if !is_admin {
        cars.retain(|c| c.status.is_listed());
    }
    json_response(200, &cars)
}

/// GET /api/cars/{id}
pub fn car(req: &Request, app: &App, id: i64, now: i64) -> ResultResp {
    let is_admin = viewer_is_admin(req, app, now)?;
    let car = app
        .db
        .with_conn(|conn| get_car(conn, id))?
        .filter(|c| is_admin || c.status.is_listed())
        .ok_or(ServerError::NotFound)?;
    json_response(200, &car)
}

/// GET /api/auth/check
pub fn auth_check(req: &Request, app: &App, now: i64) -> ResultResp {
    let authenticated = viewer_is_admin(req, app, now)?;
    json_response(200, &json!({ "authenticated": authenticated }))
}

/// GET /api/cars/cleanup: sold cars waiting for removal.
pub fn pending(app: &App, now: i64) -> ResultResp {
    let retention = app.config.retention_secs();
    let pending = app
        .db
        .with_conn(|conn| pending_deletions(conn, now, retention))?;
    json_response(
        200,
        &json!({
            "retentionDays": app.config.sold_retention_days,
            "pending": pending,
        }),
    )
}

/// POST /api/cars/cleanup
pub fn cleanup(app: &App, now: i64) -> ResultResp {
    let retention = app.config.retention_secs();
    let deleted = app
        .db
        .with_conn(|conn| sweep_expired_sold_cars(conn, now, retention))?;
    info!(deleted, "sold car cleanup via API");
    json_response(200, &json!({ "success": true, "deleted": deleted }))
}
