pub mod admin;
pub mod api;
pub mod public;

use astra::Request;

use crate::app::App;
use crate::auth::admin::current_admin;
use crate::errors::ServerError;

/// Public pages show the admin shortcut when a session is live.
pub fn viewer_is_admin(req: &Request, app: &App, now: i64) -> Result<bool, ServerError> {
    Ok(current_admin(req, &app.db, now)?.is_some())
}

/// Numeric path segment. Anything else is a missing page, not a bad request.
pub fn parse_id(segment: &str) -> Result<i64, ServerError> {
    segment.parse().map_err(|_| ServerError::NotFound)
}
