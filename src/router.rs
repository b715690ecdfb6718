use astra::Request;

use crate::app::App;
use crate::auth::admin::current_admin;
use crate::errors::{ResultResp, ServerError};
use crate::handlers::{admin, api, parse_id, public};
use crate::i18n::Locale;
use crate::responses::redirect;

/// First path segments of public pages that only exist under a locale prefix.
const LOCALIZED_PAGES: &[&str] = &["cars", "contact", "carrosserie", "about"];

pub fn handle(req: Request, app: &App, now: i64) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if let Some((first, rest)) = segments.split_first() {
        if let Some(locale) = Locale::parse(first) {
            return public_routes(req, app, locale, &method, rest, now);
        }
    }

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => public::localize(&req),
        ("GET", [page, ..]) if LOCALIZED_PAGES.contains(page) => public::localize(&req),
        ("GET", ["sitemap.xml"]) => public::sitemap(app),
        ("GET", ["static", "main.css"]) => public::stylesheet(),

        // Admin session
        ("GET", ["admin", "login"]) => admin::login_form(&req, app, now),
        ("POST", ["admin", "login"]) => admin::login(req, app, now),
        ("POST", ["admin", "logout"]) => admin::logout(&req, app, now),
        (_, ["admin", ..]) => admin_routes(req, app, &method, &segments, now),

        // JSON API
        ("GET", ["api", "auth", "check"]) => api::auth_check(&req, app, now),
        ("GET", ["api", "cars"]) => api::cars(&req, app, now),
        (_, ["api", "cars", "cleanup"]) => {
            if current_admin(&req, &app.db, now)?.is_none() {
                return Err(ServerError::Unauthorized("login required".into()));
            }
            match method.as_str() {
                "GET" => api::pending(app, now),
                "POST" => api::cleanup(app, now),
                _ => Err(ServerError::NotFound),
            }
        }
        ("GET", ["api", "cars", id]) => api::car(&req, app, parse_id(id)?, now),

        _ => Err(ServerError::NotFound),
    }
}

/// The public site below `/{locale}`.
fn public_routes(
    req: Request,
    app: &App,
    locale: Locale,
    method: &str,
    segments: &[&str],
    now: i64,
) -> ResultResp {
    match (method, segments) {
        ("GET", []) => public::home(&req, app, locale, now),
        ("GET", ["cars"]) => public::inventory(&req, app, locale, now),
        ("GET", ["cars", slug_with_id]) => public::car_detail(&req, app, locale, slug_with_id, now),
        ("GET", ["contact"]) => public::contact(&req, app, locale, now),
        ("GET", ["carrosserie"]) => public::carrosserie(&req, app, locale, now),
        ("POST", ["carrosserie"]) => public::submit_bodyshop_lead(req, app, locale, now),
        ("GET", ["about"]) => public::about(&req, app, locale, now),
        ("POST", ["leads"]) => public::submit_lead(req, app, locale, now),
        _ => Err(ServerError::NotFound),
    }
}

/// Everything under /admin except login/logout. No session means a trip to
/// the login page.
fn admin_routes(req: Request, app: &App, method: &str, segments: &[&str], now: i64) -> ResultResp {
    let Some(username) = current_admin(&req, &app.db, now)? else {
        return redirect("/admin/login");
    };

    match (method, &segments[1..]) {
        ("GET", []) => redirect("/admin/dashboard"),
        ("GET", ["dashboard"]) => admin::dashboard(app, username, now),

        ("GET", ["cars"]) => admin::cars(&req, app),
        ("POST", ["cars"]) => admin::save_car(req, app, None, now),
        ("GET", ["cars", "new"]) => admin::new_car(),
        ("GET", ["cars", "export.csv"]) => admin::download_csv(app, now),
        ("GET", ["cars", "export.xlsx"]) => admin::download_xlsx(app, now),
        ("POST", ["cars", "import"]) => admin::import_csv(req, app, now),
        ("POST", ["cars", "cleanup"]) => admin::cleanup(app, now),
        ("POST", ["cars", id]) => admin::save_car(req, app, Some(parse_id(id)?), now),
        ("GET", ["cars", id, "edit"]) => admin::edit_car(app, parse_id(id)?),
        ("POST", ["cars", id, "status"]) => admin::change_status(req, app, parse_id(id)?, now),
        ("POST", ["cars", id, "delete"]) => admin::remove_car(app, parse_id(id)?),

        ("GET", ["leads"]) => admin::leads(&req, app),
        ("POST", ["leads", id, "handled"]) => admin::toggle_lead(req, app, parse_id(id)?),
        ("POST", ["leads", id, "delete"]) => admin::remove_lead(app, parse_id(id)?),

        ("GET", ["carrosserie"]) => admin::bodyshop_leads(&req, app),
        ("POST", ["carrosserie", id, "handled"]) => {
            admin::toggle_bodyshop_lead(req, app, parse_id(id)?)
        }
        ("POST", ["carrosserie", id, "delete"]) => admin::remove_bodyshop_lead(app, parse_id(id)?),

        _ => Err(ServerError::NotFound),
    }
}
