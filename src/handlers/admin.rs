//! Back office. Every handler here runs behind the session check in the router,
//! except the login/logout pair.

use astra::Request;
use tracing::{info, warn};
use validator::Validate;

use crate::app::App;
use crate::auth::admin::{
    clear_session_cookie, current_admin, session_cookie, session_token, verify_credentials,
};
use crate::auth::sessions::{create_session, purge_expired, revoke_session};
use crate::db::cars::{
    car_stats, delete_car, get_car, insert_car, list_cars, pending_deletions, set_status,
    sweep_expired_sold_cars, update_car, CarFilter,
};
use crate::db::leads::{
    delete_bodyshop_lead, delete_lead, lead_stats, list_bodyshop_leads, list_leads,
    set_bodyshop_lead_handled, set_lead_handled,
};
use crate::domain::car::{CarInput, CarStatus};
use crate::errors::{ResultResp, ServerError};
use crate::forms::{read_body, read_text_body, FormData, LoginInput, MAX_UPLOAD_BYTES};
use crate::responses::html::html_response_with_status;
use crate::responses::{csv_response, html_response, redirect, redirect_with_cookie, xlsx_response};
use crate::spreadsheets::{cars_to_csv, csv_export, export_cars_xlsx, export_xlsx, import_cars, ImportSummary};
use crate::templates::pages;

const RECENT_LIMIT: usize = 5;

/// GET /admin/login
pub fn login_form(req: &Request, app: &App, now: i64) -> ResultResp {
    if current_admin(req, &app.db, now)?.is_some() {
        return redirect("/admin/dashboard");
    }
    html_response(pages::login_page(None))
}

/// POST /admin/login
pub fn login(req: Request, app: &App, now: i64) -> ResultResp {
    let form = FormData::from_request(req)?;
    let input = LoginInput::from_form(&form);

    if input.validate().is_err() {
        return html_response_with_status(422, pages::login_page(Some("Enter a username and password.")));
    }

    if !verify_credentials(&app.config, &input.username, &input.password) {
        warn!(username = %input.username, "failed admin login");
        return html_response_with_status(401, pages::login_page(Some("Invalid credentials.")));
    }

    let token = app.db.with_conn(|conn| {
        let purged = purge_expired(conn, now)?;
        if purged > 0 {
            info!(purged, "purged stale admin sessions");
        }
        create_session(conn, &app.config.admin_username, now)
    })?;
    info!(username = %app.config.admin_username, "admin logged in");

    redirect_with_cookie(
        "/admin/dashboard",
        &session_cookie(&token, app.config.secure_cookies),
    )
}

/// POST /admin/logout
pub fn logout(req: &Request, app: &App, now: i64) -> ResultResp {
    if let Some(token) = session_token(req) {
        app.db.with_conn(|conn| revoke_session(conn, &token, now))?;
    }
    redirect_with_cookie("/admin/login", &clear_session_cookie(app.config.secure_cookies))
}

/// Best-effort sweep. Failures are logged and reported as zero deletions.
fn sweep_quietly(app: &App, now: i64) -> usize {
    let retention = app.config.retention_secs();
    match app
        .db
        .with_conn(|conn| sweep_expired_sold_cars(conn, now, retention))
    {
        Ok(n) => {
            if n > 0 {
                info!(deleted = n, "removed expired sold cars");
            }
            n
        }
        Err(e) => {
            warn!(error = %e, "sold car sweep failed");
            0
        }
    }
}

/// GET /admin/dashboard. Runs the sold-car sweep before rendering.
pub fn dashboard(app: &App, username: String, now: i64) -> ResultResp {
    let swept = sweep_quietly(app, now);
    let retention = app.config.retention_secs();

    let vm = app.db.with_conn(|conn| {
        Ok(pages::DashboardVm {
            username,
            cars: car_stats(conn)?,
            leads: lead_stats(conn)?,
            recent_cars: list_cars(
                conn,
                &CarFilter {
                    limit: Some(RECENT_LIMIT),
                    ..Default::default()
                },
            )?,
            recent_leads: list_leads(conn, None, Some(RECENT_LIMIT))?,
            pending: pending_deletions(conn, now, retention)?,
            swept,
            retention_days: app.config.sold_retention_days,
        })
    })?;

    html_response(pages::dashboard_page(&vm))
}

fn import_summary_from(query: &FormData) -> Option<ImportSummary> {
    let num = |k: &str| query.get(k).and_then(|v| v.parse::<usize>().ok());
    Some(ImportSummary {
        imported: num("imported")?,
        failed: num("failed").unwrap_or(0),
        total: num("total").unwrap_or(0),
    })
}

/// GET /admin/cars
pub fn cars(req: &Request, app: &App) -> ResultResp {
    let query = FormData::from_query(req);
    let status_filter = query.get("status").and_then(CarStatus::parse);

    let cars = app.db.with_conn(|conn| {
        list_cars(
            conn,
            &CarFilter {
                status: status_filter,
                ..Default::default()
            },
        )
    })?;

    html_response(pages::admin_cars_page(&pages::AdminCarsVm {
        cars,
        status_filter,
        import: import_summary_from(&query),
        swept: query.get("swept").and_then(|v| v.parse().ok()),
    }))
}

fn car_form(id: Option<i64>, values: Option<CarInput>, error: Option<String>) -> pages::CarFormVm {
    match id {
        Some(id) => pages::CarFormVm {
            heading: "Edit car".into(),
            action: format!("/admin/cars/{id}"),
            values,
            error,
        },
        None => pages::CarFormVm {
            heading: "New car".into(),
            action: "/admin/cars".into(),
            values,
            error,
        },
    }
}

/// GET /admin/cars/new
pub fn new_car() -> ResultResp {
    html_response(pages::car_form_page(&car_form(None, None, None)))
}

/// GET /admin/cars/{id}/edit
pub fn edit_car(app: &App, id: i64) -> ResultResp {
    let car = app
        .db
        .with_conn(|conn| get_car(conn, id))?
        .ok_or(ServerError::NotFound)?;
    html_response(pages::car_form_page(&car_form(
        Some(id),
        Some(CarInput::from(&car)),
        None,
    )))
}

fn rerender_form(id: Option<i64>, values: Option<CarInput>, err: ServerError) -> ResultResp {
    let status = err.status();
    html_response_with_status(
        status,
        pages::car_form_page(&car_form(id, values, Some(err.public_message()))),
    )
}

/// POST /admin/cars (create) and POST /admin/cars/{id} (update).
/// Input problems re-render the form with the message.
pub fn save_car(req: Request, app: &App, id: Option<i64>, now: i64) -> ResultResp {
    let form = FormData::from_request(req)?;
    let input = match CarInput::from_form(&form) {
        Ok(input) => input,
        Err(e) => return rerender_form(id, None, e),
    };

    let saved = app.db.with_conn(|conn| match id {
        Some(id) => update_car(conn, id, &input, now),
        None => insert_car(conn, &input, now),
    });

    match saved {
        Ok(car) => {
            info!(car_id = car.id, short_id = %car.short_id, status = %car.status, "car saved");
            redirect("/admin/cars")
        }
        Err(e @ (ServerError::Validation(_) | ServerError::BadRequest(_))) => {
            rerender_form(id, Some(input), e)
        }
        Err(e) => Err(e),
    }
}

/// POST /admin/cars/{id}/status
pub fn change_status(req: Request, app: &App, id: i64, now: i64) -> ResultResp {
    let form = FormData::from_request(req)?;
    let status = form
        .get("status")
        .and_then(CarStatus::parse)
        .ok_or_else(|| ServerError::BadRequest("unknown status".into()))?;

    let car = app.db.with_conn(|conn| set_status(conn, id, status, now))?;
    info!(car_id = car.id, status = %car.status, "car status changed");
    redirect("/admin/cars")
}

/// POST /admin/cars/{id}/delete
pub fn remove_car(app: &App, id: i64) -> ResultResp {
    app.db.with_conn(|conn| delete_car(conn, id))?;
    info!(car_id = id, "car deleted");
    redirect("/admin/cars")
}

/// POST /admin/cars/cleanup
pub fn cleanup(app: &App, now: i64) -> ResultResp {
    let retention = app.config.retention_secs();
    let deleted = app
        .db
        .with_conn(|conn| sweep_expired_sold_cars(conn, now, retention))?;
    info!(deleted, "manual sold car cleanup");
    redirect(&format!("/admin/cars?swept={deleted}"))
}

/// GET /admin/cars/export.csv
pub fn download_csv(app: &App, now: i64) -> ResultResp {
    let cars = app
        .db
        .with_conn(|conn| list_cars(conn, &CarFilter::default()))?;
    csv_response(cars_to_csv(&cars), &csv_export::export_filename(now))
}

/// GET /admin/cars/export.xlsx
pub fn download_xlsx(app: &App, now: i64) -> ResultResp {
    let cars = app
        .db
        .with_conn(|conn| list_cars(conn, &CarFilter::default()))?;
    xlsx_response(export_cars_xlsx(&cars)?, &export_xlsx::export_filename(now))
}

/// POST /admin/cars/import. Takes either a raw `text/csv` body or the
/// admin form's `csv` field.
pub fn import_csv(req: Request, app: &App, now: i64) -> ResultResp {
    let is_raw_csv = req
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with(mime::TEXT_CSV.as_ref()));

    let text = if is_raw_csv {
        read_text_body(req, MAX_UPLOAD_BYTES)?
    } else {
        let form = FormData::parse(&read_body(req, MAX_UPLOAD_BYTES)?);
        form.raw("csv").unwrap_or_default().to_string()
    };

    let summary = app.db.with_conn(|conn| import_cars(conn, &text, now))?;
    info!(
        imported = summary.imported,
        failed = summary.failed,
        total = summary.total,
        "CSV import finished"
    );

    redirect(&format!(
        "/admin/cars?imported={}&failed={}&total={}",
        summary.imported, summary.failed, summary.total
    ))
}

fn handled_filter(req: &Request) -> Option<bool> {
    match FormData::from_query(req).get("handled") {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

/// GET /admin/leads
pub fn leads(req: &Request, app: &App) -> ResultResp {
    let handled = handled_filter(req);
    let leads = app.db.with_conn(|conn| list_leads(conn, handled, None))?;
    html_response(pages::leads_page(&leads, handled))
}

/// POST /admin/leads/{id}/handled
pub fn toggle_lead(req: Request, app: &App, id: i64) -> ResultResp {
    let handled = FormData::from_request(req)?.flag("handled");
    app.db.with_conn(|conn| set_lead_handled(conn, id, handled))?;
    redirect("/admin/leads")
}

/// POST /admin/leads/{id}/delete
pub fn remove_lead(app: &App, id: i64) -> ResultResp {
    app.db.with_conn(|conn| delete_lead(conn, id))?;
    info!(lead_id = id, "lead deleted");
    redirect("/admin/leads")
}

/// GET /admin/carrosserie
pub fn bodyshop_leads(req: &Request, app: &App) -> ResultResp {
    let handled = handled_filter(req);
    let leads = app.db.with_conn(|conn| list_bodyshop_leads(conn, handled))?;
    html_response(pages::bodyshop_leads_page(&leads, handled))
}

/// POST /admin/carrosserie/{id}/handled
pub fn toggle_bodyshop_lead(req: Request, app: &App, id: i64) -> ResultResp {
    let handled = FormData::from_request(req)?.flag("handled");
    app.db
        .with_conn(|conn| set_bodyshop_lead_handled(conn, id, handled))?;
    redirect("/admin/carrosserie")
}

/// POST /admin/carrosserie/{id}/delete
pub fn remove_bodyshop_lead(app: &App, id: i64) -> ResultResp {
    app.db.with_conn(|conn| delete_bodyshop_lead(conn, id))?;
    info!(lead_id = id, "body-shop request deleted");
    redirect("/admin/carrosserie")
}
