//! Public site: catalog, detail pages, lead forms, sitemap.

use astra::Request;
use tracing::info;
use validator::Validate;

use crate::app::App;
use crate::db::cars::{brands, featured_cars, get_car_by_short_id, list_listed_cars, similar_cars};
use crate::db::leads::{insert_bodyshop_lead, insert_lead};
use crate::domain::car::parse_car_url;
use crate::domain::inventory::{self, InventoryQuery};
use crate::domain::lead::{is_spam, BodyShopLeadInput, LeadInput, HONEYPOT_FIELD, SERVICE_TYPES};
use crate::errors::{ResultResp, ServerError};
use crate::forms::FormData;
use crate::handlers::viewer_is_admin;
use crate::i18n::Locale;
use crate::responses::{css_response, html_response, redirect, xml_response};
use crate::templates::{pages, PageCtx};

const MAIN_CSS: &str = include_str!("../../static/main.css");
const FEATURED_LIMIT: usize = 6;
const SIMILAR_LIMIT: usize = 3;

/// GET /{locale}
pub fn home(req: &Request, app: &App, locale: Locale, now: i64) -> ResultResp {
    let ctx = PageCtx::new(locale, "/", viewer_is_admin(req, app, now)?);
    let featured = app.db.with_conn(|conn| featured_cars(conn, FEATURED_LIMIT))?;
    html_response(pages::home_page(&ctx, &featured))
}

/// GET /{locale}/cars
pub fn inventory(req: &Request, app: &App, locale: Locale, now: i64) -> ResultResp {
    let ctx = PageCtx::new(locale, "/cars", viewer_is_admin(req, app, now)?);
    let query = InventoryQuery::from_pairs(FormData::from_query(req).pairs());

    let (cars, brand_list) =
        app.db
            .with_conn(|conn| Ok((list_listed_cars(conn)?, brands(conn, true)?)))?;

    let vm = pages::InventoryVm {
        ctx,
        query: &query,
        page: inventory::apply(&query, cars),
        brands: brand_list,
    };
    html_response(pages::inventory_page(&vm))
}

/// GET /{locale}/cars/{slug}-{shortId}
pub fn car_detail(
    req: &Request,
    app: &App,
    locale: Locale,
    slug_with_id: &str,
    now: i64,
) -> ResultResp {
    let (_, short_id) = parse_car_url(slug_with_id).ok_or(ServerError::NotFound)?;
    let is_admin = viewer_is_admin(req, app, now)?;

    let (car, similar) = app.db.with_conn(|conn| {
        let car = get_car_by_short_id(conn, short_id)?.ok_or(ServerError::NotFound)?;
        let similar = similar_cars(conn, &car, SIMILAR_LIMIT)?;
        Ok((car, similar))
    })?;

    let path = car.url();
    html_response(pages::car_detail_page(&pages::CarDetailVm {
        ctx: PageCtx::new(locale, &path, is_admin),
        car: &car,
        similar: &similar,
        whatsapp_number: &app.config.whatsapp_number,
    }))
}

pub fn contact(req: &Request, app: &App, locale: Locale, now: i64) -> ResultResp {
    let ctx = PageCtx::new(locale, "/contact", viewer_is_admin(req, app, now)?);
    html_response(pages::contact_page(&ctx))
}

pub fn carrosserie(req: &Request, app: &App, locale: Locale, now: i64) -> ResultResp {
    let ctx = PageCtx::new(locale, "/carrosserie", viewer_is_admin(req, app, now)?);
    html_response(pages::carrosserie_page(&ctx))
}

pub fn about(req: &Request, app: &App, locale: Locale, now: i64) -> ResultResp {
    let ctx = PageCtx::new(locale, "/about", viewer_is_admin(req, app, now)?);
    html_response(pages::about_page(&ctx))
}

fn thank_you(locale: Locale, path: &str, message: &str) -> ResultResp {
    html_response(pages::thank_you_page(&PageCtx::new(locale, path, false), message))
}

/// POST /{locale}/leads. Honeypot hits get the normal thank-you page and
/// are dropped before any field is parsed.
pub fn submit_lead(req: Request, app: &App, locale: Locale, now: i64) -> ResultResp {
    let form = FormData::from_request(req)?;
    let t = locale.text();

    if is_spam(form.raw(HONEYPOT_FIELD)) {
        info!("honeypot tripped on inquiry form, dropping");
        return thank_you(locale, "/contact", t.lead_received);
    }

    let input = LeadInput::from_form(&form)?;
    input.validate()?;
    let id = app.db.with_conn(|conn| insert_lead(conn, &input, now))?;
    info!(lead_id = id, car_id = ?input.car_id, locale = locale.as_str(), "new lead");

    thank_you(locale, "/contact", t.lead_received)
}

/// POST /{locale}/carrosserie
pub fn submit_bodyshop_lead(req: Request, app: &App, locale: Locale, now: i64) -> ResultResp {
    let form = FormData::from_request(req)?;
    let t = locale.text();

    if is_spam(form.raw(HONEYPOT_FIELD)) {
        info!("honeypot tripped on body-shop form, dropping");
        return thank_you(locale, "/carrosserie", t.appointment_received);
    }

    let input = BodyShopLeadInput::from_form(&form);
    input.validate()?;
    if !SERVICE_TYPES.iter().any(|(v, _)| *v == input.service_type) {
        return Err(ServerError::BadRequest("unknown service type".into()));
    }
    let id = app.db.with_conn(|conn| insert_bodyshop_lead(conn, &input, now))?;
    info!(
        lead_id = id,
        service = %input.service_type,
        locale = locale.as_str(),
        "new body-shop request"
    );

    thank_you(locale, "/carrosserie", t.appointment_received)
}

/// GET / and unprefixed public pages: send the visitor to the same page in
/// the language their browser asks for.
pub fn localize(req: &Request) -> ResultResp {
    let accept = req
        .headers()
        .get("Accept-Language")
        .and_then(|v| v.to_str().ok());
    let mut target = Locale::negotiate(accept).href(req.uri().path());
    if let Some(query) = req.uri().query() {
        target.push('?');
        target.push_str(query);
    }
    redirect(&target)
}

/// GET /sitemap.xml
pub fn sitemap(app: &App) -> ResultResp {
    let cars = app.db.with_conn(|conn| list_listed_cars(conn))?;
    xml_response(pages::sitemap_xml(&app.config.site_url, &cars))
}

pub fn stylesheet() -> ResultResp {
    css_response(MAIN_CSS)
}
