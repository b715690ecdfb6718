use astra::Body;
use http::{Method, Request};

use crate::app::now_unix;
use crate::db::cars::insert_car;
use crate::domain::car::{build_car_url, sample_input, CarStatus};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{admin_cookie, body_string, get, init_test_app, location};

#[test]
fn home_page_shows_featured_cars() {
    let app = init_test_app();
    let now = now_unix();
    app.db
        .with_conn(|conn| insert_car(conn, &sample_input(), now))
        .unwrap();

    let resp = handle(get("/en", None), &app, now).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Featured cars"));
    assert!(body.contains("M4 Competition xDrive"));
}

#[test]
fn root_redirects_to_dutch_by_default() {
    let app = init_test_app();

    let resp = handle(get("/", None), &app, now_unix()).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/nl");
}

#[test]
fn root_follows_accept_language() {
    let app = init_test_app();
    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header("Accept-Language", "en-US,en;q=0.9,nl;q=0.5")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &app, now_unix()).unwrap();
    assert_eq!(location(&resp), "/en");
}

#[test]
fn unprefixed_pages_redirect_with_query() {
    let app = init_test_app();

    let resp = handle(get("/cars?brand=Porsche&page=2", None), &app, now_unix()).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/nl/cars?brand=Porsche&page=2");
}

#[test]
fn pages_render_in_the_path_locale() {
    let app = init_test_app();
    let now = now_unix();

    let body = body_string(handle(get("/nl", None), &app, now).unwrap());
    assert!(body.contains(r#"<html lang="nl">"#));
    assert!(body.contains("Uitgelichte wagens"));
    assert!(body.contains(r#"href="/nl/cars""#));
    // switcher points at the same page in English
    assert!(body.contains(r#"href="/en" hreflang="en""#));

    let body = body_string(handle(get("/en/cars", None), &app, now).unwrap());
    assert!(body.contains(r#"<html lang="en">"#));
    assert!(body.contains("Our inventory"));
    assert!(body.contains(r#"action="/en/cars""#));
    assert!(body.contains(r#"href="/nl/cars" hreflang="nl""#));
}

#[test]
fn admins_get_a_back_office_link() {
    let app = init_test_app();
    let now = now_unix();
    let cookie = admin_cookie(&app);

    let anonymous = body_string(handle(get("/nl/about", None), &app, now).unwrap());
    assert!(!anonymous.contains("/admin/dashboard"));

    let admin = body_string(handle(get("/nl/about", Some(&cookie)), &app, now).unwrap());
    assert!(admin.contains(r#"href="/admin/dashboard""#));
}

#[test]
fn unsupported_locale_is_not_found() {
    let app = init_test_app();
    let result = handle(get("/fr/cars", None), &app, now_unix());
    assert!(matches!(result, Err(ServerError::NotFound)));
}

#[test]
fn inventory_filters_by_brand() {
    let app = init_test_app();
    let now = now_unix();
    let mut porsche = sample_input();
    porsche.brand = "Porsche".into();
    porsche.model = "911".into();
    porsche.title = "911 Carrera S".into();
    app.db
        .with_conn(|conn| {
            insert_car(conn, &sample_input(), now)?;
            insert_car(conn, &porsche, now)
        })
        .unwrap();

    let resp = handle(get("/en/cars?brand=Porsche", None), &app, now).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("cars found"));
    assert!(body.contains("911 Carrera S"));
    assert!(!body.contains("M4 Competition xDrive"));
}

#[test]
fn car_detail_resolves_by_short_id() {
    let app = init_test_app();
    let now = now_unix();
    let car = app
        .db
        .with_conn(|conn| insert_car(conn, &sample_input(), now))
        .unwrap();

    let url = format!("/en{}", build_car_url(&car.slug, &car.short_id));
    let resp = handle(get(&url, None), &app, now).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("M4 Competition xDrive"));
    assert!(body.contains("Interested?"));
    assert!(body.contains(r#"action="/en/leads""#));

    let dutch = format!("/nl{}", build_car_url(&car.slug, &car.short_id));
    assert!(body_string(handle(get(&dutch, None), &app, now).unwrap()).contains("Interesse?"));

    // The slug part is cosmetic; only the short id matters.
    let renamed = format!("/nl/cars/old-name-{}", car.short_id);
    assert_eq!(handle(get(&renamed, None), &app, now).unwrap().status(), 200);
}

#[test]
fn unknown_car_urls_are_not_found() {
    let app = init_test_app();
    let now = now_unix();

    for uri in ["/nl/cars/bmw-m4-2023-zzzzzz", "/en/cars/nodash"] {
        let result = handle(get(uri, None), &app, now);
        assert!(matches!(result, Err(ServerError::NotFound)), "{uri}");
    }
}

#[test]
fn sitemap_lists_only_listed_cars() {
    let app = init_test_app();
    let now = now_unix();
    let mut sold = sample_input();
    sold.title = "Sold Out Special".into();
    sold.status = CarStatus::Sold;
    let (listed, sold) = app
        .db
        .with_conn(|conn| Ok((insert_car(conn, &sample_input(), now)?, insert_car(conn, &sold, now)?)))
        .unwrap();

    let resp = handle(get("/sitemap.xml", None), &app, now).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("/nl/carrosserie"));
    assert!(body.contains(&format!("/en{}", listed.url())));
    assert!(body.contains(&format!("/nl{}", listed.url())));
    assert!(!body.contains(&sold.short_id));
}

#[test]
fn static_pages_and_stylesheet_load() {
    let app = init_test_app();
    let now = now_unix();

    for (uri, needle) in [
        ("/en/contact", "Contact us"),
        ("/en/carrosserie", "Request an appointment"),
        ("/en/about", "About CarCity"),
        ("/nl/contact", "Contacteer ons"),
        ("/nl/carrosserie", "Vraag een afspraak aan"),
        ("/nl/about", "Over CarCity"),
    ] {
        let resp = handle(get(uri, None), &app, now).unwrap();
        assert_eq!(resp.status(), 200, "{uri}");
        assert!(body_string(resp).contains(needle), "{uri}");
    }

    let css = handle(get("/static/main.css", None), &app, now).unwrap();
    assert_eq!(
        css.headers().get("Content-Type").unwrap(),
        "text/css; charset=utf-8"
    );
}

#[test]
fn unknown_route_is_not_found() {
    let app = init_test_app();
    let result = handle(get("/nope", None), &app, now_unix());
    assert!(matches!(result, Err(ServerError::NotFound)));
}
