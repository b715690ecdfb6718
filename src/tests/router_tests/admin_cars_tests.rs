use astra::Body;
use http::{Method, Request};

use crate::app::now_unix;
use crate::db::cars::{get_car, insert_car, list_cars, CarFilter};
use crate::domain::car::{sample_input, CarStatus};
use crate::router::handle;
use crate::tests::utils::{admin_cookie, body_string, get, init_test_app, location, post_form};

const DAY: i64 = 24 * 60 * 60;

const GOLF_FORM: &str = "title=Golf+GTI&brand=VW&model=Golf&year=2021&price=24.900&mileage=30+000\
&fuel_type=petrol&transmission=manual&body_type=hatchback&condition=used\
&color_exterior=Tornado+Red&features=Adaptive+cruise%0D%0AHeated+seats\
&description=One+owner.&status=available";

#[test]
fn dashboard_sweeps_expired_sold_cars() {
    let app = init_test_app();
    let now = now_unix();
    let cookie = admin_cookie(&app);

    let mut sold = sample_input();
    sold.status = CarStatus::Sold;
    let (old, recent) = app
        .db
        .with_conn(|conn| {
            let old = insert_car(conn, &sold, now - 4 * DAY)?;
            let recent = insert_car(conn, &sold, now - DAY)?;
            Ok((old, recent))
        })
        .unwrap();

    let resp = handle(get("/admin/dashboard", Some(&cookie)), &app, now).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Dashboard"));

    let (old_after, recent_after) = app
        .db
        .with_conn(|conn| Ok((get_car(conn, old.id)?, get_car(conn, recent.id)?)))
        .unwrap();
    assert!(old_after.is_none());
    assert!(recent_after.is_some());
}

#[test]
fn create_car_from_form() {
    let app = init_test_app();
    let now = now_unix();
    let cookie = admin_cookie(&app);

    let resp = handle(post_form("/admin/cars", GOLF_FORM, Some(&cookie)), &app, now).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/admin/cars");

    let cars = app
        .db
        .with_conn(|conn| list_cars(conn, &CarFilter::default()))
        .unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].price, 24_900);
    assert_eq!(cars[0].mileage, 30_000);
    assert_eq!(cars[0].features, vec!["Adaptive cruise", "Heated seats"]);
    assert_eq!(cars[0].slug, "vw-golf-2021-golf-gti");
    assert_eq!(cars[0].short_id.len(), 6);
}

#[test]
fn invalid_car_form_is_rendered_again() {
    let app = init_test_app();
    let cookie = admin_cookie(&app);
    let form = GOLF_FORM.replace("title=Golf+GTI", "title=");

    let resp = handle(post_form("/admin/cars", &form, Some(&cookie)), &app, now_unix()).unwrap();
    assert_eq!(resp.status(), 422);
    let body = body_string(resp);
    assert!(body.contains("Title is required"));
    // What the admin typed is kept.
    assert!(body.contains("Tornado Red"));
}

#[test]
fn edit_keeps_short_id_and_updates_slug() {
    let app = init_test_app();
    let now = now_unix();
    let cookie = admin_cookie(&app);
    let car = app
        .db
        .with_conn(|conn| insert_car(conn, &sample_input(), now))
        .unwrap();

    let edit = handle(get(&format!("/admin/cars/{}/edit", car.id), Some(&cookie)), &app, now).unwrap();
    assert_eq!(edit.status(), 200);
    assert!(body_string(edit).contains("Isle of Man Green"));

    let resp = handle(
        post_form(&format!("/admin/cars/{}", car.id), GOLF_FORM, Some(&cookie)),
        &app,
        now,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);

    let updated = app.db.with_conn(|conn| get_car(conn, car.id)).unwrap().unwrap();
    assert_eq!(updated.short_id, car.short_id);
    assert_eq!(updated.slug, "vw-golf-2021-golf-gti");
}

#[test]
fn quick_status_change_stamps_sale_time() {
    let app = init_test_app();
    let now = now_unix();
    let cookie = admin_cookie(&app);
    let car = app
        .db
        .with_conn(|conn| insert_car(conn, &sample_input(), now - DAY))
        .unwrap();
    assert_eq!(car.sold_at, None);

    let uri = format!("/admin/cars/{}/status", car.id);
    let resp = handle(post_form(&uri, "status=sold", Some(&cookie)), &app, now).unwrap();
    assert_eq!(resp.status(), 303);

    let sold = app.db.with_conn(|conn| get_car(conn, car.id)).unwrap().unwrap();
    assert_eq!(sold.status, CarStatus::Sold);
    assert_eq!(sold.sold_at, Some(now));

    handle(post_form(&uri, "status=available", Some(&cookie)), &app, now).unwrap();
    let back = app.db.with_conn(|conn| get_car(conn, car.id)).unwrap().unwrap();
    assert_eq!(back.sold_at, None);
}

#[test]
fn delete_car_removes_it() {
    let app = init_test_app();
    let now = now_unix();
    let cookie = admin_cookie(&app);
    let car = app
        .db
        .with_conn(|conn| insert_car(conn, &sample_input(), now))
        .unwrap();

    let uri = format!("/admin/cars/{}/delete", car.id);
    let resp = handle(post_form(&uri, "", Some(&cookie)), &app, now).unwrap();
    assert_eq!(resp.status(), 303);
    assert!(app.db.with_conn(|conn| get_car(conn, car.id)).unwrap().is_none());
}

#[test]
fn csv_export_has_header_and_rows() {
    let app = init_test_app();
    let now = now_unix();
    let cookie = admin_cookie(&app);
    app.db
        .with_conn(|conn| insert_car(conn, &sample_input(), now))
        .unwrap();

    let resp = handle(get("/admin/cars/export.csv", Some(&cookie)), &app, now).unwrap();
    assert_eq!(resp.status(), 200);
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("cars-export-"));

    let body = body_string(resp);
    let mut lines = body.lines();
    assert!(lines.next().unwrap().starts_with("id,shortId,title,brand"));
    assert!(lines.next().unwrap().contains("\"M4 Competition xDrive\""));
}

#[test]
fn xlsx_export_downloads() {
    let app = init_test_app();
    let cookie = admin_cookie(&app);

    let resp = handle(get("/admin/cars/export.xlsx", Some(&cookie)), &app, now_unix()).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
}

#[test]
fn csv_import_reports_summary() {
    let app = init_test_app();
    let now = now_unix();
    let cookie = admin_cookie(&app);

    let csv = "title,brand,model,year,price,status\n\
               Golf GTI,VW,Golf,2021,24900,available\n\
               Missing year,VW,Polo,,9000,available\n\
               Old Mini,Mini,Cooper,1999,8000,sold\n";
    let req = Request::builder()
        .method(Method::POST)
        .uri("/admin/cars/import")
        .header("Content-Type", "text/csv")
        .header("Cookie", &cookie)
        .body(Body::from(csv.as_bytes().to_vec()))
        .unwrap();

    let resp = handle(req, &app, now).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/admin/cars?imported=2&failed=1&total=3");

    let cars = app
        .db
        .with_conn(|conn| list_cars(conn, &CarFilter::default()))
        .unwrap();
    assert_eq!(cars.len(), 2);
    let mini = cars.iter().find(|c| c.brand == "Mini").unwrap();
    assert_eq!(mini.sold_at, Some(now));

    let page = handle(get(location(&resp), Some(&cookie)), &app, now).unwrap();
    assert!(body_string(page).contains("Imported 2 of 3 rows"));
}

#[test]
fn manual_cleanup_redirects_with_count() {
    let app = init_test_app();
    let now = now_unix();
    let cookie = admin_cookie(&app);
    let mut sold = sample_input();
    sold.status = CarStatus::Sold;
    app.db
        .with_conn(|conn| insert_car(conn, &sold, now - 10 * DAY))
        .unwrap();

    let resp = handle(post_form("/admin/cars/cleanup", "", Some(&cookie)), &app, now).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/admin/cars?swept=1");
}
