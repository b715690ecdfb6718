use crate::app::now_unix;
use crate::db::cars::{get_car, insert_car};
use crate::domain::car::{sample_input, CarStatus};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{admin_cookie, body_string, get, init_test_app, post_form};

const DAY: i64 = 24 * 60 * 60;

fn json_of(resp: astra::Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).expect("Body is not JSON")
}

#[test]
fn auth_check_reflects_session() {
    let app = init_test_app();
    let now = now_unix();

    let anon = json_of(handle(get("/api/auth/check", None), &app, now).unwrap());
    assert_eq!(anon["authenticated"], false);

    let cookie = admin_cookie(&app);
    let admin = json_of(handle(get("/api/auth/check", Some(&cookie)), &app, now).unwrap());
    assert_eq!(admin["authenticated"], true);
}

#[test]
fn public_car_list_hides_sold_cars() {
    let app = init_test_app();
    let now = now_unix();
    let mut sold = sample_input();
    sold.status = CarStatus::Sold;
    let sold = app
        .db
        .with_conn(|conn| {
            insert_car(conn, &sample_input(), now)?;
            insert_car(conn, &sold, now)
        })
        .unwrap();

    let public = json_of(handle(get("/api/cars", None), &app, now).unwrap());
    assert_eq!(public.as_array().unwrap().len(), 1);

    let cookie = admin_cookie(&app);
    let all = json_of(handle(get("/api/cars", Some(&cookie)), &app, now).unwrap());
    assert_eq!(all.as_array().unwrap().len(), 2);

    let only_sold = json_of(handle(get("/api/cars?status=sold", Some(&cookie)), &app, now).unwrap());
    assert_eq!(only_sold.as_array().unwrap().len(), 1);

    let hidden = handle(get(&format!("/api/cars/{}", sold.id), None), &app, now);
    assert!(matches!(hidden, Err(ServerError::NotFound)));
}

#[test]
fn single_car_by_id() {
    let app = init_test_app();
    let now = now_unix();
    let car = app
        .db
        .with_conn(|conn| insert_car(conn, &sample_input(), now))
        .unwrap();

    let resp = handle(get(&format!("/api/cars/{}", car.id), None), &app, now).unwrap();
    assert_eq!(resp.headers().get("Content-Type").unwrap(), "application/json");
    let json = json_of(resp);
    assert_eq!(json["shortId"], car.short_id.as_str());

    assert!(matches!(
        handle(get("/api/cars/abc", None), &app, now),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn cleanup_requires_admin() {
    let app = init_test_app();
    let now = now_unix();

    for req in [get("/api/cars/cleanup", None), post_form("/api/cars/cleanup", "", None)] {
        match handle(req, &app, now) {
            Err(err @ ServerError::Unauthorized(_)) => assert_eq!(err.status(), 401),
            other => panic!("expected 401, got {:?}", other.map(|r| r.status())),
        }
    }
}

#[test]
fn cleanup_lists_and_deletes_expired_sold_cars() {
    let app = init_test_app();
    let now = now_unix();
    let cookie = admin_cookie(&app);
    let mut sold = sample_input();
    sold.status = CarStatus::Sold;
    let (expired, fresh) = app
        .db
        .with_conn(|conn| Ok((insert_car(conn, &sold, now - 5 * DAY)?, insert_car(conn, &sold, now - DAY)?)))
        .unwrap();

    let pending = json_of(handle(get("/api/cars/cleanup", Some(&cookie)), &app, now).unwrap());
    assert_eq!(pending["retentionDays"], 3);
    let list = pending["pending"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], expired.id);
    assert_eq!(list[0]["isOverdue"], true);
    assert_eq!(list[1]["isOverdue"], false);

    let done = json_of(
        handle(post_form("/api/cars/cleanup", "", Some(&cookie)), &app, now).unwrap(),
    );
    assert_eq!(done["success"], true);
    assert_eq!(done["deleted"], 1);

    let (gone, kept) = app
        .db
        .with_conn(|conn| Ok((get_car(conn, expired.id)?, get_car(conn, fresh.id)?)))
        .unwrap();
    assert!(gone.is_none());
    assert!(kept.is_some());
}
