use crate::app::now_unix;
use crate::db::cars::insert_car;
use crate::db::leads::{list_bodyshop_leads, list_leads};
use crate::domain::car::sample_input;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, init_test_app, post_form};

#[test]
fn inquiry_is_stored_against_the_car() {
    let app = init_test_app();
    let now = now_unix();
    let car = app
        .db
        .with_conn(|conn| insert_car(conn, &sample_input(), now))
        .unwrap();

    let form = format!(
        "name=Jan+Peeters&email=jan%40example.com&phone=0470&message=Is+it+still+available%3F&car_id={}&website=",
        car.id
    );
    let resp = handle(post_form("/en/leads", &form, None), &app, now).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Thank you!"));

    let leads = app.db.with_conn(|conn| list_leads(conn, None, None)).unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].name, "Jan Peeters");
    assert_eq!(leads[0].car_id, Some(car.id));
    assert!(!leads[0].handled);
}

#[test]
fn honeypot_submission_looks_successful_but_is_dropped() {
    let app = init_test_app();
    let now = now_unix();

    let form = "name=Bot&email=bot%40spam.example&message=Buy+now&website=http%3A%2F%2Fspam.example";
    let resp = handle(post_form("/en/leads", form, None), &app, now).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Thank you!"));

    let leads = app.db.with_conn(|conn| list_leads(conn, None, None)).unwrap();
    assert!(leads.is_empty());
}

#[test]
fn honeypot_wins_over_malformed_fields() {
    let app = init_test_app();
    let now = now_unix();

    let form = "name=Bot&email=bot%40spam.example&message=Buy&car_id=abc&website=http%3A%2F%2Fspam.example";
    let resp = handle(post_form("/nl/leads", form, None), &app, now).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Bedankt!"));

    let leads = app.db.with_conn(|conn| list_leads(conn, None, None)).unwrap();
    assert!(leads.is_empty());
}

#[test]
fn malformed_car_id_without_honeypot_is_rejected() {
    let app = init_test_app();
    let form = "name=Jan&email=jan%40example.com&message=Hi&car_id=abc";

    let result = handle(post_form("/en/leads", form, None), &app, now_unix());
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}

#[test]
fn inquiry_for_unknown_car_is_rejected() {
    let app = init_test_app();
    let form = "name=Jan&email=jan%40example.com&message=Hi&car_id=999";

    let result = handle(post_form("/en/leads", form, None), &app, now_unix());
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}

#[test]
fn inquiry_with_bad_email_fails_validation() {
    let app = init_test_app();
    let form = "name=Jan&email=not-an-email&message=Hi";

    match handle(post_form("/en/leads", form, None), &app, now_unix()) {
        Err(err @ ServerError::Validation(_)) => {
            assert_eq!(err.status(), 422);
            assert!(err.public_message().contains("email"));
        }
        other => panic!("expected validation error, got {:?}", other.map(|r| r.status())),
    }
}

#[test]
fn bodyshop_request_is_stored() {
    let app = init_test_app();
    let now = now_unix();

    let form = "name=An&email=an%40example.com&phone=0470123456&chassis_number=wvwzzz1kz8w000001&service_type=paintwork&message=Scratch+on+door";
    let resp = handle(post_form("/en/carrosserie", form, None), &app, now).unwrap();
    assert_eq!(resp.status(), 200);

    let leads = app
        .db
        .with_conn(|conn| list_bodyshop_leads(conn, None))
        .unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].chassis_number, "WVWZZZ1KZ8W000001");
    assert_eq!(leads[0].service_type, "paintwork");
}

#[test]
fn bodyshop_request_needs_a_known_service() {
    let app = init_test_app();
    let form = "name=An&email=an%40example.com&phone=0470&chassis_number=ABC&service_type=tuning";

    let result = handle(post_form("/en/carrosserie", form, None), &app, now_unix());
    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}

#[test]
fn bodyshop_honeypot_looks_successful_but_is_dropped() {
    let app = init_test_app();
    let now = now_unix();

    // would fail validation and the service check if it got that far
    let form = "name=Bot&service_type=tuning&website=spam";
    let resp = handle(post_form("/en/carrosserie", form, None), &app, now).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains("Your appointment request is in."));

    let leads = app
        .db
        .with_conn(|conn| list_bodyshop_leads(conn, None))
        .unwrap();
    assert!(leads.is_empty());
}
