use crate::app::now_unix;
use crate::db::cars::{delete_car, insert_car};
use crate::db::leads::{insert_bodyshop_lead, insert_lead, list_bodyshop_leads, list_leads};
use crate::domain::car::sample_input;
use crate::domain::lead::{BodyShopLeadInput, LeadInput};
use crate::router::handle;
use crate::tests::utils::{admin_cookie, body_string, get, init_test_app, location, post_form};

fn lead(name: &str, car_id: Option<i64>) -> LeadInput {
    LeadInput {
        name: name.into(),
        email: "buyer@example.com".into(),
        message: "Can I book a test drive?".into(),
        car_id,
        ..LeadInput::default()
    }
}

#[test]
fn leads_list_shows_car_and_filters_on_handled() {
    let app = init_test_app();
    let now = now_unix();
    let cookie = admin_cookie(&app);
    app.db
        .with_conn(|conn| {
            let car = insert_car(conn, &sample_input(), now)?;
            insert_lead(conn, &lead("Open Olivia", Some(car.id)), now)?;
            let done = insert_lead(conn, &lead("Done Dirk", None), now)?;
            crate::db::leads::set_lead_handled(conn, done, true)
        })
        .unwrap();

    let all = body_string(handle(get("/admin/leads", Some(&cookie)), &app, now).unwrap());
    assert!(all.contains("Open Olivia"));
    assert!(all.contains("Done Dirk"));
    assert!(all.contains("M4 Competition xDrive"));

    let open = body_string(
        handle(get("/admin/leads?handled=false", Some(&cookie)), &app, now).unwrap(),
    );
    assert!(open.contains("Open Olivia"));
    assert!(!open.contains("Done Dirk"));
}

#[test]
fn toggle_and_delete_lead() {
    let app = init_test_app();
    let now = now_unix();
    let cookie = admin_cookie(&app);
    let id = app
        .db
        .with_conn(|conn| insert_lead(conn, &lead("Toggle Tom", None), now))
        .unwrap();

    let resp = handle(
        post_form(&format!("/admin/leads/{id}/handled"), "handled=true", Some(&cookie)),
        &app,
        now,
    )
    .unwrap();
    assert_eq!(location(&resp), "/admin/leads");
    let leads = app.db.with_conn(|conn| list_leads(conn, Some(true), None)).unwrap();
    assert_eq!(leads.len(), 1);

    handle(
        post_form(&format!("/admin/leads/{id}/delete"), "", Some(&cookie)),
        &app,
        now,
    )
    .unwrap();
    let leads = app.db.with_conn(|conn| list_leads(conn, None, None)).unwrap();
    assert!(leads.is_empty());
}

#[test]
fn lead_survives_car_deletion() {
    let app = init_test_app();
    let now = now_unix();
    let leads = app
        .db
        .with_conn(|conn| {
            let car = insert_car(conn, &sample_input(), now)?;
            insert_lead(conn, &lead("Kept Karin", Some(car.id)), now)?;
            delete_car(conn, car.id)?;
            list_leads(conn, None, None)
        })
        .unwrap();

    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].car_id, None);
}

#[test]
fn bodyshop_requests_are_managed() {
    let app = init_test_app();
    let now = now_unix();
    let cookie = admin_cookie(&app);
    let input = BodyShopLeadInput {
        name: "Body Bram".into(),
        email: "bram@example.com".into(),
        phone: "0470".into(),
        chassis_number: "VF1ABC".into(),
        service_type: "dent_removal".into(),
        ..BodyShopLeadInput::default()
    };
    let id = app
        .db
        .with_conn(|conn| insert_bodyshop_lead(conn, &input, now))
        .unwrap();

    let page = body_string(handle(get("/admin/carrosserie", Some(&cookie)), &app, now).unwrap());
    assert!(page.contains("Body Bram"));
    assert!(page.contains("Dent removal"));

    handle(
        post_form(&format!("/admin/carrosserie/{id}/handled"), "handled=true", Some(&cookie)),
        &app,
        now,
    )
    .unwrap();
    let handled = app
        .db
        .with_conn(|conn| list_bodyshop_leads(conn, Some(true)))
        .unwrap();
    assert_eq!(handled.len(), 1);

    let resp = handle(
        post_form(&format!("/admin/carrosserie/{id}/delete"), "", Some(&cookie)),
        &app,
        now,
    )
    .unwrap();
    assert_eq!(location(&resp), "/admin/carrosserie");
}
