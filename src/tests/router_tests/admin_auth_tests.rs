use crate::app::now_unix;
use crate::router::handle;
use crate::tests::utils::{
    admin_cookie, body_string, get, init_test_app, location, post_form, TEST_PASSWORD,
};

#[test]
fn admin_pages_redirect_to_login_without_session() {
    let app = init_test_app();
    let now = now_unix();

    for uri in ["/admin", "/admin/dashboard", "/admin/cars", "/admin/leads"] {
        let resp = handle(get(uri, None), &app, now).unwrap();
        assert_eq!(resp.status(), 303, "{uri}");
        assert_eq!(location(&resp), "/admin/login", "{uri}");
    }

    let stale = handle(
        get("/admin/dashboard", Some("carcity_admin_session=not-a-real-token")),
        &app,
        now,
    )
    .unwrap();
    assert_eq!(location(&stale), "/admin/login");
}

#[test]
fn login_page_loads() {
    let app = init_test_app();
    let resp = handle(get("/admin/login", None), &app, now_unix()).unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Admin sign in"));
    assert!(body.contains("form"));
}

#[test]
fn good_login_sets_session_cookie() {
    let app = init_test_app();
    let now = now_unix();

    let form = format!("username=admin&password={TEST_PASSWORD}");
    let resp = handle(post_form("/admin/login", &form, None), &app, now).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/admin/dashboard");

    let set_cookie = resp
        .headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .expect("Missing Set-Cookie")
        .to_string();
    assert!(set_cookie.starts_with("carcity_admin_session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    // The cookie opens the dashboard.
    let cookie = set_cookie.split(';').next().unwrap();
    let dash = handle(get("/admin/dashboard", Some(cookie)), &app, now).unwrap();
    assert_eq!(dash.status(), 200);
    assert!(body_string(dash).contains("Dashboard"));
}

#[test]
fn bad_login_is_rejected() {
    let app = init_test_app();
    let now = now_unix();

    let resp = handle(
        post_form("/admin/login", "username=admin&password=guess", None),
        &app,
        now,
    )
    .unwrap();
    assert_eq!(resp.status(), 401);
    assert!(resp.headers().get("Set-Cookie").is_none());
    assert!(body_string(resp).contains("Invalid credentials"));

    let empty = handle(post_form("/admin/login", "username=&password=", None), &app, now).unwrap();
    assert_eq!(empty.status(), 422);
}

#[test]
fn login_page_redirects_when_signed_in() {
    let app = init_test_app();
    let cookie = admin_cookie(&app);

    let resp = handle(get("/admin/login", Some(&cookie)), &app, now_unix()).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/admin/dashboard");
}

#[test]
fn logout_revokes_the_session() {
    let app = init_test_app();
    let now = now_unix();
    let cookie = admin_cookie(&app);

    let resp = handle(post_form("/admin/logout", "", Some(&cookie)), &app, now).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/admin/login");
    let cleared = resp.headers().get("Set-Cookie").unwrap().to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let after = handle(get("/admin/dashboard", Some(&cookie)), &app, now).unwrap();
    assert_eq!(location(&after), "/admin/login");
}
