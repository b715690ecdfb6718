use std::io::Read;

use astra::{Body, Response};
use http::{Method, Request};

use crate::app::{now_unix, App};
use crate::auth::admin::SESSION_COOKIE;
use crate::auth::sessions::create_session;
use crate::config::AppConfig;
use crate::db::connection::init_db;

pub const TEST_PASSWORD: &str = "test-password";

/// Fresh app over its own SQLite file, so tests can run in parallel.
pub fn init_test_app() -> App {
    let path = std::env::temp_dir().join(format!("carcity-test-{}.sqlite3", rand::random::<u64>()));

    let config = AppConfig {
        db_path: path.to_string_lossy().into_owned(),
        admin_username: "admin".into(),
        admin_password: TEST_PASSWORD.into(),
        ..AppConfig::default()
    };
    let app = App::new(config);

    init_db(&app.db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    app
}

/// `Cookie` header value for a live admin session.
pub fn admin_cookie(app: &App) -> String {
    let token = app
        .db
        .with_conn(|conn| create_session(conn, "admin", now_unix()))
        .expect("Failed to create session");
    format!("{SESSION_COOKIE}={token}")
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::from(form.as_bytes().to_vec())).unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
