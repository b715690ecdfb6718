// src/auth/admin.rs
use astra::Request;

use crate::auth::sessions::{load_session, SESSION_TTL_SECS};
use crate::auth::token::secrets_equal;
use crate::config::AppConfig;
use crate::db::connection::Database;
use crate::errors::ServerError;

pub const SESSION_COOKIE: &str = "carcity_admin_session";

/// Both fields are compared in full so a wrong username costs the same as a
/// wrong password.
pub fn verify_credentials(cfg: &AppConfig, username: &str, password: &str) -> bool {
    let user_ok = secrets_equal(username.trim(), &cfg.admin_username);
    let pass_ok = secrets_equal(password, &cfg.admin_password);
    user_ok & pass_ok
}

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={SESSION_TTL_SECS}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that makes the browser forget the session.
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Value of `name` in a `Cookie:` header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k == name).then_some(v)
    })
}

pub fn session_token(req: &Request) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find_map(|h| cookie_value(h, SESSION_COOKIE))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Logged-in admin for this request, if any.
pub fn current_admin(req: &Request, db: &Database, now: i64) -> Result<Option<String>, ServerError> {
    let Some(token) = session_token(req) else {
        return Ok(None);
    };
    db.with_conn(|conn| load_session(conn, &token, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use astra::Body;

    #[test]
    fn credentials_must_both_match() {
        let cfg = AppConfig {
            admin_username: "boss".into(),
            admin_password: "s3cret".into(),
            ..AppConfig::default()
        };
        assert!(verify_credentials(&cfg, "boss", "s3cret"));
        assert!(verify_credentials(&cfg, " boss ", "s3cret"));
        assert!(!verify_credentials(&cfg, "boss", "S3cret"));
        assert!(!verify_credentials(&cfg, "admin", "s3cret"));
    }

    #[test]
    fn cookie_attributes() {
        let c = session_cookie("abc", false);
        assert!(c.starts_with("carcity_admin_session=abc;"));
        assert!(c.contains("HttpOnly"));
        assert!(c.contains("SameSite=Lax"));
        assert!(c.contains("Max-Age=604800"));
        assert!(!c.contains("Secure"));

        assert!(session_cookie("abc", true).ends_with("; Secure"));
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
    }

    #[test]
    fn reads_token_from_cookie_header() {
        assert_eq!(
            cookie_value("theme=dark; carcity_admin_session=tok", SESSION_COOKIE),
            Some("tok")
        );
        assert_eq!(cookie_value("theme=dark", SESSION_COOKIE), None);

        let req = http::Request::builder()
            .header("Cookie", "a=1; carcity_admin_session=xyz")
            .body(Body::empty())
            .unwrap();
        assert_eq!(session_token(&req).as_deref(), Some("xyz"));

        let req = http::Request::builder()
            .header("Cookie", "carcity_admin_session=")
            .body(Body::empty())
            .unwrap();
        assert_eq!(session_token(&req), None);
    }
}
