// src/auth/sessions.rs
use crate::auth::token::{generate_token_default, hash_token};
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7; // 7 days

/// Store a new admin session and return the raw token for the cookie.
pub fn create_session(conn: &Connection, username: &str, now: i64) -> Result<String, ServerError> {
    let raw_token = generate_token_default();
    let hash = hash_token(&raw_token);
    let expires_at = now + SESSION_TTL_SECS;

    conn.execute(
        r#"
        insert into admin_sessions (username, token_hash, created_at, expires_at)
        values (?, ?, ?, ?)
        "#,
        params![username, hash.as_slice(), now, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(raw_token)
}

/// Username behind a live (unexpired, unrevoked) session token.
pub fn load_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<String>, ServerError> {
    let hash = hash_token(raw_token);

    conn.query_row(
        r#"
        select username
        from admin_sessions
        where token_hash = ?
          and expires_at > ?
          and revoked_at is null
        "#,
        params![hash.as_slice(), now],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<(), ServerError> {
    let hash = hash_token(raw_token);
    conn.execute(
        "update admin_sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
        params![now, hash.as_slice()],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(())
}

/// Drop expired and revoked sessions. Returns how many rows went.
pub fn purge_expired(conn: &Connection, now: i64) -> Result<usize, ServerError> {
    conn.execute(
        "delete from admin_sessions where expires_at <= ? or revoked_at is not null",
        params![now],
    )
    .map_err(|e| ServerError::DbError(format!("purge sessions failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::test_conn;

    #[test]
    fn session_round_trip() {
        let conn = test_conn();
        let token = create_session(&conn, "admin", 100).unwrap();

        assert_eq!(
            load_session(&conn, &token, 101).unwrap().as_deref(),
            Some("admin")
        );
        assert_eq!(load_session(&conn, "forged", 101).unwrap(), None);
    }

    #[test]
    fn raw_token_is_not_stored() {
        let conn = test_conn();
        let token = create_session(&conn, "admin", 100).unwrap();

        let stored: Vec<u8> = conn
            .query_row("select token_hash from admin_sessions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(stored.len(), 32);
        assert_ne!(stored, token.as_bytes());
    }

    #[test]
    fn expired_and_revoked_sessions_are_rejected() {
        let conn = test_conn();
        let old = create_session(&conn, "admin", 0).unwrap();
        assert_eq!(load_session(&conn, &old, SESSION_TTL_SECS).unwrap(), None);

        let live = create_session(&conn, "admin", 1_000).unwrap();
        revoke_session(&conn, &live, 1_001).unwrap();
        assert_eq!(load_session(&conn, &live, 1_002).unwrap(), None);

        assert_eq!(purge_expired(&conn, SESSION_TTL_SECS).unwrap(), 2);
    }
}
