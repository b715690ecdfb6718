use rusqlite::Connection;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::errors::ServerError;

pub const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

// Thread-local connection slots, one per database path.
thread_local! {
    static DB_CONNS: RefCell<HashMap<String, Connection>> = RefCell::new(HashMap::new());
}

#[derive(Debug, Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provides a mutable connection to the closure.
    /// The connection is opened on first use in each worker thread.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONNS
            .try_with(|cell| {
                let mut slots = cell.borrow_mut();
                if !slots.contains_key(&self.path) {
                    let conn = open_connection(&self.path)?;
                    slots.insert(self.path.clone(), conn);
                }
                let conn = slots
                    .get_mut(&self.path)
                    .ok_or(ServerError::InternalError)?;
                f(conn)
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

fn open_connection(path: &str) -> Result<Connection, ServerError> {
    let conn = Connection::open(path)
        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
    conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
        .map_err(|e| ServerError::DbError(format!("Configure DB failed: {e}")))?;
    Ok(conn)
}

/// Apply the embedded schema to a single connection.
pub fn apply_schema(conn: &Connection) -> Result<(), ServerError> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))
}

/// Initialize the database behind `db` from the embedded schema.
pub fn init_db(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| apply_schema(conn))?;
    tracing::info!(path = db.path(), "database initialized");
    Ok(())
}

/// In-memory connection with the schema applied, for unit tests.
#[cfg(test)]
pub fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    apply_schema(&conn).unwrap();
    conn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_idempotent() {
        let conn = test_conn();
        apply_schema(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "select count(*) from sqlite_master where type = 'table'
                 and name in ('cars', 'leads', 'bodyshop_leads', 'admin_sessions')",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(tables, 4);
    }

    #[test]
    fn separate_paths_get_separate_connections() {
        let dir = std::env::temp_dir();
        let a = Database::new(dir.join("carcity_conn_a.sqlite").to_string_lossy().to_string());
        let b = Database::new(":memory:");

        init_db(&b).unwrap();
        a.with_conn(|conn| {
            conn.execute_batch("create table if not exists only_in_a (x integer)")
                .map_err(|e| ServerError::DbError(e.to_string()))
        })
        .unwrap();

        let in_b: i64 = b
            .with_conn(|conn| {
                conn.query_row(
                    "select count(*) from sqlite_master where name = 'only_in_a'",
                    [],
                    |r| r.get(0),
                )
                .map_err(|e| ServerError::DbError(e.to_string()))
            })
            .unwrap();
        assert_eq!(in_b, 0);
    }
}
