use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] tokio_rusqlite::Error),

    #[error("SQLite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),

    #[error("Postgres error: {0}")]
    Postgres(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("No admin named {0:?}")]
    AdminNotFound(String),

    #[error("Password does not match for admin {0:?}")]
    PasswordMismatch(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Coarse failure class reported to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Could not reach or authenticate against the database.
    Connection,
    /// A statement was rejected: bad SQL or a constraint violation.
    Statement,
    Other,
}

impl AppError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AppError::Sqlite(e) => sqlite_async_kind(e),
            AppError::Rusqlite(e) => sqlite_kind(e),
            AppError::Postgres(e) => postgres_kind(e),
            AppError::Timeout(_) => FailureKind::Connection,
            _ => FailureKind::Other,
        }
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            AppError::Sqlite(tokio_rusqlite::Error::Rusqlite(e)) | AppError::Rusqlite(e) => {
                sqlite_foreign_key(e)
            }
            AppError::Postgres(sqlx::Error::Database(db)) => {
                db.kind() == sqlx::error::ErrorKind::ForeignKeyViolation
            }
            _ => false,
        }
    }
}

fn sqlite_async_kind(err: &tokio_rusqlite::Error) -> FailureKind {
    match err {
        tokio_rusqlite::Error::Rusqlite(e) => sqlite_kind(e),
        tokio_rusqlite::Error::ConnectionClosed => FailureKind::Connection,
        _ => FailureKind::Other,
    }
}

fn sqlite_failure(err: &rusqlite::Error) -> Option<&rusqlite::ffi::Error> {
    match err {
        rusqlite::Error::SqliteFailure(e, _) | rusqlite::Error::SqlInputError { error: e, .. } => {
            Some(e)
        }
        _ => None,
    }
}

fn sqlite_kind(err: &rusqlite::Error) -> FailureKind {
    use rusqlite::ErrorCode;

    match sqlite_failure(err).map(|e| e.code) {
        Some(ErrorCode::CannotOpen | ErrorCode::NotADatabase | ErrorCode::PermissionDenied) => {
            FailureKind::Connection
        }
        Some(_) => FailureKind::Statement,
        None => FailureKind::Other,
    }
}

fn sqlite_foreign_key(err: &rusqlite::Error) -> bool {
    sqlite_failure(err)
        .is_some_and(|e| e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
}

fn postgres_kind(err: &sqlx::Error) -> FailureKind {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => FailureKind::Connection,
        sqlx::Error::Database(db) => {
            // 08: connection exception, 28: invalid authorization, 3D: unknown database
            match db.code().as_deref() {
                Some(code)
                    if code.starts_with("08") || code.starts_with("28") || code.starts_with("3D") =>
                {
                    FailureKind::Connection
                }
                _ => FailureKind::Statement,
            }
        }
        sqlx::Error::Protocol(_) => FailureKind::Connection,
        _ => FailureKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_from_postgres_are_connection_failures() {
        let err = AppError::from(sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        )));
        assert_eq!(err.kind(), FailureKind::Connection);
        assert!(!err.is_foreign_key_violation());
    }

    #[test]
    fn timeout_is_a_connection_failure() {
        let err = AppError::Timeout(Duration::from_secs(3));
        assert_eq!(err.kind(), FailureKind::Connection);
        assert_eq!(err.to_string(), "Timed out after 3s");
    }

    #[test]
    fn config_errors_are_neither_class() {
        let err = AppError::Config("missing host".to_string());
        assert_eq!(err.kind(), FailureKind::Other);
    }

    #[test]
    fn sqlite_syntax_error_is_a_statement_failure() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = AppError::from(conn.execute_batch("CREATE TABLEX nope;").unwrap_err());
        assert_eq!(err.kind(), FailureKind::Statement);
        assert!(!err.is_foreign_key_violation());
    }

    #[test]
    fn sqlite_missing_table_is_a_statement_failure() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = AppError::from(conn.execute("DELETE FROM nope", []).unwrap_err());
        assert_eq!(err.kind(), FailureKind::Statement);
    }

    #[test]
    fn sqlite_foreign_key_violation_is_detected() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE parent (id INTEGER PRIMARY KEY);
             CREATE TABLE child (parent_id INTEGER NOT NULL REFERENCES parent(id));",
        )
        .unwrap();
        let err = AppError::from(
            conn.execute("INSERT INTO child (parent_id) VALUES (7)", [])
                .unwrap_err(),
        );
        assert!(err.is_foreign_key_violation());
        assert_eq!(err.kind(), FailureKind::Statement);
    }

    #[test]
    fn sqlite_syntax_error_through_async_wrapper_is_a_statement_failure() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = AppError::from(tokio_rusqlite::Error::Rusqlite(
            conn.execute_batch("SELEC 1;").unwrap_err(),
        ));
        assert_eq!(err.kind(), FailureKind::Statement);
    }
}
