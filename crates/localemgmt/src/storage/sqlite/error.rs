//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError`
//! from `localemgmt_core::storage`. Failures that mean the database itself is
//! unusable become `Connection`; everything else takes the class of the
//! operation that failed.

use localemgmt_core::storage::RepositoryError;

/// The kind of operation an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Connect,
    Schema,
    Write,
    Query,
}

impl Operation {
    fn error(self, message: String) -> RepositoryError {
        match self {
            Operation::Connect => RepositoryError::Connection(message),
            Operation::Schema => RepositoryError::Schema(message),
            Operation::Write => RepositoryError::Write(message),
            Operation::Query => RepositoryError::Query(message),
        }
    }
}

/// Maps a rusqlite error to a RepositoryError.
///
/// # Error Mapping
///
/// - `SQLITE_CANTOPEN` / `SQLITE_NOTADB` → `RepositoryError::Connection`
/// - Everything else → the variant of `op`
pub fn map_rusqlite_error(err: &rusqlite::Error, op: Operation) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if matches!(
                sqlite_err.code,
                rusqlite::ErrorCode::CannotOpen | rusqlite::ErrorCode::NotADatabase
            ) =>
        {
            RepositoryError::Connection(format!("Cannot open database: {err}"))
        }
        _ => op.error(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
///
/// This is the main entry point for error mapping in async code.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error, op: Operation) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err, op),
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            RepositoryError::Connection("Connection closed unexpectedly".to_string())
        }
        _ => op.error(err.to_string()),
    }
}
