use std::fmt;

use thiserror::Error;

/// Why a query produced no items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The query ran and matched zero rows.
    NoRows,
    /// The statement produced no result set to iterate.
    NoResultSet,
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundReason::NoRows => write!(f, "zero items"),
            NotFoundReason::NoResultSet => write!(f, "no item to parse"),
        }
    }
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Schema initialization failed: {0}")]
    Schema(String),
    #[error("Write failed: {0}")]
    Write(String),
    #[error("Query failed: {0}")]
    Query(String),
    #[error("Locale items not found: {reason}")]
    NotFound { reason: NotFoundReason },
}

impl RepositoryError {
    /// Not found because the query matched zero rows.
    pub fn no_rows() -> Self {
        Self::NotFound {
            reason: NotFoundReason::NoRows,
        }
    }

    /// Not found because the statement produced no result set.
    pub fn no_result_set() -> Self {
        Self::NotFound {
            reason: NotFoundReason::NoResultSet,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        assert_eq!(
            RepositoryError::no_rows().to_string(),
            "Locale items not found: zero items"
        );
        assert_eq!(
            RepositoryError::no_result_set().to_string(),
            "Locale items not found: no item to parse"
        );
    }

    #[test]
    fn test_repository_error_connection_display() {
        let error = RepositoryError::Connection("unable to open database file".to_string());
        assert_eq!(
            error.to_string(),
            "Connection failed: unable to open database file"
        );
    }

    #[test]
    fn test_repository_error_schema_display() {
        let error = RepositoryError::Schema("sql/init.sql: No such file".to_string());
        assert_eq!(
            error.to_string(),
            "Schema initialization failed: sql/init.sql: No such file"
        );
    }

    #[test]
    fn test_repository_error_write_display() {
        let error = RepositoryError::Write("CHECK constraint failed".to_string());
        assert_eq!(error.to_string(), "Write failed: CHECK constraint failed");
    }

    #[test]
    fn test_repository_error_query_display() {
        let error = RepositoryError::Query("no such table: localeitems".to_string());
        assert_eq!(
            error.to_string(),
            "Query failed: no such table: localeitems"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(RepositoryError::no_rows().is_not_found());
        assert!(RepositoryError::no_result_set().is_not_found());
        assert!(!RepositoryError::Query("boom".to_string()).is_not_found());
    }
}
