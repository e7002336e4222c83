//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! This module provides HTTP status code mappings for [`RepositoryError`] variants,
//! following the Functional Core pattern - pure functions with no side effects.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `Connection` -> 503 (Service Unavailable)
/// - `Schema` -> 500 (Internal Server Error)
/// - `Write` -> 500 (Internal Server Error)
/// - `Query` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use localemgmt_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// assert_eq!(repository_error_to_status_code(&RepositoryError::no_rows()), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::Connection(_) => 503,
        RepositoryError::Schema(_) => 500,
        RepositoryError::Write(_) => 500,
        RepositoryError::Query(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::no_rows()),
            404
        );
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::no_result_set()),
            404
        );
    }

    #[test]
    fn test_connection_maps_to_503() {
        let error = RepositoryError::Connection("database is locked".to_string());
        assert_eq!(repository_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_schema_maps_to_500() {
        let error = RepositoryError::Schema("syntax error".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_write_maps_to_500() {
        let error = RepositoryError::Write("UNIQUE constraint failed".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_query_maps_to_500() {
        let error = RepositoryError::Query("invalid query syntax".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }
}
