use thiserror::Error;

/// Reasons a locale item cannot be written.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ItemValidationError {
    #[error("Locale item key cannot be empty")]
    MissingKey,
    #[error("Locale item bundle cannot be empty")]
    MissingBundle,
    #[error("Locale item lang cannot be empty")]
    MissingLang,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_validation_error_display() {
        assert_eq!(
            ItemValidationError::MissingKey.to_string(),
            "Locale item key cannot be empty"
        );
        assert_eq!(
            ItemValidationError::MissingLang.to_string(),
            "Locale item lang cannot be empty"
        );
    }
}
