//! Domain error types.
//!
//! These errors represent validation failures in the route model. They are
//! distinct from persistence and HTTP errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A stop is required but was not supplied
    #[error("missing {0} stop")]
    MissingStop(&'static str),

    /// A stop was supplied but fails validation
    #[error("malformed stop: {0}")]
    MalformedStop(&'static str),

    /// A selection string does not name a pair
    #[error("invalid selection {0:?}: pair id is empty")]
    EmptySelection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::MissingStop("to");
        assert_eq!(err.to_string(), "missing to stop");

        let err = DomainError::MalformedStop("id is empty");
        assert_eq!(err.to_string(), "malformed stop: id is empty");

        let err = DomainError::EmptySelection("flipped-".into());
        assert_eq!(
            err.to_string(),
            "invalid selection \"flipped-\": pair id is empty"
        );
    }
}
