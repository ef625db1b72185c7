//! Journey planner error types.

use std::fmt;

/// Errors from the journey planner client.
#[derive(Debug)]
pub enum JourneyError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Api { status: u16, message: String },

    /// Request was well-formed HTTP but the GraphQL layer rejected it
    GraphQl(Vec<String>),

    /// Rate limited by the API
    RateLimited,

    /// Client name header refused by the API
    Unauthorized,

    /// Client name is not a valid header value
    InvalidClientName(String),
}

impl fmt::Display for JourneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JourneyError::Http(e) => write!(f, "HTTP error: {e}"),
            JourneyError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            JourneyError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            JourneyError::GraphQl(messages) => {
                write!(f, "GraphQL error: {}", messages.join("; "))
            }
            JourneyError::RateLimited => write!(f, "rate limited by journey planner"),
            JourneyError::Unauthorized => {
                write!(f, "unauthorized (check ET-Client-Name)")
            }
            JourneyError::InvalidClientName(name) => {
                write!(f, "invalid client name header: {name:?}")
            }
        }
    }
}

impl std::error::Error for JourneyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JourneyError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for JourneyError {
    fn from(err: reqwest::Error) -> Self {
        JourneyError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = JourneyError::Api {
            status: 502,
            message: "Bad Gateway".into(),
        };
        assert_eq!(err.to_string(), "API error 502: Bad Gateway");

        let err = JourneyError::GraphQl(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "GraphQL error: a; b");

        let err = JourneyError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("<html>"));

        assert_eq!(
            JourneyError::RateLimited.to_string(),
            "rate limited by journey planner"
        );
    }
}
