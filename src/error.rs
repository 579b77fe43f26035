use thiserror::Error;

/// Application-wide error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// The backend could not be reached (no response at all).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status, or with a body we
    /// could not decode.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// A submit or fetch was attempted with disqualifying text.
    #[error("Empty query")]
    EmptyQuery,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Returns `true` for failures of the HTTP transport or the backend,
    /// as opposed to local guards.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::Server { .. })
    }
}

/// Helper conversion from reqwest errors that carry no usable status.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AppError::Server {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None if err.is_decode() => AppError::Server {
                status: 200,
                message: format!("Invalid response body: {err}"),
            },
            None => AppError::Network(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transport() {
        assert!(AppError::Network("offline".into()).is_transport());
        assert!(AppError::Server {
            status: 500,
            message: "boom".into()
        }
        .is_transport());
        assert!(!AppError::EmptyQuery.is_transport());
        assert!(!AppError::Storage("quota".into()).is_transport());
    }

    #[test]
    fn test_display() {
        let err = AppError::Server {
            status: 404,
            message: "Post not found".into(),
        };
        assert_eq!(err.to_string(), "Server error (404): Post not found");
        assert_eq!(AppError::EmptyQuery.to_string(), "Empty query");
    }
}
