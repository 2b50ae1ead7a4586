use thiserror::Error;

/// What can go wrong between a page and the server. Pages never let these
/// escape: every variant is flattened into a display string at the page
/// boundary via [`ApiError::user_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport-level failure, nothing usable came back.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response, message taken from the structured body when present.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The entity the page asked for does not exist.
    #[error("not found")]
    NotFound,
}

impl ApiError {
    /// Prefers the server's own message, falls back to the page's generic one.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = ApiError::Server {
            status: 409,
            message: "Series is referenced by a volume.".to_owned(),
        };
        assert_eq!(
            err.user_message("Failed to delete series."),
            "Series is referenced by a volume."
        );
    }

    #[test]
    fn fallback_used_when_no_structured_message() {
        let blank = ApiError::Server {
            status: 500,
            message: String::new(),
        };
        assert_eq!(blank.user_message("Failed to fetch series."), "Failed to fetch series.");

        let network = ApiError::Network("connection refused".to_owned());
        assert_eq!(network.user_message("Failed to fetch series."), "Failed to fetch series.");
    }
}
