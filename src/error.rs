//! Error types shared by the client core.
//!
//! Every failed operation ends up as exactly one user-visible string; the
//! variants here exist so callers can decide *whether* to show it
//! (`Cancelled` and `Unauthenticated` are never displayed).

use thiserror::Error;

/// Longest server-provided message shown verbatim before truncation.
pub const MAX_DISPLAY_MESSAGE_LEN: usize = 260;

/// Message shown when the backend cannot be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Could not connect to the server. Try again.";

/// A client-side validation failure, tied to the form field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors produced by the backend client and the views built on it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never reached the server (DNS, refused connection, CORS, ...)
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-2xx status
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Server answered 2xx but the body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Rejected before any request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The owning view was torn down while the request was in flight
    #[error("request cancelled")]
    Cancelled,

    /// No session token; callers redirect to login instead of displaying this
    #[error("not signed in")]
    Unauthenticated,
}

impl ApiError {
    /// The single string a view displays for this error.
    ///
    /// `fallback` is the per-operation generic message, used when the server
    /// gave no message of its own or the body could not be decoded.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::Server { message, .. } => truncate_for_display(message, fallback),
            ApiError::Decode(_) => fallback.to_string(),
            ApiError::Validation(err) => err.message.clone(),
            ApiError::Cancelled | ApiError::Unauthenticated => String::new(),
        }
    }

    /// Whether this error should be surfaced at all.
    pub fn is_displayable(&self) -> bool {
        !matches!(self, ApiError::Cancelled | ApiError::Unauthenticated)
    }
}

/// Trim a server message and bound its length for display.
///
/// Blank input yields `fallback`; anything longer than
/// [`MAX_DISPLAY_MESSAGE_LEN`] characters is cut and suffixed with `...`.
pub fn truncate_for_display(message: &str, fallback: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }
    if trimmed.chars().count() > MAX_DISPLAY_MESSAGE_LEN {
        let cut: String = trimmed.chars().take(MAX_DISPLAY_MESSAGE_LEN).collect();
        format!("{}...", cut)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_uses_generic_message() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.user_message("Withdrawal failed."), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn test_server_message_falls_back_when_blank() {
        let err = ApiError::Server {
            status: 500,
            message: "   ".to_string(),
        };
        assert_eq!(err.user_message("Could not load admin panel."), "Could not load admin panel.");
    }

    #[test]
    fn test_long_server_message_is_truncated() {
        let long = "x".repeat(400);
        let shown = truncate_for_display(&long, "fallback");
        assert_eq!(shown.len(), MAX_DISPLAY_MESSAGE_LEN + 3);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_message_at_limit_is_kept() {
        let exact = "y".repeat(MAX_DISPLAY_MESSAGE_LEN);
        assert_eq!(truncate_for_display(&exact, "fallback"), exact);
    }

    #[test]
    fn test_cancelled_is_not_displayable() {
        assert!(!ApiError::Cancelled.is_displayable());
        assert!(!ApiError::Unauthenticated.is_displayable());
        assert!(ApiError::Decode("bad".into()).is_displayable());
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err: ApiError = ValidationError::new("zip_code", "Bad zip").into();
        assert_eq!(err.user_message("ignored"), "Bad zip");
    }
}
