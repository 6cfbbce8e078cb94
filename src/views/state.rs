//! State shared by every authenticated view.

use thiserror::Error;

use crate::error::ApiError;

/// Load state of a view's primary data.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Idle | ViewState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Apply a load result. Cancelled and unauthenticated results leave the
    /// state alone (the view is gone or about to redirect).
    pub fn resolve(&mut self, result: Result<T, ApiError>, fallback: &str) {
        match result {
            Ok(value) => *self = ViewState::Ready(value),
            Err(e) if e.is_displayable() => *self = ViewState::Failed(e.user_message(fallback)),
            Err(_) => {}
        }
    }
}

/// The success/error banner pair shown above a view's content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    pub status: Option<String>,
    pub error: Option<String>,
}

impl Feedback {
    pub fn clear(&mut self) {
        self.status = None;
        self.error = None;
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = None;
        self.error = Some(message.into());
    }

    /// Show `error` unless it is one that is never displayed.
    pub fn fail_with(&mut self, error: &ApiError, fallback: &str) {
        if error.is_displayable() {
            self.fail(error.user_message(fallback));
        }
    }
}

/// Id of the one in-flight mutation of a given kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingAction {
    id: Option<i64>,
}

impl PendingAction {
    /// Mark `id` as in flight. Fails while any mutation of this kind is.
    pub fn begin(&mut self, id: i64) -> Result<(), ActionError> {
        if self.id.is_some() {
            return Err(ActionError::Busy);
        }
        self.id = Some(id);
        Ok(())
    }

    pub fn finish(&mut self) {
        self.id = None;
    }

    pub fn is_pending(&self, id: i64) -> bool {
        self.id == Some(id)
    }

    pub fn is_busy(&self) -> bool {
        self.id.is_some()
    }
}

/// Answer from an in-flow confirmation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation<T> {
    Confirmed(T),
    Cancelled,
}

/// Why a mutation was refused before any request went out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Shown to the user as-is
    #[error("{0}")]
    Rejected(String),

    #[error("another update is already in progress")]
    Busy,

    #[error("cancelled by the operator")]
    Cancelled,

    #[error("owner accounts cannot be banned")]
    Protected,

    #[error("item is not in an actionable state")]
    NotActionable,

    #[error("item not found")]
    NotFound,
}

impl ActionError {
    /// Text for the error banner; silent refusals return `None`.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ActionError::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_success_and_failure() {
        let mut state: ViewState<u32> = ViewState::Loading;
        state.resolve(Ok(3), "fallback");
        assert_eq!(state.ready(), Some(&3));

        let mut failed: ViewState<u32> = ViewState::Loading;
        failed.resolve(Err(ApiError::Decode("x".into())), "Could not load.");
        assert_eq!(failed.error(), Some("Could not load."));
    }

    #[test]
    fn test_cancelled_load_is_ignored() {
        let mut state: ViewState<u32> = ViewState::Loading;
        state.resolve(Err(ApiError::Cancelled), "fallback");
        assert_eq!(state, ViewState::Loading);
    }

    #[test]
    fn test_pending_rejects_second_action() {
        let mut pending = PendingAction::default();
        pending.begin(4).unwrap();
        assert!(pending.is_pending(4));
        assert_eq!(pending.begin(5), Err(ActionError::Busy));
        pending.finish();
        assert!(!pending.is_busy());
        assert!(pending.begin(5).is_ok());
    }

    #[test]
    fn test_feedback_is_exclusive() {
        let mut feedback = Feedback::default();
        feedback.fail("bad");
        feedback.success("good");
        assert_eq!(feedback.error, None);
        assert_eq!(feedback.status.as_deref(), Some("good"));

        feedback.fail_with(&ApiError::Cancelled, "fallback");
        assert_eq!(feedback.status.as_deref(), Some("good"));
    }

    #[test]
    fn test_only_rejections_are_shown() {
        assert_eq!(ActionError::Rejected("No.".into()).user_message(), Some("No."));
        assert_eq!(ActionError::Protected.user_message(), None);
        assert_eq!(ActionError::Cancelled.user_message(), None);
    }
}
