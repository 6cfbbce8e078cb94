//! Headless models behind the authenticated pages.
//!
//! Each model owns its view's state and the rules for mutating it. The
//! Dioxus pages hold a model in a signal and call `begin_*` before a request
//! and `finish_*` after it, so no borrow lives across an await.

pub mod admin;
pub mod dashboard;
pub mod guard;
pub mod profile;
pub mod rewards;
pub mod state;
pub mod support;
pub mod surveys;

pub use guard::{check, refresh_user, GuardOutcome};
pub use state::{ActionError, Confirmation, Feedback, PendingAction, ViewState};
