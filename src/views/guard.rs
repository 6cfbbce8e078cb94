//! Route guard for authenticated pages.

use tracing::debug;

use crate::client::types::UserProfile;
use crate::client::ApiClient;
use crate::session::SessionStore;

/// Decision made when an authenticated page mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Signed in; carries the bearer token for the page's requests
    Proceed(String),
    RedirectToLogin,
}

pub fn check(session: &SessionStore) -> GuardOutcome {
    match session.token() {
        Some(token) => GuardOutcome::Proceed(token),
        None => GuardOutcome::RedirectToLogin,
    }
}

/// Re-fetch the signed-in user and overwrite the cached copy.
///
/// Failures keep the stale cache and return `None`.
pub async fn refresh_user(
    client: &ApiClient,
    session: &SessionStore,
    token: &str,
) -> Option<UserProfile> {
    match client.me(token).await {
        Ok(response) => {
            let user = response.user?;
            session.update_user(user.clone());
            Some(user)
        }
        Err(e) => {
            debug!("Keeping cached user, refresh failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::client::testing::{client_with, RecordingTransport};
    use crate::storage::MemoryStore;

    #[test]
    fn test_missing_token_redirects() {
        let session = SessionStore::new(Rc::new(MemoryStore::new()));
        assert_eq!(check(&session), GuardOutcome::RedirectToLogin);

        session.save("tok", None);
        assert_eq!(check(&session), GuardOutcome::Proceed("tok".to_string()));
    }

    #[tokio::test]
    async fn test_refresh_overwrites_cache() {
        let transport = RecordingTransport::new();
        transport.respond(200, json!({"user": {"id": 1, "balance": "7.25"}}));
        let session = SessionStore::new(Rc::new(MemoryStore::new()));
        session.save("tok", None);

        let user = refresh_user(&client_with(&transport), &session, "tok").await;
        assert_eq!(user.map(|u| u.balance.to_string()).as_deref(), Some("7.25"));
        assert_eq!(session.current().unwrap().balance().to_string(), "7.25");
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_stale_user() {
        let transport = RecordingTransport::new();
        transport.respond(500, json!({"message": "down"}));
        let session = SessionStore::new(Rc::new(MemoryStore::new()));
        let cached: UserProfile = serde_json::from_value(json!({"id": 1, "balance": "3.00"})).unwrap();
        session.save("tok", Some(cached.clone()));

        assert_eq!(refresh_user(&client_with(&transport), &session, "tok").await, None);
        assert_eq!(session.user(), Some(cached));
    }
}
