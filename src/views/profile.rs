//! Read-only profile with survey and redemption history.

use crate::client::types::{ProfileDetails, ProfileResponse, RedemptionEntry, SurveyHistoryEntry};
use crate::error::ApiError;
use crate::session::SessionStore;

use super::state::ViewState;

pub const PROFILE_LOAD_FAILED: &str = "Unable to load profile.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileData {
    pub profile: ProfileDetails,
    pub survey_history: Vec<SurveyHistoryEntry>,
    pub redemption_history: Vec<RedemptionEntry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileModel {
    pub data: ViewState<ProfileData>,
}

impl ProfileModel {
    pub fn load_started(&mut self) {
        self.data = ViewState::Loading;
    }

    /// A profile without a `profile` object is treated as a failed load.
    /// The fresh balance is merged into the cached user.
    pub fn load_finished(
        &mut self,
        result: Result<ProfileResponse, ApiError>,
        session: &SessionStore,
    ) {
        let result = result.and_then(|response| {
            let profile = response
                .profile
                .ok_or_else(|| ApiError::Decode("missing profile".to_string()))?;
            Ok(ProfileData {
                profile,
                survey_history: response.survey_history,
                redemption_history: response.redemption_history,
            })
        });

        if let Ok(data) = &result {
            session.merge_balance(data.profile.balance);
        }
        self.data.resolve(result, PROFILE_LOAD_FAILED);
    }
}

/// Label for a survey outcome column, falling back to the raw provider status.
pub fn outcome_label(entry: &SurveyHistoryEntry) -> &str {
    if !entry.outcome.trim().is_empty() {
        &entry.outcome
    } else if !entry.status_raw.trim().is_empty() {
        &entry.status_raw
    } else {
        "-"
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::client::testing::{client_with, RecordingTransport};
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_profile_balance_merges_into_session() {
        let transport = RecordingTransport::new();
        transport.respond(
            200,
            json!({
                "profile": {"id": 1, "email": "a@b.c", "first_name": "Ada", "balance": "9.75", "age": 30},
                "surveyHistory": [{"id": 5, "reward": "0.50", "outcome": "Completed"}],
                "redemptionHistory": null
            }),
        );
        let client = client_with(&transport);
        let session = SessionStore::new(Rc::new(MemoryStore::new()));
        session.save(
            "tok",
            Some(serde_json::from_value(json!({"id": 1, "balance": "1.00", "role": "user"})).unwrap()),
        );

        let mut model = ProfileModel::default();
        model.load_started();
        model.load_finished(client.profile("tok").await, &session);

        let data = model.data.ready().unwrap();
        assert_eq!(data.profile.first_name, "Ada");
        assert_eq!(data.survey_history.len(), 1);
        assert!(data.redemption_history.is_empty());

        let cached = session.user().unwrap();
        assert_eq!(cached.balance.to_string(), "9.75");
        assert_eq!(cached.role(), Some("user"));
    }

    #[tokio::test]
    async fn test_missing_profile_is_failure() {
        let transport = RecordingTransport::new();
        transport.respond(200, json!({}));
        let session = SessionStore::new(Rc::new(MemoryStore::new()));

        let mut model = ProfileModel::default();
        model.load_finished(client_with(&transport).profile("tok").await, &session);
        assert_eq!(model.data.error(), Some(PROFILE_LOAD_FAILED));
    }

    #[test]
    fn test_outcome_label_fallbacks() {
        let mut entry = SurveyHistoryEntry {
            status_raw: "complete".into(),
            ..Default::default()
        };
        assert_eq!(outcome_label(&entry), "complete");
        entry.outcome = "Completed".into();
        assert_eq!(outcome_label(&entry), "Completed");
        assert_eq!(outcome_label(&SurveyHistoryEntry::default()), "-");
    }
}
