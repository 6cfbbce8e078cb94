//! Wire types for the Survex backend API.
//!
//! Field names follow the backend exactly: auth/rewards/support bodies are
//! camelCase, database rows are snake_case. Response fields are lenient
//! (`#[serde(default)]`) because the backend omits or nulls them freely.

use serde::{Deserialize, Deserializer, Serialize};

use crate::format::Money;

/// Treat `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ids that the backend sends as either strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

// =============================================================================
// Errors
// =============================================================================

/// Shape of a non-2xx response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

// =============================================================================
// Auth / session
// =============================================================================

/// Numeric ids that may arrive as numbers, numeric strings or null.
/// Anything else reads as 0.
fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_i64().unwrap_or_default(),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    })
}

/// Signed-in user as returned by auth endpoints and `/api/auth/me`.
///
/// Decoding is best-effort: nulls, string ids and either role key are all
/// accepted. Unknown fields are kept in `extra` so re-persisting the cached
/// copy does not drop anything the backend sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub balance: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    /// `role`, else `user_role`; blank values count as absent.
    pub fn role(&self) -> Option<&str> {
        [self.role.as_deref(), self.user_role.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|r| !r.is_empty())
    }

    /// Admins and owners see the admin panel.
    pub fn is_staff(&self) -> bool {
        self.role()
            .is_some_and(|r| r.eq_ignore_ascii_case("admin") || r.eq_ignore_ascii_case("owner"))
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub first_name: String,
    pub last_name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub zip_code: String,
    /// Sent as typed, the backend parses it again
    pub age: String,
    pub gender: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_all: bool,
    pub recaptcha_token: String,
    pub device_id: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
    pub recaptcha_token: String,
    pub device_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeResponse {
    #[serde(default)]
    pub user: Option<UserProfile>,
}

// =============================================================================
// Surveys
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Survey {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub reward: String,
    /// Estimated length of interview, minutes
    #[serde(default)]
    pub loi: Option<f64>,
    #[serde(default)]
    pub country: String,
    #[serde(default, rename = "entryUrl")]
    pub entry_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurveysResponse {
    /// `bitlabs` for live inventory, `demo` when the backend has no credentials
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub surveys: Vec<Survey>,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Profile
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProfileDetails {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub balance: Money,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SurveyHistoryEntry {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub survey_id: String,
    #[serde(default)]
    pub transaction_id: String,
    #[serde(default)]
    pub reward: Money,
    #[serde(default)]
    pub status_raw: String,
    /// Completed / Disqualified / Reversed, or whatever the provider sent
    #[serde(default)]
    pub outcome: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RedemptionEntry {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub reward_method: String,
    #[serde(default)]
    pub amount: Money,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub payout_reference: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub profile: Option<ProfileDetails>,
    #[serde(default, rename = "surveyHistory", deserialize_with = "null_as_default")]
    pub survey_history: Vec<SurveyHistoryEntry>,
    #[serde(default, rename = "redemptionHistory", deserialize_with = "null_as_default")]
    pub redemption_history: Vec<RedemptionEntry>,
}

// =============================================================================
// Support
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SupportTicket {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketListResponse {
    #[serde(default, rename = "supportEmail")]
    pub support_email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tickets: Vec<SupportTicket>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTicket {
    pub subject: String,
    pub category: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketCreateResponse {
    #[serde(default, rename = "supportEmail")]
    pub support_email: Option<String>,
    #[serde(default)]
    pub ticket: Option<SupportTicket>,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Rewards
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedeemRequest {
    /// Whole dollars
    pub amount: i64,
    #[serde(rename = "rewardMethod")]
    pub reward_method: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedeemResponse {
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Admin
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub balance: Money,
    #[serde(default)]
    pub user_role: String,
    #[serde(default)]
    pub is_banned: bool,
    #[serde(default)]
    pub banned_at: Option<String>,
    #[serde(default)]
    pub banned_reason: Option<String>,
    #[serde(default)]
    pub signup_ip: Option<String>,
    #[serde(default)]
    pub last_login_ip: Option<String>,
    #[serde(default)]
    pub last_login_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AdminUser {
    /// Owners can never be banned from the panel.
    pub fn is_protected(&self) -> bool {
        self.user_role.trim().eq_ignore_ascii_case("owner")
    }

    pub fn role_label(&self) -> &str {
        if self.user_role.trim().is_empty() {
            "user"
        } else {
            &self.user_role
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdminWithdrawal {
    pub id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub reward_method: String,
    #[serde(default)]
    pub amount: Money,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub payout_reference: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AdminWithdrawal {
    /// Only freshly requested withdrawals can be approved or rejected.
    pub fn is_actionable(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("requested")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdminTicket {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AdminTicket {
    pub fn is_closed(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("closed")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminOverview {
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<AdminUser>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub withdrawals: Vec<AdminWithdrawal>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tickets: Vec<AdminTicket>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BanRequest {
    #[serde(rename = "isBanned")]
    pub is_banned: bool,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BannedUserState {
    #[serde(default)]
    pub user_role: Option<String>,
    #[serde(default)]
    pub is_banned: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BanResponse {
    #[serde(default)]
    pub user: Option<BannedUserState>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalDecision {
    Approved,
    Rejected,
}

impl WithdrawalDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            WithdrawalDecision::Approved => "approved",
            WithdrawalDecision::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithdrawalStatusRequest {
    pub status: WithdrawalDecision,
    #[serde(rename = "payoutReference")]
    pub payout_reference: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WithdrawalState {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payout_reference: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WithdrawalStatusResponse {
    #[serde(default)]
    pub withdrawal: Option<WithdrawalState>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Closed,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketStatusRequest {
    pub status: TicketStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketState {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketStatusResponse {
    #[serde(default)]
    pub ticket: Option<TicketState>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_profile_keeps_unknown_fields() {
        let json = r#"{"id":7,"email":"a@b.c","balance":"3.10","user_role":"admin","first_name":"Ada"}"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(user.role(), Some("admin"));
        assert!(user.is_staff());
        assert_eq!(user.extra.get("first_name").and_then(|v| v.as_str()), Some("Ada"));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["first_name"], "Ada");
        assert_eq!(back["balance"], "3.10");
    }

    #[test]
    fn test_user_profile_with_both_role_keys() {
        let user: UserProfile =
            serde_json::from_str(r#"{"id":1,"role":"","user_role":"Owner"}"#).unwrap();
        assert_eq!(user.role(), Some("Owner"));
        assert!(user.is_staff());

        let user: UserProfile =
            serde_json::from_str(r#"{"id":1,"role":"admin","user_role":"admin"}"#).unwrap();
        assert_eq!(user.role(), Some("admin"));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["role"], "admin");
        assert_eq!(back["user_role"], "admin");
    }

    #[test]
    fn test_user_profile_tolerates_null_email_and_string_id() {
        let user: UserProfile =
            serde_json::from_str(r#"{"id":"7","email":null,"balance":null,"role":null}"#).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.email, "");
        assert_eq!(user.balance, Money::ZERO);
        assert_eq!(user.role(), None);
        assert!(!user.is_staff());

        let user: UserProfile = serde_json::from_str(r#"{"id":null}"#).unwrap();
        assert_eq!(user.id, 0);
    }

    #[test]
    fn test_admin_overview_tolerates_nulls() {
        let overview: AdminOverview =
            serde_json::from_str(r#"{"users":null,"tickets":[]}"#).unwrap();
        assert!(overview.users.is_empty());
        assert!(overview.withdrawals.is_empty());
    }

    #[test]
    fn test_protected_role_is_case_insensitive() {
        let owner = AdminUser {
            id: 1,
            user_role: " Owner ".to_string(),
            ..Default::default()
        };
        let admin = AdminUser {
            id: 2,
            user_role: "admin".to_string(),
            ..Default::default()
        };
        assert!(owner.is_protected());
        assert!(!admin.is_protected());
        assert_eq!(AdminUser::default().role_label(), "user");
    }

    #[test]
    fn test_survey_ids_accept_numbers() {
        let survey: Survey =
            serde_json::from_str(r#"{"id":42,"name":"Tech","reward":1.5,"loi":null,"country":"US","entryUrl":null}"#)
                .unwrap();
        assert_eq!(survey.id, "42");
        assert_eq!(survey.reward, "1.5");
        assert_eq!(survey.entry_url, None);
    }

    #[test]
    fn test_request_bodies_use_backend_field_names() {
        let ban = serde_json::to_value(BanRequest {
            is_banned: true,
            reason: "fraud".into(),
        })
        .unwrap();
        assert_eq!(ban["isBanned"], true);

        let status = serde_json::to_value(WithdrawalStatusRequest {
            status: WithdrawalDecision::Approved,
            payout_reference: "GC-1".into(),
        })
        .unwrap();
        assert_eq!(status["status"], "approved");
        assert_eq!(status["payoutReference"], "GC-1");

        let login = serde_json::to_value(LoginPayload {
            email: "a@b.c".into(),
            password: "pw".into(),
            recaptcha_token: String::new(),
            device_id: "dev-1".into(),
        })
        .unwrap();
        assert_eq!(login["recaptchaToken"], "");
        assert_eq!(login["deviceId"], "dev-1");

        let redeem = serde_json::to_value(RedeemRequest {
            amount: 10,
            reward_method: "PayPal Cash".into(),
        })
        .unwrap();
        assert_eq!(redeem["rewardMethod"], "PayPal Cash");
    }
}
