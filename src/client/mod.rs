//! Backend API client.
//!
//! [`ApiClient`] owns one [`Transport`] and exposes a typed method per
//! endpoint. Bodies are decoded here; non-2xx responses become
//! [`ApiError::Server`] carrying the backend's `message` when it sent one.

pub mod transport;
pub mod types;

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, Abortable};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport, DEVICE_ID_HEADER};
use types::*;

/// Which error-body field wins when both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorField {
    Message,
    /// The surveys endpoint puts the upstream provider's reason in `details`
    DetailsFirst,
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(transport: Rc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client for the resolved API base of the running page.
    pub fn for_current_page() -> Self {
        Self::new(Rc::new(HttpTransport::new(
            crate::base_url::current_api_base(),
        )))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        error_field: ErrorField,
    ) -> Result<T, ApiError> {
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        decode(&path, response, error_field)
    }

    fn body<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    // -------------------------------------------------------------------------
    // Auth
    // -------------------------------------------------------------------------

    pub async fn register(&self, payload: &RegisterPayload) -> Result<AuthResponse, ApiError> {
        let request = ApiRequest::new(Method::Post, "/api/auth/register")
            .header(DEVICE_ID_HEADER, payload.device_id.clone())
            .json(Self::body(payload)?);
        self.call(request, ErrorField::Message).await
    }

    pub async fn login(&self, payload: &LoginPayload) -> Result<AuthResponse, ApiError> {
        let request = ApiRequest::new(Method::Post, "/api/auth/login")
            .header(DEVICE_ID_HEADER, payload.device_id.clone())
            .json(Self::body(payload)?);
        self.call(request, ErrorField::Message).await
    }

    pub async fn me(&self, token: &str) -> Result<MeResponse, ApiError> {
        let request = ApiRequest::new(Method::Get, "/api/auth/me").bearer(token);
        self.call(request, ErrorField::Message).await
    }

    // -------------------------------------------------------------------------
    // Member views
    // -------------------------------------------------------------------------

    pub async fn profile(&self, token: &str) -> Result<ProfileResponse, ApiError> {
        let request = ApiRequest::new(Method::Get, "/api/profile").bearer(token);
        self.call(request, ErrorField::Message).await
    }

    pub async fn bitlabs_surveys(&self, token: &str) -> Result<SurveysResponse, ApiError> {
        let request = ApiRequest::new(Method::Get, "/api/bitlabs/surveys").bearer(token);
        self.call(request, ErrorField::DetailsFirst).await
    }

    pub async fn my_tickets(&self, token: &str) -> Result<TicketListResponse, ApiError> {
        let request = ApiRequest::new(Method::Get, "/api/support/tickets/me").bearer(token);
        self.call(request, ErrorField::Message).await
    }

    pub async fn create_ticket(
        &self,
        token: &str,
        ticket: &NewTicket,
    ) -> Result<TicketCreateResponse, ApiError> {
        let request = ApiRequest::new(Method::Post, "/api/support/tickets")
            .bearer(token)
            .json(Self::body(ticket)?);
        self.call(request, ErrorField::Message).await
    }

    pub async fn redeem(
        &self,
        token: &str,
        redeem: &RedeemRequest,
    ) -> Result<RedeemResponse, ApiError> {
        let request = ApiRequest::new(Method::Post, "/api/rewards/redeem")
            .bearer(token)
            .json(Self::body(redeem)?);
        self.call(request, ErrorField::Message).await
    }

    // -------------------------------------------------------------------------
    // Admin
    // -------------------------------------------------------------------------

    pub async fn admin_overview(&self, token: &str) -> Result<AdminOverview, ApiError> {
        let request = ApiRequest::new(Method::Get, "/api/admin/overview").bearer(token);
        self.call(request, ErrorField::Message).await
    }

    pub async fn set_user_ban(
        &self,
        token: &str,
        user_id: i64,
        ban: &BanRequest,
    ) -> Result<BanResponse, ApiError> {
        let request = ApiRequest::new(Method::Patch, format!("/api/admin/users/{}/ban", user_id))
            .bearer(token)
            .json(Self::body(ban)?);
        self.call(request, ErrorField::Message).await
    }

    pub async fn set_withdrawal_status(
        &self,
        token: &str,
        withdrawal_id: i64,
        update: &WithdrawalStatusRequest,
    ) -> Result<WithdrawalStatusResponse, ApiError> {
        let request = ApiRequest::new(
            Method::Patch,
            format!("/api/admin/withdrawals/{}/status", withdrawal_id),
        )
        .bearer(token)
        .json(Self::body(update)?);
        self.call(request, ErrorField::Message).await
    }

    pub async fn set_ticket_status(
        &self,
        token: &str,
        ticket_id: i64,
        update: &TicketStatusRequest,
    ) -> Result<TicketStatusResponse, ApiError> {
        let request = ApiRequest::new(
            Method::Patch,
            format!("/api/admin/tickets/{}/status", ticket_id),
        )
        .bearer(token)
        .json(Self::body(update)?);
        self.call(request, ErrorField::Message).await
    }
}

fn decode<T: DeserializeOwned>(
    path: &str,
    response: ApiResponse,
    error_field: ErrorField,
) -> Result<T, ApiError> {
    if response.is_success() {
        // Some endpoints answer 204 / empty; treat that like `{}`
        let text = if response.body.trim().is_empty() {
            "{}"
        } else {
            response.body.as_str()
        };
        return serde_json::from_str(text).map_err(|e| {
            debug!("Undecodable response from {}: {}", path, e);
            ApiError::Decode(e.to_string())
        });
    }

    let body: ErrorBody = serde_json::from_str(&response.body).unwrap_or_default();
    let message = match error_field {
        ErrorField::Message => body.message,
        ErrorField::DetailsFirst => body
            .details
            .filter(|d| !d.trim().is_empty())
            .or(body.message),
    };
    Err(ApiError::Server {
        status: response.status,
        message: message.unwrap_or_default(),
    })
}

// =============================================================================
// Request scope
// =============================================================================

/// Abort handles for the requests a view started.
///
/// Wrap each in-flight future with [`RequestScope::run`]; calling
/// [`RequestScope::abort_all`] on teardown resolves every one of them to
/// [`ApiError::Cancelled`] and makes later `run` calls fail immediately.
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    handles: Rc<RefCell<Vec<(u64, AbortHandle)>>>,
    next_id: Rc<Cell<u64>>,
    closed: Rc<Cell<bool>>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run<T, F>(&self, future: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if self.closed.get() {
            return Err(ApiError::Cancelled);
        }

        let (handle, registration) = AbortHandle::new_pair();
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.handles.borrow_mut().push((id, handle));

        let outcome = Abortable::new(future, registration).await;
        self.handles.borrow_mut().retain(|(h, _)| *h != id);

        outcome.unwrap_or(Err(ApiError::Cancelled))
    }

    pub fn abort_all(&self) {
        self.closed.set(true);
        for (_, handle) in self.handles.borrow_mut().drain(..) {
            handle.abort();
        }
    }

    pub fn in_flight(&self) -> usize {
        self.handles.borrow().len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

// =============================================================================
// Test support
// =============================================================================


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_sends_device_header_and_body() {
        let transport = RecordingTransport::new();
        transport.respond(200, json!({"token": "abc", "user": {"id": 1, "balance": "12.50"}}));
        let client = client_with(&transport);

        let response = client
            .login(&LoginPayload {
                email: "a@b.c".into(),
                password: "secret".into(),
                recaptcha_token: String::new(),
                device_id: "dev-1".into(),
            })
            .await
            .unwrap();

        assert_eq!(response.token.as_deref(), Some("abc"));
        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.path, "/api/auth/login");
        assert_eq!(sent.bearer, None);
        assert!(sent.headers.contains(&(DEVICE_ID_HEADER, "dev-1".to_string())));
        assert_eq!(sent.body.as_ref().unwrap()["deviceId"], "dev-1");
    }

    #[tokio::test]
    async fn test_bearer_is_attached() {
        let transport = RecordingTransport::new();
        transport.respond(200, json!({"users": [], "withdrawals": [], "tickets": []}));
        let client = client_with(&transport);

        client.admin_overview("tok").await.unwrap();
        assert_eq!(transport.requests()[0].bearer.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_server_message_is_surfaced() {
        let transport = RecordingTransport::new();
        transport.respond(400, json!({"message": "Daily limit reached."}));
        let client = client_with(&transport);

        let err = client
            .redeem(
                "tok",
                &RedeemRequest {
                    amount: 5,
                    reward_method: "Uber".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.user_message("Withdrawal failed."), "Daily limit reached.");
    }

    #[tokio::test]
    async fn test_surveys_prefer_details() {
        let transport = RecordingTransport::new();
        transport.respond(502, json!({"message": "Upstream error", "details": "Invalid API token"}));
        let client = client_with(&transport);

        let err = client.bitlabs_surveys("tok").await.unwrap_err();
        assert_eq!(err.user_message("Failed to load surveys."), "Invalid API token");
    }

    #[tokio::test]
    async fn test_non_json_error_uses_fallback() {
        let transport = RecordingTransport::new();
        transport.respond_raw(500, "<html>Bad Gateway</html>");
        let client = client_with(&transport);

        let err = client.profile("tok").await.unwrap_err();
        assert_eq!(err.user_message("Unable to load profile."), "Unable to load profile.");
    }

    #[tokio::test]
    async fn test_ban_path_includes_id() {
        let transport = RecordingTransport::new();
        transport.respond(200, json!({"user": {"is_banned": true}}));
        let client = client_with(&transport);

        client
            .set_user_ban(
                "tok",
                42,
                &BanRequest {
                    is_banned: true,
                    reason: String::new(),
                },
            )
            .await
            .unwrap();
        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Patch);
        assert_eq!(sent.path, "/api/admin/users/42/ban");
    }

    #[tokio::test]
    async fn test_scope_abort_cancels_in_flight_request() {
        let scope = RequestScope::new();
        let pending = scope.run(futures::future::pending::<Result<(), ApiError>>());
        let aborter = async {
            scope.abort_all();
        };
        let (result, ()) = futures::join!(pending, aborter);

        assert_eq!(result, Err(ApiError::Cancelled));
        assert_eq!(scope.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_closed_scope_rejects_new_work() {
        let scope = RequestScope::new();
        scope.abort_all();
        let result = scope.run(async { Ok::<_, ApiError>(1) }).await;
        assert_eq!(result, Err(ApiError::Cancelled));
    }

    #[tokio::test]
    async fn test_scope_passes_through_results() {
        let scope = RequestScope::new();
        assert_eq!(scope.run(async { Ok::<_, ApiError>(7) }).await, Ok(7));
        assert_eq!(scope.in_flight(), 0);
        assert!(!scope.is_closed());
    }
}
