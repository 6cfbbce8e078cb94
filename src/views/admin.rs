//! Admin panel: users, withdrawals and support tickets.
//!
//! Each mutation goes through `begin_*` (checks, returns the request to send)
//! and `finish_*` (patches the affected row from the response). Anything
//! refused in `begin_*` never reaches the network.

use tracing::info;

use super::state::{ActionError, Confirmation, Feedback, PendingAction, ViewState};
use crate::client::types::{
    AdminOverview, AdminTicket, AdminUser, AdminWithdrawal, BanRequest, BanResponse, TicketStatus,
    TicketStatusRequest, TicketStatusResponse, WithdrawalDecision, WithdrawalStatusRequest,
    WithdrawalStatusResponse,
};
use crate::error::ApiError;

pub const ADMIN_LOAD_FAILED: &str = "Could not load admin panel.";
pub const USER_UPDATE_FAILED: &str = "Could not update user status.";
pub const USER_BANNED: &str = "User banned successfully.";
pub const USER_UNBANNED: &str = "User unbanned successfully.";
pub const WITHDRAWAL_UPDATE_FAILED: &str = "Could not update withdrawal.";
pub const WITHDRAWAL_UPDATED: &str = "Withdrawal status updated successfully.";
pub const TICKET_UPDATE_FAILED: &str = "Could not update ticket.";
pub const TICKET_UPDATED: &str = "Ticket status updated successfully.";
pub const PAYOUT_REFERENCE_REQUIRED: &str =
    "Gift Card code or transaction number is required to approve.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminData {
    pub users: Vec<AdminUser>,
    pub withdrawals: Vec<AdminWithdrawal>,
    pub tickets: Vec<AdminTicket>,
}

impl From<AdminOverview> for AdminData {
    fn from(overview: AdminOverview) -> Self {
        Self {
            users: overview.users,
            withdrawals: overview.withdrawals,
            tickets: overview.tickets,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminCounts {
    pub users: usize,
    pub banned: usize,
    pub withdrawals: usize,
    pub tickets: usize,
}

impl AdminData {
    pub fn counts(&self) -> AdminCounts {
        AdminCounts {
            users: self.users.len(),
            banned: self.users.iter().filter(|u| u.is_banned).count(),
            withdrawals: self.withdrawals.len(),
            tickets: self.tickets.len(),
        }
    }
}

/// A ban toggle ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct BanPlan {
    pub user_id: i64,
    pub request: BanRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WithdrawalPlan {
    pub withdrawal_id: i64,
    pub request: WithdrawalStatusRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketPlan {
    pub ticket_id: i64,
    pub request: TicketStatusRequest,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminModel {
    pub data: ViewState<AdminData>,
    pub feedback: Feedback,
    pub pending_user: PendingAction,
    pub pending_withdrawal: PendingAction,
    pub pending_ticket: PendingAction,
}

impl AdminModel {
    pub fn load_started(&mut self) {
        self.data = ViewState::Loading;
    }

    pub fn load_finished(&mut self, result: Result<AdminOverview, ApiError>) {
        self.data.resolve(result.map(AdminData::from), ADMIN_LOAD_FAILED);
    }

    fn user(&self, id: i64) -> Result<&AdminUser, ActionError> {
        self.data
            .ready()
            .and_then(|d| d.users.iter().find(|u| u.id == id))
            .ok_or(ActionError::NotFound)
    }

    fn withdrawal(&self, id: i64) -> Result<&AdminWithdrawal, ActionError> {
        self.data
            .ready()
            .and_then(|d| d.withdrawals.iter().find(|w| w.id == id))
            .ok_or(ActionError::NotFound)
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Whether toggling `user_id` first needs a ban reason from the operator.
    /// Returns the prefilled reason when it does.
    pub fn ban_reason_prompt(&self, user_id: i64) -> Result<Option<String>, ActionError> {
        let user = self.user(user_id)?;
        if user.is_protected() {
            return Err(ActionError::Protected);
        }
        if user.is_banned {
            Ok(None)
        } else {
            Ok(Some(user.banned_reason.clone().unwrap_or_default()))
        }
    }

    /// Toggle the ban flag. `reason` is only consulted when banning.
    pub fn begin_ban(
        &mut self,
        user_id: i64,
        reason: Confirmation<String>,
    ) -> Result<BanPlan, ActionError> {
        let user = self.user(user_id)?;
        if user.is_protected() {
            return Err(ActionError::Protected);
        }
        let next_is_banned = !user.is_banned;

        let reason = if next_is_banned {
            match reason {
                Confirmation::Confirmed(reason) => reason.trim().to_string(),
                Confirmation::Cancelled => return Err(ActionError::Cancelled),
            }
        } else {
            String::new()
        };

        self.pending_user.begin(user_id)?;
        self.feedback.clear();
        Ok(BanPlan {
            user_id,
            request: BanRequest {
                is_banned: next_is_banned,
                reason,
            },
        })
    }

    pub fn finish_ban(&mut self, plan: &BanPlan, result: Result<BanResponse, ApiError>) {
        self.pending_user.finish();
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.feedback.fail_with(&e, USER_UPDATE_FAILED);
                return;
            }
        };

        let requested = plan.request.is_banned;
        let confirmed = response.user.as_ref().and_then(|u| u.is_banned);
        let role = response.user.and_then(|u| u.user_role);

        if let Some(user) = self
            .data
            .ready_mut()
            .and_then(|d| d.users.iter_mut().find(|u| u.id == plan.user_id))
        {
            user.is_banned = confirmed.unwrap_or(requested);
            if requested {
                user.banned_at = Some(chrono::Utc::now().to_rfc3339());
                user.banned_reason = Some(plan.request.reason.clone());
            } else {
                user.banned_at = None;
                user.banned_reason = None;
            }
            if let Some(role) = role {
                user.user_role = role;
            }
        }

        info!(user_id = plan.user_id, banned = requested, "User ban updated");
        let fallback = if requested { USER_BANNED } else { USER_UNBANNED };
        self.feedback.success(response.message.unwrap_or_else(|| fallback.to_string()));
    }

    // -------------------------------------------------------------------------
    // Withdrawals
    // -------------------------------------------------------------------------

    /// Approval needs a payout reference; returns the prefilled value.
    pub fn payout_reference_prompt(
        &self,
        withdrawal_id: i64,
        decision: WithdrawalDecision,
    ) -> Result<Option<String>, ActionError> {
        let withdrawal = self.withdrawal(withdrawal_id)?;
        if !withdrawal.is_actionable() {
            return Err(ActionError::NotActionable);
        }
        Ok(match decision {
            WithdrawalDecision::Approved => {
                Some(withdrawal.payout_reference.clone().unwrap_or_default())
            }
            WithdrawalDecision::Rejected => None,
        })
    }

    pub fn begin_withdrawal(
        &mut self,
        withdrawal_id: i64,
        decision: WithdrawalDecision,
        reference: Confirmation<String>,
    ) -> Result<WithdrawalPlan, ActionError> {
        if !self.withdrawal(withdrawal_id)?.is_actionable() {
            return Err(ActionError::NotActionable);
        }
        if self.pending_withdrawal.is_busy() {
            return Err(ActionError::Busy);
        }
        self.feedback.clear();

        let payout_reference = match decision {
            WithdrawalDecision::Approved => {
                let Confirmation::Confirmed(reference) = reference else {
                    return Err(ActionError::Cancelled);
                };
                let reference = reference.trim().to_string();
                if reference.is_empty() {
                    self.feedback.fail(PAYOUT_REFERENCE_REQUIRED);
                    return Err(ActionError::Rejected(PAYOUT_REFERENCE_REQUIRED.to_string()));
                }
                reference
            }
            WithdrawalDecision::Rejected => String::new(),
        };

        self.pending_withdrawal.begin(withdrawal_id)?;
        Ok(WithdrawalPlan {
            withdrawal_id,
            request: WithdrawalStatusRequest {
                status: decision,
                payout_reference,
            },
        })
    }

    pub fn finish_withdrawal(
        &mut self,
        plan: &WithdrawalPlan,
        result: Result<WithdrawalStatusResponse, ApiError>,
    ) {
        self.pending_withdrawal.finish();
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.feedback.fail_with(&e, WITHDRAWAL_UPDATE_FAILED);
                return;
            }
        };

        let state = response.withdrawal.unwrap_or_default();
        let sent_reference = Some(plan.request.payout_reference.clone()).filter(|r| !r.is_empty());

        if let Some(withdrawal) = self
            .data
            .ready_mut()
            .and_then(|d| d.withdrawals.iter_mut().find(|w| w.id == plan.withdrawal_id))
        {
            withdrawal.status = state
                .status
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| plan.request.status.as_str().to_string());
            withdrawal.payout_reference = state
                .payout_reference
                .filter(|r| !r.trim().is_empty())
                .or(sent_reference);
        }

        info!(
            withdrawal_id = plan.withdrawal_id,
            status = plan.request.status.as_str(),
            "Withdrawal updated"
        );
        self.feedback
            .success(response.message.unwrap_or_else(|| WITHDRAWAL_UPDATED.to_string()));
    }

    // -------------------------------------------------------------------------
    // Tickets
    // -------------------------------------------------------------------------

    pub fn begin_ticket(
        &mut self,
        ticket_id: i64,
        status: TicketStatus,
    ) -> Result<TicketPlan, ActionError> {
        let exists = self
            .data
            .ready()
            .is_some_and(|d| d.tickets.iter().any(|t| t.id == ticket_id));
        if !exists {
            return Err(ActionError::NotFound);
        }
        self.pending_ticket.begin(ticket_id)?;
        self.feedback.clear();
        Ok(TicketPlan {
            ticket_id,
            request: TicketStatusRequest { status },
        })
    }

    pub fn finish_ticket(&mut self, plan: &TicketPlan, result: Result<TicketStatusResponse, ApiError>) {
        self.pending_ticket.finish();
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.feedback.fail_with(&e, TICKET_UPDATE_FAILED);
                return;
            }
        };

        let status = response
            .ticket
            .and_then(|t| t.status)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| plan.request.status.as_str().to_string());

        if let Some(ticket) = self
            .data
            .ready_mut()
            .and_then(|d| d.tickets.iter_mut().find(|t| t.id == plan.ticket_id))
        {
            ticket.status = status;
        }
        self.feedback
            .success(response.message.unwrap_or_else(|| TICKET_UPDATED.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::testing::{client_with, RecordingTransport};

    fn overview() -> AdminOverview {
        serde_json::from_value(json!({
            "users": [
                {"id": 1, "email": "owner@survex.app", "user_role": "OWNER", "is_banned": false},
                {"id": 2, "email": "member@survex.app", "user_role": "user", "is_banned": false, "balance": "4.00"},
                {"id": 3, "email": "banned@survex.app", "user_role": "user", "is_banned": true,
                 "banned_reason": "fraud", "banned_at": "2026-01-01T00:00:00Z"}
            ],
            "withdrawals": [
                {"id": 10, "user_id": 2, "reward_method": "Uber", "amount": 5, "status": "requested"},
                {"id": 11, "user_id": 2, "reward_method": "Uber", "amount": 5, "status": "approved",
                 "payout_reference": "GC-OLD"}
            ],
            "tickets": [
                {"id": 20, "email": "member@survex.app", "subject": "Help", "message": "Hi", "category": "general", "status": "open"}
            ]
        }))
        .unwrap()
    }

    fn loaded() -> AdminModel {
        let mut model = AdminModel::default();
        model.load_started();
        model.load_finished(Ok(overview()));
        model
    }

    fn user(model: &AdminModel, id: i64) -> AdminUser {
        model.user(id).unwrap().clone()
    }

    #[test]
    fn test_counts() {
        let counts = loaded().data.ready().unwrap().counts();
        assert_eq!(
            counts,
            AdminCounts {
                users: 3,
                banned: 1,
                withdrawals: 2,
                tickets: 1
            }
        );
    }

    #[test]
    fn test_load_failure_uses_fallback() {
        let mut model = AdminModel::default();
        model.load_finished(Err(ApiError::Server {
            status: 403,
            message: String::new(),
        }));
        assert_eq!(model.data.error(), Some(ADMIN_LOAD_FAILED));
    }

    #[tokio::test]
    async fn test_owner_ban_never_sends_request() {
        let transport = RecordingTransport::new();
        let _client = client_with(&transport);
        let mut model = loaded();

        assert_eq!(model.ban_reason_prompt(1), Err(ActionError::Protected));
        let refused = model.begin_ban(1, Confirmation::Confirmed("spam".into()));
        assert_eq!(refused, Err(ActionError::Protected));
        assert!(!model.pending_user.is_busy());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_ban_patches_row() {
        let transport = RecordingTransport::new();
        transport.respond(200, json!({"user": {"user_role": "user", "is_banned": true}}));
        let client = client_with(&transport);
        let mut model = loaded();

        assert_eq!(model.ban_reason_prompt(2), Ok(Some(String::new())));
        let plan = model
            .begin_ban(2, Confirmation::Confirmed("  chargebacks ".into()))
            .unwrap();
        assert!(model.pending_user.is_pending(2));

        let result = client.set_user_ban("tok", plan.user_id, &plan.request).await;
        model.finish_ban(&plan, result);

        let patched = user(&model, 2);
        assert!(patched.is_banned);
        assert_eq!(patched.banned_reason.as_deref(), Some("chargebacks"));
        assert!(patched.banned_at.is_some());
        assert_eq!(model.feedback.status.as_deref(), Some(USER_BANNED));
        assert_eq!(
            transport.requests()[0].body,
            Some(json!({"isBanned": true, "reason": "chargebacks"}))
        );
    }

    #[test]
    fn test_cancelled_reason_aborts_ban() {
        let mut model = loaded();
        assert_eq!(
            model.begin_ban(2, Confirmation::Cancelled),
            Err(ActionError::Cancelled)
        );
        assert!(!model.pending_user.is_busy());
    }

    #[test]
    fn test_unban_skips_reason_and_clears_fields() {
        let mut model = loaded();
        assert_eq!(model.ban_reason_prompt(3), Ok(None));

        let plan = model.begin_ban(3, Confirmation::Cancelled).unwrap();
        assert!(!plan.request.is_banned);

        model.finish_ban(&plan, Ok(BanResponse::default()));
        let patched = user(&model, 3);
        assert!(!patched.is_banned);
        assert_eq!(patched.banned_reason, None);
        assert_eq!(patched.banned_at, None);
        assert_eq!(model.feedback.status.as_deref(), Some(USER_UNBANNED));
    }

    #[test]
    fn test_failed_ban_leaves_row_untouched() {
        let mut model = loaded();
        let before = user(&model, 2);
        let plan = model.begin_ban(2, Confirmation::Confirmed(String::new())).unwrap();
        model.finish_ban(
            &plan,
            Err(ApiError::Server {
                status: 500,
                message: "boom".into(),
            }),
        );
        assert_eq!(user(&model, 2), before);
        assert_eq!(model.feedback.error.as_deref(), Some("boom"));
        assert!(!model.pending_user.is_busy());
    }

    #[test]
    fn test_second_ban_while_pending_is_busy() {
        let mut model = loaded();
        model.begin_ban(2, Confirmation::Confirmed(String::new())).unwrap();
        assert_eq!(
            model.begin_ban(3, Confirmation::Cancelled),
            Err(ActionError::Busy)
        );
    }

    #[tokio::test]
    async fn test_approval_requires_reference() {
        let transport = RecordingTransport::new();
        let _client = client_with(&transport);
        let mut model = loaded();

        assert_eq!(
            model.payout_reference_prompt(10, WithdrawalDecision::Approved),
            Ok(Some(String::new()))
        );
        let err = model
            .begin_withdrawal(10, WithdrawalDecision::Approved, Confirmation::Confirmed("   ".into()))
            .unwrap_err();
        assert_eq!(err.user_message(), Some(PAYOUT_REFERENCE_REQUIRED));
        assert_eq!(model.feedback.error.as_deref(), Some(PAYOUT_REFERENCE_REQUIRED));
        assert!(!model.pending_withdrawal.is_busy());
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_only_requested_withdrawals_are_actionable() {
        let mut model = loaded();
        assert_eq!(
            model.payout_reference_prompt(11, WithdrawalDecision::Rejected),
            Err(ActionError::NotActionable)
        );
        assert_eq!(
            model.begin_withdrawal(11, WithdrawalDecision::Rejected, Confirmation::Cancelled),
            Err(ActionError::NotActionable)
        );
    }

    #[tokio::test]
    async fn test_approval_patches_status_and_reference() {
        let transport = RecordingTransport::new();
        transport.respond(200, json!({"withdrawal": {"status": "approved"}}));
        let client = client_with(&transport);
        let mut model = loaded();

        let plan = model
            .begin_withdrawal(10, WithdrawalDecision::Approved, Confirmation::Confirmed("GC-123".into()))
            .unwrap();
        let result = client
            .set_withdrawal_status("tok", plan.withdrawal_id, &plan.request)
            .await;
        model.finish_withdrawal(&plan, result);

        let row = model.withdrawal(10).unwrap();
        assert_eq!(row.status, "approved");
        assert_eq!(row.payout_reference.as_deref(), Some("GC-123"));
        assert_eq!(model.feedback.status.as_deref(), Some(WITHDRAWAL_UPDATED));
        assert_eq!(transport.requests()[0].path, "/api/admin/withdrawals/10/status");
    }

    #[test]
    fn test_rejection_needs_no_reference() {
        let mut model = loaded();
        let plan = model
            .begin_withdrawal(10, WithdrawalDecision::Rejected, Confirmation::Cancelled)
            .unwrap();
        assert_eq!(plan.request.payout_reference, "");

        model.finish_withdrawal(&plan, Ok(WithdrawalStatusResponse::default()));
        assert_eq!(model.withdrawal(10).unwrap().status, "rejected");
    }

    #[test]
    fn test_ticket_status_falls_back_to_requested() {
        let mut model = loaded();
        let plan = model.begin_ticket(20, TicketStatus::Closed).unwrap();
        assert_eq!(model.begin_ticket(20, TicketStatus::Open), Err(ActionError::Busy));

        model.finish_ticket(
            &plan,
            Ok(TicketStatusResponse {
                ticket: None,
                message: Some("Closed.".into()),
            }),
        );
        let data = model.data.ready().unwrap();
        assert!(data.tickets[0].is_closed());
        assert_eq!(model.feedback.status.as_deref(), Some("Closed."));
    }

    #[test]
    fn test_unknown_ticket_is_not_found() {
        let mut model = loaded();
        assert_eq!(model.begin_ticket(99, TicketStatus::Open), Err(ActionError::NotFound));
    }
}
