//! Rewards: pick a payout method and amount, confirm, redeem.

use tracing::info;

use super::state::{ActionError, Feedback};
use crate::client::types::{RedeemRequest, RedeemResponse};
use crate::error::ApiError;
use crate::format::Money;
use crate::session::SessionStore;

pub const REWARD_METHODS: [&str; 11] = [
    "Amazon Gift Card",
    "PayPal Cash",
    "Visa Prepaid",
    "Bank Transfer",
    "DoorDash",
    "Domino's",
    "Google Play",
    "Uber",
    "Home Depot",
    "Best Buy",
    "Walmart",
];

/// Whole-dollar amounts offered for withdrawal.
pub const WITHDRAWAL_AMOUNTS: [i64; 4] = [5, 10, 15, 20];

pub const INSUFFICIENT_BALANCE_MESSAGE: &str = "You do not have enough balance for this withdrawal.";
pub const REDEEM_SUCCESS_MESSAGE: &str = "Withdrawal request submitted successfully.";
pub const REDEEM_FAILED_MESSAGE: &str = "Withdrawal failed.";

#[derive(Debug, Clone, PartialEq)]
pub struct RewardsModel {
    pub balance: Money,
    pub selected_method: &'static str,
    pub selected_amount: i64,
    /// Confirmation dialog open
    pub confirming: bool,
    pub submitting: bool,
    pub feedback: Feedback,
}

impl Default for RewardsModel {
    fn default() -> Self {
        Self::new(Money::ZERO)
    }
}

impl RewardsModel {
    pub fn new(balance: Money) -> Self {
        Self {
            balance,
            selected_method: REWARD_METHODS[0],
            selected_amount: WITHDRAWAL_AMOUNTS[0],
            confirming: false,
            submitting: false,
            feedback: Feedback::default(),
        }
    }

    /// Unknown methods are ignored.
    pub fn select_method(&mut self, method: &str) {
        if let Some(known) = REWARD_METHODS.iter().find(|m| **m == method) {
            self.selected_method = *known;
        }
    }

    /// Amounts outside [`WITHDRAWAL_AMOUNTS`] are ignored.
    pub fn select_amount(&mut self, amount: i64) {
        if WITHDRAWAL_AMOUNTS.contains(&amount) {
            self.selected_amount = amount;
        }
    }

    pub fn has_enough_balance(&self) -> bool {
        self.balance >= Money::from_dollars(self.selected_amount)
    }

    fn check_balance(&mut self) -> Result<(), ActionError> {
        if self.has_enough_balance() {
            Ok(())
        } else {
            self.feedback.fail(INSUFFICIENT_BALANCE_MESSAGE);
            Err(ActionError::Rejected(INSUFFICIENT_BALANCE_MESSAGE.to_string()))
        }
    }

    /// "Withdraw" pressed: open the confirmation if the balance covers it.
    pub fn request_withdrawal(&mut self) -> Result<(), ActionError> {
        self.feedback.clear();
        self.check_balance()?;
        self.confirming = true;
        Ok(())
    }

    pub fn cancel_confirmation(&mut self) {
        if !self.submitting {
            self.confirming = false;
        }
    }

    /// Confirmed: produce the request body, or refuse without sending.
    pub fn begin_redeem(&mut self) -> Result<RedeemRequest, ActionError> {
        if self.submitting {
            return Err(ActionError::Busy);
        }
        self.feedback.clear();
        self.check_balance()?;
        self.submitting = true;
        Ok(RedeemRequest {
            amount: self.selected_amount,
            reward_method: self.selected_method.to_string(),
        })
    }

    /// Apply the server's answer; the returned user replaces the cached one.
    pub fn finish_redeem(
        &mut self,
        result: Result<RedeemResponse, ApiError>,
        session: &SessionStore,
    ) {
        self.submitting = false;
        match result {
            Ok(response) => {
                if let Some(user) = response.user {
                    self.balance = user.balance;
                    session.update_user(user);
                }
                info!("Withdrawal requested");
                self.confirming = false;
                self.feedback.success(REDEEM_SUCCESS_MESSAGE);
            }
            Err(e) => self.feedback.fail_with(&e, REDEEM_FAILED_MESSAGE),
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

    #[tokio::test]
    async fn test_insufficient_balance_sends_nothing() {
        let transport = RecordingTransport::new();
        let _client = client_with(&transport);
        let mut model = RewardsModel::new(Money::from_dollars(5));
        model.select_amount(10);

        let err = model.request_withdrawal().unwrap_err();
        assert!(err.user_message().unwrap().contains("enough balance"));
        assert_eq!(model.feedback.error.as_deref(), Some(INSUFFICIENT_BALANCE_MESSAGE));
        assert!(!model.confirming);

        // Even a forced confirm is refused before a body exists
        assert!(model.begin_redeem().is_err());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_redeem_updates_balance_and_session() {
        let transport = RecordingTransport::new();
        transport.respond(200, json!({"user": {"id": 1, "balance": "15.00"}}));
        let client = client_with(&transport);
        let session = SessionStore::new(Rc::new(MemoryStore::new()));
        session.save("tok", None);

        let mut model = RewardsModel::new(Money::from_dollars(25));
        model.select_amount(10);
        model.select_method("PayPal Cash");
        model.request_withdrawal().unwrap();
        let request = model.begin_redeem().unwrap();
        assert!(model.submitting);

        let result = client.redeem("tok", &request).await;
        model.finish_redeem(result, &session);

        assert_eq!(model.balance.to_string(), "15.00");
        assert_eq!(session.current().unwrap().balance().to_string(), "15.00");
        assert_eq!(model.feedback.status.as_deref(), Some(REDEEM_SUCCESS_MESSAGE));
        assert!(!model.confirming);

        let body = transport.requests()[0].body.clone().unwrap();
        assert_eq!(body, json!({"amount": 10, "rewardMethod": "PayPal Cash"}));
    }

    #[tokio::test]
    async fn test_failed_redeem_keeps_balance() {
        let transport = RecordingTransport::new();
        transport.respond(429, json!({"message": "Only two withdrawals per 24 hours."}));
        let client = client_with(&transport);
        let session = SessionStore::new(Rc::new(MemoryStore::new()));

        let mut model = RewardsModel::new(Money::from_dollars(20));
        let request = model.begin_redeem().unwrap();
        model.finish_redeem(client.redeem("tok", &request).await, &session);

        assert_eq!(model.balance, Money::from_dollars(20));
        assert_eq!(
            model.feedback.error.as_deref(),
            Some("Only two withdrawals per 24 hours.")
        );
        assert!(!model.submitting);
    }

    #[test]
    fn test_double_confirm_is_busy() {
        let mut model = RewardsModel::new(Money::from_dollars(20));
        model.begin_redeem().unwrap();
        assert_eq!(model.begin_redeem(), Err(ActionError::Busy));
    }

    #[test]
    fn test_selection_is_restricted() {
        let mut model = RewardsModel::default();
        model.select_amount(7);
        model.select_method("Bitcoin");
        assert_eq!(model.selected_amount, 5);
        assert_eq!(model.selected_method, "Amazon Gift Card");
    }

    #[test]
    fn test_exact_balance_is_enough() {
        let mut model = RewardsModel::new(Money::from_dollars(15));
        model.select_amount(15);
        assert!(model.has_enough_balance());
    }
}
