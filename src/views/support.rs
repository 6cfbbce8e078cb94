//! Support tickets: list the user's own and open new ones.

use tracing::info;

use super::state::{ActionError, Feedback, ViewState};
use crate::client::types::{NewTicket, SupportTicket, TicketCreateResponse, TicketListResponse};
use crate::error::ApiError;

pub const DEFAULT_SUPPORT_EMAIL: &str = "support@survex.app";
pub const TICKETS_LOAD_FAILED: &str = "Could not load support tickets.";
pub const TICKET_CREATE_FAILED: &str = "Could not create support ticket.";
pub const SUBJECT_REQUIRED: &str = "Subject is required.";
pub const MESSAGE_REQUIRED: &str = "Message is required.";

pub const TICKET_CATEGORIES: [&str; 5] = ["general", "account", "surveys", "rewards", "technical"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub subject: String,
    pub category: String,
    pub message: String,
}

impl Default for TicketDraft {
    fn default() -> Self {
        Self {
            subject: String::new(),
            category: TICKET_CATEGORIES[0].to_string(),
            message: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupportModel {
    pub support_email: String,
    pub tickets: ViewState<Vec<SupportTicket>>,
    pub draft: TicketDraft,
    pub submitting: bool,
    pub feedback: Feedback,
}

impl Default for SupportModel {
    fn default() -> Self {
        Self {
            support_email: DEFAULT_SUPPORT_EMAIL.to_string(),
            tickets: ViewState::Idle,
            draft: TicketDraft::default(),
            submitting: false,
            feedback: Feedback::default(),
        }
    }
}

impl SupportModel {
    fn adopt_email(&mut self, email: Option<String>) {
        if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
            self.support_email = email;
        }
    }

    pub fn load_started(&mut self) {
        self.tickets = ViewState::Loading;
    }

    pub fn load_finished(&mut self, result: Result<TicketListResponse, ApiError>) {
        let result = result.map(|response| {
            self.adopt_email(response.support_email);
            response.tickets
        });
        self.tickets.resolve(result, TICKETS_LOAD_FAILED);
    }

    /// Validate the draft. Unknown categories fall back to `general`.
    pub fn begin_create(&mut self) -> Result<NewTicket, ActionError> {
        if self.submitting {
            return Err(ActionError::Busy);
        }
        self.feedback.clear();

        let subject = self.draft.subject.trim();
        if subject.is_empty() {
            self.feedback.fail(SUBJECT_REQUIRED);
            return Err(ActionError::Rejected(SUBJECT_REQUIRED.to_string()));
        }
        let message = self.draft.message.trim();
        if message.is_empty() {
            self.feedback.fail(MESSAGE_REQUIRED);
            return Err(ActionError::Rejected(MESSAGE_REQUIRED.to_string()));
        }
        let category = if TICKET_CATEGORIES.contains(&self.draft.category.as_str()) {
            self.draft.category.clone()
        } else {
            TICKET_CATEGORIES[0].to_string()
        };

        let ticket = NewTicket {
            subject: subject.to_string(),
            category,
            message: message.to_string(),
        };
        self.submitting = true;
        Ok(ticket)
    }

    /// Prepend the created ticket and reset the form.
    pub fn finish_create(&mut self, result: Result<TicketCreateResponse, ApiError>) {
        self.submitting = false;
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.feedback.fail_with(&e, TICKET_CREATE_FAILED);
                return;
            }
        };

        self.adopt_email(response.support_email);
        let id = response.ticket.as_ref().map(|t| t.id);
        if let Some(ticket) = response.ticket {
            match &mut self.tickets {
                ViewState::Ready(list) => list.insert(0, ticket),
                other => *other = ViewState::Ready(vec![ticket]),
            }
        }
        if let Some(id) = id {
            info!(ticket_id = id, "Support ticket created");
        }

        self.draft = TicketDraft::default();
        let notice = response.message.unwrap_or_else(|| {
            format!(
                "Ticket #{} submitted successfully.",
                id.map(|id| id.to_string()).unwrap_or_default()
            )
        });
        self.feedback.success(notice);
    }
}
