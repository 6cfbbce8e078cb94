//! Admin panel: users, withdrawals and support tickets.

use dioxus::prelude::*;
use dioxus::router::Navigator;
use tracing::debug;

use crate::app::api::{require_token, use_app, use_authenticated_load, use_request_scope, AppContext};
use crate::app::components::{ConfirmForm, Layout};
use crate::client::types::{TicketStatus, WithdrawalDecision};
use crate::client::RequestScope;
use crate::error::ApiError;
use crate::format::{display_name, format_timestamp, or_dash};
use crate::views::admin::{AdminData, AdminModel};
use crate::views::{ActionError, Confirmation, ViewState};

const BUTTON_BASE: &str = "rounded-md px-3 py-1 text-xs font-semibold disabled:cursor-not-allowed disabled:opacity-60";

/// Operator input the panel is waiting for.
#[derive(Debug, Clone, PartialEq)]
enum Prompt {
    BanReason { user_id: i64, initial: String },
    PayoutReference { withdrawal_id: i64, initial: String },
}

/// Everything a row action needs, copyable into event handlers.
#[derive(Clone, Copy)]
struct AdminActions {
    app: AppContext,
    nav: Navigator,
    scope: CopyValue<RequestScope>,
    model: Signal<AdminModel>,
    prompt: Signal<Option<Prompt>>,
}

impl AdminActions {
    fn refused(self, id: i64, e: ActionError) {
        debug!(id, "Admin action refused: {}", e);
        if let Some(message) = e.user_message() {
            let mut model = self.model;
            model.write().feedback.fail(message);
        }
    }

    fn toggle_ban(self, user_id: i64) {
        let needs_reason = self.model.read().ban_reason_prompt(user_id);
        match needs_reason {
            Ok(Some(initial)) => {
                let mut prompt = self.prompt;
                prompt.set(Some(Prompt::BanReason { user_id, initial }));
            }
            Ok(None) => self.ban(user_id, Confirmation::Confirmed(String::new())),
            Err(e) => self.refused(user_id, e),
        }
    }

    fn ban(self, user_id: i64, reason: Confirmation<String>) {
        let Some(token) = require_token(self.app, self.nav) else {
            return;
        };
        let mut model = self.model;
        let plan = match model.write().begin_ban(user_id, reason) {
            Ok(plan) => plan,
            Err(e) => {
                self.refused(user_id, e);
                return;
            }
        };
        let scope = self.scope.cloned();
        let client = self.app.client();
        spawn(async move {
            let result = scope
                .run(client.set_user_ban(&token, plan.user_id, &plan.request))
                .await;
            if matches!(result, Err(ApiError::Cancelled)) {
                return;
            }
            model.write().finish_ban(&plan, result);
        });
    }

    fn decide_withdrawal(self, withdrawal_id: i64, decision: WithdrawalDecision) {
        let needs_reference = self
            .model
            .read()
            .payout_reference_prompt(withdrawal_id, decision);
        match needs_reference {
            Ok(Some(initial)) => {
                let mut prompt = self.prompt;
                prompt.set(Some(Prompt::PayoutReference {
                    withdrawal_id,
                    initial,
                }));
            }
            Ok(None) => {
                self.update_withdrawal(withdrawal_id, decision, Confirmation::Confirmed(String::new()))
            }
            Err(e) => self.refused(withdrawal_id, e),
        }
    }

    fn update_withdrawal(
        self,
        withdrawal_id: i64,
        decision: WithdrawalDecision,
        reference: Confirmation<String>,
    ) {
        let Some(token) = require_token(self.app, self.nav) else {
            return;
        };
        let mut model = self.model;
        let plan = match model.write().begin_withdrawal(withdrawal_id, decision, reference) {
            Ok(plan) => plan,
            Err(e) => {
                self.refused(withdrawal_id, e);
                return;
            }
        };
        let scope = self.scope.cloned();
        let client = self.app.client();
        spawn(async move {
            let result = scope
                .run(client.set_withdrawal_status(&token, plan.withdrawal_id, &plan.request))
                .await;
            if matches!(result, Err(ApiError::Cancelled)) {
                return;
            }
            model.write().finish_withdrawal(&plan, result);
        });
    }

    fn set_ticket(self, ticket_id: i64, status: TicketStatus) {
        let Some(token) = require_token(self.app, self.nav) else {
            return;
        };
        let mut model = self.model;
        let plan = match model.write().begin_ticket(ticket_id, status) {
            Ok(plan) => plan,
            Err(e) => {
                self.refused(ticket_id, e);
                return;
            }
        };
        let scope = self.scope.cloned();
        let client = self.app.client();
        spawn(async move {
            let result = scope
                .run(client.set_ticket_status(&token, plan.ticket_id, &plan.request))
                .await;
            if matches!(result, Err(ApiError::Cancelled)) {
                return;
            }
            model.write().finish_ticket(&plan, result);
        });
    }

    fn answer(self, answer: Confirmation<String>) {
        let mut prompt = self.prompt;
        let Some(current) = prompt.write().take() else {
            return;
        };
        match current {
            Prompt::BanReason { user_id, .. } => self.ban(user_id, answer),
            Prompt::PayoutReference { withdrawal_id, .. } => {
                self.update_withdrawal(withdrawal_id, WithdrawalDecision::Approved, answer)
            }
        }
    }
}

fn users_table(data: &AdminData, model: &AdminModel, actions: AdminActions) -> Element {
    if data.users.is_empty() {
        return rsx! { p { class: "mt-4 text-sm text-gray-500", "No users found." } };
    }
    rsx! {
        div { class: "mt-4 overflow-x-auto",
            table { class: "data",
                thead {
                    tr {
                        th { "ID" }
                        th { "Email" }
                        th { "Name" }
                        th { "Role" }
                        th { "Balance" }
                        th { "Status" }
                        th { "Signup IP" }
                        th { "Last Login IP" }
                        th { "Created" }
                        th { "Action" }
                    }
                }
                tbody {
                    for user in data.users.iter() {
                        tr { key: "{user.id}",
                            td { "{user.id}" }
                            td { "{user.email}" }
                            td { {display_name(&user.first_name, &user.last_name)} }
                            td { span { class: "capitalize", {user.role_label().to_string()} } }
                            td { "$ {user.balance}" }
                            td {
                                if user.is_banned {
                                    span { class: "status-err font-semibold", "Banned" }
                                    if let Some(reason) = user.banned_reason.as_deref().filter(|r| !r.is_empty()) {
                                        p { class: "text-xs text-gray-500", "{reason}" }
                                    }
                                } else {
                                    span { class: "status-ok font-semibold", "Active" }
                                }
                            }
                            td { {or_dash(user.signup_ip.as_deref())} }
                            td {
                                {or_dash(user.last_login_ip.as_deref())}
                                div { class: "text-xs text-gray-500", {format_timestamp(user.last_login_at.as_deref())} }
                            }
                            td { {format_timestamp(user.created_at.as_deref())} }
                            td {
                                {
                                    let id = user.id;
                                    let pending = model.pending_user.is_pending(id);
                                    let protected = user.is_protected();
                                    let label = if protected {
                                        "Protected"
                                    } else if pending {
                                        "Saving..."
                                    } else if user.is_banned {
                                        "Unban"
                                    } else {
                                        "Ban"
                                    };
                                    let tone = if user.is_banned {
                                        "border border-green-600 text-green-700 hover:bg-green-50"
                                    } else {
                                        "border border-red-600 text-red-700 hover:bg-red-50"
                                    };
                                    rsx! {
                                        button {
                                            class: "{BUTTON_BASE} {tone}",
                                            r#type: "button",
                                            disabled: pending || protected,
                                            onclick: move |_| actions.toggle_ban(id),
                                            "{label}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn withdrawals_table(data: &AdminData, model: &AdminModel, actions: AdminActions) -> Element {
    if data.withdrawals.is_empty() {
        return rsx! { p { class: "mt-4 text-sm text-gray-500", "No withdrawal requests found." } };
    }
    rsx! {
        div { class: "mt-4 overflow-x-auto",
            table { class: "data",
                thead {
                    tr {
                        th { "ID" }
                        th { "User" }
                        th { "Method" }
                        th { "Amount" }
                        th { "Status" }
                        th { "Gift Card / Tx" }
                        th { "Date" }
                        th { "Action" }
                    }
                }
                tbody {
                    for item in data.withdrawals.iter() {
                        tr { key: "{item.id}",
                            td { "{item.id}" }
                            td { {item.user_email.clone().filter(|e| !e.is_empty()).unwrap_or_else(|| "Unknown user".to_string())} }
                            td { "{item.reward_method}" }
                            td { "$ {item.amount}" }
                            td { span { class: "capitalize", "{item.status}" } }
                            td { {or_dash(item.payout_reference.as_deref())} }
                            td { {format_timestamp(item.created_at.as_deref())} }
                            td {
                                if item.is_actionable() {
                                    {
                                        let id = item.id;
                                        let pending = model.pending_withdrawal.is_pending(id);
                                        rsx! {
                                            div { class: "flex gap-2",
                                                button {
                                                    class: "{BUTTON_BASE} bg-green-600 text-white hover:bg-green-500",
                                                    r#type: "button",
                                                    disabled: pending,
                                                    onclick: move |_| actions.decide_withdrawal(id, WithdrawalDecision::Approved),
                                                    if pending { "Saving..." } else { "Approve" }
                                                }
                                                button {
                                                    class: "{BUTTON_BASE} border border-red-600 text-red-700 hover:bg-red-50",
                                                    r#type: "button",
                                                    disabled: pending,
                                                    onclick: move |_| actions.decide_withdrawal(id, WithdrawalDecision::Rejected),
                                                    "Reject"
                                                }
                                            }
                                        }
                                    }
                                } else {
                                    span { class: "text-xs text-gray-500", "-" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn tickets_table(data: &AdminData, model: &AdminModel, actions: AdminActions) -> Element {
    if data.tickets.is_empty() {
        return rsx! { p { class: "mt-4 text-sm text-gray-500", "No support tickets found." } };
    }
    rsx! {
        div { class: "mt-4 overflow-x-auto",
            table { class: "data",
                thead {
                    tr {
                        th { "Ticket" }
                        th { "Email" }
                        th { "Subject" }
                        th { "Message" }
                        th { "Category" }
                        th { "Status" }
                        th { "Date" }
                        th { "Action" }
                    }
                }
                tbody {
                    for ticket in data.tickets.iter() {
                        tr { key: "{ticket.id}",
                            td { "#{ticket.id}" }
                            td { {or_dash(Some(&ticket.email))} }
                            td { "{ticket.subject}" }
                            td { class: "max-w-xs whitespace-pre-wrap", "{ticket.message}" }
                            td { span { class: "capitalize", "{ticket.category}" } }
                            td { span { class: "capitalize", "{ticket.status}" } }
                            td { {format_timestamp(ticket.created_at.as_deref())} }
                            td {
                                {
                                    let id = ticket.id;
                                    let pending = model.pending_ticket.is_pending(id);
                                    let (next, label) = if ticket.is_closed() {
                                        (TicketStatus::Open, "Reopen")
                                    } else {
                                        (TicketStatus::Closed, "Close")
                                    };
                                    rsx! {
                                        button {
                                            class: "{BUTTON_BASE} border border-gray-400 text-gray-700 hover:bg-gray-50",
                                            r#type: "button",
                                            disabled: pending,
                                            onclick: move |_| actions.set_ticket(id, next),
                                            if pending { "Saving..." } else { "{label}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Admin() -> Element {
    let app = use_app();
    let nav = navigator();
    let requests = use_request_scope();
    let mut model = use_signal(AdminModel::default);
    let prompt = use_signal(|| None::<Prompt>);
    let scope = use_hook({
        let requests = requests.clone();
        move || CopyValue::new(requests)
    });
    let actions = AdminActions {
        app,
        nav,
        scope,
        model,
        prompt,
    };

    use_authenticated_load(move |app, token| {
        let scope = requests.clone();
        async move {
            model.write().load_started();
            let client = app.client();
            let result = scope.run(client.admin_overview(&token)).await;
            if matches!(result, Err(ApiError::Cancelled)) {
                return;
            }
            model.write().load_finished(result);
        }
    });

    let state = model.read().clone();
    let counts = state.data.ready().map(AdminData::counts).unwrap_or_default();

    let prompt_form = match prompt() {
        Some(Prompt::BanReason { user_id, initial }) => rsx! {
            ConfirmForm {
                key: "ban-{user_id}",
                title: "Ban user #{user_id}",
                label: "Optional ban reason:",
                initial,
                confirm_label: "Ban",
                on_answer: move |answer| actions.answer(answer),
            }
        },
        Some(Prompt::PayoutReference { withdrawal_id, initial }) => rsx! {
            ConfirmForm {
                key: "payout-{withdrawal_id}",
                title: "Approve withdrawal #{withdrawal_id}",
                label: "Enter Gift Card code or Transaction number:",
                initial,
                confirm_label: "Approve",
                on_answer: move |answer| actions.answer(answer),
            }
        },
        None => rsx! {},
    };

    let sections = match &state.data {
        ViewState::Ready(data) => rsx! {
            section { class: "card mt-8",
                h2 { class: "text-2xl font-extrabold", "Registered Users" }
                {users_table(data, &state, actions)}
            }
            section { class: "card mt-8",
                h2 { class: "text-2xl font-extrabold", "Withdrawal Requests" }
                {withdrawals_table(data, &state, actions)}
            }
            section { class: "card mt-8",
                h2 { class: "text-2xl font-extrabold", "Support Tickets" }
                {tickets_table(data, &state, actions)}
            }
        },
        _ => rsx! {},
    };

    rsx! {
        Layout { title: "Admin", nav_active: "admin",
            section { class: "card",
                p { class: "text-xs uppercase tracking-widest font-semibold text-gray-500", "Admin / Owner" }
                h1 { class: "mt-2 text-3xl font-extrabold", "Control Panel" }
                p { class: "mt-2 text-gray-600",
                    "Review registered users, withdrawal requests, support tickets, and ban suspicious accounts."
                }
                div { class: "mt-6 grid gap-3 grid-cols-2 md:grid-cols-4",
                    div { class: "rounded-lg bg-gray-50 p-4",
                        p { class: "text-xs uppercase text-gray-500", "Users" }
                        p { class: "text-2xl font-bold", "{counts.users}" }
                    }
                    div { class: "rounded-lg bg-gray-50 p-4",
                        p { class: "text-xs uppercase text-gray-500", "Banned Users" }
                        p { class: "text-2xl font-bold", "{counts.banned}" }
                    }
                    div { class: "rounded-lg bg-gray-50 p-4",
                        p { class: "text-xs uppercase text-gray-500", "Withdrawals" }
                        p { class: "text-2xl font-bold", "{counts.withdrawals}" }
                    }
                    div { class: "rounded-lg bg-gray-50 p-4",
                        p { class: "text-xs uppercase text-gray-500", "Tickets" }
                        p { class: "text-2xl font-bold", "{counts.tickets}" }
                    }
                }
                if state.data.is_loading() {
                    p { class: "mt-4 text-sm text-gray-500", aria_busy: "true", "Loading admin data..." }
                }
                if let Some(status) = &state.feedback.status {
                    p { class: "mt-4 status-ok", "{status}" }
                }
                if let Some(error) = &state.feedback.error {
                    p { class: "mt-4 status-err", "{error}" }
                }
                if let Some(message) = state.data.error() {
                    p { class: "mt-4 status-err", "{message}" }
                }
                {prompt_form}
            }
            {sections}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_copy<T: Copy>() {}

    #[test]
    fn test_row_actions_are_copy() {
        assert_copy::<AdminActions>();
        assert_copy::<Navigator>();
    }

    #[test]
    fn test_prompt_keeps_prefill() {
        let prompt = Prompt::PayoutReference {
            withdrawal_id: 4,
            initial: "GC-1".into(),
        };
        assert_eq!(prompt.clone(), prompt);
        assert_ne!(
            prompt,
            Prompt::BanReason {
                user_id: 4,
                initial: "GC-1".into()
            }
        );
    }
}
