//! Support page: open a ticket and list your own.

use dioxus::prelude::*;
use tracing::debug;

use crate::app::api::{require_token, use_app, use_authenticated_load, use_request_scope};
use crate::app::components::Layout;
use crate::error::ApiError;
use crate::format::format_timestamp;
use crate::views::refresh_user;
use crate::views::support::{SupportModel, TICKET_CATEGORIES};
use crate::views::ViewState;

const INPUT_CLASS: &str = "mt-1 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-green-600 focus:outline-none";

fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[component]
pub fn Support() -> Element {
    let app = use_app();
    let nav = navigator();
    let scope = use_request_scope();
    let mut model = use_signal(SupportModel::default);

    use_authenticated_load({
        let scope = scope.clone();
        move |app, token| {
            let scope = scope.clone();
            async move {
                model.write().load_started();
                let client = app.client();
                let session = app.session();
                let (tickets, _) = futures::join!(
                    scope.run(client.my_tickets(&token)),
                    scope.run(async { Ok::<_, ApiError>(refresh_user(&client, &session, &token).await) }),
                );
                if matches!(tickets, Err(ApiError::Cancelled)) {
                    return;
                }
                model.write().load_finished(tickets);
            }
        }
    });

    let onsubmit = move |e: FormEvent| {
        e.prevent_default();
        let Some(token) = require_token(app, nav) else {
            return;
        };
        let ticket = match model.write().begin_create() {
            Ok(ticket) => ticket,
            Err(e) => {
                debug!("Ticket not sent: {}", e);
                return;
            }
        };
        let scope = scope.clone();
        spawn(async move {
            let client = app.client();
            let result = scope.run(client.create_ticket(&token, &ticket)).await;
            if matches!(result, Err(ApiError::Cancelled)) {
                return;
            }
            model.write().finish_create(result);
        });
    };

    let state = model.read().clone();
    let mailto = format!("mailto:{}", state.support_email);

    let tickets = match &state.tickets {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { class: "mt-4 text-sm text-gray-500", "Loading tickets..." }
        },
        ViewState::Failed(message) => rsx! {
            p { class: "mt-4 status-err", "{message}" }
        },
        ViewState::Ready(list) if list.is_empty() => rsx! {
            p { class: "mt-4 text-sm text-gray-500", "No tickets yet." }
        },
        ViewState::Ready(list) => rsx! {
            div { class: "mt-4 overflow-x-auto",
                table { class: "data",
                    thead {
                        tr {
                            th { "Ticket" }
                            th { "Subject" }
                            th { "Category" }
                            th { "Status" }
                            th { "Date" }
                        }
                    }
                    tbody {
                        for ticket in list.iter() {
                            tr { key: "{ticket.id}",
                                td { "#{ticket.id}" }
                                td { "{ticket.subject}" }
                                td { {category_label(&ticket.category)} }
                                td { span { class: "capitalize", "{ticket.status}" } }
                                td { {format_timestamp(ticket.created_at.as_deref())} }
                            }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        Layout { title: "Support", nav_active: "support",
            section { class: "card",
                p { class: "text-xs uppercase tracking-widest font-semibold text-gray-500", "Support" }
                h1 { class: "mt-2 text-3xl font-extrabold", "Contact Support" }
                p { class: "mt-2 text-gray-600",
                    "Send us a ticket and our team will review your request. Support contact email: "
                    a { class: "font-semibold text-green-700", href: "{mailto}", "{state.support_email}" }
                }
                form { class: "mt-6 space-y-4", onsubmit,
                    div { class: "grid gap-4 md:grid-cols-3",
                        div { class: "md:col-span-2",
                            label { class: "block text-sm font-medium text-gray-700", r#for: "subject", "Subject" }
                            input {
                                class: INPUT_CLASS,
                                id: "subject",
                                r#type: "text",
                                maxlength: 160,
                                required: true,
                                placeholder: "Short summary of your issue",
                                value: "{state.draft.subject}",
                                oninput: move |e| model.write().draft.subject = e.value(),
                            }
                        }
                        div {
                            label { class: "block text-sm font-medium text-gray-700", r#for: "category", "Category" }
                            select {
                                class: INPUT_CLASS,
                                id: "category",
                                value: "{state.draft.category}",
                                onchange: move |e| model.write().draft.category = e.value(),
                                for category in TICKET_CATEGORIES {
                                    option { key: "{category}", value: category, {category_label(category)} }
                                }
                            }
                        }
                    }
                    div {
                        label { class: "block text-sm font-medium text-gray-700", r#for: "message", "Message" }
                        textarea {
                            class: INPUT_CLASS,
                            id: "message",
                            rows: 7,
                            maxlength: 4000,
                            required: true,
                            placeholder: "Describe your issue in detail",
                            value: "{state.draft.message}",
                            oninput: move |e| model.write().draft.message = e.value(),
                        }
                    }
                    if let Some(status) = &state.feedback.status {
                        p { class: "status-ok", "{status}" }
                    }
                    if let Some(error) = &state.feedback.error {
                        p { class: "status-err", "{error}" }
                    }
                    button {
                        class: "rounded-md bg-green-600 px-5 py-2 font-semibold text-white hover:bg-green-500 disabled:opacity-50",
                        r#type: "submit",
                        disabled: state.submitting,
                        if state.submitting { "Sending..." } else { "Submit Ticket" }
                    }
                }
            }
            section { class: "card mt-8",
                h2 { class: "text-2xl font-extrabold", "Your Tickets" }
                {tickets}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("rewards"), "Rewards");
        assert_eq!(category_label("technical"), "Technical");
        assert_eq!(category_label(""), "");
    }
}
