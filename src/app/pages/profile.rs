//! Read-only profile with survey and redemption history.

use dioxus::prelude::*;

use crate::app::api::{use_authenticated_load, use_request_scope};
use crate::app::components::Layout;
use crate::error::ApiError;
use crate::format::{format_timestamp, or_dash};
use crate::views::profile::{outcome_label, ProfileData, ProfileModel};
use crate::views::ViewState;

fn outcome_class(outcome: &str) -> &'static str {
    match outcome {
        "Completed" => "rounded-full bg-green-100 px-2 py-0.5 text-xs font-semibold text-green-800",
        "Reversed" => "rounded-full bg-yellow-100 px-2 py-0.5 text-xs font-semibold text-yellow-800",
        _ => "rounded-full bg-red-100 px-2 py-0.5 text-xs font-semibold text-red-800",
    }
}

#[component]
fn Detail(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "rounded-lg bg-gray-50 p-3",
            p { class: "text-xs uppercase tracking-wide text-gray-500", "{label}" }
            p { class: "mt-1 font-semibold", "{value}" }
        }
    }
}

fn details(data: &ProfileData) -> Element {
    let profile = &data.profile;
    let age = profile.age.map(|a| a.to_string());

    rsx! {
        div { class: "mt-6 grid gap-3 sm:grid-cols-2 lg:grid-cols-3",
            Detail { label: "Email", value: or_dash(Some(&profile.email)) }
            Detail { label: "First Name", value: or_dash(Some(&profile.first_name)) }
            Detail { label: "Last Name", value: or_dash(Some(&profile.last_name)) }
            Detail { label: "Address (Line 1)", value: or_dash(Some(&profile.address_line1)) }
            Detail { label: "Address (Line 2)", value: or_dash(Some(&profile.address_line2)) }
            Detail { label: "ZIP Code", value: or_dash(Some(&profile.zip_code)) }
            Detail { label: "Age", value: or_dash(age.as_deref()) }
            Detail { label: "Gender", value: or_dash(Some(&profile.gender)) }
            Detail { label: "Balance", value: format!("$ {}", profile.balance) }
            Detail { label: "Account Created", value: format_timestamp(profile.created_at.as_deref()) }
        }
    }
}

fn survey_history(data: &ProfileData) -> Element {
    if data.survey_history.is_empty() {
        return rsx! { p { class: "mt-6 text-sm text-gray-500", "No survey history yet." } };
    }
    rsx! {
        div { class: "mt-4 overflow-x-auto",
            table { class: "data",
                thead {
                    tr {
                        th { "Survey ID" }
                        th { "Status" }
                        th { "Value" }
                        th { "Date" }
                    }
                }
                tbody {
                    for item in data.survey_history.iter() {
                        tr { key: "{item.id}",
                            td { {or_dash(Some(&item.survey_id))} }
                            td {
                                span { class: outcome_class(&item.outcome), {outcome_label(item).to_string()} }
                            }
                            td { "$ {item.reward}" }
                            td { {format_timestamp(item.created_at.as_deref())} }
                        }
                    }
                }
            }
        }
    }
}

fn redemption_history(data: &ProfileData) -> Element {
    if data.redemption_history.is_empty() {
        return rsx! { p { class: "mt-6 text-sm text-gray-500", "No withdrawal requests yet." } };
    }
    rsx! {
        div { class: "mt-4 overflow-x-auto",
            table { class: "data",
                thead {
                    tr {
                        th { "Reward" }
                        th { "Amount" }
                        th { "Status" }
                        th { "Date" }
                    }
                }
                tbody {
                    for item in data.redemption_history.iter() {
                        tr { key: "{item.id}",
                            td { "{item.reward_method}" }
                            td { "$ {item.amount}" }
                            td {
                                span { class: "capitalize", "{item.status}" }
                                if let Some(reference) = item.payout_reference.as_deref().filter(|r| !r.is_empty()) {
                                    p { class: "text-xs text-gray-500", "Code/Tx: {reference}" }
                                }
                            }
                            td { {format_timestamp(item.created_at.as_deref())} }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Profile() -> Element {
    let scope = use_request_scope();
    let mut model = use_signal(ProfileModel::default);

    use_authenticated_load(move |app, token| {
        let scope = scope.clone();
        async move {
            model.write().load_started();
            let client = app.client();
            let result = scope.run(client.profile(&token)).await;
            if matches!(result, Err(ApiError::Cancelled)) {
                return;
            }
            model.write().load_finished(result, &app.session());
        }
    });

    let state = model.read();
    let (overview, surveys, redemptions) = match &state.data {
        ViewState::Idle | ViewState::Loading => (
            rsx! { div { class: "mt-6", aria_busy: "true", "Loading profile..." } },
            rsx! {},
            rsx! {},
        ),
        ViewState::Failed(message) => (
            rsx! { p { class: "mt-6 status-err", "{message}" } },
            rsx! {},
            rsx! {},
        ),
        ViewState::Ready(data) => (details(data), survey_history(data), redemption_history(data)),
    };

    rsx! {
        Layout { title: "Profile", nav_active: "profile",
            section { class: "card",
                p { class: "text-xs uppercase tracking-widest font-semibold text-gray-500", "My Profile" }
                h1 { class: "mt-2 text-3xl font-extrabold", "Account Overview" }
                p { class: "mt-2 text-gray-600", "Your personal information is shown here as read-only." }
                {overview}
            }
            section { class: "card mt-8",
                h2 { class: "text-2xl font-extrabold", "Survey History" }
                p { class: "mt-1 text-sm text-gray-500", "Completed and disqualified surveys with value and date." }
                {surveys}
            }
            section { class: "card mt-8",
                h2 { class: "text-2xl font-extrabold", "Rewards Redemption History" }
                p { class: "mt-1 text-sm text-gray-500", "Your gift card and cash-out withdrawal requests." }
                {redemptions}
            }
        }
    }
}
