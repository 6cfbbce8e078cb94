//! Rewards page: pick a method and amount, confirm, redeem.

use dioxus::prelude::*;
use tracing::debug;

use crate::app::api::{require_token, use_app, use_authenticated_load, use_request_scope};
use crate::app::components::Layout;
use crate::error::ApiError;
use crate::views::refresh_user;
use crate::views::rewards::{RewardsModel, REWARD_METHODS, WITHDRAWAL_AMOUNTS};

const CHOICE_SELECTED: &str = "rounded-lg border-2 border-green-600 bg-green-50 px-4 py-2 font-semibold text-green-800";
const CHOICE_IDLE: &str = "rounded-lg border border-gray-300 bg-white px-4 py-2 text-gray-700 hover:border-green-600";

fn choice_class(selected: bool) -> &'static str {
    if selected {
        CHOICE_SELECTED
    } else {
        CHOICE_IDLE
    }
}

#[component]
pub fn Rewards() -> Element {
    let app = use_app();
    let nav = navigator();
    let scope = use_request_scope();
    let mut model = use_signal(RewardsModel::default);

    use_authenticated_load({
        let scope = scope.clone();
        move |app, token| {
            let scope = scope.clone();
            async move {
                let session = app.session();
                if let Some(current) = session.current() {
                    model.write().balance = current.balance();
                }
                let client = app.client();
                let refreshed = scope
                    .run(async { Ok::<_, ApiError>(refresh_user(&client, &session, &token).await) })
                    .await;
                if let Ok(Some(user)) = refreshed {
                    model.write().balance = user.balance;
                }
            }
        }
    });

    let request_withdrawal = move |_| {
        if let Err(e) = model.write().request_withdrawal() {
            debug!("Withdrawal refused: {}", e);
        }
    };

    let confirm_withdrawal = move |_| {
        let Some(token) = require_token(app, nav) else {
            return;
        };
        let request = match model.write().begin_redeem() {
            Ok(request) => request,
            Err(e) => {
                debug!("Withdrawal refused: {}", e);
                return;
            }
        };
        let scope = scope.clone();
        spawn(async move {
            let client = app.client();
            let result = scope.run(client.redeem(&token, &request)).await;
            if matches!(result, Err(ApiError::Cancelled)) {
                return;
            }
            model.write().finish_redeem(result, &app.session());
        });
    };

    let state = model.read().clone();

    rsx! {
        Layout { title: "Rewards", nav_active: "rewards",
            section { class: "card",
                p { class: "text-xs uppercase tracking-widest font-semibold text-gray-500", "Rewards" }
                h1 { class: "mt-2 text-3xl font-extrabold", "Redeem your points" }
                p { class: "mt-2 text-gray-600",
                    "Exchange your balance for gift cards or cash options. More payout partners will be available soon."
                }
                p { class: "mt-4 text-lg",
                    "Current Balance: "
                    span { class: "font-bold text-green-700", "$ {state.balance}" }
                }

                p { class: "mt-6 font-semibold", "Select withdrawal amount" }
                div { class: "mt-2 flex flex-wrap gap-2",
                    for amount in WITHDRAWAL_AMOUNTS {
                        button {
                            key: "{amount}",
                            class: choice_class(state.selected_amount == amount),
                            r#type: "button",
                            onclick: move |_| model.write().select_amount(amount),
                            "${amount}"
                        }
                    }
                }
                p { class: "mt-4 text-sm text-gray-600",
                    "Selected reward: "
                    span { class: "font-semibold text-gray-900", "{state.selected_method}" }
                }
                div { class: "mt-4 flex items-center gap-4",
                    button {
                        class: "rounded-md bg-green-600 px-5 py-2 font-semibold text-white hover:bg-green-500 disabled:opacity-50",
                        r#type: "button",
                        disabled: state.submitting,
                        onclick: request_withdrawal,
                        "Withdraw ${state.selected_amount}"
                    }
                    if !state.has_enough_balance() {
                        p { class: "status-err text-sm", "Not enough balance for this amount." }
                    }
                }
                if let Some(status) = &state.feedback.status {
                    p { class: "mt-4 status-ok", "{status}" }
                }
                if let Some(error) = &state.feedback.error {
                    p { class: "mt-4 status-err", "{error}" }
                }

                if state.confirming {
                    div { class: "mt-6 rounded-lg border border-gray-200 bg-gray-50 p-4",
                        p {
                            "Are you sure you want to withdraw "
                            span { class: "font-bold", "${state.selected_amount}" }
                            " using "
                            span { class: "font-bold", "{state.selected_method}" }
                            "?"
                        }
                        div { class: "mt-4 flex gap-2",
                            button {
                                class: "rounded-md border border-gray-300 px-4 py-2 hover:bg-white disabled:opacity-50",
                                r#type: "button",
                                disabled: state.submitting,
                                onclick: move |_| model.write().cancel_confirmation(),
                                "Cancel"
                            }
                            button {
                                class: "rounded-md bg-green-600 px-4 py-2 font-semibold text-white hover:bg-green-500 disabled:opacity-50",
                                r#type: "button",
                                disabled: state.submitting,
                                onclick: confirm_withdrawal,
                                if state.submitting { "Processing..." } else { "Yes, withdraw" }
                            }
                        }
                    }
                }
            }

            section { class: "mt-8 grid gap-4 sm:grid-cols-2 lg:grid-cols-3",
                for method in REWARD_METHODS {
                    button {
                        key: "{method}",
                        class: if state.selected_method == method { "card text-left ring-2 ring-green-600" } else { "card text-left hover:ring-1 hover:ring-green-600" },
                        r#type: "button",
                        onclick: move |_| model.write().select_method(method),
                        img { class: "h-32 w-full object-contain", src: "/rewards/{method}.svg", alt: "{method} reference" }
                        p { class: "mt-3 font-semibold", "{method}" }
                    }
                }
            }
        }
    }
}
