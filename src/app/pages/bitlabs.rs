//! BitLabs survey wall page.

use dioxus::prelude::*;

use crate::app::api::{use_authenticated_load, use_request_scope};
use crate::app::components::Layout;
use crate::format::or_dash;
use crate::views::surveys::{format_loi, SurveyDisplay, SurveysModel, DEMO_MODE_NOTICE, NO_SURVEYS_MESSAGE};
use crate::views::ViewState;

#[component]
pub fn BitLabs() -> Element {
    let scope = use_request_scope();
    let mut model = use_signal(SurveysModel::default);

    use_authenticated_load(move |app, token| {
        let scope = scope.clone();
        async move {
            model.write().load_started();
            let client = app.client();
            let result = scope.run(client.bitlabs_surveys(&token)).await;
            model.write().load_finished(result);
        }
    });

    let content = match &model.read().wall {
        ViewState::Idle | ViewState::Loading => rsx! {
            div { class: "card", aria_busy: "true", "Loading surveys..." }
        },
        ViewState::Failed(message) => rsx! {
            p { class: "card status-err", "{message}" }
        },
        ViewState::Ready(wall) => {
            let body = match wall.display() {
                SurveyDisplay::Embedded(url) => rsx! {
                    div { class: "card p-0 overflow-hidden",
                        iframe {
                            class: "wall-frame",
                            src: "{url}",
                            title: "BitLabs Surveys",
                            allow: "clipboard-read; clipboard-write",
                        }
                    }
                },
                SurveyDisplay::Empty => rsx! {
                    article { class: "card text-gray-500", "{NO_SURVEYS_MESSAGE}" }
                },
                SurveyDisplay::Cards(surveys) => rsx! {
                    div { class: "grid gap-4 sm:grid-cols-2 lg:grid-cols-3",
                        for survey in surveys.iter() {
                            article { key: "{survey.id}-{survey.name}", class: "card",
                                h3 { class: "font-bold", "{survey.name}" }
                                div { class: "mt-2 text-sm text-gray-600 space-y-1",
                                    p { "Reward: ${survey.reward}" }
                                    p { "Estimated time: " {format_loi(survey.loi)} }
                                    p { "Country: " {or_dash(Some(&survey.country))} }
                                }
                            }
                        }
                    }
                },
            };
            rsx! {
                if wall.is_demo() {
                    p { class: "mb-4 rounded-md bg-yellow-50 p-3 text-sm text-yellow-800", "{DEMO_MODE_NOTICE}" }
                }
                if let Some(info) = &wall.info {
                    p { class: "mb-4 rounded-md bg-blue-50 p-3 text-sm text-blue-800", "{info}" }
                }
                {body}
            }
        }
    };

    rsx! {
        Layout { title: "BitLabs", nav_active: "dashboard",
            section {
                p { class: "text-xs uppercase tracking-widest font-semibold text-gray-500", "BitLabs" }
                h1 { class: "mt-2 text-3xl font-extrabold", "Available Surveys" }
                p { class: "mt-2 mb-6 text-gray-600",
                    "Complete surveys and receive rewards. Duplicate completion checks are active to prevent fraud."
                }
                {content}
            }
        }
    }
}
