//! Dashboard page component.
//!
//! Survey-wall entry points. Mounting also refreshes the cached user so the
//! nav balance is current.

use dioxus::prelude::*;

use crate::app::api::{use_authenticated_load, use_request_scope};
use crate::app::components::Layout;
use crate::error::ApiError;
use crate::views::dashboard::{SurveyWallCard, SURVEY_WALLS};
use crate::views::refresh_user;

const HERO_STYLE: &str =
    "background-image: linear-gradient(120deg, #67e8f9, #38bdf8, #f43f5e, #67e8f9); background-size: 250% 250%;";

#[component]
fn WallCard(wall: SurveyWallCard) -> Element {
    let body = rsx! {
        div { class: "overflow-hidden rounded-xl bg-white/80",
            img { class: "w-full h-40 object-cover", src: wall.image, alt: wall.alt }
        }
        p { class: "mt-3 text-lg font-bold text-gray-900", "{wall.name}" }
    };

    match wall.href {
        Some(href) => rsx! {
            Link { class: "card block hover:shadow-lg transition", to: href, {body} }
        },
        None => rsx! {
            article { class: "card", {body} }
        },
    }
}

/// Dashboard page component.
#[component]
pub fn Dashboard() -> Element {
    let scope = use_request_scope();

    use_authenticated_load(move |app, token| {
        let scope = scope.clone();
        async move {
            let client = app.client();
            let session = app.session();
            // A failed refresh keeps the cached user.
            let _ = scope
                .run(async { Ok::<_, ApiError>(refresh_user(&client, &session, &token).await) })
                .await;
        }
    });

    rsx! {
        Layout { title: "Dashboard", nav_active: "dashboard",
            section { class: "rounded-2xl p-8 text-white", style: HERO_STYLE,
                p { class: "text-xs uppercase tracking-widest font-semibold", "Survey Walls" }
                h1 { class: "mt-2 text-3xl font-extrabold", "Start earning with premium partners" }
                p { class: "mt-2 max-w-xl", "Choose a survey wall and complete available offers to increase your balance." }
                div { class: "mt-6 grid gap-4 sm:grid-cols-2",
                    for wall in SURVEY_WALLS {
                        WallCard { key: "{wall.name}", wall }
                    }
                }
            }
            section { class: "card mt-8",
                p { class: "text-xs uppercase tracking-widest font-semibold text-gray-500", "Mobile Game Offers" }
                h2 { class: "mt-2 text-2xl font-bold", "Complete game tasks and earn rewards" }
                p { class: "mt-4 inline-block rounded-full bg-gray-100 px-4 py-1 text-sm font-semibold text-gray-600", "Coming Soon" }
            }
        }
    }
}
