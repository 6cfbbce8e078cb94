//! Site footer with the legal links.

use dioxus::prelude::*;

use crate::app::Route;

const SOCIAL_LINKS: [(&str, &str); 4] = [
    ("Facebook", "/Facebook.svg"),
    ("Instagram", "/Instagram.svg"),
    ("YouTube", "/Youtube.svg"),
    ("TikTok", "/TikTok.svg"),
];

#[component]
pub fn Footer() -> Element {
    let year = chrono::Utc::now().format("%Y").to_string();
    let link_class = "text-gray-600 hover:text-green-700";

    rsx! {
        footer { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 mt-10 mb-6 pt-6 border-t border-gray-200 flex flex-wrap items-center justify-between gap-4",
            div { class: "space-y-2",
                small { class: "text-gray-500", "(c) {year} SURVEX.app. All rights reserved." }
                div { class: "flex flex-wrap items-center gap-3 text-xs font-semibold",
                    Link { class: link_class, to: Route::Privacy {}, "Privacy Policy" }
                    span { class: "text-gray-300", "|" }
                    Link { class: link_class, to: Route::Cookies {}, "Cookies Policy" }
                    span { class: "text-gray-300", "|" }
                    Link { class: link_class, to: Route::Terms {}, "Terms and Conditions" }
                }
            }
            div { class: "flex items-center gap-2",
                for (name, icon) in SOCIAL_LINKS {
                    a {
                        key: "{name}",
                        href: "#",
                        aria_label: name,
                        class: "inline-flex h-9 w-9 items-center justify-center rounded-full border border-gray-200 hover:border-green-600",
                        img { src: icon, alt: "" }
                    }
                }
            }
        }
    }
}
