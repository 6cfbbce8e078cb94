//! One page template for every legal document.

use dioxus::prelude::*;

use super::Layout;
use crate::app::Route;

#[derive(Debug, PartialEq, Eq)]
pub struct LegalSection {
    pub heading: &'static str,
    pub paragraphs: &'static [&'static str],
}

#[derive(Debug, PartialEq, Eq)]
pub struct LegalDocument {
    pub title: &'static str,
    pub effective_date: &'static str,
    pub sections: &'static [LegalSection],
}

#[component]
pub fn LegalPage(document: &'static LegalDocument) -> Element {
    rsx! {
        Layout { title: document.title, nav_active: "legal", public: true,
            article { class: "card max-w-3xl mx-auto",
                div { class: "mb-6 flex items-center justify-between gap-4",
                    h1 { class: "text-3xl font-extrabold", "{document.title}" }
                    Link {
                        class: "rounded-full border border-green-600 px-4 py-2 text-sm font-semibold text-green-700 hover:bg-green-50",
                        to: Route::Signup {},
                        "Back to Sign Up"
                    }
                }
                p { class: "text-sm text-gray-500", "Effective date: {document.effective_date}" }
                div { class: "mt-6 space-y-5 text-sm leading-relaxed text-gray-700",
                    for (number, part) in (1..).zip(document.sections.iter()) {
                        section { key: "{number}",
                            h2 { class: "mb-2 text-lg font-bold text-gray-900", "{number}. {part.heading}" }
                            for paragraph in part.paragraphs.iter() {
                                p { class: "mb-2", "{paragraph}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
