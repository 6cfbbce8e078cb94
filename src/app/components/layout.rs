//! Layout component wrapping every page with the shared head, header and footer.

use dioxus::prelude::*;

use super::footer::Footer;
use super::nav::{Nav, PublicNav};

/// CSS on top of Tailwind.
const CUSTOM_STYLES: &str = r#"
body { background: #f7f8fa; }
.status-ok { color: #15803d; }
.status-err { color: #b91c1c; }
.card { background: #fff; border-radius: 0.75rem; box-shadow: 0 1px 3px rgba(0,0,0,.08); padding: 1.25rem; }
.wall-frame { width: 100%; min-height: 80vh; border: 0; border-radius: 0.75rem; }
table.data { width: 100%; font-size: 0.875rem; }
table.data th { text-align: left; color: #6b7280; font-weight: 500; padding: 0.5rem; }
table.data td { padding: 0.5rem; border-top: 1px solid #e5e7eb; }
"#;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page title (shown in browser tab)
    #[props(into)]
    pub title: String,
    /// Active navigation item ID
    #[props(into)]
    pub nav_active: String,
    /// Page content
    pub children: Element,
    /// Landing, auth and legal pages show the signed-out header
    #[props(default = false)]
    pub public: bool,
}

/// Main layout component wrapping all pages.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let full_title = format!("{} - Survex", props.title);

    rsx! {
        // Head elements - Dioxus hoists these to the real <head>
        document::Title { "{full_title}" }
        document::Script { src: "https://cdn.tailwindcss.com" }
        document::Style { {CUSTOM_STYLES} }

        header {
            if props.public {
                PublicNav {}
            } else {
                Nav { active: props.nav_active.clone() }
            }
        }
        main { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8 min-h-[70vh]",
            {props.children}
        }
        Footer {}
    }
}
