//! Navigation bars using Tailwind CSS.

use dioxus::prelude::*;
use tracing::info;

use crate::app::api::use_app;
use crate::app::Route;
use crate::format::Money;

#[derive(Props, Clone, PartialEq)]
pub struct NavProps {
    /// The currently active page ID (e.g., "dashboard", "rewards")
    pub active: String,
}

/// Signed-in navigation with the live balance and a mobile toggle.
#[component]
pub fn Nav(props: NavProps) -> Element {
    let app = use_app();
    let nav = navigator();
    let mut menu_open = use_signal(|| false);

    let (balance, is_staff) = match app.session_state.read().as_ref() {
        Some(session) => (session.balance(), session.is_staff()),
        None => (Money::ZERO, false),
    };

    let nav_link_class = |page: &str| {
        if props.active == page {
            "block px-3 py-2 rounded-md text-sm font-medium text-white bg-gray-900"
        } else {
            "block px-3 py-2 rounded-md text-sm font-medium text-gray-300 hover:text-white hover:bg-gray-700"
        }
    };

    let mobile_menu_class = if menu_open() {
        "block lg:hidden"
    } else {
        "hidden lg:hidden"
    };

    let logout = move |_: MouseEvent| {
        info!("Signing out");
        app.session().clear();
        menu_open.set(false);
        nav.push(Route::Login {});
    };

    rsx! {
        nav { class: "bg-gray-800",
            div { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8",
                div { class: "flex items-center justify-between h-16",
                    // Logo / Brand
                    div { class: "flex items-center",
                        Link { class: "text-white font-bold text-xl", to: Route::Dashboard {}, "Survex" }
                    }

                    // Desktop navigation
                    div { class: "hidden lg:flex items-center space-x-4",
                        Link { class: nav_link_class("dashboard"), to: Route::Dashboard {}, "Earn" }
                        Link { class: nav_link_class("rewards"), to: Route::Rewards {}, "Rewards" }
                        Link { class: nav_link_class("support"), to: Route::Support {}, "Support" }
                        Link { class: nav_link_class("profile"), to: Route::Profile {}, "Profile" }
                        if is_staff {
                            Link { class: nav_link_class("admin"), to: Route::Admin {}, "Admin" }
                        }
                        span { class: "px-3 py-1 rounded-full bg-green-600 text-white text-sm font-semibold", "${balance}" }
                        button {
                            class: "px-3 py-2 rounded-md text-sm font-medium text-gray-300 hover:text-white hover:bg-gray-700",
                            r#type: "button",
                            onclick: logout,
                            "Logout"
                        }
                    }

                    // Mobile menu button
                    div { class: "lg:hidden flex items-center gap-3",
                        span { class: "px-2 py-1 rounded-full bg-green-600 text-white text-xs font-semibold", "${balance}" }
                        button {
                            class: "inline-flex items-center justify-center p-2 rounded-md text-gray-400 hover:text-white hover:bg-gray-700 focus:outline-none",
                            r#type: "button",
                            onclick: move |_| menu_open.toggle(),
                            span { class: "sr-only", "Toggle menu" }
                            if menu_open() {
                                // X icon
                                svg { class: "h-6 w-6", fill: "none", view_box: "0 0 24 24", stroke: "currentColor", "stroke-width": "2",
                                    path { "stroke-linecap": "round", "stroke-linejoin": "round", d: "M6 18L18 6M6 6l12 12" }
                                }
                            } else {
                                // Hamburger icon
                                svg { class: "h-6 w-6", fill: "none", view_box: "0 0 24 24", stroke: "currentColor", "stroke-width": "2",
                                    path { "stroke-linecap": "round", "stroke-linejoin": "round", d: "M4 6h16M4 12h16M4 18h16" }
                                }
                            }
                        }
                    }
                }
            }

            // Mobile menu
            div { class: "{mobile_menu_class}", id: "mobile-menu",
                div { class: "px-2 pt-2 pb-3 space-y-1",
                    Link { class: nav_link_class("dashboard"), to: Route::Dashboard {}, onclick: move |_| menu_open.set(false), "Earn" }
                    Link { class: nav_link_class("rewards"), to: Route::Rewards {}, onclick: move |_| menu_open.set(false), "Rewards" }
                    Link { class: nav_link_class("support"), to: Route::Support {}, onclick: move |_| menu_open.set(false), "Support" }
                    Link { class: nav_link_class("profile"), to: Route::Profile {}, onclick: move |_| menu_open.set(false), "Profile" }
                    if is_staff {
                        Link { class: nav_link_class("admin"), to: Route::Admin {}, onclick: move |_| menu_open.set(false), "Admin" }
                    }
                    button {
                        class: "block w-full text-left px-3 py-2 rounded-md text-sm font-medium text-gray-300 hover:text-white hover:bg-gray-700",
                        r#type: "button",
                        onclick: logout,
                        "Logout"
                    }
                }
            }
        }
    }
}

/// Header for signed-out pages.
#[component]
pub fn PublicNav() -> Element {
    rsx! {
        nav { class: "bg-gray-800",
            div { class: "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 flex items-center justify-between h-16",
                Link { class: "text-white font-bold text-xl", to: Route::Landing {}, "Survex" }
                div { class: "flex items-center space-x-2",
                    Link {
                        class: "px-3 py-2 rounded-md text-sm font-medium text-gray-300 hover:text-white hover:bg-gray-700",
                        to: Route::Login {},
                        "Log in"
                    }
                    Link {
                        class: "px-3 py-2 rounded-md text-sm font-semibold text-white bg-green-600 hover:bg-green-500",
                        to: Route::Signup {},
                        "Sign up"
                    }
                }
            }
        }
    }
}
