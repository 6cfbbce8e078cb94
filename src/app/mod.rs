//! Dioxus fullstack application entry point.
//!
//! The root component installs the shared services and the router. Pages are
//! server-rendered, then hydrated; anything that touches browser storage runs
//! in effects after hydration.

use dioxus::prelude::*;

pub mod api;
pub mod components;
pub mod pages;

use api::use_app_provider;
use pages::{
    Admin, BitLabs, Cookies, Dashboard, Landing, Login, Privacy, Profile, Rewards, Signup,
    Support, Terms,
};

/// Root app component with routing
#[component]
pub fn App() -> Element {
    use_app_provider();

    rsx! {
        Router::<Route> {}
    }
}

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Landing {},
    #[route("/login")]
    Login {},
    #[route("/signup")]
    Signup {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/BitLabs")]
    BitLabs {},
    #[route("/rewards")]
    Rewards {},
    #[route("/profile")]
    Profile {},
    #[route("/support")]
    Support {},
    #[route("/admin")]
    Admin {},
    #[route("/Terms")]
    Terms {},
    #[route("/Privacy")]
    Privacy {},
    #[route("/Cookies")]
    Cookies {},
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Landing {}.to_string(), "/");
        assert_eq!(Route::BitLabs {}.to_string(), "/BitLabs");
        assert_eq!(Route::Terms {}.to_string(), "/Terms");
        assert_eq!(Route::Admin {}.to_string(), "/admin");
    }

    #[test]
    fn test_parse_known_paths() {
        assert_eq!("/rewards".parse::<Route>().ok(), Some(Route::Rewards {}));
        assert_eq!("/Cookies".parse::<Route>().ok(), Some(Route::Cookies {}));
    }
}
