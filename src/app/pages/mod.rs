//! Dioxus fullstack page components.

mod admin;
mod auth;
mod bitlabs;
mod dashboard;
mod landing;
mod legal;
mod profile;
mod rewards;
mod support;

pub use admin::Admin;
pub use auth::{Login, Signup};
pub use bitlabs::BitLabs;
pub use dashboard::Dashboard;
pub use landing::Landing;
pub use legal::{Cookies, Privacy, Terms};
pub use profile::Profile;
pub use rewards::Rewards;
pub use support::Support;
