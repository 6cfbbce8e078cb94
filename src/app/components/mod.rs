//! Shared UI components for the Dioxus fullstack web UI.

pub mod confirm_form;
pub mod footer;
pub mod layout;
pub mod legal;
pub mod nav;
pub mod recaptcha;

pub use confirm_form::ConfirmForm;
pub use footer::Footer;
pub use layout::Layout;
pub use nav::{Nav, PublicNav};
pub use recaptcha::{use_recaptcha, Recaptcha, RecaptchaHandle};
