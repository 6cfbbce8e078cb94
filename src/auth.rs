//! Signup and login.
//!
//! Registration input is validated locally first (ZIP, age, gender, bot
//! check) and nothing is sent until every rule passes. A successful response
//! is written to the [`SessionStore`]; any failure resets the bot-check widget
//! so the next attempt starts with a fresh token.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::client::types::{AuthResponse, LoginPayload, RegisterPayload, UserProfile};
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::device::get_or_create_device_id;
use crate::error::{ApiError, ValidationError};
use crate::session::SessionStore;
use crate::storage::SharedStore;

pub const ZIP_MESSAGE: &str = "Please use the 5-digit format for your ZIP Code (e.g. 00000).";
pub const AGE_MESSAGE: &str = "Please provide a valid age between 13 and 120.";
pub const GENDER_MESSAGE: &str = "Please select Male or Female.";
pub const BOT_CHECK_MESSAGE: &str = "Please complete the reCAPTCHA verification.";
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed.";

pub const MIN_AGE: i64 = 13;
pub const MAX_AGE: i64 = 120;

/// ASCII digits only; `\d` would also admit other scripts' digits.
static ZIP_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[0-9]{5}$").ok());

/// Signup form as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub address_line1: String,
    pub address_line2: String,
    pub zip_code: String,
    pub age: String,
    pub gender: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_all: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

pub fn validate_zip(value: &str) -> Result<(), ValidationError> {
    if ZIP_RE.as_ref().is_some_and(|re| re.is_match(value.trim())) {
        Ok(())
    } else {
        Err(ValidationError::new("zip_code", ZIP_MESSAGE))
    }
}

/// Whole number in `[13, 120]`. `"13.0"` counts as whole.
pub fn validate_age(value: &str) -> Result<i64, ValidationError> {
    let invalid = || ValidationError::new("age", AGE_MESSAGE);
    let trimmed = value.trim();

    let age = match trimmed.parse::<i64>() {
        Ok(age) => age,
        Err(_) => {
            let float = trimmed.parse::<f64>().map_err(|_| invalid())?;
            if !float.is_finite() || float.fract() != 0.0 {
                return Err(invalid());
            }
            float as i64
        }
    };

    if (MIN_AGE..=MAX_AGE).contains(&age) {
        Ok(age)
    } else {
        Err(invalid())
    }
}

pub fn validate_gender(value: &str) -> Result<Gender, ValidationError> {
    Gender::parse(value).ok_or_else(|| ValidationError::new("gender", GENDER_MESSAGE))
}

/// Run every signup rule in order, stopping at the first failure.
///
/// `bot_token` is only checked when `bot_check_required` is set.
pub fn validate_registration(
    form: &RegistrationForm,
    bot_check_required: bool,
    bot_token: &str,
) -> Result<(), ValidationError> {
    validate_zip(&form.zip_code)?;
    validate_age(&form.age)?;
    validate_gender(&form.gender)?;
    if bot_check_required && bot_token.trim().is_empty() {
        return Err(ValidationError::new("recaptcha", BOT_CHECK_MESSAGE));
    }
    Ok(())
}

impl RegistrationForm {
    /// Wire body with text trimmed and passwords untouched.
    pub fn to_payload(&self, recaptcha_token: &str, device_id: &str) -> RegisterPayload {
        RegisterPayload {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            address_line1: self.address_line1.trim().to_string(),
            address_line2: self.address_line2.trim().to_string(),
            zip_code: self.zip_code.trim().to_string(),
            age: self.age.trim().to_string(),
            gender: self.gender.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            accept_all: self.accept_all,
            recaptcha_token: recaptcha_token.trim().to_string(),
            device_id: device_id.to_string(),
        }
    }
}

impl LoginForm {
    pub fn to_payload(&self, device_id: &str) -> LoginPayload {
        LoginPayload {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            recaptcha_token: String::new(),
            device_id: device_id.to_string(),
        }
    }
}

/// A human-verification widget.
pub trait BotCheck {
    /// Current verification token, empty when unsolved or expired.
    fn token(&self) -> String;
    /// Invalidate the current token and re-arm the challenge.
    fn reset(&self);
}

/// Used for login and when no site key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBotCheck;

impl BotCheck for NoBotCheck {
    fn token(&self) -> String {
        String::new()
    }

    fn reset(&self) {}
}

/// Submits auth forms and records the resulting session.
#[derive(Clone)]
pub struct AuthFlow {
    client: ApiClient,
    session: SessionStore,
    storage: SharedStore,
    config: ClientConfig,
}

impl AuthFlow {
    pub fn new(
        client: ApiClient,
        session: SessionStore,
        storage: SharedStore,
        config: ClientConfig,
    ) -> Self {
        Self {
            client,
            session,
            storage,
            config,
        }
    }

    pub fn bot_check_enabled(&self) -> bool {
        self.config.bot_check_enabled()
    }

    pub async fn register(
        &self,
        form: &RegistrationForm,
        bot: &dyn BotCheck,
    ) -> Result<Option<UserProfile>, ApiError> {
        let token = bot.token();
        if let Err(e) = validate_registration(form, self.bot_check_enabled(), &token) {
            debug!(field = e.field, "Signup rejected before sending");
            bot.reset();
            return Err(e.into());
        }

        let device_id = get_or_create_device_id(self.storage.as_ref());
        let payload = form.to_payload(&token, &device_id);
        let result = self.client.register(&payload).await;
        self.complete(result, bot)
    }

    pub async fn login(
        &self,
        form: &LoginForm,
        bot: &dyn BotCheck,
    ) -> Result<Option<UserProfile>, ApiError> {
        let device_id = get_or_create_device_id(self.storage.as_ref());
        let result = self.client.login(&form.to_payload(&device_id)).await;
        self.complete(result, bot)
    }

    fn complete(
        &self,
        result: Result<AuthResponse, ApiError>,
        bot: &dyn BotCheck,
    ) -> Result<Option<UserProfile>, ApiError> {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                debug!("Authentication failed: {}", e);
                bot.reset();
                return Err(e);
            }
        };

        let Some(token) = response.token.filter(|t| !t.trim().is_empty()) else {
            bot.reset();
            return Err(ApiError::Decode("response carried no token".to_string()));
        };

        info!("Signed in");
        self.session.save(&token, response.user.clone());
        Ok(response.user)
    }
}

/// The one message shown for a failed signup or login.
pub fn failure_message(error: &ApiError) -> String {
    error.user_message(AUTH_FAILED_MESSAGE)
}
