//! BitLabs survey wall.

use crate::client::types::{Survey, SurveysResponse};
use crate::error::ApiError;

use super::state::ViewState;

pub const SURVEYS_LOAD_FAILED: &str = "Failed to load surveys.";
pub const NO_SURVEYS_MESSAGE: &str = "No surveys available right now.";
pub const DEMO_MODE_NOTICE: &str =
    "Demo mode active. Configure BitLabs API credentials in backend env to load live surveys.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveySource {
    BitLabs,
    Demo,
}

impl SurveySource {
    /// Missing or unrecognized sources are treated as demo data.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "bitlabs" => SurveySource::BitLabs,
            _ => SurveySource::Demo,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurveyWall {
    pub source: SurveySource,
    pub surveys: Vec<Survey>,
    /// Informational banner from the backend
    pub info: Option<String>,
}

/// What the page body shows once loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurveyDisplay<'a> {
    /// The offerwall itself, in an iframe
    Embedded(&'a str),
    Cards(&'a [Survey]),
    Empty,
}

impl SurveyWall {
    pub fn is_demo(&self) -> bool {
        self.source == SurveySource::Demo
    }

    /// First survey with an entry URL wins the iframe.
    pub fn embedded_url(&self) -> Option<&str> {
        self.surveys
            .iter()
            .filter_map(|s| s.entry_url.as_deref())
            .find(|url| !url.trim().is_empty())
    }

    pub fn display(&self) -> SurveyDisplay<'_> {
        if let Some(url) = self.embedded_url() {
            SurveyDisplay::Embedded(url)
        } else if self.surveys.is_empty() {
            SurveyDisplay::Empty
        } else {
            SurveyDisplay::Cards(&self.surveys)
        }
    }
}

impl From<SurveysResponse> for SurveyWall {
    fn from(response: SurveysResponse) -> Self {
        Self {
            source: SurveySource::parse(response.source.as_deref()),
            surveys: response.surveys,
            info: response
                .message
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveysModel {
    pub wall: ViewState<SurveyWall>,
}

impl SurveysModel {
    pub fn load_started(&mut self) {
        self.wall = ViewState::Loading;
    }

    pub fn load_finished(&mut self, result: Result<SurveysResponse, ApiError>) {
        self.wall.resolve(result.map(SurveyWall::from), SURVEYS_LOAD_FAILED);
    }
}

/// Length of interview for a survey card.
pub fn format_loi(loi: Option<f64>) -> String {
    match loi {
        Some(minutes) if minutes.is_finite() && minutes > 0.0 => format!("{} min", minutes.round()),
        _ => "-".to_string(),
    }
}
