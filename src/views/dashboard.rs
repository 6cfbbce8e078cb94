//! Dashboard: survey-wall entry points.

/// A third-party survey wall shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyWallCard {
    pub name: &'static str,
    pub image: &'static str,
    pub alt: &'static str,
    /// In-app page hosting the wall, if there is one
    pub href: Option<&'static str>,
}

pub const SURVEY_WALLS: [SurveyWallCard; 2] = [
    SurveyWallCard {
        name: "BitLabs",
        image: "/survey-walls/bitlabs.svg",
        alt: "BitLabs visual",
        href: Some("/BitLabs"),
    },
    SurveyWallCard {
        name: "TheoremReach",
        image: "/survey-walls/theoremreach.svg",
        alt: "TheoremReach visual",
        href: None,
    },
];
