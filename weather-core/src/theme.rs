//! Condition-based presentation theming.
//!
//! A condition string is matched case-insensitively against keyword groups in
//! a fixed order; the first group with a keyword contained in the input wins.

use serde::Serialize;

/// Icon and CSS gradients used to render a weather result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDescriptor {
    pub icon: &'static str,
    pub gradient: &'static str,
    pub container_gradient: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionCategory {
    Clear,
    Cloudy,
    Rain,
    Thunderstorm,
    Snow,
    Fog,
    Default,
}

/// Match order matters: "thunderstorm with rain" is `Rain`.
const KEYWORDS: &[(ConditionCategory, &[&str])] = &[
    (ConditionCategory::Clear, &["clear", "sunny"]),
    (ConditionCategory::Cloudy, &["cloud"]),
    (ConditionCategory::Rain, &["rain", "drizzle"]),
    (ConditionCategory::Thunderstorm, &["thunder", "storm"]),
    (ConditionCategory::Snow, &["snow"]),
    (ConditionCategory::Fog, &["mist", "fog", "haze"]),
];

impl ConditionCategory {
    pub fn from_condition(condition: &str) -> Self {
        let lower = condition.to_lowercase();

        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
            .map(|(category, _)| *category)
            .unwrap_or(Self::Default)
    }

    pub fn theme(self) -> ThemeDescriptor {
        let (icon, gradient, container_gradient) = match self {
            Self::Clear => (
                "☀️",
                "linear-gradient(135deg, #f6d365 0%, #fda085 100%)",
                "linear-gradient(135deg, #fff7e0 0%, #ffe0c2 100%)",
            ),
            Self::Cloudy => (
                "☁️",
                "linear-gradient(135deg, #bdc3c7 0%, #6c7a89 100%)",
                "linear-gradient(135deg, #f0f3f5 0%, #d7dde2 100%)",
            ),
            Self::Rain => (
                "🌧️",
                "linear-gradient(135deg, #4b6cb7 0%, #182848 100%)",
                "linear-gradient(135deg, #dbe6f6 0%, #b6c8e6 100%)",
            ),
            Self::Thunderstorm => (
                "⛈️",
                "linear-gradient(135deg, #373b44 0%, #4286f4 100%)",
                "linear-gradient(135deg, #d3d7e0 0%, #a9b4cc 100%)",
            ),
            Self::Snow => (
                "❄️",
                "linear-gradient(135deg, #e6e9f0 0%, #eef1f5 100%)",
                "linear-gradient(135deg, #ffffff 0%, #e3f2fd 100%)",
            ),
            Self::Fog => (
                "🌫️",
                "linear-gradient(135deg, #757f9a 0%, #d7dde8 100%)",
                "linear-gradient(135deg, #eceff3 0%, #cfd6df 100%)",
            ),
            Self::Default => (
                "🌤️",
                "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
                "linear-gradient(135deg, #ffffff 0%, #f3f0fa 100%)",
            ),
        };

        ThemeDescriptor { icon, gradient, container_gradient }
    }
}

/// Theme for a provider condition string such as "Clouds" or "light rain".
pub fn classify(condition: &str) -> ThemeDescriptor {
    ConditionCategory::from_condition(condition).theme()
}
