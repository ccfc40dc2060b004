use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// A validated city lookup. The city is always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    city: String,
}

impl WeatherQuery {
    pub fn new(city: &str) -> Result<Self, LookupError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(LookupError::city_required());
        }

        Ok(Self { city: city.to_string() })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Normalized current weather returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub city: String,
    /// Degrees Celsius, as reported by the provider.
    pub temperature: f64,
    /// Short category such as "Clouds" or "Rain".
    pub condition: String,
    pub description: String,
}
