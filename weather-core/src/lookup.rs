use std::sync::Arc;

use crate::{
    Config, LookupError, WeatherQuery, WeatherResult,
    provider::{WeatherProvider, provider_from_config},
};

/// Validates a city name and forwards it to the configured provider.
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherLookup {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(provider_from_config(config)?))
    }

    /// Blank input fails with `InvalidInput` before any request is made.
    pub async fn fetch(&self, city: &str) -> Result<WeatherResult, LookupError> {
        let query = WeatherQuery::new(city)?;
        tracing::debug!(city = query.city(), "looking up current weather");

        self.provider.current_weather(&query).await
    }
}
