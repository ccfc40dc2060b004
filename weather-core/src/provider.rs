use crate::{Config, LookupError, WeatherQuery, WeatherResult, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// An upstream source of current weather.
///
/// Implementations make exactly one outbound request per call and report
/// failures through the client-facing [`LookupError`] taxonomy.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherResult, LookupError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    let timeout = config.request_timeout()?;

    let provider =
        OpenWeatherProvider::new(api_key.to_owned(), config.provider.base_url.clone(), timeout)?;

    Ok(Arc::new(provider))
}
