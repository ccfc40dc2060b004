use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::{fmt::Display, time::Duration};

use crate::{LookupError, WeatherQuery, WeatherResult};

use super::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// `base_url` is the scheme and host, e.g. `https://api.openweathermap.org`.
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        let endpoint = format!("{}{CURRENT_WEATHER_PATH}", base_url.trim_end_matches('/'));

        Ok(Self { api_key, endpoint, http })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

impl OwCurrentResponse {
    /// None when the condition list is empty; every other field is enforced by serde.
    fn into_result(self) -> Option<WeatherResult> {
        let primary = self.weather.into_iter().next()?;

        Some(WeatherResult {
            city: self.name,
            temperature: self.main.temp,
            condition: primary.main,
            description: primary.description,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherResult, LookupError> {
        let city = query.city();

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| upstream_failure(city, "request failed", e))?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            tracing::info!(city, "OpenWeather reported city not found");
            return Err(LookupError::city_not_found(city));
        }

        let body = res
            .text()
            .await
            .map_err(|e| upstream_failure(city, "failed to read response body", e))?;

        if !status.is_success() {
            return Err(upstream_failure(
                city,
                "unexpected status",
                format!("{status}: {}", truncate_body(&body)),
            ));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| upstream_failure(city, "malformed response body", e))?;

        parsed
            .into_result()
            .ok_or_else(|| upstream_failure(city, "malformed response body", "empty weather list"))
    }
}

/// Log the internal cause and return the opaque client-facing error.
fn upstream_failure(city: &str, what: &str, cause: impl Display) -> LookupError {
    tracing::warn!(city, cause = %cause, "OpenWeather {what}");
    LookupError::upstream()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let p = OpenWeatherProvider::new(
            "KEY".into(),
            "http://localhost:1234/".into(),
            Duration::from_secs(1),
        )
        .expect("client builds");

        assert_eq!(p.endpoint, "http://localhost:1234/data/2.5/weather");
    }

    #[test]
    fn empty_condition_list_is_not_a_result() {
        let parsed: OwCurrentResponse =
            serde_json::from_str(r#"{"name":"Oslo","main":{"temp":1.5},"weather":[]}"#)
                .expect("valid json");

        assert!(parsed.into_result().is_none());
    }

    #[test]
    fn first_condition_wins() {
        let parsed: OwCurrentResponse = serde_json::from_str(
            r#"{
                "name": "Oslo",
                "main": {"temp": -3.25, "humidity": 80},
                "weather": [
                    {"id": 600, "main": "Snow", "description": "light snow"},
                    {"id": 701, "main": "Mist", "description": "mist"}
                ]
            }"#,
        )
        .expect("valid json");

        let result = parsed.into_result().expect("complete payload");
        assert_eq!(result.city, "Oslo");
        assert_eq!(result.temperature, -3.25);
        assert_eq!(result.condition, "Snow");
        assert_eq!(result.description, "light snow");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);

        assert_eq!(truncate_body("short"), "short");
    }
}
