use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use weather_core::{LookupError, WeatherLookup, WeatherResult};

#[derive(Debug, Deserialize)]
struct WeatherParams {
    city: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    status_code: u16,
    message: &'a str,
}

/// HTTP rendering of a [`LookupError`].
#[derive(Debug)]
pub struct ApiError(LookupError);

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody { status_code: status.as_u16(), message: self.0.message() };

        (status, Json(body)).into_response()
    }
}

pub fn router(lookup: Arc<WeatherLookup>) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(lookup)
}

async fn get_weather(
    State(lookup): State<Arc<WeatherLookup>>,
    params: Result<Query<WeatherParams>, QueryRejection>,
) -> Result<Json<WeatherResult>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected weather query string");
        LookupError::city_required()
    })?;
    let city = params.city.unwrap_or_default();
    let result = lookup.fetch(&city).await?;

    Ok(Json(result))
}

/// Serve until Ctrl-C.
pub async fn serve(lookup: Arc<WeatherLookup>, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;

    let addr = listener.local_addr().context("Failed to read bound address")?;
    tracing::info!(%addr, "weather proxy listening");

    axum::serve(listener, router(lookup))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("weather proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;
    use weather_core::{WeatherProvider, WeatherQuery};

    #[derive(Debug)]
    struct StubProvider;

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn current_weather(
            &self,
            query: &WeatherQuery,
        ) -> Result<WeatherResult, LookupError> {
            match query.city() {
                "Manila" => Ok(WeatherResult {
                    city: "Manila".into(),
                    temperature: 28.5,
                    condition: "Clouds".into(),
                    description: "broken clouds".into(),
                }),
                "Broken" => Err(LookupError::upstream()),
                other => Err(LookupError::city_not_found(other)),
            }
        }
    }

    async fn call(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(Arc::new(WeatherLookup::new(Arc::new(StubProvider))));
        let res = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("infallible");

        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.expect("body");
        let json = serde_json::from_slice(&bytes).expect("json body");

        (status, json)
    }

    #[tokio::test]
    async fn returns_normalized_result() {
        let (status, body) = call("/weather?city=Manila").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "city": "Manila",
                "temperature": 28.5,
                "condition": "Clouds",
                "description": "broken clouds",
            })
        );
    }

    #[tokio::test]
    async fn missing_city_is_bad_request() {
        for uri in ["/weather", "/weather?city=", "/weather?city=%20%20"] {
            let (status, body) = call(uri).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
            assert_eq!(body["statusCode"], 400);
            assert_eq!(body["message"], "City parameter is required");
        }
    }

    #[tokio::test]
    async fn undecodable_query_is_json_bad_request() {
        let (status, body) = call("/weather?city=a&city=b").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["statusCode"], 400);
        assert_eq!(body["message"], "City parameter is required");
    }

    #[tokio::test]
    async fn unknown_city_is_not_found() {
        let (status, body) = call("/weather?city=Atlantis").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["message"], "City \"Atlantis\" not found");
    }

    #[tokio::test]
    async fn upstream_failure_is_internal_error() {
        let (status, body) = call("/weather?city=Broken").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["statusCode"], 500);
        assert_eq!(body["message"], "Error fetching weather data");
    }
}
