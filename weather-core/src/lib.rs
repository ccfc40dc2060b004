//! Core library for the weather proxy.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The upstream provider abstraction and the OpenWeather client
//! - City lookup with client-facing error mapping
//! - Condition-based theming for presentation
//!
//! It is used by `weather-proxy`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod theme;

pub use config::{Config, ProviderConfig, ServerConfig};
pub use error::LookupError;
pub use lookup::WeatherLookup;
pub use model::{WeatherQuery, WeatherResult};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use theme::{ConditionCategory, ThemeDescriptor, classify};
