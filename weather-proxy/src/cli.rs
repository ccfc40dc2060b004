use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weather_core::{Config, WeatherLookup, WeatherResult, classify};

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-proxy", version, about = "Weather proxy for OpenWeatherMap")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP proxy.
    Serve {
        /// Listen address, e.g. "0.0.0.0:3000". Overrides the config file.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Manila".
        city: String,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind } => {
                let config = load_config(self.config.as_deref(), true)?;
                let lookup = Arc::new(WeatherLookup::from_config(&config)?);
                let bind = bind.unwrap_or(config.server.bind);

                server::serve(lookup, &bind).await?;
            }
            Command::Show { city } => {
                let config = load_config(self.config.as_deref(), true)?;
                let lookup = WeatherLookup::from_config(&config)?;

                let result = lookup.fetch(&city).await?;
                println!("{}", render(&result));
            }
            Command::Configure => {
                // File values only; env overrides must not be persisted.
                let mut config = load_config(self.config.as_deref(), false)?;

                let api_key = Password::new("OpenWeather API key:")
                    .with_display_mode(PasswordDisplayMode::Masked)
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;
                config.set_api_key(api_key.trim().to_string());

                let path = match self.config {
                    Some(path) => {
                        config.save_to(&path)?;
                        path
                    }
                    None => config.save()?,
                };
                println!("Saved configuration to {}", path.display());
            }
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>, with_env: bool) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if with_env {
        config.apply_env();
    }

    Ok(config)
}

fn render(result: &WeatherResult) -> String {
    let theme = classify(&result.condition);

    format!(
        "{} {}\n{}°C\n{}\n{}",
        theme.icon, result.city, result.temperature, result.condition, result.description
    )
}
