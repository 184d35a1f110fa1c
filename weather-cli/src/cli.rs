use anyhow::{Context, anyhow};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use serde::Serialize;
use weather_core::{Config, TimeNormalizer, WeatherService, provider_from_config};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print raw JSON instead of a table.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key and target timezone.
    Configure,

    /// Show current weather for a city, or its hour-by-hour breakdown for a date.
    Show {
        /// City name.
        city: String,

        /// Optional date (YYYY-MM-DD); if absent, means "now".
        #[arg(long)]
        date: Option<String>,
    },

    /// 30-day daily outlook for a city.
    Outlook {
        city: String,
    },

    /// 24 hours centred on the current hour.
    Hourly {
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let json = self.json;

        match self.command {
            Command::Configure => configure(),
            Command::Show { city, date: None } => {
                let report = build_service()?.current(Some(&city)).await?;
                emit(json, &report, || output::print_current(&report))
            }
            Command::Show { city, date: Some(date) } => {
                let service = build_service()?;
                let points = service.hourly_for_date(Some(&city), Some(&date)).await?;
                emit(json, &points, || output::print_points(service.normalizer(), &points))
            }
            Command::Outlook { city } => {
                let outlook = build_service()?.outlook(Some(&city)).await?;
                emit(json, &outlook, || output::print_outlook(&outlook))
            }
            Command::Hourly { city } => {
                let service = build_service()?;
                let points = service.hourly(Some(&city)).await?;
                emit(json, &points, || output::print_points(service.normalizer(), &points))
            }
        }
    }
}

fn build_service() -> anyhow::Result<WeatherService> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let normalizer = TimeNormalizer::new(config.target_timezone()?);
    Ok(WeatherService::new(provider, normalizer))
}

fn emit<T: Serialize>(json: bool, value: &T, table: impl FnOnce()) -> anyhow::Result<()> {
    if json {
        let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{text}");
    } else {
        table();
    }
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }
    config.set_api_key(api_key.trim().to_string());

    let timezone = Text::new("Target timezone (IANA name):")
        .with_default(&config.timezone)
        .prompt()
        .context("Failed to read timezone")?;
    timezone
        .parse::<Tz>()
        .map_err(|e| anyhow!("Unknown timezone '{timezone}': {e}"))?;
    config.timezone = timezone;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
