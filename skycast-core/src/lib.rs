//! Core library for the `skycast` weather app.
//!
//! This crate defines:
//! - Input parsing (city name or coordinate pair)
//! - Abstraction over the upstream weather service and its OpenWeather adapter
//! - Pure advisory rules (warnings, UV and air-quality categorization)
//! - Forecast summarization (daily and hourly views)
//! - Request orchestration producing a render-ready view-model
//! - Search history and counter stores, configuration, error taxonomy
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or
//! services; presentation and session lifetime stay with the caller.

pub mod advisory;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod model;
pub mod provider;
pub mod report;
pub mod summary;

pub use config::Config;
pub use error::WeatherError;
pub use history::{HistoryStore, SearchCounter, SearchHistory};
pub use input::parse_location;
pub use model::{
    AirQualityAdvisory, CurrentConditions, DailyForecastEntry, HourlySample, LocationQuery,
    Severity, UvCategory, Warning, WarningKind, WeatherReport,
};
pub use provider::{WeatherProvider, provider_from_config};
pub use report::WeatherService;
