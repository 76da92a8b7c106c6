use crate::{
    Config,
    error::WeatherError,
    model::{ConditionsPayload, ForecastSample, LocationQuery},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Seam between the orchestrator and the upstream weather service.
///
/// `current_conditions` and `forecast` are the load-bearing calls: their
/// failures abort the whole request. The remaining calls feed degraded-only
/// advisories; callers contain their errors and substitute fallbacks.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_conditions(
        &self,
        query: &LocationQuery,
    ) -> Result<ConditionsPayload, WeatherError>;

    /// The ordered 3-hour forecast list, same query form as `current_conditions`.
    async fn forecast(&self, query: &LocationQuery) -> Result<Vec<ForecastSample>, WeatherError>;

    /// Nearest named place for a coordinate, if the upstream knows one.
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> anyhow::Result<Option<String>>;

    async fn uv_index(&self, latitude: f64, longitude: f64) -> anyhow::Result<f64>;

    /// Upstream air-quality index on the 1-5 scale.
    async fn air_quality_index(&self, latitude: f64, longitude: f64) -> anyhow::Result<i64>;
}

/// Construct the provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolved_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `skycast configure` or set the OPENWEATHER_API_KEY environment variable."
        )
    })?;

    Ok(Box::new(OpenWeatherProvider::new(api_key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_key_present() {
        let cfg = Config { api_key: Some("KEY".to_string()) };
        assert!(provider_from_config(&cfg).is_ok());
    }
}
