//! Request orchestration: raw user input in, view-model out.
//!
//! The pipeline is strictly sequential: parse, fetch current conditions,
//! fetch the forecast list, resolve the place name, compute advisories,
//! summarize. Conditions/forecast failures abort the request; geocoding and
//! UV/air-quality failures only degrade their own fields.

use chrono::Utc;
use tracing::warn;

use crate::{
    advisory,
    error::WeatherError,
    history::{HistoryStore, SearchCounter},
    input,
    model::{AirQualityAdvisory, CurrentConditions, LocationQuery, WeatherReport},
    provider::WeatherProvider,
    summary,
};

/// Fallback place name when reverse geocoding cannot produce one.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

pub struct WeatherService {
    provider: Box<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Run one query end to end. On success the resolved place name is
    /// recorded into `history` and `counter` exactly once.
    ///
    /// # Errors
    ///
    /// Input validation errors are returned before any upstream call; a failed
    /// conditions or forecast fetch fails the whole request. See
    /// [`WeatherError::user_message`] for the presentable form.
    pub async fn query(
        &self,
        raw_input: &str,
        history: &mut dyn HistoryStore,
        counter: &mut SearchCounter,
    ) -> Result<WeatherReport, WeatherError> {
        let query = input::parse_location(raw_input)?;

        let payload = self
            .provider
            .current_conditions(&query)
            .await
            .inspect_err(log_upstream_cause)?;
        let samples = self.provider.forecast(&query).await.inspect_err(log_upstream_cause)?;

        let place_name = match &query {
            LocationQuery::CityName(_) => payload.place_name.clone(),
            LocationQuery::Coordinate { latitude, longitude } => {
                self.resolve_place_name(*latitude, *longitude).await
            }
        };

        let warnings = advisory::warnings(&payload);

        // The advisory is only computed for coordinate queries, matching the
        // behavior of the system this replaces.
        let uv_air = match &query {
            LocationQuery::Coordinate { latitude, longitude } => {
                Some(self.air_quality_advisory(*latitude, *longitude).await)
            }
            LocationQuery::CityName(_) => None,
        };

        let now = Utc::now();
        let current = CurrentConditions::from_payload(place_name.clone(), &payload, now);
        let daily = summary::daily_summary(&samples);
        let hourly = summary::hourly_series(&samples, now);

        history.record(&place_name);
        counter.record(&place_name);

        Ok(WeatherReport { current, daily, warnings, advisory: uv_air, hourly })
    }

    /// Degraded-only: any geocoding failure or empty result yields the
    /// fallback label, never an error.
    async fn resolve_place_name(&self, latitude: f64, longitude: f64) -> String {
        match self.provider.reverse_geocode(latitude, longitude).await {
            Ok(Some(name)) => name,
            Ok(None) => UNKNOWN_LOCATION.to_string(),
            Err(err) => {
                warn!("reverse geocoding failed: {err:#}");
                UNKNOWN_LOCATION.to_string()
            }
        }
    }

    async fn air_quality_advisory(&self, latitude: f64, longitude: f64) -> AirQualityAdvisory {
        let uv = self.provider.uv_index(latitude, longitude).await;
        let aqi = self.provider.air_quality_index(latitude, longitude).await;

        match (uv, aqi) {
            (Ok(uv_index), Ok(aqi)) => AirQualityAdvisory::Report {
                uv_index,
                uv_category: advisory::uv_category(uv_index),
                air_quality: advisory::air_quality_label(aqi),
            },
            (Err(err), _) | (_, Err(err)) => {
                warn!("UV/air quality lookup failed: {err:#}");
                AirQualityAdvisory::Unavailable {
                    reason: "Could not fetch UV and air quality data".to_string(),
                }
            }
        }
    }
}

fn log_upstream_cause(err: &WeatherError) {
    if let WeatherError::Upstream(cause) = err {
        warn!("upstream request failed: {cause:#}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        history::SearchHistory,
        model::{ConditionsPayload, ForecastSample, UvCategory},
    };
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug, Default)]
    struct FakeProvider {
        payload: Option<ConditionsPayload>,
        samples: Vec<ForecastSample>,
        fail_current: bool,
        geocode: Option<String>,
        geocode_fails: bool,
        uv: Option<f64>,
        aqi: Option<i64>,
        calls: Arc<AtomicUsize>,
    }

    fn payload(place_name: &str, temperature: f64, condition_code: u32, wind: f64) -> ConditionsPayload {
        ConditionsPayload {
            place_name: place_name.into(),
            temperature,
            feels_like: temperature,
            temp_min: temperature - 1.0,
            temp_max: temperature + 1.0,
            humidity: 70,
            pressure: 1010,
            wind_speed: wind,
            condition_code,
            description: "light rain".into(),
            condition: "Rain".into(),
            icon: "10d".into(),
            visibility_m: Some(10_000),
            sunrise: 1_700_000_000,
            sunset: 1_700_043_200,
            timezone_offset: 25_200,
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current_conditions(
            &self,
            query: &LocationQuery,
        ) -> Result<ConditionsPayload, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_current {
                return Err(WeatherError::Upstream(anyhow!("boom")));
            }
            self.payload
                .clone()
                .ok_or_else(|| WeatherError::LocationNotFound { query: query.to_string() })
        }

        async fn forecast(
            &self,
            _query: &LocationQuery,
        ) -> Result<Vec<ForecastSample>, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.samples.clone())
        }

        async fn reverse_geocode(&self, _: f64, _: f64) -> anyhow::Result<Option<String>> {
            if self.geocode_fails {
                return Err(anyhow!("geocoding outage"));
            }
            Ok(self.geocode.clone())
        }

        async fn uv_index(&self, _: f64, _: f64) -> anyhow::Result<f64> {
            self.uv.ok_or_else(|| anyhow!("uv outage"))
        }

        async fn air_quality_index(&self, _: f64, _: f64) -> anyhow::Result<i64> {
            self.aqi.ok_or_else(|| anyhow!("air outage"))
        }
    }

    fn service(provider: FakeProvider) -> WeatherService {
        WeatherService::new(Box::new(provider))
    }

    #[tokio::test]
    async fn jakarta_coordinate_query_has_no_warnings_at_mild_conditions() {
        let svc = service(FakeProvider {
            payload: Some(payload("Jakarta", 30.0, 500, 3.0)),
            geocode: Some("Jakarta".into()),
            uv: Some(7.0),
            aqi: Some(2),
            ..Default::default()
        });
        let mut history = SearchHistory::new();
        let mut counter = SearchCounter::new();

        let report = svc.query("-6.2,106.8", &mut history, &mut counter).await.expect("success");

        assert!(report.warnings.is_empty());
        assert_eq!(report.current.temperature, 30);
        assert_eq!(report.current.city, "Jakarta");
        assert_eq!(
            report.advisory,
            Some(AirQualityAdvisory::Report {
                uv_index: 7.0,
                uv_category: UvCategory::High,
                air_quality: "Moderate",
            })
        );
    }

    #[tokio::test]
    async fn malformed_input_never_reaches_the_provider() {
        let provider = FakeProvider::default();
        let calls = Arc::clone(&provider.calls);
        let svc = service(provider);
        let mut history = SearchHistory::new();
        let mut counter = SearchCounter::new();

        let err = svc.query("London,,", &mut history, &mut counter).await.unwrap_err();

        assert!(matches!(err, WeatherError::InvalidCoordinateFormat));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(history.entries().is_empty());
    }

    #[tokio::test]
    async fn unknown_city_maps_to_location_not_found() {
        let svc = service(FakeProvider::default());
        let mut history = SearchHistory::new();
        let mut counter = SearchCounter::new();

        let err = svc.query("Atlantis", &mut history, &mut counter).await.unwrap_err();

        match err {
            WeatherError::LocationNotFound { query } => assert_eq!(query, "Atlantis"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(history.entries().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_aborts_the_request() {
        let svc = service(FakeProvider {
            fail_current: true,
            ..Default::default()
        });
        let mut history = SearchHistory::new();
        let mut counter = SearchCounter::new();

        let err = svc.query("Oslo", &mut history, &mut counter).await.unwrap_err();
        assert!(matches!(err, WeatherError::Upstream(_)));
    }

    #[tokio::test]
    async fn geocoding_failure_degrades_to_unknown_location() {
        let svc = service(FakeProvider {
            payload: Some(payload("ignored", 20.0, 800, 1.0)),
            geocode_fails: true,
            uv: Some(1.0),
            aqi: Some(1),
            ..Default::default()
        });
        let mut history = SearchHistory::new();
        let mut counter = SearchCounter::new();

        let report = svc.query("10.0,20.0", &mut history, &mut counter).await.expect("success");
        assert_eq!(report.current.city, UNKNOWN_LOCATION);
        assert_eq!(history.entries(), [UNKNOWN_LOCATION]);
    }

    #[tokio::test]
    async fn empty_geocoding_result_also_degrades() {
        let svc = service(FakeProvider {
            payload: Some(payload("ignored", 20.0, 800, 1.0)),
            geocode: None,
            uv: Some(1.0),
            aqi: Some(1),
            ..Default::default()
        });
        let mut history = SearchHistory::new();
        let mut counter = SearchCounter::new();

        let report = svc.query("10.0,20.0", &mut history, &mut counter).await.expect("success");
        assert_eq!(report.current.city, UNKNOWN_LOCATION);
    }

    #[tokio::test]
    async fn advisory_failure_is_contained() {
        let svc = service(FakeProvider {
            payload: Some(payload("Jakarta", 30.0, 800, 2.0)),
            geocode: Some("Jakarta".into()),
            uv: None,
            aqi: Some(2),
            ..Default::default()
        });
        let mut history = SearchHistory::new();
        let mut counter = SearchCounter::new();

        let report = svc.query("-6.2,106.8", &mut history, &mut counter).await.expect("success");
        assert!(matches!(report.advisory, Some(AirQualityAdvisory::Unavailable { .. })));
    }

    #[tokio::test]
    async fn city_query_skips_the_advisory() {
        let svc = service(FakeProvider {
            payload: Some(payload("Paris", 18.0, 800, 2.0)),
            uv: Some(5.0),
            aqi: Some(1),
            ..Default::default()
        });
        let mut history = SearchHistory::new();
        let mut counter = SearchCounter::new();

        let report = svc.query("Paris", &mut history, &mut counter).await.expect("success");
        assert!(report.advisory.is_none());
        assert_eq!(report.current.city, "Paris");
    }

    #[tokio::test]
    async fn successful_query_records_history_and_counter_once() {
        let svc = service(FakeProvider {
            payload: Some(payload("Paris", 18.0, 800, 2.0)),
            ..Default::default()
        });
        let mut history = SearchHistory::new();
        let mut counter = SearchCounter::new();
        history.record("Tokyo");
        history.record("Paris");

        svc.query("Paris", &mut history, &mut counter).await.expect("success");

        // Duplicate name: history unchanged, counter still incremented.
        assert_eq!(history.entries(), ["Paris", "Tokyo"]);
        assert_eq!(counter.top(1), vec![("Paris".to_string(), 1)]);
    }

    #[tokio::test]
    async fn warnings_flow_into_the_report() {
        let svc = service(FakeProvider {
            payload: Some(payload("Furnace", 40.0, 503, 15.0)),
            ..Default::default()
        });
        let mut history = SearchHistory::new();
        let mut counter = SearchCounter::new();

        let report = svc.query("Furnace", &mut history, &mut counter).await.expect("success");
        assert_eq!(report.warnings.len(), 3);
    }
}
