use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::{
    error::WeatherError,
    model::{ConditionsPayload, ForecastSample, LocationQuery},
};

use super::WeatherProvider;

const WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";
const REVERSE_GEO_URL: &str = "https://api.openweathermap.org/geo/1.0/reverse";
const UV_URL: &str = "https://api.openweathermap.org/data/2.5/uvi";
const AIR_POLLUTION_URL: &str = "https://api.openweathermap.org/data/2.5/air_pollution";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    /// Query parameters selecting the location, identical for the current and
    /// forecast endpoints so both resolve the same place.
    fn location_params(query: &LocationQuery) -> Vec<(&'static str, String)> {
        match query {
            LocationQuery::CityName(name) => vec![("q", name.clone())],
            LocationQuery::Coordinate { latitude, longitude } => {
                vec![("lat", latitude.to_string()), ("lon", longitude.to_string())]
            }
        }
    }

    async fn get_body(&self, url: &str, params: &[(&str, String)], what: &str) -> Result<String> {
        debug!(url, what, "requesting OpenWeather endpoint");

        let res = self
            .http
            .get(url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }

    /// Fetch a weather-data endpoint and check the status code embedded in the
    /// body. Any non-200 body status means the location was not matched.
    async fn fetch_weather_body(
        &self,
        url: &str,
        query: &LocationQuery,
        what: &str,
    ) -> Result<String, WeatherError> {
        let mut params = Self::location_params(query);
        params.push(("units", "metric".to_string()));

        debug!(what, %query, "requesting OpenWeather endpoint");

        let res = self
            .http
            .get(url)
            .query(&params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))
            .map_err(WeatherError::Upstream)?;

        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))
            .map_err(WeatherError::Upstream)?;

        let status: OwStatus = serde_json::from_str(&body)
            .with_context(|| {
                format!(
                    "Failed to parse OpenWeather {} status field: {}",
                    what,
                    truncate_body(&body)
                )
            })
            .map_err(WeatherError::Upstream)?;

        if status.cod != 200 {
            return Err(WeatherError::LocationNotFound { query: query.to_string() });
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_conditions(
        &self,
        query: &LocationQuery,
    ) -> Result<ConditionsPayload, WeatherError> {
        let body = self.fetch_weather_body(WEATHER_URL, query, "current weather").await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .with_context(|| {
                format!("Failed to parse OpenWeather current JSON: {}", truncate_body(&body))
            })
            .map_err(WeatherError::Upstream)?;

        let weather = parsed.weather.first();

        Ok(ConditionsPayload {
            place_name: parsed.name,
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            temp_min: parsed.main.temp_min,
            temp_max: parsed.main.temp_max,
            humidity: parsed.main.humidity,
            pressure: parsed.main.pressure,
            wind_speed: parsed.wind.map_or(0.0, |w| w.speed),
            condition_code: weather.map_or(0, |w| w.id),
            description: weather.map_or_else(|| "Unknown".to_string(), |w| w.description.clone()),
            condition: weather.map_or_else(|| "Unknown".to_string(), |w| w.main.clone()),
            icon: weather.map_or_else(String::new, |w| w.icon.clone()),
            visibility_m: parsed.visibility,
            sunrise: parsed.sys.sunrise,
            sunset: parsed.sys.sunset,
            timezone_offset: parsed.timezone,
        })
    }

    async fn forecast(&self, query: &LocationQuery) -> Result<Vec<ForecastSample>, WeatherError> {
        let body = self.fetch_weather_body(FORECAST_URL, query, "5-day forecast").await?;

        let parsed: OwForecastResponse = serde_json::from_str(&body)
            .with_context(|| {
                format!("Failed to parse OpenWeather forecast JSON: {}", truncate_body(&body))
            })
            .map_err(WeatherError::Upstream)?;

        let samples = parsed
            .list
            .into_iter()
            .map(|entry| {
                let weather = entry.weather.first();
                ForecastSample {
                    timestamp: entry.dt,
                    temperature: entry.main.temp,
                    temp_min: entry.main.temp_min,
                    temp_max: entry.main.temp_max,
                    humidity: entry.main.humidity,
                    wind_speed: entry.wind.as_ref().map_or(0.0, |w| w.speed),
                    condition_code: weather.map_or(0, |w| w.id),
                    description: weather
                        .map_or_else(|| "Unknown".to_string(), |w| w.description.clone()),
                    condition: weather.map_or_else(|| "Unknown".to_string(), |w| w.main.clone()),
                    icon: weather.map_or_else(String::new, |w| w.icon.clone()),
                }
            })
            .collect();

        Ok(samples)
    }

    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<String>> {
        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("limit", "1".to_string()),
        ];

        let body = self.get_body(REVERSE_GEO_URL, &params, "reverse geocoding").await?;

        let places: Vec<OwGeoPlace> = serde_json::from_str(&body)
            .with_context(|| {
                format!("Failed to parse OpenWeather geocoding JSON: {}", truncate_body(&body))
            })?;

        Ok(places.into_iter().next().map(|p| p.name))
    }

    async fn uv_index(&self, latitude: f64, longitude: f64) -> Result<f64> {
        let params = [("lat", latitude.to_string()), ("lon", longitude.to_string())];
        let body = self.get_body(UV_URL, &params, "UV index").await?;

        let parsed: OwUvResponse = serde_json::from_str(&body)
            .with_context(|| {
                format!("Failed to parse OpenWeather UV JSON: {}", truncate_body(&body))
            })?;

        Ok(parsed.value)
    }

    async fn air_quality_index(&self, latitude: f64, longitude: f64) -> Result<i64> {
        let params = [("lat", latitude.to_string()), ("lon", longitude.to_string())];
        let body = self.get_body(AIR_POLLUTION_URL, &params, "air pollution").await?;

        let parsed: OwAirResponse = serde_json::from_str(&body)
            .with_context(|| {
                format!("Failed to parse OpenWeather air pollution JSON: {}", truncate_body(&body))
            })?;

        let entry = parsed
            .list
            .first()
            .ok_or_else(|| anyhow!("OpenWeather air pollution response contained no data"))?;

        Ok(entry.main.aqi)
    }
}

/// The weather-data endpoints mirror the HTTP status in a body field; it is a
/// number on `/weather` and a string on `/forecast`.
#[derive(Debug, Deserialize)]
struct OwStatus {
    #[serde(deserialize_with = "de_status_code")]
    cod: u16,
}

fn de_status_code<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Num(u16),
        Text(String),
    }

    match Code::deserialize(deserializer)? {
        Code::Num(n) => Ok(n),
        Code::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u32,
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
    visibility: Option<u32>,
    sys: OwSys,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwGeoPlace {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwUvResponse {
    #[serde(default)]
    value: f64,
}

#[derive(Debug, Deserialize)]
struct OwAirMain {
    aqi: i64,
}

#[derive(Debug, Deserialize)]
struct OwAirEntry {
    main: OwAirMain,
}

#[derive(Debug, Deserialize)]
struct OwAirResponse {
    list: Vec<OwAirEntry>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
