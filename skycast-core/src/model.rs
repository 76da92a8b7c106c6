use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Serialize;

/// A parsed user query: either a city name or a latitude/longitude pair.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    CityName(String),
    Coordinate { latitude: f64, longitude: f64 },
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationQuery::CityName(name) => f.write_str(name),
            LocationQuery::Coordinate { latitude, longitude } => {
                write!(f, "{latitude},{longitude}")
            }
        }
    }
}

/// Current conditions as delivered by the upstream service, before any
/// presentation formatting. Units: metric (°C, m/s, hPa, meters).
#[derive(Debug, Clone)]
pub struct ConditionsPayload {
    pub place_name: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: f64,
    pub condition_code: u32,
    pub description: String,
    pub condition: String,
    pub icon: String,
    pub visibility_m: Option<u32>,
    pub sunrise: i64,
    pub sunset: i64,
    /// UTC offset of the place, in seconds.
    pub timezone_offset: i32,
}

/// One 3-hour forecast entry from the upstream forecast list.
#[derive(Debug, Clone)]
pub struct ForecastSample {
    pub timestamp: i64,
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub condition_code: u32,
    pub description: String,
    pub condition: String,
    pub icon: String,
}

/// View-ready current conditions. Built once per query, immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentConditions {
    pub city: String,
    pub temperature: i64,
    pub feels_like: i64,
    pub min_temp: i64,
    pub max_temp: i64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub pressure: u32,
    pub description: String,
    pub condition: String,
    pub icon: String,
    pub local_time: String,
    pub visibility_km: f64,
    pub sunrise: String,
    pub sunset: String,
}

impl CurrentConditions {
    /// Shape a raw payload for presentation: integer-rounded temperatures,
    /// visibility in km, clock times at the place's own UTC offset.
    pub fn from_payload(place_name: String, payload: &ConditionsPayload, now: DateTime<Utc>) -> Self {
        let offset = place_offset(payload.timezone_offset);

        Self {
            city: place_name,
            temperature: payload.temperature.round() as i64,
            feels_like: payload.feels_like.round() as i64,
            min_temp: payload.temp_min.round() as i64,
            max_temp: payload.temp_max.round() as i64,
            humidity: payload.humidity,
            wind_speed: payload.wind_speed,
            pressure: payload.pressure,
            description: payload.description.clone(),
            condition: payload.condition.clone(),
            icon: payload.icon.clone(),
            local_time: now.with_timezone(&offset).format("%A, %d %B %Y %H:%M").to_string(),
            visibility_km: f64::from(payload.visibility_m.unwrap_or(0)) / 1000.0,
            sunrise: clock_time(payload.sunrise, offset),
            sunset: clock_time(payload.sunset, offset),
        }
    }
}

/// One representative forecast entry per calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct DailyForecastEntry {
    pub date: String,
    pub temperature: i64,
    pub min_temp: i64,
    pub max_temp: i64,
    pub humidity: u8,
    pub description: String,
    pub condition: String,
    pub icon: String,
    pub wind_speed: f64,
}

/// One point of the last-24-hours temperature series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySample {
    /// Zero-padded 24-hour clock label, `HH:MM` (UTC).
    pub time: String,
    /// Temperature rounded to one decimal.
    pub temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    ExtremeHeat,
    ExtremeCold,
    HeavyRain,
    StrongWind,
}

/// A single weather warning; independent triggers can co-occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub level: Severity,
    pub kind: WarningKind,
    pub message: &'static str,
    /// Icon hint for the presentation layer (Font Awesome name).
    pub icon: &'static str,
    /// Color hint for the presentation layer.
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UvCategory {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl std::fmt::Display for UvCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UvCategory::Low => "Low",
            UvCategory::Moderate => "Moderate",
            UvCategory::High => "High",
            UvCategory::VeryHigh => "Very High",
            UvCategory::Extreme => "Extreme",
        };
        f.write_str(s)
    }
}

/// UV and air-quality advisory, or the reason it could not be computed.
/// Never fails the overall request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AirQualityAdvisory {
    Report {
        uv_index: f64,
        uv_category: UvCategory,
        air_quality: &'static str,
    },
    Unavailable {
        reason: String,
    },
}

/// The fully assembled view-model handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecastEntry>,
    pub warnings: Vec<Warning>,
    /// Only computed for coordinate queries.
    pub advisory: Option<AirQualityAdvisory>,
    pub hourly: Vec<HourlySample>,
}

fn place_offset(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
}

fn clock_time(ts: i64, offset: FixedOffset) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.with_timezone(&offset).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
