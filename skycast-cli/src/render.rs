//! Terminal rendering of the weather view-model.

use skycast_core::{AirQualityAdvisory, WeatherReport};

/// Format a full report as a printable string.
pub fn report(report: &WeatherReport) -> String {
    let current = &report.current;
    let mut out = String::new();

    out.push_str(&format!("{} — {}\n", current.city, current.local_time));
    out.push_str(&format!(
        "  {}°C (feels like {}°C), {} — {}\n",
        current.temperature, current.feels_like, current.condition, current.description
    ));
    out.push_str(&format!(
        "  Min/max: {}°C / {}°C  Humidity: {}%  Wind: {} m/s  Pressure: {} hPa\n",
        current.min_temp, current.max_temp, current.humidity, current.wind_speed, current.pressure
    ));
    out.push_str(&format!(
        "  Visibility: {} km  Sunrise: {}  Sunset: {}\n",
        current.visibility_km, current.sunrise, current.sunset
    ));

    if !report.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for warning in &report.warnings {
            out.push_str(&format!("  [{}] {}\n", warning.level, warning.message));
        }
    }

    match &report.advisory {
        Some(AirQualityAdvisory::Report { uv_index, uv_category, air_quality }) => {
            out.push_str(&format!(
                "\nUV index: {uv_index} ({uv_category})  Air quality: {air_quality}\n"
            ));
        }
        Some(AirQualityAdvisory::Unavailable { reason }) => {
            out.push_str(&format!("\nUV/air quality: {reason}\n"));
        }
        None => {}
    }

    if !report.daily.is_empty() {
        out.push_str("\nForecast:\n");
        for day in &report.daily {
            out.push_str(&format!(
                "  {}: {}°C ({}°C / {}°C), {}\n",
                day.date, day.temperature, day.min_temp, day.max_temp, day.description
            ));
        }
    }

    if !report.hourly.is_empty() {
        out.push_str("\nNext hours:\n");
        for sample in &report.hourly {
            out.push_str(&format!("  {}  {:.1}°C\n", sample.time, sample.temperature));
        }
    }

    out
}
