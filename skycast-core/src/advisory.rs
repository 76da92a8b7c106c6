//! Pure advisory rules: threshold warnings and UV/air-quality categorization.
//! No I/O here; everything operates on already-fetched payloads.

use crate::model::{ConditionsPayload, Severity, UvCategory, Warning, WarningKind};

/// Compute weather warnings from current conditions.
///
/// Rules are evaluated independently, in a fixed order: temperature, then
/// precipitation, then wind. All matching warnings are emitted.
pub fn warnings(payload: &ConditionsPayload) -> Vec<Warning> {
    let mut out = Vec::new();

    if payload.temperature > 35.0 {
        out.push(Warning {
            level: Severity::High,
            kind: WarningKind::ExtremeHeat,
            message: "Extreme heat! Avoid outdoor activity.",
            icon: "fa-temperature-high",
            color: "orange",
        });
    } else if payload.temperature < 5.0 {
        out.push(Warning {
            level: Severity::Low,
            kind: WarningKind::ExtremeCold,
            message: "Extreme cold! Wear warm clothing.",
            icon: "fa-temperature-low",
            color: "blue",
        });
    }

    // Codes 500-501 are light/moderate rain and deliberately warn-free.
    if (502..600).contains(&payload.condition_code) {
        out.push(Warning {
            level: Severity::Medium,
            kind: WarningKind::HeavyRain,
            message: "Heavy rain! Bring an umbrella or raincoat.",
            icon: "fa-cloud-rain",
            color: "blue",
        });
    }

    if payload.wind_speed > 10.0 {
        out.push(Warning {
            level: Severity::Medium,
            kind: WarningKind::StrongWind,
            message: "Strong wind! Take care outside.",
            icon: "fa-wind",
            color: "gray",
        });
    }

    out
}

/// Bucket a UV index value. Boundaries at 3, 6, 8 and 11 are inclusive-low.
pub fn uv_category(uv_index: f64) -> UvCategory {
    if uv_index >= 11.0 {
        UvCategory::Extreme
    } else if uv_index >= 8.0 {
        UvCategory::VeryHigh
    } else if uv_index >= 6.0 {
        UvCategory::High
    } else if uv_index >= 3.0 {
        UvCategory::Moderate
    } else {
        UvCategory::Low
    }
}

/// Map the upstream 1-5 air-quality index to a label. Anything outside the
/// scale maps to "Unknown" rather than failing.
pub fn air_quality_label(aqi: i64) -> &'static str {
    match aqi {
        1 => "Good",
        2 => "Moderate",
        3 => "Unhealthy for Sensitive Groups",
        4 => "Unhealthy",
        5 => "Hazardous",
        _ => "Unknown",
    }
}
