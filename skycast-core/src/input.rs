//! Parsing of raw user input into a [`LocationQuery`].
//!
//! A comma anywhere in the input selects the coordinate path; everything else
//! is treated as a city name. Both paths validate fully before any network
//! call is made.

use crate::{error::WeatherError, model::LocationQuery};

const MAX_CITY_LEN: usize = 100;

/// Parse raw input into a location query.
///
/// # Errors
///
/// `InvalidCoordinateFormat` when a comma is present but the input is not two
/// finite decimal numbers; `InvalidCityName` when the city fails the length
/// ceiling or the character allow-list.
pub fn parse_location(raw: &str) -> Result<LocationQuery, WeatherError> {
    let trimmed = raw.trim();

    if trimmed.contains(',') {
        return parse_coordinate(trimmed);
    }

    validate_city(trimmed)?;
    Ok(LocationQuery::CityName(trimmed.to_string()))
}

fn parse_coordinate(input: &str) -> Result<LocationQuery, WeatherError> {
    let parts: Vec<&str> = input.split(',').collect();
    if parts.len() != 2 {
        return Err(WeatherError::InvalidCoordinateFormat);
    }

    let latitude = parse_finite(parts[0])?;
    let longitude = parse_finite(parts[1])?;

    Ok(LocationQuery::Coordinate { latitude, longitude })
}

fn parse_finite(part: &str) -> Result<f64, WeatherError> {
    let value: f64 = part.trim().parse().map_err(|_| WeatherError::InvalidCoordinateFormat)?;
    if !value.is_finite() {
        return Err(WeatherError::InvalidCoordinateFormat);
    }
    Ok(value)
}

fn validate_city(city: &str) -> Result<(), WeatherError> {
    if city.is_empty() || city.len() > MAX_CITY_LEN {
        return Err(WeatherError::InvalidCityName);
    }

    let allowed =
        |c: char| c.is_ascii_alphabetic() || c == ' ' || c == '-' || c == ',' || c == '.';
    if !city.chars().all(allowed) {
        return Err(WeatherError::InvalidCityName);
    }

    Ok(())
}
