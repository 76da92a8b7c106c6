use thiserror::Error;

/// Failures of the request pipeline.
///
/// The two input variants are produced before any network call. `LocationNotFound`
/// is reported by the upstream service inside an otherwise well-formed response.
/// `Upstream` covers transport failures and malformed payloads; its cause is meant
/// for logs, never for the user.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("invalid coordinate format")]
    InvalidCoordinateFormat,

    #[error("invalid city name")]
    InvalidCityName,

    #[error("location '{query}' not found")]
    LocationNotFound { query: String },

    #[error("upstream weather service failed")]
    Upstream(#[source] anyhow::Error),
}

impl WeatherError {
    /// Message safe to show to the user. Upstream causes are sanitized away.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::InvalidCoordinateFormat => {
                "Invalid coordinate format. Use 'latitude,longitude', e.g. '-6.2,106.8'.".to_string()
            }
            WeatherError::InvalidCityName => {
                "Invalid city name. Use letters, spaces, hyphens, commas or periods (max 100 characters)."
                    .to_string()
            }
            WeatherError::LocationNotFound { query } => {
                format!("City '{query}' not found. Check the spelling or try another city.")
            }
            WeatherError::Upstream(_) => {
                "Something went wrong while fetching weather data. Please try again later.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn not_found_message_names_the_query() {
        let err = WeatherError::LocationNotFound { query: "Atlantis".into() };
        assert!(err.user_message().contains("Atlantis"));
    }

    #[test]
    fn upstream_message_hides_the_cause() {
        let err = WeatherError::Upstream(anyhow!("connection refused to 10.0.0.1:443"));
        let msg = err.user_message();
        assert!(!msg.contains("connection refused"));
        assert!(!msg.contains("10.0.0.1"));
    }
}
