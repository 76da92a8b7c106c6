//! Reduction of the raw 3-hour forecast list into the two views the
//! presentation layer needs: one entry per calendar day and a bounded
//! last-24-hours temperature series.

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{DailyForecastEntry, ForecastSample, HourlySample};

const MAX_DAILY_ENTRIES: usize = 5;
const MAX_HOURLY_SAMPLES: usize = 24;
const HOURLY_WINDOW_SECS: i64 = 86_400;

/// Keep the first chronological sample per distinct UTC date, stopping once
/// five dates have been collected. Later samples for an already-seen date are
/// discarded, as are samples for a sixth or later date.
pub fn daily_summary(samples: &[ForecastSample]) -> Vec<DailyForecastEntry> {
    let mut seen: Vec<NaiveDate> = Vec::new();
    let mut out = Vec::new();

    for sample in samples {
        let Some(dt) = DateTime::<Utc>::from_timestamp(sample.timestamp, 0) else {
            continue;
        };
        let date = dt.date_naive();

        if seen.contains(&date) || seen.len() >= MAX_DAILY_ENTRIES {
            continue;
        }
        seen.push(date);

        out.push(DailyForecastEntry {
            date: dt.format("%A, %d %B").to_string(),
            temperature: sample.temperature.round() as i64,
            min_temp: sample.temp_min.round() as i64,
            max_temp: sample.temp_max.round() as i64,
            humidity: sample.humidity,
            description: sample.description.clone(),
            condition: sample.condition.clone(),
            icon: sample.icon.clone(),
            wind_speed: sample.wind_speed,
        });
    }

    out
}

/// Build the hourly temperature series: samples within 24 hours of `now`,
/// labelled `HH:MM` (UTC), rounded to one decimal, sorted by label and capped
/// at 24 entries. Labels are zero-padded, so the lexicographic sort is
/// chronological within a day.
pub fn hourly_series(samples: &[ForecastSample], now: DateTime<Utc>) -> Vec<HourlySample> {
    let mut out: Vec<HourlySample> = samples
        .iter()
        .filter_map(|sample| {
            let dt = DateTime::<Utc>::from_timestamp(sample.timestamp, 0)?;
            if (now - dt).num_seconds().abs() > HOURLY_WINDOW_SECS {
                return None;
            }
            Some(HourlySample {
                time: dt.format("%H:%M").to_string(),
                temperature: (sample.temperature * 10.0).round() / 10.0,
            })
        })
        .collect();

    out.sort_by(|a, b| a.time.cmp(&b.time));
    out.truncate(MAX_HOURLY_SAMPLES);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(timestamp: i64, temperature: f64) -> ForecastSample {
        ForecastSample {
            timestamp,
            temperature,
            temp_min: temperature - 1.0,
            temp_max: temperature + 1.0,
            humidity: 60,
            wind_speed: 2.0,
            condition_code: 800,
            description: "clear sky".into(),
            condition: "Clear".into(),
            icon: "01d".into(),
        }
    }

    fn ts(y: i32, mo: u32, d: u32, h: u32) -> i64 {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).single().expect("valid time").timestamp()
    }

    #[test]
    fn one_entry_per_date_first_sample_wins() {
        let samples = vec![
            sample(ts(2026, 8, 27, 6), 20.0),
            sample(ts(2026, 8, 27, 9), 25.0),
            sample(ts(2026, 8, 28, 0), 18.0),
            sample(ts(2026, 8, 28, 12), 30.0),
        ];

        let daily = daily_summary(&samples);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].temperature, 20);
        assert_eq!(daily[1].temperature, 18);
    }

    #[test]
    fn daily_entries_cap_at_five_distinct_dates() {
        let samples: Vec<ForecastSample> =
            (0..7).map(|d| sample(ts(2026, 8, 20 + d, 12), 20.0 + f64::from(d))).collect();

        let daily = daily_summary(&samples);
        assert_eq!(daily.len(), 5);
        assert_eq!(daily[0].temperature, 20);
        assert_eq!(daily[4].temperature, 24);
    }

    #[test]
    fn sixth_date_is_ignored_even_when_earlier_dates_recur() {
        let mut samples: Vec<ForecastSample> =
            (0..6).map(|d| sample(ts(2026, 8, 20 + d, 12), 20.0)).collect();
        // A late repeat of day one must not be picked up either.
        samples.push(sample(ts(2026, 8, 20, 18), 99.0));

        let daily = daily_summary(&samples);
        assert_eq!(daily.len(), 5);
        assert!(daily.iter().all(|d| d.temperature == 20));
    }

    #[test]
    fn daily_date_label_format() {
        let daily = daily_summary(&[sample(ts(2026, 8, 27, 12), 20.0)]);
        assert_eq!(daily[0].date, "Thursday, 27 August");
    }

    #[test]
    fn hourly_filters_to_24_hour_window() {
        let now = Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).single().expect("valid time");
        let samples = vec![
            sample(now.timestamp() - 90_000, 10.0),  // too old
            sample(now.timestamp() - 3_600, 21.0),   // in window
            sample(now.timestamp() + 10_800, 23.0),  // in window
            sample(now.timestamp() + 90_000, 30.0),  // too far ahead
        ];

        let hourly = hourly_series(&samples, now);
        assert_eq!(hourly.len(), 2);
        assert!(hourly.iter().all(|h| h.temperature < 30.0 && h.temperature > 10.0));
    }

    #[test]
    fn hourly_sorts_by_label_and_caps_at_24() {
        let now = Utc.with_ymd_and_hms(2026, 8, 27, 23, 0, 0).single().expect("valid time");
        // 28 hourly samples, all inside the window, in reverse order.
        let samples: Vec<ForecastSample> = (0..28)
            .rev()
            .map(|h| sample(now.timestamp() - i64::from(h) * 3_000, 15.0))
            .collect();

        let hourly = hourly_series(&samples, now);
        assert_eq!(hourly.len(), 24);
        let labels: Vec<&str> = hourly.iter().map(|h| h.time.as_str()).collect();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(labels, sorted);
    }

    #[test]
    fn hourly_temperature_is_rounded_to_one_decimal() {
        let now = Utc.with_ymd_and_hms(2026, 8, 27, 12, 0, 0).single().expect("valid time");
        let hourly = hourly_series(&[sample(now.timestamp(), 21.26)], now);
        assert_eq!(hourly[0].temperature, 21.3);
    }

    #[test]
    fn empty_forecast_yields_empty_views() {
        assert!(daily_summary(&[]).is_empty());
        assert!(hourly_series(&[], Utc::now()).is_empty());
    }
}
