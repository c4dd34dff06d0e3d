//! Derives the dashboard views from a forecast time series.
//!
//! The provider reports one sample every three hours, so taking every 8th
//! sample approximates "one per day". This does not align to local midnight:
//! the daily points sit at the same wall-clock time as the first sample.

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::Serialize;

use crate::model::{ForecastResponse, ForecastSample};

/// Samples per day at the provider's 3-hour cadence.
pub const DAILY_STRIDE: usize = 8;
pub const DAILY_LIMIT: usize = 5;
pub const HOURLY_LIMIT: usize = 4;

/// A temperature reading placed on the wall clock of some time zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub time: DateTime<FixedOffset>,
    pub temperature: f64,
}

pub fn current(samples: &[ForecastSample]) -> Option<&ForecastSample> {
    samples.first()
}

pub fn daily(samples: &[ForecastSample]) -> Vec<&ForecastSample> {
    samples.iter().step_by(DAILY_STRIDE).take(DAILY_LIMIT).collect()
}

pub fn hourly(samples: &[ForecastSample]) -> &[ForecastSample] {
    &samples[..samples.len().min(HOURLY_LIMIT)]
}

pub fn series<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<SeriesPoint> {
    samples
        .iter()
        .map(|s| SeriesPoint {
            time: s.time.with_timezone(tz).fixed_offset(),
            temperature: s.temperature,
        })
        .collect()
}

/// The four views derived from one response.
#[derive(Debug, Clone)]
pub struct ForecastViews<'a> {
    pub current: &'a ForecastSample,
    pub daily: Vec<&'a ForecastSample>,
    pub hourly: &'a [ForecastSample],
    pub series: Vec<SeriesPoint>,
}

impl<'a> ForecastViews<'a> {
    pub fn from_response<Tz: TimeZone>(response: &'a ForecastResponse, tz: &Tz) -> Self {
        let samples = response.samples();

        Self {
            current: response.current(),
            daily: daily(samples),
            hourly: hourly(samples),
            series: series(samples, tz),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, LocationInfo};
    use chrono::{FixedOffset, Utc};

    const T: i64 = 1_700_000_000;
    const THREE_HOURS: i64 = 3 * 3600;

    fn samples(n: usize) -> Vec<ForecastSample> {
        (0..n)
            .map(|i| ForecastSample {
                time: DateTime::from_timestamp(T + i as i64 * THREE_HOURS, 0).unwrap(),
                temperature: i as f64,
                humidity_pct: 40,
                wind_speed: 2.0,
                condition: Condition::unknown(),
            })
            .collect()
    }

    fn response(n: usize) -> ForecastResponse {
        let location = LocationInfo {
            name: "Ahmedabad".into(),
            country: "IN".into(),
            sunrise: None,
            sunset: None,
        };
        ForecastResponse::new(samples(n), location).unwrap()
    }

    #[test]
    fn daily_picks_every_eighth_sample() {
        let all = samples(40);
        let days = daily(&all);

        assert_eq!(days.len(), 5);
        for (i, day) in days.iter().enumerate() {
            assert_eq!(*day, &all[8 * i]);
        }
    }

    #[test]
    fn daily_timestamps_are_one_day_apart() {
        let all = samples(40);
        let stamps: Vec<i64> = daily(&all).iter().map(|s| s.time.timestamp()).collect();

        let day = 24 * 3600;
        assert_eq!(stamps, vec![T, T + day, T + 2 * day, T + 3 * day, T + 4 * day]);
    }

    #[test]
    fn daily_length_matches_ceiling_rule() {
        for n in 1..=50usize {
            let expected = DAILY_LIMIT.min(n.div_ceil(DAILY_STRIDE));
            assert_eq!(daily(&samples(n)).len(), expected, "n = {n}");
        }
    }

    #[test]
    fn hourly_is_prefix_of_series() {
        for n in [1, 3, 4, 40] {
            let all = samples(n);
            let hours = hourly(&all);
            assert_eq!(hours, &all[..n.min(4)]);
        }
    }

    #[test]
    fn current_is_first_or_none() {
        let all = samples(3);
        assert_eq!(current(&all), Some(&all[0]));
        assert_eq!(current(&[]), None);
    }

    #[test]
    fn series_converts_to_target_zone() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let points = series(&samples(2), &ist);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].time.timestamp(), T);
        assert_eq!(points[0].time.offset(), &ist);
        assert_eq!(points[1].temperature, 1.0);
    }

    #[test]
    fn views_from_short_response_degrade() {
        let resp = response(2);
        let views = ForecastViews::from_response(&resp, &Utc);

        assert_eq!(views.current, &resp.samples()[0]);
        assert_eq!(views.daily.len(), 1);
        assert_eq!(views.hourly.len(), 2);
        assert_eq!(views.series.len(), 2);
    }
}
