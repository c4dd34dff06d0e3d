//! Typed view model for the dashboard.
//!
//! Everything a front end needs is pre-formatted here, so renderers only lay
//! out strings and plot [`SeriesPoint`]s.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::{
    icon::weather_icon,
    model::{ForecastResponse, ForecastSample, UnitPreference},
    provider::{FetchFailure, ForecastProvider},
    sampler::{ForecastViews, SeriesPoint},
};

/// Shown instead of sunrise/sunset when the provider omits them.
pub const PLACEHOLDER: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentCard {
    pub temperature: String,
    pub icon: &'static str,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtmosphereCard {
    pub humidity: String,
    pub wind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunCard {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCard {
    pub date: String,
    pub icon: &'static str,
    pub description: String,
    pub temperature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyCard {
    pub time: String,
    pub icon: &'static str,
    pub temperature: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChart {
    pub y_label: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub location: String,
    pub unit: UnitPreference,
    pub current: CurrentCard,
    pub atmosphere: AtmosphereCard,
    pub sun: SunCard,
    pub daily: Vec<DailyCard>,
    pub hourly: Vec<HourlyCard>,
    pub trend: TrendChart,
}

impl Dashboard {
    pub fn build<Tz: TimeZone>(response: &ForecastResponse, unit: UnitPreference, tz: &Tz) -> Self {
        let views = ForecastViews::from_response(response, tz);
        let location = response.location();
        let current = views.current;

        let sun_time = |t: Option<DateTime<Utc>>| {
            t.map(|t| format_clock(&local(&t, tz))).unwrap_or_else(|| PLACEHOLDER.to_string())
        };

        Self {
            location: location.display_name(),
            unit,
            current: CurrentCard {
                temperature: format_temperature(current.temperature, unit),
                icon: weather_icon(&current.condition.code),
                description: title_case(&current.condition.description),
            },
            atmosphere: AtmosphereCard {
                humidity: format!("{}%", current.humidity_pct),
                wind: format!("{} {}", current.wind_speed, unit.wind_unit()),
            },
            sun: SunCard {
                sunrise: sun_time(location.sunrise),
                sunset: sun_time(location.sunset),
            },
            daily: views.daily.iter().map(|s| daily_card(s, unit, tz)).collect(),
            hourly: views.hourly.iter().map(|s| hourly_card(s, unit, tz)).collect(),
            trend: TrendChart {
                y_label: format!("Temp ({})", unit.symbol()),
                points: views.series,
            },
        }
    }
}

fn daily_card<Tz: TimeZone>(sample: &ForecastSample, unit: UnitPreference, tz: &Tz) -> DailyCard {
    DailyCard {
        date: local(&sample.time, tz).format("%a, %d %b").to_string(),
        icon: weather_icon(&sample.condition.code),
        description: title_case(&sample.condition.description),
        temperature: format_temperature(sample.temperature, unit),
    }
}

fn hourly_card<Tz: TimeZone>(sample: &ForecastSample, unit: UnitPreference, tz: &Tz) -> HourlyCard {
    HourlyCard {
        time: local(&sample.time, tz).format("%I %p").to_string(),
        icon: weather_icon(&sample.condition.code),
        temperature: format_temperature(sample.temperature, unit),
        category: sample.condition.category.clone(),
    }
}

/// Result of one fetch-render cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardOutcome {
    Ready(Box<Dashboard>),
    Failed { message: String },
}

impl DashboardOutcome {
    pub fn from_result<Tz: TimeZone>(
        result: Result<ForecastResponse, FetchFailure>,
        unit: UnitPreference,
        tz: &Tz,
    ) -> Self {
        match result {
            Ok(response) => {
                info!(
                    location = %response.location().display_name(),
                    samples = response.samples().len(),
                    "Forecast ready"
                );
                DashboardOutcome::Ready(Box::new(Dashboard::build(&response, unit, tz)))
            }
            Err(err) => {
                debug!(reason = %err.reason, "Forecast fetch failed");
                DashboardOutcome::Failed { message: FetchFailure::USER_MESSAGE.to_string() }
            }
        }
    }
}

/// Fetch once and turn the result into a dashboard or a single error message.
pub async fn run_cycle<Tz: TimeZone>(
    provider: &dyn ForecastProvider,
    city: &str,
    unit: UnitPreference,
    tz: &Tz,
) -> DashboardOutcome {
    let result = provider.fetch_forecast(city, unit).await;
    DashboardOutcome::from_result(result, unit, tz)
}

fn local<Tz: TimeZone>(t: &DateTime<Utc>, tz: &Tz) -> DateTime<FixedOffset> {
    t.with_timezone(tz).fixed_offset()
}

pub fn format_temperature(value: f64, unit: UnitPreference) -> String {
    format!("{value:.1}{}", unit.symbol())
}

/// `"06:05 AM"` style wall-clock time.
pub fn format_clock(t: &DateTime<FixedOffset>) -> String {
    t.format("%I:%M %p").to_string()
}

/// Uppercase every letter that follows a non-letter, lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_letter = false;

    for c in text.chars() {
        if after_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        after_letter = c.is_alphabetic();
    }

    out
}
