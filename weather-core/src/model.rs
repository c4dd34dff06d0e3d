use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Temperature unit chosen for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    Celsius,
    Fahrenheit,
}

impl UnitPreference {
    /// Value of the provider's `units` query parameter.
    pub fn api_token(&self) -> &'static str {
        match self {
            UnitPreference::Celsius => "metric",
            UnitPreference::Fahrenheit => "imperial",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnitPreference::Celsius => "°C",
            UnitPreference::Fahrenheit => "°F",
        }
    }

    /// Wind speed unit the provider reports in for this unit system.
    pub fn wind_unit(&self) -> &'static str {
        match self {
            UnitPreference::Celsius => "m/s",
            UnitPreference::Fahrenheit => "mph",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitPreference::Celsius => "celsius",
            UnitPreference::Fahrenheit => "fahrenheit",
        }
    }

    pub const fn all() -> &'static [UnitPreference] {
        &[UnitPreference::Celsius, UnitPreference::Fahrenheit]
    }
}

impl fmt::Display for UnitPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitPreference::Celsius => f.write_str("Celsius"),
            UnitPreference::Fahrenheit => f.write_str("Fahrenheit"),
        }
    }
}

impl FromStr for UnitPreference {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "celsius" | "c" | "metric" => Ok(UnitPreference::Celsius),
            "fahrenheit" | "f" | "imperial" => Ok(UnitPreference::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

/// Weather condition attached to a sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Provider icon code, e.g. `"10d"`.
    pub code: String,
    pub description: String,
    /// Coarse group such as `"Rain"` or `"Clouds"`.
    pub category: String,
}

impl Condition {
    pub fn unknown() -> Self {
        Self {
            code: String::new(),
            description: "Unknown".to_string(),
            category: "Unknown".to_string(),
        }
    }
}

/// One point of the forecast time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub time: DateTime<Utc>,
    pub temperature: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    pub country: String,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

impl LocationInfo {
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// A successful forecast: a non-empty, chronological list of samples.
///
/// The first sample is the current one.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResponse {
    samples: Vec<ForecastSample>,
    location: LocationInfo,
}

impl ForecastResponse {
    /// Returns `None` when `samples` is empty.
    pub fn new(samples: Vec<ForecastSample>, location: LocationInfo) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        Some(Self { samples, location })
    }

    pub fn samples(&self) -> &[ForecastSample] {
        &self.samples
    }

    pub fn location(&self) -> &LocationInfo {
        &self.location
    }

    pub fn current(&self) -> &ForecastSample {
        &self.samples[0]
    }
}
