use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::model::{Condition, ForecastResponse, ForecastSample, LocationInfo, UnitPreference};

use super::{FetchFailure, ForecastProvider};

/// Client for the OpenWeatherMap 5-day / 3-hour forecast endpoint.
#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

// Keeps the API key out of logs.
impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.base_url)
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    #[instrument(skip(self), fields(units = unit.api_token()))]
    async fn fetch_forecast(
        &self,
        city: &str,
        unit: UnitPreference,
    ) -> Result<ForecastResponse, FetchFailure> {
        let res = self
            .http
            .get(self.forecast_url())
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", unit.api_token()),
            ])
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key in its query string.
                let e = e.without_url();
                debug!(error = %e, "OpenWeather request failed");
                FetchFailure::new(format!("request to OpenWeather failed: {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            let e = e.without_url();
            FetchFailure::new(format!("failed to read OpenWeather response body: {e}"))
        })?;

        if status != StatusCode::OK {
            debug!(status = %status, "OpenWeather returned non-success status");
            return Err(FetchFailure::new(format!(
                "OpenWeather forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body).map_err(|e| {
            FetchFailure::new(format!("failed to parse OpenWeather forecast JSON: {e}"))
        })?;

        debug!(samples = parsed.list.len(), "Received OpenWeather forecast");
        parsed.into_response()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    icon: String,
    description: String,
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    #[serde(default)]
    country: String,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    /// `"200"` on success; OpenWeather sends it as a string here, but
    /// error payloads sometimes carry a number.
    cod: serde_json::Value,
    #[serde(default)]
    list: Vec<OwForecastEntry>,
    city: OwCity,
}

impl OwForecastResponse {
    fn cod_is_ok(&self) -> bool {
        match &self.cod {
            serde_json::Value::String(s) => s == "200",
            serde_json::Value::Number(n) => n.as_u64() == Some(200),
            _ => false,
        }
    }

    fn into_response(self) -> Result<ForecastResponse, FetchFailure> {
        if !self.cod_is_ok() {
            return Err(FetchFailure::new(format!("OpenWeather payload reported cod {}", self.cod)));
        }

        let samples = self
            .list
            .into_iter()
            .map(OwForecastEntry::into_sample)
            .collect::<Result<Vec<_>, _>>()?;

        let location = LocationInfo {
            name: self.city.name,
            country: self.city.country,
            sunrise: self.city.sunrise.and_then(unix_to_utc),
            sunset: self.city.sunset.and_then(unix_to_utc),
        };

        ForecastResponse::new(samples, location)
            .ok_or_else(|| FetchFailure::new("OpenWeather forecast response contained no data"))
    }
}

impl OwForecastEntry {
    fn into_sample(self) -> Result<ForecastSample, FetchFailure> {
        let time = unix_to_utc(self.dt)
            .ok_or_else(|| FetchFailure::new(format!("invalid forecast timestamp {}", self.dt)))?;

        let condition = self
            .weather
            .into_iter()
            .next()
            .map(|w| Condition {
                code: w.icon,
                description: w.description,
                category: w.main,
            })
            .unwrap_or_else(Condition::unknown);

        Ok(ForecastSample {
            time,
            temperature: self.main.temp,
            humidity_pct: self.main.humidity,
            wind_speed: self.wind.speed,
            condition,
        })
    }
}

/// A zero timestamp is how the provider says "unknown" for sunrise/sunset.
fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    if ts == 0 {
        return None;
    }
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
