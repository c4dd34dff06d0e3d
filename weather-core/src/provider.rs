use crate::{
    Config, ForecastResponse, UnitPreference, provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};
use thiserror::Error;

pub mod openweather;

/// The only way a forecast request can fail.
///
/// `reason` is for logs; users only ever see [`FetchFailure::USER_MESSAGE`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unable to fetch weather data: {reason}")]
pub struct FetchFailure {
    pub reason: String,
}

impl FetchFailure {
    pub const USER_MESSAGE: &'static str = "⚠️ Unable to fetch weather data.";

    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Issue exactly one forecast request; there is no retry.
    async fn fetch_forecast(
        &self,
        city: &str,
        unit: UnitPreference,
    ) -> Result<ForecastResponse, FetchFailure>;
}

/// Construct the forecast provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let api_key = config.require_api_key()?;

    let provider = OpenWeatherProvider::new(
        api_key.to_owned(),
        config.base_url(),
        Duration::from_secs(config.timeout_secs()),
    )?;

    Ok(Box::new(provider))
}
