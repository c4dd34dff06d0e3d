//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather forecast provider
//! - Sampling of the forecast series into current / daily / hourly / trend views
//! - A typed dashboard view model ready for rendering
//!
//! It is used by `weather-cli`, but can also back other front ends.

pub mod config;
pub mod icon;
pub mod model;
pub mod provider;
pub mod sampler;
pub mod session;
pub mod view;

pub use config::Config;
pub use icon::weather_icon;
pub use model::{Condition, ForecastResponse, ForecastSample, LocationInfo, UnitPreference};
pub use provider::{FetchFailure, ForecastProvider, provider_from_config};
pub use sampler::{ForecastViews, SeriesPoint};
pub use session::ForecastSession;
pub use view::{Dashboard, DashboardOutcome, run_cycle};
