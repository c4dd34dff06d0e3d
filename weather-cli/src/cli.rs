use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use chrono::Local;
use clap::{ArgAction, Parser, Subcommand};
use inquire::{InquireError, Select, Text};
use tracing::{debug, info};
use weather_core::{
    Config, DashboardOutcome, ForecastProvider, ForecastSession, UnitPreference,
    provider_from_config, run_cycle,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather forecast dashboard")]
pub struct Cli {
    /// Verbosity: -v info, -vv debug, -vvv trace.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// OpenWeatherMap API key; overrides the configured one.
    #[arg(long, env = "OPENWEATHER_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default city/unit.
    Configure,

    /// Show the forecast dashboard for a city.
    Show {
        /// City name; defaults to the configured city.
        city: Option<String>,

        /// Temperature unit: celsius or fahrenheit.
        #[arg(short, long)]
        unit: Option<UnitPreference>,

        /// Print the dashboard as JSON instead of cards.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for a city and unit, show the dashboard, repeat.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city, unit, json } => {
                let config = Config::load()?.with_api_key_override(self.api_key);
                show(&config, city, unit, json).await
            }
            Command::Interactive => {
                let config = Config::load()?.with_api_key_override(self.api_key);
                interactive(&config).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeatherMap API key:")
        .with_default(config.api_key().unwrap_or_default())
        .prompt()
        .context("Failed to read API key")?;

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;

    let unit = select_unit(config.default_unit()).context("Failed to read default unit")?;

    config.api_key = Some(api_key.trim().to_string());
    config.default_city = Some(city.trim().to_string());
    config.default_unit = Some(unit);

    let path = config.save()?;
    info!(path = %path.display(), "Configuration saved");
    println!("Configuration saved to {}", path.display());

    Ok(())
}

async fn show(
    config: &Config,
    city: Option<String>,
    unit: Option<UnitPreference>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let provider = provider_from_config(config)?;
    let city = city.unwrap_or_else(|| config.default_city().to_string());
    let unit = unit.unwrap_or_else(|| config.default_unit());

    let outcome = run_cycle(provider.as_ref(), &city, unit, &Local).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    match outcome {
        DashboardOutcome::Ready(dashboard) => {
            if !json {
                print!("{}", render::dashboard(&dashboard));
            }
            Ok(ExitCode::SUCCESS)
        }
        DashboardOutcome::Failed { message } => {
            if !json {
                eprintln!("{message}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let provider: Arc<dyn ForecastProvider> = provider_from_config(config)?.into();
    let mut session = ForecastSession::new(provider);

    let mut city = config.default_city().to_string();
    let mut unit = config.default_unit();

    loop {
        city = match Text::new("City Name").with_default(&city).prompt() {
            Ok(c) => c.trim().to_string(),
            Err(e) if is_prompt_exit(&e) => break,
            Err(e) => return Err(e).context("Failed to read city"),
        };

        unit = match select_unit(unit) {
            Ok(u) => u,
            Err(e) if is_prompt_exit(&e) => break,
            Err(e) => return Err(e).context("Failed to read unit"),
        };

        session.submit(city.clone(), unit);

        let result = tokio::select! {
            result = session.wait() => result,
            _ = tokio::signal::ctrl_c() => None,
        };

        match result {
            Some(result) => match DashboardOutcome::from_result(result, unit, &Local) {
                DashboardOutcome::Ready(dashboard) => print!("{}", render::dashboard(&dashboard)),
                DashboardOutcome::Failed { message } => println!("{message}"),
            },
            None => {
                session.cancel();
                println!("Request cancelled.");
            }
        }
    }

    debug!("Leaving interactive mode");
    Ok(())
}

fn select_unit(current: UnitPreference) -> Result<UnitPreference, InquireError> {
    let options = UnitPreference::all().to_vec();
    let cursor = options.iter().position(|u| *u == current).unwrap_or(0);

    Select::new("Temperature Unit", options).with_starting_cursor(cursor).prompt()
}

fn is_prompt_exit(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}
