//! At most one forecast request in flight.
//!
//! Submitting a new request aborts the previous one instead of queueing
//! behind it.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::{
    model::{ForecastResponse, UnitPreference},
    provider::{FetchFailure, ForecastProvider},
};

type FetchResult = Result<ForecastResponse, FetchFailure>;

#[derive(Debug)]
pub struct ForecastSession {
    provider: Arc<dyn ForecastProvider>,
    in_flight: Option<JoinHandle<FetchResult>>,
}

impl ForecastSession {
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        Self { provider, in_flight: None }
    }

    /// Start fetching `city`, superseding any request still running.
    pub fn submit(&mut self, city: impl Into<String>, unit: UnitPreference) {
        self.cancel();

        let city = city.into();
        let provider = Arc::clone(&self.provider);
        debug!(%city, %unit, "Submitting forecast request");

        self.in_flight =
            Some(tokio::spawn(async move { provider.fetch_forecast(&city, unit).await }));
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Abort the in-flight request, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!("Cancelling in-flight forecast request");
            }
            handle.abort();
        }
    }

    /// Wait for the current request.
    ///
    /// Returns `None` when nothing was submitted or the request was cancelled.
    /// Dropping the returned future leaves the request in flight, so it can
    /// still be cancelled afterwards.
    pub async fn wait(&mut self) -> Option<FetchResult> {
        let handle = self.in_flight.as_mut()?;
        let joined = handle.await;
        self.in_flight = None;

        match joined {
            Ok(result) => Some(result),
            Err(err) if err.is_cancelled() => None,
            Err(err) => Some(Err(FetchFailure::new(format!("forecast task failed: {err}")))),
        }
    }
}

impl Drop for ForecastSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
