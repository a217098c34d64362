//! In-memory provider for unit tests.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::{
    CurrencyCatalog, DateRange, ExchangeRateProvider, HistoricalRates, LatestRates, RateError,
    UpstreamFailure,
};

/// Answers every call with a canned JSON body and records what was asked.
#[derive(Default)]
pub struct StubProvider {
    latest: Option<String>,
    history: Option<String>,
    symbols: Option<String>,
    failing: bool,
    calls: AtomicUsize,
    last_range: Mutex<Option<DateRange>>,
}

impl StubProvider {
    pub fn failing() -> Self {
        StubProvider {
            failing: true,
            ..Default::default()
        }
    }

    pub fn with_latest(mut self, body: &str) -> Self {
        self.latest = Some(body.to_string());
        self
    }

    pub fn with_history(mut self, body: &str) -> Self {
        self.history = Some(body.to_string());
        self
    }

    pub fn with_symbols(mut self, body: &str) -> Self {
        self.symbols = Some(body.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_range(&self) -> Option<DateRange> {
        *self.last_range.lock().unwrap()
    }

    fn answer<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &Option<String>,
    ) -> Result<T, RateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(RateError::upstream(
                &format!("stub://{endpoint}"),
                UpstreamFailure::Status(StatusCode::SERVICE_UNAVAILABLE),
            ));
        }
        let body = body.as_deref().ok_or_else(|| {
            RateError::InvalidUpstreamResponse(format!("no stubbed body for {endpoint}"))
        })?;
        serde_json::from_str(body).map_err(|e| RateError::InvalidUpstreamResponse(e.to_string()))
    }
}

#[async_trait]
impl ExchangeRateProvider for StubProvider {
    async fn convert(
        &self,
        _from: &str,
        _to: &str,
        _amount: f64,
    ) -> Result<LatestRates, RateError> {
        self.answer("latest", &self.latest)
    }

    async fn history(
        &self,
        _base: &str,
        _target: &str,
        range: &DateRange,
    ) -> Result<HistoricalRates, RateError> {
        *self.last_range.lock().unwrap() = Some(*range);
        self.answer("history", &self.history)
    }

    async fn symbols(&self) -> Result<CurrencyCatalog, RateError> {
        self.answer("currencies", &self.symbols)
    }
}
