//! Exchange rate abstractions and the documents passed between layers

use async_trait::async_trait;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::RateError;
use super::range::DateRange;

/// Response of the upstream conversion endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestRates {
    pub amount: Option<f64>,
    pub base: Option<String>,
    pub date: Option<String>,
    pub rates: Option<HashMap<String, f64>>,
}

/// Response of the upstream time series endpoint. Only business days appear in `rates`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoricalRates {
    pub base: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub rates: Option<IndexMap<NaiveDate, HashMap<String, f64>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub converted_amount: f64,
    pub rate: f64,
    pub date: String,
}

/// Date to rate, in upstream order.
pub type HistorySeries = IndexMap<NaiveDate, f64>;

/// Currency code to display name, in upstream order.
pub type CurrencyCatalog = IndexMap<String, String>;

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    async fn convert(&self, from: &str, to: &str, amount: f64) -> Result<LatestRates, RateError>;

    async fn history(
        &self,
        base: &str,
        target: &str,
        range: &DateRange,
    ) -> Result<HistoricalRates, RateError>;

    async fn symbols(&self) -> Result<CurrencyCatalog, RateError>;
}
