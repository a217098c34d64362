use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, instrument};

use crate::core::{
    CurrencyCatalog, DateRange, ExchangeRateProvider, HistoricalRates, LatestRates, RateError,
    UpstreamFailure,
};

pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

// FrankfurterProvider implementation for ExchangeRateProvider
pub struct FrankfurterProvider {
    base_url: String,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str) -> Self {
        FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Single attempt GET. Bodies that are not JSON are a failed call, JSON of the
    /// wrong shape is an invalid response.
    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, RateError> {
        debug!("Requesting exchange rate data from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("xrate/1.0")
            .build()
            .map_err(|e| RateError::upstream(url, e))?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| RateError::upstream(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RateError::upstream(url, UpstreamFailure::Status(status)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| RateError::upstream(url, e))?;
        serde_json::from_str(&text).map_err(|e| match e.classify() {
            Category::Data => {
                RateError::InvalidUpstreamResponse(format!("unexpected document from {url}: {e}"))
            }
            Category::Io | Category::Syntax | Category::Eof => RateError::upstream(url, e),
        })
    }
}

#[async_trait]
impl ExchangeRateProvider for FrankfurterProvider {
    #[instrument(name = "FrankfurterConvert", skip(self))]
    async fn convert(&self, from: &str, to: &str, amount: f64) -> Result<LatestRates, RateError> {
        let url = format!(
            "{}/latest?from={from}&to={to}&amount={amount}",
            self.base_url
        );
        self.fetch(&url).await
    }

    #[instrument(name = "FrankfurterHistory", skip(self))]
    async fn history(
        &self,
        base: &str,
        target: &str,
        range: &DateRange,
    ) -> Result<HistoricalRates, RateError> {
        let url = format!(
            "{}/{}..{}?from={base}&to={target}",
            self.base_url,
            range.start(),
            range.end()
        );
        self.fetch(&url).await
    }

    #[instrument(name = "FrankfurterSymbols", skip(self))]
    async fn symbols(&self) -> Result<CurrencyCatalog, RateError> {
        let url = format!("{}/currencies", self.base_url);
        self.fetch(&url).await
    }
}
