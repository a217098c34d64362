//! Conversion and history lookups reshaped from upstream documents.

use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::core::{
    ConversionResult, CurrencyCatalog, DateRange, ExchangeRateProvider, HistorySeries, RangeCode,
    RateError,
};

fn check_currency_code(field: &str, code: &str) -> Result<(), RateError> {
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(RateError::InvalidArgument(format!(
            "{field} must be a 3-letter currency code: '{code}'"
        )))
    }
}

#[derive(Clone)]
pub struct RateService {
    provider: Arc<dyn ExchangeRateProvider>,
}

impl RateService {
    pub fn new(provider: Arc<dyn ExchangeRateProvider>) -> Self {
        RateService { provider }
    }

    #[instrument(skip(self))]
    pub async fn convert(
        &self,
        from: &str,
        to: &str,
        amount: f64,
    ) -> Result<ConversionResult, RateError> {
        check_currency_code("from", from)?;
        check_currency_code("to", to)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(RateError::InvalidArgument(format!(
                "amount must be a positive number: {amount}"
            )));
        }

        let doc = self.provider.convert(from, to, amount).await?;

        let converted_amount = doc
            .rates
            .as_ref()
            .and_then(|rates| rates.get(to))
            .copied()
            .ok_or_else(|| {
                RateError::InvalidUpstreamResponse(format!("no rate for {to} in conversion"))
            })?;
        let date = doc.date.ok_or_else(|| {
            RateError::InvalidUpstreamResponse("conversion has no rate date".to_string())
        })?;

        Ok(ConversionResult {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            converted_amount,
            rate: converted_amount / amount,
            date,
        })
    }

    /// Rate history for `range` ending on the server's local date.
    pub async fn history(
        &self,
        base: &str,
        target: &str,
        range: &str,
    ) -> Result<HistorySeries, RateError> {
        self.history_on(base, target, range, Local::now().date_naive())
            .await
    }

    #[instrument(skip(self))]
    pub async fn history_on(
        &self,
        base: &str,
        target: &str,
        range: &str,
        today: NaiveDate,
    ) -> Result<HistorySeries, RateError> {
        check_currency_code("base", base)?;
        check_currency_code("target", target)?;

        let window = DateRange::ending_on(RangeCode::from(range), today)?;
        let doc = self.provider.history(base, target, &window).await?;

        let rates = doc.rates.ok_or_else(|| {
            RateError::InvalidUpstreamResponse("history has no rates".to_string())
        })?;

        let mut series = HistorySeries::new();
        for (date, day_rates) in rates {
            if !window.contains(date) {
                debug!(%date, "Dropping rate outside requested window");
                continue;
            }
            // Dates without the target are skipped
            if let Some(rate) = day_rates.get(target) {
                series.insert(date, *rate);
            }
        }
        Ok(series)
    }

    #[instrument(skip(self))]
    pub async fn currencies(&self) -> Result<CurrencyCatalog, RateError> {
        self.provider.symbols().await
    }
}
