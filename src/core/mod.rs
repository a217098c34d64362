//! Core business logic abstractions

pub mod error;
pub mod log;
pub mod range;
pub mod rates;

// Re-export main types for cleaner imports
pub use error::{RateError, UpstreamFailure};
pub use range::{DateRange, RangeCode};
pub use rates::{
    ConversionResult, CurrencyCatalog, ExchangeRateProvider, HistoricalRates, HistorySeries,
    LatestRates,
};
