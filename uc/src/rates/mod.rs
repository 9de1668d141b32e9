//! Exchange-rate lookup boundary
//!
//! The currency tool depends on a [`RateProvider`] rather than on HTTP
//! directly, so the loop and tool tests can substitute fixed rate tables.

mod error;
mod exchange_rate_api;

#[cfg(test)]
pub(crate) mod testing;

pub use error::RateError;
pub use exchange_rate_api::ExchangeRateApi;

use std::collections::HashMap;

use async_trait::async_trait;

/// Conversion rates keyed by currency code, relative to the requested base
pub type RateTable = HashMap<String, f64>;

/// Source of current conversion rates
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch rates for converting one unit of `base_code` into every known code
    async fn lookup(&self, base_code: &str) -> Result<RateTable, RateError>;
}

/// Fixed in-memory rates, used when no network provider is wanted
#[derive(Debug, Clone, Default)]
pub struct StaticRates {
    tables: HashMap<String, RateTable>,
}

impl StaticRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the rate table for one base code
    pub fn with_base(mut self, base_code: &str, rates: &[(&str, f64)]) -> Self {
        let table = rates.iter().map(|(code, rate)| (code.to_string(), *rate)).collect();
        self.tables.insert(base_code.to_uppercase(), table);
        self
    }
}

#[async_trait]
impl RateProvider for StaticRates {
    async fn lookup(&self, base_code: &str) -> Result<RateTable, RateError> {
        self.tables
            .get(base_code)
            .cloned()
            .ok_or_else(|| RateError::UnknownBase(base_code.to_string()))
    }
}
