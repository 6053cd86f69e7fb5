//! Exchange rate abstractions and core types

use crate::core::historical::HistoricalPoint;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Rates relative to a single base currency, keyed by currency code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable(HashMap<String, f64>);

impl RateTable {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self(rates)
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.0.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries sorted by currency code.
    pub fn sorted(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<_> = self.0.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl FromIterator<(String, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Approximate rates used when the live endpoint cannot be reached.
pub const FALLBACK_RATES: [(&str, f64); 12] = [
    ("USD", 1.0),
    ("EUR", 0.85),
    ("GBP", 0.73),
    ("BRL", 5.2),
    ("JPY", 110.0),
    ("CAD", 1.25),
    ("AUD", 1.35),
    ("CHF", 0.92),
    ("CNY", 6.45),
    ("INR", 74.5),
    ("BTC", 0.000023),
    ("ETH", 0.00035),
];

/// Builds the fallback table for `base`. The base itself is always unity.
pub fn fallback_rates(base: &str) -> RateTable {
    let mut table: RateTable = FALLBACK_RATES
        .iter()
        .map(|(code, rate)| (code.to_string(), *rate))
        .collect();
    table.0.insert(base.to_string(), 1.0);
    table
}

/// Result of a rate lookup: live data (fresh or cached) or the fallback table.
#[derive(Debug, Clone)]
pub enum RateSnapshot {
    Live(Arc<RateTable>),
    Fallback(Arc<RateTable>),
}

impl RateSnapshot {
    pub fn table(&self) -> &Arc<RateTable> {
        match self {
            RateSnapshot::Live(table) | RateSnapshot::Fallback(table) => table,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RateSnapshot::Fallback(_))
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Rates for `base`. Network failures yield `RateSnapshot::Fallback`, not an error.
    async fn get_rates(&self, base: &str) -> Result<RateSnapshot>;

    /// `days + 1` daily points ending today, oldest first.
    async fn historical_rates(&self, from: &str, to: &str, days: u32)
    -> Result<Vec<HistoricalPoint>>;
}
