//! Cross-rate conversion through a shared base currency.
use crate::core::rates::RateTable;
use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Converts `amount` between two currencies quoted against the same base.
///
/// Equal rates return `amount` untouched. Zero or negative rates are not
/// checked and produce whatever the arithmetic produces.
pub fn convert(amount: f64, from_rate: f64, to_rate: f64) -> f64 {
    if from_rate == to_rate {
        return amount;
    }
    (amount / from_rate) * to_rate
}

/// Units of the target currency per unit of the source currency.
pub fn effective_rate(from_rate: f64, to_rate: f64) -> f64 {
    to_rate / from_rate
}

/// Parses user input into a convertible amount. Only finite values above zero qualify.
pub fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    pub id: Uuid,
    pub from: String,
    pub to: String,
    pub from_amount: f64,
    pub to_amount: f64,
    pub rate: f64,
    pub timestamp: DateTime<Utc>,
}

impl ConversionRecord {
    /// Converts `amount` using the rates in `table` and records the result.
    pub fn from_table(
        amount: f64,
        from: &str,
        to: &str,
        table: &RateTable,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        let from_rate = table
            .get(from)
            .ok_or_else(|| anyhow!("No exchange rate available for currency: {}", from))?;
        let to_rate = table
            .get(to)
            .ok_or_else(|| anyhow!("No exchange rate available for currency: {}", to))?;

        Ok(Self {
            id: Uuid::new_v4(),
            from: from.to_string(),
            to: to.to_string(),
            from_amount: amount,
            to_amount: convert(amount, from_rate, to_rate),
            rate: effective_rate(from_rate, to_rate),
            timestamp,
        })
    }

    /// False when the amount or rate overflowed, which JSON cannot store.
    pub fn is_finite(&self) -> bool {
        self.to_amount.is_finite() && self.rate.is_finite()
    }
}
