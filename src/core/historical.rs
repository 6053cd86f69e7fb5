use anyhow::{Result, anyhow};
use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub rate: f64,
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Generates a plausible-looking daily series ending at `today`.
///
/// A base rate is drawn from `[0.5, 2.5)` and each day varies it
/// independently by up to ±5%. This is not market data. Fails when the
/// first day would fall before the earliest representable date.
pub fn synthetic_series<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    days: u32,
) -> Result<Vec<HistoricalPoint>> {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .ok_or_else(|| anyhow!("Cannot go back {} days from {}", days, today))?;

    let base_rate = rng.gen_range(0.5..2.5);
    (0..=u64::from(days))
        .rev()
        .map(|offset| {
            let date = today
                .checked_sub_days(Days::new(offset))
                .ok_or_else(|| anyhow!("Cannot go back {} days from {}", offset, today))?;
            let variation = rng.gen_range(-0.05..0.05);
            Ok(HistoricalPoint {
                date,
                rate: round6(base_rate * (1.0 + variation)),
            })
        })
        .collect()
}
