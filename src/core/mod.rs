//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod convert;
pub mod currency;
pub mod historical;
pub mod history;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use cache::{Clock, ManualClock, SystemClock, TtlCache};
pub use convert::{ConversionRecord, convert, effective_rate, parse_amount};
pub use currency::Currency;
pub use historical::HistoricalPoint;
pub use history::{ConversionHistory, Favorites};
pub use rates::{RateProvider, RateSnapshot, RateTable};
