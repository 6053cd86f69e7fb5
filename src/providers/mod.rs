pub mod exchange_rate_api;

// Re-export the cache type providers are built on
pub use crate::core::cache::TtlCache;
pub use exchange_rate_api::{ExchangeRateApiProvider, RateCache, rate_cache_ttl};
