use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::core::cache::{Clock, TtlCache};
use crate::core::historical::{HistoricalPoint, synthetic_series};
use crate::core::rates::{RateProvider, RateSnapshot, RateTable, fallback_rates};

pub type RateCache = TtlCache<String, Arc<RateTable>>;

/// Time-to-live for cached rate tables.
pub fn rate_cache_ttl() -> chrono::Duration {
    chrono::Duration::minutes(5)
}

/// Rate provider for exchangerate-api style `GET {base_url}/latest/{base}` endpoints.
pub struct ExchangeRateApiProvider {
    base_url: String,
    cache: Arc<RateCache>,
    clock: Arc<dyn Clock>,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, cache: Arc<RateCache>, clock: Arc<dyn Clock>) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
            clock,
        }
    }

    async fn fetch_latest(&self, client: &reqwest::Client, base: &str) -> Result<RateTable> {
        let url = format!("{}/latest/{}", self.base_url, base);
        debug!("Requesting exchange rates from {}", url);

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, base))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;

        debug!(
            date = data.date.as_deref().unwrap_or("unknown"),
            count = data.rates.len(),
            "Received exchange rates"
        );
        Ok(RateTable::new(data.rates))
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
    #[serde(default)]
    date: Option<String>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = %base))]
    async fn get_rates(&self, base: &str) -> Result<RateSnapshot> {
        if base.trim().is_empty() {
            bail!("Base currency code must not be empty");
        }

        if let Some(cached) = self.cache.get(&base.to_string()).await {
            return Ok(RateSnapshot::Live(cached));
        }

        let client = reqwest::Client::builder().user_agent("fxconv/1.0").build()?;
        match self.fetch_latest(&client, base).await {
            Ok(table) => {
                let table = Arc::new(table);
                self.cache.put(base.to_string(), Arc::clone(&table)).await;
                Ok(RateSnapshot::Live(table))
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch exchange rates, using approximate rates");
                Ok(RateSnapshot::Fallback(Arc::new(fallback_rates(base))))
            }
        }
    }

    async fn historical_rates(
        &self,
        from: &str,
        to: &str,
        days: u32,
    ) -> Result<Vec<HistoricalPoint>> {
        debug!("Generating {} days of synthetic rates for {}/{}", days, from, to);
        let today = self.clock.now().date_naive();
        synthetic_series(&mut rand::thread_rng(), today, days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::ManualClock;
    use chrono::{TimeZone, Utc};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USD_RESPONSE: &str = r#"{
        "base": "USD",
        "date": "2024-03-01",
        "time_last_updated": 1709251201,
        "rates": {
            "USD": 1,
            "EUR": 0.922,
            "GBP": 0.791,
            "BRL": 4.97
        }
    }"#;

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        ))
    }

    fn provider(server: &MockServer, clock: Arc<ManualClock>) -> ExchangeRateApiProvider {
        let cache = Arc::new(RateCache::new(rate_cache_ttl(), clock.clone()));
        ExchangeRateApiProvider::new(&server.uri(), cache, clock)
    }

    async fn mount(server: &MockServer, base: &str, template: ResponseTemplate, times: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/latest/{base}")))
            .respond_with(template)
            .expect(times)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let server = MockServer::start().await;
        mount(
            &server,
            "USD",
            ResponseTemplate::new(200).set_body_string(USD_RESPONSE),
            1,
        )
        .await;

        let snapshot = provider(&server, clock()).get_rates("USD").await.unwrap();
        assert!(!snapshot.is_fallback());
        assert_eq!(snapshot.table().get("EUR"), Some(0.922));
        assert_eq!(snapshot.table().get("USD"), Some(1.0));
        assert_eq!(snapshot.table().len(), 4);
    }

    #[tokio::test]
    async fn test_cache_hit_within_ttl() {
        let server = MockServer::start().await;
        mount(
            &server,
            "USD",
            ResponseTemplate::new(200).set_body_string(USD_RESPONSE),
            1,
        )
        .await;

        let clock = clock();
        let provider = provider(&server, clock.clone());
        let first = provider.get_rates("USD").await.unwrap();
        clock.advance(chrono::Duration::minutes(4));
        let second = provider.get_rates("USD").await.unwrap();

        assert!(Arc::ptr_eq(first.table(), second.table()));
        // `expect(1)` is verified when the server drops
    }

    #[tokio::test]
    async fn test_refetch_after_ttl() {
        let server = MockServer::start().await;
        mount(
            &server,
            "USD",
            ResponseTemplate::new(200).set_body_string(USD_RESPONSE),
            2,
        )
        .await;

        let clock = clock();
        let provider = provider(&server, clock.clone());
        let first = provider.get_rates("USD").await.unwrap();
        clock.advance(chrono::Duration::minutes(5));
        let second = provider.get_rates("USD").await.unwrap();

        assert!(!Arc::ptr_eq(first.table(), second.table()));
        assert_eq!(first.table(), second.table());
    }

    #[tokio::test]
    async fn test_cache_is_per_base() {
        let server = MockServer::start().await;
        mount(
            &server,
            "USD",
            ResponseTemplate::new(200).set_body_string(USD_RESPONSE),
            1,
        )
        .await;
        mount(
            &server,
            "EUR",
            ResponseTemplate::new(200)
                .set_body_string(r#"{"rates": {"EUR": 1, "USD": 1.085}}"#),
            1,
        )
        .await;

        let provider = provider(&server, clock());
        let usd = provider.get_rates("USD").await.unwrap();
        let eur = provider.get_rates("EUR").await.unwrap();
        let _ = provider.get_rates("USD").await.unwrap();
        let _ = provider.get_rates("EUR").await.unwrap();

        assert_eq!(usd.table().get("EUR"), Some(0.922));
        assert_eq!(eur.table().get("USD"), Some(1.085));
    }

    #[tokio::test]
    async fn test_server_error_returns_fallback() {
        let server = MockServer::start().await;
        mount(&server, "USD", ResponseTemplate::new(500), 2).await;

        let provider = provider(&server, clock());
        let snapshot = provider.get_rates("USD").await.unwrap();
        assert!(snapshot.is_fallback());
        assert_eq!(snapshot.table().get("EUR"), Some(0.85));
        assert_eq!(snapshot.table().get("ETH"), Some(0.00035));

        // Fallback tables are never cached
        let again = provider.get_rates("USD").await.unwrap();
        assert!(again.is_fallback());
    }

    #[tokio::test]
    async fn test_fallback_then_success_populates_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest/USD"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        mount(
            &server,
            "USD",
            ResponseTemplate::new(200).set_body_string(USD_RESPONSE),
            1,
        )
        .await;

        let provider = provider(&server, clock());
        assert!(provider.get_rates("USD").await.unwrap().is_fallback());

        let live = provider.get_rates("USD").await.unwrap();
        assert!(!live.is_fallback());
        let cached = provider.get_rates("USD").await.unwrap();
        assert!(Arc::ptr_eq(live.table(), cached.table()));
    }

    #[tokio::test]
    async fn test_malformed_response_returns_fallback() {
        let server = MockServer::start().await;
        mount(
            &server,
            "USD",
            ResponseTemplate::new(200).set_body_string(r#"{"result": "error"}"#),
            1,
        )
        .await;

        let snapshot = provider(&server, clock()).get_rates("USD").await.unwrap();
        assert!(snapshot.is_fallback());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_returns_fallback() {
        let clock = clock();
        let cache = Arc::new(RateCache::new(rate_cache_ttl(), clock.clone()));
        // Nothing listens on port 9 in the test environment
        let provider = ExchangeRateApiProvider::new("http://127.0.0.1:9", cache, clock);

        let snapshot = provider.get_rates("GBP").await.unwrap();
        assert!(snapshot.is_fallback());
        assert_eq!(snapshot.table().get("GBP"), Some(1.0));
        for (code, _) in crate::core::rates::FALLBACK_RATES {
            assert!(snapshot.table().contains(code));
        }
    }

    #[tokio::test]
    async fn test_empty_base_is_rejected() {
        let server = MockServer::start().await;
        let result = provider(&server, clock()).get_rates("").await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Base currency code must not be empty"
        );
    }

    #[tokio::test]
    async fn test_historical_rates_end_today() {
        let server = MockServer::start().await;
        let provider = provider(&server, clock());

        let series = provider.historical_rates("USD", "EUR", 30).await.unwrap();
        assert_eq!(series.len(), 31);
        assert_eq!(
            series.last().unwrap().date,
            chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        for pair in series.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, chrono::Duration::days(1));
        }
        assert!(series.iter().all(|p| p.rate > 0.0));

        let result = provider.historical_rates("USD", "EUR", u32::MAX).await;
        assert!(result.is_err());
    }
}
