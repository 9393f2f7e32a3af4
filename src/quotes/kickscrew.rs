use std::time::Duration;

use async_trait::async_trait;

use crate::config::FETCH_TIMEOUT_SECS;
use crate::error::{AppError, Result};
use crate::types::{Platform, PriceQuote};

use super::QuoteFetcher;

const RAPIDAPI_HOST: &str = "kickscrew-sneakers-data.p.rapidapi.com";
const DEMO_API_KEY: &str = "demo_key";

/// Simulated KicksCrew response latency — the fastest of the three stubs.
const MOCK_LATENCY: Duration = Duration::from_millis(300);
const MOCK_LOWEST_ASK: f64 = 440.0;
/// 8% of the mock ask.
const MOCK_FEES: f64 = 35.20;

/// KicksCrew price lookup via the RapidAPI sneaker-data service.
/// Stubbed the same way as the other fetchers.
pub struct KickscrewFetcher {
    client: reqwest::Client,
    api_key: String,
}

impl KickscrewFetcher {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.unwrap_or_else(|| DEMO_API_KEY.to_string()),
        })
    }
}

#[async_trait]
impl QuoteFetcher for KickscrewFetcher {
    fn platform(&self) -> Platform {
        Platform::Kickscrew
    }

    async fn fetch_quote(&self, product_name: &str, size: &str) -> Result<PriceQuote> {
        if product_name.trim().is_empty() {
            return Err(AppError::Marketplace("empty product query".to_string()));
        }

        // Not dispatched while stubbed.
        let _request = self
            .client
            .get(format!("https://{RAPIDAPI_HOST}/product/price"))
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .query(&[("query", product_name), ("size", size)])
            .build()?;

        tokio::time::sleep(MOCK_LATENCY).await;

        Ok(PriceQuote {
            platform: Platform::Kickscrew,
            lowest_ask: MOCK_LOWEST_ASK,
            fees: MOCK_FEES,
            shipping: Platform::Kickscrew.shipping_cost(),
            available: true,
            error: None,
            response_time: 0.0,
        })
    }
}
