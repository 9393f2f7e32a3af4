use std::time::Duration;

use async_trait::async_trait;

use crate::config::FETCH_TIMEOUT_SECS;
use crate::error::{AppError, Result};
use crate::types::{Platform, PriceQuote};

use super::QuoteFetcher;

const RAPIDAPI_HOST: &str = "stockx-pricing-data-and-market-analytics.p.rapidapi.com";
const DEMO_API_KEY: &str = "demo_key";

/// Simulated StockX response latency.
const MOCK_LATENCY: Duration = Duration::from_millis(500);
const MOCK_LOWEST_ASK: f64 = 450.0;
/// 9.5% of the mock ask.
const MOCK_FEES: f64 = 42.75;

/// StockX price lookup via the RapidAPI pricing-data service.
/// Currently a stub: the request is built exactly as the live integration
/// will send it, but instead of dispatching we sleep for a realistic
/// latency and return canned market data.
pub struct StockxFetcher {
    client: reqwest::Client,
    api_key: String,
}

impl StockxFetcher {
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
impl QuoteFetcher for StockxFetcher {
    fn platform(&self) -> Platform {
        Platform::Stockx
    }

    async fn fetch_quote(&self, product_name: &str, size: &str) -> Result<PriceQuote> {
        if product_name.trim().is_empty() {
            return Err(AppError::Marketplace("empty product query".to_string()));
        }

        // Not dispatched while stubbed.
        let _request = self
            .client
            .get(format!("https://{RAPIDAPI_HOST}/product/lowest-ask"))
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .query(&[("query", product_name), ("size", size)])
            .build()?;

        tokio::time::sleep(MOCK_LATENCY).await;

        Ok(PriceQuote {
            platform: Platform::Stockx,
            lowest_ask: MOCK_LOWEST_ASK,
            fees: MOCK_FEES,
            shipping: Platform::Stockx.shipping_cost(),
            available: true,
            error: None,
            response_time: 0.0,
        })
    }
}
