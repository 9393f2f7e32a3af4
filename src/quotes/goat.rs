use std::time::Duration;

use async_trait::async_trait;

use crate::config::FETCH_TIMEOUT_SECS;
use crate::error::{AppError, Result};
use crate::types::{Platform, PriceQuote};

use super::QuoteFetcher;

const MOBILE_API_URL: &str = "https://www.goat.com/api/v1/product_variants";
/// The mobile API rejects requests without an app user-agent.
const MOBILE_USER_AGENT: &str = "GOAT/19 CFNetwork/1410.0.3 Darwin/22.6.0";
const EMBRACE_ID: &str = "7E2DEE62833C40A0B733085027D1A5BC";

/// Simulated GOAT response latency — the slowest of the three stubs.
const MOCK_LATENCY: Duration = Duration::from_millis(700);
const MOCK_LOWEST_ASK: f64 = 465.0;
/// 9.5% of the mock ask.
const MOCK_FEES: f64 = 44.18;

/// GOAT price lookup through the unauthenticated mobile API endpoints.
/// Stubbed the same way as the other fetchers.
pub struct GoatFetcher {
    client: reqwest::Client,
}

impl GoatFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl QuoteFetcher for GoatFetcher {
    fn platform(&self) -> Platform {
        Platform::Goat
    }

    async fn fetch_quote(&self, product_name: &str, size: &str) -> Result<PriceQuote> {
        if product_name.trim().is_empty() {
            return Err(AppError::Marketplace("empty product query".to_string()));
        }

        // Not dispatched while stubbed.
        let _request = self
            .client
            .get(MOBILE_API_URL)
            .header("user-agent", MOBILE_USER_AGENT)
            .header("x-emb-id", EMBRACE_ID)
            .header("accept", "application/json")
            .query(&[("query", product_name), ("size", size)])
            .build()?;

        tokio::time::sleep(MOCK_LATENCY).await;

        Ok(PriceQuote {
            platform: Platform::Goat,
            lowest_ask: MOCK_LOWEST_ASK,
            fees: MOCK_FEES,
            shipping: Platform::Goat.shipping_cost(),
            available: true,
            error: None,
            response_time: 0.0,
        })
    }
}
