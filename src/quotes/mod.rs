//! Quote aggregation: fan out one fetch per marketplace, wait for all of
//! them to settle, and tolerate partial failure. A failed fetch becomes an
//! `available: false` quote; it never aborts the sibling fetches.

mod goat;
mod kickscrew;
mod stockx;

pub use goat::GoatFetcher;
pub use kickscrew::KickscrewFetcher;
pub use stockx::StockxFetcher;

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::margin::round2;
use crate::types::{Platform, PriceQuote};

/// One marketplace integration. Implementations own whatever the live call
/// needs (HTTP client, API key, headers); swapping a stub for a real client
/// must not change this contract.
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    fn platform(&self) -> Platform;

    /// Fetch the lowest ask for a product/size on this marketplace.
    async fn fetch_quote(&self, product_name: &str, size: &str) -> Result<PriceQuote>;
}

pub struct QuoteAggregator {
    fetchers: Vec<Arc<dyn QuoteFetcher>>,
}

impl QuoteAggregator {
    pub fn new(fetchers: Vec<Arc<dyn QuoteFetcher>>) -> Self {
        Self { fetchers }
    }

    /// Build the standard three-marketplace set from config.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Self::new(vec![
            Arc::new(StockxFetcher::new(cfg.stockx_api_key.clone())?),
            Arc::new(GoatFetcher::new()?),
            Arc::new(KickscrewFetcher::new(cfg.kickscrew_api_key.clone())?),
        ]))
    }

    /// Number of configured marketplaces.
    pub fn len(&self) -> usize {
        self.fetchers.len()
    }

    /// Fan out one fetch per marketplace and wait for every one to settle.
    /// Overall latency is the slowest fetch, not the sum. Quotes come back in
    /// fetcher registration order with their measured fetch time attached.
    pub async fn fetch_all(&self, product_name: &str, size: &str) -> Vec<PriceQuote> {
        let futures = self.fetchers.iter().map(|fetcher| {
            let fetcher = Arc::clone(fetcher);
            async move {
                let platform = fetcher.platform();
                let started = Instant::now();
                match fetcher.fetch_quote(product_name, size).await {
                    Ok(mut quote) => {
                        quote.response_time = round2(started.elapsed().as_secs_f64());
                        debug!(
                            platform = %platform,
                            lowest_ask = quote.lowest_ask,
                            response_time = quote.response_time,
                            "quote received"
                        );
                        quote
                    }
                    Err(e) => {
                        warn!(platform = %platform, error = %e, "quote fetch failed");
                        PriceQuote::unavailable(platform, e.to_string())
                    }
                }
            }
        });

        join_all(futures).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    struct StaticFetcher {
        platform: Platform,
        lowest_ask: f64,
    }

    #[async_trait]
    impl QuoteFetcher for StaticFetcher {
        fn platform(&self) -> Platform {
            self.platform
        }

        async fn fetch_quote(&self, _product_name: &str, _size: &str) -> Result<PriceQuote> {
            Ok(PriceQuote {
                platform: self.platform,
                lowest_ask: self.lowest_ask,
                fees: self.lowest_ask * self.platform.fee_percentage() / 100.0,
                shipping: self.platform.shipping_cost(),
                available: true,
                error: None,
                response_time: 0.0,
            })
        }
    }

    struct FailingFetcher {
        platform: Platform,
    }

    #[async_trait]
    impl QuoteFetcher for FailingFetcher {
        fn platform(&self) -> Platform {
            self.platform
        }

        async fn fetch_quote(&self, _product_name: &str, _size: &str) -> Result<PriceQuote> {
            Err(AppError::Marketplace("simulated outage".to_string()))
        }
    }

    #[tokio::test]
    async fn fan_in_preserves_registration_order() {
        let agg = QuoteAggregator::new(vec![
            Arc::new(StaticFetcher {
                platform: Platform::Stockx,
                lowest_ask: 450.0,
            }),
            Arc::new(StaticFetcher {
                platform: Platform::Goat,
                lowest_ask: 465.0,
            }),
            Arc::new(StaticFetcher {
                platform: Platform::Kickscrew,
                lowest_ask: 440.0,
            }),
        ]);

        let quotes = agg.fetch_all("nike dunk low", "10").await;
        let platforms: Vec<Platform> = quotes.iter().map(|q| q.platform).collect();
        assert_eq!(
            platforms,
            vec![Platform::Stockx, Platform::Goat, Platform::Kickscrew]
        );
        assert!(quotes.iter().all(|q| q.available));
        assert!(quotes.iter().all(|q| q.response_time >= 0.0));
    }

    #[tokio::test]
    async fn failure_becomes_unavailable_quote_without_aborting_siblings() {
        let agg = QuoteAggregator::new(vec![
            Arc::new(StaticFetcher {
                platform: Platform::Stockx,
                lowest_ask: 450.0,
            }),
            Arc::new(FailingFetcher {
                platform: Platform::Goat,
            }),
        ]);

        let quotes = agg.fetch_all("nike dunk low", "10").await;
        assert_eq!(quotes.len(), 2);
        assert!(quotes[0].available);
        assert!(!quotes[1].available);
        let err = quotes[1].error.as_deref().unwrap();
        assert!(err.contains("simulated outage"));
    }

    #[tokio::test]
    async fn all_failures_yield_zero_available_quotes() {
        let agg = QuoteAggregator::new(vec![
            Arc::new(FailingFetcher {
                platform: Platform::Stockx,
            }),
            Arc::new(FailingFetcher {
                platform: Platform::Goat,
            }),
        ]);

        let quotes = agg.fetch_all("yeezy 350", "9").await;
        assert_eq!(quotes.len(), 2);
        assert!(quotes.iter().all(|q| !q.available));
    }
}
