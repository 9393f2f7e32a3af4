mod api;
mod config;
mod error;
mod margin;
mod product;
mod quotes;
mod types;

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::latency::LatencyStats;
use crate::api::routes::{router, ApiState};
use crate::config::Config;
use crate::error::Result;
use crate::quotes::QuoteAggregator;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    if cfg.stockx_api_key.is_none() {
        warn!("STOCKX_API_KEY not set, StockX fetcher will use the demo key");
    }
    if cfg.kickscrew_api_key.is_none() {
        warn!("KICKSCREW_API_KEY not set, KicksCrew fetcher will use the demo key");
    }

    let aggregator = Arc::new(QuoteAggregator::from_config(&cfg)?);
    info!("Quote aggregator ready ({} marketplaces)", aggregator.len());

    let state = ApiState {
        aggregator,
        latency: Arc::new(LatencyStats::new()),
    };
    let app = router(state);

    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
