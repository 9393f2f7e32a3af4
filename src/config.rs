use crate::error::{AppError, Result};

/// Service identifier reported by /api/health.
pub const SERVICE_NAME: &str = "solecheck-price-checker";

/// Target multipliers used by the basic check-price recommendations.
pub const BASIC_TARGET_MULTIPLIERS: &[f64] = &[1.5, 2.0];

/// Default target multipliers for advanced analysis when the caller
/// does not supply custom_targets.
pub const ADVANCED_TARGET_MULTIPLIERS: &[f64] = &[1.25, 1.5, 1.75, 2.0, 2.5, 3.0];

/// Auction time remaining (minutes) assumed when the caller omits it.
pub const DEFAULT_AUCTION_TIME_REMAINING: u32 = 10;

/// Quick-bid-calc fallbacks: 9.5% fee, domestic shipping.
pub const DEFAULT_QUICK_FEE_RATE: f64 = 0.095;
pub const DEFAULT_QUICK_SHIPPING_COST: f64 = 15.0;
pub const DEFAULT_QUICK_TARGET_MULTIPLIER: f64 = 2.0;

/// Timeout for outbound marketplace HTTP calls (seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Risk-level thresholds on cross-platform net-price spread (% of mean).
pub mod risk_thresholds {
    pub const LOW_MAX_SPREAD_PCT: f64 = 5.0;
    pub const MEDIUM_MAX_SPREAD_PCT: f64 = 15.0;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub api_port: u16,
    /// RapidAPI key for the StockX pricing service (STOCKX_API_KEY).
    /// Falls back to the demo key when unset.
    pub stockx_api_key: Option<String>,
    /// RapidAPI key for the KicksCrew data service (KICKSCREW_API_KEY).
    pub kickscrew_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            stockx_api_key: std::env::var("STOCKX_API_KEY").ok().filter(|k| !k.is_empty()),
            kickscrew_api_key: std::env::var("KICKSCREW_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
        })
    }
}
