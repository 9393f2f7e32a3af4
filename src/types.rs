use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Stockx,
    Goat,
    Kickscrew,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Stockx, Platform::Goat, Platform::Kickscrew];

    pub fn id(&self) -> &'static str {
        match self {
            Platform::Stockx => "stockx",
            Platform::Goat => "goat",
            Platform::Kickscrew => "kickscrew",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Stockx => "StockX",
            Platform::Goat => "GOAT",
            Platform::Kickscrew => "KicksCrew",
        }
    }

    /// Seller fee as a percentage of the ask price.
    pub fn fee_percentage(&self) -> f64 {
        match self {
            Platform::Stockx | Platform::Goat => 9.5,
            Platform::Kickscrew => 8.0,
        }
    }

    /// Flat shipping cost charged to the seller. KicksCrew ships internationally.
    pub fn shipping_cost(&self) -> f64 {
        match self {
            Platform::Stockx | Platform::Goat => 15.0,
            Platform::Kickscrew => 20.0,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ---------------------------------------------------------------------------
// Product condition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    #[default]
    New,
    Used,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Condition::New => "new",
            Condition::Used => "used",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// One marketplace's answer for a product, produced once per aggregation call.
/// A failed fetch still yields a quote with `available: false` and the error
/// message so the response can show what went wrong per platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    pub platform: Platform,
    pub lowest_ask: f64,
    pub fees: f64,
    pub shipping: f64,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Measured fetch duration in seconds.
    pub response_time: f64,
}

impl PriceQuote {
    pub fn unavailable(platform: Platform, error: String) -> Self {
        Self {
            platform,
            lowest_ask: 0.0,
            fees: 0.0,
            shipping: platform.shipping_cost(),
            available: false,
            error: Some(error),
            response_time: 0.0,
        }
    }
}

/// Input to a price check. Never stored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductQuery {
    pub name: String,
    pub size: String,
    #[serde(default)]
    pub condition: Condition,
}

// ---------------------------------------------------------------------------
// Risk level
// ---------------------------------------------------------------------------

/// Coarse risk bucket derived from cross-platform net-price spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_spread_percentage(pct: f64) -> Self {
        use crate::config::risk_thresholds::*;
        if pct < LOW_MAX_SPREAD_PCT {
            RiskLevel::Low
        } else if pct < MEDIUM_MAX_SPREAD_PCT {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Platform::Kickscrew).unwrap(),
            "\"kickscrew\""
        );
        let p: Platform = serde_json::from_str("\"goat\"").unwrap();
        assert_eq!(p, Platform::Goat);
    }

    #[test]
    fn risk_level_thresholds() {
        assert_eq!(RiskLevel::from_spread_percentage(3.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_spread_percentage(5.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_spread_percentage(14.9), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_spread_percentage(18.5), RiskLevel::High);
    }

    #[test]
    fn condition_defaults_to_new() {
        assert_eq!(Condition::default(), Condition::New);
    }
}
