use serde::Serialize;

use crate::types::{Platform, RiskLevel};

use super::{round2, PlatformAnalysis};

pub const INSUFFICIENT_DATA: &str = "Insufficient data for risk analysis";

// ---------------------------------------------------------------------------
// Risk analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RiskAnalysis {
    pub price_spread: f64,
    pub price_spread_percentage: f64,
    /// Population standard deviation of net prices.
    pub volatility: f64,
    pub risk_level: RiskLevel,
    pub confidence_score: f64,
}

/// Risk analysis needs at least two platforms; with fewer the payload is an
/// explicit insufficient-data marker, not an error.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RiskReport {
    Analyzed(RiskAnalysis),
    Insufficient { error: String },
}

/// Cross-platform dispersion of net selling prices.
pub fn calculate_risk_analysis(net_prices: &[f64]) -> RiskReport {
    if net_prices.len() < 2 {
        return RiskReport::Insufficient {
            error: INSUFFICIENT_DATA.to_string(),
        };
    }

    let n = net_prices.len() as f64;
    let mean = net_prices.iter().sum::<f64>() / n;
    let variance = net_prices.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / n;
    let std_deviation = variance.sqrt();

    let max = net_prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = net_prices.iter().cloned().fold(f64::INFINITY, f64::min);
    let price_spread = max - min;
    let price_spread_percentage = if mean > 0.0 {
        price_spread / mean * 100.0
    } else {
        0.0
    };

    RiskReport::Analyzed(RiskAnalysis {
        price_spread: round2(price_spread),
        price_spread_percentage: round2(price_spread_percentage),
        volatility: round2(std_deviation),
        risk_level: RiskLevel::from_spread_percentage(price_spread_percentage),
        confidence_score: (100.0 - price_spread_percentage).max(0.0),
    })
}

// ---------------------------------------------------------------------------
// Market comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct MarketComparison {
    /// Platforms ranked by net selling price, best first.
    pub platform_ranking: Vec<Platform>,
    pub best_platform: Platform,
    pub worst_platform: Platform,
    pub price_advantage: f64,
    pub price_advantage_percentage: f64,
    pub recommendation: String,
}

/// Rank platforms by net proceeds and quantify the best-vs-worst gap.
/// The sort is stable, so equal net prices keep input order.
pub fn calculate_market_comparison(analyses: &[(Platform, PlatformAnalysis)]) -> MarketComparison {
    let mut ranked: Vec<(Platform, f64)> = analyses
        .iter()
        .map(|(p, a)| (*p, a.net_selling_price))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let (best_platform, best_price) = ranked[0];
    let (worst_platform, worst_price) = *ranked.last().expect("non-empty analyses");

    let price_advantage = best_price - worst_price;
    let price_advantage_percentage = if worst_price > 0.0 {
        price_advantage / worst_price * 100.0
    } else {
        0.0
    };

    MarketComparison {
        platform_ranking: ranked.iter().map(|(p, _)| *p).collect(),
        best_platform,
        worst_platform,
        price_advantage: round2(price_advantage),
        price_advantage_percentage: round2(price_advantage_percentage),
        recommendation: format!("Sell on {best_platform} for ${price_advantage:.2} more profit"),
    }
}
