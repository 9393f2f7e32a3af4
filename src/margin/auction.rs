use serde::Serialize;

use super::{bid_figures, round2};

// ---------------------------------------------------------------------------
// Strategy bands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Conservative,
    Moderate,
    Aggressive,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyBand {
    pub max_bid: f64,
    pub expected_profit: f64,
    pub target_multiplier: f64,
    pub description: &'static str,
    pub success_probability: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategySet {
    pub conservative: StrategyBand,
    pub moderate: StrategyBand,
    pub aggressive: StrategyBand,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuctionStrategy {
    pub strategies: StrategySet,
    pub recommended_strategy: StrategyKind,
    pub urgency_note: &'static str,
    pub auction_time_remaining: u32,
}

/// Heuristic odds that a resale hits the target multiple.
/// Higher targets are harder to clear.
pub fn estimate_success_probability(target_multiplier: f64) -> f64 {
    if target_multiplier >= 3.0 {
        60.0
    } else if target_multiplier >= 2.5 {
        75.0
    } else if target_multiplier >= 2.0 {
        85.0
    } else if target_multiplier >= 1.5 {
        95.0
    } else {
        98.0
    }
}

fn band(net_selling_price: f64, target_multiplier: f64, description: &'static str) -> StrategyBand {
    let (max_bid, expected_profit, _roi) = bid_figures(net_selling_price, target_multiplier);
    StrategyBand {
        max_bid: round2(max_bid),
        expected_profit: round2(expected_profit),
        target_multiplier,
        description,
        success_probability: estimate_success_probability(target_multiplier),
    }
}

/// Three fixed bidding bands plus a recommendation driven by how much
/// auction time is left (minutes): <=5 aggressive, <=15 moderate,
/// otherwise conservative.
pub fn calculate_auction_strategy(
    net_selling_price: f64,
    auction_time_remaining: u32,
) -> AuctionStrategy {
    let strategies = StrategySet {
        conservative: band(net_selling_price, 2.5, "Low risk, high profit margin"),
        moderate: band(net_selling_price, 2.0, "Balanced risk and profit"),
        aggressive: band(net_selling_price, 1.5, "Higher risk, faster turnover"),
    };

    let (recommended_strategy, urgency_note) = if auction_time_remaining <= 5 {
        (
            StrategyKind::Aggressive,
            "Limited time - consider aggressive bidding",
        )
    } else if auction_time_remaining <= 15 {
        (
            StrategyKind::Moderate,
            "Moderate time remaining - balanced approach recommended",
        )
    } else {
        (
            StrategyKind::Conservative,
            "Plenty of time - can afford to be conservative",
        )
    };

    AuctionStrategy {
        strategies,
        recommended_strategy,
        urgency_note,
        auction_time_remaining,
    }
}
