//! Advanced margin analysis for the /advanced-analysis path.
//! Best platform here maximizes net proceeds (ask - fees - shipping),
//! unlike the basic checker's lowest-cost selection.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::config::ADVANCED_TARGET_MULTIPLIERS;
use crate::types::{Platform, PriceQuote};

use super::auction::calculate_auction_strategy;
use super::risk::{calculate_market_comparison, calculate_risk_analysis};
use super::{bid_figures, round2, AuctionStrategy, MarketComparison, RiskReport};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct PlatformAnalysis {
    pub ask_price: f64,
    pub fees: f64,
    pub shipping: f64,
    /// ask - fees - shipping.
    pub net_selling_price: f64,
    pub total_costs: f64,
    pub profit_margin_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BiddingRecommendation {
    pub target_multiplier: f64,
    pub max_bid: f64,
    pub expected_profit: f64,
    pub roi_percentage: f64,
    pub break_even_bid: f64,
}

#[derive(Debug, Serialize)]
pub struct AdvancedAnalysis {
    pub platform_analysis: BTreeMap<Platform, PlatformAnalysis>,
    pub best_platform: Platform,
    pub best_net_price: f64,
    pub bidding_recommendations: Vec<BiddingRecommendation>,
    pub risk_analysis: RiskReport,
    pub market_comparison: MarketComparison,
    pub auction_strategy: AuctionStrategy,
    pub timestamp: u64,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Full margin analysis over the available quotes. Returns `None` when no
/// platform has a price — a data condition the caller reports in-band.
/// Internal math keeps full precision; rounding happens on the output structs.
pub fn calculate_detailed_margins(
    quotes: &[PriceQuote],
    custom_targets: Option<&[f64]>,
    auction_time_remaining: u32,
) -> Option<AdvancedAnalysis> {
    let targets = custom_targets.unwrap_or(ADVANCED_TARGET_MULTIPLIERS);

    // (platform, analysis) in input order; selection ties go to first-seen.
    let analyses: Vec<(Platform, PlatformAnalysis)> = quotes
        .iter()
        .filter(|q| q.available)
        .map(|q| (q.platform, analyze_platform(q)))
        .collect();

    let first = analyses.first()?;
    let mut best_platform = first.0;
    let mut best_net_price = first.1.net_selling_price;
    for (platform, analysis) in &analyses[1..] {
        if analysis.net_selling_price > best_net_price {
            best_platform = *platform;
            best_net_price = analysis.net_selling_price;
        }
    }

    let bidding_recommendations = targets
        .iter()
        .map(|&target_multiplier| {
            let (max_bid, expected_profit, roi_percentage) =
                bid_figures(best_net_price, target_multiplier);
            BiddingRecommendation {
                target_multiplier,
                max_bid: round2(max_bid),
                expected_profit: round2(expected_profit),
                roi_percentage: round2(roi_percentage),
                break_even_bid: round2(best_net_price),
            }
        })
        .collect();

    let net_prices: Vec<f64> = analyses.iter().map(|(_, a)| a.net_selling_price).collect();
    let risk_analysis = calculate_risk_analysis(&net_prices);
    let market_comparison = calculate_market_comparison(&analyses);
    let auction_strategy = calculate_auction_strategy(best_net_price, auction_time_remaining);

    let platform_analysis = analyses
        .into_iter()
        .map(|(platform, a)| (platform, rounded(a)))
        .collect();

    Some(AdvancedAnalysis {
        platform_analysis,
        best_platform,
        best_net_price: round2(best_net_price),
        bidding_recommendations,
        risk_analysis,
        market_comparison,
        auction_strategy,
        timestamp: now_secs(),
    })
}

fn analyze_platform(quote: &PriceQuote) -> PlatformAnalysis {
    let net_selling_price = quote.lowest_ask - quote.fees - quote.shipping;
    let profit_margin_percentage = if quote.lowest_ask > 0.0 {
        net_selling_price / quote.lowest_ask * 100.0
    } else {
        0.0
    };

    PlatformAnalysis {
        ask_price: quote.lowest_ask,
        fees: quote.fees,
        shipping: quote.shipping,
        net_selling_price,
        total_costs: quote.fees + quote.shipping,
        profit_margin_percentage,
    }
}

fn rounded(a: PlatformAnalysis) -> PlatformAnalysis {
    PlatformAnalysis {
        ask_price: round2(a.ask_price),
        fees: round2(a.fees),
        shipping: round2(a.shipping),
        net_selling_price: round2(a.net_selling_price),
        total_costs: round2(a.total_costs),
        profit_margin_percentage: round2(a.profit_margin_percentage),
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
