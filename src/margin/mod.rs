//! Margin engine: pure functions from price quotes to bid/profit figures.
//! No state, no I/O; every output is a deterministic function of its inputs.
//!
//! Two "best platform" selections coexist on purpose: the basic check-price
//! path minimizes ask + fees and ignores shipping, while the advanced path
//! maximizes ask - fees - shipping. Both are published wire contracts; see
//! the notes on each function before touching either.

mod advanced;
mod auction;
mod basic;
mod quick;
mod risk;

pub use advanced::{
    calculate_detailed_margins, AdvancedAnalysis, BiddingRecommendation, PlatformAnalysis,
};
pub use auction::{calculate_auction_strategy, estimate_success_probability, AuctionStrategy};
pub use basic::{calculate_margins, calculate_margins_with_targets, NO_PRICES_AVAILABLE};
pub use quick::{quick_bid, QuickBid};
pub use risk::{
    calculate_market_comparison, calculate_risk_analysis, MarketComparison, RiskAnalysis,
    RiskReport,
};

/// Round to 2 decimal places. Applied only at the output boundary;
/// intermediate math keeps full precision.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Bid figures for a target multiplier against a net selling price.
/// Returns (max_bid, expected_profit, roi_percentage), unrounded.
/// A non-positive bid is clamped to 0 and zeroes the ROI rather than
/// emitting a negative bid or dividing by zero.
pub(crate) fn bid_figures(net_selling_price: f64, multiplier: f64) -> (f64, f64, f64) {
    let raw_bid = if multiplier > 0.0 {
        net_selling_price / multiplier
    } else {
        0.0
    };
    let max_bid = if raw_bid > 0.0 { raw_bid } else { 0.0 };
    let expected_profit = net_selling_price - max_bid;
    let roi_percentage = if max_bid > 0.0 {
        expected_profit / max_bid * 100.0
    } else {
        0.0
    };
    (max_bid, expected_profit, roi_percentage)
}
