use serde::Serialize;

use super::{bid_figures, round2};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickBid {
    pub selling_price: f64,
    pub fees: f64,
    pub shipping_cost: f64,
    pub net_selling_price: f64,
    pub max_bid: f64,
    pub expected_profit: f64,
    pub roi_percentage: f64,
    pub target_multiplier: f64,
}

/// Single-platform bid calculation for live auctions.
/// Pure function of its inputs; identical inputs yield identical outputs.
pub fn quick_bid(
    selling_price: f64,
    target_multiplier: f64,
    fee_rate: f64,
    shipping_cost: f64,
) -> QuickBid {
    let fees = selling_price * fee_rate;
    let net_selling_price = selling_price - fees - shipping_cost;
    let (max_bid, expected_profit, roi_percentage) =
        bid_figures(net_selling_price, target_multiplier);

    QuickBid {
        selling_price,
        fees: round2(fees),
        shipping_cost,
        net_selling_price: round2(net_selling_price),
        max_bid: round2(max_bid),
        expected_profit: round2(expected_profit),
        roi_percentage: round2(roi_percentage),
        target_multiplier,
    }
}
