//! Basic margin recommendations for the check-price path.
//!
//! Historical wire contract: the best platform here is the one with the
//! lowest ask + fees, shipping excluded, and the multiplier figures are
//! flattened into `max_bid_1_5x`-style keys. The advanced engine selects
//! by highest net proceeds instead; the two deliberately disagree.

use serde_json::{json, Map, Value};

use crate::config::BASIC_TARGET_MULTIPLIERS;
use crate::types::PriceQuote;

use super::{bid_figures, round2};

pub const NO_PRICES_AVAILABLE: &str = "No prices available";

/// Recommendations with the default {1.5, 2.0} targets.
pub fn calculate_margins(quotes: &[PriceQuote]) -> Value {
    calculate_margins_with_targets(quotes, BASIC_TARGET_MULTIPLIERS)
}

/// Margin recommendations from the available quotes, or
/// `{"error": "No prices available"}` when every platform failed.
pub fn calculate_margins_with_targets(quotes: &[PriceQuote], targets: &[f64]) -> Value {
    let available: Vec<&PriceQuote> = quotes.iter().filter(|q| q.available).collect();

    let Some(&first) = available.first() else {
        return json!({ "error": NO_PRICES_AVAILABLE });
    };

    // Lowest acquisition cost (ask + fees); first-seen wins ties.
    let mut best = first;
    for &q in &available[1..] {
        if q.lowest_ask + q.fees < best.lowest_ask + best.fees {
            best = q;
        }
    }

    let net_selling_price = best.lowest_ask - best.fees;

    let mut rec = Map::new();
    rec.insert("best_platform".to_string(), json!(best.platform));
    rec.insert("best_price".to_string(), json!(best.lowest_ask));
    rec.insert("best_fees".to_string(), json!(best.fees));
    rec.insert("net_selling_price".to_string(), json!(net_selling_price));

    for &multiplier in targets {
        let (max_bid, expected_profit, roi_percentage) =
            bid_figures(net_selling_price, multiplier);
        let key = multiplier_key(multiplier);
        rec.insert(format!("max_bid_{key}x"), json!(round2(max_bid)));
        rec.insert(
            format!("expected_profit_{key}x"),
            json!(round2(expected_profit)),
        );
        rec.insert(format!("roi_{key}x"), json!(round2(roi_percentage)));
    }

    Value::Object(rec)
}

/// "1.5" -> "1_5", "2.0" -> "2_0" (whole numbers keep one decimal).
fn multiplier_key(multiplier: f64) -> String {
    let s = if multiplier == multiplier.trunc() {
        format!("{multiplier:.1}")
    } else {
        multiplier.to_string()
    };
    s.replace('.', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Platform;

    fn quote(platform: Platform, lowest_ask: f64, fees: f64) -> PriceQuote {
        PriceQuote {
            platform,
            lowest_ask,
            fees,
            shipping: platform.shipping_cost(),
            available: true,
            error: None,
            response_time: 0.5,
        }
    }

    #[test]
    fn no_available_quotes_reports_error() {
        let quotes = vec![PriceQuote::unavailable(
            Platform::Stockx,
            "timeout".to_string(),
        )];
        let rec = calculate_margins(&quotes);
        assert_eq!(rec["error"], NO_PRICES_AVAILABLE);
    }

    #[test]
    fn best_platform_minimizes_ask_plus_fees() {
        // stockx 492.75, goat 509.18, kickscrew 475.20 -> kickscrew wins
        let quotes = vec![
            quote(Platform::Stockx, 450.0, 42.75),
            quote(Platform::Goat, 465.0, 44.18),
            quote(Platform::Kickscrew, 440.0, 35.20),
        ];
        let rec = calculate_margins(&quotes);
        assert_eq!(rec["best_platform"], "kickscrew");
        assert_eq!(rec["best_price"], 440.0);
        assert_eq!(rec["best_fees"], 35.20);
        // unrounded: 440 - 35.20 in binary floats
        assert_eq!(rec["net_selling_price"], 440.0 - 35.20);
    }

    #[test]
    fn multiplier_keys_are_flattened() {
        let quotes = vec![quote(Platform::Kickscrew, 440.0, 35.20)];
        let rec = calculate_margins(&quotes);
        // net 404.8: 1.5x bid 269.87, 2.0x bid 202.4
        assert_eq!(rec["max_bid_1_5x"], 269.87);
        assert_eq!(rec["expected_profit_1_5x"], 134.93);
        assert_eq!(rec["roi_1_5x"], 50.0);
        assert_eq!(rec["max_bid_2_0x"], 202.4);
        assert_eq!(rec["expected_profit_2_0x"], 202.4);
        assert_eq!(rec["roi_2_0x"], 100.0);
    }

    #[test]
    fn unavailable_quotes_are_excluded_from_selection() {
        let mut cheap = quote(Platform::Kickscrew, 100.0, 8.0);
        cheap.available = false;
        let quotes = vec![cheap, quote(Platform::Stockx, 450.0, 42.75)];
        let rec = calculate_margins(&quotes);
        assert_eq!(rec["best_platform"], "stockx");
    }

    #[test]
    fn tie_broken_by_first_seen() {
        let quotes = vec![
            quote(Platform::Goat, 400.0, 40.0),
            quote(Platform::Kickscrew, 400.0, 40.0),
        ];
        let rec = calculate_margins(&quotes);
        assert_eq!(rec["best_platform"], "goat");
    }
}
