use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::api::latency::{LatencySnapshot, LatencyStats};
use crate::config::{
    DEFAULT_AUCTION_TIME_REMAINING, DEFAULT_QUICK_FEE_RATE, DEFAULT_QUICK_SHIPPING_COST,
    DEFAULT_QUICK_TARGET_MULTIPLIER, SERVICE_NAME,
};
use crate::error::{AppError, Result};
use crate::margin;
use crate::product::parse_product_input;
use crate::quotes::QuoteAggregator;
use crate::types::{Condition, Platform, PriceQuote, ProductQuery};

#[derive(Clone)]
pub struct ApiState {
    pub aggregator: Arc<QuoteAggregator>,
    pub latency: Arc<LatencyStats>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/check-price", post(check_price))
        .route("/api/platforms", get(get_platforms))
        .route("/api/stats/latency", get(latency_stats))
        .route("/advanced-analysis", post(advanced_analysis))
        .route("/quick-bid-calc", post(quick_bid_calc))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request/response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: u64,
}

#[derive(Default, Deserialize)]
pub struct CheckPriceRequest {
    pub product_name: Option<String>,
    pub size: Option<String>,
    pub condition: Option<Condition>,
}

#[derive(Serialize)]
pub struct ProductInfo {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub size: String,
    pub condition: Condition,
}

#[derive(Serialize)]
pub struct CheckPriceResponse {
    pub success: bool,
    /// Total handling time, e.g. "0.71s".
    pub response_time: String,
    pub product: ProductInfo,
    pub prices: BTreeMap<Platform, PriceQuote>,
    pub recommendations: Value,
    pub timestamp: u64,
}

#[derive(Serialize)]
pub struct PlatformInfo {
    pub name: &'static str,
    pub id: &'static str,
    pub fee_percentage: f64,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct PlatformsResponse {
    pub platforms: Vec<PlatformInfo>,
}

#[derive(Default, Deserialize)]
pub struct AdvancedAnalysisRequest {
    pub prices: Option<BTreeMap<Platform, PriceInput>>,
    pub custom_targets: Option<Vec<f64>>,
    pub auction_time_remaining: Option<u32>,
}

#[derive(Deserialize)]
pub struct PriceInput {
    #[serde(default)]
    pub lowest_ask: f64,
    #[serde(default)]
    pub fees: f64,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Serialize)]
pub struct AdvancedAnalysisResponse {
    pub success: bool,
    pub analysis: Value,
}

#[derive(Default, Deserialize)]
pub struct QuickBidRequest {
    pub selling_price: Option<f64>,
    pub target_multiplier: Option<f64>,
    pub platform_fees: Option<f64>,
    pub shipping_cost: Option<f64>,
}

#[derive(Serialize)]
pub struct QuickBidResponse {
    pub success: bool,
    #[serde(flatten)]
    pub calc: margin::QuickBid,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        timestamp: now_secs(),
    })
}

async fn check_price(
    State(state): State<ApiState>,
    Json(req): Json<CheckPriceRequest>,
) -> Result<Json<CheckPriceResponse>> {
    let started = Instant::now();
    let query = validate_check_price(req)?;

    let parsed = parse_product_input(&query.name);
    let quotes = state.aggregator.fetch_all(&query.name, &query.size).await;
    let recommendations = margin::calculate_margins(&quotes);

    let elapsed = started.elapsed();
    state.latency.record(elapsed);
    info!(
        product = %parsed.normalized,
        size = %query.size,
        quotes = quotes.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "price check complete"
    );

    Ok(Json(CheckPriceResponse {
        success: true,
        response_time: format!("{:.2}s", elapsed.as_secs_f64()),
        product: ProductInfo {
            name: query.name.clone(),
            brand: parsed.brand,
            model: parsed.model,
            size: query.size.clone(),
            condition: query.condition,
        },
        prices: quotes.into_iter().map(|q| (q.platform, q)).collect(),
        recommendations,
        timestamp: now_secs(),
    }))
}

fn validate_check_price(req: CheckPriceRequest) -> Result<ProductQuery> {
    let name = req.product_name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("Product name is required".to_string()));
    }
    let size = req.size.as_deref().unwrap_or("").trim().to_string();
    if size.is_empty() {
        return Err(AppError::Validation("Size is required".to_string()));
    }
    Ok(ProductQuery {
        name,
        size,
        condition: req.condition.unwrap_or_default(),
    })
}

async fn get_platforms() -> Json<PlatformsResponse> {
    let platforms = Platform::ALL
        .iter()
        .map(|p| PlatformInfo {
            name: p.display_name(),
            id: p.id(),
            fee_percentage: p.fee_percentage(),
            status: "active",
        })
        .collect();
    Json(PlatformsResponse { platforms })
}

async fn advanced_analysis(
    Json(req): Json<AdvancedAnalysisRequest>,
) -> Result<Json<AdvancedAnalysisResponse>> {
    let prices = match req.prices {
        Some(p) if !p.is_empty() => p,
        _ => return Err(AppError::Validation("Price data is required".to_string())),
    };

    // Advanced-analysis callers supply ask/fees only; shipping comes from
    // the platform table.
    let quotes: Vec<PriceQuote> = prices
        .into_iter()
        .map(|(platform, input)| PriceQuote {
            platform,
            lowest_ask: input.lowest_ask,
            fees: input.fees,
            shipping: platform.shipping_cost(),
            available: input.available,
            error: None,
            response_time: 0.0,
        })
        .collect();

    let auction_time = req
        .auction_time_remaining
        .unwrap_or(DEFAULT_AUCTION_TIME_REMAINING);

    let analysis = match margin::calculate_detailed_margins(
        &quotes,
        req.custom_targets.as_deref(),
        auction_time,
    ) {
        Some(a) => serde_json::to_value(a)?,
        None => json!({ "error": margin::NO_PRICES_AVAILABLE }),
    };

    Ok(Json(AdvancedAnalysisResponse {
        success: true,
        analysis,
    }))
}

async fn quick_bid_calc(Json(req): Json<QuickBidRequest>) -> Result<Json<QuickBidResponse>> {
    let selling_price = req.selling_price.unwrap_or(0.0);
    if selling_price <= 0.0 {
        return Err(AppError::Validation(
            "Valid selling price is required".to_string(),
        ));
    }

    let calc = margin::quick_bid(
        selling_price,
        req.target_multiplier
            .unwrap_or(DEFAULT_QUICK_TARGET_MULTIPLIER),
        req.platform_fees.unwrap_or(DEFAULT_QUICK_FEE_RATE),
        req.shipping_cost.unwrap_or(DEFAULT_QUICK_SHIPPING_COST),
    );

    Ok(Json(QuickBidResponse {
        success: true,
        calc,
    }))
}

async fn latency_stats(State(state): State<ApiState>) -> Json<LatencySnapshot> {
    Json(state.latency.snapshot())
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::{GoatFetcher, KickscrewFetcher, StockxFetcher};

    fn test_state() -> ApiState {
        let aggregator = QuoteAggregator::new(vec![
            Arc::new(StockxFetcher::new(None).unwrap()),
            Arc::new(GoatFetcher::new().unwrap()),
            Arc::new(KickscrewFetcher::new(None).unwrap()),
        ]);
        ApiState {
            aggregator: Arc::new(aggregator),
            latency: Arc::new(LatencyStats::new()),
        }
    }

    #[tokio::test]
    async fn health_reports_service() {
        let resp = health().await;
        assert_eq!(resp.status, "healthy");
        assert_eq!(resp.service, SERVICE_NAME);
        assert!(resp.timestamp > 0);
    }

    #[tokio::test]
    async fn check_price_requires_product_name() {
        let req = CheckPriceRequest {
            size: Some("10".to_string()),
            ..Default::default()
        };
        let err = check_price(State(test_state()), Json(req)).await.err();
        assert!(matches!(err, Some(AppError::Validation(m)) if m.contains("Product name")));
    }

    #[tokio::test]
    async fn check_price_requires_size() {
        let req = CheckPriceRequest {
            product_name: Some("nike dunk low".to_string()),
            size: Some("   ".to_string()),
            ..Default::default()
        };
        let err = check_price(State(test_state()), Json(req)).await.err();
        assert!(matches!(err, Some(AppError::Validation(m)) if m.contains("Size")));
    }

    #[tokio::test]
    async fn check_price_returns_quotes_from_all_platforms() {
        let state = test_state();
        let req = CheckPriceRequest {
            product_name: Some("Nike Dunk Low Panda".to_string()),
            size: Some("10".to_string()),
            condition: None,
        };
        let resp = check_price(State(state.clone()), Json(req)).await.unwrap().0;

        assert!(resp.success);
        assert_eq!(resp.prices.len(), 3);
        assert!(resp.prices.values().all(|q| q.response_time >= 0.0));
        assert_eq!(resp.product.brand, "nike");
        assert_eq!(resp.product.condition, Condition::New);
        assert!(resp.response_time.ends_with('s'));
        // basic path: kickscrew has the lowest ask + fees
        assert_eq!(resp.recommendations["best_platform"], "kickscrew");
        // handler latency was recorded for the stats endpoint
        assert_eq!(state.latency.snapshot().samples, 1);
    }

    #[tokio::test]
    async fn platforms_lists_all_three() {
        let resp = get_platforms().await.0;
        assert_eq!(resp.platforms.len(), 3);
        assert_eq!(resp.platforms[0].name, "StockX");
        assert_eq!(resp.platforms[2].fee_percentage, 8.0);
        assert!(resp.platforms.iter().all(|p| p.status == "active"));
    }

    #[tokio::test]
    async fn advanced_analysis_requires_prices() {
        let err = advanced_analysis(Json(AdvancedAnalysisRequest::default()))
            .await
            .err();
        assert!(matches!(err, Some(AppError::Validation(m)) if m.contains("Price data")));
    }

    #[tokio::test]
    async fn advanced_analysis_selects_highest_net_platform() {
        let mut prices = BTreeMap::new();
        prices.insert(
            Platform::Stockx,
            PriceInput {
                lowest_ask: 450.0,
                fees: 42.75,
                available: true,
            },
        );
        prices.insert(
            Platform::Goat,
            PriceInput {
                lowest_ask: 465.0,
                fees: 44.18,
                available: true,
            },
        );
        let req = AdvancedAnalysisRequest {
            prices: Some(prices),
            custom_targets: None,
            auction_time_remaining: None,
        };
        let resp = advanced_analysis(Json(req)).await.unwrap().0;
        assert!(resp.success);
        // goat nets 405.82 vs stockx 392.25
        assert_eq!(resp.analysis["best_platform"], "goat");
        assert_eq!(
            resp.analysis["bidding_recommendations"]
                .as_array()
                .unwrap()
                .len(),
            6
        );
        assert_eq!(
            resp.analysis["auction_strategy"]["recommended_strategy"],
            "moderate"
        );
    }

    #[tokio::test]
    async fn advanced_analysis_with_no_available_prices_reports_in_band() {
        let mut prices = BTreeMap::new();
        prices.insert(
            Platform::Stockx,
            PriceInput {
                lowest_ask: 450.0,
                fees: 42.75,
                available: false,
            },
        );
        let req = AdvancedAnalysisRequest {
            prices: Some(prices),
            ..Default::default()
        };
        let resp = advanced_analysis(Json(req)).await.unwrap().0;
        assert!(resp.success);
        assert_eq!(resp.analysis["error"], margin::NO_PRICES_AVAILABLE);
    }

    #[tokio::test]
    async fn quick_bid_rejects_non_positive_price() {
        let req = QuickBidRequest {
            selling_price: Some(0.0),
            ..Default::default()
        };
        let err = quick_bid_calc(Json(req)).await.err();
        assert!(matches!(err, Some(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn quick_bid_applies_defaults() {
        let req = QuickBidRequest {
            selling_price: Some(500.0),
            ..Default::default()
        };
        let resp = quick_bid_calc(Json(req)).await.unwrap().0;
        assert!(resp.success);
        assert_eq!(resp.calc.fees, 47.5);
        assert_eq!(resp.calc.net_selling_price, 437.5);
        assert_eq!(resp.calc.max_bid, 218.75);
        assert_eq!(resp.calc.target_multiplier, 2.0);
    }
}
