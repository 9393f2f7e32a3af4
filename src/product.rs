/// Brands recognized by the free-text product parser, matched in order.
const KNOWN_BRANDS: &[&str] = &[
    "nike",
    "adidas",
    "jordan",
    "yeezy",
    "new balance",
    "puma",
    "vans",
    "converse",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProduct {
    pub brand: String,
    pub model: String,
    /// Trimmed, lowercased form of the raw input.
    pub normalized: String,
}

/// Extract brand and model from a free-text product name.
/// First known brand substring wins; the model is the remainder.
/// Unrecognized brands come back as "unknown" with the full input as model.
pub fn parse_product_input(input: &str) -> ParsedProduct {
    let normalized = input.trim().to_lowercase();

    let brand = KNOWN_BRANDS
        .iter()
        .find(|b| normalized.contains(**b))
        .map_or("unknown", |b| *b)
        .to_string();

    let model = normalized.replace(&brand, "").trim().to_string();

    ParsedProduct {
        brand,
        model,
        normalized,
    }
}
