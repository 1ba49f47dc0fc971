//! Strategy-based price suggestions derived from unit cost and market data.

use serde::{Deserialize, Serialize};

/// Perceived quality of a competitor's product. Ordinal, advisory only;
/// no calculation reads it numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Quality {
    Low,
    Medium,
    High,
    Excellent,
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Quality::Low => "low",
                Quality::Medium => "medium",
                Quality::High => "high",
                Quality::Excellent => "excellent",
            }
        )
    }
}

/// A competitor product used for market comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quality: Quality,
}

/// The set of supported pricing strategies. Closed by construction: a tag
/// outside this set fails to parse at the configuration boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PricingStrategy {
    Competitive,
    ValueBased,
    MarketPenetration,
    PriceSkimming,
}

impl std::fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PricingStrategy::Competitive => "competitive",
                PricingStrategy::ValueBased => "value-based",
                PricingStrategy::MarketPenetration => "market penetration",
                PricingStrategy::PriceSkimming => "price skimming",
            }
        )
    }
}

/// A suggested price point with its expected profit under an assumed
/// market share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingScenario {
    pub name: String,
    pub price: f64,
    pub profit: f64,
    pub market_share: f64,
}

/// Result of a pricing calculation: the suggested price, three scenarios
/// and any warnings raised along the way. Warnings are data, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSuggestion {
    pub optimal_price: f64,
    pub scenarios: Vec<PricingScenario>,
    pub warnings: Vec<String>,
}

/// Suggests an optimal price for the given strategy and market data.
///
/// Pure and total. Invalid unit cost or market size short-circuits into a
/// zero suggestion with a single warning. The scenario market shares
/// (80/50/20%) are fixed heuristics, not derived from competitor data.
pub fn compute_pricing(
    unit_cost: f64,
    competitors: &[Competitor],
    market_size: f64,
    target_profit_margin: f64,
    strategy: PricingStrategy,
) -> PricingSuggestion {
    let mut warnings = Vec::new();

    if unit_cost <= 0.0 || market_size <= 0.0 {
        return PricingSuggestion {
            optimal_price: 0.0,
            scenarios: Vec::new(),
            warnings: vec![
                "Unit cost and production volume must be valid positive values".to_string(),
            ],
        };
    }

    let avg_competitor_price = if competitors.is_empty() {
        0.0
    } else {
        competitors.iter().map(|c| c.price).sum::<f64>() / competitors.len() as f64
    };

    let mut optimal_price = match strategy {
        // Slightly below the market average.
        PricingStrategy::Competitive => avg_competitor_price * 0.95,
        // Above average, assuming higher perceived quality.
        PricingStrategy::ValueBased => avg_competitor_price * 1.2,
        // Minimal markup to maximize volume.
        PricingStrategy::MarketPenetration => unit_cost * 1.1,
        // High markup for premium positioning.
        PricingStrategy::PriceSkimming => unit_cost * 2.0,
    };

    // The floor correction takes precedence over the strategy-derived value.
    if optimal_price < unit_cost {
        warnings.push(
            "Suggested price does not cover the unit cost; raised to a minimum 5% markup"
                .to_string(),
        );
        optimal_price = unit_cost * 1.05;
    }

    let scenarios = vec![
        PricingScenario {
            name: "Low price (market penetration)".to_string(),
            price: unit_cost * 1.1,
            profit: (unit_cost * 1.1 - unit_cost) * market_size * 0.8,
            market_share: 80.0,
        },
        PricingScenario {
            name: "Competitive price".to_string(),
            price: optimal_price,
            profit: (optimal_price - unit_cost) * market_size * 0.5,
            market_share: 50.0,
        },
        PricingScenario {
            name: "High price (skimming)".to_string(),
            price: unit_cost * 1.8,
            profit: (unit_cost * 1.8 - unit_cost) * market_size * 0.2,
            market_share: 20.0,
        },
    ];

    // Margins at or above 100% have no finite target price; the config
    // boundary rejects them before this point.
    if target_profit_margin < 100.0 {
        let target_price = unit_cost / (1.0 - target_profit_margin / 100.0);
        if target_price > optimal_price * 1.5 {
            warnings.push(
                "Target profit margin may be unrealistic given current market conditions"
                    .to_string(),
            );
        }
    }

    PricingSuggestion {
        optimal_price,
        scenarios,
        warnings,
    }
}
