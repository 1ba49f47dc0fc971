//! Core business logic abstractions

pub mod config;
pub mod costs;
pub mod currency;
pub mod insight;
pub mod log;
pub mod pricing;

// Re-export main types for cleaner imports
pub use costs::{CalculatedCosts, CostInputs, Scenario, compute_costs};
pub use currency::Currency;
pub use insight::{InsightError, InsightProvider};
pub use pricing::{
    Competitor, PricingScenario, PricingStrategy, PricingSuggestion, Quality, compute_pricing,
};
