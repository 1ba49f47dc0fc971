//! Narrative-insight abstractions.
//!
//! The calculation core never talks to an AI service directly; commands that
//! want narrative recommendations go through the [`InsightProvider`]
//! capability, which receives only the numeric data contract defined here.

use crate::core::config::{PricingInputs, ProductProfile};
use crate::core::costs::{CalculatedCosts, CostInputs};
use crate::core::currency::Currency;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("authentication with the insight service failed: {0}")]
    Auth(String),
    #[error("insight service request failed: {0}")]
    Network(String),
    #[error("unexpected insight service response: {0}")]
    Malformed(String),
}

/// Data behind a cost-analysis narrative: the raw inputs, the derived
/// report and the currency they are denominated in.
#[derive(Debug, Clone)]
pub struct CostInsightRequest {
    pub inputs: CostInputs,
    pub report: CalculatedCosts,
    pub currency: Currency,
}

/// Data behind a full recommendation narrative: product profile, cost data
/// and the pricing inputs (competitors, target margin, strategy).
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    pub product: ProductProfile,
    pub inputs: CostInputs,
    pub report: CalculatedCosts,
    pub pricing: PricingInputs,
    pub currency: Currency,
}

#[async_trait]
pub trait InsightProvider: Send + Sync {
    async fn cost_insights(&self, request: &CostInsightRequest) -> Result<String, InsightError>;

    async fn recommendation_insights(
        &self,
        request: &RecommendationRequest,
    ) -> Result<String, InsightError>;
}
