use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::insight::{
    CostInsightRequest, InsightError, InsightProvider, RecommendationRequest,
};

// GeminiInsightProvider implementation for InsightProvider
pub struct GeminiInsightProvider {
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiInsightProvider {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        GeminiInsightProvider {
            base_url: base_url.to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn generate(&self, prompt: String) -> Result<String, InsightError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!("Requesting insights from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("costwise/0.1")
            .build()
            .map_err(|e| InsightError::Network(e.to_string()))?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InsightError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(InsightError::Auth(format!(
                "service rejected the API key ({status})"
            )));
        }
        if !status.is_success() {
            return Err(InsightError::Network(format!("HTTP error: {status}")));
        }

        let data = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| InsightError::Malformed(e.to_string()))?;

        data.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| InsightError::Malformed("response contains no text".to_string()))
    }
}

#[derive(Serialize, Debug)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Debug)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Debug)]
struct Part {
    text: String,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: String,
}

fn break_even_text(break_even: Option<u64>) -> String {
    match break_even {
        Some(units) => format!("{units} units"),
        None => "unreachable at the current price".to_string(),
    }
}

fn cost_prompt(request: &CostInsightRequest) -> String {
    let currency = request.currency.code();
    format!(
        "You are an expert in production cost analysis for consumer products. \
Based on the data below, provide actionable recommendations to improve \
profitability, reduce costs and flag risks. Answer as concise bullet points.\n\
All amounts are in {currency}.\n\n\
Cost and production data:\n\
- Total raw materials cost: {raw:.2} {currency}\n\
- Packaging cost per unit: {packaging:.2} {currency}\n\
- Shipping cost per unit: {shipping:.2} {currency}\n\
- Fixed costs (marketing, labor, operational): {fixed:.2} {currency}\n\
- Units produced: {units}\n\
- Selling price per unit: {price:.2} {currency}\n\n\
Current results:\n\
- Cost per unit: {cost_per_unit:.2} {currency}\n\
- Expected total profit: {profit:.2} {currency}\n\
- Profit margin: {margin:.2}%\n\
- Break-even point: {break_even}\n\n\
Cover: unusually high costs and how to reduce them, whether the current \
price is appropriate, how to improve production efficiency, and any other \
advice specific to this scenario.",
        raw = request.inputs.raw_materials,
        packaging = request.inputs.packaging_per_unit,
        shipping = request.inputs.shipping_per_unit,
        fixed = request.report.total_fixed_costs,
        units = request.inputs.units_produced,
        price = request.inputs.price_per_unit,
        cost_per_unit = request.report.cost_per_unit,
        profit = request.report.total_profit,
        margin = request.report.profit_margin,
        break_even = break_even_text(request.report.break_even_units_ceil()),
    )
}

fn recommendation_prompt(request: &RecommendationRequest) -> String {
    let currency = request.currency.code();
    let competitors = if request.pricing.competitors.is_empty() {
        "No competitor data provided".to_string()
    } else {
        request
            .pricing
            .competitors
            .iter()
            .map(|c| format!("- {}: {:.2} {currency} (quality: {})", c.name, c.price, c.quality))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are an expert in pricing and go-to-market strategy for \
entrepreneurs and e-commerce. Based on the product, cost and market data \
below, provide recommendations for pricing strategy, product improvements \
and market positioning. Answer as concise bullet points.\n\
All amounts are in {currency}.\n\n\
Product:\n\
- Name: {name}\n\
- Description: {description}\n\
- Target audience: {audience}\n\
- Category: {category} / {subcategory}\n\
- Target country: {country}\n\
- Key features: {features}\n\n\
Financials:\n\
- Cost per unit: {cost_per_unit:.2} {currency}\n\
- Selling price per unit: {price:.2} {currency}\n\
- Expected total profit: {profit:.2} {currency}\n\
- Current profit margin: {margin:.2}%\n\
- Break-even point: {break_even}\n\
- Target profit margin: {target_margin}%\n\n\
Competitors:\n{competitors}\n\n\
Selected pricing strategy: {strategy}\n\n\
Cover: the ideal price given costs, competitors and the target market; a \
comparison of suitable pricing strategies; product improvements that would \
justify a higher price; and risks to avoid.",
        name = request.product.name,
        description = request.product.description,
        audience = request.product.target_audience,
        category = request.product.category,
        subcategory = request.product.subcategory,
        country = request.product.country,
        features = request.product.key_features,
        cost_per_unit = request.report.cost_per_unit,
        price = request.inputs.price_per_unit,
        profit = request.report.total_profit,
        margin = request.report.profit_margin,
        break_even = break_even_text(request.report.break_even_units_ceil()),
        target_margin = request.pricing.target_profit_margin,
        strategy = request.pricing.strategy,
    )
}

#[async_trait]
impl InsightProvider for GeminiInsightProvider {
    #[instrument(name = "GeminiCostInsights", skip(self, request))]
    async fn cost_insights(&self, request: &CostInsightRequest) -> Result<String, InsightError> {
        self.generate(cost_prompt(request)).await
    }

    #[instrument(name = "GeminiRecommendations", skip(self, request))]
    async fn recommendation_insights(
        &self,
        request: &RecommendationRequest,
    ) -> Result<String, InsightError> {
        self.generate(recommendation_prompt(request)).await
    }
}
