use crate::cli::{costs, ui};
use crate::core::config::{AppConfig, PricingInputs};
use crate::core::costs::compute_costs;
use crate::core::insight::{CostInsightRequest, InsightProvider, RecommendationRequest};
use crate::providers::gemini::GeminiInsightProvider;
use crate::store::{self, Session};
use anyhow::{Context, Result};
use tracing::info;

pub async fn run(config: &AppConfig, session: &Session, recommendations: bool) -> Result<()> {
    info!("Fetching AI insights...");

    let gemini = config
        .providers
        .gemini
        .as_ref()
        .context("Gemini provider is not configured")?;
    let api_key = gemini
        .api_key
        .clone()
        .or_else(|| std::env::var("COSTWISE_GEMINI_API_KEY").ok())
        .context(
            "No Gemini API key found; set providers.gemini.api_key in the config \
             or the COSTWISE_GEMINI_API_KEY environment variable",
        )?;
    let provider = GeminiInsightProvider::new(&gemini.base_url, &gemini.model, &api_key);

    let (inputs, currency) = costs::resolve_inputs(config, session).await;
    let report = compute_costs(&inputs);

    let cost_request = CostInsightRequest {
        inputs: inputs.clone(),
        report: report.clone(),
        currency,
    };

    let spinner = ui::new_spinner("Fetching insights...");

    if recommendations {
        let pricing = match &config.pricing {
            Some(pricing) => pricing.clone(),
            None => {
                session
                    .load_or(store::PRICING_INPUTS, PricingInputs::default())
                    .await
            }
        };
        let recommendation_request = RecommendationRequest {
            product: config.product.clone(),
            inputs,
            report,
            pricing,
            currency,
        };

        let (cost_result, recommendation_result) = futures::join!(
            provider.cost_insights(&cost_request),
            provider.recommendation_insights(&recommendation_request)
        );
        spinner.finish_and_clear();

        print_section("Cost Analysis", &cost_result?);
        ui::print_separator();
        print_section("Pricing Recommendations", &recommendation_result?);
    } else {
        let result = provider.cost_insights(&cost_request).await;
        spinner.finish_and_clear();

        print_section("Cost Analysis", &result?);
    }

    session.save(store::ACTIVE_VIEW, &"insights").await;

    Ok(())
}

fn print_section(title: &str, text: &str) {
    println!("\n{}\n", ui::style_text(title, ui::StyleType::Title));
    println!("{text}");
}
