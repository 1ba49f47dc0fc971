use crate::cli::{costs, ui};
use crate::core::config::{AppConfig, PricingInputs};
use crate::core::costs::compute_costs;
use crate::core::currency::Currency;
use crate::core::pricing::{PricingScenario, PricingSuggestion, compute_pricing};
use crate::store::{self, Session};
use anyhow::{Context, Result};
use comfy_table::Cell;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub async fn run(
    config: &AppConfig,
    session: &Session,
    market_size: Option<f64>,
    export: Option<&Path>,
) -> Result<()> {
    info!("Calculating pricing suggestion...");

    let (inputs, currency) = costs::resolve_inputs(config, session).await;
    let report = compute_costs(&inputs);

    let pricing = match &config.pricing {
        Some(pricing) => pricing.clone(),
        None => {
            session
                .load_or(store::PRICING_INPUTS, PricingInputs::default())
                .await
        }
    };

    // Unless overridden, the produced batch size stands in for the
    // addressable market.
    let market_size = market_size.unwrap_or(report.units_produced as f64);

    let suggestion = compute_pricing(
        report.cost_per_unit,
        &pricing.competitors,
        market_size,
        pricing.target_profit_margin,
        pricing.strategy,
    );
    debug!("Computed pricing suggestion: {suggestion:#?}");

    display_suggestion(&suggestion, &pricing, currency);

    if let Some(path) = export {
        export_scenarios(path, &suggestion.scenarios)?;
        println!(
            "{}",
            ui::style_text(
                &format!("Scenarios exported to {}", path.display()),
                ui::StyleType::Subtle,
            )
        );
    }

    session.save(store::PRICING_INPUTS, &pricing).await;
    session.save(store::CURRENCY, &currency).await;
    session.save(store::ACTIVE_VIEW, &"pricing").await;

    Ok(())
}

fn display_suggestion(
    suggestion: &PricingSuggestion,
    pricing: &PricingInputs,
    currency: Currency,
) {
    for warning in &suggestion.warnings {
        println!(
            "{}",
            ui::style_text(&format!("⚠ {warning}"), ui::StyleType::Warning)
        );
    }

    println!(
        "\n{} {}",
        ui::style_text(
            &format!("Optimal price ({}):", pricing.strategy),
            ui::StyleType::TotalLabel,
        ),
        ui::style_text(
            &currency.format(suggestion.optimal_price),
            ui::StyleType::TotalValue,
        )
    );

    if !pricing.competitors.is_empty() {
        println!(
            "\n{}",
            ui::style_text("Competitors", ui::StyleType::Title)
        );
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Name"),
            ui::header_cell("Price"),
            ui::header_cell("Quality"),
        ]);
        for competitor in &pricing.competitors {
            table.add_row(vec![
                Cell::new(&competitor.name),
                ui::money_cell(competitor.price, currency),
                Cell::new(competitor.quality.to_string()),
            ]);
        }
        println!("{table}");
    }

    if !suggestion.scenarios.is_empty() {
        println!(
            "\n{}",
            ui::style_text("Pricing Scenarios", ui::StyleType::Title)
        );
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Scenario"),
            ui::header_cell("Price"),
            ui::header_cell("Market share"),
            ui::header_cell("Projected profit"),
        ]);
        for scenario in &suggestion.scenarios {
            table.add_row(vec![
                Cell::new(&scenario.name),
                ui::money_cell(scenario.price, currency),
                Cell::new(format!("{:.0}%", scenario.market_share)),
                ui::profit_cell(scenario.profit, currency),
            ]);
        }
        println!("{table}");
    }
}

/// Writes the scenarios as delimited rows. Field order and naming are stable;
/// downstream spreadsheet imports rely on them.
pub fn export_scenarios(path: &Path, scenarios: &[PricingScenario]) -> Result<()> {
    let mut out = String::from("name,price,profit,market_share\n");
    for scenario in scenarios {
        out.push_str(&format!(
            "{},{},{},{}\n",
            csv_field(&scenario.name),
            scenario.price,
            scenario.profit,
            scenario.market_share
        ));
    }

    fs::write(path, out)
        .with_context(|| format!("Failed to write scenario export to {}", path.display()))?;
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
