use crate::cli::ui;
use crate::core::config::AppConfig;
use crate::core::costs::{CalculatedCosts, CostInputs, compute_costs};
use crate::core::currency::Currency;
use crate::store::{self, Session};
use anyhow::Result;
use comfy_table::{Attribute, Cell};
use tracing::{debug, info, warn};

pub async fn run(config: &AppConfig, session: &Session) -> Result<()> {
    info!("Calculating cost report...");

    let (inputs, currency) = resolve_inputs(config, session).await;
    let report = compute_costs(&inputs);
    debug!("Computed cost report: {report:#?}");

    display_cost_report(&report, currency);

    session.save(store::COST_INPUTS, &inputs).await;
    session.save(store::CURRENCY, &currency).await;
    session.save(store::ACTIVE_VIEW, &"costs").await;

    Ok(())
}

/// Materializes the cost inputs and currency for a command run.
///
/// The config file wins when it carries the values; otherwise the last-used
/// session entries apply, then built-in defaults. Negative inputs are clamped
/// to zero here so the calculators only ever see non-negative values.
pub(crate) async fn resolve_inputs(
    config: &AppConfig,
    session: &Session,
) -> (CostInputs, Currency) {
    let inputs = match &config.costs {
        Some(inputs) => inputs.clone(),
        None => {
            session
                .load_or(store::COST_INPUTS, CostInputs::default())
                .await
        }
    };

    let clamped = inputs.clamped();
    if clamped != inputs {
        warn!("Negative cost inputs were clamped to zero");
    }

    let currency = match config.currency {
        Some(currency) => currency,
        None => session.load_or(store::CURRENCY, Currency::default()).await,
    };

    (clamped, currency)
}

fn display_cost_report(report: &CalculatedCosts, currency: Currency) {
    println!(
        "\n{}",
        ui::style_text("Cost Breakdown", ui::StyleType::Title)
    );
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Category"), ui::header_cell("Total")]);
    for (label, value) in [
        ("Raw materials", report.total_raw_materials_cost),
        ("Packaging", report.total_packaging_cost),
        ("Shipping", report.total_shipping_cost),
        ("Marketing", report.total_marketing_cost),
        ("Labor", report.total_labor_cost),
        ("Operational", report.total_operational_cost),
    ] {
        table.add_row(vec![Cell::new(label), ui::money_cell(value, currency)]);
    }
    table.add_row(vec![
        Cell::new("Fixed costs").add_attribute(Attribute::Bold),
        ui::money_cell(report.total_fixed_costs, currency),
    ]);
    table.add_row(vec![
        Cell::new("Variable costs").add_attribute(Attribute::Bold),
        ui::money_cell(report.total_variable_costs, currency),
    ]);
    table.add_row(vec![
        Cell::new("Total cost").add_attribute(Attribute::Bold),
        ui::money_cell(report.total_cost, currency),
    ]);
    println!("{table}");

    println!(
        "\n{}",
        ui::style_text("Profitability", ui::StyleType::Title)
    );
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Metric"), ui::header_cell("Value")]);
    table.add_row(vec![
        Cell::new("Units produced"),
        Cell::new(report.units_produced.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Cost per unit"),
        ui::money_cell(report.cost_per_unit, currency),
    ]);
    table.add_row(vec![
        Cell::new("Total revenue"),
        ui::money_cell(report.total_revenue, currency),
    ]);
    table.add_row(vec![
        Cell::new("Total profit"),
        ui::profit_cell(report.total_profit, currency),
    ]);
    table.add_row(vec![
        Cell::new("Profit per unit"),
        ui::profit_cell(report.profit_per_unit, currency),
    ]);
    table.add_row(vec![
        Cell::new("Profit margin"),
        ui::percent_cell(report.profit_margin),
    ]);
    table.add_row(vec![
        Cell::new("Break-even point"),
        break_even_cell(report),
    ]);
    println!("{table}");

    println!(
        "\n{}",
        ui::style_text("Price Scenarios", ui::StyleType::Title)
    );
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Scenario"),
        ui::header_cell("Price"),
        ui::header_cell("Profit"),
    ]);
    for scenario in &report.scenarios {
        table.add_row(vec![
            Cell::new(&scenario.name),
            ui::money_cell(scenario.price, currency),
            ui::profit_cell(scenario.profit, currency),
        ]);
    }
    println!("{table}");
}

// Break-even can be unreachable; never render the infinity sentinel as a
// finite number.
fn break_even_cell(report: &CalculatedCosts) -> Cell {
    match report.break_even_units_ceil() {
        Some(units) => Cell::new(format!("{units} units")),
        None => Cell::new("∞ (unreachable)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use std::sync::Arc;

    fn session() -> Session {
        Session::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_config_inputs_win_over_session() {
        let session = session();
        session
            .save(
                store::COST_INPUTS,
                &CostInputs {
                    raw_materials: 1.0,
                    ..CostInputs::default()
                },
            )
            .await;

        let config = AppConfig {
            costs: Some(CostInputs {
                raw_materials: 999.0,
                ..CostInputs::default()
            }),
            ..AppConfig::default()
        };

        let (inputs, _) = resolve_inputs(&config, &session).await;
        assert_eq!(inputs.raw_materials, 999.0);
    }

    #[tokio::test]
    async fn test_session_inputs_used_when_config_is_silent() {
        let session = session();
        session
            .save(
                store::COST_INPUTS,
                &CostInputs {
                    raw_materials: 1.0,
                    ..CostInputs::default()
                },
            )
            .await;
        session.save(store::CURRENCY, &Currency::Usd).await;

        let config = AppConfig::default();
        let (inputs, currency) = resolve_inputs(&config, &session).await;
        assert_eq!(inputs.raw_materials, 1.0);
        assert_eq!(currency, Currency::Usd);
    }

    #[tokio::test]
    async fn test_defaults_apply_on_first_run() {
        let config = AppConfig::default();
        let (inputs, currency) = resolve_inputs(&config, &session()).await;
        assert_eq!(inputs, CostInputs::default());
        assert_eq!(currency, Currency::Sar);
    }

    #[tokio::test]
    async fn test_negative_config_inputs_are_clamped() {
        let config = AppConfig {
            costs: Some(CostInputs {
                marketing: -500.0,
                ..CostInputs::default()
            }),
            ..AppConfig::default()
        };

        let (inputs, _) = resolve_inputs(&config, &session()).await;
        assert_eq!(inputs.marketing, 0.0);
    }

    #[tokio::test]
    async fn test_run_persists_inputs_to_session() {
        let session = session();
        let config = AppConfig {
            currency: Some(Currency::Usd),
            ..AppConfig::default()
        };

        run(&config, &session).await.unwrap();

        let saved: CostInputs = session
            .load_or(store::COST_INPUTS, CostInputs {
                raw_materials: -1.0,
                ..CostInputs::default()
            })
            .await;
        assert_eq!(saved, CostInputs::default());
        let currency: Currency = session.load_or(store::CURRENCY, Currency::Sar).await;
        assert_eq!(currency, Currency::Usd);
        let view: String = session
            .load_or(store::ACTIVE_VIEW, String::new())
            .await;
        assert_eq!(view, "costs");
    }
}
