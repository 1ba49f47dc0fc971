//! Cost, profitability and break-even calculations for a production batch.

use serde::{Deserialize, Serialize};

/// Raw cost inputs for a single production batch.
///
/// `raw_materials`, `marketing`, `labor` and `operational` are batch totals;
/// `packaging_per_unit` and `shipping_per_unit` are per-unit rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostInputs {
    pub raw_materials: f64,
    pub packaging_per_unit: f64,
    pub shipping_per_unit: f64,
    pub marketing: f64,
    pub units_produced: i64,
    pub price_per_unit: f64,
    pub labor: f64,
    pub operational: f64,
}

impl Default for CostInputs {
    fn default() -> Self {
        CostInputs {
            raw_materials: 10000.0,
            packaging_per_unit: 5.0,
            shipping_per_unit: 3.0,
            marketing: 5000.0,
            units_produced: 1000,
            price_per_unit: 50.0,
            labor: 8000.0,
            operational: 3000.0,
        }
    }
}

impl CostInputs {
    /// Returns a copy with every negative field clamped to zero.
    ///
    /// Calculations assume non-negative inputs; callers clamp at the boundary
    /// before invoking [`compute_costs`].
    pub fn clamped(&self) -> CostInputs {
        CostInputs {
            raw_materials: self.raw_materials.max(0.0),
            packaging_per_unit: self.packaging_per_unit.max(0.0),
            shipping_per_unit: self.shipping_per_unit.max(0.0),
            marketing: self.marketing.max(0.0),
            units_produced: self.units_produced.max(0),
            price_per_unit: self.price_per_unit.max(0.0),
            labor: self.labor.max(0.0),
            operational: self.operational.max(0.0),
        }
    }
}

/// A price point and the total profit it would yield for the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub price: f64,
    pub profit: f64,
}

/// Full cost, profitability and break-even report derived from [`CostInputs`].
///
/// `break_even_units` is `f64::INFINITY` when each unit sold loses money or
/// only recovers its variable cost; consumers must render that as
/// unreachable rather than a finite number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedCosts {
    pub total_raw_materials_cost: f64,
    pub total_packaging_cost: f64,
    pub total_shipping_cost: f64,
    pub total_marketing_cost: f64,
    pub total_labor_cost: f64,
    pub total_operational_cost: f64,
    pub total_fixed_costs: f64,
    pub total_variable_costs: f64,
    pub total_cost: f64,
    pub cost_per_unit: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub profit_per_unit: f64,
    pub profit_margin: f64,
    pub break_even_units: f64,
    pub units_produced: i64,
    pub scenarios: Vec<Scenario>,
}

impl CalculatedCosts {
    /// Break-even volume rounded up to whole units, `None` when unreachable.
    pub fn break_even_units_ceil(&self) -> Option<u64> {
        self.break_even_units
            .is_finite()
            .then(|| self.break_even_units.ceil() as u64)
    }
}

/// Derives the complete cost report for a batch.
///
/// Pure and total: no input makes it fail or divide by zero. A unit count of
/// zero or less is computed as if one unit were produced, while the returned
/// `units_produced` still echoes the original input.
pub fn compute_costs(inputs: &CostInputs) -> CalculatedCosts {
    let safe_units = if inputs.units_produced > 0 {
        inputs.units_produced as f64
    } else {
        1.0
    };

    let total_raw_materials_cost = inputs.raw_materials;
    let total_packaging_cost = inputs.packaging_per_unit * safe_units;
    let total_shipping_cost = inputs.shipping_per_unit * safe_units;

    let total_marketing_cost = inputs.marketing;
    let total_labor_cost = inputs.labor;
    let total_operational_cost = inputs.operational;
    let total_fixed_costs = total_marketing_cost + total_labor_cost + total_operational_cost;

    // Raw materials are a batch figure amortized per unit; packaging and
    // shipping are already per-unit rates.
    let variable_cost_per_unit =
        inputs.raw_materials / safe_units + inputs.packaging_per_unit + inputs.shipping_per_unit;
    let total_variable_costs = variable_cost_per_unit * safe_units;
    let total_cost = total_fixed_costs + total_variable_costs;
    let cost_per_unit = total_cost / safe_units;

    let total_revenue = inputs.price_per_unit * safe_units;
    let total_profit = total_revenue - total_cost;
    let profit_per_unit = inputs.price_per_unit - cost_per_unit;
    let profit_margin = if total_revenue > 0.0 {
        (total_profit / total_revenue) * 100.0
    } else {
        0.0
    };

    let contribution_margin_per_unit = inputs.price_per_unit - variable_cost_per_unit;
    let break_even_units = if contribution_margin_per_unit > 0.0 {
        total_fixed_costs / contribution_margin_per_unit
    } else {
        f64::INFINITY
    };

    let scenarios = vec![
        Scenario {
            name: "Low price (20% below)".to_string(),
            price: inputs.price_per_unit * 0.8,
            profit: inputs.price_per_unit * 0.8 * safe_units - total_cost,
        },
        Scenario {
            name: "Current price".to_string(),
            price: inputs.price_per_unit,
            profit: total_profit,
        },
        Scenario {
            name: "High price (20% above)".to_string(),
            price: inputs.price_per_unit * 1.2,
            profit: inputs.price_per_unit * 1.2 * safe_units - total_cost,
        },
    ];

    CalculatedCosts {
        total_raw_materials_cost,
        total_packaging_cost,
        total_shipping_cost,
        total_marketing_cost,
        total_labor_cost,
        total_operational_cost,
        total_fixed_costs,
        total_variable_costs,
        total_cost,
        cost_per_unit,
        total_revenue,
        total_profit,
        profit_per_unit,
        profit_margin,
        break_even_units,
        units_produced: inputs.units_produced,
        scenarios,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_inputs() -> CostInputs {
        CostInputs {
            raw_materials: 10000.0,
            packaging_per_unit: 5.0,
            shipping_per_unit: 3.0,
            marketing: 5000.0,
            units_produced: 1000,
            price_per_unit: 50.0,
            labor: 8000.0,
            operational: 3000.0,
        }
    }

    #[test]
    fn test_full_report_for_typical_batch() {
        let report = compute_costs(&sample_inputs());

        assert_eq!(report.total_raw_materials_cost, 10000.0);
        assert_eq!(report.total_packaging_cost, 5000.0);
        assert_eq!(report.total_shipping_cost, 3000.0);
        assert_eq!(report.total_fixed_costs, 16000.0);
        // variable cost per unit = 10 + 5 + 3 = 18
        assert_eq!(report.total_variable_costs, 18000.0);
        assert_eq!(report.total_cost, 34000.0);
        assert_eq!(report.cost_per_unit, 34.0);
        assert_eq!(report.total_revenue, 50000.0);
        assert_eq!(report.total_profit, 16000.0);
        assert_eq!(report.profit_per_unit, 16.0);
        assert_eq!(report.profit_margin, 32.0);
        // contribution margin = 50 - 18 = 32; 16000 / 32 = 500
        assert_eq!(report.break_even_units, 500.0);
        assert_eq!(report.units_produced, 1000);
    }

    #[test]
    fn test_cost_identities_hold() {
        let report = compute_costs(&sample_inputs());
        assert_eq!(
            report.total_cost,
            report.total_fixed_costs + report.total_variable_costs
        );
        assert_eq!(
            report.total_profit,
            report.total_revenue - report.total_cost
        );
    }

    #[test]
    fn test_zero_units_guarded_as_one() {
        let inputs = CostInputs {
            units_produced: 0,
            ..sample_inputs()
        };
        let report = compute_costs(&inputs);

        // Computed as a one-unit batch, but the echoed count is untouched.
        assert_eq!(report.units_produced, 0);
        assert_eq!(report.total_packaging_cost, 5.0);
        assert_eq!(report.total_shipping_cost, 3.0);
        // variable cost per unit = 10000 + 5 + 3
        assert_eq!(report.cost_per_unit, 16000.0 + 10008.0);
        assert!(report.cost_per_unit.is_finite());
    }

    #[test]
    fn test_negative_units_echoed_unchanged() {
        let inputs = CostInputs {
            units_produced: -5,
            ..sample_inputs()
        };
        let report = compute_costs(&inputs);
        assert_eq!(report.units_produced, -5);
        assert!(report.cost_per_unit.is_finite());
        assert!(!report.cost_per_unit.is_nan());
    }

    #[test]
    fn test_zero_revenue_yields_zero_margin() {
        let inputs = CostInputs {
            price_per_unit: 0.0,
            ..sample_inputs()
        };
        let report = compute_costs(&inputs);
        assert_eq!(report.total_revenue, 0.0);
        assert_eq!(report.profit_margin, 0.0);
    }

    #[test]
    fn test_break_even_unreachable_when_contribution_margin_not_positive() {
        // Price exactly equals variable cost per unit (18).
        let inputs = CostInputs {
            price_per_unit: 18.0,
            ..sample_inputs()
        };
        let report = compute_costs(&inputs);
        assert!(report.break_even_units.is_infinite());
        assert!(report.break_even_units.is_sign_positive());

        // Price below variable cost per unit.
        let inputs = CostInputs {
            price_per_unit: 10.0,
            ..sample_inputs()
        };
        let report = compute_costs(&inputs);
        assert!(report.break_even_units.is_infinite());
    }

    #[test]
    fn test_scenarios_use_fixed_multipliers_in_order() {
        let report = compute_costs(&sample_inputs());
        assert_eq!(report.scenarios.len(), 3);
        assert_eq!(report.scenarios[0].price, 50.0 * 0.8);
        assert_eq!(report.scenarios[1].price, 50.0);
        assert_eq!(report.scenarios[2].price, 50.0 * 1.2);
        // profit = price * units - total cost
        assert_eq!(report.scenarios[0].profit, 40.0 * 1000.0 - 34000.0);
        assert_eq!(report.scenarios[1].profit, report.total_profit);
        assert_eq!(report.scenarios[2].profit, 60.0 * 1000.0 - 34000.0);
    }

    #[test]
    fn test_all_zero_inputs_produce_degenerate_but_defined_report() {
        let inputs = CostInputs {
            raw_materials: 0.0,
            packaging_per_unit: 0.0,
            shipping_per_unit: 0.0,
            marketing: 0.0,
            units_produced: 0,
            price_per_unit: 0.0,
            labor: 0.0,
            operational: 0.0,
        };
        let report = compute_costs(&inputs);
        assert_eq!(report.total_cost, 0.0);
        assert_eq!(report.profit_margin, 0.0);
        assert!(report.break_even_units.is_infinite());
        assert!(!report.cost_per_unit.is_nan());
    }

    #[test]
    fn test_break_even_ceil_rounds_up_and_handles_infinity() {
        let report = compute_costs(&CostInputs {
            price_per_unit: 49.0,
            ..sample_inputs()
        });
        // contribution margin = 31, 16000 / 31 = 516.13
        assert_eq!(report.break_even_units_ceil(), Some(517));

        let report = compute_costs(&CostInputs {
            price_per_unit: 10.0,
            ..sample_inputs()
        });
        assert_eq!(report.break_even_units_ceil(), None);
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let inputs = sample_inputs();
        let first = compute_costs(&inputs);
        let second = compute_costs(&inputs);
        assert_eq!(first, second);
    }

    #[test]
    fn test_clamped_zeroes_negative_fields() {
        let inputs = CostInputs {
            raw_materials: -100.0,
            units_produced: -3,
            ..sample_inputs()
        };
        let clamped = inputs.clamped();
        assert_eq!(clamped.raw_materials, 0.0);
        assert_eq!(clamped.units_produced, 0);
        assert_eq!(clamped.price_per_unit, 50.0);
    }
}
