//! What-if stress scoring: starts from 100 and deducts for each simulated
//! shock, mirroring the sliders on the stress-simulator screen.

use serde::{Deserialize, Serialize};

use crate::currency::Money;

/// Baselines the deductions measure against.
const FUEL_PRICE_BASE: f64 = 90.0;
const ORDER_VOLUME_BASE: f64 = 100.0;
const INFLATION_BASE: f64 = 6.0;
const PLATFORM_FEE_BASE: f64 = 20.0;

const FUEL_PENALTY_PER_RUPEE: f64 = 1.2;
const VOLUME_PENALTY_PER_POINT: f64 = 0.8;
const VOLUME_BONUS_PER_POINT: f64 = 0.2;
const MEDICAL_PENALTY: f64 = 25.0;
const COST_RATIO_PENALTY: f64 = 50.0;
const COST_FLAT_PENALTY: f64 = 20.0;
const INFLATION_PENALTY_PER_POINT: f64 = 2.0;
const FEE_PENALTY_PER_POINT: f64 = 1.5;

/// One what-if configuration of simultaneous shocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StressScenario {
    /// Petrol price per litre in rupees.
    pub fuel_price: f64,
    /// Order volume as a percentage of normal (100 = unchanged).
    pub order_volume_pct: f64,
    pub medical_emergency: bool,
    pub bike_repair: Money,
    pub challan: Money,
    /// Annual inflation percentage.
    pub inflation_pct: f64,
    /// Platform commission percentage.
    pub platform_fee_pct: f64,
}

impl Default for StressScenario {
    fn default() -> Self {
        Self {
            fuel_price: FUEL_PRICE_BASE,
            order_volume_pct: ORDER_VOLUME_BASE,
            medical_emergency: false,
            bike_repair: Money::ZERO,
            challan: Money::ZERO,
            inflation_pct: INFLATION_BASE,
            platform_fee_pct: PLATFORM_FEE_BASE,
        }
    }
}

/// Resilience score for a scenario against the current balance, rounded and
/// clamped to [0, 100]. A baseline scenario scores 100.
pub fn stress_score(scenario: &StressScenario, current_balance: Money) -> u8 {
    let mut score = 100.0;

    if scenario.fuel_price > FUEL_PRICE_BASE {
        score -= (scenario.fuel_price - FUEL_PRICE_BASE) * FUEL_PENALTY_PER_RUPEE;
    }

    if scenario.order_volume_pct < ORDER_VOLUME_BASE {
        score -= (ORDER_VOLUME_BASE - scenario.order_volume_pct) * VOLUME_PENALTY_PER_POINT;
    } else {
        score += (scenario.order_volume_pct - ORDER_VOLUME_BASE) * VOLUME_BONUS_PER_POINT;
    }

    if scenario.medical_emergency {
        score -= MEDICAL_PENALTY;
    }

    let one_time_costs = scenario.bike_repair + scenario.challan;
    if current_balance > Money::ZERO {
        let cost_ratio = one_time_costs.to_f64() / current_balance.to_f64();
        score -= cost_ratio * COST_RATIO_PENALTY;
    } else if one_time_costs > Money::ZERO {
        score -= COST_FLAT_PENALTY;
    }

    if scenario.inflation_pct > INFLATION_BASE {
        score -= (scenario.inflation_pct - INFLATION_BASE) * INFLATION_PENALTY_PER_POINT;
    }
    if scenario.platform_fee_pct > PLATFORM_FEE_BASE {
        score -= (scenario.platform_fee_pct - PLATFORM_FEE_BASE) * FEE_PENALTY_PER_POINT;
    }

    score.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_scenario_scores_full() {
        let score = stress_score(&StressScenario::default(), Money::from_rupees(5000));
        assert_eq!(score, 100);
    }

    #[test]
    fn fuel_and_volume_shocks_deduct() {
        let scenario = StressScenario {
            fuel_price: 100.0,
            order_volume_pct: 90.0,
            ..StressScenario::default()
        };
        // 100 - 10×1.2 - 10×0.8 = 80.
        assert_eq!(stress_score(&scenario, Money::from_rupees(5000)), 80);
    }

    #[test]
    fn one_time_costs_scale_with_balance() {
        let scenario = StressScenario {
            bike_repair: Money::from_rupees(2000),
            challan: Money::from_rupees(500),
            ..StressScenario::default()
        };
        // Cost ratio 2500/5000 = 0.5 → 25-point deduction.
        assert_eq!(stress_score(&scenario, Money::from_rupees(5000)), 75);
        // No balance: flat 20-point deduction instead.
        assert_eq!(stress_score(&scenario, Money::ZERO), 80);
    }

    #[test]
    fn extreme_scenario_floors_at_zero() {
        let scenario = StressScenario {
            fuel_price: 150.0,
            order_volume_pct: 20.0,
            medical_emergency: true,
            bike_repair: Money::from_rupees(50_000),
            challan: Money::from_rupees(5000),
            inflation_pct: 15.0,
            platform_fee_pct: 35.0,
        };
        assert_eq!(stress_score(&scenario, Money::from_rupees(1000)), 0);
    }

    #[test]
    fn extra_volume_earns_a_small_bonus() {
        let scenario = StressScenario {
            order_volume_pct: 120.0,
            ..StressScenario::default()
        };
        // Bonus is clamped back down to the 100 ceiling.
        assert_eq!(stress_score(&scenario, Money::from_rupees(5000)), 100);
    }
}
