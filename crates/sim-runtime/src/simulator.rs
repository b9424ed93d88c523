//! Monthly ROI trajectory and financial roll-up for a single strategy.

use crate::events::sample_events;
use rand::Rng;
use sim_core::{MarketEvent, Scenario, SimConfig, Strategy, StrategyResult};
use sim_econ::{
    check_inputs, compute_irr, compute_npv, compute_payback_period, mean, round_money,
};
use tracing::debug;

/// ROI uplift per selected macro factor.
pub const MACRO_FACTOR_WEIGHT: f64 = 0.01;
/// ROI uplift per selected micro factor.
pub const MICRO_FACTOR_WEIGHT: f64 = 0.005;

/// Monthly ROI trajectory of `strategy` under already sampled `events`.
///
/// Every event tagged with a month applies to that month, so same-month
/// events compound. One noise draw is taken per month.
pub fn project_rois<R: Rng + ?Sized>(
    rng: &mut R,
    strategy: &Strategy,
    scenario: &Scenario,
    events: &[MarketEvent],
    config: &SimConfig,
) -> Vec<f64> {
    let macro_mul = 1.0 + scenario.macro_factors.count() as f64 * MACRO_FACTOR_WEIGHT;
    let micro_mul = 1.0 + scenario.micro_factors.count() as f64 * MICRO_FACTOR_WEIGHT;
    (1..=scenario.total_months)
        .map(|month| {
            let mut roi = strategy.base_roi * macro_mul * micro_mul;
            for event in events.iter().filter(|e| e.month == month) {
                roi *= 1.0 + event.impact;
            }
            roi *= 1.0 + (rng.gen::<f64>() - 0.5) * config.noise_amplitude;
            roi.clamp(config.roi_floor, config.roi_ceiling)
        })
        .collect()
}

/// Simulate one strategy over the scenario horizon.
///
/// Only the number of selected factors feeds the model; their recorded
/// percent changes are ignored. `config` must pass
/// [`sim_core::validate_config`], the clamp panics on an inverted range.
pub fn simulate_strategy<R: Rng + ?Sized>(
    rng: &mut R,
    strategy: &Strategy,
    scenario: &Scenario,
    config: &SimConfig,
) -> StrategyResult {
    let events = sample_events(
        rng,
        &scenario.events,
        scenario.total_months,
        config.event_impact_amplitude,
    );
    let monthly_rois = project_rois(rng, strategy, scenario, &events, config);
    debug_assert!(
        check_inputs(strategy.budget, &monthly_rois).is_ok(),
        "unvalidated strategy `{}`",
        strategy.name
    );
    let revenue: f64 = monthly_rois.iter().map(|roi| strategy.budget * roi / 100.0).sum();

    let avg_roi = mean(&monthly_rois);
    debug!(
        strategy = %strategy.name,
        events = events.len(),
        months = scenario.total_months,
        avg_roi,
        "strategy simulated"
    );

    StrategyResult {
        total_revenue: round_money(revenue),
        avg_roi,
        npv: round_money(compute_npv(strategy.budget, &monthly_rois, config.discount_rate)),
        irr: round_money(compute_irr(strategy.budget, &monthly_rois)),
        payback_period: compute_payback_period(strategy.budget, &monthly_rois),
        monthly_rois,
        strategy: strategy.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sim_core::{EventId, FactorSelection, Strategy, StrategyKind};

    fn strategy(budget: f64, base_roi: f64) -> Strategy {
        Strategy {
            name: "VIP - GENERAL_AUDIENCE".to_string(),
            kind: StrategyKind::Customer,
            budget,
            base_roi,
        }
    }

    fn scenario(total_months: u32) -> Scenario {
        Scenario {
            total_months,
            ..Scenario::default()
        }
    }

    fn quiet() -> SimConfig {
        SimConfig {
            noise_amplitude: 0.0,
            ..SimConfig::default()
        }
    }

    #[test]
    fn flat_trajectory_without_noise_or_clamp() {
        let config = SimConfig {
            roi_floor: 0.0,
            ..quiet()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let r = simulate_strategy(&mut rng, &strategy(100_000.0, 10.0), &scenario(12), &config);
        assert_eq!(r.monthly_rois, vec![10.0; 12]);
        assert_eq!(r.total_revenue, 120_000.0);
        assert_eq!(r.avg_roi, 10.0);
        // cf = 100_000 * 10 / 100 / 12 per month, never recovers the budget.
        assert_eq!(r.payback_period, Some(12));
        assert_eq!(r.irr, -90.0);
    }

    #[test]
    fn default_floor_lifts_low_base_roi() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let r = simulate_strategy(&mut rng, &strategy(100_000.0, 10.0), &scenario(12), &quiet());
        assert_eq!(r.monthly_rois, vec![50.0; 12]);
        assert_eq!(r.total_revenue, 600_000.0);
        assert_eq!(r.avg_roi, 50.0);
    }

    #[test]
    fn factor_counts_scale_roi() {
        let sc = Scenario {
            total_months: 3,
            macro_factors: FactorSelection::from_ids(["m1", "m2"]),
            micro_factors: FactorSelection::from_ids(["mi1", "mi2", "mi3", "mi4"]),
            events: vec![],
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let r = simulate_strategy(&mut rng, &strategy(1000.0, 100.0), &sc, &quiet());
        let expected = 100.0 * 1.02 * 1.02;
        for roi in &r.monthly_rois {
            assert!((roi - expected).abs() < 1e-9);
        }
    }

    fn event(id: &str, impact: f64, month: u32) -> MarketEvent {
        MarketEvent {
            id: EventId::from(id),
            impact,
            month,
        }
    }

    #[test]
    fn events_scale_their_month_only() {
        let config = SimConfig {
            roi_floor: 0.0,
            ..quiet()
        };
        let events = [
            event("e4", 0.02, 2),
            event("e14", -0.01, 2),
            event("e8", 0.025, 3),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let rois = project_rois(&mut rng, &strategy(1000.0, 100.0), &scenario(4), &events, &config);
        assert_eq!(rois.len(), 4);
        assert_eq!(rois[0], 100.0);
        assert!((rois[1] - 100.0 * 1.02 * 0.99).abs() < 1e-9);
        assert!((rois[2] - 100.0 * 1.025).abs() < 1e-9);
        assert_eq!(rois[3], 100.0);
    }

    #[test]
    fn events_are_clamped_with_the_rest() {
        let events = [event("e1", -0.5, 1)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let rois = project_rois(&mut rng, &strategy(1000.0, 60.0), &scenario(2), &events, &quiet());
        assert_eq!(rois, vec![50.0, 60.0]);
    }

    #[test]
    fn sampled_events_reach_the_trajectory() {
        let sc = Scenario {
            total_months: 24,
            events: vec![EventId::from("e4"), EventId::from("e14")],
            ..Scenario::default()
        };
        let s = strategy(1000.0, 100.0);
        let with = simulate_strategy(&mut ChaCha8Rng::seed_from_u64(5), &s, &sc, &quiet());
        let moved = with.monthly_rois.iter().filter(|r| **r != 100.0).count();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let events = sample_events(&mut rng, &sc.events, 24, 0.05);
        let expected = (1..=24u32)
            .filter(|m| events.iter().any(|e| e.month == *m && e.impact != 0.0))
            .count();
        assert_eq!(moved, expected);
    }

    #[test]
    fn recorded_changes_do_not_move_roi() {
        let plain = Scenario {
            total_months: 6,
            macro_factors: FactorSelection::from_ids(["m1"]),
            ..Scenario::default()
        };
        let mut changed = plain.clone();
        changed.macro_factors = changed
            .macro_factors
            .with_change(sim_core::FactorId::from("m1"), 40.0);
        let s = strategy(1000.0, 120.0);
        let a = simulate_strategy(&mut ChaCha8Rng::seed_from_u64(8), &s, &plain, &quiet());
        let b = simulate_strategy(&mut ChaCha8Rng::seed_from_u64(8), &s, &changed, &quiet());
        assert_eq!(a, b);
    }

    #[test]
    fn empty_horizon() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let sc = Scenario {
            total_months: 0,
            events: vec![EventId::from("e1")],
            ..Scenario::default()
        };
        let r = simulate_strategy(&mut rng, &strategy(50_000.0, 120.0), &sc, &SimConfig::default());
        assert!(r.monthly_rois.is_empty());
        assert_eq!(r.avg_roi, 0.0);
        assert_eq!(r.total_revenue, 0.0);
        assert_eq!(r.npv, -50_000.0);
        assert_eq!(r.irr, -100.0);
        assert_eq!(r.payback_period, None);
    }

    #[test]
    fn zero_budget_strategy() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let r = simulate_strategy(&mut rng, &strategy(0.0, 120.0), &scenario(6), &SimConfig::default());
        assert_eq!(r.total_revenue, 0.0);
        assert_eq!(r.npv, 0.0);
        assert_eq!(r.irr, 0.0);
        assert_eq!(r.payback_period, Some(1));
    }

    #[test]
    fn seeded_runs_repeat() {
        let sc = Scenario {
            total_months: 24,
            events: vec![EventId::from("e4"), EventId::from("e14")],
            ..Scenario::default()
        };
        let s = strategy(250_000.0, 140.0);
        let a = simulate_strategy(&mut ChaCha8Rng::seed_from_u64(77), &s, &sc, &SimConfig::default());
        let b = simulate_strategy(&mut ChaCha8Rng::seed_from_u64(77), &s, &sc, &SimConfig::default());
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn result_invariants(
            seed in any::<u64>(),
            months in 1u32..=24,
            base_roi in -1_000.0f64..10_000.0,
            budget in 0.0f64..5_000_000.0,
            macros in 0usize..200,
            micros in 0usize..200,
            n_events in 0usize..22,
        ) {
            let sc = Scenario {
                total_months: months,
                macro_factors: FactorSelection::from_ids((0..macros).map(|i| format!("m{i}"))),
                micro_factors: FactorSelection::from_ids((0..micros).map(|i| format!("mi{i}"))),
                events: (0..n_events).map(|i| EventId(format!("e{i}"))).collect(),
            };
            let s = strategy(budget, base_roi);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let r = simulate_strategy(&mut rng, &s, &sc, &SimConfig::default());

            prop_assert_eq!(r.monthly_rois.len(), months as usize);
            for roi in &r.monthly_rois {
                prop_assert!(*roi >= 50.0 && *roi <= 300.0);
            }
            let avg = r.monthly_rois.iter().sum::<f64>() / months as f64;
            prop_assert!((r.avg_roi - avg).abs() < 1e-9);
            let revenue: f64 = r.monthly_rois.iter().map(|roi| budget * roi / 100.0).sum();
            prop_assert!((r.total_revenue - revenue).abs() <= 0.005 + 1e-6);
            let p = r.payback_period.unwrap();
            prop_assert!(p >= 1 && p <= months);
        }
    }
}
