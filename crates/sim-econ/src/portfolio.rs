//! Portfolio KPIs and per-strategy profit lines over a finished run.

use crate::{mean, pearson_correlation};
use serde::Serialize;
use sim_core::{StrategyKind, StrategyResult};

/// Average ROI (percent) below which a strategy counts as underperforming.
pub const UNDERPERFORMING_ROI: f64 = 120.0;

/// Profit view of one strategy: revenue against its budget.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfitLine {
    pub name: String,
    pub kind: StrategyKind,
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
    /// Profit over revenue in percent, 0 without revenue.
    pub margin_pct: f64,
    /// Profit over cost in percent, 0 without cost.
    pub roi_on_cost_pct: f64,
    pub risk: RiskLevel,
}

impl ProfitLine {
    pub fn from_result(r: &StrategyResult) -> Self {
        let revenue = r.total_revenue;
        let cost = r.strategy.budget;
        let profit = revenue - cost;
        let margin_pct = if revenue != 0.0 {
            profit / revenue * 100.0
        } else {
            0.0
        };
        let roi_on_cost_pct = if cost != 0.0 {
            profit / cost * 100.0
        } else {
            0.0
        };
        Self {
            name: r.strategy.name.clone(),
            kind: r.strategy.kind,
            revenue,
            cost,
            profit,
            margin_pct,
            roi_on_cost_pct,
            risk: RiskLevel::from_avg_roi(r.avg_roi),
        }
    }
}

/// Profit lines for every result, in input order.
pub fn profit_breakdown(results: &[StrategyResult]) -> Vec<ProfitLine> {
    results.iter().map(ProfitLine::from_result).collect()
}

/// NPV per budget dollar; 0 unless the NPV is positive.
pub fn profitability_index(npv: f64, budget: f64) -> f64 {
    if npv > 0.0 && budget > 0.0 {
        npv / budget
    } else {
        0.0
    }
}

/// Coarse reading of the simplified IRR.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum IrrRating {
    Good,
    Fair,
    Poor,
}

impl IrrRating {
    pub fn from_irr(irr: f64) -> Self {
        if irr > 20.0 {
            IrrRating::Good
        } else if irr < 10.0 {
            IrrRating::Poor
        } else {
            IrrRating::Fair
        }
    }
}

/// Risk bucket of a strategy from its average ROI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    /// Average ROI below 60%.
    High,
    /// Average ROI in [60%, 90%).
    Medium,
    Low,
}

impl RiskLevel {
    pub fn from_avg_roi(avg_roi: f64) -> Self {
        if avg_roi < 60.0 {
            RiskLevel::High
        } else if avg_roi < 90.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Aggregate KPIs over all strategies of a run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub strategies: usize,
    pub avg_roi: f64,
    pub total_revenue: f64,
    pub total_budget: f64,
    pub total_npv: f64,
    pub avg_irr: f64,
    /// Share of strategies whose average ROI is below [`UNDERPERFORMING_ROI`], in percent.
    pub underperforming_pct: f64,
    /// Strategies with a positive NPV.
    pub profitable_count: usize,
    /// Total revenue per budget dollar.
    pub revenue_multiple: f64,
    pub overall_margin_pct: f64,
    /// Pearson correlation between budget and average ROI.
    pub budget_roi_correlation: f64,
}

impl PortfolioSummary {
    pub fn from_results(results: &[StrategyResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }
        let n = results.len();
        let rois: Vec<f64> = results.iter().map(|r| r.avg_roi).collect();
        let irrs: Vec<f64> = results.iter().map(|r| r.irr).collect();
        let budgets: Vec<f64> = results.iter().map(|r| r.strategy.budget).collect();
        let total_revenue: f64 = results.iter().map(|r| r.total_revenue).sum();
        let total_budget: f64 = budgets.iter().sum();
        let total_npv: f64 = results.iter().map(|r| r.npv).sum();
        let under = rois.iter().filter(|r| **r < UNDERPERFORMING_ROI).count();

        let revenue_multiple = if total_budget > 0.0 {
            total_revenue / total_budget
        } else {
            0.0
        };
        let overall_margin_pct = if total_revenue != 0.0 {
            (total_revenue - total_budget) / total_revenue * 100.0
        } else {
            0.0
        };

        Self {
            strategies: n,
            avg_roi: mean(&rois),
            total_revenue,
            total_budget,
            total_npv,
            avg_irr: mean(&irrs),
            underperforming_pct: under as f64 / n as f64 * 100.0,
            profitable_count: results.iter().filter(|r| r.npv > 0.0).count(),
            revenue_multiple,
            overall_margin_pct,
            budget_roi_correlation: pearson_correlation(&budgets, &rois).unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::Strategy;

    fn result(name: &str, budget: f64, avg_roi: f64, revenue: f64, npv: f64, irr: f64) -> StrategyResult {
        StrategyResult {
            strategy: Strategy {
                name: name.to_string(),
                kind: StrategyKind::Product,
                budget,
                base_roi: 10.0,
            },
            monthly_rois: vec![avg_roi],
            total_revenue: revenue,
            avg_roi,
            npv,
            irr,
            payback_period: Some(1),
        }
    }

    #[test]
    fn profit_line_margin() {
        let p = ProfitLine::from_result(&result("A", 100.0, 150.0, 400.0, 10.0, 5.0));
        assert_eq!(p.profit, 300.0);
        assert_eq!(p.margin_pct, 75.0);
        let zero = ProfitLine::from_result(&result("B", 100.0, 150.0, 0.0, 10.0, 5.0));
        assert_eq!(zero.margin_pct, 0.0);
    }

    #[test]
    fn profit_line_roi_on_cost_and_risk() {
        let p = ProfitLine::from_result(&result("A", 200.0, 75.0, 500.0, 10.0, 5.0));
        assert_eq!(p.roi_on_cost_pct, 150.0);
        assert_eq!(p.risk, RiskLevel::Medium);
        let free = ProfitLine::from_result(&result("B", 0.0, 150.0, 0.0, 0.0, 0.0));
        assert_eq!(free.roi_on_cost_pct, 0.0);
        assert_eq!(free.risk, RiskLevel::Low);
    }

    #[test]
    fn risk_level_thresholds() {
        assert_eq!(RiskLevel::from_avg_roi(50.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_avg_roi(59.99), RiskLevel::High);
        assert_eq!(RiskLevel::from_avg_roi(60.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_avg_roi(89.99), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_avg_roi(90.0), RiskLevel::Low);
    }

    #[test]
    fn profitability_index_only_for_positive_npv() {
        assert_eq!(profitability_index(50.0, 100.0), 0.5);
        assert_eq!(profitability_index(-50.0, 100.0), 0.0);
        assert_eq!(profitability_index(50.0, 0.0), 0.0);
    }

    #[test]
    fn irr_rating_thresholds() {
        assert_eq!(IrrRating::from_irr(25.0), IrrRating::Good);
        assert_eq!(IrrRating::from_irr(20.0), IrrRating::Fair);
        assert_eq!(IrrRating::from_irr(10.0), IrrRating::Fair);
        assert_eq!(IrrRating::from_irr(9.99), IrrRating::Poor);
    }

    #[test]
    fn summary_of_empty_run_is_zero() {
        assert_eq!(PortfolioSummary::from_results(&[]), PortfolioSummary::default());
    }

    #[test]
    fn summary_aggregates() {
        let rs = vec![
            result("A", 100.0, 100.0, 300.0, 50.0, 10.0),
            result("B", 300.0, 200.0, 500.0, -20.0, 30.0),
        ];
        let s = PortfolioSummary::from_results(&rs);
        assert_eq!(s.strategies, 2);
        assert_eq!(s.avg_roi, 150.0);
        assert_eq!(s.total_revenue, 800.0);
        assert_eq!(s.total_budget, 400.0);
        assert_eq!(s.total_npv, 30.0);
        assert_eq!(s.avg_irr, 20.0);
        assert_eq!(s.underperforming_pct, 50.0);
        assert_eq!(s.profitable_count, 1);
        assert_eq!(s.revenue_multiple, 2.0);
        assert_eq!(s.overall_margin_pct, 50.0);
        assert!((s.budget_roi_correlation - 1.0).abs() < 1e-12);
    }
}
