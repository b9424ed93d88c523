//! Terminal and JSON rendering of a finished run.

use serde::Serialize;
use sim_core::StrategyResult;
use sim_econ::portfolio::{
    profit_breakdown, profitability_index, IrrRating, PortfolioSummary, ProfitLine, RiskLevel,
};
use sim_econ::cumulative_cash_flows;
use sim_planner::{rank, RankedStrategy};
use std::fmt::Write;

#[derive(Serialize)]
pub struct Report<'a> {
    pub results: &'a [StrategyResult],
    pub ranking: Vec<RankedStrategy<'a>>,
    pub profit: Vec<ProfitLine>,
    pub summary: PortfolioSummary,
}

impl<'a> Report<'a> {
    pub fn new(results: &'a [StrategyResult]) -> Self {
        Self {
            results,
            ranking: rank(results),
            profit: profit_breakdown(results),
            summary: PortfolioSummary::from_results(results),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let s = &self.summary;
        let _ = writeln!(
            out,
            "Portfolio | strategies: {} | avg ROI: {:.1}% | revenue: ${:.2} | NPV: ${:.2} | avg IRR: {:.1}% | multiple: {:.2}x",
            s.strategies, s.avg_roi, s.total_revenue, s.total_npv, s.avg_irr, s.revenue_multiple
        );
        let _ = writeln!(
            out,
            "          | profitable: {} | underperforming: {:.0}% | margin: {:.1}% | budget/ROI corr: {:.2}",
            s.profitable_count, s.underperforming_pct, s.overall_margin_pct, s.budget_roi_correlation
        );
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:>4}  {:<36} {:>8} {:>12} {:>8} {:>14} {:>14} {:>8} {:>5} {:>7} {:>6}",
            "rank", "strategy", "kind", "budget", "avg ROI", "revenue", "NPV", "IRR", "PB", "PI", "risk"
        );
        for r in &self.ranking {
            let res = r.result;
            let risk = RiskLevel::from_avg_roi(res.avg_roi);
            let payback = res
                .payback_period
                .map(|p| p.to_string())
                .unwrap_or_else(|| "n/a".to_string());
            let _ = writeln!(
                out,
                "{:>4}  {:<36} {:>8} {:>12.2} {:>7.1}% {:>14.2} {:>14.2} {:>7.1}% {:>5} {:>7.2} {:>6}  {:?}",
                r.rank,
                res.strategy.name,
                format!("{:?}", res.strategy.kind),
                res.strategy.budget,
                res.avg_roi,
                res.total_revenue,
                res.npv,
                res.irr,
                payback,
                profitability_index(res.npv, res.strategy.budget),
                format!("{risk:?}"),
                IrrRating::from_irr(res.irr),
            );
        }
        if let Some(best) = self.ranking.first() {
            let res = best.result;
            let flows = cumulative_cash_flows(res.strategy.budget, &res.monthly_rois);
            let _ = writeln!(out);
            let _ = writeln!(out, "Cumulative cash flow, {}:", res.strategy.name);
            for (i, (roi, cf)) in res.monthly_rois.iter().zip(&flows).enumerate() {
                let _ = writeln!(
                    out,
                    "  month {:>2}: ROI {:>6.1}%  cumulative ${:>14.2}  net ${:>14.2}",
                    i + 1,
                    roi,
                    cf,
                    cf - res.strategy.budget
                );
            }
        }
        out
    }
}
