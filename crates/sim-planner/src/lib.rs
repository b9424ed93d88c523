#![deny(warnings)]

//! Strategy planning: turns segment and product selections into weighted
//! strategies, and ranks finished results.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sim_core::{Strategy, StrategyKind, StrategyResult};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Share of the total budget spread over customer strategies.
pub const CUSTOMER_BUDGET_SHARE: f64 = 0.6;
/// Share of the total budget spread over product strategies.
pub const PRODUCT_BUDGET_SHARE: f64 = 0.4;
/// Largest total budget accepted, in USD.
pub const MAX_TOTAL_BUDGET: f64 = 5_000_000.0;
/// Longest horizon offered to users, in months.
pub const MAX_HORIZON_MONTHS: u32 = 24;

const BASE_ROI_MIN: f64 = 5.0;
const BASE_ROI_SPAN: f64 = 10.0;

/// Errors raised while turning a selection into strategies.
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    /// Neither a customer pair nor a product line was selected.
    #[error("select at least one customer segment or product strategy")]
    NoStrategiesSelected,
    /// Total budget is non-finite or outside the accepted range.
    #[error("total budget {0} outside [0, 5000000]")]
    InvalidBudget(f64),
}

/// What the user picked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    /// Customer macro segment to the micro segments chosen under it.
    pub customer_segments: BTreeMap<String, Vec<String>>,
    /// Chosen product lines.
    pub products: Vec<String>,
    /// Total budget in USD split across all strategies.
    pub total_budget: f64,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            customer_segments: BTreeMap::new(),
            products: Vec::new(),
            total_budget: 1_000_000.0,
        }
    }
}

impl Selection {
    /// Number of (macro, micro) customer pairs selected.
    pub fn customer_pairs(&self) -> usize {
        self.customer_segments.values().map(Vec::len).sum()
    }
}

fn draw_base_roi<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    BASE_ROI_MIN + rng.gen::<f64>() * BASE_ROI_SPAN
}

/// Build the strategy list for a selection.
///
/// Customer pairs share 60% of the budget evenly, products share the other
/// 40%. Every strategy draws a base ROI in [5, 15).
pub fn build_strategies<R: Rng + ?Sized>(
    selection: &Selection,
    rng: &mut R,
) -> Result<Vec<Strategy>, PlanError> {
    let budget = selection.total_budget;
    if !budget.is_finite() || !(0.0..=MAX_TOTAL_BUDGET).contains(&budget) {
        return Err(PlanError::InvalidBudget(budget));
    }
    let pairs = selection.customer_pairs();
    let products = selection.products.len();
    if pairs == 0 && products == 0 {
        return Err(PlanError::NoStrategiesSelected);
    }

    let mut strategies = Vec::with_capacity(pairs + products);
    for (macro_segment, micros) in &selection.customer_segments {
        for micro in micros {
            strategies.push(Strategy {
                name: format!("{macro_segment} - {micro}"),
                kind: StrategyKind::Customer,
                budget: budget * CUSTOMER_BUDGET_SHARE / pairs as f64,
                base_roi: draw_base_roi(rng),
            });
        }
    }
    for product in &selection.products {
        strategies.push(Strategy {
            name: product.clone(),
            kind: StrategyKind::Product,
            budget: budget * PRODUCT_BUDGET_SHARE / products as f64,
            base_roi: draw_base_roi(rng),
        });
    }
    debug!(
        customer = pairs,
        product = products,
        total_budget = budget,
        "strategies built"
    );
    Ok(strategies)
}

/// Ranking utility: higher is better.
///
/// Weighs average ROI against the positive part of NPV.
pub fn score(result: &StrategyResult) -> f64 {
    result.avg_roi * 0.6 + result.npv.max(0.0) / 5000.0 * 0.4
}

/// A result with its 1-based rank.
#[derive(Clone, Debug, Serialize)]
pub struct RankedStrategy<'a> {
    pub rank: usize,
    pub score: f64,
    pub result: &'a StrategyResult,
}

/// Results ordered by descending [`score`]; ties keep input order.
pub fn rank(results: &[StrategyResult]) -> Vec<RankedStrategy<'_>> {
    let mut scored: Vec<(f64, &StrategyResult)> = results.iter().map(|r| (score(r), r)).collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .enumerate()
        .map(|(i, (score, result))| RankedStrategy {
            rank: i + 1,
            score,
            result,
        })
        .collect()
}
