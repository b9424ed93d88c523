#![deny(warnings)]

//! Financial helpers for the bicycle market simulator.
//!
//! This module provides deterministic utilities for:
//! - Monthly cash flows derived from ROI percentages
//! - Net present value at a monthly-equivalent discount rate
//! - The simplified total-return "IRR" and the payback period
//! - Cent rounding and Pearson correlation
//!
//! Portfolio-level KPIs live in [`portfolio`].

pub mod portfolio;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Errors produced by finance helpers.
#[derive(Debug, Error, PartialEq)]
pub enum EconError {
    /// Investment must be non-negative.
    #[error("invalid investment: {0}")]
    InvalidInvestment(f64),
    /// Every ROI and sample value must be finite.
    #[error("non-finite numeric value")]
    NonFinite,
    /// Paired series must have the same length.
    #[error("series length mismatch: {0} vs {1}")]
    LengthMismatch(usize, usize),
}

/// Check the inputs shared by the cash flow helpers.
pub fn check_inputs(investment: f64, monthly_rois: &[f64]) -> Result<(), EconError> {
    if !investment.is_finite() || investment < 0.0 {
        return Err(EconError::InvalidInvestment(investment));
    }
    if monthly_rois.iter().any(|r| !r.is_finite()) {
        return Err(EconError::NonFinite);
    }
    Ok(())
}

/// Cash flow of one month: the ROI percentage de-annualized over 12 months.
///
/// Example:
/// assert_eq!(monthly_cash_flow(120_000.0, 100.0), 10_000.0);
pub fn monthly_cash_flow(investment: f64, roi_pct: f64) -> f64 {
    investment * roi_pct / 100.0 / 12.0
}

/// Net present value of the monthly cash flows.
///
/// NPV = -I + Σ cf_i / (1 + r/12)^i with i starting at 1.
pub fn compute_npv(investment: f64, monthly_rois: &[f64], annual_discount_rate: f64) -> f64 {
    let monthly_rate = annual_discount_rate / 12.0;
    let mut npv = -investment;
    for (i, roi) in monthly_rois.iter().enumerate() {
        let cf = monthly_cash_flow(investment, *roi);
        npv += cf / (1.0 + monthly_rate).powi(i as i32 + 1);
    }
    npv
}

/// Total return over cost in percent.
///
/// Not a discounted internal rate of return: (Σ cf_i - I) / I * 100.
/// Returns 0 for a zero investment.
pub fn compute_irr(investment: f64, monthly_rois: &[f64]) -> f64 {
    if investment == 0.0 {
        return 0.0;
    }
    let total_return: f64 = monthly_rois
        .iter()
        .map(|roi| monthly_cash_flow(investment, *roi))
        .sum();
    (total_return - investment) / investment * 100.0
}

/// Running sum of monthly cash flows.
pub fn cumulative_cash_flows(investment: f64, monthly_rois: &[f64]) -> Vec<f64> {
    monthly_rois
        .iter()
        .scan(0.0, |acc, roi| {
            *acc += monthly_cash_flow(investment, *roi);
            Some(*acc)
        })
        .collect()
}

/// First 1-based month whose cumulative cash flow covers the investment.
///
/// Falls back to the horizon length when the investment is never
/// recovered. Returns None only for an empty horizon.
pub fn compute_payback_period(investment: f64, monthly_rois: &[f64]) -> Option<u32> {
    if monthly_rois.is_empty() {
        return None;
    }
    let month = cumulative_cash_flows(investment, monthly_rois)
        .iter()
        .position(|c| *c >= investment)
        .map(|i| i + 1)
        .unwrap_or(monthly_rois.len());
    Some(u32::try_from(month).unwrap_or(u32::MAX))
}

/// Round to cents, half away from zero. Non-finite input is returned as is.
///
/// Rounds the exact binary value of `x`, so `1.005` (stored just below the
/// midpoint) becomes `1.00`.
///
/// Example:
/// assert_eq!(round_money(1.005_1), 1.01);
pub fn round_money(x: f64) -> f64 {
    Decimal::from_f64_retain(x)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(x)
}

/// Arithmetic mean, 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson correlation coefficient of two paired series.
///
/// Returns 0 when either series has no variance (or fewer than two points).
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<f64, EconError> {
    if x.len() != y.len() {
        return Err(EconError::LengthMismatch(x.len(), y.len()));
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(EconError::NonFinite);
    }
    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return Ok(0.0);
    }
    Ok(numerator / denominator)
}
