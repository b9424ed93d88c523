#![deny(warnings)]

//! Core domain models and invariants for the bicycle market simulator.
//!
//! This crate defines the serializable types shared by the planner, the
//! finance helpers and the runtime, plus validation helpers that guard the
//! boundary before a simulation run starts.

pub mod catalog;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Identifier of a macro or micro factor, e.g. "m3" or "mi12".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactorId(pub String);

/// Identifier of a market event, e.g. "e14".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

impl From<&str> for FactorId {
    fn from(s: &str) -> Self {
        FactorId(s.to_string())
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId(s.to_string())
    }
}

/// What a strategy allocates budget to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StrategyKind {
    /// Customer segment campaign (macro segment x micro segment).
    Customer,
    /// Product line push.
    Product,
}

/// A named budget allocation evaluated by the simulator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    /// Display name, e.g. "VIP - GENERAL_AUDIENCE".
    pub name: String,
    /// Customer or product strategy.
    pub kind: StrategyKind,
    /// Allocated budget in USD (>= 0).
    pub budget: f64,
    /// Starting monthly ROI in percent before factors, events and noise.
    pub base_roi: f64,
}

/// A sampled, month-tagged multiplicative shock to ROI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    /// Catalog id of the event that fired.
    pub id: EventId,
    /// Fractional multiplier applied as `1 + impact`.
    pub impact: f64,
    /// 1-based month in which the event fires.
    pub month: u32,
}

/// Selected factors with the user-entered percent change per factor.
///
/// The ROI model only reads how many factors are selected. Percent changes
/// are carried by value so callers never mutate shared catalog entries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorSelection {
    /// Selected factor ids.
    #[serde(default)]
    pub ids: Vec<FactorId>,
    /// Percent change entered per factor.
    #[serde(default)]
    pub changes: BTreeMap<FactorId, f64>,
}

impl FactorSelection {
    /// Selection of the given ids with no recorded changes.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(|s| FactorId(s.into())).collect(),
            changes: BTreeMap::new(),
        }
    }

    /// Returns a copy with `percent` recorded for `id`.
    pub fn with_change(mut self, id: FactorId, percent: f64) -> Self {
        self.changes.insert(id, percent);
        self
    }

    /// Number of selected factors.
    pub fn count(&self) -> usize {
        self.ids.len()
    }

    /// Percent change recorded for `id`, if any.
    pub fn change(&self, id: &FactorId) -> Option<f64> {
        self.changes.get(id).copied()
    }
}

/// Market conditions shared read-only by every strategy of a run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Simulation horizon in months.
    pub total_months: u32,
    /// Selected macro-economic factors.
    #[serde(default)]
    pub macro_factors: FactorSelection,
    /// Selected micro-economic factors.
    #[serde(default)]
    pub micro_factors: FactorSelection,
    /// Event ids eligible for sampling.
    #[serde(default)]
    pub events: Vec<EventId>,
}

/// Everything a single simulation run consumes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Strategies to evaluate independently.
    pub strategies: Vec<Strategy>,
    /// Shared market conditions.
    #[serde(flatten)]
    pub scenario: Scenario,
}

/// Projection for one strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    /// The evaluated strategy.
    #[serde(flatten)]
    pub strategy: Strategy,
    /// Monthly ROI in percent, one entry per month, clamped.
    pub monthly_rois: Vec<f64>,
    /// Sum of `budget * roi / 100` over the horizon, rounded to cents.
    pub total_revenue: f64,
    /// Arithmetic mean of `monthly_rois`, 0 for an empty horizon.
    pub avg_roi: f64,
    /// Net present value, rounded to cents.
    pub npv: f64,
    /// Total return over cost in percent, rounded to 2 decimals.
    pub irr: f64,
    /// First month the budget is recovered; `None` for an empty horizon.
    pub payback_period: Option<u32>,
}

/// Simulation configuration parameters.
///
/// Defaults reproduce the constants of the reference model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for deterministic RNG; `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
    /// Artificial delay before a run resolves, in milliseconds.
    pub delay_ms: u64,
    /// Width of the multiplicative monthly noise band (0.1 = ±5%).
    pub noise_amplitude: f64,
    /// Width of the per-event impact band (0.05 = ±2.5%).
    pub event_impact_amplitude: f64,
    /// Annual discount rate used for NPV.
    pub discount_rate: f64,
    /// Lower ROI clamp in percent.
    pub roi_floor: f64,
    /// Upper ROI clamp in percent.
    pub roi_ceiling: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rng_seed: None,
            delay_ms: 1_000,
            noise_amplitude: 0.1,
            event_impact_amplitude: 0.05,
            discount_rate: 0.10,
            roi_floor: 50.0,
            roi_ceiling: 300.0,
        }
    }
}

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Numeric field must be finite.
    #[error("non-finite value in `{0}`")]
    NonFinite(&'static str),
    /// Budget must be non-negative.
    #[error("negative monetary value is invalid")]
    NegativeMoney,
    /// Strategy names must not be blank.
    #[error("strategy name must not be empty")]
    EmptyName,
    /// Noise and impact bands must lie in [0, 2) so multipliers stay positive.
    #[error("amplitude {0} outside [0, 2)")]
    InvalidAmplitude(f64),
    /// ROI floor must not exceed the ceiling.
    #[error("roi clamp range [{0}, {1}] is empty")]
    InvalidClampRange(f64, f64),
    /// Discount rate must be non-negative.
    #[error("discount rate must be >= 0")]
    NegativeDiscountRate,
}

/// Validate a strategy.
pub fn validate_strategy(s: &Strategy) -> Result<(), ValidationError> {
    if s.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !s.budget.is_finite() {
        return Err(ValidationError::NonFinite("budget"));
    }
    if !s.base_roi.is_finite() {
        return Err(ValidationError::NonFinite("base_roi"));
    }
    if s.budget < 0.0 {
        return Err(ValidationError::NegativeMoney);
    }
    Ok(())
}

/// Validate simulation configuration.
pub fn validate_config(c: &SimConfig) -> Result<(), ValidationError> {
    for amp in [c.noise_amplitude, c.event_impact_amplitude] {
        if !amp.is_finite() {
            return Err(ValidationError::NonFinite("amplitude"));
        }
        if !(0.0..2.0).contains(&amp) {
            return Err(ValidationError::InvalidAmplitude(amp));
        }
    }
    if !c.discount_rate.is_finite() {
        return Err(ValidationError::NonFinite("discount_rate"));
    }
    if c.discount_rate < 0.0 {
        return Err(ValidationError::NegativeDiscountRate);
    }
    if !(c.roi_floor.is_finite() && c.roi_ceiling.is_finite()) {
        return Err(ValidationError::NonFinite("roi clamp"));
    }
    if c.roi_floor > c.roi_ceiling {
        return Err(ValidationError::InvalidClampRange(c.roi_floor, c.roi_ceiling));
    }
    Ok(())
}

/// Validate the scenario of a request. Strategies are checked one by one
/// with [`validate_strategy`] so callers can name the offending entry.
pub fn validate_request(r: &SimulationRequest) -> Result<(), ValidationError> {
    let changes = r
        .scenario
        .macro_factors
        .changes
        .values()
        .chain(r.scenario.micro_factors.changes.values());
    for v in changes {
        if !v.is_finite() {
            return Err(ValidationError::NonFinite("factor change"));
        }
    }
    Ok(())
}
