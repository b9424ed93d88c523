//! Scenario files: what to simulate and how, loaded from YAML.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use sim_core::{catalog, EventId, FactorId, FactorSelection, Scenario, SimConfig};
use sim_planner::{Selection, MAX_HORIZON_MONTHS};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// On-disk scenario.
///
/// ```yaml
/// total_budget: 1000000
/// months: 12
/// customer_segments:
///   VIP: [GENERAL_AUDIENCE]
/// products: [Popular Products]
/// macro_factors: [m1, m4]
/// factor_changes: { m1: 2.5 }
/// events: [e8, e12]
/// config:
///   rng_seed: 42
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScenarioFile {
    #[serde(flatten)]
    pub selection: Selection,
    pub months: u32,
    pub macro_factors: Vec<String>,
    pub micro_factors: Vec<String>,
    /// Percent change entered per factor id, macro or micro.
    pub factor_changes: BTreeMap<String, f64>,
    pub events: Vec<String>,
    pub config: SimConfig,
}

impl Default for ScenarioFile {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            months: 12,
            macro_factors: Vec::new(),
            micro_factors: Vec::new(),
            factor_changes: BTreeMap::new(),
            events: Vec::new(),
            config: SimConfig::default(),
        }
    }
}

impl ScenarioFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    /// Scenario used when no file is given: every VIP micro segment and the
    /// popular product line, no factors or events.
    pub fn builtin() -> Self {
        let mut selection = Selection::default();
        selection.customer_segments.insert(
            "VIP".to_string(),
            catalog::MICRO_SEGMENTS.iter().map(|s| s.to_string()).collect(),
        );
        selection.products.push("Popular Products".to_string());
        Self {
            selection,
            ..Self::default()
        }
    }

    /// Reject out-of-range horizons and warn about ids missing from the catalogs.
    pub fn check(&self) -> Result<()> {
        if self.months > MAX_HORIZON_MONTHS {
            bail!("months must be within [0, {MAX_HORIZON_MONTHS}], got {}", self.months);
        }
        for (macro_segment, micros) in &self.selection.customer_segments {
            for micro in micros {
                if !catalog::is_customer_segment(macro_segment, micro) {
                    warn!(%macro_segment, %micro, "unknown customer segment");
                }
            }
        }
        for p in &self.selection.products {
            if !catalog::is_product_line(p) {
                warn!(product = %p, "unknown product line");
            }
        }
        for id in &self.macro_factors {
            if catalog::macro_factor(id).is_none() {
                warn!(%id, "unknown macro factor");
            }
        }
        for id in &self.micro_factors {
            if catalog::micro_factor(id).is_none() {
                warn!(%id, "unknown micro factor");
            }
        }
        for id in &self.events {
            if catalog::event_info(id).is_none() {
                warn!(%id, "unknown event");
            }
        }
        Ok(())
    }

    fn factor_selection(&self, ids: &[String]) -> FactorSelection {
        let mut sel = FactorSelection::from_ids(ids.iter().cloned());
        for id in ids {
            if let Some(change) = self.factor_changes.get(id) {
                sel = sel.with_change(FactorId(id.clone()), *change);
            }
        }
        sel
    }

    /// Market conditions shared by all strategies.
    pub fn scenario(&self) -> Scenario {
        Scenario {
            total_months: self.months,
            macro_factors: self.factor_selection(&self.macro_factors),
            micro_factors: self.factor_selection(&self.micro_factors),
            events: self.events.iter().map(|e| EventId(e.clone())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
total_budget: 2000000
months: 18
customer_segments:
  VIP: [GENERAL_AUDIENCE, SENIOR_BUDGET_CONSCIOUS]
products: [Popular Products]
macro_factors: [m1, m4]
micro_factors: [mi5]
factor_changes: { m1: 2.5, mi5: -1.0, m9: 3.0 }
events: [e8, e12]
config:
  rng_seed: 42
  delay_ms: 0
"#;

    #[test]
    fn parses_yaml() {
        let f: ScenarioFile = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(f.selection.total_budget, 2_000_000.0);
        assert_eq!(f.selection.customer_pairs(), 2);
        assert_eq!(f.months, 18);
        assert_eq!(f.config.rng_seed, Some(42));
        assert_eq!(f.config.delay_ms, 0);
        assert_eq!(f.config.noise_amplitude, 0.1);
        f.check().unwrap();

        let sc = f.scenario();
        assert_eq!(sc.total_months, 18);
        assert_eq!(sc.macro_factors.count(), 2);
        assert_eq!(sc.macro_factors.change(&FactorId::from("m1")), Some(2.5));
        // Changes for unselected factors are dropped.
        assert_eq!(sc.macro_factors.change(&FactorId::from("m9")), None);
        assert_eq!(sc.micro_factors.change(&FactorId::from("mi5")), Some(-1.0));
        assert_eq!(sc.events.len(), 2);
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        let f: ScenarioFile = serde_yaml::from_str("{}").unwrap();
        assert_eq!(f.months, 12);
        assert_eq!(f.selection.total_budget, 1_000_000.0);
        assert_eq!(f.config, SimConfig::default());
    }

    #[test]
    fn horizon_is_bounded() {
        let f = ScenarioFile {
            months: 25,
            ..ScenarioFile::builtin()
        };
        assert!(f.check().is_err());
    }

    #[test]
    fn builtin_selects_vip_and_popular() {
        let f = ScenarioFile::builtin();
        assert_eq!(f.selection.customer_pairs(), 3);
        assert_eq!(f.selection.products, vec!["Popular Products".to_string()]);
    }
}
