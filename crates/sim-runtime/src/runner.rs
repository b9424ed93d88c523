//! Run orchestration: validation, the artificial backend delay, and the
//! sequential per-strategy simulation.

use crate::simulator::simulate_strategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sim_core::{
    validate_config, validate_request, validate_strategy, SimConfig, SimulationRequest,
    StrategyResult, ValidationError,
};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that stop a run before any strategy is simulated.
#[derive(Debug, Error, PartialEq)]
pub enum RunError {
    /// The runner configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(ValidationError),
    /// A strategy of the request failed validation.
    #[error("invalid strategy `{name}`: {source}")]
    InvalidStrategy {
        name: String,
        source: ValidationError,
    },
    /// The shared scenario failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(ValidationError),
}

/// Owns the random source of a session and turns requests into results.
pub struct SimulationRunner {
    config: SimConfig,
    rng: ChaCha8Rng,
}

impl SimulationRunner {
    /// Seeded from `config.rng_seed`, or from OS entropy when unset.
    pub fn new(config: SimConfig) -> Result<Self, RunError> {
        validate_config(&config).map_err(RunError::InvalidConfig)?;
        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    /// Simulate every strategy of the request after the configured delay.
    ///
    /// The delay is the only await point. Validation happens before it, so
    /// an invalid request fails at once and produces no partial results.
    pub async fn run(&mut self, request: &SimulationRequest) -> Result<Vec<StrategyResult>, RunError> {
        self.check(request)?;
        tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
        Ok(self.simulate_all(request))
    }

    /// Same as [`run`](Self::run) without the delay, for benches and
    /// synchronous callers.
    pub fn run_blocking(&mut self, request: &SimulationRequest) -> Result<Vec<StrategyResult>, RunError> {
        self.check(request)?;
        Ok(self.simulate_all(request))
    }

    fn check(&self, request: &SimulationRequest) -> Result<(), RunError> {
        for s in &request.strategies {
            if let Err(source) = validate_strategy(s) {
                warn!(strategy = %s.name, %source, "rejecting run");
                return Err(RunError::InvalidStrategy {
                    name: s.name.clone(),
                    source,
                });
            }
        }
        validate_request(request).map_err(|e| {
            warn!(error = %e, "rejecting run");
            RunError::InvalidRequest(e)
        })
    }

    fn simulate_all(&mut self, request: &SimulationRequest) -> Vec<StrategyResult> {
        let scenario = &request.scenario;
        info!(
            strategies = request.strategies.len(),
            months = scenario.total_months,
            macro_factors = scenario.macro_factors.count(),
            micro_factors = scenario.micro_factors.count(),
            events = scenario.events.len(),
            "simulation started"
        );
        let results: Vec<StrategyResult> = request
            .strategies
            .iter()
            .map(|s| simulate_strategy(&mut self.rng, s, scenario, &self.config))
            .collect();
        info!(strategies = results.len(), "simulation finished");
        results
    }
}
