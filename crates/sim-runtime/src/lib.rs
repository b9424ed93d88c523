#![deny(warnings)]

//! Simulation runtime: event sampling, per-strategy ROI trajectories and
//! the asynchronous run entry point.

pub mod events;
pub mod runner;
pub mod simulator;

pub use events::{event_probability, sample_events};
pub use runner::{RunError, SimulationRunner};
pub use simulator::simulate_strategy;
