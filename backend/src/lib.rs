//! Traffic-Signal Control Evaluation Core - Rust Engine
//!
//! Evaluates signal-control policies (a trained decision policy against a
//! fixed-time baseline) on a simulated four-approach intersection, with
//! deterministic demand per episode seed.
//!
//! # Architecture
//!
//! - **core**: step accounting against the per-episode budget
//! - **models**: domain types (routes, spawn plans, vehicle snapshots, traces)
//! - **rng**: seed-parameterized random source
//! - **demand**: stochastic per-episode spawn schedule generation
//! - **encoder**: occupancy-grid state encoding
//! - **waiting**: waiting-time ledger over the incoming approaches
//! - **policy**: decision-policy boundary and the linear baseline
//! - **sim**: external simulator session boundary
//! - **orchestrator**: the episode loops (adaptive and fixed-time)
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (explicit per-call seeds)
//! 2. An episode never takes more elementary steps than its budget
//! 3. A simulator session is released on every exit path

// Module declarations
pub mod core;
pub mod demand;
pub mod encoder;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod rng;
pub mod sim;
pub mod waiting;

// Re-exports for convenience
pub use crate::core::StepClock;
pub use demand::{DemandError, DemandGenerator};
pub use encoder::{EncoderError, LaneGroup, StateEncoder};
pub use models::{Approach, EpisodeTrace, Route, RoutePlan, SpawnEvent, VehicleState};
pub use orchestrator::{EpisodeConfig, EpisodeError, EpisodeReport, EpisodeRunner, FixedTimeRunner};
pub use policy::{DecisionPolicy, LinearPolicy, PolicyError};
pub use rng::EpisodeRng;
pub use sim::{ScriptedSim, SimError, TrafficSim};
pub use waiting::WaitTracker;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn signal_eval_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::PyDemandGenerator>()?;
    m.add_class::<ffi::PyStateEncoder>()?;
    m.add_class::<ffi::PyWaitTracker>()?;
    Ok(())
}
