//! External simulator boundary
//!
//! The microscopic traffic simulator is an external collaborator driven over
//! a strict request/reply protocol: the runner issues one command, then
//! blocks until the simulator has completed exactly one elementary step and
//! fresh query results are available. That ordering is a correctness
//! requirement, so the boundary is deliberately synchronous: no overlap
//! between simulation stepping and state/reward computation.
//!
//! A session covers exactly one episode: `begin` with the episode's route
//! plan, step/query/command while the budget lasts, `close` on every exit
//! path. Any failure is fatal to the episode; there are no retries.

pub mod scripted;

use thiserror::Error;

use crate::models::{RoutePlan, VehicleState};

pub use scripted::{Frame, ScriptedSim};

/// Errors surfaced by a simulator session
#[derive(Debug, Error)]
pub enum SimError {
    /// The session could not be established with the given route plan.
    #[error("simulator session failed to start: {0}")]
    Start(String),

    /// An elementary step could not be completed.
    #[error("simulator step failed: {0}")]
    Step(String),

    /// A state query failed mid-episode.
    #[error("simulator query failed: {0}")]
    Query(String),

    /// A phase command was rejected.
    #[error("simulator rejected phase command: {0}")]
    Command(String),

    /// The session could not be shut down cleanly.
    #[error("simulator session failed to close: {0}")]
    Close(String),
}

/// One simulator session, scoped to a single episode
pub trait TrafficSim {
    /// Start a fresh session loaded with the episode's route plan
    fn begin(&mut self, plan: &RoutePlan) -> Result<(), SimError>;

    /// Advance the simulation by exactly one elementary step
    fn step(&mut self) -> Result<(), SimError>;

    /// Snapshot of every currently live vehicle
    fn vehicles(&mut self) -> Result<Vec<VehicleState>, SimError>;

    /// Number of halted (zero-speed) vehicles on the given edge
    fn halting_count(&mut self, edge: &str) -> Result<u32, SimError>;

    /// Activate the signal phase with the given index
    fn set_phase(&mut self, phase: usize) -> Result<(), SimError>;

    /// Release the session
    ///
    /// Must be called on every exit path, including after a failed step or
    /// query, so no live simulator process leaks.
    fn close(&mut self) -> Result<(), SimError>;
}
