//! Episode runners
//!
//! One episode is a scoped simulator session driven to its step budget:
//!
//! ```text
//! 1. Generate the demand plan for the episode seed
//! 2. Begin the simulator session with the plan
//! 3. Repeat until the budget is exhausted:
//!    a. Encode the intersection state
//!    b. Reconcile waiting times; reward = previous total − current total
//!    c. Pick the next phase (adaptive: policy arg-max; baseline: none)
//!    d. Advance the simulator, one queue sample per elementary step
//! 4. Close the session, on every exit path
//! ```
//!
//! # Comparability
//!
//! Both variants share the demand generator, the wait ledger, and the queue
//! bookkeeping, so their traces differ only through signal control. The
//! fixed-time baseline takes one decision point per elementary step; the
//! adaptive runner takes one per green-phase activation.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::StepClock;
use crate::demand::{DemandError, DemandGenerator};
use crate::encoder::{EncoderError, StateEncoder};
use crate::models::{Approach, EpisodeTrace};
use crate::policy::{greedy_action, DecisionPolicy};
use crate::sim::{SimError, TrafficSim};
use crate::waiting::WaitTracker;

// ============================================================================
// Configuration
// ============================================================================

/// Complete configuration for one evaluation episode
///
/// The same configuration feeds both runners so their episodes stay
/// comparable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeConfig {
    /// Hard budget of elementary simulator steps per episode
    pub max_steps: u32,

    /// Vehicles generated per episode
    pub n_cars: u32,

    /// Elementary steps a green activation nominally lasts
    pub green_duration: u32,

    /// Elementary steps consumed when the chosen phase changes
    pub yellow_duration: u32,

    /// Length of the encoded state vector
    pub num_states: usize,

    /// Number of selectable signal phases
    pub num_actions: usize,

    /// Lane length used to invert positions into stop-line distances
    pub max_lane_length: f64,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            max_steps: 5400,
            n_cars: 1000,
            green_duration: 10,
            yellow_duration: 4,
            num_states: 80,
            num_actions: 4,
            max_lane_length: 200.0,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Episode failure modes
///
/// Configuration problems surface before any session is started; simulator
/// failures abort the episode. There are no retries: an episode either
/// completes fully or fails fully.
#[derive(Debug, Error)]
pub enum EpisodeError {
    /// Demand configuration rejected
    #[error("invalid demand configuration: {0}")]
    Demand(#[from] DemandError),

    /// Encoder configuration rejected
    #[error("invalid encoder configuration: {0}")]
    Encoder(#[from] EncoderError),

    /// Other configuration problem
    #[error("invalid episode configuration: {0}")]
    Config(String),

    /// Simulator session failure (fatal; the session is still released)
    #[error(transparent)]
    Sim(#[from] SimError),

    /// The policy did not score every selectable phase
    #[error("policy returned {got} action values, expected {expected}")]
    ActionValueCount { expected: usize, got: usize },
}

// ============================================================================
// Report
// ============================================================================

/// Outcome of one completed episode
#[derive(Debug, Clone)]
pub struct EpisodeReport {
    /// Reward and queue-length series recorded during the episode
    pub trace: EpisodeTrace,

    /// Elementary steps actually taken (never exceeds the budget)
    pub steps: u32,

    /// Wall-clock time the episode took
    pub runtime: Duration,
}

/// Queue length at the current step: halted vehicles summed over the four
/// incoming approaches, as reported by the simulator
fn queue_length(sim: &mut dyn TrafficSim) -> Result<u32, SimError> {
    let mut total = 0;
    for approach in Approach::ALL {
        total += sim.halting_count(approach.incoming_edge())?;
    }
    Ok(total)
}

// ============================================================================
// Adaptive runner
// ============================================================================

/// Runs episodes under policy-selected signal phases
///
/// Construction validates the whole configuration up front; `run` then
/// executes one scoped session per call.
pub struct EpisodeRunner {
    config: EpisodeConfig,
    demand: DemandGenerator,
    encoder: StateEncoder,
}

impl EpisodeRunner {
    /// Create a runner, failing fast on configuration problems
    pub fn new(config: EpisodeConfig) -> Result<Self, EpisodeError> {
        if config.green_duration == 0 {
            return Err(EpisodeError::Config(
                "green duration must be positive".to_string(),
            ));
        }
        if config.num_actions == 0 {
            return Err(EpisodeError::Config(
                "at least one signal phase is required".to_string(),
            ));
        }
        let demand = DemandGenerator::new(config.max_steps, config.n_cars)?;
        let encoder = StateEncoder::new(config.num_states, config.max_lane_length)?;
        Ok(Self {
            config,
            demand,
            encoder,
        })
    }

    /// The validated configuration
    pub fn config(&self) -> &EpisodeConfig {
        &self.config
    }

    /// Run one adaptive episode
    ///
    /// Generates the demand plan for `seed`, drives the session to the step
    /// budget, and returns the frozen trace. The session is released on
    /// every exit path once it has been established.
    pub fn run(
        &self,
        sim: &mut dyn TrafficSim,
        policy: &dyn DecisionPolicy,
        seed: u64,
    ) -> Result<EpisodeReport, EpisodeError> {
        let started_at = Instant::now();

        let plan = self.demand.generate(seed);
        log::info!(
            "episode seed {}: {} vehicles over {} steps",
            seed,
            plan.len(),
            plan.max_steps
        );

        sim.begin(&plan)?;
        let outcome = self.drive(sim, policy);
        let close_result = sim.close();

        let (trace, steps) = outcome?;
        close_result?;

        let report = EpisodeReport {
            trace,
            steps,
            runtime: started_at.elapsed(),
        };
        log::info!(
            "episode seed {} done: {} steps, total reward {:.1}",
            seed,
            report.steps,
            report.trace.total_reward()
        );
        Ok(report)
    }

    /// The decision loop, from fresh session to exhausted budget
    fn drive(
        &self,
        sim: &mut dyn TrafficSim,
        policy: &dyn DecisionPolicy,
    ) -> Result<(EpisodeTrace, u32), EpisodeError> {
        let mut clock = StepClock::new(self.config.max_steps);
        let mut tracker = WaitTracker::new();
        let mut trace = EpisodeTrace::new();

        let mut previous_total_wait = 0.0;
        let mut previous_action: Option<usize> = None;

        while !clock.is_exhausted() {
            let vehicles = sim.vehicles()?;
            let state = self.encoder.encode(&vehicles);

            let current_total_wait = tracker.update(&vehicles);
            trace.push_reward(previous_total_wait - current_total_wait);

            let values = policy.action_values(&state);
            if values.len() != self.config.num_actions {
                return Err(EpisodeError::ActionValueCount {
                    expected: self.config.num_actions,
                    got: values.len(),
                });
            }
            let action = greedy_action(&values).ok_or(EpisodeError::ActionValueCount {
                expected: self.config.num_actions,
                got: 0,
            })?;

            if previous_action.is_some_and(|previous| previous != action) {
                // Transition interlude: the previous phase stays active
                // while these steps elapse; inter-phase timing lives in the
                // simulator's signal-plan definition.
                self.advance(sim, &mut clock, &mut trace, self.config.yellow_duration)?;
            }

            sim.set_phase(action)?;
            self.advance(sim, &mut clock, &mut trace, self.config.green_duration)?;

            previous_action = Some(action);
            previous_total_wait = current_total_wait;
        }

        Ok((trace, clock.current_step()))
    }

    /// Advance up to `requested` elementary steps, clamped to the remaining
    /// budget, recording one queue sample per step taken
    fn advance(
        &self,
        sim: &mut dyn TrafficSim,
        clock: &mut StepClock,
        trace: &mut EpisodeTrace,
        requested: u32,
    ) -> Result<(), EpisodeError> {
        let steps = clock.clamp_request(requested);
        for _ in 0..steps {
            sim.step()?;
            clock.advance();
            trace.push_queue_length(queue_length(sim)?);
        }
        Ok(())
    }
}

// ============================================================================
// Fixed-time baseline
// ============================================================================

/// Runs episodes under the simulator's own built-in signal timing
///
/// No state encoding and no phase commands: the simulator advances one
/// elementary step at a time, and reward and queue length are recorded every
/// step: one decision point per elementary step.
pub struct FixedTimeRunner {
    config: EpisodeConfig,
    demand: DemandGenerator,
}

impl FixedTimeRunner {
    /// Create a baseline runner, failing fast on configuration problems
    pub fn new(config: EpisodeConfig) -> Result<Self, EpisodeError> {
        let demand = DemandGenerator::new(config.max_steps, config.n_cars)?;
        Ok(Self { config, demand })
    }

    /// The validated configuration
    pub fn config(&self) -> &EpisodeConfig {
        &self.config
    }

    /// Run one baseline episode over the same demand model
    pub fn run(&self, sim: &mut dyn TrafficSim, seed: u64) -> Result<EpisodeReport, EpisodeError> {
        let started_at = Instant::now();

        let plan = self.demand.generate(seed);
        log::info!(
            "fixed-time episode seed {}: {} vehicles over {} steps",
            seed,
            plan.len(),
            plan.max_steps
        );

        sim.begin(&plan)?;
        let outcome = self.drive(sim);
        let close_result = sim.close();

        let (trace, steps) = outcome?;
        close_result?;

        Ok(EpisodeReport {
            trace,
            steps,
            runtime: started_at.elapsed(),
        })
    }

    fn drive(&self, sim: &mut dyn TrafficSim) -> Result<(EpisodeTrace, u32), EpisodeError> {
        let mut clock = StepClock::new(self.config.max_steps);
        let mut tracker = WaitTracker::new();
        let mut trace = EpisodeTrace::new();

        let mut previous_total_wait = 0.0;

        while !clock.is_exhausted() {
            sim.step()?;
            clock.advance();

            let vehicles = sim.vehicles()?;
            let current_total_wait = tracker.update(&vehicles);
            trace.push_reward(previous_total_wait - current_total_wait);
            trace.push_queue_length(queue_length(sim)?);

            previous_total_wait = current_total_wait;
        }

        Ok((trace, clock.current_step()))
    }
}
