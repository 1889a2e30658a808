//! Scripted simulator double
//!
//! Replays a pre-authored sequence of per-step frames and records every
//! command it receives, so episode behavior can be asserted without a real
//! simulator process.
//!
//! NOTE: Available in all builds to support integration testing, but should
//! only be used in test code.

use std::collections::HashMap;

use crate::models::{RoutePlan, VehicleState};

use super::{SimError, TrafficSim};

/// Simulator state visible at one elementary step
///
/// Frame `k` is what queries return after `k` elementary steps have been
/// taken; frame 0 is the state right after `begin`. When the script runs out
/// of frames, queries return an empty network.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Live vehicles reported by `vehicles()`
    pub vehicles: Vec<VehicleState>,
    /// Halted-vehicle counts per edge, reported by `halting_count()`
    pub halting: HashMap<String, u32>,
}

impl Frame {
    /// Frame with the given vehicles and no halted traffic
    pub fn with_vehicles(vehicles: Vec<VehicleState>) -> Self {
        Self {
            vehicles,
            halting: HashMap::new(),
        }
    }

    /// Set the halted count for one edge
    pub fn halted(mut self, edge: &str, count: u32) -> Self {
        self.halting.insert(edge.to_string(), count);
        self
    }
}

/// Deterministic scripted session for driving the episode runners in tests
pub struct ScriptedSim {
    frames: Vec<Frame>,
    cursor: usize,
    started: bool,
    closed: bool,
    steps_taken: u32,
    /// Step index at which `step()` should fail, for error-path tests
    fail_at_step: Option<u32>,
    /// Every `set_phase` command: (steps taken when issued, phase index)
    phase_log: Vec<(u32, usize)>,
    /// Route plan received at `begin`
    plan: Option<RoutePlan>,
}

impl ScriptedSim {
    /// Create a session that replays the given frames
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            cursor: 0,
            started: false,
            closed: false,
            steps_taken: 0,
            fail_at_step: None,
            phase_log: Vec::new(),
            plan: None,
        }
    }

    /// Session with an empty network at every step
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Make `step()` fail once `n` steps have already been taken
    pub fn fail_at_step(mut self, n: u32) -> Self {
        self.fail_at_step = Some(n);
        self
    }

    fn current_frame(&self) -> Frame {
        self.frames.get(self.cursor).cloned().unwrap_or_default()
    }

    /// Total elementary steps taken so far
    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    /// Whether `close` has been called
    pub fn was_closed(&self) -> bool {
        self.closed
    }

    /// Recorded phase commands, in issue order
    pub fn phase_log(&self) -> &[(u32, usize)] {
        &self.phase_log
    }

    /// The route plan the session was started with
    pub fn plan(&self) -> Option<&RoutePlan> {
        self.plan.as_ref()
    }
}

impl TrafficSim for ScriptedSim {
    fn begin(&mut self, plan: &RoutePlan) -> Result<(), SimError> {
        if self.started {
            return Err(SimError::Start("session already started".to_string()));
        }
        self.started = true;
        self.plan = Some(plan.clone());
        Ok(())
    }

    fn step(&mut self) -> Result<(), SimError> {
        if !self.started || self.closed {
            return Err(SimError::Step("no active session".to_string()));
        }
        if self.fail_at_step == Some(self.steps_taken) {
            return Err(SimError::Step("scripted failure".to_string()));
        }
        self.cursor += 1;
        self.steps_taken += 1;
        Ok(())
    }

    fn vehicles(&mut self) -> Result<Vec<VehicleState>, SimError> {
        if !self.started || self.closed {
            return Err(SimError::Query("no active session".to_string()));
        }
        Ok(self.current_frame().vehicles)
    }

    fn halting_count(&mut self, edge: &str) -> Result<u32, SimError> {
        if !self.started || self.closed {
            return Err(SimError::Query("no active session".to_string()));
        }
        Ok(self
            .current_frame()
            .halting
            .get(edge)
            .copied()
            .unwrap_or(0))
    }

    fn set_phase(&mut self, phase: usize) -> Result<(), SimError> {
        if !self.started || self.closed {
            return Err(SimError::Command("no active session".to_string()));
        }
        self.phase_log.push((self.steps_taken, phase));
        Ok(())
    }

    fn close(&mut self) -> Result<(), SimError> {
        self.closed = true;
        Ok(())
    }
}
