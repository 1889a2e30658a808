//! Step accounting for one episode
//!
//! An episode advances in elementary simulator steps and must never exceed
//! its step budget, even when a single phase activation nominally requests
//! more steps than remain. `StepClock` owns that accounting.

use serde::{Deserialize, Serialize};

/// Tracks elementary steps taken against a fixed per-episode budget
///
/// # Example
/// ```
/// use signal_eval_core_rs::StepClock;
///
/// let mut clock = StepClock::new(100);
/// assert_eq!(clock.current_step(), 0);
/// assert_eq!(clock.remaining(), 100);
///
/// clock.advance();
/// assert_eq!(clock.current_step(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepClock {
    /// Elementary steps taken since episode start
    current_step: u32,
    /// Hard budget: the episode ends once this many steps are taken
    max_steps: u32,
}

impl StepClock {
    /// Create a new clock with the given step budget
    pub fn new(max_steps: u32) -> Self {
        assert!(max_steps > 0, "max_steps must be positive");
        Self {
            current_step: 0,
            max_steps,
        }
    }

    /// Record one elementary step
    pub fn advance(&mut self) {
        self.current_step += 1;
    }

    /// Elementary steps taken so far
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// Step budget for the episode
    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    /// Steps left before the budget is exhausted
    pub fn remaining(&self) -> u32 {
        self.max_steps - self.current_step
    }

    /// Whether the step budget has been fully consumed
    pub fn is_exhausted(&self) -> bool {
        self.current_step >= self.max_steps
    }

    /// Clamp a requested multi-step advance to the remaining budget
    ///
    /// A green phase nominally requests `green_duration` steps; near the end
    /// of the episode only the remainder may be taken.
    ///
    /// # Example
    /// ```
    /// use signal_eval_core_rs::StepClock;
    ///
    /// let mut clock = StepClock::new(10);
    /// for _ in 0..8 {
    ///     clock.advance();
    /// }
    /// assert_eq!(clock.clamp_request(45), 2);
    /// ```
    pub fn clamp_request(&self, requested: u32) -> u32 {
        requested.min(self.remaining())
    }
}
