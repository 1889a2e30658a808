//! Episode time series
//!
//! Two parallel append-only sequences record what happened during an
//! episode: one reward per decision point, one queue-length sample per
//! elementary simulator step. The trace is owned by the episode runner and
//! exposed read-only afterwards; a fresh trace is built for every episode.

use serde::{Deserialize, Serialize};

/// Reward and queue-length series for one episode
///
/// Invariant: `queue_lengths().len()` equals the number of elementary steps
/// taken; `rewards().len()` equals the number of decision points, which is
/// at most the number of elementary steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeTrace {
    rewards: Vec<f64>,
    queue_lengths: Vec<u32>,
}

impl EpisodeTrace {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one reward sample (one per decision point)
    pub fn push_reward(&mut self, reward: f64) {
        self.rewards.push(reward);
    }

    /// Append one queue-length sample (one per elementary step)
    pub fn push_queue_length(&mut self, queue_length: u32) {
        self.queue_lengths.push(queue_length);
    }

    /// Reward per decision point, in order
    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Queue length per elementary step, in order
    pub fn queue_lengths(&self) -> &[u32] {
        &self.queue_lengths
    }

    /// Sum of all rewards over the episode
    pub fn total_reward(&self) -> f64 {
        self.rewards.iter().sum()
    }

    /// Mean queue length over all recorded steps (0 for an empty trace)
    pub fn average_queue_length(&self) -> f64 {
        if self.queue_lengths.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.queue_lengths.iter().map(|&q| u64::from(q)).sum();
        sum as f64 / self.queue_lengths.len() as f64
    }

    /// Largest queue observed over the episode
    pub fn max_queue_length(&self) -> u32 {
        self.queue_lengths.iter().copied().max().unwrap_or(0)
    }
}
