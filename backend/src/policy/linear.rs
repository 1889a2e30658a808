//! Linear value policy
//!
//! Simplest concrete policy: one weight row per phase, value = row · state.
//! Weights come from an evaluation artifact (JSON), so a trained value
//! function exported by the research harness can be replayed here without
//! pulling a learning framework into the evaluator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DecisionPolicy;

/// Errors raised while constructing a policy
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A policy with no actions cannot control a signal.
    #[error("policy has no weight rows")]
    NoActions,

    /// Every action row must score the same state vector.
    #[error("weight row {row} has length {got}, expected {expected}")]
    RaggedWeights {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// The weight artifact could not be parsed.
    #[error("failed to parse policy weights: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Per-phase linear value function over the encoded state
///
/// # Example
/// ```
/// use signal_eval_core_rs::policy::{DecisionPolicy, LinearPolicy};
///
/// let policy = LinearPolicy::new(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
/// let values = policy.action_values(&[0.0, 1.0]);
/// assert_eq!(values, vec![0.0, 1.0]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearPolicy {
    /// One row per action; row length = state vector length
    weights: Vec<Vec<f64>>,
}

impl LinearPolicy {
    /// Create a policy from explicit weight rows
    pub fn new(weights: Vec<Vec<f64>>) -> Result<Self, PolicyError> {
        if weights.is_empty() {
            return Err(PolicyError::NoActions);
        }
        let expected = weights[0].len();
        for (row, row_weights) in weights.iter().enumerate() {
            if row_weights.len() != expected {
                return Err(PolicyError::RaggedWeights {
                    row,
                    expected,
                    got: row_weights.len(),
                });
            }
        }
        Ok(Self { weights })
    }

    /// Load weights from a JSON array-of-arrays
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let weights: Vec<Vec<f64>> = serde_json::from_str(json)?;
        Self::new(weights)
    }

    /// Number of actions this policy scores
    pub fn num_actions(&self) -> usize {
        self.weights.len()
    }
}

impl DecisionPolicy for LinearPolicy {
    fn action_values(&self, state: &[f32]) -> Vec<f64> {
        self.weights
            .iter()
            .map(|row| {
                row.iter()
                    .zip(state.iter())
                    .map(|(&weight, &flag)| weight * f64::from(flag))
                    .sum()
            })
            .collect()
    }
}
