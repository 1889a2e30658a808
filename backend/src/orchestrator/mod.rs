//! Episode orchestration - the evaluation loop
//!
//! Drives one full episode against an external simulator session, in two
//! variants: the adaptive runner (policy-selected phases) and the fixed-time
//! baseline (the simulator's own signal timing).
//!
//! See `engine.rs` for the full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{EpisodeConfig, EpisodeError, EpisodeReport, EpisodeRunner, FixedTimeRunner};
