//! Deterministic random number generation
//!
//! Every random draw in the evaluator goes through `EpisodeRng`, which is
//! constructed from an explicit seed. There is no process-global generator:
//! a generator is built per call site (one per demand-generation call), so
//! episodes cannot interfere with each other regardless of execution order.

mod source;

pub use source::EpisodeRng;
