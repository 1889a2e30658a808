//! Domain models for the signal-control evaluator

pub mod observation;
pub mod route;
pub mod spawn;
pub mod trace;

// Re-exports
pub use observation::VehicleState;
pub use route::{Approach, Route};
pub use spawn::{RoutePlan, SpawnEvent};
pub use trace::EpisodeTrace;
