//! Waiting-time ledger for the incoming approaches
//!
//! Tracks, per vehicle, the accumulated seconds waited while the vehicle is
//! on one of the four incoming edges. The moment a vehicle is no longer
//! reported there (it crossed the junction, drove away, or despawned) its
//! entry is removed; removal is what signals clearance, not staleness.
//!
//! One tracker is constructed per episode and never shared across episodes.

use std::collections::{HashMap, HashSet};

use crate::models::{Approach, VehicleState};

/// Per-vehicle accumulated waiting time, restricted to incoming approaches
///
/// Invariant: the ledger never contains an entry for a vehicle that is not
/// currently on a tracked incoming approach.
///
/// # Example
/// ```
/// use signal_eval_core_rs::{VehicleState, WaitTracker};
///
/// let mut tracker = WaitTracker::new();
/// let on_approach = vec![VehicleState::on_lane("car", "DR2_0", 120.0, 7.5)];
/// assert_eq!(tracker.update(&on_approach), 7.5);
///
/// // The vehicle clears the intersection: its wait no longer counts.
/// let cleared = vec![VehicleState::on_lane("car", "UR2_0", 10.0, 9.0)];
/// assert_eq!(tracker.update(&cleared), 0.0);
/// ```
#[derive(Debug, Default)]
pub struct WaitTracker {
    ledger: HashMap<String, f64>,
}

impl WaitTracker {
    /// Create an empty ledger for a new episode
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the ledger against the current live vehicles and return
    /// the total accumulated waiting time
    ///
    /// Called once per elementary step. Entries for vehicles reported on an
    /// incoming approach are overwritten with the simulator's accumulated
    /// wait; every other entry is deleted on the spot.
    pub fn update(&mut self, vehicles: &[VehicleState]) -> f64 {
        let mut on_approach: HashSet<&str> = HashSet::with_capacity(vehicles.len());

        for vehicle in vehicles {
            if Approach::from_edge(&vehicle.road_id).is_some() {
                self.ledger
                    .insert(vehicle.id.clone(), vehicle.accumulated_wait);
                on_approach.insert(vehicle.id.as_str());
            }
        }

        self.ledger.retain(|id, _| on_approach.contains(id.as_str()));

        self.ledger.values().sum()
    }

    /// Number of vehicles currently tracked
    pub fn tracked_count(&self) -> usize {
        self.ledger.len()
    }
}
