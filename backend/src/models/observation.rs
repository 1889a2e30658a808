//! Per-vehicle simulator snapshot
//!
//! The simulator reports, for every live vehicle, where it is and how long
//! it has waited. This snapshot is the only input the state encoder and the
//! wait tracker consume; neither queries the simulator directly.

use serde::{Deserialize, Serialize};

/// One live vehicle as reported by the simulator at the current step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Simulator vehicle id
    pub id: String,
    /// Road (edge) the vehicle currently occupies
    pub road_id: String,
    /// Physical lane id, e.g. `DR2_0`
    pub lane_id: String,
    /// Position along the lane in meters, measured from the lane start
    pub lane_position: f64,
    /// Seconds the vehicle has spent waiting since it spawned
    pub accumulated_wait: f64,
}

impl VehicleState {
    /// Convenience constructor for a vehicle on a known lane
    ///
    /// The road id is derived from the lane id by stripping the lane index
    /// suffix, matching the simulator's `edge_lane` naming convention.
    pub fn on_lane(id: &str, lane_id: &str, lane_position: f64, accumulated_wait: f64) -> Self {
        let road_id = lane_id
            .rsplit_once('_')
            .map(|(edge, _)| edge.to_string())
            .unwrap_or_else(|| lane_id.to_string());
        Self {
            id: id.to_string(),
            road_id,
            lane_id: lane_id.to_string(),
            lane_position,
            accumulated_wait,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_lane_derives_road_id() {
        let vehicle = VehicleState::on_lane("DR2_UR2_0", "DR2_1", 42.0, 0.0);
        assert_eq!(vehicle.road_id, "DR2");
        assert_eq!(vehicle.lane_id, "DR2_1");
    }

    #[test]
    fn test_on_lane_without_suffix_keeps_id() {
        let vehicle = VehicleState::on_lane("v0", "J1", 0.0, 0.0);
        assert_eq!(vehicle.road_id, "J1");
    }
}
