//! Occupancy-grid state encoding
//!
//! Maps the simulator's live vehicles into a fixed-length vector of 0/1
//! occupancy flags: 8 lane-groups × 10 distance cells = 80 states. Distance
//! cells widen with distance from the stop line, so resolution is finest
//! where control decisions matter most.
//!
//! Physical lanes collapse into lane-groups per approach, split by whether
//! the lanes predominantly serve through traffic or turning traffic. A
//! vehicle whose lane cannot be resolved (crossing the junction, or already
//! past it) contributes no occupancy signal. The flat index is
//! `group * 10 + cell`, keeping index 0 reachable for group 0.

use thiserror::Error;

use crate::models::VehicleState;

/// Number of lane-groups in the encoding
pub const LANE_GROUPS: usize = 8;

/// Number of distance cells per lane-group
pub const DISTANCE_CELLS: usize = 10;

/// Upper edges of the first nine distance cells, in meters from the stop
/// line. The tenth cell covers the remainder up to `MAX_TRACKED_DISTANCE`.
const CELL_EDGES: [f64; 9] = [7.0, 14.0, 21.0, 28.0, 40.0, 60.0, 100.0, 160.0, 400.0];

/// Farthest distance still encoded; beyond this a vehicle is not tracked
const MAX_TRACKED_DISTANCE: f64 = 750.0;

/// Errors raised while configuring the encoder
#[derive(Debug, Error, PartialEq)]
pub enum EncoderError {
    /// The vector length must match the 8×10 occupancy grid exactly.
    #[error("state vector length {got} does not match the {expected}-cell occupancy grid")]
    StateSizeMismatch { expected: usize, got: usize },

    /// Lane length is used to invert lane positions into distances.
    #[error("max lane length must be positive, got {0}")]
    InvalidLaneLength(f64),
}

/// Coarse bucket of physical lanes sharing one slot in the state encoding
///
/// Each approach contributes two groups: its through lanes and its turning
/// lanes. Group indices are fixed by the encoding and must not change, or
/// state vectors stop being comparable across trained policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneGroup {
    /// South approach, through lanes (`DR2_0`, `DR2_1`)
    SouthThrough,
    /// South approach, turning lane (`DR2_2`)
    SouthTurn,
    /// East approach, through lanes (`RU1_0`..`RU1_2`)
    EastThrough,
    /// East approach, turning lanes (`RU1_3`, `RU1_4`)
    EastTurn,
    /// North approach, through lanes (`UL2_0`, `UL2_1`)
    NorthThrough,
    /// North approach, turning lane (`UL2_2`)
    NorthTurn,
    /// West approach, through lanes (`LD1_0`..`LD1_2`)
    WestThrough,
    /// West approach, turning lanes (`LD1_3`, `LD1_4`)
    WestTurn,
}

impl LaneGroup {
    /// Resolve a physical lane id to its group
    ///
    /// Returns `None` for junction-internal lanes, outgoing lanes, and any
    /// id the network does not define; such vehicles are excluded from the
    /// state vector.
    ///
    /// # Example
    /// ```
    /// use signal_eval_core_rs::encoder::LaneGroup;
    ///
    /// assert_eq!(LaneGroup::from_lane_id("DR2_0"), Some(LaneGroup::SouthThrough));
    /// assert_eq!(LaneGroup::from_lane_id("DR2_2"), Some(LaneGroup::SouthTurn));
    /// assert_eq!(LaneGroup::from_lane_id(":J1_4_0"), None);
    /// ```
    pub fn from_lane_id(lane_id: &str) -> Option<LaneGroup> {
        match lane_id {
            "DR2_0" | "DR2_1" => Some(LaneGroup::SouthThrough),
            "DR2_2" => Some(LaneGroup::SouthTurn),
            "RU1_0" | "RU1_1" | "RU1_2" => Some(LaneGroup::EastThrough),
            "RU1_3" | "RU1_4" => Some(LaneGroup::EastTurn),
            "UL2_0" | "UL2_1" => Some(LaneGroup::NorthThrough),
            "UL2_2" => Some(LaneGroup::NorthTurn),
            "LD1_0" | "LD1_1" | "LD1_2" => Some(LaneGroup::WestThrough),
            "LD1_3" | "LD1_4" => Some(LaneGroup::WestTurn),
            _ => None,
        }
    }

    /// Fixed group index within the encoding
    pub fn index(&self) -> usize {
        match self {
            LaneGroup::SouthThrough => 0,
            LaneGroup::SouthTurn => 1,
            LaneGroup::EastThrough => 2,
            LaneGroup::EastTurn => 3,
            LaneGroup::NorthThrough => 4,
            LaneGroup::NorthTurn => 5,
            LaneGroup::WestThrough => 6,
            LaneGroup::WestTurn => 7,
        }
    }
}

/// Map a distance from the stop line to its cell, or `None` if untracked
///
/// A vehicle at or past the stop line (distance ≤ 0) falls into cell 0;
/// a vehicle farther than 750 m is excluded rather than mis-binned.
fn distance_cell(distance: f64) -> Option<usize> {
    for (cell, &edge) in CELL_EDGES.iter().enumerate() {
        if distance < edge {
            return Some(cell);
        }
    }
    if distance <= MAX_TRACKED_DISTANCE {
        Some(DISTANCE_CELLS - 1)
    } else {
        None
    }
}

/// Pure encoder from live vehicles to the occupancy vector
///
/// Holds only configuration; `encode` retains no state between calls.
#[derive(Debug, Clone)]
pub struct StateEncoder {
    num_states: usize,
    max_lane_length: f64,
}

impl StateEncoder {
    /// Create an encoder for the given vector length and lane length
    ///
    /// `num_states` must equal the 8×10 grid; anything else indicates a
    /// configuration that cannot index correctly and is rejected up front.
    pub fn new(num_states: usize, max_lane_length: f64) -> Result<Self, EncoderError> {
        let expected = LANE_GROUPS * DISTANCE_CELLS;
        if num_states != expected {
            return Err(EncoderError::StateSizeMismatch {
                expected,
                got: num_states,
            });
        }
        if !(max_lane_length > 0.0) {
            return Err(EncoderError::InvalidLaneLength(max_lane_length));
        }
        Ok(Self {
            num_states,
            max_lane_length,
        })
    }

    /// Length of the vectors produced by `encode`
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// Encode live vehicles into the occupancy vector
    ///
    /// Pure function of the reported positions: identical input produces an
    /// identical vector. Multiple vehicles in the same cell collapse to a
    /// single flag.
    pub fn encode(&self, vehicles: &[VehicleState]) -> Vec<f32> {
        let mut state = vec![0.0_f32; self.num_states];

        for vehicle in vehicles {
            let Some(group) = LaneGroup::from_lane_id(&vehicle.lane_id) else {
                continue;
            };
            let distance = self.max_lane_length - vehicle.lane_position;
            let Some(cell) = distance_cell(distance) else {
                continue;
            };
            state[group.index() * DISTANCE_CELLS + cell] = 1.0;
        }

        state
    }
}
