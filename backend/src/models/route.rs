//! Intersection topology: approaches and the closed route set
//!
//! The evaluated junction has four incoming edges and four outgoing edges.
//! Traffic moves along one of twelve fixed origin→destination routes: four
//! straight-through movements plus eight turning movements (a left and a
//! right turn out of each approach).
//!
//! Edge naming follows the junction network definition:
//! - Incoming: `DR2` (south), `RU1` (east), `UL2` (north), `LD1` (west)
//! - Outgoing: `UR2` (north), `LU1` (west), `DL2` (south), `RD1` (east)

use serde::{Deserialize, Serialize};

/// One of the four incoming roads feeding the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Approach {
    /// Coming from the south on edge `DR2`
    South,
    /// Coming from the east on edge `RU1`
    East,
    /// Coming from the north on edge `UL2`
    North,
    /// Coming from the west on edge `LD1`
    West,
}

impl Approach {
    /// All four approaches, in network definition order
    pub const ALL: [Approach; 4] = [
        Approach::South,
        Approach::East,
        Approach::North,
        Approach::West,
    ];

    /// The incoming edge id for this approach
    pub fn incoming_edge(&self) -> &'static str {
        match self {
            Approach::South => "DR2",
            Approach::East => "RU1",
            Approach::North => "UL2",
            Approach::West => "LD1",
        }
    }

    /// Resolve a simulator-reported road id to a tracked approach
    ///
    /// Returns `None` for any road that is not one of the four incoming
    /// edges (the junction interior, outgoing edges, or anything else the
    /// network defines). Vehicles there are simply not tracked.
    ///
    /// # Example
    /// ```
    /// use signal_eval_core_rs::Approach;
    ///
    /// assert_eq!(Approach::from_edge("DR2"), Some(Approach::South));
    /// assert_eq!(Approach::from_edge("UR2"), None);
    /// ```
    pub fn from_edge(road_id: &str) -> Option<Approach> {
        match road_id {
            "DR2" => Some(Approach::South),
            "RU1" => Some(Approach::East),
            "UL2" => Some(Approach::North),
            "LD1" => Some(Approach::West),
            _ => None,
        }
    }
}

/// A fixed origin-edge → destination-edge path through the intersection
///
/// The set is closed: demand generation only ever assigns one of these
/// twelve movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// `DR2 → UR2`, straight through
    SouthToNorth,
    /// `RU1 → LU1`, straight through
    EastToWest,
    /// `UL2 → DL2`, straight through
    NorthToSouth,
    /// `LD1 → RD1`, straight through
    WestToEast,
    /// `DR2 → LU1`, left turn
    SouthToWest,
    /// `DR2 → RD1`, right turn
    SouthToEast,
    /// `RU1 → DL2`, left turn
    EastToSouth,
    /// `RU1 → UR2`, right turn
    EastToNorth,
    /// `UL2 → RD1`, left turn
    NorthToEast,
    /// `UL2 → LU1`, right turn
    NorthToWest,
    /// `LD1 → UR2`, left turn
    WestToNorth,
    /// `LD1 → DL2`, right turn
    WestToSouth,
}

impl Route {
    /// The four straight-through movements, in demand-table order
    pub const STRAIGHT: [Route; 4] = [
        Route::SouthToNorth,
        Route::EastToWest,
        Route::NorthToSouth,
        Route::WestToEast,
    ];

    /// The eight turning movements, in demand-table order
    pub const TURNING: [Route; 8] = [
        Route::SouthToWest,
        Route::SouthToEast,
        Route::EastToSouth,
        Route::EastToNorth,
        Route::NorthToEast,
        Route::NorthToWest,
        Route::WestToNorth,
        Route::WestToSouth,
    ];

    /// All twelve defined routes
    pub const ALL: [Route; 12] = [
        Route::SouthToNorth,
        Route::EastToWest,
        Route::NorthToSouth,
        Route::WestToEast,
        Route::SouthToWest,
        Route::SouthToEast,
        Route::EastToSouth,
        Route::EastToNorth,
        Route::NorthToEast,
        Route::NorthToWest,
        Route::WestToNorth,
        Route::WestToSouth,
    ];

    /// Route id as it appears in the route-definition document
    pub fn id(&self) -> &'static str {
        match self {
            Route::SouthToNorth => "DR2_UR2",
            Route::EastToWest => "RU1_LU1",
            Route::NorthToSouth => "UL2_DL2",
            Route::WestToEast => "LD1_RD1",
            Route::SouthToWest => "DR2_LU1",
            Route::SouthToEast => "DR2_RD1",
            Route::EastToSouth => "RU1_DL2",
            Route::EastToNorth => "RU1_UR2",
            Route::NorthToEast => "UL2_RD1",
            Route::NorthToWest => "UL2_LU1",
            Route::WestToNorth => "LD1_UR2",
            Route::WestToSouth => "LD1_DL2",
        }
    }

    /// Origin edge (one of the four incoming edges)
    pub fn origin_edge(&self) -> &'static str {
        self.origin().incoming_edge()
    }

    /// Destination edge (one of the four outgoing edges)
    pub fn destination_edge(&self) -> &'static str {
        match self {
            Route::SouthToNorth | Route::EastToNorth | Route::WestToNorth => "UR2",
            Route::EastToWest | Route::SouthToWest | Route::NorthToWest => "LU1",
            Route::NorthToSouth | Route::EastToSouth | Route::WestToSouth => "DL2",
            Route::WestToEast | Route::SouthToEast | Route::NorthToEast => "RD1",
        }
    }

    /// The approach the route enters from
    pub fn origin(&self) -> Approach {
        match self {
            Route::SouthToNorth | Route::SouthToWest | Route::SouthToEast => Approach::South,
            Route::EastToWest | Route::EastToSouth | Route::EastToNorth => Approach::East,
            Route::NorthToSouth | Route::NorthToEast | Route::NorthToWest => Approach::North,
            Route::WestToEast | Route::WestToNorth | Route::WestToSouth => Approach::West,
        }
    }

    /// Whether the route crosses the intersection without turning
    pub fn is_straight(&self) -> bool {
        Route::STRAIGHT.contains(self)
    }
}
