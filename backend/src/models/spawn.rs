//! Spawn events and the per-episode route plan
//!
//! A `RoutePlan` is produced once per episode by the demand generator and
//! handed to the simulator as a route-definition document: one vehicle-type
//! declaration, the twelve named routes, then one spawn instruction per
//! vehicle in ascending step order. Events are immutable once generated.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use super::route::Route;

/// One scheduled vehicle insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnEvent {
    /// Elementary step at which the vehicle enters the network
    pub step: u32,
    /// Assigned origin→destination movement
    pub route: Route,
    /// Unique id, derived from the route and the vehicle's ordinal position
    pub vehicle_id: String,
}

/// The full demand schedule for one episode
///
/// Invariant: every `step` lies in `[0, max_steps]` and the sequence is
/// non-decreasing in `step`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// Seed the plan was generated from
    pub seed: u64,
    /// Step horizon the spawn steps were reshaped onto
    pub max_steps: u32,
    /// Spawn events, ordered by step
    pub events: Vec<SpawnEvent>,
}

impl RoutePlan {
    /// Number of scheduled vehicles
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the plan schedules no vehicles
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Render the route-definition document consumed by the simulator
    ///
    /// Format: a `<routes>` document with the `standard_car` vehicle type,
    /// the twelve route definitions, and one `<vehicle>` element per spawn
    /// event in ascending depart order.
    pub fn to_route_document(&self) -> String {
        let mut doc = String::new();
        doc.push_str("<routes>\n");
        doc.push_str(
            "    <vType accel=\"1.0\" decel=\"4.5\" id=\"standard_car\" length=\"5.0\" \
             minGap=\"2.5\" maxSpeed=\"25\" sigma=\"0.5\" />\n\n",
        );

        for route in Route::ALL {
            let _ = writeln!(
                doc,
                "    <route id=\"{}\" edges=\"{} {}\"/>",
                route.id(),
                route.origin_edge(),
                route.destination_edge()
            );
        }
        doc.push('\n');

        for event in &self.events {
            let _ = writeln!(
                doc,
                "    <vehicle id=\"{}\" type=\"standard_car\" route=\"{}\" depart=\"{}\" \
                 departLane=\"random\" departSpeed=\"10\" />",
                event.vehicle_id,
                event.route.id(),
                event.step
            );
        }

        doc.push_str("</routes>\n");
        doc
    }
}
