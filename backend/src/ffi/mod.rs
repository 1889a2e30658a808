//! Python bindings
//!
//! Exposes the demand generator, state encoder, and wait tracker to the
//! Python research harness, which owns the simulator process and the trained
//! model. The FFI surface is deliberately minimal: plain tuples in, plain
//! lists out, no shared mutable state across the boundary.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::demand::DemandGenerator;
use crate::encoder::StateEncoder;
use crate::models::VehicleState;
use crate::waiting::WaitTracker;

/// Per-episode demand generation for the Python harness
#[pyclass(name = "DemandGenerator")]
pub struct PyDemandGenerator {
    inner: DemandGenerator,
}

#[pymethods]
impl PyDemandGenerator {
    #[new]
    fn new(max_steps: u32, n_cars: u32) -> PyResult<Self> {
        DemandGenerator::new(max_steps, n_cars)
            .map(|inner| Self { inner })
            .map_err(|error| PyValueError::new_err(error.to_string()))
    }

    /// Spawn schedule as `(step, route_id, vehicle_id)` tuples, step-ordered
    fn generate(&self, seed: u64) -> Vec<(u32, String, String)> {
        self.inner
            .generate(seed)
            .events
            .into_iter()
            .map(|event| (event.step, event.route.id().to_string(), event.vehicle_id))
            .collect()
    }

    /// The full route-definition document for the simulator
    fn route_document(&self, seed: u64) -> String {
        self.inner.generate(seed).to_route_document()
    }
}

/// Occupancy-grid encoding for the Python harness
#[pyclass(name = "StateEncoder")]
pub struct PyStateEncoder {
    inner: StateEncoder,
}

#[pymethods]
impl PyStateEncoder {
    #[new]
    fn new(num_states: usize, max_lane_length: f64) -> PyResult<Self> {
        StateEncoder::new(num_states, max_lane_length)
            .map(|inner| Self { inner })
            .map_err(|error| PyValueError::new_err(error.to_string()))
    }

    /// Encode `(lane_id, lane_position)` pairs into the occupancy vector
    fn encode(&self, vehicles: Vec<(String, f64)>) -> Vec<f32> {
        let states: Vec<VehicleState> = vehicles
            .iter()
            .enumerate()
            .map(|(index, (lane_id, lane_position))| {
                VehicleState::on_lane(&format!("v{}", index), lane_id, *lane_position, 0.0)
            })
            .collect();
        self.inner.encode(&states)
    }
}

/// Waiting-time ledger for the Python harness
///
/// Stateful across calls within one episode; construct a fresh tracker per
/// episode, exactly as the native runners do.
#[pyclass(name = "WaitTracker")]
pub struct PyWaitTracker {
    inner: WaitTracker,
}

#[pymethods]
impl PyWaitTracker {
    #[new]
    fn new() -> Self {
        Self {
            inner: WaitTracker::new(),
        }
    }

    /// Reconcile `(vehicle_id, road_id, accumulated_wait)` triples and
    /// return the total waiting time on the incoming approaches
    fn update(&mut self, vehicles: Vec<(String, String, f64)>) -> f64 {
        let states: Vec<VehicleState> = vehicles
            .into_iter()
            .map(|(id, road_id, accumulated_wait)| VehicleState {
                lane_id: format!("{}_0", road_id),
                road_id,
                id,
                lane_position: 0.0,
                accumulated_wait,
            })
            .collect();
        self.inner.update(&states)
    }

    /// Number of vehicles currently tracked
    fn tracked_count(&self) -> usize {
        self.inner.tracked_count()
    }
}
