//! Tests for the waiting-time ledger

use signal_eval_core_rs::{VehicleState, WaitTracker};

fn on_road(id: &str, road_id: &str, wait: f64) -> VehicleState {
    VehicleState {
        id: id.to_string(),
        road_id: road_id.to_string(),
        lane_id: format!("{}_0", road_id),
        lane_position: 50.0,
        accumulated_wait: wait,
    }
}

#[test]
fn test_total_spans_all_four_approaches() {
    let mut tracker = WaitTracker::new();
    let total = tracker.update(&[
        on_road("s", "DR2", 1.0),
        on_road("e", "RU1", 2.0),
        on_road("n", "UL2", 3.0),
        on_road("w", "LD1", 4.0),
    ]);
    assert_eq!(total, 10.0);
}

#[test]
fn test_presence_then_clearance() {
    let mut tracker = WaitTracker::new();

    // On an incoming approach for four consecutive steps, wait growing.
    for step in 1..=4 {
        let wait = f64::from(step) * 1.5;
        let total = tracker.update(&[on_road("car", "RU1", wait), on_road("other", "DR2", 1.0)]);
        assert_eq!(total, wait + 1.0);
        assert_eq!(tracker.tracked_count(), 2);
    }

    // The step it is observed past the junction its entry is gone and the
    // total no longer includes it.
    let total = tracker.update(&[on_road("car", "LU1", 99.0), on_road("other", "DR2", 2.0)]);
    assert_eq!(total, 2.0);
    assert_eq!(tracker.tracked_count(), 1);

    // Steps afterwards stay unaffected by the cleared vehicle.
    let total = tracker.update(&[on_road("other", "DR2", 3.0)]);
    assert_eq!(total, 3.0);
}

#[test]
fn test_despawned_vehicle_dropped_same_step() {
    let mut tracker = WaitTracker::new();
    tracker.update(&[on_road("ghost", "UL2", 8.0)]);
    assert_eq!(tracker.update(&[]), 0.0);
    assert_eq!(tracker.tracked_count(), 0);
}

#[test]
fn test_fresh_tracker_per_episode() {
    let mut first_episode = WaitTracker::new();
    first_episode.update(&[on_road("car", "DR2", 60.0)]);

    // A new episode's tracker starts empty; nothing leaks across episodes.
    let mut second_episode = WaitTracker::new();
    assert_eq!(second_episode.update(&[on_road("car", "DR2", 0.5)]), 0.5);
}

#[test]
fn test_wait_is_overwritten_not_accumulated() {
    let mut tracker = WaitTracker::new();
    tracker.update(&[on_road("car", "LD1", 10.0)]);
    // The simulator already reports the accumulated figure.
    assert_eq!(tracker.update(&[on_road("car", "LD1", 10.5)]), 10.5);
}
