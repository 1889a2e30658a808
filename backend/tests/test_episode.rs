//! Integration tests for the adaptive episode runner
//!
//! Driven against the scripted simulator double, which records every
//! command so the decision cycle can be asserted step by step.

use signal_eval_core_rs::sim::Frame;
use signal_eval_core_rs::{
    EpisodeConfig, EpisodeError, EpisodeRunner, LinearPolicy, ScriptedSim, VehicleState,
};

/// Policy with one indicator weight per action: action 0 fires on state
/// index 0, action 1 on state index 10, actions 2 and 3 never.
fn indicator_policy() -> LinearPolicy {
    let mut rows = vec![vec![0.0; 80]; 4];
    rows[0][0] = 1.0;
    rows[1][10] = 1.0;
    LinearPolicy::new(rows).unwrap()
}

fn config(max_steps: u32, green: u32, yellow: u32) -> EpisodeConfig {
    EpisodeConfig {
        max_steps,
        n_cars: 2,
        green_duration: green,
        yellow_duration: yellow,
        ..EpisodeConfig::default()
    }
}

#[test]
fn test_step_budget_never_exceeded() {
    // A single green activation nominally requests 45 steps, but the
    // episode budget is 10: the runner must stop at exactly 10.
    let runner = EpisodeRunner::new(config(10, 45, 4)).unwrap();
    let mut sim = ScriptedSim::empty();

    let report = runner.run(&mut sim, &indicator_policy(), 1).unwrap();

    assert_eq!(report.steps, 10);
    assert_eq!(sim.steps_taken(), 10);
    assert_eq!(report.trace.queue_lengths().len(), 10);
    assert_eq!(report.trace.rewards().len(), 1);
    assert!(sim.was_closed());
}

#[test]
fn test_phase_commands_and_yellow_interlude() {
    // Frames 0..5 show a vehicle on DR2_0 near the signal (state index 0),
    // frames 5.. show it on DR2_2 (state index 10), so the greedy action
    // flips from 0 to 1 at the second decision point.
    let near_signal = VehicleState::on_lane("car", "DR2_0", 195.0, 0.0);
    let turn_lane = VehicleState::on_lane("car", "DR2_2", 195.0, 0.0);
    let mut frames = Vec::new();
    for step in 0..40 {
        let vehicle = if step < 5 {
            near_signal.clone()
        } else {
            turn_lane.clone()
        };
        frames.push(Frame::with_vehicles(vec![vehicle]));
    }

    let runner = EpisodeRunner::new(config(30, 5, 2)).unwrap();
    let mut sim = ScriptedSim::new(frames);
    let report = runner.run(&mut sim, &indicator_policy(), 7).unwrap();

    // Decision 1 at step 0 activates phase 0 with no interlude. Decision 2
    // at step 5 switches to phase 1, paying 2 interlude steps first. Later
    // decisions keep phase 1, so no further interludes are consumed.
    assert_eq!(
        sim.phase_log(),
        &[(0, 0), (7, 1), (12, 1), (17, 1), (22, 1), (27, 1)]
    );
    assert_eq!(report.steps, 30);
    assert_eq!(report.trace.queue_lengths().len(), 30);
    assert_eq!(report.trace.rewards().len(), 6);
}

#[test]
fn test_no_interlude_before_first_decision() {
    // Even though the dummy "previous action" differs from every real
    // action, the first decision must not consume interlude steps.
    let runner = EpisodeRunner::new(config(6, 3, 2)).unwrap();
    let mut sim = ScriptedSim::empty();
    let report = runner.run(&mut sim, &indicator_policy(), 3).unwrap();

    // 6 steps / 3-step greens = exactly 2 decision points; an interlude
    // before the first would have shifted the phase command offsets.
    assert_eq!(sim.phase_log(), &[(0, 0), (3, 0)]);
    assert_eq!(report.trace.rewards().len(), 2);
}

#[test]
fn test_reward_is_drop_in_total_wait() {
    // Waits: step 0 → 2.0, steps 1..2 → 5.0, from step 3 the vehicle has
    // cleared the intersection.
    let mut frames = vec![
        Frame::with_vehicles(vec![VehicleState::on_lane("car", "DR2_0", 180.0, 2.0)]),
        Frame::with_vehicles(vec![VehicleState::on_lane("car", "DR2_0", 180.0, 5.0)]),
        Frame::with_vehicles(vec![VehicleState::on_lane("car", "DR2_0", 180.0, 5.0)]),
    ];
    frames.push(Frame::with_vehicles(vec![VehicleState::on_lane(
        "car", "UR2_0", 10.0, 5.0,
    )]));

    let runner = EpisodeRunner::new(config(4, 1, 0)).unwrap();
    let mut sim = ScriptedSim::new(frames);
    let report = runner.run(&mut sim, &indicator_policy(), 11).unwrap();

    // Decision points fall on steps 0, 1, 2, 3; totals seen there are
    // 2.0, 5.0, 5.0, 0.0.
    assert_eq!(report.trace.rewards(), &[-2.0, -3.0, 0.0, 5.0]);
}

#[test]
fn test_queue_samples_come_from_halting_counts() {
    let frames: Vec<Frame> = (0..6)
        .map(|_| Frame::default().halted("DR2", 2).halted("RU1", 1).halted("LD1", 4))
        .collect();

    let runner = EpisodeRunner::new(config(5, 5, 0)).unwrap();
    let mut sim = ScriptedSim::new(frames);
    let report = runner.run(&mut sim, &indicator_policy(), 5).unwrap();

    assert_eq!(report.trace.queue_lengths(), &[7, 7, 7, 7, 7]);
    assert_eq!(report.trace.max_queue_length(), 7);
    assert_eq!(report.trace.average_queue_length(), 7.0);
}

#[test]
fn test_session_released_on_step_failure() {
    let runner = EpisodeRunner::new(config(10, 45, 4)).unwrap();
    let mut sim = ScriptedSim::empty().fail_at_step(3);

    let result = runner.run(&mut sim, &indicator_policy(), 1);

    assert!(matches!(result, Err(EpisodeError::Sim(_))));
    assert!(sim.was_closed(), "session must be released on failure too");
}

#[test]
fn test_policy_with_wrong_action_count_fails_fast() {
    let runner = EpisodeRunner::new(config(10, 5, 2)).unwrap();
    let short_policy = LinearPolicy::new(vec![vec![0.0; 80]; 2]).unwrap();
    let mut sim = ScriptedSim::empty();

    let result = runner.run(&mut sim, &short_policy, 1);
    assert!(matches!(
        result,
        Err(EpisodeError::ActionValueCount {
            expected: 4,
            got: 2
        })
    ));
    assert!(sim.was_closed());
}

#[test]
fn test_identical_seed_identical_trace() {
    let frames: Vec<Frame> = (0..20)
        .map(|i| {
            Frame::with_vehicles(vec![VehicleState::on_lane(
                "car",
                "RU1_1",
                100.0 + f64::from(i),
                f64::from(i),
            )])
            .halted("RU1", i % 3)
        })
        .collect();

    let runner = EpisodeRunner::new(config(20, 4, 2)).unwrap();
    let policy = indicator_policy();

    let mut first = ScriptedSim::new(frames.clone());
    let mut second = ScriptedSim::new(frames);
    let report_a = runner.run(&mut first, &policy, 99).unwrap();
    let report_b = runner.run(&mut second, &policy, 99).unwrap();

    assert_eq!(report_a.trace, report_b.trace);
    assert_eq!(first.plan(), second.plan());
}

#[test]
fn test_sim_receives_generated_plan() {
    let runner = EpisodeRunner::new(config(10, 5, 2)).unwrap();
    let mut sim = ScriptedSim::empty();
    runner.run(&mut sim, &indicator_policy(), 42).unwrap();

    let plan = sim.plan().expect("begin must receive the route plan");
    assert_eq!(plan.seed, 42);
    assert_eq!(plan.len(), 2);
    assert!(plan.events.iter().all(|e| e.step <= 10));
}
