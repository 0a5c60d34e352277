use bevy::prelude::*;

use crate::common::state::GamePhase;
use crate::common::test_utils::{run_system_once, time_with_delta};
use crate::plugins::agents::{ActiveAgent, AgentId};

use super::*;

fn world_with(state: TransitionState, dt: f32) -> World {
    let mut world = World::new();
    world.insert_resource(time_with_delta(dt));
    world.insert_resource(state);
    world.insert_resource(ActiveAgent(AgentId::Player));
    world.init_resource::<NextState<GamePhase>>();
    world
}

#[test]
fn progress_advances_linearly() {
    let mut world = world_with(TransitionState::default(), 0.5);
    run_system_once(&mut world, super::advance_transition);

    let state = world.resource::<TransitionState>();
    assert!((state.progress - 0.25).abs() < 1e-5);
    assert!(!state.completed);
    assert_eq!(world.resource::<ActiveAgent>().0, AgentId::Player);
}

#[test]
fn progress_clamps_at_one_and_completes() {
    let state = TransitionState { elapsed: 1.9, progress: 0.95, ..default() };
    let mut world = world_with(state, 0.5);
    run_system_once(&mut world, super::advance_transition);

    let state = world.resource::<TransitionState>();
    assert_eq!(state.progress, 1.0);
    assert!(state.completed);
    assert_eq!(world.resource::<ActiveAgent>().0, AgentId::ThirdAgent);
    assert!(matches!(
        world.resource::<NextState<GamePhase>>(),
        NextState::Pending(GamePhase::ThirdAgentControl)
    ));
}

#[test]
fn completion_is_latched() {
    let state = TransitionState { elapsed: 2.5, progress: 1.0, completed: true, ..default() };
    let mut world = world_with(state, 0.5);
    run_system_once(&mut world, super::advance_transition);

    // A completed hand-off never re-fires or keeps counting.
    let state = world.resource::<TransitionState>();
    assert_eq!(state.elapsed, 2.5);
    assert_eq!(world.resource::<ActiveAgent>().0, AgentId::Player);
    assert!(matches!(
        world.resource::<NextState<GamePhase>>(),
        NextState::Unchanged
    ));
}

#[test]
fn begin_transition_clears_previous_run() {
    let mut world = World::new();
    world.insert_resource(TransitionState {
        elapsed: 2.0,
        progress: 1.0,
        completed: true,
        start_position: Some(Vec3::ONE),
        start_target: Some(Vec3::ONE),
    });

    run_system_once(&mut world, super::begin_transition);

    let state = world.resource::<TransitionState>();
    assert_eq!(state.elapsed, 0.0);
    assert_eq!(state.progress, 0.0);
    assert!(!state.completed);
    assert!(state.start_position.is_none());
    assert!(state.start_target.is_none());
}
