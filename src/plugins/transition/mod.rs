//! Viewpoint transition controller.
//!
//! Gameplay half of the camera hand-off: a time-boxed progress ratio that,
//! on completion, flips control to the third agent and advances the phase,
//! exactly once. The cinematic camera glide itself is render-only (see
//! `plugins::camera`); a headless app still runs the hand-off to completion.

use bevy::prelude::*;

use crate::common::state::GamePhase;
use crate::plugins::agents::{ActiveAgent, AgentId};

pub const TRANSITION_DURATION: f32 = 2.0;

/// Progress of the hand-off. `progress` is exposed read-only to the
/// presentation layer for screen effects; `completed` latches the control
/// flip so repeated completion ticks are no-ops.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct TransitionState {
    pub elapsed: f32,
    /// In [0, 1].
    pub progress: f32,
    pub completed: bool,
    /// Observer pose captured by the render layer on its first glide frame.
    pub start_position: Option<Vec3>,
    pub start_target: Option<Vec3>,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<TransitionState>();
    app.add_systems(OnEnter(GamePhase::Transition), begin_transition);
    app.add_systems(
        Update,
        advance_transition
            .after(crate::plugins::director::drive_car_reversing)
            .run_if(in_state(GamePhase::Transition)),
    );
}

pub fn begin_transition(mut state: ResMut<TransitionState>) {
    *state = TransitionState::default();
}

/// Advance the progress ratio; at 1.0 flip control and phase, once.
pub fn advance_transition(
    time: Res<Time>,
    mut state: ResMut<TransitionState>,
    mut active: ResMut<ActiveAgent>,
    mut next: ResMut<NextState<GamePhase>>,
) {
    if state.completed {
        return;
    }

    state.elapsed += time.delta_secs();
    state.progress = (state.elapsed / TRANSITION_DURATION).min(1.0);

    if state.progress >= 1.0 {
        state.completed = true;
        active.0 = AgentId::ThirdAgent;
        next.set(GamePhase::ThirdAgentControl);
    }
}

#[cfg(test)]
mod tests;
