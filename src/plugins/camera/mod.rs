//! Camera plugin (render-only).
//!
//! The camera is the "observer" of the viewpoint hand-off. Gameplay only
//! advances the progress ratio (`plugins::transition`); this plugin turns
//! that ratio into the cinematic glide:
//!
//! ```text
//! OnEnter(Transition) happens in gameplay; the first glide frame here
//! captures the start pose into TransitionState.
//! Update: glide toward behind-and-above the (still moving) third agent,
//!         re-aiming at its head every frame.
//! After the hand-off: soft exponential follow of the third agent.
//! ```

use bevy::prelude::*;

use crate::common::math::ease_in_out_cubic;
use crate::common::state::GamePhase;
use crate::plugins::agents::{Agent, AgentId};
use crate::plugins::transition::TransitionState;

/// Shoulder offset of the follow pose: behind and above the agent.
pub const FOLLOW_OFFSET: Vec3 = Vec3::new(-5.0, 8.0, 10.0);
/// The look-at point sits this far above the agent's feet (head height).
pub const LOOK_HEIGHT: f32 = 1.0;
/// How far ahead of the lens the captured start target sits.
const LOOK_AHEAD: f32 = 10.0;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera).add_systems(
        Update,
        (
            glide_transition.run_if(in_state(GamePhase::Transition)),
            follow_third_agent.run_if(after_handoff),
        ),
    );
}

fn after_handoff(phase: Res<State<GamePhase>>) -> bool {
    matches!(phase.get(), GamePhase::ThirdAgentControl | GamePhase::CarCharge)
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera3d::default(),
        MainCamera { responsiveness: 5.0 },
        Transform::from_xyz(0.0, 10.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Drive the hand-off glide from the gameplay progress ratio.
///
/// The destination is anchored on the third agent's *current* position
/// (it is usually still walking), so both the position lerp target and the
/// look-at point are recomputed every frame, not just at the endpoints.
fn glide_transition(
    mut state: ResMut<TransitionState>,
    q_agents: Query<(&AgentId, &Transform), (With<Agent>, Without<MainCamera>)>,
    mut q_cam: Query<&mut Transform, (With<MainCamera>, Without<Agent>)>,
) {
    let Ok(mut cam_tf) = q_cam.single_mut() else {
        return;
    };

    // First glide frame: capture where the observer starts from.
    if state.start_position.is_none() {
        state.start_position = Some(cam_tf.translation);
        state.start_target = Some(cam_tf.translation + cam_tf.forward() * LOOK_AHEAD);
    }
    let (start_pos, start_target) = match (state.start_position, state.start_target) {
        (Some(p), Some(t)) => (p, t),
        _ => return,
    };

    let Some(agent_pos) = q_agents
        .iter()
        .find(|(id, _)| **id == AgentId::ThirdAgent)
        .map(|(_, tf)| tf.translation)
    else {
        return;
    };

    let eased = ease_in_out_cubic(state.progress);
    let head = agent_pos + Vec3::Y * LOOK_HEIGHT;

    cam_tf.translation = start_pos.lerp(agent_pos + FOLLOW_OFFSET, eased);
    let look_target = start_target.lerp(head, eased);
    cam_tf.look_at(look_target, Vec3::Y);
}

/// After the hand-off: settle smoothly behind the third agent.
fn follow_third_agent(
    time: Res<Time>,
    q_agents: Query<(&AgentId, &Transform), (With<Agent>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Agent>>,
) {
    let Ok((mut cam_tf, cam)) = q_cam.single_mut() else {
        return;
    };
    let Some(agent_pos) = q_agents
        .iter()
        .find(|(id, _)| **id == AgentId::ThirdAgent)
        .map(|(_, tf)| tf.translation)
    else {
        return;
    };

    let alpha = 1.0 - (-cam.responsiveness * time.delta_secs()).exp();
    cam_tf.translation = cam_tf.translation.lerp(agent_pos + FOLLOW_OFFSET, alpha);
    cam_tf.look_at(agent_pos + Vec3::Y * LOOK_HEIGHT, Vec3::Y);
}
