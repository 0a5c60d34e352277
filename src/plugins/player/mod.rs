//! Player plugin: input mapper + per-tick movement integrator.
//!
//! Pipeline (all in Update, ordered):
//! - `gather_input`: sample keyboard into the `PlayerInput` resource
//!   (held intents are level-triggered, weapon toggle / fire / reset are
//!   edge-triggered).
//! - `apply_movement`: integrate the active agent's pose from held intents
//!   and derive its walk/idle label.
//! - `weapon_actions`: resolve the edges into weapon state changes and
//!   bullet spawn requests.
//! - `check_driver_door`: the ApproachCar proximity trigger.
//!
//! During the scripted phases (`CarReversing`, `Transition`) the player has
//! no agency: everything except input sampling and the reset edge is gated
//! off by [`player_has_agency`].

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::common::math::{flat_distance, yaw_forward, yaw_right};
use crate::common::state::GamePhase;
use crate::common::tunables::Tunables;
use crate::plugins::agents::{
    ActiveAgent, Agent, AgentId, AnimationKind, AnimationState, WeaponState, Yaw,
    DRAW_WEAPON_SECONDS, FIRE_SECONDS,
};
use crate::plugins::core::ResetRequest;
use crate::plugins::director::TriggerFlags;
use crate::plugins::projectiles::messages::SpawnBulletRequest;

/// Driver-door anchor, fixed offset from the car's start pose (near the
/// front-left wheel).
pub const DRIVER_DOOR_ANCHOR: Vec3 = Vec3::new(-1.5, 0.0, 0.0);
/// Trigger radius; the boundary is a strict `<`.
pub const DRIVER_DOOR_RADIUS: f32 = 1.2;

/// Muzzle sits this far ahead of the agent's center...
const MUZZLE_FORWARD: f32 = 0.5;
/// ...and this far above its feet (chest height).
const MUZZLE_HEIGHT: f32 = 1.5;

#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PlayerInput {
    // Held intents.
    pub forward: bool,
    pub back: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    // Edges, valid for one tick.
    pub toggle_weapon: bool,
    pub fire: bool,
    pub reset: bool,
}

impl PlayerInput {
    /// Any intent that translates the agent (turning alone is not "moving"
    /// for the animation label).
    #[inline]
    pub fn translating(&self) -> bool {
        self.forward || self.back || self.strafe_left || self.strafe_right
    }
}

/// Run condition: the player only has agency outside the cutscene phases.
pub fn player_has_agency(phase: Res<State<GamePhase>>) -> bool {
    !matches!(phase.get(), GamePhase::CarReversing | GamePhase::Transition)
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default());
    app.add_systems(
        Update,
        (
            gather_input,
            request_reset.after(gather_input),
            apply_movement
                .after(gather_input)
                .run_if(player_has_agency),
            weapon_actions
                .after(apply_movement)
                .run_if(player_has_agency),
            check_driver_door
                .after(apply_movement)
                .run_if(in_state(GamePhase::ApproachCar)),
        ),
    );
}

/// Sample the keyboard. `Option<Res<..>>` keeps this a no-op in headless
/// apps that never install the input plugin.
pub fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else { return };

    input.forward = keys.pressed(KeyCode::KeyW);
    input.back = keys.pressed(KeyCode::KeyS);
    input.turn_left = keys.pressed(KeyCode::KeyA);
    input.turn_right = keys.pressed(KeyCode::KeyD);
    input.strafe_left = keys.pressed(KeyCode::KeyQ);
    input.strafe_right = keys.pressed(KeyCode::KeyE);

    input.toggle_weapon = keys.just_pressed(KeyCode::KeyG);
    input.fire = keys.just_pressed(KeyCode::Space);
    input.reset = keys.just_pressed(KeyCode::KeyR);
}

/// Forward the reset edge to the session reset pipeline. Deliberately not
/// gated by agency: a reset must work even mid-cutscene.
pub fn request_reset(input: Res<PlayerInput>, mut writer: MessageWriter<ResetRequest>) {
    if input.reset {
        writer.write(ResetRequest);
    }
}

/// Integrate held intents into the active agent's pose and derive its
/// locomotion label. Nothing else writes the active agent's pose this tick.
pub fn apply_movement(
    time: Res<Time>,
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    active: Res<ActiveAgent>,
    mut q: Query<(&AgentId, &mut Transform, &mut Yaw, &mut AnimationState), With<Agent>>,
) {
    let dt = time.delta_secs();

    for (id, mut tf, mut yaw, mut anim) in &mut q {
        if *id != active.0 {
            continue;
        }

        if input.turn_left {
            yaw.0 += tunables.turn_speed * dt;
        }
        if input.turn_right {
            yaw.0 -= tunables.turn_speed * dt;
        }

        let forward = yaw_forward(yaw.0);
        let right = yaw_right(yaw.0);
        let step = tunables.move_speed * dt;

        if input.forward {
            tf.translation += forward * step;
        }
        if input.back {
            tf.translation -= forward * step;
        }
        if input.strafe_left {
            tf.translation -= right * step;
        }
        if input.strafe_right {
            tf.translation += right * step;
        }

        tf.rotation = Quat::from_rotation_y(yaw.0);
        anim.set_locomotion(input.translating());
    }
}

/// Resolve weapon edges for the active agent.
///
/// - Toggle with the weapon holstered plays the draw one-shot and arms it.
/// - Toggle with the weapon drawn holsters immediately (no one-shot).
/// - Fire requires a drawn weapon; a fire edge while holstered is silently
///   ignored, not an error.
pub fn weapon_actions(
    input: Res<PlayerInput>,
    tunables: Res<Tunables>,
    active: Res<ActiveAgent>,
    mut writer: MessageWriter<SpawnBulletRequest>,
    mut q: Query<(&AgentId, &Transform, &Yaw, &mut WeaponState, &mut AnimationState), With<Agent>>,
) {
    if !input.toggle_weapon && !input.fire {
        return;
    }

    for (id, tf, yaw, mut weapon, mut anim) in &mut q {
        if *id != active.0 {
            continue;
        }

        if input.toggle_weapon {
            if weapon.drawn {
                weapon.drawn = false;
                anim.set_immediate(AnimationKind::Idle);
            } else {
                weapon.drawn = true;
                anim.start_one_shot(AnimationKind::DrawWeapon, DRAW_WEAPON_SECONDS);
            }
        }

        if input.fire && weapon.drawn {
            let forward = yaw_forward(yaw.0);
            let origin =
                tf.translation + forward * MUZZLE_FORWARD + Vec3::Y * MUZZLE_HEIGHT;
            writer.write(SpawnBulletRequest {
                origin,
                direction: forward,
                speed: tunables.bullet_speed,
            });
            anim.start_one_shot(AnimationKind::Fire, FIRE_SECONDS);
        }
    }
}

/// ApproachCar trigger: the player agent entering the driver-door circle
/// advances the phase to CarReversing exactly once. The fired flag (not the
/// phase comparison) is what makes re-entry a no-op; only a reset clears it.
pub fn check_driver_door(
    active: Res<ActiveAgent>,
    mut flags: ResMut<TriggerFlags>,
    mut next: ResMut<NextState<GamePhase>>,
    q: Query<(&AgentId, &Transform), With<Agent>>,
) {
    if flags.driver_door_fired {
        return;
    }

    for (id, tf) in &q {
        if *id != active.0 {
            continue;
        }
        if flat_distance(tf.translation, DRIVER_DOOR_ANCHOR) < DRIVER_DOOR_RADIUS {
            flags.driver_door_fired = true;
            next.set(GamePhase::CarReversing);
        }
    }
}
