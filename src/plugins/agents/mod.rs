//! Agents plugin: the three humanoids of the vignette.
//!
//! Facts live in components:
//! - `Transform` + `Yaw` are the pose. Yaw is the single source of truth for
//!   heading; whoever writes it also writes the quaternion so the renderer
//!   never re-derives it.
//! - `AnimationState` carries the presentation label plus an explicit
//!   remaining-duration counter for one-shot clips. The counter is ticked
//!   here and flips back to `Idle` when it runs out, so no presentation-side
//!   callback can race a phase change.
//! - `WeaponState` is gameplay truth; the gun mesh is derived from it.
//!
//! Exactly one agent is active (receives input) at any time; the others are
//! driven by the scripted director or stand still. The third agent has an
//! always-on walk toward the front of the car that suspends the moment it
//! becomes the active agent, so it never fights the input mapper.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::math::{flat_distance, yaw_facing};
use crate::common::tunables::Tunables;

/// Where the third agent walks to (just short of the car's nose).
pub const NPC_WALK_TARGET: Vec3 = Vec3::new(0.0, 0.0, 4.0);
/// The walk stops once the agent is this close to the target.
pub const NPC_ARRIVE_RADIUS: f32 = 0.5;

/// Nominal length of the draw/holster clip, seconds.
pub const DRAW_WEAPON_SECONDS: f32 = 0.6;
/// Nominal length of the fire clip, seconds.
pub const FIRE_SECONDS: f32 = 0.4;

#[derive(Component)]
pub struct Agent;

/// Stable identity of each humanoid.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentId {
    NpcStanding,
    Player,
    ThirdAgent,
}

/// The single agent currently receiving input mapper writes.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveAgent(pub AgentId);

/// Heading around Y, radians. Yaw 0 faces -Z.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Yaw(pub f32);

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct WeaponState {
    pub drawn: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationKind {
    Idle,
    Walk,
    DrawWeapon,
    Fire,
}

/// Presentation label plus the one-shot countdown that reverts it.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    pub kind: AnimationKind,
    one_shot_remaining: f32,
}

impl AnimationState {
    pub fn new(kind: AnimationKind) -> Self {
        Self { kind, one_shot_remaining: 0.0 }
    }

    /// A draw/fire clip is still playing and must not be overridden by
    /// locomotion labels.
    #[inline]
    pub fn one_shot_active(&self) -> bool {
        self.one_shot_remaining > 0.0
    }

    /// Begin a one-shot clip; it reverts to `Idle` after `seconds`.
    pub fn start_one_shot(&mut self, kind: AnimationKind, seconds: f32) {
        self.kind = kind;
        self.one_shot_remaining = seconds.max(0.0);
    }

    /// Derive walk/idle from whether the agent translated this tick.
    /// No-op while a one-shot clip is in flight.
    pub fn set_locomotion(&mut self, moving: bool) {
        if self.one_shot_active() {
            return;
        }
        self.kind = if moving { AnimationKind::Walk } else { AnimationKind::Idle };
    }

    /// Force a label immediately, cancelling any one-shot (used by holster
    /// and by the reset).
    pub fn set_immediate(&mut self, kind: AnimationKind) {
        self.kind = kind;
        self.one_shot_remaining = 0.0;
    }

    /// Count the one-shot down; flips back to idle when it elapses.
    pub fn tick(&mut self, dt: f32) {
        if self.one_shot_remaining <= 0.0 {
            return;
        }
        self.one_shot_remaining -= dt;
        if self.one_shot_remaining <= 0.0 {
            self.one_shot_remaining = 0.0;
            self.kind = AnimationKind::Idle;
        }
    }
}

/// Start-of-session pose and label for one agent. The same seed is used at
/// startup and by the reset, so reset-equality can be asserted field by field.
pub struct AgentSeed {
    pub position: Vec3,
    pub yaw: f32,
    pub animation: AnimationKind,
}

pub fn seed(id: AgentId) -> AgentSeed {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
    match id {
        AgentId::NpcStanding => AgentSeed {
            position: Vec3::new(-6.0, 0.0, 2.0),
            yaw: FRAC_PI_4,
            animation: AnimationKind::Idle,
        },
        AgentId::Player => AgentSeed {
            position: Vec3::new(-5.0, 0.0, -3.0),
            yaw: FRAC_PI_2,
            animation: AnimationKind::Idle,
        },
        AgentId::ThirdAgent => AgentSeed {
            position: Vec3::new(-1.0, 0.0, 9.0),
            yaw: -FRAC_PI_4,
            animation: AnimationKind::Walk,
        },
    }
}

pub fn plugin(app: &mut App) {
    app.insert_resource(ActiveAgent(AgentId::Player));
    app.add_systems(Startup, spawn);
    app.add_systems(
        Update,
        (
            npc_walk.after(crate::plugins::player::apply_movement),
            // A clip started this tick loses its first dt this tick; the
            // countdown's start would otherwise be schedule-order dependent.
            tick_one_shots.after(crate::plugins::player::weapon_actions),
        ),
    );
}

fn spawn(mut commands: Commands) {
    for id in [AgentId::NpcStanding, AgentId::Player, AgentId::ThirdAgent] {
        let s = seed(id);
        commands
            .spawn((
                Name::new(format!("{id:?}")),
                Agent,
                id,
                AnimationState::new(s.animation),
                WeaponState { drawn: false },
                Yaw(s.yaw),
                Transform::from_translation(s.position)
                    .with_rotation(Quat::from_rotation_y(s.yaw)),
                RigidBody::Kinematic,
            ))
            .with_children(|parent| {
                // Chest-height hitbox for the bullet raycast; the agent's own
                // transform stays at foot level like the rest of the scene.
                parent.spawn((
                    Name::new("Hitbox"),
                    Transform::from_xyz(0.0, 0.9, 0.0),
                    Collider::capsule(0.3, 1.2),
                    CollisionLayers::new(Layer::Agent, [Layer::Bullet]),
                ));
            });
    }
}

/// Count down one-shot clips and revert them to idle.
pub fn tick_one_shots(time: Res<Time>, mut q: Query<&mut AnimationState, With<Agent>>) {
    let dt = time.delta_secs();
    for mut anim in &mut q {
        anim.tick(dt);
    }
}

/// Always-on third-agent behavior: straight-line pursuit of the spot in
/// front of the car, facing the direction of travel. Runs in every phase but
/// suspends while the third agent is the one under player control.
pub fn npc_walk(
    time: Res<Time>,
    tunables: Res<Tunables>,
    active: Res<ActiveAgent>,
    mut q: Query<(&AgentId, &mut Transform, &mut Yaw, &mut AnimationState), With<Agent>>,
) {
    if active.0 == AgentId::ThirdAgent {
        return;
    }
    let dt = time.delta_secs();

    for (id, mut tf, mut yaw, mut anim) in &mut q {
        if *id != AgentId::ThirdAgent {
            continue;
        }

        let to_target = NPC_WALK_TARGET - tf.translation;
        if flat_distance(tf.translation, NPC_WALK_TARGET) <= NPC_ARRIVE_RADIUS {
            anim.set_locomotion(false);
            continue;
        }

        let dir = Vec3::new(to_target.x, 0.0, to_target.z).normalize();
        tf.translation += dir * tunables.npc_walk_speed * dt;
        yaw.0 = yaw_facing(dir);
        tf.rotation = Quat::from_rotation_y(yaw.0);
        anim.set_locomotion(true);
    }
}
