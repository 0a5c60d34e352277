//! Core plugin: shared resources and the session reset.
//!
//! `ResetRequest` is the single externally invokable way back to the start
//! of the vignette. `apply_reset` restores the entire initial snapshot in
//! one tick: phase, active agent, every pose and label, car kinematics,
//! glass, bullets, trigger latches, clocks. Full-state equality with a
//! fresh session is a tested property.

use avian3d::prelude::CollisionLayers;
use bevy::ecs::message::{MessageReader, Messages};
use bevy::prelude::*;

use crate::common::state::GamePhase;
use crate::common::tunables::Tunables;
use crate::plugins::agents::{
    self, ActiveAgent, Agent, AgentId, AnimationState, WeaponState, Yaw,
};
use crate::plugins::director::{SequenceClock, TriggerFlags};
use crate::plugins::projectiles::components::Bullet;
use crate::plugins::transition::TransitionState;
use crate::plugins::vehicle::{
    glass_layers_active, BrokenPanels, Car, CarKinematics, GlassPanel, CAR_START_POSITION,
};

/// Ask for the session to be restored to its initial snapshot.
#[derive(Message, Clone, Copy, Debug)]
pub struct ResetRequest;

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(ClearColor(Color::srgb(0.53, 0.75, 0.92)));

    app.init_resource::<Messages<ResetRequest>>();
    app.add_systems(PostUpdate, update_reset_messages);
    // Last in the gameplay chain: nothing may move after the snapshot is
    // restored, or the reset would not be atomic within its tick.
    app.add_systems(
        Update,
        apply_reset
            .after(crate::plugins::player::request_reset)
            .after(crate::plugins::player::check_driver_door)
            .after(crate::plugins::agents::npc_walk)
            .after(crate::plugins::agents::tick_one_shots)
            .after(crate::plugins::vehicle::spin_wheels)
            .after(crate::plugins::director::check_front_trigger)
            .after(crate::plugins::director::drive_car_charge)
            .after(crate::plugins::transition::advance_transition)
            .after(crate::plugins::projectiles::flight::resolve_bullet_hits),
    );
}

fn update_reset_messages(mut msgs: ResMut<Messages<ResetRequest>>) {
    msgs.update();
}

/// Restore the documented initial snapshot. Ordered after every other
/// gameplay writer, so the restored state is what the tick ends with.
#[allow(clippy::too_many_arguments)]
pub fn apply_reset(
    mut reader: MessageReader<ResetRequest>,
    mut commands: Commands,
    mut next: ResMut<NextState<GamePhase>>,
    mut active: ResMut<ActiveAgent>,
    mut flags: ResMut<TriggerFlags>,
    mut clock: ResMut<SequenceClock>,
    mut transition: ResMut<TransitionState>,
    mut q_agents: Query<
        (&AgentId, &mut Transform, &mut Yaw, &mut AnimationState, &mut WeaponState),
        (With<Agent>, Without<Car>),
    >,
    mut q_car: Query<
        (&mut Transform, &mut Yaw, &mut CarKinematics, &mut BrokenPanels),
        (With<Car>, Without<Agent>),
    >,
    mut q_glass: Query<&mut CollisionLayers, With<GlassPanel>>,
    q_bullets: Query<Entity, With<Bullet>>,
) {
    // Coalesce however many requests arrived this tick into one reset.
    if reader.read().next().is_none() {
        return;
    }

    next.set(GamePhase::ApproachCar);
    active.0 = AgentId::Player;
    *flags = TriggerFlags::default();
    clock.0 = 0.0;
    *transition = TransitionState::default();

    for (id, mut tf, mut yaw, mut anim, mut weapon) in &mut q_agents {
        let seed = agents::seed(*id);
        tf.translation = seed.position;
        yaw.0 = seed.yaw;
        tf.rotation = Quat::from_rotation_y(seed.yaw);
        anim.set_immediate(seed.animation);
        weapon.drawn = false;
    }

    for (mut tf, mut yaw, mut kin, mut broken) in &mut q_car {
        tf.translation = CAR_START_POSITION;
        yaw.0 = 0.0;
        tf.rotation = Quat::IDENTITY;
        *kin = CarKinematics::default();
        broken.clear();
    }

    // Intact panes become raycast targets again.
    for mut layers in &mut q_glass {
        *layers = glass_layers_active();
    }

    for e in &q_bullets {
        commands.entity(e).despawn();
    }
}
