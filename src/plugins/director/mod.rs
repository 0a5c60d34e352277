//! Scripted sequence director.
//!
//! A phase-indexed state machine that owns every piece of time-parameterized
//! motion the player does not control: the reverse-out of the parking spot
//! and the final charge. Each scripted phase is driven by a phase-local
//! clock ([`SequenceClock`]) that is zeroed on phase entry and advanced by
//! the tick's `dt`; pausing tick delivery pauses the sequence, there is no
//! wall-clock anywhere.
//!
//! Proximity triggers advance the phase at most once each; the "already
//! fired" booleans in [`TriggerFlags`] make that idempotence explicit
//! instead of relying on phase comparisons. Only the session reset clears
//! them.
//!
//! Phase dispatch is a closed enum matched exhaustively via `run_if` state
//! gates; an invalid phase is unrepresentable.

use bevy::prelude::*;

use crate::common::math::{ease_out_cubic, flat_distance, yaw_forward};
use crate::common::state::GamePhase;
use crate::plugins::agents::{Agent, AgentId, Yaw};
use crate::plugins::vehicle::{Car, CarKinematics};

// Reverse-out sequence. Two sub-phases: wheels sweep left, then the car
// backs out while yawing.
pub const STEERING_DURATION: f32 = 0.8;
pub const TARGET_STEERING_ANGLE: f32 = std::f32::consts::PI / 5.0;
pub const REVERSE_SPEED: f32 = -3.0;
pub const REVERSE_YAW_RATE: f32 = 0.3;
pub const REVERSE_TOTAL_DURATION: f32 = 2.8;

// Front-of-car trigger, evaluated only during ThirdAgentControl.
pub const FRONT_TRIGGER_OFFSET: f32 = 4.0;
pub const FRONT_TRIGGER_RADIUS: f32 = 1.5;

// Charge sequence: straight run at the third agent, then a hard veer right.
pub const CHARGE_APPROACH_DURATION: f32 = 1.2;
pub const CHARGE_TOTAL_DURATION: f32 = 2.4;
pub const CHARGE_APPROACH_SPEED: f32 = 10.0;
pub const CHARGE_TURN_SPEED: f32 = 8.0;
/// Negative yaw rate = rightward veer.
pub const CHARGE_YAW_RATE: f32 = -0.9;
/// Steering display angle per rad/s of yaw rate during the veer.
pub const CHARGE_STEER_RATIO: f32 = 0.5;

/// Elapsed time within the current scripted phase. Reset on phase entry.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct SequenceClock(pub f32);

/// One-way latches for the proximity triggers. Cleared only by reset.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerFlags {
    pub driver_door_fired: bool,
    pub front_fired: bool,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<SequenceClock>();
    app.init_resource::<TriggerFlags>();

    app.add_systems(OnEnter(GamePhase::CarReversing), reset_clock);
    app.add_systems(OnEnter(GamePhase::CarCharge), reset_clock);

    app.add_systems(
        Update,
        (
            drive_car_reversing
                .after(crate::plugins::agents::npc_walk)
                .run_if(in_state(GamePhase::CarReversing)),
            check_front_trigger
                .after(crate::plugins::agents::npc_walk)
                .run_if(in_state(GamePhase::ThirdAgentControl)),
            drive_car_charge
                .after(crate::plugins::agents::npc_walk)
                .run_if(in_state(GamePhase::CarCharge)),
        ),
    );
}

pub fn reset_clock(mut clock: ResMut<SequenceClock>) {
    clock.0 = 0.0;
}

/// CarReversing, by phase-local time `t`:
/// - `t < STEERING_DURATION`: wheel display angle eases out toward the
///   target. Visual only; the trajectory is untouched.
/// - `STEERING_DURATION <= t < REVERSE_TOTAL_DURATION`: back out along the
///   current heading while yawing at a fixed rate.
/// - `t >= REVERSE_TOTAL_DURATION`: stop and hand off to the viewpoint
///   transition.
pub fn drive_car_reversing(
    time: Res<Time>,
    mut clock: ResMut<SequenceClock>,
    mut next: ResMut<NextState<GamePhase>>,
    mut q_car: Query<(&mut Transform, &mut Yaw, &mut CarKinematics), With<Car>>,
) {
    let dt = time.delta_secs();
    clock.0 += dt;
    let t = clock.0;

    let Ok((mut tf, mut yaw, mut kin)) = q_car.single_mut() else {
        return;
    };

    if t < STEERING_DURATION {
        kin.steering_angle = TARGET_STEERING_ANGLE * ease_out_cubic(t / STEERING_DURATION);
    }

    if (STEERING_DURATION..REVERSE_TOTAL_DURATION).contains(&t) {
        let forward = yaw_forward(yaw.0);
        tf.translation += forward * REVERSE_SPEED * dt;
        yaw.0 -= REVERSE_YAW_RATE * dt;
        tf.rotation = Quat::from_rotation_y(yaw.0);
        kin.speed = REVERSE_SPEED;
    }

    if t >= REVERSE_TOTAL_DURATION {
        kin.speed = 0.0;
        next.set(GamePhase::Transition);
    }
}

/// ThirdAgentControl: advance to CarCharge once the third agent stands
/// within the circle projected ahead of the car's nose. Strict `<` on the
/// boundary, latched by `TriggerFlags::front_fired`.
pub fn check_front_trigger(
    mut flags: ResMut<TriggerFlags>,
    mut next: ResMut<NextState<GamePhase>>,
    q_car: Query<(&Transform, &Yaw), With<Car>>,
    q_agents: Query<(&AgentId, &Transform), (With<Agent>, Without<Car>)>,
) {
    if flags.front_fired {
        return;
    }
    let Ok((car_tf, car_yaw)) = q_car.single() else {
        return;
    };

    let front_point = car_tf.translation + yaw_forward(car_yaw.0) * FRONT_TRIGGER_OFFSET;

    for (id, tf) in &q_agents {
        if *id != AgentId::ThirdAgent {
            continue;
        }
        if flat_distance(tf.translation, front_point) < FRONT_TRIGGER_RADIUS {
            flags.front_fired = true;
            next.set(GamePhase::CarCharge);
        }
    }
}

/// CarCharge, by phase-local time `t`:
/// - `t < CHARGE_APPROACH_DURATION`: straight charge along the heading.
/// - up to `CHARGE_TOTAL_DURATION`: keep moving while yawing right; the
///   steering display angle is derived from the yaw rate.
/// - after that: everything zeroed. Terminal until reset.
pub fn drive_car_charge(
    time: Res<Time>,
    mut clock: ResMut<SequenceClock>,
    mut q_car: Query<(&mut Transform, &mut Yaw, &mut CarKinematics), With<Car>>,
) {
    let dt = time.delta_secs();
    clock.0 += dt;
    let t = clock.0;

    let Ok((mut tf, mut yaw, mut kin)) = q_car.single_mut() else {
        return;
    };

    if t < CHARGE_APPROACH_DURATION {
        let forward = yaw_forward(yaw.0);
        tf.translation += forward * CHARGE_APPROACH_SPEED * dt;
        kin.speed = CHARGE_APPROACH_SPEED;
    } else if t < CHARGE_TOTAL_DURATION {
        let forward = yaw_forward(yaw.0);
        tf.translation += forward * CHARGE_TURN_SPEED * dt;
        yaw.0 += CHARGE_YAW_RATE * dt;
        tf.rotation = Quat::from_rotation_y(yaw.0);
        kin.speed = CHARGE_TURN_SPEED;
        kin.steering_angle = CHARGE_YAW_RATE * CHARGE_STEER_RATIO;
    } else {
        kin.speed = 0.0;
        kin.steering_angle = 0.0;
    }
}
