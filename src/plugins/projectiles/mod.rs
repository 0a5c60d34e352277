//! Projectiles plugin: short-lived directed bullets.
//!
//! # Data flow
//! ```text
//!   Update
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │ (A) Producer: player::weapon_actions                         │
//!   │     - fire edge + drawn weapon -> SpawnBulletRequest message │
//!   │                                                              │
//!   │ (B) Consumer: spawn::spawn_from_requests                     │
//!   │     - allocates a monotonic BulletId (single writer)         │
//!   │     - spawns Bullet + Transform                              │
//!   │                                                              │
//!   │ (C) flight::advance_bullets                                  │
//!   │     - integrate, age, retire (range > 100 / age > 5 s)       │
//!   │                                                              │
//!   │ (D) flight::resolve_bullet_hits                              │
//!   │     - look-ahead raycast, shatter glass, retire on any hit   │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Producers never touch the id allocator; they only enqueue intent. That
//! keeps id allocation in one place and lets the producer stay a plain
//! input system.

pub mod components;
pub mod flight;
pub mod messages;
pub mod spawn;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

pub struct ProjectilesPlugin;

/// Maintain spawn request message buffers.
///
/// Messages are double-buffered; `update()` advances buffers.
fn update_spawn_messages(mut msgs: ResMut<Messages<messages::SpawnBulletRequest>>) {
    msgs.update();
}

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<components::BulletIds>();

        app.init_resource::<Messages<messages::SpawnBulletRequest>>();
        app.add_systems(PostUpdate, update_spawn_messages);

        // Pipeline order per tick: the scripted director has moved everything
        // before bullets fly and test for hits.
        app.add_systems(
            Update,
            (
                spawn::spawn_from_requests
                    .after(crate::plugins::player::weapon_actions)
                    .after(crate::plugins::director::drive_car_reversing)
                    .after(crate::plugins::director::drive_car_charge),
                flight::advance_bullets.after(spawn::spawn_from_requests),
                flight::resolve_bullet_hits.after(flight::advance_bullets),
            ),
        );
    }
}

#[cfg(test)]
mod tests;
