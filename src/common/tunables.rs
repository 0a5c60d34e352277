//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Linear walk speed of the active agent, units/s.
    pub move_speed: f32,
    /// Yaw rate of the active agent, rad/s.
    pub turn_speed: f32,
    /// Constant speed of the scripted third-agent walk, units/s.
    pub npc_walk_speed: f32,
    /// Muzzle velocity, units/s.
    pub bullet_speed: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self { move_speed: 5.0, turn_speed: 3.0, npc_walk_speed: 2.0, bullet_speed: 50.0 }
    }
}
