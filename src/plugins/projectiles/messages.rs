//! Buffered spawn requests.
//!
//! Producers (the input mapper's fire edge) only enqueue intent; the single
//! consumer in `spawn.rs` allocates ids and writes components. This keeps
//! the id allocator with exactly one writer.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug)]
pub struct SpawnBulletRequest {
    /// Muzzle point, world space.
    pub origin: Vec3,
    /// Travel direction; normalized by the consumer.
    pub direction: Vec3,
    /// Units/s.
    pub speed: f32,
}
