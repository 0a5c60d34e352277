//! Collision layers.
//!
//! Only the bullet raycast consumes these; nothing in the vignette has a
//! physical collision response.

use avian3d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug)]
pub enum Layer {
    #[default]
    Default,
    World,
    Agent,
    Car,
    Glass,
    Bullet,
}
