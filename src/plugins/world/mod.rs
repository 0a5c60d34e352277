//! World plugin: the static ground slab.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;

pub const GROUND_SIZE: f32 = 100.0;

#[derive(Component)]
pub struct Ground;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_ground);
}

fn spawn_ground(mut commands: Commands) {
    commands.spawn((
        Name::new("Ground"),
        Ground,
        Transform::from_xyz(0.0, -0.05, 0.0),
        RigidBody::Static,
        Collider::cuboid(GROUND_SIZE, 0.1, GROUND_SIZE),
        CollisionLayers::new(Layer::World, [Layer::Bullet]),
    ));
}
