use avian3d::prelude::*;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    // Physics exists only for the bullet raycast; nothing falls or bounces.
    app.add_plugins(PhysicsPlugins::default());
    app.insert_resource(Gravity(Vec3::ZERO));
}
