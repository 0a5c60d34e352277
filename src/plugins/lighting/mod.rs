//! Lighting plugin (render-only): key sun, cool fill, ambient.

use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, setup);
}

fn setup(mut commands: Commands) {
    commands.insert_resource(AmbientLight { brightness: 200.0, ..default() });

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight { illuminance: 10_000.0, shadows_enabled: true, ..default() },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Name::new("FillLight"),
        DirectionalLight { illuminance: 3_000.0, shadows_enabled: false, ..default() },
        Transform::from_xyz(-10.0, 10.0, -10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
