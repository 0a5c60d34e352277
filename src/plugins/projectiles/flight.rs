//! Per-tick bullet motion, retirement, and hit resolution.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::plugins::vehicle::{glass_layers_broken, BrokenPanels, Car, GlassPanel};

use super::components::Bullet;

/// Retire past this travel distance from the muzzle.
pub const MAX_DISTANCE: f32 = 100.0;
/// Retire past this age, seconds.
pub const MAX_AGE: f32 = 5.0;

/// Advance every live bullet and retire the spent ones. No collision here;
/// this half stays testable without a physics pipeline.
pub fn advance_bullets(
    time: Res<Time>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut Bullet, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (e, mut bullet, mut tf) in &mut q {
        tf.translation += bullet.direction * bullet.speed * dt;
        bullet.age += dt;

        let traveled = tf.translation.distance(bullet.origin);
        if traveled > MAX_DISTANCE || bullet.age > MAX_AGE {
            commands.entity(e).despawn();
        }
    }
}

/// Short look-ahead raycast from each bullet's new position. The ray length
/// `speed * dt * 2` covers the next tick's travel so fast bullets cannot
/// tunnel through a thin pane. Nearest hit wins; glass hits shatter the
/// pane (idempotently), and any hit retires the bullet.
pub fn resolve_bullet_hits(
    time: Res<Time>,
    mut commands: Commands,
    spatial: SpatialQuery,
    q_bullets: Query<(Entity, &Bullet, &Transform)>,
    q_glass: Query<&GlassPanel>,
    mut q_glass_layers: Query<&mut CollisionLayers, With<GlassPanel>>,
    mut q_car: Query<&mut BrokenPanels, With<Car>>,
) {
    let dt = time.delta_secs();
    // Bullets carry no colliders, so they can never hit each other.
    let filter = SpatialQueryFilter::from_mask([
        Layer::World,
        Layer::Agent,
        Layer::Car,
        Layer::Glass,
    ]);

    for (e, bullet, tf) in &q_bullets {
        let Ok(direction) = Dir3::new(bullet.direction) else {
            continue;
        };
        let lookahead = bullet.speed * dt * 2.0;

        let Some(hit) =
            spatial.cast_ray(tf.translation, direction, lookahead, true, &filter)
        else {
            continue;
        };

        if let Ok(panel) = q_glass.get(hit.entity) {
            if let Ok(mut broken) = q_car.single_mut() {
                broken.break_panel(*panel);
            }
            // A shattered pane stops being a raycast target.
            if let Ok(mut layers) = q_glass_layers.get_mut(hit.entity) {
                *layers = glass_layers_broken();
            }
        }

        commands.entity(e).despawn();
    }
}
