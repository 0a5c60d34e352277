//! Spawn consumer: turn buffered requests into bullet entities.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::components::{Bullet, BulletIds};

pub fn spawn_from_requests(
    mut commands: Commands,
    mut ids: ResMut<BulletIds>,
    mut reader: MessageReader<super::messages::SpawnBulletRequest>,
) {
    for req in reader.read() {
        let Some(direction) = req.direction.try_normalize() else {
            // A zero-length aim is a producer bug worth hearing about, but
            // not worth crashing a cutscene over.
            debug!("dropping bullet request with degenerate direction");
            continue;
        };

        let id = ids.next();
        commands.spawn((
            Name::new("Bullet"),
            id,
            Bullet { direction, speed: req.speed, origin: req.origin, age: 0.0 },
            Transform::from_translation(req.origin),
        ));
    }
}
