//! Bullet vs glass, with the real colliders and the real raycast.

mod common;

use bevy::prelude::*;
use car_vignette::plugins::projectiles::components::Bullet;
use car_vignette::plugins::projectiles::messages::SpawnBulletRequest;
use car_vignette::plugins::vehicle::{BrokenPanels, Car, GlassPanel};

fn broken_count(app: &mut App) -> usize {
    let world = app.world_mut();
    world
        .query_filtered::<&BrokenPanels, With<Car>>()
        .single(world)
        .unwrap()
        .len()
}

#[test]
fn bullet_shatters_windshield_once() {
    let mut app = common::app_headless();
    // Let startup spawns land and the spatial query see the colliders.
    for _ in 0..3 {
        common::tick(&mut app, 0.005);
    }
    assert_eq!(broken_count(&mut app), 0);

    // Windshield sits at (0, 1.1, 0.8) on the parked car. Shoot straight at
    // it from two units out.
    app.world_mut().write_message(SpawnBulletRequest {
        origin: Vec3::new(0.0, 1.1, 2.8),
        direction: Vec3::NEG_Z,
        speed: 50.0,
    });

    // Small steps so the look-ahead ray always covers the next move.
    for _ in 0..40 {
        common::tick(&mut app, 0.005);
        if broken_count(&mut app) > 0 {
            break;
        }
    }

    let world = app.world_mut();
    let broken = world
        .query_filtered::<&BrokenPanels, With<Car>>()
        .single(world)
        .unwrap();
    assert!(broken.is_broken(GlassPanel::Windshield), "windshield should shatter");
    assert_eq!(broken.len(), 1, "only the pane that was hit shatters");

    // The bullet retired on impact.
    assert_eq!(world.query::<&Bullet>().iter(world).count(), 0);
}

#[test]
fn second_bullet_passes_through_broken_pane() {
    let mut app = common::app_headless();
    for _ in 0..3 {
        common::tick(&mut app, 0.005);
    }

    let fire = |app: &mut App| {
        app.world_mut().write_message(SpawnBulletRequest {
            origin: Vec3::new(0.0, 1.1, 2.8),
            direction: Vec3::NEG_Z,
            speed: 50.0,
        });
        for _ in 0..40 {
            common::tick(app, 0.005);
            let world = app.world_mut();
            if world.query::<&Bullet>().iter(world).count() == 0 {
                break;
            }
        }
    };

    fire(&mut app);
    assert_eq!(broken_count(&mut app), 1);

    // The shattered pane no longer blocks; the next bullet flies through it
    // and stops on whatever is behind instead of re-breaking anything.
    fire(&mut app);
    assert_eq!(broken_count(&mut app), 1);
}
