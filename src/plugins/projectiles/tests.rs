use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::test_utils::{run_system_once, time_with_delta};

use super::components::{Bullet, BulletId, BulletIds};
use super::messages::SpawnBulletRequest;

#[test]
fn ids_are_monotonic() {
    let mut ids = BulletIds::default();
    assert_eq!(ids.next(), BulletId(0));
    assert_eq!(ids.next(), BulletId(1));
    assert_eq!(ids.next(), BulletId(2));
}

fn request_world() -> World {
    let mut world = World::new();
    world.init_resource::<BulletIds>();
    world.init_resource::<Messages<SpawnBulletRequest>>();
    world
}

#[test]
fn spawn_normalizes_direction_and_numbers_bullets() {
    let mut world = request_world();
    world.write_message(SpawnBulletRequest {
        origin: Vec3::new(0.0, 1.5, 0.0),
        direction: Vec3::new(0.0, 0.0, 2.0),
        speed: 50.0,
    });
    world.write_message(SpawnBulletRequest {
        origin: Vec3::ZERO,
        direction: Vec3::X,
        speed: 50.0,
    });

    run_system_once(&mut world, super::spawn::spawn_from_requests);

    let mut bullets: Vec<_> = world
        .query::<(&BulletId, &Bullet, &Transform)>()
        .iter(&world)
        .map(|(id, b, tf)| (*id, *b, *tf))
        .collect();
    bullets.sort_by_key(|(id, _, _)| *id);

    assert_eq!(bullets.len(), 2);
    let (id, bullet, tf) = &bullets[0];
    assert_eq!(*id, BulletId(0));
    assert_eq!(bullet.direction, Vec3::Z);
    assert_eq!(bullet.age, 0.0);
    assert_eq!(tf.translation, Vec3::new(0.0, 1.5, 0.0));
    assert_eq!(bullets[1].0, BulletId(1));
}

#[test]
fn degenerate_direction_is_dropped() {
    let mut world = request_world();
    world.write_message(SpawnBulletRequest {
        origin: Vec3::ZERO,
        direction: Vec3::ZERO,
        speed: 50.0,
    });

    run_system_once(&mut world, super::spawn::spawn_from_requests);

    assert_eq!(world.query::<&Bullet>().iter(&world).count(), 0);
    // The dropped request must not burn an id.
    assert_eq!(world.resource_mut::<BulletIds>().next(), BulletId(0));
}

#[test]
fn bullets_fly_straight() {
    let mut world = World::new();
    world.insert_resource(time_with_delta(0.1));
    let e = world
        .spawn((
            Bullet {
                direction: Vec3::Z,
                speed: 50.0,
                origin: Vec3::new(0.0, 1.5, 0.0),
                age: 0.0,
            },
            Transform::from_xyz(0.0, 1.5, 0.0),
        ))
        .id();

    run_system_once(&mut world, super::flight::advance_bullets);

    let tf = world.get::<Transform>(e).unwrap();
    assert!((tf.translation - Vec3::new(0.0, 1.5, 5.0)).length() < 1e-4);
    assert!((world.get::<Bullet>(e).unwrap().age - 0.1).abs() < 1e-6);
}

#[test]
fn bullets_retire_past_max_range() {
    let mut world = World::new();
    world.insert_resource(time_with_delta(0.1));
    let e = world
        .spawn((
            Bullet { direction: Vec3::Z, speed: 50.0, origin: Vec3::ZERO, age: 0.0 },
            Transform::from_xyz(0.0, 0.0, 98.0),
        ))
        .id();

    run_system_once(&mut world, super::flight::advance_bullets);

    assert!(world.get_entity(e).is_err());
}

#[test]
fn bullets_retire_past_max_age() {
    let mut world = World::new();
    world.insert_resource(time_with_delta(0.1));
    let e = world
        .spawn((
            Bullet { direction: Vec3::Z, speed: 1.0, origin: Vec3::ZERO, age: 4.95 },
            Transform::default(),
        ))
        .id();

    run_system_once(&mut world, super::flight::advance_bullets);

    assert!(world.get_entity(e).is_err());
}

#[test]
fn young_in_range_bullets_survive() {
    let mut world = World::new();
    world.insert_resource(time_with_delta(0.1));
    let e = world
        .spawn((
            Bullet { direction: Vec3::Z, speed: 50.0, origin: Vec3::ZERO, age: 0.0 },
            Transform::default(),
        ))
        .id();

    run_system_once(&mut world, super::flight::advance_bullets);

    assert!(world.get_entity(e).is_ok());
}
