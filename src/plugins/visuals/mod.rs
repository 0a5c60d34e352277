//! Visuals plugin (render-only): placeholder meshes for everything gameplay
//! spawns, plus the small derived-state syncs (broken panes hide, the gun
//! mesh follows `WeaponState`, wheels roll from `CarKinematics`).
//!
//! Gameplay entities never touch `Assets<Mesh>`; this plugin watches for
//! `Added<..>` markers and attaches render children after the fact, so the
//! headless configuration runs the exact same spawn code without any assets.

use bevy::prelude::*;

use crate::plugins::agents::{Agent, AgentId, AnimationKind, AnimationState, WeaponState};
use crate::plugins::projectiles::components::Bullet;
use crate::plugins::vehicle::{BrokenPanels, Car, CarBodyPart, CarKinematics, GlassPanel};
use crate::plugins::world::Ground;

/// Visual wheel radius (matches the body sitting at y 0.6 with 0.5 height).
const WHEEL_RADIUS: f32 = 0.3;

#[derive(Resource)]
struct VisualAssets {
    agent_mesh: Handle<Mesh>,
    agent_materials: [(AgentId, Handle<StandardMaterial>); 3],
    gun_mesh: Handle<Mesh>,
    gun_material: Handle<StandardMaterial>,
    ground_mesh: Handle<Mesh>,
    ground_material: Handle<StandardMaterial>,
    body_material: Handle<StandardMaterial>,
    glass_material: Handle<StandardMaterial>,
    wheel_mesh: Handle<Mesh>,
    wheel_material: Handle<StandardMaterial>,
    bullet_mesh: Handle<Mesh>,
    bullet_material: Handle<StandardMaterial>,
}

/// Render-side mesh child of an agent; remembers its owner for animation.
#[derive(Component)]
struct AgentBody(Entity);

/// The holstered/drawn gun mesh; remembers the owning agent.
#[derive(Component)]
struct GunVisual(Entity);

#[derive(Component)]
struct WheelVisual {
    front: bool,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, load_assets);
    app.add_systems(
        Update,
        (
            dress_ground,
            dress_agents,
            dress_car_parts,
            dress_glass,
            dress_bullets,
            sync_broken_glass,
            sync_gun_visibility,
            animate_agents,
            spin_wheel_visuals,
        ),
    );
}

fn load_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut skin = |color: Color| materials.add(StandardMaterial::from(color));

    let agent_materials = [
        (AgentId::NpcStanding, skin(Color::srgb(0.55, 0.35, 0.2))),
        (AgentId::Player, skin(Color::srgb(0.2, 0.4, 0.8))),
        (AgentId::ThirdAgent, skin(Color::srgb(0.7, 0.2, 0.2))),
    ];

    commands.insert_resource(VisualAssets {
        agent_mesh: meshes.add(Capsule3d::new(0.3, 1.2)),
        agent_materials,
        gun_mesh: meshes.add(Cuboid::new(0.08, 0.12, 0.35)),
        gun_material: materials.add(StandardMaterial::from(Color::srgb(0.15, 0.15, 0.15))),
        ground_mesh: meshes.add(Plane3d::default().mesh().size(100.0, 100.0)),
        ground_material: materials.add(StandardMaterial::from(Color::srgb(0.35, 0.5, 0.3))),
        body_material: materials.add(StandardMaterial::from(Color::srgb(0.6, 0.1, 0.1))),
        glass_material: materials.add(StandardMaterial {
            base_color: Color::srgba(0.6, 0.8, 0.9, 0.35),
            alpha_mode: AlphaMode::Blend,
            ..default()
        }),
        wheel_mesh: meshes.add(Cylinder::new(WHEEL_RADIUS, 0.2)),
        wheel_material: materials.add(StandardMaterial::from(Color::srgb(0.1, 0.1, 0.1))),
        bullet_mesh: meshes.add(Sphere::new(0.05)),
        bullet_material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.9, 0.3),
            emissive: LinearRgba::rgb(4.0, 3.2, 0.6),
            ..default()
        }),
    });
}

fn dress_ground(
    mut commands: Commands,
    assets: Option<Res<VisualAssets>>,
    q: Query<Entity, Added<Ground>>,
) {
    let Some(assets) = assets else { return };
    for e in &q {
        commands.entity(e).insert((
            Mesh3d(assets.ground_mesh.clone()),
            MeshMaterial3d(assets.ground_material.clone()),
        ));
    }
}

fn dress_agents(
    mut commands: Commands,
    assets: Option<Res<VisualAssets>>,
    q: Query<(Entity, &AgentId), Added<Agent>>,
) {
    let Some(assets) = assets else { return };
    for (agent, id) in &q {
        let material = assets
            .agent_materials
            .iter()
            .find(|(m_id, _)| m_id == id)
            .map(|(_, m)| m.clone())
            .unwrap_or_else(|| assets.gun_material.clone());

        commands.entity(agent).with_children(|parent| {
            parent.spawn((
                Name::new("BodyMesh"),
                AgentBody(agent),
                Mesh3d(assets.agent_mesh.clone()),
                MeshMaterial3d(material),
                Transform::from_xyz(0.0, 0.9, 0.0),
            ));
            // Hand position; hidden until the weapon is drawn.
            parent.spawn((
                Name::new("GunMesh"),
                GunVisual(agent),
                Mesh3d(assets.gun_mesh.clone()),
                MeshMaterial3d(assets.gun_material.clone()),
                Transform::from_xyz(0.25, 1.1, -0.3),
                Visibility::Hidden,
            ));
        });
    }
}

fn dress_car_parts(
    mut commands: Commands,
    assets: Option<Res<VisualAssets>>,
    q_parts: Query<(Entity, &CarBodyPart), Added<CarBodyPart>>,
    mut meshes: ResMut<Assets<Mesh>>,
    q_car: Query<Entity, Added<Car>>,
) {
    let Some(assets) = assets else { return };

    for (e, part) in &q_parts {
        commands.entity(e).insert((
            Mesh3d(meshes.add(Cuboid::new(part.size.x, part.size.y, part.size.z))),
            MeshMaterial3d(assets.body_material.clone()),
        ));
    }

    // Wheels are purely visual; they hang off the car root directly.
    for car in &q_car {
        commands.entity(car).with_children(|parent| {
            let mut wheel = |name: &'static str, x: f32, z: f32, front: bool| {
                parent.spawn((
                    Name::new(name),
                    WheelVisual { front },
                    Mesh3d(assets.wheel_mesh.clone()),
                    MeshMaterial3d(assets.wheel_material.clone()),
                    Transform::from_xyz(x, WHEEL_RADIUS, z)
                        .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
                ));
            };
            wheel("WheelFrontLeft", -0.95, 1.3, true);
            wheel("WheelFrontRight", 0.95, 1.3, true);
            wheel("WheelRearLeft", -0.95, -1.3, false);
            wheel("WheelRearRight", 0.95, -1.3, false);
        });
    }
}

fn dress_glass(
    mut commands: Commands,
    assets: Option<Res<VisualAssets>>,
    mut meshes: ResMut<Assets<Mesh>>,
    q: Query<(Entity, &GlassPanel), Added<GlassPanel>>,
) {
    let Some(assets) = assets else { return };
    for (e, panel) in &q {
        let size = panel.pane_size();
        commands.entity(e).insert((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(assets.glass_material.clone()),
        ));
    }
}

fn dress_bullets(
    mut commands: Commands,
    assets: Option<Res<VisualAssets>>,
    q: Query<Entity, Added<Bullet>>,
) {
    let Some(assets) = assets else { return };
    for e in &q {
        commands.entity(e).insert((
            Mesh3d(assets.bullet_mesh.clone()),
            MeshMaterial3d(assets.bullet_material.clone()),
        ));
    }
}

/// Hide panes the moment the core marks them broken; the reset path clears
/// the set and this makes them visible again.
fn sync_broken_glass(
    q_car: Query<&BrokenPanels, With<Car>>,
    mut q_glass: Query<(&GlassPanel, &mut Visibility)>,
) {
    let Ok(broken) = q_car.single() else { return };
    for (panel, mut vis) in &mut q_glass {
        let wanted = if broken.is_broken(*panel) { Visibility::Hidden } else { Visibility::Inherited };
        if *vis != wanted {
            *vis = wanted;
        }
    }
}

fn sync_gun_visibility(
    q_agents: Query<&WeaponState, With<Agent>>,
    mut q_guns: Query<(&GunVisual, &mut Visibility)>,
) {
    for (gun, mut vis) in &mut q_guns {
        let Ok(weapon) = q_agents.get(gun.0) else { continue };
        let wanted = if weapon.drawn { Visibility::Inherited } else { Visibility::Hidden };
        if *vis != wanted {
            *vis = wanted;
        }
    }
}

/// Cheap procedural motion from the animation label: a walk bob and a small
/// recoil dip while the fire clip plays. An agent whose binding is missing is
/// rendered as idle and flagged once.
fn animate_agents(
    time: Res<Time>,
    q_agents: Query<Option<&AnimationState>, With<Agent>>,
    mut q_bodies: Query<(&AgentBody, &mut Transform)>,
    mut warned: Local<bool>,
) {
    let t = time.elapsed_secs();
    for (body, mut tf) in &mut q_bodies {
        let kind = match q_agents.get(body.0) {
            Ok(Some(anim)) => anim.kind,
            Ok(None) => {
                if !*warned {
                    warn!("agent without an animation state; rendering as idle");
                    *warned = true;
                }
                AnimationKind::Idle
            }
            Err(_) => continue,
        };

        let bob = match kind {
            AnimationKind::Walk => (t * 8.0).sin().abs() * 0.06,
            AnimationKind::Fire => -0.03,
            _ => 0.0,
        };
        tf.translation.y = 0.9 + bob;
    }
}

fn spin_wheel_visuals(
    q_car: Query<&CarKinematics, With<Car>>,
    mut q_wheels: Query<(&WheelVisual, &mut Transform)>,
) {
    let Ok(kin) = q_car.single() else { return };
    for (wheel, mut tf) in &mut q_wheels {
        let steer = if wheel.front { kin.steering_angle } else { 0.0 };
        tf.rotation = Quat::from_rotation_y(steer)
            * Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)
            * Quat::from_rotation_y(kin.wheel_spin);
    }
}
