//! Vehicle plugin: the one parked car.
//!
//! The car is a kinematic prop: its pose and speed are written either by the
//! scripted director or (in the reset) by the session reset, never both in
//! the same phase. `CarKinematics` also carries two presentation-only values
//! the core owns: the front-wheel steering display angle and the cosmetic
//! wheel-spin accumulator.
//!
//! Glass panels are named child colliders. A broken panel stops being a
//! raycast target by clearing its layer memberships (no structural change),
//! and the reset restores them.

use std::collections::HashSet;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::plugins::agents::Yaw;

pub const CAR_START_POSITION: Vec3 = Vec3::ZERO;

/// Wheel roll per unit of travel (display only).
const WHEEL_SPIN_RATE: f32 = 5.0;

#[derive(Component)]
pub struct Car;

/// Opaque bodywork child (body shell, cabin). The renderer reads the size to
/// build a matching mesh; the collider here is the gameplay truth.
#[derive(Component, Clone, Copy, Debug)]
pub struct CarBodyPart {
    pub size: Vec3,
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct CarKinematics {
    /// Signed ground speed, units/s; negative is reverse.
    pub speed: f32,
    /// Front-wheel display angle, radians.
    pub steering_angle: f32,
    /// Accumulated wheel roll, radians (display only).
    pub wheel_spin: f32,
}

/// The six breakable panes.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlassPanel {
    Windshield,
    Rear,
    LeftFront,
    LeftRear,
    RightFront,
    RightRear,
}

impl GlassPanel {
    /// Full extents of the pane's thin box, car-local.
    pub fn pane_size(self) -> Vec3 {
        match self {
            GlassPanel::Windshield | GlassPanel::Rear => Vec3::new(1.5, 0.6, 0.05),
            _ => Vec3::new(0.05, 0.45, 0.8),
        }
    }
}

/// Set of panes already shattered. Breaking one twice is a no-op.
#[derive(Component, Debug, Clone, Default)]
pub struct BrokenPanels(HashSet<GlassPanel>);

impl BrokenPanels {
    /// Returns true if the panel was intact until now.
    pub fn break_panel(&mut self, panel: GlassPanel) -> bool {
        self.0.insert(panel)
    }

    pub fn is_broken(&self, panel: GlassPanel) -> bool {
        self.0.contains(&panel)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Layers for an intact pane: a valid bullet-raycast target.
pub fn glass_layers_active() -> CollisionLayers {
    CollisionLayers::new(Layer::Glass, [Layer::Bullet])
}

/// Layers for a shattered pane: invisible to every spatial query.
pub fn glass_layers_broken() -> CollisionLayers {
    CollisionLayers::new(LayerMask::NONE, LayerMask::NONE)
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn);
    app.add_systems(Update, spin_wheels);
}

fn spawn(mut commands: Commands) {
    let body_layers = CollisionLayers::new(Layer::Car, [Layer::Bullet]);

    commands
        .spawn((
            Name::new("Car"),
            Car,
            CarKinematics::default(),
            BrokenPanels::default(),
            Yaw(0.0),
            Transform::from_translation(CAR_START_POSITION),
            RigidBody::Kinematic,
        ))
        .with_children(|parent| {
            let body_size = Vec3::new(1.8, 0.5, 4.0);
            parent.spawn((
                Name::new("Body"),
                CarBodyPart { size: body_size },
                Transform::from_xyz(0.0, 0.6, 0.0),
                Collider::cuboid(body_size.x, body_size.y, body_size.z),
                body_layers,
            ));
            let cabin_size = Vec3::new(1.6, 0.5, 2.0);
            parent.spawn((
                Name::new("Cabin"),
                CarBodyPart { size: cabin_size },
                Transform::from_xyz(0.0, 1.1, -0.3),
                Collider::cuboid(cabin_size.x, cabin_size.y, cabin_size.z),
                body_layers,
            ));

            let mut pane = |name: &'static str, panel: GlassPanel, pos: Vec3| {
                let size = panel.pane_size();
                parent.spawn((
                    Name::new(name),
                    panel,
                    Transform::from_translation(pos),
                    Collider::cuboid(size.x, size.y, size.z),
                    glass_layers_active(),
                ));
            };

            pane("GlassWindshield", GlassPanel::Windshield, Vec3::new(0.0, 1.1, 0.8));
            pane("GlassRear", GlassPanel::Rear, Vec3::new(0.0, 1.1, -1.5));
            pane("GlassLeftFront", GlassPanel::LeftFront, Vec3::new(-0.85, 1.1, 0.2));
            pane("GlassLeftRear", GlassPanel::LeftRear, Vec3::new(-0.85, 1.1, -0.9));
            pane("GlassRightFront", GlassPanel::RightFront, Vec3::new(0.85, 1.1, 0.2));
            pane("GlassRightRear", GlassPanel::RightRear, Vec3::new(0.85, 1.1, -0.9));
        });
}

/// Roll the wheels in proportion to travel. Pure display state.
pub fn spin_wheels(time: Res<Time>, mut q: Query<&mut CarKinematics, With<Car>>) {
    let dt = time.delta_secs();
    for mut kin in &mut q {
        kin.wheel_spin += kin.speed * dt * WHEEL_SPIN_RATE;
    }
}
