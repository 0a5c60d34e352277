//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime.
//! - `TransformPlugin` so child colliders (glass panes, hitboxes) get world
//!   poses for the bullet raycast.
//! - then `car_vignette::game::configure_headless` installs the gameplay
//!   plugins. No window, no input, no render.

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    car_vignette::game::configure_headless(&mut app);
    app
}

/// Run one tick with an exact `dt`.
///
/// The clock must be driven through `TimeUpdateStrategy`: `time_system`
/// recomputes the virtual delta from the update strategy every frame, so
/// mutating `Time<Virtual>` directly gets overwritten before any game
/// system reads it.
#[allow(dead_code)]
pub fn tick(app: &mut App, seconds: f32) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(
        std::time::Duration::from_secs_f32(seconds),
    ));
    app.update();
}
