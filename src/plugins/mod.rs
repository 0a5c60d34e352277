//! Feature plugins.
//!
//! Gameplay plugins never touch assets or windows, so a headless app can run
//! every simulation tick the full app runs, in the same order.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod agents;
pub mod core;
pub mod director;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod transition;
pub mod ui;
pub mod vehicle;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;
pub mod visuals;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    vehicle::plugin(app);
    agents::plugin(app);
    player::plugin(app);
    director::plugin(app);
    transition::plugin(app);
    app.add_plugins(ProjectilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    visuals::plugin(app);
    ui::debug_hud::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
