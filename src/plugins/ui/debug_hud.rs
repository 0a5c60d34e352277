//! Debug HUD: current phase, hand-off progress and the controls legend.

use bevy::prelude::*;

use crate::common::state::GamePhase;
use crate::plugins::transition::TransitionState;

const LEGEND: &str = "WASD move | QE strafe | G weapon | Space fire | R reset";

#[derive(Component)]
struct HudText;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_hud);
    app.add_systems(Update, update_hud);
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("DebugHud"),
        HudText,
        Text::new(""),
        TextFont { font_size: 16.0, ..default() },
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(12.0),
            ..default()
        },
    ));
}

fn update_hud(
    phase: Res<State<GamePhase>>,
    transition: Res<TransitionState>,
    mut q: Query<&mut Text, With<HudText>>,
) {
    let Ok(mut text) = q.single_mut() else { return };

    let phase_line = match phase.get() {
        GamePhase::ApproachCar => "approach the car".to_string(),
        GamePhase::CarReversing => "car reversing".to_string(),
        GamePhase::Transition => {
            format!("hand-off {:.0}%", transition.progress * 100.0)
        }
        GamePhase::ThirdAgentControl => "third agent control".to_string(),
        GamePhase::CarCharge => "car charge".to_string(),
    };

    text.0 = format!("{phase_line}\n{LEGEND}");
}
