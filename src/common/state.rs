//! Global state machine.
//!
//! The scripted scenario is a one-way chain:
//! `ApproachCar -> CarReversing -> Transition -> ThirdAgentControl -> CarCharge`.
//! Only a reset goes backwards. The enum is closed on purpose: every phase
//! handler matches exhaustively, so an unknown phase cannot exist at runtime.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GamePhase {
    /// Player walks the first agent toward the driver door.
    #[default]
    ApproachCar,
    /// Scripted: the car turns its wheels and reverses out.
    CarReversing,
    /// Cinematic camera hand-off; player input is disabled.
    Transition,
    /// Control has switched to the third agent.
    ThirdAgentControl,
    /// Scripted: the car charges the third agent, then veers off. Terminal.
    CarCharge,
}
