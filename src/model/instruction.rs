//! Robot movement instructions.

use serde::{Deserialize, Serialize};
use super::ShelfId;

/// Symbolic movement command, relative to the robot's current heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Movement {
    MoveForward,
    TurnRightAndMove,
    TurnAroundAndMove,
    TurnLeftAndMove,
}

impl Movement {
    /// Map a clockwise turn in degrees (`0..360`) to a command.
    ///
    /// Exact quarter turns map directly; anything else falls into the
    /// nearest quadrant with boundaries at 45/135/225/315.
    pub fn from_turn(turn: u32) -> Self {
        match turn % 360 {
            0 => Movement::MoveForward,
            90 => Movement::TurnRightAndMove,
            180 => Movement::TurnAroundAndMove,
            270 => Movement::TurnLeftAndMove,
            t if !(45..=315).contains(&t) => Movement::MoveForward,
            t if t < 135 => Movement::TurnRightAndMove,
            t if t < 225 => Movement::TurnAroundAndMove,
            _ => Movement::TurnLeftAndMove,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Movement::MoveForward => "MOVE_FORWARD",
            Movement::TurnRightAndMove => "TURN_RIGHT_AND_MOVE",
            Movement::TurnAroundAndMove => "TURN_AROUND_AND_MOVE",
            Movement::TurnLeftAndMove => "TURN_LEFT_AND_MOVE",
        }
    }
}

impl std::fmt::Display for Movement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a route: move from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub instruction: Movement,
    pub from: String,
    pub to: String,
    /// Weight of the directed edge `from -> to`, 0 if that edge is absent.
    pub distance: f64,
    /// Shelf hosted at `to`, if any.
    pub shelf_id: Option<ShelfId>,
}
