//! Mutable rover state machine.

use mars_rover_core::{CommandCode, Direction, Position, RoverStatus, Turn, STATUS_HISTORY_LIMIT};
use tracing::info;

/// Agent state: position, heading and the log of executed commands.
///
/// The rover trusts its caller. [`Rover::move_forward`] never consults the
/// terrain, so destinations must be validated before moving.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rover {
    position: Position,
    direction: Direction,
    history: Vec<CommandCode>,
}

impl Rover {
    /// Places a new rover with an empty history.
    #[must_use]
    pub fn new(position: Position, direction: Direction) -> Self {
        info!(%position, %direction, "rover initialized");
        Self {
            position,
            direction,
            history: Vec::new(),
        }
    }

    /// Cell currently occupied by the rover.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Heading the rover currently faces.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Every executed move and turn, oldest first.
    #[must_use]
    pub fn history(&self) -> &[CommandCode] {
        &self.history
    }

    /// Cell the rover would occupy after one move, without moving it.
    #[must_use]
    pub const fn next_position(&self) -> Position {
        self.position.step(self.direction)
    }

    /// Advances one cell along the current heading and records `M`.
    pub fn move_forward(&mut self) {
        self.position = self.next_position();
        self.history.push(CommandCode::Move);
    }

    /// Rotates counter-clockwise and records `L`.
    pub fn turn_left(&mut self) {
        self.rotate(Turn::Left);
        self.history.push(CommandCode::TurnLeft);
    }

    /// Rotates clockwise and records `R`.
    pub fn turn_right(&mut self) {
        self.rotate(Turn::Right);
        self.history.push(CommandCode::TurnRight);
    }

    /// Captures the position, heading and the most recent history entries.
    #[must_use]
    pub fn status(&self) -> RoverStatus {
        let skip = self.history.len().saturating_sub(STATUS_HISTORY_LIMIT);
        RoverStatus {
            position: self.position,
            facing: self.direction,
            recent: self.history[skip..].to_vec(),
        }
    }

    fn rotate(&mut self, turn: Turn) {
        self.direction = self.direction.turned(turn);
    }
}
