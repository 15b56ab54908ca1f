#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Mars Rover mission engine.
//!
//! This crate defines the vocabulary that connects the mission loop, the
//! authoritative world state, and the command system. The mission loop turns
//! raw text into [`CommandCode`] letters, the command system executes them
//! against the rover and terrain, and every successful command reports an
//! [`Event`] into a caller-owned buffer. Failures surface as [`MissionError`]
//! values rather than being logged and swallowed.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the mission control boots.
pub const WELCOME_BANNER: &str = "=== Mars Rover Mission Control ===";

/// Number of history entries exposed by a status report.
pub const STATUS_HISTORY_LIMIT: usize = 5;

/// Cardinal headings available to the rover.
///
/// The declaration order is the clockwise cycle used by turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Heading toward increasing `y`.
    #[serde(rename = "N", alias = "n")]
    North,
    /// Heading toward increasing `x`.
    #[serde(rename = "E", alias = "e")]
    East,
    /// Heading toward decreasing `y`.
    #[serde(rename = "S", alias = "s")]
    South,
    /// Heading toward decreasing `x`.
    #[serde(rename = "W", alias = "w")]
    West,
}

impl Direction {
    /// Every heading in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Single-letter symbol used in prompts and reports.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Parses a heading from its letter, ignoring case.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.letter() == letter.to_ascii_uppercase())
    }

    /// Returns the heading reached by applying the provided turn.
    #[must_use]
    pub const fn turned(self, turn: Turn) -> Self {
        let offset = match turn {
            Turn::Left => 3,
            Turn::Right => 1,
        };
        Self::ALL[(self.index() + offset) % Self::ALL.len()]
    }

    /// Unit offset `(dx, dy)` covered by a single step along this heading.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut chars = value.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => {
                Self::from_letter(letter).ok_or_else(|| ParseDirectionError(value.to_owned()))
            }
            _ => Err(ParseDirectionError(value.to_owned())),
        }
    }
}

/// Error returned when text does not name one of the four headings.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid direction '{0}', choose N, S, E, or W")]
pub struct ParseDirectionError(String);

/// Rotation applied by a turn command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Counter-clockwise quarter turn.
    Left,
    /// Clockwise quarter turn.
    Right,
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Location on the plane expressed as signed `x` and `y` coordinates.
///
/// Positions carry no bounds of their own; the terrain decides which ones
/// are reachable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the adjacent position one step along `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Primitive single-letter commands understood by the rover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandCode {
    /// Advance one cell along the current heading.
    Move,
    /// Rotate a quarter turn counter-clockwise.
    TurnLeft,
    /// Rotate a quarter turn clockwise.
    TurnRight,
    /// Report the rover's status.
    Status,
}

impl CommandCode {
    /// Every command in menu order.
    pub const ALL: [CommandCode; 4] = [Self::Move, Self::TurnLeft, Self::TurnRight, Self::Status];

    /// Letter that selects the command.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Move => 'M',
            Self::TurnLeft => 'L',
            Self::TurnRight => 'R',
            Self::Status => 'S',
        }
    }

    /// Resolves a command from its letter, ignoring case.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| code.letter() == letter.to_ascii_uppercase())
    }
}

impl fmt::Display for CommandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Immutable snapshot of the rover used for status reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoverStatus {
    /// Cell currently occupied by the rover.
    pub position: Position,
    /// Heading the rover currently faces.
    pub facing: Direction,
    /// Most recent history entries in execution order, at most [`STATUS_HISTORY_LIMIT`].
    pub recent: Vec<CommandCode>,
}

impl fmt::Display for RoverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rover is at {} facing {}. ", self.position, self.facing)?;
        if self.recent.is_empty() {
            return write!(f, "No commands executed.");
        }

        write!(f, "Last {} commands: ", self.recent.len())?;
        for (index, code) in self.recent.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{code}")?;
        }
        write!(f, ".")
    }
}

/// Outcomes reported by commands that completed successfully.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the rover advanced into a free cell.
    RoverMoved {
        /// Cell the rover occupies after the move.
        to: Position,
        /// Heading kept during the move.
        facing: Direction,
    },
    /// Confirms that the rover rotated in place.
    RoverTurned {
        /// Rotation that was applied.
        turn: Turn,
        /// Heading after the rotation.
        facing: Direction,
    },
    /// Carries a status report requested by the operator.
    StatusReported {
        /// Snapshot captured when the status command ran.
        status: RoverStatus,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoverMoved { to, facing } => write!(f, "Rover moved to {to} facing {facing}"),
            Self::RoverTurned { turn, facing } => {
                write!(f, "Rover turned {turn}, now facing {facing}")
            }
            Self::StatusReported { status } => write!(f, "{status}"),
        }
    }
}

/// Failures raised by terrain construction and command dispatch.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MissionError {
    /// Terrain width or height was not strictly positive.
    #[error("terrain dimensions must be positive, got {width}x{height}")]
    InvalidDimensions {
        /// Requested number of columns.
        width: i32,
        /// Requested number of rows.
        height: i32,
    },
    /// The destination of a move is an obstacle or lies outside the terrain.
    #[error("Cannot move to {target}: Obstacle detected")]
    ObstacleOrBoundary {
        /// Cell the rover attempted to enter.
        target: Position,
    },
    /// The command factory received a code it does not recognise.
    #[error("Invalid command: {code}")]
    UnknownCommand {
        /// Code exactly as supplied by the caller.
        code: String,
    },
}
