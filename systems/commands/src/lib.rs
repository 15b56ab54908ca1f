#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command system that turns operator letters into rover state transitions.
//!
//! Commands borrow the rover mutably and the terrain immutably for exactly one
//! execution. Successful commands push an [`Event`] into the caller's buffer;
//! failures return a [`MissionError`] and leave the rover untouched.

use mars_rover_core::{CommandCode, Event, MissionError, Turn};
use mars_rover_world::{Rover, Terrain};
use thiserror::Error;
use tracing::{debug, warn};

/// One-shot action bound to the rover (and, for moves, the terrain).
///
/// [`Command::execute`] consumes the command, so a command can never run twice.
#[derive(Debug)]
pub enum Command<'a> {
    /// Advance one cell if the destination is free.
    Move {
        /// Rover that will advance.
        rover: &'a mut Rover,
        /// Terrain consulted before moving.
        terrain: &'a Terrain,
    },
    /// Rotate a quarter turn counter-clockwise.
    TurnLeft {
        /// Rover that will rotate.
        rover: &'a mut Rover,
    },
    /// Rotate a quarter turn clockwise.
    TurnRight {
        /// Rover that will rotate.
        rover: &'a mut Rover,
    },
    /// Report the rover's current status.
    Status {
        /// Rover being inspected.
        rover: &'a Rover,
    },
}

impl<'a> Command<'a> {
    /// Binds the command identified by `code` to the provided rover and terrain.
    #[must_use]
    pub fn bind(code: CommandCode, rover: &'a mut Rover, terrain: &'a Terrain) -> Self {
        match code {
            CommandCode::Move => Self::Move { rover, terrain },
            CommandCode::TurnLeft => Self::TurnLeft { rover },
            CommandCode::TurnRight => Self::TurnRight { rover },
            CommandCode::Status => Self::Status { rover },
        }
    }

    /// Letter that selects this command.
    #[must_use]
    pub const fn code(&self) -> CommandCode {
        match self {
            Self::Move { .. } => CommandCode::Move,
            Self::TurnLeft { .. } => CommandCode::TurnLeft,
            Self::TurnRight { .. } => CommandCode::TurnRight,
            Self::Status { .. } => CommandCode::Status,
        }
    }

    /// Runs the command, reporting its outcome into `out`.
    ///
    /// A move whose destination is blocked fails with
    /// [`MissionError::ObstacleOrBoundary`] and pushes nothing.
    pub fn execute(self, out: &mut Vec<Event>) -> Result<(), MissionError> {
        debug!(code = %self.code(), "executing command");
        match self {
            Self::Move { rover, terrain } => {
                let target = rover.next_position();
                if terrain.has_obstacle(target) {
                    warn!(%target, "move rejected");
                    return Err(MissionError::ObstacleOrBoundary { target });
                }

                rover.move_forward();
                out.push(Event::RoverMoved {
                    to: rover.position(),
                    facing: rover.direction(),
                });
            }
            Self::TurnLeft { rover } => {
                rover.turn_left();
                out.push(Event::RoverTurned {
                    turn: Turn::Left,
                    facing: rover.direction(),
                });
            }
            Self::TurnRight { rover } => {
                rover.turn_right();
                out.push(Event::RoverTurned {
                    turn: Turn::Right,
                    facing: rover.direction(),
                });
            }
            Self::Status { rover } => {
                out.push(Event::StatusReported {
                    status: rover.status(),
                });
            }
        }
        Ok(())
    }
}

/// Maps operator codes onto bound [`Command`] values.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandFactory;

impl CommandFactory {
    /// Creates a new command factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves a single-letter code, ignoring case.
    ///
    /// Empty and multi-character codes are rejected with
    /// [`MissionError::UnknownCommand`]; batches must be split by the caller.
    pub fn create_command<'a>(
        &self,
        code: &str,
        rover: &'a mut Rover,
        terrain: &'a Terrain,
    ) -> Result<Command<'a>, MissionError> {
        let mut letters = code.chars();
        let resolved = match (letters.next(), letters.next()) {
            (Some(letter), None) => CommandCode::from_letter(letter),
            _ => None,
        };

        match resolved {
            Some(resolved) => Ok(Command::bind(resolved, rover, terrain)),
            None => {
                warn!(code, "invalid command type");
                Err(MissionError::UnknownCommand {
                    code: code.to_owned(),
                })
            }
        }
    }
}

/// Summary of a batch whose commands all succeeded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    executed: Vec<CommandCode>,
}

impl BatchReport {
    /// Commands executed, in order.
    #[must_use]
    pub fn executed(&self) -> &[CommandCode] {
        &self.executed
    }
}

/// Failure that halted a batch part-way through.
///
/// Commands before [`BatchError::index`] already ran and are not rolled back.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("batch halted at position {}: {source}", .index + 1)]
pub struct BatchError {
    completed: Vec<CommandCode>,
    index: usize,
    #[source]
    source: MissionError,
}

impl BatchError {
    /// Commands that ran before the failure, in order.
    #[must_use]
    pub fn completed(&self) -> &[CommandCode] {
        &self.completed
    }

    /// Zero-based position of the letter that failed.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Underlying command failure.
    #[must_use]
    pub const fn error(&self) -> &MissionError {
        &self.source
    }
}

/// Executes each letter of `batch` left to right, stopping at the first failure.
///
/// Events of every command that ran are pushed into `out`, including those
/// that ran before a failure.
pub fn execute_batch(
    batch: &str,
    rover: &mut Rover,
    terrain: &Terrain,
    out: &mut Vec<Event>,
) -> Result<BatchReport, BatchError> {
    let factory = CommandFactory::new();
    let mut executed = Vec::with_capacity(batch.len());
    let mut buffer = [0_u8; 4];

    for (index, letter) in batch.chars().enumerate() {
        let code = letter.encode_utf8(&mut buffer);
        let outcome = factory
            .create_command(code, rover, terrain)
            .and_then(|command| {
                let resolved = command.code();
                command.execute(out).map(|()| resolved)
            });

        match outcome {
            Ok(resolved) => executed.push(resolved),
            Err(source) => {
                return Err(BatchError {
                    completed: executed,
                    index,
                    source,
                });
            }
        }
    }

    debug!(batch, executed = executed.len(), "batch completed");
    Ok(BatchReport { executed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mars_rover_core::{Direction, Position};

    #[test]
    fn bound_commands_report_their_code() {
        let terrain = Terrain::new(2, 2, []).expect("valid terrain");
        for code in CommandCode::ALL {
            let mut rover = Rover::new(Position::new(0, 0), Direction::North);
            assert_eq!(Command::bind(code, &mut rover, &terrain).code(), code);
        }
    }

    #[test]
    fn factory_rejects_multi_letter_and_empty_codes() {
        let terrain = Terrain::new(2, 2, []).expect("valid terrain");
        let mut rover = Rover::new(Position::new(0, 0), Direction::North);
        let factory = CommandFactory::new();

        for code in ["", "MM", " M", "Q"] {
            let error = factory
                .create_command(code, &mut rover, &terrain)
                .expect_err("code should be rejected");
            assert_eq!(
                error,
                MissionError::UnknownCommand {
                    code: code.to_owned()
                }
            );
        }
    }

    #[test]
    fn batch_error_exposes_inner_failure() {
        let error = BatchError {
            completed: vec![CommandCode::Move],
            index: 1,
            source: MissionError::ObstacleOrBoundary {
                target: Position::new(0, 2),
            },
        };
        assert_eq!(
            error.to_string(),
            "batch halted at position 2: Cannot move to (0, 2): Obstacle detected"
        );
        assert!(std::error::Error::source(&error).is_some());
    }
}
