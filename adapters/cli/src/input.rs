//! Validators that turn operator text into primitive mission values.
//!
//! Each validator returns the message shown to the operator on rejection.

use mars_rover_core::{CommandCode, Direction};

/// Action selected at the command prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Control {
    /// Ends the mission.
    Quit,
    /// Requests a separate prompt for a batch.
    BatchPrompt,
    /// Upper-cased command letters to execute in order.
    Batch(String),
}

pub(crate) fn positive(value: &str, label: &str) -> Result<i32, String> {
    match value.parse::<i32>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(format!("{label} must be a positive integer")),
    }
}

pub(crate) fn obstacle_count(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| "Obstacle count must be non-negative".to_owned())
}

/// Accepts a coordinate in `[0, bound)`.
pub(crate) fn coordinate(value: &str, axis: char, bound: i32) -> Result<i32, String> {
    match value.parse::<i32>() {
        Ok(number) if (0..bound).contains(&number) => Ok(number),
        _ => Err(format!("Invalid {axis}-coordinate (0-{})", bound - 1)),
    }
}

pub(crate) fn direction(value: &str) -> Result<Direction, String> {
    value.parse::<Direction>().map_err(|error| error.to_string())
}

pub(crate) fn batch(value: &str) -> Result<String, String> {
    let upper = value.trim().to_ascii_uppercase();
    if is_batch(&upper) {
        Ok(upper)
    } else {
        Err("Batch commands must be M, L, R, or S".to_owned())
    }
}

pub(crate) fn control(value: &str) -> Result<Control, String> {
    let upper = value.trim().to_ascii_uppercase();
    match upper.as_str() {
        "Q" => Ok(Control::Quit),
        "B" => Ok(Control::BatchPrompt),
        _ if is_batch(&upper) => Ok(Control::Batch(upper)),
        _ => Err(
            "Invalid input. Use M, L, R, S, Q, or a sequence of M, L, R, S (e.g., MMRMLM)"
                .to_owned(),
        ),
    }
}

fn is_batch(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|letter| CommandCode::from_letter(letter).is_some())
}
