//! Interactive mission loop: setup prompts, command dispatch and reporting.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use mars_rover_core::Position;
use mars_rover_system_commands::{execute_batch, BatchError, BatchReport};
use mars_rover_world::{Rover, Terrain};
use tracing::{error, info};

use crate::{
    input::{self, Control},
    prompt::{PromptError, Prompter},
};

const COMMAND_MENU: &str =
    "Commands: M (move), L (left), R (right), S (status), B (batch), Q (quit)";
const BATCH_HINT: &str = "Batch example: MMRMLM (executes multiple commands)";

/// Prompts for the terrain, its obstacles and the rover's starting pose.
pub(crate) fn setup<R, W>(prompter: &mut Prompter<R, W>) -> Result<(Terrain, Rover)>
where
    R: BufRead,
    W: Write,
{
    prompter.say("Initializing Mars Rover Mission...")?;
    let width = prompter.ask("Enter terrain width (positive integer): ", |value| {
        input::positive(value, "Width")
    })?;
    let height = prompter.ask("Enter terrain height (positive integer): ", |value| {
        input::positive(value, "Height")
    })?;
    let count = prompter.ask(
        "Enter number of obstacles (non-negative): ",
        input::obstacle_count,
    )?;

    let mut obstacles = Vec::new();
    for index in 1..=count {
        let x = prompter.ask(
            &format!("Enter obstacle {index} x-coordinate (0-{}): ", width - 1),
            |value| input::coordinate(value, 'x', width),
        )?;
        let y = prompter.ask(
            &format!("Enter obstacle {index} y-coordinate (0-{}): ", height - 1),
            |value| input::coordinate(value, 'y', height),
        )?;
        obstacles.push(Position::new(x, y));
    }
    let terrain = Terrain::new(width, height, obstacles)?;

    let x = prompter.ask(
        &format!("Enter rover starting x-coordinate (0-{}): ", width - 1),
        |value| input::coordinate(value, 'x', width),
    )?;
    let y = prompter.ask(
        &format!("Enter rover starting y-coordinate (0-{}): ", height - 1),
        |value| {
            let y = input::coordinate(value, 'y', height)?;
            if terrain.has_obstacle(Position::new(x, y)) {
                return Err(format!("Obstacle at starting position ({x}, {y})"));
            }
            Ok(y)
        },
    )?;
    let direction = prompter.ask("Enter rover direction (N, S, E, W): ", input::direction)?;

    let rover = Rover::new(Position::new(x, y), direction);
    info!("Rover mission initialized successfully");
    Ok((terrain, rover))
}

/// Reads and executes commands until the operator quits or input ends.
pub(crate) fn run<R, W>(
    rover: &mut Rover,
    terrain: &Terrain,
    prompter: &mut Prompter<R, W>,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    loop {
        prompter.say("")?;
        prompter.say(COMMAND_MENU)?;
        prompter.say(BATCH_HINT)?;

        let batch = match prompter.ask("Enter command or batch: ", input::control) {
            Ok(Control::Quit) => {
                info!("Mission terminated");
                prompter.say("Mission Control: Exiting...")?;
                return Ok(());
            }
            Ok(Control::Batch(batch)) => batch,
            Ok(Control::BatchPrompt) => {
                match prompter.ask("Enter batch commands (e.g., MMRMLM): ", input::batch) {
                    Ok(batch) => batch,
                    Err(error) => return end_of_input(error),
                }
            }
            Err(error) => return end_of_input(error),
        };

        let _ = dispatch(&batch, rover, terrain, prompter)?;
    }
}

/// Executes a single batch, then reports the final status.
pub(crate) fn run_once<R, W>(
    batch: &str,
    rover: &mut Rover,
    terrain: &Terrain,
    prompter: &mut Prompter<R, W>,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let batch = input::batch(batch).map_err(anyhow::Error::msg)?;
    let outcome = dispatch(&batch, rover, terrain, prompter)?;
    prompter.say(rover.status())?;
    let _report = outcome.with_context(|| format!("batch '{batch}' did not complete"))?;
    Ok(())
}

/// Runs `batch` and writes every resulting event and failure to the operator.
///
/// The outer result carries terminal failures; the inner one the batch outcome.
fn dispatch<R, W>(
    batch: &str,
    rover: &mut Rover,
    terrain: &Terrain,
    prompter: &mut Prompter<R, W>,
) -> Result<Result<BatchReport, BatchError>>
where
    R: BufRead,
    W: Write,
{
    let mut events = Vec::new();
    let outcome = execute_batch(batch, rover, terrain, &mut events);

    for event in &events {
        info!("{event}");
        prompter.say(event)?;
    }

    match &outcome {
        Ok(_) => info!("Batch commands executed: {batch}"),
        Err(failure) => {
            let message = failure.error();
            error!("Command error: {message}");
            prompter.say(format_args!("Mission Control Error: {message}"))?;
        }
    }
    Ok(outcome)
}

fn end_of_input(error: PromptError) -> Result<()> {
    match error {
        PromptError::Closed => {
            info!("input closed, mission terminated");
            Ok(())
        }
        other => Err(other).context("read mission command"),
    }
}
