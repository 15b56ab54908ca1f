//! Mission files describing the terrain and the rover's starting pose.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use mars_rover_core::{Direction, Position};
use mars_rover_world::{Rover, Terrain};
use serde::Deserialize;

/// Mission setup loaded from TOML.
///
/// ```toml
/// [terrain]
/// width = 5
/// height = 5
/// obstacles = [{ x = 2, y = 2 }]
///
/// [rover]
/// x = 0
/// y = 0
/// direction = "N"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct MissionConfig {
    terrain: TerrainConfig,
    rover: RoverConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct TerrainConfig {
    width: i32,
    height: i32,
    #[serde(default)]
    obstacles: Vec<Position>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct RoverConfig {
    x: i32,
    y: i32,
    direction: Direction,
}

impl MissionConfig {
    pub(crate) fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse mission TOML")
    }

    /// Validates the mission and builds the terrain and rover it describes.
    pub(crate) fn build(&self) -> Result<(Terrain, Rover)> {
        let TerrainConfig {
            width,
            height,
            ref obstacles,
        } = self.terrain;
        let terrain = Terrain::new(width, height, obstacles.iter().copied())?;

        if let Some(outside) = obstacles.iter().find(|cell| !terrain.contains(**cell)) {
            bail!("obstacle {outside} lies outside the {width}x{height} terrain");
        }

        let start = Position::new(self.rover.x, self.rover.y);
        if !terrain.contains(start) {
            bail!("rover start {start} lies outside the {width}x{height} terrain");
        }
        if terrain.has_obstacle(start) {
            bail!("rover start {start} is occupied by an obstacle");
        }

        Ok((terrain, Rover::new(start, self.rover.direction)))
    }
}

/// Reads and parses the mission file at `path`.
pub(crate) fn load(path: &Path) -> Result<MissionConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read mission file {}", path.display()))?;
    MissionConfig::parse(&text).with_context(|| format!("load mission file {}", path.display()))
}
