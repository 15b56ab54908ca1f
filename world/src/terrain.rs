//! Bounded grid with static obstacles.

use std::collections::BTreeSet;

use mars_rover_core::{MissionError, Position};
use tracing::{debug, info, warn};

/// Immutable grid bounds plus the set of impassable cells.
///
/// Valid cells span `[0, width) x [0, height)`. Obstacles are expected to lie
/// inside those bounds; the terrain does not re-check them after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terrain {
    width: i32,
    height: i32,
    obstacles: BTreeSet<Position>,
}

impl Terrain {
    /// Builds a terrain of the given size containing the provided obstacles.
    ///
    /// Fails with [`MissionError::InvalidDimensions`] unless both dimensions
    /// are strictly positive. Duplicate obstacles collapse into one cell.
    pub fn new<I>(width: i32, height: i32, obstacles: I) -> Result<Self, MissionError>
    where
        I: IntoIterator<Item = Position>,
    {
        if width <= 0 || height <= 0 {
            warn!(width, height, "rejected terrain with non-positive dimensions");
            return Err(MissionError::InvalidDimensions { width, height });
        }

        let obstacles: BTreeSet<Position> = obstacles.into_iter().collect();
        info!(
            width,
            height,
            obstacles = obstacles.len(),
            "terrain initialized"
        );

        Ok(Self {
            width,
            height,
            obstacles,
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Iterates the registered obstacles in ascending `(x, y)` order.
    pub fn obstacles(&self) -> impl Iterator<Item = Position> + '_ {
        self.obstacles.iter().copied()
    }

    /// Reports whether the position lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x() >= 0
            && position.x() < self.width
            && position.y() >= 0
            && position.y() < self.height
    }

    /// Reports whether the rover may not enter the position.
    ///
    /// Cells outside the grid count as blocked, so callers cannot tell a
    /// boundary apart from an obstacle.
    #[must_use]
    pub fn has_obstacle(&self, position: Position) -> bool {
        if !self.contains(position) {
            warn!(%position, "position is out of bounds");
            return true;
        }

        let blocked = self.obstacles.contains(&position);
        if blocked {
            debug!(%position, "obstacle detected");
        }
        blocked
    }
}
