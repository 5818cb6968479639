//! Tile grid and actor position tracking.

use std::collections::HashMap;

use pacman_core::{Direction, ObjectId, TileIndex};
use thiserror::Error;

/// Rectangular maze grid of walls and traversable tiles.
///
/// Besides the static wall layout the grid keeps a small set of temporarily
/// blocked tiles; pathfinding installs a block before searching and reverts
/// it before returning, so a block never outlives one path computation.
#[derive(Clone, Debug)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    walls: Vec<bool>,
    blocked: Vec<TileIndex>,
}

impl TileGrid {
    /// Creates a fully traversable grid with the provided dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        Self {
            columns,
            rows,
            walls: vec![false; capacity],
            blocked: Vec::new(),
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the tile lies within the grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, tile: TileIndex) -> bool {
        tile.column() < self.columns && tile.row() < self.rows
    }

    /// Marks or clears a wall on the provided tile.
    pub fn set_wall(&mut self, tile: TileIndex, wall: bool) {
        if let Some(index) = self.index(tile) {
            self.walls[index] = wall;
        }
    }

    /// Reports whether the tile holds a wall.
    #[must_use]
    pub fn is_wall(&self, tile: TileIndex) -> bool {
        self.index(tile)
            .map_or(false, |index| self.walls[index])
    }

    /// Reports whether an actor may enter the tile right now.
    #[must_use]
    pub fn is_traversable(&self, tile: TileIndex) -> bool {
        self.in_bounds(tile) && !self.is_wall(tile) && !self.blocked.contains(&tile)
    }

    /// Marks a tile temporarily non-traversable.
    pub fn block(&mut self, tile: TileIndex) {
        if !self.blocked.contains(&tile) {
            self.blocked.push(tile);
        }
    }

    /// Reverts a temporary block installed by [`TileGrid::block`].
    pub fn unblock(&mut self, tile: TileIndex) {
        self.blocked.retain(|blocked| *blocked != tile);
    }

    fn index(&self, tile: TileIndex) -> Option<usize> {
        if !self.in_bounds(tile) {
            return None;
        }
        let row = usize::try_from(tile.row()).ok()?;
        let column = usize::try_from(tile.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

/// Last known tile and facing direction of a tracked actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackedPosition {
    tile: TileIndex,
    facing: Option<Direction>,
}

impl TrackedPosition {
    /// Tile the actor currently occupies.
    #[must_use]
    pub const fn tile(&self) -> TileIndex {
        self.tile
    }

    /// Facing direction, absent until the actor has started moving.
    #[must_use]
    pub const fn facing(&self) -> Option<Direction> {
        self.facing
    }
}

/// Failure raised when querying an actor the tracker has never seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TrackingError {
    /// The actor was never registered with the tracker.
    #[error("object {0:?} is not registered with the position tracker")]
    NotTracked(ObjectId),
}

/// Maps actor identifiers to their last reported tile and facing.
#[derive(Clone, Debug, Default)]
pub struct PositionTracker {
    entries: HashMap<ObjectId, TrackedPosition>,
}

impl PositionTracker {
    /// Records the actor's current tile and facing direction.
    pub fn update(&mut self, id: ObjectId, tile: TileIndex, facing: Option<Direction>) {
        let _ = self.entries.insert(id, TrackedPosition { tile, facing });
    }

    /// Retrieves the actor's last known position.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::NotTracked`] when the actor was never
    /// registered; callers treat this as "no move this tick", not a crash.
    pub fn position(&self, id: ObjectId) -> Result<TrackedPosition, TrackingError> {
        self.entries
            .get(&id)
            .copied()
            .ok_or(TrackingError::NotTracked(id))
    }
}
