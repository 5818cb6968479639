#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tile pathfinding for maze actors.
//!
//! The crate offers a plain breadth-first search with a deterministic
//! neighbor expansion order, and a forward-constrained wrapper that keeps
//! actors from turning straight around unless a reversal was explicitly
//! requested for the next search.

use std::collections::{HashMap, VecDeque};

use pacman_core::{Direction, ObjectId, TileIndex};
use pacman_world::{PositionTracker, TileGrid};

/// Expansion order of the breadth-first search.
///
/// Ties between equally short paths are broken by this order, so route
/// selection is fully deterministic for a given grid.
const NEIGHBOR_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Down,
    Direction::Right,
];

/// Computes the shortest traversable path from `source` to `target`.
///
/// The returned path lists every tile to enter in order, excluding `source`
/// and including `target`. An unreachable target, or a target equal to the
/// source, yields an empty path.
#[must_use]
pub fn shortest_path(grid: &TileGrid, source: TileIndex, target: TileIndex) -> Vec<TileIndex> {
    if source == target || !grid.is_traversable(target) {
        return Vec::new();
    }

    let mut came_from: HashMap<TileIndex, TileIndex> = HashMap::new();
    let mut frontier = VecDeque::new();
    let _ = came_from.insert(source, source);
    frontier.push_back(source);

    while let Some(tile) = frontier.pop_front() {
        if tile == target {
            break;
        }
        for direction in NEIGHBOR_ORDER {
            let Some(next) = tile.step(direction) else {
                continue;
            };
            if !grid.is_traversable(next) || came_from.contains_key(&next) {
                continue;
            }
            let _ = came_from.insert(next, tile);
            frontier.push_back(next);
        }
    }

    if !came_from.contains_key(&target) {
        return Vec::new();
    }

    let mut path = vec![target];
    let mut current = target;
    while let Some(&previous) = came_from.get(&current) {
        if previous == source {
            break;
        }
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

/// Breadth-first search that refuses to step backward through the actor.
///
/// The searcher looks the actor up in the position tracker, temporarily
/// blocks the tile directly behind it (based on its facing direction), and
/// runs [`shortest_path`] against the modified grid. When a reversal has
/// been requested, the next search instead blocks the tile directly in
/// front, forcing the route to turn around; the request is consumed by that
/// single search.
#[derive(Clone, Debug)]
pub struct ForwardDirectionalBfs {
    actor: ObjectId,
    reverse_requested: bool,
}

impl ForwardDirectionalBfs {
    /// Creates a searcher bound to the provided actor.
    #[must_use]
    pub const fn new(actor: ObjectId) -> Self {
        Self {
            actor,
            reverse_requested: false,
        }
    }

    /// Actor whose position and facing constrain the search.
    #[must_use]
    pub const fn actor(&self) -> ObjectId {
        self.actor
    }

    /// Requests a direction reversal for the next search only.
    pub fn request_reversal(&mut self) {
        self.reverse_requested = true;
    }

    /// Reports whether a reversal is queued for the next search.
    #[must_use]
    pub const fn reversal_pending(&self) -> bool {
        self.reverse_requested
    }

    /// Finds a path from the actor's tracked tile to `target`.
    ///
    /// An actor missing from the tracker logs a warning and yields an empty
    /// path; the caller simply issues no move that tick. Any temporary block
    /// installed for the search is reverted before returning.
    ///
    /// # Panics
    ///
    /// Panics when the tracked actor has no facing direction; every actor
    /// routed through this search is registered with one.
    pub fn find_path(
        &mut self,
        grid: &mut TileGrid,
        tracker: &PositionTracker,
        target: TileIndex,
    ) -> Vec<TileIndex> {
        let position = match tracker.position(self.actor) {
            Ok(position) => position,
            Err(error) => {
                tracing::warn!(actor = ?self.actor, %error, "skipping path search");
                return Vec::new();
            }
        };

        let reverse = std::mem::take(&mut self.reverse_requested);
        let facing = position
            .facing()
            .unwrap_or_else(|| panic!("actor {:?} has no facing direction", self.actor));

        let barred = if reverse {
            position.tile().step(facing)
        } else {
            position.tile().step(facing.opposite())
        };

        if let Some(tile) = barred {
            grid.block(tile);
        }
        let path = shortest_path(grid, position.tile(), target);
        if let Some(tile) = barred {
            grid.unblock(tile);
        }
        path
    }
}
