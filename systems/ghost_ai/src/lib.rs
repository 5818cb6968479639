#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ghost behavior: the mode state machine and per-ghost steering.
//!
//! Mode changes are a pure [`transition`] over the closed
//! [`GhostState`] enum driven by broadcast [`GameEvent`]s; a [`GhostAi`]
//! controller per ghost applies the transitions, picks a destination tile
//! for the current mode, and feeds paths to the ghost's mover.

use std::time::Duration;

use pacman_core::{Direction, GameEvent, GhostState, ObjectId, ResumePhase, TileIndex};
use pacman_system_pathfinding::ForwardDirectionalBfs;
use pacman_world::{TileGrid, World};

/// Computes the ghost state that follows `state` after observing `event`.
///
/// `phase` is the current global scatter/chase phase; it decides which mode
/// a frightened ghost returns to when the frightened window ends. Eaten and
/// healing ghosts ignore mode events entirely until they re-enter play.
#[must_use]
pub fn transition(state: GhostState, event: GameEvent, phase: ResumePhase) -> GhostState {
    match (state, event) {
        (GhostState::Scatter | GhostState::Chase, GameEvent::FrightenedModeBegin) => {
            GhostState::Frightened
        }
        (GhostState::Frightened, GameEvent::FrightenedModeEnd) => phase.into_state(),
        (GhostState::Scatter | GhostState::Chase, GameEvent::ScatterModeBegin) => {
            GhostState::Scatter
        }
        (GhostState::Scatter | GhostState::Chase, GameEvent::ChaseModeBegin) => GhostState::Chase,
        _ => state,
    }
}

/// Steering controller for one ghost.
///
/// Owns the ghost's forward-constrained path search and the heal dwell that
/// keeps a recovered ghost inside the house before it re-enters play.
#[derive(Clone, Debug)]
pub struct GhostAi {
    ghost: ObjectId,
    home_corner: TileIndex,
    search: ForwardDirectionalBfs,
    heal_remaining: Option<Duration>,
}

impl GhostAi {
    /// Creates a controller for `ghost` with its scatter destination.
    #[must_use]
    pub const fn new(ghost: ObjectId, home_corner: TileIndex) -> Self {
        Self {
            ghost,
            home_corner,
            search: ForwardDirectionalBfs::new(ghost),
            heal_remaining: None,
        }
    }

    /// Ghost this controller steers.
    #[must_use]
    pub const fn ghost(&self) -> ObjectId {
        self.ghost
    }

    /// Applies a broadcast event to the ghost's mode state machine.
    ///
    /// Entering frightened mode also queues a one-shot path reversal, so
    /// the ghost's very next route turns away from the player.
    pub fn apply_event(&mut self, world: &mut World, event: GameEvent) {
        let Some(state) = world.ghost_state(self.ghost) else {
            return;
        };
        let next = transition(state, event, world.ghost_phase());
        if next == state {
            return;
        }
        if next == GhostState::Frightened {
            self.search.request_reversal();
        }
        world.set_ghost_state(self.ghost, next);
    }

    /// Advances the ghost by one tick: heal dwell, then steering.
    pub fn update(&mut self, world: &mut World, dt: Duration) {
        let Some(state) = world.ghost_state(self.ghost) else {
            return;
        };
        if world
            .mover(self.ghost)
            .map_or(true, pacman_world::MoverState::is_frozen)
        {
            return;
        }

        match state {
            GhostState::Scatter => self.steer(world, self.home_corner),
            GhostState::Chase => {
                if let Some(target) = player_tile(world) {
                    self.steer(world, target);
                }
            }
            GhostState::Frightened => {
                if let Some(threat) = player_tile(world) {
                    let corner = flee_corner(world.grid(), threat);
                    self.steer(world, corner);
                }
            }
            GhostState::Eaten { resume } => {
                let house = world.config().ghost_house;
                if tile_of(world, self.ghost) == Some(house) {
                    world.set_ghost_state(self.ghost, GhostState::Heal { resume });
                    self.heal_remaining = Some(world.config().heal_duration);
                    if let Some(mover) = world.mover_mut(self.ghost) {
                        mover.reset_target();
                    }
                } else {
                    self.steer(world, house);
                }
            }
            GhostState::Heal { resume } => {
                let remaining = self.heal_remaining.unwrap_or(Duration::ZERO);
                if remaining <= dt {
                    self.heal_remaining = None;
                    world.set_ghost_state(self.ghost, resume.into_state());
                } else {
                    self.heal_remaining = Some(remaining - dt);
                }
            }
        }
    }

    /// Routes the ghost toward `target`, reusing an in-flight path when the
    /// destination has not changed.
    fn steer(&mut self, world: &mut World, target: TileIndex) {
        let Some(source) = tile_of(world, self.ghost) else {
            return;
        };
        let keep_current = world
            .mover(self.ghost)
            .map_or(false, |mover| {
                mover.target() == Some(target) && mover.next_step().is_some()
            });
        if keep_current && !self.search.reversal_pending() {
            return;
        }

        let (grid, tracker) = world.grid_and_tracker_mut();
        let path = self.search.find_path(grid, tracker, target);
        if path.is_empty() {
            return;
        }
        let heading = path.first().and_then(|&next| direction_between(source, next));
        if let Some(mover) = world.mover_mut(self.ghost) {
            if let Some(direction) = heading {
                mover.request_direction(direction);
            }
            mover.set_path(path);
        }
    }
}

fn tile_of(world: &World, id: ObjectId) -> Option<TileIndex> {
    world.tracker().position(id).ok().map(|position| position.tile())
}

fn player_tile(world: &World) -> Option<TileIndex> {
    let pacman = world.pacman()?;
    tile_of(world, pacman)
}

/// Maze corner with the greatest Manhattan distance from `threat`.
fn flee_corner(grid: &TileGrid, threat: TileIndex) -> TileIndex {
    let right = grid.columns().saturating_sub(1);
    let bottom = grid.rows().saturating_sub(1);
    let corners = [
        TileIndex::new(0, 0),
        TileIndex::new(right, 0),
        TileIndex::new(0, bottom),
        TileIndex::new(right, bottom),
    ];
    corners
        .into_iter()
        .max_by_key(|corner| corner.manhattan_distance(threat))
        .unwrap_or(threat)
}

/// Cardinal direction from `from` to an adjacent tile `to`, if any.
fn direction_between(from: TileIndex, to: TileIndex) -> Option<Direction> {
    if from.column() == to.column() {
        if to.row().checked_add(1) == Some(from.row()) {
            return Some(Direction::Up);
        }
        if from.row().checked_add(1) == Some(to.row()) {
            return Some(Direction::Down);
        }
    } else if from.row() == to.row() {
        if to.column().checked_add(1) == Some(from.column()) {
            return Some(Direction::Left);
        }
        if from.column().checked_add(1) == Some(to.column()) {
            return Some(Direction::Right);
        }
    }
    None
}
