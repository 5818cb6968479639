#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative gameplay session state for the Pac-Man rules engine.
//!
//! The [`World`] owns everything the rules mutate: the match state (score,
//! lives, multiplier), the named countdown timers, the scheduled-action
//! queue, the object registry, the tile grid, the position tracker, and the
//! grid-mover shadows. Systems mutate it through the narrow API below and
//! communicate everything engine-owned through effect values.

use std::collections::BTreeMap;
use std::time::Duration;

use pacman_core::{
    DelayedAction, Direction, DoorState, GhostState, ObjectId, ObjectKind, PacState, ResumePhase,
    TileIndex, TimerKind,
};

mod grid;
mod mover;
mod timer;

pub use grid::{PositionTracker, TileGrid, TrackedPosition, TrackingError};
pub use mover::MoverState;
pub use timer::{CountdownTimer, DelayQueue, TimerBank};

/// Static parameters of one gameplay session.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Number of tile columns in the maze.
    pub columns: u32,
    /// Number of tile rows in the maze.
    pub rows: u32,
    /// Current 1-based level.
    pub level: u32,
    /// Lives the player starts the session with.
    pub lives: u32,
    /// Whether this session is a bonus stage.
    pub bonus_stage: bool,
    /// Tile inside the ghost house that eaten ghosts travel to.
    pub ghost_house: TileIndex,
    /// Duration of the frightened window started by a power pellet.
    pub frightened_duration: Duration,
    /// Duration of the invulnerability window started by a super pellet.
    pub super_duration: Duration,
    /// Dwell inside the ghost house before an eaten ghost recovers.
    pub heal_duration: Duration,
    /// Freeze window after a frightened ghost is eaten.
    pub ghost_freeze: Duration,
    /// Freeze window after a star collection with matching fruit frames.
    pub star_match_freeze: Duration,
    /// Freeze window after a star collection with differing fruit frames.
    pub star_clash_freeze: Duration,
    /// Length of the player's dying animation.
    pub dying_animation: Duration,
    /// Grace period appended to the dying animation before the scene change.
    pub death_grace: Duration,
    /// Length of one scatter phase of the ghost-AI cadence.
    pub scatter_phase: Duration,
    /// Length of one chase phase of the ghost-AI cadence.
    pub chase_phase: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: 20,
            rows: 15,
            level: 1,
            lives: 3,
            bonus_stage: false,
            ghost_house: TileIndex::new(10, 7),
            frightened_duration: Duration::from_secs(7),
            super_duration: Duration::from_secs(10),
            heal_duration: Duration::from_secs(2),
            ghost_freeze: Duration::from_secs(1),
            star_match_freeze: Duration::from_secs(3),
            star_clash_freeze: Duration::from_secs(1),
            dying_animation: Duration::from_millis(1_500),
            death_grace: Duration::from_millis(400),
            scatter_phase: Duration::from_secs(7),
            chase_phase: Duration::from_secs(20),
        }
    }
}

/// Mutable per-match scoring and progression state.
#[derive(Clone, Copy, Debug)]
pub struct MatchState {
    score: u32,
    multiplier: u32,
    lives: u32,
    fruits_eaten: u32,
    pellets_eaten: u32,
    level: u32,
    bonus_stage: bool,
}

impl MatchState {
    const MULTIPLIER_CAP: u32 = 8;

    fn new(level: u32, lives: u32, bonus_stage: bool) -> Self {
        Self {
            score: 0,
            multiplier: 1,
            lives,
            fruits_eaten: 0,
            pellets_eaten: 0,
            level,
            bonus_stage,
        }
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Adds points to the score.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Current points multiplier, one of 1, 2, 4, or 8.
    #[must_use]
    pub const fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Doubles the multiplier, capped at 8.
    ///
    /// The multiplier only grows within one frightened window and resets
    /// when the window ends.
    pub fn advance_multiplier(&mut self) {
        self.multiplier = (self.multiplier * 2).min(Self::MULTIPLIER_CAP);
    }

    /// Resets the multiplier to 1.
    pub fn reset_multiplier(&mut self) {
        self.multiplier = 1;
    }

    /// Lives remaining.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Removes one life and returns the remaining count.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Number of fruits eaten this match.
    #[must_use]
    pub const fn fruits_eaten(&self) -> u32 {
        self.fruits_eaten
    }

    /// Counts one eaten fruit.
    pub fn record_fruit(&mut self) {
        self.fruits_eaten = self.fruits_eaten.saturating_add(1);
    }

    /// Number of pellets eaten this match.
    #[must_use]
    pub const fn pellets_eaten(&self) -> u32 {
        self.pellets_eaten
    }

    /// Counts one eaten pellet.
    pub fn record_pellet(&mut self) {
        self.pellets_eaten = self.pellets_eaten.saturating_add(1);
    }

    /// Current 1-based level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Whether the session is a bonus stage.
    #[must_use]
    pub const fn is_bonus_stage(&self) -> bool {
        self.bonus_stage
    }
}

/// One registered game object.
#[derive(Clone, Copy, Debug)]
pub struct GameObject {
    id: ObjectId,
    kind: ObjectKind,
    tile: TileIndex,
    active: bool,
    visible: bool,
}

impl GameObject {
    /// Identifier assigned by the registry.
    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// Category and per-category state of the object.
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Tile the object currently occupies.
    #[must_use]
    pub const fn tile(&self) -> TileIndex {
        self.tile
    }

    /// Whether the object still participates in collisions.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the object's sprite is currently visible.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }
}

/// The authoritative gameplay session.
#[derive(Clone, Debug)]
pub struct World {
    config: Config,
    match_state: MatchState,
    timers: TimerBank,
    delays: DelayQueue,
    objects: Vec<GameObject>,
    movers: BTreeMap<ObjectId, MoverState>,
    grid: TileGrid,
    tracker: PositionTracker,
    bonus_frames: (u8, u8),
    ghost_phase: ResumePhase,
    next_id: u32,
}

impl World {
    /// Creates a fresh session from the provided configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            match_state: MatchState::new(config.level, config.lives, config.bonus_stage),
            timers: TimerBank::default(),
            delays: DelayQueue::default(),
            objects: Vec::new(),
            movers: BTreeMap::new(),
            grid: TileGrid::new(config.columns, config.rows),
            tracker: PositionTracker::default(),
            bonus_frames: (0, 0),
            ghost_phase: ResumePhase::Scatter,
            next_id: 0,
            config,
        }
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Registers a new object and, for movable kinds, its mover shadow.
    pub fn spawn(&mut self, kind: ObjectKind, tile: TileIndex) -> ObjectId {
        let id = ObjectId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.objects.push(GameObject {
            id,
            kind,
            tile,
            active: true,
            visible: true,
        });

        if matches!(kind, ObjectKind::PacMan(_) | ObjectKind::Ghost(_)) {
            let _ = self.movers.insert(id, MoverState::new(Direction::Left));
            self.tracker.update(id, tile, Some(Direction::Left));
        }
        id
    }

    /// Looks up a registered object.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|object| object.id == id)
    }

    /// All registered objects in spawn order.
    #[must_use]
    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    /// Deactivates an object; repeated calls are a no-op.
    pub fn deactivate(&mut self, id: ObjectId) {
        if let Some(object) = self.object_mut(id) {
            object.active = false;
        }
    }

    /// Removes an object entirely, together with its mover and tracking.
    pub fn remove(&mut self, id: ObjectId) {
        self.objects.retain(|object| object.id != id);
        let _ = self.movers.remove(&id);
    }

    /// Toggles sprite visibility bookkeeping for the object.
    pub fn set_visible(&mut self, id: ObjectId, visible: bool) {
        if let Some(object) = self.object_mut(id) {
            object.visible = visible;
        }
    }

    /// Replaces a ghost's behavior state.
    pub fn set_ghost_state(&mut self, id: ObjectId, state: GhostState) {
        if let Some(object) = self.object_mut(id) {
            if matches!(object.kind, ObjectKind::Ghost(_)) {
                object.kind = ObjectKind::Ghost(state);
            }
        }
    }

    /// Behavior state of the ghost, if the object is one.
    #[must_use]
    pub fn ghost_state(&self, id: ObjectId) -> Option<GhostState> {
        match self.object(id)?.kind {
            ObjectKind::Ghost(state) => Some(state),
            _ => None,
        }
    }

    /// Replaces the player's behavior state.
    pub fn set_pac_state(&mut self, id: ObjectId, state: PacState) {
        if let Some(object) = self.object_mut(id) {
            if matches!(object.kind, ObjectKind::PacMan(_)) {
                object.kind = ObjectKind::PacMan(state);
            }
        }
    }

    /// Replaces a door's lock state.
    pub fn set_door_state(&mut self, id: ObjectId, state: DoorState) {
        if let Some(object) = self.object_mut(id) {
            if matches!(object.kind, ObjectKind::Door(_)) {
                object.kind = ObjectKind::Door(state);
            }
        }
    }

    /// The active player object, if present.
    #[must_use]
    pub fn pacman(&self) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|object| object.active && matches!(object.kind, ObjectKind::PacMan(_)))
            .map(GameObject::id)
    }

    /// The active bonus star, if one is spawned.
    #[must_use]
    pub fn star(&self) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|object| object.active && matches!(object.kind, ObjectKind::Star))
            .map(GameObject::id)
    }

    /// Identifiers of all active ghosts in spawn order.
    #[must_use]
    pub fn ghosts(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|object| object.active && matches!(object.kind, ObjectKind::Ghost(_)))
            .map(GameObject::id)
            .collect()
    }

    /// Identifiers of all active doors in spawn order.
    #[must_use]
    pub fn doors(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|object| object.active && matches!(object.kind, ObjectKind::Door(_)))
            .map(GameObject::id)
            .collect()
    }

    /// Moves an object to a new tile, keeping the tracker consistent.
    ///
    /// The occupancy change is atomic from the perspective of every query:
    /// the object is never observable on both tiles.
    pub fn relocate(&mut self, id: ObjectId, tile: TileIndex) {
        let facing = self
            .tracker
            .position(id)
            .ok()
            .and_then(|position| position.facing());
        if let Some(object) = self.object_mut(id) {
            object.tile = tile;
            self.tracker.update(id, tile, facing);
        }
    }

    /// Records an actor's current tile and facing for pathfinding.
    pub fn track(&mut self, id: ObjectId, tile: TileIndex, facing: Option<Direction>) {
        if let Some(object) = self.object_mut(id) {
            object.tile = tile;
        }
        self.tracker.update(id, tile, facing);
    }

    /// Read access to the position tracker.
    #[must_use]
    pub const fn tracker(&self) -> &PositionTracker {
        &self.tracker
    }

    /// Read access to the tile grid.
    #[must_use]
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Mutable access to the tile grid.
    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    /// Simultaneous access to the grid and the position tracker.
    ///
    /// Path searches install temporary blocks on the grid while reading
    /// tracked positions, which needs both borrows at once.
    pub fn grid_and_tracker_mut(&mut self) -> (&mut TileGrid, &PositionTracker) {
        (&mut self.grid, &self.tracker)
    }

    /// Mover shadow of a movable object.
    #[must_use]
    pub fn mover(&self, id: ObjectId) -> Option<&MoverState> {
        self.movers.get(&id)
    }

    /// Mutable mover shadow of a movable object.
    pub fn mover_mut(&mut self, id: ObjectId) -> Option<&mut MoverState> {
        self.movers.get_mut(&id)
    }

    /// Freezes or resumes every movable object.
    pub fn set_movement_freeze(&mut self, frozen: bool) {
        for mover in self.movers.values_mut() {
            mover.set_frozen(frozen);
        }
    }

    /// Read access to a named timer.
    #[must_use]
    pub fn timer(&self, kind: TimerKind) -> &CountdownTimer {
        self.timers.get(kind)
    }

    /// Mutable access to a named timer.
    pub fn timer_mut(&mut self, kind: TimerKind) -> &mut CountdownTimer {
        self.timers.get_mut(kind)
    }

    /// Stops every named timer.
    pub fn stop_all_timers(&mut self) {
        self.timers.stop_all();
    }

    /// Advances the named timers, reporting expirations in fixed order.
    pub fn tick_timers(&mut self, dt: Duration) -> Vec<TimerKind> {
        self.timers.tick(dt)
    }

    /// Schedules a delayed action.
    pub fn schedule(&mut self, after: Duration, action: DelayedAction) {
        self.delays.schedule(after, action);
    }

    /// Advances the delay queue, returning the actions that became due.
    pub fn tick_delays(&mut self, dt: Duration) -> Vec<DelayedAction> {
        self.delays.tick(dt)
    }

    /// Stops the star timer and deactivates the active star, if any.
    pub fn despawn_star(&mut self) {
        self.timer_mut(TimerKind::Star).stop();
        if let Some(star) = self.star() {
            self.deactivate(star);
        }
    }

    /// Read access to the match state.
    #[must_use]
    pub const fn match_state(&self) -> &MatchState {
        &self.match_state
    }

    /// Mutable access to the match state.
    pub fn match_state_mut(&mut self) -> &mut MatchState {
        &mut self.match_state
    }

    /// Animation frames currently shown by the two bonus-fruit displays.
    #[must_use]
    pub const fn bonus_frames(&self) -> (u8, u8) {
        self.bonus_frames
    }

    /// Updates the bonus-fruit display frames reported by the engine.
    pub fn set_bonus_frames(&mut self, left: u8, right: u8) {
        self.bonus_frames = (left, right);
    }

    /// Current phase of the global scatter/chase cadence.
    #[must_use]
    pub const fn ghost_phase(&self) -> ResumePhase {
        self.ghost_phase
    }

    /// Flips the scatter/chase cadence and returns the new phase.
    pub fn toggle_ghost_phase(&mut self) -> ResumePhase {
        self.ghost_phase = match self.ghost_phase {
            ResumePhase::Scatter => ResumePhase::Chase,
            ResumePhase::Chase => ResumePhase::Scatter,
        };
        self.ghost_phase
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
