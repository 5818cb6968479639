//! Session-side shadow of the engine's grid mover.

use std::collections::VecDeque;

use pacman_core::{Direction, TileIndex, PACMAN_NORMAL_SPEED};

/// Movement intent the rules engine maintains for one movable object.
///
/// The host engine owns the actual tile-to-tile interpolation; this shadow
/// records the requested direction, queued path, speed cap, and freeze flag
/// that the engine reads back each frame.
#[derive(Clone, Debug)]
pub struct MoverState {
    direction: Direction,
    max_speed: f32,
    frozen: bool,
    path: VecDeque<TileIndex>,
    target: Option<TileIndex>,
}

impl MoverState {
    /// Creates a mover facing the provided direction at full speed.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            max_speed: PACMAN_NORMAL_SPEED,
            frozen: false,
            path: VecDeque::new(),
            target: None,
        }
    }

    /// Direction most recently requested from the mover.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Requests a direction change, mirroring the engine mover's API.
    pub fn request_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Current speed cap in world units per second.
    #[must_use]
    pub const fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Caps the mover's linear speed.
    pub fn set_max_speed(&mut self, speed: f32) {
        self.max_speed = speed;
    }

    /// Reports whether movement is currently frozen.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Freezes or resumes movement without losing the queued path.
    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Replaces the queued path; the final tile becomes the mover's target.
    pub fn set_path(&mut self, path: Vec<TileIndex>) {
        self.target = path.last().copied();
        self.path = path.into();
    }

    /// Next queued tile, if a path is pending.
    #[must_use]
    pub fn next_step(&self) -> Option<TileIndex> {
        self.path.front().copied()
    }

    /// Consumes the next queued tile once the engine reports arrival.
    pub fn advance(&mut self) -> Option<TileIndex> {
        let step = self.path.pop_front();
        if self.path.is_empty() && step.is_some() {
            self.target = None;
        }
        step
    }

    /// Tile the mover is ultimately heading toward, if any.
    #[must_use]
    pub const fn target(&self) -> Option<TileIndex> {
        self.target
    }

    /// Abandons the current target and queued path.
    pub fn reset_target(&mut self) {
        self.target = None;
        self.path.clear();
    }
}
