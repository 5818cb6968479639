#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Pac-Man gameplay crates.
//!
//! This crate defines the vocabulary that connects the authoritative session
//! state, the pure gameplay systems, and the host engine. Systems mutate the
//! session through its narrow API and respond with [`GameEvent`] values for
//! other systems plus [`Effect`] values for the host engine, which owns
//! rendering, audio, movement interpolation, and scene navigation.

use serde::{Deserialize, Serialize};

/// Location of a single grid tile expressed as column and row coordinates.
///
/// Row zero sits at the top of the maze, so [`Direction::Up`] decreases the
/// row index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileIndex {
    column: u32,
    row: u32,
}

impl TileIndex {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two tile coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: TileIndex) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }

    /// Returns the neighboring tile in the provided direction.
    ///
    /// Steps that would leave the coordinate space on the low side yield
    /// `None`; upper bounds are the grid's concern.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<TileIndex> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Direction::Down => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Direction::Left => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
            Direction::Right => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
        }
    }
}

/// Cardinal movement directions available to grid actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Returns the direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Unique identifier assigned to a game object by the session registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Creates a new object identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identity shared by a key and the door it opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyId(u32);

impl KeyId {
    /// Creates a new key identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the key identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Closed set of game-object categories.
///
/// Collision routing dispatches over these variants; the original engine's
/// runtime string class/tag comparisons have no equivalent here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    /// Edible bonus fruit placed in the maze.
    Fruit,
    /// Collectible key that opens the matching door.
    Key(KeyId),
    /// Door blocking a corridor until unlocked or burst.
    Door(DoorState),
    /// Edible pellet, either power or super flavored.
    Pellet(PelletFlavor),
    /// The player avatar.
    PacMan(PacState),
    /// A ghost adversary together with its behavior state.
    Ghost(GhostState),
    /// Bonus star that appears between the bonus-fruit displays.
    Star,
    /// Invisible trigger zone embedded in the maze floor.
    Sensor(SensorKind),
}

/// Lock status of a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorState {
    /// The door only opens for the key carrying the same identity.
    Locked(KeyId),
    /// The door has been unlocked or burst and no longer blocks.
    Open,
}

/// Flavor of an edible pellet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PelletFlavor {
    /// Starts frightened mode; ghosts become edible.
    Power,
    /// Starts super mode; Pac-Man becomes invulnerable and can burst doors.
    Super,
}

/// Behavior state of the player avatar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacState {
    /// Regular vulnerable state.
    Normal,
    /// Invulnerable state granted by a super pellet.
    Super,
    /// Terminal state entered when caught by a hostile ghost.
    Dying,
}

/// Behavior state of a ghost actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GhostState {
    /// Retreating to the ghost's fixed home corner.
    Scatter,
    /// Actively pursuing Pac-Man's tile.
    Chase,
    /// Edible and fleeing during frightened mode.
    Frightened,
    /// Eaten; traveling back to the ghost house.
    Eaten {
        /// Phase the ghost resumes once healed.
        resume: ResumePhase,
    },
    /// Dwelling inside the ghost house until healed.
    Heal {
        /// Phase the ghost resumes once the dwell elapses.
        resume: ResumePhase,
    },
}

/// Phase a recovering ghost returns to after healing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResumePhase {
    /// Resume in the scatter phase.
    Scatter,
    /// Resume in the chase phase.
    Chase,
}

impl ResumePhase {
    /// Converts the resume phase into the corresponding ghost state.
    #[must_use]
    pub const fn into_state(self) -> GhostState {
        match self {
            ResumePhase::Scatter => GhostState::Scatter,
            ResumePhase::Chase => GhostState::Chase,
        }
    }
}

/// Category of an invisible trigger sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    /// Wraps the occupant to the opposite horizontal edge of the maze.
    Teleport,
    /// Throttles the occupant while it moves through the zone.
    SlowDown(SlowZone),
}

/// One of the five fixed slow-down zones embedded in the maze layout.
///
/// The id-to-direction mapping is a fixed table tied to the level layout and
/// is not derived from the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlowZone(u8);

impl SlowZone {
    /// Creates a slow zone from its layout id, valid for ids 1 through 5.
    #[must_use]
    pub const fn new(id: u8) -> Option<SlowZone> {
        if id >= 1 && id <= 5 {
            Some(SlowZone(id))
        } else {
            None
        }
    }

    /// Layout id of the zone.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Direction of travel the zone throttles.
    ///
    /// Zones 2 and 4 throttle rightward movement, zones 1 and 3 leftward
    /// movement, and zone 5 upward movement.
    #[must_use]
    pub const fn blocking_direction(&self) -> Direction {
        match self.0 {
            1 | 3 => Direction::Left,
            2 | 4 => Direction::Right,
            _ => Direction::Up,
        }
    }
}

/// Global gameplay notifications delivered synchronously to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    /// A power pellet was eaten; ghosts become edible.
    FrightenedModeBegin,
    /// The frightened window elapsed.
    FrightenedModeEnd,
    /// A super pellet was eaten; Pac-Man becomes invulnerable.
    SuperModeBegin,
    /// The super window elapsed.
    SuperModeEnd,
    /// The ghost-AI cadence switched to the scatter phase.
    ScatterModeBegin,
    /// The ghost-AI cadence switched to the chase phase.
    ChaseModeBegin,
}

/// Named countdown timers owned by the gameplay session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Frightened-mode window started by a power pellet.
    PowerMode,
    /// Invulnerability window started by a super pellet.
    SuperMode,
    /// Lifetime of an uncollected bonus star.
    Star,
    /// Scatter/chase alternation cadence.
    GhostAi,
    /// Remaining duration of a bonus stage.
    BonusStage,
}

impl TimerKind {
    /// All timer kinds in the fixed order they are ticked each frame.
    pub const ALL: [TimerKind; 5] = [
        TimerKind::PowerMode,
        TimerKind::SuperMode,
        TimerKind::Star,
        TimerKind::GhostAi,
        TimerKind::BonusStage,
    ];
}

/// Scheduled-task record dispatched when its delay elapses.
///
/// Each record carries the data its handler needs, so no callback has to
/// close over the session that scheduled it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelayedAction {
    /// Concludes the death sequence after the dying animation and grace period.
    DeathSequence,
    /// Restores the world after the ghost-eaten freeze.
    GhostRecovery {
        /// Ghost that was eaten and must transition to its eaten state.
        ghost: ObjectId,
        /// Object whose sprite was hidden behind the score texture.
        hidden: ObjectId,
    },
    /// Restores the world after the star-collection freeze.
    StarRecovery {
        /// Object whose sprite was hidden behind the score texture.
        hidden: ObjectId,
    },
}

/// Side effects addressed to the host engine.
///
/// The rules engine mutates session state synchronously and expresses every
/// engine-owned consequence as one of these values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Fire-and-forget sound effect playback.
    PlaySfx(SoundEffect),
    /// Stops every currently playing audio source.
    StopAllAudio,
    /// Makes the object's sprite visible again.
    ShowSprite(ObjectId),
    /// Hides the object's sprite.
    HideSprite(ObjectId),
    /// Replaces the object's sprite with a score-number texture.
    ShowScoreSprite {
        /// Object whose sprite displays the score.
        object: ObjectId,
        /// Score value to display.
        value: u32,
    },
    /// Starts the player's dying animation.
    StartDyingAnimation(ObjectId),
    /// Stops the object's running animation.
    StopAnimation(ObjectId),
    /// Freezes or resumes every movable object's animation.
    FreezeAnimations(bool),
    /// Removes one life icon from the gameplay display.
    RemoveLifeIcon,
    /// Persists the player's remaining lives to the cross-scene cache.
    PersistLives(u32),
    /// Pushes the level-restart scene onto the scene stack.
    PushLevelRestart,
    /// Ends the gameplay session entirely.
    EndGameplay,
    /// Signals that the bonus stage has run out of time.
    BonusStageOver,
}

/// Sound effects the rules engine requests from the audio subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Pac-Man munching a fruit.
    WakkaWakka,
    /// A key being collected.
    KeyEaten,
    /// A power pellet being eaten.
    PowerPelletEaten,
    /// A super pellet being eaten.
    SuperPelletEaten,
    /// A frightened ghost being eaten.
    GhostEaten,
    /// A door bursting open.
    DoorBroken,
    /// Pac-Man dying.
    PacManDying,
}

/// Score awards for the individual gameplay outcomes.
pub mod points {
    /// Points per fruit, multiplied by the current level.
    pub const FRUIT: u32 = 100;
    /// Points per collected key.
    pub const KEY: u32 = 50;
    /// Points per power pellet.
    pub const POWER_PELLET: u32 = 50;
    /// Points per super pellet.
    pub const SUPER_PELLET: u32 = 100;
    /// Base points per eaten ghost, scaled by the points multiplier.
    pub const GHOST: u32 = 100;
    /// Points per door burst open during super mode.
    pub const BROKEN_DOOR: u32 = 20;
    /// Points when the two bonus-fruit displays match each other.
    pub const MATCHING_BONUS_FRUIT: u32 = 2_000;
    /// Points when the matched displays also show the current level's fruit.
    pub const MATCHING_BONUS_FRUIT_AND_LEVEL_FRUIT: u32 = 5_000;
}

/// Score-number texture shown in place of an eaten ghost.
///
/// The texture ladder is fixed by the sprite sheet: multipliers 1, 2, and 4
/// select 100, 200, and 800, and anything higher selects 1600.
#[must_use]
pub const fn ghost_score_label(multiplier: u32) -> u32 {
    match multiplier {
        1 => 100,
        2 => 200,
        4 => 800,
        _ => 1_600,
    }
}

/// Pac-Man's unthrottled movement speed in world units per second.
pub const PACMAN_NORMAL_SPEED: f32 = 60.0;

/// Speed factor applied by slow-down zones at the provided level.
///
/// Level 1 throttles hardest; levels 2 through 4 ease off slightly and every
/// later level settles at half speed.
#[must_use]
pub fn slow_down_factor(level: u32) -> f32 {
    if level == 1 {
        0.40
    } else if (2..=4).contains(&level) {
        0.45
    } else {
        0.50
    }
}

/// Bonus fruit identities displayed by the animated level indicators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusFruit {
    /// Level 1 fruit.
    Apple,
    /// Level 2 fruit.
    Banana,
    /// Level 3 fruit.
    Donut,
    /// Level 4 fruit.
    Hamburger,
    /// Level 5 fruit.
    Egg,
    /// Level 6 fruit.
    Corn,
    /// Level 7 fruit.
    Shoe,
    /// Level 8 fruit.
    Cake,
    /// Level 9 fruit.
    Peach,
    /// Level 10 fruit.
    Melon,
    /// Level 11 fruit.
    Coffee,
    /// Level 12 fruit.
    Mushroom,
    /// Level 13 fruit.
    Bell,
    /// Level 14 fruit.
    Clover,
    /// Level 15 fruit.
    Galaxian,
    /// Level 16 fruit.
    Gift,
}

impl BonusFruit {
    /// Every fruit in animation-frame order.
    pub const ALL: [BonusFruit; 16] = [
        BonusFruit::Apple,
        BonusFruit::Banana,
        BonusFruit::Donut,
        BonusFruit::Hamburger,
        BonusFruit::Egg,
        BonusFruit::Corn,
        BonusFruit::Shoe,
        BonusFruit::Cake,
        BonusFruit::Peach,
        BonusFruit::Melon,
        BonusFruit::Coffee,
        BonusFruit::Mushroom,
        BonusFruit::Bell,
        BonusFruit::Clover,
        BonusFruit::Galaxian,
        BonusFruit::Gift,
    ];

    /// Fruit identity assigned to the provided 1-based level.
    ///
    /// # Panics
    ///
    /// Panics when the level exceeds the supported range; a level without a
    /// fruit means content is missing, which is a defect rather than a
    /// runtime condition.
    #[must_use]
    pub fn for_level(level: u32) -> BonusFruit {
        assert!(
            (1..=Self::ALL.len() as u32).contains(&level),
            "level {level} has no bonus fruit assigned"
        );
        Self::ALL[(level - 1) as usize]
    }

    /// Fruit displayed by the provided animation frame index.
    ///
    /// # Panics
    ///
    /// Panics when the frame index lies outside the fruit animation strip.
    #[must_use]
    pub fn from_frame(frame: u8) -> BonusFruit {
        assert!(
            usize::from(frame) < Self::ALL.len(),
            "frame {frame} lies outside the bonus-fruit strip"
        );
        Self::ALL[usize::from(frame)]
    }
}
