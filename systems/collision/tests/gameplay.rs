//! End-to-end gameplay flows across collisions, timers, and recoveries.

use std::time::Duration;

use pacman_core::{
    points, DoorState, Effect, GameEvent, GhostState, KeyId, ObjectId, ObjectKind, PacState,
    PelletFlavor, ResumePhase, TileIndex, TimerKind,
};
use pacman_system_collision::{advance_time, resolve_collision};
use pacman_system_ghost_ai::GhostAi;
use pacman_world::{Config, World};

struct Harness {
    world: World,
    ghost_ais: Vec<GhostAi>,
    events: Vec<GameEvent>,
    effects: Vec<Effect>,
}

impl Harness {
    fn new(config: Config) -> Self {
        Self {
            world: World::new(config),
            ghost_ais: Vec::new(),
            events: Vec::new(),
            effects: Vec::new(),
        }
    }

    fn spawn_ghost(&mut self, tile: TileIndex, home: TileIndex) -> ObjectId {
        let ghost = self.world.spawn(ObjectKind::Ghost(GhostState::Scatter), tile);
        self.ghost_ais.push(GhostAi::new(ghost, home));
        ghost
    }

    fn collide(&mut self, a: ObjectId, b: ObjectId) {
        resolve_collision(&mut self.world, a, b, &mut self.events, &mut self.effects);
        self.broadcast();
    }

    fn step(&mut self, dt: Duration) {
        advance_time(&mut self.world, dt, &mut self.events, &mut self.effects);
        self.broadcast();
        for ai in &mut self.ghost_ais {
            ai.update(&mut self.world, dt);
        }
    }

    fn broadcast(&mut self) {
        for event in self.events.drain(..) {
            for ai in &mut self.ghost_ais {
                ai.apply_event(&mut self.world, event);
            }
        }
    }
}

#[test]
fn frightened_window_runs_from_pellet_to_expiry() {
    let mut harness = Harness::new(Config::default());
    let pacman = harness
        .world
        .spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
    let pellet = harness.world.spawn(
        ObjectKind::Pellet(PelletFlavor::Power),
        TileIndex::new(1, 1),
    );
    let ghost = harness.spawn_ghost(TileIndex::new(8, 8), TileIndex::new(19, 0));
    harness
        .world
        .timer_mut(TimerKind::GhostAi)
        .start(Duration::from_secs(7));

    harness.collide(pacman, pellet);
    assert_eq!(
        harness.world.ghost_state(ghost),
        Some(GhostState::Frightened)
    );
    assert!(harness.world.timer(TimerKind::GhostAi).is_paused());

    // Run out the frightened window.
    harness.step(Duration::from_secs(7));
    assert_eq!(harness.world.ghost_state(ghost), Some(GhostState::Scatter));
    assert_eq!(harness.world.match_state().multiplier(), 1);
    assert!(harness.world.timer(TimerKind::GhostAi).is_running());
}

#[test]
fn eaten_ghost_recovers_and_travels_home() {
    let mut harness = Harness::new(Config::default());
    let pacman = harness
        .world
        .spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
    let pellet = harness.world.spawn(
        ObjectKind::Pellet(PelletFlavor::Power),
        TileIndex::new(1, 1),
    );
    let ghost = harness.spawn_ghost(TileIndex::new(8, 8), TileIndex::new(19, 0));

    harness.collide(pacman, pellet);
    harness.collide(pacman, ghost);

    assert!(harness
        .world
        .mover(ghost)
        .expect("ghost has a mover")
        .is_frozen());
    assert!(harness.world.timer(TimerKind::PowerMode).is_paused());
    assert_eq!(harness.world.match_state().multiplier(), 2);

    // The recovery fires after the one-second freeze.
    harness.step(Duration::from_secs(1));
    assert!(!harness
        .world
        .mover(ghost)
        .expect("ghost has a mover")
        .is_frozen());
    assert!(harness.world.timer(TimerKind::PowerMode).is_running());
    assert_eq!(
        harness.world.ghost_state(ghost),
        Some(GhostState::Eaten {
            resume: ResumePhase::Scatter,
        })
    );

    // The controller now routes the ghost toward the house.
    let house = harness.world.config().ghost_house;
    assert_eq!(
        harness
            .world
            .mover(ghost)
            .expect("ghost has a mover")
            .target(),
        Some(house)
    );
}

#[test]
fn death_with_remaining_lives_restarts_the_level() {
    let mut harness = Harness::new(Config::default());
    let pacman = harness
        .world
        .spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
    let ghost = harness.spawn_ghost(TileIndex::new(1, 1), TileIndex::new(19, 0));

    harness.collide(pacman, ghost);
    assert_eq!(
        harness.world.object(pacman).expect("registered").kind(),
        ObjectKind::PacMan(PacState::Dying)
    );

    let delay = harness.world.config().dying_animation + harness.world.config().death_grace;
    harness.step(delay);

    assert!(harness.effects.contains(&Effect::PushLevelRestart));
    assert!(!harness.effects.contains(&Effect::EndGameplay));
}

#[test]
fn death_with_zero_lives_ends_the_session() {
    let mut harness = Harness::new(Config {
        lives: 1,
        ..Config::default()
    });
    let pacman = harness
        .world
        .spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
    let ghost = harness.spawn_ghost(TileIndex::new(1, 1), TileIndex::new(19, 0));

    harness.collide(pacman, ghost);
    assert_eq!(harness.world.match_state().lives(), 0);

    let delay = harness.world.config().dying_animation + harness.world.config().death_grace;
    harness.step(delay);

    assert!(harness.effects.contains(&Effect::EndGameplay));
    assert_eq!(harness.world.object(pacman).map(|_| ()), None);
}

#[test]
fn matching_star_scores_the_level_bonus() {
    let mut harness = Harness::new(Config::default());
    let pacman = harness
        .world
        .spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
    let star = harness.world.spawn(ObjectKind::Star, TileIndex::new(9, 6));
    harness
        .world
        .timer_mut(TimerKind::Star)
        .start(Duration::from_secs(10));
    // Level 1's fruit occupies frame 0 on both displays.
    harness.world.set_bonus_frames(0, 0);

    harness.collide(pacman, star);

    assert_eq!(
        harness.world.match_state().score(),
        points::MATCHING_BONUS_FRUIT_AND_LEVEL_FRUIT
    );
    assert!(!harness.world.timer(TimerKind::Star).is_running());
    assert!(harness
        .world
        .mover(pacman)
        .expect("pacman has a mover")
        .is_frozen());

    // Recovery removes the star and unfreezes movement.
    harness.step(harness.world.config().star_match_freeze);
    assert_eq!(harness.world.star(), None);
    assert!(!harness
        .world
        .mover(pacman)
        .expect("pacman has a mover")
        .is_frozen());
}

#[test]
fn clashing_star_scores_by_multiplier_without_advancing_it() {
    let mut harness = Harness::new(Config::default());
    let pacman = harness
        .world
        .spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
    let star = harness.world.spawn(ObjectKind::Star, TileIndex::new(9, 6));
    harness
        .world
        .timer_mut(TimerKind::GhostAi)
        .start(Duration::from_secs(9));
    harness.world.set_bonus_frames(0, 5);

    harness.collide(pacman, star);

    assert_eq!(harness.world.match_state().score(), points::GHOST);
    // Only real ghost eats advance the multiplier.
    assert_eq!(harness.world.match_state().multiplier(), 1);
    assert!(harness.world.timer(TimerKind::GhostAi).is_paused());

    harness.step(harness.world.config().star_clash_freeze);
    assert!(harness.world.timer(TimerKind::GhostAi).is_running());
    assert_eq!(harness.world.star(), None);
}

#[test]
fn ghost_ai_timer_alternates_scatter_and_chase() {
    let mut harness = Harness::new(Config::default());
    let ghost = harness.spawn_ghost(TileIndex::new(8, 8), TileIndex::new(19, 0));
    let scatter_phase = harness.world.config().scatter_phase;
    harness
        .world
        .timer_mut(TimerKind::GhostAi)
        .start(scatter_phase);

    harness.step(harness.world.config().scatter_phase);
    assert_eq!(harness.world.ghost_phase(), ResumePhase::Chase);
    assert_eq!(harness.world.ghost_state(ghost), Some(GhostState::Chase));
    assert!(harness.world.timer(TimerKind::GhostAi).is_running());

    harness.step(harness.world.config().chase_phase);
    assert_eq!(harness.world.ghost_phase(), ResumePhase::Scatter);
    assert_eq!(harness.world.ghost_state(ghost), Some(GhostState::Scatter));
}

#[test]
fn uncollected_star_expires_quietly() {
    let mut harness = Harness::new(Config::default());
    let star = harness.world.spawn(ObjectKind::Star, TileIndex::new(9, 6));
    harness
        .world
        .timer_mut(TimerKind::Star)
        .start(Duration::from_secs(5));

    harness.step(Duration::from_secs(5));

    assert_eq!(harness.world.star(), None);
    assert!(harness.effects.contains(&Effect::HideSprite(star)));
}

#[test]
fn bonus_stage_timer_signals_the_stage_end() {
    let mut harness = Harness::new(Config {
        bonus_stage: true,
        ..Config::default()
    });
    harness
        .world
        .timer_mut(TimerKind::BonusStage)
        .start(Duration::from_secs(30));

    harness.step(Duration::from_secs(30));

    assert!(harness.effects.contains(&Effect::BonusStageOver));
}

#[test]
fn super_mode_expiry_restores_normal_pacman() {
    let mut harness = Harness::new(Config::default());
    let pacman = harness
        .world
        .spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
    let pellet = harness.world.spawn(
        ObjectKind::Pellet(PelletFlavor::Super),
        TileIndex::new(1, 1),
    );
    harness
        .world
        .timer_mut(TimerKind::GhostAi)
        .start(Duration::from_secs(7));

    harness.collide(pacman, pellet);
    assert_eq!(
        harness.world.object(pacman).expect("registered").kind(),
        ObjectKind::PacMan(PacState::Super)
    );

    harness.step(harness.world.config().super_duration);
    assert_eq!(
        harness.world.object(pacman).expect("registered").kind(),
        ObjectKind::PacMan(PacState::Normal)
    );
    assert!(harness.world.timer(TimerKind::GhostAi).is_running());
}

#[test]
fn key_and_door_settle_through_the_same_frame() {
    let mut harness = Harness::new(Config::default());
    let pacman = harness
        .world
        .spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
    let key_id = KeyId::new(3);
    let key = harness
        .world
        .spawn(ObjectKind::Key(key_id), TileIndex::new(1, 1));
    let door = harness.world.spawn(
        ObjectKind::Door(DoorState::Locked(key_id)),
        TileIndex::new(6, 1),
    );

    harness.collide(pacman, key);

    assert_eq!(
        harness.world.object(door).expect("registered").kind(),
        ObjectKind::Door(DoorState::Open)
    );
    assert!(harness.effects.contains(&Effect::HideSprite(door)));
}
