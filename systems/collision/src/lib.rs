#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! The collision rules engine and the frame-time dispatchers.
//!
//! [`resolve_collision`] applies the full overlap resolution table; handlers
//! are idempotent guards that re-validate object kind and liveness before
//! acting, so duplicate overlap reports are harmless. Session state is
//! mutated synchronously while every engine-owned consequence (audio,
//! sprites, animation timescale, scene stack, persistence) is appended to
//! the caller's [`Effect`] vector, and mode notifications to the
//! [`GameEvent`] vector for the caller to broadcast.
//!
//! [`advance_time`] drives the named timers and the scheduled-action queue;
//! expiries dispatch synchronously and observe current session state, never
//! snapshots.

use std::time::Duration;

use pacman_core::{
    ghost_score_label, points, slow_down_factor, BonusFruit, DelayedAction, DoorState, Effect,
    GameEvent, GhostState, KeyId, ObjectId, ObjectKind, PacState, PelletFlavor, ResumePhase,
    SensorKind, SlowZone, SoundEffect, TileIndex, TimerKind, PACMAN_NORMAL_SPEED,
};
use pacman_world::World;

/// Resolves one reported overlap between two objects.
///
/// The pair may arrive in either order; unhandled combinations are ignored.
pub fn resolve_collision(
    world: &mut World,
    first: ObjectId,
    second: ObjectId,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<Effect>,
) {
    if !both_active(world, first, second) {
        return;
    }
    if !dispatch(world, first, second, events, effects) {
        let _ = dispatch(world, second, first, events, effects);
    }
}

fn both_active(world: &World, first: ObjectId, second: ObjectId) -> bool {
    let alive = |id| world.object(id).is_some_and(pacman_world::GameObject::is_active);
    alive(first) && alive(second)
}

/// Routes the pair with `subject` as the moving party. Returns whether the
/// combination was recognized.
fn dispatch(
    world: &mut World,
    subject: ObjectId,
    object: ObjectId,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<Effect>,
) -> bool {
    let Some(subject_kind) = world.object(subject).map(pacman_world::GameObject::kind) else {
        return false;
    };
    let Some(object_kind) = world.object(object).map(pacman_world::GameObject::kind) else {
        return false;
    };

    match (subject_kind, object_kind) {
        (ObjectKind::PacMan(_), ObjectKind::Fruit) => {
            on_fruit(world, object, effects);
        }
        (ObjectKind::PacMan(_), ObjectKind::Key(key)) => {
            on_key(world, object, key, effects);
        }
        (ObjectKind::PacMan(_), ObjectKind::Pellet(flavor)) => {
            on_pellet(world, subject, object, flavor, events, effects);
        }
        (ObjectKind::PacMan(pac_state), ObjectKind::Ghost(ghost_state)) => {
            on_pacman_ghost(world, subject, pac_state, object, ghost_state, effects);
        }
        (ObjectKind::PacMan(_), ObjectKind::Star) => {
            on_star(world, object, effects);
        }
        (ObjectKind::PacMan(pac_state), ObjectKind::Door(door_state)) => {
            on_door(world, subject, pac_state, object, door_state, effects);
        }
        (ObjectKind::PacMan(_) | ObjectKind::Ghost(_), ObjectKind::Sensor(sensor)) => {
            on_sensor(world, subject, sensor);
        }
        _ => return false,
    }
    true
}

/// Fruit pickup: level-scaled points, then the fruit disappears.
fn on_fruit(world: &mut World, fruit: ObjectId, effects: &mut Vec<Effect>) {
    let level = world.match_state().level();
    world.match_state_mut().add_score(points::FRUIT * level);
    world.match_state_mut().record_fruit();
    world.deactivate(fruit);
    effects.push(Effect::HideSprite(fruit));
    effects.push(Effect::PlaySfx(SoundEffect::WakkaWakka));
}

/// Key pickup: the key is consumed and every matching door opens.
fn on_key(world: &mut World, key: ObjectId, key_id: KeyId, effects: &mut Vec<Effect>) {
    world.match_state_mut().add_score(points::KEY);
    world.deactivate(key);
    effects.push(Effect::HideSprite(key));
    effects.push(Effect::PlaySfx(SoundEffect::KeyEaten));

    for door in world.doors() {
        if world.object(door).map(pacman_world::GameObject::kind)
            == Some(ObjectKind::Door(DoorState::Locked(key_id)))
        {
            world.set_door_state(door, DoorState::Open);
            world.deactivate(door);
            effects.push(Effect::HideSprite(door));
        }
    }
}

/// Pellet pickup: starts or extends the matching mode window.
fn on_pellet(
    world: &mut World,
    pacman: ObjectId,
    pellet: ObjectId,
    flavor: PelletFlavor,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<Effect>,
) {
    world.match_state_mut().record_pellet();
    world.deactivate(pellet);
    effects.push(Effect::HideSprite(pellet));
    world.timer_mut(TimerKind::GhostAi).pause();

    match flavor {
        PelletFlavor::Power => {
            effects.push(Effect::PlaySfx(SoundEffect::PowerPelletEaten));
            world.match_state_mut().add_score(points::POWER_PELLET);
            // Each pickup opens a fresh frightened window.
            world.match_state_mut().reset_multiplier();

            let window = world.config().frightened_duration;
            if !world.match_state().is_bonus_stage() {
                world.timer_mut(TimerKind::PowerMode).start(window);
            }
            // Invulnerability outlives the frightened window it absorbs.
            if world.timer(TimerKind::SuperMode).is_running() {
                world.timer_mut(TimerKind::SuperMode).extend(window);
            }
            events.push(GameEvent::FrightenedModeBegin);
        }
        PelletFlavor::Super => {
            effects.push(Effect::PlaySfx(SoundEffect::SuperPelletEaten));
            world.match_state_mut().add_score(points::SUPER_PELLET);

            if !world.match_state().is_bonus_stage() {
                let window = world.config().super_duration;
                world.timer_mut(TimerKind::SuperMode).start(window);
            }
            world.set_pac_state(pacman, PacState::Super);
            events.push(GameEvent::SuperModeBegin);
        }
    }
}

/// Pac-Man touching a ghost: either the ghost is eaten or Pac-Man dies.
fn on_pacman_ghost(
    world: &mut World,
    pacman: ObjectId,
    pac_state: PacState,
    ghost: ObjectId,
    ghost_state: GhostState,
    effects: &mut Vec<Effect>,
) {
    if pac_state == PacState::Dying {
        return;
    }
    match ghost_state {
        GhostState::Frightened => eat_ghost(world, ghost, effects),
        GhostState::Eaten { .. } => {}
        // A healing ghost has regained its normal form and is hostile again.
        GhostState::Scatter | GhostState::Chase | GhostState::Heal { .. } => {
            if pac_state != PacState::Super {
                kill_pacman(world, pacman, effects);
            }
        }
    }
}

/// A frightened ghost is eaten: freeze the world briefly, show the score
/// texture where the ghost was, and schedule its recovery.
fn eat_ghost(world: &mut World, ghost: ObjectId, effects: &mut Vec<Effect>) {
    world.timer_mut(TimerKind::PowerMode).pause();
    world.timer_mut(TimerKind::SuperMode).pause();
    world.set_movement_freeze(true);
    effects.push(Effect::FreezeAnimations(true));
    effects.push(Effect::PlaySfx(SoundEffect::GhostEaten));

    let multiplier = world.match_state().multiplier();
    world.match_state_mut().add_score(points::GHOST * multiplier);
    effects.push(Effect::ShowScoreSprite {
        object: ghost,
        value: ghost_score_label(multiplier),
    });
    world.match_state_mut().advance_multiplier();

    let freeze = world.config().ghost_freeze;
    world.schedule(
        freeze,
        DelayedAction::GhostRecovery {
            ghost,
            hidden: ghost,
        },
    );
}

/// A hostile ghost caught Pac-Man: run the death sequence.
fn kill_pacman(world: &mut World, pacman: ObjectId, effects: &mut Vec<Effect>) {
    if let Some(star) = world.star() {
        world.despawn_star();
        effects.push(Effect::HideSprite(star));
    }
    effects.push(Effect::StopAllAudio);
    effects.push(Effect::PlaySfx(SoundEffect::PacManDying));
    world.stop_all_timers();

    world.set_pac_state(pacman, PacState::Dying);
    effects.push(Effect::StartDyingAnimation(pacman));

    let remaining = world.match_state_mut().lose_life();
    effects.push(Effect::RemoveLifeIcon);
    effects.push(Effect::PersistLives(remaining));

    for other in world.ghosts() {
        if let Some(mover) = world.mover_mut(other) {
            mover.set_frozen(true);
        }
        world.set_visible(other, false);
        effects.push(Effect::HideSprite(other));
    }

    let delay = world.config().dying_animation + world.config().death_grace;
    world.schedule(delay, DelayedAction::DeathSequence);
}

/// Star pickup: freeze the world, score by the bonus-fruit display frames,
/// and schedule the recovery that removes the star.
fn on_star(world: &mut World, star: ObjectId, effects: &mut Vec<Effect>) {
    world.timer_mut(TimerKind::Star).stop();
    for kind in [
        TimerKind::GhostAi,
        TimerKind::PowerMode,
        TimerKind::SuperMode,
        TimerKind::BonusStage,
    ] {
        world.timer_mut(kind).pause();
    }
    world.set_movement_freeze(true);
    effects.push(Effect::FreezeAnimations(true));
    effects.push(Effect::StopAnimation(star));

    let (left, right) = world.bonus_frames();
    let freeze = if left == right {
        let shown = BonusFruit::from_frame(left);
        let level_fruit = BonusFruit::for_level(world.match_state().level());
        let value = if shown == level_fruit {
            points::MATCHING_BONUS_FRUIT_AND_LEVEL_FRUIT
        } else {
            points::MATCHING_BONUS_FRUIT
        };
        world.match_state_mut().add_score(value);
        effects.push(Effect::ShowScoreSprite {
            object: star,
            value,
        });
        world.config().star_match_freeze
    } else {
        let multiplier = world.match_state().multiplier();
        world.match_state_mut().add_score(points::GHOST * multiplier);
        effects.push(Effect::ShowScoreSprite {
            object: star,
            value: ghost_score_label(multiplier),
        });
        world.config().star_clash_freeze
    };

    world.schedule(freeze, DelayedAction::StarRecovery { hidden: star });
}

/// Door contact: only Super Pac-Man bursts through.
fn on_door(
    world: &mut World,
    pacman: ObjectId,
    pac_state: PacState,
    door: ObjectId,
    door_state: DoorState,
    effects: &mut Vec<Effect>,
) {
    if pac_state != PacState::Super || !matches!(door_state, DoorState::Locked(_)) {
        return;
    }
    world.set_door_state(door, DoorState::Open);
    world.deactivate(door);
    effects.push(Effect::HideSprite(door));
    effects.push(Effect::PlaySfx(SoundEffect::DoorBroken));
    world.match_state_mut().add_score(points::BROKEN_DOOR);

    // Re-issue the heading so the engine mover keeps going through the gap.
    if let Some(mover) = world.mover_mut(pacman) {
        let heading = mover.direction();
        mover.request_direction(heading);
    }
}

fn on_sensor(world: &mut World, occupant: ObjectId, sensor: SensorKind) {
    match sensor {
        SensorKind::SlowDown(zone) => on_slow_zone(world, occupant, zone),
        SensorKind::Teleport => on_teleport(world, occupant),
    }
}

/// Slow zones throttle only movement in their blocking direction.
fn on_slow_zone(world: &mut World, occupant: ObjectId, zone: SlowZone) {
    let level = world.match_state().level();
    if let Some(mover) = world.mover_mut(occupant) {
        if mover.direction() == zone.blocking_direction() {
            mover.set_max_speed(PACMAN_NORMAL_SPEED * slow_down_factor(level));
        } else {
            mover.set_max_speed(PACMAN_NORMAL_SPEED);
        }
    }
}

/// Wraps the occupant to the opposite horizontal edge of the same row.
fn on_teleport(world: &mut World, occupant: ObjectId) {
    let Ok(position) = world.tracker().position(occupant) else {
        return;
    };
    let tile = position.tile();
    let columns = world.grid().columns();
    if columns == 0 {
        return;
    }
    let column = if tile.column() == 0 { columns - 1 } else { 0 };
    world.relocate(occupant, TileIndex::new(column, tile.row()));

    if let Some(mover) = world.mover_mut(occupant) {
        mover.reset_target();
        let heading = mover.direction();
        mover.request_direction(heading);
    }
}

/// Dispatches one expired timer.
pub fn handle_timer_expiry(
    world: &mut World,
    kind: TimerKind,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<Effect>,
) {
    match kind {
        TimerKind::PowerMode => {
            world.match_state_mut().reset_multiplier();
            if !world.timer(TimerKind::SuperMode).is_running() {
                world.timer_mut(TimerKind::GhostAi).resume();
            }
            events.push(GameEvent::FrightenedModeEnd);
        }
        TimerKind::SuperMode => {
            if let Some(pacman) = world.pacman() {
                world.set_pac_state(pacman, PacState::Normal);
            }
            world.timer_mut(TimerKind::GhostAi).resume();
            events.push(GameEvent::SuperModeEnd);
        }
        TimerKind::GhostAi => {
            let phase = world.toggle_ghost_phase();
            let (event, duration) = match phase {
                ResumePhase::Scatter => {
                    (GameEvent::ScatterModeBegin, world.config().scatter_phase)
                }
                ResumePhase::Chase => (GameEvent::ChaseModeBegin, world.config().chase_phase),
            };
            events.push(event);
            world.timer_mut(TimerKind::GhostAi).start(duration);
        }
        TimerKind::Star => {
            if let Some(star) = world.star() {
                world.deactivate(star);
                effects.push(Effect::HideSprite(star));
            }
        }
        TimerKind::BonusStage => {
            effects.push(Effect::BonusStageOver);
        }
    }
}

/// Dispatches one scheduled action whose delay elapsed.
pub fn handle_delayed_action(
    world: &mut World,
    action: DelayedAction,
    effects: &mut Vec<Effect>,
) {
    match action {
        DelayedAction::DeathSequence => {
            if world.match_state().lives() == 0 {
                if let Some(pacman) = world.pacman() {
                    world.remove(pacman);
                }
                effects.push(Effect::EndGameplay);
            } else {
                effects.push(Effect::PushLevelRestart);
            }
        }
        DelayedAction::GhostRecovery { ghost, hidden } => {
            world.set_movement_freeze(false);
            effects.push(Effect::FreezeAnimations(false));
            effects.push(Effect::ShowSprite(hidden));
            world.timer_mut(TimerKind::PowerMode).resume();
            world.timer_mut(TimerKind::SuperMode).resume();
            world.set_ghost_state(
                ghost,
                GhostState::Eaten {
                    resume: ResumePhase::Scatter,
                },
            );
        }
        DelayedAction::StarRecovery { hidden } => {
            world.set_movement_freeze(false);
            effects.push(Effect::FreezeAnimations(false));
            world.despawn_star();
            effects.push(Effect::HideSprite(hidden));
            // Every paused timer resumes, no matter which rule paused it;
            // running and stopped timers ignore the call.
            for kind in TimerKind::ALL {
                world.timer_mut(kind).resume();
            }
        }
    }
}

/// Advances session time by one frame.
///
/// Timers tick first, in their fixed kind order, then the scheduled-action
/// queue; each expiry dispatches synchronously before the next is examined.
/// A timer stopped before its window elapsed never reaches its handler.
pub fn advance_time(
    world: &mut World,
    dt: Duration,
    events: &mut Vec<GameEvent>,
    effects: &mut Vec<Effect>,
) {
    for kind in world.tick_timers(dt) {
        handle_timer_expiry(world, kind, events, effects);
    }
    for action in world.tick_delays(dt) {
        handle_delayed_action(world, action, effects);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacman_world::Config;

    fn session() -> World {
        World::new(Config::default())
    }

    fn collide(world: &mut World, a: ObjectId, b: ObjectId) -> (Vec<GameEvent>, Vec<Effect>) {
        let mut events = Vec::new();
        let mut effects = Vec::new();
        resolve_collision(world, a, b, &mut events, &mut effects);
        (events, effects)
    }

    #[test]
    fn fruit_scores_by_level_and_disappears() {
        let mut world = World::new(Config {
            level: 3,
            ..Config::default()
        });
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
        let fruit = world.spawn(ObjectKind::Fruit, TileIndex::new(1, 1));

        let (_, effects) = collide(&mut world, pacman, fruit);

        assert_eq!(world.match_state().score(), points::FRUIT * 3);
        assert_eq!(world.match_state().fruits_eaten(), 1);
        assert!(!world.object(fruit).expect("registered").is_active());
        assert!(effects.contains(&Effect::HideSprite(fruit)));
    }

    #[test]
    fn duplicate_overlap_reports_score_once() {
        let mut world = session();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
        let fruit = world.spawn(ObjectKind::Fruit, TileIndex::new(1, 1));

        let _ = collide(&mut world, pacman, fruit);
        let _ = collide(&mut world, fruit, pacman);

        assert_eq!(world.match_state().score(), points::FRUIT);
    }

    #[test]
    fn key_opens_only_matching_doors() {
        let mut world = session();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
        let key_id = KeyId::new(7);
        let key = world.spawn(ObjectKind::Key(key_id), TileIndex::new(1, 1));
        let matching = world.spawn(
            ObjectKind::Door(DoorState::Locked(key_id)),
            TileIndex::new(4, 1),
        );
        let other = world.spawn(
            ObjectKind::Door(DoorState::Locked(KeyId::new(8))),
            TileIndex::new(5, 1),
        );

        let _ = collide(&mut world, pacman, key);

        assert_eq!(world.match_state().score(), points::KEY);
        assert!(!world.object(matching).expect("registered").is_active());
        assert!(world.object(other).expect("registered").is_active());
    }

    #[test]
    fn power_pellet_starts_the_frightened_window() {
        let mut world = session();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
        let pellet = world.spawn(
            ObjectKind::Pellet(PelletFlavor::Power),
            TileIndex::new(1, 1),
        );
        world
            .timer_mut(TimerKind::GhostAi)
            .start(Duration::from_secs(7));

        let (events, _) = collide(&mut world, pacman, pellet);

        assert_eq!(events, vec![GameEvent::FrightenedModeBegin]);
        assert!(world.timer(TimerKind::GhostAi).is_paused());
        assert_eq!(
            world.timer(TimerKind::PowerMode).remaining(),
            Some(world.config().frightened_duration)
        );
        assert_eq!(world.match_state().score(), points::POWER_PELLET);
    }

    #[test]
    fn power_pellet_extends_a_running_super_window() {
        let mut world = session();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Super), TileIndex::new(1, 1));
        let pellet = world.spawn(
            ObjectKind::Pellet(PelletFlavor::Power),
            TileIndex::new(1, 1),
        );
        world
            .timer_mut(TimerKind::SuperMode)
            .start(Duration::from_secs(4));

        let _ = collide(&mut world, pacman, pellet);

        assert_eq!(
            world.timer(TimerKind::SuperMode).remaining(),
            Some(Duration::from_secs(4) + world.config().frightened_duration)
        );
    }

    #[test]
    fn super_pellet_empowers_pacman() {
        let mut world = session();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
        let pellet = world.spawn(
            ObjectKind::Pellet(PelletFlavor::Super),
            TileIndex::new(1, 1),
        );

        let (events, _) = collide(&mut world, pacman, pellet);

        assert_eq!(events, vec![GameEvent::SuperModeBegin]);
        assert_eq!(
            world.object(pacman).expect("registered").kind(),
            ObjectKind::PacMan(PacState::Super)
        );
        assert!(world.timer(TimerKind::SuperMode).is_running());
    }

    #[test]
    fn bonus_stage_pellets_start_no_mode_timers() {
        let mut world = World::new(Config {
            bonus_stage: true,
            ..Config::default()
        });
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
        let pellet = world.spawn(
            ObjectKind::Pellet(PelletFlavor::Power),
            TileIndex::new(1, 1),
        );

        let (events, _) = collide(&mut world, pacman, pellet);

        assert_eq!(events, vec![GameEvent::FrightenedModeBegin]);
        assert!(!world.timer(TimerKind::PowerMode).is_running());
    }

    #[test]
    fn eating_a_frightened_ghost_scales_with_the_multiplier() {
        let mut world = session();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
        let ghost = world.spawn(ObjectKind::Ghost(GhostState::Frightened), TileIndex::new(1, 1));
        world.match_state_mut().advance_multiplier();

        let (_, effects) = collide(&mut world, pacman, ghost);

        assert_eq!(world.match_state().score(), points::GHOST * 2);
        assert_eq!(world.match_state().multiplier(), 4);
        assert!(effects.contains(&Effect::ShowScoreSprite {
            object: ghost,
            value: 200,
        }));
        assert!(world
            .mover(pacman)
            .expect("pacman has a mover")
            .is_frozen());
    }

    #[test]
    fn super_pacman_passes_through_hostile_ghosts() {
        let mut world = session();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Super), TileIndex::new(1, 1));
        let ghost = world.spawn(ObjectKind::Ghost(GhostState::Chase), TileIndex::new(1, 1));

        let (_, effects) = collide(&mut world, pacman, ghost);

        assert!(effects.is_empty());
        assert_eq!(world.match_state().lives(), world.config().lives);
    }

    #[test]
    fn hostile_ghost_starts_the_death_sequence() {
        let mut world = session();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
        let ghost = world.spawn(ObjectKind::Ghost(GhostState::Chase), TileIndex::new(1, 1));
        world
            .timer_mut(TimerKind::GhostAi)
            .start(Duration::from_secs(7));

        let (_, effects) = collide(&mut world, pacman, ghost);

        assert_eq!(
            world.object(pacman).expect("registered").kind(),
            ObjectKind::PacMan(PacState::Dying)
        );
        assert_eq!(world.match_state().lives(), world.config().lives - 1);
        assert!(!world.timer(TimerKind::GhostAi).is_running());
        assert!(effects.contains(&Effect::StartDyingAnimation(pacman)));
        assert!(effects.contains(&Effect::HideSprite(ghost)));
        assert!(effects.contains(&Effect::PersistLives(world.config().lives - 1)));
    }

    #[test]
    fn healing_ghost_is_still_lethal() {
        let mut world = session();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
        let ghost = world.spawn(
            ObjectKind::Ghost(GhostState::Heal {
                resume: ResumePhase::Scatter,
            }),
            TileIndex::new(1, 1),
        );

        let (_, effects) = collide(&mut world, pacman, ghost);

        assert_eq!(world.match_state().lives(), world.config().lives - 1);
        assert_eq!(
            world.object(pacman).expect("registered").kind(),
            ObjectKind::PacMan(PacState::Dying)
        );
        assert!(effects.contains(&Effect::StartDyingAnimation(pacman)));
    }

    #[test]
    fn eaten_ghost_in_transit_is_harmless() {
        let mut world = session();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
        let ghost = world.spawn(
            ObjectKind::Ghost(GhostState::Eaten {
                resume: ResumePhase::Scatter,
            }),
            TileIndex::new(1, 1),
        );

        let (_, effects) = collide(&mut world, pacman, ghost);

        assert!(effects.is_empty());
        assert_eq!(world.match_state().lives(), world.config().lives);
    }

    #[test]
    fn dying_pacman_ignores_further_ghost_contact() {
        let mut world = session();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
        let first = world.spawn(ObjectKind::Ghost(GhostState::Chase), TileIndex::new(1, 1));
        let second = world.spawn(ObjectKind::Ghost(GhostState::Chase), TileIndex::new(1, 1));

        let _ = collide(&mut world, pacman, first);
        let lives = world.match_state().lives();
        let _ = collide(&mut world, pacman, second);

        assert_eq!(world.match_state().lives(), lives);
    }

    #[test]
    fn super_pacman_bursts_locked_doors() {
        let mut world = session();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Super), TileIndex::new(1, 1));
        let door = world.spawn(
            ObjectKind::Door(DoorState::Locked(KeyId::new(1))),
            TileIndex::new(2, 1),
        );

        let (_, effects) = collide(&mut world, pacman, door);

        assert_eq!(world.match_state().score(), points::BROKEN_DOOR);
        assert!(!world.object(door).expect("registered").is_active());
        assert!(effects.contains(&Effect::PlaySfx(SoundEffect::DoorBroken)));
    }

    #[test]
    fn normal_pacman_cannot_burst_doors() {
        let mut world = session();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
        let door = world.spawn(
            ObjectKind::Door(DoorState::Locked(KeyId::new(1))),
            TileIndex::new(2, 1),
        );

        let (_, effects) = collide(&mut world, pacman, door);

        assert!(effects.is_empty());
        assert!(world.object(door).expect("registered").is_active());
    }

    #[test]
    fn slow_zone_throttles_only_its_blocking_direction() {
        let mut world = session();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(1, 1));
        let zone = SlowZone::new(2).expect("valid zone id");
        let sensor = world.spawn(
            ObjectKind::Sensor(SensorKind::SlowDown(zone)),
            TileIndex::new(1, 1),
        );
        world
            .mover_mut(pacman)
            .expect("pacman has a mover")
            .request_direction(pacman_core::Direction::Right);

        let _ = collide(&mut world, pacman, sensor);
        let throttled = world.mover(pacman).expect("pacman has a mover").max_speed();
        assert!((throttled - PACMAN_NORMAL_SPEED * 0.40).abs() < f32::EPSILON);

        world
            .mover_mut(pacman)
            .expect("pacman has a mover")
            .request_direction(pacman_core::Direction::Left);
        let _ = collide(&mut world, pacman, sensor);
        let restored = world.mover(pacman).expect("pacman has a mover").max_speed();
        assert!((restored - PACMAN_NORMAL_SPEED).abs() < f32::EPSILON);
    }

    #[test]
    fn teleport_wraps_to_the_opposite_edge_of_the_row() {
        let mut world = session();
        let columns = world.grid().columns();
        let pacman = world.spawn(ObjectKind::PacMan(PacState::Normal), TileIndex::new(0, 4));
        let sensor = world.spawn(ObjectKind::Sensor(SensorKind::Teleport), TileIndex::new(0, 4));
        world
            .mover_mut(pacman)
            .expect("pacman has a mover")
            .set_path(vec![TileIndex::new(1, 4)]);

        let _ = collide(&mut world, pacman, sensor);

        let landed = TileIndex::new(columns - 1, 4);
        assert_eq!(world.object(pacman).expect("registered").tile(), landed);
        assert_eq!(
            world.tracker().position(pacman).expect("tracked").tile(),
            landed
        );
        assert_eq!(world.mover(pacman).expect("pacman has a mover").target(), None);
    }
}
