//! Named countdown timers and the scheduled-action queue.

use std::time::Duration;

use pacman_core::{DelayedAction, TimerKind};

/// Internal lifecycle of a countdown timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerState {
    Stopped,
    Running(Duration),
    Paused(Duration),
}

/// Single delayed action with pause/resume and dynamic extension support.
///
/// Exactly one of stopped, running, or paused holds at a time. Pausing
/// preserves the exact remaining duration, and a timer stopped before expiry
/// never reports expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountdownTimer {
    state: TimerState,
}

impl CountdownTimer {
    /// Creates a stopped timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TimerState::Stopped,
        }
    }

    /// Starts (or restarts) the timer with the provided duration.
    pub fn start(&mut self, duration: Duration) {
        self.state = TimerState::Running(duration);
    }

    /// Stops the timer, discarding any remaining duration.
    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// Pauses a running timer, preserving its remaining duration.
    pub fn pause(&mut self) {
        if let TimerState::Running(remaining) = self.state {
            self.state = TimerState::Paused(remaining);
        }
    }

    /// Resumes a paused timer from its preserved remaining duration.
    pub fn resume(&mut self) {
        if let TimerState::Paused(remaining) = self.state {
            self.state = TimerState::Running(remaining);
        }
    }

    /// Extends the remaining duration of a running or paused timer.
    pub fn extend(&mut self, extra: Duration) {
        match self.state {
            TimerState::Running(remaining) => {
                self.state = TimerState::Running(remaining.saturating_add(extra));
            }
            TimerState::Paused(remaining) => {
                self.state = TimerState::Paused(remaining.saturating_add(extra));
            }
            TimerState::Stopped => {}
        }
    }

    /// Remaining duration, if the timer is running or paused.
    #[must_use]
    pub const fn remaining(&self) -> Option<Duration> {
        match self.state {
            TimerState::Running(remaining) | TimerState::Paused(remaining) => Some(remaining),
            TimerState::Stopped => None,
        }
    }

    /// Reports whether the timer is currently running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running(_))
    }

    /// Reports whether the timer is currently paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        matches!(self.state, TimerState::Paused(_))
    }

    /// Advances a running timer and reports whether it expired this tick.
    ///
    /// An expired timer is left stopped; paused and stopped timers ignore the
    /// elapsed time entirely.
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.state {
            TimerState::Running(remaining) => {
                if remaining <= dt {
                    self.state = TimerState::Stopped;
                    true
                } else {
                    self.state = TimerState::Running(remaining - dt);
                    false
                }
            }
            TimerState::Paused(_) | TimerState::Stopped => false,
        }
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// The session's five named timers, ticked in a fixed order.
#[derive(Clone, Copy, Debug, Default)]
pub struct TimerBank {
    timers: [CountdownTimer; TimerKind::ALL.len()],
}

impl TimerBank {
    const fn slot(kind: TimerKind) -> usize {
        match kind {
            TimerKind::PowerMode => 0,
            TimerKind::SuperMode => 1,
            TimerKind::Star => 2,
            TimerKind::GhostAi => 3,
            TimerKind::BonusStage => 4,
        }
    }

    /// Read access to the named timer.
    #[must_use]
    pub fn get(&self, kind: TimerKind) -> &CountdownTimer {
        &self.timers[Self::slot(kind)]
    }

    /// Mutable access to the named timer.
    #[must_use]
    pub fn get_mut(&mut self, kind: TimerKind) -> &mut CountdownTimer {
        &mut self.timers[Self::slot(kind)]
    }

    /// Stops every timer in the bank.
    pub fn stop_all(&mut self) {
        for timer in &mut self.timers {
            timer.stop();
        }
    }

    /// Advances every timer, collecting the kinds that expired this tick.
    ///
    /// Expiry is reported in the fixed order of [`TimerKind::ALL`] so that
    /// handlers observe a deterministic sequence within one frame.
    pub fn tick(&mut self, dt: Duration) -> Vec<TimerKind> {
        let mut expired = Vec::new();
        for kind in TimerKind::ALL {
            if self.timers[Self::slot(kind)].tick(dt) {
                expired.push(kind);
            }
        }
        expired
    }
}

#[derive(Clone, Copy, Debug)]
struct DelayEntry {
    remaining: Duration,
    action: DelayedAction,
}

/// Queue of scheduled-action records dispatched once their delay elapses.
#[derive(Clone, Debug, Default)]
pub struct DelayQueue {
    entries: Vec<DelayEntry>,
}

impl DelayQueue {
    /// Schedules an action to fire after the provided delay.
    pub fn schedule(&mut self, after: Duration, action: DelayedAction) {
        self.entries.push(DelayEntry {
            remaining: after,
            action,
        });
    }

    /// Advances the queue, returning the actions due this tick in
    /// scheduling order.
    pub fn tick(&mut self, dt: Duration) -> Vec<DelayedAction> {
        let mut due = Vec::new();
        self.entries.retain_mut(|entry| {
            if entry.remaining <= dt {
                due.push(entry.action);
                false
            } else {
                entry.remaining -= dt;
                true
            }
        });
        due
    }

    /// Number of actions still waiting to fire.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no actions are waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
