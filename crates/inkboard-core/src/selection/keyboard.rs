//! Arrow-key translation with auto-repeat.
//!
//! Timers are polled: the owner forwards `tick(now)` and asks
//! `next_deadline()` when it should be called again.

use crate::config::SelectionConfig;
use crate::input::{ArrowKey, Instant};
use kurbo::Vec2;
use std::time::Duration;

/// A cancellable repeating deadline.
#[derive(Debug, Clone)]
pub struct RepeatTimer {
    next: Instant,
    interval: Duration,
}

impl RepeatTimer {
    /// First fire at `start + delay`, then every `interval`.
    pub fn new(start: Instant, delay: Duration, interval: Duration) -> Self {
        Self {
            next: start + delay,
            interval,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Number of fires due at `now`, advancing past them.
    pub fn fire_due(&mut self, now: Instant) -> u32 {
        let mut fired = 0;
        while self.next <= now {
            self.next += self.interval;
            fired += 1;
        }
        fired
    }
}

/// Translates a selection with the arrow keys.
///
/// Each key-down edge moves one step in that key's direction. Once the
/// repeat delay has passed with an arrow still held, every interval moves
/// one step along the sum of the held directions. The translator stays
/// active after the keys are released until [`try_to_terminate`] succeeds.
///
/// [`try_to_terminate`]: KeyboardArrowTranslator::try_to_terminate
#[derive(Debug, Clone)]
pub struct KeyboardArrowTranslator {
    held: Vec<ArrowKey>,
    timer: Option<RepeatTimer>,
    active: bool,
    step: f64,
    delay: Duration,
    interval: Duration,
}

impl KeyboardArrowTranslator {
    pub fn new(step: f64, delay: Duration, interval: Duration) -> Self {
        Self {
            held: Vec::new(),
            timer: None,
            active: false,
            step,
            delay,
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub fn from_config(config: &SelectionConfig) -> Self {
        // Repeats start one interval after the delay.
        Self::new(
            config.keyboard_step,
            config.repeat_delay() + config.repeat_interval(),
            config.repeat_interval(),
        )
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_held(&self, key: ArrowKey) -> bool {
        self.held.contains(&key)
    }

    pub fn any_held(&self) -> bool {
        !self.held.is_empty()
    }

    /// Handle a key-down edge. Returns the immediate step, or `None` when the
    /// key was already held (host auto-repeat).
    pub fn key_down(&mut self, key: ArrowKey, now: Instant) -> Option<Vec2> {
        if self.is_held(key) {
            return None;
        }
        self.held.push(key);
        self.active = true;
        if self.timer.is_none() {
            self.timer = Some(RepeatTimer::new(now, self.delay, self.interval));
        }
        Some(key.direction() * self.step)
    }

    /// Handle a key-up. The repeat timer stops once no arrow is held.
    pub fn key_up(&mut self, key: ArrowKey) -> bool {
        let Some(pos) = self.held.iter().position(|k| *k == key) else {
            return false;
        };
        self.held.remove(pos);
        if self.held.is_empty() {
            self.timer = None;
        }
        true
    }

    /// Accumulated repeat translation due at `now`.
    pub fn tick(&mut self, now: Instant) -> Option<Vec2> {
        let direction = self.held_direction();
        let timer = self.timer.as_mut()?;
        let fired = timer.fire_due(now);
        if fired == 0 {
            return None;
        }
        Some(direction * self.step * f64::from(fired))
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.as_ref().map(RepeatTimer::deadline)
    }

    /// Finish the keyboard manipulation. Fails while any arrow is held.
    pub fn try_to_terminate(&mut self) -> bool {
        if self.any_held() {
            return false;
        }
        self.timer = None;
        self.active = false;
        true
    }

    /// Drop held keys and the timer unconditionally.
    pub fn cancel(&mut self) {
        self.held.clear();
        self.timer = None;
        self.active = false;
    }

    fn held_direction(&self) -> Vec2 {
        self.held
            .iter()
            .fold(Vec2::ZERO, |acc, key| acc + key.direction())
    }
}
