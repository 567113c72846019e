//! Enemy spawner: a cancellable, self-rearming real-time timer.
//!
//! The spawner is not frame-locked. It is polled once per tick with the
//! current clock reading and fires whenever its deadline has passed, then
//! re-arms itself with a fresh random delay. The state machine owns it and
//! is the only caller of `start` / `stop`.

use std::ops::Range;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{Body, Viewport};

#[derive(Clone, Debug)]
pub struct Spawner {
    /// Deadline of the armed timer; `None` while stopped.
    next_due: Option<Duration>,
    delay_ms: Range<u64>,
    template: Body,
}

impl Spawner {
    /// Build a stopped spawner from the enemy and delay settings in `config`.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            next_due: None,
            delay_ms: config.spawn_delay_min_ms..config.spawn_delay_max_ms,
            template: Body {
                x: 0.0,
                y: config.enemy_spawn_y,
                width: config.enemy_width,
                height: config.enemy_height,
                speed: config.enemy_speed,
            },
        }
    }

    /// Arm a fresh timer that fires immediately. Any previous deadline is
    /// discarded.
    pub fn start(&mut self, now: Duration) {
        self.next_due = Some(now);
    }

    /// Cancel the pending timer. Polling a stopped spawner yields nothing.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.next_due
    }

    /// Fire the timer if it is due: create one enemy and re-arm with a delay
    /// drawn from the configured range, measured from `now`.
    pub fn poll(&mut self, now: Duration, viewport: Viewport, rng: &mut impl Rng) -> Option<Body> {
        let due = self.next_due?;
        if now < due {
            return None;
        }
        let enemy = self.spawn_enemy(viewport, rng);
        let delay = self.arm_after_delay(now, rng);
        debug!(x = enemy.x, next_in_ms = delay, "enemy spawned");
        Some(enemy)
    }

    /// Arm the timer with a random delay from `now`, without spawning.
    /// Returns the chosen delay in milliseconds.
    pub fn arm_after_delay(&mut self, now: Duration, rng: &mut impl Rng) -> u64 {
        let delay = rng.gen_range(self.delay_ms.clone());
        self.next_due = Some(now + Duration::from_millis(delay));
        delay
    }

    /// A new enemy above the viewport at a random column in
    /// `[0, viewport.width - enemy.width)`.
    pub fn spawn_enemy(&self, viewport: Viewport, rng: &mut impl Rng) -> Body {
        let span = (viewport.width - self.template.width).max(0.0);
        Body {
            x: rng.gen::<f32>() * span,
            ..self.template
        }
    }
}
