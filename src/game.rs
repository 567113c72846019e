//! Game state machine: `Welcome → Playing → GameOver → Playing`.
//!
//! [`Game`] owns the entity state, the starfield, the spawner, the RNG and
//! the sound capability. Every mutation goes through its methods, so the
//! whole game can be driven from tests with explicit clock readings.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::audio::{SoundEffect, SoundSink};
use crate::compute;
use crate::config::GameConfig;
use crate::entities::{GameOverCause, GameState, GameStatus, Viewport};
use crate::spawner::Spawner;
use crate::starfield::Starfield;

pub struct Game {
    config: GameConfig,
    viewport: Viewport,
    state: GameState,
    starfield: Starfield,
    spawner: Spawner,
    rng: StdRng,
    sound: Box<dyn SoundSink>,
    last_cause: Option<GameOverCause>,
}

impl Game {
    /// A new game on the welcome screen. `seed` makes every random draw
    /// reproducible; `None` seeds from OS entropy.
    pub fn new(
        config: GameConfig,
        viewport: Viewport,
        seed: Option<u64>,
        sound: Box<dyn SoundSink>,
    ) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let starfield = Starfield::spawn(config.star_count, viewport, &mut rng);
        let spawner = Spawner::new(&config);
        let state = compute::init_state(&config, viewport);
        Self {
            config,
            viewport,
            state,
            starfield,
            spawner,
            rng,
            sound,
            last_cause: None,
        }
    }

    /// A game continuing from a saved `state`, with `now` as the current
    /// clock reading. A playing state gets a spawner armed with a fresh
    /// random delay; a game-over state waits for the restart interaction.
    pub fn resume(
        config: GameConfig,
        viewport: Viewport,
        seed: Option<u64>,
        sound: Box<dyn SoundSink>,
        state: GameState,
        now: Duration,
    ) -> Self {
        let mut game = Self::new(config, viewport, seed, sound);
        game.state = state;
        if game.is_active() {
            game.spawner.arm_after_delay(now, &mut game.rng);
        }
        game
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Cause of the most recent game over, if any.
    pub fn last_cause(&self) -> Option<GameOverCause> {
        self.last_cause
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    /// Start-button activation. Only meaningful on the welcome screen;
    /// returns whether the game started.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.state.status != GameStatus::Welcome {
            return false;
        }
        self.state.status = GameStatus::Playing;
        self.spawner.start(now);
        info!("game started");
        true
    }

    /// End the current run. Returns `false` (and changes nothing) unless the
    /// game is playing, so repeated triggers within a frame are harmless.
    pub fn end_game(&mut self, cause: GameOverCause) -> bool {
        if self.state.status != GameStatus::Playing {
            return false;
        }
        self.state.status = GameStatus::GameOver;
        self.spawner.stop();
        self.last_cause = Some(cause);
        info!(?cause, score = self.state.score, "game over");
        true
    }

    fn restart(&mut self, now: Duration) {
        self.state = GameState {
            player: compute::spawn_player(&self.config, self.viewport),
            bullets: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            status: GameStatus::Playing,
        };
        self.spawner.start(now);
        info!("game restarted");
    }

    // ── Input ────────────────────────────────────────────────────────────────

    /// Pointer moved to logical column `x`.
    pub fn pointer_moved(&mut self, x: f32) {
        self.state = compute::move_player_to(&self.state, x, self.viewport);
    }

    /// Keyboard movement by `dx` pixels.
    pub fn nudge(&mut self, dx: f32) {
        self.state = compute::nudge_player(&self.state, dx, self.viewport);
    }

    /// Primary click. Fires while playing; on the game-over screen it is the
    /// one-shot restart trigger (restarting leaves `GameOver`, so the same
    /// trigger cannot fire twice). Ignored on the welcome screen.
    pub fn click(&mut self, now: Duration) {
        match self.state.status {
            GameStatus::Playing => {
                self.state = compute::player_shoot(&self.state, &self.config);
                self.sound.play(SoundEffect::Shoot);
            }
            GameStatus::GameOver => self.restart(now),
            GameStatus::Welcome => {}
        }
    }

    // ── Frame tick ───────────────────────────────────────────────────────────

    /// One animation frame: starfield, then (while playing) spawner and
    /// physics. Returns whether the frame loop should be rescheduled.
    pub fn frame(&mut self, now: Duration) -> bool {
        self.starfield.advance(&mut self.rng);

        if !self.is_active() {
            return self.state.status == GameStatus::Welcome;
        }

        if let Some(enemy) = self.spawner.poll(now, self.viewport, &mut self.rng) {
            self.state.enemies.push(enemy);
        }

        let outcome = compute::step(&self.state, self.viewport, self.config.score_per_kill);
        self.state = outcome.state;
        if outcome.destroyed > 0 {
            debug!(destroyed = outcome.destroyed, score = self.state.score, "enemies destroyed");
        }
        for _ in 0..outcome.destroyed {
            self.sound.play(SoundEffect::Explosion);
        }
        if let Some(cause) = outcome.game_over {
            self.end_game(cause);
        }

        self.is_active()
    }
}
