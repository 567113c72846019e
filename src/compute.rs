//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` and returns a brand-new one. Sound, timers and status
//! transitions are left to the state machine in `game`.

use crate::config::GameConfig;
use crate::entities::{Body, GameOverCause, GameState, GameStatus, Viewport};

// ── Constructors ─────────────────────────────────────────────────────────────

/// The player body, horizontally centered and `player_bottom_offset` above
/// the bottom edge.
pub fn spawn_player(config: &GameConfig, viewport: Viewport) -> Body {
    Body {
        x: (viewport.width - config.player_width) / 2.0,
        y: viewport.height - config.player_bottom_offset,
        width: config.player_width,
        height: config.player_height,
        speed: config.player_speed,
    }
}

/// Build the state shown behind the welcome panel.
pub fn init_state(config: &GameConfig, viewport: Viewport) -> GameState {
    GameState {
        player: spawn_player(config, viewport),
        bullets: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        status: GameStatus::Welcome,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Center the player on the pointer column, clamped to the viewport.
pub fn move_player_to(state: &GameState, pointer_x: f32, viewport: Viewport) -> GameState {
    let x = pointer_x - state.player.width / 2.0;
    place_player(state, x, viewport)
}

/// Shift the player by `dx` pixels, clamped to the viewport.
pub fn nudge_player(state: &GameState, dx: f32, viewport: Viewport) -> GameState {
    place_player(state, state.player.x + dx, viewport)
}

fn place_player(state: &GameState, x: f32, viewport: Viewport) -> GameState {
    let max_x = (viewport.width - state.player.width).max(0.0);
    GameState {
        player: Body {
            x: x.clamp(0.0, max_x),
            ..state.player
        },
        ..state.clone()
    }
}

/// Fire a bullet from the middle of the player's top edge.
pub fn player_shoot(state: &GameState, config: &GameConfig) -> GameState {
    let p = &state.player;
    let bullet = Body {
        x: p.x + p.width / 2.0 - config.bullet_width / 2.0,
        y: p.y,
        width: config.bullet_width,
        height: config.bullet_height,
        speed: config.bullet_speed,
    };
    let mut bullets = state.bullets.clone();
    bullets.push(bullet);
    GameState {
        bullets,
        ..state.clone()
    }
}

// ── Per-frame physics step ────────────────────────────────────────────────────

/// Result of one physics step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub state: GameState,
    /// Enemies shot down this step.
    pub destroyed: u32,
    /// Set when the run must end. At most one cause per step.
    pub game_over: Option<GameOverCause>,
}

/// Advance bullets and enemies by one tick and resolve collisions.
///
/// Removal is mark-and-compact: hits are collected over a snapshot first,
/// then each collection is filtered once.
pub fn step(state: &GameState, viewport: Viewport, score_per_kill: u32) -> StepOutcome {
    // ── 1. Move bullets, drop the ones past the top edge ─────────────────────
    let bullets: Vec<Body> = state
        .bullets
        .iter()
        .map(|b| Body { y: b.y - b.speed, ..*b })
        .filter(|b| b.y >= 0.0)
        .collect();

    // ── 2. Move enemies ──────────────────────────────────────────────────────
    let enemies: Vec<Body> = state
        .enemies
        .iter()
        .map(|e| Body { y: e.y + e.speed, ..*e })
        .collect();

    // ── 3. Collision: bullets ↔ enemies (enemies outer, bullets inner) ───────
    let mut killed_enemies = vec![false; enemies.len()];
    let mut used_bullets = vec![false; bullets.len()];

    for (ei, enemy) in enemies.iter().enumerate() {
        let hit = bullets
            .iter()
            .enumerate()
            .find(|(bi, bullet)| !used_bullets[*bi] && bullet.overlaps(enemy));
        if let Some((bi, _)) = hit {
            killed_enemies[ei] = true;
            used_bullets[bi] = true;
        }
    }

    // ── 4. Breach or player contact, shot-down enemies included ──────────────
    let game_over = enemies.iter().find_map(|e| {
        if e.y > viewport.height {
            Some(GameOverCause::Breach)
        } else if e.overlaps(&state.player) {
            Some(GameOverCause::Collision)
        } else {
            None
        }
    });

    let destroyed = killed_enemies.iter().filter(|&&k| k).count() as u32;

    let enemies: Vec<Body> = enemies
        .into_iter()
        .zip(&killed_enemies)
        .filter(|(_, killed)| !**killed)
        .map(|(e, _)| e)
        .collect();

    let bullets: Vec<Body> = bullets
        .into_iter()
        .zip(&used_bullets)
        .filter(|(_, used)| !**used)
        .map(|(b, _)| b)
        .collect();

    StepOutcome {
        state: GameState {
            bullets,
            enemies,
            score: state.score + destroyed * score_per_kill,
            ..state.clone()
        },
        destroyed,
        game_over,
    }
}
