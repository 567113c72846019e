use star_shooter::compute::*;
use star_shooter::config::GameConfig;
use star_shooter::entities::*;

fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0)
}

fn make_state() -> GameState {
    let mut s = init_state(&GameConfig::default(), viewport());
    s.status = GameStatus::Playing;
    s
}

fn enemy_at(x: f32, y: f32) -> Body {
    Body { x, y, width: 30.0, height: 20.0, speed: 3.0 }
}

fn bullet_at(x: f32, y: f32) -> Body {
    Body { x, y, width: 4.0, height: 10.0, speed: 7.0 }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = init_state(&GameConfig::default(), viewport());
    assert_eq!(s.player.x, 380.0); // (800 - 40) / 2
    assert_eq!(s.player.y, 550.0); // 600 - 50
    assert_eq!(s.player.width, 40.0);
    assert_eq!(s.player.height, 20.0);
}

#[test]
fn init_state_empty_collections() {
    let s = init_state(&GameConfig::default(), viewport());
    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.status, GameStatus::Welcome);
}

// ── move_player_to ────────────────────────────────────────────────────────────

#[test]
fn pointer_centers_player() {
    let s = make_state();
    let s2 = move_player_to(&s, 420.0, viewport());
    assert_eq!(s2.player.x, 400.0);
}

#[test]
fn pointer_clamps_at_left_edge() {
    let s = make_state();
    assert_eq!(move_player_to(&s, 5.0, viewport()).player.x, 0.0);
    assert_eq!(move_player_to(&s, -10_000.0, viewport()).player.x, 0.0);
}

#[test]
fn pointer_clamps_at_right_edge() {
    let s = make_state();
    assert_eq!(move_player_to(&s, 795.0, viewport()).player.x, 760.0);
    assert_eq!(move_player_to(&s, f32::MAX, viewport()).player.x, 760.0);
}

#[test]
fn pointer_never_leaves_viewport() {
    let s = make_state();
    for px in (-200..1000).step_by(7) {
        let x = move_player_to(&s, px as f32, viewport()).player.x;
        assert!((0.0..=760.0).contains(&x), "x={x} for pointer {px}");
    }
}

#[test]
fn nudge_clamps_like_pointer() {
    let s = make_state();
    assert_eq!(nudge_player(&s, 20.0, viewport()).player.x, 400.0);
    assert_eq!(nudge_player(&s, -1000.0, viewport()).player.x, 0.0);
    assert_eq!(nudge_player(&s, 1000.0, viewport()).player.x, 760.0);
}

#[test]
fn move_does_not_mutate_original() {
    let s = make_state();
    let _ = move_player_to(&s, 10.0, viewport());
    assert_eq!(s.player.x, 380.0);
}

// ── player_shoot ──────────────────────────────────────────────────────────────

#[test]
fn shoot_spawns_bullet_at_muzzle() {
    let mut s = make_state();
    s.player.x = 400.0;
    let s2 = player_shoot(&s, &GameConfig::default());
    assert_eq!(s2.bullets.len(), 1);
    let b = &s2.bullets[0];
    assert_eq!(b.x, 418.0);
    assert_eq!(b.y, 550.0);
    assert_eq!(b.speed, 7.0);
}

#[test]
fn shoot_has_no_cap() {
    let mut s = make_state();
    for _ in 0..10 {
        s = player_shoot(&s, &GameConfig::default());
    }
    assert_eq!(s.bullets.len(), 10);
}

#[test]
fn shoot_does_not_mutate_original() {
    let s = make_state();
    let _ = player_shoot(&s, &GameConfig::default());
    assert!(s.bullets.is_empty());
}

// ── step — bullets ────────────────────────────────────────────────────────────

#[test]
fn bullet_flies_ten_ticks() {
    let mut s = make_state();
    s.player.x = 400.0;
    s = player_shoot(&s, &GameConfig::default());
    for _ in 0..10 {
        s = step(&s, viewport(), 10).state;
    }
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.bullets[0].y, 480.0);
}

#[test]
fn bullet_removed_once_above_top() {
    let mut s = make_state();
    s.bullets.push(bullet_at(100.0, 7.0)); // → 0, kept
    s.bullets.push(bullet_at(200.0, 6.0)); // → -1, dropped
    let s2 = step(&s, viewport(), 10).state;
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].x, 100.0);

    let s3 = step(&s2, viewport(), 10).state;
    assert!(s3.bullets.is_empty());
}

// ── step — enemies ────────────────────────────────────────────────────────────

#[test]
fn enemy_moves_down_by_speed() {
    let mut s = make_state();
    s.enemies.push(enemy_at(10.0, 100.0));
    let s2 = step(&s, viewport(), 10).state;
    assert_eq!(s2.enemies[0].y, 103.0);
}

#[test]
fn enemy_breaches_after_211_ticks() {
    let mut s = make_state();
    s.enemies.push(enemy_at(0.0, -30.0));
    for tick in 1..=210 {
        let outcome = step(&s, viewport(), 10);
        assert_eq!(outcome.game_over, None, "early game over at tick {tick}");
        s = outcome.state;
    }
    assert_eq!(s.enemies[0].y, 600.0);

    let outcome = step(&s, viewport(), 10);
    assert_eq!(outcome.state.enemies[0].y, 603.0);
    assert_eq!(outcome.game_over, Some(GameOverCause::Breach));
}

#[test]
fn two_breaches_report_one_game_over() {
    let mut s = make_state();
    s.enemies.push(enemy_at(0.0, 599.0));
    s.enemies.push(enemy_at(700.0, 599.0));
    let outcome = step(&s, viewport(), 10);
    assert_eq!(outcome.game_over, Some(GameOverCause::Breach));
    assert_eq!(outcome.state.enemies.len(), 2);
}

#[test]
fn enemy_touching_player_ends_game() {
    let mut s = make_state(); // player 380..420 × 550..570
    s.enemies.push(enemy_at(390.0, 530.0)); // → 533..553
    let outcome = step(&s, viewport(), 10);
    assert_eq!(outcome.game_over, Some(GameOverCause::Collision));
}

#[test]
fn enemy_beside_player_is_safe() {
    let mut s = make_state();
    s.enemies.push(enemy_at(350.0, 540.0)); // right edge 380 touches player's left edge
    let outcome = step(&s, viewport(), 10);
    assert_eq!(outcome.game_over, None);
}

// ── step — collision: bullet ↔ enemy ─────────────────────────────────────────

#[test]
fn bullet_hit_removes_both_and_scores() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 200.0)); // → 203..223
    s.bullets.push(bullet_at(110.0, 225.0)); // → 218..228
    let outcome = step(&s, viewport(), 10);
    assert!(outcome.state.enemies.is_empty());
    assert!(outcome.state.bullets.is_empty());
    assert_eq!(outcome.state.score, 10);
    assert_eq!(outcome.destroyed, 1);
}

#[test]
fn bullet_near_miss_keeps_both() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 200.0)); // → x 100..130
    s.bullets.push(bullet_at(130.0, 225.0)); // edge contact only
    let outcome = step(&s, viewport(), 10);
    assert_eq!(outcome.state.enemies.len(), 1);
    assert_eq!(outcome.state.bullets.len(), 1);
    assert_eq!(outcome.state.score, 0);
}

#[test]
fn one_bullet_destroys_one_enemy() {
    // Two stacked enemies both overlap the single bullet
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 200.0));
    s.enemies.push(enemy_at(105.0, 205.0));
    s.bullets.push(bullet_at(110.0, 225.0));
    let outcome = step(&s, viewport(), 10);
    assert_eq!(outcome.destroyed, 1);
    assert_eq!(outcome.state.enemies.len(), 1);
    // Outer loop is enemies: the first one in order is the one destroyed
    assert_eq!(outcome.state.enemies[0].x, 105.0);
    assert_eq!(outcome.state.score, 10);
}

#[test]
fn one_enemy_consumes_one_bullet() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100.0, 200.0));
    s.bullets.push(bullet_at(105.0, 225.0));
    s.bullets.push(bullet_at(115.0, 225.0));
    let outcome = step(&s, viewport(), 10);
    assert_eq!(outcome.destroyed, 1);
    assert_eq!(outcome.state.bullets.len(), 1);
    assert_eq!(outcome.state.bullets[0].x, 115.0);
}

#[test]
fn adjacent_hits_are_not_skipped() {
    // Index-shifting removal would skip the second pair
    let mut s = make_state();
    for i in 0..4 {
        let x = 50.0 + 100.0 * i as f32;
        s.enemies.push(enemy_at(x, 200.0));
        s.bullets.push(bullet_at(x + 10.0, 225.0));
    }
    let outcome = step(&s, viewport(), 10);
    assert_eq!(outcome.destroyed, 4);
    assert!(outcome.state.enemies.is_empty());
    assert!(outcome.state.bullets.is_empty());
    assert_eq!(outcome.state.score, 40);
}

#[test]
fn enemy_shot_while_touching_player_still_ends_game() {
    let mut s = make_state(); // player 380..420 × 550..570
    s.enemies.push(enemy_at(390.0, 532.0)); // → 535..555, touches the player
    s.bullets.push(bullet_at(398.0, 550.0)); // → 543..553, inside the enemy
    let outcome = step(&s, viewport(), 10);
    assert_eq!(outcome.game_over, Some(GameOverCause::Collision));
    // The kill still counts
    assert_eq!(outcome.destroyed, 1);
    assert_eq!(outcome.state.score, 10);
    assert!(outcome.state.enemies.is_empty());
    assert!(outcome.state.bullets.is_empty());
}

#[test]
fn step_does_not_mutate_original() {
    let mut s = make_state();
    s.enemies.push(enemy_at(10.0, 10.0));
    s.bullets.push(bullet_at(300.0, 300.0));
    let _ = step(&s, viewport(), 10);
    assert_eq!(s.enemies[0].y, 10.0);
    assert_eq!(s.bullets[0].y, 300.0);
}
