//! Rendering layer — all terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game. No game logic is performed; this module only projects the logical
//! pixel viewport onto terminal cells and queues crossterm commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{Body, GameStatus, Star, Viewport};
use crate::game::Game;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STAR: Color = Color::White;
const C_PLAYER: Color = Color::Cyan;
const C_BULLET: Color = Color::Yellow;
const C_ENEMY: Color = Color::Red;
const C_SCORE: Color = Color::White;
const C_TITLE: Color = Color::Cyan;
const C_BUTTON: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Pixel size of one terminal cell when the viewport follows the terminal.
pub const CELL_WIDTH: f32 = 10.0;
pub const CELL_HEIGHT: f32 = 20.0;

/// Score readout anchor, in viewport pixels.
const SCORE_X: f32 = 10.0;
const SCORE_Y: f32 = 10.0;

const START_BUTTON: &str = "[ Get Started ]";

// ── Projection ────────────────────────────────────────────────────────────────

/// Maps logical viewport pixels to terminal cells and back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub cols: u16,
    pub rows: u16,
    cell_w: f32,
    cell_h: f32,
}

impl Projection {
    pub fn new(viewport: Viewport, cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cell_w: viewport.width / f32::from(cols),
            cell_h: viewport.height / f32::from(rows),
        }
    }

    /// Viewport matching a terminal of `cols × rows` cells at the default
    /// cell metrics.
    pub fn viewport_for(cols: u16, rows: u16) -> Viewport {
        Viewport::new(f32::from(cols) * CELL_WIDTH, f32::from(rows) * CELL_HEIGHT)
    }

    /// Cell containing the pixel `(x, y)`, or `None` when it is off-screen.
    pub fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x / self.cell_w).floor();
        let row = (y / self.cell_h).floor();
        if col < 0.0 || row < 0.0 || col >= f32::from(self.cols) || row >= f32::from(self.rows) {
            return None;
        }
        Some((col as u16, row as u16))
    }

    /// Logical x at the centre of terminal column `col`.
    pub fn column_to_x(&self, col: u16) -> f32 {
        (f32::from(col) + 0.5) * self.cell_w
    }

    /// Cell range covered by a rectangle, clipped to the screen. Every
    /// visible rectangle covers at least one cell.
    fn cells_of(&self, body: &Body) -> Option<(u16, u16, u16, u16)> {
        let max_col = f32::from(self.cols) - 1.0;
        let max_row = f32::from(self.rows) - 1.0;
        if body.right() <= 0.0 || body.bottom() <= 0.0 {
            return None;
        }
        let c0 = (body.left() / self.cell_w).floor().max(0.0);
        let r0 = (body.top() / self.cell_h).floor().max(0.0);
        if c0 > max_col || r0 > max_row {
            return None;
        }
        let c1 = ((body.right() / self.cell_w).ceil() - 1.0).clamp(c0, max_col);
        let r1 = ((body.bottom() / self.cell_h).ceil() - 1.0).clamp(r0, max_row);
        Some((c0 as u16, r0 as u16, c1 as u16, r1 as u16))
    }
}

/// Terminal-space hit box of the welcome screen's start button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
}

impl CellRect {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        row == self.row && col >= self.col && col < self.col + self.width
    }
}

pub fn start_button(proj: &Projection) -> CellRect {
    let width = START_BUTTON.chars().count() as u16;
    CellRect {
        col: (proj.cols / 2).saturating_sub(width / 2),
        row: proj.rows / 2 + 1,
        width,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for the current game status.
pub fn render<W: Write>(out: &mut W, game: &Game, proj: &Projection) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_starfield(out, game.starfield().stars(), proj)?;

    match game.status() {
        GameStatus::Welcome => draw_welcome(out, proj)?,
        GameStatus::Playing => draw_play_field(out, game, proj)?,
        GameStatus::GameOver => {
            draw_play_field(out, game, proj)?;
            draw_game_over(out, game.state().score, proj)?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, proj.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn draw_play_field<W: Write>(out: &mut W, game: &Game, proj: &Projection) -> std::io::Result<()> {
    let state = game.state();
    fill_body(out, &state.player, '█', C_PLAYER, proj)?;
    for bullet in &state.bullets {
        fill_body(out, bullet, '|', C_BULLET, proj)?;
    }
    for enemy in &state.enemies {
        fill_body(out, enemy, '▓', C_ENEMY, proj)?;
    }
    draw_score(out, state.score, proj)
}

// ── Starfield ─────────────────────────────────────────────────────────────────

fn draw_starfield<W: Write>(out: &mut W, stars: &[Star], proj: &Projection) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_STAR))?;
    for star in stars {
        if let Some((col, row)) = proj.to_cell(star.x, star.y) {
            // Bigger discs get a heavier glyph
            let glyph = if star.size < 2.0 { '.' } else { '*' };
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn fill_body<W: Write>(
    out: &mut W,
    body: &Body,
    glyph: char,
    color: Color,
    proj: &Projection,
) -> std::io::Result<()> {
    let Some((c0, r0, c1, r1)) = proj.cells_of(body) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(glyph).take(usize::from(c1 - c0 + 1)).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_score<W: Write>(out: &mut W, score: u32, proj: &Projection) -> std::io::Result<()> {
    let (col, row) = proj.to_cell(SCORE_X, SCORE_Y).unwrap_or((0, 0));
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_SCORE))?;
    out.queue(Print(format!("Score: {score}")))?;
    Ok(())
}

fn print_centered<W: Write>(
    out: &mut W,
    text: &str,
    row: u16,
    color: Color,
    proj: &Projection,
) -> std::io::Result<()> {
    let col = (proj.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Welcome panel ─────────────────────────────────────────────────────────────

fn draw_welcome<W: Write>(out: &mut W, proj: &Projection) -> std::io::Result<()> {
    let cy = proj.rows / 2;
    print_centered(out, "★  STAR  SHOOTER  ★", cy.saturating_sub(3), C_TITLE, proj)?;
    print_centered(
        out,
        "Dodge the invaders. Shoot them down.",
        cy.saturating_sub(1),
        Color::White,
        proj,
    )?;

    let button = start_button(proj);
    out.queue(cursor::MoveTo(button.col, button.row))?;
    out.queue(style::SetForegroundColor(C_BUTTON))?;
    out.queue(Print(START_BUTTON))?;

    print_centered(
        out,
        "Mouse / ← → : Move   Click / SPACE : Shoot   Q : Quit",
        cy + 4,
        C_HINT,
        proj,
    )
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, score: u32, proj: &Projection) -> std::io::Result<()> {
    let cy = proj.rows / 2;
    print_centered(out, "Game Over", cy.saturating_sub(1), Color::White, proj)?;
    print_centered(out, &format!("Score: {score}"), cy + 1, Color::White, proj)?;
    print_centered(out, "Click to Restart", cy + 2, Color::White, proj)
}
