//! All game entity types — pure data, plus the rectangle overlap test.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Title panel is shown; only the starfield animates.
    Welcome,
    Playing,
    /// Final frame is frozen under the overlay until the restart interaction.
    GameOver,
}

/// Why a run ended. Both causes share the same end screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    /// An enemy dropped past the bottom edge of the viewport.
    Breach,
    /// An enemy touched the player.
    Collision,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Size of the logical drawing surface, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle with a per-tick speed. Shared by the player,
/// bullets and enemies. `(x, y)` is the top-left corner, y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Body {
    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict AABB intersection: rectangles that only share an edge do not
    /// overlap.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ── Decoration ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// Disc radius in pixels, in `[1, 3)`.
    pub size: f32,
    pub speed: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the physics step reads and writes. Cloneable so the step can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Body,
    pub bullets: Vec<Body>,
    pub enemies: Vec<Body>,
    pub score: u32,
    pub status: GameStatus,
}

impl GameState {
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Playing
    }
}
