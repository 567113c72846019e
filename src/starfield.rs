//! Scrolling background stars. Runs every frame in every game state.

use rand::Rng;

use crate::entities::{Star, Viewport};

#[derive(Clone, Debug)]
pub struct Starfield {
    stars: Vec<Star>,
    viewport: Viewport,
}

impl Starfield {
    /// Scatter `count` stars uniformly over the viewport.
    pub fn spawn(count: usize, viewport: Viewport, rng: &mut impl Rng) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                x: rng.gen::<f32>() * viewport.width,
                y: rng.gen::<f32>() * viewport.height,
                size: rng.gen::<f32>() * 2.0 + 1.0,
                speed: rng.gen::<f32>() * 2.0 + 1.0,
            })
            .collect();
        Self { stars, viewport }
    }

    /// Move every star down by its speed. Stars that fall past the bottom
    /// edge wrap to the top at a fresh random column.
    pub fn advance(&mut self, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.y += star.speed;
            if star.y > self.viewport.height {
                star.y = 0.0;
                star.x = rng.gen::<f32>() * self.viewport.width;
            }
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
