//! View rescaling
//!
//! The game always simulates an 800x600 table; the canvas can be any size.
//! The table is scaled uniformly to fit and centered, with bars on the
//! leftover axis.

use glam::Vec2;

use crate::consts::{GAME_HEIGHT, GAME_WIDTH};

/// Canvas size in pixels and the fitted table inside it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(GAME_WIDTH, GAME_HEIGHT)
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Pixels per game unit
    pub fn scale(&self) -> f32 {
        (self.width / GAME_WIDTH).min(self.height / GAME_HEIGHT)
    }

    /// Top-left corner of the table in canvas pixels
    pub fn offset(&self) -> Vec2 {
        let s = self.scale();
        Vec2::new(
            (self.width - GAME_WIDTH * s) / 2.0,
            (self.height - GAME_HEIGHT * s) / 2.0,
        )
    }

    /// Canvas pixel (e.g. a touch point) to game coordinates
    pub fn pixel_to_game(&self, pixel: Vec2) -> Vec2 {
        (pixel - self.offset()) / self.scale()
    }

    /// Game coordinates to canvas pixels
    pub fn game_to_pixel(&self, pos: Vec2) -> Vec2 {
        self.offset() + pos * self.scale()
    }

    /// Game coordinates to normalized device coordinates (y up)
    pub fn game_to_ndc(&self, pos: Vec2) -> Vec2 {
        let p = self.game_to_pixel(pos);
        Vec2::new(p.x / self.width * 2.0 - 1.0, 1.0 - p.y / self.height * 2.0)
    }
}
