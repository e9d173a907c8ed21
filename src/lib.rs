//! Burning Tennis - human vs. AI tennis with a double-points finale
//!
//! Core modules:
//! - `sim`: Simulation (paddles, ball physics, collisions, scoring, game modes)
//! - `scene`: Read-only snapshot of what to draw each frame
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Clocks, input mapping and view rescaling
//! - `audio`: Fire-and-forget sound effects
//! - `settings`: Player preferences

pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, StartupError};
pub use scene::Scene;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical playfield size (pixels)
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 25.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Gap between the screen edge and a paddle's back face
    pub const PADDLE_INSET: f32 = 10.0;
    /// Paddles keep this much room from the top and bottom edges
    pub const BOUND_MARGIN: f32 = 5.0;
    /// Shared by the keyboard-driven and AI-driven paddles (pixels/s)
    pub const PADDLE_SPEED: f32 = 400.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED: f32 = 600.0;
    /// Speed after a boosted return
    pub const SUPER_BALL_SPEED: f32 = 1200.0;
    /// Serves closer to vertical than this are redrawn
    pub const MIN_SERVE_COS: f32 = 0.7;
    /// Exclusive upper bound of the paddle reflection jitter (degrees)
    pub const MAX_PADDLE_JITTER: u32 = 20;
    /// Gap left between the ball and whatever it was pushed off
    pub const CONTACT_NUDGE: f32 = 0.1;

    /// AI samples the ball this often (seconds)
    pub const AI_SAMPLE_PERIOD: f32 = 0.1;

    /// First side to reach this wins
    pub const WIN_SCORE: u32 = 5;
    /// Either side sitting on exactly this score doubles the next point
    pub const BURNING_SCORE: u32 = 4;
    /// Pulse frequency of the burning-time banner
    pub const BURNING_PULSE_RATE: f32 = 5.0;

    /// Longest frame the simulation will integrate in one step (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert whole degrees to radians
#[inline]
pub fn degrees_to_radians(degrees: u32) -> f32 {
    degrees as f32 * std::f32::consts::TAU / 360.0
}

/// Unit direction for a heading angle (y grows downward, screen style)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
