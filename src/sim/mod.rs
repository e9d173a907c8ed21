//! Simulation module
//!
//! All gameplay logic lives here:
//! - One step per rendered frame, driven by the frame delta
//! - Randomness only through an injected [`RandomSource`]
//! - No rendering or audio backends; bounces come out as [`GameEvent`]s

pub mod ai;
pub mod collision;
pub mod machine;
pub mod rng;
pub mod state;
pub mod tick;

pub use ai::AiController;
pub use collision::{Wall, bounce_off_wall, paddle_contact, return_off_paddle, scoring_side, wall_contact};
pub use machine::{Command, Control, Game, GameMode};
pub use rng::{GameRng, RandomSource, jitter, serve_angle};
pub use state::{Ball, BallSpeed, BallTint, GameState, Intent, Paddle, Score, Side};
pub use tick::{GameEvent, TickInput, burning_alpha, tick};
