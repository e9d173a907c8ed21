//! Game state and core simulation types
//!
//! Everything the simulation step mutates lives in [`GameState`]; the mode
//! machine in `machine.rs` owns one of these for the whole session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ai::AiController;
use super::rng::{RandomSource, serve_angle};
use crate::consts::*;
use crate::heading;

/// Which end of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human player
    Left,
    /// Computer player
    Right,
}


/// Vertical movement a paddle wants to make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Intent {
    /// Toward the top of the screen (negative y)
    Up,
    #[default]
    Stationary,
    /// Toward the bottom of the screen (positive y)
    Down,
}

impl Intent {
    /// Signed direction along y
    pub fn sign(self) -> f32 {
        match self {
            Intent::Up => -1.0,
            Intent::Stationary => 0.0,
            Intent::Down => 1.0,
        }
    }
}

/// A paddle (center-origin rectangle, moves vertically only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Current movement intent. Held keys drive the left paddle, the AI
    /// controller drives the right one.
    pub intent: Intent,
}

impl Paddle {
    /// Paddle at its serve position for the given side
    pub fn home(side: Side) -> Self {
        let x = match side {
            Side::Left => PADDLE_INSET + PADDLE_WIDTH / 2.0,
            Side::Right => GAME_WIDTH - PADDLE_INSET - PADDLE_WIDTH / 2.0,
        };
        Self {
            pos: Vec2::new(x, GAME_HEIGHT / 2.0),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            intent: Intent::Stationary,
        }
    }

    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Lowest center y that keeps the top edge clear of the margin
    pub fn min_center_y(&self) -> f32 {
        BOUND_MARGIN + self.size.y / 2.0
    }

    /// Highest center y that keeps the bottom edge clear of the margin
    pub fn max_center_y(&self) -> f32 {
        GAME_HEIGHT - BOUND_MARGIN - self.size.y / 2.0
    }

    /// Move by `dy` if the paddle ends up inside the margins, or if it sits
    /// outside them (after a touch) and the move heads back in.
    /// Returns whether the move happened.
    pub fn try_move(&mut self, dy: f32) -> bool {
        let (min, max) = (self.min_center_y(), self.max_center_y());
        let y = self.pos.y + dy;
        let inside = y >= min && y <= max;
        let returning = (self.pos.y < min && dy > 0.0) || (self.pos.y > max && dy < 0.0);
        if inside || returning {
            self.pos.y = y;
            true
        } else {
            false
        }
    }

    /// Jump straight to `y` (touch input, no clamping)
    pub fn place(&mut self, y: f32) {
        self.pos.y = y;
    }

    /// Back to the serve position, keeping the current intent
    pub fn reset(&mut self, side: Side) {
        let intent = self.intent;
        *self = Paddle::home(side);
        self.intent = intent;
    }
}

/// Ball speed tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallSpeed {
    #[default]
    Normal,
    /// After a boosted return from the human paddle
    Super,
}

impl BallSpeed {
    /// Pixels per second
    pub fn value(self) -> f32 {
        match self {
            BallSpeed::Normal => BALL_SPEED,
            BallSpeed::Super => SUPER_BALL_SPEED,
        }
    }
}

/// Ball colour, always derived from [`BallSpeed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallTint {
    Default,
    Boosted,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    /// Heading in radians (screen coordinates, y down)
    pub angle: f32,
    pub speed: BallSpeed,
}

impl Ball {
    /// Ball at center court heading along `angle` at normal speed
    pub fn served(angle: f32) -> Self {
        Self {
            pos: Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT / 2.0),
            radius: BALL_RADIUS,
            angle,
            speed: BallSpeed::Normal,
        }
    }

    pub fn tint(&self) -> BallTint {
        match self.speed {
            BallSpeed::Normal => BallTint::Default,
            BallSpeed::Super => BallTint::Boosted,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        heading(self.angle) * self.speed.value()
    }

    /// Advance along the heading
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.velocity() * dt;
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Match score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    /// Burning time: either side sits on exactly [`BURNING_SCORE`]
    pub fn is_burning(&self) -> bool {
        self.left == BURNING_SCORE || self.right == BURNING_SCORE
    }

    /// Points the next rally is worth
    pub fn point_value(&self) -> u32 {
        if self.is_burning() { 2 } else { 1 }
    }

    /// Credit a rally to `side`, doubled during burning time.
    /// Returns the points awarded.
    pub fn award(&mut self, side: Side) -> u32 {
        let points = self.point_value();
        match side {
            Side::Left => self.left += points,
            Side::Right => self.right += points,
        }
        points
    }

    /// Side that has reached [`WIN_SCORE`], if any
    pub fn winner(&self) -> Option<Side> {
        if self.left >= WIN_SCORE {
            Some(Side::Left)
        } else if self.right >= WIN_SCORE {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        *self = Score::default();
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Human paddle
    pub left: Paddle,
    /// Computer paddle
    pub right: Paddle,
    pub ball: Ball,
    pub score: Score,
    /// Recomputed from the score every tick
    pub burning: bool,
    /// Seconds since burning time was first seen. Only the phase matters,
    /// so it is never rewound.
    pub burning_clock: Option<f32>,
    /// Banner opacity while burning (0-255)
    pub burning_alpha: u8,
    /// Right paddle brain
    pub ai: AiController,
}

impl GameState {
    /// Fresh state with a served ball
    pub fn new(rng: &mut impl RandomSource) -> Self {
        Self {
            left: Paddle::home(Side::Left),
            right: Paddle::home(Side::Right),
            ball: Ball::served(serve_angle(rng)),
            score: Score::default(),
            burning: false,
            burning_clock: None,
            burning_alpha: 0,
            ai: AiController::default(),
        }
    }

    /// Put ball and paddles back on their marks with a fresh serve angle
    pub fn serve(&mut self, rng: &mut impl RandomSource) {
        self.left.reset(Side::Left);
        self.right.reset(Side::Right);
        self.ball = Ball::served(serve_angle(rng));
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}
