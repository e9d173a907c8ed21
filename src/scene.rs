//! What to draw this frame
//!
//! A [`Scene`] is a plain snapshot built after the simulation step. The
//! renderer turns its shapes into triangles; the page overlay shows its
//! strings. Nothing else about the game state crosses this boundary.

use glam::Vec2;
use serde::Serialize;

use crate::platform::ControlScheme;
use crate::platform::time::Clock;
use crate::settings::Settings;
use crate::sim::{BallTint, Game, GameMode, GameState, Side};

/// RGBA, 0.0 - 1.0
pub type Color = [f32; 4];

/// Colours for game elements
pub mod palette {
    use super::Color;

    const fn rgb(r: u8, g: u8, b: u8) -> Color {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const BACKGROUND: Color = rgb(50, 50, 50);
    pub const OUTLINE: Color = rgb(0, 0, 0);
    pub const LEFT_PADDLE: Color = rgb(100, 100, 200);
    pub const RIGHT_PADDLE: Color = rgb(200, 100, 100);
    pub const BALL: Color = rgb(255, 255, 255);
    pub const BALL_BOOSTED: Color = rgb(255, 0, 0);
    pub const TEXT: Color = rgb(255, 255, 255);
    pub const BURNING: Color = rgb(255, 255, 0);
}

/// Outline thickness around paddles
pub const PADDLE_OUTLINE: f32 = 3.0;
/// Outline thickness around the ball
pub const BALL_OUTLINE: f32 = 2.0;

pub const BURNING_TEXT: &str = "BURNING TIME!";

/// Filled, outlined rectangle (center origin)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectShape {
    pub center: Vec2,
    pub size: Vec2,
    pub fill: Color,
    pub outline: f32,
}

/// Filled, outlined circle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleShape {
    pub center: Vec2,
    pub radius: f32,
    pub fill: Color,
    pub outline: f32,
}

/// Burning-time banner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub text: &'static str,
    pub color: Color,
    /// 0-255
    pub alpha: u8,
}

/// Table contents while a match is running
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub left_paddle: RectShape,
    pub right_paddle: RectShape,
    pub ball: CircleShape,
    pub score: (u32, u32),
    /// "L - R"
    pub score_text: String,
    /// Present only during burning time
    pub banner: Option<Banner>,
}

/// Snapshot handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Scene {
    Menu { message: String },
    Playing(TableView),
    GameOver { message: String },
}

impl Scene {
    /// Capture the current frame of `game`
    pub fn capture<C: Clock>(game: &Game<C>, scheme: ControlScheme, settings: &Settings) -> Self {
        match game.mode() {
            GameMode::Menu => Scene::Menu {
                message: welcome_message(scheme),
            },
            GameMode::Playing => Scene::Playing(table_view(game.state(), settings)),
            GameMode::GameOver { winner } => Scene::GameOver {
                message: result_message(winner, scheme),
            },
        }
    }

    /// Overlay text, if this scene shows a message
    pub fn message(&self) -> Option<&str> {
        match self {
            Scene::Menu { message } | Scene::GameOver { message } => Some(message),
            Scene::Playing(_) => None,
        }
    }
}

/// Prompt shown on the menu
pub fn welcome_message(scheme: ControlScheme) -> String {
    match scheme {
        ControlScheme::Keyboard => {
            "Welcome to Burning Tennis!\n\nPress space to start the game.".to_string()
        }
        ControlScheme::Touch => {
            "Welcome to Burning Tennis!\nTouch the screen to start the game.".to_string()
        }
    }
}

/// Result line plus how to carry on
pub fn result_message(winner: Side, scheme: ControlScheme) -> String {
    let headline = match winner {
        Side::Left => "You Won!",
        Side::Right => "You Lost!",
    };
    let hint = match scheme {
        ControlScheme::Keyboard => "Press space to restart or\nescape to exit.",
        ControlScheme::Touch => "Touch the screen to restart.",
    };
    format!("{headline}\n\n{hint}")
}

fn table_view(state: &GameState, settings: &Settings) -> TableView {
    let paddle = |side: Side, fill: Color| {
        let p = state.paddle(side);
        RectShape {
            center: p.pos,
            size: p.size,
            fill,
            outline: PADDLE_OUTLINE,
        }
    };

    let ball_fill = match state.ball.tint() {
        BallTint::Default => palette::BALL,
        BallTint::Boosted => palette::BALL_BOOSTED,
    };

    let banner = state.burning.then(|| Banner {
        text: BURNING_TEXT,
        color: palette::BURNING,
        alpha: settings.burning_alpha(state.burning_alpha),
    });

    TableView {
        left_paddle: paddle(Side::Left, palette::LEFT_PADDLE),
        right_paddle: paddle(Side::Right, palette::RIGHT_PADDLE),
        ball: CircleShape {
            center: state.ball.pos,
            radius: state.ball.radius,
            fill: ball_fill,
            outline: BALL_OUTLINE,
        },
        score: (state.score.left, state.score.right),
        score_text: format!("{} - {}", state.score.left, state.score.right),
        banner,
    }
}
