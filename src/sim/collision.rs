//! Collision detection and response against the table edges and paddles
//!
//! Everything here works on axis-aligned edges: the ball is treated as its
//! bounding box, paddles as center-origin rectangles.

use std::f32::consts::PI;

use super::state::{Ball, Paddle, Side};
use crate::consts::{CONTACT_NUDGE, GAME_HEIGHT, GAME_WIDTH};
use crate::normalize_angle;

/// Top or bottom cushion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
}

/// Which side wins the rally if the ball has left the table sideways
pub fn scoring_side(ball: &Ball) -> Option<Side> {
    if ball.left() < 0.0 {
        Some(Side::Right)
    } else if ball.right() > GAME_WIDTH {
        Some(Side::Left)
    } else {
        None
    }
}

/// Wall the ball is poking through, if any
pub fn wall_contact(ball: &Ball) -> Option<Wall> {
    if ball.top() < 0.0 {
        Some(Wall::Top)
    } else if ball.bottom() > GAME_HEIGHT {
        Some(Wall::Bottom)
    } else {
        None
    }
}

/// Mirror the heading vertically and pull the ball back inside
pub fn bounce_off_wall(ball: &mut Ball, wall: Wall) {
    ball.angle = normalize_angle(-ball.angle);
    ball.pos.y = match wall {
        Wall::Top => ball.radius + CONTACT_NUDGE,
        Wall::Bottom => GAME_HEIGHT - ball.radius - CONTACT_NUDGE,
    };
}

/// Ball touching the front of `paddle`.
///
/// The leading edge of the ball must sit strictly between the paddle's
/// center line and its front face; a ball already behind the center line
/// is lost and is left to the scoring check.
pub fn paddle_contact(ball: &Ball, paddle: &Paddle, side: Side) -> bool {
    let half = paddle.half_size();
    let in_band = match side {
        Side::Left => ball.left() < paddle.pos.x + half.x && ball.left() > paddle.pos.x,
        Side::Right => ball.right() > paddle.pos.x - half.x && ball.right() < paddle.pos.x,
    };
    in_band && ball.bottom() >= paddle.top() && ball.top() <= paddle.bottom()
}

/// Send the ball back across the table.
///
/// The heading is mirrored horizontally, then rotated by `+jitter` radians
/// when the ball struck below the paddle center and `-jitter` otherwise,
/// and the ball is parked just in front of the paddle face. The rotation
/// sense is the same on both sides, so off the left paddle a low hit heads
/// down the screen while off the right paddle it heads up.
pub fn return_off_paddle(ball: &mut Ball, paddle: &Paddle, side: Side, jitter: f32) {
    let skew = if ball.pos.y > paddle.pos.y { jitter } else { -jitter };
    ball.angle = normalize_angle(PI - ball.angle + skew);

    let offset = paddle.half_size().x + ball.radius + CONTACT_NUDGE;
    ball.pos.x = match side {
        Side::Left => paddle.pos.x + offset,
        Side::Right => paddle.pos.x - offset,
    };
}
