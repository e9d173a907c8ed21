//! Computer paddle controller
//!
//! Looks at the ball only on a fixed cadence and never leads it, so the
//! right paddle lags behind fast rallies and stays beatable.

use serde::{Deserialize, Serialize};

use super::state::{Ball, Intent, Paddle};
use crate::consts::AI_SAMPLE_PERIOD;

/// Sampling accumulator for one AI-driven paddle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiController {
    /// Simulated seconds since the last sample
    since_sample: f32,
}

impl AiController {
    /// Pick an intent from a snapshot of the ball
    pub fn decide(ball: &Ball, paddle: &Paddle) -> Intent {
        if ball.bottom() > paddle.bottom() {
            Intent::Down
        } else if ball.top() < paddle.top() {
            Intent::Up
        } else {
            Intent::Stationary
        }
    }

    /// Advance the cadence by `dt`. Returns a fresh intent once more than
    /// [`AI_SAMPLE_PERIOD`] has passed since the last sample; between
    /// samples the caller keeps whatever intent it already has.
    pub fn update(&mut self, dt: f32, ball: &Ball, paddle: &Paddle) -> Option<Intent> {
        self.since_sample += dt;
        if self.since_sample > AI_SAMPLE_PERIOD {
            self.since_sample = 0.0;
            Some(Self::decide(ball, paddle))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;

    fn ball_at_y(y: f32) -> Ball {
        let mut ball = Ball::served(0.0);
        ball.pos.y = y;
        ball
    }

    #[test]
    fn test_decide_tracks_edges() {
        let paddle = Paddle::home(Side::Right); // spans 250..350
        assert_eq!(AiController::decide(&ball_at_y(345.0), &paddle), Intent::Down);
        assert_eq!(AiController::decide(&ball_at_y(255.0), &paddle), Intent::Up);
        assert_eq!(AiController::decide(&ball_at_y(300.0), &paddle), Intent::Stationary);
        // Edges exactly flush count as covered
        assert_eq!(AiController::decide(&ball_at_y(340.0), &paddle), Intent::Stationary);
        assert_eq!(AiController::decide(&ball_at_y(260.0), &paddle), Intent::Stationary);
    }

    #[test]
    fn test_samples_only_after_period() {
        let mut ai = AiController::default();
        let paddle = Paddle::home(Side::Right);
        let ball = ball_at_y(500.0);

        assert_eq!(ai.update(0.05, &ball, &paddle), None);
        assert_eq!(ai.update(0.05, &ball, &paddle), None); // exactly 0.1 is not enough
        assert_eq!(ai.update(0.01, &ball, &paddle), Some(Intent::Down));
        // Accumulator restarted
        assert_eq!(ai.update(0.05, &ball, &paddle), None);
    }

    #[test]
    fn test_large_frame_samples_once() {
        let mut ai = AiController::default();
        let paddle = Paddle::home(Side::Right);
        assert_eq!(ai.update(0.5, &ball_at_y(20.0), &paddle), Some(Intent::Up));
        assert_eq!(ai.update(0.0, &ball_at_y(20.0), &paddle), None);
    }
}
