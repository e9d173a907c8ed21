//! Per-frame simulation step
//!
//! Advances paddles, the AI and the ball by one frame delta, then resolves
//! scoring, cushions and paddles in that order. Order matters: a ball that
//! has already left the table is scored before any bounce can save it.

use serde::{Deserialize, Serialize};

use super::collision::{bounce_off_wall, paddle_contact, return_off_paddle, scoring_side, wall_contact};
use super::rng::{RandomSource, jitter};
use super::state::{BallSpeed, GameState, Intent, Side};
use crate::consts::{BURNING_PULSE_RATE, PADDLE_SPEED};

/// Player controls sampled for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Up arrow held
    pub up: bool,
    /// Down arrow held
    pub down: bool,
    /// Boost key held (turns the next human return into a super-speed shot)
    pub boost: bool,
    /// Active touch, already mapped to game y
    pub touch_y: Option<f32>,
}

impl TickInput {
    /// Intent implied by the held arrow keys
    pub fn intent(&self) -> Intent {
        match (self.up, self.down) {
            (true, false) => Intent::Up,
            (false, true) => Intent::Down,
            _ => Intent::Stationary,
        }
    }
}

/// Things that happened during a tick, for audio, logging and the mode machine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball came off the top or bottom cushion
    WallBounce,
    /// Ball came off a paddle
    PaddleHit { side: Side, boosted: bool },
    /// Rally over; `points` is 2 during burning time
    PointScored { scorer: Side, points: u32 },
    /// A side reached the winning score
    MatchWon { winner: Side },
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut impl RandomSource,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let step = PADDLE_SPEED * dt;

    // Human paddle: each arrow key moves independently, touch overrides both
    state.left.intent = input.intent();
    if input.up {
        state.left.try_move(-step);
    }
    if input.down {
        state.left.try_move(step);
    }
    if let Some(y) = input.touch_y {
        state.left.place(y);
    }

    // Computer paddle moves on the intent from its last sample
    if state.right.intent != Intent::Stationary {
        state.right.try_move(state.right.intent.sign() * step);
    }
    if let Some(intent) = state.ai.update(dt, &state.ball, &state.right) {
        state.right.intent = intent;
    }

    state.ball.integrate(dt);

    // Off the table sideways
    if let Some(scorer) = scoring_side(&state.ball) {
        let points = state.score.award(scorer);
        events.push(GameEvent::PointScored { scorer, points });
        if let Some(winner) = state.score.winner() {
            events.push(GameEvent::MatchWon { winner });
            update_burning(state, dt);
            return events;
        }
        state.serve(rng);
    }

    if let Some(wall) = wall_contact(&state.ball) {
        bounce_off_wall(&mut state.ball, wall);
        events.push(GameEvent::WallBounce);
    }

    if paddle_contact(&state.ball, &state.left, Side::Left) {
        let skew = jitter(rng);
        return_off_paddle(&mut state.ball, &state.left, Side::Left, skew);
        state.ball.speed = if input.boost {
            BallSpeed::Super
        } else {
            BallSpeed::Normal
        };
        events.push(GameEvent::PaddleHit {
            side: Side::Left,
            boosted: input.boost,
        });
    }

    if paddle_contact(&state.ball, &state.right, Side::Right) {
        let skew = jitter(rng);
        return_off_paddle(&mut state.ball, &state.right, Side::Right, skew);
        state.ball.speed = BallSpeed::Normal;
        events.push(GameEvent::PaddleHit {
            side: Side::Right,
            boosted: false,
        });
    }

    update_burning(state, dt);
    events
}

/// Recompute the burning flag and the banner pulse
fn update_burning(state: &mut GameState, dt: f32) {
    state.burning = state.score.is_burning();

    match state.burning_clock.as_mut() {
        Some(clock) => *clock += dt,
        None if state.burning => state.burning_clock = Some(0.0),
        None => {}
    }

    if state.burning {
        let t = state.burning_clock.unwrap_or(0.0);
        state.burning_alpha = burning_alpha(t);
    }
}

/// Banner opacity for a pulse clock reading
pub fn burning_alpha(t: f32) -> u8 {
    ((t * BURNING_PULSE_RATE).sin().abs() * 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::rng::ScriptedRng;
    use crate::sim::state::BallTint;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    const DT: f32 = 1.0 / 60.0;

    fn new_state() -> (GameState, ScriptedRng) {
        let mut rng = ScriptedRng::new(&[0], &[]);
        (GameState::new(&mut rng), rng)
    }

    #[test]
    fn test_scenario_ball_past_left_scores_for_right() {
        let (mut state, mut rng) = new_state();
        state.ball.pos = Vec2::new(12.0, 300.0);
        state.ball.angle = PI;
        // Keep the human paddle out of the way
        state.left.pos.y = 100.0;

        let events = tick(&mut state, &TickInput::default(), DT, &mut rng);

        assert_eq!(state.score, crate::sim::Score { left: 0, right: 1 });
        assert_eq!(
            events,
            vec![GameEvent::PointScored {
                scorer: Side::Right,
                points: 1
            }]
        );
        // Re-served at center
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.left.pos.y, 300.0);
        assert!(!state.burning);
    }

    #[test]
    fn test_scenario_burning_point_applies_before_threshold() {
        let (mut state, mut rng) = new_state();
        state.score.left = 4;
        state.ball.pos = Vec2::new(795.0, 300.0);
        state.ball.angle = 0.0;
        state.right.pos.y = 500.0;

        let events = tick(&mut state, &TickInput::default(), DT, &mut rng);

        assert_eq!(state.score.left, 6);
        assert_eq!(
            events,
            vec![
                GameEvent::PointScored {
                    scorer: Side::Left,
                    points: 2
                },
                GameEvent::MatchWon { winner: Side::Left },
            ]
        );
    }

    #[test]
    fn test_right_side_burning_double() {
        let (mut state, mut rng) = new_state();
        state.score = crate::sim::Score { left: 4, right: 0 };
        state.ball.pos = Vec2::new(11.0, 300.0);
        state.ball.angle = PI;
        state.left.pos.y = 100.0;

        let events = tick(&mut state, &TickInput::default(), DT, &mut rng);

        // Right is awarded 2 because the left side sits on 4
        assert_eq!(state.score.right, 2);
        assert_eq!(events.len(), 1);
        assert!(state.burning);
    }

    #[test]
    fn test_boosted_return_then_ai_resets_speed() {
        let (mut state, mut rng) = new_state();
        state.ball.pos = Vec2::new(50.0, 300.0);
        state.ball.angle = PI;

        let boost = TickInput {
            boost: true,
            ..Default::default()
        };
        let events = tick(&mut state, &boost, DT, &mut rng);
        assert_eq!(
            events,
            vec![GameEvent::PaddleHit {
                side: Side::Left,
                boosted: true
            }]
        );
        assert_eq!(state.ball.speed, BallSpeed::Super);
        assert_eq!(state.ball.tint(), BallTint::Boosted);
        assert!(state.ball.velocity().x > 0.0);

        // Fly until the computer paddle returns it
        state.right.pos.y = state.ball.pos.y;
        let mut returned = false;
        for _ in 0..120 {
            let events = tick(&mut state, &TickInput::default(), DT, &mut rng);
            if events.contains(&GameEvent::PaddleHit {
                side: Side::Right,
                boosted: false,
            }) {
                returned = true;
                break;
            }
        }
        assert!(returned);
        assert_eq!(state.ball.speed, BallSpeed::Normal);
        assert_eq!(state.ball.tint(), BallTint::Default);
    }

    #[test]
    fn test_unboosted_return_is_normal_speed() {
        let (mut state, mut rng) = new_state();
        state.ball.speed = BallSpeed::Super;
        state.ball.pos = Vec2::new(60.0, 300.0);
        state.ball.angle = PI;
        // One super-speed frame moves 20px: leading edge lands at 30, inside the band
        tick(&mut state, &TickInput::default(), DT, &mut rng);
        assert_eq!(state.ball.speed, BallSpeed::Normal);
        assert!(state.ball.velocity().x > 0.0);
    }

    #[test]
    fn test_wall_bounce_emits_event() {
        let (mut state, mut rng) = new_state();
        state.ball.pos = Vec2::new(400.0, 12.0);
        state.ball.angle = -PI / 4.0;

        let events = tick(&mut state, &TickInput::default(), DT, &mut rng);
        assert_eq!(events, vec![GameEvent::WallBounce]);
        assert!(state.ball.top() >= 0.0);
        assert!(state.ball.velocity().y > 0.0);
    }

    #[test]
    fn test_touch_places_paddle_without_clamp() {
        let (mut state, mut rng) = new_state();
        let input = TickInput {
            up: true,
            touch_y: Some(2.0),
            ..Default::default()
        };
        tick(&mut state, &input, DT, &mut rng);
        assert_eq!(state.left.pos.y, 2.0);
    }

    #[test]
    fn test_ai_paddle_follows_sampled_intent() {
        let (mut state, mut rng) = new_state();
        state.ball.pos = Vec2::new(400.0, 500.0);
        state.ball.angle = 0.0;

        // First frames: nothing sampled yet, paddle holds still
        tick(&mut state, &TickInput::default(), 0.06, &mut rng);
        assert_eq!(state.right.pos.y, 300.0);
        assert_eq!(state.right.intent, Intent::Stationary);

        // Sample fires, intent set, position unchanged this frame
        tick(&mut state, &TickInput::default(), 0.06, &mut rng);
        assert_eq!(state.right.intent, Intent::Down);
        assert_eq!(state.right.pos.y, 300.0);

        // Next frame applies it
        tick(&mut state, &TickInput::default(), 0.06, &mut rng);
        assert!((state.right.pos.y - 324.0).abs() < 1e-3);
    }

    #[test]
    fn test_burning_pulse_clock_starts_and_runs() {
        let (mut state, mut rng) = new_state();
        tick(&mut state, &TickInput::default(), DT, &mut rng);
        assert_eq!(state.burning_clock, None);

        state.score.right = 4;
        tick(&mut state, &TickInput::default(), DT, &mut rng);
        assert_eq!(state.burning_clock, Some(0.0));
        assert_eq!(state.burning_alpha, 0);

        tick(&mut state, &TickInput::default(), 0.1, &mut rng);
        assert!(state.burning);
        assert_eq!(state.burning_alpha, burning_alpha(0.1));
        assert!(state.burning_alpha > 0);

        // Leaving burning time keeps the clock running
        state.score.right = 3;
        tick(&mut state, &TickInput::default(), 0.1, &mut rng);
        assert!(!state.burning);
        assert!((state.burning_clock.unwrap_or_default() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_burning_alpha_range() {
        assert_eq!(burning_alpha(0.0), 0);
        assert_eq!(burning_alpha(PI / 10.0), 255);
    }

    proptest! {
        #[test]
        fn prop_keyboard_paddle_stays_in_bounds(
            start in 55.0f32..545.0,
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), 0.0f32..0.1), 1..40),
        ) {
            let (mut state, mut rng) = new_state();
            state.left.pos.y = start;
            for (up, down, dt) in moves {
                let input = TickInput { up, down, ..Default::default() };
                tick(&mut state, &input, dt, &mut rng);
                prop_assert!(state.left.pos.y >= BOUND_MARGIN + PADDLE_HEIGHT / 2.0);
                prop_assert!(state.left.pos.y <= GAME_HEIGHT - BOUND_MARGIN - PADDLE_HEIGHT / 2.0);
                prop_assert!(state.right.pos.y >= BOUND_MARGIN + PADDLE_HEIGHT / 2.0);
                prop_assert!(state.right.pos.y <= GAME_HEIGHT - BOUND_MARGIN - PADDLE_HEIGHT / 2.0);
            }
        }

        #[test]
        fn prop_ball_stays_on_table(
            seed in any::<u64>(),
            frames in proptest::collection::vec(0.001f32..0.05, 1..200),
        ) {
            let mut rng = crate::sim::GameRng::new(seed);
            let mut state = GameState::new(&mut rng);
            for dt in frames {
                let events = tick(&mut state, &TickInput::default(), dt, &mut rng);
                if events.iter().any(|e| matches!(e, GameEvent::MatchWon { .. })) {
                    break;
                }
                prop_assert!(state.ball.pos.y >= 0.0 && state.ball.pos.y <= GAME_HEIGHT);
                prop_assert!(state.ball.pos.x >= 0.0 && state.ball.pos.x <= GAME_WIDTH);
            }
        }

        #[test]
        fn prop_score_only_grows_by_one_or_two(
            seed in any::<u64>(),
            frames in proptest::collection::vec(0.001f32..0.05, 1..300),
        ) {
            let mut rng = crate::sim::GameRng::new(seed);
            let mut state = GameState::new(&mut rng);
            for dt in frames {
                let before = state.score;
                let burning = before.is_burning();
                let events = tick(&mut state, &TickInput::default(), dt, &mut rng);
                let gained = (state.score.left - before.left) + (state.score.right - before.right);
                let expected = if burning { 2 } else { 1 };
                prop_assert!(gained == 0 || gained == expected);
                if events.iter().any(|e| matches!(e, GameEvent::MatchWon { .. })) {
                    break;
                }
            }
        }
    }
}
