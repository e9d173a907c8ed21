//! Game mode state machine
//!
//! ```text
//!            start                 score reaches 5
//!   Menu ───────────▶ Playing ─────────────────────▶ GameOver
//!    ▲                                                  │
//!    └──────────── start (scores cleared) ──────────────┘
//! ```
//!
//! Leaving GameOver only returns to the menu, so a fresh match takes two
//! start presses. Quit is accepted in every mode.

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::{GameState, Side};
use super::tick::{GameEvent, TickInput, tick};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::MAX_FRAME_DT;
use crate::platform::time::Clock;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Welcome screen, waiting for start
    Menu,
    /// Rally in progress
    Playing,
    /// Match over, showing the result
    GameOver { winner: Side },
}

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Space press or touch begin
    Start,
    /// Escape or window close
    Quit,
}

/// What the frame loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// A whole play session: current mode, table state and frame clock
pub struct Game<C: Clock> {
    mode: GameMode,
    state: GameState,
    clock: C,
}

impl<C: Clock> Game<C> {
    pub fn new(clock: C, rng: &mut impl RandomSource) -> Self {
        Self {
            mode: GameMode::Menu,
            state: GameState::new(rng),
            clock,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Apply a player command
    pub fn handle(&mut self, command: Command, rng: &mut impl RandomSource) -> Control {
        match command {
            Command::Quit => {
                log::info!("Quit requested");
                Control::Quit
            }
            Command::Start => {
                match self.mode {
                    GameMode::Menu => self.start_match(rng),
                    GameMode::GameOver { .. } => {
                        self.state.score.reset();
                        self.mode = GameMode::Menu;
                        log::info!("Back to menu");
                    }
                    GameMode::Playing => {}
                }
                Control::Continue
            }
        }
    }

    /// Run one frame. Only Playing advances the simulation; the returned
    /// events are empty in the other modes.
    pub fn frame(
        &mut self,
        input: &TickInput,
        rng: &mut impl RandomSource,
        audio: &mut impl AudioSink,
    ) -> Vec<GameEvent> {
        if self.mode != GameMode::Playing {
            return Vec::new();
        }

        let dt = self.clock.restart().min(MAX_FRAME_DT);
        let events = tick(&mut self.state, input, dt, rng);

        for event in &events {
            match *event {
                GameEvent::WallBounce => audio.play(SoundEffect::WallHit),
                GameEvent::PaddleHit { side, boosted } => {
                    if boosted {
                        log::debug!("{side:?} paddle boosted return");
                    }
                    audio.play(SoundEffect::PaddleHit);
                }
                GameEvent::PointScored { scorer, points } => {
                    log::debug!(
                        "{scorer:?} scores {points} ({} - {})",
                        self.state.score.left,
                        self.state.score.right
                    );
                }
                GameEvent::MatchWon { winner } => {
                    log::info!(
                        "Match over, {winner:?} wins {} - {}",
                        self.state.score.left,
                        self.state.score.right
                    );
                    self.mode = GameMode::GameOver { winner };
                }
            }
        }

        events
    }

    fn start_match(&mut self, rng: &mut impl RandomSource) {
        self.state.serve(rng);
        self.state.burning = false;
        self.clock.restart();
        self.mode = GameMode::Playing;
        log::info!("Match started");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::time::ManualClock;
    use crate::sim::rng::ScriptedRng;
    use crate::sim::state::{BallSpeed, Score};
    use glam::Vec2;
    use std::f32::consts::PI;

    fn new_game() -> (Game<ManualClock>, ScriptedRng) {
        let mut rng = ScriptedRng::new(&[], &[]);
        (Game::new(ManualClock::default(), &mut rng), rng)
    }

    /// Advance the clock by `dt` and run a frame
    fn step(
        game: &mut Game<ManualClock>,
        rng: &mut ScriptedRng,
        input: &TickInput,
        dt: f32,
    ) -> (Vec<GameEvent>, Vec<SoundEffect>) {
        let mut sounds = Vec::new();
        game.clock_mut().advance(dt);
        let events = game.frame(input, rng, &mut sounds);
        (events, sounds)
    }

    #[test]
    fn test_starts_in_menu_and_ignores_frames() {
        let (mut game, mut rng) = new_game();
        assert_eq!(game.mode(), GameMode::Menu);
        let (events, _) = step(&mut game, &mut rng, &TickInput::default(), 1.0);
        assert!(events.is_empty());
        assert_eq!(game.state().ball.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_start_serves_and_restarts_clock() {
        let (mut game, mut rng) = new_game();
        game.state.ball.pos = Vec2::new(5.0, 5.0);
        game.state.ball.speed = BallSpeed::Super;
        // Time spent on the menu must not leak into the first frame
        game.clock_mut().advance(30.0);

        assert_eq!(game.handle(Command::Start, &mut rng), Control::Continue);
        assert_eq!(game.mode(), GameMode::Playing);
        assert_eq!(game.state().ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(game.state().ball.speed, BallSpeed::Normal);

        step(&mut game, &mut rng, &TickInput::default(), 0.01);
        assert!((game.state().ball.pos.x - 406.0).abs() < 1e-3);
    }

    #[test]
    fn test_frame_delta_is_clamped() {
        let (mut game, mut rng) = new_game();
        game.handle(Command::Start, &mut rng);
        step(&mut game, &mut rng, &TickInput::default(), 5.0);
        assert!((game.state().ball.pos.x - 460.0).abs() < 1e-3);
    }

    #[test]
    fn test_start_while_playing_is_ignored() {
        let (mut game, mut rng) = new_game();
        game.handle(Command::Start, &mut rng);
        step(&mut game, &mut rng, &TickInput::default(), 0.05);
        let x = game.state().ball.pos.x;
        game.handle(Command::Start, &mut rng);
        assert_eq!(game.mode(), GameMode::Playing);
        assert_eq!(game.state().ball.pos.x, x);
    }

    #[test]
    fn test_point_keeps_playing() {
        let (mut game, mut rng) = new_game();
        game.handle(Command::Start, &mut rng);
        game.state.ball.pos = Vec2::new(12.0, 300.0);
        game.state.ball.angle = PI;
        game.state.left.pos.y = 100.0;

        let (events, _) = step(&mut game, &mut rng, &TickInput::default(), 1.0 / 60.0);
        assert_eq!(events.len(), 1);
        assert_eq!(game.state().score, Score { left: 0, right: 1 });
        assert_eq!(game.mode(), GameMode::Playing);
    }

    #[test]
    fn test_winning_point_ends_match() {
        let (mut game, mut rng) = new_game();
        game.handle(Command::Start, &mut rng);
        game.state.score = Score { left: 4, right: 0 };
        game.state.ball.pos = Vec2::new(12.0, 300.0);
        game.state.ball.angle = PI;
        game.state.left.pos.y = 100.0;

        step(&mut game, &mut rng, &TickInput::default(), 1.0 / 60.0);
        assert_eq!(game.state().score.right, 2);
        assert_eq!(game.mode(), GameMode::Playing);

        game.state.score.right = 4;
        game.state.ball.pos = Vec2::new(12.0, 300.0);
        game.state.ball.angle = PI;
        game.state.left.pos.y = 100.0;
        step(&mut game, &mut rng, &TickInput::default(), 1.0 / 60.0);
        assert_eq!(game.state().score.right, 6);
        assert_eq!(game.mode(), GameMode::GameOver { winner: Side::Right });

        // Frozen until the player acts
        let (events, _) = step(&mut game, &mut rng, &TickInput::default(), 1.0 / 60.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_game_over_needs_two_starts() {
        let (mut game, mut rng) = new_game();
        game.mode = GameMode::GameOver { winner: Side::Left };
        game.state.score = Score { left: 5, right: 3 };

        game.handle(Command::Start, &mut rng);
        assert_eq!(game.mode(), GameMode::Menu);
        assert_eq!(game.state().score, Score::default());

        game.handle(Command::Start, &mut rng);
        assert_eq!(game.mode(), GameMode::Playing);
    }

    #[test]
    fn test_quit_from_any_mode() {
        let (mut game, mut rng) = new_game();
        assert_eq!(game.handle(Command::Quit, &mut rng), Control::Quit);
        game.handle(Command::Start, &mut rng);
        assert_eq!(game.handle(Command::Quit, &mut rng), Control::Quit);
        game.mode = GameMode::GameOver { winner: Side::Right };
        assert_eq!(game.handle(Command::Quit, &mut rng), Control::Quit);
    }

    #[test]
    fn test_bounces_trigger_sounds() {
        let (mut game, mut rng) = new_game();
        game.handle(Command::Start, &mut rng);
        game.state.ball.pos = Vec2::new(400.0, 12.0);
        game.state.ball.angle = -PI / 4.0;
        let (_, sounds) = step(&mut game, &mut rng, &TickInput::default(), 1.0 / 60.0);
        assert_eq!(sounds, vec![SoundEffect::WallHit]);

        game.state.ball.pos = Vec2::new(50.0, 300.0);
        game.state.ball.angle = PI;
        let (_, sounds) = step(&mut game, &mut rng, &TickInput::default(), 1.0 / 60.0);
        assert_eq!(sounds, vec![SoundEffect::PaddleHit]);
    }
}
