//! Keyboard and touch input
//!
//! Browser events are folded into an [`InputState`]: held keys and the
//! active touch become a [`TickInput`] each frame, presses become
//! [`Command`]s queued for the mode machine.

use glam::Vec2;

use crate::sim::{Command, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    /// Space: starts a match and boosts returns while held
    Space,
    Escape,
    /// Toggle sound
    Mute,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Key> {
        match key {
            "ArrowUp" | "Up" => Some(Key::Up),
            "ArrowDown" | "Down" => Some(Key::Down),
            " " | "Spacebar" => Some(Key::Space),
            "Escape" | "Esc" => Some(Key::Escape),
            "m" | "M" => Some(Key::Mute),
            _ => None,
        }
    }
}

/// How the player is driving the game; decides the on-screen prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlScheme {
    #[default]
    Keyboard,
    Touch,
}

/// Accumulated input between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    up: bool,
    down: bool,
    space: bool,
    touch: Option<Vec2>,
    commands: Vec<Command>,
    mute_toggles: u32,
    scheme: ControlScheme,
}

impl InputState {
    pub fn key_down(&mut self, key: Key) {
        self.scheme = ControlScheme::Keyboard;
        match key {
            Key::Up => self.up = true,
            Key::Down => self.down = true,
            Key::Space => {
                // Auto-repeat must not count as a second press
                if !self.space {
                    self.commands.push(Command::Start);
                }
                self.space = true;
            }
            Key::Escape => self.commands.push(Command::Quit),
            Key::Mute => self.mute_toggles += 1,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Up => self.up = false,
            Key::Down => self.down = false,
            Key::Space => self.space = false,
            Key::Escape | Key::Mute => {}
        }
    }

    /// First finger down, already in game coordinates
    pub fn touch_start(&mut self, pos: Vec2) {
        self.scheme = ControlScheme::Touch;
        self.commands.push(Command::Start);
        self.touch = Some(pos);
    }

    pub fn touch_move(&mut self, pos: Vec2) {
        self.touch = Some(pos);
    }

    pub fn touch_end(&mut self) {
        self.touch = None;
    }

    /// Forget everything held (window lost focus)
    pub fn release_all(&mut self) {
        self.up = false;
        self.down = false;
        self.space = false;
        self.touch = None;
    }

    /// Window close: queue a quit
    pub fn close_requested(&mut self) {
        self.commands.push(Command::Quit);
    }

    /// Commands queued since the last call, oldest first
    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Number of mute toggles since the last call
    pub fn take_mute_toggles(&mut self) -> u32 {
        std::mem::take(&mut self.mute_toggles)
    }

    pub fn scheme(&self) -> ControlScheme {
        self.scheme
    }

    /// Held state for this frame's simulation step
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            up: self.up,
            down: self.down,
            boost: self.space,
            touch_y: self.touch.map(|p| p.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_dom("ArrowDown"), Some(Key::Down));
        assert_eq!(Key::from_dom(" "), Some(Key::Space));
        assert_eq!(Key::from_dom("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_dom("M"), Some(Key::Mute));
        assert_eq!(Key::from_dom("q"), None);
    }

    #[test]
    fn test_space_is_start_and_boost() {
        let mut input = InputState::default();
        input.key_down(Key::Space);
        input.key_down(Key::Space); // auto-repeat
        assert_eq!(input.drain_commands(), vec![Command::Start]);
        assert!(input.tick_input().boost);

        input.key_up(Key::Space);
        assert!(!input.tick_input().boost);
        input.key_down(Key::Space);
        assert_eq!(input.drain_commands(), vec![Command::Start]);
    }

    #[test]
    fn test_held_arrows() {
        let mut input = InputState::default();
        input.key_down(Key::Up);
        input.key_down(Key::Down);
        let tick = input.tick_input();
        assert!(tick.up && tick.down);
        input.key_up(Key::Up);
        assert!(!input.tick_input().up);
        assert!(input.drain_commands().is_empty());
    }

    #[test]
    fn test_touch_flow() {
        let mut input = InputState::default();
        input.touch_start(Vec2::new(30.0, 120.0));
        assert_eq!(input.scheme(), ControlScheme::Touch);
        assert_eq!(input.drain_commands(), vec![Command::Start]);
        assert_eq!(input.tick_input().touch_y, Some(120.0));

        input.touch_move(Vec2::new(30.0, 200.0));
        assert_eq!(input.tick_input().touch_y, Some(200.0));
        input.touch_end();
        assert_eq!(input.tick_input().touch_y, None);
    }

    #[test]
    fn test_escape_and_close_quit() {
        let mut input = InputState::default();
        input.key_down(Key::Escape);
        input.close_requested();
        assert_eq!(input.drain_commands(), vec![Command::Quit, Command::Quit]);
    }

    #[test]
    fn test_release_all_on_blur() {
        let mut input = InputState::default();
        input.key_down(Key::Down);
        input.key_down(Key::Space);
        input.release_all();
        assert_eq!(input.tick_input(), TickInput::default());
    }

    #[test]
    fn test_mute_toggles() {
        let mut input = InputState::default();
        input.key_down(Key::Mute);
        input.key_down(Key::Mute);
        assert_eq!(input.take_mute_toggles(), 2);
        assert_eq!(input.take_mute_toggles(), 0);
    }
}
