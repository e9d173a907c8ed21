//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (frame clocks, seeding)
//! - Input events (keyboard and touch to game commands)
//! - View rescaling (canvas pixels to game coordinates)

pub mod input;
pub mod time;
pub mod view;

pub use input::{ControlScheme, InputState, Key};
pub use time::{Clock, ManualClock, time_seed};
pub use view::Viewport;
