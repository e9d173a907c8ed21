//! Error types
//!
//! Only startup can fail for real: the frame loop itself has no fallible
//! operations once the canvas, GPU device and audio are in place.

use thiserror::Error;

/// Fatal problems while bringing the game up. The entry point logs these
/// and aborts before the first frame.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("no browser window available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("canvas element `{0}` not found or not a canvas")]
    NoCanvas(String),
    #[error("failed to create rendering surface: {0}")]
    Surface(String),
    #[error("no suitable graphics adapter: {0}")]
    NoAdapter(String),
    #[error("failed to create graphics device: {0}")]
    Device(String),
}

/// Problems reading a settings file. Never fatal: callers fall back to
/// defaults.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
