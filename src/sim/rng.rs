//! Randomness for serves and paddle returns
//!
//! The simulation only ever asks for whole degrees, so tests can script the
//! exact sequence with [`ScriptedRng`]-style stubs.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{MAX_PADDLE_JITTER, MIN_SERVE_COS};
use crate::degrees_to_radians;

/// Source of the two random draws the game makes
pub trait RandomSource {
    /// Uniform whole degree in [0, 360)
    fn angle_degrees(&mut self) -> u32;
    /// Uniform whole degree in [0, MAX_PADDLE_JITTER)
    fn jitter_degrees(&mut self) -> u32;
}

/// Seeded PCG generator used in real play
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn angle_degrees(&mut self) -> u32 {
        self.rng.random_range(0..360)
    }

    fn jitter_degrees(&mut self) -> u32 {
        self.rng.random_range(0..MAX_PADDLE_JITTER)
    }
}

/// Serve heading in radians; redraws until the serve is not too steep
pub fn serve_angle(rng: &mut impl RandomSource) -> f32 {
    loop {
        let angle = degrees_to_radians(rng.angle_degrees());
        if angle.cos().abs() >= MIN_SERVE_COS {
            return angle;
        }
    }
}

/// Paddle reflection jitter in radians, in [0°, 20°)
pub fn jitter(rng: &mut impl RandomSource) -> f32 {
    (rng.jitter_degrees() % MAX_PADDLE_JITTER) as f32 * std::f32::consts::PI / 180.0
}

/// Plays back fixed draws, then zeros
#[cfg(test)]
pub(crate) struct ScriptedRng {
    angles: std::collections::VecDeque<u32>,
    jitters: std::collections::VecDeque<u32>,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(angles: &[u32], jitters: &[u32]) -> Self {
        Self {
            angles: angles.iter().copied().collect(),
            jitters: jitters.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn angle_degrees(&mut self) -> u32 {
        self.angles.pop_front().unwrap_or(0)
    }

    fn jitter_degrees(&mut self) -> u32 {
        self.jitters.pop_front().unwrap_or(0)
    }
}
