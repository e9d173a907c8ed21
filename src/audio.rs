//! Sound effects
//!
//! The simulation reports bounces as events; whoever drives the frame loop
//! hands them to an [`AudioSink`]. Playback is fire-and-forget and never
//! blocks a frame. In the browser the bounce blips are synthesized with the
//! Web Audio API, so there are no sound files to load.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a paddle
    PaddleHit,
    /// Ball hits the top or bottom cushion
    WallHit,
}

/// Anything that can play a sound effect
pub trait AudioSink {
    /// Start `effect`. Retriggering while a previous bounce is still
    /// sounding restarts it.
    fn play(&mut self, effect: SoundEffect);
}

/// Collects effects instead of playing them
impl AudioSink for Vec<SoundEffect> {
    fn play(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

/// Silent sink for headless runs; traces each effect
#[derive(Debug, Default)]
pub struct LogAudio {
    played: u64,
}

impl LogAudio {
    /// Effects played so far
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.played += 1;
        log::trace!("sound: {effect:?}");
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        /// Volume and mute state currently in force
        settings: Settings,
        /// Bounce currently sounding, stopped when the next one starts
        current: Option<OscillatorNode>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                settings: Settings::default(),
                current: None,
            }
        }

        /// Pick up volume and mute preferences
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.settings = settings.clone();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.settings.muted = muted;
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short falling blip; paddles thump lower than the cushions
        fn blip(ctx: &AudioContext, vol: f32, from: f32, to: f32, len: f64) -> Option<OscillatorNode> {
            let (osc, gain) = Self::create_osc(ctx, from, OscillatorType::Sine)?;
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + len)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + len)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + len + 0.05).ok();
            Some(osc)
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.settings.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            if let Some(previous) = self.current.take() {
                let _ = previous.stop();
            }

            self.current = match effect {
                SoundEffect::PaddleHit => Self::blip(ctx, vol * 0.6, 220.0, 90.0, 0.1),
                SoundEffect::WallHit => Self::blip(ctx, vol * 0.35, 440.0, 300.0, 0.08),
            };
        }
    }
}
