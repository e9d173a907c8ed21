//! Monotonic frame clocks

/// Frame-granularity stopwatch
pub trait Clock {
    /// Seconds since the last restart
    fn elapsed(&self) -> f32;
    /// Restart, returning the seconds that had elapsed
    fn restart(&mut self) -> f32;
}

/// Wall-clock stopwatch backed by [`std::time::Instant`]
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct Stopwatch {
    started: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for Stopwatch {
    fn default() -> Self {
        Self {
            started: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for Stopwatch {
    fn elapsed(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    fn restart(&mut self) -> f32 {
        let now = std::time::Instant::now();
        let elapsed = now.duration_since(self.started).as_secs_f32();
        self.started = now;
        elapsed
    }
}

/// Browser stopwatch backed by `performance.now()`
#[cfg(target_arch = "wasm32")]
pub struct PerformanceClock {
    performance: web_sys::Performance,
    started_ms: f64,
}

#[cfg(target_arch = "wasm32")]
impl PerformanceClock {
    pub fn new(performance: web_sys::Performance) -> Self {
        let started_ms = performance.now();
        Self {
            performance,
            started_ms,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for PerformanceClock {
    fn elapsed(&self) -> f32 {
        ((self.performance.now() - self.started_ms) / 1000.0) as f32
    }

    fn restart(&mut self) -> f32 {
        let now = self.performance.now();
        let elapsed = ((now - self.started_ms) / 1000.0) as f32;
        self.started_ms = now;
        elapsed
    }
}

/// Synthetic clock advanced by hand (tests, headless demo)
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    since_restart: f32,
}

impl ManualClock {
    pub fn advance(&mut self, dt: f32) {
        self.since_restart += dt;
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> f32 {
        self.since_restart
    }

    fn restart(&mut self) -> f32 {
        std::mem::take(&mut self.since_restart)
    }
}

/// Seed for the game RNG, taken once at startup from the wall clock
#[cfg(target_arch = "wasm32")]
pub fn time_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Seed for the game RNG, taken once at startup from the wall clock
#[cfg(not(target_arch = "wasm32"))]
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
