//! Animation clock.
//!
//! The clock hands the frame scheduler one elapsed-time value per frame.
//! Elapsed time is accumulated from scaled frame deltas rather than
//! recomputed from the start instant, so it never runs backwards, even when
//! the time scale changes or the clock is paused and resumed. The running
//! total is a [`Duration`]; it is narrowed to `f32` only when read, so long
//! sessions keep advancing at full frame resolution.
//!
//! ```
//! use wavefield::time::Clock;
//! use std::time::Duration;
//!
//! let mut clock = Clock::new();
//! clock.advance(Duration::from_millis(500));
//! clock.set_time_scale(2.0);
//! clock.advance(Duration::from_millis(500));
//! assert!((clock.elapsed() - 1.5).abs() < 1e-6);
//! ```

use std::time::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_millis(500);

/// Frame timing: elapsed seconds, delta, frame count and a smoothed FPS.
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
    elapsed: Duration,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frames: u64,
    fps_window: Duration,
    paused: bool,
    time_scale: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            elapsed: Duration::ZERO,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frames: 0,
            fps_window: Duration::ZERO,
            paused: false,
            time_scale: 1.0,
        }
    }

    /// Advance by the wall time since the previous tick. Call once per frame.
    ///
    /// Returns the new elapsed time in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = now.duration_since(self.last_tick);
        self.last_tick = now;
        self.advance(raw)
    }

    /// Advance by an explicit wall-clock delta.
    ///
    /// While paused the frame still counts but elapsed time stands still.
    pub fn advance(&mut self, raw: Duration) -> f32 {
        self.frame_count += 1;
        self.update_fps(raw);

        if self.paused {
            self.delta_secs = 0.0;
        } else {
            let scaled = raw.mul_f64(f64::from(self.time_scale));
            self.delta_secs = scaled.as_secs_f32();
            self.elapsed = self.elapsed.saturating_add(scaled);
        }
        self.elapsed()
    }

    fn update_fps(&mut self, raw: Duration) {
        self.fps_frames += 1;
        self.fps_window += raw;
        if self.fps_window >= FPS_WINDOW {
            self.fps = self.fps_frames as f32 / self.fps_window.as_secs_f32();
            self.fps_frames = 0;
            self.fps_window = Duration::ZERO;
        }
    }

    /// Scaled seconds since the clock started, excluding paused time.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Scaled time since the clock started at full precision.
    #[inline]
    pub fn elapsed_duration(&self) -> Duration {
        self.elapsed
    }

    /// Scaled seconds covered by the last tick.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second over the last half-second window of wall time.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set the time scale multiplier. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Restart from zero, keeping pause state and time scale.
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
        self.elapsed = Duration::ZERO;
        self.delta_secs = 0.0;
        self.frame_count = 0;
        self.fps = 0.0;
        self.fps_frames = 0;
        self.fps_window = Duration::ZERO;
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
