//! Time-based tweens driven by explicit ticks.
//!
//! Nothing here owns a clock. The caller advances tweens with elapsed time, so a
//! dropped tween simply stops and can never fire late.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Progress curve applied to linear time.
pub enum Easing {
    /// Decelerating quadratic.
    QuadOut,
    /// Accelerating cubic.
    CubicIn,
    /// Decelerating cubic.
    CubicOut,
}

impl Easing {
    #[must_use]
    /// Maps linear progress `t` in `0..=1` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::QuadOut => 1.0 - (1.0 - t).powi(2),
            Self::CubicIn => t.powi(3),
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Interpolates one value from `from` to `to` over `duration`.
pub struct Tween {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Tween {
    #[must_use]
    /// A tween that has not started yet.
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    #[must_use]
    /// Linear progress in `0..=1`.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }

    #[must_use]
    /// Current eased value.
    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.easing.apply(self.progress())
    }

    #[must_use]
    /// Whether the tween has reached its end value.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Moves time forward by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Panel offset and backdrop opacity animated together.
pub struct Timeline {
    /// Panel offset from its resting position, in pixels.
    pub panel: Tween,
    /// Backdrop opacity.
    pub backdrop: Tween,
    paused: bool,
}

impl Timeline {
    #[must_use]
    /// A running timeline over both tracks.
    pub fn new(panel: Tween, backdrop: Tween) -> Self {
        Self {
            panel,
            backdrop,
            paused: false,
        }
    }

    /// Stops time for both tracks.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Lets time run again.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    #[must_use]
    /// Whether ticks are currently ignored.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Moves both tracks forward unless paused.
    pub fn advance(&mut self, dt: Duration) {
        if !self.paused {
            self.panel.advance(dt);
            self.backdrop.advance(dt);
        }
    }

    #[must_use]
    /// Whether both tracks are done.
    pub fn is_finished(&self) -> bool {
        self.panel.is_finished() && self.backdrop.is_finished()
    }
}
