//! Eased interpolation of the ruler offsets.

use std::time::Duration;

use crate::geometry::{Offsets, ANIMATION_DURATION};

/// Easing curve applied to animation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Accelerate then decelerate, cubic Bézier (0.42, 0, 0.58, 1).
    #[default]
    EaseInOut,
    /// Jump straight to the target.
    Instant,
}

impl Easing {
    /// Applies the curve to a progress value in `0..=1`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Easing::Instant => 1.0,
        }
    }
}

/// Evaluates a CSS style timing curve through (0,0), (x1,y1), (x2,y2), (1,1)
/// at horizontal position `x`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let sample = |a1: f64, a2: f64, t: f64| {
        let u = 1.0 - t;
        3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
    };
    let slope = |a1: f64, a2: f64, t: f64| {
        let u = 1.0 - t;
        3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    };

    let mut t = x;
    for _ in 0..8 {
        let err = sample(x1, x2, t) - x;
        if err.abs() < 1e-7 {
            return sample(y1, y2, t);
        }
        let d = slope(x1, x2, t);
        if d.abs() < 1e-6 {
            break;
        }
        t -= err / d;
    }

    // Newton stalled, fall back to bisection
    let (mut lo, mut hi) = (0.0, 1.0);
    t = x;
    for _ in 0..50 {
        let v = sample(x1, x2, t);
        if (v - x).abs() < 1e-7 {
            break;
        }
        if v < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    sample(y1, y2, t)
}

/// A single animated scalar.
#[derive(Debug, Clone)]
pub struct Tween {
    current: f64,
    start: f64,
    target: f64,
    /// 0..=1
    progress: f64,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    pub fn new(value: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            current: value,
            start: value,
            target: value,
            progress: 1.0,
            duration,
            easing,
        }
    }

    pub fn value(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Starts animating from the current value toward `target`. Setting the
    /// target that is already being approached leaves the tween untouched.
    pub fn set_target(&mut self, target: f64) {
        if (target - self.target).abs() > 1e-9 {
            self.start = self.current;
            self.target = target;
            self.progress = 0.0;
        }
    }

    pub fn set_immediate(&mut self, value: f64) {
        self.current = value;
        self.start = value;
        self.target = value;
        self.progress = 1.0;
    }

    /// Advances the tween by `dt`.
    pub fn update(&mut self, dt: Duration) {
        if self.progress >= 1.0 {
            return;
        }

        if self.duration.is_zero() {
            self.progress = 1.0;
        } else {
            self.progress += dt.as_secs_f64() / self.duration.as_secs_f64();
        }
        self.progress = self.progress.min(1.0);

        let eased = self.easing.apply(self.progress);
        self.current = self.start + (self.target - self.start) * eased;

        if self.progress >= 1.0 {
            self.current = self.target;
        }
    }
}

/// Animates the highlight and arrow offsets together.
#[derive(Debug, Clone)]
pub struct OffsetAnimator {
    highlight: Tween,
    arrow: Tween,
}

impl OffsetAnimator {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            highlight: Tween::new(0.0, duration, easing),
            arrow: Tween::new(0.0, duration, easing),
        }
    }

    pub fn retarget(&mut self, offsets: Offsets) {
        self.highlight.set_target(offsets.highlight);
        self.arrow.set_target(offsets.arrow);
    }

    pub fn jump_to(&mut self, offsets: Offsets) {
        self.highlight.set_immediate(offsets.highlight);
        self.arrow.set_immediate(offsets.arrow);
    }

    pub fn update(&mut self, dt: Duration) {
        self.highlight.update(dt);
        self.arrow.update(dt);
    }

    pub fn current(&self) -> Offsets {
        Offsets {
            highlight: self.highlight.value(),
            arrow: self.arrow.value(),
        }
    }

    pub fn target(&self) -> Offsets {
        Offsets {
            highlight: self.highlight.target(),
            arrow: self.arrow.target(),
        }
    }

    pub fn is_animating(&self) -> bool {
        !self.highlight.is_complete() || !self.arrow.is_complete()
    }
}

impl Default for OffsetAnimator {
    fn default() -> Self {
        Self::new(ANIMATION_DURATION, Easing::EaseInOut)
    }
}
