use std::time::Duration;

use crate::core::Color;
use crate::core::area::AreaVertex;
use crate::core::band::BandTransform;

/// Values that can be blended linearly between two states.
pub trait Interpolate: Clone {
    /// Returns the value at `t` in `[0, 1]`; `t = 0` is `self`.
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Color {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self.lerp(*to, t)
    }
}

impl Interpolate for BandTransform {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self {
            scale_y: self.scale_y.interpolate(&to.scale_y, t),
            translate_y: self.translate_y.interpolate(&to.translate_y, t),
        }
    }
}

/// Shapes blend vertex by vertex; shapes with different vertex counts have no
/// meaningful correspondence and jump straight to the target.
impl Interpolate for Vec<AreaVertex> {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        if self.len() != to.len() || t >= 1.0 {
            return to.clone();
        }
        self.iter()
            .zip(to)
            .map(|(from, to)| from.lerp(*to, t))
            .collect()
    }
}

/// Linear, time-driven transition of one attribute.
///
/// Time only moves through [`Tween::advance`], which keeps animation
/// deterministic for hosts and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    elapsed: Duration,
    duration: Duration,
}

impl<T: Interpolate> Tween<T> {
    /// A tween already resting at `value`.
    #[must_use]
    pub fn settled(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    /// A tween starting at `from` and heading to `to`.
    #[must_use]
    pub fn between(from: T, to: T, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Restarts toward `to` from wherever the tween currently is.
    pub fn retarget(&mut self, to: T, duration: Duration) {
        self.from = self.value();
        self.to = to;
        self.elapsed = Duration::ZERO;
        self.duration = duration;
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_nanos() as f64 / self.duration.as_nanos() as f64).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[must_use]
    pub fn value(&self) -> T {
        let t = self.progress();
        if t >= 1.0 {
            return self.to.clone();
        }
        self.from.interpolate(&self.to, t)
    }

    #[must_use]
    pub fn target(&self) -> &T {
        &self.to
    }
}
