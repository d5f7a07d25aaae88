//! Markers travelling along a spline.
//!
//! The caller owns the frame loop and the stop flag; the [`Animator`] only
//! turns elapsed time into spline parameters. Two markers are tracked: the
//! primary one completes a lap in `lap` time, the secondary one runs at
//! `speed_multiplier` times that rate.

use std::time::Duration;

use num_traits::Float;
use tracing::trace;

use super::spline::{wrap_unit, Spline};
use super::vector::{Color, Vector};
use super::{scalar, NativeFloat, EPSILON};

/// The tangent stub drawn at a marker is `1 / TANGENT_STUB_DIVISOR` long.
pub const TANGENT_STUB_DIVISOR: NativeFloat = 5.0;

/// A point on the spline with its color and the tip of a short tangent stub.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Marker<T = NativeFloat> {
    pub t: T,
    pub position: Vector<T>,
    pub color: Color<T>,
    pub tangent_tip: Vector<T>,
}

impl<T: Float> Marker<T> {
    /// Evaluate the marker at global parameter `t`. Returns None for empty splines.
    pub fn at(spline: &Spline<T>, t: T) -> Option<Self> {
        let position = spline.point(t)?;
        let color = spline.color_at(t)?;
        let tangent = spline.tangent(t)?;
        let length = tangent.magnitude();
        let tangent_tip = if length > scalar(EPSILON) {
            position + tangent / (length * scalar(TANGENT_STUB_DIVISOR))
        } else {
            position
        };
        Some(Marker {
            t,
            position,
            color,
            tangent_tip,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Animator<T = NativeFloat> {
    t: T,
    t2: T,
    lap: Duration,
    speed_multiplier: T,
}

impl<T: Float> Animator<T> {
    pub fn new(lap: Duration, speed_multiplier: T) -> Self {
        Animator {
            t: T::zero(),
            t2: T::zero(),
            lap,
            speed_multiplier,
        }
    }

    /// Parameter of the primary marker.
    pub fn t(&self) -> T {
        self.t
    }

    /// Parameter of the secondary marker.
    pub fn t2(&self) -> T {
        self.t2
    }

    pub fn lap(&self) -> Duration {
        self.lap
    }

    pub fn set_lap(&mut self, lap: Duration) {
        self.lap = lap;
    }

    pub fn speed_multiplier(&self) -> T {
        self.speed_multiplier
    }

    pub fn set_speed_multiplier(&mut self, speed_multiplier: T) {
        self.speed_multiplier = speed_multiplier;
    }

    /// Jump the primary marker to `t`, wrapped into `[0, 1)`.
    pub fn seek(&mut self, t: T) {
        self.t = wrap_unit(t);
    }

    /// Move both markers forward by `elapsed`. A zero lap time freezes them.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.lap.is_zero() {
            return;
        }
        let fraction: T = scalar(elapsed.as_secs_f64() / self.lap.as_secs_f64());
        self.t = wrap_unit(self.t + fraction);
        self.t2 = wrap_unit(self.t2 + fraction * self.speed_multiplier);
        trace!(elapsed_secs = elapsed.as_secs_f64(), "animator advanced");
    }

    /// Both markers on `spline`, primary first. Returns None for empty splines.
    pub fn markers(&self, spline: &Spline<T>) -> Option<[Marker<T>; 2]> {
        Some([Marker::at(spline, self.t)?, Marker::at(spline, self.t2)?])
    }
}

impl Default for Animator<NativeFloat> {
    fn default() -> Self {
        Animator::new(Duration::from_secs(10), 1.0)
    }
}
