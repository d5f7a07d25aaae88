//! Continuity classes between adjacent curves of a [`Spline`].
//!
//! For a predecessor `P` and successor `Q` the classes are:
//! - `C0`/`G0`: `Q0 = P3`
//! - `C1`: C0 and `Q1 - Q0 = P3 - P2` (equal first derivatives)
//! - `C2`: C1 and `Q0 - 2 Q1 + Q2 = P1 - 2 P2 + P3` (equal second derivatives)
//! - `G1`: C0 and `Q1 - Q0` points the same way as `P3 - P2`
//!
//! Enforcement walks the curves in order and only moves control points of the
//! successor, so each pair is fixed against an already fixed predecessor.

use core::fmt;
use core::str::FromStr;

use num_traits::Float;
use tracing::{debug, warn};

use super::cubic_bezier::CubicBezierCurve;
use super::error::Error;
use super::spline::Spline;
use super::vector::Vector;
use super::{scalar, EPSILON};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Continuity {
    C0,
    C1,
    C2,
    G0,
    G1,
}

impl Continuity {
    pub const ALL: [Continuity; 5] = [
        Continuity::C0,
        Continuity::C1,
        Continuity::C2,
        Continuity::G0,
        Continuity::G1,
    ];

    /// Move control points of `next` so the pair satisfies `self`.
    /// Returns false when the pair could only be made C0, which happens for
    /// G1 when the incoming handle of `prev` has zero length.
    pub fn apply<T: Float>(self, prev: &CubicBezierCurve<T>, next: &mut CubicBezierCurve<T>) -> bool {
        let [_, p1, p2, p3] = *prev.control_points();
        next.change_control_point(0, p3);
        let handle = p3 - p2;

        match self {
            Continuity::C0 | Continuity::G0 => true,
            Continuity::C1 => {
                next.change_control_point(1, next.start() + handle);
                true
            }
            Continuity::C2 => {
                next.change_control_point(1, next.start() + handle);
                next.change_control_point(2, p1 + handle * scalar(4.0));
                true
            }
            Continuity::G1 => {
                let length = handle.magnitude();
                if length <= scalar(EPSILON) {
                    return false;
                }
                let mut reach = (next.control_points()[1] - next.start()).magnitude();
                if reach <= scalar(EPSILON) {
                    reach = length;
                }
                next.change_control_point(1, next.start() + handle / length * reach);
                true
            }
        }
    }

    /// Check whether the pair satisfies `self` within an absolute tolerance.
    pub fn holds<T: Float>(self, prev: &CubicBezierCurve<T>, next: &CubicBezierCurve<T>, tolerance: T) -> bool {
        let [_, p1, p2, p3] = *prev.control_points();
        let [q0, q1, q2, _] = *next.control_points();
        let c0 = p3.approx_eq(q0, tolerance);

        match self {
            Continuity::C0 | Continuity::G0 => c0,
            Continuity::C1 => c0 && first_derivative_matches(p2, p3, q0, q1, tolerance),
            Continuity::C2 => {
                let two: T = scalar(2.0);
                let six: T = scalar(6.0);
                let outgoing = (p1 - p2 * two + p3) * six;
                let incoming = (q0 - q1 * two + q2) * six;
                c0 && first_derivative_matches(p2, p3, q0, q1, tolerance)
                    && outgoing.approx_eq(incoming, tolerance)
            }
            Continuity::G1 => {
                let outgoing = p3 - p2;
                let incoming = q1 - q0;
                let eps: T = scalar(EPSILON);
                c0 && outgoing.magnitude() > eps
                    && incoming.magnitude() > eps
                    && outgoing
                        .normalized()
                        .approx_eq(incoming.normalized(), tolerance)
            }
        }
    }
}

fn first_derivative_matches<T: Float>(
    p2: Vector<T>,
    p3: Vector<T>,
    q0: Vector<T>,
    q1: Vector<T>,
    tolerance: T,
) -> bool {
    let three: T = scalar(3.0);
    ((p3 - p2) * three).approx_eq((q1 - q0) * three, tolerance)
}

impl fmt::Display for Continuity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Continuity::C0 => "C0",
            Continuity::C1 => "C1",
            Continuity::C2 => "C2",
            Continuity::G0 => "G0",
            Continuity::G1 => "G1",
        };
        f.write_str(name)
    }
}

impl FromStr for Continuity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "c0" => Ok(Continuity::C0),
            "c1" => Ok(Continuity::C1),
            "c2" => Ok(Continuity::C2),
            "g0" => Ok(Continuity::G0),
            "g1" => Ok(Continuity::G1),
            _ => Err(Error::UnknownContinuity(s.to_owned())),
        }
    }
}

impl<T> Spline<T>
where
    T: Float,
{
    /// Make every adjacent pair satisfy `kind`, editing the curves front to
    /// back, then resample. Splines with fewer than two curves are left alone.
    #[tracing::instrument(skip(self))]
    pub fn enforce(&mut self, kind: Continuity) {
        if self.curves.len() < 2 {
            return;
        }
        let mut skipped = 0usize;
        for i in 1..self.curves.len() {
            let prev = self.curves[i - 1];
            if !kind.apply(&prev, &mut self.curves[i]) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            warn!(skipped, "degenerate handles, pairs left C0 only");
        }
        debug!(curves = self.curves.len(), "continuity enforced");
        self.sample();
    }

    /// True when every adjacent pair satisfies `kind`. Trivially true for
    /// fewer than two curves.
    pub fn is_continuous(&self, kind: Continuity, tolerance: T) -> bool {
        self.curves
            .windows(2)
            .all(|pair| kind.holds(&pair[0], &pair[1], tolerance))
    }

    /// All classes the spline currently satisfies.
    pub fn continuity_classes(&self, tolerance: T) -> Vec<Continuity> {
        Continuity::ALL
            .into_iter()
            .filter(|kind| self.is_continuous(*kind, tolerance))
            .collect()
    }
}
