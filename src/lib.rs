//! Headless core of an interactive piecewise cubic Bézier spline editor.
//!
//! A [`Spline`] is an ordered list of [`CubicBezierCurve`] segments sharing one
//! global parameter `t` in `[0, 1)`. Segments cache their power-basis
//! coefficients so evaluation is a handful of multiply-adds, and the spline
//! keeps a flat array of sampled points and colors ready to be handed to a
//! renderer. Continuity between adjacent segments can be checked or enforced
//! ([`Continuity`]), markers can be stepped along the curve ([`Animator`]) and
//! the control point set round-trips through a small OBJ-like text format
//! ([`obj`]).
//!
//! ```rust
//! use bezier_editor::{Continuity, CubicBezierCurve, Spline, Vector};
//!
//! let mut spline: Spline = Spline::new(64);
//! spline.add_curve(CubicBezierCurve::new(
//!     Vector::new(-0.75, 0.9, -0.5),
//!     Vector::new(-0.25, 0.9, 0.0),
//!     Vector::new(0.25, 0.5, 0.0),
//!     Vector::new(0.75, 0.9, 0.5),
//! ));
//! spline.add_curve(CubicBezierCurve::new(
//!     Vector::new(0.8, 0.8, 0.5),
//!     Vector::new(0.9, 0.2, 0.0),
//!     Vector::new(0.2, -0.5, 0.0),
//!     Vector::new(-0.5, -0.6, 0.0),
//! ));
//! spline.enforce(Continuity::C1);
//! assert!(spline.is_continuous(Continuity::C1, 1e-9));
//! assert_eq!(spline.sampled_points().len(), 128);
//! ```

use num_traits::Float;

pub mod animation;
pub mod config;
pub mod continuity;
pub mod cubic_bezier;
pub mod error;
pub mod obj;
pub mod roots;
pub mod spline;
pub mod vector;

pub use animation::{Animator, Marker};
pub use config::EditorConfig;
pub use continuity::Continuity;
pub use cubic_bezier::CubicBezierCurve;
pub use error::{Error, Result};
pub use spline::Spline;
pub use vector::{Color, Vector};

/// Scalar type used when none is given explicitly.
pub type NativeFloat = f64;

const EPSILON: NativeFloat = 1e-10;

/// Converts a native literal into the scalar type `T`.
#[inline]
pub(crate) fn scalar<T: Float>(value: NativeFloat) -> T {
    T::from(value).unwrap_or_else(T::nan)
}
