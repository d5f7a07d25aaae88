use num_traits::Float;

use super::roots::roots_in_unit_interval;
use super::vector::{Color, Vector};
use super::{scalar, NativeFloat};

/// A cubic Bezier curve defined by four points: the starting point, two successive
/// control points and the ending point, each with an RGB color.
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * P0 + 3 * (1 - t)² * t * P1 + 3 * t² * (1 - t) * P2 + t³ * P3```
///
/// The Bernstein form is converted to the power basis
/// `P(t) = c0 + c1 * t + c2 * t² + c3 * t³` once per edit, so evaluating a
/// point or a derivative costs a fixed handful of multiply-adds. The control
/// points are private and every mutator recomputes the coefficients.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicBezierCurve<T = NativeFloat> {
    control_points: [Vector<T>; 4],
    colors: [Color<T>; 4],
    coefficients: [Vector<T>; 4],
}

impl<T> CubicBezierCurve<T>
where
    T: Float,
{
    /// Create a curve from its four control points, all colored white.
    pub fn new(p0: Vector<T>, p1: Vector<T>, p2: Vector<T>, p3: Vector<T>) -> Self {
        let white = Color::new(T::one(), T::one(), T::one());
        Self::with_colors([p0, p1, p2, p3], [white; 4])
    }

    pub fn with_colors(control_points: [Vector<T>; 4], colors: [Color<T>; 4]) -> Self {
        CubicBezierCurve {
            control_points,
            colors,
            coefficients: power_basis(&control_points),
        }
    }

    /// Create a curve whose four control points all share `color`.
    pub fn with_color(control_points: [Vector<T>; 4], color: Color<T>) -> Self {
        Self::with_colors(control_points, [color; 4])
    }

    pub fn control_points(&self) -> &[Vector<T>; 4] {
        &self.control_points
    }

    pub fn control_point(&self, index: usize) -> Option<Vector<T>> {
        self.control_points.get(index).copied()
    }

    pub fn colors(&self) -> &[Color<T>; 4] {
        &self.colors
    }

    pub fn start(&self) -> Vector<T> {
        self.control_points[0]
    }

    pub fn end(&self) -> Vector<T> {
        self.control_points[3]
    }

    /// Power-basis coefficients `[c0, c1, c2, c3]`.
    pub fn coefficients(&self) -> &[Vector<T>; 4] {
        &self.coefficients
    }

    /// Evaluate the curve at `t`. The parameter is not clamped, values outside
    /// `[0, 1]` extrapolate the polynomial.
    pub fn point(&self, t: T) -> Vector<T> {
        let [c0, c1, c2, c3] = self.coefficients;
        let t2 = t * t;
        let t3 = t2 * t;
        c0 + c1 * t + c2 * t2 + c3 * t3
    }

    /// First derivative `P'(t) = c1 + 2 * c2 * t + 3 * c3 * t²`.
    pub fn tangent(&self, t: T) -> Vector<T> {
        let [_, c1, c2, c3] = self.coefficients;
        c1 + c2 * (scalar::<T>(2.0) * t) + c3 * (scalar::<T>(3.0) * t * t)
    }

    /// Second derivative `P''(t) = 2 * c2 + 6 * c3 * t`.
    pub fn second_derivative(&self, t: T) -> Vector<T> {
        let [_, _, c2, c3] = self.coefficients;
        c2 * scalar(2.0) + c3 * (scalar::<T>(6.0) * t)
    }

    /// Blend the control point colors with the same cubic Bernstein weights
    /// used for the positions.
    pub fn color_at(&self, t: T) -> Color<T> {
        let three: T = scalar(3.0);
        let one_t = T::one() - t;
        let [k0, k1, k2, k3] = self.colors;
        k0 * (one_t * one_t * one_t)
            + k1 * (three * one_t * one_t * t)
            + k2 * (three * one_t * t * t)
            + k3 * (t * t * t)
    }

    /// Replace control point `index` (0..=3) and recompute the coefficients.
    /// Returns false and leaves the curve untouched for any other index.
    pub fn change_control_point(&mut self, index: usize, point: Vector<T>) -> bool {
        match self.control_points.get_mut(index) {
            Some(slot) => {
                *slot = point;
                self.coefficients = power_basis(&self.control_points);
                true
            }
            None => false,
        }
    }

    /// Replace the color of control point `index` (0..=3).
    pub fn change_control_color(&mut self, index: usize, color: Color<T>) -> bool {
        match self.colors.get_mut(index) {
            Some(slot) => {
                *slot = color;
                true
            }
            None => false,
        }
    }

    /// Return the bounding box of the curve over `t ∈ [0, 1]` as an array of
    /// (min, max) tuples for the x, y and z axes.
    pub fn bounding_box(&self) -> [(T, T); 3]
    where
        T: Default,
    {
        let [_, c1, c2, c3] = self.coefficients;
        let start = self.start().to_array();
        let end = self.end().to_array();
        let (a, b, c) = (
            (c3 * scalar(3.0)).to_array(),
            (c2 * scalar(2.0)).to_array(),
            c1.to_array(),
        );

        let mut bounds = [(T::zero(), T::zero()); 3];
        for (dim, bound) in bounds.iter_mut().enumerate() {
            // Only the endpoints and the extrema of P(t) can form a boundary,
            // the inner control points usually lie outside the curve.
            let mut min = start[dim].min(end[dim]);
            let mut max = start[dim].max(end[dim]);
            for root in roots_in_unit_interval(a[dim], b[dim], c[dim]) {
                let value = self.point(root).to_array()[dim];
                min = min.min(value);
                max = max.max(value);
            }
            *bound = (min, max);
        }
        bounds
    }
}

/// Bernstein to power basis conversion for a cubic.
fn power_basis<T: Float>(p: &[Vector<T>; 4]) -> [Vector<T>; 4] {
    let three: T = scalar(3.0);
    let six: T = scalar(6.0);
    [
        p[0],
        (p[1] - p[0]) * three,
        p[0] * three - p[1] * six + p[2] * three,
        p[3] - p[0] + (p[1] - p[2]) * three,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EPSILON;
    use approx::assert_abs_diff_eq;

    fn sample_curve() -> CubicBezierCurve {
        CubicBezierCurve::new(
            Vector::new(0.0, 1.77, 0.0),
            Vector::new(1.1, -1.0, 0.5),
            Vector::new(4.3, 3.0, -0.25),
            Vector::new(3.2, -4.0, 1.0),
        )
    }

    fn bernstein(curve: &CubicBezierCurve, t: f64) -> Vector {
        let [p0, p1, p2, p3] = *curve.control_points();
        let one_t = 1.0 - t;
        p0 * (one_t * one_t * one_t)
            + p1 * (3.0 * t * one_t * one_t)
            + p2 * (3.0 * t * t * one_t)
            + p3 * (t * t * t)
    }

    #[test]
    fn endpoints_are_interpolated() {
        let p = Vector::new(0.5, -0.5, 2.0);
        let curves = [
            sample_curve(),
            // all four points coincide
            CubicBezierCurve::new(p, p, p, p),
            // collinear, handles overshooting the end points
            CubicBezierCurve::new(
                Vector::new(0.0, 0.0, 0.0),
                Vector::new(-1.0, -1.0, -1.0),
                Vector::new(4.0, 4.0, 4.0),
                Vector::new(3.0, 3.0, 3.0),
            ),
            // closed loop
            CubicBezierCurve::new(
                Vector::new(1.0, 1.0, 0.0),
                Vector::new(5.0, 0.0, 0.0),
                Vector::new(0.0, 5.0, 0.0),
                Vector::new(1.0, 1.0, 0.0),
            ),
            // non-planar
            CubicBezierCurve::new(
                Vector::new(-7.5, 2.25, 9.0),
                Vector::new(3.0, -8.0, -4.5),
                Vector::new(6.125, 0.5, 1.0),
                Vector::new(-2.0, 11.0, -6.75),
            ),
        ];
        for curve in curves {
            assert!(curve.point(0.0).approx_eq(curve.start(), EPSILON));
            assert!(curve.point(1.0).approx_eq(curve.end(), EPSILON));
            assert_abs_diff_eq!(curve.point(0.0).w, 1.0);
            assert_abs_diff_eq!(curve.point(1.0).w, 1.0);
        }
    }

    #[test]
    fn power_basis_matches_bernstein_form() {
        let curve = sample_curve();
        let nsteps = 1000;
        for t in 0..=nsteps {
            let t = t as f64 / nsteps as f64;
            let err = curve.point(t) - bernstein(&curve, t);
            assert!(err.squared_magnitude() < EPSILON);
        }
    }

    #[test]
    fn tangent_matches_finite_difference() {
        let curve = sample_curve();
        let h = 1e-6;
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let fd = (curve.point(t + h) - curve.point(t - h)) / (2.0 * h);
            let analytic = curve.tangent(t);
            assert!(fd.approx_eq(analytic, 1e-5), "t = {t}: {fd:?} vs {analytic:?}");
            assert_abs_diff_eq!(analytic.w, 0.0);
        }
    }

    #[test]
    fn second_derivative_matches_finite_difference() {
        let curve = sample_curve();
        let h = 1e-5;
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let fd = (curve.tangent(t + h) - curve.tangent(t - h)) / (2.0 * h);
            assert!(fd.approx_eq(curve.second_derivative(t), 1e-5));
        }
    }

    #[test]
    fn endpoint_tangents_follow_handles() {
        let curve = sample_curve();
        let [p0, p1, p2, p3] = *curve.control_points();
        assert!(curve.tangent(0.0).approx_eq((p1 - p0) * 3.0, EPSILON));
        assert!(curve.tangent(1.0).approx_eq((p3 - p2) * 3.0, 1e-9));
    }

    #[test]
    fn extrapolates_outside_unit_interval() {
        let curve = sample_curve();
        let t = 1.5;
        assert!(curve.point(t).approx_eq(bernstein(&curve, t), 1e-9));
        let t = -0.5;
        assert!(curve.point(t).approx_eq(bernstein(&curve, t), 1e-9));
    }

    #[test]
    fn changing_a_control_point_recomputes_coefficients() {
        let mut curve = sample_curve();
        let moved = Vector::new(-2.0, 0.0, 3.0);
        assert!(curve.change_control_point(2, moved));
        assert_eq!(curve.control_point(2), Some(moved));
        let rebuilt = CubicBezierCurve::with_colors(*curve.control_points(), *curve.colors());
        assert_eq!(curve.coefficients(), rebuilt.coefficients());
        assert!(curve.point(0.5).approx_eq(bernstein(&curve, 0.5), EPSILON));
    }

    #[test]
    fn out_of_range_edits_are_ignored() {
        let mut curve = sample_curve();
        let before = curve;
        assert!(!curve.change_control_point(4, Vector::origin()));
        assert!(!curve.change_control_color(7, Color::origin()));
        assert_eq!(curve, before);
        assert_eq!(curve.control_point(4), None);
    }

    #[test]
    fn colors_blend_between_endpoints() {
        let red = Color::new(1.0, 0.0, 0.0);
        let blue = Color::new(0.0, 0.0, 1.0);
        let curve = CubicBezierCurve::with_colors(
            *sample_curve().control_points(),
            [red, red, blue, blue],
        );
        assert!(curve.color_at(0.0).approx_eq(red, EPSILON));
        assert!(curve.color_at(1.0).approx_eq(blue, EPSILON));
        assert!(curve.color_at(0.5).approx_eq(Color::new(0.5, 0.0, 0.5), EPSILON));
    }

    #[test]
    fn circle_approximation_error() {
        // control points chosen for minimum radial distance error
        // according to: http://spencermortensen.com/articles/bezier-circle/
        let c = 0.551915024494;
        let max_error = 0.019608 * 0.01;
        let quadrant = CubicBezierCurve::new(
            Vector::new(0.0, 1.0, 0.0),
            Vector::new(c, 1.0, 0.0),
            Vector::new(1.0, c, 0.0),
            Vector::new(1.0, 0.0, 0.0),
        );
        let nsteps = 1000;
        for t in 0..=nsteps {
            let t = t as f64 / nsteps as f64;
            let radius = quadrant.point(t).magnitude();
            assert!((radius - 1.0).abs() <= max_error);
        }
    }

    #[test]
    fn bounding_box_contains() {
        let curve = sample_curve();
        let bounds = curve.bounding_box();
        let max_err = 1e-9;
        let nsteps = 200;
        for t in 0..=nsteps {
            let p = curve.point(t as f64 / nsteps as f64).to_array();
            for (dim, value) in p.iter().enumerate() {
                assert!(*value >= bounds[dim].0 - max_err && *value <= bounds[dim].1 + max_err);
            }
        }
        // x overshoots the end point, y is bounded by its endpoints
        assert!(bounds[0].1 > 3.2);
        assert_abs_diff_eq!(bounds[1].0, -4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(bounds[1].1, 1.77, epsilon = 1e-12);
    }
}
