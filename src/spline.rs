//! Ordered sequence of cubic Bezier segments sharing one global parameter.

use core::slice;

use num_traits::Float;
use tracing::{debug, trace};

use super::cubic_bezier::CubicBezierCurve;
use super::vector::{Color, Vector};
use super::NativeFloat;

/// Samples per curve for a freshly created spline.
pub const DEFAULT_SAMPLES_PER_CURVE: usize = 150;

/// A piecewise cubic Bezier spline.
///
/// The global parameter `t` in `[0, 1)` is split evenly across the curves:
/// with `n` curves, curve `i` covers `[i/n, (i+1)/n)`.
///
/// Besides the curves the spline keeps flat arrays of sampled points and
/// colors for rendering. They are *not* refreshed automatically when curves
/// are added or replaced; call [`Spline::sample`] after editing. After a
/// sample pass `sampled_points().len() == samples_per_curve() * len()`.
#[derive(Clone, Debug, PartialEq)]
pub struct Spline<T = NativeFloat> {
    pub(crate) curves: Vec<CubicBezierCurve<T>>,
    samples_per_curve: usize,
    points: Vec<Vector<T>>,
    colors: Vec<Color<T>>,
}

impl<T> Spline<T>
where
    T: Float,
{
    /// Create an empty spline sampling each curve `samples_per_curve` times
    /// (at least once).
    pub fn new(samples_per_curve: usize) -> Self {
        Spline {
            curves: Vec::new(),
            samples_per_curve: samples_per_curve.max(1),
            points: Vec::new(),
            colors: Vec::new(),
        }
    }

    pub fn from_curves(curves: Vec<CubicBezierCurve<T>>, samples_per_curve: usize) -> Self {
        let mut spline = Self::new(samples_per_curve);
        spline.curves = curves;
        spline
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn curves(&self) -> slice::Iter<'_, CubicBezierCurve<T>> {
        self.curves.iter()
    }

    pub fn samples_per_curve(&self) -> usize {
        self.samples_per_curve
    }

    /// Change the sampling density and resample right away.
    pub fn set_samples_per_curve(&mut self, samples_per_curve: usize) {
        self.samples_per_curve = samples_per_curve.max(1);
        self.sample();
    }

    /// Append a curve. The sample arrays are stale until the next [`Spline::sample`].
    pub fn add_curve(&mut self, curve: CubicBezierCurve<T>) {
        self.curves.push(curve);
        trace!(curves = self.curves.len(), "curve added");
    }

    pub fn curve(&self, index: usize) -> Option<&CubicBezierCurve<T>> {
        self.curves.get(index)
    }

    /// Replace the curve at `index`. Returns false for an out of range index.
    pub fn update_curve(&mut self, index: usize, curve: CubicBezierCurve<T>) -> bool {
        match self.curves.get_mut(index) {
            Some(slot) => {
                *slot = curve;
                true
            }
            None => false,
        }
    }

    /// Number of control points, four per curve.
    pub fn control_point_count(&self) -> usize {
        self.curves.len() * 4
    }

    /// Control point by global index `curve * 4 + point`.
    pub fn control_point(&self, index: usize) -> Option<Vector<T>> {
        self.curves
            .get(index / 4)
            .and_then(|curve| curve.control_point(index % 4))
    }

    /// Move the control point with global index `curve * 4 + point` and
    /// resample the span of the affected curve. Returns false when out of range.
    pub fn update_point(&mut self, index: usize, point: Vector<T>) -> bool {
        let curve_index = index / 4;
        let moved = match self.curves.get_mut(curve_index) {
            Some(curve) => curve.change_control_point(index % 4, point),
            None => false,
        };
        if moved {
            self.resample_curve(curve_index);
        }
        moved
    }

    /// Map a global parameter onto `(curve index, local parameter)`.
    /// Values outside `[0, 1)` wrap around. Returns None for empty splines
    /// and non-finite parameters.
    pub fn segment_parameter(&self, t: T) -> Option<(usize, T)> {
        let count = self.curves.len();
        if count == 0 {
            return None;
        }

        let wrapped = wrap_unit(t);
        let count_t = T::from(count)?;
        let scaled = wrapped * count_t;
        let index = scaled.floor().to_usize()?.min(count - 1);
        let local = scaled - T::from(index)?;
        Some((index, local))
    }

    /// Evaluate the spline at the global parameter `t`.
    pub fn point(&self, t: T) -> Option<Vector<T>> {
        let (index, local_t) = self.segment_parameter(t)?;
        Some(self.curves[index].point(local_t))
    }

    /// Derivative of the active curve with respect to its local parameter.
    pub fn tangent(&self, t: T) -> Option<Vector<T>> {
        let (index, local_t) = self.segment_parameter(t)?;
        Some(self.curves[index].tangent(local_t))
    }

    pub fn color_at(&self, t: T) -> Option<Color<T>> {
        let (index, local_t) = self.segment_parameter(t)?;
        Some(self.curves[index].color_at(local_t))
    }

    /// Recompute the flat point and color arrays for every curve.
    pub fn sample(&mut self) {
        let n = self.samples_per_curve;
        self.points.clear();
        self.colors.clear();
        self.points.reserve(n * self.curves.len());
        self.colors.reserve(n * self.curves.len());
        for curve in &self.curves {
            for i in 0..n {
                let t = sample_parameter::<T>(i, n);
                self.points.push(curve.point(t));
                self.colors.push(curve.color_at(t));
            }
        }
        debug!(
            curves = self.curves.len(),
            samples = self.points.len(),
            "spline sampled"
        );
    }

    /// Recompute the samples of a single curve, falling back to a full pass
    /// when the arrays do not match the current curve count.
    fn resample_curve(&mut self, index: usize) {
        let n = self.samples_per_curve;
        if self.points.len() != n * self.curves.len() || self.colors.len() != self.points.len() {
            self.sample();
            return;
        }
        let curve = self.curves[index];
        let span = index * n..(index + 1) * n;
        for (i, (point, color)) in self.points[span.clone()]
            .iter_mut()
            .zip(self.colors[span].iter_mut())
            .enumerate()
        {
            let t = sample_parameter::<T>(i, n);
            *point = curve.point(t);
            *color = curve.color_at(t);
        }
        trace!(curve = index, "curve resampled");
    }

    pub fn sampled_points(&self) -> &[Vector<T>] {
        &self.points
    }

    pub fn sampled_colors(&self) -> &[Color<T>] {
        &self.colors
    }

    /// Find the first control point within `radius` of `point`, searching the
    /// most recently added curve first. Returns the global control point index.
    pub fn index_control_point(&self, radius: T, point: Vector<T>) -> Option<usize> {
        for (curve_index, curve) in self.curves.iter().enumerate().rev() {
            for (c, control) in curve.control_points().iter().enumerate() {
                if point.distance(*control) <= radius {
                    return Some(curve_index * 4 + c);
                }
            }
        }
        None
    }

    /// Return the bounding box across all curves. Returns None for empty splines.
    pub fn bounding_box(&self) -> Option<[(T, T); 3]>
    where
        T: Default,
    {
        let mut iter = self.curves.iter();
        let mut bounds = iter.next()?.bounding_box();
        for curve in iter {
            let curve_bounds = curve.bounding_box();
            for (bound, other) in bounds.iter_mut().zip(curve_bounds) {
                bound.0 = bound.0.min(other.0);
                bound.1 = bound.1.max(other.1);
            }
        }
        Some(bounds)
    }
}

impl<T: Float> Default for Spline<T> {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLES_PER_CURVE)
    }
}

/// Wrap `t` into `[0, 1)` by its fractional part; the sign is dropped, so
/// `-0.25` lands on `0.25`.
pub(crate) fn wrap_unit<T: Float>(t: T) -> T {
    t.abs() % T::one()
}

/// Local parameter of sample `i` out of `n`; the last sample lands exactly on `t = 1`.
fn sample_parameter<T: Float>(i: usize, n: usize) -> T {
    if i + 1 >= n {
        return T::one();
    }
    T::from(i).unwrap_or_else(T::zero) / T::from(n).unwrap_or_else(T::one)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EPSILON;

    fn curve(x0: f64) -> CubicBezierCurve {
        CubicBezierCurve::new(
            Vector::new(x0, 0.0, 0.0),
            Vector::new(x0 + 0.25, 1.0, 0.0),
            Vector::new(x0 + 0.75, 1.0, 0.0),
            Vector::new(x0 + 1.0, 0.0, 0.0),
        )
    }

    fn two_curves() -> Spline {
        let mut spline = Spline::new(8);
        spline.add_curve(curve(0.0));
        spline.add_curve(curve(1.0));
        spline
    }

    #[test]
    fn empty_spline_has_no_points() {
        let spline: Spline = Spline::default();
        assert!(spline.is_empty());
        assert_eq!(spline.samples_per_curve(), DEFAULT_SAMPLES_PER_CURVE);
        assert_eq!(spline.point(0.5), None);
        assert_eq!(spline.tangent(0.5), None);
        assert_eq!(spline.bounding_box(), None);
        assert_eq!(spline.index_control_point(1.0, Vector::origin()), None);
    }

    #[test]
    fn global_parameter_maps_onto_segments() {
        let spline = two_curves();
        assert_eq!(spline.segment_parameter(0.0), Some((0, 0.0)));
        assert_eq!(spline.segment_parameter(0.25), Some((0, 0.5)));
        assert_eq!(spline.segment_parameter(0.5), Some((1, 0.0)));
        assert_eq!(spline.segment_parameter(0.75), Some((1, 0.5)));
        assert!(spline
            .point(0.75)
            .unwrap()
            .approx_eq(curve(1.0).point(0.5), EPSILON));
    }

    #[test]
    fn out_of_range_parameters_wrap() {
        let spline = two_curves();
        assert_eq!(spline.segment_parameter(1.0), Some((0, 0.0)));
        assert_eq!(spline.segment_parameter(1.25), Some((0, 0.5)));
        assert_eq!(spline.segment_parameter(-0.25), Some((0, 0.5)));
        assert_eq!(spline.segment_parameter(-1.75), Some((1, 0.5)));
        assert_eq!(spline.segment_parameter(f64::NAN), None);
    }

    #[test]
    fn negative_parameters_mirror_positive_ones() {
        let mut spline: Spline = Spline::new(4);
        spline.add_curve(CubicBezierCurve::new(
            Vector::new(0.0, 0.0, 0.0),
            Vector::new(1.0, 0.0, 0.0),
            Vector::new(2.0, 0.0, 0.0),
            Vector::new(3.0, 0.0, 0.0),
        ));
        for t in [0.25, 0.6, 1.4] {
            assert_eq!(spline.point(-t), spline.point(t));
            assert_eq!(spline.tangent(-t), spline.tangent(t));
            assert_eq!(spline.color_at(-t), spline.color_at(t));
        }
        assert!(spline.point(-0.25).unwrap().approx_eq(Vector::new(0.75, 0.0, 0.0), EPSILON));
    }

    #[test]
    fn sampling_is_explicit() {
        let mut spline = two_curves();
        assert!(spline.sampled_points().is_empty());
        spline.sample();
        assert_eq!(spline.sampled_points().len(), 16);
        assert_eq!(spline.sampled_colors().len(), 16);

        spline.add_curve(curve(2.0));
        assert_eq!(spline.sampled_points().len(), 16);
        spline.sample();
        assert_eq!(spline.sampled_points().len(), 24);
    }

    #[test]
    fn last_sample_of_each_curve_is_its_end_point() {
        let mut spline = two_curves();
        spline.sample();
        let points = spline.sampled_points();
        assert!(points[0].approx_eq(curve(0.0).start(), EPSILON));
        assert!(points[7].approx_eq(curve(0.0).end(), EPSILON));
        assert!(points[8].approx_eq(curve(1.0).start(), EPSILON));
        assert!(points[15].approx_eq(curve(1.0).end(), EPSILON));
        assert!(points[1].approx_eq(curve(0.0).point(1.0 / 8.0), EPSILON));
    }

    #[test]
    fn changing_density_resamples() {
        let mut spline = two_curves();
        spline.set_samples_per_curve(3);
        assert_eq!(spline.sampled_points().len(), 6);
        spline.set_samples_per_curve(0);
        assert_eq!(spline.samples_per_curve(), 1);
        assert_eq!(spline.sampled_points().len(), 2);
        assert!(spline.sampled_points()[0].approx_eq(curve(0.0).end(), EPSILON));
    }

    #[test]
    fn update_curve_ignores_bad_index() {
        let mut spline = two_curves();
        assert!(!spline.update_curve(2, curve(5.0)));
        assert!(spline.update_curve(1, curve(5.0)));
        assert_eq!(spline.curve(1), Some(&curve(5.0)));
        assert_eq!(spline.curve(2), None);
    }

    #[test]
    fn update_point_moves_and_resamples_span() {
        let mut spline = two_curves();
        spline.sample();
        let target = Vector::new(3.0, -1.0, 0.5);
        assert!(spline.update_point(7, target));
        assert_eq!(spline.control_point(7), Some(target));
        assert_eq!(spline.curve(1).map(|c| c.end()), Some(target));
        assert!(spline.sampled_points()[15].approx_eq(target, EPSILON));
        assert!(spline.sampled_points()[7].approx_eq(curve(0.0).end(), EPSILON));
        assert!(!spline.update_point(8, target));
    }

    #[test]
    fn update_point_before_sampling_fills_every_span() {
        let mut spline = two_curves();
        assert!(spline.sampled_points().is_empty());
        let target = Vector::new(0.0, 2.0, 0.0);
        assert!(spline.update_point(0, target));
        assert_eq!(
            spline.sampled_points().len(),
            spline.samples_per_curve() * spline.len()
        );
        assert_eq!(spline.sampled_colors().len(), spline.sampled_points().len());
        assert!(spline.sampled_points()[0].approx_eq(target, EPSILON));
        assert!(spline.sampled_points()[15].approx_eq(curve(1.0).end(), EPSILON));
    }

    #[test]
    fn picking_prefers_latest_curve() {
        let spline = two_curves();
        // (1, 0, 0) is both the end of curve 0 and the start of curve 1
        let shared = Vector::new(1.0, 0.0, 0.0);
        assert_eq!(spline.index_control_point(0.1, shared), Some(4));
        let near_first = Vector::new(0.26, 0.98, 0.0);
        assert_eq!(spline.index_control_point(0.1, near_first), Some(1));
        assert_eq!(spline.index_control_point(0.01, near_first), None);
        assert_eq!(
            spline.index_control_point(0.1, Vector::new(10.0, 10.0, 0.0)),
            None
        );
    }

    #[test]
    fn bounds_union_over_curves() {
        let spline = two_curves();
        let bounds = spline.bounding_box().unwrap();
        assert!((bounds[0].0 - 0.0).abs() < EPSILON);
        assert!((bounds[0].1 - 2.0).abs() < EPSILON);
        assert!((bounds[1].0 - 0.0).abs() < EPSILON);
        assert!((bounds[1].1 - 0.75).abs() < EPSILON);
    }
}
