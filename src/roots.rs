//! Polynomial root helpers using `tinyvec::ArrayVec`.
//!
//! Available functions:
//! - `quadratic_roots()`
//! - `roots_in_unit_interval()`
use num_traits::Float;
use tinyvec::ArrayVec;

use crate::{scalar, EPSILON};

/// Real roots of `a*t^2 + b*t + c = 0`, degrading to the linear case when `a`
/// vanishes. A double root is reported once.
pub fn quadratic_roots<T>(a: T, b: T, c: T) -> ArrayVec<[T; 2]>
where
    T: Float + Default,
{
    let mut result = ArrayVec::new();
    let eps: T = scalar(EPSILON);

    if a.abs() < eps {
        if b.abs() < eps {
            // constant, no solutions
            return result;
        }
        result.push(-c / b);
        return result;
    }

    let two: T = scalar(2.0);
    let delta = b * b - a * c * scalar(4.0);
    if delta > eps {
        let sqrt_delta = delta.sqrt();
        result.push((-b - sqrt_delta) / (a * two));
        result.push((-b + sqrt_delta) / (a * two));
    } else if delta.abs() <= eps {
        result.push(-b / (a * two));
    }
    result
}

/// Like [`quadratic_roots`] but only keeps roots strictly inside `(0, 1)`.
pub fn roots_in_unit_interval<T>(a: T, b: T, c: T) -> ArrayVec<[T; 2]>
where
    T: Float + Default,
{
    let mut roots = quadratic_roots(a, b, c);
    roots.retain(|root| *root > T::zero() && *root < T::one());
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_distinct_roots() {
        // (t - 1)(t - 3)
        let roots = quadratic_roots(1.0, -4.0, 3.0);
        assert_eq!(roots.len(), 2);
        assert!((roots[0] - 1.0).abs() < EPSILON);
        assert!((roots[1] - 3.0).abs() < EPSILON);
    }

    #[test]
    fn double_root_reported_once() {
        // (t - 0.5)^2
        let roots = quadratic_roots(1.0, -1.0, 0.25);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 0.5).abs() < EPSILON);
    }

    #[test]
    fn degenerate_to_linear_and_constant() {
        let linear = quadratic_roots(0.0, 2.0, -1.0);
        assert_eq!(linear.as_slice(), &[0.5]);
        assert!(quadratic_roots(0.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn no_real_roots() {
        assert!(quadratic_roots(1.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn unit_interval_filter() {
        // roots at 0.25 and 2.0
        let roots = roots_in_unit_interval(1.0, -2.25, 0.5);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 0.25).abs() < EPSILON);
    }
}
