//! Homogeneous 3D vector used for control points, directions and colors.
//!
//! Points carry `w = 1`, directions `w = 0`. The operators are plain
//! homogeneous arithmetic (the `w` component is added, subtracted and scaled
//! like the others) so affine combinations of points stay points and the
//! difference of two points is a direction. Lengths, dot and cross products
//! only look at `x`, `y` and `z`.

use core::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::Float;

use crate::NativeFloat;

/// A point, direction or color with generic float components.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector<T = NativeFloat> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

/// RGB color stored in `x`, `y`, `z` with components in `[0, 1]`.
pub type Color<T = NativeFloat> = Vector<T>;

impl<T: Float> Vector<T> {
    /// Creates a point (`w = 1`).
    pub fn new(x: T, y: T, z: T) -> Self {
        Vector { x, y, z, w: T::one() }
    }

    /// Creates a direction (`w = 0`).
    pub fn direction(x: T, y: T, z: T) -> Self {
        Vector { x, y, z, w: T::zero() }
    }

    pub fn with_w(x: T, y: T, z: T, w: T) -> Self {
        Vector { x, y, z, w }
    }

    /// The point at the origin.
    pub fn origin() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    pub fn squared_magnitude(&self) -> T {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Euclidean length of the `xyz` part.
    pub fn magnitude(&self) -> T {
        self.squared_magnitude().sqrt()
    }

    pub fn dot(&self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product; the result is a direction.
    pub fn cross(&self, other: Self) -> Self {
        Vector::direction(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Divides by the magnitude. A zero vector yields non-finite components.
    pub fn normalized(&self) -> Self {
        *self / self.magnitude()
    }

    pub fn distance(&self, other: Self) -> T {
        (*self - other).magnitude()
    }

    /// Linear interpolation, `self` at `t = 0` and `other` at `t = 1`.
    pub fn lerp(&self, other: Self, t: T) -> Self {
        *self + (other - *self) * t
    }

    pub fn cosine_between(&self, other: Self) -> T {
        self.normalized().dot(other.normalized())
    }

    /// Angle between the two vectors in radians.
    pub fn angle_between(&self, other: Self) -> T {
        let cos = self.cosine_between(other);
        cos.max(-T::one()).min(T::one()).acos()
    }

    /// Component-wise comparison of `xyz` with an absolute tolerance.
    pub fn approx_eq(&self, other: Self, tolerance: T) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    pub fn to_array(&self) -> [T; 3] {
        [self.x, self.y, self.z]
    }
}

impl<T: Float> Default for Vector<T> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<T: Float> From<[T; 3]> for Vector<T> {
    fn from(xyz: [T; 3]) -> Self {
        Vector::new(xyz[0], xyz[1], xyz[2])
    }
}

impl<T: Float> Add for Vector<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Vector {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w,
        }
    }
}

impl<T: Float> Sub for Vector<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Vector {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w: self.w - other.w,
        }
    }
}

impl<T: Float> Mul<T> for Vector<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
            w: self.w * rhs,
        }
    }
}

impl<T: Float> Div<T> for Vector<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        self * (T::one() / rhs)
    }
}

impl<T: Float> Neg for Vector<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Vector {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w,
        }
    }
}
