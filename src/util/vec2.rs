use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub};

/// 2D vector for snake positions and velocities
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const RIGHT: Vec2 = Vec2 { x: 1.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn length_sq(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn distance_to(&self, other: Vec2) -> f32 {
        (*self - other).length()
    }

    #[inline]
    pub fn distance_sq_to(&self, other: Vec2) -> f32 {
        (*self - other).length_sq()
    }

    /// Rotate in place by `angle` radians using the standard rotation matrix.
    ///
    /// Magnitude is preserved up to floating point error; an angle of zero
    /// leaves the vector untouched.
    #[inline]
    pub fn rotate(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let (x, y) = (self.x, self.y);
        self.x = cos * x - sin * y;
        self.y = sin * x + cos * y;
    }

    /// Copying variant of [`Vec2::rotate`]
    #[inline]
    pub fn rotated(mut self, angle: f32) -> Self {
        self.rotate(angle);
        self
    }

    /// Rescale in place to exactly `new_length`, keeping direction.
    ///
    /// The vector must not be zero. Snake velocities are validated at spawn
    /// and rotation keeps them non-zero, so this is never checked at runtime
    /// in release builds.
    #[inline]
    pub fn normalize_to(&mut self, new_length: f32) {
        let len = self.length();
        debug_assert!(len > 0.0, "normalize_to called on a zero vector");
        let k = new_length / len;
        self.x *= k;
        self.y *= k;
    }

    /// Check if vector is approximately zero
    pub fn is_zero(&self, epsilon: f32) -> bool {
        self.x.abs() < epsilon && self.y.abs() < epsilon
    }

    /// Check if all components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Check if vector is approximately equal to another
    pub fn approx_eq(&self, other: Vec2, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}
