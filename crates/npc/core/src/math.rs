//! Minimal 3D vector math.
//!
//! Only the operations the decision layers need: distances, directions and
//! dot products on the ground plane. No rotation or matrix support.

use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// Clamps a value into `[0, 1]`. NaN maps to 0.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// A point or direction in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or zero for a (near) zero vector.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON { Self::ZERO } else { self / len }
    }

    /// Moves from `self` toward `target` by at most `max_step`.
    pub fn step_toward(self, target: Self, max_step: f32) -> Self {
        let delta = target - self;
        let distance = delta.length();
        if distance <= max_step || distance <= f32::EPSILON {
            target
        } else {
            self + delta / distance * max_step
        }
    }

    /// Arithmetic mean of a set of points, `None` when empty.
    pub fn centroid<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut sum = Self::ZERO;
        let mut count = 0usize;
        for point in points {
            sum += point;
            count += 1;
        }
        (count > 0).then(|| sum / count as f32)
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_zero_stays_zero() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
        let unit = Vec3::new(3.0, 0.0, 4.0).normalized();
        assert!((unit.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn step_toward_clamps_to_target() {
        let start = Vec3::ZERO;
        let target = Vec3::new(10.0, 0.0, 0.0);
        assert_eq!(start.step_toward(target, 4.0), Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(start.step_toward(target, 40.0), target);
    }

    #[test]
    fn centroid_of_points() {
        let c = Vec3::centroid([Vec3::new(2.0, 0.0, 0.0), Vec3::new(4.0, 0.0, 2.0)]);
        assert_eq!(c, Some(Vec3::new(3.0, 0.0, 1.0)));
        assert_eq!(Vec3::centroid(core::iter::empty()), None);
    }

    #[test]
    fn clamp_unit_bounds() {
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(f32::NAN), 0.0);
    }
}
