use std::f32::consts::{PI, TAU};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use common::{Vec2, Vec3};

/// Everything a behaviour needs from a 2D or 3D vector. Orientations are scalar angles in radians,
/// 0 facing +Y (+Z in 3D) and increasing anticlockwise.
pub trait Vector:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f32, Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + 'static
{
    const ZERO: Self;

    fn dot(self, other: Self) -> f32;

    fn length_squared(self) -> f32 {
        self.dot(self)
    }

    fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    fn distance(self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero vector. Never NaN
    fn normalize_or_zero(self) -> Self {
        let len2 = self.length_squared();
        if len2 > 0.0 {
            self * len2.sqrt().recip()
        } else {
            Self::ZERO
        }
    }

    /// Rescales to exactly `max` if longer, otherwise unchanged
    fn limit(self, max: f32) -> Self {
        let len2 = self.length_squared();
        if len2 > max * max {
            self * (max / len2.sqrt())
        } else {
            self
        }
    }

    fn is_zero(self, tolerance: f32) -> bool {
        self.length_squared() <= tolerance * tolerance
    }

    /// `self + v * scale`
    fn add_scaled(self, v: Self, scale: f32) -> Self {
        self + v * scale
    }

    /// Heading of this vector as an orientation
    fn to_orientation(self) -> f32;

    /// Unit vector facing the given orientation
    fn from_orientation(angle: f32) -> Self;
}

impl Vector for Vec2 {
    const ZERO: Self = Vec2::ZERO;

    fn dot(self, other: Self) -> f32 {
        Vec2::dot(self, other)
    }

    fn to_orientation(self) -> f32 {
        (-self.x).atan2(self.y)
    }

    fn from_orientation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(-sin, cos)
    }
}

/// Orientation is yaw around +Y, on the XZ plane
impl Vector for Vec3 {
    const ZERO: Self = Vec3::ZERO;

    fn dot(self, other: Self) -> f32 {
        Vec3::dot(self, other)
    }

    fn to_orientation(self) -> f32 {
        (-self.x).atan2(self.z)
    }

    fn from_orientation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Vec3::new(-sin, 0.0, cos)
    }
}

/// Wraps to (-PI, PI]
pub fn wrap_angle_around_zero(angle: f32) -> f32 {
    let rem = angle.rem_euclid(TAU);
    if rem > PI {
        rem - TAU
    } else {
        rem
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use common::*;

    use super::*;

    #[test]
    fn normalize_zero_is_zero() {
        let v = Vec2::ZERO.normalize_or_zero();
        assert_eq!(v, Vec2::ZERO);
        assert!(!v.x.is_nan());

        let v = Vector::normalize_or_zero(vec3(0.0, 3.0, 4.0));
        assert!(v.abs_diff_eq(vec3(0.0, 0.6, 0.8), 1e-6));
    }

    #[test]
    fn limit() {
        let long = vec2(30.0, 40.0);
        assert!(long.limit(5.0).abs_diff_eq(vec2(3.0, 4.0), 1e-5));
        assert!(Vector::length(long.limit(5.0)).approx_eq(5.0, (f32::EPSILON, 2)));

        let short = vec2(0.3, 0.4);
        assert_eq!(short.limit(5.0), short);
    }

    #[test]
    fn angles_2d() {
        // facing +y
        assert!(Vec2::from_orientation(0.0).abs_diff_eq(vec2(0.0, 1.0), 1e-6));
        // quarter turn anticlockwise faces -x
        assert!(Vec2::from_orientation(FRAC_PI_2).abs_diff_eq(vec2(-1.0, 0.0), 1e-6));

        for &angle in &[0.0, 0.3, -1.2, 2.5, -3.0] {
            let back = Vec2::from_orientation(angle).to_orientation();
            assert!(back.approx_eq(angle, (1e-5, 4)), "{} != {}", angle, back);
        }
    }

    #[test]
    fn angles_3d() {
        assert!(Vec3::from_orientation(0.0).abs_diff_eq(vec3(0.0, 0.0, 1.0), 1e-6));
        let back = vec3(-1.0, 5.0, 0.0).to_orientation();
        assert!(back.approx_eq(FRAC_PI_2, (1e-6, 4)));
    }

    #[test]
    fn wrapping() {
        assert!(wrap_angle_around_zero(0.5).approx_eq(0.5, (1e-6, 4)));
        assert!(wrap_angle_around_zero(PI + 0.5).approx_eq(-PI + 0.5, (1e-5, 4)));
        assert!(wrap_angle_around_zero(-PI - 0.5).approx_eq(PI - 0.5, (1e-5, 4)));
        assert!(wrap_angle_around_zero(4.0 * PI + 0.25).approx_eq(0.25, (1e-5, 4)));
    }
}
