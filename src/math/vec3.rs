use std::ops::{Add, Sub, Mul, Div, Neg, Index};
use serde_derive::Serialize;

use crate::math::Axis;

/// Single precision point or vector, the layout the backend works in.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize)]
pub struct Vec3 {
	pub x: f32,
	pub y: f32,
	pub z: f32,
}

impl Vec3 {
	#[inline(always)]
	pub fn new(x: f32, y: f32, z: f32) -> Vec3 {
		Vec3 { x, y, z }
	}

	#[inline(always)]
	pub fn zero() -> Vec3 {
		Vec3 { x: 0.0, y: 0.0, z: 0.0 }
	}

	#[inline(always)]
	pub fn thrice(v: f32) -> Vec3 {
		Vec3 { x: v, y: v, z: v }
	}

	#[inline(always)]
	pub fn dot(lhs: Vec3, rhs: Vec3) -> f32 {
		lhs.x * rhs.x + lhs.y * rhs.y + lhs.z * rhs.z
	}

	#[inline(always)]
	pub fn cross(lhs: Vec3, rhs: Vec3) -> Vec3 {
		Vec3 {
			x: lhs.y * rhs.z - lhs.z * rhs.y,
			y: lhs.z * rhs.x - lhs.x * rhs.z,
			z: lhs.x * rhs.y - lhs.y * rhs.x
		}
	}

	#[inline(always)]
	pub fn length(self) -> f32 {
		Vec3::dot(self, self).sqrt()
	}

	#[inline(always)]
	pub fn min(lhs: Vec3, rhs: Vec3) -> Vec3 {
		Vec3 {
			x: lhs.x.min(rhs.x),
			y: lhs.y.min(rhs.y),
			z: lhs.z.min(rhs.z),
		}
	}

	#[inline(always)]
	pub fn max(lhs: Vec3, rhs: Vec3) -> Vec3 {
		Vec3 {
			x: lhs.x.max(rhs.x),
			y: lhs.y.max(rhs.y),
			z: lhs.z.max(rhs.z),
		}
	}

	#[inline(always)]
	pub fn all_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
	}
}

impl From<[f32; 3]> for Vec3 {
	#[inline(always)]
	fn from(p: [f32; 3]) -> Vec3 {
		Vec3::new(p[0], p[1], p[2])
	}
}

// Narrowing to single precision; values beyond f32 range become infinite
// and are rejected when an index is built.
impl From<[f64; 3]> for Vec3 {
	#[inline(always)]
	fn from(p: [f64; 3]) -> Vec3 {
		Vec3::new(p[0] as f32, p[1] as f32, p[2] as f32)
	}
}

impl Add for Vec3 {
	type Output = Vec3;
	#[inline(always)]
	fn add(self, rhs: Vec3) -> Vec3 {
		Vec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
	}
}

impl Sub for Vec3 {
	type Output = Vec3;
	#[inline(always)]
	fn sub(self, rhs: Vec3) -> Vec3 {
		Vec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
	}
}

impl Mul for Vec3 {
	type Output = Vec3;
	#[inline(always)]
	fn mul(self, rhs: Vec3) -> Vec3 {
		Vec3 { x: self.x * rhs.x, y: self.y * rhs.y, z: self.z * rhs.z }
	}
}

impl Mul<f32> for Vec3 {
	type Output = Vec3;
	#[inline(always)]
	fn mul(self, rhs: f32) -> Vec3 {
		Vec3 { x: self.x * rhs, y: self.y * rhs, z: self.z * rhs }
	}
}

impl Div<Vec3> for f32 {
	type Output = Vec3;
	#[inline(always)]
	fn div(self, rhs: Vec3) -> Vec3 {
		Vec3 { x: self / rhs.x, y: self / rhs.y, z: self / rhs.z }
	}
}

impl Neg for Vec3 {
	type Output = Vec3;
	#[inline(always)]
	fn neg(self) -> Vec3 {
		Vec3 { x: -self.x, y: -self.y, z: -self.z }
	}
}

impl Index<Axis> for Vec3 {
	type Output = f32;
	#[inline(always)]
	fn index(&self, index: Axis) -> &f32 {
		match index {
			Axis::X => &self.x,
			Axis::Y => &self.y,
			Axis::Z => &self.z,
		}
	}
}
