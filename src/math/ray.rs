use crate::math::*;

/// Ray with a parameter window: hits count when `t_min < t <= t_max`.
///
/// `t` is measured in units of `|direction|`, which need not be normalized.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
	pub origin: Vec3,
	pub direction: Vec3,
	pub t_min: f32,
	pub t_max: f32,
}

impl Ray {
	pub fn new(origin: Vec3, direction: Vec3) -> Ray {
		Ray { origin, direction, t_min: 0.0, t_max: INFINITY }
	}

	/// The segment from `a` to `a + ab`.
	pub fn segment(a: Vec3, ab: Vec3) -> Ray {
		Ray { origin: a, direction: ab, t_min: 0.0, t_max: 1.0 }
	}

	pub fn with_min(self, t_min: f32) -> Ray {
		Ray { t_min, ..self }
	}

	pub fn point_at(&self, t: f32) -> Vec3 {
		self.origin + self.direction * t
	}
}
