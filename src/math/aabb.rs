use crate::math::*;

/// Axis-Aligned Bounding Box
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
	pub min: Vec3,
	pub max: Vec3,
}

impl AABB {
	/// Slab test returning the (entry, exit) ray parameters, or `None` if the
	/// ray line misses the box. The parameters are not clipped to the ray window.
	///
	/// Boundaries count as inside, so a ray running along a face, an edge or
	/// through a corner of the box still reaches what lies there.
	#[inline(always)]
	pub fn intersect_fast(&self, ray: &Ray, inv_dir: Vec3) -> Option<(f32, f32)> {
		let mut t_near = NEG_INFINITY;
		let mut t_far = INFINITY;
		for &axis in &[Axis::X, Axis::Y, Axis::Z] {
			let origin = ray.origin[axis];
			if ray.direction[axis] == 0.0 {
				// parallel to this slab: either always inside it or never
				if origin < self.min[axis] || origin > self.max[axis] {
					return None;
				}
				continue;
			}
			// 0 * inf when the origin sits on a plane and the direction is tiny
			let t0 = slab_param(self.min[axis] - origin, inv_dir[axis]);
			let t1 = slab_param(self.max[axis] - origin, inv_dir[axis]);
			t_near = t_near.max(t0.min(t1));
			t_far = t_far.min(t0.max(t1));
		}
		if t_near > t_far {
			return None;
		}
		Some((t_near, t_far))
	}

	pub fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
		let inv_dir = 1.0 / ray.direction;
		self.intersect_fast(ray, inv_dir)
	}

	pub fn empty() -> AABB {
		AABB { min: Vec3::thrice(INFINITY), max: Vec3::thrice(NEG_INFINITY) }
	}

	pub fn from_point(p: Vec3) -> AABB {
		AABB { min: p, max: p }
	}

	pub fn union(&self, b: &AABB) -> AABB {
		AABB {
			min: Vec3::min(self.min, b.min),
			max: Vec3::max(self.max, b.max),
		}
	}

	pub fn contains(&self, p: Vec3) -> bool {
		self.min.x <= p.x && p.x <= self.max.x
			&& self.min.y <= p.y && p.y <= self.max.y
			&& self.min.z <= p.z && p.z <= self.max.z
	}

	pub fn surface_area(&self) -> f32 {
		let d = self.max - self.min;
		2.0 * (d.x * d.y + d.x * d.z + d.y * d.z)
	}
}

#[inline(always)]
fn slab_param(dist: f32, inv_dir: f32) -> f32 {
	if dist == 0.0 { 0.0 } else { dist * inv_dir }
}
