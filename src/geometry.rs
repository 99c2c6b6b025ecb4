use serde_derive::Serialize;

use crate::config::BuildConfig;
use crate::math::*;
use crate::mesh::Triangle;

/// A front-facing ray/triangle intersection.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Hit {
	/// Row of the triangle in the buffer the index was built from
	pub id: u32,
	/// Ray parameter, in units of the ray direction's length
	pub t: f32,
	/// Barycentric weight of the triangle's second vertex
	pub u: f32,
	/// Barycentric weight of the triangle's third vertex
	pub v: f32,
	/// Unnormalized geometric normal, `(v1 - v0) x (v2 - v0)`
	pub normal: Vec3,
}

impl Hit {
	/// Weights of the three triangle vertices at the hit point.
	pub fn barycentric(&self) -> (f32, f32, f32) {
		(1.0 - self.u - self.v, self.u, self.v)
	}
}

/// Nearest-hit query capability of an accelerator.
///
/// Implementations report only front-facing triangles and only hits with
/// `ray.t_min < t <= ray.t_max`. Queries take `&self` and must be safe to
/// run concurrently.
pub trait Intersector: Send + Sync {
	fn intersect(&self, ray: Ray) -> Option<Hit>;
}

/// An accelerator that can be built over indexed triangles.
///
/// `build` receives geometry that has already been validated: both buffers
/// are non-empty, every vertex is finite and every index is in range.
pub trait Backend: Intersector + Sized {
	fn build(vertices: Vec<Vec3>, triangles: Vec<Triangle>, config: &BuildConfig) -> Self;
	fn aabb(&self) -> AABB;
}
