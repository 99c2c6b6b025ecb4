use log::{debug, info};
use time::PreciseTime;

use crate::bvh::BVH;
use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::geometry::*;
use crate::math::*;

/// Represent vertex indices in triangles; 2^32 vertices should be enough
pub type Index = u32;

/// Indexed triangle. Its front face is the side of `(v1 - v0) x (v2 - v0)`,
/// i.e. counter-clockwise winding seen from outside.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Triangle {
	pub idxs: [Index; 3],
	/// Row in the caller's triangle buffer, kept through BVH reordering
	pub id: u32,
}

/// Copy caller geometry into backend layout, refusing anything the backend
/// could not index safely. Nothing is built unless every check passes.
pub fn validate<V>(vertices: &[V], triangles: &[[Index; 3]]) -> Result<(Vec<Vec3>, Vec<Triangle>), BuildError>
	where V: Into<Vec3> + Copy
{
	if vertices.is_empty() {
		return Err(BuildError::NoVertices);
	}
	if triangles.is_empty() {
		return Err(BuildError::NoTriangles);
	}
	check_triangle_count(triangles.len())?;

	let mut vs = Vec::with_capacity(vertices.len());
	for (vertex, &v) in vertices.iter().enumerate() {
		let v: Vec3 = v.into();
		if !v.all_finite() {
			return Err(BuildError::NonFiniteVertex { vertex });
		}
		vs.push(v);
	}

	let mut ts = Vec::with_capacity(triangles.len());
	for (triangle, idxs) in triangles.iter().enumerate() {
		for (corner, &index) in idxs.iter().enumerate() {
			if index as usize >= vs.len() {
				return Err(BuildError::IndexOutOfRange { triangle, corner, index, num_vertices: vs.len() });
			}
		}
		ts.push(Triangle { idxs: *idxs, id: triangle as u32 });
	}

	Ok((vs, ts))
}

/// Ids run from 0 to `count - 1` and must all fit a `u32`.
fn check_triangle_count(count: usize) -> Result<(), BuildError> {
	match count.checked_sub(1).map(u32::try_from) {
		Some(Err(_)) => Err(BuildError::TooManyTriangles { count }),
		_ => Ok(()),
	}
}

/// Default backend: triangles in a SAH BVH, tested with Möller-Trumbore and
/// back faces culled.
pub struct Mesh {
	vertices: Vec<Vec3>,
	triangles: Vec<Triangle>,
	triangles_e1: Vec<Vec3>,
	triangles_e2: Vec<Vec3>,
	bvh: BVH,
}

impl Mesh {
	fn compute_edges(vertices: &[Vec3], triangles: &[Triangle]) -> (Vec<Vec3>, Vec<Vec3>) {
		// cache triangle edges
		let mut triangles_e1 = Vec::with_capacity(triangles.len());
		let mut triangles_e2 = Vec::with_capacity(triangles.len());
		for t in triangles {
			triangles_e1.push(vertices[t.idxs[1] as usize] - vertices[t.idxs[0] as usize]);
			triangles_e2.push(vertices[t.idxs[2] as usize] - vertices[t.idxs[0] as usize]);
		}
		(triangles_e1, triangles_e2)
	}

	/// Ray parameter and barycentrics of a front-facing hit on triangle `i`,
	/// ignoring the ray window.
	fn intersect_triangle(&self, ray: &Ray, i: usize) -> Option<(f32, (f32, f32))> {
		let v0 = self.vertices[self.triangles[i].idxs[0] as usize];
		let edge1 = self.triangles_e1[i];
		let edge2 = self.triangles_e2[i];

		// det = -dot(direction, edge1 x edge2): positive only when the ray
		// comes from the front side. Back faces and edge-on triangles are culled.
		let p = Vec3::cross(ray.direction, edge2);
		let det = Vec3::dot(edge1, p);
		if !(det > 0.0) {
			return None;
		}
		let idet = 1.0 / det;

		let t = ray.origin - v0;
		let u = Vec3::dot(t, p) * idet;
		if u < 0.0 || u > 1.0 {
			return None;
		}

		let q = Vec3::cross(t, edge1);
		let v = Vec3::dot(ray.direction, q) * idet;
		if v < 0.0 || (u + v) > 1.0 {
			return None;
		}

		Some((Vec3::dot(edge2, q) * idet, (u, v)))
	}
}

impl Intersector for Mesh {
	fn intersect(&self, ray: Ray) -> Option<Hit> {
		let intersect_item = |ray: &Ray, i| self.intersect_triangle(ray, i);
		self.bvh.intersect(&intersect_item, &ray).map(|(t, i, (u, v))| Hit {
			id: self.triangles[i].id,
			t,
			u,
			v,
			normal: Vec3::cross(self.triangles_e1[i], self.triangles_e2[i]),
		})
	}
}

impl Backend for Mesh {
	fn build(vertices: Vec<Vec3>, triangles: Vec<Triangle>, config: &BuildConfig) -> Mesh {
		let mut triangles = triangles;

		let bvh = {
			let third = 1.0 / 3.0;
			let proj_centroid = |t: &Triangle, axis| -> f32 {
				let v0 = vertices[t.idxs[0] as usize];
				let v1 = vertices[t.idxs[1] as usize];
				let v2 = vertices[t.idxs[2] as usize];
				(v0[axis] + v1[axis] + v2[axis]) * third
			};

			let tri_bbox = |t: &Triangle| -> AABB {
				let b0 = AABB::from_point(vertices[t.idxs[0] as usize]);
				let b1 = AABB::from_point(vertices[t.idxs[1] as usize]);
				let b2 = AABB::from_point(vertices[t.idxs[2] as usize]);
				b0.union(&b1).union(&b2)
			};

			// build the BVH
			info!("Building BVH for {} triangles...", triangles.len());
			let start = PreciseTime::now();
			let bvh = BVH::build(&proj_centroid, &tri_bbox, &mut triangles[..], config);
			let end = PreciseTime::now();
			debug!("BVH built in {} seconds", start.to(end).num_milliseconds() as f32 / 1000.0);
			bvh
		};

		let (triangles_e1, triangles_e2) = Mesh::compute_edges(&vertices[..], &triangles[..]);

		Mesh {
			vertices,
			triangles,
			triangles_e1,
			triangles_e2,
			bvh,
		}
	}

	fn aabb(&self) -> AABB {
		self.bvh.bbox()
	}
}
