use log::debug;
use rayon::prelude::*;

use crate::config::Config;
use crate::enumerate::{intersect_all, HitSequence};
use crate::error::BuildError;
use crate::geometry::*;
use crate::math::*;
use crate::mesh::{self, Index, Mesh};

/// An immutable triangle mesh with its accelerator, answering front-facing
/// ray queries.
///
/// The index owns its copy of the geometry; releasing it (by `destroy` or by
/// dropping it) frees the accelerator, and the borrow checker rules out any
/// query afterwards. Queries take `&self` and can run from many threads at once.
pub struct MeshIndex<B = Mesh> {
	backend: B,
	config: Config,
	num_vertices: usize,
	num_triangles: usize,
}

impl MeshIndex<Mesh> {
	/// Index `triangles` over `vertices` with the default BVH backend. Row `i`
	/// of `triangles` is reported as triangle id `i`.
	pub fn build<V>(vertices: &[V], triangles: &[[Index; 3]]) -> Result<MeshIndex, BuildError>
		where V: Into<Vec3> + Copy
	{
		MeshIndex::with_backend(vertices, triangles, Config::default())
	}

	pub fn build_with_config<V>(vertices: &[V], triangles: &[[Index; 3]], config: Config) -> Result<MeshIndex, BuildError>
		where V: Into<Vec3> + Copy
	{
		MeshIndex::with_backend(vertices, triangles, config)
	}
}

impl<B: Backend> MeshIndex<B> {
	/// Index the geometry with any backend. Configuration and input are
	/// validated before the backend sees them, so a failure leaves nothing behind.
	pub fn with_backend<V>(vertices: &[V], triangles: &[[Index; 3]], config: Config) -> Result<MeshIndex<B>, BuildError>
		where V: Into<Vec3> + Copy
	{
		config.validate()?;
		let (vertices, triangles) = mesh::validate(vertices, triangles)?;
		let num_vertices = vertices.len();
		let num_triangles = triangles.len();
		let backend = B::build(vertices, triangles, &config.build);
		Ok(MeshIndex { backend, config, num_vertices, num_triangles })
	}

	pub fn aabb(&self) -> AABB {
		self.backend.aabb()
	}
}

impl<B: Intersector> MeshIndex<B> {
	pub fn num_vertices(&self) -> usize {
		self.num_vertices
	}

	pub fn num_triangles(&self) -> usize {
		self.num_triangles
	}

	pub fn config(&self) -> &Config {
		&self.config
	}

	/// First front-facing hit along `origin + t * direction`, skipping
	/// `t <= ray_bias` so a ray leaving a surface does not hit it again.
	pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<Hit> {
		let ray = Ray::new(origin, direction).with_min(self.config.ray_bias);
		self.backend.intersect(ray)
	}

	/// Every front-facing hit along the ray, nearest first.
	///
	/// See [`intersect_all`](crate::enumerate::intersect_all) for how
	/// coincident hits are skipped.
	pub fn intersect_ray_all(&self, origin: Vec3, direction: Vec3) -> HitSequence {
		intersect_all(&self.backend, origin, direction, &self.config)
	}

	/// First front-facing hit on the segment from `a` to `a + ab`, `0 < t <= 1`.
	pub fn intersect_segment(&self, a: Vec3, ab: Vec3) -> Option<Hit> {
		self.backend.intersect(Ray::segment(a, ab))
	}

	/// `intersect_ray` for each `(origin, direction)`, in parallel.
	pub fn intersect_rays(&self, rays: &[(Vec3, Vec3)]) -> Vec<Option<Hit>> {
		rays.par_iter()
			.map(|&(origin, direction)| self.intersect_ray(origin, direction))
			.collect()
	}

	/// `intersect_ray_all` for each `(origin, direction)`, in parallel.
	pub fn intersect_rays_all(&self, rays: &[(Vec3, Vec3)]) -> Vec<HitSequence> {
		rays.par_iter()
			.map(|&(origin, direction)| self.intersect_ray_all(origin, direction))
			.collect()
	}

	/// Release the accelerator and geometry now rather than at end of scope.
	pub fn destroy(self) {}
}

impl<B> Drop for MeshIndex<B> {
	fn drop(&mut self) {
		debug!("Releasing mesh index ({} vertices, {} triangles)", self.num_vertices, self.num_triangles);
	}
}
