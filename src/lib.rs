//! Ray queries against a static triangle mesh: the first front-facing hit,
//! every front-facing hit in order, and segment occlusion.
//!
//! ```
//! use meshcast::{MeshIndex, math::Vec3};
//!
//! let vertices: [[f64; 3]; 4] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]];
//! let index = MeshIndex::build(&vertices[..], &[[0, 1, 2], [0, 2, 3]]).unwrap();
//!
//! let hit = index.intersect_ray(Vec3::new(0.5, 0.25, 1.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
//! assert_eq!(hit.id, 0);
//! assert_eq!(index.intersect_ray_all(Vec3::new(0.5, 0.25, 1.0), Vec3::new(0.0, 0.0, -1.0)).len(), 1);
//! ```
//!
//! Only front faces are reported: a triangle faces the side from which its
//! vertices appear counter-clockwise. To see both sides, index every triangle
//! twice, once with reversed winding.

pub mod config;
pub mod enumerate;
pub mod error;
pub mod geometry;
pub mod index;
pub mod math;
pub mod mesh;

mod bvh;

use std::sync::Once;

use log::{debug, info};

pub use config::{BuildConfig, Config};
pub use enumerate::HitSequence;
pub use error::{BuildError, ConfigError};
pub use geometry::{Backend, Hit, Intersector};
pub use index::MeshIndex;
pub use mesh::{Mesh, Triangle};

static INIT: Once = Once::new();

/// Set up the global rayon pool that parallel BVH builds run on, sized by
/// `config.build.threads`.
///
/// Calling this is optional. It has an effect only when it runs before
/// anything else in the process uses rayon, so call it at startup, before the
/// first index is built. Only the first call does anything.
pub fn init(config: &Config) {
	INIT.call_once(|| {
		let mut builder = rayon::ThreadPoolBuilder::new();
		if config.build.threads > 0 {
			builder = builder.num_threads(config.build.threads);
		}
		match builder.build_global() {
			Ok(()) => info!("Build pool started with {} threads", rayon::current_num_threads()),
			Err(e) => debug!("Keeping the existing global thread pool: {}", e),
		}
	});
}
