use crate::config::BuildConfig;
use crate::math::*;

pub struct BVH {
	bbox: AABB,
	node: Node,
}

enum Node {
	Leaf { begin: usize, end: usize },
	Split { split_axis: Axis, children: [Box<BVH>; 2] },
}

impl BVH {
	pub fn bbox(&self) -> AABB {
		self.bbox
	}

	/// Build a BVH over `items`, reordering them in place. Leaves refer to
	/// ranges of the reordered slice.
	pub fn build<I, F, G>(proj_centroid: &F, item_bbox: &G, items: &mut [I], config: &BuildConfig) -> BVH
		where I: Send, F: (Fn(&I, Axis) -> f32) + Sync, G: (Fn(&I) -> AABB) + Sync
	{
		let n = items.len();
		build_rec(proj_centroid, item_bbox, items, 0, n, &mut vec![0.0; n], config)
	}

	/// Return `(t, i, data)` for the closest item `i` with `ray.t_min < t <= ray.t_max`
	pub fn intersect<D, F>(&self, intersect_item: &F, ray: &Ray) -> Option<(f32, usize, D)>
		where F: Fn(&Ray, usize) -> Option<(f32, D)>
	{
		intersect_rec(intersect_item, ray, self, ray.t_max, 1.0 / ray.direction)
	}
}

fn build_rec<I, F, G>(proj_centroid: &F, item_bbox: &G, items: &mut [I], begin: usize, end: usize, buffer: &mut [f32], config: &BuildConfig) -> BVH
	where I: Send, F: (Fn(&I, Axis) -> f32) + Sync, G: (Fn(&I) -> AABB) + Sync
{
	let n = end - begin;
	let mut best_axis = None;
	let mut best_cost = config.intersection_cost * n as f32;
	let mut best_index = 0;
	let mut node_bbox = AABB::empty();

	// Try splitting along every axis
	for &axis in &[Axis::X, Axis::Y, Axis::Z] {
		sort_projected_centroid(proj_centroid, items, axis);

		// Compute AABB surface areas incrementally from the left
		let mut bbox = AABB::empty();
		for (i, t) in items.iter().enumerate() {
			bbox = bbox.union(&item_bbox(t));
			buffer[i] = bbox.surface_area();
		}

		if axis == Axis::X {
			node_bbox = bbox;
		}

		/* Choose the split plane by computing AABB surface areas incrementally from
		 * the right, and comparing them against the one from the left with the heuristic.
		 * A flat node has zero area and a NaN cost, which never wins. */
		let mut bbox = AABB::empty();
		let tri_factor = config.intersection_cost / node_bbox.surface_area();
		for (i, t) in items.iter().enumerate().skip(1).rev() {
			bbox = bbox.union(&item_bbox(t));

			let left_area = buffer[i - 1];
			let right_area = bbox.surface_area();
			let prims_left = i as f32;
			let prims_right = (n - i) as f32;

			let sah_cost = 2.0 * config.traversal_cost
				+ tri_factor * (prims_left * left_area + prims_right * right_area);
			if sah_cost < best_cost {
				best_cost = sah_cost;
				best_axis = Some(axis);
				best_index = i;
			}
		}
	}

	let node = match best_axis {
		None => Node::Leaf { begin, end }, // Couldn't find a split that reduces the cost, make a leaf
		Some(axis) => {
			if axis != Axis::Z { // we just sorted on Z, only sort for X and Y
				sort_projected_centroid(proj_centroid, items, axis);
			}
			let mid = begin + best_index;
			let (buf1, buf2) = buffer.split_at_mut(best_index);
			let (tri1, tri2) = items.split_at_mut(best_index);
			let mut build1 = || Box::new(build_rec(proj_centroid, item_bbox, tri1, begin, mid, buf1, config));
			let mut build2 = || Box::new(build_rec(proj_centroid, item_bbox, tri2, mid,   end, buf2, config));
			let (c1, c2) = if n < config.parallel_threshold {
				(build1(), build2())
			} else {
				rayon::join(build1, build2)
			};
			Node::Split { split_axis: axis, children: [c1, c2] }
		},
	};

	BVH { bbox: node_bbox, node }
}

fn intersect_rec<D, F>(intersect_item: &F, ray: &Ray, bvh: &BVH, dist_max: f32, inv_dir: Vec3) -> Option<(f32, usize, D)>
	where F: Fn(&Ray, usize) -> Option<(f32, D)>
{
	match bvh.bbox.intersect_fast(ray, inv_dir) {
		Some((t_near, t_far)) if t_far >= ray.t_min && t_near <= dist_max => {}
		_ => return None,
	}

	match bvh.node {
		Node::Leaf { begin, end } => intersect_items(intersect_item, ray, begin, end, dist_max),
		Node::Split { split_axis, ref children } => {
			// order the children according to ray direction
			let (c1, c2) = if ray.direction[split_axis] < 0.0 {
				(&children[1], &children[0])
			} else {
				(&children[0], &children[1])
			};

			match intersect_rec(intersect_item, ray, c1, dist_max, inv_dir) {
				// no intersection in first child, check the other one
				None => intersect_rec(intersect_item, ray, c2, dist_max, inv_dir),
				// intersection in first child, check if there is a closer intersection in the other one
				Some(its1) => match intersect_rec(intersect_item, ray, c2, its1.0, inv_dir) {
					Some(its2) if its2.0 < its1.0 => Some(its2),
					_ => Some(its1),
				},
			}
		},
	}
}

fn intersect_items<D, F>(intersect_item: &F, ray: &Ray, begin: usize, end: usize, dist_max: f32) -> Option<(f32, usize, D)>
	where F: Fn(&Ray, usize) -> Option<(f32, D)>
{
	let mut closest: Option<(f32, usize, D)> = None;

	for i in begin..end {
		if let Some((t, d)) = intersect_item(ray, i) {
			let t_best = closest.as_ref().map_or(dist_max, |c| c.0);
			let in_window = ray.t_min < t && t <= dist_max;
			if in_window && (closest.is_none() || t < t_best) {
				closest = Some((t, i, d));
			}
		}
	}

	closest
}

fn sort_projected_centroid<I, F>(proj_centroid: &F, items: &mut [I], axis: Axis)
	where F: Fn(&I, Axis) -> f32
{
	items.sort_by(|a, b| proj_centroid(a, axis).total_cmp(&proj_centroid(b, axis)));
}
