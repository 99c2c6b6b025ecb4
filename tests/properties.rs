use approx::assert_relative_eq;
use rand::{Rng, SeedableRng, XorShiftRng};

use meshcast::math::Vec3;
use meshcast::MeshIndex;

const CUBE: [[f64; 3]; 8] = [
	[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0],
	[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0],
];

// outward facing
const CUBE_TRIS: [[u32; 3]; 12] = [
	[0, 2, 1], [0, 3, 2], // z = 0
	[4, 5, 6], [4, 6, 7], // z = 1
	[0, 1, 5], [0, 5, 4], // y = 0
	[3, 7, 6], [3, 6, 2], // y = 1
	[0, 4, 7], [0, 7, 3], // x = 0
	[1, 2, 6], [1, 6, 5], // x = 1
];

fn cube() -> MeshIndex {
	MeshIndex::build(&CUBE[..], &CUBE_TRIS[..]).unwrap()
}

fn double_sided_cube() -> MeshIndex {
	let mut triangles = CUBE_TRIS.to_vec();
	triangles.extend(CUBE_TRIS.iter().map(|t| [t[0], t[2], t[1]]));
	MeshIndex::build(&CUBE[..], &triangles[..]).unwrap()
}

fn random_point(rng: &mut XorShiftRng, lo: f32, hi: f32) -> Vec3 {
	Vec3::new(rng.gen_range(lo, hi), rng.gen_range(lo, hi), rng.gen_range(lo, hi))
}

fn random_rays(seed: [u32; 4], n: usize) -> Vec<(Vec3, Vec3)> {
	let mut rng = XorShiftRng::from_seed(seed);
	(0..n).map(|_| {
		let origin = random_point(&mut rng, -3.0, 4.0);
		let target = random_point(&mut rng, -0.5, 1.5);
		(origin, target - origin)
	}).collect()
}

#[test]
fn sequences_are_strictly_increasing_without_repeats() {
	let index = double_sided_cube();
	for (origin, direction) in random_rays([1, 2, 3, 4], 500) {
		let seq = index.intersect_ray_all(origin, direction);
		assert!(seq.num_rays >= 1);
		assert!(!seq.truncated);
		for w in seq.hits.windows(2) {
			assert!(w[0].t < w[1].t, "{:?} then {:?}", w[0], w[1]);
			assert!(w[0].id != w[1].id);
		}
	}
}

#[test]
fn first_hit_agrees_with_all_hits() {
	let index = cube();
	let bias = index.config().ray_bias;
	let mut compared = 0;
	for (origin, direction) in random_rays([5, 6, 7, 8], 500) {
		let single = index.intersect_ray(origin, direction);
		let seq = index.intersect_ray_all(origin, direction);
		match seq.first() {
			Some(first) if first.t > bias => {
				let hit = single.expect("multi-hit query found a hit the single query missed");
				assert_eq!(&hit, first);
				compared += 1;
			}
			// origin practically on the surface, inside the single-ray bias
			Some(_) => {}
			None => assert_eq!(single, None),
		}
	}
	assert!(compared > 50, "only {} rays hit the cube", compared);
}

#[test]
fn misses_give_empty_sequences() {
	let index = cube();
	let mut rng = XorShiftRng::from_seed([9, 10, 11, 12]);
	for _ in 0..200 {
		// above the cube, heading up and away
		let origin = Vec3::new(rng.gen_range(-1.0, 2.0), rng.gen_range(-1.0, 2.0), rng.gen_range(1.5, 3.0));
		let direction = Vec3::new(rng.gen_range(-1.0, 1.0), rng.gen_range(-1.0, 1.0), rng.gen_range(0.1, 1.0));
		assert_eq!(index.intersect_ray(origin, direction), None);
		let seq = index.intersect_ray_all(origin, direction);
		assert!(seq.is_empty());
		assert_eq!(seq.num_rays, 1);
	}
}

#[test]
fn segments_never_report_past_their_end() {
	let index = cube();
	for (a, ab) in random_rays([13, 14, 15, 16], 500) {
		// segments stop short of the target, often before the cube
		let ab = ab * 0.6;
		let seg = index.intersect_segment(a, ab);
		if let Some(hit) = seg {
			assert!(hit.t > 0.0 && hit.t <= 1.0);
		}
		let ray = index.intersect_ray(a, ab);
		match (seg, ray) {
			(None, Some(hit)) => assert!(hit.t > 1.0),
			(Some(s), Some(r)) => assert!(s.t <= r.t),
			_ => {}
		}
	}
}

#[test]
fn rays_entering_the_cube_see_one_front_face() {
	let single = cube();
	let double = double_sided_cube();
	let mut rng = XorShiftRng::from_seed([17, 18, 19, 20]);
	for _ in 0..200 {
		// from well outside, through a point strictly inside
		let target = random_point(&mut rng, 0.2, 0.8);
		let dir = random_point(&mut rng, -1.0, 1.0);
		if dir.length() < 0.1 {
			continue;
		}
		let origin = target - dir * (4.0 / dir.length());
		let direction = target - origin;

		let seq = single.intersect_ray_all(origin, direction);
		assert_eq!(seq.len(), 1, "{:?}", seq);
		let n = seq.hits[0].normal;
		assert!(Vec3::dot(n, direction) < 0.0);

		// with both windings the ray also leaves through a reversed face,
		// so the crossing count is even for an outside origin
		let seq = double.intersect_ray_all(origin, direction);
		assert_eq!(seq.len(), 2, "{:?}", seq);
		assert!(seq.hits[0].id < 12 && seq.hits[1].id >= 12);
	}
}

#[test]
fn parity_from_inside_is_odd() {
	let double = double_sided_cube();
	let mut rng = XorShiftRng::from_seed([21, 22, 23, 24]);
	for _ in 0..100 {
		let origin = random_point(&mut rng, 0.2, 0.8);
		let direction = random_point(&mut rng, -1.0, 1.0);
		if direction.length() < 0.1 {
			continue;
		}
		let seq = double.intersect_ray_all(origin, direction);
		assert_eq!(seq.len(), 1, "{:?}", seq);
		assert!(seq.hits[0].id >= 12);
	}
}

#[test]
fn hit_point_lies_on_the_cube() {
	let index = cube();
	for (origin, direction) in random_rays([25, 26, 27, 28], 300) {
		if let Some(hit) = index.intersect_ray(origin, direction) {
			let p = origin + direction * hit.t;
			let on_face = [p.x, p.y, p.z].iter().any(|&c| c.abs() < 1e-4 || (c - 1.0).abs() < 1e-4);
			assert!(on_face, "{:?} is not on the surface", p);
			let (w0, w1, w2) = hit.barycentric();
			assert_relative_eq!(w0 + w1 + w2, 1.0, epsilon = 1e-5);
		}
	}
}

// n x n unit squares on z = 0 facing +z
fn grid(n: u32) -> MeshIndex {
	let mut vertices = Vec::new();
	for j in 0..=n {
		for i in 0..=n {
			vertices.push([i as f32, j as f32, 0.0]);
		}
	}
	let mut triangles = Vec::new();
	for j in 0..n {
		for i in 0..n {
			let a = i + j * (n + 1);
			triangles.push([a, a + 1, a + n + 2]);
			triangles.push([a, a + n + 2, a + n + 1]);
		}
	}
	MeshIndex::build(&vertices[..], &triangles[..]).unwrap()
}

#[test]
fn vertical_rays_through_grid_lines_and_vertices() {
	let n = 8;
	let index = grid(n);
	let mut rng = XorShiftRng::from_seed([29, 30, 31, 32]);
	for k in 0..300 {
		// an interior grid line along x or y, or an interior vertex
		let line = rng.gen_range(1, n) as f32;
		let other = rng.gen_range(0.01, n as f32 - 0.01);
		let (x, y) = match k % 3 {
			0 => (line, other),
			1 => (other, line),
			_ => (line, rng.gen_range(1, n) as f32),
		};
		let height = rng.gen_range(0.5, 3.0);
		let speed = [0.5, 1.0, 2.0, 4.0][k % 4];
		let origin = Vec3::new(x, y, height);
		let direction = Vec3::new(0.0, 0.0, -speed);

		let hit = index.intersect_ray(origin, direction);
		assert!(hit.is_some(), "missed from {:?}", origin);
		let seq = index.intersect_ray_all(origin, direction);
		assert!(!seq.is_empty(), "missed from {:?}", origin);
		assert!(!seq.truncated);
		assert!(seq.num_rays < 64, "{} rays from {:?}", seq.num_rays, origin);
		for h in &seq.hits {
			assert_relative_eq!(h.t, height / speed, max_relative = 1e-5);
		}
	}
}

#[test]
fn axis_aligned_rays_through_cube_faces_edges_and_corners() {
	let index = double_sided_cube();
	let offsets = [0.0, 0.25, 0.5, 1.0];
	for axis in 0..3 {
		for &a in &offsets {
			for &b in &offsets {
				for &sign in &[1.0f32, -1.0] {
					let mut o = [0.0f32; 3];
					o[axis] = if sign > 0.0 { -2.0 } else { 3.0 };
					o[(axis + 1) % 3] = a;
					o[(axis + 2) % 3] = b;
					let mut d = [0.0; 3];
					d[axis] = sign;
					let origin = Vec3::new(o[0], o[1], o[2]);
					let direction = Vec3::new(d[0], d[1], d[2]);

					// in and out through faces seen from the front, edge-on faces skipped
					let seq = index.intersect_ray_all(origin, direction);
					assert!(seq.len() >= 2, "{:?} {:?}: {:?}", origin, direction, seq);
					assert!(seq.num_rays < 64, "{} rays", seq.num_rays);
					assert_relative_eq!(seq.hits[0].t, 2.0, epsilon = 1e-5);
					assert_relative_eq!(seq.hits[seq.len() - 1].t, 3.0, epsilon = 1e-5);
					assert_eq!(index.intersect_ray(origin, direction).as_ref(), seq.first());
				}
			}
		}
	}
}
