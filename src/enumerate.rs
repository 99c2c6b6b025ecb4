//! All front-facing hits along a ray, found by re-querying a nearest-hit
//! intersector with an advancing minimum ray parameter.

use log::{debug, warn};
use serde_derive::Serialize;

use crate::config::Config;
use crate::geometry::*;
use crate::math::*;

/// Hits along one ray, nearest first, with the number of rays it took.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HitSequence {
	pub hits: Vec<Hit>,
	/// Rays shot against the intersector, at least one
	pub num_rays: usize,
	/// Set when the walk stopped at `Config::max_hits` instead of leaving the mesh
	pub truncated: bool,
}

impl HitSequence {
	pub fn first(&self) -> Option<&Hit> {
		self.hits.first()
	}

	pub fn is_empty(&self) -> bool {
		self.hits.is_empty()
	}

	pub fn len(&self) -> usize {
		self.hits.len()
	}
}

/// Walk `origin + t * direction` from `t = 0` and collect every front-facing
/// hit once, in increasing `t`.
///
/// Each genuine hit becomes the new minimum parameter, so every query uses
/// the very same origin and direction. When the intersector reports the
/// previous triangle again, or a hit not past the current minimum, the
/// minimum is pushed by `2^k * self_hit_epsilon`, `k` counting consecutive
/// such self-hits. The push doubles until the walk gets past the point, so
/// the loop always ends, but a sliver thinner than the current push can be
/// stepped over.
///
/// Only the immediately preceding triangle is remembered: two overlapping,
/// nearly coincident triangles both end up in the sequence.
pub fn intersect_all<I>(intersector: &I, origin: Vec3, direction: Vec3, config: &Config) -> HitSequence
	where I: Intersector + ?Sized
{
	let mut hits: Vec<Hit> = Vec::new();
	let mut num_rays = 0;
	let mut last_id: Option<u32> = None;
	let mut self_hits = 0;
	// kept in double precision so small pushes accumulate; narrowed per query
	let mut min_t: f64 = 0.0;

	loop {
		let ray = Ray::new(origin, direction).with_min(min_t as f32);
		num_rays += 1;
		let hit = match intersector.intersect(ray) {
			Some(hit) => hit,
			None => break,
		};

		if last_id == Some(hit.id) || f64::from(hit.t) <= min_t {
			if hit.t >= 1.0 {
				debug!("self-hit on triangle {} beyond unit ray length (t = {})", hit.id, hit.t);
			}
			min_t += 2f64.powi(self_hits) * config.self_hit_epsilon;
			self_hits += 1;
		} else {
			hits.push(hit);
			min_t = f64::from(hit.t);
			self_hits = 0;
		}
		last_id = Some(hit.id);

		if hits.len() > config.max_hits {
			report_runaway(origin, direction, &hits, num_rays);
			return HitSequence { hits, num_rays, truncated: true };
		}
	}

	HitSequence { hits, num_rays, truncated: false }
}

#[derive(Serialize)]
struct RunawayReport {
	origin: Vec3,
	direction: Vec3,
	num_rays: usize,
	ids: Vec<u32>,
	t: Vec<f32>,
}

fn report_runaway(origin: Vec3, direction: Vec3, hits: &[Hit], num_rays: usize) {
	let report = RunawayReport {
		origin,
		direction,
		num_rays,
		ids: hits.iter().map(|h| h.id).collect(),
		t: hits.iter().map(|h| h.t).collect(),
	};
	match serde_json::to_string(&report) {
		Ok(json) => warn!("Large number of hits ({}) along one ray, stopping early: {}", hits.len(), json),
		Err(e) => warn!("Large number of hits ({}) along one ray, stopping early ({})", hits.len(), e),
	}
}
