use serde_derive::{Serialize, Deserialize};

use crate::error::ConfigError;

/// Query and build settings of a mesh index.
///
/// Every field has a default, so a JSON document only needs the fields it
/// changes:
///
/// ```
/// let config = meshcast::Config::from_json(r#"{ "max_hits": 64 }"#).unwrap();
/// assert_eq!(config.max_hits, 64);
/// assert_eq!(config.ray_bias, 1e-4);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Minimum ray parameter of single-ray queries
	pub ray_bias: f32,
	/// Base step of the multi-hit self-hit back-off
	pub self_hit_epsilon: f64,
	/// A multi-hit query stops once it has collected more hits than this
	pub max_hits: usize,
	pub build: BuildConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
	/// SAH cost of one triangle test
	pub intersection_cost: f32,
	/// SAH cost of descending into a node
	pub traversal_cost: f32,
	/// Subtrees with fewer triangles than this are built on the calling thread
	pub parallel_threshold: usize,
	/// Threads of the global build pool; 0 lets rayon decide
	pub threads: usize,
}

impl Default for Config {
	fn default() -> Config {
		Config {
			ray_bias: 1e-4,
			self_hit_epsilon: 1e-7,
			max_hits: 1000,
			build: BuildConfig::default(),
		}
	}
}

impl Default for BuildConfig {
	fn default() -> BuildConfig {
		BuildConfig {
			intersection_cost: 1.0,
			traversal_cost: 1.5,
			parallel_threshold: 1024,
			threads: 0,
		}
	}
}

impl Config {
	pub fn from_json(s: &str) -> Result<Config, ConfigError> {
		let config: Config = serde_json::from_str(s)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(self.ray_bias >= 0.0 && self.ray_bias.is_finite()) {
			return Err(ConfigError::Invalid(format!("ray_bias must be finite and non-negative, got {}", self.ray_bias)));
		}
		if !(self.self_hit_epsilon > 0.0 && self.self_hit_epsilon.is_finite()) {
			return Err(ConfigError::Invalid(format!("self_hit_epsilon must be finite and positive, got {}", self.self_hit_epsilon)));
		}
		if self.max_hits == 0 {
			return Err(ConfigError::Invalid("max_hits must be at least 1".to_owned()));
		}
		let b = &self.build;
		if !(b.intersection_cost > 0.0 && b.intersection_cost.is_finite())
			|| !(b.traversal_cost > 0.0 && b.traversal_cost.is_finite())
		{
			return Err(ConfigError::Invalid(format!(
				"BVH costs must be finite and positive, got intersection {} and traversal {}",
				b.intersection_cost, b.traversal_cost)));
		}
		Ok(())
	}
}
