use thiserror::Error;

/// Reasons geometry is refused when building an index.
#[derive(Debug, Error)]
pub enum BuildError {
	#[error("vertex buffer is empty")]
	NoVertices,

	#[error("triangle buffer is empty")]
	NoTriangles,

	#[error("triangle {triangle} corner {corner} references vertex {index}, but there are only {num_vertices} vertices")]
	IndexOutOfRange {
		triangle: usize,
		corner: usize,
		index: u32,
		num_vertices: usize,
	},

	#[error("vertex {vertex} has a non-finite coordinate in single precision")]
	NonFiniteVertex { vertex: usize },

	#[error("{count} triangles do not fit 32-bit triangle ids")]
	TooManyTriangles { count: usize },

	#[error(transparent)]
	InvalidConfig(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("could not parse configuration: {0}")]
	Parse(#[from] serde_json::Error),

	#[error("invalid configuration: {0}")]
	Invalid(String),
}
