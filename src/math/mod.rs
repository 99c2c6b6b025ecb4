pub mod vec3;
pub mod ray;
pub mod aabb;

pub use vec3::Vec3;
pub use ray::Ray;
pub use aabb::AABB;
pub use std::f32::{INFINITY, NEG_INFINITY};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis { X, Y, Z }
