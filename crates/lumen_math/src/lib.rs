//! Math types shared by the Lumen crates.
//!
//! `Vec3` comes straight from glam and doubles as point, direction and RGB color.
//! `Vec3::normalize` has no zero-length guard: a zero vector yields NaN components,
//! which then propagate through whatever consumes them.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod optics;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use optics::{near_zero, reflect, refract};
pub use ray::Ray;
