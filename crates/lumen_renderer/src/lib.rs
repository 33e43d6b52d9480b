//! Lumen renderer - CPU Monte Carlo path tracing.
//!
//! Traces jittered camera rays through a scene of spheres, scattering them off
//! diffuse, metallic and dielectric surfaces until they escape to the sky,
//! are absorbed, or run out of bounces.
//!
//! Control flow per sample:
//! [`render`] -> [`Camera::get_ray`] -> [`ray_color`] -> [`Hittable::hit`]
//! -> [`Material::scatter`] -> [`ray_color`] ...

mod bucket;
mod bvh;
mod camera;
mod error;
mod hittable;
mod integrator;
mod material;
pub mod random;
mod renderer;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::Bvh;
pub use camera::{Camera, CameraConfig};
pub use error::ConfigError;
pub use hittable::{HitRecord, Hittable, Scene};
pub use integrator::{ray_color, sky, SHADOW_ACNE_EPSILON};
pub use material::{schlick, Color, Material, Scatter};
pub use renderer::{color_to_rgb, linear_to_gamma, render, render_pixel, ImageBuffer, RenderConfig};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Aabb, Interval, Ray, Vec3};
