//! Recursive radiance estimate along a single light path.

use crate::{Color, Hittable};
use lumen_math::{Interval, Ray};
use rand::RngCore;

/// Lower bound on accepted hit distances.
///
/// Scattered rays start exactly on the surface they left; floating-point error would
/// otherwise let them re-hit it at t ≈ 0 and darken the image (shadow acne).
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Estimate the radiance arriving along `ray`.
///
/// Follows one scattered ray per bounce until the path escapes to the sky, is
/// absorbed, or `depth` bounces have been spent. Exhausting the budget returns black.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) else {
        return sky(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => scatter.attenuation * ray_color(&scatter.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Background seen by rays that escape the scene: white at the bottom blending
/// to sky blue straight up.
pub fn sky(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}
