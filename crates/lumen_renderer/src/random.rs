//! Sampling helpers built on an explicitly passed random stream.
//!
//! Nothing here touches global state: every function draws from the `RngCore`
//! handed to it, so each worker owns its own generator and a seeded render is
//! reproducible no matter how the work is scheduled.

use lumen_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::f32::consts::PI;

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform f32 in [min, max).
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Vector with each component uniform in [min, max).
pub fn random_vec3(rng: &mut dyn RngCore, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        gen_range(rng, min, max),
        gen_range(rng, min, max),
        gen_range(rng, min, max),
    )
}

/// Uniform point strictly inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vec3(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform point strictly inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_range(rng, -1.0, 1.0), gen_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform direction on the unit sphere.
///
/// Picks a height `z` and an azimuth, which is area-preserving on the sphere
/// (Archimedes' hat-box theorem), so no rejection loop is needed.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let a = gen_range(rng, 0.0, 2.0 * PI);
    let z = gen_range(rng, -1.0, 1.0);
    let r = (1.0 - z * z).sqrt();
    Vec3::new(r * a.cos(), r * a.sin(), z)
}

/// Independent random stream for one pixel of a render seeded with `seed`.
///
/// Streams depend only on `(seed, x, y)`, never on which thread asks for them.
pub fn pixel_rng(seed: u64, x: u32, y: u32) -> StdRng {
    let coords = ((y as u64) << 32) | x as u64;
    StdRng::seed_from_u64(splitmix64(seed ^ splitmix64(coords)))
}

// SplitMix64 finalizer, spreads nearby inputs across the whole seed space.
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
