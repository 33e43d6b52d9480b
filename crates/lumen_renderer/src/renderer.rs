//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Per-pixel jittered multi-sampling (anti-aliasing)
//! - Gamma-2 correction and 8-bit quantization
//! - Parallel bucket rendering with rayon

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::error::ConfigError;
use crate::integrator::ray_color;
use crate::random::gen_f32;
use crate::{Camera, Color, Hittable};
use lumen_math::Interval;
use rand::RngCore;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Seed for the per-pixel random streams; `None` picks a fresh one per render
    pub seed: Option<u64>,
    /// Edge length of the square tiles handed to workers
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::from_aspect_ratio(400, 16.0 / 9.0)
    }
}

impl RenderConfig {
    /// Configuration whose height follows from `width` and `aspect_ratio` (truncated).
    pub fn from_aspect_ratio(width: u32, aspect_ratio: f32) -> Self {
        Self {
            width,
            height: (width as f32 / aspect_ratio) as u32,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: None,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::NoSamples);
        }
        if self.bucket_size == 0 {
            return Err(ConfigError::EmptyBucket);
        }
        Ok(())
    }
}

/// Estimate the linear color of one pixel.
///
/// `row` counts from the top of the image and must be below `config.height`. Each
/// sample jitters the pixel by an independent offset in [0, 1) on both axes before
/// mapping it onto the camera's image plane, whose `t` coordinate grows upwards.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    row: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    debug_assert!(row < config.height, "row {} outside image of height {}", row, config.height);
    let j = config.height - 1 - row;
    let s_span = config.width.saturating_sub(1).max(1) as f32;
    let t_span = config.height.saturating_sub(1).max(1) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let s = (x as f32 + gen_f32(rng)) / s_span;
        let t = (j as f32 + gen_f32(rng)) / t_span;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }

    pixel_color * (1.0 / config.samples_per_pixel as f32)
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let to_byte = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// 8-bit RGB image, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at column `x`, row `y` (from the top).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = self.index(x, y);
        self.pixels[i] = rgb;
    }

    /// Scanlines from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[[u8; 3]]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }

    /// Flattened RGB bytes, top row first.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, color_to_rgb(*color));
        }
    }
}

/// Render the entire scene in parallel.
///
/// `config` should have passed [`RenderConfig::validate`]. The scene and camera are
/// only read. With a fixed `config.seed` the output is identical across runs,
/// thread counts and bucket sizes.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let seed = config.seed.unwrap_or_else(rand::random);
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} buckets",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth,
        buckets.len()
    );
    log::debug!("Render seed: {}", seed);

    let start = Instant::now();
    let completed = AtomicUsize::new(0);
    let report_every = (buckets.len() / 10).max(1);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let result = render_bucket(bucket, camera, world, config, seed);

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            log::trace!("Bucket {} ({}, {}) done", bucket.index, bucket.x, bucket.y);
            if done % report_every == 0 || done == buckets.len() {
                log::info!("{:.0}% of buckets done", 100.0 * done as f32 / buckets.len() as f32);
            }

            result
        })
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}
