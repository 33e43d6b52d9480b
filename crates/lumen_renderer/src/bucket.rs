//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently and in
//! parallel. Every pixel draws from its own seeded stream, so the tiling never
//! changes the result.

use crate::random::pixel_rng;
use crate::renderer::render_pixel;
use crate::{Camera, Color, Hittable, RenderConfig};

/// Default bucket edge length in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Row of bucket's top-left corner, counted from the top of the image
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self { x, y, width, height, index }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Tile a `width` x `height` image into buckets, row-major from the top-left.
///
/// Edge buckets are cropped to the image. A `bucket_size` of 0 is treated as 1.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let mut buckets = Vec::new();

    for y in (0..height).step_by(size as usize) {
        for x in (0..width).step_by(size as usize) {
            let bw = size.min(width - x);
            let bh = size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
        }
    }

    buckets
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Averaged linear colors in row-major order within the bucket
    pub pixels: Vec<Color>,
}

/// Render every pixel of `bucket` using the per-pixel streams derived from `seed`.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    seed: u64,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let x = bucket.x + local_x;
            let row = bucket.y + local_y;
            let mut rng = pixel_rng(seed, x, row);
            pixels.push(render_pixel(camera, world, x, row, config, &mut rng));
        }
    }

    BucketResult {
        bucket: *bucket,
        pixels,
    }
}
