use thiserror::Error;

/// Invalid render or camera settings.
///
/// Rendering itself cannot fail; these are caught before any work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("samples per pixel must be at least 1")]
    NoSamples,

    #[error("bucket size must be at least 1")]
    EmptyBucket,

    #[error("vertical field of view must be inside (0, 180) degrees, got {0}")]
    FieldOfView(f32),

    #[error("aspect ratio must be positive, got {0}")]
    AspectRatio(f32),

    #[error("focus distance must be positive, got {0}")]
    FocusDistance(f32),

    #[error("aperture must not be negative, got {0}")]
    Aperture(f32),

    #[error("camera look_from and look_at coincide, or up is parallel to the view direction")]
    DegenerateView,
}
