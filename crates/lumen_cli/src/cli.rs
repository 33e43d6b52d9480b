use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::RenderConfig;
use std::path::PathBuf;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Scenes that ship with the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Builtin {
    /// Ground plus a diffuse sphere flanked by two metal spheres
    Default,
    /// Field of small random spheres around three large ones, with depth of field
    Cover,
}

#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "A Monte Carlo path tracer for spheres")]
pub struct Args {
    /// JSON scene file; overrides --builtin
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Built-in scene to render when no scene file is given
    #[arg(long, value_enum, default_value = "default")]
    pub builtin: Builtin,

    /// Seed for the random layout of built-in scenes
    #[arg(long, default_value = "0")]
    pub scene_seed: u64,

    /// Image width in pixels (height follows the scene's aspect ratio unless given)
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for reproducible renders
    #[arg(long)]
    pub seed: Option<u64>,

    /// Build a BVH over the scene before rendering
    #[arg(long)]
    pub bvh: bool,

    /// Output file (.ppm writes plain-text PPM, other extensions go through the image crate)
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of the scene's render settings.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        match (self.width, self.height) {
            (Some(width), Some(height)) => {
                config.width = width;
                config.height = height;
            }
            (Some(width), None) => {
                let aspect = config.aspect_ratio();
                config.width = width;
                config.height = (width as f32 / aspect) as u32;
            }
            (None, Some(height)) => {
                let aspect = config.aspect_ratio();
                config.height = height;
                config.width = (height as f32 * aspect) as u32;
            }
            (None, None) => {}
        }

        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lumen"]).unwrap();

        assert_eq!(args.builtin, Builtin::Default);
        assert_eq!(args.log_level, LogLevel::Info);
        assert_eq!(args.output, PathBuf::from("render.png"));
        assert!(!args.bvh);

        let mut config = RenderConfig::default();
        let before = config.clone();
        args.apply_overrides(&mut config);
        assert_eq!(config, before);
    }

    #[test]
    fn test_width_keeps_aspect_ratio() {
        let args = Args::try_parse_from(["lumen", "--width", "800", "-s", "8", "--seed", "3"]).unwrap();
        let mut config = RenderConfig::from_aspect_ratio(400, 2.0);

        args.apply_overrides(&mut config);

        assert_eq!((config.width, config.height), (800, 400));
        assert_eq!(config.samples_per_pixel, 8);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_explicit_dimensions() {
        let args = Args::try_parse_from([
            "lumen", "--builtin", "cover", "--width", "64", "--height", "48", "--max-depth", "4",
            "--log-level", "debug", "-o", "out.ppm",
        ])
        .unwrap();
        let mut config = RenderConfig::default();

        args.apply_overrides(&mut config);

        assert_eq!(args.builtin, Builtin::Cover);
        assert_eq!((config.width, config.height), (64, 48));
        assert_eq!(config.max_depth, 4);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
        assert_eq!(args.output, PathBuf::from("out.ppm"));
    }

    #[test]
    fn test_rejects_unknown_builtin() {
        assert!(Args::try_parse_from(["lumen", "--builtin", "cornell"]).is_err());
    }
}
