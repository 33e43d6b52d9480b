//! Scene descriptions: JSON scene files and the built-in demo scenes.
//!
//! A scene file names its materials once and lets spheres refer to them:
//!
//! ```json
//! {
//!   "render": { "width": 400, "samples_per_pixel": 100 },
//!   "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1], "aspect_ratio": 2.0 },
//!   "materials": { "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] } },
//!   "spheres": [ { "center": [0, -100.5, -1], "radius": 100, "material": "ground" } ]
//! }
//! ```
//!
//! A missing image width or height is derived from the camera's aspect ratio.

use crate::cli::Builtin;
use lumen_math::Vec3;
use lumen_renderer::{Camera, CameraConfig, Color, ConfigError, Material, RenderConfig, Scene, Sphere};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scene file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sphere {index} uses unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("sphere {index} has non-positive radius {radius}")]
    Radius { index: usize, radius: f32 },

    #[error("material '{name}' has non-positive refraction index {refraction_index}")]
    RefractionIndex { name: String, refraction_index: f32 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Material entry of a scene file, tagged by `"type"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian {
        albedo: Vec3,
    },
    Metal {
        albedo: Vec3,
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        refraction_index: f32,
    },
}

impl MaterialDesc {
    fn build(&self, name: &str) -> Result<Material, SceneError> {
        match *self {
            MaterialDesc::Lambertian { albedo } => Ok(Material::lambertian(albedo)),
            MaterialDesc::Metal { albedo, fuzz } => Ok(Material::metal(albedo, fuzz)),
            MaterialDesc::Dielectric { refraction_index } => {
                if !(refraction_index > 0.0) {
                    return Err(SceneError::RefractionIndex {
                        name: name.to_string(),
                        refraction_index,
                    });
                }
                Ok(Material::dielectric(refraction_index))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f32,
    /// Key into [`SceneFile::materials`]
    pub material: String,
}

/// `render` section of a scene file. Omitted fields fall back to [`RenderConfig`] defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSection {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub seed: Option<u64>,
    pub bucket_size: Option<u32>,
}

impl RenderSection {
    /// Fill in missing fields; a missing dimension follows `aspect_ratio`.
    pub fn resolve(&self, aspect_ratio: f32) -> Result<RenderConfig, SceneError> {
        let defaults = RenderConfig::default();

        if (self.width.is_none() || self.height.is_none())
            && !(aspect_ratio.is_finite() && aspect_ratio > 0.0)
        {
            return Err(ConfigError::AspectRatio(aspect_ratio).into());
        }

        let (width, height) = match (self.width, self.height) {
            (Some(width), Some(height)) => (width, height),
            (Some(width), None) => (width, (width as f32 / aspect_ratio) as u32),
            (None, Some(height)) => ((height as f32 * aspect_ratio) as u32, height),
            (None, None) => (defaults.width, (defaults.width as f32 / aspect_ratio) as u32),
        };

        Ok(RenderConfig {
            width,
            height,
            samples_per_pixel: self.samples_per_pixel.unwrap_or(defaults.samples_per_pixel),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            seed: self.seed.or(defaults.seed),
            bucket_size: self.bucket_size.unwrap_or(defaults.bucket_size),
        })
    }
}

/// On-disk scene layout. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneFile {
    pub render: RenderSection,
    pub camera: CameraConfig,
    pub materials: BTreeMap<String, MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
}

impl SceneFile {
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Read scene file {}", path.display());
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolve material names and build the renderable scene.
    pub fn build(self) -> Result<LoadedScene, SceneError> {
        let render = self.render.resolve(self.camera.aspect_ratio)?;

        let mut materials = BTreeMap::new();
        for (name, desc) in &self.materials {
            materials.insert(name.as_str(), desc.build(name)?);
        }

        let mut world = Scene::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius > 0.0) {
                return Err(SceneError::Radius {
                    index,
                    radius: sphere.radius,
                });
            }
            let material = materials.get(sphere.material.as_str()).ok_or_else(|| {
                SceneError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                }
            })?;
            world.add(Sphere::new(sphere.center, sphere.radius, *material));
        }

        log::info!(
            "Loaded scene: {} materials, {} spheres",
            materials.len(),
            world.len()
        );

        Ok(LoadedScene {
            world,
            camera: self.camera,
            render,
        })
    }
}

/// A scene ready to render once its settings are final.
pub struct LoadedScene {
    pub world: Scene,
    pub camera: CameraConfig,
    pub render: RenderConfig,
}

impl LoadedScene {
    /// Match the camera to the image shape, validate both configs and build the camera.
    pub fn finalize(&mut self) -> Result<Camera, SceneError> {
        self.render.validate()?;

        let aspect_ratio = self.render.aspect_ratio();
        if (aspect_ratio - self.camera.aspect_ratio).abs() > 1e-3 {
            log::debug!(
                "Camera aspect ratio {} replaced by image aspect ratio {}",
                self.camera.aspect_ratio,
                aspect_ratio
            );
        }
        self.camera.aspect_ratio = aspect_ratio;
        self.camera.validate()?;
        Ok(Camera::new(&self.camera))
    }
}

pub fn builtin_scene(kind: Builtin, seed: u64) -> LoadedScene {
    match kind {
        Builtin::Default => default_scene(),
        Builtin::Cover => cover_scene(seed),
    }
}

/// Ground, a diffuse center sphere, and two metal spheres with different roughness.
fn default_scene() -> LoadedScene {
    let ground = Material::lambertian(Color::new(0.8, 0.8, 0.0));
    let center = Material::lambertian(Color::new(0.7, 0.3, 0.3));
    let left = Material::metal(Color::new(0.8, 0.8, 0.8), 0.3);
    let right = Material::metal(Color::new(0.8, 0.6, 0.2), 1.0);

    let mut world = Scene::new();
    world.add(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground));
    world.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, center));
    world.add(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, left));
    world.add(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, right));

    LoadedScene {
        world,
        camera: CameraConfig::default(),
        render: RenderConfig::default(),
    }
}

/// Grid of small random spheres around three large ones, seen through a thin lens.
fn cover_scene(seed: u64) -> LoadedScene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = Scene::new();

    world.add(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Color::new(0.5, 0.5, 0.5)),
    ));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            // Keep clear of the large metal sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = Color::new(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                Material::lambertian(albedo)
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                );
                Material::metal(albedo, rng.gen_range(0.0..0.5))
            } else {
                Material::dielectric(1.5)
            };

            world.add(Sphere::new(center, 0.2, material));
        }
    }

    world.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, Material::dielectric(1.5)));
    world.add(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Material::lambertian(Color::new(0.4, 0.2, 0.1)),
    ));
    world.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(0.7, 0.6, 0.5), 0.0),
    ));

    let render = RenderConfig::from_aspect_ratio(600, 3.0 / 2.0);
    let camera = CameraConfig::default()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0)
        .with_aspect_ratio(render.aspect_ratio());

    LoadedScene {
        world,
        camera,
        render,
    }
}
