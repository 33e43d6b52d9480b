//! Surface materials and their scattering rules.

use crate::hittable::HitRecord;
use crate::random::{gen_f32, random_in_unit_sphere, random_unit_vector};
use lumen_math::{near_zero, reflect, refract, Ray, Vec3};
use rand::RngCore;

/// Color type alias (linear RGB, components typically 0-1)
pub type Color = Vec3;

/// Outcome of a material scattering an incoming ray.
#[derive(Debug, Clone, Copy)]
pub struct Scatter {
    /// Per-channel tint applied to light arriving along `scattered`
    pub attenuation: Color,
    /// Outgoing ray, starting at the hit point
    pub scattered: Ray,
}

/// How light interacts with a surface.
///
/// The set of materials is closed, so they are plain values: primitives hold a
/// copy and hit records borrow it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Ideal diffuse reflector.
    Lambertian { albedo: Color },
    /// Mirror with a roughness term; `fuzz` is in [0, 1].
    Metal { albedo: Color, fuzz: f32 },
    /// Clear refractive material such as glass or water.
    Dielectric { refraction_index: f32 },
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Metal with `fuzz` clamped into [0, 1]; 0 is a perfect mirror.
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Dielectric with the given index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond).
    pub fn dielectric(refraction_index: f32) -> Self {
        Material::Dielectric { refraction_index }
    }

    /// Scatter `ray_in` at `rec`.
    ///
    /// Returns `None` when the surface absorbs the ray.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        match *self {
            Material::Lambertian { albedo } => {
                let mut direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if near_zero(direction) {
                    direction = rec.normal;
                }

                Some(Scatter {
                    attenuation: albedo,
                    scattered: Ray::new(rec.point, direction),
                })
            }

            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + fuzz * random_in_unit_sphere(rng);

                // Fuzz pushed the ray below the surface
                if direction.dot(rec.normal) <= 0.0 {
                    return None;
                }

                Some(Scatter {
                    attenuation: albedo,
                    scattered: Ray::new(rec.point, direction),
                })
            }

            Material::Dielectric { refraction_index } => {
                let ratio = if rec.front_face {
                    1.0 / refraction_index
                } else {
                    refraction_index
                };

                let unit_direction = ray_in.direction().normalize();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let cannot_refract = ratio * sin_theta > 1.0;
                let direction = if cannot_refract || schlick(cos_theta, ratio) > gen_f32(rng) {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, ratio)
                };

                Some(Scatter {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.point, direction),
                })
            }
        }
    }
}

/// Schlick's approximation of Fresnel reflectance.
pub fn schlick(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = ((1.0 - refraction_index) / (1.0 + refraction_index)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
