//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable};
use crate::Material;
use lumen_math::{Aabb, Interval, Ray, Vec3};

/// A sphere primitive.
///
/// `radius` must be positive; zero or negative radii are a caller error.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
    bbox: Aabb,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-half_b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-half_b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn unit_sphere_ahead() -> Sphere {
        Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Material::lambertian(Color::new(0.5, 0.5, 0.5)),
        )
    }

    fn forward() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_sphere_hit_distance_and_normal() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.1, 0.2, -1.0));

        let rec = sphere.hit(&ray, forward()).expect("ray should hit");

        let dist = (ray.at(rec.t) - sphere.center()).length();
        assert!((dist - sphere.radius()).abs() < 1e-5);
        assert!((rec.normal.length() - 1.0).abs() < 1e-5);

        // From outside, the oriented normal is the outward one
        let outward = (rec.point - sphere.center()).normalize();
        assert!((rec.normal - outward).length() < 1e-5);
    }

    #[test]
    fn test_sphere_hit_center_ray() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = sphere.hit(&ray, forward()).unwrap();

        assert!((rec.t - 0.5).abs() < 1e-5);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, Material::dielectric(1.5));
        let ray = Ray::new(Vec3::new(0.5, 0.0, 0.0), Vec3::X);

        let rec = sphere.hit(&ray, forward()).unwrap();

        assert!(!rec.front_face);
        assert!((rec.t - 1.5).abs() < 1e-5);
        // Normal points back toward the ray origin, into the sphere
        assert!((rec.normal - (-Vec3::X)).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(unit_sphere_ahead().hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_sphere_tangent_ray_misses() {
        // Discriminant is exactly zero
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0), 1.0, Material::dielectric(1.5));
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), -Vec3::Z);
        assert!(sphere.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_sphere_behind_ray() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 3.0), 1.0, Material::dielectric(1.5));
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(sphere.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_sphere_far_root_when_near_excluded() {
        let sphere = unit_sphere_ahead();
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);

        let rec = sphere.hit(&ray, Interval::new(0.6, f32::INFINITY)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-5);
        assert!(!rec.front_face);
    }

    #[test]
    fn test_sphere_bounding_box() {
        let bbox = unit_sphere_ahead().bounding_box();
        assert_eq!(bbox.x, Interval::new(-0.5, 0.5));
        assert_eq!(bbox.z, Interval::new(-1.5, -0.5));
    }
}
