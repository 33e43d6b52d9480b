//! Camera for ray generation.

use crate::error::ConfigError;
use crate::random::random_in_unit_disk;
use lumen_math::{Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Parameters a camera is built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position
    pub look_from: Vec3,
    /// Point the camera aims at
    pub look_at: Vec3,
    /// World "up" used to level the camera; must not be parallel to the view direction
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub vertical_fov_degrees: f32,
    /// Image width over height
    pub aspect_ratio: f32,
    /// Lens diameter; 0 disables depth of field
    pub aperture: f32,
    /// Distance from `look_from` to the plane of perfect focus
    pub focus_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            vertical_fov_degrees: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_distance: 1.0,
        }
    }
}

impl CameraConfig {
    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, up: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.up = up;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vertical_fov_degrees: f32, aperture: f32, focus_distance: f32) -> Self {
        self.vertical_fov_degrees = vertical_fov_degrees;
        self.aperture = aperture;
        self.focus_distance = focus_distance;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Reject parameters that would produce a degenerate camera basis or viewport.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.vertical_fov_degrees > 0.0 && self.vertical_fov_degrees < 180.0) {
            return Err(ConfigError::FieldOfView(self.vertical_fov_degrees));
        }
        if !(self.aspect_ratio > 0.0) {
            return Err(ConfigError::AspectRatio(self.aspect_ratio));
        }
        if !(self.focus_distance > 0.0) {
            return Err(ConfigError::FocusDistance(self.focus_distance));
        }
        if self.aperture < 0.0 {
            return Err(ConfigError::Aperture(self.aperture));
        }
        // u = cross(up, w) must not vanish
        let view = self.look_from - self.look_at;
        let side = self.up.normalize_or_zero().cross(view.normalize_or_zero());
        if side.length_squared() < 1e-8 {
            return Err(ConfigError::DegenerateView);
        }
        Ok(())
    }
}

/// A thin-lens camera.
///
/// The basis and image plane are derived once in [`Camera::new`]; the camera is
/// immutable afterwards and can be shared freely between workers.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        let theta = config.vertical_fov_degrees.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = config.aspect_ratio * viewport_height;

        // Right-handed basis: w points backwards, u right, v up
        let w = (config.look_from - config.look_at).normalize();
        let u = config.up.cross(w).normalize();
        let v = w.cross(u);

        let origin = config.look_from;
        let horizontal = config.focus_distance * viewport_width * u;
        let vertical = config.focus_distance * viewport_height * v;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - config.focus_distance * w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: config.aperture / 2.0,
        }
    }

    /// Pinhole camera at the origin looking down -Z with a 2-unit tall viewport.
    pub fn simple(aspect_ratio: f32) -> Self {
        Self::new(&CameraConfig::default().with_aspect_ratio(aspect_ratio))
    }

    /// Ray through the image-plane point (`s`, `t`), both in [0, 1].
    ///
    /// (0, 0) is the lower-left corner of the image, (1, 1) the upper-right.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin - offset,
        )
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit vector pointing from the camera toward the scene.
    pub fn forward(&self) -> Vec3 {
        -self.w
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_simple_camera_corners() {
        let camera = Camera::simple(2.0);
        let mut rng = StdRng::seed_from_u64(42);

        let center = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(center.origin(), Vec3::ZERO);
        assert!(approx(center.direction(), Vec3::new(0.0, 0.0, -1.0)));

        // 90 degree fov: viewport is 2 tall, aspect 2 makes it 4 wide
        let lower_left = camera.get_ray(0.0, 0.0, &mut rng);
        assert!(approx(lower_left.direction(), Vec3::new(-2.0, -1.0, -1.0)));

        let upper_right = camera.get_ray(1.0, 1.0, &mut rng);
        assert!(approx(upper_right.direction(), Vec3::new(2.0, 1.0, -1.0)));
    }

    #[test]
    fn test_pinhole_draws_no_randomness() {
        let camera = Camera::simple(16.0 / 9.0);
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(1);

        camera.get_ray(0.3, 0.7, &mut a);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_basis_is_orthonormal_and_right_handed() {
        let config = CameraConfig::default().with_position(
            Vec3::new(3.0, 3.0, 2.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
        );
        let camera = Camera::new(&config);

        assert!((camera.u.length() - 1.0).abs() < 1e-5);
        assert!((camera.v.length() - 1.0).abs() < 1e-5);
        assert!(camera.u.dot(camera.v).abs() < 1e-5);
        assert!(camera.u.dot(camera.w).abs() < 1e-5);
        assert!(approx(camera.u.cross(camera.v), camera.w));
        // Up stays up
        assert!(camera.v.y > 0.0);
    }

    #[test]
    fn test_camera_looking_down_x() {
        let config = CameraConfig::default().with_position(Vec3::ZERO, Vec3::X, Vec3::Y);
        let camera = Camera::new(&config);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(approx(camera.forward(), Vec3::X));
        // Right edge of the image lies toward +Z when looking down +X with +Y up
        let right = camera.get_ray(1.0, 0.5, &mut rng);
        assert!(right.direction().z > 0.0);
    }

    #[test]
    fn test_thin_lens_rays_converge_on_focus_plane() {
        let config = CameraConfig::default().with_lens(40.0, 0.5, 4.0);
        let camera = Camera::new(&config);
        let mut rng = StdRng::seed_from_u64(3);

        let mut origins_differ = false;
        for _ in 0..50 {
            let ray = camera.get_ray(0.25, 0.6, &mut rng);
            let offset = ray.origin() - camera.origin();
            assert!(offset.length() <= camera.lens_radius() + 1e-6);
            assert!(offset.z.abs() < 1e-6);
            origins_differ |= offset.length() > 1e-4;

            // Every ray passes through the same point on the focus plane (z = -4)
            let focus_point = ray.at(1.0);
            let pinhole = camera.lower_left_corner + 0.25 * camera.horizontal + 0.6 * camera.vertical;
            assert!(approx(focus_point, pinhole));
        }
        assert!(origins_differ);
    }

    #[test]
    fn test_validate() {
        assert!(CameraConfig::default().validate().is_ok());

        let bad_fov = CameraConfig::default().with_lens(180.0, 0.0, 1.0);
        assert!(matches!(bad_fov.validate(), Err(ConfigError::FieldOfView(_))));

        let bad_focus = CameraConfig::default().with_lens(90.0, 0.0, 0.0);
        assert!(matches!(bad_focus.validate(), Err(ConfigError::FocusDistance(_))));

        let bad_aperture = CameraConfig::default().with_lens(90.0, -1.0, 1.0);
        assert!(matches!(bad_aperture.validate(), Err(ConfigError::Aperture(_))));

        let bad_aspect = CameraConfig::default().with_aspect_ratio(0.0);
        assert!(matches!(bad_aspect.validate(), Err(ConfigError::AspectRatio(_))));

        let degenerate = CameraConfig::default().with_position(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert!(matches!(degenerate.validate(), Err(ConfigError::DegenerateView)));
    }

    #[test]
    fn test_validate_rejects_up_parallel_to_view() {
        let top_down = CameraConfig::default().with_position(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::Y);
        assert_eq!(top_down.validate(), Err(ConfigError::DegenerateView));

        let bottom_up = CameraConfig::default().with_position(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert_eq!(bottom_up.validate(), Err(ConfigError::DegenerateView));

        let no_up = CameraConfig::default().with_position(Vec3::ZERO, -Vec3::Z, Vec3::ZERO);
        assert_eq!(no_up.validate(), Err(ConfigError::DegenerateView));

        // Tilting up off the view axis gives a usable basis again
        let tilted = CameraConfig::default().with_position(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, -Vec3::Z);
        assert!(tilted.validate().is_ok());
        let camera = Camera::new(&tilted);
        assert!(camera.u.is_finite() && camera.v.is_finite());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: CameraConfig =
            serde_json::from_str(r#"{ "look_from": [13.0, 2.0, 3.0], "vertical_fov_degrees": 20.0 }"#)
                .unwrap();

        assert_eq!(config.look_from, Vec3::new(13.0, 2.0, 3.0));
        assert_eq!(config.vertical_fov_degrees, 20.0);
        assert_eq!(config.look_at, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(config.aperture, 0.0);
    }
}
