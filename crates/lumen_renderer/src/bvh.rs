//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Optional replacement for the linear [`Scene`] scan. It reports the same nearest
//! hit, only faster on scenes with many primitives.

use crate::{HitRecord, Hittable, Scene};
use lumen_math::{Aabb, Interval, Ray};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// BVH node - either a branch with two children or a leaf with primitives.
pub enum Bvh {
    Branch {
        left: Box<Bvh>,
        right: Box<Bvh>,
        bbox: Aabb,
    },
    Leaf {
        objects: Vec<Box<dyn Hittable>>,
        bbox: Aabb,
    },
    Empty,
}

impl Bvh {
    /// Build a BVH over `objects`.
    pub fn new(objects: Vec<Box<dyn Hittable>>) -> Self {
        if objects.is_empty() {
            return Bvh::Empty;
        }

        let count = objects.len();
        let bvh = Self::build(objects);
        log::debug!("Built BVH over {} primitives, depth {}", count, bvh.depth());
        bvh
    }

    pub fn from_scene(scene: Scene) -> Self {
        Self::new(scene.into_objects())
    }

    /// Number of levels below and including this node.
    pub fn depth(&self) -> usize {
        match self {
            Bvh::Empty => 0,
            Bvh::Leaf { .. } => 1,
            Bvh::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Median split on the longest axis of the primitive centroids.
    fn build(mut objects: Vec<Box<dyn Hittable>>) -> Self {
        let bbox = objects
            .iter()
            .fold(Aabb::EMPTY, |acc, o| Aabb::surrounding(&acc, &o.bounding_box()));

        if objects.len() <= LEAF_MAX_SIZE {
            return Bvh::Leaf { objects, bbox };
        }

        let centroid_bounds = objects.iter().fold(Aabb::EMPTY, |acc, o| {
            let c = o.bounding_box().centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        objects.sort_unstable_by(|a, b| {
            let a_val = a.bounding_box().centroid()[axis];
            let b_val = b.bounding_box().centroid()[axis];
            a_val.total_cmp(&b_val)
        });

        let right_objects = objects.split_off(objects.len() / 2);

        Bvh::Branch {
            left: Box::new(Self::build(objects)),
            right: Box::new(Self::build(right_objects)),
            bbox,
        }
    }
}

impl Hittable for Bvh {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Bvh::Empty => None,

            Bvh::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let mut closest = None;
                let mut closest_so_far = ray_t.max;
                for obj in objects {
                    if let Some(rec) = obj.hit(ray, Interval::new(ray_t.min, closest_so_far)) {
                        closest_so_far = rec.t;
                        closest = Some(rec);
                    }
                }
                closest
            }

            Bvh::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let hit_left = left.hit(ray, ray_t);

                // Only check right up to closest hit
                let right_max = hit_left.as_ref().map_or(ray_t.max, |rec| rec.t);
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max));

                hit_right.or(hit_left)
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            Bvh::Empty => Aabb::EMPTY,
            Bvh::Leaf { bbox, .. } | Bvh::Branch { bbox, .. } => *bbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Material, Sphere};
    use lumen_math::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn gray() -> Material {
        Material::lambertian(Color::new(0.5, 0.5, 0.5))
    }

    fn random_spheres(seed: u64, count: usize) -> Vec<Sphere> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                let center = Vec3::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-30.0..-5.0),
                );
                Sphere::new(center, rng.gen_range(0.2..1.5), gray())
            })
            .collect()
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = Bvh::new(vec![]);
        assert!(matches!(bvh, Bvh::Empty));
        assert!(bvh.hit(&Ray::new(Vec3::ZERO, -Vec3::Z), Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_bvh_single_sphere() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, gray()));
        let bvh = Bvh::from_scene(scene);

        assert!(matches!(bvh, Bvh::Leaf { .. }));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = bvh.hit(&ray, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_bvh_splits_large_sets() {
        let objects: Vec<Box<dyn Hittable>> = random_spheres(1, 20)
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn Hittable>)
            .collect();
        let bvh = Bvh::new(objects);

        assert!(matches!(bvh, Bvh::Branch { .. }));
        assert!(bvh.depth() >= 3);
    }

    #[test]
    fn test_bvh_matches_linear_scan() {
        let spheres = random_spheres(2, 60);

        let mut scene = Scene::new();
        let mut for_bvh = Scene::new();
        for s in spheres {
            scene.add(s.clone());
            for_bvh.add(s);
        }
        let bvh = Bvh::from_scene(for_bvh);

        let mut rng = StdRng::seed_from_u64(3);
        let range = Interval::new(0.001, f32::INFINITY);
        for _ in 0..500 {
            let dir = Vec3::new(rng.gen_range(-0.8..0.8), rng.gen_range(-0.8..0.8), -1.0);
            let ray = Ray::new(Vec3::ZERO, dir);

            match (scene.hit(&ray, range), bvh.hit(&ray, range)) {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    assert!((a.t - b.t).abs() < 1e-5);
                    assert!((a.point - b.point).length() < 1e-4);
                }
                (a, b) => panic!("linear {:?} vs bvh {:?}", a.map(|r| r.t), b.map(|r| r.t)),
            }
        }
    }
}
