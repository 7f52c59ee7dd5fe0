//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use lux_math::{Interval, Point3};
use std::sync::Arc;

/// A sphere primitive.
///
/// The material is a shared handle so many spheres can reference one
/// material instance.
#[derive(Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Arc<dyn Material> {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let point = ray.at(root);
        let outward_normal = (point - self.center) / self.radius;

        Some(HitRecord::new(
            ray,
            root,
            point,
            outward_normal,
            self.material.as_ref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use lux_math::{Color, Vec3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn unit_test_sphere() -> Sphere {
        Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
        )
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_test_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("should hit front surface");

        assert!((rec.t - 0.5).abs() < 1e-12);
        assert!((rec.point - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-12);
        assert!((rec.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_nearest_root_excluded() {
        let sphere = unit_test_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        // Near root 0.5 excluded, and the far root 1.5 lies past the bound
        assert!(sphere.hit(&ray, Interval::new(0.6, 1.4)).is_none());

        // With a wider bound the far root is reported as a back-face hit
        let rec = sphere
            .hit(&ray, Interval::new(0.6, 10.0))
            .expect("far root is inside (0.6, 10)");
        assert!((rec.t - 1.5).abs() < 1e-12);
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_test_sphere();

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_sphere_boundary_root_rejected() {
        let sphere = unit_test_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        // Exclusive bounds: a root sitting exactly on either end is not a hit
        assert!(sphere.hit(&ray, Interval::new(0.001, 0.5)).is_none());
        assert!(sphere.hit(&ray, Interval::new(0.5, 1.5)).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = unit_test_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 0.0));

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("ray from center must exit");

        assert!((rec.t - 0.5).abs() < 1e-12);
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = Sphere::new(
            Vec3::ZERO,
            -2.0,
            Arc::new(Lambertian::new(Color::ONE)),
        );
        assert_eq!(sphere.radius(), 0.0);
    }

    #[test]
    fn test_random_hits_lie_on_surface() {
        let sphere = Sphere::new(
            Vec3::new(0.3, -0.2, -3.0),
            1.25,
            Arc::new(Lambertian::new(Color::ONE)),
        );
        let mut rng = StdRng::seed_from_u64(42);
        let mut hits = 0;

        for _ in 0..2000 {
            let origin = Vec3::new(
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-1.0..1.0),
            );
            let target = Vec3::new(
                rng.gen_range(-1.0..1.5),
                rng.gen_range(-1.5..1.0),
                rng.gen_range(-4.0..-2.0),
            );
            let ray = Ray::new(origin, target - origin);

            if let Some(rec) = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)) {
                hits += 1;
                let dist = (rec.point - sphere.center()).length();
                assert!((dist - sphere.radius()).abs() < 1e-9);
                assert!((rec.normal.length() - 1.0).abs() < 1e-9);
                assert!(ray.direction().dot(rec.normal) <= 0.0);

                let outward = (rec.point - sphere.center()) / sphere.radius();
                assert_eq!(rec.front_face, ray.direction().dot(outward) < 0.0);
            }
        }

        assert!(hits > 100, "only {} hits", hits);
    }
}
