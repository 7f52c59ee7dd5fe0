//! Built-in demo scenes.

use std::sync::Arc;

use lux_math::{Color, Point3, Vec3, Vec3Ext};
use lux_renderer::{
    Camera, CameraConfig, Dielectric, HittableList, Lambertian, Material, Metal, Sphere,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::description::{MaterialDesc, SceneDescription};
use crate::loader::{LoadError, LoadResult};
use crate::Scene;

/// Names accepted by [`builtin`].
pub const BUILTIN_SCENES: &[&str] = &["materials", "cover"];

/// Look up a built-in scene by name. `seed` only affects randomized scenes.
pub fn builtin(name: &str, seed: u64) -> LoadResult<Scene> {
    match name {
        "materials" => materials_scene(),
        "cover" => Ok(cover_scene(seed)),
        other => Err(LoadError::UnknownScene(other.to_string())),
    }
}

/// Ground, a diffuse ball, a hollow glass ball and a fuzzy metal ball,
/// seen through a shallow depth of field.
pub fn materials_scene() -> LoadResult<Scene> {
    let mut desc = SceneDescription {
        camera: CameraConfig {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            vfov: 20.0,
            lookfrom: Point3::new(-2.0, 2.0, 1.0),
            lookat: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 10.0,
            focus_dist: 3.4,
            antialias: true,
        },
        ..SceneDescription::default()
    };

    desc.add_material("ground", MaterialDesc::Lambertian { albedo: Color::new(0.8, 0.8, 0.0) })
        .add_material("center", MaterialDesc::Lambertian { albedo: Color::new(0.1, 0.2, 0.5) })
        .add_material("glass", MaterialDesc::Dielectric { refraction_index: 1.5 })
        .add_material("bubble", MaterialDesc::Dielectric { refraction_index: 1.0 / 1.5 })
        .add_material(
            "gold",
            MaterialDesc::Metal {
                albedo: Color::new(0.8, 0.6, 0.2),
                fuzz: 1.0,
            },
        );

    desc.add_sphere(Point3::new(0.0, -100.5, -1.0), 100.0, "ground")
        .add_sphere(Point3::new(0.0, 0.0, -1.2), 0.5, "center")
        .add_sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, "glass")
        .add_sphere(Point3::new(-1.0, 0.0, -1.0), 0.4, "bubble")
        .add_sphere(Point3::new(1.0, 0.0, -1.0), 0.5, "gold");

    desc.build()
}

/// A field of small random spheres around three large ones.
///
/// Every small glass sphere shares one material instance.
pub fn cover_scene(seed: u64) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = HittableList::new();

    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground)));

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let clearing = Point3::new(4.0, 0.2, 0.0);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f64 = rng.gen();
            let center = Point3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );

            if (center - clearing).length() <= 0.9 {
                continue;
            }

            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                // Diffuse
                let albedo =
                    Color::random_range(&mut rng, 0.0, 1.0) * Color::random_range(&mut rng, 0.0, 1.0);
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = Color::random_range(&mut rng, 0.5, 1.0);
                let fuzz = rng.gen_range(0.0..0.5);
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                Arc::clone(&glass)
            };

            world.add(Arc::new(Sphere::new(center, 0.2, material)));
        }
    }

    world.add(Arc::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass)));
    world.add(Arc::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    log::info!("Created cover scene with {} objects (seed {})", world.len(), seed);

    let camera = Camera::new()
        .with_resolution(16.0 / 9.0, 1200)
        .with_quality(500, 50)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    Scene::new(camera, world)
}
