//! Simple path tracer example.
//!
//! Renders three spheres on a ground plane at low quality and saves a PPM.
//!
//! Run with: cargo run --release -p lux_renderer --example simple_render

use std::sync::Arc;

use lux_renderer::{
    render_parallel, Camera, Color, Dielectric, HittableList, Lambertian, Metal, Point3, Sphere,
    Vec3,
};

fn main() {
    env_logger::init();

    println!("Lux Path Tracer - Simple Example");
    println!("================================");

    let start = std::time::Instant::now();
    let world = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let camera = Camera::new()
        .with_resolution(16.0 / 9.0, 400)
        .with_quality(32, 10)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    println!(
        "Rendering {}x{} @ {} spp...",
        camera.image_width(),
        camera.image_height(),
        camera.samples_per_pixel()
    );

    let start = std::time::Instant::now();
    let image = render_parallel(&camera, &world, 0, 32);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    if let Err(e) = image.save(filename) {
        eprintln!("Failed to save image: {}", e);
        return;
    }
    println!("Saved to {}", filename);
}

fn build_scene() -> HittableList {
    let mut world = HittableList::new();

    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::splat(0.5))),
    )));

    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
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

    world
}
