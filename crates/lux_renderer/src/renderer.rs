//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by a bounce budget
//! - Sky gradient background
//! - Anti-aliasing via multi-sampling

use crate::{Camera, Color, Hittable, ImageBuffer, Ray};
use lux_math::Interval;
use rand::RngCore;
use std::time::Instant;

/// Lower bound on hit distance, suppresses self-intersection ("shadow acne").
pub const T_MIN: f64 = 0.001;

const SKY_ZENITH: Color = Color::new(0.5, 0.7, 1.0);

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and multiplying in each attenuation.
/// A `depth` of zero always yields black.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, world, depth - 1, rng)
        }
        None => Color::ZERO,
    }
}

/// Background seen by rays that escape the scene.
///
/// White at the horizon blending to light blue straight up.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::ONE + a * SKY_ZENITH
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(i, j, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth(), rng);
    }

    camera.pixel_samples_scale() * pixel_color
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded reference renderer: pixels are traced in row-major
/// order using one random stream.
pub fn render(camera: &Camera, world: &dyn Hittable, rng: &mut dyn RngCore) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();
    let mut image = ImageBuffer::new(width, height);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth()
    );
    let start = Instant::now();

    for j in 0..height {
        log::debug!("Scanlines remaining: {}", height - j);
        for i in 0..width {
            let color = render_pixel(camera, world, i, j, rng);
            image.set(i, j, color);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    image
}
