//! Lux renderer - CPU path tracing.
//!
//! A Monte Carlo path tracer over spheres with diffuse, metal and glass
//! materials. Scenes are searched linearly; there is no acceleration
//! structure.
//!
//! Randomness is always passed in explicitly. [`render`] is the
//! single-threaded reference; [`render_parallel`] splits the image into
//! buckets that each own a seeded random stream.

mod bucket;
mod camera;
mod hittable;
mod material;
mod output;
mod renderer;
mod sphere;

pub use bucket::{
    bucket_seed, generate_buckets, render_bucket, render_parallel, Bucket, BucketResult,
    DEFAULT_BUCKET_SIZE,
};
pub use camera::{Camera, CameraConfig};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Absorbing, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use output::{color_to_rgb, linear_to_gamma, ImageBuffer, SaveError};
pub use renderer::{ray_color, render, render_pixel, sky_gradient, T_MIN};
pub use sphere::Sphere;

/// Re-export the math types used throughout the renderer API
pub use lux_math::{Color, Interval, Point3, Ray, Vec3};
