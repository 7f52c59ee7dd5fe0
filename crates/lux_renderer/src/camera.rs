//! Camera for ray generation.

use crate::Ray;
use lux_math::{Point3, Vec3, Vec3Ext};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// User-facing camera settings.
///
/// Every field is optional when deserializing; missing fields take the
/// defaults listed on [`CameraConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Random samples taken for each pixel
    pub samples_per_pixel: u32,
    /// Maximum number of bounces per camera ray
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Point the camera is looking from
    pub lookfrom: Point3,
    /// Point the camera is looking at
    pub lookat: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,
    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f64,
    /// Distance from `lookfrom` to the plane of perfect focus
    pub focus_dist: f64,
    /// Jitter samples inside each pixel; when false every sample goes
    /// through the pixel center
    pub antialias: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: Point3::ZERO,
            lookat: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            antialias: true,
        }
    }
}

/// Camera for generating rays into the scene.
///
/// All derived viewport state is recomputed whenever the configuration
/// changes, so a constructed camera is always ready to render.
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,

    // Derived by initialize()
    image_width: u32,
    image_height: u32,
    samples_per_pixel: u32,
    pixel_samples_scale: f64,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::from_config(CameraConfig::default())
    }

    /// Create a camera from explicit settings.
    pub fn from_config(config: CameraConfig) -> Self {
        let mut camera = Self {
            config,
            image_width: 1,
            image_height: 1,
            samples_per_pixel: 1,
            pixel_samples_scale: 1.0,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        };
        camera.initialize();
        camera
    }

    /// Set image aspect ratio and width. Height is derived.
    pub fn with_resolution(mut self, aspect_ratio: f64, image_width: u32) -> Self {
        self.config.aspect_ratio = aspect_ratio;
        self.config.image_width = image_width;
        self.initialize();
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.config.samples_per_pixel = samples_per_pixel;
        self.config.max_depth = max_depth;
        self.initialize();
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, lookfrom: Point3, lookat: Point3, vup: Vec3) -> Self {
        self.config.lookfrom = lookfrom;
        self.config.lookat = lookat;
        self.config.vup = vup;
        self.initialize();
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_dist: f64) -> Self {
        self.config.vfov = vfov;
        self.config.defocus_angle = defocus_angle;
        self.config.focus_dist = focus_dist;
        self.initialize();
        self
    }

    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.config.antialias = antialias;
        self.initialize();
        self
    }

    /// Replace the whole configuration.
    pub fn set_config(&mut self, config: CameraConfig) {
        self.config = config;
        self.initialize();
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.config.max_depth
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn pixel_samples_scale(&self) -> f64 {
        self.pixel_samples_scale
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Orthonormal camera frame `(u, v, w)`: right, up, and backward.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Center of the upper-left pixel.
    pub fn pixel00_loc(&self) -> Point3 {
        self.pixel00_loc
    }

    /// Horizontal and vertical offsets between neighboring pixel centers.
    pub fn pixel_deltas(&self) -> (Vec3, Vec3) {
        (self.pixel_delta_u, self.pixel_delta_v)
    }

    /// Defocus disk basis vectors, scaled by the disk radius.
    pub fn defocus_disk(&self) -> (Vec3, Vec3) {
        (self.defocus_disk_u, self.defocus_disk_v)
    }

    fn initialize(&mut self) {
        let config = &self.config;

        self.image_width = config.image_width.max(1);
        if self.image_width != config.image_width {
            log::warn!("image_width of 0 requested, rendering 1 pixel wide");
        }
        let image_width = self.image_width;
        let aspect_ratio = if config.aspect_ratio.is_finite() && config.aspect_ratio > 0.0 {
            config.aspect_ratio
        } else {
            log::warn!("aspect_ratio of {} is not usable, falling back to 1.0", config.aspect_ratio);
            1.0
        };
        self.image_height = ((image_width as f64 / aspect_ratio) as u32).max(1);

        self.samples_per_pixel = config.samples_per_pixel.max(1);
        if self.samples_per_pixel != config.samples_per_pixel {
            log::warn!("samples_per_pixel of 0 requested, taking 1 sample per pixel");
        }
        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f64;

        self.center = config.lookfrom;

        // Calculate viewport dimensions
        let h = (config.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_dist;
        let viewport_width = viewport_height * (image_width as f64 / self.image_height as f64);

        // Calculate camera basis vectors
        self.w = (config.lookfrom - config.lookat).normalize();
        self.u = config.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Across the horizontal edge, and down the vertical edge
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        self.pixel_delta_u = viewport_u / image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        let viewport_upper_left =
            self.center - config.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let defocus_radius = config.focus_dist * (config.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The ray starts on the defocus disk (or at the camera center for a
    /// pinhole camera) and passes through a jittered point inside the pixel.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.config.antialias {
            sample_square(rng)
        } else {
            Vec3::ZERO
        };

        let pixel_sample = self.pixel00_loc
            + ((i as f64) + offset.x) * self.pixel_delta_u
            + ((j as f64) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.config.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = Vec3::random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample a random point in the unit square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_default_config() {
        let config = CameraConfig::default();
        assert_eq!(config.aspect_ratio, 1.0);
        assert_eq!(config.image_width, 100);
        assert_eq!(config.samples_per_pixel, 10);
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.vfov, 90.0);
        assert_eq!(config.lookfrom, Point3::ZERO);
        assert_eq!(config.lookat, Point3::new(0.0, 0.0, -1.0));
        assert_eq!(config.vup, Vec3::Y);
        assert_eq!(config.defocus_angle, 0.0);
        assert_eq!(config.focus_dist, 10.0);
        assert!(config.antialias);
    }

    #[test]
    fn test_config_partial_json() {
        let config: CameraConfig =
            serde_json::from_str(r#"{ "image_width": 400, "lookfrom": [1.0, 2.0, 3.0] }"#)
                .expect("valid config");

        assert_eq!(config.image_width, 400);
        assert_eq!(config.lookfrom, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(config.samples_per_pixel, 10);
        assert_eq!(config.vfov, 90.0);
    }

    #[test]
    fn test_image_height_floor_minimum_one() {
        let camera = Camera::new().with_resolution(2.0, 2);
        assert_eq!(camera.image_height(), 1);

        let camera = Camera::new().with_resolution(2.0, 401);
        assert_eq!(camera.image_height(), 200);

        let camera = Camera::new().with_resolution(10.0, 2);
        assert_eq!(camera.image_height(), 1);
    }

    #[test]
    fn test_invalid_aspect_ratio_falls_back_to_square() {
        for aspect_ratio in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let camera = Camera::new().with_resolution(aspect_ratio, 40);
            assert_eq!(camera.image_width(), 40);
            assert_eq!(camera.image_height(), 40);
            assert!(camera.pixel_deltas().1.is_finite());
        }
    }

    #[test]
    fn test_samples_scale() {
        let camera = Camera::new().with_quality(4, 5);
        assert_eq!(camera.pixel_samples_scale(), 0.25);
        assert_eq!(camera.max_depth(), 5);

        let camera = Camera::new().with_quality(0, 5);
        assert_eq!(camera.samples_per_pixel(), 1);
        assert_eq!(camera.pixel_samples_scale(), 1.0);
    }

    #[test]
    fn test_camera_basis() {
        let camera = Camera::new().with_position(
            Point3::new(0.0, 0.0, 5.0),
            Point3::ZERO,
            Vec3::Y,
        );
        let (u, v, w) = camera.basis();

        assert_eq!(camera.center(), Point3::new(0.0, 0.0, 5.0));
        assert_vec_eq(w, Vec3::Z);
        assert_vec_eq(u, Vec3::X);
        assert_vec_eq(v, Vec3::Y);
    }

    #[test]
    fn test_viewport_geometry() {
        // 90 degree fov, focus at 1: viewport is 2 x 2 for a square image
        let camera = Camera::new()
            .with_resolution(1.0, 4)
            .with_lens(90.0, 0.0, 1.0);
        let (du, dv) = camera.pixel_deltas();

        assert_vec_eq(du, Vec3::new(0.5, 0.0, 0.0));
        assert_vec_eq(dv, Vec3::new(0.0, -0.5, 0.0));
        assert_vec_eq(camera.pixel00_loc(), Point3::new(-0.75, 0.75, -1.0));
    }

    #[test]
    fn test_pinhole_ray_through_pixel_center() {
        let camera = Camera::new()
            .with_resolution(1.0, 4)
            .with_lens(90.0, 0.0, 1.0)
            .with_antialias(false);
        let mut rng = StdRng::seed_from_u64(0);

        let ray = camera.get_ray(0, 0, &mut rng);
        assert_eq!(ray.origin(), camera.center());
        assert_vec_eq(ray.direction(), Vec3::new(-0.75, 0.75, -1.0));

        let ray = camera.get_ray(3, 3, &mut rng);
        assert_vec_eq(ray.direction(), Vec3::new(0.75, -0.75, -1.0));
    }

    #[test]
    fn test_jitter_stays_inside_pixel() {
        let camera = Camera::new()
            .with_resolution(1.0, 4)
            .with_lens(90.0, 0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(42);
        let center = Vec3::new(-0.25, 0.25, -1.0);

        for _ in 0..200 {
            let ray = camera.get_ray(1, 1, &mut rng);
            let d = ray.direction();
            // Focus plane is at z = -1 so the direction ends on it
            assert!((d.x - center.x).abs() <= 0.25);
            assert!((d.y - center.y).abs() <= 0.25);
            assert_eq!(d.z, -1.0);
        }
    }

    #[test]
    fn test_defocus_origin_on_disk() {
        let camera = Camera::new()
            .with_resolution(1.0, 10)
            .with_lens(90.0, 10.0, 3.4);
        let (disk_u, _) = camera.defocus_disk();
        let radius = disk_u.length();
        let mut rng = StdRng::seed_from_u64(7);

        assert!((radius - 3.4 * 5f64.to_radians().tan()).abs() < 1e-12);
        for _ in 0..200 {
            let ray = camera.get_ray(5, 5, &mut rng);
            let offset = ray.origin() - camera.center();
            assert!(offset.length() < radius);
            assert!(offset.z.abs() < 1e-12);
        }
    }

    #[test]
    fn test_set_config_recomputes() {
        let mut camera = Camera::new();
        assert_eq!(camera.image_height(), 100);

        camera.set_config(CameraConfig {
            image_width: 300,
            aspect_ratio: 3.0,
            ..CameraConfig::default()
        });
        assert_eq!(camera.image_width(), 300);
        assert_eq!(camera.image_height(), 100);
    }
}
