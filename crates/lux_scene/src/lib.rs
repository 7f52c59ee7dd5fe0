//! Lux scene - scene descriptions, loading and built-in scenes.
//!
//! This crate provides:
//!
//! - **Scene description types**: serde-friendly `SceneDescription`,
//!   `MaterialDesc` and `SphereDesc`
//! - **Loading**: JSON scene files turned into a ready-to-render [`Scene`]
//! - **Built-in scenes**: `materials` and `cover`
//!
//! # Example
//!
//! ```ignore
//! use lux_scene::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} objects", scene.world.len());
//! ```

pub mod builtin;
pub mod description;
pub mod loader;

pub use builtin::{builtin, cover_scene, materials_scene, BUILTIN_SCENES};
pub use description::{MaterialDesc, SceneDescription, SphereDesc};
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};

use lux_renderer::{Camera, HittableList};

/// A camera paired with the world it looks at.
#[derive(Clone)]
pub struct Scene {
    pub camera: Camera,
    pub world: HittableList,
}

impl Scene {
    pub fn new(camera: Camera, world: HittableList) -> Self {
        Self { camera, world }
    }
}
