//! Loading scenes from JSON files.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::description::SceneDescription;
use crate::Scene;

/// Errors that can occur while loading or building a scene.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere {sphere} references unknown material \"{name}\"")]
    UnknownMaterial { sphere: usize, name: String },

    #[error("Unknown built-in scene \"{0}\"")]
    UnknownScene(String),
}

/// Result type for scene loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<Scene> {
    let path = path.as_ref();
    log::info!("Loading scene from {}", path.display());

    let content = fs::read_to_string(path)?;
    load_scene_from_str(&content)
}

/// Load a scene from JSON text.
pub fn load_scene_from_str(content: &str) -> LoadResult<Scene> {
    SceneDescription::from_json(content)?.build()
}
