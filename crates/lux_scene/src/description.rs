//! Serializable scene description.
//!
//! Materials are declared once by name and referenced from spheres, so a
//! single material instance can be shared by any number of spheres.

use std::collections::BTreeMap;
use std::sync::Arc;

use lux_math::{Color, Point3};
use lux_renderer::{
    Absorbing, Camera, CameraConfig, Dielectric, HittableList, Lambertian, Material, Metal,
    Sphere,
};
use serde::{Deserialize, Serialize};

use crate::loader::{LoadError, LoadResult};
use crate::Scene;

/// A material definition, tagged by `"type"` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f64,
    },
    Dielectric {
        refraction_index: f64,
    },
    Absorbing,
}

impl MaterialDesc {
    /// Create the renderer material for this description.
    pub fn instantiate(&self) -> Arc<dyn Material> {
        match self {
            MaterialDesc::Lambertian { albedo } => Arc::new(Lambertian::new(*albedo)),
            MaterialDesc::Metal { albedo, fuzz } => Arc::new(Metal::new(*albedo, *fuzz)),
            MaterialDesc::Dielectric { refraction_index } => {
                Arc::new(Dielectric::new(*refraction_index))
            }
            MaterialDesc::Absorbing => Arc::new(Absorbing),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    pub radius: f64,
    /// Name of an entry in [`SceneDescription::materials`]
    pub material: String,
}

/// Everything needed to build a [`Scene`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub camera: CameraConfig,
    pub materials: BTreeMap<String, MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json(json: &str) -> LoadResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this description as pretty-printed JSON.
    pub fn to_json(&self) -> LoadResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDesc) -> &mut Self {
        self.materials.insert(name.into(), material);
        self
    }

    pub fn add_sphere(
        &mut self,
        center: Point3,
        radius: f64,
        material: impl Into<String>,
    ) -> &mut Self {
        self.spheres.push(SphereDesc {
            center,
            radius,
            material: material.into(),
        });
        self
    }

    /// Instantiate the camera and world.
    ///
    /// Each named material is created exactly once and shared by every
    /// sphere that references it.
    pub fn build(&self) -> LoadResult<Scene> {
        let materials: BTreeMap<&str, Arc<dyn Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), desc.instantiate()))
            .collect();

        let mut world = HittableList::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let material = materials.get(sphere.material.as_str()).ok_or_else(|| {
                LoadError::UnknownMaterial {
                    sphere: index,
                    name: sphere.material.clone(),
                }
            })?;

            if sphere.radius < 0.0 {
                log::warn!("Sphere {} has negative radius {}, clamping to 0", index, sphere.radius);
            }
            world.add(Arc::new(Sphere::new(
                sphere.center,
                sphere.radius,
                Arc::clone(material),
            )));
        }

        let unused = self
            .materials
            .keys()
            .filter(|name| !self.spheres.iter().any(|s| &s.material == *name))
            .count();
        if unused > 0 {
            log::debug!("{} materials are not referenced by any sphere", unused);
        }

        log::info!(
            "Built scene with {} spheres and {} materials",
            world.len(),
            materials.len()
        );

        Ok(Scene::new(Camera::from_config(self.camera.clone()), world))
    }
}
