//! Lux math - vector, ray and interval primitives for path tracing.
//!
//! Everything is double precision. Points, directions and colors all share
//! the one [`Vec3`] value type; the [`Point3`] and [`Color`] aliases only
//! document which role a value plays at a call site.

pub use glam::{dvec3, DVec3};

mod interval;
mod ray;
mod vec3_ext;

pub use interval::Interval;
pub use ray::Ray;
pub use vec3_ext::{reflect, refract, Vec3Ext};

/// 3-component double precision vector.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB color, channels nominally in [0, 1].
pub type Color = Vec3;
