//! Sampling and optics helpers that glam does not provide.

use crate::Vec3;
use rand::Rng;

/// Components with magnitude below this are treated as zero.
const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Squared lengths at or below this underflow when normalized.
const MIN_SAMPLE_LEN_SQ: f64 = 1e-160;

pub trait Vec3Ext: Sized {
    /// True when every component is within `1e-8` of zero.
    fn near_zero(&self) -> bool;

    /// A vector with each component drawn uniformly from `[min, max)`.
    fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Self;

    /// A uniformly distributed direction on the unit sphere.
    fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// A uniformly distributed point inside the unit disk in the x-y plane.
    fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl Vec3Ext for Vec3 {
    fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO_EPSILON
            && self.y.abs() < NEAR_ZERO_EPSILON
            && self.z.abs() < NEAR_ZERO_EPSILON
    }

    fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Self {
        let span = max - min;
        Vec3::new(
            min + span * rng.gen::<f64>(),
            min + span * rng.gen::<f64>(),
            min + span * rng.gen::<f64>(),
        )
    }

    fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // Rejection sampling keeps the distribution uniform on the sphere
        loop {
            let p = Self::random_range(rng, -1.0, 1.0);
            let len_sq = p.length_squared();
            if MIN_SAMPLE_LEN_SQ < len_sq && len_sq <= 1.0 {
                return p / len_sq.sqrt();
            }
        }
    }

    fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let p = Vec3::new(
                rng.gen::<f64>() * 2.0 - 1.0,
                rng.gen::<f64>() * 2.0 - 1.0,
                0.0,
            );
            if p.length_squared() < 1.0 {
                return p;
            }
        }
    }
}

/// Reflect a vector about a normal: `v - 2(v·n)n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with relative index `eta_ratio`.
///
/// `uv` must be normalized and `n` must face against it.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, eta_ratio: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = eta_ratio * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_near_zero() {
        assert!(Vec3::ZERO.near_zero());
        assert!(Vec3::splat(9e-9).near_zero());
        assert!(Vec3::new(-9e-9, 0.0, 9e-9).near_zero());
        assert!(!Vec3::new(1e-8, 0.0, 0.0).near_zero());
        assert!(!Vec3::new(0.0, 0.0, -0.5).near_zero());
    }

    #[test]
    fn test_random_range_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = Vec3::random_range(&mut rng, -2.0, 3.0);
            for c in v.to_array() {
                assert!((-2.0..3.0).contains(&c));
            }
        }
    }

    #[test]
    fn test_random_unit_is_normalized() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = Vec3::random_unit(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_random_unit_covers_both_hemispheres() {
        let mut rng = StdRng::seed_from_u64(3);
        let ups = (0..1000)
            .filter(|_| Vec3::random_unit(&mut rng).y > 0.0)
            .count();
        assert!(ups > 350 && ups < 650, "ups = {}", ups);
    }

    #[test]
    fn test_random_in_unit_disk() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let p = Vec3::random_in_unit_disk(&mut rng);
            assert_eq!(p.z, 0.0);
            assert!(p.length_squared() < 1.0);
        }
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let n = Vec3::Y;
        assert_eq!(reflect(v, n), Vec3::new(1.0, 1.0, 0.0));

        // Head-on reflection reverses the vector
        assert_eq!(reflect(Vec3::NEG_Z, Vec3::Z), Vec3::Z);
    }

    #[test]
    fn test_refract_matched_index_passes_straight() {
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(uv, Vec3::Y, 1.0);
        assert!((out - uv).length() < 1e-12);
    }

    #[test]
    fn test_refract_bends_toward_normal() {
        // Entering a denser medium bends the ray toward the normal
        let uv = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(uv, Vec3::Y, 1.0 / 1.5);

        assert!((out.length() - 1.0).abs() < 1e-12);
        assert!(out.y < 0.0);
        assert!(out.x.abs() < uv.x.abs());
        // Snell: sin(out) = ratio * sin(in)
        assert!((out.x - uv.x / 1.5).abs() < 1e-12);
    }
}
