//! Cosmological distance relations.
//!
//! Comoving distances are not computed here; they arrive as a precomputed
//! column (the catalogs this kernel serves were built against the flat
//! ΛCDM parameters in [`crate::constants`]). The kernel only derives the
//! angular-diameter distance from them.

/// Angular-diameter distance from a comoving distance and redshift.
///
/// `comoving / (1 + z)`; the result carries the unit of `comoving`.
#[inline]
pub fn angular_diameter_distance(z: f64, comoving: f64) -> f64 {
    comoving / (1.0 + z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_redshift_is_identity() {
        assert_eq!(angular_diameter_distance(0.0, 1500.0), 1500.0);
    }

    #[test]
    fn scales_by_one_plus_z() {
        let d = angular_diameter_distance(0.5, 3000.0);
        assert!((d - 2000.0).abs() < 1e-12);
    }

    #[test]
    fn preserves_unit() {
        // 1.2 Gpc comoving at z = 0.2, still in the caller's unit.
        let d = angular_diameter_distance(0.2, 1.2e6);
        assert!((d - 1.0e6).abs() < 1e-6);
    }
}
