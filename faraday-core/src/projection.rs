//! Mollweide projection angle.
//!
//! The equal-area Mollweide projection maps declination to an auxiliary
//! angle θ through `2θ + sin 2θ = π·sin(dec)`, which has no closed form
//! and is solved by Newton iteration.

use crate::constants::{DEG_TO_RAD, MOLLWEIDE_EPSILON, MOLLWEIDE_POLE_DEG};

/// Solves `2θ + sin 2θ = π·sin(dec)` for the Mollweide auxiliary angle.
///
/// `dec_deg` is a declination (or galactic latitude) in degrees; the result
/// is θ in radians. Iterates until the Newton step falls below
/// [`MOLLWEIDE_EPSILON`]. Within [`MOLLWEIDE_POLE_DEG`] of either pole the
/// denominator `2 + 2·cos 2θ` approaches zero and the iteration stops
/// converging, so the angle itself is returned unrefined there.
pub fn mollweide_theta(dec_deg: f64) -> f64 {
    let mut theta = dec_deg * DEG_TO_RAD;
    if theta.abs() >= MOLLWEIDE_POLE_DEG * DEG_TO_RAD {
        return theta;
    }

    let pi_sin_dec = std::f64::consts::PI * theta.sin();
    loop {
        let (sin_2t, cos_2t) = (2.0 * theta).sin_cos();
        let delta = (2.0 * theta + sin_2t - pi_sin_dec) / (2.0 + 2.0 * cos_2t);
        theta -= delta;
        if delta.abs() < MOLLWEIDE_EPSILON {
            return theta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residual(dec_deg: f64, theta: f64) -> f64 {
        2.0 * theta + (2.0 * theta).sin() - std::f64::consts::PI * (dec_deg * DEG_TO_RAD).sin()
    }

    #[test]
    fn equator_maps_to_zero() {
        assert_eq!(mollweide_theta(0.0), 0.0);
    }

    #[test]
    fn satisfies_the_defining_equation() {
        for dec in [-80.0, -45.5, -10.0, 5.0, 30.0, 60.0, 85.0] {
            let theta = mollweide_theta(dec);
            let r = residual(dec, theta);
            assert!(r.abs() < 1e-6, "dec {}: residual {}", dec, r);
        }
    }

    #[test]
    fn antisymmetric() {
        for dec in [12.5, 47.0, 71.0] {
            let up = mollweide_theta(dec);
            let down = mollweide_theta(-dec);
            assert!((up + down).abs() < 1e-12, "dec {}", dec);
        }
    }

    #[test]
    fn monotone_in_declination() {
        let mut prev = mollweide_theta(-89.0);
        for step in 1..=178 {
            let theta = mollweide_theta(-89.0 + step as f64);
            assert!(theta > prev);
            prev = theta;
        }
    }

    #[test]
    fn pole_guard_short_circuits() {
        // Past the guard the declination comes back in radians, unrefined.
        assert_eq!(mollweide_theta(89.95), 89.95 * DEG_TO_RAD);
        assert_eq!(mollweide_theta(-90.0), -90.0 * DEG_TO_RAD);
        assert!((mollweide_theta(90.0) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn theta_exceeds_declination_off_the_equator() {
        // The equal-area condition pushes θ poleward of the declination.
        let theta = mollweide_theta(40.0);
        assert!(theta > 40.0 * DEG_TO_RAD);
        assert!(theta < 90.0 * DEG_TO_RAD);
    }
}
