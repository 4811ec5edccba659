//! Great-circle distance on the celestial sphere.

/// Haversine great-circle distance between two sky positions.
///
/// Takes the coordinate differences and the cosines of both declinations,
/// all in radians, so callers iterating over a catalog can cache the trig.
/// Returns the separation in radians.
///
/// The haversine form stays numerically stable for very small separations
/// and near the poles, where the spherical law of cosines loses precision.
#[inline]
pub fn great_circle_distance(d_ra: f64, d_dec: f64, cos_dec1: f64, cos_dec2: f64) -> f64 {
    let a = libm::sin(d_dec / 2.0);
    let b = libm::sin(d_ra / 2.0);

    let c = libm::sqrt(a * a + cos_dec1 * cos_dec2 * b * b);

    2.0 * libm::asin(c)
}
