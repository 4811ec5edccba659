//! Geometry and cosmology kernel for catalog cross-matching.
//!
//! Pure math, no state, no I/O. Three concerns:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`sphere`] | great-circle distance on the celestial sphere |
//! | [`cosmo`] | angular-diameter distance, assumed cosmology constants |
//! | [`projection`] | Mollweide projection angle (Newton iteration) |
//!
//! All angular inputs and outputs are documented per function; the kernel
//! never converts units on the caller's behalf.

pub mod constants;
pub mod cosmo;
pub mod projection;
pub mod sphere;

pub use cosmo::angular_diameter_distance;
pub use projection::mollweide_theta;
pub use sphere::great_circle_distance;
