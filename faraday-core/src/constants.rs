pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Matter density parameter of the assumed cosmology.
pub const OMEGA_M: f64 = 0.272;

/// Dark-energy density parameter of the assumed cosmology.
pub const OMEGA_L: f64 = 0.734;

/// Hubble constant in km/s/Mpc.
pub const HUBBLE_0: f64 = 71.0;

/// Convergence bound for the Mollweide Newton iteration, in radians.
pub const MOLLWEIDE_EPSILON: f64 = 1e-7;

/// Declination (degrees) beyond which the Mollweide iteration short-circuits.
pub const MOLLWEIDE_POLE_DEG: f64 = 89.9;

/// Kiloparsecs per gigaparsec, for imported comoving-distance columns.
pub const KPC_PER_GPC: f64 = 1.0e6;
