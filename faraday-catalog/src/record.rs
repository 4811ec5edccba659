//! Per-object catalog records and the proximity predicates on them.

use faraday_core::constants::{DEG_TO_RAD, RAD_TO_DEG};
use faraday_core::great_circle_distance;

/// One astronomical object.
///
/// Positional identity is (`ra`, `dec`) in degrees. Which survey scalars are
/// meaningful depends on the owning catalog's kind: galaxy catalogs populate
/// `redshift`/`abs_mag`/`color`/`stellar_mass`, rotation-measure catalogs
/// populate `gal_lon`/`gal_lat`/`rm`. Everything from `rm_mean` on is
/// derived: the geometry pass fills the distance, projection and `cos_dec`
/// fields once at load time, and the statistics passes overwrite their own
/// disjoint subsets on each run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SourceRecord {
    /// Right ascension, degrees.
    pub ra: f64,
    /// Declination, degrees.
    pub dec: f64,
    pub redshift: f64,
    /// Absolute Petrosian r-band magnitude.
    pub abs_mag: f64,
    /// u−b color index.
    pub color: f64,
    /// log10 stellar mass.
    pub stellar_mass: f64,
    /// Galactic longitude, degrees.
    pub gal_lon: f64,
    /// Galactic latitude, degrees.
    pub gal_lat: f64,
    /// Rotation measure, rad/m².
    pub rm: f64,
    /// Mean RM of annulus neighbors.
    pub rm_mean: f64,
    /// `rm - rm_mean`.
    pub rm_delta: f64,
    /// Mean RM of the K nearest neighbors.
    pub rm_mean_nn: f64,
    /// `rm - rm_mean_nn`.
    pub rm_delta_nn: f64,
    /// Sample standard deviation of the K nearest neighbors.
    pub rm_sd_nn: f64,
    /// Median RM of the K nearest neighbors.
    pub rm_median: f64,
    /// `rm - rm_median`.
    pub rm_median_delta: f64,
    /// Comoving distance, kpc.
    pub comoving_d: f64,
    /// Angular-diameter distance, kpc.
    pub ang_diam_d: f64,
    /// Mollweide projection angle from `dec`, radians.
    pub mollweide_theta: f64,
    /// Mollweide projection angle from `gal_lat`, radians.
    pub mollweide_theta_gal: f64,
    /// Cached cos(dec).
    pub cos_dec: f64,
    /// Number of neighbors found by the annulus pass.
    pub neighbor_count: u32,
}

impl SourceRecord {
    /// Minimal constructor for a freshly ingested position; derived fields
    /// stay zero until the geometry pass runs.
    pub fn at(ra: f64, dec: f64) -> Self {
        Self {
            ra,
            dec,
            ..Self::default()
        }
    }

    /// Whether the comoving impact parameter between this record and a
    /// reference record falls below `threshold_kpc`.
    ///
    /// The impact parameter is the great-circle separation scaled by the
    /// *reference* record's angular-diameter distance. The declination
    /// difference alone bounds the separation from below, so a cheap
    /// `|Δdec| · d_A > threshold` test rejects clearly distant pairs before
    /// any trigonometry runs.
    pub fn impact_within(&self, reference: &SourceRecord, threshold_kpc: f64) -> bool {
        let d_ra = (self.ra - reference.ra) * DEG_TO_RAD;
        let d_dec = (self.dec - reference.dec) * DEG_TO_RAD;
        if d_dec.abs() * reference.ang_diam_d > threshold_kpc {
            return false;
        }

        let separation = great_circle_distance(d_ra, d_dec, self.cos_dec, reference.cos_dec);
        separation * reference.ang_diam_d < threshold_kpc
    }

    /// Angular separation in degrees, when below `threshold_deg`.
    ///
    /// Same prefilter pattern as [`SourceRecord::impact_within`] but in the
    /// degree domain, returning the separation itself for neighbor sorting.
    pub fn separation_within(&self, other: &SourceRecord, threshold_deg: f64) -> Option<f64> {
        let d_ra = self.ra - other.ra;
        let d_dec = self.dec - other.dec;
        if d_dec.abs() > threshold_deg {
            return None;
        }

        let separation = RAD_TO_DEG
            * great_circle_distance(
                d_ra * DEG_TO_RAD,
                d_dec * DEG_TO_RAD,
                self.cos_dec,
                other.cos_dec,
            );
        if separation < threshold_deg {
            Some(separation)
        } else {
            None
        }
    }
}
