//! Catalog tables: ordered record storage with copy-on-filter operations.

use faraday_core::constants::DEG_TO_RAD;
use faraday_core::mollweide_theta;

use crate::record::SourceRecord;

/// Which survey populated a catalog, and therefore which record scalars
/// are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    /// Optical galaxy catalog: redshift, magnitude, color, stellar mass.
    Galaxy,
    /// Radio rotation-measure catalog: galactic coordinates and RM.
    RotationMeasure,
}

impl CatalogKind {
    pub fn name(self) -> &'static str {
        match self {
            CatalogKind::Galaxy => "galaxy",
            CatalogKind::RotationMeasure => "rotation-measure",
        }
    }

    /// Stable numeric tag used by the snapshot format.
    pub fn code(self) -> u32 {
        match self {
            CatalogKind::Galaxy => 0,
            CatalogKind::RotationMeasure => 1,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(CatalogKind::Galaxy),
            1 => Some(CatalogKind::RotationMeasure),
            _ => None,
        }
    }
}

/// An ordered table of records of one kind.
///
/// Cardinality is always the number of populated records; there are no
/// gaps. `threshold` records the impact-parameter threshold (kpc) that
/// produced this generation, zero for unfiltered catalogs.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub kind: CatalogKind,
    pub threshold: f64,
    records: Vec<SourceRecord>,
}

impl Catalog {
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            threshold: 0.0,
            records: Vec::new(),
        }
    }

    pub fn with_capacity(kind: CatalogKind, capacity: usize) -> Self {
        Self {
            kind,
            threshold: 0.0,
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [SourceRecord] {
        &mut self.records
    }

    pub fn push(&mut self, record: SourceRecord) {
        self.records.push(record);
    }

    /// Copies one record out of `source` onto the end of this catalog.
    ///
    /// The only mutator used inside parallel regions: it never reads this
    /// catalog beyond its current length, so concurrent appends from
    /// disjoint source partitions only need the push itself serialized.
    pub fn append_from(&mut self, source: &Catalog, index: usize) {
        self.records.push(source.records[index]);
    }

    /// Drops all records, keeping the allocation and kind.
    pub fn clear(&mut self) {
        self.records.clear();
        self.threshold = 0.0;
    }

    /// Same kind and capacity, zero records. Pre-sizes the inactive buffer
    /// of a family before a filter pass.
    pub fn clone_empty(&self) -> Self {
        Self {
            kind: self.kind,
            threshold: 0.0,
            records: Vec::with_capacity(self.records.len()),
        }
    }

    /// Makes this catalog a verbatim copy of `source`.
    pub fn copy_from(&mut self, source: &Catalog) {
        self.kind = source.kind;
        self.threshold = source.threshold;
        self.records.clear();
        self.records.extend_from_slice(&source.records);
    }

    /// Fills the per-record geometry fields: Mollweide angle and cached
    /// cos(dec) for every record, plus the galactic Mollweide angle for
    /// rotation-measure catalogs. Runs once after ingestion.
    pub fn finalize_geometry(&mut self) {
        for record in &mut self.records {
            record.mollweide_theta = mollweide_theta(record.dec);
            record.cos_dec = (record.dec * DEG_TO_RAD).cos();
        }
        if self.kind == CatalogKind::RotationMeasure {
            for record in &mut self.records {
                record.mollweide_theta_gal = mollweide_theta(record.gal_lat);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: CatalogKind, positions: &[(f64, f64)]) -> Catalog {
        let mut cat = Catalog::new(kind);
        for &(ra, dec) in positions {
            cat.push(SourceRecord::at(ra, dec));
        }
        cat
    }

    #[test]
    fn append_from_copies_in_order() {
        let source = sample(CatalogKind::Galaxy, &[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let mut dest = source.clone_empty();
        dest.append_from(&source, 2);
        dest.append_from(&source, 0);
        assert_eq!(dest.len(), 2);
        assert_eq!(dest.records()[0].ra, 3.0);
        assert_eq!(dest.records()[1].ra, 1.0);
    }

    #[test]
    fn clone_empty_keeps_kind_and_capacity() {
        let source = sample(CatalogKind::RotationMeasure, &[(0.0, 0.0); 8]);
        let empty = source.clone_empty();
        assert_eq!(empty.kind, CatalogKind::RotationMeasure);
        assert_eq!(empty.len(), 0);
        assert!(empty.records.capacity() >= 8);
    }

    #[test]
    fn copy_from_replaces_contents_and_metadata() {
        let mut source = sample(CatalogKind::RotationMeasure, &[(5.0, 5.0)]);
        source.threshold = 1000.0;
        let mut dest = sample(CatalogKind::RotationMeasure, &[(9.0, 9.0), (8.0, 8.0)]);
        dest.copy_from(&source);
        assert_eq!(dest.len(), 1);
        assert_eq!(dest.threshold, 1000.0);
        assert_eq!(dest.records()[0].ra, 5.0);
    }

    #[test]
    fn finalize_geometry_fills_cos_dec_and_projection() {
        let mut cat = sample(CatalogKind::Galaxy, &[(10.0, 60.0)]);
        cat.finalize_geometry();
        let r = &cat.records()[0];
        assert!((r.cos_dec - (60.0_f64).to_radians().cos()).abs() < 1e-12);
        assert!(r.mollweide_theta > 0.0);
        // Galaxy catalogs carry no galactic coordinates.
        assert_eq!(r.mollweide_theta_gal, 0.0);
    }

    #[test]
    fn finalize_geometry_projects_galactic_latitude_for_rm() {
        let mut cat = sample(CatalogKind::RotationMeasure, &[(10.0, 0.0)]);
        cat.records_mut()[0].gal_lat = -30.0;
        cat.finalize_geometry();
        let r = &cat.records()[0];
        assert!(r.mollweide_theta_gal < 0.0);
    }

    #[test]
    fn kind_codes_round_trip() {
        for kind in [CatalogKind::Galaxy, CatalogKind::RotationMeasure] {
            assert_eq!(CatalogKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(CatalogKind::from_code(7), None);
    }
}
