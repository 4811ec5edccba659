//! Single-field predicate culls.
//!
//! A cull folds the active generation through a predicate into the
//! inactive buffer and flips the index, so each cull composes with every
//! pass that came before it. Serial: the record test is a couple of
//! comparisons, so there is nothing to partition.

use std::time::Instant;

use faraday_catalog::{CatalogFamily, SourceRecord};

use crate::error::{Error, Result};
use crate::pass::{PassSummary, RunStatus};

/// One-letter cull predicates of the command surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CullCriterion {
    /// `c`: |annulus mean| at most the bound.
    MeanWithin(f64),
    /// `n`: |nearest-neighbor mean| at most the bound.
    NnMeanWithin(f64),
    /// `l`: |galactic latitude| at least the bound.
    GalacticLatitudeAtLeast(f64),
    /// `d`: declination inside the closed range.
    DecRange(f64, f64),
    /// `z`: redshift inside the closed range.
    RedshiftRange(f64, f64),
}

impl CullCriterion {
    /// Builds a criterion from its code and parsed bounds. `d` and `z`
    /// take two bounds, the rest one.
    pub fn from_args(code: char, bounds: &[f64]) -> Result<Self> {
        let need = match code {
            'c' | 'n' | 'l' => 1,
            'd' | 'z' => 2,
            _ => return Err(Error::UnknownCriterion(code)),
        };
        if bounds.len() < need {
            return Err(Error::Parse(format!(
                "cull criterion {} requires {} bound(s), got {}",
                code,
                need,
                bounds.len()
            )));
        }
        let criterion = match code {
            'c' => CullCriterion::MeanWithin(bounds[0]),
            'n' => CullCriterion::NnMeanWithin(bounds[0]),
            'l' => CullCriterion::GalacticLatitudeAtLeast(bounds[0]),
            'd' => CullCriterion::DecRange(bounds[0], bounds[1]),
            'z' => CullCriterion::RedshiftRange(bounds[0], bounds[1]),
            _ => unreachable!(),
        };
        Ok(criterion)
    }

    /// Whether the record survives the cull. NaN statistics fail the
    /// magnitude predicates, so records with an undefined annulus mean
    /// drop out here.
    pub fn accepts(&self, record: &SourceRecord) -> bool {
        match *self {
            CullCriterion::MeanWithin(a) => record.rm_mean.abs() <= a,
            CullCriterion::NnMeanWithin(a) => record.rm_mean_nn.abs() <= a,
            CullCriterion::GalacticLatitudeAtLeast(a) => record.gal_lat.abs() >= a,
            CullCriterion::DecRange(lo, hi) => record.dec >= lo && record.dec <= hi,
            CullCriterion::RedshiftRange(lo, hi) => record.redshift >= lo && record.redshift <= hi,
        }
    }
}

/// Filters the active generation through `criterion` and promotes the
/// result.
pub fn cull_by_criterion(family: &mut CatalogFamily, criterion: &CullCriterion) -> PassSummary {
    let started = Instant::now();
    let examined;
    let kept;
    {
        let (read, write) = family.split_for_pass();
        write.clear();
        write.threshold = read.threshold;
        for (i, record) in read.records().iter().enumerate() {
            if criterion.accepts(record) {
                write.append_from(read, i);
            }
        }
        examined = read.len();
        kept = write.len();
    }
    family.switch_active();
    PassSummary {
        status: RunStatus::Complete,
        examined,
        kept,
        spawn_failures: 0,
        elapsed: started.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faraday_catalog::{Catalog, CatalogKind};

    fn family_from(records: Vec<SourceRecord>) -> CatalogFamily {
        let mut cat = Catalog::new(CatalogKind::RotationMeasure);
        for record in records {
            cat.push(record);
        }
        CatalogFamily::new(cat)
    }

    #[test]
    fn mean_within_keeps_small_means_and_drops_nan() {
        let mut records = Vec::new();
        for mean in [0.5, -3.0, 2.9, f64::NAN] {
            let mut r = SourceRecord::at(0.0, 0.0);
            r.rm_mean = mean;
            records.push(r);
        }
        let mut family = family_from(records);
        let summary = cull_by_criterion(&mut family, &CullCriterion::MeanWithin(3.0));
        assert_eq!(summary.examined, 4);
        assert_eq!(summary.kept, 3);
        assert!(family
            .active()
            .records()
            .iter()
            .all(|r| r.rm_mean.abs() <= 3.0));
    }

    #[test]
    fn galactic_latitude_keeps_high_latitudes() {
        let mut records = Vec::new();
        for lat in [-60.0, -10.0, 5.0, 45.0] {
            let mut r = SourceRecord::at(0.0, 0.0);
            r.gal_lat = lat;
            records.push(r);
        }
        let mut family = family_from(records);
        cull_by_criterion(&mut family, &CullCriterion::GalacticLatitudeAtLeast(30.0));
        let kept: Vec<f64> = family.active().records().iter().map(|r| r.gal_lat).collect();
        assert_eq!(kept, vec![-60.0, 45.0]);
    }

    #[test]
    fn dec_range_is_inclusive() {
        let mut records = Vec::new();
        for dec in [-5.0, 0.0, 10.0, 10.1] {
            records.push(SourceRecord::at(0.0, dec));
        }
        let mut family = family_from(records);
        cull_by_criterion(&mut family, &CullCriterion::DecRange(0.0, 10.0));
        let kept: Vec<f64> = family.active().records().iter().map(|r| r.dec).collect();
        assert_eq!(kept, vec![0.0, 10.0]);
    }

    #[test]
    fn consecutive_culls_fold() {
        let mut records = Vec::new();
        for (dec, z) in [(5.0, 0.1), (5.0, 0.9), (50.0, 0.1), (50.0, 0.9)] {
            let mut r = SourceRecord::at(0.0, dec);
            r.redshift = z;
            records.push(r);
        }
        let mut family = family_from(records);
        cull_by_criterion(&mut family, &CullCriterion::DecRange(0.0, 20.0));
        cull_by_criterion(&mut family, &CullCriterion::RedshiftRange(0.5, 1.0));
        assert_eq!(family.active().len(), 1);
        let survivor = &family.active().records()[0];
        assert_eq!(survivor.dec, 5.0);
        assert_eq!(survivor.redshift, 0.9);
    }

    #[test]
    fn cull_preserves_match_threshold() {
        let mut family = family_from(vec![SourceRecord::at(0.0, 5.0)]);
        family.active_mut().threshold = 800.0;
        cull_by_criterion(&mut family, &CullCriterion::DecRange(0.0, 10.0));
        assert_eq!(family.active().threshold, 800.0);
    }

    #[test]
    fn unknown_code_is_rejected() {
        match CullCriterion::from_args('q', &[1.0]) {
            Err(Error::UnknownCriterion('q')) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn missing_bounds_are_rejected() {
        let err = CullCriterion::from_args('d', &[1.0]).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
