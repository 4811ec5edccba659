//! Two-way catalog division.
//!
//! Routes every record of the active generation into one of the family's
//! fixed bins A and B. Reuses the cross-match worker layout: partitioned
//! scan, per-record boolean test, mutex-guarded appends. The generation
//! itself is untouched; only the bins change.

use std::ops::Range;
use std::sync::Mutex;
use std::time::Instant;

use faraday_catalog::{Catalog, CatalogFamily, SourceRecord};

use crate::error::{Error, Result};
use crate::pass::{resolve_workers, run_partitioned, PassSummary, RunStatus, REPORT_INTERVAL};
use crate::progress::{CancelToken, PassProgress, ProgressFn};

/// Color bounds of the green-valley transition box.
pub const TRANSITION_COLOR: (f64, f64) = (0.8, 1.05);
/// Stellar-mass bounds (log solar masses) of the transition box.
pub const TRANSITION_MASS: (f64, f64) = (10.0, 11.0);

/// One-letter division predicates of the command surface. A record goes
/// to bin A when the predicate holds, otherwise to bin B.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DivideCriterion {
    /// `t`: inside the transition box in the color/stellar-mass plane.
    TransitionBox,
    /// `z`: redshift inside the closed range.
    RedshiftRange(f64, f64),
    /// `c`: color inside the closed range.
    ColorRange(f64, f64),
    /// `m`: stellar mass inside the closed range.
    MassRange(f64, f64),
    /// `f`: color over stellar mass inside the closed range.
    ColorMassRatioRange(f64, f64),
    /// `r`: right ascension inside the closed range.
    RaRange(f64, f64),
    /// `p`: some record of the reference catalog within the
    /// impact-parameter threshold.
    NearReference { threshold_kpc: f64 },
}

impl DivideCriterion {
    /// Builds a criterion from its code and parsed bounds. `t` takes
    /// none, `p` takes the threshold, the range codes take two.
    pub fn from_args(code: char, bounds: &[f64]) -> Result<Self> {
        let need = match code {
            't' => 0,
            'p' => 1,
            'z' | 'c' | 'm' | 'f' | 'r' => 2,
            _ => return Err(Error::UnknownDivision(code)),
        };
        if bounds.len() < need {
            return Err(Error::Parse(format!(
                "divide criterion {} requires {} bound(s), got {}",
                code,
                need,
                bounds.len()
            )));
        }
        let criterion = match code {
            't' => DivideCriterion::TransitionBox,
            'z' => DivideCriterion::RedshiftRange(bounds[0], bounds[1]),
            'c' => DivideCriterion::ColorRange(bounds[0], bounds[1]),
            'm' => DivideCriterion::MassRange(bounds[0], bounds[1]),
            'f' => DivideCriterion::ColorMassRatioRange(bounds[0], bounds[1]),
            'r' => DivideCriterion::RaRange(bounds[0], bounds[1]),
            'p' => DivideCriterion::NearReference {
                threshold_kpc: bounds[0],
            },
            _ => unreachable!(),
        };
        Ok(criterion)
    }

    /// Whether the proximity reference catalog is consulted.
    pub fn uses_reference(&self) -> bool {
        matches!(self, DivideCriterion::NearReference { .. })
    }

    fn routes_to_a(&self, record: &SourceRecord, reference: Option<&Catalog>) -> bool {
        match *self {
            DivideCriterion::TransitionBox => {
                record.color >= TRANSITION_COLOR.0
                    && record.color <= TRANSITION_COLOR.1
                    && record.stellar_mass >= TRANSITION_MASS.0
                    && record.stellar_mass <= TRANSITION_MASS.1
            }
            DivideCriterion::RedshiftRange(lo, hi) => {
                record.redshift >= lo && record.redshift <= hi
            }
            DivideCriterion::ColorRange(lo, hi) => record.color >= lo && record.color <= hi,
            DivideCriterion::MassRange(lo, hi) => {
                record.stellar_mass >= lo && record.stellar_mass <= hi
            }
            DivideCriterion::ColorMassRatioRange(lo, hi) => {
                let ratio = record.color / record.stellar_mass;
                ratio >= lo && ratio <= hi
            }
            DivideCriterion::RaRange(lo, hi) => record.ra >= lo && record.ra <= hi,
            DivideCriterion::NearReference { threshold_kpc } => reference.is_some_and(|cat| {
                cat.records()
                    .iter()
                    .any(|r| record.impact_within(r, threshold_kpc))
            }),
        }
    }
}

/// Routes the active generation into bins A and B. For the proximity
/// criterion `reference` is the opposite family's bin A; an absent or
/// empty reference routes everything to B. On cancellation both bins are
/// cleared.
pub fn divide(
    family: &mut CatalogFamily,
    criterion: &DivideCriterion,
    reference: Option<&Catalog>,
    workers: usize,
    cancel: &CancelToken,
    observer: Option<&ProgressFn>,
) -> PassSummary {
    let started = Instant::now();
    family.clear_bins();

    let examined;
    let kept;
    let spawn_failures;
    let cancelled;
    {
        let (read, bin_a, bin_b) = family.split_for_divide();
        let progress = PassProgress::start(read.len());
        let bins = Mutex::new((bin_a, bin_b));

        let worker = |range: Range<usize>| {
            let mut local = 0usize;
            for i in range {
                if cancel.is_cancelled() {
                    break;
                }
                let to_a = criterion.routes_to_a(&read.records()[i], reference);
                {
                    let mut bins = bins.lock().unwrap();
                    if to_a {
                        bins.0.append_from(read, i);
                    } else {
                        bins.1.append_from(read, i);
                    }
                }
                local += 1;
                if local == REPORT_INTERVAL {
                    let snapshot = progress.note(local);
                    local = 0;
                    if let Some(observer) = observer {
                        observer(snapshot);
                    }
                }
            }
            if local > 0 {
                let snapshot = progress.note(local);
                if let Some(observer) = observer {
                    observer(snapshot);
                }
            }
        };

        spawn_failures = run_partitioned(read.len(), resolve_workers(workers), &worker);
        examined = progress.completed();
        cancelled = cancel.is_cancelled();
        let bins = bins.into_inner().unwrap();
        kept = bins.0.len();
    }
    if cancelled {
        family.clear_bins();
    }

    let status = if cancelled {
        RunStatus::Cancelled
    } else if spawn_failures > 0 {
        RunStatus::Degraded
    } else {
        RunStatus::Complete
    };
    PassSummary {
        status,
        examined,
        kept: if cancelled { 0 } else { kept },
        spawn_failures,
        elapsed: started.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faraday_catalog::CatalogKind;

    fn galaxy(ra: f64, color: f64, mass: f64, z: f64) -> SourceRecord {
        let mut r = SourceRecord::at(ra, 0.0);
        r.color = color;
        r.stellar_mass = mass;
        r.redshift = z;
        r
    }

    fn family_from(records: Vec<SourceRecord>) -> CatalogFamily {
        let mut cat = Catalog::new(CatalogKind::Galaxy);
        for record in records {
            cat.push(record);
        }
        cat.finalize_geometry();
        CatalogFamily::new(cat)
    }

    fn bin_ras(cat: &Catalog) -> Vec<f64> {
        let mut ras: Vec<f64> = cat.records().iter().map(|r| r.ra).collect();
        ras.sort_by(|a, b| a.partial_cmp(b).unwrap());
        ras
    }

    #[test]
    fn transition_box_routes_on_both_axes() {
        let mut family = family_from(vec![
            galaxy(1.0, 0.9, 10.5, 0.0),  // inside
            galaxy(2.0, 0.7, 10.5, 0.0),  // too blue
            galaxy(3.0, 0.9, 11.5, 0.0),  // too massive
            galaxy(4.0, 1.05, 10.0, 0.0), // on the corner
        ]);
        let summary = divide(
            &mut family,
            &DivideCriterion::TransitionBox,
            None,
            2,
            &CancelToken::new(),
            None,
        );
        assert_eq!(summary.status, RunStatus::Complete);
        assert_eq!(bin_ras(family.bin_a()), vec![1.0, 4.0]);
        assert_eq!(bin_ras(family.bin_b()), vec![2.0, 3.0]);
    }

    #[test]
    fn every_record_lands_in_exactly_one_bin() {
        let records: Vec<SourceRecord> = (0..97)
            .map(|i| galaxy(i as f64, 0.5 + (i % 10) as f64 * 0.06, 10.0, 0.0))
            .collect();
        let mut family = family_from(records);
        divide(
            &mut family,
            &DivideCriterion::ColorRange(0.8, 1.05),
            None,
            3,
            &CancelToken::new(),
            None,
        );
        assert_eq!(family.bin_a().len() + family.bin_b().len(), 97);
        let mut all = bin_ras(family.bin_a());
        all.extend(bin_ras(family.bin_b()));
        all.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let expected: Vec<f64> = (0..97).map(|i| i as f64).collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn ratio_criterion_divides_color_by_mass() {
        let mut family = family_from(vec![
            galaxy(1.0, 1.0, 10.0, 0.0), // ratio 0.1
            galaxy(2.0, 0.5, 10.0, 0.0), // ratio 0.05
        ]);
        divide(
            &mut family,
            &DivideCriterion::ColorMassRatioRange(0.08, 0.2),
            None,
            1,
            &CancelToken::new(),
            None,
        );
        assert_eq!(bin_ras(family.bin_a()), vec![1.0]);
        assert_eq!(bin_ras(family.bin_b()), vec![2.0]);
    }

    #[test]
    fn proximity_routes_near_the_reference_bin() {
        let mut reference = Catalog::new(CatalogKind::Galaxy);
        let mut anchor = SourceRecord::at(10.0, 0.0);
        anchor.ang_diam_d = 1000.0;
        reference.push(anchor);
        reference.finalize_geometry();

        // ~8.7 kpc and ~174.5 kpc from the anchor at 1000 kpc scaling.
        let mut family = family_from(vec![galaxy(10.5, 0.0, 0.0, 0.0), galaxy(20.0, 0.0, 0.0, 0.0)]);
        divide(
            &mut family,
            &DivideCriterion::NearReference { threshold_kpc: 20.0 },
            Some(&reference),
            2,
            &CancelToken::new(),
            None,
        );
        assert_eq!(bin_ras(family.bin_a()), vec![10.5]);
        assert_eq!(bin_ras(family.bin_b()), vec![20.0]);
    }

    #[test]
    fn empty_reference_routes_everything_to_b() {
        let mut family = family_from(vec![galaxy(1.0, 0.0, 0.0, 0.0), galaxy(2.0, 0.0, 0.0, 0.0)]);
        let summary = divide(
            &mut family,
            &DivideCriterion::NearReference { threshold_kpc: 20.0 },
            None,
            1,
            &CancelToken::new(),
            None,
        );
        assert_eq!(summary.kept, 0);
        assert_eq!(family.bin_a().len(), 0);
        assert_eq!(family.bin_b().len(), 2);
    }

    #[test]
    fn repeat_divide_replaces_previous_bins() {
        let mut family = family_from(vec![galaxy(1.0, 0.9, 10.5, 0.1), galaxy(2.0, 0.5, 9.0, 0.9)]);
        divide(
            &mut family,
            &DivideCriterion::TransitionBox,
            None,
            1,
            &CancelToken::new(),
            None,
        );
        assert_eq!(family.bin_a().len(), 1);

        divide(
            &mut family,
            &DivideCriterion::RedshiftRange(0.5, 1.0),
            None,
            1,
            &CancelToken::new(),
            None,
        );
        assert_eq!(bin_ras(family.bin_a()), vec![2.0]);
        assert_eq!(bin_ras(family.bin_b()), vec![1.0]);
    }

    #[test]
    fn cancelled_divide_leaves_empty_bins() {
        let mut family = family_from(vec![galaxy(1.0, 0.9, 10.5, 0.0)]);
        let cancel = CancelToken::new();
        cancel.cancel();
        let summary = divide(
            &mut family,
            &DivideCriterion::TransitionBox,
            None,
            1,
            &cancel,
            None,
        );
        assert_eq!(summary.status, RunStatus::Cancelled);
        assert_eq!(family.bin_a().len(), 0);
        assert_eq!(family.bin_b().len(), 0);
    }

    #[test]
    fn bounds_arity_is_enforced() {
        assert!(matches!(
            DivideCriterion::from_args('x', &[]),
            Err(Error::UnknownDivision('x'))
        ));
        assert!(matches!(
            DivideCriterion::from_args('z', &[0.1]),
            Err(Error::Parse(_))
        ));
        assert_eq!(
            DivideCriterion::from_args('t', &[]).unwrap(),
            DivideCriterion::TransitionBox
        );
    }
}
