//! Impact-parameter cross-matching.
//!
//! Keeps exactly the target records with at least one reference record
//! inside the impact-parameter threshold. The target generation is split
//! across worker threads; each worker scans the full reference generation
//! per record, short-circuiting on the first hit, and appends matches into
//! the shared inactive buffer under a mutex. The active index flips only
//! after the whole pass completes.

use std::ops::Range;
use std::sync::Mutex;
use std::time::Instant;

use faraday_catalog::{Catalog, CatalogFamily};

use crate::pass::{resolve_workers, run_partitioned, PassSummary, RunStatus, REPORT_INTERVAL};
use crate::progress::{CancelToken, PassProgress, ProgressFn};

/// Cross-matches the family's active generation against `reference` and
/// promotes the matched subset as the new active generation.
///
/// On cancellation the inactive buffer is left unpromoted and the active
/// generation is untouched. The token is only read here; callers rearm it
/// between passes.
pub fn match_and_cull(
    family: &mut CatalogFamily,
    reference: &Catalog,
    threshold_kpc: f64,
    workers: usize,
    cancel: &CancelToken,
    observer: Option<&ProgressFn>,
) -> PassSummary {
    let started = Instant::now();
    let examined;
    let kept;
    let spawn_failures;
    let cancelled;
    {
        let (read, write) = family.split_for_pass();
        write.clear();
        let progress = PassProgress::start(read.len());
        let dest = Mutex::new(write);

        let worker = |range: Range<usize>| {
            let mut local = 0usize;
            for i in range {
                if cancel.is_cancelled() {
                    break;
                }
                let target = &read.records()[i];
                let hit = reference
                    .records()
                    .iter()
                    .any(|r| target.impact_within(r, threshold_kpc));
                if hit {
                    dest.lock().unwrap().append_from(read, i);
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

        let write = dest.into_inner().unwrap();
        if cancelled {
            kept = 0;
        } else {
            write.threshold = threshold_kpc;
            kept = write.len();
        }
    }
    if !cancelled {
        family.switch_active();
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
        kept,
        spawn_failures,
        elapsed: started.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faraday_catalog::{CatalogKind, SourceRecord};

    // The reference angular-diameter distance scales separations, so with
    // ang_diam_d = 1000 kpc one degree of arc is about 17.45 kpc.
    fn reference_at(ra: f64, dec: f64) -> SourceRecord {
        let mut r = SourceRecord::at(ra, dec);
        r.ang_diam_d = 1000.0;
        r
    }

    fn galaxy_catalog(positions: &[(f64, f64)]) -> Catalog {
        let mut cat = Catalog::new(CatalogKind::Galaxy);
        for &(ra, dec) in positions {
            cat.push(reference_at(ra, dec));
        }
        cat.finalize_geometry();
        cat
    }

    fn rm_family(ras: &[f64]) -> CatalogFamily {
        let mut cat = Catalog::new(CatalogKind::RotationMeasure);
        for &ra in ras {
            cat.push(SourceRecord::at(ra, 0.0));
        }
        cat.finalize_geometry();
        CatalogFamily::new(cat)
    }

    fn kept_ras(family: &CatalogFamily) -> Vec<f64> {
        let mut ras: Vec<f64> = family.active().records().iter().map(|r| r.ra).collect();
        ras.sort_by(|a, b| a.partial_cmp(b).unwrap());
        ras
    }

    #[test]
    fn keeps_exactly_the_targets_near_a_reference() {
        let reference = galaxy_catalog(&[(10.0, 0.0)]);
        // 0, ~8.7, ~34.9 and ~174.5 kpc from the reference.
        let mut family = rm_family(&[10.0, 10.5, 12.0, 20.0]);

        let summary = match_and_cull(&mut family, &reference, 20.0, 2, &CancelToken::new(), None);

        assert_eq!(summary.status, RunStatus::Complete);
        assert_eq!(summary.examined, 4);
        assert_eq!(summary.kept, 2);
        assert_eq!(kept_ras(&family), vec![10.0, 10.5]);
        assert_eq!(family.active().threshold, 20.0);
    }

    #[test]
    fn any_reference_within_threshold_suffices() {
        let reference = galaxy_catalog(&[(10.0, 0.0), (20.0, 0.0)]);
        let mut family = rm_family(&[10.1, 19.9, 15.0]);

        let summary = match_and_cull(&mut family, &reference, 20.0, 3, &CancelToken::new(), None);

        assert_eq!(summary.kept, 2);
        assert_eq!(kept_ras(&family), vec![10.1, 19.9]);
    }

    #[test]
    fn empty_reference_drops_everything() {
        let reference = galaxy_catalog(&[]);
        let mut family = rm_family(&[1.0, 2.0, 3.0]);

        let summary = match_and_cull(&mut family, &reference, 50.0, 2, &CancelToken::new(), None);

        assert_eq!(summary.status, RunStatus::Complete);
        assert_eq!(summary.kept, 0);
        assert_eq!(family.active().len(), 0);
    }

    #[test]
    fn empty_target_completes_immediately() {
        let reference = galaxy_catalog(&[(10.0, 0.0)]);
        let mut family = rm_family(&[]);

        let summary = match_and_cull(&mut family, &reference, 50.0, 2, &CancelToken::new(), None);

        assert_eq!(summary.status, RunStatus::Complete);
        assert_eq!(summary.examined, 0);
        assert_eq!(summary.kept, 0);
    }

    #[test]
    fn cancelled_pass_leaves_active_generation_untouched() {
        let reference = galaxy_catalog(&[(10.0, 0.0)]);
        let mut family = rm_family(&[10.0, 10.5, 12.0, 20.0]);
        let before = family.active_index();

        let cancel = CancelToken::new();
        cancel.cancel();
        let summary = match_and_cull(&mut family, &reference, 20.0, 2, &cancel, None);

        assert_eq!(summary.status, RunStatus::Cancelled);
        assert_eq!(summary.kept, 0);
        assert_eq!(family.active_index(), before);
        assert_eq!(family.active().len(), 4);
    }

    #[test]
    fn progress_observer_sees_monotonic_counts() {
        let reference = galaxy_catalog(&[(10.0, 0.0)]);
        let mut family = rm_family(&(0..800).map(|i| i as f64 * 0.01).collect::<Vec<_>>());

        let seen = std::sync::Arc::new(Mutex::new(Vec::new()));
        let observer = {
            let seen = std::sync::Arc::clone(&seen);
            move |snapshot: crate::progress::ProgressSnapshot| {
                seen.lock().unwrap().push(snapshot.completed);
            }
        };
        let summary = match_and_cull(&mut family, &reference, 20.0, 1, &CancelToken::new(), Some(&observer));

        assert_eq!(summary.examined, 800);
        drop(observer);
        let seen = std::sync::Arc::try_unwrap(seen).unwrap().into_inner().unwrap();
        assert!(!seen.is_empty());
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*seen.last().unwrap(), 800);
    }
}
