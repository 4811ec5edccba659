//! Double-buffered catalog families.
//!
//! A family owns every generation of one catalog: the immutable full
//! ingest, two working buffers that alternate as filter passes fold the
//! active generation into the inactive one, and a pair of division bins.
//! Readers always see a complete generation; a pass publishes its result
//! by flipping the active index after the inactive buffer is fully built.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::catalog::Catalog;
use crate::record::SourceRecord;

pub struct CatalogFamily {
    full: Catalog,
    bufs: [Catalog; 2],
    active: AtomicUsize,
    bin_a: Catalog,
    bin_b: Catalog,
}

impl CatalogFamily {
    /// Builds a family around a freshly ingested catalog. Buffer 0 starts
    /// as a copy of the full catalog and is active; buffer 1 and both bins
    /// start empty with matching capacity.
    pub fn new(full: Catalog) -> Self {
        let working = full.clone();
        let spare = full.clone_empty();
        let bin_a = full.clone_empty();
        let bin_b = full.clone_empty();
        Self {
            full,
            bufs: [working, spare],
            active: AtomicUsize::new(0),
            bin_a,
            bin_b,
        }
    }

    pub fn kind(&self) -> crate::catalog::CatalogKind {
        self.full.kind
    }

    pub fn full(&self) -> &Catalog {
        &self.full
    }

    pub fn active_index(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    /// The generation readers should see.
    pub fn active(&self) -> &Catalog {
        &self.bufs[self.active_index()]
    }

    pub fn bin_a(&self) -> &Catalog {
        &self.bin_a
    }

    pub fn bin_b(&self) -> &Catalog {
        &self.bin_b
    }

    /// Mutable view of the active generation, for statistics passes that
    /// rewrite fields in place without changing cardinality.
    pub fn active_mut(&mut self) -> &mut Catalog {
        let idx = self.active_index();
        &mut self.bufs[idx]
    }

    /// Splits the buffers for a filter pass: the active generation as the
    /// read side, the inactive buffer as the write side.
    pub fn split_for_pass(&mut self) -> (&Catalog, &mut Catalog) {
        let idx = self.active_index();
        let (first, second) = self.bufs.split_at_mut(1);
        if idx == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        }
    }

    /// Splits for a division pass: active generation read-only plus both
    /// bins writable.
    pub fn split_for_divide(&mut self) -> (&Catalog, &mut Catalog, &mut Catalog) {
        let idx = self.active_index();
        (&self.bufs[idx], &mut self.bin_a, &mut self.bin_b)
    }

    /// Publishes the inactive buffer as the new active generation.
    pub fn switch_active(&self) {
        let idx = self.active.load(Ordering::Acquire);
        self.active.store(1 - idx, Ordering::Release);
    }

    /// Restores the active generation to the full ingest, discarding every
    /// accumulated filter.
    pub fn reset_to_full(&mut self) {
        let idx = self.active_index();
        self.bufs[1 - idx].copy_from(&self.full);
        self.switch_active();
    }

    /// Routes one record of the active generation into a bin.
    pub fn bin_push(&mut self, index: usize, to_a: bool) {
        let record: SourceRecord = self.active().records()[index];
        if to_a {
            self.bin_a.push(record);
        } else {
            self.bin_b.push(record);
        }
    }

    pub fn clear_bins(&mut self) {
        self.bin_a.clear();
        self.bin_b.clear();
    }
}
