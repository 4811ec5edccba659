//! In-memory astronomical catalogs with double-buffered generations.
//!
//! A [`Catalog`] is an ordered table of [`SourceRecord`]s of one
//! [`CatalogKind`]; a [`CatalogFamily`] pairs the unfiltered catalog with
//! two alternating filter buffers and two divide bins. Filtering engines
//! write into the inactive buffer and flip the active index on success, so
//! readers of the current generation never observe a partial result.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`record`] | [`SourceRecord`] fields and proximity predicates |
//! | [`catalog`] | [`Catalog`] table operations |
//! | [`store`] | [`CatalogFamily`] double buffer and bins |
//! | [`ingest`] | whitespace text readers, comoving-distance attach |
//! | [`snapshot`] | validated binary snapshot format |
//! | [`export`] | per-field numeric column export |

pub mod catalog;
pub mod export;
pub mod ingest;
pub mod record;
pub mod snapshot;
pub mod store;

pub use catalog::{Catalog, CatalogKind};
pub use export::{write_column, Field};
pub use ingest::{attach_distances, load_galaxy_catalog, load_rm_catalog};
pub use record::SourceRecord;
pub use snapshot::{load_catalog, save_catalog};
pub use store::CatalogFamily;
