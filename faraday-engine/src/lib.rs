//! Cross-matching, culling and neighborhood-statistics engines.
//!
//! Runs filter and statistics passes over the catalog generations managed
//! by `faraday-catalog`: impact-parameter cross-matching against a galaxy
//! reference, predicate culls, two-way divisions, and per-record RM
//! neighborhood statistics. Multi-threaded passes partition the active
//! generation across scoped worker threads, report progress through a
//! shared counter, and honor cooperative cancellation between records.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`crossmatch`] | [`match_and_cull`](crossmatch::match_and_cull) impact-parameter filter |
//! | [`cull`] | [`CullCriterion`](cull::CullCriterion) single-field predicate culls |
//! | [`divide`] | [`DivideCriterion`](divide::DivideCriterion) two-way bin routing |
//! | [`neighbors`] | [`Estimator`](neighbors::Estimator) annulus and fixed-K RM statistics |
//! | [`pass`] | Worker partitioning and the scoped-thread pass harness |
//! | [`progress`] | Pass progress counters and [`CancelToken`](progress::CancelToken) |
//! | [`session`] | [`Session`](session::Session) state shared by every command |
//! | [`commands`] | Command registry and line dispatch |
//!
//! # Features
//!
//! - **`cli`**: enables the `faraday` binary for running passes from the
//!   command line with progress bars.

pub mod commands;
pub mod crossmatch;
pub mod cull;
pub mod divide;
pub mod error;
pub mod neighbors;
pub mod pass;
pub mod progress;
pub mod session;

pub use error::{Error, Result};
