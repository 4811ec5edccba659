//! SAVE and LOAD commands for binary catalog snapshots.
//!
//! Snapshots capture the active generation of each family together with
//! its match threshold, so a later LOAD restores the session without
//! re-ingesting the source tables or recomputing geometry.

use std::fs;
use std::path::PathBuf;

use faraday_catalog::{load_catalog, save_catalog, CatalogFamily};

use super::{Command, CommandOutput};
use crate::error::Result;
use crate::session::Session;

const DEFAULT_CACHE_DIR: &str = "./cache";
pub const GALAXY_SNAPSHOT: &str = "galaxies.fcat";
pub const SOURCE_SNAPSHOT: &str = "sources.fcat";

pub struct Save;

impl Command for Save {
    fn name(&self) -> &str {
        "SAVE"
    }
    fn description(&self) -> &str {
        "Write both active catalogs to snapshot files"
    }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        let dir = PathBuf::from(args.first().copied().unwrap_or(DEFAULT_CACHE_DIR));
        fs::create_dir_all(&dir)?;
        save_catalog(session.galaxies.active(), &dir.join(GALAXY_SNAPSHOT))?;
        save_catalog(session.sources.active(), &dir.join(SOURCE_SNAPSHOT))?;
        Ok(CommandOutput::Text(format!(
            "Saved {} galaxy and {} source records to {}",
            session.galaxies.active().len(),
            session.sources.active().len(),
            dir.display()
        )))
    }
}

pub struct Load;

impl Command for Load {
    fn name(&self) -> &str {
        "LOAD"
    }
    fn description(&self) -> &str {
        "Replace both catalogs from snapshot files"
    }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        let dir = PathBuf::from(args.first().copied().unwrap_or(DEFAULT_CACHE_DIR));
        let galaxies = load_catalog(&dir.join(GALAXY_SNAPSHOT))?;
        let sources = load_catalog(&dir.join(SOURCE_SNAPSHOT))?;
        // The loaded generation becomes the new full set for both families.
        session.galaxies = CatalogFamily::new(galaxies);
        session.sources = CatalogFamily::new(sources);
        session.last_pass = None;
        Ok(CommandOutput::Text(format!(
            "Loaded {} galaxy and {} source records from {}",
            session.galaxies.active().len(),
            session.sources.active().len(),
            dir.display()
        )))
    }
}
