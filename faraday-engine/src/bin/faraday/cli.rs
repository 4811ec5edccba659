//! CLI argument definitions for faraday

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "faraday")]
#[command(about = "Catalog cross-matching and neighborhood statistics")]
#[command(version)]
pub struct Cli {
    /// Galaxy table (ra dec redshift abs_mag color stellar_mass per line)
    #[arg(long)]
    pub galaxies: Option<PathBuf>,

    /// Comoving distance table matching the galaxy table, one Gpc value per line
    #[arg(long)]
    pub distances: Option<PathBuf>,

    /// Rotation measure table (ra dec gal_lon gal_lat rm per line)
    #[arg(long)]
    pub sources: Option<PathBuf>,

    /// Working directory for binary snapshots
    #[arg(long, default_value = "./cache")]
    pub workdir: PathBuf,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Commands to run in order, one quoted string each
    pub commands: Vec<String>,
}
