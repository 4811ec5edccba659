use std::fmt::Write as _;

use faraday_catalog::CatalogFamily;

use super::{Command, CommandOutput};
use crate::error::Result;
use crate::session::Session;

pub struct Show;

fn family_line(family: &CatalogFamily) -> String {
    format!(
        "full {}, active {} (threshold {:.1} kpc), bin A {}, bin B {}",
        family.full().len(),
        family.active().len(),
        family.active().threshold,
        family.bin_a().len(),
        family.bin_b().len()
    )
}

impl Command for Show {
    fn name(&self) -> &str {
        "SHOW"
    }
    fn description(&self) -> &str {
        "Display session state"
    }

    fn execute(&self, session: &mut Session, _args: &[&str]) -> Result<CommandOutput> {
        let mut out = String::new();
        let _ = writeln!(out, "Galaxies (GAL): {}", family_line(&session.galaxies));
        let _ = writeln!(out, "Sources (RM):   {}", family_line(&session.sources));
        match &session.last_pass {
            Some((name, summary)) => {
                let _ = write!(
                    out,
                    "Last pass: {} {:?}, kept {} of {} in {:.2?}",
                    name, summary.status, summary.kept, summary.examined, summary.elapsed
                );
            }
            None => out.push_str("Last pass: none"),
        }
        Ok(CommandOutput::Text(out))
    }
}
