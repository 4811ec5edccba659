use super::{parse_or, Command, CommandOutput};
use crate::error::Result;
use crate::neighbors::{compute_neighbor_stats, Estimator};
use crate::session::Session;

const DEFAULT_THRESHOLD_DEG: f64 = 2.0;

pub struct Annulus;

impl Command for Annulus {
    fn name(&self) -> &str {
        "ANNULUS"
    }
    fn description(&self) -> &str {
        "Annulus neighborhood mean over the RM catalog"
    }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        let threshold = parse_or(args, 0, DEFAULT_THRESHOLD_DEG);
        session.begin_pass();
        let summary = compute_neighbor_stats(
            &mut session.sources,
            &Estimator::Annulus {
                threshold_deg: threshold,
            },
            &session.cancel,
            session.observer.as_deref(),
        )?;
        session.record_pass("ANNULUS", summary);
        Ok(CommandOutput::Text(format!(
            "Annulus means within {:.2} deg over {} records ({:?} in {:.2?})",
            threshold, summary.examined, summary.status, summary.elapsed
        )))
    }
}
