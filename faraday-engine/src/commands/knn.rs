use super::{parse_or, Command, CommandOutput};
use crate::error::Result;
use crate::neighbors::{compute_neighbor_stats, Estimator};
use crate::session::Session;

const DEFAULT_K: usize = 20;

pub struct Knn;

impl Command for Knn {
    fn name(&self) -> &str {
        "KNN"
    }
    fn description(&self) -> &str {
        "K-nearest-neighbor statistics over the RM catalog"
    }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        let k = parse_or(args, 0, DEFAULT_K);
        session.begin_pass();
        let summary = compute_neighbor_stats(
            &mut session.sources,
            &Estimator::FixedK { k },
            &session.cancel,
            session.observer.as_deref(),
        )?;
        session.record_pass("KNN", summary);
        Ok(CommandOutput::Text(format!(
            "Nearest-neighbor statistics with K = {} over {} records ({:?} in {:.2?})",
            k, summary.examined, summary.status, summary.elapsed
        )))
    }
}
