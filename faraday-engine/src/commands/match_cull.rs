use super::{parse_or, Command, CommandOutput};
use crate::crossmatch::match_and_cull;
use crate::error::Result;
use crate::session::{FamilySelector, Session};

const DEFAULT_THRESHOLD_KPC: f64 = 1000.0;
const DEFAULT_WORKERS: usize = 2;

pub struct MatchCull;

impl Command for MatchCull {
    fn name(&self) -> &str {
        "MATCH"
    }
    fn description(&self) -> &str {
        "Cross-match a catalog against the other family"
    }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        let (target, rest) = match args.first().and_then(|t| FamilySelector::parse(t).ok()) {
            Some(selector) => (selector, &args[1..]),
            None => (FamilySelector::Sources, args),
        };
        let threshold = parse_or(rest, 0, DEFAULT_THRESHOLD_KPC);
        let workers = parse_or(rest, 1, DEFAULT_WORKERS);

        session.begin_pass();
        let summary = match target {
            FamilySelector::Sources => match_and_cull(
                &mut session.sources,
                session.galaxies.active(),
                threshold,
                workers,
                &session.cancel,
                session.observer.as_deref(),
            ),
            FamilySelector::Galaxies => match_and_cull(
                &mut session.galaxies,
                session.sources.active(),
                threshold,
                workers,
                &session.cancel,
                session.observer.as_deref(),
            ),
        };
        session.record_pass("MATCH", summary);
        Ok(CommandOutput::Text(format!(
            "{}: kept {} of {} within {:.1} kpc ({:?} in {:.2?})",
            target.name(),
            summary.kept,
            summary.examined,
            threshold,
            summary.status,
            summary.elapsed
        )))
    }
}
