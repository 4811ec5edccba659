use super::{parse_code, parse_or, parse_required, Command, CommandOutput};
use crate::divide::{divide, DivideCriterion};
use crate::error::{Error, Result};
use crate::session::{FamilySelector, Session};

const DEFAULT_PROXIMITY_KPC: f64 = 20.0;
const DEFAULT_WORKERS: usize = 2;

pub struct Divide;

impl Command for Divide {
    fn name(&self) -> &str {
        "DIVIDE"
    }
    fn description(&self) -> &str {
        "Split the active generation into bins A and B"
    }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        let selector = FamilySelector::parse(
            args.first()
                .ok_or_else(|| Error::Parse("missing catalog selector".into()))?,
        )?;
        let code = parse_code(args, 1, "divide criterion")?;
        let (criterion, workers) = if code == 'p' {
            let threshold = parse_or(args, 2, DEFAULT_PROXIMITY_KPC);
            let workers = parse_or(args, 3, DEFAULT_WORKERS);
            (DivideCriterion::from_args(code, &[threshold])?, workers)
        } else {
            let mut bounds = Vec::with_capacity(args.len().saturating_sub(2));
            for index in 2..args.len() {
                bounds.push(parse_required(args, index, "divide bound")?);
            }
            (DivideCriterion::from_args(code, &bounds)?, DEFAULT_WORKERS)
        };

        session.begin_pass();
        let summary = match selector {
            FamilySelector::Sources => divide(
                &mut session.sources,
                &criterion,
                if criterion.uses_reference() {
                    Some(session.galaxies.bin_a())
                } else {
                    None
                },
                workers,
                &session.cancel,
                session.observer.as_deref(),
            ),
            FamilySelector::Galaxies => divide(
                &mut session.galaxies,
                &criterion,
                if criterion.uses_reference() {
                    Some(session.sources.bin_a())
                } else {
                    None
                },
                workers,
                &session.cancel,
                session.observer.as_deref(),
            ),
        };
        session.record_pass("DIVIDE", summary);

        let family = session.family(selector);
        Ok(CommandOutput::Text(format!(
            "{}: bin A {} / bin B {} from {} records ({:?} in {:.2?})",
            selector.name(),
            family.bin_a().len(),
            family.bin_b().len(),
            summary.examined,
            summary.status,
            summary.elapsed
        )))
    }
}
