use super::{parse_code, parse_required, Command, CommandOutput};
use crate::cull::{cull_by_criterion, CullCriterion};
use crate::error::{Error, Result};
use crate::session::{FamilySelector, Session};

pub struct Cull;

impl Command for Cull {
    fn name(&self) -> &str {
        "CULL"
    }
    fn description(&self) -> &str {
        "Filter the active generation by a predicate"
    }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        let selector = FamilySelector::parse(
            args.first()
                .ok_or_else(|| Error::Parse("missing catalog selector".into()))?,
        )?;
        let code = parse_code(args, 1, "cull criterion")?;
        let mut bounds = Vec::with_capacity(args.len().saturating_sub(2));
        for index in 2..args.len() {
            bounds.push(parse_required(args, index, "cull bound")?);
        }
        let criterion = CullCriterion::from_args(code, &bounds)?;

        let summary = cull_by_criterion(session.family_mut(selector), &criterion);
        session.record_pass("CULL", summary);
        Ok(CommandOutput::Text(format!(
            "{}: kept {} of {} ({:.2?})",
            selector.name(),
            summary.kept,
            summary.examined,
            summary.elapsed
        )))
    }
}
