use super::{Command, CommandOutput};
use crate::error::Result;
use crate::session::Session;

pub struct Reset;

impl Command for Reset {
    fn name(&self) -> &str {
        "RESET"
    }
    fn description(&self) -> &str {
        "Restore both catalogs to their full ingested record sets"
    }

    fn execute(&self, session: &mut Session, _args: &[&str]) -> Result<CommandOutput> {
        session.galaxies.reset_to_full();
        session.sources.reset_to_full();
        session.last_pass = None;
        Ok(CommandOutput::Text(format!(
            "Restored GAL to {} records and RM to {} records",
            session.galaxies.active().len(),
            session.sources.active().len()
        )))
    }
}
