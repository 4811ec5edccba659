use super::{Command, CommandOutput};
use crate::error::Result;
use crate::session::Session;

pub struct Cancel;

impl Command for Cancel {
    fn name(&self) -> &str {
        "CANCEL"
    }
    fn description(&self) -> &str {
        "Request cancellation of a running pass"
    }

    fn execute(&self, session: &mut Session, _args: &[&str]) -> Result<CommandOutput> {
        // Commands run one at a time here, so from this dispatcher there
        // is never a pass to stop; embedders driving the engine from
        // another thread cancel through a clone of the session token.
        session.cancel.cancel();
        Ok(CommandOutput::Text(
            "Cancellation token set; no pass is running in this session".to_string(),
        ))
    }
}
