pub mod annulus;
pub mod cancel;
pub mod cull;
pub mod divide;
pub mod export;
pub mod help;
pub mod knn;
pub mod match_cull;
pub mod reset;
pub mod save;
pub mod show;

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::session::Session;

pub enum CommandOutput {
    Text(String),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    None,
}

pub trait Command {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput>;
}

pub fn dispatch(session: &mut Session, input: &str) -> Result<CommandOutput> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.is_empty() {
        return Ok(CommandOutput::None);
    }
    let cmd_name = parts[0].to_uppercase();
    let args = &parts[1..];
    match cmd_name.as_str() {
        "MATCH" => match_cull::MatchCull.execute(session, args),
        "CANCEL" => cancel::Cancel.execute(session, args),
        "ANNULUS" => annulus::Annulus.execute(session, args),
        "KNN" => knn::Knn.execute(session, args),
        "CULL" => cull::Cull.execute(session, args),
        "DIVIDE" => divide::Divide.execute(session, args),
        "RESET" => reset::Reset.execute(session, args),
        "SAVE" => save::Save.execute(session, args),
        "LOAD" => save::Load.execute(session, args),
        "EXPORT" => export::Export.execute(session, args),
        "SHOW" => show::Show.execute(session, args),
        "HELP" => help::Help.execute(session, args),
        _ => Err(Error::Parse(format!("unknown command: {}", parts[0]))),
    }
}

/// Parses an optional numeric argument, substituting the documented
/// default when the argument is absent or unparseable.
pub(crate) fn parse_or<T: FromStr>(args: &[&str], index: usize, default: T) -> T {
    args.get(index)
        .and_then(|token| token.parse().ok())
        .unwrap_or(default)
}

pub(crate) fn parse_required<T: FromStr>(args: &[&str], index: usize, what: &str) -> Result<T> {
    let token = args
        .get(index)
        .ok_or_else(|| Error::Parse(format!("missing {}", what)))?;
    token
        .parse()
        .map_err(|_| Error::Parse(format!("unparseable {}: {}", what, token)))
}

/// A one-letter criterion or field code.
pub(crate) fn parse_code(args: &[&str], index: usize, what: &str) -> Result<char> {
    let token = args
        .get(index)
        .ok_or_else(|| Error::Parse(format!("missing {}", what)))?;
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(code), None) => Ok(code),
        _ => Err(Error::Parse(format!(
            "{} must be a single character: {}",
            what, token
        ))),
    }
}
