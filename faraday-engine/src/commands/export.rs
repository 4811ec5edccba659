use std::path::Path;

use faraday_catalog::{write_column, Field};

use super::{parse_code, Command, CommandOutput};
use crate::error::{Error, Result};
use crate::session::{FamilySelector, Session};

pub struct Export;

impl Command for Export {
    fn name(&self) -> &str {
        "EXPORT"
    }
    fn description(&self) -> &str {
        "Write one catalog column to a text file"
    }

    fn execute(&self, session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        let selector = FamilySelector::parse(
            args.first()
                .ok_or_else(|| Error::Parse("missing catalog selector".into()))?,
        )?;
        // Lowercase a and b are field codes, so a bin selector is only
        // recognized when the argument count leaves room for one.
        let (bin, code_index) = if args.len() >= 4 {
            let bin = match args[1].to_uppercase().as_str() {
                "A" => true,
                "B" => false,
                other => {
                    return Err(Error::Parse(format!(
                        "unknown bin selector: {other} (expected A or B)"
                    )))
                }
            };
            (Some(bin), 2)
        } else {
            (None, 1)
        };
        let code = parse_code(args, code_index, "export field")?;
        let field = Field::from_code(code).ok_or(Error::UnknownField(code))?;
        let path = args
            .get(code_index + 1)
            .ok_or_else(|| Error::Parse("missing output path".into()))?;

        let family = session.family(selector);
        let catalog = match bin {
            Some(true) => family.bin_a(),
            Some(false) => family.bin_b(),
            None => family.active(),
        };
        let written = write_column(catalog, field, Path::new(path))?;
        Ok(CommandOutput::Text(format!(
            "Wrote {} {} values to {}",
            written,
            field.name(),
            path
        )))
    }
}
