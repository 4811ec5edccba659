use std::fmt::Write as _;

use faraday_catalog::Field;

use super::{Command, CommandOutput};
use crate::error::Result;
use crate::session::Session;

pub struct Help;

fn command_help(name: &str) -> Option<String> {
    let text = match name {
        "MATCH" => "MATCH [RM|GAL] [threshold_kpc] [workers]\n\
             Cross-match the target catalog against the active records of\n\
             the other catalog, keeping records whose impact parameter at\n\
             the reference distance is within the threshold.\n\
             Defaults: RM, 1000.0 kpc, 2 workers (0 = all cores)."
            .to_string(),
        "CANCEL" => "CANCEL\n\
             Set the cancellation token. The next pass launched in this\n\
             session clears it again before starting."
            .to_string(),
        "ANNULUS" => "ANNULUS [threshold_deg]\n\
             Compute the neighbor count and mean rotation measure within\n\
             an angular separation for every source. Default 2.0 degrees."
            .to_string(),
        "KNN" => "KNN [k]\n\
             Compute mean, median, and standard deviation of the rotation\n\
             measure over the K nearest sources. Default K = 20."
            .to_string(),
        "CULL" => "CULL <RM|GAL> <criterion> <bounds...>\n\
             Keep only records passing the predicate:\n\
               c <bound>    |mean RM| no greater than bound\n\
               n <bound>    |nearest-neighbor mean RM| no greater than bound\n\
               l <bound>    |galactic latitude| at least bound\n\
               d <lo> <hi>  declination inside [lo, hi]\n\
               z <lo> <hi>  redshift inside [lo, hi]"
            .to_string(),
        "DIVIDE" => "DIVIDE <RM|GAL> <criterion> [bounds...]\n\
             Route the active records into bins A and B:\n\
               t            transition box on color and stellar mass\n\
               z <lo> <hi>  redshift inside [lo, hi]\n\
               c <lo> <hi>  color inside [lo, hi]\n\
               m <lo> <hi>  stellar mass inside [lo, hi]\n\
               f <lo> <hi>  color/mass ratio inside [lo, hi]\n\
               r <lo> <hi>  right ascension inside [lo, hi]\n\
               p [kpc] [workers]  within impact distance of the other\n\
                            catalog's bin A (defaults 20.0 kpc, 2 workers)"
            .to_string(),
        "RESET" => "RESET\n\
             Restore both catalogs to their full ingested record sets."
            .to_string(),
        "SAVE" => "SAVE [dir]\n\
             Write both active catalogs as binary snapshots under dir\n\
             (default ./cache)."
            .to_string(),
        "LOAD" => "LOAD [dir]\n\
             Replace both catalogs from binary snapshots under dir\n\
             (default ./cache)."
            .to_string(),
        "EXPORT" => {
            let mut text = String::from(
                "EXPORT <RM|GAL> [A|B] <field> <path>\n\
                 Write one column of the active catalog (or of bin A or B)\n\
                 to a text file, one value per line. Fields:\n",
            );
            for field in Field::ALL {
                let _ = writeln!(text, "               {}  {}", field.code(), field.name());
            }
            text.pop();
            text
        }
        "SHOW" => "SHOW\n\
             Display catalog generations, bins, and the last pass."
            .to_string(),
        "HELP" => "HELP [command]\n\
             List commands, or describe one in detail."
            .to_string(),
        _ => return None,
    };
    Some(text)
}

fn general_help() -> CommandOutput {
    let commands: [(&str, &str); 12] = [
        ("MATCH", "Cross-match against the other catalog"),
        ("CANCEL", "Request cancellation of the next pass launch"),
        ("ANNULUS", "Neighborhood means within an angular threshold"),
        ("KNN", "Statistics over the K nearest sources"),
        ("CULL", "Filter the active generation by a predicate"),
        ("DIVIDE", "Split the active generation into bins A and B"),
        ("RESET", "Restore both catalogs to their full record sets"),
        ("SAVE", "Write both active catalogs to snapshot files"),
        ("LOAD", "Replace both catalogs from snapshot files"),
        ("EXPORT", "Write one catalog column to a text file"),
        ("SHOW", "Display session state"),
        ("HELP", "Show this help (HELP <command> for details)"),
    ];
    CommandOutput::Table {
        headers: vec!["Command".to_string(), "Description".to_string()],
        rows: commands
            .iter()
            .map(|(name, description)| vec![name.to_string(), description.to_string()])
            .collect(),
    }
}

impl Command for Help {
    fn name(&self) -> &str {
        "HELP"
    }
    fn description(&self) -> &str {
        "Show this help"
    }

    fn execute(&self, _session: &mut Session, args: &[&str]) -> Result<CommandOutput> {
        match args.first() {
            Some(name) => {
                let name = name.to_uppercase();
                let text =
                    command_help(&name).unwrap_or_else(|| format!("Unknown command: {name}"));
                Ok(CommandOutput::Text(text))
            }
            None => Ok(general_help()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_help_lists_every_command() {
        let CommandOutput::Table { headers, rows } = general_help() else {
            panic!("expected a table");
        };
        assert_eq!(headers, vec!["Command", "Description"]);
        assert_eq!(rows.len(), 12);
        for row in &rows {
            assert!(command_help(&row[0]).is_some(), "no detail for {}", row[0]);
        }
    }

    #[test]
    fn export_help_names_every_field() {
        let text = command_help("EXPORT").unwrap();
        for field in Field::ALL {
            assert!(
                text.contains(field.name()),
                "missing field {}",
                field.name()
            );
        }
    }
}
