use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "foldspec",
    version,
    about = "Foldspec - compiles molecular sequence files plus PTM and ligand directives \
             into structure-prediction job documents and a shared job ledger.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Sequence file references. Bare names resolve against the input
    /// directory (gaining a .fasta suffix when extensionless); paths are used
    /// as given.
    #[arg(required = true, value_name = "SEQUENCE")]
    pub sequences: Vec<String>,

    /// Apply a PTM at an explicit 1-based site of a sequence input.
    /// Repeatable. Example: --ptm 1:14:me3
    #[arg(long = "ptm", value_name = "IDX:POS:TYPE")]
    pub ptm: Vec<String>,

    /// Apply a PTM to every lysine of a target. Without an index the last
    /// protein input is targeted. Repeatable. Example: --ptm-all me1
    #[arg(long = "ptm-all", value_name = "[IDX:]TYPE")]
    pub ptm_all: Vec<String>,

    /// Produce one independent job variant per lysine of the target.
    /// Repeatable. Example: --ptm-each 1:me1
    #[arg(long = "ptm-each", value_name = "IDX:TYPE")]
    pub ptm_each: Vec<String>,

    /// Comma-separated ligand list of code[:count] items. A code ending in
    /// .smiles references a freeform small-molecule file.
    /// Example: --ligands SAH:2,GTP
    #[arg(long, value_name = "LIST")]
    pub ligands: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory bare sequence and small-molecule file names resolve against.
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Root directory under which each job gets its own directory.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path of the shared job-name ledger.
    #[arg(long, value_name = "PATH")]
    pub ledger: Option<PathBuf>,

    /// Do not append job names to the ledger.
    #[arg(long)]
    pub no_ledger: bool,

    /// Re-create jobs whose documents already exist.
    #[arg(long)]
    pub force: bool,

    /// Report what would be done without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_and_flags_parse_together() {
        let cli = Cli::parse_from([
            "foldspec",
            "hH3",
            "probe",
            "--ptm",
            "1:14:me3",
            "--ptm-all",
            "me1",
            "--ptm-each",
            "1:ac",
            "--ligands",
            "SAH:2,GTP",
            "--force",
            "--dry-run",
        ]);
        assert_eq!(cli.sequences, vec!["hH3", "probe"]);
        assert_eq!(cli.ptm, vec!["1:14:me3"]);
        assert_eq!(cli.ptm_all, vec!["me1"]);
        assert_eq!(cli.ptm_each, vec!["1:ac"]);
        assert_eq!(cli.ligands.as_deref(), Some("SAH:2,GTP"));
        assert!(cli.force);
        assert!(cli.dry_run);
        assert!(!cli.no_ledger);
    }

    #[test]
    fn at_least_one_sequence_is_required() {
        assert!(Cli::try_parse_from(["foldspec"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["foldspec", "hH3", "-q", "-v"]).is_err());
    }
}
