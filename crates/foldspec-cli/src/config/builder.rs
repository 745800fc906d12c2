use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::Cli;
use crate::error::{CliError, Result};
use foldspec::compiler::config::{CompilerConfig, CompilerConfigBuilder};

/// Merges CLI arguments over the optional TOML config file over compiled-in
/// defaults into the core compiler configuration.
pub fn build_config(cli: &Cli) -> Result<CompilerConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let file_paths = file_config.paths.unwrap_or_default();

    let input_dir = cli
        .input_dir
        .clone()
        .or(file_paths.input_dir)
        .unwrap_or(defaults.input_dir);
    let output_dir = cli
        .output_dir
        .clone()
        .or(file_paths.output_dir)
        .unwrap_or(defaults.output_dir);
    let ledger_path = cli
        .ledger
        .clone()
        .or(file_paths.ledger)
        .unwrap_or_else(|| DefaultsConfig::ledger_path(&output_dir));

    CompilerConfigBuilder::new()
        .input_dir(input_dir)
        .output_root(output_dir)
        .ledger_path(ledger_path)
        .write_ledger(!cli.no_ledger)
        .overwrite(cli.force)
        .dry_run(cli.dry_run)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}
