mod cli;
mod config;
mod error;
mod logging;

use crate::cli::Cli;
use crate::error::Result;
use clap::Parser;
use foldspec::compiler::materialize::Outcome;
use foldspec::compiler::ptm::PtmDirective;
use foldspec::workflows::compile::{self, CompileReport, CompileRequest};
use tracing::{debug, error, info};

/// Exit code reserved for runs where every variant already existed, so batch
/// callers can tally skips separately from failures.
const EXIT_ALL_SKIPPED: i32 = 3;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    match run_app(&cli) {
        Ok(report) => std::process::exit(exit_code(&report)),
        Err(e) => {
            error!("Command failed: {e}");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run_app(cli: &Cli) -> Result<CompileReport> {
    info!("foldspec v{} starting up", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", cli);

    let config = config::build_config(cli)?;
    let request = build_request(cli)?;
    let report = compile::run(&request, &config)?;

    for variant in &report.variants {
        match variant.outcome {
            Outcome::Created => println!("created {}", variant.name),
            Outcome::Skipped => println!("skipped {} (already exists)", variant.name),
            Outcome::DryRun => println!("dry-run {}", variant.name),
        }
    }
    println!("{} created, {} skipped", report.created(), report.skipped());

    Ok(report)
}

fn build_request(cli: &Cli) -> Result<CompileRequest> {
    let mut directives = Vec::new();
    for directive in &cli.ptm {
        directives.push(PtmDirective::parse_explicit(directive)?);
    }
    for directive in &cli.ptm_all {
        directives.push(PtmDirective::parse_all(directive)?);
    }
    for directive in &cli.ptm_each {
        directives.push(PtmDirective::parse_each(directive)?);
    }
    Ok(CompileRequest {
        sequence_refs: cli.sequences.clone(),
        ptm_directives: directives,
        ligand_list: cli.ligands.clone(),
    })
}

fn exit_code(report: &CompileReport) -> i32 {
    if report.all_skipped() {
        EXIT_ALL_SKIPPED
    } else {
        0
    }
}
