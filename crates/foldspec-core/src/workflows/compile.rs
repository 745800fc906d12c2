use crate::compiler::config::CompilerConfig;
use crate::compiler::error::Result;
use crate::compiler::ligand;
use crate::compiler::loader;
use crate::compiler::materialize::{self, MaterializeRequest, Outcome};
use crate::compiler::naming::{self, NameParts};
use crate::compiler::ptm::{self, PtmDirective};
use tracing::{info, instrument};

/// One invocation's worth of inputs, before resolution.
#[derive(Debug, Clone, Default)]
pub struct CompileRequest {
    /// Sequence file references, in declaration order.
    pub sequence_refs: Vec<String>,
    /// Parsed PTM directives, in declaration order.
    pub ptm_directives: Vec<PtmDirective>,
    /// The raw comma-separated ligand list, if any.
    pub ligand_list: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantReport {
    pub name: String,
    pub outcome: Outcome,
}

/// Per-variant outcomes of one compile run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    pub variants: Vec<VariantReport>,
}

impl CompileReport {
    pub fn created(&self) -> usize {
        self.count(Outcome::Created)
    }

    pub fn skipped(&self) -> usize {
        self.count(Outcome::Skipped)
    }

    /// True when every variant hit an already-existing job. Batch callers map
    /// this to the dedicated skip exit code.
    pub fn all_skipped(&self) -> bool {
        !self.variants.is_empty() && self.skipped() == self.variants.len()
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.variants
            .iter()
            .filter(|v| v.outcome == outcome)
            .count()
    }
}

/// Runs the whole compiler: load once, resolve once, materialize per variant.
///
/// Sequence loading, PTM resolution, and ligand resolution happen exactly once
/// regardless of how many variants the each-lysine directives expand to; the
/// synthesizer and materializer are then pure functions of that shared state
/// plus the per-variant override.
#[instrument(skip_all, name = "compile_workflow")]
pub fn run(request: &CompileRequest, config: &CompilerConfig) -> Result<CompileReport> {
    info!("Loading {} sequence input(s)", request.sequence_refs.len());
    let sequences = loader::load_sequences(&request.sequence_refs, &config.input_dir)?;
    let resolution = ptm::resolve_directives(&request.ptm_directives, &sequences)?;
    let ligands = ligand::resolve_ligands(request.ligand_list.as_deref(), &config.input_dir)?;

    let parts = NameParts {
        name_order: &sequences.name_order,
        name_counts: &sequences.name_counts,
        suffixes: &resolution.suffixes,
        ligand_segment: &ligands.name_segment,
    };

    let mut report = CompileReport::default();
    if resolution.variants.is_empty() {
        let name = naming::synthesize(&parts, None);
        let outcome = materialize::materialize(
            &MaterializeRequest {
                name: &name,
                sequences: &sequences.inputs,
                shared_modifications: &resolution.modifications,
                variant: None,
                ligands: &ligands.entries,
            },
            config,
        )?;
        report.variants.push(VariantReport { name, outcome });
    } else {
        info!(
            "Each-lysine expansion produced {} job variant(s)",
            resolution.variants.len()
        );
        for variant in &resolution.variants {
            let name = naming::synthesize(
                &parts,
                Some((variant.clean_name.as_str(), variant.suffix.as_str())),
            );
            let outcome = materialize::materialize(
                &MaterializeRequest {
                    name: &name,
                    sequences: &sequences.inputs,
                    shared_modifications: &resolution.modifications,
                    variant: Some(variant),
                    ligands: &ligands.entries,
                },
                config,
            )?;
            report.variants.push(VariantReport { name, outcome });
        }
    }

    Ok(report)
}
