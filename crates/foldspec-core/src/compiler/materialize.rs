use crate::compiler::config::CompilerConfig;
use crate::compiler::error::{CompileError, Result};
use crate::compiler::ledger;
use crate::compiler::ptm::VariantRequest;
use crate::core::models::job::{ChainEntry, JobDocument, LigandChain, Modification, NucleicChain, ProteinChain};
use crate::core::models::ligand::{LigandPayload, ResolvedLigand};
use crate::core::models::sequence::{MoleculeType, SequenceInput};
use crate::core::utils::identifiers::{ChainIdAllocator, MAX_CHAINS};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// What happened to one job variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Document written (and ledger appended, unless disabled).
    Created,
    /// The job directory already holds its document and overwrite is off.
    Skipped,
    /// Dry-run reported the action without touching the filesystem.
    DryRun,
}

/// Everything needed to materialize one job variant, borrowed from the shared
/// per-invocation state.
#[derive(Debug, Clone, Copy)]
pub struct MaterializeRequest<'a> {
    pub name: &'a str,
    pub sequences: &'a [SequenceInput],
    /// Shared modifications per 1-based FASTA index.
    pub shared_modifications: &'a BTreeMap<usize, Vec<Modification>>,
    /// Set when this materialization is an each-lysine variant; its
    /// modification is appended after the shared ones on the target chain.
    pub variant: Option<&'a VariantRequest>,
    pub ligands: &'a [ResolvedLigand],
}

impl MaterializeRequest<'_> {
    fn document_path(&self, config: &CompilerConfig) -> PathBuf {
        config
            .output_root
            .join(self.name)
            .join(format!("{}.json", self.name))
    }
}

/// Assembles the complete job document in memory.
///
/// Chain identifiers are allocated sequentially across sequence chains and
/// ligand instances; exceeding the single-letter alphabet is a hard error
/// raised before anything is written.
pub fn build_document(request: &MaterializeRequest<'_>) -> Result<JobDocument> {
    let required = request.sequences.len() + request.ligands.len();
    if required > MAX_CHAINS {
        return Err(CompileError::ChainCapacityExceeded {
            required,
            available: MAX_CHAINS,
        });
    }

    let mut allocator = ChainIdAllocator::new();
    let mut chains = Vec::with_capacity(required);

    for (index, sequence) in request.sequences.iter().enumerate() {
        let fasta_index = index + 1;
        let id = next_chain_id(&mut allocator, required)?;
        let entry = match sequence.molecule_type {
            MoleculeType::Protein => {
                let mut modifications = request
                    .shared_modifications
                    .get(&fasta_index)
                    .cloned()
                    .unwrap_or_default();
                if let Some(variant) = request.variant {
                    if variant.fasta_index == fasta_index {
                        modifications.push(variant.modification.clone());
                    }
                }
                ChainEntry::Protein(ProteinChain {
                    id,
                    sequence: sequence.residues.clone(),
                    modifications,
                })
            }
            MoleculeType::Dna => ChainEntry::Dna(NucleicChain {
                id,
                sequence: sequence.residues.clone(),
            }),
            MoleculeType::Rna => ChainEntry::Rna(NucleicChain {
                id,
                sequence: sequence.residues.clone(),
            }),
        };
        chains.push(entry);
    }

    for ligand in request.ligands {
        let id = next_chain_id(&mut allocator, required)?;
        let chain = match &ligand.payload {
            LigandPayload::Component(code) => LigandChain::component(id, code.clone()),
            LigandPayload::Freeform(content) => LigandChain::freeform(id, content.clone()),
        };
        chains.push(ChainEntry::Ligand(chain));
    }

    Ok(JobDocument::new(request.name.to_string(), chains))
}

fn next_chain_id(allocator: &mut ChainIdAllocator, required: usize) -> Result<String> {
    allocator
        .next_id()
        .ok_or(CompileError::ChainCapacityExceeded {
            required,
            available: MAX_CHAINS,
        })
}

/// Materializes one job variant under the configured output root.
///
/// The document is fully built and serialized before any directory is
/// created, so a failing variant leaves no partial state. An existing
/// document skips unless overwrite is forced; dry-run mode reports without
/// mutating anything, the ledger included.
pub fn materialize(request: &MaterializeRequest<'_>, config: &CompilerConfig) -> Result<Outcome> {
    let document_path = request.document_path(config);

    if document_path.exists() && !config.overwrite {
        info!(
            "Job '{}' already exists at {:?}; skipping",
            request.name, document_path
        );
        return Ok(Outcome::Skipped);
    }

    let document = build_document(request)?;
    let mut json = serde_json::to_string_pretty(&document)?;
    json.push('\n');

    if config.dry_run {
        info!(
            "Dry run: would write job '{}' to {:?}",
            request.name, document_path
        );
        return Ok(Outcome::DryRun);
    }

    let job_dir = config.output_root.join(request.name);
    fs::create_dir_all(&job_dir).map_err(|source| CompileError::WriteDocument {
        path: job_dir.clone(),
        source,
    })?;
    fs::write(&document_path, json).map_err(|source| CompileError::WriteDocument {
        path: document_path.clone(),
        source,
    })?;
    info!("Wrote job document {:?}", document_path);

    if config.write_ledger {
        ledger::append(&config.ledger_path, request.name)?;
    }

    Ok(Outcome::Created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::config::CompilerConfigBuilder;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn protein(name: &str, residues: &str) -> SequenceInput {
        SequenceInput::new(
            name.to_string(),
            PathBuf::from(format!("{name}.fasta")),
            residues.to_string(),
        )
    }

    fn config_for(root: &Path) -> CompilerConfig {
        CompilerConfigBuilder::new()
            .input_dir(root.to_path_buf())
            .output_root(root.join("jobs"))
            .ledger_path(root.join("jobs/job_names.txt"))
            .build()
            .unwrap()
    }

    #[test]
    fn document_orders_sequence_chains_before_ligands_with_sequential_ids() {
        let sequences = vec![protein("hH3", "MKAK"), protein("probe", "GATTACA")];
        let ligands = vec![
            ResolvedLigand::component("SAH"),
            ResolvedLigand::component("GTP"),
        ];
        let request = MaterializeRequest {
            name: "H3-probe-SAH-GTP",
            sequences: &sequences,
            shared_modifications: &BTreeMap::new(),
            variant: None,
            ligands: &ligands,
        };
        let document = build_document(&request).unwrap();
        let json = serde_json::to_value(&document).unwrap();
        let chains = json["sequences"].as_array().unwrap();
        assert_eq!(chains.len(), 4);
        assert_eq!(chains[0]["protein"]["id"], "A");
        assert_eq!(chains[1]["dna"]["id"], "B");
        assert_eq!(chains[2]["ligand"]["id"], "C");
        assert_eq!(chains[2]["ligand"]["ccdCodes"][0], "SAH");
        assert_eq!(chains[3]["ligand"]["id"], "D");
    }

    #[test]
    fn variant_modification_is_appended_after_shared_ones() {
        let sequences = vec![protein("hH3", "MKAK")];
        let mut shared = BTreeMap::new();
        shared.insert(
            1,
            vec![Modification {
                ptm_type: "ALY".into(),
                ptm_position: 4,
            }],
        );
        let variant = VariantRequest {
            fasta_index: 1,
            clean_name: "H3".into(),
            suffix: "_K2me1".into(),
            modification: Modification {
                ptm_type: "MLZ".into(),
                ptm_position: 2,
            },
        };
        let request = MaterializeRequest {
            name: "H3_K2me1",
            sequences: &sequences,
            shared_modifications: &shared,
            variant: Some(&variant),
            ligands: &[],
        };
        let document = build_document(&request).unwrap();
        let json = serde_json::to_value(&document).unwrap();
        let modifications = json["sequences"][0]["protein"]["modifications"]
            .as_array()
            .unwrap();
        assert_eq!(modifications[0]["ptmType"], "ALY");
        assert_eq!(modifications[1]["ptmType"], "MLZ");
        assert_eq!(modifications[1]["ptmPosition"], 2);
    }

    #[test]
    fn chain_capacity_is_checked_before_any_write() {
        let ligands: Vec<ResolvedLigand> = (0..27).map(|_| ResolvedLigand::component("X")).collect();
        let request = MaterializeRequest {
            name: "too-big",
            sequences: &[],
            shared_modifications: &BTreeMap::new(),
            variant: None,
            ligands: &ligands,
        };
        assert!(matches!(
            build_document(&request).unwrap_err(),
            CompileError::ChainCapacityExceeded {
                required: 27,
                available: 26
            }
        ));
    }

    #[test]
    fn materialize_writes_document_and_ledger() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path());
        let sequences = vec![protein("hH3", "MKAK")];
        let request = MaterializeRequest {
            name: "H3",
            sequences: &sequences,
            shared_modifications: &BTreeMap::new(),
            variant: None,
            ligands: &[],
        };

        assert_eq!(materialize(&request, &config).unwrap(), Outcome::Created);

        let document_path = dir.path().join("jobs/H3/H3.json");
        let content = fs::read_to_string(&document_path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["name"], "H3");
        assert_eq!(json["modelSeeds"], serde_json::json!([1, 2, 8, 42, 88]));
        assert_eq!(json["dialect"], "alphafold3");
        assert_eq!(json["version"], 1);

        let ledger = fs::read_to_string(dir.path().join("jobs/job_names.txt")).unwrap();
        assert_eq!(ledger, "job_name\nH3\n");
    }

    #[test]
    fn existing_job_skips_unless_overwrite_is_forced() {
        let dir = tempdir().unwrap();
        let mut config = config_for(dir.path());
        let sequences = vec![protein("hH3", "MKAK")];
        let request = MaterializeRequest {
            name: "H3",
            sequences: &sequences,
            shared_modifications: &BTreeMap::new(),
            variant: None,
            ligands: &[],
        };

        assert_eq!(materialize(&request, &config).unwrap(), Outcome::Created);
        assert_eq!(materialize(&request, &config).unwrap(), Outcome::Skipped);

        // Skipping never duplicates the ledger line.
        let ledger = fs::read_to_string(dir.path().join("jobs/job_names.txt")).unwrap();
        assert_eq!(ledger, "job_name\nH3\n");

        config.overwrite = true;
        assert_eq!(materialize(&request, &config).unwrap(), Outcome::Created);
        let ledger = fs::read_to_string(dir.path().join("jobs/job_names.txt")).unwrap();
        assert_eq!(ledger, "job_name\nH3\n");
    }

    #[test]
    fn dry_run_reports_without_touching_the_filesystem() {
        let dir = tempdir().unwrap();
        let mut config = config_for(dir.path());
        config.dry_run = true;
        let sequences = vec![protein("hH3", "MKAK")];
        let request = MaterializeRequest {
            name: "H3",
            sequences: &sequences,
            shared_modifications: &BTreeMap::new(),
            variant: None,
            ligands: &[],
        };

        assert_eq!(materialize(&request, &config).unwrap(), Outcome::DryRun);
        assert!(!dir.path().join("jobs").exists());
    }

    #[test]
    fn no_ledger_mode_writes_the_document_only() {
        let dir = tempdir().unwrap();
        let mut config = config_for(dir.path());
        config.write_ledger = false;
        let sequences = vec![protein("hH3", "MKAK")];
        let request = MaterializeRequest {
            name: "H3",
            sequences: &sequences,
            shared_modifications: &BTreeMap::new(),
            variant: None,
            ligands: &[],
        };

        assert_eq!(materialize(&request, &config).unwrap(), Outcome::Created);
        assert!(dir.path().join("jobs/H3/H3.json").exists());
        assert!(!dir.path().join("jobs/job_names.txt").exists());
    }

    #[test]
    fn freeform_content_round_trips_through_the_document() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path());
        let raw = "C\\C=C\\C(\"odd\")";
        let ligands = vec![ResolvedLigand::freeform("lig", raw.to_string())];
        let request = MaterializeRequest {
            name: "lig-job",
            sequences: &[],
            shared_modifications: &BTreeMap::new(),
            variant: None,
            ligands: &ligands,
        };

        materialize(&request, &config).unwrap();
        let content = fs::read_to_string(dir.path().join("jobs/lig-job/lig-job.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["sequences"][0]["ligand"]["smiles"], raw);
    }
}
