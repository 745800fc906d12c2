use crate::compiler::error::{CompileError, Result};
use crate::compiler::loader::LoadedSequences;
use crate::core::models::job::Modification;
use crate::core::models::sequence::SequenceInput;
use phf::{Map, phf_map};
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

/// Closed mapping from symbolic PTM-type keys to the chemical-component codes
/// understood by the downstream inference tool.
static PTM_TYPES: Map<&'static str, &'static str> = phf_map! {
    "me1" => "MLZ",
    "me2" => "MLY",
    "me3" => "M3L",
    "ac" => "ALY",
};

/// Known symbolic PTM-type keys, sorted for stable error messages.
pub fn known_ptm_types() -> Vec<&'static str> {
    let mut keys: Vec<_> = PTM_TYPES.keys().copied().collect();
    keys.sort_unstable();
    keys
}

/// Resolves a symbolic PTM-type key to its chemical-component code.
pub fn resolve_ptm_code(key: &str) -> Result<&'static str> {
    PTM_TYPES
        .get(key)
        .copied()
        .ok_or_else(|| CompileError::UnknownPtmType {
            key: key.to_string(),
            known: known_ptm_types().join(", "),
        })
}

/// Target of an all-lysine directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllTarget {
    /// An explicit 1-based FASTA index.
    Index(usize),
    /// The last protein-typed input in declaration order.
    LastProtein,
}

/// A parsed PTM directive. Syntax is classified up front; semantic validation
/// against the loaded sequences happens in [`resolve_directives`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PtmDirective {
    /// One modification at an explicit 1-based position.
    Explicit {
        fasta_index: usize,
        position: usize,
        ptm_type: String,
    },
    /// One modification on every lysine of the target.
    AllOfType { target: AllTarget, ptm_type: String },
    /// One independent job variant per lysine of the target.
    EachOfType {
        fasta_index: usize,
        ptm_type: String,
    },
}

impl PtmDirective {
    /// Parses the `IDX:POS:TYPE` explicit-site form.
    pub fn parse_explicit(directive: &str) -> Result<Self> {
        const EXPECTED: &str = "IDX:POS:TYPE";
        let mut parts = directive.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(index), Some(position), Some(ptm_type), None) if !ptm_type.is_empty() => {
                Ok(PtmDirective::Explicit {
                    fasta_index: parse_number(index, directive, EXPECTED)?,
                    position: parse_number(position, directive, EXPECTED)?,
                    ptm_type: ptm_type.to_string(),
                })
            }
            _ => Err(malformed(directive, EXPECTED)),
        }
    }

    /// Parses the `TYPE` or `IDX:TYPE` all-lysine form.
    pub fn parse_all(directive: &str) -> Result<Self> {
        const EXPECTED: &str = "TYPE or IDX:TYPE";
        let mut parts = directive.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(ptm_type), None, None) if !ptm_type.is_empty() => Ok(PtmDirective::AllOfType {
                target: AllTarget::LastProtein,
                ptm_type: ptm_type.to_string(),
            }),
            (Some(index), Some(ptm_type), None) if !ptm_type.is_empty() => {
                Ok(PtmDirective::AllOfType {
                    target: AllTarget::Index(parse_number(index, directive, EXPECTED)?),
                    ptm_type: ptm_type.to_string(),
                })
            }
            _ => Err(malformed(directive, EXPECTED)),
        }
    }

    /// Parses the `IDX:TYPE` each-lysine form.
    pub fn parse_each(directive: &str) -> Result<Self> {
        const EXPECTED: &str = "IDX:TYPE";
        let mut parts = directive.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(index), Some(ptm_type), None) if !ptm_type.is_empty() => {
                Ok(PtmDirective::EachOfType {
                    fasta_index: parse_number(index, directive, EXPECTED)?,
                    ptm_type: ptm_type.to_string(),
                })
            }
            _ => Err(malformed(directive, EXPECTED)),
        }
    }
}

fn malformed(directive: &str, expected: &'static str) -> CompileError {
    CompileError::MalformedDirective {
        directive: directive.to_string(),
        expected,
    }
}

fn parse_number(field: &str, directive: &str, expected: &'static str) -> Result<usize> {
    field
        .parse::<usize>()
        .map_err(|_| malformed(directive, expected))
}

/// One job-variant request produced by an each-lysine directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRequest {
    /// 1-based FASTA index of the chain the extra modification lands on.
    pub fasta_index: usize,
    /// Clean name of that chain, the key the name override applies to.
    pub clean_name: String,
    /// One-off name suffix for this variant (`_K<pos><type>`).
    pub suffix: String,
    /// The site-specific modification, appended after the shared ones.
    pub modification: Modification,
}

/// Everything the directives resolved to, threaded explicitly instead of
/// living in ambient mutable state.
#[derive(Debug, Clone, Default)]
pub struct PtmResolution {
    /// Shared modifications per 1-based FASTA index, in accumulation order.
    pub modifications: BTreeMap<usize, Vec<Modification>>,
    /// Accumulated name suffixes per clean name.
    pub suffixes: HashMap<String, String>,
    /// Variant requests from each-lysine directives, in directive order.
    pub variants: Vec<VariantRequest>,
}

/// Resolves every directive against the loaded sequences.
///
/// Directives are evaluated independently, in order; failures are fatal and
/// leave nothing half-applied because the caller only uses a fully built
/// resolution. Ambiguous targets (clean name occurring more than once) warn
/// and resolve by FASTA index.
pub fn resolve_directives(
    directives: &[PtmDirective],
    sequences: &LoadedSequences,
) -> Result<PtmResolution> {
    let mut resolution = PtmResolution::default();

    for directive in directives {
        match directive {
            PtmDirective::Explicit {
                fasta_index,
                position,
                ptm_type,
            } => {
                let code = resolve_ptm_code(ptm_type)?;
                let target = validated_target(sequences, *fasta_index)?;
                warn_on_ambiguous_name(sequences, target, *fasta_index);
                let residue = target.residue_at(*position).ok_or_else(|| {
                    CompileError::PtmPositionOutOfRange {
                        position: *position,
                        name: target.clean_name.clone(),
                        length: target.residues.chars().count(),
                    }
                })?;
                resolution
                    .modifications
                    .entry(*fasta_index)
                    .or_default()
                    .push(Modification {
                        ptm_type: code.to_string(),
                        ptm_position: *position,
                    });
                append_suffix(
                    &mut resolution.suffixes,
                    &target.clean_name,
                    &format!("_{residue}{position}{ptm_type}"),
                );
            }

            PtmDirective::AllOfType { target, ptm_type } => {
                let code = resolve_ptm_code(ptm_type)?;
                let (fasta_index, input) = match target {
                    AllTarget::Index(index) => (*index, validated_target(sequences, *index)?),
                    AllTarget::LastProtein => last_protein(sequences)?,
                };
                warn_on_ambiguous_name(sequences, input, fasta_index);
                let sites = input.lysine_positions();
                if sites.is_empty() {
                    if matches!(target, AllTarget::Index(_)) {
                        warn!(
                            "All-lysine PTM '{}' on '{}' (FASTA index {}) found no lysines",
                            ptm_type, input.clean_name, fasta_index
                        );
                    }
                } else {
                    let chain = resolution.modifications.entry(fasta_index).or_default();
                    for position in sites {
                        chain.push(Modification {
                            ptm_type: code.to_string(),
                            ptm_position: position,
                        });
                    }
                }
                append_suffix(
                    &mut resolution.suffixes,
                    &input.clean_name,
                    &format!("_KALL{ptm_type}"),
                );
            }

            PtmDirective::EachOfType {
                fasta_index,
                ptm_type,
            } => {
                let code = resolve_ptm_code(ptm_type)?;
                let target = validated_target(sequences, *fasta_index)?;
                warn_on_ambiguous_name(sequences, target, *fasta_index);
                let sites = target.lysine_positions();
                if sites.is_empty() {
                    warn!(
                        "Each-lysine PTM '{}' on '{}' (FASTA index {}) found no lysines; \
                         no job variants from this directive",
                        ptm_type, target.clean_name, fasta_index
                    );
                    continue;
                }
                info!(
                    "Each-lysine PTM '{}' on '{}' will produce {} job variant(s)",
                    ptm_type,
                    target.clean_name,
                    sites.len()
                );
                for position in sites {
                    resolution.variants.push(VariantRequest {
                        fasta_index: *fasta_index,
                        clean_name: target.clean_name.clone(),
                        suffix: format!("_K{position}{ptm_type}"),
                        modification: Modification {
                            ptm_type: code.to_string(),
                            ptm_position: position,
                        },
                    });
                }
            }
        }
    }

    Ok(resolution)
}

fn validated_target(sequences: &LoadedSequences, index: usize) -> Result<&SequenceInput> {
    let input =
        sequences
            .by_fasta_index(index)
            .ok_or_else(|| CompileError::FastaIndexOutOfRange {
                index,
                count: sequences.inputs.len(),
            })?;
    if !input.molecule_type.is_protein() {
        return Err(CompileError::PtmTargetNotProtein {
            index,
            name: input.clean_name.clone(),
        });
    }
    Ok(input)
}

fn last_protein(sequences: &LoadedSequences) -> Result<(usize, &SequenceInput)> {
    sequences
        .inputs
        .iter()
        .enumerate()
        .rev()
        .find(|(_, input)| input.molecule_type.is_protein())
        .map(|(i, input)| (i + 1, input))
        .ok_or(CompileError::NoProteinTarget)
}

fn warn_on_ambiguous_name(sequences: &LoadedSequences, target: &SequenceInput, index: usize) {
    let occurrences = sequences
        .name_counts
        .get(&target.clean_name)
        .copied()
        .unwrap_or(0);
    if occurrences > 1 {
        warn!(
            "PTM target name '{}' occurs {} times among the inputs; naming may be \
             ambiguous (the directive applies to FASTA index {})",
            target.clean_name, occurrences, index
        );
    }
}

fn append_suffix(suffixes: &mut HashMap<String, String>, clean_name: &str, suffix: &str) {
    suffixes
        .entry(clean_name.to_string())
        .or_default()
        .push_str(suffix);
}
