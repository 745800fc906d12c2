use crate::compiler::error::{CompileError, Result};
use crate::core::io::fasta;
use crate::core::models::sequence::SequenceInput;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Canonical suffix for sequence files; appended to bare extensionless
/// references and stripped (via the file stem) for clean names.
pub const SEQUENCE_SUFFIX: &str = "fasta";

/// All sequence inputs of one invocation, in declaration order, plus the
/// derived naming metadata the synthesizer consumes.
#[derive(Debug, Clone)]
pub struct LoadedSequences {
    pub inputs: Vec<SequenceInput>,
    /// Unique clean names in first-appearance order.
    pub name_order: Vec<String>,
    /// Occurrence count per clean name.
    pub name_counts: HashMap<String, usize>,
}

impl LoadedSequences {
    /// The input at a 1-based FASTA index, if in range.
    pub fn by_fasta_index(&self, index: usize) -> Option<&SequenceInput> {
        if index == 0 {
            return None;
        }
        self.inputs.get(index - 1)
    }
}

/// Resolves a sequence reference to a concrete path.
///
/// A reference containing a path separator is taken as given. Anything else
/// resolves against the input directory, gaining a `.fasta` suffix when it has
/// no extension of its own.
pub fn resolve_sequence_path(reference: &str, input_dir: &Path) -> PathBuf {
    if reference.contains(std::path::MAIN_SEPARATOR) {
        return PathBuf::from(reference);
    }
    if Path::new(reference).extension().is_some() {
        input_dir.join(reference)
    } else {
        input_dir.join(format!("{reference}.{SEQUENCE_SUFFIX}"))
    }
}

/// Loads every referenced sequence file, in order.
///
/// Content is normalized and classified by [`SequenceInput::new`]; a file
/// whose normalized content is empty is a fatal error naming that file.
pub fn load_sequences(references: &[String], input_dir: &Path) -> Result<LoadedSequences> {
    let mut inputs = Vec::with_capacity(references.len());
    for reference in references {
        let path = resolve_sequence_path(reference, input_dir);
        debug!("Loading sequence '{}' from {:?}", reference, path);
        let residues = fasta::read_residues_path(&path).map_err(|source| CompileError::Read {
            path: path.clone(),
            source,
        })?;
        if residues.is_empty() {
            return Err(CompileError::EmptySequence { path });
        }
        inputs.push(SequenceInput::new(reference.clone(), path, residues));
    }

    let mut name_order = Vec::new();
    let mut name_counts: HashMap<String, usize> = HashMap::new();
    for input in &inputs {
        let count = name_counts.entry(input.clean_name.clone()).or_insert(0);
        if *count == 0 {
            name_order.push(input.clean_name.clone());
        }
        *count += 1;
    }

    Ok(LoadedSequences {
        inputs,
        name_order,
        name_counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::sequence::MoleculeType;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn bare_names_resolve_against_the_input_dir_with_suffix() {
        let dir = Path::new("/inputs");
        assert_eq!(
            resolve_sequence_path("hH3", dir),
            PathBuf::from("/inputs/hH3.fasta")
        );
        assert_eq!(
            resolve_sequence_path("hH3.fasta", dir),
            PathBuf::from("/inputs/hH3.fasta")
        );
    }

    #[test]
    fn explicit_paths_are_used_as_given() {
        let dir = Path::new("/inputs");
        assert_eq!(
            resolve_sequence_path("/data/hH3.fasta", dir),
            PathBuf::from("/data/hH3.fasta")
        );
        assert_eq!(
            resolve_sequence_path("sub/hH3", dir),
            PathBuf::from("sub/hH3")
        );
    }

    #[test]
    fn loading_normalizes_classifies_and_cleans_names() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("hH3.fasta"), ">histone\nmk ak\n").unwrap();
        fs::write(dir.path().join("probe.fasta"), "GATT\nACA\n").unwrap();

        let loaded =
            load_sequences(&["hH3".to_string(), "probe".to_string()], dir.path()).unwrap();
        assert_eq!(loaded.inputs.len(), 2);
        assert_eq!(loaded.inputs[0].clean_name, "H3");
        assert_eq!(loaded.inputs[0].residues, "MKAK");
        assert_eq!(loaded.inputs[0].molecule_type, MoleculeType::Protein);
        assert_eq!(loaded.inputs[1].clean_name, "probe");
        assert_eq!(loaded.inputs[1].molecule_type, MoleculeType::Dna);
    }

    #[test]
    fn name_order_and_counts_follow_first_appearance() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("hX.fasta"), "MK\n").unwrap();
        fs::write(dir.path().join("Y.fasta"), "MA\n").unwrap();

        let refs = vec!["hX".to_string(), "hX".to_string(), "Y".to_string()];
        let loaded = load_sequences(&refs, dir.path()).unwrap();
        assert_eq!(loaded.name_order, vec!["X".to_string(), "Y".to_string()]);
        assert_eq!(loaded.name_counts["X"], 2);
        assert_eq!(loaded.name_counts["Y"], 1);
    }

    #[test]
    fn empty_sequence_file_is_fatal_and_names_the_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("empty.fasta"), ">only a header\n").unwrap();

        let err = load_sequences(&["empty".to_string()], dir.path()).unwrap_err();
        match err {
            CompileError::EmptySequence { path } => {
                assert!(path.ends_with("empty.fasta"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_a_read_error_with_the_path() {
        let dir = tempdir().unwrap();
        let err = load_sequences(&["absent".to_string()], dir.path()).unwrap_err();
        assert!(matches!(err, CompileError::Read { .. }));
    }

    #[test]
    fn by_fasta_index_is_one_based() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("s.fasta"), "MK\n").unwrap();
        let loaded = load_sequences(&["s".to_string()], dir.path()).unwrap();
        assert!(loaded.by_fasta_index(0).is_none());
        assert!(loaded.by_fasta_index(1).is_some());
        assert!(loaded.by_fasta_index(2).is_none());
    }
}
