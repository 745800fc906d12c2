use std::fmt;
use std::path::PathBuf;

/// The molecule class of a loaded sequence, decided once from its residue content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoleculeType {
    Protein,
    Dna,
    Rna,
}

impl MoleculeType {
    /// Classifies normalized residue content.
    ///
    /// Content drawn only from `{G, A, T, C}` is DNA, only from `{G, A, U, C}` is
    /// RNA, and anything else is a protein. The DNA check runs first, so a sequence
    /// compatible with both alphabets (e.g. `GAC`) classifies as DNA.
    pub fn classify(residues: &str) -> Self {
        if residues.chars().all(|c| matches!(c, 'G' | 'A' | 'T' | 'C')) {
            MoleculeType::Dna
        } else if residues.chars().all(|c| matches!(c, 'G' | 'A' | 'U' | 'C')) {
            MoleculeType::Rna
        } else {
            MoleculeType::Protein
        }
    }

    pub fn is_protein(&self) -> bool {
        matches!(self, MoleculeType::Protein)
    }
}

impl fmt::Display for MoleculeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MoleculeType::Protein => "protein",
                MoleculeType::Dna => "dna",
                MoleculeType::Rna => "rna",
            }
        )
    }
}

/// One loaded sequence input, normalized and classified at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceInput {
    /// The reference as the caller supplied it.
    pub source_name: String,
    /// The path the content was actually read from.
    pub raw_path: PathBuf,
    /// Canonical identity used for grouping and name suffixes.
    pub clean_name: String,
    /// Uppercase residue letters, no whitespace. Never empty.
    pub residues: String,
    pub molecule_type: MoleculeType,
}

impl SequenceInput {
    /// Builds an input from normalized residues. The caller guarantees `residues`
    /// is non-empty; classification happens here and is never re-derived.
    pub fn new(source_name: String, raw_path: PathBuf, residues: String) -> Self {
        let stem = raw_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| source_name.clone());
        let molecule_type = MoleculeType::classify(&residues);
        Self {
            source_name,
            raw_path,
            clean_name: clean_name(&stem),
            residues,
            molecule_type,
        }
    }

    /// 1-based positions of every lysine in the sequence, left to right.
    pub fn lysine_positions(&self) -> Vec<usize> {
        self.residues
            .chars()
            .enumerate()
            .filter(|(_, c)| *c == 'K')
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// The residue letter at a 1-based position, if in range.
    pub fn residue_at(&self, position: usize) -> Option<char> {
        if position == 0 {
            return None;
        }
        self.residues.chars().nth(position - 1)
    }
}

/// Strips the historical single leading lowercase `h` from a file stem.
///
/// Human-orthologue sequence files are conventionally named `h<NAME>.fasta`;
/// the canonical identity drops that marker. A lone `h` is kept as-is.
fn clean_name(stem: &str) -> String {
    match stem.strip_prefix('h') {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => stem.to_string(),
    }
}
