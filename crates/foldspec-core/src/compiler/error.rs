use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Failed to read '{path}': {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Sequence file '{path}' contains no residues", path = path.display())]
    EmptySequence { path: PathBuf },

    #[error("Small-molecule file '{path}' is empty", path = path.display())]
    EmptyFreeform { path: PathBuf },

    #[error("Malformed PTM directive '{directive}': expected {expected}")]
    MalformedDirective {
        directive: String,
        expected: &'static str,
    },

    #[error("Unknown PTM type '{key}' (known types: {known})")]
    UnknownPtmType { key: String, known: String },

    #[error("FASTA index {index} is out of range (have {count} sequence input(s))")]
    FastaIndexOutOfRange { index: usize, count: usize },

    #[error("PTM target '{name}' (FASTA index {index}) is not a protein")]
    PtmTargetNotProtein { index: usize, name: String },

    #[error("PTM position {position} is out of range for '{name}' (length {length})")]
    PtmPositionOutOfRange {
        position: usize,
        name: String,
        length: usize,
    },

    #[error("No protein input available for an all-lysine PTM directive")]
    NoProteinTarget,

    #[error("Empty item in ligand list '{list}'")]
    EmptyLigandItem { list: String },

    #[error("Invalid ligand count in '{item}': expected a positive integer after the last ':'")]
    InvalidLigandCount { item: String },

    #[error("Job needs {required} chains, but only {available} single-letter identifiers exist")]
    ChainCapacityExceeded { required: usize, available: usize },

    #[error("Failed to write job document '{path}': {source}", path = path.display())]
    WriteDocument {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Ledger I/O failed at '{path}': {source}", path = path.display())]
    Ledger {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize job document: {0}")]
    Serialize(#[from] serde_json::Error),
}
