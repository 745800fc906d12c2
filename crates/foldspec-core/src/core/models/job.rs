use serde::Serialize;

/// Model seeds every job document carries, in this exact order.
pub const MODEL_SEEDS: [u32; 5] = [1, 2, 8, 42, 88];

/// Target schema tag expected by the downstream inference tool.
pub const DIALECT: &str = "alphafold3";

/// Target schema version expected by the downstream inference tool.
pub const VERSION: u32 = 1;

/// One modification entry on a protein chain.
///
/// `ptm_type` is the resolved chemical-component code (e.g. `MLZ`), not the
/// symbolic directive key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modification {
    #[serde(rename = "ptmType")]
    pub ptm_type: String,
    #[serde(rename = "ptmPosition")]
    pub ptm_position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProteinChain {
    pub id: String,
    pub sequence: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifications: Vec<Modification>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NucleicChain {
    pub id: String,
    pub sequence: String,
}

/// A ligand chain instance: exactly one of `ccd_codes` or `smiles` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LigandChain {
    pub id: String,
    #[serde(rename = "ccdCodes", skip_serializing_if = "Option::is_none")]
    pub ccd_codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smiles: Option<String>,
}

impl LigandChain {
    pub fn component(id: String, code: String) -> Self {
        Self {
            id,
            ccd_codes: Some(vec![code]),
            smiles: None,
        }
    }

    pub fn freeform(id: String, smiles: String) -> Self {
        Self {
            id,
            ccd_codes: None,
            smiles: Some(smiles),
        }
    }
}

/// One chain of the job document, rendered as a single-key object tagged with
/// the molecule kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ChainEntry {
    #[serde(rename = "protein")]
    Protein(ProteinChain),
    #[serde(rename = "dna")]
    Dna(NucleicChain),
    #[serde(rename = "rna")]
    Rna(NucleicChain),
    #[serde(rename = "ligand")]
    Ligand(LigandChain),
}

/// The complete job document handed to the downstream inference tool.
///
/// Field order and key names are a compatibility contract; `serde_json`
/// serializes fields in declaration order, so the order here is the order on
/// disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDocument {
    pub name: String,
    #[serde(rename = "modelSeeds")]
    pub model_seeds: Vec<u32>,
    pub sequences: Vec<ChainEntry>,
    pub dialect: &'static str,
    pub version: u32,
}

impl JobDocument {
    pub fn new(name: String, sequences: Vec<ChainEntry>) -> Self {
        Self {
            name,
            model_seeds: MODEL_SEEDS.to_vec(),
            sequences,
            dialect: DIALECT,
            version: VERSION,
        }
    }
}
