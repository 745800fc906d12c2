/// Payload of one ligand chain instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LigandPayload {
    /// A literal chemical-component code (e.g. `SAH`).
    Component(String),
    /// A sanitized freeform small-molecule string loaded from a file.
    Freeform(String),
}

/// One instantiated ligand chain, expanded per stoichiometric unit.
///
/// `label` is the identity used for name rendering: the component code, or the
/// file stem for freeform entries. Chain identifiers are assigned later, at
/// materialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLigand {
    pub label: String,
    pub payload: LigandPayload,
}

impl ResolvedLigand {
    pub fn component(code: &str) -> Self {
        Self {
            label: code.to_string(),
            payload: LigandPayload::Component(code.to_string()),
        }
    }

    pub fn freeform(stem: &str, content: String) -> Self {
        Self {
            label: stem.to_string(),
            payload: LigandPayload::Freeform(content),
        }
    }
}
