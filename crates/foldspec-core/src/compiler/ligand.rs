use crate::compiler::error::{CompileError, Result};
use crate::compiler::naming::stoichiometric;
use crate::core::io::smiles;
use crate::core::models::ligand::ResolvedLigand;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reserved suffix marking a ligand code as a freeform small-molecule file.
pub const FREEFORM_SUFFIX: &str = ".smiles";

/// A ligand code, classified up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LigandCode {
    /// A literal chemical-component code.
    Component(String),
    /// A freeform small-molecule file; `stem` is its caching identity.
    Freeform { stem: String, path: PathBuf },
}

/// One parsed item of the comma-separated ligand list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LigandItem {
    pub code: LigandCode,
    pub count: usize,
}

/// Parses a comma-separated ligand list (`code[:count]` items).
///
/// The count splits on the last `:` and must be a positive integer with no
/// leading zero. Freeform file references without a path separator resolve
/// against the input directory.
pub fn parse_ligand_list(list: &str, input_dir: &Path) -> Result<Vec<LigandItem>> {
    let mut items = Vec::new();
    for raw in list.split(',') {
        if raw.is_empty() {
            return Err(CompileError::EmptyLigandItem {
                list: list.to_string(),
            });
        }
        let (code, count) = match raw.rsplit_once(':') {
            Some((code, count_str)) => {
                let count = if code.is_empty() || !is_valid_count(count_str) {
                    None
                } else {
                    count_str.parse::<usize>().ok()
                };
                match count {
                    Some(count) => (code, count),
                    None => {
                        return Err(CompileError::InvalidLigandCount {
                            item: raw.to_string(),
                        });
                    }
                }
            }
            None => (raw, 1),
        };
        items.push(LigandItem {
            code: classify_code(code, input_dir),
            count,
        });
    }
    Ok(items)
}

fn is_valid_count(count: &str) -> bool {
    let mut bytes = count.bytes();
    matches!(bytes.next(), Some(b'1'..=b'9')) && bytes.all(|b| b.is_ascii_digit())
}

fn classify_code(code: &str, input_dir: &Path) -> LigandCode {
    if !code.ends_with(FREEFORM_SUFFIX) {
        return LigandCode::Component(code.to_string());
    }
    let path = if code.contains(std::path::MAIN_SEPARATOR) {
        PathBuf::from(code)
    } else {
        input_dir.join(code)
    };
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| code.to_string());
    LigandCode::Freeform { stem, path }
}

/// The resolved ligand set of one invocation, shared across all job variants.
#[derive(Debug, Clone, Default)]
pub struct LigandResolution {
    /// One entry per instantiated chain, in directive order.
    pub entries: Vec<ResolvedLigand>,
    /// Naming segment (`2xSAH-GTP`), empty when there are no ligands.
    pub name_segment: String,
}

/// Expands ligand directives into per-unit chain entries.
///
/// Freeform files are read once per unique stem; repeated references reuse the
/// cached sanitized string.
pub fn resolve_ligands(list: Option<&str>, input_dir: &Path) -> Result<LigandResolution> {
    let list = match list {
        Some(list) if !list.is_empty() => list,
        _ => return Ok(LigandResolution::default()),
    };

    let items = parse_ligand_list(list, input_dir)?;
    let mut freeform_cache: HashMap<String, String> = HashMap::new();
    let mut entries = Vec::new();

    for item in &items {
        let entry = match &item.code {
            LigandCode::Component(code) => ResolvedLigand::component(code),
            LigandCode::Freeform { stem, path } => {
                let content = match freeform_cache.get(stem) {
                    Some(content) => content.clone(),
                    None => {
                        debug!("Loading freeform ligand '{}' from {:?}", stem, path);
                        let content = smiles::read_freeform_path(path).map_err(|source| {
                            CompileError::Read {
                                path: path.clone(),
                                source,
                            }
                        })?;
                        if content.is_empty() {
                            return Err(CompileError::EmptyFreeform { path: path.clone() });
                        }
                        freeform_cache.insert(stem.clone(), content.clone());
                        content
                    }
                };
                ResolvedLigand::freeform(stem, content)
            }
        };
        for _ in 0..item.count {
            entries.push(entry.clone());
        }
    }

    let name_segment = render_name_segment(&entries);
    Ok(LigandResolution {
        entries,
        name_segment,
    })
}

/// First-appearance-ordered unique labels with their total instantiated
/// counts, rendered like molecule stoichiometry and joined by `-`.
fn render_name_segment(entries: &[ResolvedLigand]) -> String {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        let count = counts.entry(entry.label.as_str()).or_insert(0);
        if *count == 0 {
            order.push(entry.label.as_str());
        }
        *count += 1;
    }
    order
        .iter()
        .map(|label| stoichiometric(label, counts[label]))
        .collect::<Vec<_>>()
        .join("-")
}
