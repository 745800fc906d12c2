use std::collections::HashMap;

/// Renders a stoichiometric naming part: `3xFOO` for count 3, `FOO` for 1.
pub fn stoichiometric(label: &str, count: usize) -> String {
    if count > 1 {
        format!("{count}x{label}")
    } else {
        label.to_string()
    }
}

/// Everything the synthesizer needs, borrowed from the shared state computed
/// once per invocation.
#[derive(Debug, Clone, Copy)]
pub struct NameParts<'a> {
    /// Unique clean names in first-appearance order.
    pub name_order: &'a [String],
    /// Occurrence count per clean name.
    pub name_counts: &'a HashMap<String, usize>,
    /// Accumulated PTM suffixes per clean name.
    pub suffixes: &'a HashMap<String, String>,
    /// Pre-rendered ligand naming segment, empty when there are no ligands.
    pub ligand_segment: &'a str,
}

/// Composes a job name from molecule stoichiometry, PTM suffixes, and the
/// ligand segment.
///
/// `override_suffix` substitutes one name's accumulated suffix with a one-off
/// value; this is how each-lysine variants get distinct names without touching
/// shared state. With no override, the result is the name used when no
/// each-lysine directives are present.
pub fn synthesize(parts: &NameParts<'_>, override_suffix: Option<(&str, &str)>) -> String {
    let mut segments: Vec<String> = parts
        .name_order
        .iter()
        .map(|name| {
            let count = parts.name_counts.get(name).copied().unwrap_or(1);
            let suffix = match override_suffix {
                Some((target, suffix)) if target == name => suffix,
                _ => parts.suffixes.get(name).map(String::as_str).unwrap_or(""),
            };
            format!("{}{}", stoichiometric(name, count), suffix)
        })
        .collect();
    if !parts.ligand_segment.is_empty() {
        segments.push(parts.ligand_segment.to_string());
    }
    segments.join("-")
}
