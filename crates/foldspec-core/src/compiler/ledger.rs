use crate::compiler::error::{CompileError, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info};

/// Marker token the ledger header line must contain.
pub const LEDGER_HEADER: &str = "job_name";

/// Appends a job name to the ledger, creating or migrating the file as needed.
///
/// The ledger is newline-terminated text whose first line is a header carrying
/// the [`LEDGER_HEADER`] token. A missing or empty file is created with the
/// canonical header; a legacy file without the header gets it prepended. An
/// exact full-line duplicate of `name` is never appended, so re-running the
/// same job creation is a no-op here. Downstream consumers read this file as
/// their job-discovery source.
pub fn append(path: &Path, name: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ledger_error(path, source))?;
        }
    }

    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(source) => return Err(ledger_error(path, source)),
    };

    if existing.is_empty() {
        fs::write(path, format!("{LEDGER_HEADER}\n{name}\n"))
            .map_err(|source| ledger_error(path, source))?;
        debug!("Created ledger at {:?} with job '{}'", path, name);
        return Ok(());
    }

    let mut content = existing;
    let has_header = content
        .lines()
        .next()
        .is_some_and(|line| line.contains(LEDGER_HEADER));
    if !has_header {
        info!("Ledger at {:?} has no header line; migrating in place", path);
        content = format!("{LEDGER_HEADER}\n{content}");
        if !content.ends_with('\n') {
            content.push('\n');
        }
        fs::write(path, &content).map_err(|source| ledger_error(path, source))?;
    }

    if content.lines().any(|line| line == name) {
        debug!("Job '{}' already present in ledger; not appending", name);
        return Ok(());
    }

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|source| ledger_error(path, source))?;
    let mut record = String::new();
    if !content.ends_with('\n') {
        record.push('\n');
    }
    record.push_str(name);
    record.push('\n');
    file.write_all(record.as_bytes())
        .map_err(|source| ledger_error(path, source))?;
    Ok(())
}

fn ledger_error(path: &Path, source: io::Error) -> CompileError {
    CompileError::Ledger {
        path: path.to_path_buf(),
        source,
    }
}
