use std::path::{Path, PathBuf};

pub struct DefaultsConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("jobs"),
        }
    }
}

impl DefaultsConfig {
    /// The ledger lives beside the jobs it indexes unless overridden.
    pub fn ledger_path(output_dir: &Path) -> PathBuf {
        output_dir.join("job_names.txt")
    }
}
