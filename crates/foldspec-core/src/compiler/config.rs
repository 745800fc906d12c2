use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Resolved compiler configuration. Paths arrive fully merged from the caller
/// (CLI flags over config file over defaults); the core never guesses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Directory bare sequence and small-molecule file names resolve against.
    pub input_dir: PathBuf,
    /// Root under which each job gets its own directory.
    pub output_root: PathBuf,
    /// The shared job-name ledger.
    pub ledger_path: PathBuf,
    /// When false, the ledger is never touched.
    pub write_ledger: bool,
    /// Re-materialize a job whose document already exists.
    pub overwrite: bool,
    /// Report actions without any filesystem mutation.
    pub dry_run: bool,
}

#[derive(Debug, Default)]
pub struct CompilerConfigBuilder {
    input_dir: Option<PathBuf>,
    output_root: Option<PathBuf>,
    ledger_path: Option<PathBuf>,
    write_ledger: bool,
    overwrite: bool,
    dry_run: bool,
}

impl CompilerConfigBuilder {
    pub fn new() -> Self {
        Self {
            write_ledger: true,
            ..Self::default()
        }
    }

    pub fn input_dir(mut self, path: PathBuf) -> Self {
        self.input_dir = Some(path);
        self
    }

    pub fn output_root(mut self, path: PathBuf) -> Self {
        self.output_root = Some(path);
        self
    }

    pub fn ledger_path(mut self, path: PathBuf) -> Self {
        self.ledger_path = Some(path);
        self
    }

    pub fn write_ledger(mut self, enabled: bool) -> Self {
        self.write_ledger = enabled;
        self
    }

    pub fn overwrite(mut self, enabled: bool) -> Self {
        self.overwrite = enabled;
        self
    }

    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn build(self) -> Result<CompilerConfig, ConfigError> {
        Ok(CompilerConfig {
            input_dir: self
                .input_dir
                .ok_or(ConfigError::MissingParameter("input_dir"))?,
            output_root: self
                .output_root
                .ok_or(ConfigError::MissingParameter("output_root"))?,
            ledger_path: self
                .ledger_path
                .ok_or(ConfigError::MissingParameter("ledger_path"))?,
            write_ledger: self.write_ledger,
            overwrite: self.overwrite,
            dry_run: self.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_all_paths() {
        let result = CompilerConfigBuilder::new()
            .input_dir(PathBuf::from("."))
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingParameter("output_root")
        );
    }

    #[test]
    fn builder_defaults_flags_to_ledger_on_no_overwrite_no_dry_run() {
        let config = CompilerConfigBuilder::new()
            .input_dir(PathBuf::from("in"))
            .output_root(PathBuf::from("out"))
            .ledger_path(PathBuf::from("out/job_names.txt"))
            .build()
            .unwrap();
        assert!(config.write_ledger);
        assert!(!config.overwrite);
        assert!(!config.dry_run);
    }
}
