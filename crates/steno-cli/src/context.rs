use crate::types::OutputFormat;
use anyhow::Result;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use steno_runtime::Config;

pub struct ExecutionContext {
    config_path: PathBuf,
    config: OnceCell<Config>,
    pub format: OutputFormat,
}

impl ExecutionContext {
    pub fn new(config_path: PathBuf, format: OutputFormat) -> Self {
        Self {
            config_path,
            config: OnceCell::new(),
            format,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Configuration file contents, or defaults when the file does not exist
    pub fn config(&self) -> Result<&Config> {
        self.config
            .get_or_try_init(|| Config::load_from(&self.config_path).map_err(anyhow::Error::from))
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
