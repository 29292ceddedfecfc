use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "steno.toml";
pub const DEFAULT_BASE_URL: &str = "https://data.strazha.bg/sessions";
pub const DEFAULT_BATCH_SIZE: u64 = 5;

/// What the normalizer does when a single input file cannot be converted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Abort the whole run on the first bad file
    #[default]
    FailFast,
    /// Log the bad file, record it in the report and keep going
    BestEffort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub base_url: String,
    pub start_date: NaiveDate,
    /// Inclusive
    pub end_date: NaiveDate,
    pub batch_size: u64,
    pub output_dir: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 9, 30).unwrap_or_default(),
            batch_size: DEFAULT_BATCH_SIZE,
            output_dir: PathBuf::from("data_sep"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Processed in order; a later folder overwrites outputs of an earlier one
    pub input_dirs: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub failure_policy: FailurePolicy,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_dirs: vec![PathBuf::from("data_aug"), PathBuf::from("data_sep")],
            output_dir: PathBuf::from("output"),
            failure_policy: FailurePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    /// Measured in characters
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("output"),
            output_file: PathBuf::from("chunks/chunks.jsonl"),
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub chunk: ChunkConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.fetch.validate()?;
        self.chunk.validate()
    }
}

impl FetchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be at least 1".to_string()));
        }
        if self.end_date < self.start_date {
            return Err(Error::Config(format!(
                "end_date {} is before start_date {}",
                self.end_date, self.start_date
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("base_url must not be empty".to_string()));
        }
        Ok(())
    }
}

impl ChunkConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be at least 1".to_string()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(Error::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}
