pub mod cli;
pub mod toml_config;

use crate::core::table::{
    ExtractionTable, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR, DEFAULT_PROJECT_NAME,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use std::path::{Path, PathBuf};
use toml_config::TableConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "compose-split")]
#[command(about = "Split a monolithic docker-compose file into one file per service")]
pub struct CliConfig {
    /// Monolithic compose file to read
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory receiving one file per service
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// TOML file replacing the built-in extraction table
    #[arg(short, long)]
    pub table: Option<PathBuf>,

    /// Value of the top-level `name:` field
    #[arg(long)]
    pub project_name: Option<String>,

    /// Warn about table entries missing from the compose file
    #[arg(long)]
    pub warn_missing: bool,

    /// Show what would be written without touching the output directory
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Flags win over the table file, which wins over built-in defaults.
    pub fn resolve(&self) -> Result<SplitSettings> {
        let table_config = match &self.table {
            Some(path) => {
                tracing::info!("📁 Loading extraction table from: {}", path.display());
                Some(TableConfig::from_file(path)?)
            }
            None => None,
        };

        let mut settings = match &table_config {
            Some(config) => SplitSettings::from_table_config(config)?,
            None => SplitSettings::default(),
        };

        if let Some(input) = &self.input {
            settings.input_path = input.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            settings.output_dir = output_dir.clone();
        }
        if let Some(name) = &self.project_name {
            settings.project_name = name.clone();
        }
        settings.warn_missing = self.warn_missing;

        settings.validate()?;
        Ok(settings)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct SplitSettings {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub project_name: String,
    pub table: ExtractionTable,
    pub warn_missing: bool,
}

impl SplitSettings {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input_path: P, output_dir: Q) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_table(mut self, table: ExtractionTable) -> Self {
        self.table = table;
        self
    }

    pub fn from_table_config(config: &TableConfig) -> Result<Self> {
        config.validate()?;

        let mut settings = Self::default().with_table(config.extraction_table()?);
        if let Some(input) = config.input_path() {
            settings.input_path = PathBuf::from(input);
        }
        if let Some(output_dir) = config.output_dir() {
            settings.output_dir = PathBuf::from(output_dir);
        }
        if let Some(name) = config.project_name() {
            settings.project_name = name.to_string();
        }
        Ok(settings)
    }
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            table: ExtractionTable::mediacenter(),
            warn_missing: false,
        }
    }
}

impl Validate for SplitSettings {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path.to_string_lossy())?;
        validate_path("output_dir", &self.output_dir.to_string_lossy())?;
        validate_non_empty_string("project_name", &self.project_name)?;
        self.table.validate()
    }
}

impl ConfigProvider for SplitSettings {
    fn input_path(&self) -> &Path {
        &self.input_path
    }

    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn extraction_table(&self) -> &ExtractionTable {
        &self.table
    }

    fn warn_missing(&self) -> bool {
        self.warn_missing
    }
}
