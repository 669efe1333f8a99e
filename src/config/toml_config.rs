use crate::core::table::ExtractionTable;
use crate::domain::model::ExtractionEntry;
use crate::utils::error::{Result, SplitError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extraction table file. `[[services]]` replaces the built-in table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub project: Option<ProjectConfig>,
    pub paths: Option<PathsConfig>,
    pub services: Vec<ExtractionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub input: Option<String>,
    pub output_dir: Option<String>,
}

impl TableConfig {
    /// Loads and parses a table file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| SplitError::ConfigError {
            message: format!(
                "Cannot read extraction table {}: {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SplitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// `${VAR}` is replaced from the environment; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SplitError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().and_then(|p| p.name.as_deref())
    }

    pub fn input_path(&self) -> Option<&str> {
        self.paths.as_ref().and_then(|p| p.input.as_deref())
    }

    pub fn output_dir(&self) -> Option<&str> {
        self.paths.as_ref().and_then(|p| p.output_dir.as_deref())
    }

    pub fn extraction_table(&self) -> Result<ExtractionTable> {
        ExtractionTable::from_entries(self.services.clone())
    }
}

impl Validate for TableConfig {
    fn validate(&self) -> Result<()> {
        if let Some(name) = self.project_name() {
            crate::utils::validation::validate_non_empty_string("project.name", name)?;
        }
        if let Some(input) = self.input_path() {
            crate::utils::validation::validate_path("paths.input", input)?;
        }
        if let Some(output_dir) = self.output_dir() {
            crate::utils::validation::validate_path("paths.output_dir", output_dir)?;
        }
        self.extraction_table().map(|_| ())
    }
}
