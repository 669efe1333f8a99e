use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::PathBuf;

/// One row of the extraction table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionEntry {
    #[serde(rename = "name")]
    pub service: String,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExtractionEntry {
    pub fn new(service: &str, filename: &str, description: &str) -> Self {
        Self {
            service: service.to_string(),
            filename: filename.to_string(),
            description: Some(description.to_string()),
        }
    }

    /// Header text for the output file; falls back to the service name.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.service)
    }
}

/// A table entry matched in the source document, payload untouched.
#[derive(Debug, Clone)]
pub struct ExtractedService {
    pub entry: ExtractionEntry,
    pub config: Value,
}

#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub services: Vec<ExtractedService>,
    pub missing: Vec<ExtractionEntry>,
}

/// A rendered output file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFile {
    pub service: String,
    pub filename: String,
    pub contents: String,
}

#[derive(Debug, Clone, Default)]
pub struct SplitReport {
    pub output_dir: PathBuf,
    pub created: Vec<String>,
    pub missing: Vec<String>,
}
