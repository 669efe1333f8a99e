use crate::core::table::ExtractionTable;
use crate::domain::model::{Extraction, ServiceFile};
use crate::utils::error::Result;
use std::path::Path;

pub trait Storage: Send + Sync {
    /// Creates the storage root if needed. Calling it twice is fine.
    fn prepare(&self) -> Result<()>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    fn root(&self) -> &Path;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &Path;
    fn project_name(&self) -> &str;
    fn extraction_table(&self) -> &ExtractionTable;
    fn warn_missing(&self) -> bool;
}

pub trait Pipeline: Send + Sync {
    fn extract(&self) -> Result<Extraction>;
    fn transform(&self, extraction: &Extraction) -> Result<Vec<ServiceFile>>;
    fn prepare_output(&self) -> Result<()>;
    fn load(&self, file: &ServiceFile) -> Result<()>;
    /// Where `load` writes; the storage root.
    fn output_dir(&self) -> &Path;
}
