use crate::core::document::{OutputDocument, SourceDocument};
use crate::core::{ConfigProvider, ExtractedService, Extraction, Pipeline, ServiceFile, Storage};
use crate::utils::error::Result;
use std::path::Path;

/// Splits a compose file into one file per table entry.
pub struct ComposeSplitPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> ComposeSplitPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// Walks the table against an already parsed document.
    pub fn extract_from(&self, source: &SourceDocument) -> Result<Extraction> {
        let mut extraction = Extraction::default();

        for entry in self.config.extraction_table().entries() {
            match source.service(&entry.service)? {
                Some(config) => {
                    tracing::debug!("Found service '{}'", entry.service);
                    extraction.services.push(ExtractedService {
                        entry: entry.clone(),
                        config: config.clone(),
                    });
                }
                None => {
                    if self.config.warn_missing() {
                        tracing::warn!(
                            "⚠️ Service '{}' not found in {}, skipping {}",
                            entry.service,
                            source.path().display(),
                            entry.filename
                        );
                    } else {
                        tracing::debug!("Service '{}' not found, skipping", entry.service);
                    }
                    extraction.missing.push(entry.clone());
                }
            }
        }

        Ok(extraction)
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for ComposeSplitPipeline<S, C> {
    fn extract(&self) -> Result<Extraction> {
        let input = self.config.input_path();
        tracing::debug!("Reading compose file: {}", input.display());

        let source = SourceDocument::from_file(input)?;
        self.extract_from(&source)
    }

    fn transform(&self, extraction: &Extraction) -> Result<Vec<ServiceFile>> {
        extraction
            .services
            .iter()
            .map(|service| {
                let document = OutputDocument::new(
                    self.config.project_name(),
                    &service.entry.service,
                    service.config.clone(),
                );
                Ok(ServiceFile {
                    service: service.entry.service.clone(),
                    filename: service.entry.filename.clone(),
                    contents: document.render(service.entry.description())?,
                })
            })
            .collect()
    }

    fn prepare_output(&self) -> Result<()> {
        tracing::debug!("Preparing output directory: {}", self.storage.root().display());
        self.storage.prepare()
    }

    fn load(&self, file: &ServiceFile) -> Result<()> {
        tracing::debug!(
            "Writing {} ({} bytes) for service '{}'",
            file.filename,
            file.contents.len(),
            file.service
        );
        self.storage
            .write_file(&file.filename, file.contents.as_bytes())
    }

    fn output_dir(&self) -> &Path {
        self.storage.root()
    }
}
