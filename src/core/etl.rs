use crate::core::{Pipeline, ServiceFile, SplitReport};
use crate::utils::error::Result;

pub const CLOSING_MESSAGE: &str = "\nAll services have been split into individual files!\n\
You can now use: docker compose up -d\n\
Or for specific services: docker compose up -d plex overseerr";

pub struct SplitEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SplitEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Extract and transform only. Nothing is written.
    pub fn plan(&self) -> Result<Vec<ServiceFile>> {
        let extraction = self.pipeline.extract()?;
        self.pipeline.transform(&extraction)
    }

    pub fn run(&self) -> Result<SplitReport> {
        tracing::info!("🚀 Starting compose split");

        // Extract
        let extraction = self.pipeline.extract()?;
        tracing::info!(
            "Matched {} services, {} not present",
            extraction.services.len(),
            extraction.missing.len()
        );

        // Transform
        let files = self.pipeline.transform(&extraction)?;

        // Load, one file at a time. A failure leaves earlier files in place.
        self.pipeline.prepare_output()?;
        let mut created = Vec::with_capacity(files.len());
        for file in &files {
            self.pipeline.load(file)?;
            println!("Created: {}", file.filename);
            created.push(file.filename.clone());
        }

        println!("{}", CLOSING_MESSAGE);

        let output_dir = self.pipeline.output_dir().to_path_buf();
        tracing::info!(
            "✅ Wrote {} files to {}",
            created.len(),
            output_dir.display()
        );

        Ok(SplitReport {
            output_dir,
            created,
            missing: extraction
                .missing
                .into_iter()
                .map(|entry| entry.service)
                .collect(),
        })
    }
}
