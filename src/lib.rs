pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, SplitSettings};

pub use app::pipelines::split_pipeline::ComposeSplitPipeline;
pub use core::{etl::SplitEngine, table::ExtractionTable};
pub use utils::error::{Result, SplitError};
