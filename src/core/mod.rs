pub mod document;
pub mod etl;
pub mod table;

pub use crate::domain::model::{Extraction, ExtractedService, ServiceFile, SplitReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
