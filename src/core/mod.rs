pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{Record, ReportArtifact};
pub use crate::domain::ports::{ConfigProvider, DatasetSource, ExtractedData, Pipeline, Storage};
pub use crate::utils::error::Result;
