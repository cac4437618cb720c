pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use adapters::{http::ApiClient, storage::LocalStorage};
pub use crate::core::{engine::ReportEngine, pipeline::ReportPipeline};
pub use domain::model::{
    ExecutiveSummary, FlatRow, FlatValue, LookupTable, Record, ReportArtifact, ReportDefinition,
    ReportKind,
};
pub use report::pdf::Branding;
pub use report::{flatten_data, readable_header, ReportExporter};
pub use utils::error::{ReportError, Result};
