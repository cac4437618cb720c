pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, DatasetSource};
#[cfg(feature = "cli")]
use crate::domain::model::ReportKind;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

/// `NAME=resource`, e.g. `Sales=sales`. A bare resource reports under its own name.
pub fn parse_dataset(value: &str) -> std::result::Result<crate::core::DatasetSource, String> {
    let (name, resource) = match value.split_once('=') {
        Some((name, resource)) => (name.trim(), resource.trim()),
        None => (value.trim(), value.trim()),
    };
    if name.is_empty() || resource.is_empty() {
        return Err(format!("invalid dataset '{}', expected NAME=resource", value));
    }
    Ok(crate::core::DatasetSource {
        name: name.to_string(),
        resource: resource.to_string(),
    })
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "seafood-reports")]
#[command(about = "Export back-office datasets as spreadsheet or PDF reports")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:8000/api")]
    pub api_base_url: String,

    #[arg(long, env = "SEAFOOD_API_TOKEN")]
    pub token: Option<String>,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "./reports")]
    pub output_path: String,

    #[arg(long, value_enum, default_value = "individual-xlsx")]
    pub kind: ReportKind,

    /// Dataset as NAME=resource; repeat for executive reports
    #[arg(long = "dataset", value_parser = parse_dataset)]
    pub datasets: Vec<DatasetSource>,

    #[arg(long, default_value = "Report")]
    pub title: String,

    #[arg(long, default_value = "Report")]
    pub file_name: String,

    #[arg(long, default_value = "System Administrator")]
    pub prepared_by: String,

    #[arg(long, help = "Do not resolve currency and shipment ids in PDFs")]
    pub no_lookups: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn api_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn report_kind(&self) -> ReportKind {
        self.kind
    }

    fn datasets(&self) -> Vec<DatasetSource> {
        self.datasets.clone()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn prepared_by(&self) -> &str {
        &self.prepared_by
    }

    fn use_lookups(&self) -> bool {
        !self.no_lookups
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base_url", &self.api_base_url)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 600)?;
        validation::validate_non_empty_string("file_name", &self.file_name)?;
        validation::validate_dataset_count(
            "dataset",
            self.datasets.len(),
            self.kind.is_single_dataset(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dataset() {
        let source = parse_dataset("Sales=sales").unwrap();
        assert_eq!(source.name, "Sales");
        assert_eq!(source.resource, "sales");

        let bare = parse_dataset("shipments").unwrap();
        assert_eq!(bare.name, "shipments");
        assert_eq!(bare.resource, "shipments");

        assert!(parse_dataset("Sales=").is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_arguments() {
        let config = CliConfig::try_parse_from([
            "seafood-reports",
            "--kind",
            "executive-pdf",
            "--dataset",
            "Sales=sales",
            "--dataset",
            "Payments=payments",
            "--prepared-by",
            "Finance Desk",
        ])
        .unwrap();

        assert_eq!(config.report_kind(), ReportKind::ExecutivePdf);
        assert_eq!(config.datasets().len(), 2);
        assert_eq!(config.prepared_by(), "Finance Desk");
        assert!(config.use_lookups());
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_single_dataset_kind_rejects_many() {
        let config = CliConfig::try_parse_from([
            "seafood-reports",
            "--kind",
            "professional-pdf",
            "--dataset",
            "Sales=sales",
            "--dataset",
            "Payments=payments",
        ])
        .unwrap();
        assert!(config.validate().is_err());
    }
}
