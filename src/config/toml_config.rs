use crate::core::{ConfigProvider, DatasetSource};
use crate::domain::model::ReportKind;
use crate::report::pdf::{Branding, DEFAULT_PREPARED_BY};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{self, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("Invalid regex"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub report: ReportConfig,
    pub datasets: Vec<DatasetConfig>,
    pub output: OutputConfig,
    pub branding: Option<Branding>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub kind: ReportKind,
    pub title: Option<String>,
    pub file_name: Option<String>,
    pub prepared_by: Option<String>,
    pub use_lookups: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub name: String,
    pub resource: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// Reads and parses a TOML file, substituting `${VAR}` references first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// `${VAR}` becomes the variable's value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn branding(&self) -> Branding {
        self.branding.clone().unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.api.base_url
    }

    fn api_token(&self) -> Option<&str> {
        self.api.token.as_deref().filter(|t| !t.starts_with("${"))
    }

    fn timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds.unwrap_or(30)
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn report_kind(&self) -> ReportKind {
        self.report.kind
    }

    fn datasets(&self) -> Vec<DatasetSource> {
        self.datasets
            .iter()
            .map(|d| DatasetSource {
                name: d.name.clone(),
                resource: d.resource.clone(),
            })
            .collect()
    }

    fn title(&self) -> &str {
        self.report.title.as_deref().unwrap_or("Report")
    }

    fn file_name(&self) -> &str {
        self.report.file_name.as_deref().unwrap_or("Report")
    }

    fn prepared_by(&self) -> &str {
        self.report.prepared_by.as_deref().unwrap_or(DEFAULT_PREPARED_BY)
    }

    fn use_lookups(&self) -> bool {
        self.report.use_lookups.unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_range("api.timeout_seconds", self.timeout_seconds(), 1, 600)?;
        validation::validate_non_empty_string("report.file_name", self.file_name())?;
        for (i, dataset) in self.datasets.iter().enumerate() {
            validation::validate_non_empty_string(&format!("datasets[{}].name", i), &dataset.name)?;
            validation::validate_non_empty_string(
                &format!("datasets[{}].resource", i),
                &dataset.resource,
            )?;
        }
        validation::validate_dataset_count(
            "datasets",
            self.datasets.len(),
            self.report.kind.is_single_dataset(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EXECUTIVE_TOML: &str = r#"
[api]
base_url = "https://backoffice.example.com/api"
timeout_seconds = 10

[report]
kind = "executive-pdf"
prepared_by = "Finance Desk"

[[datasets]]
name = "Sales"
resource = "sales"

[[datasets]]
name = "Payments"
resource = "payments"

[output]
path = "./reports"

[branding]
company_name = "LAKE VICTORIA FISH EXPORTS"
"#;

    #[test]
    fn test_parse_executive_config() {
        let config = TomlConfig::from_toml_str(EXECUTIVE_TOML).unwrap();

        assert_eq!(config.report_kind(), ReportKind::ExecutivePdf);
        assert_eq!(config.timeout_seconds(), 10);
        assert_eq!(config.prepared_by(), "Finance Desk");
        assert_eq!(config.datasets().len(), 2);
        assert_eq!(config.branding().company_name, "LAKE VICTORIA FISH EXPORTS");
        assert_eq!(config.branding().tagline, "");
        assert!(config.use_lookups());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SEAFOOD_REPORTS_TEST_URL", "https://env.example.com/api");

        let toml_content = r#"
[api]
base_url = "${SEAFOOD_REPORTS_TEST_URL}"
token = "${SEAFOOD_REPORTS_UNSET_TOKEN}"

[report]
kind = "individual-xlsx"

[[datasets]]
name = "Shipments"
resource = "shipments"

[output]
path = "./reports"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "https://env.example.com/api");
        assert_eq!(config.api_token(), None);

        std::env::remove_var("SEAFOOD_REPORTS_TEST_URL");
    }

    #[test]
    fn test_single_dataset_kind_validation() {
        let toml_content = EXECUTIVE_TOML.replace("executive-pdf", "professional-pdf");
        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let toml_content = EXECUTIVE_TOML.replace("executive-pdf", "word-doc");
        assert!(matches!(
            TomlConfig::from_toml_str(&toml_content),
            Err(ReportError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(EXECUTIVE_TOML.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://backoffice.example.com/api");
    }
}
