use crate::adapters::http::ApiClient;
use crate::core::{ConfigProvider, ExtractedData, Pipeline, Storage};
use crate::domain::model::{ReportArtifact, ReportDefinition, ReportKind};
use crate::report::exporter::{self, ReportExporter};
use crate::report::pdf::Branding;
use crate::utils::error::{ReportError, Result};
use chrono::Local;

/// Fetches the configured datasets, renders the configured report kind and
/// saves it.
pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    exporter: ReportExporter<S>,
    config: C,
    client: ApiClient,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let client = ApiClient::new(config.api_base_url())
            .with_token(config.api_token().map(str::to_string))
            .with_timeout(config.timeout_seconds());
        Self {
            exporter: ReportExporter::new(storage),
            config,
            client,
        }
    }

    pub fn with_branding(mut self, branding: Branding) -> Self {
        self.exporter = self.exporter.with_branding(branding);
        self
    }

    fn single_dataset(reports: &[ReportDefinition]) -> Result<&ReportDefinition> {
        match reports {
            [only] => Ok(only),
            _ => Err(ReportError::ProcessingError {
                message: format!("Expected exactly one dataset, got {}", reports.len()),
            }),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<ExtractedData> {
        let mut reports = Vec::new();
        for source in self.config.datasets() {
            tracing::debug!("Fetching dataset '{}' from '{}'", source.name, source.resource);
            let data = self.client.fetch_records(&source.resource).await?;
            reports.push(ReportDefinition::new(source.name, data));
        }

        let kind = self.config.report_kind();
        let lookups = if kind.uses_lookups() && self.config.use_lookups() {
            let lookups = self.client.fetch_lookups().await?;
            tracing::debug!(
                "Loaded {} currency and {} shipment lookups",
                lookups.currencies.len(),
                lookups.shipments.len()
            );
            Some(lookups)
        } else {
            None
        };

        Ok(ExtractedData { reports, lookups })
    }

    async fn transform(&self, data: ExtractedData) -> Result<ReportArtifact> {
        let now = Local::now().naive_local();
        let lookups = data.lookups.as_ref();
        let prepared_by = Some(self.config.prepared_by()).filter(|p| !p.is_empty());

        match self.config.report_kind() {
            ReportKind::IndividualXlsx => {
                let report = Self::single_dataset(&data.reports)?;
                exporter::individual_report(
                    &report.data,
                    &report.sheet_name,
                    self.config.file_name(),
                    &now,
                )
            }
            ReportKind::ProfessionalPdf => {
                let report = Self::single_dataset(&data.reports)?;
                exporter::professional_pdf(
                    &report.data,
                    self.config.title(),
                    self.config.file_name(),
                    prepared_by,
                    lookups,
                    self.exporter.branding(),
                    &now,
                )
            }
            ReportKind::ExecutiveXlsx => exporter::executive_report(&data.reports, &now),
            ReportKind::ExecutivePdf => exporter::executive_pdf(
                &data.reports,
                prepared_by,
                lookups,
                self.exporter.branding(),
                &now,
            ),
        }
    }

    async fn load(&self, artifact: ReportArtifact) -> Result<String> {
        self.exporter.save(&artifact).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DatasetSource;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStorage {
        files: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl Storage for MemoryStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().unwrap();
            Ok(files
                .iter()
                .find(|(name, _)| name == path)
                .map(|(_, data)| data.clone())
                .unwrap_or_default())
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .unwrap()
                .push((path.to_string(), data.to_vec()));
            Ok(())
        }

        fn location_of(&self, path: &str) -> String {
            format!("memory://{}", path)
        }
    }

    struct TestConfig {
        kind: ReportKind,
    }

    impl ConfigProvider for TestConfig {
        fn api_base_url(&self) -> &str {
            "http://localhost:8000/api"
        }
        fn api_token(&self) -> Option<&str> {
            None
        }
        fn timeout_seconds(&self) -> u64 {
            5
        }
        fn output_path(&self) -> &str {
            "./reports"
        }
        fn report_kind(&self) -> ReportKind {
            self.kind
        }
        fn datasets(&self) -> Vec<DatasetSource> {
            Vec::new()
        }
        fn title(&self) -> &str {
            "Sales"
        }
        fn file_name(&self) -> &str {
            "Sales_Report"
        }
        fn prepared_by(&self) -> &str {
            ""
        }
        fn use_lookups(&self) -> bool {
            false
        }
    }

    fn sales() -> ReportDefinition {
        let data = vec![json!({"total_sale_amount": 120})]
            .into_iter()
            .filter_map(|v| v.as_object().cloned())
            .collect();
        ReportDefinition::new("Sales", data)
    }

    #[tokio::test]
    async fn test_single_dataset_kinds_reject_many_datasets() {
        let pipeline = ReportPipeline::new(
            MemoryStorage::default(),
            TestConfig {
                kind: ReportKind::ProfessionalPdf,
            },
        );
        let data = ExtractedData {
            reports: vec![sales(), sales()],
            lookups: None,
        };

        assert!(matches!(
            pipeline.transform(data).await,
            Err(ReportError::ProcessingError { .. })
        ));
    }

    #[tokio::test]
    async fn test_transform_and_load_individual_report() {
        let pipeline = ReportPipeline::new(
            MemoryStorage::default(),
            TestConfig {
                kind: ReportKind::IndividualXlsx,
            },
        );
        let data = ExtractedData {
            reports: vec![sales()],
            lookups: None,
        };

        let artifact = pipeline.transform(data).await.unwrap();
        assert!(artifact.file_name.starts_with("Sales_Report_"));
        assert!(artifact.file_name.ends_with(".xlsx"));

        let location = pipeline.load(artifact).await.unwrap();
        assert!(location.starts_with("memory://Sales_Report_"));
    }
}
