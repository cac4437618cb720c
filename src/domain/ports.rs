use crate::domain::model::{LookupTable, ReportArtifact, ReportDefinition, ReportKind};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Where a file written under `path` ends up, for user-facing messages.
    fn location_of(&self, path: &str) -> String;
}

/// A dataset to fetch: the sheet name it is reported under and the API resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    pub name: String,
    pub resource: String,
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn api_token(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn output_path(&self) -> &str;
    fn report_kind(&self) -> ReportKind;
    fn datasets(&self) -> Vec<DatasetSource>;
    fn title(&self) -> &str;
    fn file_name(&self) -> &str;
    fn prepared_by(&self) -> &str;
    fn use_lookups(&self) -> bool;
}

/// Data handed from extract to transform.
#[derive(Debug, Clone, Default)]
pub struct ExtractedData {
    pub reports: Vec<ReportDefinition>,
    pub lookups: Option<LookupTable>,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExtractedData>;
    async fn transform(&self, data: ExtractedData) -> Result<ReportArtifact>;
    async fn load(&self, artifact: ReportArtifact) -> Result<String>;
}
