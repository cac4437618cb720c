use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting report export");

        tracing::info!("📥 Fetching datasets...");
        let extracted = self.pipeline.extract().await?;
        let total: usize = extracted.reports.iter().map(|r| r.data.len()).sum();
        tracing::info!(
            "📥 Fetched {} dataset(s), {} records",
            extracted.reports.len(),
            total
        );

        tracing::info!("🔄 Rendering report...");
        let artifact = self.pipeline.transform(extracted).await?;
        tracing::info!("🔄 Rendered {} ({} bytes)", artifact.file_name, artifact.bytes.len());

        tracing::info!("💾 Saving report...");
        let output_path = self.pipeline.load(artifact).await?;
        tracing::info!("💾 Report saved to {} in {:?}", output_path, started.elapsed());

        Ok(output_path)
    }
}
