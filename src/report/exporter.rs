use crate::domain::model::{LookupTable, Record, ReportArtifact, ReportDefinition};
use crate::domain::ports::Storage;
use crate::report::format::stamped_file_name;
use crate::report::pdf::{self, Branding, DEFAULT_PREPARED_BY};
use crate::report::spreadsheet;
use crate::utils::error::Result;
use chrono::{Local, NaiveDateTime};

pub const EXECUTIVE_FILE_NAME: &str = "Executive_Business_Report";

pub fn individual_report(
    data: &[Record],
    sheet_name: &str,
    file_name: &str,
    now: &NaiveDateTime,
) -> Result<ReportArtifact> {
    Ok(ReportArtifact {
        file_name: stamped_file_name(file_name, "xlsx", now),
        bytes: spreadsheet::build_individual_workbook(data, sheet_name)?,
    })
}

pub fn professional_pdf(
    data: &[Record],
    title: &str,
    file_name: &str,
    prepared_by: Option<&str>,
    lookups: Option<&LookupTable>,
    branding: &Branding,
    now: &NaiveDateTime,
) -> Result<ReportArtifact> {
    let prepared_by = prepared_by.unwrap_or(DEFAULT_PREPARED_BY);
    Ok(ReportArtifact {
        file_name: stamped_file_name(file_name, "pdf", now),
        bytes: pdf::build_professional_pdf(data, title, prepared_by, lookups, branding, now)?,
    })
}

pub fn executive_report(reports: &[ReportDefinition], now: &NaiveDateTime) -> Result<ReportArtifact> {
    Ok(ReportArtifact {
        file_name: stamped_file_name(EXECUTIVE_FILE_NAME, "xlsx", now),
        bytes: spreadsheet::build_executive_workbook(reports, now)?,
    })
}

pub fn executive_pdf(
    reports: &[ReportDefinition],
    prepared_by: Option<&str>,
    lookups: Option<&LookupTable>,
    branding: &Branding,
    now: &NaiveDateTime,
) -> Result<ReportArtifact> {
    let prepared_by = prepared_by.unwrap_or(DEFAULT_PREPARED_BY);
    Ok(ReportArtifact {
        file_name: stamped_file_name(EXECUTIVE_FILE_NAME, "pdf", now),
        bytes: pdf::build_executive_pdf(reports, prepared_by, lookups, branding, now)?,
    })
}

/// Builds report files and saves them through a storage backend. Each call
/// renders fully in memory before anything is written, so a failed render
/// leaves no partial file behind.
pub struct ReportExporter<S: Storage> {
    storage: S,
    branding: Branding,
}

impl<S: Storage> ReportExporter<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            branding: Branding::default(),
        }
    }

    pub fn with_branding(mut self, branding: Branding) -> Self {
        self.branding = branding;
        self
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    /// Writes the artifact and returns where it was saved.
    pub async fn save(&self, artifact: &ReportArtifact) -> Result<String> {
        tracing::debug!(
            "Writing {} ({} bytes) to storage",
            artifact.file_name,
            artifact.bytes.len()
        );
        self.storage.write_file(&artifact.file_name, &artifact.bytes).await?;
        let location = self.storage.location_of(&artifact.file_name);
        tracing::info!("Saved report to {}", location);
        Ok(location)
    }

    pub async fn download_individual_report(
        &self,
        data: &[Record],
        sheet_name: &str,
        file_name: &str,
    ) -> Result<String> {
        let artifact = individual_report(data, sheet_name, file_name, &Local::now().naive_local())?;
        self.save(&artifact).await
    }

    pub async fn download_professional_pdf(
        &self,
        data: &[Record],
        title: &str,
        file_name: &str,
        prepared_by: Option<&str>,
        lookups: Option<&LookupTable>,
    ) -> Result<String> {
        let artifact = professional_pdf(
            data,
            title,
            file_name,
            prepared_by,
            lookups,
            &self.branding,
            &Local::now().naive_local(),
        )?;
        self.save(&artifact).await
    }

    pub async fn download_executive_report(&self, reports: &[ReportDefinition]) -> Result<String> {
        let artifact = executive_report(reports, &Local::now().naive_local())?;
        self.save(&artifact).await
    }

    pub async fn download_executive_pdf(
        &self,
        reports: &[ReportDefinition],
        prepared_by: Option<&str>,
        lookups: Option<&LookupTable>,
    ) -> Result<String> {
        let artifact = executive_pdf(
            reports,
            prepared_by,
            lookups,
            &self.branding,
            &Local::now().naive_local(),
        )?;
        self.save(&artifact).await
    }
}
