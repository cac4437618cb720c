//! PDF reports.
//!
//! Documents are first laid out into a [`layout::LayoutDocument`] (pure data,
//! testable without a renderer) and then written with `printpdf` by
//! [`backend::render`].

pub mod backend;
pub mod layout;
pub mod metrics;
pub mod sections;
pub mod table;

use crate::domain::model::{ExecutiveSummary, LookupTable, Record, ReportDefinition};
use crate::report::format::{format_amount, format_long_date, format_timestamp};
use crate::report::normalize::flatten_data;
use crate::utils::error::Result;
use chrono::NaiveDateTime;
use layout::{DocumentCursor, LayoutDocument, TextStyle, MARGIN_LEFT, MUTED, PRIMARY};
use sections::{
    collect_notes, draw_approval_block, draw_branding, draw_comments, draw_heading,
    draw_label_value, ApprovalParty,
};
use serde::{Deserialize, Serialize};
use table::{draw_table, TableData};

pub const DEFAULT_PREPARED_BY: &str = "System Administrator";
pub const EXECUTIVE_TITLE: &str = "EXECUTIVE BUSINESS REPORT";

const TITLE_Y: f32 = 40.0;
const TABLE_START_Y: f32 = 72.0;

/// Company mark printed in the top-left corner of every report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branding {
    pub company_name: String,
    #[serde(default)]
    pub tagline: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            company_name: "SEAFOOD EXPORTS".to_string(),
            tagline: "Logistics & Trade Management".to_string(),
        }
    }
}

/// Single-dataset report: header block, data table, notes and sign-off.
pub fn layout_professional(
    data: &[Record],
    title: &str,
    prepared_by: &str,
    lookups: Option<&LookupTable>,
    branding: &Branding,
    generated_at: &NaiveDateTime,
) -> LayoutDocument {
    let mut doc = LayoutDocument::new(title);
    draw_branding(&mut doc, branding);

    doc.text(
        DocumentCursor::at(0, TITLE_Y),
        MARGIN_LEFT,
        title.to_uppercase(),
        TextStyle::new(18.0, true, PRIMARY),
    );
    let today = format_long_date(&generated_at.date());
    draw_label_value(&mut doc, DocumentCursor::at(0, 48.0), "Prepared by:", prepared_by);
    draw_label_value(&mut doc, DocumentCursor::at(0, 54.0), "Date:", &today);
    draw_heading(&mut doc, DocumentCursor::at(0, 66.0), "Report Overview", 12.0);

    let rows = flatten_data(data, lookups);
    let table = TableData::from_rows(&rows);
    let mut cursor = draw_table(&mut doc, DocumentCursor::at(0, TABLE_START_Y), &table);

    cursor = draw_comments(&mut doc, cursor, &collect_notes(data));

    let parties = [
        ApprovalParty::new("PREPARED BY", prepared_by, Some(today)),
        ApprovalParty::new("REVIEWED BY", "Project Manager / Lead", None),
        ApprovalParty::new("APPROVED BY", "Director / CEO", None),
    ];
    draw_approval_block(&mut doc, cursor, &parties);

    tracing::debug!("Laid out '{}' over {} page(s)", title, doc.page_count());
    doc
}

/// Financial highlights rows shown on the executive cover page.
pub fn financial_highlights(summary: &ExecutiveSummary) -> TableData {
    TableData::with_headers(
        vec!["Metric".to_string(), "Value".to_string()],
        vec![
            vec!["Total Revenue".to_string(), format_amount(summary.total_revenue)],
            vec!["Total Collected".to_string(), format_amount(summary.total_paid)],
            vec![
                "Outstanding Balance".to_string(),
                format_amount(summary.outstanding_balance()),
            ],
        ],
    )
}

/// Cover page with highlights and sign-off, then one page per dataset.
pub fn layout_executive(
    reports: &[ReportDefinition],
    prepared_by: &str,
    lookups: Option<&LookupTable>,
    branding: &Branding,
    generated_at: &NaiveDateTime,
) -> LayoutDocument {
    let mut doc = LayoutDocument::new(EXECUTIVE_TITLE);
    draw_branding(&mut doc, branding);

    doc.text(
        DocumentCursor::at(0, TITLE_Y),
        MARGIN_LEFT,
        EXECUTIVE_TITLE,
        TextStyle::new(18.0, true, PRIMARY),
    );
    draw_label_value(
        &mut doc,
        DocumentCursor::at(0, 48.0),
        "Generated:",
        &format_timestamp(generated_at),
    );
    draw_label_value(&mut doc, DocumentCursor::at(0, 54.0), "Prepared by:", prepared_by);
    draw_heading(&mut doc, DocumentCursor::at(0, 66.0), "Financial Highlights", 12.0);

    let summary = ExecutiveSummary::from_reports(reports);
    let cursor = draw_table(
        &mut doc,
        DocumentCursor::at(0, TABLE_START_Y),
        &financial_highlights(&summary),
    );

    let parties = [
        ApprovalParty::new(
            "PREPARED BY",
            prepared_by,
            Some(format_long_date(&generated_at.date())),
        ),
        ApprovalParty::new("REVIEWED BY", "CEO / Managing Director", None),
        ApprovalParty::new("APPROVED BY", "Board of Directors", None),
    ];
    draw_approval_block(&mut doc, cursor, &parties);

    for report in reports {
        let cursor = doc.new_page();
        draw_heading(&mut doc, cursor, &report.sheet_name.to_uppercase(), 14.0);
        doc.text(
            cursor.advance(6.0),
            MARGIN_LEFT,
            format!("{} record(s)", report.data.len()),
            TextStyle::new(9.0, false, MUTED),
        );

        let table = TableData::from_rows(&flatten_data(&report.data, lookups));
        if table.is_empty() {
            doc.text(
                cursor.advance(14.0),
                MARGIN_LEFT,
                "No records available.",
                TextStyle::new(9.0, false, MUTED),
            );
        } else {
            draw_table(&mut doc, cursor.advance(12.0), &table);
        }
    }

    tracing::debug!(
        "Laid out executive report with {} dataset(s) over {} page(s)",
        reports.len(),
        doc.page_count()
    );
    doc
}

pub fn build_professional_pdf(
    data: &[Record],
    title: &str,
    prepared_by: &str,
    lookups: Option<&LookupTable>,
    branding: &Branding,
    generated_at: &NaiveDateTime,
) -> Result<Vec<u8>> {
    let doc = layout_professional(data, title, prepared_by, lookups, branding, generated_at);
    backend::render(&doc)
}

pub fn build_executive_pdf(
    reports: &[ReportDefinition],
    prepared_by: &str,
    lookups: Option<&LookupTable>,
    branding: &Branding,
    generated_at: &NaiveDateTime,
) -> Result<Vec<u8>> {
    let doc = layout_executive(reports, prepared_by, lookups, branding, generated_at);
    backend::render(&doc)
}
