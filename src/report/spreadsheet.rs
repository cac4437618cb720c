//! Workbook builders for the single-dataset and executive spreadsheets.

use crate::domain::model::{ExecutiveSummary, FlatRow, FlatValue, Record, ReportDefinition};
use crate::report::format::format_timestamp;
use crate::report::normalize::flatten_data;
use crate::utils::error::Result;
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

pub const EXECUTIVE_SUMMARY_SHEET: &str = "Executive Summary";

/// Cell of the literal summary grid.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryCell {
    Text(String),
    Number(f64),
    Count(usize),
}

/// Label/value grid for the "Executive Summary" sheet, section headers
/// interspersed as single-cell rows and blank rows as separators.
pub fn executive_summary_grid(
    summary: &ExecutiveSummary,
    generated_at: &NaiveDateTime,
) -> Vec<Vec<SummaryCell>> {
    let text = |s: &str| SummaryCell::Text(s.to_string());
    vec![
        vec![text("EXECUTIVE BUSINESS REPORT")],
        vec![text("Generated"), SummaryCell::Text(format_timestamp(generated_at))],
        vec![],
        vec![text("FINANCIAL PERFORMANCE")],
        vec![text("Total Revenue"), SummaryCell::Number(summary.total_revenue)],
        vec![text("Total Collected"), SummaryCell::Number(summary.total_paid)],
        vec![text("Pending Amount"), SummaryCell::Number(summary.pending_amount)],
        vec![
            text("Total Sales Recorded"),
            SummaryCell::Count(summary.total_sales_count),
        ],
        vec![],
        vec![text("OPERATIONAL STATUS")],
        vec![
            text("Active Deployments"),
            SummaryCell::Count(summary.active_shipments),
        ],
        vec![
            text("Total Shipments"),
            SummaryCell::Count(summary.total_shipments),
        ],
    ]
}

/// Single-sheet workbook of flattened records, columns auto-sized.
pub fn build_individual_workbook(data: &[Record], sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let rows = flatten_data(data, None);
    write_flat_sheet(workbook.add_worksheet(), sheet_name, &rows)?;
    Ok(workbook.save_to_buffer()?)
}

/// Summary sheet first, then one flattened sheet per dataset.
pub fn build_executive_workbook(
    reports: &[ReportDefinition],
    generated_at: &NaiveDateTime,
) -> Result<Vec<u8>> {
    let summary = ExecutiveSummary::from_reports(reports);
    let mut workbook = Workbook::new();

    write_summary_sheet(
        workbook.add_worksheet(),
        &executive_summary_grid(&summary, generated_at),
    )?;

    for report in reports {
        let rows = flatten_data(&report.data, None);
        tracing::debug!("Writing sheet '{}' with {} rows", report.sheet_name, rows.len());
        write_flat_sheet(workbook.add_worksheet(), &report.sheet_name, &rows)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Keys in order of first appearance, starting with the first row's order.
pub fn column_keys(rows: &[FlatRow]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
    }
    keys
}

/// `max(header length, longest cell) + 2`, in characters.
pub fn column_widths(keys: &[String], rows: &[FlatRow]) -> Vec<usize> {
    keys.iter()
        .map(|key| {
            let longest_cell = rows
                .iter()
                .filter_map(|row| row.get(key))
                .map(|value| value.display().chars().count())
                .max()
                .unwrap_or(0);
            key.chars().count().max(longest_cell) + 2
        })
        .collect()
}

fn write_flat_sheet(sheet: &mut Worksheet, name: &str, rows: &[FlatRow]) -> Result<()> {
    sheet.set_name(name)?;

    let keys = column_keys(rows);
    for (col, key) in keys.iter().enumerate() {
        sheet.write_string(0, col as u16, key.as_str())?;
    }

    for (index, row) in rows.iter().enumerate() {
        let excel_row = index as u32 + 1;
        for (col, key) in keys.iter().enumerate() {
            let col = col as u16;
            match row.get(key) {
                Some(FlatValue::Text(s)) => {
                    sheet.write_string(excel_row, col, s.as_str())?;
                }
                Some(FlatValue::Number(n)) => {
                    if let Some(f) = n.as_f64() {
                        sheet.write_number(excel_row, col, f)?;
                    }
                }
                Some(FlatValue::Bool(b)) => {
                    sheet.write_boolean(excel_row, col, *b)?;
                }
                Some(FlatValue::Null) | None => {}
            }
        }
    }

    for (col, width) in column_widths(&keys, rows).into_iter().enumerate() {
        sheet.set_column_width(col as u16, width as f64)?;
    }

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, grid: &[Vec<SummaryCell>]) -> Result<()> {
    sheet.set_name(EXECUTIVE_SUMMARY_SHEET)?;
    let section = Format::new().set_bold();
    let amount = Format::new().set_num_format("#,##0.00");
    let count = Format::new().set_num_format("#,##0");

    for (row, cells) in grid.iter().enumerate() {
        let row = row as u32;
        let is_heading = cells.len() == 1;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                SummaryCell::Text(s) if is_heading => {
                    sheet.write_string_with_format(row, col, s.as_str(), &section)?;
                }
                SummaryCell::Text(s) => {
                    sheet.write_string(row, col, s.as_str())?;
                }
                SummaryCell::Number(n) => {
                    sheet.write_number_with_format(row, col, *n, &amount)?;
                }
                SummaryCell::Count(n) => {
                    sheet.write_number_with_format(row, col, *n as f64, &count)?;
                }
            }
        }
    }

    sheet.set_column_width(0, 30)?;
    sheet.set_column_width(1, 20)?;
    Ok(())
}
