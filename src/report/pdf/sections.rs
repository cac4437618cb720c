//! Fixed document furniture: branding, comments and the approval block.

use crate::domain::model::Record;
use crate::report::pdf::layout::{
    DocumentCursor, LayoutDocument, TextStyle, BORDER, BREAK_THRESHOLD, CONTENT_BOTTOM,
    CONTENT_WIDTH, MARGIN_LEFT, MUTED, PAGE_WIDTH, MARGIN_RIGHT, PRIMARY, SECONDARY, TEXT,
};
use crate::report::format::format_number;
use crate::report::pdf::metrics::{text_width, wrap_text};
use crate::report::pdf::Branding;
use serde_json::Value;

pub const NOTE_FIELDS: [&str; 4] = ["notes", "comments", "description", "remarks"];
pub const NOTE_LINE_HEIGHT: f32 = 5.0;
const NOTE_FONT_SIZE: f32 = 9.0;

pub const APPROVAL_BLOCK_HEIGHT: f32 = 32.0;
const APPROVAL_COLUMN_WIDTH: f32 = 50.0;
const APPROVAL_COLUMN_STEP: f32 = 65.0;

/// One signature column of the approval block.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalParty {
    pub role: String,
    pub name: String,
    pub date: Option<String>,
}

impl ApprovalParty {
    pub fn new(role: &str, name: &str, date: Option<String>) -> Self {
        Self {
            role: role.to_string(),
            name: name.to_string(),
            date,
        }
    }
}

/// Filled square mark and wordmark on the first page.
pub fn draw_branding(doc: &mut LayoutDocument, branding: &Branding) {
    doc.rect(0, MARGIN_LEFT, 12.0, 10.0, 10.0, PRIMARY);
    doc.text(
        DocumentCursor::at(0, 19.0),
        MARGIN_LEFT + 13.0,
        branding.company_name.clone(),
        TextStyle::new(14.0, true, PRIMARY),
    );
    if !branding.tagline.is_empty() {
        doc.text(
            DocumentCursor::at(0, 23.5),
            MARGIN_LEFT + 13.0,
            branding.tagline.clone(),
            TextStyle::new(8.0, false, MUTED),
        );
    }
    doc.hline(
        DocumentCursor::at(0, 28.0),
        MARGIN_LEFT,
        PAGE_WIDTH - MARGIN_RIGHT,
        SECONDARY,
        0.8,
    );
}

/// Bold label followed by its value on the same baseline.
pub fn draw_label_value(doc: &mut LayoutDocument, cursor: DocumentCursor, label: &str, value: &str) {
    let label_style = TextStyle::new(10.0, true, TEXT);
    doc.text(cursor, MARGIN_LEFT, label, label_style);
    let offset = text_width(label, label_style.size, true) + 2.0;
    doc.text(cursor, MARGIN_LEFT + offset, value, TextStyle::new(10.0, false, TEXT));
}

pub fn draw_heading(doc: &mut LayoutDocument, cursor: DocumentCursor, text: &str, size: f32) {
    doc.text(cursor, MARGIN_LEFT, text, TextStyle::new(size, true, PRIMARY));
}

/// Distinct non-empty free-text values in first-seen order. Numbers and
/// booleans count as text; objects and arrays are skipped.
pub fn collect_notes(records: &[Record]) -> Vec<String> {
    let mut notes: Vec<String> = Vec::new();
    for record in records {
        for field in NOTE_FIELDS {
            let text = match record.get(field) {
                Some(Value::String(s)) => s.trim().to_string(),
                Some(Value::Number(n)) => format_number(n),
                Some(Value::Bool(b)) => b.to_string(),
                _ => continue,
            };
            if !text.is_empty() && !notes.contains(&text) {
                notes.push(text);
            }
        }
    }
    notes
}

/// "COMMENTS / NOTES" bullet list. Each bullet moves to a new page first when
/// its wrapped lines would pass the break threshold.
pub fn draw_comments(doc: &mut LayoutDocument, cursor: DocumentCursor, notes: &[String]) -> DocumentCursor {
    if notes.is_empty() {
        return cursor;
    }

    let mut cursor = doc.ensure_space(cursor.advance(12.0), 2.0 * NOTE_LINE_HEIGHT, BREAK_THRESHOLD);
    draw_heading(doc, cursor, "COMMENTS / NOTES", 11.0);
    cursor = cursor.advance(7.0);

    let style = TextStyle::new(NOTE_FONT_SIZE, false, TEXT);
    for note in notes {
        let lines = wrap_text(&format!("- {}", note), CONTENT_WIDTH, NOTE_FONT_SIZE, false);
        let needed = lines.len() as f32 * NOTE_LINE_HEIGHT;
        cursor = doc.ensure_space(cursor, needed, BREAK_THRESHOLD);
        for line in lines {
            doc.text(cursor, MARGIN_LEFT, line, style);
            cursor = cursor.advance(NOTE_LINE_HEIGHT);
        }
        cursor = cursor.advance(1.0);
    }

    cursor
}

/// Three signature columns under ruled lines, kept together on one page.
pub fn draw_approval_block(
    doc: &mut LayoutDocument,
    cursor: DocumentCursor,
    parties: &[ApprovalParty; 3],
) -> DocumentCursor {
    let top = doc.ensure_space(cursor.advance(15.0), APPROVAL_BLOCK_HEIGHT, CONTENT_BOTTOM);

    let role_style = TextStyle::new(8.0, true, MUTED);
    let name_style = TextStyle::new(10.0, true, TEXT);
    let date_style = TextStyle::new(8.0, false, TEXT);

    for (i, party) in parties.iter().enumerate() {
        let x = MARGIN_LEFT + i as f32 * APPROVAL_COLUMN_STEP;
        doc.hline(top.advance(10.0), x, x + APPROVAL_COLUMN_WIDTH, BORDER, 0.4);
        doc.text(top.advance(15.0), x, party.role.clone(), role_style);
        doc.text(top.advance(21.0), x, party.name.clone(), name_style);
        let date = party.date.clone().unwrap_or_else(|| "________________".to_string());
        doc.text(top.advance(27.0), x, format!("Date: {}", date), date_style);
    }

    top.advance(APPROVAL_BLOCK_HEIGHT)
}
