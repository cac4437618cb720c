//! Auto-sized, auto-paginating data table.

use crate::domain::model::FlatRow;
use crate::report::headers::readable_header;
use crate::report::pdf::layout::{
    DocumentCursor, LayoutDocument, Rgb, TextStyle, BORDER, CONTENT_BOTTOM, CONTENT_WIDTH,
    MARGIN_LEFT, MARGIN_TOP, PRIMARY, STRIPE, TEXT, WHITE,
};
use crate::report::pdf::metrics::{line_height, longest_word_width, text_width, wrap_text};
use crate::report::spreadsheet::column_keys;

pub const TABLE_FONT_SIZE: f32 = 8.0;
const CELL_PADDING_X: f32 = 1.8;
const CELL_PADDING_Y: f32 = 1.5;
/// Manifest summaries in `items` columns get at least this much room.
const ITEMS_MIN_WIDTH: f32 = 55.0;

const EXCLUDED_FIELDS: [&str; 6] = ["id", "notes", "comments", "description", "remarks", "entered_by"];

pub fn is_excluded_field(key: &str) -> bool {
    EXCLUDED_FIELDS.contains(&key) || key.ends_with("_id")
}

/// Header labels plus body text, ready for layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    pub keys: Vec<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Drops identifier and free-text columns and labels the rest.
    pub fn from_rows(rows: &[FlatRow]) -> Self {
        let keys: Vec<String> = column_keys(rows)
            .into_iter()
            .filter(|k| !is_excluded_field(k))
            .collect();
        let headers = keys.iter().map(|k| readable_header(k)).collect();
        let body = rows
            .iter()
            .map(|row| {
                keys.iter()
                    .map(|k| row.get(k).map(|v| v.display()).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self {
            keys,
            headers,
            rows: body,
        }
    }

    pub fn with_headers(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            keys: headers.clone(),
            headers,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// Fits content widths into the printable width. Columns shrink toward
/// their longest word before anything wraps mid-word, and a table narrower
/// than the page stretches to fill it.
pub fn column_widths(table: &TableData) -> Vec<f32> {
    let mut natural = Vec::with_capacity(table.headers.len());
    let mut minimum = Vec::with_capacity(table.headers.len());

    for (col, header) in table.headers.iter().enumerate() {
        let mut widest = text_width(header, TABLE_FONT_SIZE, true);
        let mut min_word = longest_word_width(header, TABLE_FONT_SIZE, true);
        for row in &table.rows {
            let cell = row.get(col).map(String::as_str).unwrap_or("");
            widest = widest.max(text_width(cell, TABLE_FONT_SIZE, false));
            min_word = min_word.max(longest_word_width(cell, TABLE_FONT_SIZE, false));
        }

        let mut nat = widest + 2.0 * CELL_PADDING_X;
        let mut min = (min_word + 2.0 * CELL_PADDING_X).min(nat);

        let is_items = table
            .keys
            .get(col)
            .map(|k| k.eq_ignore_ascii_case("items"))
            .unwrap_or(false);
        if is_items {
            let floor = ITEMS_MIN_WIDTH.min(CONTENT_WIDTH / 2.0);
            min = min.max(floor);
            nat = nat.max(floor);
        }

        natural.push(nat);
        minimum.push(min);
    }

    let total_natural: f32 = natural.iter().sum();
    if total_natural <= 0.0 {
        return natural;
    }
    if total_natural <= CONTENT_WIDTH {
        let scale = CONTENT_WIDTH / total_natural;
        return natural.iter().map(|w| w * scale).collect();
    }

    let total_min: f32 = minimum.iter().sum();
    if total_min >= CONTENT_WIDTH {
        let scale = CONTENT_WIDTH / total_min;
        return minimum.iter().map(|w| w * scale).collect();
    }

    let spare = CONTENT_WIDTH - total_min;
    let stretch: f32 = natural.iter().zip(&minimum).map(|(n, m)| n - m).sum();
    natural
        .iter()
        .zip(&minimum)
        .map(|(n, m)| m + (n - m) / stretch * spare)
        .collect()
}

struct LaidOutRow {
    lines: Vec<Vec<String>>,
    height: f32,
}

fn lay_out_row(cells: &[String], widths: &[f32], bold: bool) -> LaidOutRow {
    let lines: Vec<Vec<String>> = widths
        .iter()
        .enumerate()
        .map(|(col, width)| {
            let cell = cells.get(col).map(String::as_str).unwrap_or("");
            wrap_text(cell, width - 2.0 * CELL_PADDING_X, TABLE_FONT_SIZE, bold)
        })
        .collect();
    let max_lines = lines.iter().map(Vec::len).max().unwrap_or(1);
    let height = max_lines as f32 * line_height(TABLE_FONT_SIZE) + 2.0 * CELL_PADDING_Y;
    LaidOutRow { lines, height }
}

fn draw_row(
    doc: &mut LayoutDocument,
    cursor: DocumentCursor,
    widths: &[f32],
    row: &LaidOutRow,
    style: TextStyle,
    fill: Option<Rgb>,
) -> DocumentCursor {
    let total_width: f32 = widths.iter().sum();
    if let Some(fill) = fill {
        doc.rect(cursor.page, MARGIN_LEFT, cursor.y, total_width, row.height, fill);
    }

    let ascent = line_height(TABLE_FONT_SIZE) * 0.75;
    let mut x = MARGIN_LEFT;
    for (col, width) in widths.iter().enumerate() {
        for (i, line) in row.lines[col].iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = cursor.y + CELL_PADDING_Y + ascent + i as f32 * line_height(TABLE_FONT_SIZE);
            doc.text(
                DocumentCursor::at(cursor.page, baseline),
                x + CELL_PADDING_X,
                line.clone(),
                style,
            );
        }
        x += width;
    }

    let bottom = cursor.advance(row.height);
    doc.hline(bottom, MARGIN_LEFT, MARGIN_LEFT + total_width, BORDER, 0.2);
    bottom
}

/// Draws the table from `cursor` and returns the cursor just below its last
/// row. Rows that would cross the bottom margin continue on a new page under
/// a repeated header.
pub fn draw_table(doc: &mut LayoutDocument, cursor: DocumentCursor, table: &TableData) -> DocumentCursor {
    if table.is_empty() {
        return cursor;
    }

    let widths = column_widths(table);
    let header = lay_out_row(&table.headers, &widths, true);
    let header_style = TextStyle::new(TABLE_FONT_SIZE, true, WHITE);
    let body_style = TextStyle::new(TABLE_FONT_SIZE, false, TEXT);

    let mut cursor = doc.ensure_space(cursor, header.height, CONTENT_BOTTOM);
    cursor = draw_row(doc, cursor, &widths, &header, header_style, Some(PRIMARY));

    for (index, cells) in table.rows.iter().enumerate() {
        let row = lay_out_row(cells, &widths, false);
        let at_page_top = cursor.y <= MARGIN_TOP + header.height + f32::EPSILON;
        if !cursor.fits(row.height, CONTENT_BOTTOM) && !at_page_top {
            cursor = doc.new_page();
            cursor = draw_row(doc, cursor, &widths, &header, header_style, Some(PRIMARY));
        }
        let fill = (index % 2 == 1).then_some(STRIPE);
        cursor = draw_row(doc, cursor, &widths, &row, body_style, fill);
    }

    tracing::debug!(
        "Laid out table with {} columns and {} rows, ending on page {}",
        widths.len(),
        table.rows.len(),
        cursor.page + 1
    );
    cursor
}
