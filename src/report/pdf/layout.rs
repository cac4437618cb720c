//! Backend-independent page model.
//!
//! Coordinates are millimetres measured from the top-left corner of an A4
//! page; text `y` is the baseline. The backend flips them for PDF output.

use crate::report::pdf::metrics::text_width;

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN_LEFT: f32 = 15.0;
pub const MARGIN_RIGHT: f32 = 15.0;
pub const MARGIN_TOP: f32 = 20.0;
pub const MARGIN_BOTTOM: f32 = 15.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
/// Below this, free text moves to a fresh page.
pub const BREAK_THRESHOLD: f32 = 270.0;
/// Lowest point any element may reach.
pub const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - MARGIN_BOTTOM;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const PRIMARY: Rgb = Rgb(26, 54, 93);
pub const SECONDARY: Rgb = Rgb(255, 154, 98);
pub const TEXT: Rgb = Rgb(51, 65, 85);
pub const MUTED: Rgb = Rgb(148, 163, 184);
pub const STRIPE: Rgb = Rgb(248, 250, 252);
pub const BORDER: Rgb = Rgb(226, 232, 240);
pub const WHITE: Rgb = Rgb(255, 255, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        bold: bool,
        color: Rgb,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        thickness: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPage {
    pub elements: Vec<Element>,
}

impl LayoutPage {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Where the next element goes: vertical position on a given page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentCursor {
    pub y: f32,
    pub page: usize,
}

impl DocumentCursor {
    pub fn at(page: usize, y: f32) -> Self {
        Self { y, page }
    }

    pub fn advance(self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }

    pub fn fits(&self, needed: f32, limit: f32) -> bool {
        self.y + needed <= limit
    }
}

/// Text style shorthand for drawing calls.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(size: f32, bold: bool, color: Rgb) -> Self {
        Self { size, bold, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDocument {
    pub title: String,
    pub pages: Vec<LayoutPage>,
}

impl LayoutDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pages: vec![LayoutPage::default()],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Appends a page and returns a cursor at its top margin.
    pub fn new_page(&mut self) -> DocumentCursor {
        self.pages.push(LayoutPage::default());
        DocumentCursor::at(self.pages.len() - 1, MARGIN_TOP)
    }

    /// Cursor unchanged when `needed` fits above `limit`, otherwise the top
    /// of a new page.
    pub fn ensure_space(&mut self, cursor: DocumentCursor, needed: f32, limit: f32) -> DocumentCursor {
        if cursor.fits(needed, limit) {
            cursor
        } else {
            self.new_page()
        }
    }

    fn push(&mut self, page: usize, element: Element) {
        while self.pages.len() <= page {
            self.pages.push(LayoutPage::default());
        }
        self.pages[page].elements.push(element);
    }

    pub fn text(&mut self, cursor: DocumentCursor, x: f32, text: impl Into<String>, style: TextStyle) {
        self.text_aligned(cursor, x, text, style, Align::Left);
    }

    pub fn text_aligned(
        &mut self,
        cursor: DocumentCursor,
        x: f32,
        text: impl Into<String>,
        style: TextStyle,
        align: Align,
    ) {
        let text = text.into();
        let width = text_width(&text, style.size, style.bold);
        let x = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        self.push(
            cursor.page,
            Element::Text {
                x,
                y: cursor.y,
                text,
                size: style.size,
                bold: style.bold,
                color: style.color,
            },
        );
    }

    pub fn rect(&mut self, page: usize, x: f32, y: f32, width: f32, height: f32, fill: Rgb) {
        self.push(
            page,
            Element::Rect {
                x,
                y,
                width,
                height,
                fill,
            },
        );
    }

    pub fn hline(&mut self, cursor: DocumentCursor, x1: f32, x2: f32, color: Rgb, thickness: f32) {
        self.push(
            cursor.page,
            Element::Line {
                x1,
                y1: cursor.y,
                x2,
                y2: cursor.y,
                color,
                thickness,
            },
        );
    }

    pub fn all_texts(&self) -> Vec<&str> {
        self.pages.iter().flat_map(|p| p.texts()).collect()
    }
}
