use crate::report::pdf::layout::{Element, LayoutDocument, Rgb, PAGE_HEIGHT, PAGE_WIDTH};
use crate::utils::error::{ReportError, Result};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
};

fn pdf_error(e: printpdf::Error) -> ReportError {
    ReportError::PdfError {
        message: format!("{:?}", e),
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        rgb.0 as f32 / 255.0,
        rgb.1 as f32 / 255.0,
        rgb.2 as f32 / 255.0,
        None,
    ))
}

/// Layout y grows downward; PDF y grows upward from the bottom edge.
fn flip(y: f32) -> Mm {
    Mm(PAGE_HEIGHT - y)
}

fn draw(layer: &PdfLayerReference, element: &Element, regular: &IndirectFontRef, bold: &IndirectFontRef) {
    match element {
        Element::Text {
            x,
            y,
            text,
            size,
            bold: is_bold,
            color: rgb,
        } => {
            layer.set_fill_color(color(*rgb));
            let font = if *is_bold { bold } else { regular };
            layer.use_text(text.clone(), *size, Mm(*x), flip(*y), font);
        }
        Element::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => {
            layer.set_fill_color(color(*fill));
            let rect = Rect::new(Mm(*x), flip(*y + *height), Mm(*x + *width), flip(*y))
                .with_mode(PaintMode::Fill);
            layer.add_rect(rect);
        }
        Element::Line {
            x1,
            y1,
            x2,
            y2,
            color: rgb,
            thickness,
        } => {
            layer.set_outline_color(color(*rgb));
            layer.set_outline_thickness(*thickness);
            layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(*x1), flip(*y1)), false),
                    (Point::new(Mm(*x2), flip(*y2)), false),
                ],
                is_closed: false,
            });
        }
    }
}

/// Writes every laid-out page into an in-memory PDF.
pub fn render(doc: &LayoutDocument) -> Result<Vec<u8>> {
    let (pdf, first_page, first_layer) =
        PdfDocument::new(doc.title.as_str(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = pdf
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = pdf
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    for (index, page) in doc.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            pdf.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Page {} Layer 1", index + 1))
        };
        let layer = pdf.get_page(page_index).get_layer(layer_index);
        for element in &page.elements {
            draw(&layer, element, &regular, &bold);
        }
    }

    tracing::debug!("Rendered PDF '{}' with {} page(s)", doc.title, doc.pages.len());
    pdf.save_to_bytes().map_err(pdf_error)
}
