//! Translates a backend-neutral report [`Document`] into PDF bytes.
//!
//! Report coordinates use a top-left origin with y growing downward; PDF
//! uses a bottom-left origin, so every y is flipped against the page height.

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, Point};
use thiserror::Error;

use hearthpulse_domain::report::{Document, Element, FontStyle, PAGE_HEIGHT, PAGE_WIDTH};

/// PDF backend errors
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF backend error: {0}")]
    Backend(String),
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn for_style(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

fn pdf_y(y: f64) -> Mm {
    Mm((PAGE_HEIGHT - y) as f32)
}

fn segment(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x1 as f32), pdf_y(y1)), false),
            (Point::new(Mm(x2 as f32), pdf_y(y2)), false),
        ],
        is_closed: false,
    }
}

fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x as f32), pdf_y(y)), false),
            (Point::new(Mm((x + width) as f32), pdf_y(y)), false),
            (Point::new(Mm((x + width) as f32), pdf_y(y + height)), false),
            (Point::new(Mm(x as f32), pdf_y(y + height)), false),
        ],
        is_closed: true,
    }
}

/// Serialize a rendered document into PDF bytes
pub fn document_to_pdf(document: &Document) -> Result<Vec<u8>, PdfError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "HearthPulse Report",
        Mm(PAGE_WIDTH as f32),
        Mm(PAGE_HEIGHT as f32),
        "Layer 1",
    );

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| PdfError::Backend(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| PdfError::Backend(e.to_string()))?,
        italic: doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(|e| PdfError::Backend(e.to_string()))?,
    };

    for (index, page) in document.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Layer 1");
            doc.get_page(page_index).get_layer(layer_index)
        };

        for element in &page.elements {
            match element {
                Element::Text { x, y, size, style, text } => {
                    layer.use_text(
                        text,
                        *size as f32,
                        Mm(*x as f32),
                        pdf_y(*y),
                        fonts.for_style(*style),
                    );
                }
                Element::Line { x1, y1, x2, y2 } => {
                    layer.add_line(segment(*x1, *y1, *x2, *y2));
                }
                Element::Rect { x, y, width, height } => {
                    layer.add_line(rectangle(*x, *y, *width, *height));
                }
            }
        }
    }

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))
        .map_err(|e| PdfError::Backend(e.to_string()))?;
    Ok(bytes)
}
