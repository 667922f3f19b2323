//! PDF export encoder.
//!
//! Renders records as a paginated A4 table via `printpdf`: a title line,
//! a styled header row repeated on every page, and alternating row
//! shading. The caller supplies the header order explicitly, so the
//! visual column order is decoupled from record key order; keys missing
//! from a row render as empty cells.

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::unnecessary_cast
)]

use crate::models::Row;
use crate::{Error, Result};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Point, Polygon, Rgb,
};

use super::cell_text;

/// A4 portrait, millimetres.
const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 14.0;
const ROW_HEIGHT: f64 = 9.0;
const BOTTOM_MARGIN: f64 = 18.0;
const TITLE_SIZE: f64 = 18.0;
const BODY_SIZE: f64 = 10.0;
/// Approximate Helvetica advance width at 10pt, used for truncation.
const CHAR_WIDTH_MM: f64 = 1.9;

fn mm(v: f64) -> Mm {
    Mm(v as _)
}

fn header_fill() -> Color {
    // Matches the dashboard's table header (66, 153, 225).
    Color::Rgb(Rgb::new(0.26, 0.60, 0.88, None))
}

fn stripe_fill() -> Color {
    // Alternating row shading (245, 247, 250).
    Color::Rgb(Rgb::new(0.96, 0.97, 0.98, None))
}

fn text_color() -> Color {
    Color::Rgb(Rgb::new(0.12, 0.12, 0.12, None))
}

fn white() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
}

/// Encodes rows as a paginated PDF table.
///
/// # Errors
///
/// - [`Error::EmptyInput`] on zero rows.
/// - [`Error::InvalidInput`] if `headers` is empty.
/// - [`Error::OperationFailed`] if the document writer fails.
pub fn encode(rows: &[Row], title: &str, headers: &[String]) -> Result<Vec<u8>> {
    if rows.is_empty() {
        return Err(Error::EmptyInput);
    }
    if headers.is_empty() {
        return Err(Error::InvalidInput(
            "at least one header column is required".to_string(),
        ));
    }

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "table");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| Error::operation("load_pdf_font", e))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| Error::operation("load_pdf_font", e))?;

    let col_width = (PAGE_WIDTH - 2.0 * MARGIN) / headers.len() as f64;
    let max_chars = ((col_width - 2.0) / CHAR_WIDTH_MM) as usize;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    // Title only on the first page.
    layer.set_fill_color(text_color());
    layer.use_text(title, TITLE_SIZE as _, mm(MARGIN), mm(PAGE_HEIGHT - 22.0), &bold);

    let mut y = PAGE_HEIGHT - 32.0;
    draw_header_band(&layer, headers, &bold, col_width, max_chars, y);
    y -= ROW_HEIGHT;

    for (i, row) in rows.iter().enumerate() {
        if y < BOTTOM_MARGIN {
            let (page, page_layer) = doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "table");
            layer = doc.get_page(page).get_layer(page_layer);
            y = PAGE_HEIGHT - MARGIN - ROW_HEIGHT;
            draw_header_band(&layer, headers, &bold, col_width, max_chars, y);
            y -= ROW_HEIGHT;
        }

        if i % 2 == 1 {
            layer.set_fill_color(stripe_fill());
            layer.add_polygon(band(MARGIN, y, PAGE_WIDTH - MARGIN, y + ROW_HEIGHT));
        }

        layer.set_fill_color(text_color());
        for (col, header) in headers.iter().enumerate() {
            let cell = row
                .get(header.as_str())
                .map(cell_text)
                .unwrap_or_default();
            let x = MARGIN + col as f64 * col_width + 1.0;
            layer.use_text(fit(&cell, max_chars), BODY_SIZE as _, mm(x), mm(y + 2.8), &regular);
        }

        y -= ROW_HEIGHT;
    }

    doc.save_to_bytes()
        .map_err(|e| Error::operation("save_pdf", e))
}

/// Draws the filled header band with bold white column labels.
fn draw_header_band(
    layer: &PdfLayerReference,
    headers: &[String],
    bold: &IndirectFontRef,
    col_width: f64,
    max_chars: usize,
    y: f64,
) {
    layer.set_fill_color(header_fill());
    layer.add_polygon(band(MARGIN, y, PAGE_WIDTH - MARGIN, y + ROW_HEIGHT));

    layer.set_fill_color(white());
    for (col, header) in headers.iter().enumerate() {
        let x = MARGIN + col as f64 * col_width + 1.0;
        layer.use_text(fit(header, max_chars), BODY_SIZE as _, mm(x), mm(y + 2.8), bold);
    }
}

/// A filled rectangle spanning `(x0, y0)` to `(x1, y1)`.
fn band(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
    Polygon {
        rings: vec![vec![
            (Point::new(mm(x0), mm(y0)), false),
            (Point::new(mm(x1), mm(y0)), false),
            (Point::new(mm(x1), mm(y1)), false),
            (Point::new(mm(x0), mm(y1)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    }
}

/// Truncates a cell to the column's character budget.
fn fit(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Record, Role};

    fn headers() -> Vec<String> {
        Record::FIELDS.iter().map(ToString::to_string).collect()
    }

    fn roster(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| {
                Record::new(format!("User {i}"), format!("u{i}@inst.example"), Role::Student)
                    .with_created_at("2024-01-01T00:00:00Z")
                    .to_row()
            })
            .collect()
    }

    #[test]
    fn test_encode_produces_a_pdf() {
        let bytes = encode(&roster(3), "Usuarios", &headers()).unwrap();
        assert_eq!(&bytes[..5], b"%PDF-");
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(
            encode(&[], "Usuarios", &headers()),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_no_headers_is_an_error() {
        assert!(matches!(
            encode(&roster(1), "Usuarios", &[]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_large_roster_spills_onto_more_pages() {
        let few = encode(&roster(3), "Usuarios", &headers()).unwrap();
        let many = encode(&roster(120), "Usuarios", &headers()).unwrap();
        assert!(many.len() > few.len());
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        assert_eq!(fit("short", 10), "short");
        let truncated = fit("a very long cell value", 8);
        assert_eq!(truncated.chars().count(), 8);
        assert!(truncated.ends_with('…'));
    }
}
