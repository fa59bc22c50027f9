//! PDF export of a quote
//!
//! A4 portrait, built-in Helvetica. Title, customer line, a five-column
//! table and a grand total; the table continues onto new pages as needed.

use crate::error::ExportError;
use crate::model::money::format_money;
use crate::model::quote::{sum_lines, LineItem};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::fs;
use std::path::Path;
use tracing::info;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;
const MARGIN_BOTTOM: f32 = 20.0;
const ROW_HEIGHT: f32 = 7.0;
const DESCRIPTION_CHARS: usize = 40;

/// Column x positions: SKU, Description, Qty, Unit Price, Total
const COLUMNS: [f32; 5] = [14.0, 44.0, 128.0, 146.0, 174.0];
const HEADERS: [&str; 5] = ["SKU", "Description", "Qty", "Unit Price", "Total"];

/// One table row, already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRow {
    pub sku: String,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub line_total: String,
}

impl QuoteRow {
    fn cells(&self) -> [&str; 5] {
        [
            &self.sku,
            &self.description,
            &self.quantity,
            &self.unit_price,
            &self.line_total,
        ]
    }
}

/// Everything the PDF needs, detached from the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteDocument {
    pub title: String,
    pub customer_label: String,
    pub rows: Vec<QuoteRow>,
    pub grand_total: String,
}

impl QuoteDocument {
    pub fn new(title: &str, currency: &str, customer_name: &str, lines: &[LineItem]) -> Self {
        let customer = customer_name.trim();
        let customer_label = if customer.is_empty() {
            "Customer: N/A".to_string()
        } else {
            format!("Customer: {}", customer)
        };

        let rows = lines
            .iter()
            .map(|line| QuoteRow {
                sku: line.sku.clone(),
                description: line.description.clone(),
                quantity: line.quantity.to_string(),
                unit_price: format_money(currency, line.unit_price),
                line_total: format_money(currency, line.line_total()),
            })
            .collect();

        Self {
            title: title.to_string(),
            customer_label,
            rows,
            grand_total: format!("Total: {}", format_money(currency, sum_lines(lines))),
        }
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render the document to PDF bytes
pub fn render(document: &QuoteDocument) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) = PdfDocument::new(
        document.title.as_str(),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Quote",
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Render(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Render(e.to_string()))?,
    };

    let mut current = doc.get_page(page).get_layer(layer);
    current.use_text(document.title.as_str(), 18.0, Mm(MARGIN_LEFT), Mm(PAGE_HEIGHT - 22.0), &fonts.bold);
    current.use_text(
        document.customer_label.as_str(),
        12.0,
        Mm(MARGIN_LEFT),
        Mm(PAGE_HEIGHT - 32.0),
        &fonts.regular,
    );

    let mut y = PAGE_HEIGHT - 42.0;
    draw_header(&current, &fonts, y);
    y -= ROW_HEIGHT;

    for row in &document.rows {
        if y < MARGIN_BOTTOM {
            let (next_page, next_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Quote");
            current = doc.get_page(next_page).get_layer(next_layer);
            y = PAGE_HEIGHT - 20.0;
            draw_header(&current, &fonts, y);
            y -= ROW_HEIGHT;
        }

        for (x, cell) in COLUMNS.iter().zip(row.cells()) {
            current.use_text(fit(cell), 10.0, Mm(*x), Mm(y), &fonts.regular);
        }
        y -= ROW_HEIGHT;
    }

    if y < MARGIN_BOTTOM {
        let (next_page, next_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Quote");
        current = doc.get_page(next_page).get_layer(next_layer);
        y = PAGE_HEIGHT - 20.0;
    }
    current.use_text(
        document.grand_total.as_str(),
        12.0,
        Mm(MARGIN_LEFT),
        Mm(y - 3.0),
        &fonts.bold,
    );

    doc.save_to_bytes()
        .map_err(|e| ExportError::Render(e.to_string()))
}

/// Render and write the document to `path`
pub fn write(document: &QuoteDocument, path: &Path) -> Result<(), ExportError> {
    let bytes = render(document)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ExportError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = document.rows.len(), "wrote quote pdf");
    Ok(())
}

fn draw_header(layer: &PdfLayerReference, fonts: &Fonts, y: f32) {
    for (x, header) in COLUMNS.iter().zip(HEADERS) {
        layer.use_text(header, 10.0, Mm(*x), Mm(y), &fonts.bold);
    }
}

/// Keep long descriptions inside their column
fn fit(cell: &str) -> String {
    if cell.chars().count() > DESCRIPTION_CHARS {
        let mut short: String = cell.chars().take(DESCRIPTION_CHARS - 3).collect();
        short.push_str("...");
        short
    } else {
        cell.to_string()
    }
}
