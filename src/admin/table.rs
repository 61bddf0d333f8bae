use crate::api::resolve_document_url;
use crate::models::{display_amount, CustomerRow, InvoiceRow};

#[derive(Debug, Clone)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn new(headers: &[&str]) -> Self {
        TableData {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Plain-text rendering with columns padded to their widest cell.
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(format_line(&self.headers, &widths));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in &self.rows {
            lines.push(format_line(row, &widths));
        }

        lines.join("\n")
    }
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Download links for one generated invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLinks {
    pub pdf: String,
    pub xml: String,
    pub zip: String,
}

/// Stored media URLs when the backend has them, else the invoice download endpoints.
pub fn document_links(base: &str, row: &InvoiceRow) -> DocumentLinks {
    let link = |media: &Option<String>, kind: &str| match media.as_deref() {
        Some(url) if !url.is_empty() => resolve_document_url(base, url),
        _ => format!("{}/api/invoices/{}/{}", base, row.invoice_id, kind),
    };

    DocumentLinks {
        pdf: link(&row.media_pdf_url, "pdf"),
        xml: link(&row.media_xml_url, "xml"),
        zip: link(&row.media_zip_url, "zip"),
    }
}

pub fn invoices_table(base: &str, rows: &[InvoiceRow]) -> TableData {
    let mut table = TableData::new(&[
        "InvoiceID", "Numcheque", "Folio", "Fecha", "Total", "Cliente", "Email", "PDF", "XML",
        "ZIP",
    ]);
    for row in rows {
        let links = document_links(base, row);
        table.add_row(vec![
            row.invoice_id.to_string(),
            row.numcheque.clone(),
            row.folio.clone(),
            row.fecha.clone(),
            display_amount(&row.total),
            row.legal_name.clone().unwrap_or_default(),
            row.email.clone().unwrap_or_default(),
            links.pdf,
            links.xml,
            links.zip,
        ]);
    }
    table
}

pub fn customers_table(rows: &[CustomerRow]) -> TableData {
    let mut table = TableData::new(&["ID", "RFC", "Nombre/Razón", "Régimen", "Email"]);
    for row in rows {
        table.add_row(vec![
            row.id.to_string(),
            row.tax_id.clone(),
            row.legal_name.clone(),
            row.tax_system.clone(),
            row.email.clone().unwrap_or_default(),
        ]);
    }
    table
}
