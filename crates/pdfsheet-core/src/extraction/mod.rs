pub mod table;
pub mod tokens;

use crate::error::PdfSheetError;
use crate::model::Table;

/// Trait for table extraction backends.
///
/// Implementations must return tables in document order, each with a
/// uniform row width and its header as the first row.
pub trait TableExtractor: Send + Sync {
    /// Extract tables from PDF bytes.
    fn extract_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<Table>, PdfSheetError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Built-in backend: scans literal text operands and splits the resulting
/// lines into tables by blank lines and column-count changes.
///
/// Only handles simple, uncompressed, text-based PDFs. It never fails;
/// content it cannot read simply produces no tables.
pub struct LiteralTextExtractor;

impl LiteralTextExtractor {
    pub fn new() -> Self {
        LiteralTextExtractor
    }
}

impl Default for LiteralTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor for LiteralTextExtractor {
    fn extract_tables(&self, pdf_bytes: &[u8]) -> Result<Vec<Table>, PdfSheetError> {
        let lines = tokens::extract_lines(pdf_bytes);
        log::debug!("extracted {} text line(s) from {} bytes", lines.len(), pdf_bytes.len());

        let tables = table::detect_tables(&lines);
        log::debug!("detected {} table(s)", tables.len());

        Ok(tables)
    }

    fn backend_name(&self) -> &str {
        "literal-text"
    }
}
