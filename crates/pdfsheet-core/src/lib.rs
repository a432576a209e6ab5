pub mod atomic;
pub mod error;
pub mod extraction;
pub mod model;
pub mod reorder;
pub mod xlsx;

use std::path::Path;

use error::PdfSheetError;
use extraction::TableExtractor;
use model::{ConversionSummary, ConvertOptions, Sheet, Table};
use xlsx::WorkbookWriter;

/// Extract tables from PDF bytes and move the priority columns to the front
/// of each one. Table order is the extractor's order.
pub fn extract_tables(
    pdf_bytes: &[u8],
    extractor: &dyn TableExtractor,
    options: &ConvertOptions,
) -> Result<Vec<Table>, PdfSheetError> {
    let tables = extractor.extract_tables(pdf_bytes)?;

    Ok(tables
        .into_iter()
        .map(|t| reorder::reorder_table(t, &options.priority))
        .collect())
}

/// Name tables `Sheet1`, `Sheet2`, ... in order.
pub fn sheets_from_tables(tables: Vec<Table>) -> Vec<Sheet> {
    tables
        .into_iter()
        .enumerate()
        .map(|(i, t)| Sheet {
            name: format!("Sheet{}", i + 1),
            rows: t.rows,
        })
        .collect()
}

/// Main API entry point: convert the PDF at `input` into a workbook at `output`.
///
/// Fails only when the input cannot be read or the output cannot be written.
/// A PDF without recognisable tables still produces a valid, empty workbook.
pub fn convert_pdf(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
    extractor: &dyn TableExtractor,
    writer: &dyn WorkbookWriter,
) -> Result<ConversionSummary, PdfSheetError> {
    let pdf_bytes = std::fs::read(input).map_err(|source| PdfSheetError::InputUnreadable {
        path: input.to_path_buf(),
        source,
    })?;
    log::debug!(
        "read {} bytes from {} (extractor: {})",
        pdf_bytes.len(),
        input.display(),
        extractor.backend_name()
    );

    let tables = extract_tables(&pdf_bytes, extractor, options)?;
    drop(pdf_bytes);

    let rows = tables.iter().map(|t| t.rows.len()).sum();
    let sheets = sheets_from_tables(tables);
    writer.write_workbook(&sheets, output)?;

    Ok(ConversionSummary {
        tables: sheets.len(),
        rows,
        extractor: extractor.backend_name().to_string(),
        writer: writer.backend_name().to_string(),
    })
}
