pub mod address;
pub mod parts;

use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::atomic::write_atomic;
use crate::error::PdfSheetError;
use crate::model::Sheet;

/// Trait for workbook output backends.
pub trait WorkbookWriter: Send + Sync {
    /// Write `sheets`, in order, as one workbook at `out`.
    ///
    /// Implementations must not leave a partially written file at `out`.
    fn write_workbook(&self, sheets: &[Sheet], out: &Path) -> Result<(), PdfSheetError>;

    /// Name of this output backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Built-in backend writing a minimal deflate-compressed xlsx package.
pub struct XlsxWriter;

impl XlsxWriter {
    pub fn new() -> Self {
        XlsxWriter
    }
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkbookWriter for XlsxWriter {
    fn write_workbook(&self, sheets: &[Sheet], out: &Path) -> Result<(), PdfSheetError> {
        let package = build_package(sheets)?;
        write_atomic(out, &package)?;
        log::info!(
            "wrote {} sheet(s) ({} bytes) to {}",
            sheets.len(),
            package.len(),
            out.display()
        );
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "xlsx"
    }
}

/// Assemble the complete xlsx archive in memory.
///
/// Sheet `i` (1-based) is stored at `xl/worksheets/sheet{i}.xml` and bound
/// to relationship `rId{i}`; the workbook lists the sheets in the given order.
pub fn build_package(sheets: &[Sheet]) -> Result<Vec<u8>, PdfSheetError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut add = |name: &str, data: Vec<u8>| -> Result<(), PdfSheetError> {
        zip.start_file(name, options)?;
        zip.write_all(&data)?;
        log::debug!("added part {name} ({} bytes)", data.len());
        Ok(())
    };

    add(parts::CONTENT_TYPES_PATH, parts::content_types(sheets.len())?)?;
    add(parts::ROOT_RELS_PATH, parts::root_rels()?)?;
    add(parts::WORKBOOK_PATH, parts::workbook(sheets)?)?;
    add(parts::WORKBOOK_RELS_PATH, parts::workbook_rels(sheets.len())?)?;
    for (i, sheet) in sheets.iter().enumerate() {
        add(&parts::worksheet_path(i + 1), parts::worksheet(&sheet.rows)?)?;
    }

    Ok(zip.finish()?.into_inner())
}
