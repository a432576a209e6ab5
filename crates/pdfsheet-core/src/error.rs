use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PdfSheetError {
    #[error("cannot read input {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write output {}: {source}", path.display())]
    OutputUnwritable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to build workbook XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to build workbook archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
