use pdfsheet_core::atomic::write_atomic;
use pdfsheet_core::error::PdfSheetError;
use pdfsheet_core::extraction::LiteralTextExtractor;
use pdfsheet_core::model::ConvertOptions;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    move_first: Vec<String>,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), PdfSheetError> {
    let pdf_bytes =
        std::fs::read(&input_file).map_err(|source| PdfSheetError::InputUnreadable {
            path: input_file.clone(),
            source,
        })?;
    let options = ConvertOptions {
        priority: move_first,
    };
    let tables =
        pdfsheet_core::extract_tables(&pdf_bytes, &LiteralTextExtractor::new(), &options)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&tables)?;
            write_atomic(&path, json.as_bytes())?;
            eprintln!(
                "Detected {} table(s), written to {}",
                tables.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&tables)?,
            _ => output::table::print(&tables),
        },
    }

    Ok(())
}
