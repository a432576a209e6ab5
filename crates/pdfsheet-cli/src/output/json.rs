use pdfsheet_core::error::PdfSheetError;
use pdfsheet_core::model::Table;

pub fn print(tables: &[Table]) -> Result<(), PdfSheetError> {
    let json = serde_json::to_string_pretty(tables)?;
    println!("{json}");
    Ok(())
}
