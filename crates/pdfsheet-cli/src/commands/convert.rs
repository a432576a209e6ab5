use pdfsheet_core::extraction::LiteralTextExtractor;
use pdfsheet_core::model::ConvertOptions;
use pdfsheet_core::xlsx::XlsxWriter;
use std::path::PathBuf;

pub fn run(
    input_file: PathBuf,
    output_file: PathBuf,
    move_first: Vec<String>,
) -> Result<(), pdfsheet_core::error::PdfSheetError> {
    let options = ConvertOptions {
        priority: move_first,
    };
    let summary = pdfsheet_core::convert_pdf(
        &input_file,
        &output_file,
        &options,
        &LiteralTextExtractor::new(),
        &XlsxWriter::new(),
    )?;

    eprintln!(
        "Converted {} table(s), {} row(s), written to {}",
        summary.tables,
        summary.rows,
        output_file.display()
    );
    if summary.tables == 0 {
        eprintln!("  warning: no tables detected; the workbook has no sheets");
    }

    Ok(())
}
