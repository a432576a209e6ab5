mod commands;
mod output;

use clap::{Parser, Subcommand};
use simplelog::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pdfsheet",
    version,
    about = "Convert tables in simple text PDFs to an xlsx workbook"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Logging level
    #[arg(long, global = true, default_value = "Warn")]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF into an xlsx workbook, one sheet per detected table
    Convert {
        /// Path to the PDF file
        input_file: PathBuf,

        /// Path of the xlsx file to write
        output_file: PathBuf,

        /// Column names to move to the front, in order
        #[arg(long = "move-first", value_name = "NAME", num_args = 1..)]
        move_first: Vec<String>,
    },
    /// Show the tables detected in a PDF (without writing a workbook)
    Tables {
        /// Path to the PDF file
        input_file: PathBuf,

        /// Column names to move to the front, in order
        #[arg(long = "move-first", value_name = "NAME", num_args = 1..)]
        move_first: Vec<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write detected tables to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = simplelog::SimpleLogger::init(cli.log_level, simplelog::Config::default()) {
        eprintln!("Error: configuring logging: {e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Convert {
            input_file,
            output_file,
            move_first,
        } => commands::convert::run(input_file, output_file, move_first),
        Commands::Tables {
            input_file,
            move_first,
            output,
            out,
        } => commands::tables::run(input_file, move_first, &output, out),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
