//! CLI logic for the Parley compiler.
//!
//! This module contains the core CLI logic: read a Parley source file,
//! compile it and write the layout context as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs::File, io::BufWriter};

use log::info;

use parley::{Compiler, ParleyError};

/// Run the Parley CLI application
///
/// This function processes the input file through the Parley pipeline
/// and writes the resulting layout context to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ParleyError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Syntax and semantic errors in the document
/// - Export errors
pub fn run(args: &Args) -> Result<(), ParleyError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing document"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = std::fs::read_to_string(&args.input)?;

    let compiler = Compiler::new(app_config);
    let context = compiler.layout(&source)?;

    let writer = BufWriter::new(File::create(&args.output)?);
    compiler.write_json(&context, writer)?;

    info!(output_file = args.output; "Layout context exported successfully");

    Ok(())
}
