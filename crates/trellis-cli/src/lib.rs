//! CLI logic for the Trellis markup expander.
//!
//! This module contains the core CLI logic: configuration loading, template
//! discovery, compilation, and writing the output file.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use trellis::{DocumentBuilder, TrellisError};

/// Run the Trellis CLI application
///
/// This function processes the input file through the Trellis pipeline
/// and writes the resulting HTML to the output file. Nothing is written when
/// the input fails to compile.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Template directory errors
/// - Parsing errors
pub fn run(args: &Args) -> Result<(), TrellisError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing document"
    );

    // Load configuration
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(dir) = &args.templates {
        app_config = app_config.with_template_dir(dir);
    }

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process document using DocumentBuilder API
    let builder = DocumentBuilder::from_config(app_config)?;
    let html = builder.compile(&source)?;

    // Write output file
    fs::write(&args.output, html)?;

    info!(output_file = args.output; "HTML exported successfully");

    Ok(())
}
