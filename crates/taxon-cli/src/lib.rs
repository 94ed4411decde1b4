//! Taxon CLI library
//!
//! This module contains the core CLI logic for the Taxon graph tool.

pub mod error_adapter;
pub mod selftest;

mod args;
mod config;

pub use args::Args;

use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::Path,
};

use log::{info, warn};

use taxon::{GraphBuilder, TaxonError};
use taxon_parser::error::Diagnostic;

use error_adapter::Report;

/// Run the Taxon CLI application
///
/// Reads the document from the input file (or standard input), builds its
/// graph and writes the DOT text to the output file (or standard output).
/// With `--graphs`, the declared graph names are written instead.
///
/// Graph-building warnings are logged and do not stop the run.
///
/// # Errors
///
/// Returns `TaxonError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid TOML input
pub fn run(args: &Args) -> Result<(), TaxonError> {
    info!(
        input_path:? = args.input,
        output_path:? = args.output;
        "Processing document"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let app_config = config::apply_overrides(app_config, args);

    let (source, name) = read_input(args.input.as_deref())?;

    let builder = GraphBuilder::new(app_config);
    let document = builder.parse(&source)?;
    let mut output = open_output(args.output.as_deref())?;

    if args.graphs {
        for graph in document.graphs() {
            writeln!(output, "{graph}")?;
        }
        output.flush()?;
        return Ok(());
    }

    let model = builder.model(&document);
    report_warnings(model.diagnostics(), &source);

    let mut heading = builder.heading(name);
    if let Some(label) = &args.label {
        heading = heading.with_label(label.as_str());
    }
    builder.write_to(&model, heading, &mut output)?;

    info!(output_path:? = args.output; "DOT exported successfully");

    Ok(())
}

/// Read the document text and derive the graph name from the file stem.
///
/// Standard input is read when `input` is `None`; the name is then empty.
fn read_input(input: Option<&str>) -> io::Result<(String, String)> {
    match input {
        Some(path) => {
            let path = Path::new(path);
            let source = std::fs::read_to_string(path)?;
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok((source, name))
        }
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok((source, String::new()))
        }
    }
}

fn open_output(output: Option<&str>) -> io::Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn report_warnings(diagnostics: &[Diagnostic], source: &str) {
    for diag in diagnostics {
        warn!("{}", Report::from_diagnostic(diag, source).render());
    }
}
