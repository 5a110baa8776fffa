//! Report Sink
//!
//! Renders the report as JSON text and delivers it: stdout by default, a file
//! with `--output`, the system clipboard with `--copy`. A failed file write
//! falls back to stdout; a failed clipboard copy is a warning. Neither changes
//! the analysis outcome.

use std::path::{Path, PathBuf};

use crate::cli::output::Output;
use crate::report::Report;
use crate::types::{Result, SkelError};

/// Where and how to deliver the serialized report.
#[derive(Debug, Clone, Default)]
pub struct SinkOptions {
    /// Write to this file instead of stdout
    pub output: Option<PathBuf>,
    /// Also copy the JSON to the system clipboard
    pub copy: bool,
    /// Single-line JSON instead of pretty-printed
    pub compact: bool,
}

/// Serialize and deliver the report per the options.
pub fn emit(report: &Report, opts: &SinkOptions) -> Result<()> {
    let out = Output::new();
    let json = report.to_json(!opts.compact)?;

    match &opts.output {
        Some(path) => {
            if let Err(e) = write_file(path, &json) {
                out.error(&format!(
                    "Could not write to output file '{}': {}",
                    path.display(),
                    e
                ));
                // The report must still reach the caller somewhere
                println!("{}", json);
            } else {
                out.success(&format!(
                    "Analysis report written to '{}'",
                    absolute_display(path)
                ));
            }
        }
        None => println!("{}", json),
    }

    if opts.copy {
        match copy_to_clipboard(&json) {
            Ok(()) => out.success("JSON report copied to clipboard."),
            Err(e) => out.warning(&format!("Could not copy report to clipboard: {}", e)),
        }
    }

    Ok(())
}

fn write_file(path: &Path, json: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
}

fn copy_to_clipboard(json: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| SkelError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(json.to_string())
        .map_err(|e| SkelError::Clipboard(e.to_string()))
}

fn absolute_display(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
