//! Command Orchestration
//!
//! Wires the analyzer, report builder, and report sink together for one CLI
//! invocation. Every failure path still emits a well-formed report; the exit
//! code is the only signal that distinguishes "tool ran and reported an
//! analysis failure" from a clean run.

pub mod output;
pub mod sink;

pub use sink::{SinkOptions, emit};

use std::path::Path;

use crate::analyzer::analyze_file;
use crate::report::{self, Report};
use crate::types::Result;

/// Analyze a file and produce its report, absorbing analysis failures into
/// the `analysis_error` field.
pub fn analyze_to_report(path: &Path) -> Report {
    let filepath = std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string();

    match analyze_file(path) {
        Ok(module) => report::build(filepath, &module),
        Err(e) => {
            tracing::debug!("analysis failed for {}: {}", filepath, e);
            report::build_error(filepath, e.to_string())
        }
    }
}

/// Run one full analyze-and-emit cycle.
///
/// Returns `Ok(true)` when analysis succeeded and `Ok(false)` when the report
/// carries an `analysis_error`; `Err` only for delivery failures.
pub fn run(path: &Path, opts: &SinkOptions) -> Result<bool> {
    let report = analyze_to_report(path);
    emit(&report, opts)?;
    Ok(report.analysis_error.is_none())
}
