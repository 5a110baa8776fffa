//! Code Analyzer Module
//!
//! Turns one Python source file into an entity model:
//! - Tree parsing via tree-sitter (hard stop on syntax errors)
//! - Structural extraction (imports, variables, functions, classes)
//!
//! All file I/O happens here, strictly before extraction begins; the
//! extraction engine itself never touches the filesystem.

pub mod engine;
pub mod parser;

pub use engine::extract;
pub use parser::parse_python;

use std::path::Path;

use crate::types::{ModuleInfo, Result, SkelError};

/// Analyze Python source text already held in memory.
pub fn analyze_source(path: &str, source: &str) -> Result<ModuleInfo> {
    let tree = parse_python(path, source)?;
    Ok(extract(source, &tree))
}

/// Read, parse, and analyze a Python file.
///
/// Validates that the path exists, is a regular file, and carries a `.py`
/// extension before reading. Invalid UTF-8 byte sequences are replaced rather
/// than rejected.
pub fn analyze_file(path: &Path) -> Result<ModuleInfo> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(SkelError::FileNotFound(display));
    }
    if path.is_dir() {
        return Err(SkelError::NotAFile(display));
    }
    let is_python = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("py"));
    if !is_python {
        return Err(SkelError::NotPythonSource(display));
    }

    let bytes = std::fs::read(path)?;
    let source = String::from_utf8_lossy(&bytes);
    analyze_source(&display, &source)
}
