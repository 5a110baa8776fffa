//! pyskel - Structural Skeleton Extractor for Python Source Files
//!
//! Analyzes a single Python file without executing it and produces a
//! deterministic JSON report of its declarative shape: module docstring,
//! imports, constants, variables, functions, and classes, including nested
//! declarations and type/decorator metadata.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pyskel::analyzer::analyze_source;
//! use pyskel::report;
//!
//! let module = analyze_source("app.py", source)?;
//! let json = report::build("/abs/app.py", &module).to_json(true)?;
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: tree-sitter parsing and structural extraction
//! - [`report`]: ordering, pruning, and serialization of reports
//! - [`cli`]: command orchestration and report delivery
//! - [`types`]: the entity model and unified error type

pub mod analyzer;
pub mod cli;
pub mod report;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use analyzer::{analyze_file, analyze_source};
pub use report::{Report, build, build_error};
pub use types::{
    ClassInfo, FunctionInfo, ImportInfo, MethodKind, ModuleInfo, ParamInfo, ParamKind,
    ParseFailure, Result, SkelError, VarInfo,
};
