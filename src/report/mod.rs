//! Report Builder
//!
//! Converts the entity model into the ordered, null-pruned structure that
//! gets serialized. Two normalization passes run here and nowhere else:
//!
//! 1. **Ordering**: variable and import lists sort by source line then name;
//!    name-keyed maps serialize name-sorted. Parameters and decorators keep
//!    declaration order, which is semantically meaningful.
//! 2. **Pruning**: absent optional fields are omitted; empty top-level
//!    collections are omitted; an error report carries only `filepath` and
//!    `analysis_error`.
//!
//! Output is a pure function of the entity model: no timestamps, no
//! traversal-order leakage, no randomness.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::{ClassInfo, FunctionInfo, ImportInfo, ModuleInfo, Result, VarInfo};

/// The serializable analysis report for one file.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub filepath: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_error: Option<String>,
    #[serde(flatten)]
    pub module: Option<ModuleReport>,
}

/// Structural half of the report; absent entirely when analysis failed.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_docstring: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<ImportInfo>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub from_imports: BTreeMap<String, Vec<ImportInfo>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<VarInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub global_vars: Vec<VarInfo>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub functions: BTreeMap<String, FunctionInfo>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub classes: BTreeMap<String, ClassInfo>,
    pub has_main_block: bool,
}

impl Report {
    /// Serialize the report, pretty-printed or compact.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Build the report for a successfully analyzed module.
pub fn build(filepath: impl Into<String>, module: &ModuleInfo) -> Report {
    let mut module = module.clone();
    sort_module(&mut module);

    Report {
        filepath: filepath.into(),
        analysis_error: None,
        module: Some(ModuleReport {
            module_docstring: module.module_docstring,
            imports: module.imports,
            from_imports: module.from_imports,
            constants: module.constants,
            global_vars: module.global_vars,
            functions: module.functions,
            classes: module.classes,
            has_main_block: module.has_main_block,
        }),
    }
}

/// Build the minimal report for a failed analysis.
pub fn build_error(filepath: impl Into<String>, error: impl Into<String>) -> Report {
    Report {
        filepath: filepath.into(),
        analysis_error: Some(error.into()),
        module: None,
    }
}

// =============================================================================
// Ordering
// =============================================================================

fn sort_module(module: &mut ModuleInfo) {
    sort_imports(&mut module.imports);
    for entries in module.from_imports.values_mut() {
        sort_imports(entries);
    }
    sort_vars(&mut module.constants);
    sort_vars(&mut module.global_vars);
    for func in module.functions.values_mut() {
        sort_function(func);
    }
    for class in module.classes.values_mut() {
        sort_class(class);
    }
}

fn sort_function(func: &mut FunctionInfo) {
    sort_vars(&mut func.local_vars);
    for nested in func.nested_functions.values_mut() {
        sort_function(nested);
    }
    for nested in func.nested_classes.values_mut() {
        sort_class(nested);
    }
}

fn sort_class(class: &mut ClassInfo) {
    sort_vars(&mut class.class_vars);
    sort_vars(&mut class.instance_vars);
    for method in class.methods.values_mut() {
        sort_function(method);
    }
    for nested in class.nested_classes.values_mut() {
        sort_class(nested);
    }
}

fn sort_vars(vars: &mut [VarInfo]) {
    vars.sort_by(|a, b| a.line.cmp(&b.line).then_with(|| a.name.cmp(&b.name)));
}

fn sort_imports(imports: &mut [ImportInfo]) {
    imports.sort_by(|a, b| a.line.cmp(&b.line).then_with(|| a.name.cmp(&b.name)));
}

// =============================================================================
// Tests
// =============================================================================
