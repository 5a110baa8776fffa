//! Entity Model
//!
//! Normalized in-memory representation of a Python file's declarative shape.
//!
//! The extraction engine populates these structures in discovery order; the
//! report builder re-orders and prunes them at serialization time. Library
//! callers always see the full model, including fields the JSON report omits.
//!
//! Ownership is strictly hierarchical: the module owns its direct children and
//! each function/class owns its nested entities. There are no back-references.

use serde::Serialize;
use std::collections::BTreeMap;

/// A plain `import x` (or `import x as y`) entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub line: usize,
}

/// A single variable binding: module constant, global, class/instance var, or local.
///
/// The subtype is determined by which collection owns the entry, never by a tag
/// on the entry itself.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VarInfo {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,
    pub line: usize,
}

/// Parameter kind, mirroring Python's calling-convention categories.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ParamKind {
    PositionalOnly,
    PositionalOrKeyword,
    VariadicPositional,
    KeywordOnly,
    VariadicKeyword,
}

impl ParamKind {
    /// Variadic parameters never carry defaults.
    pub fn accepts_default(&self) -> bool {
        !matches!(self, Self::VariadicPositional | Self::VariadicKeyword)
    }
}

/// One formal parameter with its textual annotation and default, if any.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub kind: ParamKind,
}

/// How a method binds its first parameter.
///
/// Internal classification only: it drives instance-variable detection and is
/// never serialized (a method has the same report shape as a function).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Instance,
    Class,
    Static,
    Property,
}

/// A function or method definition with its nested scope.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
    pub decorators: Vec<String>,
    pub params: Vec<ParamInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    pub local_vars: Vec<VarInfo>,
    pub nested_functions: BTreeMap<String, FunctionInfo>,
    pub nested_classes: BTreeMap<String, ClassInfo>,
    /// Set when the function is a method of a class; drives instance-var
    /// detection, not serialized.
    #[serde(skip)]
    pub method_kind: Option<MethodKind>,
}

/// A class definition with its methods, variables, and nested classes.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: String,
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
    pub decorators: Vec<String>,
    pub base_classes: Vec<String>,
    pub methods: BTreeMap<String, FunctionInfo>,
    pub class_vars: Vec<VarInfo>,
    pub instance_vars: Vec<VarInfo>,
    pub nested_classes: BTreeMap<String, ClassInfo>,
}

/// Root container for one analyzed source file.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ModuleInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_docstring: Option<String>,
    pub imports: Vec<ImportInfo>,
    /// From-imports grouped by module-key. Leading dots on the key denote
    /// relative import depth (`.pkg`, `..`, ...).
    pub from_imports: BTreeMap<String, Vec<ImportInfo>>,
    pub constants: Vec<VarInfo>,
    pub global_vars: Vec<VarInfo>,
    pub functions: BTreeMap<String, FunctionInfo>,
    pub classes: BTreeMap<String, ClassInfo>,
    pub has_main_block: bool,
}

/// Replace an existing entry with the same name, or append.
///
/// Re-declaration within one scope is last-wins by textual position.
pub fn upsert_var(vars: &mut Vec<VarInfo>, var: VarInfo) {
    if let Some(existing) = vars.iter_mut().find(|v| v.name == var.name) {
        *existing = var;
    } else {
        vars.push(var);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&ParamKind::PositionalOrKeyword).unwrap();
        assert_eq!(json, "\"positional-or-keyword\"");
        let json = serde_json::to_string(&ParamKind::VariadicPositional).unwrap();
        assert_eq!(json, "\"variadic-positional\"");
        let json = serde_json::to_string(&ParamKind::VariadicKeyword).unwrap();
        assert_eq!(json, "\"variadic-keyword\"");
    }

    #[test]
    fn test_variadic_kinds_reject_defaults() {
        assert!(ParamKind::PositionalOrKeyword.accepts_default());
        assert!(ParamKind::KeywordOnly.accepts_default());
        assert!(ParamKind::PositionalOnly.accepts_default());
        assert!(!ParamKind::VariadicPositional.accepts_default());
        assert!(!ParamKind::VariadicKeyword.accepts_default());
    }

    #[test]
    fn test_absent_fields_are_pruned() {
        let var = VarInfo {
            name: "x".to_string(),
            type_hint: None,
            line: 3,
        };
        let json = serde_json::to_value(&var).unwrap();
        assert_eq!(json, serde_json::json!({"name": "x", "line": 3}));
    }

    #[test]
    fn test_present_type_hint_is_kept() {
        let var = VarInfo {
            name: "MAX".to_string(),
            type_hint: Some("int".to_string()),
            line: 2,
        };
        let json = serde_json::to_value(&var).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "MAX", "type": "int", "line": 2})
        );
    }

    #[test]
    fn test_upsert_var_is_last_wins() {
        let mut vars = vec![VarInfo {
            name: "x".to_string(),
            type_hint: None,
            line: 1,
        }];
        upsert_var(
            &mut vars,
            VarInfo {
                name: "x".to_string(),
                type_hint: Some("int".to_string()),
                line: 9,
            },
        );
        assert_eq!(vars.len(), 1);
        assert_eq!(vars[0].line, 9);
        assert_eq!(vars[0].type_hint.as_deref(), Some("int"));
    }

    #[test]
    fn test_method_kind_not_serialized() {
        let func = FunctionInfo {
            name: "m".to_string(),
            line: 1,
            method_kind: Some(MethodKind::Instance),
            ..Default::default()
        };
        let json = serde_json::to_value(&func).unwrap();
        assert!(json.get("method_kind").is_none());
    }
}
