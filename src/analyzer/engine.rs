//! Extraction Engine
//!
//! Single-pass recursive descent over the Python syntax tree, producing one
//! fully-populated [`ModuleInfo`]. Classification is positional: the same
//! assignment shape becomes a constant, a global, a class var, an instance
//! var, or a local depending only on the scope it appears in and the shape of
//! its target.
//!
//! Node kinds the engine does not understand are traversed transparently:
//! their children are still scanned for assignments and definitions, but the
//! node itself produces no entity. A malformed shape is skipped with a debug
//! log, never a fatal error.

use std::collections::{BTreeMap, HashSet};

use tree_sitter::{Node, Tree};

use crate::analyzer::parser::{node_line, node_text};
use crate::types::{
    ClassInfo, FunctionInfo, ImportInfo, MethodKind, ModuleInfo, ParamInfo, ParamKind, VarInfo,
    upsert_var,
};

/// Walk a parsed tree and build the entity model for the whole module.
pub fn extract(source: &str, tree: &Tree) -> ModuleInfo {
    let mut extractor = Extractor {
        src: source.as_bytes(),
        imports: Vec::new(),
        from_imports: BTreeMap::new(),
    };

    let root = tree.root_node();
    let mut module = ModuleInfo {
        module_docstring: extractor.block_docstring(root),
        ..Default::default()
    };

    let mut cursor = root.walk();
    for stmt in root.named_children(&mut cursor) {
        extractor.module_stmt(&mut module, stmt, true);
    }

    module.imports = extractor.imports;
    module.from_imports = extractor.from_imports;
    module
}

// =============================================================================
// Helpers
// =============================================================================

/// SCREAMING_SNAKE_CASE check: uppercase letters, digits, and underscores,
/// at least one letter, no leading underscore or digit.
pub fn is_screaming_snake_case(name: &str) -> bool {
    match name.chars().next() {
        Some(c) if c.is_ascii_uppercase() => {}
        _ => return false,
    }
    let mut has_letter = false;
    for c in name.chars() {
        match c {
            'A'..='Z' => has_letter = true,
            '0'..='9' | '_' => {}
            _ => return false,
        }
    }
    has_letter
}

/// Normalize a docstring the way `inspect.cleandoc` does: tabs expanded,
/// leading whitespace stripped from the first line, the common indent
/// stripped from the rest, and blank lines trimmed from both ends.
fn clean_docstring(raw: &str) -> String {
    let expanded = expand_tabs(raw);
    let lines: Vec<&str> = expanded.lines().collect();
    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            cleaned.push(line.trim_start().to_string());
        } else {
            let cut = margin.min(line.len() - line.trim_start().len());
            cleaned.push(line[cut..].to_string());
        }
    }

    while cleaned.first().is_some_and(|l| l.trim().is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|l| l.trim().is_empty()) {
        cleaned.pop();
    }
    cleaned.join("\n")
}

/// `str.expandtabs()` with the default tab size of 8: each tab advances to
/// the next multiple-of-8 column.
fn expand_tabs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut col = 0usize;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = 8 - col % 8;
                for _ in 0..pad {
                    out.push(' ');
                }
                col += pad;
            }
            '\n' | '\r' => {
                out.push(c);
                col = 0;
            }
            _ => {
                out.push(c);
                col += 1;
            }
        }
    }
    out
}

/// An assignment target the engine can classify.
enum Target {
    /// Plain name binding (`x = ...`)
    Name(String),
    /// Attribute of a simple name (`base.attr = ...`)
    Attr {
        base: String,
        attr: String,
        full: String,
    },
}

/// Scratch state for one function body walk.
#[derive(Default)]
struct FnScratch {
    /// Names declared `global`/`nonlocal`, excluded from local vars
    external_names: HashSet<String>,
    /// Vars assigned through the method's first parameter, applied to the
    /// enclosing class when the method scope closes
    instance_vars: Vec<VarInfo>,
    class_vars: Vec<VarInfo>,
}

// =============================================================================
// Extractor
// =============================================================================

struct Extractor<'s> {
    src: &'s [u8],
    /// Plain imports, module-owned regardless of where the statement appears
    imports: Vec<ImportInfo>,
    from_imports: BTreeMap<String, Vec<ImportInfo>>,
}

impl<'s> Extractor<'s> {
    // -------------------------------------------------------------------------
    // Module scope
    // -------------------------------------------------------------------------

    fn module_stmt(&mut self, module: &mut ModuleInfo, node: Node, top_level: bool) {
        match node.kind() {
            "import_statement" => self.collect_import(node),
            "import_from_statement" => self.collect_from_import(node),
            "future_import_statement" => self.collect_future_import(node),
            "function_definition" => {
                let (func, _) = self.extract_function(node, Vec::new(), false);
                module.functions.insert(func.name.clone(), func);
            }
            "class_definition" => {
                let class = self.extract_class(node, Vec::new());
                module.classes.insert(class.name.clone(), class);
            }
            "decorated_definition" => {
                let decorators = self.decorator_texts(node);
                match node.child_by_field_name("definition") {
                    Some(def) if def.kind() == "function_definition" => {
                        let (func, _) = self.extract_function(def, decorators, false);
                        module.functions.insert(func.name.clone(), func);
                    }
                    Some(def) if def.kind() == "class_definition" => {
                        let class = self.extract_class(def, decorators);
                        module.classes.insert(class.name.clone(), class);
                    }
                    _ => tracing::debug!("decorated definition without a definition body"),
                }
            }
            "expression_statement" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() == "assignment" {
                        self.module_assignment(module, child);
                    }
                }
            }
            "if_statement" => {
                if top_level && self.if_guards_main(node) {
                    module.has_main_block = true;
                }
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.module_stmt(module, child, false);
                }
            }
            "comment" => {}
            _ => {
                // Transparent traversal: no entity, but children may declare
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.module_stmt(module, child, false);
                }
            }
        }
    }

    fn module_assignment(&mut self, module: &mut ModuleInfo, assign: Node) {
        let line = node_line(assign);
        let type_hint = assign
            .child_by_field_name("type")
            .map(|t| node_text(t, self.src).to_string());

        for target in self.assignment_targets(assign) {
            let var = match target {
                Target::Name(name) => {
                    if module.functions.contains_key(&name) || module.classes.contains_key(&name) {
                        continue;
                    }
                    VarInfo {
                        name,
                        type_hint: type_hint.clone(),
                        line,
                    }
                }
                Target::Attr { full, .. } => VarInfo {
                    name: full,
                    type_hint: type_hint.clone(),
                    line,
                },
            };
            if is_screaming_snake_case(&var.name) {
                upsert_var(&mut module.constants, var);
            } else {
                upsert_var(&mut module.global_vars, var);
            }
        }

        // Chained assignment: a = b = value
        if let Some(right) = assign.child_by_field_name("right")
            && right.kind() == "assignment"
        {
            self.module_assignment(module, right);
        }
    }

    /// `if __name__ == "__main__":` at module top level, either operand order.
    /// Elif arms count too; the body is not treated specially.
    fn if_guards_main(&self, node: Node) -> bool {
        if node
            .child_by_field_name("condition")
            .is_some_and(|cond| self.is_main_comparison(cond))
        {
            return true;
        }
        let mut cursor = node.walk();
        node.named_children(&mut cursor).any(|child| {
            child.kind() == "elif_clause"
                && child
                    .child_by_field_name("condition")
                    .is_some_and(|cond| self.is_main_comparison(cond))
        })
    }

    fn is_main_comparison(&self, expr: Node) -> bool {
        let expr = if expr.kind() == "parenthesized_expression" {
            match expr.named_child(0) {
                Some(inner) => inner,
                None => return false,
            }
        } else {
            expr
        };

        if expr.kind() != "comparison_operator" || expr.named_child_count() != 2 {
            return false;
        }
        // Exactly one comparison, and it must be equality
        let has_eq = (0..expr.child_count())
            .filter_map(|i| expr.child(i))
            .any(|c| c.kind() == "==");
        if !has_eq || expr.child_count() != 3 {
            return false;
        }

        let (Some(left), Some(right)) = (expr.named_child(0), expr.named_child(1)) else {
            return false;
        };
        self.side_is_dunder_name(left) && self.side_is_main_literal(right)
            || self.side_is_dunder_name(right) && self.side_is_main_literal(left)
    }

    fn side_is_dunder_name(&self, node: Node) -> bool {
        node.kind() == "identifier" && node_text(node, self.src) == "__name__"
    }

    fn side_is_main_literal(&self, node: Node) -> bool {
        node.kind() == "string" && self.string_content(node) == "__main__"
    }

    // -------------------------------------------------------------------------
    // Class scope
    // -------------------------------------------------------------------------

    fn extract_class(&mut self, def: Node, decorators: Vec<String>) -> ClassInfo {
        let name = def
            .child_by_field_name("name")
            .map(|n| node_text(n, self.src).to_string())
            .unwrap_or_default();

        let mut class = ClassInfo {
            name,
            line: node_line(def),
            decorators,
            base_classes: self.base_classes(def),
            ..Default::default()
        };

        if let Some(body) = def.child_by_field_name("body") {
            class.docstring = self.block_docstring(body);
            let mut cursor = body.walk();
            for stmt in body.named_children(&mut cursor) {
                self.class_stmt(&mut class, stmt);
            }
        }
        class
    }

    fn base_classes(&self, def: Node) -> Vec<String> {
        let Some(args) = def.child_by_field_name("superclasses") else {
            return Vec::new();
        };
        let mut cursor = args.walk();
        args.named_children(&mut cursor)
            .filter(|c| !matches!(c.kind(), "keyword_argument" | "comment"))
            .map(|c| node_text(c, self.src).to_string())
            .collect()
    }

    fn class_stmt(&mut self, class: &mut ClassInfo, node: Node) {
        match node.kind() {
            "import_statement" => self.collect_import(node),
            "import_from_statement" => self.collect_from_import(node),
            "future_import_statement" => self.collect_future_import(node),
            "function_definition" => self.add_method(class, node, Vec::new()),
            "class_definition" => {
                let nested = self.extract_class(node, Vec::new());
                class.nested_classes.insert(nested.name.clone(), nested);
            }
            "decorated_definition" => {
                let decorators = self.decorator_texts(node);
                match node.child_by_field_name("definition") {
                    Some(def) if def.kind() == "function_definition" => {
                        self.add_method(class, def, decorators);
                    }
                    Some(def) if def.kind() == "class_definition" => {
                        let nested = self.extract_class(def, decorators);
                        class.nested_classes.insert(nested.name.clone(), nested);
                    }
                    _ => tracing::debug!("decorated definition without a definition body"),
                }
            }
            "expression_statement" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() == "assignment" {
                        self.class_assignment(class, child);
                    }
                }
            }
            "comment" => {}
            _ => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.class_stmt(class, child);
                }
            }
        }
    }

    fn add_method(&mut self, class: &mut ClassInfo, def: Node, decorators: Vec<String>) {
        let (method, scratch) = self.extract_function(def, decorators, true);
        for var in scratch.instance_vars {
            upsert_var(&mut class.instance_vars, var);
        }
        for var in scratch.class_vars {
            upsert_var(&mut class.class_vars, var);
        }
        class.methods.insert(method.name.clone(), method);
    }

    fn class_assignment(&mut self, class: &mut ClassInfo, assign: Node) {
        let line = node_line(assign);
        let type_hint = assign
            .child_by_field_name("type")
            .map(|t| node_text(t, self.src).to_string());

        for target in self.assignment_targets(assign) {
            let name = match target {
                Target::Name(name) => {
                    if class.methods.contains_key(&name) || class.nested_classes.contains_key(&name)
                    {
                        continue;
                    }
                    name
                }
                // `cls.x = ...` or `OwnClass.x = ...` in the class body binds
                // the bare attribute; anything else keeps its dotted form
                Target::Attr {
                    base, attr, full, ..
                } => {
                    if base == "cls" || base == class.name {
                        attr
                    } else {
                        full
                    }
                }
            };
            upsert_var(
                &mut class.class_vars,
                VarInfo {
                    name,
                    type_hint: type_hint.clone(),
                    line,
                },
            );
        }

        if let Some(right) = assign.child_by_field_name("right")
            && right.kind() == "assignment"
        {
            self.class_assignment(class, right);
        }
    }

    // -------------------------------------------------------------------------
    // Function scope
    // -------------------------------------------------------------------------

    fn extract_function(
        &mut self,
        def: Node,
        decorators: Vec<String>,
        in_class: bool,
    ) -> (FunctionInfo, FnScratch) {
        let name = def
            .child_by_field_name("name")
            .map(|n| node_text(n, self.src).to_string())
            .unwrap_or_default();
        let params = self.extract_params(def.child_by_field_name("parameters"));
        let method_kind = in_class.then(|| classify_method(&decorators, &params));

        let mut func = FunctionInfo {
            name,
            line: node_line(def),
            decorators,
            return_type: def
                .child_by_field_name("return_type")
                .map(|t| node_text(t, self.src).to_string()),
            params,
            method_kind,
            ..Default::default()
        };

        let mut scratch = FnScratch::default();
        if let Some(body) = def.child_by_field_name("body") {
            func.docstring = self.block_docstring(body);
            let binding = first_param_binding(&func);
            let mut cursor = body.walk();
            for stmt in body.named_children(&mut cursor) {
                self.function_stmt(&mut func, binding.as_ref(), &mut scratch, stmt);
            }
        }
        (func, scratch)
    }

    fn function_stmt(
        &mut self,
        func: &mut FunctionInfo,
        binding: Option<&(MethodKind, String)>,
        scratch: &mut FnScratch,
        node: Node,
    ) {
        match node.kind() {
            "import_statement" => self.collect_import(node),
            "import_from_statement" => self.collect_from_import(node),
            "future_import_statement" => self.collect_future_import(node),
            "function_definition" => {
                let (nested, _) = self.extract_function(node, Vec::new(), false);
                func.nested_functions.insert(nested.name.clone(), nested);
            }
            "class_definition" => {
                let nested = self.extract_class(node, Vec::new());
                func.nested_classes.insert(nested.name.clone(), nested);
            }
            "decorated_definition" => {
                let decorators = self.decorator_texts(node);
                match node.child_by_field_name("definition") {
                    Some(def) if def.kind() == "function_definition" => {
                        let (nested, _) = self.extract_function(def, decorators, false);
                        func.nested_functions.insert(nested.name.clone(), nested);
                    }
                    Some(def) if def.kind() == "class_definition" => {
                        let nested = self.extract_class(def, decorators);
                        func.nested_classes.insert(nested.name.clone(), nested);
                    }
                    _ => tracing::debug!("decorated definition without a definition body"),
                }
            }
            "global_statement" | "nonlocal_statement" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() == "identifier" {
                        scratch
                            .external_names
                            .insert(node_text(child, self.src).to_string());
                    }
                }
            }
            "expression_statement" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if child.kind() == "assignment" {
                        self.function_assignment(func, binding, scratch, child);
                    }
                }
            }
            "comment" => {}
            _ => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.function_stmt(func, binding, scratch, child);
                }
            }
        }
    }

    fn function_assignment(
        &mut self,
        func: &mut FunctionInfo,
        binding: Option<&(MethodKind, String)>,
        scratch: &mut FnScratch,
        assign: Node,
    ) {
        let line = node_line(assign);
        let type_hint = assign
            .child_by_field_name("type")
            .map(|t| node_text(t, self.src).to_string());

        for target in self.assignment_targets(assign) {
            match target {
                Target::Name(name) => {
                    let is_param = func.params.iter().any(|p| p.name == name);
                    let shadows = func.nested_functions.contains_key(&name)
                        || func.nested_classes.contains_key(&name);
                    if is_param || shadows || scratch.external_names.contains(&name) {
                        continue;
                    }
                    upsert_var(
                        &mut func.local_vars,
                        VarInfo {
                            name,
                            type_hint: type_hint.clone(),
                            line,
                        },
                    );
                }
                Target::Attr { base, attr, full } => {
                    let var = VarInfo {
                        name: attr,
                        type_hint: type_hint.clone(),
                        line,
                    };
                    match binding {
                        Some((MethodKind::Instance, first)) if base == *first => {
                            upsert_var(&mut scratch.instance_vars, var);
                        }
                        Some((MethodKind::Class, first)) if base == *first => {
                            upsert_var(&mut scratch.class_vars, var);
                        }
                        _ => {
                            upsert_var(
                                &mut func.local_vars,
                                VarInfo {
                                    name: full,
                                    type_hint: type_hint.clone(),
                                    line,
                                },
                            );
                        }
                    }
                }
            }
        }

        if let Some(right) = assign.child_by_field_name("right")
            && right.kind() == "assignment"
        {
            self.function_assignment(func, binding, scratch, right);
        }
    }

    // -------------------------------------------------------------------------
    // Shared pieces
    // -------------------------------------------------------------------------

    fn assignment_targets(&self, assign: Node) -> Vec<Target> {
        let Some(left) = assign.child_by_field_name("left") else {
            tracing::debug!("assignment without a left-hand side, skipping");
            return Vec::new();
        };
        let mut targets = Vec::new();
        self.push_target(left, &mut targets, true);
        targets
    }

    fn push_target(&self, node: Node, targets: &mut Vec<Target>, allow_unpack: bool) {
        match node.kind() {
            "identifier" => {
                targets.push(Target::Name(node_text(node, self.src).to_string()));
            }
            "attribute" => {
                let base = node.child_by_field_name("object");
                let attr = node.child_by_field_name("attribute");
                match (base, attr) {
                    (Some(base), Some(attr)) if base.kind() == "identifier" => {
                        targets.push(Target::Attr {
                            base: node_text(base, self.src).to_string(),
                            attr: node_text(attr, self.src).to_string(),
                            full: node_text(node, self.src).to_string(),
                        });
                    }
                    // Deeper attribute chains (a.b.c = ...) are not tracked
                    _ => {}
                }
            }
            "pattern_list" | "tuple_pattern" | "list_pattern" if allow_unpack => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    // Only top-level plain names of an unpacking are recorded
                    if child.kind() == "identifier" {
                        self.push_target(child, targets, false);
                    }
                }
            }
            other => {
                tracing::debug!("unclassifiable assignment target '{}', skipping", other);
            }
        }
    }

    fn extract_params(&self, params_node: Option<Node>) -> Vec<ParamInfo> {
        let Some(pnode) = params_node else {
            return Vec::new();
        };
        let mut params = Vec::new();
        let mut section = ParamKind::PositionalOrKeyword;

        let mut cursor = pnode.walk();
        for child in pnode.named_children(&mut cursor) {
            match child.kind() {
                "identifier" => params.push(ParamInfo {
                    name: node_text(child, self.src).to_string(),
                    type_hint: None,
                    default: None,
                    kind: section,
                }),
                "typed_parameter" => {
                    let type_hint = child
                        .child_by_field_name("type")
                        .map(|t| node_text(t, self.src).to_string());
                    match child.child(0) {
                        Some(inner) if inner.kind() == "identifier" => params.push(ParamInfo {
                            name: node_text(inner, self.src).to_string(),
                            type_hint,
                            default: None,
                            kind: section,
                        }),
                        Some(inner) if inner.kind() == "list_splat_pattern" => {
                            if let Some(p) =
                                self.splat_param(inner, type_hint, ParamKind::VariadicPositional)
                            {
                                params.push(p);
                            }
                            section = ParamKind::KeywordOnly;
                        }
                        Some(inner) if inner.kind() == "dictionary_splat_pattern" => {
                            if let Some(p) =
                                self.splat_param(inner, type_hint, ParamKind::VariadicKeyword)
                            {
                                params.push(p);
                            }
                        }
                        _ => tracing::debug!("unsupported typed parameter shape, skipping"),
                    }
                }
                "default_parameter" | "typed_default_parameter" => {
                    let name = child.child_by_field_name("name");
                    match name {
                        Some(n) if n.kind() == "identifier" => params.push(ParamInfo {
                            name: node_text(n, self.src).to_string(),
                            type_hint: child
                                .child_by_field_name("type")
                                .map(|t| node_text(t, self.src).to_string()),
                            default: child
                                .child_by_field_name("value")
                                .map(|v| node_text(v, self.src).to_string()),
                            kind: section,
                        }),
                        _ => tracing::debug!("unsupported default parameter shape, skipping"),
                    }
                }
                "list_splat_pattern" => {
                    if let Some(p) = self.splat_param(child, None, ParamKind::VariadicPositional) {
                        params.push(p);
                    }
                    section = ParamKind::KeywordOnly;
                }
                "dictionary_splat_pattern" => {
                    if let Some(p) = self.splat_param(child, None, ParamKind::VariadicKeyword) {
                        params.push(p);
                    }
                }
                "keyword_separator" => section = ParamKind::KeywordOnly,
                "positional_separator" => {
                    for p in &mut params {
                        if p.kind == ParamKind::PositionalOrKeyword {
                            p.kind = ParamKind::PositionalOnly;
                        }
                    }
                }
                "comment" => {}
                other => tracing::debug!("unsupported parameter kind '{}', skipping", other),
            }
        }
        params
    }

    fn splat_param(
        &self,
        splat: Node,
        type_hint: Option<String>,
        kind: ParamKind,
    ) -> Option<ParamInfo> {
        let mut cursor = splat.walk();
        let name = splat
            .named_children(&mut cursor)
            .find(|c| c.kind() == "identifier")?;
        Some(ParamInfo {
            name: node_text(name, self.src).to_string(),
            type_hint,
            default: None,
            kind,
        })
    }

    fn decorator_texts(&self, decorated: Node) -> Vec<String> {
        let mut cursor = decorated.walk();
        decorated
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "decorator")
            .map(|c| {
                node_text(c, self.src)
                    .trim_start_matches('@')
                    .trim()
                    .to_string()
            })
            .collect()
    }

    /// Docstring of a statement block: a bare string literal as the first
    /// non-comment statement. Implicit concatenations count; f-strings and
    /// bytes literals do not, since their value is not a plain string
    /// constant.
    fn block_docstring(&self, block: Node) -> Option<String> {
        let mut cursor = block.walk();
        let first = block
            .named_children(&mut cursor)
            .find(|c| c.kind() != "comment")?;
        if first.kind() != "expression_statement" || first.named_child_count() != 1 {
            return None;
        }
        let raw = self.literal_string_text(first.named_child(0)?)?;
        Some(clean_docstring(&raw))
    }

    /// Text of a plain string literal or an implicit concatenation of them;
    /// `None` for any other expression, including f-strings and bytes.
    fn literal_string_text(&self, node: Node) -> Option<String> {
        match node.kind() {
            "string" => {
                let mut cursor = node.walk();
                let start = node
                    .named_children(&mut cursor)
                    .find(|c| c.kind() == "string_start")?;
                let prefix = node_text(start, self.src);
                if prefix.contains(['f', 'F', 'b', 'B']) {
                    return None;
                }
                Some(self.string_content(node))
            }
            "concatenated_string" => {
                let mut cursor = node.walk();
                let mut text = String::new();
                for part in node.named_children(&mut cursor) {
                    if part.kind() == "comment" {
                        continue;
                    }
                    text.push_str(&self.literal_string_text(part)?);
                }
                Some(text)
            }
            _ => None,
        }
    }

    fn string_content(&self, string: Node) -> String {
        let mut cursor = string.walk();
        string
            .named_children(&mut cursor)
            .filter(|c| !matches!(c.kind(), "string_start" | "string_end"))
            .map(|c| node_text(c, self.src))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Imports
    // -------------------------------------------------------------------------

    fn collect_import(&mut self, node: Node) {
        let line = node_line(node);
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "dotted_name" => self.imports.push(ImportInfo {
                    name: node_text(child, self.src).to_string(),
                    alias: None,
                    line,
                }),
                "aliased_import" => {
                    if let Some(entry) = self.aliased_entry(child, line) {
                        self.imports.push(entry);
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_from_import(&mut self, node: Node) {
        let Some(module_node) = node.child_by_field_name("module_name") else {
            tracing::debug!("from-import without a module name, skipping");
            return;
        };
        let key = node_text(module_node, self.src).to_string();
        self.collect_from_entries(node, key);
    }

    fn collect_future_import(&mut self, node: Node) {
        self.collect_from_entries(node, "__future__".to_string());
    }

    fn collect_from_entries(&mut self, node: Node, key: String) {
        let line = node_line(node);
        let mut entries = Vec::new();

        let mut cursor = node.walk();
        for name_node in node.children_by_field_name("name", &mut cursor) {
            match name_node.kind() {
                "dotted_name" => entries.push(ImportInfo {
                    name: node_text(name_node, self.src).to_string(),
                    alias: None,
                    line,
                }),
                "aliased_import" => {
                    if let Some(entry) = self.aliased_entry(name_node, line) {
                        entries.push(entry);
                    }
                }
                _ => {}
            }
        }

        let mut cursor = node.walk();
        if node
            .named_children(&mut cursor)
            .any(|c| c.kind() == "wildcard_import")
        {
            entries.push(ImportInfo {
                name: "*".to_string(),
                alias: None,
                line,
            });
        }

        if !entries.is_empty() {
            self.from_imports.entry(key).or_default().extend(entries);
        }
    }

    fn aliased_entry(&self, node: Node, line: usize) -> Option<ImportInfo> {
        let name = node.child_by_field_name("name")?;
        Some(ImportInfo {
            name: node_text(name, self.src).to_string(),
            alias: node
                .child_by_field_name("alias")
                .map(|a| node_text(a, self.src).to_string()),
            line,
        })
    }
}

// =============================================================================
// Method classification
// =============================================================================

/// Decide how a method binds its first parameter.
///
/// Decorators win over the naming convention; without one, the first
/// positional parameter's name decides (`self` instance, `cls` class,
/// anything else or nothing static).
fn classify_method(decorators: &[String], params: &[ParamInfo]) -> MethodKind {
    let has = |needle: &str| decorators.iter().any(|d| d.contains(needle));
    if has("property") || has(".setter") || has(".deleter") {
        return MethodKind::Property;
    }
    if has("classmethod") {
        return MethodKind::Class;
    }
    if has("staticmethod") {
        return MethodKind::Static;
    }
    match first_positional(params) {
        Some("cls") => MethodKind::Class,
        Some("self") => MethodKind::Instance,
        _ => MethodKind::Static,
    }
}

fn first_positional(params: &[ParamInfo]) -> Option<&str> {
    params
        .iter()
        .find(|p| {
            matches!(
                p.kind,
                ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword
            )
        })
        .map(|p| p.name.as_str())
}

/// First-parameter binding used for instance/class var detection, present only
/// for instance methods and classmethods.
fn first_param_binding(func: &FunctionInfo) -> Option<(MethodKind, String)> {
    let kind = func.method_kind?;
    if !matches!(kind, MethodKind::Instance | MethodKind::Class) {
        return None;
    }
    let first = first_positional(&func.params)?;
    Some((kind, first.to_string()))
}

// =============================================================================
// Tests
// =============================================================================
