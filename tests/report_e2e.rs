//! End-to-end report tests: file on disk in, serialized JSON out.

use std::path::Path;

use pyskel::cli::analyze_to_report;

fn write_fixture(dir: &tempfile::TempDir, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, source).unwrap();
    path
}

fn report_json(path: &Path) -> serde_json::Value {
    serde_json::to_value(analyze_to_report(path)).unwrap()
}

#[test]
fn full_module_report() {
    let source = r#""""Top-level docstring."""
import os
import numpy as np
from typing import List, Optional
from . import sibling

MAX_RETRIES: int = 3
debug_mode = False


@register
class Widget(Base):
    """A widget."""

    kind = "basic"

    def __init__(self, size: int = 1):
        self.size = size
        self._cache = None

    @classmethod
    def default(cls):
        cls.registry = []
        return cls()

    @staticmethod
    def helper():
        scratch = 0
        return scratch


def main(argv: Optional[List[str]] = None) -> int:
    parsed = argv or []

    def validate(item):
        ok = True
        return ok

    return len(parsed)


if __name__ == "__main__":
    main()
"#;

    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "widget.py", source);
    let json = report_json(&path);

    assert_eq!(json["module_docstring"], "Top-level docstring.");
    assert_eq!(json["has_main_block"], true);
    assert!(json.get("analysis_error").is_none());
    assert!(
        Path::new(json["filepath"].as_str().unwrap()).is_absolute(),
        "filepath must be absolute"
    );

    let imports = json["imports"].as_array().unwrap();
    assert_eq!(imports.len(), 2);
    assert_eq!(imports[0]["name"], "os");
    assert_eq!(imports[1]["name"], "numpy");
    assert_eq!(imports[1]["alias"], "np");

    assert_eq!(json["from_imports"]["typing"][0]["name"], "List");
    assert_eq!(json["from_imports"]["typing"][1]["name"], "Optional");
    assert_eq!(json["from_imports"]["."][0]["name"], "sibling");

    assert_eq!(
        json["constants"],
        serde_json::json!([{"name": "MAX_RETRIES", "type": "int", "line": 7}])
    );
    assert_eq!(
        json["global_vars"],
        serde_json::json!([{"name": "debug_mode", "line": 8}])
    );

    let widget = &json["classes"]["Widget"];
    assert_eq!(widget["docstring"], "A widget.");
    assert_eq!(widget["decorators"], serde_json::json!(["register"]));
    assert_eq!(widget["base_classes"], serde_json::json!(["Base"]));
    let class_var_names: Vec<&str> = widget["class_vars"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(class_var_names, vec!["kind", "registry"]);
    let instance_var_names: Vec<&str> = widget["instance_vars"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap())
        .collect();
    assert_eq!(instance_var_names, vec!["size", "_cache"]);

    let init = &widget["methods"]["__init__"];
    assert_eq!(init["params"][1]["name"], "size");
    assert_eq!(init["params"][1]["default"], "1");
    let helper = &widget["methods"]["helper"];
    assert_eq!(helper["local_vars"][0]["name"], "scratch");

    let main_fn = &json["functions"]["main"];
    assert_eq!(main_fn["return_type"], "int");
    assert_eq!(main_fn["local_vars"][0]["name"], "parsed");
    let validate = &main_fn["nested_functions"]["validate"];
    assert_eq!(validate["local_vars"][0]["name"], "ok");
    // Nested definitions never leak to module scope
    assert!(json["functions"].get("validate").is_none());
}

#[test]
fn syntax_error_report_is_minimal() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "broken.py", "def broken(:\n    pass\n");
    let json = report_json(&path);

    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert!(obj.contains_key("filepath"));
    let error = obj["analysis_error"].as_str().unwrap();
    assert!(!error.is_empty());
    assert!(error.contains("Syntax error"));
    assert!(error.contains("line"));
}

#[test]
fn missing_file_report_is_minimal() {
    let json = report_json(Path::new("/nonexistent/nowhere.py"));
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert!(obj["analysis_error"]
        .as_str()
        .unwrap()
        .contains("File not found"));
}

#[test]
fn identical_source_yields_byte_identical_output() {
    let source = "import os\nX = 1\ny = 2\ndef f(a, *args, **kwargs):\n    pass\n";
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "same.py", source);

    let first = analyze_to_report(&path).to_json(true).unwrap();
    let second = analyze_to_report(&path).to_json(true).unwrap();
    assert_eq!(first, second);
}

#[test]
fn defaults_never_attach_to_variadic_params() {
    let source = "def f(a=1, *args, b=2, **kwargs):\n    pass\n";
    let dir = tempfile::tempdir().unwrap();
    let path = write_fixture(&dir, "params.py", source);
    let json = report_json(&path);

    for param in json["functions"]["f"]["params"].as_array().unwrap() {
        let kind = param["kind"].as_str().unwrap();
        if kind == "variadic-positional" || kind == "variadic-keyword" {
            assert!(param.get("default").is_none());
        }
    }
}
