//! Tree Parser
//!
//! Thin wrapper around tree-sitter with the Python grammar. Turns source text
//! into a concrete syntax tree or a [`ParseFailure`] carrying the position of
//! the first offending node. A failure here is a hard stop for the whole
//! analysis; the extraction engine never sees a partial tree.

use tree_sitter::{Node, Tree};

use crate::types::{ParseFailure, Result, SkelError};

/// Create a tree-sitter parser configured for Python.
fn create_ts_parser(path: &str) -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| {
            SkelError::Parse(ParseFailure::from_message(
                path,
                format!("Failed to set Python language: {}", e),
            ))
        })?;
    Ok(parser)
}

/// Parse Python source text into a syntax tree.
///
/// Returns a [`SkelError::Parse`] if the parser produces no tree or if the
/// tree contains any error or missing node. The failure message includes the
/// offending source line when one can be recovered.
pub fn parse_python(path: &str, source: &str) -> Result<Tree> {
    let mut parser = create_ts_parser(path)?;

    let tree = parser.parse(source, None).ok_or_else(|| {
        SkelError::Parse(ParseFailure::from_message(path, "parser produced no tree"))
    })?;

    if let Some(node) = first_error_node(tree.root_node()) {
        let start = node.start_position();
        let line = start.row + 1;
        let context = source
            .lines()
            .nth(start.row)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or("<source line unavailable>");
        let detail = if node.is_missing() {
            format!("missing {} near: {}", node.kind(), context)
        } else {
            format!("unexpected token near: {}", context)
        };
        return Err(SkelError::Parse(ParseFailure::at(
            path,
            detail,
            line,
            start.column,
        )));
    }

    Ok(tree)
}

/// Depth-first search for the first ERROR or missing node in the tree.
fn first_error_node(root: Node) -> Option<Node> {
    if !root.has_error() {
        return None;
    }

    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }

        // Descend only into subtrees that actually contain the error.
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return Some(root);
            }
        }
    }
}

/// Extract the source text covered by a node.
///
/// Returns an empty string if the slice is not valid UTF-8 (with debug
/// logging), which the engine treats as a skippable anomaly.
#[inline]
pub fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or_else(|e| {
        tracing::debug!(
            "UTF-8 extraction failed at {}:{}-{}:{}: {}",
            node.start_position().row + 1,
            node.start_position().column,
            node.end_position().row + 1,
            node.end_position().column,
            e
        );
        ""
    })
}

/// 1-based source line of a node.
#[inline]
pub fn node_line(node: Node) -> usize {
    node.start_position().row + 1
}
