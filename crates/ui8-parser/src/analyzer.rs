//! Import/export analysis of a single component source file.

use std::path::Path;

use ast_grep_core::Node;
use serde::Serialize;

use crate::dependency::is_local_specifier;
use crate::error::ParserError;
use crate::parser::{detect_language, has_syntax_errors, parse_source, unquote};

/// What the scanner needs to know about one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceAnalysis {
    /// Non-local import specifiers, first-sight order, deduplicated.
    pub dependencies: Vec<String>,
    pub description: Option<String>,
    pub has_exports: bool,
}

/// Analyze `source`, choosing the grammar from `path`'s extension.
///
/// # Errors
///
/// `UnsupportedLanguage` for non-JS/TS extensions, `ParseFailed` if the
/// tree contains error nodes.
pub fn analyze_source(source: &str, path: &str) -> Result<SourceAnalysis, ParserError> {
    let lang = detect_language(path)
        .ok_or_else(|| ParserError::UnsupportedLanguage(path.to_string()))?;
    let tree = parse_source(source, lang);
    let root = tree.root();
    if has_syntax_errors(&root) {
        return Err(ParserError::ParseFailed {
            path: path.to_string(),
            message: "syntax errors in source".to_string(),
        });
    }

    let mut analysis = SourceAnalysis::default();
    walk(&root, &mut analysis);

    if analysis.description.is_none() {
        analysis.description = leading_line_comment(&root);
    }
    Ok(analysis)
}

/// Read and analyze a file; `display` names it in errors.
///
/// # Errors
///
/// Propagates I/O failures and the errors of [`analyze_source`].
pub fn analyze_file(path: &Path, display: &str) -> Result<SourceAnalysis, ParserError> {
    let source = std::fs::read_to_string(path)?;
    analyze_source(&source, display)
}

fn walk<D: ast_grep_core::Doc>(node: &Node<D>, out: &mut SourceAnalysis) {
    match node.kind().as_ref() {
        "import_statement" => {
            if let Some(source) = node.field("source") {
                let specifier = unquote(&source.text());
                if !specifier.is_empty()
                    && !is_local_specifier(&specifier)
                    && !out.dependencies.contains(&specifier)
                {
                    out.dependencies.push(specifier);
                }
            }
            return;
        }
        "export_statement" => out.has_exports = true,
        "comment" => {
            if out.description.is_none() {
                let text = node.text();
                if text.starts_with("/**") {
                    let doc = parse_jsdoc_text(&text);
                    if !doc.is_empty() {
                        out.description = Some(doc);
                    }
                }
            }
            return;
        }
        _ => {}
    }
    for child in node.children() {
        walk(&child, out);
    }
}

fn leading_line_comment<D: ast_grep_core::Doc>(root: &Node<D>) -> Option<String> {
    let first = root.children().next()?;
    if first.kind().as_ref() != "comment" {
        return None;
    }
    let text = first.text();
    let body = text.strip_prefix("//")?.trim();
    (!body.is_empty()).then(|| body.to_string())
}

fn parse_jsdoc_text(text: &str) -> String {
    let text = text.trim_start_matches("/**").trim_end_matches("*/").trim();
    text.lines()
        .map(|line| {
            let trimmed = line.trim();
            let stripped = trimmed.trim_start_matches('*');
            stripped.strip_prefix(' ').unwrap_or(stripped)
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
