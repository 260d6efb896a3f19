//! ast-grep wrapper and language detection from file extensions.

use std::path::Path;

use ast_grep_core::Node;
use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::SupportLang;

/// The concrete AST tree type returned by `parse_source`.
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// Extensions the scanner treats as component sources.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs"];

/// Detect the grammar from a file path extension.
///
/// Returns `None` for anything that is not a TypeScript or JavaScript source.
#[must_use]
pub fn detect_language(file_path: &str) -> Option<SupportLang> {
    let ext = file_path.rsplit('.').next()?;
    match ext {
        "ts" | "mts" | "cts" => Some(SupportLang::TypeScript),
        "tsx" => Some(SupportLang::Tsx),
        "js" | "jsx" | "mjs" | "cjs" => Some(SupportLang::JavaScript),
        _ => None,
    }
}

/// Whether `path` has one of the [`SOURCE_EXTENSIONS`].
#[must_use]
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Parse source code into an ast-grep tree for the given language.
#[must_use]
pub fn parse_source(source: &str, lang: SupportLang) -> AstTree {
    use ast_grep_language::LanguageExt;
    lang.ast_grep(source)
}

/// Whether tree-sitter had to recover from malformed input anywhere below `node`.
pub fn has_syntax_errors<D: ast_grep_core::Doc>(node: &Node<D>) -> bool {
    if node.kind().as_ref() == "ERROR" {
        return true;
    }
    node.children().any(|c| has_syntax_errors(&c))
}

/// First named, non-comment child of `node`.
pub(crate) fn first_named_child<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Option<Node<'r, D>> {
    node.children()
        .find(|c| c.is_named() && c.kind().as_ref() != "comment")
}

/// Strip one pair of matching quotes (`'`, `"` or backticks) from a literal.
pub(crate) fn unquote(text: &str) -> String {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && matches!(first, b'"' | b'\'' | b'`') {
            return text[1..text.len() - 1].to_string();
        }
    }
    text.to_string()
}
