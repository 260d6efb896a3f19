//! Discovery of `*.examples.*` files and extraction of usage observations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};
use ui8_parser::{
    JsxAttrValue, JsxUsage, Literal, collect_content_bindings, detect_language, find_jsx_usages,
    parse_source, resolve_binding,
};

use super::aggregate::BlockAggregate;
use super::shape::{InferredSchema, Primitive, infer_schema};

/// Marker between the block name and the extension of an example file.
const EXAMPLES_MARKER: &str = ".examples.";

const EXAMPLE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

/// Every example file below `root`, sorted by path. Missing roots yield nothing.
pub(crate) fn example_files(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        debug!(root = %root.display(), "examples directory missing");
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .standard_filters(false)
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(ignore::DirEntry::into_path)
        .filter(|path| block_name(path).is_some())
        .collect();
    files.sort();
    files
}

/// `Hero.examples.tsx` -> `Hero`.
pub(crate) fn block_name(path: &Path) -> Option<&str> {
    let file_name = path.file_name()?.to_str()?;
    let (block, ext) = file_name.split_once(EXAMPLES_MARKER)?;
    (!block.is_empty() && EXAMPLE_EXTENSIONS.contains(&ext)).then_some(block)
}

/// Read `path` and fold every usage of `component` into `block`.
///
/// Unreadable files are logged and contribute nothing.
pub(crate) fn observe_file(
    path: &Path,
    component: &str,
    fallback_variant: &str,
    block: &mut BlockAggregate,
) {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read example file");
            return;
        }
    };
    observe_source(&source, &path.to_string_lossy(), component, fallback_variant, block);
}

/// Fold every usage of `component` in `source` into `block`.
pub(crate) fn observe_source(
    source: &str,
    path: &str,
    component: &str,
    fallback_variant: &str,
    block: &mut BlockAggregate,
) {
    let Some(lang) = detect_language(path) else {
        debug!(path, "not a script file, skipping");
        return;
    };
    let tree = parse_source(source, lang);
    let root = tree.root();
    let bindings = collect_content_bindings(&root);

    for usage in find_jsx_usages(&root, component) {
        let Some(content) = resolve_content(&usage, &bindings) else {
            debug!(path, component, offset = usage.offset, "no resolvable content, skipping usage");
            continue;
        };
        let variant = usage.string_attribute("variant").unwrap_or(fallback_variant);
        block
            .variant_mut(variant)
            .observe(&content, &block_props(&usage));
    }
}

/// Top-level content properties of a usage, if its `content` attribute is an
/// object literal or an identifier bound to one.
fn resolve_content(
    usage: &JsxUsage,
    bindings: &[ui8_parser::ContentBinding],
) -> Option<BTreeMap<String, InferredSchema>> {
    let literal = match usage.attribute("content")? {
        JsxAttrValue::Expr(lit @ Literal::Object(_)) => lit,
        JsxAttrValue::Expr(Literal::Identifier(name)) => {
            &resolve_binding(bindings, name, usage.offset)?.value
        }
        _ => return None,
    };
    match infer_schema(literal) {
        InferredSchema::Object { properties, .. } => Some(properties),
        _ => None,
    }
}

/// Shapes of the attributes other than `variant` and `content`.
fn block_props(usage: &JsxUsage) -> BTreeMap<String, InferredSchema> {
    usage
        .attributes
        .iter()
        .filter(|a| a.name != "variant" && a.name != "content")
        .map(|a| {
            let shape = match &a.value {
                JsxAttrValue::String(_) => InferredSchema::Primitive(Primitive::String),
                JsxAttrValue::Flag => InferredSchema::Primitive(Primitive::Boolean),
                JsxAttrValue::Expr(lit) => infer_schema(lit),
                JsxAttrValue::Element => InferredSchema::Unknown,
            };
            (a.name.clone(), shape)
        })
        .collect()
}
