//! # ui8-parser
//!
//! ast-grep-based analysis of TypeScript, TSX and JavaScript sources for the
//! ui8kit registry toolchain.
//!
//! - [`analyzer`]: one-pass import/export/description walk used by the scanner
//!   and the dependency resolver
//! - [`dependency`]: the `is_external_dependency` predicate and package-name
//!   normalization
//! - [`literal`]: a typed model of object/array/primitive literals
//! - [`jsx`]: top-level object bindings and JSX usages of a named component,
//!   mined by the schema inference engine

pub mod analyzer;
pub mod dependency;
pub mod error;
pub mod jsx;
pub mod literal;
pub mod parser;

pub use analyzer::{SourceAnalysis, analyze_file, analyze_source};
pub use dependency::{external_dependencies, is_external_dependency, package_name};
pub use error::ParserError;
pub use jsx::{
    ContentBinding, JsxAttrValue, JsxAttribute, JsxUsage, collect_content_bindings, find_jsx_usages,
    resolve_binding,
};
pub use literal::{Literal, Property};
pub use parser::{AstTree, detect_language, is_source_file, parse_source};
