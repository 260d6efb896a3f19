//! Cross-cutting error types for ui8kit.
//!
//! Domain-specific errors (`ParserError`, `SchemaError`, `BuildError`) live in
//! their respective crates.

use thiserror::Error;

/// Errors that can be raised by any ui8kit crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A component kind string did not match any known kind.
    #[error("Unknown component kind: {0}")]
    UnknownKind(String),
}
