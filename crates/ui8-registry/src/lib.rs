//! # ui8-registry
//!
//! The registry pipeline for ui8kit:
//! - [`scanner`]: component directories to a `registry.json` manifest
//! - [`resolver`]: npm dependencies of each manifest item
//! - [`build`]: manifest to published item documents, `index.json` and schemas
//! - [`source`] and [`install`]: fetching published items and placing their
//!   files into a consumer project (`ui8kit add`)

pub mod build;
pub mod install;
pub mod resolver;
pub mod scanner;
pub mod source;
pub mod walk;

mod error;
mod http;

pub use build::{BuildOptions, BuildReport, build_registry};
pub use error::{BuildError, SourceError};
pub use install::{FileAction, PlannedFile, apply_install, plan_install};
pub use resolver::{apply_dependencies, resolve_dependencies};
pub use scanner::{ScanOptions, scan_directory, scan_project};
pub use source::{RETRY_ATTEMPTS, RegistrySource, with_retry};
