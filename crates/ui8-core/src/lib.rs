//! # ui8-core
//!
//! Core types and error types for the ui8kit registry toolchain.
//!
//! This crate provides the foundational types shared across all ui8kit crates:
//! - `ComponentKind` with its manifest spelling and output folder map
//! - Registry manifest types (`Registry`, `RegistryItem`, `ComponentFile`)
//! - The published per-item document shape used for strict validation
//! - The `index.json` projection written by the build
//! - Path-segment checks for names and install targets
//! - Cross-cutting error types

pub mod errors;
pub mod kind;
pub mod paths;
pub mod registry;

pub use errors::CoreError;
pub use kind::ComponentKind;
pub use paths::{is_plain_name, is_relative_target};
pub use registry::{
    ComponentFile, INDEX_SCHEMA_URL, IndexEntry, PublishedFile, PublishedItem,
    REGISTRY_ITEM_SCHEMA_URL, REGISTRY_SCHEMA_URL, Registry, RegistryIndex, RegistryItem,
};
