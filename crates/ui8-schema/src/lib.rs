//! # ui8-schema
//!
//! JSON Schema generation, validation and inference for ui8kit.
//!
//! This crate provides:
//! - `SchemaRegistry`: the schemas of the registry manifest, published items,
//!   the index and the project config, with validation via `jsonschema`
//! - [`infer`]: schema inference from `*.examples.tsx` usage files, with the
//!   generic content generator and the hero props generator
//!
//! ## Architecture
//!
//! Manifest types live in `ui8-core` with `#[derive(JsonSchema)]`. This crate
//! imports those types and provides the registry, validation and export layer.
//! `ui8-registry` validates manifests and items through it before any write.

pub mod error;
pub mod infer;
pub mod registry;

pub use error::SchemaError;
pub use infer::{
    BlockAggregate, ContentSchemaGenerator, GeneratedSchema, HeroSchemaGenerator,
    InferredSchema, Primitive, VariantAggregate, infer_schema, merge,
};
pub use registry::SchemaRegistry;
