//! Per-variant and per-block accumulation of observed examples.

use std::collections::BTreeMap;

use serde_json::Value;

use super::shape::{InferredSchema, merge, object_schema};

/// Everything observed for one variant of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantAggregate {
    pub name: String,
    /// Merged shape of each top-level content field.
    pub content: BTreeMap<String, InferredSchema>,
    /// How many examples carried each content field.
    pub field_counts: BTreeMap<String, usize>,
    pub content_example_count: usize,
    /// Merged shapes of block-level props (attributes other than
    /// `variant` and `content`).
    pub props: BTreeMap<String, InferredSchema>,
}

impl VariantAggregate {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: BTreeMap::new(),
            field_counts: BTreeMap::new(),
            content_example_count: 0,
            props: BTreeMap::new(),
        }
    }

    /// Fold one example into the aggregate.
    pub fn observe(
        &mut self,
        content: &BTreeMap<String, InferredSchema>,
        props: &BTreeMap<String, InferredSchema>,
    ) {
        merge_into(&mut self.content, content);
        for key in content.keys() {
            *self.field_counts.entry(key.clone()).or_insert(0) += 1;
        }
        self.content_example_count += 1;
        merge_into(&mut self.props, props);
    }

    /// Content fields present in every observed example.
    pub fn required(&self) -> impl Iterator<Item = &String> {
        self.field_counts
            .iter()
            .filter(|(_, count)| **count == self.content_example_count)
            .map(|(key, _)| key)
    }

    /// The content object schema of this variant.
    #[must_use]
    pub fn content_schema(&self) -> Value {
        object_schema(&self.content, self.required())
    }
}

fn merge_into(
    target: &mut BTreeMap<String, InferredSchema>,
    source: &BTreeMap<String, InferredSchema>,
) {
    for (key, shape) in source {
        let merged = match target.get(key) {
            Some(existing) => merge(existing, shape),
            None => shape.clone(),
        };
        target.insert(key.clone(), merged);
    }
}

/// Variants of one block in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockAggregate {
    pub name: String,
    pub variants: Vec<VariantAggregate>,
}

impl BlockAggregate {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    /// The aggregate for `variant`, created on first sight.
    pub fn variant_mut(&mut self, variant: &str) -> &mut VariantAggregate {
        if let Some(i) = self.variants.iter().position(|v| v.name == variant) {
            &mut self.variants[i]
        } else {
            self.variants.push(VariantAggregate::new(variant));
            let last = self.variants.len() - 1;
            &mut self.variants[last]
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
