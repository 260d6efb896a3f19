//! Inferred value shapes and the merge lattice over them.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value, json};
use ui8_parser::Literal;

/// JSON primitive types an example literal can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Null,
}

impl Primitive {
    #[must_use]
    pub const fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

/// Shape inferred from one or more example values.
///
/// `Unknown` is the top of the lattice: it renders as the unconstrained `{}`
/// schema and absorbs everything it is merged with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferredSchema {
    Unknown,
    Primitive(Primitive),
    /// `None` when every observed array was empty.
    Array(Option<Box<InferredSchema>>),
    Object {
        properties: BTreeMap<String, InferredSchema>,
        required: BTreeSet<String>,
    },
}

impl InferredSchema {
    /// Property map of an object shape.
    #[must_use]
    pub const fn properties(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }

    /// Render as a draft-07 JSON Schema fragment.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Unknown => json!({}),
            Self::Primitive(p) => json!({ "type": p.json_type() }),
            Self::Array(items) => {
                let mut schema = Map::new();
                schema.insert("type".into(), json!("array"));
                if let Some(items) = items {
                    schema.insert("items".into(), items.to_json());
                }
                Value::Object(schema)
            }
            Self::Object {
                properties,
                required,
            } => object_schema(properties, required.iter()),
        }
    }
}

/// `{type: object, properties, required}` with properties in key order.
pub(crate) fn object_schema<'a>(
    properties: &BTreeMap<String, InferredSchema>,
    required: impl IntoIterator<Item = &'a String>,
) -> Value {
    let props: Map<String, Value> = properties
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect();
    json!({
        "type": "object",
        "properties": props,
        "required": required.into_iter().collect::<Vec<_>>(),
    })
}

/// Infer the shape of a single literal.
///
/// Every key of an object literal is required; array items are merged into
/// one item shape. Identifiers and unmodelled expressions are `Unknown`.
#[must_use]
pub fn infer_schema(literal: &Literal) -> InferredSchema {
    match literal {
        Literal::String(_) => InferredSchema::Primitive(Primitive::String),
        Literal::Number(_) => InferredSchema::Primitive(Primitive::Number),
        Literal::Boolean(_) => InferredSchema::Primitive(Primitive::Boolean),
        Literal::Null => InferredSchema::Primitive(Primitive::Null),
        Literal::Array(items) => InferredSchema::Array(
            items
                .iter()
                .map(infer_schema)
                .reduce(|a, b| merge(&a, &b))
                .map(Box::new),
        ),
        Literal::Object(props) => {
            let mut properties: BTreeMap<String, InferredSchema> = BTreeMap::new();
            for prop in props {
                let shape = infer_schema(&prop.value);
                // Duplicate keys: last write wins, as at runtime.
                properties.insert(prop.key.clone(), shape);
            }
            let required = properties.keys().cloned().collect();
            InferredSchema::Object {
                properties,
                required,
            }
        }
        Literal::Identifier(_) | Literal::Unsupported(_) => InferredSchema::Unknown,
    }
}

/// Least upper bound of two shapes. Commutative.
#[must_use]
pub fn merge(a: &InferredSchema, b: &InferredSchema) -> InferredSchema {
    use InferredSchema::{Array, Object, Primitive, Unknown};

    match (a, b) {
        (Primitive(x), Primitive(y)) if x == y => Primitive(*x),
        (Array(x), Array(y)) => Array(match (x, y) {
            (None, None) => None,
            (Some(s), None) | (None, Some(s)) => Some(s.clone()),
            (Some(x), Some(y)) => Some(Box::new(merge(x, y))),
        }),
        (
            Object {
                properties: pa,
                required: ra,
            },
            Object {
                properties: pb,
                required: rb,
            },
        ) => {
            let mut properties = pa.clone();
            for (key, shape) in pb {
                let merged = match properties.get(key) {
                    Some(existing) => merge(existing, shape),
                    None => shape.clone(),
                };
                properties.insert(key.clone(), merged);
            }
            Object {
                properties,
                required: ra.intersection(rb).cloned().collect(),
            }
        }
        _ => Unknown,
    }
}
