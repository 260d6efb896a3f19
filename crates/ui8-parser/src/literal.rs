//! Typed model of the literal expressions found in example files.
//!
//! The schema inference engine only cares about the *shape* of object and
//! array literals. [`Literal::from_node`] converts a syntax node into a tagged
//! variant per node kind so the engine can match exhaustively instead of
//! poking at raw tree-sitter kinds.

use ast_grep_core::Node;

use crate::parser::{first_named_child, unquote};

/// A literal expression, or a marker for an expression the engine does not model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    String(String),
    /// Source text of the number, sign included.
    Number(String),
    Boolean(bool),
    Null,
    Array(Vec<Literal>),
    Object(Vec<Property>),
    /// A bare identifier reference (`content={heroContent}`).
    Identifier(String),
    /// Any other expression kind (calls, JSX, arrow functions, spreads, ...).
    Unsupported(String),
}

/// One `key: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: String,
    pub value: Literal,
}

impl Literal {
    /// Convert an expression node into a [`Literal`].
    ///
    /// Parentheses, `as` casts, `satisfies` clauses and non-null assertions are
    /// transparent. Template strings are strings; `-1` is a number.
    pub fn from_node<D: ast_grep_core::Doc>(node: &Node<D>) -> Self {
        let kind = node.kind();
        match kind.as_ref() {
            "string" | "template_string" => Self::String(unquote(&node.text())),
            "number" => Self::Number(node.text().to_string()),
            "true" => Self::Boolean(true),
            "false" => Self::Boolean(false),
            "null" => Self::Null,
            "identifier" => Self::Identifier(node.text().to_string()),
            "array" => Self::Array(
                node.children()
                    .filter(|c| c.is_named() && c.kind().as_ref() != "comment")
                    .map(|c| Self::from_node(&c))
                    .collect(),
            ),
            "object" => Self::Object(object_properties(node)),
            "parenthesized_expression"
            | "as_expression"
            | "satisfies_expression"
            | "non_null_expression" => first_named_child(node).map_or_else(
                || Self::Unsupported(kind.to_string()),
                |inner| Self::from_node(&inner),
            ),
            "unary_expression" => {
                signed_number(node).unwrap_or_else(|| Self::Unsupported(kind.to_string()))
            }
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// The string value, if this is a string literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }
}

fn object_properties<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<Property> {
    let mut props = Vec::new();
    for child in node.children() {
        let kind = child.kind();
        match kind.as_ref() {
            "pair" => {
                let (Some(key), Some(value)) = (child.field("key"), child.field("value")) else {
                    continue;
                };
                props.push(Property {
                    key: property_key(&key),
                    value: Literal::from_node(&value),
                });
            }
            "shorthand_property_identifier" => {
                let name = child.text().to_string();
                props.push(Property {
                    key: name.clone(),
                    value: Literal::Identifier(name),
                });
            }
            "method_definition" => {
                if let Some(name) = child.field("name") {
                    props.push(Property {
                        key: property_key(&name),
                        value: Literal::Unsupported("method_definition".into()),
                    });
                }
            }
            // Spreads contribute keys we cannot see.
            _ => {}
        }
    }
    props
}

fn property_key<D: ast_grep_core::Doc>(key: &Node<D>) -> String {
    match key.kind().as_ref() {
        "string" => unquote(&key.text()),
        _ => key.text().to_string(),
    }
}

fn signed_number<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<Literal> {
    let argument = node.field("argument")?;
    if argument.kind().as_ref() != "number" {
        return None;
    }
    let text = node.text();
    (text.starts_with('-') || text.starts_with('+'))
        .then(|| Literal::Number(text.split_whitespace().collect::<String>()))
}
