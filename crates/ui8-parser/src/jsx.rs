//! Top-level object bindings and JSX usages of a named component.
//!
//! Example files declare `const content = { ... }` objects and render the
//! block under test as `<Hero variant="split" content={content} />`. This
//! module extracts both so the inference engine can pair them up by source
//! position.

use ast_grep_core::Node;

use crate::literal::Literal;
use crate::parser::{first_named_child, unquote};

/// A top-level `const|let|var <name> = { ... }` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBinding {
    pub name: String,
    /// Byte offset of the declaration statement.
    pub offset: usize,
    pub value: Literal,
}

/// The value side of a JSX attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsxAttrValue {
    /// `<Hero fullWidth />`
    Flag,
    /// `variant="split"`
    String(String),
    /// `content={...}`
    Expr(Literal),
    /// `icon=<Star />`
    Element,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxAttribute {
    pub name: String,
    pub value: JsxAttrValue,
}

/// One `<Tag ...>` or `<Tag ... />` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsxUsage {
    pub tag: String,
    /// Byte offset of the opening (or self-closing) element.
    pub offset: usize,
    pub attributes: Vec<JsxAttribute>,
}

impl JsxUsage {
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&JsxAttrValue> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    /// A string-literal attribute value, written either as `a="x"` or `a={"x"}`.
    #[must_use]
    pub fn string_attribute(&self, name: &str) -> Option<&str> {
        match self.attribute(name)? {
            JsxAttrValue::String(s) => Some(s),
            JsxAttrValue::Expr(lit) => lit.as_str(),
            JsxAttrValue::Flag | JsxAttrValue::Element => None,
        }
    }
}

/// Collect every top-level declaration whose initializer is an object literal.
///
/// Exported declarations count. Declarations nested in functions or blocks do
/// not: the engine pairs usages with bindings by position, not by scope.
pub fn collect_content_bindings<D: ast_grep_core::Doc>(root: &Node<D>) -> Vec<ContentBinding> {
    let mut out = Vec::new();
    for stmt in root.children() {
        let kind = stmt.kind();
        match kind.as_ref() {
            "lexical_declaration" | "variable_declaration" => {
                collect_from_declaration(&stmt, &stmt, &mut out);
            }
            "export_statement" => {
                for child in stmt.children() {
                    let ck = child.kind();
                    if ck.as_ref() == "lexical_declaration" || ck.as_ref() == "variable_declaration" {
                        collect_from_declaration(&child, &stmt, &mut out);
                    }
                }
            }
            _ => {}
        }
    }
    out
}

fn collect_from_declaration<D: ast_grep_core::Doc>(
    decl: &Node<D>,
    anchor: &Node<D>,
    out: &mut Vec<ContentBinding>,
) {
    for declarator in decl.children() {
        if declarator.kind().as_ref() != "variable_declarator" {
            continue;
        }
        let Some(name) = declarator.field("name") else {
            continue;
        };
        if name.kind().as_ref() != "identifier" {
            continue;
        }
        let Some(value) = declarator.field("value") else {
            continue;
        };
        let value = Literal::from_node(&value);
        if value.is_object() {
            out.push(ContentBinding {
                name: name.text().to_string(),
                offset: anchor.range().start,
                value,
            });
        }
    }
}

/// The binding an identifier-valued `content={...}` refers to.
///
/// Picks the nearest binding declared before `before_offset` whose name is
/// either `content` or `identifier`. This is positional, not lexical: a later
/// declaration or one in a sibling function is never considered.
#[must_use]
pub fn resolve_binding<'a>(
    bindings: &'a [ContentBinding],
    identifier: &str,
    before_offset: usize,
) -> Option<&'a ContentBinding> {
    bindings
        .iter()
        .filter(|b| b.offset < before_offset && (b.name == "content" || b.name == identifier))
        .max_by_key(|b| b.offset)
}

/// Find every JSX element whose tag text equals `component`, in source order.
pub fn find_jsx_usages<D: ast_grep_core::Doc>(root: &Node<D>, component: &str) -> Vec<JsxUsage> {
    let mut out = Vec::new();
    collect_usages(root, component, &mut out);
    out
}

fn collect_usages<D: ast_grep_core::Doc>(node: &Node<D>, component: &str, out: &mut Vec<JsxUsage>) {
    let kind = node.kind();
    let k = kind.as_ref();
    if (k == "jsx_opening_element" || k == "jsx_self_closing_element")
        && tag_name(node).as_deref() == Some(component)
    {
        out.push(JsxUsage {
            tag: component.to_string(),
            offset: node.range().start,
            attributes: attributes(node),
        });
    }
    for child in node.children() {
        collect_usages(&child, component, out);
    }
}

fn tag_name<D: ast_grep_core::Doc>(element: &Node<D>) -> Option<String> {
    element
        .children()
        .find(|c| {
            matches!(
                c.kind().as_ref(),
                "identifier" | "member_expression" | "nested_identifier" | "jsx_namespace_name"
            )
        })
        .map(|c| c.text().to_string())
}

fn attributes<D: ast_grep_core::Doc>(element: &Node<D>) -> Vec<JsxAttribute> {
    element
        .children()
        .filter(|c| c.kind().as_ref() == "jsx_attribute")
        .filter_map(|attr| {
            let mut named = attr
                .children()
                .filter(|c| c.is_named() && c.kind().as_ref() != "comment");
            let name = named.next()?.text().to_string();
            let value = named.next().map_or(JsxAttrValue::Flag, |v| attribute_value(&v));
            Some(JsxAttribute { name, value })
        })
        .collect()
}

fn attribute_value<D: ast_grep_core::Doc>(value: &Node<D>) -> JsxAttrValue {
    match value.kind().as_ref() {
        "string" => JsxAttrValue::String(unquote(&value.text())),
        "jsx_expression" => JsxAttrValue::Expr(first_named_child(value).map_or_else(
            || Literal::Unsupported("jsx_expression".into()),
            |inner| Literal::from_node(&inner),
        )),
        _ => JsxAttrValue::Element,
    }
}
