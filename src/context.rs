//! Ancestor tracking for the rewrite driver.
//!
//! Parent lookups become a stack the visitor pushes on the
//! way down and pops on the way up. Only the ancestors that can change a
//! decision are recorded: JSX elements, call expressions and attributes.

use oxc_ast::ast::{CallExpression, Expression, JSXElementName};

use crate::options::TransformConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ancestor {
    /// A JSX element; the tag is recorded only for plain identifier tags.
    Element(Option<String>),
    /// A call expression; the callee is recorded only when it is a bare identifier.
    Call(Option<String>),
    /// A named JSX attribute (`name={...}`). Spread attributes are not recorded.
    Attribute,
}

/// Why a node must not receive another boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suppression {
    /// Inside `<Memo>`, `<For>`, `<Show>`, … or a configured boundary component.
    ReactiveBoundary(String),
    /// Inside `observer(...)` or a configured observer HOC.
    ObserverHoc(String),
}

#[derive(Debug, Default)]
pub struct Ancestry {
    stack: Vec<Ancestor>,
}

impl Ancestry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ancestor: Ancestor) {
        self.stack.push(ancestor);
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The nearest ancestor that already makes the current node reactive, if any.
    pub fn suppression(&self, config: &TransformConfig) -> Option<Suppression> {
        self.stack.iter().rev().find_map(|ancestor| match ancestor {
            Ancestor::Element(Some(tag)) if config.is_reactive_component(tag) => {
                Some(Suppression::ReactiveBoundary(tag.clone()))
            }
            Ancestor::Call(Some(callee)) if config.is_observer(callee) => {
                Some(Suppression::ObserverHoc(callee.clone()))
            }
            _ => None,
        })
    }

    pub fn inside_attribute(&self) -> bool {
        self.stack.iter().any(|a| matches!(a, Ancestor::Attribute))
    }
}

/// The tag of `<Foo>` / `<div>`; `None` for `<Foo.Bar>`, `<a:b>` and `<this>`.
pub fn element_tag<'b>(name: &'b JSXElementName<'_>) -> Option<&'b str> {
    match name {
        JSXElementName::Identifier(id) => Some(id.name.as_str()),
        JSXElementName::IdentifierReference(id) => Some(id.name.as_str()),
        _ => None,
    }
}

/// The bare identifier of a plain call. Optional calls (`observer?.(...)`)
/// have no name, so they never count as an observer HOC.
pub fn callee_name<'b>(call: &'b CallExpression<'_>) -> Option<&'b str> {
    if call.optional {
        return None;
    }
    match &call.callee {
        Expression::Identifier(ident) => Some(ident.name.as_str()),
        _ => None,
    }
}
