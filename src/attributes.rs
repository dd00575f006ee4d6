use oxc_ast::ast::*;

use crate::options::TransformConfig;
use crate::reads::{contains_observable_read, jsx_expression_reads};

/// Runtime-special props that never justify wrapping the element:
/// `key` drives list reconciliation and `ref` is a DOM handle, so a boundary
/// around the element would break both without adding reactivity.
pub const EXEMPT_ATTRIBUTES: &[&str] = &["key", "ref"];

fn is_exempt(name: &JSXAttributeName<'_>) -> bool {
    match name {
        JSXAttributeName::Identifier(id) => {
            EXEMPT_ATTRIBUTES.iter().any(|exempt| *exempt == id.name.as_str())
        }
        JSXAttributeName::NamespacedName(_) => false,
    }
}

/// Whether any non-exempt attribute (spreads included) reads an observable.
pub fn attributes_read_observable(
    attributes: &[JSXAttributeItem<'_>],
    config: &TransformConfig,
) -> bool {
    attributes.iter().any(|item| match item {
        JSXAttributeItem::SpreadAttribute(spread) => {
            contains_observable_read(&spread.argument, config)
        }
        JSXAttributeItem::Attribute(attr) => {
            if is_exempt(&attr.name) {
                return false;
            }
            match &attr.value {
                Some(JSXAttributeValue::ExpressionContainer(container)) => {
                    jsx_expression_reads(&container.expression, config)
                }
                _ => false,
            }
        }
    })
}
