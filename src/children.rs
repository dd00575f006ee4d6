//! Children normalization for boundary-style components.
//!
//! `<Memo>{count$.get()}</Memo>` only re-renders on its own when its child is
//! a function, so the children of `Memo`/`Show`/`Computed` (plus configured
//! names) are turned into a zero-argument thunk:
//!
//! ```text
//! <Memo>{count$.get()}</Memo>      →  <Memo>{() => count$.get()}</Memo>
//! <Memo><div>hello</div></Memo>    →  <Memo>{() => <div>hello</div>}</Memo>
//! <Memo><A /><B /></Memo>          →  <Memo>{() => <><A /><B /></>}</Memo>
//! ```

use oxc_allocator::CloneIn;
use oxc_ast::ast::*;

use crate::context::element_tag;
use crate::options::TransformConfig;
use crate::synthesize::BoundaryBuilder;

/// How a (non-blank) child reads for normalization purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildShape {
    /// `{() => ...}`, `{function () {}}`, `{renderFn}`, `{obj.render}`
    Deferred,
    /// `<div />` as a direct child
    Element,
    /// `{expr}` with any other expression
    Expression,
    /// `{}` or `{/* comment */}`; not deferred, so it still gets thunked
    Empty,
    /// Text, fragments, `{...spread}`
    Other,
}

impl ChildShape {
    pub fn of(child: &JSXChild<'_>) -> Self {
        match child {
            JSXChild::Element(_) => ChildShape::Element,
            JSXChild::ExpressionContainer(container) => match &container.expression {
                JSXExpression::EmptyExpression(_) => ChildShape::Empty,
                JSXExpression::ArrowFunctionExpression(_)
                | JSXExpression::FunctionExpression(_)
                | JSXExpression::Identifier(_)
                | JSXExpression::StaticMemberExpression(_)
                | JSXExpression::ComputedMemberExpression(_)
                | JSXExpression::PrivateFieldExpression(_) => ChildShape::Deferred,
                _ => ChildShape::Expression,
            },
            JSXChild::Text(_) | JSXChild::Fragment(_) | JSXChild::Spread(_) => ChildShape::Other,
        }
    }
}

fn is_blank_text(child: &JSXChild<'_>) -> bool {
    matches!(child, JSXChild::Text(text) if text.value.trim().is_empty())
}

/// Returns the element with its children collapsed into `{() => ...}`, or
/// `None` when the element is not a configured component, has no children, or
/// its first child is already deferred or is text.
pub fn normalize_children<'a>(
    element: &JSXElement<'a>,
    config: &TransformConfig,
    builder: &BoundaryBuilder<'a>,
) -> Option<JSXElement<'a>> {
    let tag = element_tag(&element.opening_element.name)?;
    if !config.wraps_children_of(tag) {
        return None;
    }

    let children: Vec<&JSXChild<'a>> = element
        .children
        .iter()
        .filter(|child| !is_blank_text(child))
        .collect();

    // The first meaningful child decides; a lone deferred child is left alone.
    let first = children.first()?;
    match ChildShape::of(first) {
        ChildShape::Element | ChildShape::Expression | ChildShape::Empty => {}
        ChildShape::Deferred | ChildShape::Other => return None,
    }

    let body = thunk_body(&children, builder);
    Some(builder.with_single_child(element, builder.thunk_child(body)))
}

fn thunk_body<'a>(children: &[&JSXChild<'a>], builder: &BoundaryBuilder<'a>) -> Expression<'a> {
    let allocator = builder.ast.allocator;
    if let [only] = children {
        match only {
            JSXChild::Element(el) => {
                return Expression::JSXElement(el.clone_in(allocator));
            }
            JSXChild::ExpressionContainer(container) => {
                if let Some(expr) = container.expression.as_expression() {
                    return expr.clone_in(allocator);
                }
            }
            _ => {}
        }
    }
    let mut fragment_children = builder.ast.vec_with_capacity(children.len());
    for child in children {
        fragment_children.push((*child).clone_in(allocator));
    }
    builder.fragment(fragment_children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TransformOptions;
    use oxc_allocator::Allocator;
    use oxc_ast::AstBuilder;
    use oxc_codegen::Codegen;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn squash(code: &str) -> String {
        code.chars().filter(|c| !c.is_whitespace()).collect()
    }

    /// Normalizes the element in `code` (a single expression statement) and
    /// returns the regenerated source, or `None` when nothing changed.
    fn normalize_with(code: &str, config: &TransformConfig) -> Option<String> {
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_module(true).with_jsx(true);
        let mut ret = Parser::new(&allocator, code, source_type).parse();
        assert!(ret.errors.is_empty(), "fixture should parse: {}", code);
        let builder = BoundaryBuilder::new(AstBuilder::new(&allocator));
        let Some(Statement::ExpressionStatement(stmt)) = ret.program.body.first_mut() else {
            panic!("expected an expression statement");
        };
        let Expression::JSXElement(element) = &mut stmt.expression else {
            panic!("expected a JSX element");
        };
        let normalized = normalize_children(element, config, &builder)?;
        **element = normalized;
        Some(Codegen::new().build(&ret.program).code)
    }

    fn normalize(code: &str) -> Option<String> {
        normalize_with(code, &TransformConfig::default())
    }

    fn assert_normalized(code: &str, expected: &str) {
        let out = normalize(code).unwrap_or_else(|| panic!("expected a rewrite for {}", code));
        assert_eq!(squash(&out), squash(expected));
    }

    #[test]
    fn test_expression_child_is_thunked() {
        assert_normalized("<Memo>{count$.get()}</Memo>;", "<Memo>{() => count$.get()}</Memo>;");
        assert_normalized(
            "<Show if={cond$}>{a$.get() + b$.get()}</Show>;",
            "<Show if={cond$}>{() => a$.get() + b$.get()}</Show>;",
        );
        assert_normalized(
            "<Computed>{count$.get()}</Computed>;",
            "<Computed>{() => count$.get()}</Computed>;",
        );
    }

    #[test]
    fn test_element_child_is_thunked_bare() {
        assert_normalized("<Memo><div>hello</div></Memo>;", "<Memo>{() => <div>hello</div>}</Memo>;");
        assert_normalized(
            "<Memo>\n  <span>{count$.get()}</span>\n</Memo>;",
            "<Memo>{() => <span>{count$.get()}</span>}</Memo>;",
        );
    }

    #[test]
    fn test_multiple_children_become_fragment() {
        assert_normalized("<Memo><A /><B /></Memo>;", "<Memo>{() => <><A /><B /></>}</Memo>;");
    }

    #[test]
    fn test_deferred_children_are_left_alone() {
        assert!(normalize("<Memo>{() => count$.get()}</Memo>;").is_none());
        assert!(normalize("<Memo>{function () { return count$.get(); }}</Memo>;").is_none());
        assert!(normalize("<Memo>{renderFn}</Memo>;").is_none());
        assert!(normalize("<Memo>{obj.render}</Memo>;").is_none());
    }

    #[test]
    fn test_empty_and_text_children_are_left_alone() {
        assert!(normalize("<Memo></Memo>;").is_none());
        assert!(normalize("<Memo>\n   \n</Memo>;").is_none());
        assert!(normalize("<Memo />;").is_none());
        assert!(normalize("<Memo>plain text</Memo>;").is_none());
    }

    #[test]
    fn test_empty_container_children_become_fragment() {
        assert_normalized("<Memo>{}</Memo>;", "<Memo>{() => <>{}</>}</Memo>;");
        assert_normalized(
            "<Memo>{}<div>{a$.get()}</div></Memo>;",
            "<Memo>{() => <>{}<div>{a$.get()}</div></>}</Memo>;",
        );
    }

    #[test]
    fn test_only_configured_components() {
        assert!(normalize("<For each={list$}>{count$.get()}</For>;").is_none());
        assert!(normalize("<div>{count$.get()}</div>;").is_none());
        assert!(normalize("<UI.Memo>{count$.get()}</UI.Memo>;").is_none());

        let custom = TransformConfig::resolve(&TransformOptions {
            wrap_reactive_children_components: Some(vec!["Custom".to_string()]),
            ..Default::default()
        });
        let out = normalize_with("<Custom>{count$.get()}</Custom>;", &custom).unwrap();
        assert_eq!(squash(&out), squash("<Custom>{() => count$.get()}</Custom>;"));

        let disabled = TransformConfig::resolve(&TransformOptions {
            wrap_reactive_children: Some(false),
            ..Default::default()
        });
        assert!(normalize_with("<Memo>{count$.get()}</Memo>;", &disabled).is_none());
    }

    #[test]
    fn test_shapes() {
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_module(true).with_jsx(true);
        let expr = Parser::new(&allocator, "<X>{a}{a.b}{f()}{}<i />text</X>", source_type)
            .parse_expression()
            .unwrap();
        let Expression::JSXElement(element) = &expr else {
            panic!("expected element");
        };
        let shapes: Vec<ChildShape> = element.children.iter().map(ChildShape::of).collect();
        assert_eq!(
            shapes,
            vec![
                ChildShape::Deferred,
                ChildShape::Deferred,
                ChildShape::Expression,
                ChildShape::Empty,
                ChildShape::Element,
                ChildShape::Other,
            ]
        );
    }
}
