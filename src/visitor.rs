//! The single rewrite traversal.
//!
//! One pre-order `VisitMut` pass per file. The driver owns every decision
//! about recursion:
//!
//! 1. An element's children are normalized before its own wrap decision.
//! 2. An element wrapped for its attributes is replaced and NOT descended into.
//! 3. A child expression wrapped into a boundary is replaced by the boundary
//!    element, which is then walked like any other element.
//! 4. Context (enclosing elements, calls, attributes) lives on an explicit
//!    ancestor stack, pushed on the way down and popped on the way up.

use oxc_allocator::CloneIn;
use oxc_ast::ast::*;
use oxc_ast_visit::walk_mut::{
    walk_call_expression, walk_jsx_attribute, walk_jsx_child, walk_jsx_element,
};
use oxc_ast_visit::VisitMut;
use tracing::trace;

use crate::attributes::attributes_read_observable;
use crate::children::normalize_children;
use crate::context::{callee_name, element_tag, Ancestor, Ancestry};
use crate::options::TransformConfig;
use crate::reads::jsx_expression_reads;
use crate::synthesize::BoundaryBuilder;

/// What the rewriter did to one file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    /// Boundary components synthesized (element and child wraps).
    pub boundaries: usize,
    /// Elements whose children were collapsed into a thunk.
    pub normalized: usize,
}

impl RewriteStats {
    /// Only synthesized boundaries reference the wrapper; normalization keeps
    /// the component the user already imported.
    pub fn needs_import(&self) -> bool {
        self.boundaries > 0
    }
}

pub struct BoundaryRewriter<'a, 'c> {
    builder: BoundaryBuilder<'a>,
    config: &'c TransformConfig,
    ancestry: Ancestry,
    pub stats: RewriteStats,
}

impl<'a, 'c> BoundaryRewriter<'a, 'c> {
    pub fn new(builder: BoundaryBuilder<'a>, config: &'c TransformConfig) -> Self {
        Self {
            builder,
            config,
            ancestry: Ancestry::new(),
            stats: RewriteStats::default(),
        }
    }

    fn is_free(&self) -> bool {
        self.ancestry.suppression(self.config).is_none()
    }

    /// `<Wrapper>{() => expr}</Wrapper>` for a child container that reads an
    /// observable at render time, else `None`.
    fn child_boundary(&self, child: &JSXChild<'a>) -> Option<JSXElement<'a>> {
        let JSXChild::ExpressionContainer(container) = child else {
            return None;
        };
        if self.ancestry.inside_attribute() || !self.is_free() {
            return None;
        }
        if !jsx_expression_reads(&container.expression, self.config) {
            return None;
        }
        let expr = container.expression.as_expression()?;
        let body = expr.clone_in(self.builder.ast.allocator);
        Some(self.builder.boundary(&self.config.component_name, body))
    }
}

impl<'a, 'c> VisitMut<'a> for BoundaryRewriter<'a, 'c> {
    fn visit_jsx_element(&mut self, element: &mut JSXElement<'a>) {
        if let Some(normalized) = normalize_children(element, self.config, &self.builder) {
            *element = normalized;
            self.stats.normalized += 1;
        }

        if self.is_free() && attributes_read_observable(&element.opening_element.attributes, self.config) {
            let wrapped = self
                .builder
                .boundary_around_element(&self.config.component_name, element);
            *element = wrapped;
            self.stats.boundaries += 1;
            trace!(
                wrapper = %self.config.component_name,
                depth = self.ancestry.depth(),
                "wrapped element with reactive attributes"
            );
            return;
        }

        let tag = element_tag(&element.opening_element.name).map(str::to_string);
        self.ancestry.push(Ancestor::Element(tag));
        walk_jsx_element(self, element);
        self.ancestry.pop();
    }

    fn visit_jsx_child(&mut self, child: &mut JSXChild<'a>) {
        if let Some(boundary) = self.child_boundary(child) {
            *child = JSXChild::Element(self.builder.ast.alloc(boundary));
            self.stats.boundaries += 1;
            trace!(
                wrapper = %self.config.component_name,
                depth = self.ancestry.depth(),
                "wrapped child expression"
            );
        }
        walk_jsx_child(self, child);
    }

    fn visit_jsx_attribute(&mut self, attribute: &mut JSXAttribute<'a>) {
        self.ancestry.push(Ancestor::Attribute);
        walk_jsx_attribute(self, attribute);
        self.ancestry.pop();
    }

    fn visit_call_expression(&mut self, call: &mut CallExpression<'a>) {
        let callee = callee_name(call).map(str::to_string);
        self.ancestry.push(Ancestor::Call(callee));
        walk_call_expression(self, call);
        self.ancestry.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_ast::AstBuilder;
    use oxc_codegen::Codegen;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn squash(code: &str) -> String {
        code.chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn rewrite(code: &str) -> (String, RewriteStats) {
        let allocator = Allocator::default();
        let source_type = SourceType::default().with_module(true).with_jsx(true);
        let mut ret = Parser::new(&allocator, code, source_type).parse();
        assert!(ret.errors.is_empty(), "fixture should parse: {}", code);
        let config = TransformConfig::default();
        let mut rewriter = BoundaryRewriter::new(BoundaryBuilder::new(AstBuilder::new(&allocator)), &config);
        rewriter.visit_program(&mut ret.program);
        assert_eq!(rewriter.ancestry.depth(), 0, "ancestor stack must be balanced");
        (Codegen::new().build(&ret.program).code, rewriter.stats)
    }

    #[test]
    fn test_child_expression_becomes_boundary_element() {
        let (code, stats) = rewrite("<div>{count$.get()}</div>;");
        assert_eq!(squash(&code), squash("<div><Memo>{() => count$.get()}</Memo></div>;"));
        assert_eq!(stats.boundaries, 1);
        assert!(stats.needs_import());
    }

    #[test]
    fn test_element_wrap_is_not_descended() {
        let (code, stats) = rewrite("<Comp value={a$.get()}>{b$.get()}</Comp>;");
        assert_eq!(
            squash(&code),
            squash("<Memo>{() => <Comp value={a$.get()}>{b$.get()}</Comp>}</Memo>;")
        );
        assert_eq!(stats.boundaries, 1);
    }

    #[test]
    fn test_normalize_only_does_not_need_import() {
        let (code, stats) = rewrite("<Memo>{count$.get()}</Memo>;");
        assert_eq!(squash(&code), squash("<Memo>{() => count$.get()}</Memo>;"));
        assert_eq!(stats, RewriteStats { boundaries: 0, normalized: 1 });
        assert!(!stats.needs_import());
    }

    #[test]
    fn test_attribute_nested_children_are_left_to_the_element() {
        // The callback is opaque to the attribute scanner, and its JSX sits
        // under an attribute, so the child rewriter leaves it alone too.
        let (code, stats) = rewrite("<List renderItem={() => <p>{msg$.get()}</p>} />;");
        assert_eq!(squash(&code), squash("<List renderItem={() => <p>{msg$.get()}</p>} />;"));
        assert_eq!(stats, RewriteStats::default());
    }

    #[test]
    fn test_observer_call_suppresses_subtree() {
        let (code, stats) = rewrite(
            "const C = observer(function C() { return <div title={t$.get()}>{c$.get()}</div>; });",
        );
        assert_eq!(stats, RewriteStats::default(), "got: {}", code);
    }

    #[test]
    fn test_optional_observer_call_does_not_suppress() {
        let (code, stats) = rewrite("const C = observer?.(() => <p>{a$.get()}</p>);");
        assert_eq!(
            squash(&code),
            squash("const C = observer?.(() => <p><Memo>{() => a$.get()}</Memo></p>);")
        );
        assert_eq!(stats.boundaries, 1);
    }

    #[test]
    fn test_nested_normalization_inside_child_boundary() {
        let (code, stats) = rewrite("<div>{flag$.get() && <Show>{x$.get()}</Show>}</div>;");
        assert_eq!(
            squash(&code),
            squash("<div><Memo>{() => flag$.get() && <Show>{() => x$.get()}</Show>}</Memo></div>;")
        );
        assert_eq!(stats, RewriteStats { boundaries: 1, normalized: 1 });
    }
}
