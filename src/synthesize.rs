//! AST construction helpers. Pure builders: no validation of caller intent.

use oxc_allocator::CloneIn;
use oxc_ast::ast::*;
use oxc_ast::{AstBuilder, NONE};
use oxc_span::SPAN;

pub struct BoundaryBuilder<'a> {
    pub ast: AstBuilder<'a>,
}

impl<'a> BoundaryBuilder<'a> {
    pub fn new(ast: AstBuilder<'a>) -> Self {
        Self { ast }
    }

    /// `() => body`
    pub fn thunk(&self, body: Expression<'a>) -> Expression<'a> {
        let params = self.ast.alloc_formal_parameters(
            SPAN,
            FormalParameterKind::ArrowFormalParameters,
            self.ast.vec(),
            NONE,
        );
        let statements = self.ast.vec1(self.ast.statement_expression(SPAN, body));
        let body = self.ast.alloc_function_body(SPAN, self.ast.vec(), statements);
        self.ast
            .expression_arrow_function(SPAN, true, false, NONE, params, NONE, body)
    }

    /// `{() => body}` as a JSX child.
    pub fn thunk_child(&self, body: Expression<'a>) -> JSXChild<'a> {
        self.ast
            .jsx_child_expression_container(SPAN, JSXExpression::from(self.thunk(body)))
    }

    /// `<Wrapper>{() => body}</Wrapper>`
    pub fn boundary(&self, wrapper: &str, body: Expression<'a>) -> JSXElement<'a> {
        let name: &'a str = self.ast.allocator.alloc_str(wrapper);
        let opening = self.ast.alloc_jsx_opening_element(
            SPAN,
            self.ast.jsx_element_name_identifier_reference(SPAN, name),
            NONE,
            self.ast.vec(),
        );
        let closing = self.ast.alloc_jsx_closing_element(
            SPAN,
            self.ast.jsx_element_name_identifier_reference(SPAN, name),
        );
        self.ast.jsx_element(
            SPAN,
            opening,
            self.ast.vec1(self.thunk_child(body)),
            Some(closing),
        )
    }

    /// `<Wrapper>{() => <element />}</Wrapper>`, taking a copy of `element`.
    pub fn boundary_around_element(&self, wrapper: &str, element: &JSXElement<'a>) -> JSXElement<'a> {
        let inner = element.clone_in(self.ast.allocator);
        self.boundary(wrapper, Expression::JSXElement(self.ast.alloc(inner)))
    }

    /// `<>...children</>`
    pub fn fragment(&self, children: oxc_allocator::Vec<'a, JSXChild<'a>>) -> Expression<'a> {
        self.ast.expression_jsx_fragment(
            SPAN,
            self.ast.jsx_opening_fragment(SPAN),
            children,
            self.ast.jsx_closing_fragment(SPAN),
        )
    }

    /// Same tag and attributes as `element`, with `child` as the only child.
    pub fn with_single_child(&self, element: &JSXElement<'a>, child: JSXChild<'a>) -> JSXElement<'a> {
        self.ast.jsx_element(
            element.span,
            element.opening_element.clone_in(self.ast.allocator),
            self.ast.vec1(child),
            element.closing_element.clone_in(self.ast.allocator),
        )
    }
}
