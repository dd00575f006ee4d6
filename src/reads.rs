//! Observable read detection.
//!
//! A qualifying read is a zero-argument call of a configured method on a
//! property access whose root identifier carries the observable suffix
//! (`count$.get()`, `user$.profile.name.get()`, `obs$?.get()`), or any root
//! when `allGet` is set. Function literals are opaque: a read that only runs
//! when a callback is later invoked is not a render-time read.

use oxc_ast::ast::*;
use oxc_ast_visit::{walk, Visit};
use oxc_syntax::scope::ScopeFlags;

use crate::options::TransformConfig;

/// Unwraps a property-access chain to its base identifier.
///
/// `user$.profile.name` → `user$`, `obs$.items[0]` → `obs$`, `obs$?.nested` →
/// `obs$`. Calls, `this` and anything else have no root.
pub fn root_identifier<'b, 'a>(expr: &'b Expression<'a>) -> Option<&'b IdentifierReference<'a>> {
    match expr {
        Expression::Identifier(ident) => Some(ident),
        Expression::StaticMemberExpression(member) => root_identifier(&member.object),
        Expression::ComputedMemberExpression(member) => root_identifier(&member.object),
        Expression::PrivateFieldExpression(member) => root_identifier(&member.object),
        Expression::ParenthesizedExpression(paren) => root_identifier(&paren.expression),
        Expression::ChainExpression(chain) => chain
            .expression
            .as_member_expression()
            .and_then(|member| root_identifier(member.object())),
        _ => None,
    }
}

/// Whether this single call node is a qualifying read. Plain and optional
/// calls share the same node kind; optionality only lives in the flags.
pub fn is_observable_read(call: &CallExpression<'_>, config: &TransformConfig) -> bool {
    // `map.get(key)` is a keyed lookup, never a reactive read.
    if !call.arguments.is_empty() {
        return false;
    }
    let Expression::StaticMemberExpression(member) = call.callee.without_parentheses() else {
        return false;
    };
    if !config.is_read_method(member.property.name.as_str()) {
        return false;
    }
    if config.all_get {
        return true;
    }
    root_identifier(&member.object)
        .map(|root| config.is_observable_name(root.name.as_str()))
        .unwrap_or(false)
}

/// Whether `expr` contains a qualifying read outside of any nested function.
pub fn contains_observable_read(expr: &Expression<'_>, config: &TransformConfig) -> bool {
    let mut finder = ReadFinder {
        config,
        found: false,
    };
    finder.visit_expression(expr);
    finder.found
}

/// Same as [`contains_observable_read`] for a JSX container payload. The empty
/// placeholder `{}` never contains a read.
pub fn jsx_expression_reads(expr: &JSXExpression<'_>, config: &TransformConfig) -> bool {
    expr.as_expression()
        .map(|e| contains_observable_read(e, config))
        .unwrap_or(false)
}

struct ReadFinder<'c> {
    config: &'c TransformConfig,
    found: bool,
}

impl<'a, 'c> Visit<'a> for ReadFinder<'c> {
    fn visit_expression(&mut self, expr: &Expression<'a>) {
        if self.found {
            return;
        }
        walk::walk_expression(self, expr);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if self.found {
            return;
        }
        if is_observable_read(call, self.config) {
            self.found = true;
            return;
        }
        walk::walk_call_expression(self, call);
    }

    // Function boundaries: arrows, function expressions and declarations,
    // and class/object methods (all `Function` nodes).
    fn visit_arrow_function_expression(&mut self, _func: &ArrowFunctionExpression<'a>) {}

    fn visit_function(&mut self, _func: &Function<'a>, _flags: ScopeFlags) {}
}
