use oxc_ast::ast::*;
use oxc_ast::{AstBuilder, NONE};
use oxc_span::SPAN;

/// Whether `program` already has `import { name } from "source"` at the top level.
/// Aliased imports (`import { name as Other }`) do not bind `name` and so do
/// not count.
pub fn has_named_import(program: &Program<'_>, name: &str, source: &str) -> bool {
    program.body.iter().any(|stmt| {
        let Statement::ImportDeclaration(decl) = stmt else {
            return false;
        };
        if decl.source.value.as_str() != source {
            return false;
        }
        decl.specifiers.iter().flatten().any(|specifier| match specifier {
            ImportDeclarationSpecifier::ImportSpecifier(spec) => {
                spec.imported.name().as_str() == name && spec.local.name.as_str() == name
            }
            _ => false,
        })
    })
}

/// Prepends `import { name } from "source";` unless an equivalent import is
/// already present. Returns whether a declaration was added; calling it again
/// on the same program is a no-op.
pub fn ensure_named_import<'a>(
    ast: AstBuilder<'a>,
    program: &mut Program<'a>,
    name: &str,
    source: &str,
) -> bool {
    if has_named_import(program, name, source) {
        return false;
    }

    let name: &'a str = ast.allocator.alloc_str(name);
    let source: &'a str = ast.allocator.alloc_str(source);

    let specifier = ast.import_declaration_specifier_import_specifier(
        SPAN,
        ast.module_export_name_identifier_name(SPAN, name),
        ast.binding_identifier(SPAN, name),
        ImportOrExportKind::Value,
    );
    let declaration = ast.module_declaration_import_declaration(
        SPAN,
        Some(ast.vec1(specifier)),
        ast.string_literal(SPAN, source, None),
        None,
        NONE,
        ImportOrExportKind::Value,
    );
    program.body.insert(0, Statement::from(declaration));
    true
}
