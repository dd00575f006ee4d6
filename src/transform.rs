//! File-level entry points.
//!
//! `transform_program` is the File Coordinator: it runs the rewriter over a
//! parsed program and injects the wrapper import on exit. `transform_source`
//! wraps it with parsing and code generation for hosts that hand us text.

use std::path::PathBuf;

use lazy_static::lazy_static;
#[cfg(feature = "napi")]
use napi_derive::napi;
use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_ast::AstBuilder;
use oxc_ast_visit::VisitMut;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_parser::{ParseOptions, Parser};
use oxc_span::SourceType;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TransformError;
use crate::imports::ensure_named_import;
use crate::options::{TransformConfig, TransformOptions};
use crate::synthesize::BoundaryBuilder;
use crate::visitor::BoundaryRewriter;

lazy_static! {
    static ref TRANSFORMABLE_FILE_RE: Regex = Regex::new(r"\.[jt]sx$").unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESULT TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// Tree-level outcome of one file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransformReport {
    pub boundaries: usize,
    pub normalized: usize,
    pub import_added: bool,
}

impl TransformReport {
    pub fn changed(&self) -> bool {
        self.boundaries > 0 || self.normalized > 0 || self.import_added
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub code: String,
    /// JSON source map; absent when the file was returned untouched.
    pub map: Option<String>,
    pub changed: bool,
    pub boundaries: u32,
    pub import_added: bool,
}

impl TransformOutput {
    fn unchanged(code: &str) -> Self {
        TransformOutput {
            code: code.to_string(),
            map: None,
            changed: false,
            boundaries: 0,
            import_added: false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FILE COORDINATOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Rewrites `program` in place and adds the wrapper import when a boundary
/// was synthesized. Running it again on its own output adds nothing.
pub fn transform_program<'a>(
    program: &mut Program<'a>,
    allocator: &'a Allocator,
    config: &TransformConfig,
) -> TransformReport {
    let ast = AstBuilder::new(allocator);
    let mut rewriter = BoundaryRewriter::new(BoundaryBuilder::new(ast), config);
    rewriter.visit_program(program);
    let stats = rewriter.stats;

    let import_added = stats.needs_import()
        && ensure_named_import(ast, program, &config.component_name, &config.import_source);

    TransformReport {
        boundaries: stats.boundaries,
        normalized: stats.normalized,
        import_added,
    }
}

/// Parses, transforms and regenerates one file.
///
/// A file that fails to parse is aborted with `LM-ERR-PARSE-001`; a file with
/// nothing to rewrite comes back byte-for-byte as given.
pub fn transform_source(
    code: &str,
    filename: &str,
    options: &TransformOptions,
) -> Result<TransformOutput, TransformError> {
    let config = TransformConfig::resolve(options);
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(filename).unwrap_or_else(|_| SourceType::tsx());

    let ret = Parser::new(&allocator, code, source_type)
        .with_options(ParseOptions {
            preserve_parens: false,
            ..Default::default()
        })
        .parse();

    if let Some(first) = ret.errors.first() {
        warn!(
            file = filename,
            errors = ret.errors.len(),
            panicked = ret.panicked,
            "aborting file with parse errors"
        );
        let offset = first
            .labels
            .as_ref()
            .and_then(|labels| labels.first())
            .map(|label| label.offset());
        return Err(TransformError::parse(&first.to_string(), filename, code, offset));
    }

    let mut program = ret.program;
    let report = transform_program(&mut program, &allocator, &config);

    debug!(
        file = filename,
        boundaries = report.boundaries,
        normalized = report.normalized,
        import_added = report.import_added,
        "transformed file"
    );

    if !report.changed() {
        return Ok(TransformOutput::unchanged(code));
    }

    let generated = Codegen::new()
        .with_options(CodegenOptions {
            source_map_path: Some(PathBuf::from(filename)),
            ..Default::default()
        })
        .build(&program);

    Ok(TransformOutput {
        code: generated.code,
        map: generated.map.map(|map| map.to_json_string()),
        changed: true,
        boundaries: saturating_count(report.boundaries),
        import_added: report.import_added,
    })
}

fn saturating_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Only JSX-bearing modules are worth parsing.
pub fn should_transform(filename: &str) -> bool {
    TRANSFORMABLE_FILE_RE.is_match(filename)
}

/// One source file handed to [`transform_batch`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub filename: String,
    pub code: String,
}

/// Transforms files in parallel. Results keep the input order; a failing file
/// only fails its own slot.
pub fn transform_batch(
    files: &[SourceFile],
    options: &TransformOptions,
) -> Vec<Result<TransformOutput, TransformError>> {
    files
        .par_iter()
        .map(|file| transform_source(&file.code, &file.filename, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_transform() {
        assert!(should_transform("src/App.tsx"));
        assert!(should_transform("Button.jsx"));
        assert!(!should_transform("util.ts"));
        assert!(!should_transform("index.js"));
        assert!(!should_transform("App.tsx.map"));
        assert!(!should_transform("styles.css"));
    }

    #[test]
    fn test_boundary_count_saturates() {
        assert_eq!(saturating_count(3), 3);
        assert_eq!(saturating_count(u32::MAX as usize), u32::MAX);
        assert_eq!(saturating_count(usize::MAX), u32::MAX);
    }

    #[test]
    fn test_report_changed() {
        assert!(!TransformReport::default().changed());
        assert!(TransformReport {
            normalized: 1,
            ..Default::default()
        }
        .changed());
    }

    #[test]
    fn test_transform_program_on_parsed_tree() {
        let allocator = Allocator::default();
        let code = "export const A = () => <p>{n$.get()}</p>;";
        let mut ret = Parser::new(&allocator, code, SourceType::tsx()).parse();
        assert!(ret.errors.is_empty());
        let config = TransformConfig::default();

        let first = transform_program(&mut ret.program, &allocator, &config);
        assert_eq!(first.boundaries, 1);
        assert!(first.import_added);

        let out = Codegen::new().build(&ret.program).code;
        assert!(
            out.starts_with("import { Memo } from \"@legendapp/state/react\";"),
            "import should lead the file, got: {}",
            out
        );
    }
}
