#[cfg(feature = "napi")]
use napi_derive::napi;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_PARSE: &str = "LM-ERR-PARSE-001";
pub const ERR_OPTIONS: &str = "LM-ERR-OPTIONS-001";

fn get_guarantee(code: &str) -> &'static str {
    match code {
        ERR_PARSE => "A file that fails to parse is left untouched; other files are unaffected.",
        ERR_OPTIONS => "Plugin options are validated before any file is transformed.",
        _ => "Unknown error code.",
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRANSFORM ERROR
// ═══════════════════════════════════════════════════════════════════════════════

/// Fatal, per-file failure. Detectors never produce one of these; only
/// structurally invalid input (or an undecodable option record) does.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
#[error("[{code}] {message} ({file}:{line}:{column})")]
pub struct TransformError {
    pub code: String,
    pub message: String,
    pub guarantee: String,
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl TransformError {
    pub fn new(code: &str, message: &str, file: &str, line: u32, column: u32) -> Self {
        TransformError {
            code: code.to_string(),
            message: message.to_string(),
            guarantee: get_guarantee(code).to_string(),
            file: file.to_string(),
            line,
            column,
        }
    }

    pub fn parse(message: &str, file: &str, source: &str, offset: Option<usize>) -> Self {
        let (line, column) = offset
            .map(|offset| line_column(source, offset))
            .unwrap_or((0, 0));
        Self::new(ERR_PARSE, message, file, line, column)
    }

    pub fn options(message: &str) -> Self {
        Self::new(ERR_OPTIONS, message, "", 0, 0)
    }
}

/// 1-based line/column for a byte offset, clamped to the source length.
fn line_column(source: &str, offset: usize) -> (u32, u32) {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(newline) => before[newline + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line as u32, column as u32)
}
