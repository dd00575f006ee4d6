//! # Legend Memo Transform Ground Truth
//!
//! Rewrites JSX so that observable reads re-render the smallest possible
//! subtree, by wrapping them in a boundary component (`<Memo>` by default).
//!
//! ## Rewrite Invariants
//!
//! 1. **Qualifying Read**: a zero-argument call of a configured method (`get`)
//!    on an access chain whose root identifier ends with `$`
//!    (`count$.get()`, `user$.profile.name.get()`, `obs$?.get()`).
//!    With `allGet`, the suffix is not required. Arguments always disqualify.
//!
//! 2. **Function Opacity**: reads inside arrow functions or function
//!    expressions are never render-time reads and never trigger a rewrite.
//!
//! 3. **Element Wrap**: an element whose attributes (spreads included, `key` and
//!    `ref` excluded) contain a qualifying read becomes
//!    `<Memo>{() => <element />}</Memo>`. The replacement is not revisited.
//!
//! 4. **Child Wrap**: a child `{expr}` containing a qualifying read becomes
//!    `<Memo>{() => expr}</Memo>`. Containers under an attribute are skipped.
//!
//! 5. **Context Suppression**: nothing under a reactive-boundary element
//!    (`For`, `Show`, `Memo`, `Computed`, `Switch`, the wrapper) or an observer
//!    HOC call (`observer(...)`) is rewritten.
//!
//! 6. **Children Normalization**: the children of `Memo`, `Show` and `Computed`
//!    become a single thunk, before the element's own wrap decision.
//!
//! 7. **Import Singleton**: `import { Memo } from "@legendapp/state/react"` is
//!    added at most once, and never when already present.

#[cfg(feature = "napi")]
use napi_derive::napi;

mod attributes;
mod children;
mod context;
mod error;
mod imports;
mod options;
mod reads;
mod synthesize;
mod transform;
mod visitor;


pub use error::{TransformError, ERR_OPTIONS, ERR_PARSE};
pub use options::{TransformConfig, TransformOptions};
pub use reads::{contains_observable_read, is_observable_read, root_identifier};
pub use transform::{
    should_transform, transform_batch, transform_program, transform_source, SourceFile,
    TransformOutput, TransformReport,
};

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI BRIDGE
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn transform_native(
    code: String,
    filename: String,
    options_json: Option<String>,
) -> napi::Result<TransformOutput> {
    let options = match options_json {
        Some(json) => TransformOptions::from_json(&json)
            .map_err(|e| napi::Error::from_reason(e.to_string()))?,
        None => TransformOptions::default(),
    };
    transform_source(&code, &filename, &options).map_err(|e| napi::Error::from_reason(e.to_string()))
}

#[cfg(feature = "napi")]
#[napi]
pub fn should_transform_native(filename: String) -> bool {
    should_transform(&filename)
}
