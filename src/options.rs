//! Plugin options and the resolved per-file configuration.
//!
//! `TransformOptions` is what the build integration hands us (every field
//! optional). `TransformConfig` is the immutable record built from it once per
//! file and passed by reference into every detector and rewriter.

#[cfg(feature = "napi")]
use napi_derive::napi;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::TransformError;

pub const DEFAULT_COMPONENT_NAME: &str = "Memo";
pub const DEFAULT_IMPORT_SOURCE: &str = "@legendapp/state/react";
pub const DEFAULT_OBSERVABLE_SUFFIX: &str = "$";
pub const DEFAULT_METHOD_NAMES: &[&str] = &["get"];

/// Components that already render fine-grained. The configured wrapper name is
/// always added on top of these.
pub const BASELINE_REACTIVE_COMPONENTS: &[&str] = &["For", "Show", "Memo", "Computed", "Switch"];
pub const BASELINE_OBSERVER_NAMES: &[&str] = &["observer"];
pub const BASELINE_WRAP_CHILDREN_COMPONENTS: &[&str] = &["Memo", "Show", "Computed"];

// ═══════════════════════════════════════════════════════════════════════════════
// OPTIONS (INPUT)
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "napi", napi(object))]
#[serde(rename_all = "camelCase")]
pub struct TransformOptions {
    /// Wrapper component name (default: `Memo`)
    pub component_name: Option<String>,
    /// Module the wrapper is imported from (default: `@legendapp/state/react`)
    pub import_source: Option<String>,
    /// Treat every zero-argument read as observable, ignoring the suffix
    pub all_get: Option<bool>,
    /// Read method names (default: `["get"]`)
    pub method_names: Option<Vec<String>>,
    /// Identifier suffix marking an observable (default: `$`)
    pub observable_suffix: Option<String>,
    /// Extra reactive-boundary components, merged with the baseline
    pub reactive_components: Option<Vec<String>>,
    /// Extra observer HOC names, merged with `observer`
    pub observer_names: Option<Vec<String>>,
    /// Thunk the children of `Memo`/`Show`/`Computed` (default: true)
    pub wrap_reactive_children: Option<bool>,
    /// Extra components whose children get thunked
    pub wrap_reactive_children_components: Option<Vec<String>>,
}

impl TransformOptions {
    pub fn from_json(json: &str) -> Result<Self, TransformError> {
        serde_json::from_str(json)
            .map_err(|e| TransformError::options(&format!("Invalid plugin options: {}", e)))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESOLVED CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct TransformConfig {
    pub component_name: String,
    pub import_source: String,
    pub all_get: bool,
    pub method_names: Vec<String>,
    pub observable_suffix: String,
    pub reactive_components: HashSet<String>,
    pub observer_names: HashSet<String>,
    pub wrap_children_components: HashSet<String>,
}

impl TransformConfig {
    pub fn resolve(options: &TransformOptions) -> Self {
        let component_name = options
            .component_name
            .clone()
            .unwrap_or_else(|| DEFAULT_COMPONENT_NAME.to_string());

        let method_names = match &options.method_names {
            Some(names) if !names.is_empty() => names.clone(),
            _ => owned(DEFAULT_METHOD_NAMES),
        };

        let mut reactive_components: HashSet<String> =
            BASELINE_REACTIVE_COMPONENTS.iter().map(|s| s.to_string()).collect();
        reactive_components.insert(component_name.clone());
        reactive_components.extend(options.reactive_components.iter().flatten().cloned());

        let mut observer_names: HashSet<String> =
            BASELINE_OBSERVER_NAMES.iter().map(|s| s.to_string()).collect();
        observer_names.extend(options.observer_names.iter().flatten().cloned());

        // Disabling the feature drops the baseline; explicitly listed names stay.
        let mut wrap_children_components: HashSet<String> = options
            .wrap_reactive_children_components
            .iter()
            .flatten()
            .cloned()
            .collect();
        if options.wrap_reactive_children.unwrap_or(true) {
            wrap_children_components
                .extend(BASELINE_WRAP_CHILDREN_COMPONENTS.iter().map(|s| s.to_string()));
        }

        TransformConfig {
            component_name,
            import_source: options
                .import_source
                .clone()
                .unwrap_or_else(|| DEFAULT_IMPORT_SOURCE.to_string()),
            all_get: options.all_get.unwrap_or(false),
            method_names,
            observable_suffix: options
                .observable_suffix
                .clone()
                .unwrap_or_else(|| DEFAULT_OBSERVABLE_SUFFIX.to_string()),
            reactive_components,
            observer_names,
            wrap_children_components,
        }
    }

    pub fn is_read_method(&self, name: &str) -> bool {
        self.method_names.iter().any(|m| m == name)
    }

    pub fn is_observable_name(&self, name: &str) -> bool {
        name.ends_with(self.observable_suffix.as_str())
    }

    pub fn is_reactive_component(&self, name: &str) -> bool {
        self.reactive_components.contains(name)
    }

    pub fn is_observer(&self, name: &str) -> bool {
        self.observer_names.contains(name)
    }

    pub fn wraps_children_of(&self, name: &str) -> bool {
        self.wrap_children_components.contains(name)
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self::resolve(&TransformOptions::default())
    }
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
