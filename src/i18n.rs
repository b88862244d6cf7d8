//! Label resolution.
//!
//! Labels are looked up by module and key. Unknown keys resolve to the key
//! itself so a missing translation is visible rather than blank.

use std::collections::HashMap;

/// Module used for the table's own labels.
pub const CORE_MODULE: &str = "core";

/// Resolves display labels.
pub trait LabelResolver {
    /// Resolve `key` within `module`.
    fn format_message(&self, module: &str, key: &str) -> String;

    /// Resolve `key` within `module`, substituting `{name}` placeholders.
    fn format_message_with_values(
        &self,
        module: &str,
        key: &str,
        values: &[(&str, String)],
    ) -> String {
        interpolate(&self.format_message(module, key), values)
    }
}

/// Replace `{name}` placeholders in a template.
pub fn interpolate(template: &str, values: &[(&str, String)]) -> String {
    values.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{}}}", name), value)
    })
}

/// In-memory message catalog.
#[derive(Debug, Clone)]
pub struct Messages {
    catalog: HashMap<String, HashMap<String, String>>,
}

impl Messages {
    /// Create a catalog holding the built-in `core` labels.
    pub fn new() -> Self {
        let mut messages = Self {
            catalog: HashMap::new(),
        };
        messages.insert(CORE_MODULE, "rowsPerPage", "Rows per page");
        messages.insert(CORE_MODULE, "ofPages", "of");
        messages.insert(CORE_MODULE, "loading", "Loading...");
        messages
    }

    /// Add or replace a label.
    pub fn insert(
        &mut self,
        module: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.catalog
            .entry(module.into())
            .or_default()
            .insert(key.into(), text.into());
    }

    /// Layer labels from settings over the built-in ones.
    pub fn with_overrides(mut self, overrides: &HashMap<String, HashMap<String, String>>) -> Self {
        for (module, labels) in overrides {
            for (key, text) in labels {
                self.insert(module.clone(), key.clone(), text.clone());
            }
        }
        self
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelResolver for Messages {
    fn format_message(&self, module: &str, key: &str) -> String {
        self.catalog
            .get(module)
            .and_then(|labels| labels.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
