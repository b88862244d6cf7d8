//! Module field visibility policy.
//!
//! Tables ask the policy, once per column per render, whether a column must
//! be hidden for the module the table belongs to.

use std::collections::{HashMap, HashSet};

/// Decides whether a named field is hidden for a module.
pub trait ModuleVisibility {
    /// Returns true if `key` must not be shown for `module`.
    fn hide_field(&self, module: &str, key: &str) -> bool;
}

impl<F> ModuleVisibility for F
where
    F: Fn(&str, &str) -> bool,
{
    fn hide_field(&self, module: &str, key: &str) -> bool {
        self(module, key)
    }
}

/// Policy that never hides anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHiddenFields;

impl ModuleVisibility for NoHiddenFields {
    fn hide_field(&self, _module: &str, _key: &str) -> bool {
        false
    }
}

/// Policy backed by a module → hidden keys map, usually read from settings.
#[derive(Debug, Clone, Default)]
pub struct HiddenFields {
    by_module: HashMap<String, HashSet<String>>,
}

impl HiddenFields {
    /// Create an empty policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide `key` for `module`.
    pub fn hide(mut self, module: impl Into<String>, key: impl Into<String>) -> Self {
        self.by_module
            .entry(module.into())
            .or_default()
            .insert(key.into());
        self
    }

    /// Number of hidden keys configured for a module.
    pub fn hidden_count(&self, module: &str) -> usize {
        self.by_module.get(module).map_or(0, HashSet::len)
    }
}

impl From<&HashMap<String, Vec<String>>> for HiddenFields {
    fn from(map: &HashMap<String, Vec<String>>) -> Self {
        let by_module = map
            .iter()
            .map(|(module, keys)| (module.clone(), keys.iter().cloned().collect()))
            .collect();
        Self { by_module }
    }
}

impl ModuleVisibility for HiddenFields {
    fn hide_field(&self, module: &str, key: &str) -> bool {
        self.by_module
            .get(module)
            .is_some_and(|keys| keys.contains(key))
    }
}
