//! Enabled add-on records.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AddonError;

/// Longest stored module name, in bytes. Longer names are truncated.
pub const MAX_MODULE_LEN: usize = 63;

fn truncate_module(module: &str) -> &str {
    if module.len() <= MAX_MODULE_LEN {
        return module;
    }
    let mut end = MAX_MODULE_LEN;
    while !module.is_char_boundary(end) {
        end -= 1;
    }
    &module[..end]
}

/// A stored add-on preference value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AddonProperty {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
}

/// An enabled add-on.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Addon {
    /// Python-style module name, unique within a list.
    pub module: String,
    /// Stored preferences, if the add-on has any.
    pub properties: Option<BTreeMap<String, AddonProperty>>,
}

impl Addon {
    /// Creates a record without preferences.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            properties: None,
        }
    }
}

/// Enabled add-ons in the order they were enabled.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AddonList {
    addons: Vec<Addon>,
}

impl AddonList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the record of a module.
    pub fn find(&self, module: &str) -> Option<&Addon> {
        let module = truncate_module(module);
        self.addons.iter().find(|a| a.module == module)
    }

    /// Mutable access to the record of a module.
    pub fn find_mut(&mut self, module: &str) -> Option<&mut Addon> {
        let module = truncate_module(module);
        self.addons.iter_mut().find(|a| a.module == module)
    }

    /// Returns the record of a module, appending a new one if needed.
    ///
    /// Names longer than [`MAX_MODULE_LEN`] bytes are stored truncated on a
    /// character boundary.
    pub fn ensure(&mut self, module: &str) -> Result<&mut Addon, AddonError> {
        if module.is_empty() {
            return Err(AddonError::EmptyModule);
        }
        let module = truncate_module(module);
        let index = match self.addons.iter().position(|a| a.module == module) {
            Some(index) => index,
            None => {
                debug!(module, "enabling add-on");
                self.addons.push(Addon::new(module));
                self.addons.len() - 1
            }
        };
        Ok(&mut self.addons[index])
    }

    /// Removes the record of a module. Returns false if there was none.
    pub fn remove_safe(&mut self, module: &str) -> bool {
        let module = truncate_module(module);
        let Some(index) = self.addons.iter().position(|a| a.module == module) else {
            return false;
        };
        debug!(module, "disabling add-on");
        self.addons.remove(index);
        true
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.addons.len()
    }

    /// Returns true if no add-on is enabled.
    pub fn is_empty(&self) -> bool {
        self.addons.is_empty()
    }

    /// Iterates over the records in order.
    pub fn iter(&self) -> impl Iterator<Item = &Addon> {
        self.addons.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_is_idempotent() {
        let mut list = AddonList::new();
        list.ensure("node_wrangler").unwrap();
        list.ensure("io_import_images").unwrap();
        list.ensure("node_wrangler").unwrap();

        assert_eq!(list.len(), 2);
        let modules: Vec<_> = list.iter().map(|a| a.module.as_str()).collect();
        assert_eq!(modules, vec!["node_wrangler", "io_import_images"]);
    }

    #[test]
    fn test_ensure_keeps_properties() {
        let mut list = AddonList::new();
        list.ensure("mesh_tools")
            .unwrap()
            .properties
            .get_or_insert_with(BTreeMap::new)
            .insert("snap".into(), AddonProperty::Bool(true));

        let addon = list.ensure("mesh_tools").unwrap();
        let properties = addon.properties.as_ref().unwrap();
        assert_eq!(properties.get("snap"), Some(&AddonProperty::Bool(true)));
    }

    #[test]
    fn test_ensure_rejects_empty_name() {
        let mut list = AddonList::new();
        assert_eq!(list.ensure("").unwrap_err(), AddonError::EmptyModule);
        assert!(list.is_empty());
    }

    #[test]
    fn test_long_names_are_truncated() {
        let mut list = AddonList::new();
        let long = "m".repeat(MAX_MODULE_LEN + 10);
        assert_eq!(list.ensure(&long).unwrap().module, long[..MAX_MODULE_LEN]);
        // The full and the truncated name refer to the same record.
        list.ensure(&long[..MAX_MODULE_LEN]).unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.find(&long).is_some());

        // A two-byte character straddling the limit is dropped whole.
        let straddling = format!("{}é", "m".repeat(MAX_MODULE_LEN - 1));
        let module = list.ensure(&straddling).unwrap().module.clone();
        assert_eq!(module, "m".repeat(MAX_MODULE_LEN - 1));
        assert!(list.remove_safe(&straddling));
        assert!(list.remove_safe(&long));
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_safe() {
        let mut list = AddonList::new();
        list.ensure("a").unwrap();
        list.ensure("b").unwrap();

        assert!(list.remove_safe("a"));
        assert!(!list.remove_safe("a"));
        assert!(list.find("a").is_none());
        assert!(list.find("b").is_some());
        assert!(list.find_mut("b").is_some());
        assert!(list.remove_safe("b"));
        assert!(list.is_empty());
    }
}
