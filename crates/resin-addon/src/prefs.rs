//! Add-on preference types.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AddonError;

/// Definition of an add-on's preference panel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AddonPrefType {
    /// Identifier, normally the add-on's module name.
    pub idname: String,
    /// Display label.
    pub label: String,
}

impl AddonPrefType {
    /// Creates a preference type labelled with its identifier.
    pub fn new(idname: impl Into<String>) -> Self {
        let idname = idname.into();
        Self {
            label: idname.clone(),
            idname,
        }
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Preference types by identifier.
#[derive(Debug, Default)]
pub struct AddonPrefTypeRegistry {
    types: HashMap<String, AddonPrefType>,
}

impl AddonPrefTypeRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a preference type.
    ///
    /// Unless `quiet`, empty and unknown identifiers are logged as warnings.
    pub fn find(&self, idname: &str, quiet: bool) -> Option<&AddonPrefType> {
        if idname.is_empty() {
            if !quiet {
                warn!("search for empty addon-pref");
            }
            return None;
        }
        let found = self.types.get(idname);
        if found.is_none() && !quiet {
            warn!(idname, "search for unknown addon-pref");
        }
        found
    }

    /// Registers a preference type.
    pub fn add(&mut self, pref_type: AddonPrefType) -> Result<(), AddonError> {
        if pref_type.idname.is_empty() {
            return Err(AddonError::EmptyIdname);
        }
        if self.types.contains_key(&pref_type.idname) {
            return Err(AddonError::DuplicatePrefType(pref_type.idname));
        }
        self.types.insert(pref_type.idname.clone(), pref_type);
        Ok(())
    }

    /// Unregisters a preference type, returning it.
    pub fn remove(&mut self, idname: &str) -> Option<AddonPrefType> {
        self.types.remove(idname)
    }

    /// Returns true if an identifier is registered.
    pub fn contains(&self, idname: &str) -> bool {
        self.types.contains_key(idname)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
