//! The in-memory configuration document: module → field → value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field-name → value mapping for one module.
pub type ModuleValues = BTreeMap<String, Value>;

/// The nested module → field → value mapping mirrored to the backing file.
///
/// The document is an open mapping, not a fixed struct, because module names
/// are data. Entries for modules no schema describes (for example values
/// written by a newer program version) are carried verbatim and survive
/// saves untouched.
///
/// `BTreeMap` keys keep serialization deterministic: saving the same state
/// twice produces byte-identical files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    modules: BTreeMap<String, ModuleValues>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value at `module`/`field`, if present.
    pub fn get(&self, module: &str, field: &str) -> Option<&Value> {
        self.modules.get(module).and_then(|fields| fields.get(field))
    }

    /// Returns `true` if `module`/`field` holds a value.
    pub fn contains(&self, module: &str, field: &str) -> bool {
        self.get(module, field).is_some()
    }

    /// Inserts or replaces the value at `module`/`field`, creating the module
    /// entry when needed. Returns the previous value, if any.
    pub fn set(&mut self, module: &str, field: &str, value: Value) -> Option<Value> {
        self.modules
            .entry(module.to_string())
            .or_default()
            .insert(field.to_string(), value)
    }

    /// Returns the field values of one module, if present.
    pub fn module(&self, name: &str) -> Option<&ModuleValues> {
        self.modules.get(name)
    }

    /// Iterates module entries in key order.
    pub fn modules(&self) -> impl Iterator<Item = (&String, &ModuleValues)> {
        self.modules.iter()
    }

    /// Number of module entries, foreign ones included.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` when the document holds no module entries.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
