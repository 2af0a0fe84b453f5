//! Module registry: maps module names to their declared field lists.
//!
//! Registration happens once per module at program startup and is immutable
//! afterwards. The registry records the schema only; merging declared fields
//! with persisted values is the facade's job.

use thiserror::Error;

use crate::schema::field::Field;

/// Errors raised while registering a module schema.
///
/// Both are programming errors in the registering code, not runtime
/// conditions to recover from.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    /// A module with this name is already registered.
    #[error("module {module} is already registered")]
    DuplicateModule { module: String },

    /// Two fields in one registration share a name.
    #[error("field {field} appears more than once in module {module}")]
    DuplicateField { module: String, field: String },
}

/// The declared schema of one module: its name and its fields in declaration
/// order.
#[derive(Debug, Clone)]
pub struct ModuleSchema {
    name: String,
    fields: Vec<Field>,
}

impl ModuleSchema {
    /// The module name, unique within a registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up one field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }
}

/// Ordered registry of module schemas.
///
/// Registration order is preserved and drives report ordering. Module counts
/// stay small (tens at most), so lookups scan linearly instead of paying for
/// a map plus a separate order list.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<ModuleSchema>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a module schema.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateModule`] when the name is already
    /// taken and [`RegistryError::DuplicateField`] when two fields in
    /// `fields` share a name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        fields: Vec<Field>,
    ) -> Result<(), RegistryError> {
        let name = name.into();

        if self.module(&name).is_some() {
            return Err(RegistryError::DuplicateModule { module: name });
        }
        for (index, field) in fields.iter().enumerate() {
            if fields[..index].iter().any(|seen| seen.name() == field.name()) {
                return Err(RegistryError::DuplicateField {
                    module: name,
                    field: field.name().to_string(),
                });
            }
        }

        self.modules.push(ModuleSchema { name, fields });
        Ok(())
    }

    /// Removes a module schema, if present.
    ///
    /// Registration is meant to be permanent; this exists so a failed
    /// reconciliation can roll its registration back.
    pub(crate) fn unregister(&mut self, name: &str) {
        self.modules.retain(|module| module.name() != name);
    }

    /// Looks up a module schema by name.
    pub fn module(&self, name: &str) -> Option<&ModuleSchema> {
        self.modules.iter().find(|module| module.name() == name)
    }

    /// Looks up one field of one module.
    pub fn field(&self, module: &str, field: &str) -> Option<&Field> {
        self.module(module).and_then(|schema| schema.field(field))
    }

    /// Iterates module schemas in registration order.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleSchema> {
        self.modules.iter()
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` when no module is registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
