//! Configuration facade tying the schema registry to the persisted document.
//!
//! [`Config`] owns the module registry, the in-memory document, and the file
//! store. Callers construct one per backing file, register their modules at
//! startup, and read or write values through it. Every successful write lands
//! on disk before the call returns.
//!
//! There is no locking anywhere in this crate: a `Config` is meant to be
//! owned by one thread of one process. Wrap the instance yourself if you
//! need sharing.

pub mod report;

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::report::{FieldReport, ModuleReport};
use crate::schema::field::{value_kind, Field};
use crate::schema::registry::{ModuleRegistry, ModuleSchema, RegistryError};
use crate::store::document::Document;
use crate::store::json_file::{JsonStore, StoreError};

/// Errors surfaced by [`Config`] operations.
///
/// No operation leaves partial state behind: whichever variant comes back,
/// the registry, the in-memory document, and the file are as they were
/// before the call.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The backing file could not be read, parsed, or written.
    #[error("configuration file error: {0}")]
    Store(#[from] StoreError),

    /// A module registration violated the schema rules.
    #[error("schema registration error: {0}")]
    Registry(#[from] RegistryError),

    /// The named module is not registered.
    #[error("unknown module: {module}")]
    UnknownModule { module: String },

    /// The named field is not declared by the module's schema.
    #[error("unknown field: {module}.{field}")]
    UnknownField { module: String, field: String },

    /// A value offered to [`Config::set`] or [`Config::apply`] violates the
    /// field's kind contract. The stored value is unchanged.
    #[error("invalid value for {module}.{field}: expected {expected}, got {actual}")]
    Validation {
        module: String,
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A value already persisted in the file violates the field's kind
    /// contract, typically after a hand edit.
    #[error("persisted value for {module}.{field} has the wrong type: expected {expected}, got {actual}")]
    TypeMismatch {
        module: String,
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Facade over a schema registry and a file-backed configuration document.
///
/// Construction loads the backing file, so a `Config` you hold is always in
/// sync with the last successfully loaded or saved state. See the module docs
/// for the single-threaded scope.
#[derive(Debug)]
pub struct Config {
    store: JsonStore,
    registry: ModuleRegistry,
    document: Document,
}

impl Config {
    /// Opens the configuration backed by the file at `path`.
    ///
    /// A missing file is not an error: the config starts from an empty
    /// document and the file is created by the first save. Anything else that
    /// stops the load (unparseable or wrongly-shaped content, I/O failure)
    /// is fatal, because silently starting fresh would discard the user's
    /// file on the next save.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Store`] wrapping [`StoreError::Corrupt`] or
    /// [`StoreError::Io`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let store = JsonStore::new(path);
        let document = match store.load() {
            Ok(document) => document,
            Err(StoreError::NotFound { .. }) => {
                debug!(
                    "no configuration file at {}; starting from an empty document",
                    store.path().display()
                );
                Document::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            store,
            registry: ModuleRegistry::new(),
            document,
        })
    }

    /// Registers `fields` under `module` and reconciles them with the
    /// persisted document.
    ///
    /// Reconciliation merges the declared schema into whatever the file
    /// already holds: fields without a persisted value receive their default,
    /// fields with one keep it after a type check. The document is saved
    /// before this returns, so the file exists on disk as soon as the first
    /// module registers.
    ///
    /// Registering the same module name twice on one `Config` is an error,
    /// even with an identical field list. Opening a fresh `Config` on the
    /// same file and registering again is the supported pattern (every
    /// program start does exactly that) and leaves persisted values
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Registry`] for duplicate module or field names,
    /// [`ConfigError::TypeMismatch`] when a persisted value violates its
    /// field's kind (for example after a hand edit), and
    /// [`ConfigError::Store`] when the save fails.
    pub fn register_module(&mut self, module: &str, fields: Vec<Field>) -> Result<(), ConfigError> {
        let field_count = fields.len();
        self.registry.register(module, fields)?;

        match self.reconcile(module) {
            Ok(()) => {
                debug!("registered module {module} ({field_count} fields)");
                Ok(())
            }
            Err(e) => {
                self.registry.unregister(module);
                Err(e)
            }
        }
    }

    /// Returns the current value of `module`.`field`, verbatim from the
    /// document.
    ///
    /// Values were validated on the way in, so reads check nothing and touch
    /// no files.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownModule`] / [`ConfigError::UnknownField`]
    /// when the names are not registered.
    pub fn get(&self, module: &str, field: &str) -> Result<&Value, ConfigError> {
        self.require_field(module, field)?;
        match self.document.get(module, field) {
            Some(value) => Ok(value),
            // Reconciliation guarantees an entry for every registered field.
            None => Err(ConfigError::UnknownField {
                module: module.to_string(),
                field: field.to_string(),
            }),
        }
    }

    /// Sets `module`.`field` to `value` and persists the document.
    ///
    /// The file on disk reflects the new value before this returns. On any
    /// error the stored value is unchanged, in memory and on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownModule`] / [`ConfigError::UnknownField`]
    /// for unregistered names, [`ConfigError::Validation`] when the field
    /// rejects `value`, and [`ConfigError::Store`] when the save fails.
    pub fn set(&mut self, module: &str, field: &str, value: Value) -> Result<(), ConfigError> {
        let declared = self.require_field(module, field)?;
        if !declared.accepts(&value) {
            return Err(ConfigError::Validation {
                module: module.to_string(),
                field: field.to_string(),
                expected: declared.kind().tag(),
                actual: value_kind(&value),
            });
        }

        let before = self.document.clone();
        self.document.set(module, field, value);
        if let Err(e) = self.store.save(&self.document) {
            self.document = before;
            return Err(e.into());
        }
        debug!("set {module}.{field}");
        Ok(())
    }

    /// Applies many values at once, persisting them with a single save.
    ///
    /// `updates` has the same shape as the document itself, so edited output
    /// of [`Config::document`] (say, posted back by a settings UI) can be
    /// fed straight in. Entries naming an unregistered module or field are
    /// skipped, not errors: the update may come from a build with more
    /// modules than this one. Every applicable value is validated before
    /// anything is applied; one bad value fails the whole call and changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for the first rejected value and
    /// [`ConfigError::Store`] when the save fails (the document is restored).
    pub fn apply(&mut self, updates: &Document) -> Result<(), ConfigError> {
        // Validation pass over the applicable subset.
        for (module, fields) in updates.modules() {
            for (field, value) in fields {
                let declared = match self.registry.field(module, field) {
                    Some(declared) => declared,
                    None => continue,
                };
                if !declared.accepts(value) {
                    return Err(ConfigError::Validation {
                        module: module.clone(),
                        field: field.clone(),
                        expected: declared.kind().tag(),
                        actual: value_kind(value),
                    });
                }
            }
        }

        // Apply pass.
        let before = self.document.clone();
        let mut applied = 0usize;
        for (module, fields) in updates.modules() {
            for (field, value) in fields {
                if self.registry.field(module, field).is_some() {
                    self.document.set(module, field, value.clone());
                    applied += 1;
                }
            }
        }
        if let Err(e) = self.store.save(&self.document) {
            self.document = before;
            return Err(e.into());
        }
        debug!("applied {applied} values from an update document");
        Ok(())
    }

    /// Reports every registered module with its schema and current values,
    /// in registration order.
    pub fn describe(&self) -> Vec<ModuleReport> {
        self.registry
            .modules()
            .map(|schema| self.report_for(schema))
            .collect()
    }

    /// Reports one registered module.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownModule`] when `module` is not
    /// registered.
    pub fn describe_module(&self, module: &str) -> Result<ModuleReport, ConfigError> {
        match self.registry.module(module) {
            Some(schema) => Ok(self.report_for(schema)),
            None => Err(ConfigError::UnknownModule {
                module: module.to_string(),
            }),
        }
    }

    /// The plain module → field → value mapping, foreign modules included.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    /// Checks that `module`.`field` is registered and returns its schema.
    fn require_field(&self, module: &str, field: &str) -> Result<&Field, ConfigError> {
        let schema = match self.registry.module(module) {
            Some(schema) => schema,
            None => {
                return Err(ConfigError::UnknownModule {
                    module: module.to_string(),
                })
            }
        };
        match schema.field(field) {
            Some(declared) => Ok(declared),
            None => Err(ConfigError::UnknownField {
                module: module.to_string(),
                field: field.to_string(),
            }),
        }
    }

    /// Merges the named module's declared fields into the document and saves.
    ///
    /// Persisted values are type-checked before any mutation; a failed save
    /// restores the previous document. Either way a failure leaves document
    /// and file untouched.
    fn reconcile(&mut self, module: &str) -> Result<(), ConfigError> {
        if let Some(err) = self.find_type_mismatch(module) {
            return Err(err);
        }

        let before = self.document.clone();
        self.fill_defaults(module);
        if let Err(e) = self.store.save(&self.document) {
            self.document = before;
            return Err(e.into());
        }
        Ok(())
    }

    /// Returns the first persisted value of `module` that violates its
    /// field's kind, if any.
    fn find_type_mismatch(&self, module: &str) -> Option<ConfigError> {
        let schema = self.registry.module(module)?;
        for field in schema.fields() {
            if let Some(existing) = self.document.get(module, field.name()) {
                if !field.accepts(existing) {
                    return Some(ConfigError::TypeMismatch {
                        module: module.to_string(),
                        field: field.name().to_string(),
                        expected: field.kind().tag(),
                        actual: value_kind(existing),
                    });
                }
            }
        }
        None
    }

    /// Inserts defaults for declared fields the document does not hold yet.
    fn fill_defaults(&mut self, module: &str) {
        let schema = match self.registry.module(module) {
            Some(schema) => schema,
            None => return,
        };
        for field in schema.fields() {
            if !self.document.contains(module, field.name()) {
                self.document
                    .set(module, field.name(), field.default_value().clone());
            }
        }
    }

    /// Builds the report for one module schema.
    fn report_for(&self, schema: &ModuleSchema) -> ModuleReport {
        let fields = schema
            .fields()
            .iter()
            .map(|field| {
                let value = self
                    .document
                    .get(schema.name(), field.name())
                    .cloned()
                    .unwrap_or_else(|| field.default_value().clone());
                FieldReport::new(field, value)
            })
            .collect();
        ModuleReport {
            module: schema.name().to_string(),
            fields,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
