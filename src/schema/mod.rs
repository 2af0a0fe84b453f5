//! Schema layer: field descriptors and the module registry.
//!
//! Everything here is pure data and predicates. File handling lives in
//! [`crate::store`]; the two meet in [`crate::config::Config`].

pub mod field;
pub mod registry;

pub use field::{value_kind, Field, FieldError, FieldKind};
pub use registry::{ModuleRegistry, ModuleSchema, RegistryError};
