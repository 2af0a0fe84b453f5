//! Persistence layer: the in-memory document and its JSON file store.

pub mod document;
pub mod json_file;

pub use document::{Document, ModuleValues};
pub use json_file::{JsonStore, StoreError};
