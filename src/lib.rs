//! # modconf
//!
//! Typed, module-scoped configuration persisted to a single JSON file.
//!
//! Independent parts of a program ("modules") declare the configuration
//! fields they need: a name, a default, and a kind that constrains which
//! values are accepted. A [`Config`] bound to one file merges those
//! declarations with whatever the file already holds, fills gaps with
//! defaults, and writes every accepted change back to disk before the call
//! returns. Hand-edited files are welcome; values that no longer match their
//! declared kind are reported instead of silently replaced.
//!
//! # Architecture overview (for beginners)
//!
//! The crate is three small layers:
//!
//! - **`schema`** – What values are allowed.  A [`Field`] pairs a name and a
//!   default with a [`FieldKind`] (int, string, bool, choice, list,
//!   tuple-list, dict); the [`ModuleRegistry`] maps each module name to its
//!   declared fields.
//!
//! - **`store`** – Where values live.  The [`Document`] is the nested
//!   module → field → value mapping; a [`JsonStore`] reads and writes it as
//!   pretty-printed JSON at one path.
//!
//! - **`config`** – What callers touch.  A [`Config`] owns one registry, one
//!   document, and one store, and keeps the three in agreement.
//!
//! # Thread safety
//!
//! None, on purpose.  A `Config` is a plain single-threaded value doing
//! blocking file I/O; concurrent access from several threads or processes is
//! out of scope for this crate.  Wrap an instance in your own lock if you
//! need sharing.
//!
//! # Example
//!
//! ```no_run
//! use modconf::{Config, Field};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), modconf::ConfigError> {
//! let mut config = Config::open("app_config.json")?;
//! config.register_module(
//!     "downloader",
//!     vec![
//!         Field::bool("enabled", true),
//!         Field::int("parallel_jobs", 4),
//!         Field::string("target_dir", "/tmp/downloads"),
//!     ],
//! )?;
//!
//! config.set("downloader", "parallel_jobs", json!(8))?;
//! assert_eq!(config.get("downloader", "parallel_jobs")?, &json!(8));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod schema;
pub mod store;

// Re-export the most-used types at the crate root so callers can write
// `modconf::Config` instead of `modconf::config::Config`.
pub use config::report::{FieldReport, ModuleReport};
pub use config::{Config, ConfigError};
pub use schema::field::{value_kind, Field, FieldError, FieldKind};
pub use schema::registry::{ModuleRegistry, ModuleSchema, RegistryError};
pub use store::document::{Document, ModuleValues};
pub use store::json_file::{JsonStore, StoreError};
