//! Table templates for the pg-loadgen workload generator.
//!
//! This crate provides the types the generation engine reads its queries from:
//!
//! - [`TableTemplate`] - A table-name pattern, its insert/update/delete query
//!   templates and the per-template execution counter
//! - [`QueryKind`] - The statement kind a batch is generated for
//! - [`TemplateStore`] - The ordered, immutable-after-load list of templates
//!
//! # Template file
//!
//! ```yaml
//! - table: "{schema}.users"
//!   queries:
//!     insert: "INSERT INTO {table} (id, name) VALUES ({execution_count}, '{r_str}')"
//!     update: "UPDATE {table} SET name = '{r_str1}' WHERE id = {r_int}"
//!     delete: "DELETE FROM {table} WHERE id = {r_int}"
//! ```
//!
//! # Example
//!
//! ```rust
//! use loadgen_template::{QueryKind, TemplateStore};
//!
//! let store = TemplateStore::from_yaml(r#"
//! - table: "{schema}.users"
//!   queries:
//!     insert: "INSERT INTO {table} VALUES ({execution_count})"
//!     update: "UPDATE {table} SET v = {r_int}"
//!     delete: "DELETE FROM {table} WHERE v = {r_int}"
//! "#).unwrap();
//!
//! let users = store.get(0).unwrap();
//! assert_eq!(users.table_name("public"), "public.users");
//! assert!(users.query(QueryKind::Insert).starts_with("INSERT"));
//! ```

pub mod error;
pub mod store;
pub mod template;

// Re-exports for convenience
pub use error::TemplateError;
pub use store::TemplateStore;
pub use template::{QueryKind, QueryTemplates, TableTemplate};
