//! Query batch generator for the pg-loadgen workload generator.
//!
//! This crate provides the [`BatchGenerator`] which turns the table templates
//! of a [`loadgen_template::TemplateStore`] into batches of fully substituted,
//! single-line SQL statements.
//!
//! # Architecture
//!
//! ```text
//! TemplateStore (YAML)      schemas [s1, s2, ...]
//!        │                         │
//!        ▼                         ▼
//! ┌──────────────────────────────────────┐
//! │           BatchGenerator             │
//! │                                      │
//! │  (s1,t1) (s1,t2) .. (s2,t1) .. wrap  │◄── RandomValueProvider
//! └──────────────────┬───────────────────┘
//!                    │
//!                    ▼
//!        Batch { kind, queries }
//! ```
//!
//! # Example
//!
//! ```rust
//! use loadgen_generator::{BatchGenerator, SharedRng};
//! use loadgen_template::{QueryKind, TemplateStore};
//! use std::sync::Arc;
//!
//! let store = TemplateStore::from_yaml(r#"
//! - table: "{schema}.users"
//!   queries:
//!     insert: "INSERT INTO {table} VALUES ({execution_count}, '{r_str}')"
//!     update: "UPDATE {table} SET name = '{r_str1}' WHERE id = {r_int}"
//!     delete: "DELETE FROM {table} WHERE id = {r_int}"
//! "#).unwrap();
//!
//! let generator = BatchGenerator::new(
//!     Arc::new(store),
//!     vec!["public".to_string()],
//!     Arc::new(SharedRng::from_entropy()),
//! );
//! let batch = generator.generate(QueryKind::Insert, 3);
//! assert_eq!(batch.len(), 3);
//! assert!(batch.queries[0].starts_with("INSERT INTO public.users VALUES (0, '"));
//! ```

pub mod batch;
pub mod placeholder;
pub mod random;

// Re-exports for convenience
pub use batch::{
    Batch, BatchGenerator, BatchSizes, CycleBatches, MAX_BATCH_SIZE, RANDOM_STRING_LENGTH,
};
pub use placeholder::{collapse_line_breaks, PlaceholderValues};
pub use random::{RandomValueProvider, SharedRng};
