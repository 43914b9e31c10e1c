//! Table template definitions.

use serde::Deserialize;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Placeholder in the table-name pattern that is replaced by the schema.
pub const SCHEMA_PLACEHOLDER: &str = "{schema}";

/// Statement kind a query is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Insert,
    Update,
    Delete,
}

impl QueryKind {
    /// Lowercase name used in log events.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Insert => "insert",
            QueryKind::Update => "update",
            QueryKind::Delete => "delete",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The insert/update/delete query templates of one table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct QueryTemplates {
    pub insert: String,
    pub update: String,
    pub delete: String,
}

/// A table's parameterized queries plus its execution counter.
///
/// The counter is in-memory only and is shared by every kind and schema the
/// template is generated for. It is only ever advanced through
/// [`TableTemplate::next_execution_count`], a single atomic increment, so
/// overlapping generation cycles can never lose an update.
#[derive(Debug, Deserialize)]
pub struct TableTemplate {
    /// Table-name pattern containing `{schema}`
    #[serde(rename = "table")]
    pub table_pattern: String,

    /// Query templates per statement kind
    pub queries: QueryTemplates,

    #[serde(skip)]
    execution_count: AtomicI64,
}

impl TableTemplate {
    /// Create a new template with its counter at zero.
    pub fn new(table_pattern: impl Into<String>, queries: QueryTemplates) -> Self {
        Self {
            table_pattern: table_pattern.into(),
            queries,
            execution_count: AtomicI64::new(0),
        }
    }

    /// Resolve the table-name pattern for a schema.
    pub fn table_name(&self, schema: &str) -> String {
        self.table_pattern.replace(SCHEMA_PLACEHOLDER, schema)
    }

    /// Query template for the given kind.
    pub fn query(&self, kind: QueryKind) -> &str {
        match kind {
            QueryKind::Insert => &self.queries.insert,
            QueryKind::Update => &self.queries.update,
            QueryKind::Delete => &self.queries.delete,
        }
    }

    /// Current value of the execution counter.
    pub fn execution_count(&self) -> i64 {
        self.execution_count.load(Ordering::SeqCst)
    }

    /// Take the current counter value and advance the counter by one.
    ///
    /// Returns the value before the increment; that value is what the
    /// generated query sees as `{execution_count}`.
    pub fn next_execution_count(&self) -> i64 {
        self.execution_count.fetch_add(1, Ordering::SeqCst)
    }
}
