//! Round-robin batch generation over (schema × template).

use crate::placeholder::{collapse_line_breaks, PlaceholderValues};
use crate::random::RandomValueProvider;
use loadgen_template::{QueryKind, TableTemplate, TemplateStore};
use std::sync::Arc;
use tracing::debug;

/// Length of every `{r_str*}` value.
pub const RANDOM_STRING_LENGTH: usize = 10;

/// Largest per-kind batch a cycle may request.
pub const MAX_BATCH_SIZE: i64 = 1_000_000;

const MAX_PREALLOCATED_QUERIES: usize = 4096;

/// Ordered, fully substituted queries of one statement kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub kind: QueryKind,
    pub queries: Vec<String>,
}

impl Batch {
    /// An empty batch of the given kind.
    pub fn empty(kind: QueryKind) -> Self {
        Self {
            kind,
            queries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Requested batch sizes per cycle. Zero or negative sizes yield empty batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSizes {
    pub inserts: i64,
    pub updates: i64,
    pub deletes: i64,
}

impl Default for BatchSizes {
    fn default() -> Self {
        Self {
            inserts: 100,
            updates: 100,
            deletes: 100,
        }
    }
}

/// The three batches produced by one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleBatches {
    pub inserts: Batch,
    pub updates: Batch,
    pub deletes: Batch,
}

impl CycleBatches {
    /// Total number of queries across the three batches.
    pub fn total(&self) -> usize {
        self.inserts.len() + self.updates.len() + self.deletes.len()
    }

    /// Iterate the batches in insert, update, delete order.
    pub fn iter(&self) -> impl Iterator<Item = &Batch> {
        [&self.inserts, &self.updates, &self.deletes].into_iter()
    }

    /// Consume into the batches in insert, update, delete order.
    pub fn into_batches(self) -> [Batch; 3] {
        [self.inserts, self.updates, self.deletes]
    }
}

/// Generates query batches from a template store.
///
/// Every `generate` call walks schemas in order and, within each schema,
/// templates in order, wrapping around until the requested count is reached.
/// Each produced query advances exactly one template counter by one.
///
/// The generator is cheap to clone and can be used from several cycles at
/// once; template counters are the only shared mutable state.
#[derive(Clone)]
pub struct BatchGenerator {
    templates: Arc<TemplateStore>,
    schemas: Arc<[String]>,
    random: Arc<dyn RandomValueProvider>,
}

impl BatchGenerator {
    /// Create a new generator.
    pub fn new(
        templates: Arc<TemplateStore>,
        schemas: impl Into<Arc<[String]>>,
        random: Arc<dyn RandomValueProvider>,
    ) -> Self {
        Self {
            templates,
            schemas: schemas.into(),
            random,
        }
    }

    /// Get a reference to the template store.
    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    /// Schemas in traversal order.
    pub fn schemas(&self) -> &[String] {
        &self.schemas
    }

    /// Generate `target_count` queries of the given kind.
    pub fn generate(&self, kind: QueryKind, target_count: i64) -> Batch {
        let templates = self.templates.templates();
        let pairs = templates.len() * self.schemas.len();

        if target_count <= 0 || pairs == 0 {
            return Batch::empty(kind);
        }

        let target = usize::try_from(target_count).unwrap_or(usize::MAX);
        let mut queries = Vec::with_capacity(target.min(MAX_PREALLOCATED_QUERIES));

        for i in 0..target {
            let position = i % pairs;
            let schema = &self.schemas[position / templates.len()];
            let template = &templates[position % templates.len()];

            let query = self.render(kind, schema, template);
            debug!(kind = %kind, query = %query, "generated query");
            queries.push(query);
        }

        Batch { kind, queries }
    }

    /// Generate the insert, update and delete batches of one cycle.
    pub fn generate_cycle(&self, sizes: BatchSizes) -> CycleBatches {
        CycleBatches {
            inserts: self.generate(QueryKind::Insert, sizes.inserts),
            updates: self.generate(QueryKind::Update, sizes.updates),
            deletes: self.generate(QueryKind::Delete, sizes.deletes),
        }
    }

    fn render(&self, kind: QueryKind, schema: &str, template: &TableTemplate) -> String {
        let execution_count = template.next_execution_count();
        let table = template.table_name(schema);

        let values = PlaceholderValues {
            table: &table,
            schema,
            execution_count,
            r_str: self.random.random_string(RANDOM_STRING_LENGTH),
            r_str1: self.random.random_string(RANDOM_STRING_LENGTH),
            r_str2: self.random.random_string(RANDOM_STRING_LENGTH),
            r_int: self.random.random_int(),
            r_f: self.random.random_float(),
        };

        collapse_line_breaks(&values.render(template.query(kind)))
    }
}

impl std::fmt::Debug for BatchGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchGenerator")
            .field("templates", &self.templates.len())
            .field("schemas", &self.schemas)
            .finish()
    }
}
