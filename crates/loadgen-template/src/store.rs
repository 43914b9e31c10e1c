//! Ordered template store loaded once at startup.

use crate::error::TemplateError;
use crate::template::TableTemplate;
use std::fs;
use std::path::Path;

/// Ordered sequence of table templates.
///
/// The order of the templates in the source file is the round-robin
/// traversal order. No template is added or removed after loading; the
/// per-template counters are the only state that changes.
#[derive(Debug, Default)]
pub struct TemplateStore {
    templates: Vec<TableTemplate>,
}

impl TemplateStore {
    /// Create a store from already-built templates.
    pub fn new(templates: Vec<TableTemplate>) -> Self {
        Self { templates }
    }

    /// Load templates from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse templates from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, TemplateError> {
        let templates: Vec<TableTemplate> = serde_yaml::from_str(yaml)?;
        if templates.is_empty() {
            tracing::warn!("Template source contains no tables, every batch will be empty");
        }
        tracing::info!(total_tables = templates.len(), "Loaded table templates");
        Ok(Self { templates })
    }

    /// Get a template by its position.
    pub fn get(&self, index: usize) -> Option<&TableTemplate> {
        self.templates.get(index)
    }

    /// Iterate templates in traversal order.
    pub fn iter(&self) -> std::slice::Iter<'_, TableTemplate> {
        self.templates.iter()
    }

    /// All templates in traversal order.
    pub fn templates(&self) -> &[TableTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl<'a> IntoIterator for &'a TemplateStore {
    type Item = &'a TableTemplate;
    type IntoIter = std::slice::Iter<'a, TableTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}
