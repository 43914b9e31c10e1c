//! Error types for template loading.

use std::path::PathBuf;

/// Error type for template operations.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Error reading the template file
    #[error("Failed to read template file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing YAML
    #[error("Failed to parse template YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
