//! Errors raised while loading and validating catalogs.
//!
//! Matching itself never fails: a miss is `None` or the fallback tag, not an error.

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("catalog not found: {0}")]
    NotFound(String),
    #[error(
        "failed to read catalog file (path: {path}): {source}",
        path = path.display()
    )]
    FileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "unsupported catalog format (path: {path}); expected .json, .yaml or .yml",
        path = path.display()
    )]
    UnsupportedFormat { path: std::path::PathBuf },
    #[error("failed to parse JSON catalog: {0}")]
    JsonParse(serde_json::Error),
    #[error("failed to parse YAML catalog: {0}")]
    YamlParse(serde_yaml::Error),
    #[error("invalid pattern {pattern:?} in intent {tag:?}: {source}")]
    InvalidPattern {
        tag: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("alias {alias:?} points at unknown disease {disease:?}")]
    UnknownAliasTarget { alias: String, disease: String },
}

/// Type alias for Results that can fail with a [`CatalogError`].
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
