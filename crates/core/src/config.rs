//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Front-ends read environment variables or command-line flags and
//! hand the raw values to the parsing helpers here; nothing in the core reads the environment
//! while answering a message.

use crate::composer::{ReplyFormat, ResponseStrategy};
use crate::constants::{DEFAULT_DATA_DIR, DISEASES_FILENAME, INTENTS_FILENAME};
use crate::error::{CatalogError, CatalogResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    diseases_path: PathBuf,
    intents_path: PathBuf,
    aliases_path: Option<PathBuf>,
    reply_format: ReplyFormat,
    response_strategy: ResponseStrategy,
    symptom_matching: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if a catalog path does not point at a file.
    pub fn new(
        diseases_path: PathBuf,
        intents_path: PathBuf,
        aliases_path: Option<PathBuf>,
        reply_format: ReplyFormat,
        response_strategy: ResponseStrategy,
        symptom_matching: bool,
    ) -> CatalogResult<Self> {
        for path in [Some(&diseases_path), Some(&intents_path), aliases_path.as_ref()]
            .into_iter()
            .flatten()
        {
            if !path.is_file() {
                return Err(CatalogError::NotFound(path.display().to_string()));
            }
        }

        Ok(Self {
            diseases_path,
            intents_path,
            aliases_path,
            reply_format,
            response_strategy,
            symptom_matching,
        })
    }

    /// Configuration using the bundled catalog filenames inside `data_dir` and default options.
    pub fn from_data_dir(data_dir: &Path) -> CatalogResult<Self> {
        Self::new(
            data_dir.join(DISEASES_FILENAME),
            data_dir.join(INTENTS_FILENAME),
            None,
            ReplyFormat::default(),
            ResponseStrategy::default(),
            false,
        )
    }

    pub fn diseases_path(&self) -> &Path {
        &self.diseases_path
    }

    pub fn intents_path(&self) -> &Path {
        &self.intents_path
    }

    pub fn aliases_path(&self) -> Option<&Path> {
        self.aliases_path.as_deref()
    }

    pub fn reply_format(&self) -> ReplyFormat {
        self.reply_format
    }

    pub fn response_strategy(&self) -> ResponseStrategy {
        self.response_strategy
    }

    pub fn symptom_matching(&self) -> bool {
        self.symptom_matching
    }
}

/// Resolve the directory holding the bundled catalogs without reading environment variables.
///
/// If `override_dir` is provided it must contain the disease catalog. Otherwise this searches
/// for `crates/core/data/` relative to the current working directory and then walks up from
/// `CARGO_MANIFEST_DIR`.
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> CatalogResult<PathBuf> {
    fn looks_like_data_dir(path: &Path) -> bool {
        path.join(DISEASES_FILENAME).is_file()
    }

    if let Some(data_dir) = override_dir {
        if data_dir.is_dir() && looks_like_data_dir(&data_dir) {
            return Ok(data_dir);
        }
        return Err(CatalogError::InvalidInput(format!(
            "data directory override is not valid (must contain {})",
            DISEASES_FILENAME
        )));
    }

    let cwd_relative = PathBuf::from(DEFAULT_DATA_DIR);
    if looks_like_data_dir(&cwd_relative) {
        return Ok(cwd_relative);
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(DEFAULT_DATA_DIR);
        if looks_like_data_dir(&candidate) {
            return Ok(candidate);
        }
    }

    Err(CatalogError::NotFound(format!(
        "could not locate {}/ directory with {}",
        DEFAULT_DATA_DIR, DISEASES_FILENAME
    )))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the reply format from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`ReplyFormat::Plain`].
pub fn reply_format_from_env_value(value: Option<String>) -> CatalogResult<ReplyFormat> {
    non_blank(value)
        .map(|v| v.parse::<ReplyFormat>())
        .transpose()
        .map(Option::unwrap_or_default)
}

/// Parse the response strategy from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`ResponseStrategy::First`].
pub fn response_strategy_from_env_value(
    value: Option<String>,
) -> CatalogResult<ResponseStrategy> {
    non_blank(value)
        .map(|v| v.parse::<ResponseStrategy>())
        .transpose()
        .map(Option::unwrap_or_default)
}

/// Parse an on/off switch. Missing or blank values are `false`.
pub fn flag_from_env_value(value: Option<String>) -> CatalogResult<bool> {
    match non_blank(value).map(|v| v.to_ascii_lowercase()).as_deref() {
        None | Some("0") | Some("false") | Some("no") | Some("off") => Ok(false),
        Some("1") | Some("true") | Some("yes") | Some("on") => Ok(true),
        Some(other) => Err(CatalogError::InvalidInput(format!(
            "expected a boolean flag, got {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_catalogs(dir: &Path) {
        fs::write(dir.join(DISEASES_FILENAME), "[]").expect("should write diseases");
        fs::write(dir.join(INTENTS_FILENAME), r#"{"intents": []}"#).expect("should write intents");
    }

    #[test]
    fn test_from_data_dir_uses_bundled_filenames() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        write_catalogs(temp_dir.path());

        let cfg = CoreConfig::from_data_dir(temp_dir.path()).expect("config should build");
        assert_eq!(cfg.diseases_path(), temp_dir.path().join(DISEASES_FILENAME));
        assert_eq!(cfg.intents_path(), temp_dir.path().join(INTENTS_FILENAME));
        assert_eq!(cfg.aliases_path(), None);
        assert_eq!(cfg.reply_format(), ReplyFormat::Plain);
        assert_eq!(cfg.response_strategy(), ResponseStrategy::First);
        assert!(!cfg.symptom_matching());
    }

    #[test]
    fn test_new_rejects_missing_catalog() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = CoreConfig::from_data_dir(temp_dir.path()).expect_err("should fail fast");
        assert!(matches!(err, CatalogError::NotFound(msg) if msg.contains(DISEASES_FILENAME)));
    }

    #[test]
    fn test_resolve_data_dir_override() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = resolve_data_dir(Some(temp_dir.path().to_path_buf()))
            .expect_err("empty dir should be rejected");
        assert!(matches!(err, CatalogError::InvalidInput(_)));

        write_catalogs(temp_dir.path());
        let resolved = resolve_data_dir(Some(temp_dir.path().to_path_buf()))
            .expect("override should be accepted");
        assert_eq!(resolved, temp_dir.path());
    }

    #[test]
    fn test_resolve_data_dir_finds_bundled_catalogs() {
        let resolved = resolve_data_dir(None).expect("bundled data dir should be found");
        assert!(resolved.join(INTENTS_FILENAME).is_file());
    }

    #[test]
    fn test_env_value_parsers() {
        assert_eq!(reply_format_from_env_value(None).unwrap(), ReplyFormat::Plain);
        assert_eq!(
            reply_format_from_env_value(Some("  ".into())).unwrap(),
            ReplyFormat::Plain
        );
        assert_eq!(
            reply_format_from_env_value(Some("markdown".into())).unwrap(),
            ReplyFormat::Markdown
        );
        assert_eq!(
            response_strategy_from_env_value(Some("random".into())).unwrap(),
            ResponseStrategy::Random
        );
        assert!(flag_from_env_value(Some("TRUE".into())).unwrap());
        assert!(!flag_from_env_value(None).unwrap());
        assert!(flag_from_env_value(Some("maybe".into())).is_err());
    }
}
