//! Wildcard-pattern intent classification.
//!
//! Each pattern is compiled once: `*` matches any run of characters (including none), every
//! other character is literal, and the match is a case-insensitive, unanchored search. Input
//! text is lowercased and stripped of ASCII punctuation before matching.
//!
//! Rules are tried in catalog order and the first rule with a matching pattern wins. There is
//! no scoring between rules.

use crate::catalog::IntentCatalog;
use crate::constants::FALLBACK_TAG;
use crate::error::{CatalogError, CatalogResult};
use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone)]
struct CompiledIntent {
    tag: String,
    patterns: Vec<Regex>,
}

/// Classifier over a fixed, ordered set of intents.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    intents: Vec<CompiledIntent>,
}

impl IntentClassifier {
    /// Compile every pattern in `catalog`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidPattern` if a pattern cannot be compiled (for example when
    /// it exceeds the regex size limit).
    pub fn new(catalog: &IntentCatalog) -> CatalogResult<Self> {
        let intents = catalog
            .rules()
            .iter()
            .map(|rule| {
                let patterns = rule
                    .patterns
                    .iter()
                    .map(|pattern| {
                        wildcard_to_regex(pattern).map_err(|source| CatalogError::InvalidPattern {
                            tag: rule.tag.clone(),
                            pattern: pattern.clone(),
                            source,
                        })
                    })
                    .collect::<CatalogResult<Vec<_>>>()?;
                Ok(CompiledIntent {
                    tag: rule.tag.clone(),
                    patterns,
                })
            })
            .collect::<CatalogResult<Vec<_>>>()?;

        Ok(Self { intents })
    }

    /// Return the tag of the first intent with a matching pattern, or [`FALLBACK_TAG`].
    pub fn classify(&self, text: &str) -> &str {
        let clean = normalise(text);
        self.intents
            .iter()
            .find(|intent| intent.patterns.iter().any(|re| re.is_match(&clean)))
            .map(|intent| intent.tag.as_str())
            .unwrap_or(FALLBACK_TAG)
    }
}

/// Lowercase `text` and remove ASCII punctuation.
pub fn normalise(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}

/// Compile a wildcard pattern into a case-insensitive, unanchored regex.
pub fn wildcard_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let expression = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    RegexBuilder::new(&expression)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
}
