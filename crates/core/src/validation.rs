//! Load-time catalog validation.
//!
//! These checks run once when the knowledge base is assembled, so that a broken dataset fails
//! at startup instead of silently missing at request time.

use crate::catalog::{AliasTable, DiseaseCatalog, IntentCatalog};
use crate::error::{CatalogError, CatalogResult};

/// Validates that every alias is non-blank and points at a disease present in the catalog.
///
/// A blank alias is a substring of every input and would capture every message.
///
/// # Errors
///
/// Returns `CatalogError::InvalidInput` for a blank alias, or
/// `CatalogError::UnknownAliasTarget` for the first alias whose canonical name is not indexed
/// by `diseases`.
pub fn validate_aliases(aliases: &AliasTable, diseases: &DiseaseCatalog) -> CatalogResult<()> {
    for (position, entry) in aliases.entries().iter().enumerate() {
        if entry.alias.trim().is_empty() {
            return Err(CatalogError::InvalidInput(format!(
                "alias at position {} has an empty alias",
                position
            )));
        }
        if !diseases.contains(&entry.disease) {
            return Err(CatalogError::UnknownAliasTarget {
                alias: entry.alias.clone(),
                disease: entry.disease.clone(),
            });
        }
    }
    Ok(())
}

/// Validates that every disease record has a non-blank name.
///
/// # Errors
///
/// Returns `CatalogError::InvalidInput` for the first record whose name is empty or
/// whitespace-only.
pub fn validate_diseases(diseases: &DiseaseCatalog) -> CatalogResult<()> {
    match diseases
        .records()
        .iter()
        .position(|record| record.name.trim().is_empty())
    {
        Some(position) => Err(CatalogError::InvalidInput(format!(
            "disease at position {} has an empty name",
            position
        ))),
        None => Ok(()),
    }
}

/// Validates intent tags and reports patterns that would match every input.
///
/// An empty pattern is accepted, since it is a legal (if greedy) wildcard, but it is logged
/// because it shadows every rule declared after it.
///
/// # Errors
///
/// Returns `CatalogError::InvalidInput` if a tag is empty or whitespace-only.
pub fn validate_intents(intents: &IntentCatalog) -> CatalogResult<()> {
    for (position, rule) in intents.rules().iter().enumerate() {
        if rule.tag.trim().is_empty() {
            return Err(CatalogError::InvalidInput(format!(
                "intent at position {} has an empty tag",
                position
            )));
        }

        if rule
            .patterns
            .iter()
            .any(|p| p.chars().all(|c| c == '*' || c.is_whitespace()))
        {
            tracing::warn!(
                "intent {:?} has a pattern that matches every input",
                rule.tag
            );
        }
    }
    Ok(())
}
