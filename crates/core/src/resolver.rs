//! Disease resolution from free text.
//!
//! Resolution runs up to three tiers, and the first tier that fires decides the outcome:
//!
//! 1. **Alias**: the first alias (in table order) found in the lowercased input selects its
//!    canonical disease. If the catalog does not contain that disease the result is `None`;
//!    later tiers are not consulted.
//! 2. **Name**: known disease names found in the lowercased input. The longest name wins, so
//!    `"avian influenza"` beats `"influenza"`; equal lengths fall back to declaration order.
//! 3. **Symptoms** (optional): the input is split into symptom tokens and scored against each
//!    record's symptom list. The strictly highest overlap wins and ties keep the first record.

use crate::catalog::{AliasTable, DiseaseCatalog, DiseaseRecord};
use std::collections::HashSet;

/// The tier that produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Alias,
    Name,
    Symptoms,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MatchTier::Alias => "alias",
            MatchTier::Name => "name",
            MatchTier::Symptoms => "symptoms",
        };
        f.write_str(name)
    }
}

/// Resolves input text to a disease record.
#[derive(Debug, Clone, Copy)]
pub struct DiseaseResolver<'a> {
    diseases: &'a DiseaseCatalog,
    aliases: &'a AliasTable,
    symptom_matching: bool,
}

impl<'a> DiseaseResolver<'a> {
    pub fn new(diseases: &'a DiseaseCatalog, aliases: &'a AliasTable) -> Self {
        Self {
            diseases,
            aliases,
            symptom_matching: false,
        }
    }

    /// Enable or disable the symptom-overlap tier.
    pub fn with_symptom_matching(mut self, enabled: bool) -> Self {
        self.symptom_matching = enabled;
        self
    }

    pub fn resolve(&self, text: &str) -> Option<&'a DiseaseRecord> {
        self.resolve_with_tier(text).map(|(record, _)| record)
    }

    /// Resolve `text` and report which tier matched.
    pub fn resolve_with_tier(&self, text: &str) -> Option<(&'a DiseaseRecord, MatchTier)> {
        let lower = text.to_lowercase();

        if let Some(entry) = self
            .aliases
            .entries()
            .iter()
            .find(|entry| lower.contains(&entry.alias))
        {
            let record = self.diseases.get(&entry.disease);
            if record.is_none() {
                tracing::debug!(
                    "alias {:?} matched but {:?} is not in the catalog",
                    entry.alias,
                    entry.disease
                );
            }
            return record.map(|r| (r, MatchTier::Alias));
        }

        if let Some(record) = self.match_name(&lower) {
            return Some((record, MatchTier::Name));
        }

        if self.symptom_matching {
            return self
                .match_symptoms(&lower)
                .map(|r| (r, MatchTier::Symptoms));
        }

        None
    }

    fn match_name(&self, lower: &str) -> Option<&'a DiseaseRecord> {
        let mut best: Option<(usize, &'a DiseaseRecord)> = None;
        for (name, record) in self.diseases.indexed() {
            if !lower.contains(name) {
                continue;
            }
            if best.map_or(true, |(len, _)| name.len() > len) {
                best = Some((name.len(), record));
            }
        }
        best.map(|(_, record)| record)
    }

    fn match_symptoms(&self, lower: &str) -> Option<&'a DiseaseRecord> {
        let tokens = symptom_tokens(lower);
        if tokens.is_empty() {
            return None;
        }

        let mut best: Option<&'a DiseaseRecord> = None;
        let mut max_overlap = 0;
        for record in self.diseases.records() {
            let symptoms: HashSet<String> = record
                .symptoms
                .iter()
                .map(|s| normalise_symptom(s))
                .collect();
            let overlap = tokens.intersection(&symptoms).count();
            if overlap > max_overlap {
                max_overlap = overlap;
                best = Some(record);
            }
        }
        best
    }
}

/// Split input into candidate symptom tokens.
///
/// Tokens are separated by commas or the standalone word `and`, even when punctuation is
/// attached to it (`and;`). Inner whitespace is collapsed, surrounding punctuation is trimmed
/// and empty tokens are dropped.
pub fn symptom_tokens(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    let mut tokens = HashSet::new();

    for piece in lower.split(',') {
        let mut words: Vec<&str> = Vec::new();
        for word in piece.split_whitespace().chain(std::iter::once("and")) {
            if word.trim_matches(|c: char| c.is_ascii_punctuation()) != "and" {
                words.push(word);
                continue;
            }
            let token = normalise_symptom(&words.join(" "));
            if !token.is_empty() {
                tokens.insert(token);
            }
            words.clear();
        }
    }

    tokens
}

fn normalise_symptom(symptom: &str) -> String {
    symptom
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .to_lowercase()
}
