//! Disease, intent and alias catalogs.
//!
//! Catalogs are parsed from on-disk files once at startup and are read-only afterwards.
//! The file format is chosen from the extension: `.json` is parsed with `serde_json`,
//! `.yaml`/`.yml` with `serde_yaml`.
//!
//! Declaration order is preserved everywhere because match priority depends on it.

use crate::constants::DEFAULT_ALIASES;
use crate::error::{CatalogError, CatalogResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One disease entry from the disease catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    #[serde(rename = "disease")]
    pub name: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub precautions: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Ordered disease records plus a lowercase name index.
///
/// When two records share a name (case-insensitively) the later record wins the index entry,
/// while the name keeps the position where it was first seen. Both records stay in
/// [`DiseaseCatalog::records`].
#[derive(Debug, Clone, Default)]
pub struct DiseaseCatalog {
    records: Vec<DiseaseRecord>,
    index: HashMap<String, usize>,
    names: Vec<String>,
}

impl DiseaseCatalog {
    pub fn new(records: Vec<DiseaseRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        let mut names = Vec::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            let key = record.name.to_lowercase();
            if let Some(previous) = index.insert(key.clone(), position) {
                tracing::warn!(
                    "duplicate disease name {:?}; record {} replaces record {}",
                    record.name,
                    position,
                    previous
                );
            } else {
                names.push(key);
            }
        }

        Self {
            records,
            index,
            names,
        }
    }

    /// Load the catalog from a JSON or YAML file containing a list of records.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let records: Vec<DiseaseRecord> = parse_file(path)?;
        tracing::info!(
            "loaded {} disease records from {}",
            records.len(),
            path.display()
        );
        Ok(Self::new(records))
    }

    pub fn from_json_str(contents: &str) -> CatalogResult<Self> {
        serde_json::from_str(contents)
            .map(Self::new)
            .map_err(CatalogError::JsonParse)
    }

    pub fn records(&self) -> &[DiseaseRecord] {
        &self.records
    }

    /// Look a record up by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&DiseaseRecord> {
        self.index
            .get(&name.to_lowercase())
            .map(|&position| &self.records[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&name.to_lowercase())
    }

    /// Indexed `(lowercase name, record)` pairs in first-seen order.
    pub fn indexed(&self) -> impl Iterator<Item = (&str, &DiseaseRecord)> + '_ {
        self.names
            .iter()
            .map(|name| (name.as_str(), &self.records[self.index[name]]))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One intent: a tag, its wildcard patterns and its canned responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRule {
    pub tag: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
}

#[derive(Deserialize)]
struct IntentsFile {
    intents: Vec<IntentRule>,
}

/// Intent rules in match priority order.
#[derive(Debug, Clone, Default)]
pub struct IntentCatalog {
    rules: Vec<IntentRule>,
}

impl IntentCatalog {
    pub fn new(rules: Vec<IntentRule>) -> Self {
        Self { rules }
    }

    /// Load the catalog from a file shaped as `{ "intents": [...] }`.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let file: IntentsFile = parse_file(path)?;
        tracing::info!(
            "loaded {} intents from {}",
            file.intents.len(),
            path.display()
        );
        Ok(Self::new(file.intents))
    }

    pub fn from_json_str(contents: &str) -> CatalogResult<Self> {
        let file: IntentsFile = serde_json::from_str(contents).map_err(CatalogError::JsonParse)?;
        Ok(Self::new(file.intents))
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Canned responses for a tag; empty when the tag is unknown.
    pub fn responses_for(&self, tag: &str) -> &[String] {
        self.rules
            .iter()
            .find(|rule| rule.tag == tag)
            .map(|rule| rule.responses.as_slice())
            .unwrap_or(&[])
    }
}

/// One alias entry as stored in an alias file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    pub alias: String,
    pub disease: String,
}

/// Colloquial names mapped to canonical disease names, in match priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<Alias>,
}

impl AliasTable {
    /// Build a table; aliases are lowercased so they can be matched against lowercased input.
    pub fn new(entries: Vec<Alias>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| Alias {
                alias: entry.alias.to_lowercase(),
                disease: entry.disease,
            })
            .collect();
        Self { entries }
    }

    pub fn load(path: &Path) -> CatalogResult<Self> {
        let entries: Vec<Alias> = parse_file(path)?;
        tracing::info!("loaded {} aliases from {}", entries.len(), path.display());
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[Alias] {
        &self.entries
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALIASES
                .iter()
                .map(|(alias, disease)| Alias {
                    alias: (*alias).into(),
                    disease: (*disease).into(),
                })
                .collect(),
        )
    }
}

/// Read and deserialise a catalog file, picking the parser from the file extension.
fn parse_file<T: DeserializeOwned>(path: &Path) -> CatalogResult<T> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    match extension.as_deref() {
        Some("json") => serde_json::from_str(&contents).map_err(CatalogError::JsonParse),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&contents).map_err(CatalogError::YamlParse)
        }
        _ => Err(CatalogError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn record(name: &str, symptoms: &[&str]) -> DiseaseRecord {
        DiseaseRecord {
            name: name.into(),
            symptoms: symptoms.iter().map(|s| (*s).into()).collect(),
            precautions: vec![],
            actions: vec![],
        }
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let catalog = DiseaseCatalog::from_json_str(r#"[{"disease": "Measles"}]"#)
            .expect("catalog should parse");

        let measles = catalog.get("measles").expect("measles should be indexed");
        assert!(measles.symptoms.is_empty());
        assert!(measles.precautions.is_empty());
        assert!(measles.actions.is_empty());
    }

    #[test]
    fn test_lookup_ignores_case() {
        let catalog = DiseaseCatalog::new(vec![record("COVID-19", &["fever"])]);

        assert_eq!(catalog.get("covid-19").map(|r| r.name.as_str()), Some("COVID-19"));
        assert!(catalog.contains("Covid-19"));
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let catalog = DiseaseCatalog::new(vec![
            record("Influenza", &["fever"]),
            record("Measles", &["rash"]),
            record("influenza", &["cough"]),
        ]);

        assert_eq!(catalog.len(), 3, "both duplicates stay in the ordered records");
        assert_eq!(catalog.get("influenza").unwrap().symptoms, vec!["cough"]);

        let indexed: Vec<&str> = catalog.indexed().map(|(name, _)| name).collect();
        assert_eq!(indexed, vec!["influenza", "measles"]);
        let (_, first) = catalog.indexed().next().unwrap();
        assert_eq!(first.symptoms, vec!["cough"]);
    }

    #[test]
    fn test_load_yaml_disease_catalog() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("diseases.yaml");
        fs::write(
            &path,
            "- disease: Cholera\n  symptoms: [diarrhoea, vomiting]\n  actions:\n    - rehydrate\n",
        )
        .expect("should write fixture");

        let catalog = DiseaseCatalog::load(&path).expect("yaml catalog should load");
        let cholera = catalog.get("cholera").unwrap();
        assert_eq!(cholera.symptoms, vec!["diarrhoea", "vomiting"]);
        assert_eq!(cholera.actions, vec!["rehydrate"]);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("diseases.csv");
        fs::write(&path, "disease\nflu\n").expect("should write fixture");

        let err = DiseaseCatalog::load(&path).expect_err("csv should be rejected");
        assert!(matches!(err, CatalogError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = IntentCatalog::load(&temp_dir.path().join("missing.json"))
            .expect_err("missing file should fail");
        assert!(matches!(err, CatalogError::FileRead { .. }));
    }

    #[test]
    fn test_intent_responses_are_optional() {
        let catalog = IntentCatalog::from_json_str(
            r#"{"intents": [{"tag": "symptoms", "patterns": ["symptom*"]}]}"#,
        )
        .expect("intents should parse");

        assert_eq!(catalog.rules().len(), 1);
        assert!(catalog.responses_for("symptoms").is_empty());
        assert!(catalog.responses_for("unknown").is_empty());
    }

    #[test]
    fn test_alias_table_lowercases_aliases() {
        let table = AliasTable::new(vec![Alias {
            alias: "Swine Flu".into(),
            disease: "H1N1".into(),
        }]);
        assert_eq!(table.entries()[0].alias, "swine flu");
        assert_eq!(table.entries()[0].disease, "H1N1");
    }

    #[test]
    fn test_default_alias_order() {
        let table = AliasTable::default();
        let aliases: Vec<&str> = table
            .entries()
            .iter()
            .map(|a| a.alias.as_str())
            .collect();
        assert_eq!(aliases, vec!["flu", "corona", "chickenpox"]);
    }
}
