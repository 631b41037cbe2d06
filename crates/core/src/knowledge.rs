//! The immutable bundle of catalogs every turn is answered from.

use crate::catalog::{AliasTable, DiseaseCatalog, IntentCatalog};
use crate::classifier::IntentClassifier;
use crate::config::CoreConfig;
use crate::error::CatalogResult;
use crate::validation::{validate_aliases, validate_diseases, validate_intents};

/// Catalogs plus the compiled classifier, validated and ready to share.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    diseases: DiseaseCatalog,
    intents: IntentCatalog,
    aliases: AliasTable,
    classifier: IntentClassifier,
}

impl KnowledgeBase {
    /// Assemble a knowledge base from in-memory catalogs.
    ///
    /// # Errors
    ///
    /// Returns an error if an intent tag, disease name or alias is blank, a pattern fails to
    /// compile, or an alias points at a disease the catalog does not contain.
    pub fn new(
        diseases: DiseaseCatalog,
        intents: IntentCatalog,
        aliases: AliasTable,
    ) -> CatalogResult<Self> {
        validate_intents(&intents)?;
        validate_diseases(&diseases)?;
        validate_aliases(&aliases, &diseases)?;
        let classifier = IntentClassifier::new(&intents)?;

        Ok(Self {
            diseases,
            intents,
            aliases,
            classifier,
        })
    }

    /// Load every catalog named by `cfg`. Falls back to the built-in alias table when no alias
    /// file is configured.
    pub fn load(cfg: &CoreConfig) -> CatalogResult<Self> {
        let diseases = DiseaseCatalog::load(cfg.diseases_path())?;
        let intents = IntentCatalog::load(cfg.intents_path())?;
        let aliases = match cfg.aliases_path() {
            Some(path) => AliasTable::load(path)?,
            None => AliasTable::default(),
        };
        Self::new(diseases, intents, aliases)
    }

    pub fn diseases(&self) -> &DiseaseCatalog {
        &self.diseases
    }

    pub fn intents(&self) -> &IntentCatalog {
        &self.intents
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }
}
