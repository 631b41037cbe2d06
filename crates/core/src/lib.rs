//! # HealthChat Core
//!
//! Core matching logic for the HealthChat rule-based responder.
//!
//! This crate contains everything with decision logic in it:
//! - Catalog loading (diseases, intents, aliases) from JSON or YAML files
//! - Wildcard-pattern intent classification
//! - Three-tier disease resolution (alias, name, symptom overlap)
//! - Reply composition in plain, Markdown or HTML form
//! - Console sessions with quit-word handling and transcript export
//!
//! **No transport concerns**: HTTP servers and terminal I/O belong in `api-rest` and `cli`.

pub mod catalog;
pub mod chat;
pub mod classifier;
pub mod composer;
pub mod config;
pub mod constants;
pub mod error;
pub mod knowledge;
pub mod resolver;
pub mod session;
pub mod transcript;
pub mod validation;

pub use catalog::{Alias, AliasTable, DiseaseCatalog, DiseaseRecord, IntentCatalog, IntentRule};
pub use chat::{ChatService, ReplyOptions};
pub use classifier::IntentClassifier;
pub use composer::{Reply, ReplyFormat, ResponseComposer, ResponseStrategy};
pub use config::CoreConfig;
pub use constants::{EMPTY_MESSAGE_WARNING, FALLBACK_TAG};
pub use error::{CatalogError, CatalogResult};
pub use knowledge::KnowledgeBase;
pub use resolver::{DiseaseResolver, MatchTier};
pub use session::Session;
pub use transcript::{Speaker, Transcript};
