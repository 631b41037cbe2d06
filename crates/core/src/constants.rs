//! Constants used throughout the HealthChat core crate.
//!
//! This module contains dataset filenames, reserved intent tags and the fixed
//! reply strings so that every front-end renders identical text.

/// Directory holding the bundled catalogs, relative to the workspace root.
pub const DEFAULT_DATA_DIR: &str = "crates/core/data";

/// Filename of the bundled disease catalog.
pub const DISEASES_FILENAME: &str = "contagious_diseases_dataset.json";

/// Filename of the bundled intent catalog.
pub const INTENTS_FILENAME: &str = "intents.json";

/// Tag returned by the classifier when no pattern matches.
pub const FALLBACK_TAG: &str = "fallback";

pub const GREETING_TAG: &str = "greeting";
pub const GOODBYE_TAG: &str = "goodbye";
pub const SYMPTOMS_TAG: &str = "symptoms";
pub const PRECAUTIONS_TAG: &str = "precautions";
pub const ACTIONS_TAG: &str = "actions";

/// Literal inputs that end a console session before classification.
pub const QUIT_WORDS: &[&str] = &["quit", "exit", "bye"];

/// Built-in alias table, in match priority order.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("flu", "influenza"),
    ("corona", "covid-19"),
    ("chickenpox", "varicella"),
];

pub const GREETING_MESSAGE: &str =
    "Hello! Ask me about any disease, its symptoms, precautions, or actions.";

pub const FAREWELL_MESSAGE: &str = "Goodbye! Stay safe and healthy!";

/// Reply printed when the console session ends on a quit word.
pub const QUIT_MESSAGE: &str = "Goodbye! Stay safe!";

pub const NOT_UNDERSTOOD_MESSAGE: &str =
    "Sorry, I couldn't detect any disease. Try again with a clear question.";

/// Reply to a blank message at the HTTP boundary.
pub const EMPTY_MESSAGE_WARNING: &str = "Please enter a message.";
