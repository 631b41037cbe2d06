//! Reply rendering.
//!
//! The composer turns an intent tag and an optional disease record into the text shown to the
//! user. Dispatch order:
//!
//! 1. `greeting` and `goodbye` always produce their fixed messages (`goodbye` also ends the
//!    session).
//! 2. A resolved disease takes precedence over every other tag: `symptoms`, `precautions` and
//!    `actions` render that list, anything else renders a summary.
//! 3. Without a disease, a tag with canned responses yields one of them.
//! 4. Otherwise the not-understood message.

use crate::catalog::{DiseaseRecord, IntentCatalog};
use crate::constants::{
    ACTIONS_TAG, FAREWELL_MESSAGE, GOODBYE_TAG, GREETING_MESSAGE, GREETING_TAG,
    NOT_UNDERSTOOD_MESSAGE, PRECAUTIONS_TAG, SYMPTOMS_TAG,
};
use crate::error::CatalogError;
use rand::seq::SliceRandom;
use std::str::FromStr;

/// How list fields and messages are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyFormat {
    /// Single line, lists joined with `", "`.
    #[default]
    Plain,
    /// Bulleted lines with `**bold**` headings.
    Markdown,
    /// HTML fragments with escaped content and `<ul>` lists.
    Html,
}

impl FromStr for ReplyFormat {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            other => Err(CatalogError::InvalidInput(format!(
                "unknown reply format {:?} (expected plain, markdown or html)",
                other
            ))),
        }
    }
}

/// How a canned response is picked when an intent defines several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseStrategy {
    #[default]
    First,
    Random,
}

impl FromStr for ResponseStrategy {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Self::First),
            "random" => Ok(Self::Random),
            other => Err(CatalogError::InvalidInput(format!(
                "unknown response strategy {:?} (expected first or random)",
                other
            ))),
        }
    }
}

/// A rendered reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Set when the reply closes the conversation (the `goodbye` intent).
    pub ends_session: bool,
}

impl Reply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ends_session: false,
        }
    }

    pub fn farewell(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ends_session: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResponseComposer<'a> {
    intents: &'a IntentCatalog,
    format: ReplyFormat,
    strategy: ResponseStrategy,
}

impl<'a> ResponseComposer<'a> {
    pub fn new(intents: &'a IntentCatalog, format: ReplyFormat, strategy: ResponseStrategy) -> Self {
        Self {
            intents,
            format,
            strategy,
        }
    }

    pub fn compose(&self, tag: &str, disease: Option<&DiseaseRecord>) -> Reply {
        if tag == GREETING_TAG {
            return Reply::new(self.message(GREETING_MESSAGE));
        }
        if tag == GOODBYE_TAG {
            return Reply::farewell(self.message(FAREWELL_MESSAGE));
        }

        if let Some(record) = disease {
            let text = match tag {
                SYMPTOMS_TAG => self.section("Symptoms of", &record.name, &record.symptoms),
                PRECAUTIONS_TAG => {
                    self.section("Precautions for", &record.name, &record.precautions)
                }
                ACTIONS_TAG => self.section("Actions for", &record.name, &record.actions),
                _ => self.summary(record),
            };
            return Reply::new(text);
        }

        if let Some(canned) = self.pick_response(tag) {
            return Reply::new(self.message(canned));
        }

        Reply::new(self.message(NOT_UNDERSTOOD_MESSAGE))
    }

    fn pick_response(&self, tag: &str) -> Option<&'a str> {
        let responses = self.intents.responses_for(tag);
        let picked = match self.strategy {
            ResponseStrategy::First => responses.first(),
            ResponseStrategy::Random => responses.choose(&mut rand::thread_rng()),
        };
        picked.map(String::as_str)
    }

    fn message(&self, text: &str) -> String {
        match self.format {
            ReplyFormat::Plain | ReplyFormat::Markdown => text.to_string(),
            ReplyFormat::Html => format!("<p>{}</p>", escape_html(text)),
        }
    }

    fn section(&self, heading: &str, name: &str, items: &[String]) -> String {
        match self.format {
            ReplyFormat::Plain => format!("{} {}: {}", heading, name, items.join(", ")),
            ReplyFormat::Markdown => {
                format!("**{} {}:**\n{}", heading, name, self.list(items))
            }
            ReplyFormat::Html => format!(
                "<p><strong>{} {}:</strong></p>{}",
                heading,
                escape_html(name),
                self.list(items)
            ),
        }
    }

    fn summary(&self, record: &DiseaseRecord) -> String {
        match self.format {
            ReplyFormat::Plain => format!(
                "I found information about {}. You can ask about symptoms, precautions, or actions.",
                record.name
            ),
            ReplyFormat::Markdown => format!(
                "Based on your input, you may have **{}**.\n\n\
                 **Symptoms:** {}\n\n\
                 **Precautions:**\n{}\n\n\
                 **Recommended Actions:**\n{}",
                record.name,
                record.symptoms.join(", "),
                self.list(&record.precautions),
                self.list(&record.actions)
            ),
            ReplyFormat::Html => format!(
                "<p>Based on your input, you may have <strong>{}</strong>.</p>\
                 <p><strong>Symptoms:</strong></p>{}\
                 <p><strong>Precautions:</strong></p>{}\
                 <p><strong>Recommended Actions:</strong></p>{}",
                escape_html(&record.name),
                self.list(&record.symptoms),
                self.list(&record.precautions),
                self.list(&record.actions)
            ),
        }
    }

    fn list(&self, items: &[String]) -> String {
        match self.format {
            ReplyFormat::Plain => items.join(", "),
            ReplyFormat::Markdown => items
                .iter()
                .map(|item| format!("• {}", item))
                .collect::<Vec<_>>()
                .join("\n"),
            ReplyFormat::Html => {
                let body: String = items
                    .iter()
                    .map(|item| format!("<li>{}</li>", escape_html(item)))
                    .collect();
                format!("<ul>{}</ul>", body)
            }
        }
    }
}

/// Escape the characters that are significant in HTML text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IntentRule;
    use crate::constants::FALLBACK_TAG;

    fn influenza() -> DiseaseRecord {
        DiseaseRecord {
            name: "Influenza".into(),
            symptoms: vec!["fever".into(), "cough".into()],
            precautions: vec!["Get vaccinated".into(), "Wash hands".into()],
            actions: vec!["Rest".into()],
        }
    }

    fn intents() -> IntentCatalog {
        IntentCatalog::new(vec![
            IntentRule {
                tag: "thanks".into(),
                patterns: vec!["thank*".into()],
                responses: vec!["You're welcome!".into(), "Happy to help.".into()],
            },
            IntentRule {
                tag: SYMPTOMS_TAG.into(),
                patterns: vec!["symptom*".into()],
                responses: vec![],
            },
        ])
    }

    #[test]
    fn test_greeting_ignores_disease() {
        let intents = intents();
        let composer = ResponseComposer::new(&intents, ReplyFormat::Plain, ResponseStrategy::First);

        let reply = composer.compose(GREETING_TAG, Some(&influenza()));
        assert_eq!(reply, Reply::new(GREETING_MESSAGE));
    }

    #[test]
    fn test_goodbye_ends_session() {
        let intents = intents();
        let composer = ResponseComposer::new(&intents, ReplyFormat::Plain, ResponseStrategy::First);

        let reply = composer.compose(GOODBYE_TAG, None);
        assert!(reply.ends_session);
        assert_eq!(reply.text, FAREWELL_MESSAGE);
    }

    #[test]
    fn test_plain_sections_join_with_commas() {
        let intents = intents();
        let composer = ResponseComposer::new(&intents, ReplyFormat::Plain, ResponseStrategy::First);
        let record = influenza();

        assert_eq!(
            composer.compose(SYMPTOMS_TAG, Some(&record)).text,
            "Symptoms of Influenza: fever, cough"
        );
        assert_eq!(
            composer.compose(PRECAUTIONS_TAG, Some(&record)).text,
            "Precautions for Influenza: Get vaccinated, Wash hands"
        );
        assert_eq!(
            composer.compose(ACTIONS_TAG, Some(&record)).text,
            "Actions for Influenza: Rest"
        );
    }

    #[test]
    fn test_disease_takes_precedence_over_canned_responses() {
        let intents = intents();
        let composer = ResponseComposer::new(&intents, ReplyFormat::Plain, ResponseStrategy::First);

        let reply = composer.compose("thanks", Some(&influenza()));
        assert!(reply.text.starts_with("I found information about Influenza."));
        assert!(!reply.ends_session);
    }

    #[test]
    fn test_canned_response_first_strategy() {
        let intents = intents();
        let composer = ResponseComposer::new(&intents, ReplyFormat::Plain, ResponseStrategy::First);

        assert_eq!(composer.compose("thanks", None).text, "You're welcome!");
    }

    #[test]
    fn test_canned_response_random_strategy_picks_defined_response() {
        let intents = intents();
        let composer =
            ResponseComposer::new(&intents, ReplyFormat::Plain, ResponseStrategy::Random);

        for _ in 0..20 {
            let text = composer.compose("thanks", None).text;
            assert!(text == "You're welcome!" || text == "Happy to help.");
        }
    }

    #[test]
    fn test_not_understood_without_disease_or_responses() {
        let intents = intents();
        let composer = ResponseComposer::new(&intents, ReplyFormat::Plain, ResponseStrategy::First);

        assert_eq!(composer.compose(SYMPTOMS_TAG, None).text, NOT_UNDERSTOOD_MESSAGE);
        assert_eq!(composer.compose(FALLBACK_TAG, None).text, NOT_UNDERSTOOD_MESSAGE);
    }

    #[test]
    fn test_markdown_summary_lists_everything() {
        let intents = intents();
        let composer =
            ResponseComposer::new(&intents, ReplyFormat::Markdown, ResponseStrategy::First);

        let text = composer.compose(FALLBACK_TAG, Some(&influenza())).text;
        assert!(text.contains("you may have **Influenza**"));
        assert!(text.contains("**Symptoms:** fever, cough"));
        assert!(text.contains("**Precautions:**\n• Get vaccinated\n• Wash hands"));
        assert!(text.contains("**Recommended Actions:**\n• Rest"));
    }

    #[test]
    fn test_html_escapes_content() {
        let intents = intents();
        let composer = ResponseComposer::new(&intents, ReplyFormat::Html, ResponseStrategy::First);
        let record = DiseaseRecord {
            name: "<script>".into(),
            symptoms: vec!["a & b".into()],
            precautions: vec![],
            actions: vec![],
        };

        let text = composer.compose(SYMPTOMS_TAG, Some(&record)).text;
        assert_eq!(
            text,
            "<p><strong>Symptoms of &lt;script&gt;:</strong></p><ul><li>a &amp; b</li></ul>"
        );
        assert_eq!(
            composer.compose("thanks", None).text,
            "<p>You&#x27;re welcome!</p>"
        );
    }

    #[test]
    fn test_format_and_strategy_parse() {
        assert_eq!("HTML".parse::<ReplyFormat>().unwrap(), ReplyFormat::Html);
        assert_eq!(" md ".parse::<ReplyFormat>().unwrap(), ReplyFormat::Markdown);
        assert!("rtf".parse::<ReplyFormat>().is_err());
        assert_eq!(
            "Random".parse::<ResponseStrategy>().unwrap(),
            ResponseStrategy::Random
        );
        assert!("weighted".parse::<ResponseStrategy>().is_err());
    }
}
