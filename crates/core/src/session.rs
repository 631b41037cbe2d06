//! Console conversation sessions.
//!
//! A session ends in one of two independent ways: the user types a quit word (`quit`, `exit`,
//! `bye`), which is checked before classification, or a turn classifies as `goodbye`.

use crate::chat::ChatService;
use crate::composer::Reply;
use crate::constants::{QUIT_MESSAGE, QUIT_WORDS};
use crate::transcript::{Speaker, Transcript};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Session {
    service: ChatService,
    transcript: Transcript,
    ended: bool,
}

impl Session {
    pub fn new(service: ChatService) -> Self {
        Self {
            service,
            transcript: Transcript::new(),
            ended: false,
        }
    }

    /// Submit one line of user input.
    ///
    /// Returns `None` for blank lines and once the session has ended.
    pub fn submit(&mut self, line: &str) -> Option<Reply> {
        let text = line.trim();
        if self.ended || text.is_empty() {
            return None;
        }

        self.transcript.push(Speaker::User, text);

        let reply = if is_quit_word(text) {
            Reply::farewell(QUIT_MESSAGE)
        } else {
            self.service.reply(text)
        };

        self.transcript.push(Speaker::Bot, reply.text.clone());
        self.ended = reply.ends_session;
        Some(reply)
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Export the transcript to `path`.
    ///
    /// Failures are logged and reported through the return value only; they never interrupt
    /// the conversation.
    pub fn export_transcript(&self, path: &Path) -> bool {
        match self.transcript.export(path) {
            Ok(()) => {
                tracing::info!("exported chat to {}", path.display());
                true
            }
            Err(e) => {
                tracing::warn!("failed to export chat to {}: {}", path.display(), e);
                false
            }
        }
    }
}

/// True when `text` is one of the literal quit words, ignoring case and surrounding whitespace.
pub fn is_quit_word(text: &str) -> bool {
    let text = text.trim();
    QUIT_WORDS.iter().any(|word| text.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::tests::test_service;
    use crate::chat::ReplyOptions;
    use crate::constants::GREETING_MESSAGE;
    use tempfile::TempDir;

    #[test]
    fn test_quit_words_end_session_without_classifying() {
        for word in ["quit", "EXIT", "  Bye "] {
            let mut session = Session::new(test_service(ReplyOptions::default()));
            let reply = session.submit(word).expect("quit word should get a reply");
            assert_eq!(reply.text, QUIT_MESSAGE);
            assert!(session.is_ended());
        }
    }

    #[test]
    fn test_quit_word_must_be_whole_input() {
        let mut session = Session::new(test_service(ReplyOptions::default()));
        session.submit("bye bye flu").expect("should reply");
        assert!(!session.is_ended());
    }

    #[test]
    fn test_goodbye_intent_ends_session() {
        let mut session = Session::new(test_service(ReplyOptions::default()));
        let reply = session.submit("goodbye then").expect("should reply");
        assert!(reply.ends_session);
        assert!(session.is_ended());
        assert!(session.submit("hello").is_none(), "ended session ignores input");
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let mut session = Session::new(test_service(ReplyOptions::default()));
        assert!(session.submit("   ").is_none());
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_transcript_records_both_sides() {
        let mut session = Session::new(test_service(ReplyOptions::default()));
        session.submit("hello").expect("should reply");

        let entries = session.transcript().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].speaker, Speaker::User);
        assert_eq!(entries[0].text, "hello");
        assert_eq!(entries[1].speaker, Speaker::Bot);
        assert_eq!(entries[1].text, GREETING_MESSAGE);
    }

    #[test]
    fn test_export_failure_is_swallowed() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut session = Session::new(test_service(ReplyOptions::default()));
        session.submit("hello").expect("should reply");

        let missing_dir = temp_dir.path().join("missing").join("chat.txt");
        assert!(!session.export_transcript(&missing_dir));

        let path = temp_dir.path().join("chat.txt");
        assert!(session.export_transcript(&path));
        assert!(path.is_file());
    }
}
