//! Conversation transcripts.
//!
//! A transcript is only a record of what was displayed. It is never fed back into the matching
//! path, so turns stay independent.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => f.write_str("You"),
            Speaker::Bot => f.write_str("Bot"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            speaker,
            text: text.into(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as plain text, one `Speaker: text` block per entry.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}: {}\n", entry.speaker, entry.text))
            .collect()
    }

    /// Write the rendered transcript to `path`, replacing any existing file.
    pub fn export(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.render())
    }
}
