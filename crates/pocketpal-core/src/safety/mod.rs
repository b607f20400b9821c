//! Safety precheck: fixed-keyword distress detection.
//!
//! A deliberately simple, auditable scan -- no semantic understanding. The
//! trimmed message is lowercased and checked for any emergency keyword as a
//! substring. On a match the orchestrator returns the fixed safety reply
//! without ever reaching the completion provider.

use tracing::debug;

/// Fixed-keyword scan for distress language.
pub struct SafetyPrecheck {
    /// Keywords, lowercased once at construction.
    keywords: Vec<String>,
}

impl SafetyPrecheck {
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// True when the message contains any emergency keyword,
    /// case-insensitively, anywhere in the trimmed text.
    pub fn triggered(&self, message: &str) -> bool {
        let haystack = message.trim().to_lowercase();
        let hit = self.keywords.iter().find(|k| haystack.contains(k.as_str()));
        if let Some(keyword) = hit {
            debug!(keyword = %keyword, "emergency keyword matched");
            return true;
        }
        false
    }
}
