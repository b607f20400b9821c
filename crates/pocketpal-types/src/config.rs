//! Relay configuration, including the safety-critical default tables.
//!
//! The jargon rules, emergency keywords, canned replies, and system prompt
//! encode tone- and safety-critical product decisions, so they live in
//! reviewable configuration (`relay.toml`) rather than scattered through
//! code. The compiled-in defaults below are what ships when no file is
//! present; the loader in pocketpal-infra overlays the file on top.

use serde::{Deserialize, Serialize};

/// One vocabulary-simplification rule: a literal pattern replaced by a
/// plain-language synonym. Rules apply in list order and are matched
/// case-insensitively; later rules see the output of earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JargonRule {
    pub pattern: String,
    pub replacement: String,
}

impl JargonRule {
    fn new(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        }
    }
}

/// Complete relay configuration.
///
/// Every field has a compiled-in default, so a partial `relay.toml` only
/// overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Successful completions allowed per identity per UTC day.
    pub daily_message_limit: u32,

    /// Sentence ceiling applied by the normalizer.
    pub max_reply_sentences: usize,

    /// Character ceiling applied by the normalizer.
    pub max_reply_chars: usize,

    /// Completion model identifier.
    pub model: String,

    /// Maximum output tokens per completion.
    pub max_completion_tokens: u32,

    /// Sampling temperature; kept low for short, consistent answers.
    pub temperature: f64,

    /// Fixed system instruction sent with every completion.
    pub system_prompt: String,

    /// Reply returned when the daily limit is reached.
    pub limit_reply: String,

    /// Reply returned when the safety precheck triggers.
    pub safety_reply: String,

    /// User-safe reply returned alongside a provider failure.
    pub fallback_reply: String,

    /// Case-insensitive substrings signaling a possible medical emergency.
    pub emergency_keywords: Vec<String>,

    /// Ordered vocabulary-simplification table.
    pub jargon_rules: Vec<JargonRule>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            daily_message_limit: 25,
            max_reply_sentences: 4,
            max_reply_chars: 400,
            model: "gpt-4o-mini".to_string(),
            max_completion_tokens: 200,
            temperature: 0.2,
            system_prompt: "You are Pocketpal, a friendly helper for a child \
                who has epilepsy. Use simple words a young child understands. \
                Stay calm and kind. Answer in at most 4 short sentences. \
                Never make medical decisions; always tell the child to ask a \
                parent, caregiver, or doctor."
                .to_string(),
            limit_reply: "We have chatted a lot today! Let's rest and talk again tomorrow."
                .to_string(),
            safety_reply: "This sounds really important. Please find a grown-up right now. \
                If no grown-up is near, call 911."
                .to_string(),
            fallback_reply: "I can't think of an answer right now. Please ask a grown-up, \
                or try me again in a little while."
                .to_string(),
            emergency_keywords: [
                "not breathing",
                "stopped breathing",
                "can't breathe",
                "cant breathe",
                "turning blue",
                "won't wake up",
                "wont wake up",
                "unconscious",
                "call 911",
                "heart stopped",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            // Order matters: compound terms must precede their parts so the
            // compound rewrite wins (e.g. "anticonvulsant medication" before
            // "anticonvulsant" and "medication").
            jargon_rules: vec![
                JargonRule::new("anticonvulsant medication", "seizure medicine"),
                JargonRule::new("anticonvulsant", "seizure medicine"),
                JargonRule::new("electroencephalogram", "brain-wave test"),
                JargonRule::new("tonic-clonic", "shaking"),
                JargonRule::new("postictal", "after-seizure"),
                JargonRule::new("neurologist", "brain doctor"),
                JargonRule::new("epilepsy", "seizure condition"),
                JargonRule::new("medication", "medicine"),
                JargonRule::new("eeg", "brain-wave test"),
                JargonRule::new("aura", "warning feeling"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let config = RelayConfig::default();
        assert_eq!(config.daily_message_limit, 25);
        assert_eq!(config.max_reply_sentences, 4);
        assert_eq!(config.max_reply_chars, 400);
        assert_eq!(config.max_completion_tokens, 200);
    }

    #[test]
    fn test_default_tables_cover_core_terms() {
        let config = RelayConfig::default();
        for term in ["epilepsy", "eeg", "aura", "tonic-clonic"] {
            assert!(
                config.jargon_rules.iter().any(|r| r.pattern == term),
                "missing jargon rule for '{term}'"
            );
        }
        assert!(
            config
                .emergency_keywords
                .iter()
                .any(|k| k == "not breathing")
        );
    }

    #[test]
    fn test_compound_rules_precede_their_parts() {
        let config = RelayConfig::default();
        let position = |pattern: &str| {
            config
                .jargon_rules
                .iter()
                .position(|r| r.pattern == pattern)
                .unwrap()
        };
        assert!(position("anticonvulsant medication") < position("anticonvulsant"));
        assert!(position("anticonvulsant") < position("medication"));
    }

    #[test]
    fn test_partial_toml_keeps_remaining_defaults() {
        let config: RelayConfig = toml::from_str(
            r#"
daily_message_limit = 10
model = "gpt-4.1-mini"
"#,
        )
        .unwrap();
        assert_eq!(config.daily_message_limit, 10);
        assert_eq!(config.model, "gpt-4.1-mini");
        assert_eq!(config.max_reply_sentences, 4);
        assert!(!config.jargon_rules.is_empty());
    }

    #[test]
    fn test_jargon_rules_overridable_from_toml() {
        let config: RelayConfig = toml::from_str(
            r#"
[[jargon_rules]]
pattern = "myoclonic"
replacement = "quick jerk"
"#,
        )
        .unwrap();
        assert_eq!(config.jargon_rules.len(), 1);
        assert_eq!(config.jargon_rules[0].pattern, "myoclonic");
    }
}
