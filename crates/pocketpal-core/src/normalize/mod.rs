//! Content normalizer: deterministic post-processing for reply text.
//!
//! Pure and side-effect free, applied by callers of the relay to the
//! `reply` of every response regardless of which stage produced it. The
//! pipeline runs in a fixed order:
//!
//! 1. Vocabulary simplification (ordered jargon rules, case-insensitive)
//! 2. Sentence-count truncation
//! 3. Hard length cap with sentence-boundary snap-back
//!
//! The fixed canned replies are written to pass through unchanged, which
//! the tests pin down as an idempotence requirement.

use regex::{Regex, RegexBuilder};
use tracing::warn;

use pocketpal_types::config::{JargonRule, RelayConfig};

struct CompiledRule {
    matcher: Regex,
    replacement: String,
}

/// Deterministic reply-text pipeline.
pub struct Normalizer {
    rules: Vec<CompiledRule>,
    max_sentences: usize,
    max_chars: usize,
}

impl Normalizer {
    /// Compile the jargon table once; rules keep their priority order.
    pub fn new(rules: &[JargonRule], max_sentences: usize, max_chars: usize) -> Self {
        let rules = rules
            .iter()
            .filter_map(|rule| {
                match RegexBuilder::new(&regex::escape(&rule.pattern))
                    .case_insensitive(true)
                    .build()
                {
                    Ok(matcher) => Some(CompiledRule {
                        matcher,
                        replacement: rule.replacement.clone(),
                    }),
                    Err(err) => {
                        warn!(pattern = %rule.pattern, error = %err, "skipping unusable jargon rule");
                        None
                    }
                }
            })
            .collect();

        Self {
            rules,
            max_sentences,
            max_chars,
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(
            &config.jargon_rules,
            config.max_reply_sentences,
            config.max_reply_chars,
        )
    }

    /// Run the full pipeline. Whitespace-only input normalizes to empty.
    pub fn normalize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }
        let simplified = self.simplify_jargon(text);
        let limited = limit_sentences(&simplified, self.max_sentences);
        cap_length(&limited, self.max_chars)
    }

    /// Apply every jargon rule in priority order over the whole text.
    /// Later rules see the output of earlier ones.
    fn simplify_jargon(&self, text: &str) -> String {
        let mut out = text.to_string();
        for rule in &self.rules {
            // NoExpand: replacements are literal text, never capture groups.
            out = rule
                .matcher
                .replace_all(&out, regex::NoExpand(&rule.replacement))
                .into_owned();
        }
        out
    }
}

/// Split at sentence boundaries: `.`, `!`, or `?` followed by whitespace.
/// A trailing fragment without a boundary counts as a sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut sentences = Vec::new();
    let mut start = 0;

    for i in 0..bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?')
            && bytes.get(i + 1).is_some_and(|b| b.is_ascii_whitespace())
        {
            // Terminators are ASCII, so i and i+1 are char boundaries.
            sentences.push(&text[start..=i]);
            start = i + 1;
        }
    }

    if start < text.len() {
        let rest = &text[start..];
        if !rest.trim().is_empty() {
            sentences.push(rest);
        }
    }

    sentences
}

/// Keep at most `max` sentences. Text at or under the ceiling is returned
/// unchanged; truncated text is rejoined from trimmed sentences with
/// single spaces.
pub fn limit_sentences(text: &str, max: usize) -> String {
    let sentences = split_sentences(text);
    if sentences.len() <= max {
        return text.to_string();
    }
    sentences[..max]
        .iter()
        .map(|s| s.trim())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Enforce the hard character cap with sentence-boundary snap-back.
///
/// Over the cap, the text is cut at `max_chars` characters; if the last
/// period in the cut window sits in the back half (char index greater than
/// `max_chars / 2`), the cut snaps back to just after that period,
/// dropping the trailing partial sentence.
pub fn cap_length(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    let last_period = cut.chars().enumerate().filter(|(_, c)| *c == '.').last();

    match last_period {
        Some((pos, _)) if pos > max_chars / 2 => cut.chars().take(pos + 1).collect(),
        _ => cut,
    }
}
