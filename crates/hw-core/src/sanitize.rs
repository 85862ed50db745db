//! Metadata sanitization
//!
//! Catalog metadata ends up in LLM prompts, so every description, term
//! name, and tag copied out of the catalog goes through a [`Sanitizer`]:
//! control characters are removed, known prompt-injection phrasings are
//! replaced, long strings are truncated, and tags are restricted to a
//! conservative identifier alphabet.

use regex::Regex;
use std::sync::OnceLock;

/// Default maximum length for sanitized strings
pub const MAX_STRING_LENGTH: usize = 2000;

/// Maximum length of a tag name
const MAX_TAG_LENGTH: usize = 100;

/// Replacement text for stripped injection patterns
const REMOVED: &str = "[REMOVED]";

/// Sanitizer settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeConfig {
    /// Maximum string length in bytes before truncation
    pub max_length: usize,
    /// Replace detected injection patterns instead of only flagging them
    pub strip_injection_patterns: bool,
    /// Log detected injection attempts
    pub log_injection_attempts: bool,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            max_length: MAX_STRING_LENGTH,
            strip_injection_patterns: true,
            log_injection_attempts: true,
        }
    }
}

/// Named injection patterns, checked in order
const INJECTION_PATTERNS: &[(&str, &str)] = &[
    // Instruction overrides
    ("ignore_instructions", r"(?i)ignore\s+(all\s+)?(previous|prior|above)\s+instructions?"),
    ("disregard_instructions", r"(?i)disregard\s+(all\s+)?(previous|prior|above)"),
    ("forget_instructions", r"(?i)forget\s+(all\s+)?(previous|prior|above)"),
    // Role manipulation
    ("role_manipulation_you_are", r"(?i)you\s+are\s+now\s+"),
    ("role_manipulation_act_as", r"(?i)act\s+as\s+(if\s+you\s+are|a)\s+"),
    ("role_manipulation_pretend", r"(?i)pretend\s+(to\s+be|you\s+are)\s+"),
    ("role_manipulation_from_now", r"(?i)from\s+now\s+on\s*,?\s*(you|act|pretend)"),
    // System prompt probing
    ("system_prompt_access", r"(?i)system\s+prompt"),
    ("show_instructions", r"(?i)show\s+me\s+(your|the)\s+(instructions|prompt|rules)"),
    ("what_instructions", r"(?i)what\s+are\s+your\s+(instructions|rules|constraints)"),
    ("reveal_system", r"(?i)reveal\s+(your|the)\s+(system|initial)"),
    // Jailbreaks
    ("developer_mode", r"(?i)developer\s+mode"),
    ("dan_mode", r"(?i)DAN\s+mode"),
    ("jailbreak", r"(?i)jailbreak"),
    ("bypass_safety", r"(?i)bypass\s+(safety|content|security)\s+(filter|restriction|guard)"),
    // Script injection
    ("script_tag", r"(?i)<\s*script[^>]*>"),
    ("javascript_url", r"(?i)javascript\s*:"),
    ("data_url", r"(?i)data\s*:\s*text/html"),
    ("event_handler", r"(?i)on(load|error|click|mouse)\s*="),
    // Chat special tokens
    ("system_token", r"\[\s*SYSTEM\s*\]"),
    ("inst_token", r"\[\s*INST\s*\]"),
    ("im_start_token", r"<\|im_start\|>"),
    ("im_end_token", r"<\|im_end\|>"),
    ("inst_close_token", r"\[/INST\]"),
    // Encoded payloads
    ("base64_payload", r"(?i)base64\s*:\s*[A-Za-z0-9+/=]{50,}"),
];

static COMPILED_PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
static TAG_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn injection_patterns() -> &'static [(&'static str, Regex)] {
    COMPILED_PATTERNS.get_or_init(|| {
        INJECTION_PATTERNS
            .iter()
            .map(|(name, pattern)| (*name, Regex::new(pattern).expect("valid regex literal")))
            .collect()
    })
}

fn tag_name_re() -> &'static Regex {
    TAG_NAME_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_-]*$").expect("valid regex literal")
    })
}

/// Sanitizes catalog metadata before it is exposed to callers
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    cfg: SanitizeConfig,
}

impl Sanitizer {
    /// Create a sanitizer; a zero `max_length` falls back to the default
    pub fn new(mut cfg: SanitizeConfig) -> Self {
        if cfg.max_length == 0 {
            cfg.max_length = MAX_STRING_LENGTH;
        }
        Self { cfg }
    }

    /// Clean a free-text string
    pub fn sanitize_string(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }

        let mut cleaned: String = input
            .chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect();

        if self.cfg.strip_injection_patterns {
            for (_, re) in injection_patterns() {
                if re.is_match(&cleaned) {
                    cleaned = re.replace_all(&cleaned, REMOVED).into_owned();
                }
            }
        }

        if cleaned.len() > self.cfg.max_length {
            let mut cut = self.cfg.max_length;
            while !cleaned.is_char_boundary(cut) {
                cut -= 1;
            }
            cleaned.truncate(cut);
            cleaned.push_str("...");
        }

        cleaned
    }

    /// Clean a description field
    pub fn sanitize_description(&self, desc: &str) -> String {
        self.sanitize_string(desc)
    }

    /// Validate a tag name, returning `None` if it is not acceptable
    pub fn sanitize_tag(&self, tag: &str) -> Option<String> {
        if tag.is_empty() || tag.len() > MAX_TAG_LENGTH || !tag_name_re().is_match(tag) {
            return None;
        }
        Some(tag.to_string())
    }

    /// Keep only the acceptable tags, preserving order
    pub fn sanitize_tags<S: AsRef<str>>(&self, tags: &[S]) -> Vec<String> {
        tags.iter()
            .filter_map(|t| self.sanitize_tag(t.as_ref()))
            .collect()
    }

    /// Names of the injection patterns present in `input`
    pub fn detect_injection(&self, input: &str) -> Vec<&'static str> {
        if input.is_empty() {
            return Vec::new();
        }
        injection_patterns()
            .iter()
            .filter(|(_, re)| re.is_match(input))
            .map(|(name, _)| *name)
            .collect()
    }

    /// Detect injection patterns and log them against their origin.
    ///
    /// Returns true if anything was detected.
    pub fn detect_and_log(&self, source: &str, field: &str, input: &str) -> bool {
        let patterns = self.detect_injection(input);
        if patterns.is_empty() {
            return false;
        }
        if self.cfg.log_injection_attempts {
            log::warn!(
                "Prompt injection patterns detected in {}.{}: {:?}",
                source,
                field,
                patterns
            );
        }
        true
    }
}

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod tests;
