use regex::Regex;
use std::sync::LazyLock;

/// Minimum number of non-whitespace characters for a string to count as text
const MIN_CLEAN_LENGTH: usize = 3;

/// Minimum share of ASCII letters and digits among non-whitespace characters
const MIN_ALPHANUMERIC_RATIO: f64 = 0.4;

/// Patterns that flag leaked script, style or markup rather than prose
const CODE_PATTERN: &str =
    r"(?i)function\(|var |const |let |\{.*\}|\(.*\)|if\(|for\(|while\(|<script|<style";
const TAG_PATTERN: &str = r"(?i)</?[a-z][^>]*>";
const RESOURCE_PATTERN: &str = r"data:image|blob:|url\(|https?://[^/]*amazonaws\.com";
const CALL_PATTERN: &str = r"\.[a-zA-Z]+\(|window\.|document\.";

static DEFAULT_FILTER: LazyLock<TextFilter> = LazyLock::new(TextFilter::default);

/// Heuristic classifier separating prose from markup, script and binary noise
#[derive(Debug)]
pub struct TextFilter {
    reject_regexes: Vec<Regex>,
}

impl Default for TextFilter {
    fn default() -> Self {
        Self::new().expect("Built-in text filter patterns should be valid")
    }
}

impl TextFilter {
    /// Compile the built-in rejection patterns
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = [CODE_PATTERN, TAG_PATTERN, RESOURCE_PATTERN, CALL_PATTERN];

        let mut reject_regexes = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            reject_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self { reject_regexes })
    }

    /// Determine if a string reads as real text
    pub fn is_text_content(&self, text: &str) -> bool {
        let clean: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();

        if clean.len() < MIN_CLEAN_LENGTH {
            return false;
        }

        // Any structural marker is enough to reject
        if self.reject_regexes.iter().any(|regex| regex.is_match(text)) {
            return false;
        }

        let alphanumeric = clean.iter().filter(|c| c.is_ascii_alphanumeric()).count();
        alphanumeric as f64 / clean.len() as f64 >= MIN_ALPHANUMERIC_RATIO
    }
}

/// Determine if a string reads as real text using the built-in patterns
pub fn is_text_content(text: &str) -> bool {
    DEFAULT_FILTER.is_text_content(text)
}
