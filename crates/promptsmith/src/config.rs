//! Critique engine configuration with sensible defaults.

/// Thresholds and vocabularies used by the critique heuristics.
///
/// Construct with [`Default`] and adjust with the `with_*` builders:
///
/// ```
/// use promptsmith::CritiqueConfig;
///
/// let config = CritiqueConfig::default()
///     .with_min_goal_chars(25)
///     .with_generic_output_format("blurb");
/// assert_eq!(config.min_goal_chars, 25);
/// assert!(config.is_generic_output_format("Blurb"));
/// ```
#[derive(Debug, Clone)]
pub struct CritiqueConfig {
    /// Goals shorter than this (in characters, after trimming) are flagged
    /// as too short. Default: `10`.
    pub min_goal_chars: usize,
    /// Single-word output formats that say nothing about structure.
    /// Compared case-insensitively, ignoring trailing punctuation.
    pub generic_output_formats: Vec<String>,
}

/// Default vague output formats.
const GENERIC_OUTPUT_FORMATS: &[&str] = &[
    "text",
    "answer",
    "response",
    "output",
    "result",
    "paragraph",
    "prose",
    "string",
    "anything",
    "any",
    "whatever",
    "normal",
    "default",
];

impl Default for CritiqueConfig {
    fn default() -> Self {
        Self {
            min_goal_chars: 10,
            generic_output_formats: GENERIC_OUTPUT_FORMATS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl CritiqueConfig {
    pub fn with_min_goal_chars(mut self, chars: usize) -> Self {
        self.min_goal_chars = chars;
        self
    }

    /// Add another word to the generic output format list.
    pub fn with_generic_output_format(mut self, word: impl Into<String>) -> Self {
        self.generic_output_formats.push(word.into());
        self
    }

    /// True if `format` is a single word from the generic list.
    pub fn is_generic_output_format(&self, format: &str) -> bool {
        let word = format
            .trim()
            .trim_end_matches(|c: char| c.is_ascii_punctuation());
        if word.is_empty() || word.contains(char::is_whitespace) {
            return false;
        }
        self.generic_output_formats
            .iter()
            .any(|g| g.eq_ignore_ascii_case(word))
    }
}
