//! # Text Analyzer
//!
//! Turns a field value into the terms the TF-IDF vectorizer counts:
//! lowercased word n-grams plus, optionally, character n-grams taken
//! inside word boundaries.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Words are runs of two or more word characters.
const TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Prefix for character n-gram terms. Word terms never contain `:`.
pub const CHAR_TERM_PREFIX: &str = "c:";

/// Which terms to extract. Serialized with the fitted vectorizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Inclusive range of word n-gram sizes.
    pub word_ngrams: (usize, usize),
    /// Inclusive range of character n-gram sizes, if any.
    pub char_ngrams: Option<(usize, usize)>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            word_ngrams: (1, 1),
            char_ngrams: None,
        }
    }
}

impl AnalyzerConfig {
    /// Word unigrams only.
    pub fn words() -> Self {
        Self::default()
    }

    pub fn with_word_ngrams(mut self, min: usize, max: usize) -> Self {
        self.word_ngrams = (min.max(1), max.max(min.max(1)));
        self
    }

    pub fn with_char_ngrams(mut self, min: usize, max: usize) -> Self {
        self.char_ngrams = Some((min.max(1), max.max(min.max(1))));
        self
    }
}

/// Compiled analyzer.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    token_re: Regex,
}

impl Analyzer {
    /// Builds an analyzer for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `FieldcheckError::RegexError` if the token pattern fails to
    /// compile.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        Ok(Self {
            config,
            token_re: Regex::new(TOKEN_PATTERN)?,
        })
    }

    pub fn config(&self) -> AnalyzerConfig {
        self.config
    }

    /// Extracts all terms from `text`, in document order, with repeats.
    ///
    /// # Examples
    /// ```
    /// use fieldcheck_core::text::{Analyzer, AnalyzerConfig};
    ///
    /// let analyzer = Analyzer::new(AnalyzerConfig::words().with_word_ngrams(1, 2)).unwrap();
    /// let terms = analyzer.analyze("It froze");
    /// assert_eq!(terms, vec!["it", "froze", "it froze"]);
    /// ```
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut terms = self.word_terms(&lower);
        if let Some((min_n, max_n)) = self.config.char_ngrams {
            terms.extend(char_wb_terms(&lower, min_n, max_n));
        }
        terms
    }

    fn word_terms(&self, lower: &str) -> Vec<String> {
        let words: Vec<&str> = self.token_re.find_iter(lower).map(|m| m.as_str()).collect();
        let (min_n, max_n) = self.config.word_ngrams;

        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n {
            if n > words.len() {
                break;
            }
            for window in words.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

/// Character n-grams within whitespace-delimited words, each word padded
/// with one space on both sides. A word shorter than `n` yields a single
/// term for that size and stops the size loop.
fn char_wb_terms(lower: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let mut terms = Vec::new();
    for word in lower.split_whitespace() {
        let padded: Vec<char> = std::iter::once(' ')
            .chain(word.chars())
            .chain(std::iter::once(' '))
            .collect();
        for n in min_n.max(1)..=max_n {
            if padded.len() <= n {
                terms.push(char_term(&padded));
                break;
            }
            for window in padded.windows(n) {
                terms.push(char_term(window));
            }
        }
    }
    terms
}

fn char_term(chars: &[char]) -> String {
    let mut term = String::with_capacity(CHAR_TERM_PREFIX.len() + chars.len());
    term.push_str(CHAR_TERM_PREFIX);
    term.extend(chars);
    term
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_characters_are_not_words() {
        let analyzer = Analyzer::new(AnalyzerConfig::words()).unwrap();
        assert_eq!(analyzer.analyze("v2.1.3"), vec!["v2"]);
        assert!(analyzer.analyze("1.0").is_empty());
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        let analyzer = Analyzer::new(AnalyzerConfig::words()).unwrap();
        assert_eq!(analyzer.analyze("Can't EXPLAIN"), vec!["can", "explain"]);
        assert_eq!(analyzer.analyze("<EMPTY>"), vec!["empty"]);
        assert_eq!(analyzer.analyze("x <HAS_DIGIT>"), vec!["has_digit"]);
    }

    #[test]
    fn word_bigrams() {
        let analyzer = Analyzer::new(AnalyzerConfig::words().with_word_ngrams(1, 2)).unwrap();
        let terms = analyzer.analyze("app crashed badly");
        assert_eq!(
            terms,
            vec!["app", "crashed", "badly", "app crashed", "crashed badly"]
        );
    }

    #[test]
    fn char_ngrams_are_prefixed_and_padded() {
        let analyzer = Analyzer::new(AnalyzerConfig::words().with_char_ngrams(3, 3)).unwrap();
        let terms = analyzer.analyze("ver42");
        assert_eq!(terms[0], "ver42");
        assert!(terms.contains(&"c: ve".to_string()));
        assert!(terms.contains(&"c:42 ".to_string()));
        // " ver42 " has 7 chars, so 5 trigrams
        assert_eq!(terms.len(), 1 + 5);
    }

    #[test]
    fn short_word_counted_once() {
        let analyzer = Analyzer::new(AnalyzerConfig::words().with_char_ngrams(2, 4)).unwrap();
        let terms = analyzer.analyze("a");
        // " a " -> two bigrams, then one whole-word term for n=3, stop
        assert_eq!(terms, vec!["c: a", "c:a ", "c: a "]);
    }

    #[test]
    fn empty_text_has_no_terms() {
        let analyzer = Analyzer::new(AnalyzerConfig::words().with_char_ngrams(2, 4)).unwrap();
        assert!(analyzer.analyze("").is_empty());
        assert!(analyzer.analyze("   ").is_empty());
    }
}
