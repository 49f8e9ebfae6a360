//! Fixed phrase and pattern tables compiled into regexes.
//!
//! Every keyword list used by the analyzers goes through one of these two
//! types so matching rules stay uniform: phrases match on word boundaries,
//! patterns are raw regexes for punctuation and layout cues.

use regex::Regex;

/// Compile a literal phrase into a word-boundary regex.
pub fn phrase_regex(phrase: &str) -> Regex {
    Regex::new(&format!(r"\b{}\b", regex::escape(phrase))).unwrap()
}

/// A fixed list of literal phrases.
#[derive(Debug, Clone)]
pub struct PhraseSet {
    phrases: Vec<(&'static str, Regex)>,
}

impl PhraseSet {
    pub fn new(phrases: &[&'static str]) -> Self {
        Self {
            phrases: phrases.iter().map(|&p| (p, phrase_regex(p))).collect(),
        }
    }

    /// Phrases that occur at least once in `text`, in table order.
    pub fn matched(&self, text: &str) -> Vec<&'static str> {
        self.phrases
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(p, _)| *p)
            .collect()
    }

    /// Number of listed phrases present in `text`.
    pub fn distinct_matches(&self, text: &str) -> usize {
        self.phrases.iter().filter(|(_, re)| re.is_match(text)).count()
    }

    pub fn contains_any(&self, text: &str) -> bool {
        self.phrases.iter().any(|(_, re)| re.is_match(text))
    }
}

/// A fixed list of raw regex patterns.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile the crate's built-in pattern tables.
    ///
    /// # Panics
    ///
    /// Panics if a pattern is not a valid regex.
    pub(crate) fn new(patterns: &[&str]) -> Self {
        Self {
            patterns: patterns.iter().map(|p| Regex::new(p).unwrap()).collect(),
        }
    }

    /// Sum of non-overlapping matches of every pattern.
    pub fn total_matches(&self, text: &str) -> usize {
        self.patterns.iter().map(|re| re.find_iter(text).count()).sum()
    }

    /// Number of patterns with at least one match.
    pub fn distinct_matches(&self, text: &str) -> usize {
        self.patterns.iter().filter(|re| re.is_match(text)).count()
    }

    pub fn contains_any(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrases_respect_word_boundaries() {
        let set = PhraseSet::new(&["our", "let's"]);
        assert_eq!(set.distinct_matches("your hour is up"), 0);
        assert_eq!(set.matched("let's check our notes"), vec!["our", "let's"]);
    }

    #[test]
    fn test_distinct_matches_ignore_repeats() {
        let set = PhraseSet::new(&["step", "then"]);
        assert_eq!(set.distinct_matches("step one, step two, steps"), 1);
        assert_eq!(set.matched("step one, then step two"), vec!["step", "then"]);
        assert!(!set.contains_any("steps"));
    }

    #[test]
    fn test_pattern_set_counts() {
        let set = PatternSet::new(&[r"\?", r"\.\.\."]);
        assert_eq!(set.total_matches("really? ok... sure?"), 3);
        assert_eq!(set.distinct_matches("really?"), 1);
        assert!(!set.contains_any("plain"));
    }
}
