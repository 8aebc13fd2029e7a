use std::sync::OnceLock;

use regex::Regex;

/// Derives a title-like string from a detail record's introduction.
///
/// Detail records carry no title of their own, so fuzzy matching compares
/// summary titles against whatever an extractor pulls out of the narrative.
pub trait TitleExtractor {
    fn derive_title(&self, introduction: &str) -> String;
}

impl<F> TitleExtractor for F
where
    F: Fn(&str) -> String,
{
    fn derive_title(&self, introduction: &str) -> String {
        self(introduction)
    }
}

/// Default extractor: a leading capitalized phrase followed by a copula
/// ("FooTracker is a tool for ..." -> "FooTracker"), else the first
/// `fallback_words` words of the introduction.
#[derive(Debug, Clone)]
pub struct CopulaTitleExtractor {
    pub fallback_words: usize,
}

impl Default for CopulaTitleExtractor {
    fn default() -> Self {
        Self { fallback_words: 8 }
    }
}

fn copula_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^([A-Z][a-zA-Z0-9\s]+?)(?:\s+is\s+|\s+is\s+a\s+|\s+is\s+an\s+|\s+is\s+a\s+tool|\s+is\s+an\s+app)",
        )
        .expect("copula pattern is a valid regex")
    })
}

impl TitleExtractor for CopulaTitleExtractor {
    fn derive_title(&self, introduction: &str) -> String {
        if let Some(caps) = copula_pattern().captures(introduction) {
            if let Some(name) = caps.get(1) {
                return name.as_str().trim().to_string();
            }
        }

        introduction
            .split_whitespace()
            .take(self.fallback_words)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copula_phrase() {
        let x = CopulaTitleExtractor::default();
        assert_eq!(x.derive_title("FooTracker is a tool for tracking foo items"), "FooTracker");
        assert_eq!(x.derive_title("Meal Planner Pro is an app that plans meals"), "Meal Planner Pro");
    }

    #[test]
    fn lowercase_start_falls_back_to_leading_words() {
        let x = CopulaTitleExtractor::default();
        assert_eq!(
            x.derive_title("a simple way to track habits across all of your devices today"),
            "a simple way to track habits across all"
        );
    }

    #[test]
    fn no_copula_falls_back() {
        let x = CopulaTitleExtractor { fallback_words: 3 };
        assert_eq!(x.derive_title("Budget helper for students."), "Budget helper for");
    }

    #[test]
    fn empty_introduction() {
        assert_eq!(CopulaTitleExtractor::default().derive_title(""), "");
    }

    #[test]
    fn closures_are_extractors() {
        let first_word = |intro: &str| intro.split_whitespace().next().unwrap_or("").to_string();
        assert_eq!(first_word.derive_title("Alpha beta"), "Alpha");
    }
}
