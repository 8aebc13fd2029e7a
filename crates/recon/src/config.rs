use serde::Deserialize;

use crate::error::MergeError;
use crate::similarity::DEFAULT_KEYWORDS;
use crate::title::CopulaTitleExtractor;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

fn default_name() -> String {
    "ideamerge".into()
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            matching: MatchingConfig::default(),
            content: ContentConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// How the strategy is chosen for a run.
///
/// `Auto` pairs by index when both collections have the same length and
/// falls back to fuzzy title matching otherwise. `Fuzzy` always matches by
/// title, even when the lengths agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyMode {
    #[default]
    Auto,
    Fuzzy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchingConfig {
    #[serde(default)]
    pub mode: StrategyMode,
    /// Minimum title similarity for a fuzzy match to be accepted.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Words kept from the introduction when no copula phrase is found.
    #[serde(default = "default_fallback_words")]
    pub fallback_title_words: usize,
}

fn default_threshold() -> f64 {
    0.3
}

fn default_fallback_words() -> usize {
    8
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            mode: StrategyMode::Auto,
            threshold: default_threshold(),
            fallback_title_words: default_fallback_words(),
        }
    }
}

impl MatchingConfig {
    pub fn title_extractor(&self) -> CopulaTitleExtractor {
        CopulaTitleExtractor {
            fallback_words: self.fallback_title_words,
        }
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MergeConfig {
    pub fn from_toml(input: &str) -> Result<Self, MergeError> {
        let config: MergeConfig =
            toml::from_str(input).map_err(|e| MergeError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        let threshold = self.matching.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(MergeError::ConfigValidation(format!(
                "matching.threshold must be within [0, 1], got {threshold}"
            )));
        }

        if self.matching.fallback_title_words == 0 {
            return Err(MergeError::ConfigValidation(
                "matching.fallback_title_words must be at least 1".into(),
            ));
        }

        if let Some(pos) = self.content.keywords.iter().position(|k| k.trim().is_empty()) {
            return Err(MergeError::ConfigValidation(format!(
                "content.keywords[{pos}] is empty"
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = MergeConfig::from_toml("").unwrap();
        assert_eq!(config.name, "ideamerge");
        assert_eq!(config.matching.mode, StrategyMode::Auto);
        assert_eq!(config.matching.threshold, 0.3);
        assert_eq!(config.matching.fallback_title_words, 8);
        assert_eq!(config.content.keywords.len(), DEFAULT_KEYWORDS.len());
    }

    #[test]
    fn parse_full() {
        let config = MergeConfig::from_toml(
            r#"
name = "nightly"

[matching]
mode = "fuzzy"
threshold = 0.45
fallback_title_words = 5

[content]
keywords = ["app", "crm"]
"#,
        )
        .unwrap();
        assert_eq!(config.name, "nightly");
        assert_eq!(config.matching.mode, StrategyMode::Fuzzy);
        assert_eq!(config.matching.threshold, 0.45);
        assert_eq!(config.matching.title_extractor().fallback_words, 5);
        assert_eq!(config.content.keywords, vec!["app", "crm"]);
    }

    #[test]
    fn reject_threshold_out_of_range() {
        let err = MergeConfig::from_toml("[matching]\nthreshold = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("threshold"));
    }

    #[test]
    fn reject_zero_fallback_words() {
        let err = MergeConfig::from_toml("[matching]\nfallback_title_words = 0\n").unwrap_err();
        assert!(err.to_string().contains("fallback_title_words"));
    }

    #[test]
    fn reject_blank_keyword() {
        let err = MergeConfig::from_toml("[content]\nkeywords = [\"app\", \" \"]\n").unwrap_err();
        assert!(err.to_string().contains("keywords[1]"));
    }

    #[test]
    fn reject_unknown_mode() {
        let err = MergeConfig::from_toml("[matching]\nmode = \"positional\"\n");
        assert!(matches!(err, Err(MergeError::ConfigParse(_))));
    }

    #[test]
    fn reject_unknown_key() {
        assert!(MergeConfig::from_toml("[matching]\nthreshhold = 0.2\n").is_err());
    }
}
