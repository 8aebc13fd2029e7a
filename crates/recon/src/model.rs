use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One idea as produced by the collection step.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SummaryRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(
        default,
        alias = "sourceTag",
        alias = "source_subreddit",
        deserialize_with = "lenient_string"
    )]
    pub source_tag: String,
}

/// Evaluation numbers attached to a detail record. `None` means the
/// evaluator did not supply the dimension at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct EvaluationScores {
    #[serde(default, deserialize_with = "lenient_score")]
    pub innovation: Option<u32>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub quality: Option<u32>,
    #[serde(default, alias = "problemSignificance", deserialize_with = "lenient_score")]
    pub problem_significance: Option<u32>,
    #[serde(default, alias = "engagement_score", deserialize_with = "lenient_score")]
    pub engagement: Option<u32>,
}

/// The long-form analysis of an idea. Has no title of its own.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DetailRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub introduction: String,
    #[serde(default, alias = "implementationPlan", deserialize_with = "lenient_string")]
    pub implementation_plan: String,
    #[serde(default, alias = "marketAnalysis", deserialize_with = "lenient_string")]
    pub market_analysis: String,
    #[serde(default, alias = "userComments", deserialize_with = "lenient_string")]
    pub user_comments: String,
    #[serde(default, alias = "evaluation_scores", deserialize_with = "lenient_scores")]
    pub scores: EvaluationScores,
    #[serde(default, alias = "reasoning_behind_scores", deserialize_with = "lenient_string")]
    pub reasoning: String,
    #[serde(default, alias = "advice_for_improvement", deserialize_with = "lenient_string")]
    pub advice: String,
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Positional,
    Fuzzy,
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positional => write!(f, "positional"),
            Self::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// Outcome of matching one summary. `detail_index` is `None` when the
/// summary stayed unmatched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub summary_index: usize,
    pub detail_index: Option<usize>,
    pub score: f64,
    pub strategy: MatchStrategy,
}

impl MatchResult {
    pub fn is_matched(&self) -> bool {
        self.detail_index.is_some()
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One row of the reconciled collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedRecord {
    /// Assigned by the datastore downstream.
    pub idea_id: Option<i64>,
    pub title: String,
    pub url: String,
    pub content: String,
    pub overall_score: f64,
    pub introduction: String,
    pub implementation_plan: String,
    pub market_analysis: String,
    pub user_comments: String,
    pub innovation: u32,
    pub quality: u32,
    pub problem_significance: u32,
    pub engagement_score: u32,
    pub reasoning_behind_score: String,
    pub advice_for_improvement: String,
    pub date_of_post: String,
    pub source_tag: String,
    pub matched: bool,
    pub match_score: f64,
    pub strategy: Option<MatchStrategy>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_scores: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub total_count: usize,
    pub matched_count: usize,
    pub unmatched_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeMeta {
    pub config_name: String,
    pub engine_version: String,
    pub strategy: MatchStrategy,
    pub run_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeRun {
    pub meta: MergeMeta,
    pub stats: MergeStats,
    pub matches: Vec<MatchResult>,
    pub records: Vec<MergedRecord>,
}

/// Document shape consumed by the persistence step.
#[derive(Debug, Serialize)]
pub struct MergedDocument<'a> {
    pub ideas: &'a [MergedRecord],
    pub total_count: usize,
    pub matched_count: usize,
    pub unmatched_count: usize,
    pub merged_at: DateTime<Utc>,
}

impl MergeRun {
    pub fn to_document(&self) -> MergedDocument<'_> {
        MergedDocument {
            ideas: &self.records,
            total_count: self.stats.total_count,
            matched_count: self.stats.matched_count,
            unmatched_count: self.stats.unmatched_count,
            merged_at: self.meta.run_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_score<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(score_from_value))
}

fn lenient_scores<'de, D: Deserializer<'de>>(d: D) -> Result<EvaluationScores, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    match value {
        Some(v @ Value::Object(_)) => Ok(EvaluationScores::deserialize(v).unwrap_or_default()),
        _ => Ok(EvaluationScores::default()),
    }
}

fn score_from_value(value: &Value) -> Option<u32> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() || raw < 0.0 {
        return None;
    }
    Some(raw.round().min(u32::MAX as f64) as u32)
}
