use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use url::Url;

use crate::model::{DetailRecord, EvaluationScores, MatchResult, MergedRecord, SummaryRecord};

/// Assemble the merged record for one summary.
///
/// Without a detail every evaluation field is empty or zero and the overall
/// score is 0. `source_tag` is always re-derived from the summary URL.
pub fn build(
    summary: &SummaryRecord,
    detail: Option<&DetailRecord>,
    result: &MatchResult,
    now: DateTime<Utc>,
) -> MergedRecord {
    let empty = DetailRecord::default();
    let d = detail.unwrap_or(&empty);
    let scores = d.scores;

    MergedRecord {
        idea_id: None,
        title: summary.title.clone(),
        url: summary.url.clone(),
        content: summary.content.clone(),
        overall_score: overall_score(&scores),
        introduction: d.introduction.clone(),
        implementation_plan: d.implementation_plan.clone(),
        market_analysis: d.market_analysis.clone(),
        user_comments: d.user_comments.clone(),
        innovation: scores.innovation.unwrap_or(0),
        quality: scores.quality.unwrap_or(0),
        problem_significance: scores.problem_significance.unwrap_or(0),
        engagement_score: scores.engagement.unwrap_or(0),
        reasoning_behind_score: d.reasoning.clone(),
        advice_for_improvement: d.advice.clone(),
        date_of_post: summary.date.clone(),
        source_tag: source_tag(&summary.url),
        matched: detail.is_some(),
        match_score: if detail.is_some() { result.score } else { 0.0 },
        strategy: detail.map(|_| result.strategy),
        missing_scores: if detail.is_some() { missing_scores(&scores) } else { Vec::new() },
        created_at: now,
        updated_at: now,
    }
}

/// Mean of innovation, quality and problem significance, rounded to one
/// decimal and capped to `[0, 10]`. Zero unless all three are present and
/// non-zero.
pub fn overall_score(scores: &EvaluationScores) -> f64 {
    match (scores.innovation, scores.quality, scores.problem_significance) {
        (Some(i), Some(q), Some(p)) if i > 0 && q > 0 && p > 0 => {
            let mean = (i as f64 + q as f64 + p as f64) / 3.0;
            ((mean * 10.0).round() / 10.0).clamp(0.0, 10.0)
        }
        _ => 0.0,
    }
}

fn missing_scores(scores: &EvaluationScores) -> Vec<String> {
    [
        ("innovation", scores.innovation),
        ("quality", scores.quality),
        ("problem_significance", scores.problem_significance),
        ("engagement_score", scores.engagement),
    ]
    .into_iter()
    .filter(|(_, v)| v.is_none())
    .map(|(name, _)| name.to_string())
    .collect()
}

fn forum_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https?://[^/]+/r/([^/?#]+)/").expect("forum pattern is a valid regex")
    })
}

/// `"r/<name>"` for community-forum URLs (`.../r/<name>/...`), else the
/// URL's network location, else `"Unknown"`.
pub fn source_tag(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return "Unknown".into();
    }

    if let Some(caps) = forum_pattern().captures(url) {
        return format!("r/{}", &caps[1]);
    }

    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) if !host.is_empty() => match parsed.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            },
            _ => "Unknown".into(),
        },
        Err(_) => "Unknown".into(),
    }
}
