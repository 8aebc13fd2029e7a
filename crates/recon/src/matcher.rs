use std::collections::BTreeSet;

use log::{debug, warn};

use crate::config::StrategyMode;
use crate::model::{DetailRecord, MatchResult, MatchStrategy, SummaryRecord};
use crate::similarity::{content_similarity_with, title_similarity};
use crate::title::TitleExtractor;

/// Pick the strategy for a run: positional only when the mode allows it and
/// both collections have the same length.
pub fn select_strategy(mode: StrategyMode, summaries: usize, details: usize) -> MatchStrategy {
    match mode {
        StrategyMode::Auto if summaries == details => MatchStrategy::Positional,
        _ => MatchStrategy::Fuzzy,
    }
}

fn unmatched(summary_index: usize, strategy: MatchStrategy) -> MatchResult {
    MatchResult {
        summary_index,
        detail_index: None,
        score: 0.0,
        strategy,
    }
}

/// Pair summary `i` with detail `i`.
///
/// A summary without a title is reported unmatched; its detail is still
/// consumed and never offered to another summary. The score is the content
/// similarity between the summary body and the detail introduction, kept as
/// a verification signal only.
pub fn match_positional<S: AsRef<str>>(
    summaries: &[SummaryRecord],
    details: &[DetailRecord],
    keywords: &[S],
) -> Vec<MatchResult> {
    summaries
        .iter()
        .enumerate()
        .map(|(i, summary)| {
            if summary.title.trim().is_empty() {
                warn!("summary {} has no title, left unmatched", i + 1);
                return unmatched(i, MatchStrategy::Positional);
            }
            let Some(detail) = details.get(i) else {
                return unmatched(i, MatchStrategy::Positional);
            };

            let score = content_similarity_with(&summary.content, &detail.introduction, keywords);
            debug!(
                "positional match {} (content similarity {score}): {}",
                i + 1,
                preview(&summary.title)
            );

            MatchResult {
                summary_index: i,
                detail_index: Some(i),
                score,
                strategy: MatchStrategy::Positional,
            }
        })
        .collect()
}

/// Greedy best-title matching, in summary order.
///
/// Each summary takes the highest-scoring detail not yet in `used` whose
/// derived title scores at least `threshold`; ties go to the lowest detail
/// index. Accepted detail indices are added to `used`, so a detail is
/// consumed at most once across calls sharing the same set.
pub fn match_fuzzy<E: TitleExtractor + ?Sized>(
    summaries: &[SummaryRecord],
    details: &[DetailRecord],
    extractor: &E,
    threshold: f64,
    used: &mut BTreeSet<usize>,
) -> Vec<MatchResult> {
    let derived: Vec<String> = details
        .iter()
        .map(|d| extractor.derive_title(&d.introduction))
        .collect();

    let mut results = Vec::with_capacity(summaries.len());

    for (si, summary) in summaries.iter().enumerate() {
        if summary.title.trim().is_empty() {
            warn!("summary {} has no title, left unmatched", si + 1);
            results.push(unmatched(si, MatchStrategy::Fuzzy));
            continue;
        }

        let mut best: Option<(usize, f64)> = None;
        for (di, title) in derived.iter().enumerate() {
            if used.contains(&di) || title.trim().is_empty() {
                continue;
            }
            let score = title_similarity(&summary.title, title);
            if score < threshold {
                continue;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((di, score));
            }
        }

        match best {
            Some((di, score)) => {
                used.insert(di);
                debug!("fuzzy matched (similarity {score}): {}", preview(&summary.title));
                results.push(MatchResult {
                    summary_index: si,
                    detail_index: Some(di),
                    score,
                    strategy: MatchStrategy::Fuzzy,
                });
            }
            None => {
                debug!("no acceptable match for: {}", preview(&summary.title));
                results.push(unmatched(si, MatchStrategy::Fuzzy));
            }
        }
    }

    results
}

fn preview(title: &str) -> String {
    title.chars().take(50).collect()
}
