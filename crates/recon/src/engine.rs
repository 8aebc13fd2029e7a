use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use log::info;

use crate::config::MergeConfig;
use crate::matcher::{match_fuzzy, match_positional, select_strategy};
use crate::merge::build;
use crate::model::{DetailRecord, MatchStrategy, MergeMeta, MergeRun, SummaryRecord};
use crate::stats::compute_stats;
use crate::title::TitleExtractor;

/// Run one reconciliation, stamping the output with the current time.
pub fn run(config: &MergeConfig, summaries: &[SummaryRecord], details: &[DetailRecord]) -> MergeRun {
    run_at(config, summaries, details, Utc::now())
}

/// Run one reconciliation with an explicit timestamp. Identical arguments
/// always produce an identical [`MergeRun`].
pub fn run_at(
    config: &MergeConfig,
    summaries: &[SummaryRecord],
    details: &[DetailRecord],
    now: DateTime<Utc>,
) -> MergeRun {
    let extractor = config.matching.title_extractor();
    run_with(config, summaries, details, &extractor, now)
}

/// Run one reconciliation deriving detail titles with a caller-supplied
/// extractor instead of the configured default.
pub fn run_with<E: TitleExtractor + ?Sized>(
    config: &MergeConfig,
    summaries: &[SummaryRecord],
    details: &[DetailRecord],
    extractor: &E,
    now: DateTime<Utc>,
) -> MergeRun {
    let strategy = select_strategy(config.matching.mode, summaries.len(), details.len());
    info!(
        "{} summaries, {} details: using {strategy} matching",
        summaries.len(),
        details.len()
    );

    let matches = match strategy {
        MatchStrategy::Positional => {
            match_positional(summaries, details, config.content.keywords.as_slice())
        }
        MatchStrategy::Fuzzy => {
            let mut used = BTreeSet::new();
            match_fuzzy(summaries, details, extractor, config.matching.threshold, &mut used)
        }
    };

    let records = matches
        .iter()
        .zip(summaries)
        .map(|(m, summary)| {
            let detail = m.detail_index.and_then(|di| details.get(di));
            build(summary, detail, m, now)
        })
        .collect();

    let stats = compute_stats(&matches);
    info!(
        "merged {} ideas: {} matched, {} unmatched",
        stats.total_count, stats.matched_count, stats.unmatched_count
    );

    MergeRun {
        meta: MergeMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            strategy,
            run_at: now,
        },
        stats,
        matches,
        records,
    }
}
