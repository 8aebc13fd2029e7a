use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};

use ideamerge_recon::config::MergeConfig;
use ideamerge_recon::engine::{run, run_at};
use ideamerge_recon::input::{parse_details, parse_summaries};
use ideamerge_recon::model::{DetailRecord, EvaluationScores, MatchStrategy, MergeRun, SummaryRecord};
use ideamerge_recon::similarity::title_similarity;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 28, 9, 30, 0).unwrap()
}

fn load_and_run(config_toml: &str) -> MergeRun {
    let dir = fixtures_dir();
    let config = MergeConfig::from_toml(config_toml).unwrap();

    let summaries_path = dir.join("scrape_agents_ideas.json");
    let details_path = dir.join("idea_detailing_agent_response.json");
    let summaries_json = std::fs::read_to_string(&summaries_path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", summaries_path.display()));
    let details_json = std::fs::read_to_string(&details_path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", details_path.display()));

    let summaries = parse_summaries(&summaries_json, "scrape_agents_ideas.json").unwrap();
    let details = parse_details(&details_json, "idea_detailing_agent_response.json").unwrap();

    run_at(&config, &summaries, &details, fixed_now())
}

fn summary(title: &str, url: &str, content: &str) -> SummaryRecord {
    SummaryRecord {
        title: title.into(),
        url: url.into(),
        content: content.into(),
        ..Default::default()
    }
}

fn detail(intro: &str, innovation: u32, quality: u32, significance: u32) -> DetailRecord {
    DetailRecord {
        introduction: intro.into(),
        scores: EvaluationScores {
            innovation: Some(innovation),
            quality: Some(quality),
            problem_significance: Some(significance),
            engagement: Some(70),
        },
        ..Default::default()
    }
}

// -------------------------------------------------------------------------
// Fixture run
// -------------------------------------------------------------------------

#[test]
fn fixture_run_uses_fuzzy_matching() {
    let toml = std::fs::read_to_string(fixtures_dir().join("ideamerge.toml")).unwrap();
    let result = load_and_run(&toml);

    assert_eq!(result.meta.config_name, "fixture run");
    assert_eq!(result.meta.strategy, MatchStrategy::Fuzzy);
    assert_eq!(result.stats.total_count, 3);
    assert_eq!(result.stats.matched_count, 2);
    assert_eq!(result.stats.unmatched_count, 1);

    let habit = &result.records[0];
    assert!(habit.matched);
    assert_eq!(habit.implementation_plan, "Slack bot plus a small web dashboard.");
    assert_eq!(habit.overall_score, 6.0);
    assert_eq!(habit.missing_scores, vec!["engagement_score"]);
    assert_eq!(habit.source_tag, "r/SideProject");

    let invoice = &result.records[1];
    assert_eq!(result.matches[1].detail_index, Some(0));
    assert_eq!(invoice.overall_score, 7.3);
    assert_eq!(invoice.engagement_score, 42);
    assert_eq!(invoice.advice_for_improvement, "Focus on agencies first.");
    assert_eq!(invoice.source_tag, "r/Entrepreneur");

    let plant = &result.records[2];
    assert!(!plant.matched);
    assert_eq!(plant.overall_score, 0.0);
    assert_eq!(plant.introduction, "");
    assert_eq!(plant.source_tag, "indiehackers.com");
}

#[test]
fn fixture_document_shape() {
    let result = load_and_run("");
    let doc = serde_json::to_value(result.to_document()).unwrap();

    assert_eq!(doc["total_count"], 3);
    assert_eq!(doc["matched_count"], 2);
    assert_eq!(doc["unmatched_count"], 1);
    assert_eq!(doc["ideas"].as_array().unwrap().len(), 3);
    assert_eq!(doc["ideas"][0]["idea_id"], serde_json::Value::Null);
    assert_eq!(doc["ideas"][0]["strategy"], "fuzzy");
    assert_eq!(doc["ideas"][2]["strategy"], serde_json::Value::Null);
    assert_eq!(doc["merged_at"], "2026-02-28T09:30:00Z");
}

// -------------------------------------------------------------------------
// Scenarios
// -------------------------------------------------------------------------

#[test]
fn equal_lengths_pair_positionally() {
    let summaries = vec![summary(
        "Foo Tracker",
        "https://reddit.com/r/saas/comments/1/x",
        "tracks foo",
    )];
    let details = vec![detail("FooTracker is a tool for tracking foo items", 7, 6, 8)];

    let result = run_at(&MergeConfig::default(), &summaries, &details, fixed_now());

    assert_eq!(result.meta.strategy, MatchStrategy::Positional);
    assert_eq!(result.matches[0].detail_index, Some(0));
    assert_eq!(result.records[0].overall_score, 7.0);
    assert_eq!(result.records[0].source_tag, "r/saas");
    assert_eq!(result.records[0].engagement_score, 70);
}

#[test]
fn unequal_lengths_give_the_detail_to_the_closer_title() {
    let summaries = vec![
        summary("Recipe Swap Club", "", "trade recipes"),
        summary("Foo Tracker Pro", "", "tracks foo"),
    ];
    let details = vec![detail("Foo Tracker Pro is a tool for tracking foo items", 7, 6, 8)];
    let derived = "Foo Tracker Pro";
    assert!(title_similarity("Foo Tracker Pro", derived) > title_similarity("Recipe Swap Club", derived));

    let result = run_at(&MergeConfig::default(), &summaries, &details, fixed_now());

    assert_eq!(result.meta.strategy, MatchStrategy::Fuzzy);
    assert_eq!(result.matches[0].detail_index, None);
    assert_eq!(result.records[0].overall_score, 0.0);
    assert_eq!(result.matches[1].detail_index, Some(0));
    assert!(result.matches[1].score >= 0.3);
    assert_eq!(result.records[1].overall_score, 7.0);
}

#[test]
fn punctuation_does_not_hurt_title_similarity() {
    assert!(title_similarity("AI Image Upscaler", "ai-image-upscaler!!") > 0.8);
}

#[test]
fn no_details_leaves_every_summary_unmatched() {
    let summaries = vec![
        summary("A", "https://example.com/a", ""),
        summary("B", "", ""),
        summary("C", "", ""),
    ];

    let result = run_at(&MergeConfig::default(), &summaries, &[], fixed_now());

    assert_eq!(result.records.len(), 3);
    assert_eq!(result.stats.matched_count, 0);
    assert_eq!(result.stats.unmatched_count, 3);
    assert!(result.records.iter().all(|r| !r.matched && r.overall_score == 0.0));
    assert_eq!(result.records[0].source_tag, "example.com");
}

#[test]
fn untitled_summary_is_unmatched_in_both_modes() {
    let summaries = vec![summary("", "", "body"), summary("Foo Tracker", "", "tracks foo")];
    let details = vec![
        detail("Bar Tracker is a tool", 5, 5, 5),
        detail("Foo Tracker is a tool", 7, 6, 8),
    ];

    let positional = run_at(&MergeConfig::default(), &summaries, &details, fixed_now());
    assert_eq!(positional.stats.unmatched_count, 1);
    assert_eq!(positional.matches[1].detail_index, Some(1));

    let fuzzy = run_at(&MergeConfig::default(), &summaries, &details[1..], fixed_now());
    assert_eq!(fuzzy.meta.strategy, MatchStrategy::Fuzzy);
    assert_eq!(fuzzy.matches[0].detail_index, None);
    assert_eq!(fuzzy.matches[1].detail_index, Some(0));
}

#[test]
fn higher_threshold_rejects_weak_matches() {
    let summaries = vec![summary("Invoice Robot", "", ""), summary("Other", "", "")];
    let details = vec![detail("InvoiceRobot is an app for invoices", 5, 5, 5)];

    let loose = run_at(&MergeConfig::default(), &summaries, &details, fixed_now());
    assert_eq!(loose.stats.matched_count, 1);

    let strict = MergeConfig::from_toml("[matching]\nthreshold = 0.9\n").unwrap();
    let result = run_at(&strict, &summaries, &details, fixed_now());
    assert_eq!(result.stats.matched_count, 0);
}

#[test]
fn run_stamps_records_with_the_run_time() {
    let summaries = vec![summary("A", "", "")];
    let result = run(&MergeConfig::default(), &summaries, &[]);
    assert_eq!(result.records[0].created_at, result.meta.run_at);
    assert_eq!(result.records[0].updated_at, result.meta.run_at);
}
