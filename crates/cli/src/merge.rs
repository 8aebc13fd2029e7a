//! `ideamerge merge` / `ideamerge validate`: run a reconciliation from files.

use std::path::{Path, PathBuf};

use serde::Serialize;

use ideamerge_recon::{MergeConfig, MergeRun, MergedRecord};

use crate::exit_codes::{
    EXIT_MERGE_INPUT, EXIT_MERGE_INVALID_CONFIG, EXIT_MERGE_NO_MATCHES, EXIT_MERGE_OUTPUT, EXIT_USAGE,
};
use crate::CliError;

pub struct MergeArgs {
    pub summaries: PathBuf,
    pub details: PathBuf,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub json: bool,
}

fn merge_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path)
        .map_err(|e| merge_err(EXIT_USAGE, format!("cannot read {}: {e}", path.display())))
}

fn load_config(path: Option<&Path>) -> Result<MergeConfig, CliError> {
    match path {
        Some(path) => {
            let text = read_file(path)?;
            MergeConfig::from_toml(&text)
                .map_err(|e| merge_err(EXIT_MERGE_INVALID_CONFIG, e.to_string()))
        }
        None => Ok(MergeConfig::default()),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn cmd_merge(args: MergeArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;

    let extract_hint = "run `ideamerge extract <transcript>` first to produce the input files";
    let summaries_json = read_file(&args.summaries).map_err(|e| e.with_hint(extract_hint))?;
    let details_json = read_file(&args.details).map_err(|e| e.with_hint(extract_hint))?;

    let summaries = ideamerge_recon::parse_summaries(&summaries_json, &display_name(&args.summaries))
        .map_err(|e| merge_err(EXIT_MERGE_INPUT, e.to_string()))?;
    let details = ideamerge_recon::parse_details(&details_json, &display_name(&args.details))
        .map_err(|e| merge_err(EXIT_MERGE_INPUT, e.to_string()))?;

    let result = ideamerge_recon::run(&config, &summaries, &details);

    let json_str = serde_json::to_string_pretty(&result.to_document())
        .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &json_str)
            .map_err(|e| merge_err(EXIT_MERGE_OUTPUT, format!("cannot write output: {e}")))?;
        log::info!("wrote {}", path.display());
    }

    if let Some(ref path) = args.csv {
        write_csv(path, &result.records)?;
        log::info!("wrote {}", path.display());
    }

    if args.json {
        println!("{json_str}");
    }

    print_summary(&result);

    let s = &result.stats;
    if s.total_count > 0 && s.matched_count == 0 {
        return Err(merge_err(EXIT_MERGE_NO_MATCHES, "no ideas were matched and merged"));
    }

    Ok(())
}

fn print_summary(result: &MergeRun) {
    let s = &result.stats;
    eprintln!(
        "{} merge: {} ideas, {} matched, {} unmatched",
        result.meta.strategy, s.total_count, s.matched_count, s.unmatched_count,
    );
}

pub fn cmd_validate(config: PathBuf) -> Result<(), CliError> {
    let config = load_config(Some(&config))?;
    eprintln!(
        "config '{}' is valid (mode {:?}, threshold {}, {} keywords)",
        config.name,
        config.matching.mode,
        config.matching.threshold,
        config.content.keywords.len(),
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Flat row for the CSV export; nested and list fields are left out.
#[derive(Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    url: &'a str,
    date_of_post: &'a str,
    source_tag: &'a str,
    matched: bool,
    strategy: String,
    match_score: f64,
    overall_score: f64,
    innovation: u32,
    quality: u32,
    problem_significance: u32,
    engagement_score: u32,
    introduction: &'a str,
}

impl<'a> From<&'a MergedRecord> for CsvRow<'a> {
    fn from(r: &'a MergedRecord) -> Self {
        Self {
            title: &r.title,
            url: &r.url,
            date_of_post: &r.date_of_post,
            source_tag: &r.source_tag,
            matched: r.matched,
            strategy: r.strategy.map(|s| s.to_string()).unwrap_or_default(),
            match_score: r.match_score,
            overall_score: r.overall_score,
            innovation: r.innovation,
            quality: r.quality,
            problem_significance: r.problem_significance,
            engagement_score: r.engagement_score,
            introduction: &r.introduction,
        }
    }
}

fn write_csv(path: &Path, records: &[MergedRecord]) -> Result<(), CliError> {
    let csv_err = |e: csv::Error| merge_err(EXIT_MERGE_OUTPUT, format!("cannot write CSV: {e}"));

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    for record in records {
        writer.serialize(CsvRow::from(record)).map_err(csv_err)?;
    }
    writer
        .flush()
        .map_err(|e| merge_err(EXIT_MERGE_OUTPUT, format!("cannot write CSV: {e}")))
}
