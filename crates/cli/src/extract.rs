//! `ideamerge extract`: pull both input collections out of an agent
//! pipeline transcript.
//!
//! The transcript is a JSON array of events. Scrape tools report their ideas
//! as a JSON array embedded in a `result` string; the detailing agent reports
//! through `set_model_response`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::exit_codes::{EXIT_EXTRACT_NOT_FOUND, EXIT_EXTRACT_PARSE, EXIT_MERGE_OUTPUT, EXIT_USAGE};
use crate::CliError;

pub const SUMMARIES_FILE: &str = "scrape_agents_ideas.json";
pub const DETAILS_FILE: &str = "idea_detailing_agent_response.json";

const SCRAPE_PREFIX: &str = "scrape_";
const DETAIL_RESPONSE: &str = "set_model_response";

#[derive(Debug)]
pub struct Extracted {
    pub summaries: Vec<Value>,
    pub details: Vec<Value>,
}

fn extract_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

fn embedded_array() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)(\[.*\])").expect("embedded array pattern is a valid regex"))
}

/// Function responses in transcript order.
fn function_responses(events: &[Value]) -> impl Iterator<Item = (&str, &Value)> {
    events
        .iter()
        .filter_map(|e| e.pointer("/content/parts").and_then(Value::as_array))
        .flatten()
        .filter_map(|part| {
            let call = part.get("functionResponse")?;
            let name = call.get("name")?.as_str()?;
            Some((name, call.get("response")?))
        })
}

pub fn extract_responses(transcript: &str) -> Result<Extracted, CliError> {
    let events: Vec<Value> = serde_json::from_str(transcript).map_err(|e| {
        extract_err(EXIT_EXTRACT_PARSE, format!("transcript is not a JSON array of events: {e}"))
    })?;

    let mut summaries: Vec<Value> = Vec::new();
    let mut details: Option<Vec<Value>> = None;

    for (name, response) in function_responses(&events) {
        if name.starts_with(SCRAPE_PREFIX) {
            let Some(result) = response.get("result").and_then(Value::as_str) else {
                continue;
            };
            let Some(found) = embedded_array().find(result) else {
                continue;
            };
            match serde_json::from_str::<Vec<Value>>(found.as_str()) {
                Ok(ideas) => summaries.extend(ideas),
                Err(_) => log::warn!("could not parse scrape agent ideas from {name}"),
            }
        } else if name == DETAIL_RESPONSE {
            details = match response {
                Value::Object(obj) => match obj.get("ideas") {
                    Some(Value::Array(ideas)) => Some(ideas.clone()),
                    _ => Some(vec![response.clone()]),
                },
                Value::Array(ideas) => Some(ideas.clone()),
                Value::Null => None,
                other => Some(vec![other.clone()]),
            };
        }
    }

    if summaries.is_empty() {
        return Err(extract_err(
            EXIT_EXTRACT_NOT_FOUND,
            "could not find any scrape agent responses in transcript",
        ));
    }
    let mut details = match details {
        Some(d) if !d.is_empty() => d,
        _ => {
            return Err(extract_err(
                EXIT_EXTRACT_NOT_FOUND,
                "could not find idea detailing agent response in transcript",
            ))
        }
    };

    backfill_urls(&summaries, &mut details);

    Ok(Extracted { summaries, details })
}

/// Copy `url` onto details that carry a title exactly equal to a summary's.
fn backfill_urls(summaries: &[Value], details: &mut [Value]) {
    let title_to_url: HashMap<&str, &Value> = summaries
        .iter()
        .filter_map(|s| Some((s.get("title")?.as_str()?, s.get("url")?)))
        .collect();

    for det in details.iter_mut() {
        let Some(title) = det.get("title").and_then(Value::as_str).filter(|t| !t.is_empty()) else {
            continue;
        };
        let Some(url) = title_to_url.get(title).map(|u| (*u).clone()) else {
            continue;
        };
        if let Some(obj) = det.as_object_mut() {
            obj.insert("url".into(), url);
        }
    }
}

pub fn cmd_extract(transcript: PathBuf, out_dir: PathBuf) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&transcript).map_err(|e| {
        extract_err(EXIT_USAGE, format!("cannot read {}: {e}", transcript.display()))
    })?;

    let extracted = extract_responses(&text)?;

    write_json(&out_dir.join(SUMMARIES_FILE), &extracted.summaries)?;
    write_json(&out_dir.join(DETAILS_FILE), &extracted.details)?;

    eprintln!(
        "extracted {} scrape ideas and {} analyses into {}",
        extracted.summaries.len(),
        extracted.details.len(),
        out_dir.display(),
    );
    Ok(())
}

fn write_json(path: &Path, items: &[Value]) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(items)
        .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
    std::fs::write(path, text).map_err(|e| {
        extract_err(EXIT_MERGE_OUTPUT, format!("cannot write {}: {e}", path.display()))
    })
}
