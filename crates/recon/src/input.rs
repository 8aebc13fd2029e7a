//! Decoding of the two input collections from JSON.
//!
//! Upstream tools emit either a bare array or an object wrapping the array
//! under `"ideas"`; both are accepted.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::MergeError;
use crate::model::{DetailRecord, SummaryRecord};

#[derive(Deserialize)]
#[serde(untagged)]
enum Collection<T> {
    Wrapped { ideas: Vec<T> },
    Bare(Vec<T>),
}

fn parse_collection<T: DeserializeOwned>(json: &str, source: &str) -> Result<Vec<T>, MergeError> {
    let value: serde_json::Value = serde_json::from_str(json).map_err(|e| MergeError::InputParse {
        source: source.into(),
        message: e.to_string(),
    })?;

    match serde_json::from_value::<Collection<T>>(value) {
        Ok(Collection::Wrapped { ideas }) | Ok(Collection::Bare(ideas)) => Ok(ideas),
        Err(_) => Err(MergeError::InputParse {
            source: source.into(),
            message: "expected an array of records or an object with an \"ideas\" array".into(),
        }),
    }
}

pub fn parse_summaries(json: &str, source: &str) -> Result<Vec<SummaryRecord>, MergeError> {
    parse_collection(json, source)
}

pub fn parse_details(json: &str, source: &str) -> Result<Vec<DetailRecord>, MergeError> {
    parse_collection(json, source)
}
