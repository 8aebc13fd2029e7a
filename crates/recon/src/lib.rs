//! `ideamerge-recon`: reconciles idea summaries with their detailed
//! evaluations.
//!
//! Pure engine crate: receives pre-loaded records, returns merged records
//! and run statistics. No CLI or IO dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod matcher;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod similarity;
pub mod stats;
pub mod title;

pub use config::MergeConfig;
pub use engine::{run, run_at, run_with};
pub use error::MergeError;
pub use input::{parse_details, parse_summaries};
pub use model::{
    DetailRecord, EvaluationScores, MatchResult, MatchStrategy, MergeRun, MergeStats, MergedRecord,
    SummaryRecord,
};
pub use normalize::normalize;
pub use similarity::{content_similarity, title_similarity};
pub use title::{CopulaTitleExtractor, TitleExtractor};
