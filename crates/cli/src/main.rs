// ideamerge CLI - merge scraped idea summaries with their detailed evaluations

mod exit_codes;
mod extract;
mod merge;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_ERROR, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "ideamerge")]
#[command(about = "Reconcile idea summaries with their detailed evaluations")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge a summaries file with a details file
    #[command(after_help = "\
Examples:
  ideamerge merge --summaries scrape_agents_ideas.json --details idea_detailing_agent_response.json
  ideamerge merge -s ideas.json -d details.json --output merged_ideas.json
  ideamerge merge -s ideas.json -d details.json --config merge.toml --json
  ideamerge merge -s ideas.json -d details.json --csv merged.csv")]
    Merge {
        /// Summary records (JSON array, or object with an \"ideas\" array)
        #[arg(long, short = 's', default_value = "scrape_agents_ideas.json")]
        summaries: PathBuf,

        /// Detail records (JSON array, or object with an \"ideas\" array)
        #[arg(long, short = 'd', default_value = "idea_detailing_agent_response.json")]
        details: PathBuf,

        /// Path to a merge TOML config
        #[arg(long, short = 'c', env = "IDEAMERGE_CONFIG")]
        config: Option<PathBuf>,

        /// Write the merged document to a JSON file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Write the merged records to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the merged document to stdout
        #[arg(long)]
        json: bool,
    },

    /// Extract summaries and details from an agent pipeline transcript
    #[command(after_help = "\
Examples:
  ideamerge extract pipeline_response.txt
  ideamerge extract pipeline_response.txt --out-dir data/outputs")]
    Extract {
        /// Transcript file (JSON array of events)
        transcript: PathBuf,

        /// Directory receiving the two extracted JSON files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Validate a merge config without running
    Validate {
        /// Path to the merge TOML config
        config: PathBuf,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nengine:  ideamerge-recon ", env!("CARGO_PKG_VERSION"),
    )
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let result = match cli.command {
        Commands::Merge {
            summaries,
            details,
            config,
            output,
            csv,
            json,
        } => merge::cmd_merge(merge::MergeArgs {
            summaries,
            details,
            config,
            output,
            csv,
            json,
        }),
        Commands::Extract { transcript, out_dir } => extract::cmd_extract(transcript, out_dir),
        Commands::Validate { config } => merge::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
