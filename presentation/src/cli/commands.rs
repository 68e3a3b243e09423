//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for face-quorum
#[derive(Parser, Debug)]
#[command(name = "face-quorum")]
#[command(
    author,
    version,
    about = "Score how well a translation preserves the face strategies of the Greek"
)]
#[command(long_about = r#"
face-quorum has a panel of LLM linguists score how faithfully a translation
renders the politeness ("face") strategies annotated in the Greek text.

The pipeline has three stages:
1. Review:   every linguist scores every verse; a critic accepts or sends back
2. Debate:   linguists debate each verse's scores under a moderator
3. Coalesce: reviews and debates are merged into one JSON report

Configuration files are loaded from (in priority order):
1. FACE_QUORUM_*                          Environment (SECTION__KEY)
2. --config <path>                        Explicit config file
3. ./face-quorum.toml                     Project-level config
4. ~/.config/face-quorum/config.toml      Global config

API keys are read from OPENAI_API_KEY and GEMINI_API_KEY (a .env file in the
working directory is honored).

Example:
  face-quorum run
  face-quorum review --limit 3 -v
  face-quorum debate --output runs/vi
  face-quorum coalesce
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Review, debate and coalesce in one go
    Run(StageArgs),
    /// Independent reviews only; writes the review table
    Review(StageArgs),
    /// Debate every verse of an existing review table
    Debate(StageArgs),
    /// Merge the review and debate tables into the report
    Coalesce(StageArgs),
}

impl Command {
    pub fn args(&self) -> &StageArgs {
        match self {
            Command::Run(args)
            | Command::Review(args)
            | Command::Debate(args)
            | Command::Coalesce(args) => args,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Run(_) => "run",
            Command::Review(_) => "review",
            Command::Debate(_) => "debate",
            Command::Coalesce(_) => "coalesce",
        }
    }
}

/// Overrides shared by every stage
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct StageArgs {
    /// Directory for tables, report and logs (overrides output.dir)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Process at most this many verses (overrides batch.limit)
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// Delay between verses in milliseconds (overrides batch.pacing_ms)
    #[arg(long, value_name = "MS")]
    pub pacing_ms: Option<u64>,

    /// USFM file of the translation (overrides corpus.path)
    #[arg(long, value_name = "PATH")]
    pub corpus: Option<PathBuf>,

    /// Ground-truth CSV (overrides ground_truth.path)
    #[arg(long, value_name = "PATH")]
    pub ground_truth: Option<PathBuf>,
}
