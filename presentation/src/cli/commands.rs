//! CLI command definitions

use arena_domain::Participant;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for session results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Transcript, verdicts and tally
    Full,
    /// Only the verdicts (or the consensus summary)
    Verdict,
    /// JSON output
    Json,
}

impl From<OutputFormat> for arena_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => arena_domain::OutputFormat::Full,
            OutputFormat::Verdict => arena_domain::OutputFormat::Verdict,
            OutputFormat::Json => arena_domain::OutputFormat::Json,
        }
    }
}

fn parse_participant(s: &str) -> Result<Participant, String> {
    s.parse::<Participant>().map_err(|e| e.to_string())
}

/// CLI arguments for llm-arena
#[derive(Parser, Debug)]
#[command(name = "llm-arena")]
#[command(author, version, about = "LLM Arena - Models debate and discuss, a judge panel decides")]
#[command(long_about = r#"
LLM Arena pits large language models from different vendors against each other.

Debate: two models argue opposite sides of a topic over several rounds while a
moderator checks each rebuttal for logical fallacies, bias and misleading
claims. Three judges then pick a winner.

Discussion: models take turns on an open question until they agree or run out
of turns. Without consensus the judges decide whose perspective was strongest.

Configuration files are loaded from (in priority order):
1. ARENA_* environment variables
2. --config <path>     Explicit config file
3. ./arena.toml        Project-level config
4. ~/.config/llm-arena/config.toml   Global config

API keys are read from OPENAI_API_KEY, ANTHROPIC_API_KEY and GOOGLE_API_KEY.

Example:
  llm-arena debate "Remote work is better than office work" -a openai -n gemini
  llm-arena discuss "What is the best first programming language?"
  llm-arena serve --addr 0.0.0.0:5050
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (default: from config, else full)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Append every session event to this JSONL file
    #[arg(long, value_name = "PATH", global = true)]
    pub event_log: Option<PathBuf>,

    /// Also record streamed chunks in the event log
    #[arg(long, global = true, requires = "event_log")]
    pub event_log_chunks: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a structured debate between two models
    Debate {
        /// The resolution to debate
        topic: String,

        /// Model arguing for the resolution
        #[arg(short, long, value_name = "KEY", value_parser = parse_participant)]
        affirmative: Option<Participant>,

        /// Model arguing against the resolution
        #[arg(short, long, value_name = "KEY", value_parser = parse_participant)]
        negative: Option<Participant>,

        /// Rounds, counting the opening round
        #[arg(short, long)]
        rounds: Option<usize>,

        /// Wait for whole responses instead of streaming them
        #[arg(long)]
        no_stream: bool,

        /// Skip moderator checks after each rebuttal
        #[arg(long)]
        no_interventions: bool,
    },

    /// Run an open discussion until consensus or the message cap
    Discuss {
        /// The question to discuss
        topic: String,

        /// Wait for whole responses instead of streaming them
        #[arg(long)]
        no_stream: bool,
    },

    /// Serve the HTTP/SSE API
    Serve {
        /// Listen address (default: from config)
        #[arg(long, value_name = "HOST:PORT")]
        addr: Option<String>,
    },

    /// Show configuration sources and the effective configuration
    Config,
}
