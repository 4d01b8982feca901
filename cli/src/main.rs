//! CLI entrypoint for LLM Arena
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use arena_application::{
    ArenaConfig, EventSink, FanoutEventSink, NoEvents, RunDebateInput, RunDiscussionInput,
    SessionError, SessionRunner,
};
use arena_domain::{ConfigIssue, Participant, SessionResult, Severity, Topic, has_errors};
use arena_infrastructure::{ConfigLoader, FileConfig, JsonlEventLogger, build_registry};
use arena_presentation::{
    AppState, Cli, Command, ConsoleFormatter, OutputFormatter, ProgressReporter, ServerTimeouts,
    SimpleProgress, serve, user_message,
};
use clap::Parser;
use colored::Colorize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, config.logging.dir.as_deref());
    info!("Starting LLM Arena");

    let issues = config.validate();
    report_issues(&issues);
    if has_errors(&issues) {
        bail!("Invalid configuration");
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let Cli {
        command,
        output,
        quiet,
        config: config_path,
        event_log,
        event_log_chunks,
        ..
    } = cli;
    let event_log = EventLog {
        path: event_log,
        chunks: event_log_chunks || config.logging.chunks,
    };
    let format = output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    let result = match command {
        Command::Config => return show_config(&config, config_path.as_ref(), &issues),
        Command::Serve { addr } => return run_server(&config, addr).await,
        Command::Debate {
            topic,
            affirmative,
            negative,
            rounds,
            no_stream,
            no_interventions,
        } => {
            let mut arena = config.to_arena_config();
            if no_stream {
                arena = arena.without_streaming();
            }
            if no_interventions {
                let mut debate = arena.debate().clone();
                debate.interventions = false;
                arena = arena.with_debate(debate);
            }

            let (default_affirmative, default_negative) = config
                .debate
                .default_debaters()
                .unwrap_or((Participant::OpenAi, Participant::Gemini));
            let affirmative = affirmative.unwrap_or(default_affirmative);
            let negative = negative.unwrap_or(default_negative);
            if affirmative == negative {
                bail!("Affirmative and negative must be different models");
            }

            let input = RunDebateInput::new(Topic::new(topic)?, affirmative, negative)
                .with_rounds(rounds.unwrap_or(arena.debate().default_rounds));
            let runner = session_runner(&config, &arena, &[affirmative, negative])?;
            let streaming = arena.debate().streaming;

            let reporting = Reporting::new(quiet, streaming, &event_log);
            let token = cancel_on_ctrl_c();
            into_result(runner.run_debate(input, &reporting.sink(), &token).await)?
        }
        Command::Discuss { topic, no_stream } => {
            let mut arena = config.to_arena_config();
            if no_stream {
                arena = arena.without_streaming();
            }

            let input = RunDiscussionInput::new(Topic::new(topic)?);
            let runner = session_runner(&config, &arena, &[])?;
            let streaming = arena.discussion().streaming;

            let reporting = Reporting::new(quiet, streaming, &event_log);
            let token = cancel_on_ctrl_c();
            into_result(runner.run_discussion(input, &reporting.sink(), &token).await)?
        }
    };

    println!("{}", ConsoleFormatter.render(&result, format));
    Ok(())
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set
fn init_logging(verbose: u8, dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let console = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match dir {
        Some(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "llm-arena.log"));
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
            None
        }
    }
}

fn report_issues(issues: &[ConfigIssue]) {
    for issue in issues {
        match issue.severity {
            Severity::Error => eprintln!("{} {}", "error:".red().bold(), issue.message),
            Severity::Warning => eprintln!("{} {}", "warning:".yellow().bold(), issue.message),
        }
    }
}

/// Build the registry and runner; `debaters` are required on top of the configured roles
fn session_runner(
    config: &FileConfig,
    arena: &ArenaConfig,
    debaters: &[Participant],
) -> Result<SessionRunner> {
    let mut required = arena.required_participants();
    for debater in debaters {
        if !required.contains(debater) {
            required.push(*debater);
        }
    }
    let registry = build_registry(&config.providers, &required)?;
    Ok(SessionRunner::new(Arc::new(registry), arena))
}

/// Cancel the returned token on Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let ctrl_c = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling session");
            ctrl_c.cancel();
        }
    });
    token
}

/// `--event-log` target and whether chunks go into it
struct EventLog {
    path: Option<PathBuf>,
    chunks: bool,
}

/// Console progress plus the optional JSONL event log
struct Reporting {
    progress: Box<dyn EventSink>,
    logger: Option<JsonlEventLogger>,
}

impl Reporting {
    fn new(quiet: bool, streaming: bool, event_log: &EventLog) -> Self {
        let progress: Box<dyn EventSink> = if quiet {
            Box::new(NoEvents)
        } else if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new(streaming))
        } else {
            Box::new(SimpleProgress)
        };
        let logger = event_log
            .path
            .as_deref()
            .and_then(JsonlEventLogger::new)
            .map(|logger| logger.with_chunks(event_log.chunks));
        if let Some(logger) = &logger {
            info!("Recording events to {}", logger.path().display());
        }
        Self { progress, logger }
    }

    fn sink(&self) -> FanoutEventSink<'_> {
        let mut delegates: Vec<&dyn EventSink> = vec![self.progress.as_ref()];
        if let Some(logger) = &self.logger {
            delegates.push(logger);
        }
        FanoutEventSink::new(delegates)
    }
}

fn into_result(outcome: Result<SessionResult, SessionError>) -> Result<SessionResult> {
    match outcome {
        Ok(result) => Ok(result),
        Err(e) if e.is_cancelled() => bail!("Session cancelled"),
        Err(e) => bail!("{}", user_message(&e)),
    }
}

async fn run_server(config: &FileConfig, addr: Option<String>) -> Result<()> {
    let arena = config.to_arena_config();
    let registry = build_registry(&config.providers, &arena.required_participants())?;
    info!("Adapters ready: {:?}", registry.participants());

    let state = AppState {
        runner: SessionRunner::new(Arc::new(registry), &arena),
        default_rounds: arena.debate().default_rounds,
        timeouts: ServerTimeouts {
            session: config.server.session_timeout(),
            chunk: config.server.chunk_timeout(),
        },
    };
    let addr = addr.unwrap_or_else(|| config.server.addr.clone());

    tokio::select! {
        served = serve(&addr, state) => served.with_context(|| format!("Server on {} failed", addr))?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }
    Ok(())
}

/// `llm-arena config`: sources, effective values and issues
fn show_config(
    config: &FileConfig,
    config_path: Option<&PathBuf>,
    issues: &[ConfigIssue],
) -> Result<()> {
    println!("{}", "Configuration sources (highest priority first)".bold());
    for line in ConfigLoader::describe_sources(config_path) {
        println!("  {}", line);
    }

    let mut shown = config.clone();
    for participant in Participant::ALL {
        let vendor = match participant {
            Participant::OpenAi => &mut shown.providers.openai,
            Participant::Anthropic => &mut shown.providers.anthropic,
            Participant::Gemini => &mut shown.providers.gemini,
        };
        if vendor.api_key.is_some() {
            vendor.api_key = Some("********".to_string());
        }
    }

    println!("\n{}", "Effective configuration".bold());
    println!("{}", toml::to_string_pretty(&shown)?);

    if issues.is_empty() {
        println!("{}", "No issues found".green());
    }
    Ok(())
}
