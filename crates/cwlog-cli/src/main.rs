mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

use crate::commands::{completions, filters, Context};
use crate::error::{exit_code_for, report_error};
use cwlog_config as config;
use cwlog_config::AppConfig;
use cwlog_core::TracingSink;
use cwlog_store::{paths, Session, Storage};

#[derive(Debug, Parser)]
#[command(name = "cwlog", version, about = "cwlog filter CLI")]
struct Cli {
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// Show the current filters and what they resolve to
    Show,
    /// List the date range presets
    Presets,
    /// Set the free-text search (empty clears it)
    Search(filters::SearchArgs),
    /// Search by trace identifier and jump to its time window
    Trid(filters::TridArgs),
    /// Parse a trace identifier without changing the filters
    #[command(name = "parse-id")]
    ParseId(filters::TridArgs),
    /// Select a date range preset
    Preset(filters::PresetArgs),
    /// Set the custom range start (YYYY-MM-DDTHH:MM, local time)
    Start(filters::BoundArgs),
    /// Set the custom range end (YYYY-MM-DDTHH:MM, local time)
    End(filters::BoundArgs),
    #[command(name = "toggle-case")]
    ToggleCase,
    #[command(name = "toggle-regex")]
    ToggleRegex,
    /// Restore default filters
    Reset,
    /// Print the query the filters resolve to right now
    Query,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        data_dir,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        Command::Presets => filters::list_presets(json),
        Command::ParseId(args) => filters::parse_id(json, args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }

            let storage = resolve_storage(data_dir, &app_config)?;
            let mut session = Session::open(storage, Arc::new(TracingSink))
                .with_context(|| "open filter storage")?;
            let mut ctx = Context {
                session: &mut session,
                json,
            };

            match command {
                Command::Show => filters::show(&ctx),
                Command::Search(args) => filters::search(&mut ctx, args),
                Command::Trid(args) => filters::trid(&mut ctx, args),
                Command::Preset(args) => filters::preset(&mut ctx, args),
                Command::Start(args) => filters::start(&mut ctx, args),
                Command::End(args) => filters::end(&mut ctx, args),
                Command::ToggleCase => filters::toggle_case(&mut ctx),
                Command::ToggleRegex => filters::toggle_regex(&mut ctx),
                Command::Reset => filters::reset(&mut ctx),
                Command::Query => filters::query(&ctx),
                Command::Completions(_) | Command::Presets | Command::ParseId(_) => {
                    unreachable!("handled before storage initialization")
                }
            }
        }
    }
}

// An explicit --data-dir always persists; otherwise the config decides.
fn resolve_storage(data_dir: Option<PathBuf>, app_config: &AppConfig) -> Result<Storage> {
    if data_dir.is_none() && !app_config.storage.enabled {
        return Ok(Storage::Disabled);
    }
    let dir = paths::resolve_data_dir(data_dir.or_else(|| app_config.storage.dir.clone()))
        .with_context(|| "resolve data directory")?;
    debug!(path = %dir.display(), "data directory resolved");
    Ok(Storage::Dir(dir))
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
