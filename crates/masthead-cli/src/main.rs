use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use masthead_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "masthead")]
#[command(author, version, about = "A header that gets out of the way while you scroll")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this configuration file instead of ~/.config/masthead/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal demo page
    Run,
    /// Replay a scripted event trace and print the resulting mutations
    Replay {
        /// Trace file (.toml or .json)
        file: PathBuf,
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Run this long after the last step so pending timers fire
        #[arg(long)]
        settle_ms: Option<u64>,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("failed to load config")?,
    };

    let tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, tui)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(&config).await,
        Some(Commands::Replay {
            file,
            format,
            settle_ms,
        }) => commands::replay::run(&config, &file, format, settle_ms).await,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config, cli.config.as_deref()),
            ConfigAction::Init { force } => commands::config::init(force),
        },
    }
}

/// Log to stderr, or to the configured log file while the terminal UI runs.
/// Without a log file the UI runs with logging off.
fn init_logging(config: &AppConfig, tui: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if !tui {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
        return Ok(());
    }

    let Some(path) = &config.general.log_file else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}
