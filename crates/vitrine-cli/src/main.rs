use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "A scroll-driven cinematic brand showcase for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Load configuration from this file instead of the default path
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Disable mouse capture and the pointer overlay
    #[arg(long)]
    no_mouse: bool,

    /// Skip the boot sequence and render every animation settled
    #[arg(long)]
    reduced_motion: bool,

    /// Animation frame rate ceiling
    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the showcase
    Run,
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default configuration file
    Init,
    /// Print the configuration file path
    Path,
}

fn main() -> Result<()> {
    // Logs go to stderr so the alternate screen stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if cli.reduced_motion {
        config.ui.reduced_motion = true;
    }
    if let Some(fps) = cli.fps {
        config.ui.fps = fps;
    }
    if cli.no_mouse {
        config.overlay.enabled = false;
    }
    let config = Arc::new(config);

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config, !cli.no_mouse),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init => commands::config::init(),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
