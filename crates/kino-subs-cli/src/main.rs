//! Kino Subs CLI - Headless Caption Player
//!
//! Features:
//! - Subtitle inspection (entries, rewritten markup, timestamp issues)
//! - Caption playback against a simulated or wall clock, with seeks
//! - Color name lookup

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

use commands::Seek;
use output::OutputFormat;

/// Kino Subs CLI - Caption toolkit
#[derive(Parser)]
#[command(name = "kino-subs-cli")]
#[command(author = "Purple Squirrel Media")]
#[command(version)]
#[command(about = "Subtitle parsing and caption playback toolkit", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// JSON caption configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a subtitle file and print its entries
    Parse {
        /// URL or path to subtitle file
        source: String,
    },

    /// Play captions against a clock
    Play {
        /// URL or path to subtitle file
        source: String,

        /// Clock start in seconds
        #[arg(long, default_value = "0")]
        from: f64,

        /// Clock end in seconds (defaults to one second past the last entry)
        #[arg(long)]
        to: Option<f64>,

        /// Clock step in seconds
        #[arg(short, long, default_value = "0.1")]
        step: f64,

        /// Jump when the clock reaches FROM, landing on TO (seconds)
        #[arg(long, value_name = "FROM:TO", value_parser = commands::parse_seek)]
        seek: Vec<Seek>,

        /// Pace the clock with the wall clock
        #[arg(long)]
        realtime: bool,
    },

    /// Resolve color names to hex
    Color {
        /// Color names or hex literals
        names: Vec<String>,

        /// List every known color
        #[arg(short, long)]
        list: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_writer(std::io::stderr)
        .init();

    kino_subs::init();

    let format = OutputFormat::from(cli.format.as_str());
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse { source } => {
            commands::parse(&source, &config, format).await?;
        }
        Commands::Play { source, from, to, step, seek, realtime } => {
            let options = commands::PlayOptions { from, to, step, seeks: seek, realtime };
            commands::play(&source, config, options, format).await?;
        }
        Commands::Color { names, list } => {
            commands::color(&names, list, format)?;
        }
    }

    Ok(())
}
