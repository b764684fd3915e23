//! CLI command implementations

use crate::output::{self, ColorRow, EntryRow, OutputFormat, ParseSummary, PlayEvent, PlaySummary};
use kino_subs::{
    colors, CaptionConfig, CaptionSession, SubtitleLoader, SubtitleParser, SubtitleSource,
};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// A jump in the simulated clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seek {
    /// Clock value that triggers the jump
    pub at: f64,
    /// Clock value after the jump
    pub to: f64,
}

/// Parse `FROM:TO` in seconds
pub fn parse_seek(s: &str) -> Result<Seek, String> {
    let (at, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got '{}'", s))?;
    let at: f64 = at.trim().parse().map_err(|_| format!("invalid seek start '{}'", at))?;
    let to: f64 = to.trim().parse().map_err(|_| format!("invalid seek target '{}'", to))?;
    Ok(Seek { at, to })
}

/// Smallest accepted clock step, in seconds
pub const MIN_STEP: f64 = 0.001;

/// Check `--step` and turn it into a tick period
pub fn tick_period(step: f64) -> anyhow::Result<Duration> {
    if !step.is_finite() || step < MIN_STEP {
        anyhow::bail!("--step must be at least {} seconds, got {}", MIN_STEP, step);
    }
    Ok(Duration::from_secs_f64(step))
}

/// Playback options for `play`
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub from: f64,
    pub to: Option<f64>,
    pub step: f64,
    pub seeks: Vec<Seek>,
    pub realtime: bool,
}

/// Read `--config`, or the defaults
pub fn load_config(path: Option<&Path>) -> anyhow::Result<CaptionConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let config = CaptionConfig::from_json_str(&json)?;
            debug!(path = %path.display(), "Loaded caption config");
            Ok(config)
        }
        None => Ok(CaptionConfig::default()),
    }
}

async fn fetch_text(source: &SubtitleSource, config: &CaptionConfig) -> anyhow::Result<String> {
    let loader = SubtitleLoader::new(config)?;
    let outcome = loader.fetch(source).await;
    Ok(outcome.result.map_err(kino_subs::Error::from)?)
}

/// Parse a subtitle file and print its entries
pub async fn parse(source: &str, config: &CaptionConfig, format: OutputFormat) -> anyhow::Result<()> {
    let source: SubtitleSource = source.parse()?;
    let text = fetch_text(&source, config).await?;
    let report = SubtitleParser::parse_report(&text);

    let summary = ParseSummary {
        source: source.to_string(),
        track_id: report.track.id.to_string(),
        entries: report
            .track
            .iter()
            .enumerate()
            .map(|(i, entry)| EntryRow::new(i, entry))
            .collect(),
        issues: report.issues.iter().map(|e| e.to_string()).collect(),
    };

    match format {
        OutputFormat::Json => println!("{}", output::to_json(&summary)),
        OutputFormat::Text => {
            println!("Subtitles: {}", summary.source);
            println!("  Entries: {}", summary.entries.len());
            println!("  Duration: {:.3}s", report.track.duration());
            println!("  Issues: {}", summary.issues.len());

            println!("\nEntries:");
            for row in &summary.entries {
                output::print_entry(row);
            }

            if !summary.issues.is_empty() {
                println!("\nIssues:");
                for issue in &summary.issues {
                    println!("  - {}", issue);
                }
            }
        }
    }

    Ok(())
}

/// Play captions against a simulated or paced clock
pub async fn play(
    source: &str,
    config: CaptionConfig,
    options: PlayOptions,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let period = tick_period(options.step)?;

    let source: SubtitleSource = source.parse()?;
    let loader = SubtitleLoader::new(&config)?;
    let mut session = CaptionSession::new(config, String::new());

    // Fetch in the background and hand the outcome over, like a player would
    let (tx, mut rx) = mpsc::channel(1);
    let handle = loader.spawn(source.clone(), tx);
    let outcome = rx
        .recv()
        .await
        .ok_or_else(|| anyhow::anyhow!("fetch task ended without a result"))?;
    handle.await?;
    session.apply_outcome(outcome)?;

    let until = options
        .to
        .unwrap_or_else(|| session.engine().track().duration() + 1.0);
    info!(from = options.from, until, step = options.step, "Playing captions");

    let mut pending: Vec<Seek> = options.seeks.clone();
    pending.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut pending = pending.into_iter().peekable();

    let mut ticker = options
        .realtime
        .then(|| tokio::time::interval(period));

    let mut events = Vec::new();
    let mut base = options.from;
    let mut time = base;
    let mut ticks = 0u64;

    while time <= until {
        if let Some(ticker) = ticker.as_mut() {
            ticker.tick().await;
        }

        let mut seek = false;
        if let Some(jump) = pending.next_if(|s| time >= s.at) {
            debug!(at = jump.at, to = jump.to, "Seeking");
            time = jump.to;
            seek = true;
        }

        let changed = if seek {
            session.resync(time)
        } else {
            session.on_clock_sample(time)
        };

        if changed {
            let event = PlayEvent {
                time,
                text: session.sink().clone(),
                seek,
            };
            if format == OutputFormat::Text {
                output::print_event(&event);
            }
            events.push(event);
        }

        if seek {
            // Continue from the landing point
            base = time;
            ticks = 0;
        }
        ticks += 1;
        time = base + ticks as f64 * options.step;
    }

    let stats = session.engine().stats();
    match format {
        OutputFormat::Json => {
            let summary = PlaySummary {
                source: source.to_string(),
                events,
                stats,
            };
            println!("{}", output::to_json(&summary));
        }
        OutputFormat::Text => output::print_stats(&stats),
    }

    Ok(())
}

/// Resolve color names
pub fn color(names: &[String], list: bool, format: OutputFormat) -> anyhow::Result<()> {
    let rows: Vec<ColorRow> = if list {
        colors::names()
            .map(|name| ColorRow {
                name: name.to_string(),
                hex: colors::resolve(name),
                known: true,
            })
            .collect()
    } else {
        if names.is_empty() {
            anyhow::bail!("no color names given (use --list to show all)");
        }
        names
            .iter()
            .map(|name| ColorRow {
                name: name.clone(),
                hex: colors::resolve(name),
                known: colors::is_hex_literal(name) || colors::lookup(name).is_some(),
            })
            .collect()
    };

    match format {
        OutputFormat::Json => println!("{}", output::to_json(&rows)),
        OutputFormat::Text => {
            for row in &rows {
                let note = if row.known { "" } else { " (unknown, fallback)" };
                println!("  {:24} {}{}", row.name, row.hex, note);
            }
        }
    }

    Ok(())
}
