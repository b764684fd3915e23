//! Output formatting for CLI

use kino_subs::{format_time, CaptionEntry, SyncStats, TimestampStyle};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

/// One parsed entry, as printed by `parse`
#[derive(Debug, Serialize)]
pub struct EntryRow<'a> {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: &'a str,
}

impl<'a> EntryRow<'a> {
    pub fn new(index: usize, entry: &'a CaptionEntry) -> Self {
        Self {
            index,
            start: entry.start,
            end: entry.end,
            text: &entry.text,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ParseSummary<'a> {
    pub source: String,
    pub track_id: String,
    pub entries: Vec<EntryRow<'a>>,
    pub issues: Vec<String>,
}

/// A change of displayed text during `play`
#[derive(Debug, Clone, Serialize)]
pub struct PlayEvent {
    pub time: f64,
    pub text: String,
    pub seek: bool,
}

#[derive(Debug, Serialize)]
pub struct PlaySummary {
    pub source: String,
    pub events: Vec<PlayEvent>,
    pub stats: SyncStats,
}

#[derive(Debug, Serialize)]
pub struct ColorRow {
    pub name: String,
    pub hex: String,
    pub known: bool,
}

/// Serialize for JSON output
pub fn to_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// Caption text on one line
pub fn one_line(text: &str) -> String {
    if text.is_empty() {
        "(cleared)".to_string()
    } else {
        text.replace('\n', " | ")
    }
}

pub fn print_entry(row: &EntryRow<'_>) {
    println!(
        "  {:>4}  {} --> {}  {}",
        row.index,
        format_time(row.start, TimestampStyle::Srt),
        format_time(row.end, TimestampStyle::Srt),
        one_line(row.text)
    );
}

pub fn print_event(event: &PlayEvent) {
    if event.seek {
        println!("  -- seek to {} --", format_time(event.time, TimestampStyle::Short));
    }
    println!(
        "  [{}] {}",
        format_time(event.time, TimestampStyle::Short),
        one_line(&event.text)
    );
}

pub fn print_stats(stats: &SyncStats) {
    println!("\nPlayback Summary:");
    println!("  Samples: {}", stats.samples);
    println!("  Advances: {}", stats.advances);
    println!("  Resyncs: {}", stats.resyncs);
    println!("  Changes: {}", stats.emissions);
}
