//! Core types for Kino Subs

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one parsed caption track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub Uuid);

impl TrackId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Caption Types
// =============================================================================

/// One timed subtitle block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Caption text (may contain one `<#RRGGBB>...</color>` span)
    pub text: String,
}

impl CaptionEntry {
    /// Create a new caption entry
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Duration of this entry in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Check if entry should be displayed at given time
    pub fn is_active_at(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }
}

/// Ordered caption entries for one loaded subtitle source.
///
/// Order is file order. Well-formed input is ascending by `start`; this is
/// assumed, not enforced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Identifier assigned when the track was built
    pub id: TrackId,
    entries: Vec<CaptionEntry>,
}

impl CaptionTrack {
    pub fn new(entries: Vec<CaptionEntry>) -> Self {
        Self {
            id: TrackId::new(),
            entries,
        }
    }

    pub fn entries(&self) -> &[CaptionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CaptionEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaptionEntry> {
        self.entries.iter()
    }

    /// End time of the final entry, 0 for an empty track
    pub fn duration(&self) -> f64 {
        self.entries.last().map(|e| e.end).unwrap_or(0.0)
    }

    /// Linear lookup of the entry active at `time`.
    ///
    /// For tools; the sync engine never calls this on the per-tick path.
    pub fn entry_at(&self, time: f64) -> Option<(usize, &CaptionEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, e)| e.is_active_at(time))
    }
}

impl<'a> IntoIterator for &'a CaptionTrack {
    type Item = &'a CaptionEntry;
    type IntoIter = std::slice::Iter<'a, CaptionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// =============================================================================
// Sync Types
// =============================================================================

/// Cursor state owned by the sync engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncState {
    /// Index into the caption track
    pub current_index: usize,
    /// Whether the entry at `current_index` is on screen
    pub showing_current: bool,
    /// Whether a track has been loaded
    pub loaded: bool,
    /// Last resync found the clock beyond every entry
    pub past_end: bool,
}

impl SyncState {
    /// State installed by every load
    pub fn loaded() -> Self {
        Self {
            current_index: 0,
            showing_current: false,
            loaded: true,
            past_end: false,
        }
    }
}

/// Counters kept by the sync engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    /// Clock samples processed
    pub samples: u64,
    /// Cursor advances to the next entry
    pub advances: u64,
    /// Full linear rescans
    pub resyncs: u64,
    /// Samples that changed the displayed text
    pub emissions: u64,
}

/// What to display once the clock has passed every entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndPolicy {
    /// Clear the displayed text
    #[default]
    Clear,
    /// Leave the last emission standing
    Hold,
}

impl std::fmt::Display for EndPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndPolicy::Clear => write!(f, "clear"),
            EndPolicy::Hold => write!(f, "hold"),
        }
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Caption configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    /// Show captions at all
    pub enabled: bool,
    /// Behavior once the clock passes the final entry
    pub end_policy: EndPolicy,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Retry attempts for failed fetches
    pub retry_attempts: u32,
    /// Retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            end_policy: EndPolicy::Clear,
            request_timeout_ms: 10000,
            retry_attempts: 3,
            retry_delay_ms: 1000,
        }
    }
}

impl CaptionConfig {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CaptionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_ms == 0 {
            return Err(Error::InvalidConfig(
                "request_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
