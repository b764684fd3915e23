//! Caption synchronization - maps a playback clock onto a caption track
//!
//! The engine keeps a cursor into the track and is fed one clock sample per
//! host tick. For a clock that moves forward in small steps the cursor only
//! ever moves by one entry, so a sample costs a couple of comparisons. When
//! the clock leaves the window the cursor expects (seek, loop, clock reset)
//! the engine rescans the track once from the start.
//!
//! Each sample runs, in order:
//! 1. enter: start showing the current entry once its start is reached
//! 2. advance: move past the current entry once its end is reached
//! 3. window check: the clock must lie between the previous entry's end and
//!    the current entry's end, otherwise resync and stop

use crate::types::{CaptionConfig, CaptionEntry, CaptionTrack, EndPolicy, SyncState, SyncStats};
use tracing::{debug, info};

/// What a sample decided to put on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Display {
    Entry(usize),
    Clear,
}

/// Playback synchronization engine
#[derive(Debug)]
pub struct SyncEngine {
    track: CaptionTrack,
    state: SyncState,
    /// Text last handed to the sink
    displayed: String,
    enabled: bool,
    end_policy: EndPolicy,
    stats: SyncStats,
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new(&CaptionConfig::default())
    }
}

impl SyncEngine {
    /// Create an engine with no track loaded
    pub fn new(config: &CaptionConfig) -> Self {
        Self {
            track: CaptionTrack::default(),
            state: SyncState::default(),
            displayed: String::new(),
            enabled: config.enabled,
            end_policy: config.end_policy,
            stats: SyncStats::default(),
        }
    }

    /// Replace the track and reset the cursor.
    ///
    /// Returns `Some("")` when text from the previous track was on screen.
    pub fn on_load(&mut self, track: CaptionTrack) -> Option<String> {
        info!(track_id = %track.id, entries = track.len(), "Loaded subtitles");

        self.track = track;
        self.state = SyncState::loaded();
        self.clear_display()
    }

    /// Process one clock sample.
    ///
    /// Returns the text to show when it differs from what is on screen.
    pub fn on_clock_sample(&mut self, time: f64) -> Option<String> {
        if !self.is_active() {
            return None;
        }
        self.stats.samples += 1;

        let last = self.track.len() - 1;

        if self.state.past_end {
            if time > self.window(last).1 {
                return None;
            }
            self.state.past_end = false;
        }

        let mut pending = None;
        let mut i = self.state.current_index;

        // Enter the current entry
        let (start, _) = self.window(i);
        if !self.state.showing_current && time >= start {
            pending = Some(Display::Entry(i));
            self.state.showing_current = true;
        }

        // Advance past it
        let (_, end) = self.window(i);
        if time >= end && i < last {
            i += 1;
            self.state.current_index = i;
            self.stats.advances += 1;

            if time >= self.window(i).0 {
                pending = Some(Display::Entry(i));
                self.state.showing_current = true;
            } else {
                pending = Some(Display::Clear);
                self.state.showing_current = false;
            }
        }

        let outside_window = if i == 0 {
            // Only reachable past the end of a single-entry track
            time > self.window(0).1
        } else {
            let (_, previous_end) = self.window(i - 1);
            let (_, current_end) = self.window(i);
            !(time >= previous_end && time <= current_end)
        };

        if outside_window {
            pending = self.relocate(time);
        }

        self.emit(pending)
    }

    /// Relocate the cursor for `time` with a full scan.
    ///
    /// Hosts call this after a seek they know about; the engine also
    /// detects seeks on its own.
    pub fn resync(&mut self, time: f64) -> Option<String> {
        if !self.is_active() {
            return None;
        }
        let pending = self.relocate(time);
        self.emit(pending)
    }

    /// Enable or disable display. Disabling clears the screen.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<String> {
        if self.enabled == enabled {
            return None;
        }
        self.enabled = enabled;
        debug!(enabled, "Subtitles toggled");

        // Re-enter through the normal path on the next sample
        self.state.showing_current = false;
        self.state.past_end = false;
        if enabled {
            None
        } else {
            self.clear_display()
        }
    }

    pub fn set_end_policy(&mut self, policy: EndPolicy) {
        self.end_policy = policy;
    }

    /// Drop the track. Returns `Some("")` when text was on screen.
    pub fn reset(&mut self) -> Option<String> {
        self.track = CaptionTrack::default();
        self.state = SyncState::default();
        self.clear_display()
    }

    pub fn track(&self) -> &CaptionTrack {
        &self.track
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn end_policy(&self) -> EndPolicy {
        self.end_policy
    }

    /// Text currently on screen
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    /// Entry under the cursor, if it is being shown
    pub fn current_entry(&self) -> Option<&CaptionEntry> {
        if self.state.loaded && self.state.showing_current {
            self.track.get(self.state.current_index)
        } else {
            None
        }
    }

    fn is_active(&self) -> bool {
        self.enabled && self.state.loaded && !self.track.is_empty()
    }

    fn window(&self, index: usize) -> (f64, f64) {
        let entry = &self.track.entries()[index];
        (entry.start, entry.end)
    }

    /// Point the cursor at the first entry that has not ended by `time`
    fn relocate(&mut self, time: f64) -> Option<Display> {
        self.stats.resyncs += 1;
        let from = self.state.current_index;

        match self.track.iter().position(|e| time <= e.end) {
            Some(index) => {
                debug!(from, to = index, time, "Re-syncing subtitle index");
                self.state.current_index = index;
                self.state.showing_current = true;
                self.state.past_end = false;
                Some(Display::Entry(index))
            }
            None => {
                debug!(from, time, policy = %self.end_policy, "Clock is past the last subtitle");
                self.state.current_index = self.track.len() - 1;
                self.state.showing_current = false;
                self.state.past_end = true;
                match self.end_policy {
                    EndPolicy::Clear => Some(Display::Clear),
                    EndPolicy::Hold => None,
                }
            }
        }
    }

    fn emit(&mut self, pending: Option<Display>) -> Option<String> {
        let text = match pending? {
            Display::Entry(index) => self.track.entries()[index].text.as_str(),
            Display::Clear => "",
        };
        if text == self.displayed {
            return None;
        }

        self.displayed = text.to_string();
        self.stats.emissions += 1;
        Some(self.displayed.clone())
    }

    fn clear_display(&mut self) -> Option<String> {
        if self.displayed.is_empty() {
            return None;
        }
        self.displayed.clear();
        self.stats.emissions += 1;
        Some(String::new())
    }
}
