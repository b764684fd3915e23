//! Kino Subs - Subtitle Synchronization Library for Kino
//!
//! This crate turns a subtitle file into on-screen captions that follow a
//! playback clock:
//! - SRT-style parsing with `<font color>` markup rewriting
//! - Named color resolution to `#RRGGBB`
//! - Per-tick caption synchronization with seek detection
//! - Subtitle fetching over HTTP or from disk
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Kino Subs                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐          │
//! │  │   Subtitle   │  │    Color     │  │   Subtitle   │          │
//! │  │    Parser    │──│    Table     │  │    Loader    │          │
//! │  └──────┬───────┘  └──────────────┘  └──────┬───────┘          │
//! │         │                                   │                   │
//! │         └─────────────────┬─────────────────┘                   │
//! │                           │                                     │
//! │                    ┌──────┴──────┐                              │
//! │                    │   Caption   │◄──── host clock samples      │
//! │                    │   Session   │                              │
//! │                    └──────┬──────┘                              │
//! │                           │                                     │
//! │  ┌──────────────┐  ┌──────┴──────┐                              │
//! │  │     Sync     │──│   Caption   │                              │
//! │  │    Engine    │  │    Sink     │                              │
//! │  └──────────────┘  └─────────────┘                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use kino_subs::{CaptionConfig, CaptionSession, RecordingSink};
//!
//! let mut session = CaptionSession::new(CaptionConfig::default(), RecordingSink::new());
//! session.load_from_text("00:00:01,000 --> 00:00:02,000\nHello\n");
//!
//! session.on_clock_sample(1.5);
//! assert_eq!(session.sink().current(), "Hello");
//! ```

pub mod error;
pub mod types;
pub mod colors;
pub mod parser;
pub mod sync;
pub mod sink;
pub mod loader;
pub mod session;

pub use error::{Error, Result, TimestampError};
pub use types::*;
pub use parser::{SubtitleParser, ParseReport, TimestampStyle, parse_time, try_parse_time, format_time};
pub use sync::SyncEngine;
pub use sink::{CaptionSink, RecordingSink};
pub use loader::{SubtitleLoader, SubtitleSource, SubtitleFetcher, DefaultFetcher, FetchError, FetchOutcome};
pub use session::CaptionSession;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() {
    tracing::info!(version = VERSION, "Kino Subs initialized");
}
