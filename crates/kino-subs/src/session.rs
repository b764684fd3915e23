//! Caption Session - binds the sync engine to a rendering sink
//!
//! Coordinates:
//! - Loading from text, from completed fetches, or from a source
//! - Feeding host clock samples to the sync engine
//! - Forwarding text changes to the sink
//! - Reporting fetch failures without disturbing the loaded track

use crate::{
    error::TimestampError,
    loader::{FetchError, FetchOutcome, SubtitleLoader, SubtitleSource},
    parser::SubtitleParser,
    sink::CaptionSink,
    sync::SyncEngine,
    types::{CaptionConfig, CaptionTrack},
    Result,
};
use tracing::{error, info, instrument};

/// Caption display session for one player
pub struct CaptionSession<S: CaptionSink> {
    /// Session configuration
    config: CaptionConfig,
    /// Track cursor and timing
    engine: SyncEngine,
    /// Rendering surface
    sink: S,
    /// Most recent fetch failure
    last_failure: Option<FetchError>,
}

impl<S: CaptionSink> CaptionSession<S> {
    /// Create a new caption session
    pub fn new(config: CaptionConfig, sink: S) -> Self {
        Self {
            engine: SyncEngine::new(&config),
            config,
            sink,
            last_failure: None,
        }
    }

    /// Parse and load subtitle text. Returns the timestamp issues found.
    #[instrument(skip_all, fields(bytes = text.len()))]
    pub fn load_from_text(&mut self, text: &str) -> Vec<TimestampError> {
        let report = SubtitleParser::parse_report(text);
        self.load_track(report.track);
        report.issues
    }

    /// Load an already parsed track
    pub fn load_track(&mut self, track: CaptionTrack) {
        if let Some(text) = self.engine.on_load(track) {
            self.sink.set_text(&text);
        }
    }

    /// Fetch collaborator succeeded
    pub fn on_fetch_success(&mut self, text: &str) -> Vec<TimestampError> {
        info!("Subtitles downloaded successfully");
        self.load_from_text(text)
    }

    /// Fetch collaborator failed; the loaded track is left as is
    pub fn on_fetch_failure(&mut self, code: i32, message: &str) {
        error!(code, error = message, "Subtitles download failed");
        self.last_failure = Some(FetchError::new(code, message));
    }

    /// Apply a completed fetch
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> Result<()> {
        match outcome.result {
            Ok(text) => {
                self.on_fetch_success(&text);
                Ok(())
            }
            Err(e) => {
                self.on_fetch_failure(e.code, &e.message);
                Err(e.into())
            }
        }
    }

    /// Fetch a source and load it
    #[instrument(skip(self, loader))]
    pub async fn load_from_source(
        &mut self,
        loader: &SubtitleLoader,
        source: &SubtitleSource,
    ) -> Result<()> {
        info!(source = %source, "Downloading subtitles");
        let outcome = loader.fetch(source).await;
        self.apply_outcome(outcome)
    }

    /// Host tick. Returns true when the displayed text changed.
    pub fn on_clock_sample(&mut self, time: f64) -> bool {
        self.forward(|engine| engine.on_clock_sample(time))
    }

    /// Host-reported seek
    pub fn resync(&mut self, time: f64) -> bool {
        self.forward(|engine| engine.resync(time))
    }

    /// Subtitle toggle
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        self.forward(|engine| engine.set_enabled(enabled));
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &CaptionConfig {
        &self.config
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn last_failure(&self) -> Option<&FetchError> {
        self.last_failure.as_ref()
    }

    fn forward(&mut self, step: impl FnOnce(&mut SyncEngine) -> Option<String>) -> bool {
        match step(&mut self.engine) {
            Some(text) => {
                self.sink.set_text(&text);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::SubtitleFetcher;
    use crate::sink::RecordingSink;
    use async_trait::async_trait;
    use std::sync::Arc;

    const TWO_CUES: &str = "00:00:01,000 --> 00:00:02,000\nHello\n\n00:00:02,000 --> 00:00:03,500\n<font color=\"Red\">World</font>\n";

    struct StaticFetcher(std::result::Result<String, FetchError>);

    #[async_trait]
    impl SubtitleFetcher for StaticFetcher {
        async fn fetch(&self, _source: &SubtitleSource) -> std::result::Result<String, FetchError> {
            self.0.clone()
        }
    }

    fn session() -> CaptionSession<RecordingSink> {
        CaptionSession::new(CaptionConfig::default(), RecordingSink::new())
    }

    #[test]
    fn test_session_drives_sink() {
        let mut session = session();
        assert!(session.load_from_text(TWO_CUES).is_empty());

        assert!(session.on_clock_sample(1.5));
        assert!(!session.on_clock_sample(1.6));
        assert!(session.on_clock_sample(2.5));
        assert!(session.on_clock_sample(4.0));

        assert_eq!(
            session.sink().history(),
            ["Hello", "<#FF0000>World</color>", ""]
        );
    }

    #[test]
    fn test_fetch_failure_keeps_track() {
        let mut session = session();
        session.on_fetch_success(TWO_CUES);
        session.on_clock_sample(1.5);

        session.on_fetch_failure(404, "Not Found");
        assert_eq!(session.last_failure(), Some(&FetchError::new(404, "Not Found")));
        assert_eq!(session.engine().track().len(), 2);
        assert_eq!(session.sink().current(), "Hello");
    }

    #[test]
    fn test_last_writer_wins() {
        let mut session = session();
        let first = FetchOutcome {
            source: "a.srt".parse().unwrap(),
            result: Ok("00:00:00,000 --> 00:00:10,000\nfirst\n".to_string()),
        };
        let second = FetchOutcome {
            source: "b.srt".parse().unwrap(),
            result: Ok("00:00:00,000 --> 00:00:10,000\nsecond\n".to_string()),
        };

        session.apply_outcome(first).unwrap();
        session.apply_outcome(second).unwrap();
        session.on_clock_sample(1.0);
        assert_eq!(session.sink().current(), "second");
    }

    #[test]
    fn test_toggle() {
        let mut session = session();
        session.load_from_text(TWO_CUES);
        session.on_clock_sample(1.5);

        session.set_enabled(false);
        assert!(!session.is_enabled());
        assert_eq!(session.sink().current(), "");
        assert!(!session.on_clock_sample(2.5));

        session.set_enabled(true);
        assert!(session.on_clock_sample(2.5));
        assert_eq!(session.sink().current(), "<#FF0000>World</color>");
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let config = CaptionConfig::default();
        let source: SubtitleSource = "https://example.com/subs.srt".parse().unwrap();

        let ok = SubtitleLoader::with_fetcher(Arc::new(StaticFetcher(Ok(TWO_CUES.into()))), &config);
        let mut session = session();
        session.load_from_source(&ok, &source).await.unwrap();
        assert_eq!(session.engine().track().len(), 2);

        let failing = SubtitleLoader::with_fetcher(
            Arc::new(StaticFetcher(Err(FetchError::new(403, "Forbidden")))),
            &config,
        );
        let err = session.load_from_source(&failing, &source).await.unwrap_err();
        assert_eq!(err.error_code(), "FETCH");
        assert_eq!(session.engine().track().len(), 2);
    }
}
