//! Rendering sinks - where displayed caption text goes

/// Receives the caption text to display.
///
/// An empty string means "show nothing".
pub trait CaptionSink {
    fn set_text(&mut self, text: &str);
}

impl<F: FnMut(&str)> CaptionSink for F {
    fn set_text(&mut self, text: &str) {
        self(text)
    }
}

/// Keeps only the text currently on screen
impl CaptionSink for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// Records every text the sink was given, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    history: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Text currently on screen
    pub fn current(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl CaptionSink for RecordingSink {
    fn set_text(&mut self, text: &str) {
        self.history.push(text.to_string());
    }
}
