//! Subtitle parsing - SRT-style timed text with inline color markup
//!
//! The accepted input is deliberately loose:
//! - any line containing `-->` starts a new caption block
//! - timestamps may use `,` or `.` before the fraction, with 2 or 3 clock units
//! - optional SRT cue numbers and blank separator lines
//! - one `<font color="...">...</font>` span per block, rewritten to the
//!   renderer's `<#RRGGBB>...</color>` form
//!
//! Parsing never fails. A timestamp that cannot be read is reported and
//! treated as `0.0`.
//!
//! # Example
//!
//! ```rust
//! use kino_subs::parser::SubtitleParser;
//!
//! let srt = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:02,000 --> 00:00:03,500\n<font color=\"Red\">World</font>\n";
//!
//! let track = SubtitleParser::parse(srt);
//! assert_eq!(track.len(), 2);
//! assert_eq!(track.entries()[1].text, "<#FF0000>World</color>");
//! ```

use crate::colors;
use crate::error::TimestampError;
use crate::types::{CaptionEntry, CaptionTrack};
use tracing::{debug, warn};

/// Separates the start and end timestamps of a block
pub const TIMING_DELIMITER: &str = "-->";

const FONT_OPEN: &str = "<font";
const FONT_CLOSE: &str = "</font>";
const COLOR_ATTR: &str = "color=\"";
const COLOR_CLOSE: &str = "</color>";

/// Timestamp rendering styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampStyle {
    /// `HH:MM:SS,mmm`
    Srt,
    /// `HH:MM:SS.mmm`
    Vtt,
    /// `MM:SS.mmm`
    Short,
}

/// Parsed track plus every timestamp problem found along the way
#[derive(Debug, Clone)]
pub struct ParseReport {
    pub track: CaptionTrack,
    pub issues: Vec<TimestampError>,
}

/// Subtitle text parser
pub struct SubtitleParser;

impl SubtitleParser {
    /// Parse subtitle text into a caption track
    pub fn parse(input: &str) -> CaptionTrack {
        Self::parse_report(input).track
    }

    /// Parse subtitle text, keeping the timestamp issues
    pub fn parse_report(input: &str) -> ParseReport {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
        let lines: Vec<&str> = normalized.split('\n').collect();

        let mut entries = Vec::new();
        let mut issues = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            if !line.contains(TIMING_DELIMITER) {
                continue;
            }

            let (start, end) = Self::parse_timing_line(line, &mut issues);
            if start > end {
                debug!(start, end, line = i + 1, "Caption ends before it starts");
            }

            let text = rewrite_markup(&Self::collect_text(&lines[i + 1..]));
            entries.push(CaptionEntry::new(start, end, text));
        }

        let track = CaptionTrack::new(entries);
        debug!(
            track_id = %track.id,
            entries = track.len(),
            issues = issues.len(),
            "Parsed subtitle text"
        );

        ParseReport { track, issues }
    }

    /// Split a timing line into start and end seconds.
    ///
    /// Cue settings after the end timestamp are ignored.
    fn parse_timing_line(line: &str, issues: &mut Vec<TimestampError>) -> (f64, f64) {
        let (start, rest) = line.split_once(TIMING_DELIMITER).unwrap_or((line, ""));
        let end = rest.split_whitespace().next().unwrap_or("");

        (
            lossy_time(start, issues),
            lossy_time(end, issues),
        )
    }

    /// Gather the text lines of one block.
    ///
    /// Stops at the next timing line. Whitespace-only lines count as blank.
    /// A cue number sitting directly above that line belongs to the next
    /// block and is dropped.
    fn collect_text(rest: &[&str]) -> String {
        let mut collected: Vec<(usize, &str)> = Vec::new();

        for (j, line) in rest.iter().enumerate() {
            if line.contains(TIMING_DELIMITER) {
                if let Some(&(last, text)) = collected.last() {
                    if last + 1 == j && is_cue_number(text) {
                        collected.pop();
                    }
                }
                break;
            }
            if !line.trim().is_empty() {
                collected.push((j, *line));
            }
        }

        collected
            .iter()
            .map(|(_, line)| *line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parse a timestamp, reporting problems and falling back to `0.0`
pub fn parse_time(input: &str) -> f64 {
    let mut issues = Vec::new();
    lossy_time(input, &mut issues)
}

fn lossy_time(input: &str, issues: &mut Vec<TimestampError>) -> f64 {
    match try_parse_time(input) {
        Ok(seconds) => seconds,
        Err(e) => {
            warn!(error = %e, "Malformed timestamp, using 0");
            issues.push(e);
            0.0
        }
    }
}

/// Parse `[HH:]MM:SS[.,]fff` into seconds
pub fn try_parse_time(input: &str) -> Result<f64, TimestampError> {
    let trimmed = input.trim();
    let normalized = trimmed.replace(',', ".");
    let units: Vec<&str> = normalized.split(':').collect();

    let unit = |s: &str| -> Result<f64, TimestampError> {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| TimestampError::InvalidUnit {
                input: trimmed.to_string(),
                unit: s.to_string(),
            })
    };

    match units.len() {
        2 => Ok(unit(units[0])? * 60.0 + unit(units[1])?),
        3 => Ok(unit(units[0])? * 3600.0 + unit(units[1])? * 60.0 + unit(units[2])?),
        found => Err(TimestampError::UnitCount {
            input: trimmed.to_string(),
            found,
        }),
    }
}

/// Render seconds as a timestamp, rounded to the millisecond
pub fn format_time(seconds: f64, style: TimestampStyle) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;

    match style {
        TimestampStyle::Srt => format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis),
        TimestampStyle::Vtt => format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis),
        TimestampStyle::Short => {
            format!("{:02}:{:02}.{:03}", total_ms / 60_000, secs, millis)
        }
    }
}

/// Rewrite `<font color="...">` markup into the renderer's color span.
///
/// With a color attribute in the opening tag and a closing `</font>`, the
/// opening tag becomes `<#RRGGBB>` and every `</font>` becomes `</color>`.
/// Otherwise only the opening tag is removed.
pub fn rewrite_markup(text: &str) -> String {
    let Some(tag_start) = text.find(FONT_OPEN) else {
        return text.to_string();
    };
    let Some(tag_end) = text[tag_start..].find('>').map(|p| tag_start + p + 1) else {
        return text.to_string();
    };

    let opening_tag = &text[tag_start..tag_end];

    if text.contains(FONT_CLOSE) {
        if let Some(color) = color_attribute(opening_tag) {
            let hex = colors::resolve(color);
            debug!(color, hex = %hex, "Rewrote font color markup");

            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..tag_start]);
            out.push('<');
            out.push_str(&hex);
            out.push('>');
            out.push_str(&text[tag_end..]);
            return out.replace(FONT_CLOSE, COLOR_CLOSE);
        }
    }

    debug!(tag = opening_tag, "Stripped font tag without usable color");
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..tag_start]);
    out.push_str(&text[tag_end..]);
    out
}

/// Value of `color="..."` inside a tag
fn color_attribute(tag: &str) -> Option<&str> {
    let value_start = tag.find(COLOR_ATTR)? + COLOR_ATTR.len();
    let value_len = tag[value_start..].find('"')?;
    Some(&tag[value_start..value_start + value_len])
}

fn is_cue_number(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_parse_basic() {
        let input = "00:00:01,000 --> 00:00:02,000\nHello\n\n00:00:02,000 --> 00:00:03,500\n<font color=\"Red\">World</font>\n";

        let track = SubtitleParser::parse(input);
        assert_eq!(track.len(), 2);
        assert_eq!(track.entries()[0], CaptionEntry::new(1.0, 2.0, "Hello"));
        assert_eq!(
            track.entries()[1],
            CaptionEntry::new(2.0, 3.5, "<#FF0000>World</color>")
        );
    }

    #[test]
    fn test_parse_srt_cue_numbers() {
        let srt = "1\r\n00:00:00,000 --> 00:00:04,000\r\nHello, world!\r\n\r\n2\r\n00:00:04,000 --> 00:00:08,000\r\nThis is a subtitle.\r\nSecond line\r\n";

        let track = SubtitleParser::parse(srt);
        assert_eq!(track.len(), 2);
        assert_eq!(track.entries()[0].text, "Hello, world!");
        assert_eq!(track.entries()[1].text, "This is a subtitle.\nSecond line");
        assert_eq!(track.entries()[1].end, 8.0);
    }

    #[test]
    fn test_numeric_caption_text_is_kept() {
        // A number is only a cue id when it sits right above a timing line
        let input = "00:00:01.000 --> 00:00:02.000\n42\n\n00:00:03.000 --> 00:00:04.000\n7\n";

        let track = SubtitleParser::parse(input);
        assert_eq!(track.entries()[0].text, "42");
        assert_eq!(track.entries()[1].text, "7");
    }

    #[test]
    fn test_parse_vtt_settings_ignored() {
        let input = "WEBVTT\n\n00:01.000 --> 00:04.500 align:center position:50%\nCentered\n";

        let report = SubtitleParser::parse_report(input);
        assert!(report.issues.is_empty());
        assert_eq!(report.track.entries()[0].start, 1.0);
        assert_eq!(report.track.entries()[0].end, 4.5);
        assert_eq!(report.track.entries()[0].text, "Centered");
    }

    #[test]
    fn test_malformed_timestamp_is_zero() {
        let input = "5 --> 00:00:02,000\nFirst\n\n00:00:03,000 --> 1:2:3:4\nSecond\n";

        let report = SubtitleParser::parse_report(input);
        assert_eq!(report.track.len(), 2);
        assert_eq!(report.track.entries()[0].start, 0.0);
        assert_eq!(report.track.entries()[0].end, 2.0);
        assert_eq!(report.track.entries()[1].end, 0.0);
        assert_eq!(
            report.issues,
            vec![
                TimestampError::UnitCount { input: "5".into(), found: 1 },
                TimestampError::UnitCount { input: "1:2:3:4".into(), found: 4 },
            ]
        );
    }

    #[test]
    fn test_empty_block() {
        let track = SubtitleParser::parse("00:00:01,000 --> 00:00:02,000\n");
        assert_eq!(track.len(), 1);
        assert_eq!(track.entries()[0].text, "");

        assert!(SubtitleParser::parse("").is_empty());
        assert!(SubtitleParser::parse("no timing here\n").is_empty());
    }

    #[test]
    fn test_leading_bom_is_ignored() {
        let report = SubtitleParser::parse_report("\u{FEFF}1\r\n00:00:01,000 --> 00:00:02,000\r\nHello\r\n");
        assert!(report.issues.is_empty());
        assert_eq!(report.track.entries(), [CaptionEntry::new(1.0, 2.0, "Hello")]);
    }

    #[test]
    fn test_whitespace_only_lines_are_blank() {
        let input = "00:00:01,000 --> 00:00:02,000\nfirst\n   \t\nsecond\n \n00:00:03,000 --> 00:00:04,000\nthird\n";
        let track = SubtitleParser::parse(input);
        assert_eq!(track.entries()[0].text, "first\nsecond");
        assert_eq!(track.entries()[1].text, "third");
    }

    #[test]
    fn test_timestamp_parsing() {
        assert_close(try_parse_time("00:00:05.500").unwrap(), 5.5);
        assert_close(try_parse_time("01:30:00,000").unwrap(), 5400.0);
        assert_close(try_parse_time("05:30.000").unwrap(), 330.0);
        assert_close(try_parse_time(" 00:00:01,250 ").unwrap(), 1.25);
        assert!(matches!(
            try_parse_time("aa:00:01"),
            Err(TimestampError::InvalidUnit { .. })
        ));
        assert_eq!(parse_time("garbage"), 0.0);
    }

    #[test]
    fn test_timestamp_round_trip() {
        for &t in &[0.0, 1.5, 59.999, 61.25, 3599.5, 3723.456, 86399.001] {
            for style in [TimestampStyle::Srt, TimestampStyle::Vtt, TimestampStyle::Short] {
                let formatted = format_time(t, style);
                assert_close(parse_time(&formatted), t);
            }
        }
        assert_eq!(format_time(3723.456, TimestampStyle::Srt), "01:02:03,456");
        assert_eq!(format_time(3723.456, TimestampStyle::Vtt), "01:02:03.456");
        assert_eq!(format_time(83.5, TimestampStyle::Short), "01:23.500");
    }

    #[test]
    fn test_rewrite_named_color() {
        assert_eq!(
            rewrite_markup("<font color=\"Gold\">Shiny</font> text"),
            "<#FFD700>Shiny</color> text"
        );
        assert_eq!(
            rewrite_markup("He said <font face=\"Arial\" color=\"Teal\">hi</font>"),
            "He said <#008080>hi</color>"
        );
    }

    #[test]
    fn test_rewrite_hex_and_unknown() {
        assert_eq!(
            rewrite_markup("<font color=\"#00FF00\">Go</font>"),
            "<#00FF00>Go</color>"
        );
        assert_eq!(
            rewrite_markup("<font color=\"blurple\">?</font>"),
            "<#FFFFFF>?</color>"
        );
    }

    #[test]
    fn test_rewrite_bare_tag_strips_opening_only() {
        assert_eq!(rewrite_markup("<font size=\"3\">Big</font>"), "Big</font>");
        assert_eq!(rewrite_markup("<font color=\"Red\">Open"), "Open");
        assert_eq!(rewrite_markup("<font color=\"Red"), "<font color=\"Red");
        assert_eq!(rewrite_markup("plain"), "plain");
    }

    #[test]
    fn test_multiline_markup() {
        let input = "00:00:01,000 --> 00:00:02,000\n<font color=\"Blue\">Line one\nline two</font>\n";
        let track = SubtitleParser::parse(input);
        assert_eq!(track.entries()[0].text, "<#0000FF>Line one\nline two</color>");
    }
}
