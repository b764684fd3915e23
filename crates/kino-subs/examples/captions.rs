//! Caption playback example
//!
//! Parses an SRT document and plays it against a simulated clock,
//! including a seek backwards.
//!
//! Run with: cargo run -p kino-subs --example captions

use kino_subs::{
    format_time, CaptionConfig, CaptionSession, SubtitleParser, TimestampStyle,
};

fn main() {
    println!("Kino Subs - Caption Playback Example");
    println!("====================================\n");

    let srt = r##"1
00:00:00,500 --> 00:00:03,000
Welcome to Purple Squirrel Media!

2
00:00:03,500 --> 00:00:07,000
<font color="MediumPurple">This video demonstrates our</font>
amazing player capabilities.

3
00:00:08,000 --> 00:00:12,000
<font color="#9B30FF">Colors</font> come through as hex.

4
00:00:12,000 --> 00:00:15,000
<font size="4">Tags without a color</font> lose only the opening tag.
"##;

    let report = SubtitleParser::parse_report(srt);
    println!("Found {} cues ({} timestamp issues):\n", report.track.len(), report.issues.len());
    for (i, entry) in report.track.iter().enumerate() {
        println!(
            "  [{}] {} -> {}: {}",
            i,
            format_time(entry.start, TimestampStyle::Srt),
            format_time(entry.end, TimestampStyle::Srt),
            entry.text.replace('\n', " | ")
        );
    }

    println!("\n----------------------------------------\n");
    println!("Playing at 10 ticks per second, seeking back at 10s:\n");

    let mut session = CaptionSession::new(CaptionConfig::default(), |text: &str| {
        if text.is_empty() {
            println!("        (cleared)");
        } else {
            println!("        \"{}\"", text.replace('\n', " | "));
        }
    });
    session.load_track(report.track);

    // 0s..10s, then jump back to 4s and run to 16s
    let timeline = (0..100)
        .map(|tick| tick as f64 / 10.0)
        .chain((40..=160).map(|tick| tick as f64 / 10.0));

    let mut last = 0.0;
    for time in timeline {
        if time < last {
            println!("  -- seek to {} --", format_time(time, TimestampStyle::Short));
        }
        last = time;

        if session.on_clock_sample(time) {
            println!("  at {}", format_time(time, TimestampStyle::Short));
        }
    }

    let stats = session.engine().stats();
    println!(
        "\n{} samples, {} advances, {} resyncs, {} changes",
        stats.samples, stats.advances, stats.resyncs, stats.emissions
    );
}
