//! Benchmark tests for kino-subs operations
//!
//! Run with: cargo bench -p kino-subs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use kino_subs::colors;
use kino_subs::parser::{format_time, SubtitleParser, TimestampStyle};
use kino_subs::sync::SyncEngine;

// ============================================================================
// Helpers
// ============================================================================

/// Generate a realistic SRT document with N cues, every fifth one colored
fn generate_srt(cue_count: usize) -> String {
    let palette = ["Gold", "LightSkyBlue", "Tomato", "#00FF7F"];
    let mut srt = String::new();

    for i in 0..cue_count {
        let start = i as f64 * 3.0;
        srt.push_str(&format!("{}\n", i + 1));
        srt.push_str(&format!(
            "{} --> {}\n",
            format_time(start, TimestampStyle::Srt),
            format_time(start + 2.5, TimestampStyle::Srt)
        ));
        if i % 5 == 0 {
            srt.push_str(&format!(
                "<font color=\"{}\">Speaker {}</font>\nsecond line\n\n",
                palette[i % palette.len()],
                i
            ));
        } else {
            srt.push_str(&format!("Plain caption {}\n\n", i));
        }
    }

    srt
}

fn loaded_engine(cue_count: usize) -> SyncEngine {
    let mut engine = SyncEngine::default();
    engine.on_load(SubtitleParser::parse(&generate_srt(cue_count)));
    engine
}

// ============================================================================
// Parser Benchmarks
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("Subtitle Parsing");

    for &count in &[10, 100, 1000] {
        let srt = generate_srt(count);
        group.bench_with_input(BenchmarkId::new("parse", count), &srt, |b, srt| {
            b.iter(|| black_box(SubtitleParser::parse(black_box(srt))));
        });
    }

    group.finish();
}

fn bench_color_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("Color Resolution");

    for name in ["IndianRed", "Black", "#123456", "Unknown"] {
        group.bench_with_input(BenchmarkId::new("resolve", name), &name, |b, name| {
            b.iter(|| black_box(colors::resolve(black_box(name))));
        });
    }

    group.finish();
}

// ============================================================================
// Sync Benchmarks
// ============================================================================

fn bench_steady_playback(c: &mut Criterion) {
    let mut group = c.benchmark_group("Steady Playback");

    for &count in &[100, 1000] {
        group.bench_with_input(BenchmarkId::new("60fps_sweep", count), &count, |b, &count| {
            b.iter(|| {
                let mut engine = loaded_engine(count);
                let frames = (count as f64 * 3.0 * 60.0) as u64;
                for frame in 0..frames {
                    black_box(engine.on_clock_sample(frame as f64 / 60.0));
                }
                engine.stats()
            });
        });
    }

    group.finish();
}

fn bench_seek(c: &mut Criterion) {
    let mut group = c.benchmark_group("Seek Resync");

    for &count in &[100, 1000, 10000] {
        let mut engine = loaded_engine(count);
        let end = count as f64 * 3.0;
        let mut flip = false;

        group.bench_with_input(BenchmarkId::new("jump", count), &count, |b, _| {
            b.iter(|| {
                flip = !flip;
                let target = if flip { end * 0.9 } else { end * 0.1 };
                black_box(engine.on_clock_sample(black_box(target)))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_color_resolve,
    bench_steady_playback,
    bench_seek,
);

criterion_main!(benches);
