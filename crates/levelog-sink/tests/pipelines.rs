//! Integration tests for destinations and pipelines.
//!
//! These tests exercise the public surface the logger builds on: file
//! destinations, shared destinations across pipelines, and concurrent
//! writers.

use std::sync::Arc;
use std::thread;

use levelog_sink::{Destination, Flags, Pipeline, SharedBuffer, Source};
use time::macros::datetime;

// ============================================================================
// File Destination Tests
// ============================================================================

/// Verifies a file destination appends rather than truncating.
#[test]
fn append_file_preserves_existing_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("service.log");
    std::fs::write(&path, "earlier\n").expect("seed file");

    let destination = Destination::append_file(&path).expect("open log file");
    let pipeline = Pipeline::new(vec![destination], "[ERROR]", Flags::NONE);
    pipeline.output(Source::caller(), format_args!("later"));

    let contents = std::fs::read_to_string(&path).expect("read log file");
    assert_eq!(contents, "earlier\n[ERROR]later\n");
}

/// Verifies opening a file under a missing directory reports the I/O error.
#[test]
fn append_file_reports_missing_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing").join("service.log");

    assert!(Destination::append_file(path).is_err());
}

// ============================================================================
// Header Layout Tests
// ============================================================================

/// Verifies the full default header with an explicit timestamp.
#[test]
fn default_flags_render_date_time_and_location() {
    let buffer = SharedBuffer::new();
    let pipeline = Pipeline::new(
        vec![Destination::new(buffer.clone())],
        "[CRITICAL]",
        Flags::DEFAULT,
    );
    let now = datetime!(2024-02-29 23:59:58 +1);
    let source = Source::new("/srv/app/src/main.rs", 17);

    pipeline.output_at(now, source, format_args!("test"));

    assert_eq!(
        buffer.contents_lossy(),
        "[CRITICAL]2024/02/29 23:59:58 /srv/app/src/main.rs:17: test\n"
    );
}

// ============================================================================
// Sharing and Concurrency Tests
// ============================================================================

/// Verifies two pipelines sharing a destination write into the same buffer.
#[test]
fn pipelines_share_a_destination() {
    let buffer = SharedBuffer::new();
    let shared = Destination::new(buffer.clone());
    let error = Pipeline::new(vec![shared.clone()], "[ERROR]", Flags::NONE);
    let critical = Pipeline::new(vec![shared], "[CRITICAL]", Flags::NONE);

    error.output(Source::caller(), format_args!("one"));
    critical.output(Source::caller(), format_args!("two"));

    assert_eq!(buffer.contents_lossy(), "[ERROR]one\n[CRITICAL]two\n");
}

/// Verifies concurrent writers through different pipelines never interleave
/// bytes on a shared destination.
#[test]
fn concurrent_lines_stay_whole() {
    const THREADS: usize = 8;
    const LINES: usize = 200;

    let buffer = SharedBuffer::new();
    let shared = Destination::new(buffer.clone());
    let pipelines: Vec<Arc<Pipeline>> = (0..THREADS)
        .map(|index| {
            Arc::new(Pipeline::new(
                vec![shared.clone()],
                format!("[T{index}]"),
                Flags::NONE,
            ))
        })
        .collect();

    let handles: Vec<_> = pipelines
        .iter()
        .enumerate()
        .map(|(index, pipeline)| {
            let pipeline = Arc::clone(pipeline);
            thread::spawn(move || {
                for line in 0..LINES {
                    pipeline.output(
                        Source::caller(),
                        format_args!("{}", format!("{index}-{line}-").repeat(16)),
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread");
    }

    let output = buffer.contents_lossy();
    assert_eq!(output.lines().count(), THREADS * LINES);
    for line in output.lines() {
        let (prefix, body) = line.split_once(']').expect("prefix present");
        let index = &prefix[2..];
        let first = body.split('-').next().expect("body present");
        assert_eq!(first, index, "line {line:?} mixes writers");
        let chunk = &body[..body.len() / 16];
        assert_eq!(body, chunk.repeat(16), "line {line:?} was interleaved");
    }
}
