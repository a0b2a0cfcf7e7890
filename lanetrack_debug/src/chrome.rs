// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] takes spans recorded by a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes
//! [Chrome Trace Event Format][spec] JSON to the given writer. Each track
//! becomes a named thread so the viewer lays spans out in track rows.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::Write;

use serde_json::{Map, Value, json};

use lanetrack_core::time::ms_to_us;
use lanetrack_core::trace::SpanDetails;
use lanetrack_core::track::Track;

use crate::recorder::RecordedSpan;

/// Failure to write an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The destination could not be written.
    #[error("failed to write trace: {0}")]
    Io(#[from] std::io::Error),
    /// The events could not be serialized.
    #[error("failed to serialize trace: {0}")]
    Json(#[from] serde_json::Error),
}

/// Thread id used for a track. Spans without a track share the
/// components row.
fn track_tid(track: Option<Track>) -> u32 {
    match track.unwrap_or(Track::Components) {
        Track::Blocking => 1,
        Track::Gesture => 2,
        Track::Transition => 3,
        Track::Suspense => 4,
        Track::Idle => 5,
        Track::Other => 6,
        Track::Components => 7,
    }
}

fn span_args(details: &SpanDetails) -> Value {
    let mut args = Map::new();
    if let Some(color) = details.color {
        args.insert("color".into(), json!(color.as_str()));
    }
    if let Some(tooltip) = &details.tooltip {
        args.insert("tooltip".into(), json!(tooltip));
    }
    if !details.properties.is_empty() {
        let rows: Vec<Value> = details
            .properties
            .iter()
            .map(|p| json!([p.key, p.value]))
            .collect();
        args.insert("properties".into(), Value::Array(rows));
    }
    if let Some(self_time) = details.self_time {
        args.insert("self_time_ms".into(), json!(self_time));
    }
    if details.deeply_equal_warning {
        args.insert("deeply_equal_warning".into(), json!(true));
    }
    if let Some(issue) = details.performance_issue {
        args.insert(
            "performance_issue".into(),
            json!({
                "name": issue.name,
                "severity": issue.severity,
                "description": issue.description,
                "learn_more_url": issue.learn_more_url,
            }),
        );
    }
    Value::Object(args)
}

/// Exports recorded spans as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/):
/// one `M` thread-name record per track that has spans, then one `X`
/// complete event per span. Timestamps are microseconds.
pub fn export(spans: &[RecordedSpan], writer: &mut dyn Write) -> Result<(), ExportError> {
    let mut events: Vec<Value> = Vec::new();

    for track in Track::ALL {
        let used = spans
            .iter()
            .any(|s| track_tid(s.details.track) == track_tid(Some(track)));
        if used {
            events.push(json!({
                "ph": "M",
                "name": "thread_name",
                "pid": 0,
                "tid": track_tid(Some(track)),
                "args": { "name": track.as_str() },
            }));
        }
    }

    for span in spans {
        events.push(json!({
            "ph": "X",
            "name": span.name,
            "cat": span.category.as_str(),
            "ts": ms_to_us(span.start),
            "dur": ms_to_us(span.duration()),
            "pid": 0,
            "tid": track_tid(span.details.track),
            "args": {
                "error": span.error,
                "details": span_args(&span.details),
            },
        }));
    }

    serde_json::to_writer_pretty(&mut *writer, &events)?;
    writer.flush()?;
    log::debug!("exported {} spans as {} trace events", spans.len(), events.len());
    Ok(())
}
