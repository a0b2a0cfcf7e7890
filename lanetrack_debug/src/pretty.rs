// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per span
//! to a [`Write`](std::io::Write) destination (default: stderr). Times are
//! printed in milliseconds as received.

use std::io::Write;

use lanetrack_core::id::SpanId;
use lanetrack_core::trace::{Category, FinishedSpan, SpanDetails, TraceSink};

/// Writes human-readable span lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn category_tag(category: Category) -> &'static str {
    match category {
        Category::Component => "component",
        Category::Scheduler => "scheduler",
    }
}

fn track_name(details: &SpanDetails) -> &'static str {
    details.track.map_or("-", |t| t.as_str())
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn start_span(&mut self, name: &str, category: Category, details: &SpanDetails) -> SpanId {
        let _ = writeln!(
            self.writer,
            "[{}:open] {} track={}",
            category_tag(category),
            name,
            track_name(details),
        );
        SpanId::NONE
    }

    fn create_finished_span(&mut self, span: &FinishedSpan<'_>) -> SpanId {
        let details = span.details;
        let _ = write!(
            self.writer,
            "[{}] {} track={} {:.3}..{:.3}ms ({:.3}ms)",
            category_tag(span.category),
            span.name,
            track_name(details),
            span.start,
            span.end,
            span.duration(),
        );
        if let Some(color) = details.color {
            let _ = write!(self.writer, " color={color}");
        }
        if let Some(self_time) = details.self_time {
            let _ = write!(self.writer, " self={self_time:.3}ms");
        }
        if span.error {
            let _ = write!(self.writer, " ERROR");
        }
        if details.deeply_equal_warning {
            let _ = write!(self.writer, " deeply-equal");
        }
        if let Some(tooltip) = &details.tooltip {
            let _ = write!(self.writer, " \"{tooltip}\"");
        }
        let _ = writeln!(self.writer);
        for property in &details.properties {
            let _ = writeln!(self.writer, "    {}: {}", property.key, property.value);
        }
        if let Some(issue) = details.performance_issue {
            let _ = writeln!(self.writer, "    issue: {} ({})", issue.name, issue.severity);
        }
        SpanId::NONE
    }
}
