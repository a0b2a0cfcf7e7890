// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory span recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps an owned copy of every
//! span it receives, in arrival order. Spans opened with
//! [`start_span`](TraceSink::start_span) are kept separately since they have
//! no end yet.
//!
//! [`RecordedSpan::as_finished`] borrows a recording back as a
//! [`FinishedSpan`], so recorded spans can be replayed into another sink.
//!
//! Tracking can be paused while the recorder is bound to a
//! [`Tracer`](lanetrack_core::trace::Tracer) through a [`TrackingSwitch`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use lanetrack_core::id::SpanId;
use lanetrack_core::trace::{Category, FinishedSpan, SpanDetails, TraceSink};

// ---------------------------------------------------------------------------
// RecordedSpan
// ---------------------------------------------------------------------------

/// An owned copy of a [`FinishedSpan`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedSpan {
    /// Id assigned by the recorder.
    pub id: SpanId,
    /// Span label.
    pub name: String,
    /// Component or scheduler work.
    pub category: Category,
    /// Start time in milliseconds.
    pub start: f64,
    /// End time in milliseconds.
    pub end: f64,
    /// Classification payload.
    pub details: SpanDetails,
    /// Whether the observed work threw.
    pub error: bool,
}

impl RecordedSpan {
    /// Borrows this recording as a [`FinishedSpan`].
    #[must_use]
    pub fn as_finished(&self) -> FinishedSpan<'_> {
        FinishedSpan {
            name: &self.name,
            category: self.category,
            start: self.start,
            end: self.end,
            details: &self.details,
            error: self.error,
        }
    }

    /// Duration in milliseconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A span opened with [`TraceSink::start_span`].
#[derive(Clone, Debug, PartialEq)]
pub struct OpenSpan {
    /// Id assigned by the recorder.
    pub id: SpanId,
    /// Span label.
    pub name: String,
    /// Component or scheduler work.
    pub category: Category,
    /// Classification payload.
    pub details: SpanDetails,
}

// ---------------------------------------------------------------------------
// TrackingSwitch
// ---------------------------------------------------------------------------

/// A shared handle to a recorder's tracking state.
///
/// Flipping the switch is seen by a bound tracer at its next
/// [`Tracer::resolve`](lanetrack_core::trace::Tracer::resolve).
#[derive(Clone, Debug)]
pub struct TrackingSwitch(Arc<AtomicBool>);

impl TrackingSwitch {
    /// Turns tracking on or off.
    pub fn set(&self, tracking: bool) {
        self.0.store(tracking, Ordering::Relaxed);
    }

    /// Returns the current state.
    #[must_use]
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that keeps every span in memory.
#[derive(Debug)]
pub struct RecorderSink {
    spans: Vec<RecordedSpan>,
    open: Vec<OpenSpan>,
    next_id: u64,
    tracking: TrackingSwitch,
}

impl Default for RecorderSink {
    fn default() -> Self {
        Self {
            spans: Vec::new(),
            open: Vec::new(),
            next_id: 1,
            tracking: TrackingSwitch(Arc::new(AtomicBool::new(true))),
        }
    }
}

impl RecorderSink {
    /// Creates an empty recorder that is tracking.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns tracking on or off. Takes effect at the next
    /// [`Tracer::resolve`](lanetrack_core::trace::Tracer::resolve).
    pub fn set_tracking(&self, tracking: bool) {
        self.tracking.set(tracking);
    }

    /// Returns a handle that can flip tracking while the recorder is bound.
    #[must_use]
    pub fn tracking_switch(&self) -> TrackingSwitch {
        self.tracking.clone()
    }

    /// Finished spans, in arrival order.
    #[must_use]
    pub fn spans(&self) -> &[RecordedSpan] {
        &self.spans
    }

    /// Spans opened with [`TraceSink::start_span`].
    #[must_use]
    pub fn open_spans(&self) -> &[OpenSpan] {
        &self.open
    }

    /// Removes and returns the finished spans.
    pub fn take(&mut self) -> Vec<RecordedSpan> {
        std::mem::take(&mut self.spans)
    }

    /// Names of the finished spans, in arrival order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.spans.iter().map(|s| s.name.as_str()).collect()
    }

    fn assign_id(&mut self) -> SpanId {
        let id = SpanId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl TraceSink for RecorderSink {
    fn start_span(&mut self, name: &str, category: Category, details: &SpanDetails) -> SpanId {
        let id = self.assign_id();
        self.open.push(OpenSpan {
            id,
            name: name.to_owned(),
            category,
            details: details.clone(),
        });
        id
    }

    fn create_finished_span(&mut self, span: &FinishedSpan<'_>) -> SpanId {
        let id = self.assign_id();
        self.spans.push(RecordedSpan {
            id,
            name: span.name.to_owned(),
            category: span.category,
            start: span.start,
            end: span.end,
            details: span.details.clone(),
            error: span.error,
        });
        id
    }

    fn is_tracking(&self) -> bool {
        self.tracking.get()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
