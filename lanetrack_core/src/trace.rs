// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Span sinks and the zero-overhead binding to them.
//!
//! This module provides a [`TraceSink`] trait that receives finished spans,
//! plus the payload types a span carries. All sink methods default to no-ops,
//! so implementing only what you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single branch on the resolved binding before
//! dispatching.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::id::SpanId;
use crate::track::Track;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which kind of work a span describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Work attributed to a single component.
    Component,
    /// A scheduler phase (update, render, commit, paint).
    Scheduler,
}

impl Category {
    /// Returns the category string sinks expect.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Component => "ReactComponent",
            Self::Scheduler => "ReactScheduler",
        }
    }
}

/// Severity color token understood by the timeline viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// Light primary.
    PrimaryLight,
    /// Primary.
    Primary,
    /// Dark primary.
    PrimaryDark,
    /// Light secondary.
    SecondaryLight,
    /// Secondary.
    Secondary,
    /// Dark secondary.
    SecondaryDark,
    /// Light tertiary, used for background (hydration) work.
    TertiaryLight,
    /// Tertiary.
    Tertiary,
    /// Dark tertiary.
    TertiaryDark,
    /// Something worth a second look.
    Warning,
    /// Something went wrong, or took far too long.
    Error,
}

impl Color {
    /// Returns the token string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryLight => "primary-light",
            Self::Primary => "primary",
            Self::PrimaryDark => "primary-dark",
            Self::SecondaryLight => "secondary-light",
            Self::Secondary => "secondary",
            Self::SecondaryDark => "secondary-dark",
            Self::TertiaryLight => "tertiary-light",
            Self::Tertiary => "tertiary",
            Self::TertiaryDark => "tertiary-dark",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// One `(key, value)` row shown in a span's detail panel.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Property {
    /// Row label.
    pub key: Cow<'static, str>,
    /// Row value, already formatted.
    pub value: String,
}

impl Property {
    /// Creates a property row.
    #[must_use]
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A known performance problem a span points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PerformanceIssue {
    /// Short title.
    pub name: &'static str,
    /// Severity token.
    pub severity: &'static str,
    /// One-paragraph explanation.
    pub description: &'static str,
    /// Where to read more.
    pub learn_more_url: &'static str,
}

/// An update scheduled while a render or effect was already running.
pub static CASCADING_UPDATE_ISSUE: PerformanceIssue = PerformanceIssue {
    name: "React: Cascading Update",
    severity: "warning",
    description: "A cascading update is an update that is triggered during an ongoing render. \
                  This can lead to performance issues.",
    learn_more_url: "https://react.dev/reference/dev-tools/react-performance-tracks#cascading-updates",
};

/// Classification payload attached to a span.
///
/// Every field is optional; sinks render whatever is present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpanDetails {
    /// Timeline row.
    pub track: Option<Track>,
    /// Severity color.
    pub color: Option<Color>,
    /// Hover text.
    pub tooltip: Option<Cow<'static, str>>,
    /// Detail rows, in display order.
    pub properties: Vec<Property>,
    /// Component self time in milliseconds, for effect spans.
    pub self_time: Option<f64>,
    /// Set when the component re-rendered with deeply equal props and the
    /// user should look into it.
    pub deeply_equal_warning: bool,
    /// Known issue this span illustrates.
    pub performance_issue: Option<&'static PerformanceIssue>,
}

impl SpanDetails {
    /// Details carrying only a color.
    #[must_use]
    pub fn colored(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// Details for a scheduler phase on `track`.
    #[must_use]
    pub fn on_track(track: Track, color: Color) -> Self {
        Self {
            track: Some(track),
            color: Some(color),
            ..Self::default()
        }
    }

    /// Sets the tooltip.
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<Cow<'static, str>>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Sets the detail rows.
    #[must_use]
    pub fn with_properties(mut self, properties: Vec<Property>) -> Self {
        self.properties = properties;
        self
    }
}

/// A closed span handed to a [`TraceSink`].
#[derive(Clone, Copy, Debug)]
pub struct FinishedSpan<'a> {
    /// Span label.
    pub name: &'a str,
    /// Component or scheduler work.
    pub category: Category,
    /// Start time in milliseconds.
    pub start: f64,
    /// End time in milliseconds. Never before `start`.
    pub end: f64,
    /// Classification payload.
    pub details: &'a SpanDetails,
    /// Whether the work this span describes threw.
    pub error: bool,
}

impl FinishedSpan<'_> {
    /// Duration in milliseconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives spans from the instrumentation layer.
///
/// All methods have default implementations, so you only need to override
/// the ones you care about.
pub trait TraceSink {
    /// Called when an open-ended span begins. Returns the id the sink assigned.
    fn start_span(&mut self, name: &str, category: Category, details: &SpanDetails) -> SpanId {
        _ = (name, category, details);
        SpanId::NONE
    }

    /// Called with a span whose start and end are both known.
    fn create_finished_span(&mut self, span: &FinishedSpan<'_>) -> SpanId {
        _ = span;
        SpanId::NONE
    }

    /// Whether the sink currently wants spans. Checked once per scheduling
    /// pass by [`Tracer::resolve`].
    fn is_tracking(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all spans.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing and
/// [`is_active`](Self::is_active) is constantly `false`. When **on**, the
/// binding is active only while a sink is attached and reported
/// [`is_tracking`](TraceSink::is_tracking) at the last [`resolve`](Self::resolve).
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(feature = "trace")]
    tracking: bool,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer bound to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            let tracking = sink.is_tracking();
            Self {
                sink: Some(sink),
                tracking,
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer with no sink attached.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self {
                sink: None,
                tracking: false,
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Re-reads the sink's tracking state and returns whether the binding is
    /// now active.
    #[inline]
    pub fn resolve(&mut self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.tracking = self.sink.as_ref().is_some_and(|s| s.is_tracking());
            self.tracking
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Returns `true` if spans would currently reach a sink.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.tracking
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Opens a span on the sink.
    #[inline]
    pub fn start_span(
        &mut self,
        name: &str,
        category: Category,
        details: &SpanDetails,
    ) -> Option<SpanId> {
        #[cfg(feature = "trace")]
        if self.tracking {
            if let Some(s) = &mut self.sink {
                return Some(s.start_span(name, category, details));
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = (name, category, details);
        }
        None
    }

    /// Hands a finished span to the sink.
    #[inline]
    pub fn finished_span(&mut self, span: &FinishedSpan<'_>) -> Option<SpanId> {
        #[cfg(feature = "trace")]
        if self.tracking {
            if let Some(s) = &mut self.sink {
                return Some(s.create_finished_span(span));
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = span;
        }
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
