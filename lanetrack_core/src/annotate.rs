// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Span annotation, rich or minimal.
//!
//! An [`Annotator`] builds the [`SpanDetails`] for spans whose payload depends
//! on how much diagnostic work we are willing to do. There are two:
//!
//! - [`RichAnnotator`] diffs props, flags needless re-renders, and attaches
//!   error messages and update origins. Meant for development builds.
//! - [`MinimalAnnotator`] only classifies. Error spans collapse to a bare
//!   error color.
//!
//! [`DefaultAnnotator`] picks one at compile time from the `trace-rich`
//! feature. Both are always available so a host can inject either.

use alloc::vec::Vec;

use crate::cascade::CascadeState;
use crate::classify;
use crate::fiber::{CapturedError, Fiber};
use crate::lanes::Lanes;
use crate::trace::{Color, PerformanceIssue, Property, SpanDetails};
use crate::track::Track;

/// Self time, in milliseconds, above which a deeply-equal re-render is worth
/// a warning.
pub const DEEP_EQUALITY_THRESHOLD: f64 = 100.0;

/// Tooltip and first property row of a deep-equality warning span.
pub const DEEP_EQUALITY_WARNING: &str = "This component received deeply equal props. \
     It might benefit from useMemo or the React Compiler in its owner.";

/// Label of the header row above changed props.
pub const CHANGED_PROPS: &str = "Changed Props";

/// The annotator selected by the `trace-rich` feature.
#[cfg(feature = "trace-rich")]
pub type DefaultAnnotator = RichAnnotator;

/// The annotator selected by the `trace-rich` feature.
#[cfg(not(feature = "trace-rich"))]
pub type DefaultAnnotator = MinimalAnnotator;

/// Builds span payloads that vary between rich and minimal diagnostics.
pub trait Annotator {
    /// Payload for a component's render span.
    ///
    /// May set the cascade flag when it emits a deep-equality warning.
    fn component_render<F: Fiber + ?Sized>(
        &self,
        fiber: &F,
        self_time: f64,
        hydrated: bool,
        committed_lanes: Lanes,
        cascade: &mut CascadeState,
    ) -> SpanDetails;

    /// Payload for a component whose render or effect threw.
    fn component_errored<F: Fiber + ?Sized>(
        &self,
        fiber: &F,
        errors: &[CapturedError],
        tooltip: &'static str,
    ) -> SpanDetails;

    /// Adds who scheduled an update, and any issue it illustrates.
    fn update_origin(
        &self,
        details: SpanDetails,
        component: Option<&str>,
        method: Option<&str>,
        issue: Option<&'static PerformanceIssue>,
    ) -> SpanDetails;

    /// Payload for a render that threw and then recovered.
    fn recovered_render(
        &self,
        track: Track,
        errors: &[CapturedError],
        hydration_failed: bool,
    ) -> SpanDetails;

    /// Payload for a commit, or its remaining passive effects, that threw.
    fn commit_errored(&self, track: Track, errors: &[CapturedError], passive: bool)
    -> SpanDetails;
}

fn error_rows(label: &'static str, errors: &[CapturedError], properties: &mut Vec<Property>) {
    properties.extend(
        errors
            .iter()
            .map(|e| Property::new(label, e.message.clone())),
    );
}

// ---------------------------------------------------------------------------
// RichAnnotator
// ---------------------------------------------------------------------------

/// Development annotator: prop diffs, deep-equality warnings, error messages.
#[derive(Clone, Copy, Debug, Default)]
pub struct RichAnnotator;

impl Annotator for RichAnnotator {
    fn component_render<F: Fiber + ?Sized>(
        &self,
        fiber: &F,
        self_time: f64,
        hydrated: bool,
        committed_lanes: Lanes,
        cascade: &mut CascadeState,
    ) -> SpanDetails {
        let color = classify::render_self_time(self_time, hydrated);
        let plain = SpanDetails::on_track(Track::Components, color);

        let Some(previous_lanes) = fiber.previous_lanes() else {
            return plain;
        };
        let Some(diff) = fiber.diff_props() else {
            return plain;
        };
        // A single changed prop is plain shallow inequality; nothing to say.
        if diff.entries.len() <= 1 {
            return plain;
        }

        let needless = diff.deep_equal
            && !previous_lanes.intersects(committed_lanes)
            && !cascade.is_suppressed()
            && self_time > DEEP_EQUALITY_THRESHOLD;

        let mut properties = Vec::with_capacity(diff.entries.len() + 1);
        if needless {
            cascade.suppress();
            log::debug!(
                "{} re-rendered with deeply equal props in {self_time:.1}ms",
                fiber.component_name().unwrap_or_default()
            );
            properties.push(Property::new(CHANGED_PROPS, DEEP_EQUALITY_WARNING));
            properties.extend(diff.entries);
            SpanDetails {
                deeply_equal_warning: true,
                ..SpanDetails::on_track(Track::Components, Color::Warning)
                    .with_tooltip(DEEP_EQUALITY_WARNING)
                    .with_properties(properties)
            }
        } else {
            properties.push(Property::new(CHANGED_PROPS, ""));
            properties.extend(diff.entries);
            let mut details = plain.with_properties(properties);
            if let Some(name) = fiber.component_name() {
                details = details.with_tooltip(alloc::string::String::from(name));
            }
            details
        }
    }

    fn component_errored<F: Fiber + ?Sized>(
        &self,
        fiber: &F,
        errors: &[CapturedError],
        tooltip: &'static str,
    ) -> SpanDetails {
        let mut properties = Vec::with_capacity(errors.len() + 1);
        error_rows("Error", errors, &mut properties);
        if let Some(key) = fiber.key() {
            properties.push(Property::new("key", key));
        }
        fiber.describe_props(&mut properties);
        SpanDetails::on_track(Track::Components, Color::Error)
            .with_tooltip(tooltip)
            .with_properties(properties)
    }

    fn update_origin(
        &self,
        mut details: SpanDetails,
        component: Option<&str>,
        method: Option<&str>,
        issue: Option<&'static PerformanceIssue>,
    ) -> SpanDetails {
        if let Some(component) = component {
            details
                .properties
                .push(Property::new("Component name", component));
        }
        if let Some(method) = method {
            details.properties.push(Property::new("Method name", method));
        }
        details.performance_issue = issue;
        details
    }

    fn recovered_render(
        &self,
        track: Track,
        errors: &[CapturedError],
        hydration_failed: bool,
    ) -> SpanDetails {
        let mut properties = Vec::with_capacity(errors.len());
        error_rows("Recoverable Error", errors, &mut properties);
        let tooltip = if hydration_failed {
            "Hydration Failed"
        } else {
            "Recovered after Error"
        };
        SpanDetails::on_track(track, Color::PrimaryDark)
            .with_tooltip(tooltip)
            .with_properties(properties)
    }

    fn commit_errored(
        &self,
        track: Track,
        errors: &[CapturedError],
        passive: bool,
    ) -> SpanDetails {
        let mut properties = Vec::with_capacity(errors.len());
        error_rows("Error", errors, &mut properties);
        let tooltip = if passive {
            "Remaining Effects Errored"
        } else {
            "Commit Errored"
        };
        SpanDetails::on_track(track, Color::Error)
            .with_tooltip(tooltip)
            .with_properties(properties)
    }
}

// ---------------------------------------------------------------------------
// MinimalAnnotator
// ---------------------------------------------------------------------------

/// Production annotator: classification only.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinimalAnnotator;

impl Annotator for MinimalAnnotator {
    fn component_render<F: Fiber + ?Sized>(
        &self,
        _fiber: &F,
        self_time: f64,
        hydrated: bool,
        _committed_lanes: Lanes,
        _cascade: &mut CascadeState,
    ) -> SpanDetails {
        SpanDetails::on_track(
            Track::Components,
            classify::render_self_time(self_time, hydrated),
        )
    }

    fn component_errored<F: Fiber + ?Sized>(
        &self,
        _fiber: &F,
        _errors: &[CapturedError],
        _tooltip: &'static str,
    ) -> SpanDetails {
        SpanDetails::on_track(Track::Components, Color::Error)
    }

    fn update_origin(
        &self,
        details: SpanDetails,
        _component: Option<&str>,
        _method: Option<&str>,
        _issue: Option<&'static PerformanceIssue>,
    ) -> SpanDetails {
        details
    }

    fn recovered_render(
        &self,
        track: Track,
        _errors: &[CapturedError],
        _hydration_failed: bool,
    ) -> SpanDetails {
        SpanDetails::on_track(track, Color::Error)
    }

    fn commit_errored(
        &self,
        track: Track,
        _errors: &[CapturedError],
        _passive: bool,
    ) -> SpanDetails {
        SpanDetails::on_track(track, Color::Error)
    }
}
