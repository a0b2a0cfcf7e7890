// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Phase loggers.
//!
//! [`PerformanceTrack`] is the instrumentation context a scheduler threads
//! through its work loop. It owns the sink binding, the track phase spans are
//! attributed to, and the deep-equality cascade flag. Each `log_*` method
//! corresponds to one transition of the render pipeline:
//!
//! ```text
//!   Event ─► Update ─► Render ─┬─► Interrupted ─► Render …
//!                              ├─► Suspended ─► Recovered | Errored | Commit
//!                              └─► Commit ─► Errored | Remaining Effects
//!                                            ─► Waiting for Paint ─► Animating
//! ```
//!
//! Every logger starts with the same O(1) check: a tracking sink is bound and
//! the host supports timing. Phase loggers additionally skip empty or
//! inverted ranges. Nothing here panics or returns an error; a bad input only
//! costs the one span.

use alloc::borrow::Cow;
use alloc::format;

use crate::annotate::{Annotator, DefaultAnnotator};
use crate::cascade::{CascadeScope, CascadeState};
use crate::classify::{self, BLOCKED_UPDATE_THRESHOLD, YIELD_NOISE_FLOOR};
use crate::config::TrackConfig;
use crate::fiber::{self, CapturedError, Fiber};
use crate::lanes::Lanes;
use crate::time::{UpdateChain, has_extent};
use crate::trace::{CASCADING_UPDATE_ISSUE, Category, Color, FinishedSpan, SpanDetails, Tracer};
use crate::track::{Track, select_track};

/// What the scheduler knows about where an update came from.
///
/// Times are milliseconds; `<= 0.0` means not recorded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UpdateTiming<'a> {
    /// When the update was scheduled.
    pub update_time: f64,
    /// Timestamp of the event that caused the update.
    pub event_time: f64,
    /// The event's type, if the update came from one.
    pub event_type: Option<&'a str>,
    /// Whether the same event already caused an earlier update.
    pub event_is_repeat: bool,
    /// Whether the update was scheduled during a render or effect.
    pub is_spawned_update: bool,
    /// Whether the update was a suspended render being pinged.
    pub is_pinged_update: bool,
    /// When rendering began.
    pub render_start_time: f64,
    /// Lanes of the update.
    pub lanes: Lanes,
    /// The method that scheduled the update, such as `setState`.
    pub update_method_name: Option<&'a str>,
    /// The component that scheduled the update.
    pub update_component_name: Option<&'a str>,
}

/// Instrumentation context for one scheduler.
///
/// `A` selects how much diagnostic detail spans carry; see
/// [`annotate`](crate::annotate).
pub struct PerformanceTrack<'a, A = DefaultAnnotator> {
    tracer: Tracer<'a>,
    current_track: Track,
    cascade: CascadeState,
    annotator: A,
    config: TrackConfig,
}

impl<A: core::fmt::Debug> core::fmt::Debug for PerformanceTrack<'_, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PerformanceTrack")
            .field("tracer", &self.tracer)
            .field("current_track", &self.current_track)
            .field("cascade", &self.cascade)
            .field("annotator", &self.annotator)
            .field("config", &self.config)
            .finish()
    }
}

impl<'a> PerformanceTrack<'a> {
    /// Creates a context with the default annotator.
    #[must_use]
    pub fn new(tracer: Tracer<'a>, config: TrackConfig) -> Self {
        Self::with_annotator(tracer, config, DefaultAnnotator::default())
    }
}

impl<'a, A: Annotator> PerformanceTrack<'a, A> {
    /// Creates a context with an explicit annotator.
    #[must_use]
    pub fn with_annotator(tracer: Tracer<'a>, config: TrackConfig, annotator: A) -> Self {
        Self {
            tracer,
            current_track: Track::Blocking,
            cascade: CascadeState::default(),
            annotator,
            config,
        }
    }

    /// Returns the runtime configuration.
    #[must_use]
    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Returns `true` when loggers would emit spans.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.tracer.is_active() && self.config.timing_supported
    }

    /// Starts a top-level scheduling pass by re-resolving the sink binding.
    pub fn mark_all_lanes_in_order(&mut self) {
        let was_active = self.tracer.is_active();
        let active = self.tracer.resolve();
        if active != was_active {
            log::debug!("performance tracking {}", if active { "started" } else { "stopped" });
        }
    }

    /// Attributes subsequent phase spans to the track selected by `lanes`.
    pub fn set_current_track_from_lanes(&mut self, lanes: Lanes) {
        self.current_track = select_track(lanes);
    }

    /// The track phase spans are currently attributed to.
    #[must_use]
    pub fn current_track(&self) -> Track {
        self.current_track
    }

    /// Enters a component's subtree. Hand the scope back to
    /// [`pop_deep_equality`](Self::pop_deep_equality) on exit.
    pub fn push_deep_equality(&self) -> CascadeScope {
        self.cascade.push()
    }

    /// Leaves a component's subtree.
    pub fn pop_deep_equality(&mut self, scope: CascadeScope) {
        self.cascade.pop(scope);
    }

    // -----------------------------------------------------------------------
    // Emission
    // -----------------------------------------------------------------------

    fn emit(
        &mut self,
        name: &str,
        category: Category,
        start: f64,
        end: f64,
        details: &SpanDetails,
        error: bool,
    ) {
        self.tracer.finished_span(&FinishedSpan {
            name,
            category,
            start,
            end,
            details,
            error,
        });
    }

    /// Emits a scheduler span on the current track, if the range is non-empty.
    fn phase(&mut self, name: &str, start: f64, end: f64, color: Color, error: bool) {
        if !has_extent(start, end) {
            return;
        }
        let details = SpanDetails::on_track(self.current_track, color);
        self.emit(name, Category::Scheduler, start, end, &details, error);
    }

    fn component(&mut self, name: &str, start: f64, end: f64, details: &SpanDetails, error: bool) {
        if end < start {
            return;
        }
        self.emit(name, Category::Component, start, end, details, error);
    }

    // -----------------------------------------------------------------------
    // Origin loggers
    // -----------------------------------------------------------------------

    /// Logs the origin of a blocking update and makes `Blocking` current.
    pub fn log_blocking_start(&mut self, timing: &UpdateTiming<'_>) {
        if !self.is_enabled() {
            return;
        }
        self.current_track = Track::Blocking;
        let chain = UpdateChain::new(timing.event_time, timing.update_time, timing.render_start_time);
        self.event_gap(timing, chain.event, chain.update);
        if !has_extent(chain.update, chain.render_start) {
            return;
        }
        let label = if timing.is_pinged_update {
            "Promise Resolved"
        } else if timing.is_spawned_update {
            "Cascading Update"
        } else if chain.render_start - chain.update > BLOCKED_UPDATE_THRESHOLD {
            "Update Blocked"
        } else {
            "Update"
        };
        let color = classify::update_gap(timing.is_spawned_update, timing.lanes);
        let issue = (timing.is_spawned_update && self.config.report_performance_issues)
            .then_some(&CASCADING_UPDATE_ISSUE);
        let details = self.annotator.update_origin(
            SpanDetails::on_track(self.current_track, color),
            timing.update_component_name,
            timing.update_method_name,
            issue,
        );
        self.emit(label, Category::Scheduler, chain.update, chain.render_start, &details, false);
    }

    /// Logs the origin of a gesture update and makes `Gesture` current.
    pub fn log_gesture_start(&mut self, timing: &UpdateTiming<'_>) {
        if !self.is_enabled() {
            return;
        }
        self.current_track = Track::Gesture;
        let chain = UpdateChain::new(timing.event_time, timing.update_time, timing.render_start_time);
        self.event_gap(timing, chain.event, chain.update);
        let label = if timing.is_pinged_update {
            "Promise Resolved"
        } else if chain.render_start - chain.update > BLOCKED_UPDATE_THRESHOLD {
            "Gesture Blocked"
        } else {
            "Gesture"
        };
        self.update_gap(timing, &chain, label);
    }

    /// Logs the origin of a transition and makes `Transition` current.
    ///
    /// `start_time` is when the async action began; the span from there to
    /// the update is logged as `Action`.
    pub fn log_transition_start(&mut self, start_time: f64, timing: &UpdateTiming<'_>) {
        if !self.is_enabled() {
            return;
        }
        self.current_track = Track::Transition;
        let chain = UpdateChain::transition(
            timing.event_time,
            start_time,
            timing.update_time,
            timing.render_start_time,
        );
        self.event_gap(timing, chain.event, chain.start);
        self.phase("Action", chain.start, chain.update, Color::PrimaryDark, false);
        let label = if timing.is_pinged_update {
            "Promise Resolved"
        } else if chain.render_start - chain.update > BLOCKED_UPDATE_THRESHOLD {
            "Update Blocked"
        } else {
            "Update"
        };
        self.update_gap(timing, &chain, label);
    }

    /// Logs the time from the triggering event until `until`.
    fn event_gap(&mut self, timing: &UpdateTiming<'_>, event: f64, until: f64) {
        let Some(event_type) = timing.event_type else {
            return;
        };
        if !has_extent(event, until) {
            return;
        }
        let color = classify::event_gap(timing.event_is_repeat);
        let name: Cow<'_, str> = if timing.event_is_repeat {
            Cow::Borrowed("Consecutive")
        } else {
            Cow::Owned(format!("Event: {event_type}"))
        };
        let details = SpanDetails::on_track(self.current_track, color);
        self.emit(&name, Category::Scheduler, event, until, &details, false);
    }

    /// Logs a gesture or transition update waiting to render.
    fn update_gap(&mut self, timing: &UpdateTiming<'_>, chain: &UpdateChain, label: &str) {
        if !has_extent(chain.update, chain.render_start) {
            return;
        }
        let details = self.annotator.update_origin(
            SpanDetails::on_track(self.current_track, Color::PrimaryLight),
            timing.update_component_name,
            timing.update_method_name,
            None,
        );
        self.emit(label, Category::Scheduler, chain.update, chain.render_start, &details, false);
    }

    // -----------------------------------------------------------------------
    // Render phase
    // -----------------------------------------------------------------------

    /// Logs a completed render pass.
    pub fn log_render_phase(&mut self, start: f64, end: f64, lanes: Lanes) {
        if !self.is_enabled() {
            return;
        }
        let label = if lanes.is_offscreen_only() {
            "Prepared"
        } else if lanes.is_hydration_only() {
            "Hydrated"
        } else {
            "Render"
        };
        self.phase(label, start, end, classify::render_phase(lanes), false);
    }

    /// Logs a render pass that yielded to higher-priority work.
    pub fn log_interrupted_render_phase(&mut self, start: f64, end: f64, lanes: Lanes) {
        if !self.is_enabled() {
            return;
        }
        let label = if lanes.is_offscreen_only() {
            "Prewarm"
        } else if lanes.is_hydration_only() {
            "Interrupted Hydration"
        } else {
            "Interrupted Render"
        };
        self.phase(label, start, end, classify::render_phase(lanes), false);
    }

    /// Logs a render pass that suspended and kept rendering siblings.
    pub fn log_suspended_render_phase(&mut self, start: f64, end: f64, lanes: Lanes) {
        if !self.is_enabled() {
            return;
        }
        self.phase("Prewarm", start, end, classify::render_phase(lanes), false);
    }

    /// Logs a render pass that suspended and is waiting before committing.
    pub fn log_suspended_with_delay_phase(&mut self, start: f64, end: f64, lanes: Lanes) {
        if !self.is_enabled() {
            return;
        }
        self.phase("Suspended", start, end, classify::render_phase(lanes), false);
    }

    /// Logs a render pass that threw and recovered by rendering again.
    pub fn log_recovered_render_phase(
        &mut self,
        start: f64,
        end: f64,
        recoverable_errors: &[CapturedError],
        hydration_failed: bool,
    ) {
        if !self.is_enabled() || !has_extent(start, end) {
            return;
        }
        let details =
            self.annotator
                .recovered_render(self.current_track, recoverable_errors, hydration_failed);
        self.emit("Recovered", Category::Scheduler, start, end, &details, false);
    }

    /// Logs a render pass that threw and did not recover.
    pub fn log_errored_render_phase(&mut self, start: f64, end: f64) {
        if !self.is_enabled() {
            return;
        }
        self.phase("Errored", start, end, Color::Error, true);
    }

    /// Logs a render that had to restart because an external store changed
    /// mid-render.
    pub fn log_inconsistent_render(&mut self, start: f64, end: f64) {
        if !self.is_enabled() {
            return;
        }
        self.phase("Teared Render", start, end, Color::Error, true);
    }

    // -----------------------------------------------------------------------
    // Commit phase
    // -----------------------------------------------------------------------

    /// Logs a commit held back, for example while stylesheets load. The
    /// span is named after `reason`.
    pub fn log_suspended_commit_phase(&mut self, start: f64, end: f64, reason: &str) {
        if !self.is_enabled() {
            return;
        }
        self.phase(reason, start, end, Color::SecondaryLight, false);
    }

    /// Logs a commit held back by a pending view transition.
    pub fn log_suspended_view_transition_phase(&mut self, start: f64, end: f64, reason: &str) {
        if !self.is_enabled() {
            return;
        }
        self.phase(reason, start, end, Color::SecondaryLight, false);
    }

    /// Logs a commit. With errors, logs an errored commit instead.
    pub fn log_commit_phase(
        &mut self,
        start: f64,
        end: f64,
        errors: Option<&[CapturedError]>,
        aborted_view_transition: bool,
    ) {
        if let Some(errors) = errors {
            self.log_commit_errored(start, end, errors, false);
            return;
        }
        if !self.is_enabled() {
            return;
        }
        if aborted_view_transition {
            self.phase("Commit Interrupted View Transition", start, end, Color::Error, false);
        } else {
            self.phase("Commit", start, end, Color::SecondaryDark, false);
        }
    }

    /// Logs a commit, or its remaining passive effects when `passive`, that
    /// threw.
    pub fn log_commit_errored(
        &mut self,
        start: f64,
        end: f64,
        errors: &[CapturedError],
        passive: bool,
    ) {
        if !self.is_enabled() || !has_extent(start, end) {
            return;
        }
        let details = self
            .annotator
            .commit_errored(self.current_track, errors, passive);
        self.emit("Errored", Category::Scheduler, start, end, &details, true);
    }

    // -----------------------------------------------------------------------
    // After commit
    // -----------------------------------------------------------------------

    /// Logs the wait between commit and the next paint.
    pub fn log_paint_yield_phase(&mut self, start: f64, end: f64, delayed_until_paint: bool) {
        if !self.is_enabled() {
            return;
        }
        let label = if delayed_until_paint {
            "Waiting for Paint"
        } else {
            "Waiting"
        };
        self.phase(label, start, end, Color::SecondaryLight, false);
    }

    /// Logs the wait for a view transition to start animating.
    pub fn log_start_view_transition_yield_phase(
        &mut self,
        start: f64,
        end: f64,
        aborted_view_transition: bool,
    ) {
        if !self.is_enabled() {
            return;
        }
        if aborted_view_transition {
            self.phase("Interrupted View Transition", start, end, Color::Error, false);
        } else {
            self.phase("Starting Animation", start, end, Color::SecondaryLight, false);
        }
    }

    /// Logs a running view transition animation.
    pub fn log_animating_phase(&mut self, start: f64, end: f64) {
        if !self.is_enabled() {
            return;
        }
        self.phase("Animating", start, end, Color::SecondaryDark, false);
    }

    /// Logs passive effects flushed after paint. With errors, logs an
    /// errored span instead.
    pub fn log_passive_commit_phase(
        &mut self,
        start: f64,
        end: f64,
        errors: Option<&[CapturedError]>,
    ) {
        if let Some(errors) = errors {
            self.log_commit_errored(start, end, errors, true);
            return;
        }
        if !self.is_enabled() {
            return;
        }
        self.phase("Remaining Effects", start, end, Color::SecondaryDark, false);
    }

    // -----------------------------------------------------------------------
    // Per component
    // -----------------------------------------------------------------------

    /// Logs a component mounting.
    pub fn log_component_mount<F: Fiber + ?Sized>(&mut self, fiber: &F, start: f64, end: f64) {
        self.component_trigger(fiber, start, end, "Mount");
    }

    /// Logs a component unmounting.
    pub fn log_component_unmount<F: Fiber + ?Sized>(&mut self, fiber: &F, start: f64, end: f64) {
        self.component_trigger(fiber, start, end, "Unmount");
    }

    /// Logs a hidden component becoming visible again.
    pub fn log_component_reappeared<F: Fiber + ?Sized>(
        &mut self,
        fiber: &F,
        start: f64,
        end: f64,
    ) {
        self.component_trigger(fiber, start, end, "Reconnect");
    }

    /// Logs a visible component being hidden.
    pub fn log_component_disappeared<F: Fiber + ?Sized>(
        &mut self,
        fiber: &F,
        start: f64,
        end: f64,
    ) {
        self.component_trigger(fiber, start, end, "Disconnect");
    }

    fn component_trigger<F: Fiber + ?Sized>(
        &mut self,
        fiber: &F,
        start: f64,
        end: f64,
        trigger: &'static str,
    ) {
        if !self.is_enabled() || named(fiber).is_none() {
            return;
        }
        let details = SpanDetails::on_track(Track::Components, Color::Warning).with_tooltip(trigger);
        self.component(trigger, start, end, &details, false);
    }

    /// Logs one component's render, colored by its self time.
    ///
    /// With the rich annotator this also diffs props and may flag a
    /// needless re-render; call it between
    /// [`push_deep_equality`](Self::push_deep_equality) and
    /// [`pop_deep_equality`](Self::pop_deep_equality).
    pub fn log_component_render<F: Fiber + ?Sized>(
        &mut self,
        fiber: &F,
        start: f64,
        end: f64,
        was_hydrated: bool,
        committed_lanes: Lanes,
    ) {
        if !self.is_enabled() {
            return;
        }
        let Some(name) = named(fiber) else {
            return;
        };
        let self_time = fiber::self_time(fiber);
        let details = self.annotator.component_render(
            fiber,
            self_time,
            was_hydrated,
            committed_lanes,
            &mut self.cascade,
        );
        self.component(name, start, end, &details, false);
    }

    /// Logs a component whose render threw.
    pub fn log_component_errored<F: Fiber + ?Sized>(
        &mut self,
        fiber: &F,
        start: f64,
        end: f64,
        errors: &[CapturedError],
    ) {
        if !self.is_enabled() {
            return;
        }
        let Some(name) = named(fiber) else {
            return;
        };
        let tooltip = if fiber.is_suspense_boundary() {
            "Hydration failed"
        } else {
            "Error boundary caught an error"
        };
        let details = self.annotator.component_errored(fiber, errors, tooltip);
        self.component(name, start, end, &details, true);
    }

    /// Logs one component's effects, colored by `self_time`. With errors,
    /// logs an errored effect span instead.
    pub fn log_component_effect<F: Fiber + ?Sized>(
        &mut self,
        fiber: &F,
        start: f64,
        end: f64,
        self_time: f64,
        errors: Option<&[CapturedError]>,
    ) {
        if !self.is_enabled() {
            return;
        }
        let Some(name) = named(fiber) else {
            return;
        };
        if let Some(errors) = errors {
            let details =
                self.annotator
                    .component_errored(fiber, errors, "A lifecycle or effect errored");
            self.component(name, start, end, &details, true);
            return;
        }
        let details = SpanDetails {
            self_time: Some(self_time),
            ..SpanDetails::on_track(Track::Components, classify::effect_time(self_time))
        };
        self.component(name, start, end, &details, false);
    }

    // -----------------------------------------------------------------------
    // Yields
    // -----------------------------------------------------------------------

    /// Logs time the work loop spent yielded to the host. Short yields are
    /// noise and skipped.
    pub fn log_yield_time(&mut self, start: f64, end: f64) {
        if !self.is_enabled() {
            return;
        }
        let duration = end - start;
        if duration.is_nan() || duration < YIELD_NOISE_FLOOR {
            return;
        }
        let details = SpanDetails::on_track(Track::Components, classify::yield_time(duration));
        self.component("Blocked", start, end, &details, false);
    }

    /// Logs time the work loop waited on a suspended component.
    pub fn log_suspended_yield_time(&mut self, start: f64, end: f64) {
        if !self.is_enabled() {
            return;
        }
        let details = SpanDetails::on_track(Track::Components, Color::PrimaryLight);
        self.component("Suspended", start, end, &details, false);
    }

    /// Logs time the work loop waited on an async action.
    pub fn log_action_yield_time(&mut self, start: f64, end: f64) {
        if !self.is_enabled() {
            return;
        }
        let details = SpanDetails::on_track(Track::Components, Color::PrimaryLight);
        self.component("Action", start, end, &details, false);
    }
}

/// The fiber's display name, or `None` when it should not be logged.
fn named<F: Fiber + ?Sized>(fiber: &F) -> Option<&str> {
    let name = fiber.component_name();
    if name.is_none() {
        log::trace!("skipping span for unnamed component");
    }
    name
}
