// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end update lifecycles recorded through [`RecorderSink`].

use lanetrack_core::annotate::{DEEP_EQUALITY_WARNING, MinimalAnnotator};
use lanetrack_core::config::TrackConfig;
use lanetrack_core::fiber::{CapturedError, Fiber, PropertyDiff};
use lanetrack_core::lanes::Lanes;
use lanetrack_core::performance::{PerformanceTrack, UpdateTiming};
use lanetrack_core::trace::{CASCADING_UPDATE_ISSUE, Category, Color, Property, Tracer};
use lanetrack_core::track::{Track, select_track};

use crate::recorder::RecorderSink;

/// A component as the reconciler would describe it.
#[derive(Clone, Debug, Default)]
struct Component {
    name: Option<&'static str>,
    actual: f64,
    previous_lanes: Option<Lanes>,
    diff: Option<PropertyDiff>,
    boundary: bool,
}

impl Component {
    fn mounted(name: &'static str, actual: f64) -> Self {
        Self {
            name: Some(name),
            actual,
            ..Self::default()
        }
    }

    /// Re-rendered with props that are new objects but deeply equal.
    fn needless(name: &'static str, actual: f64) -> Self {
        Self {
            name: Some(name),
            actual,
            previous_lanes: Some(Lanes::NONE),
            diff: Some(PropertyDiff {
                entries: vec![
                    Property::new("style", "Referentially unequal but deeply equal objects."),
                    Property::new("onClick", "Referentially unequal function closure."),
                ],
                deep_equal: true,
            }),
            boundary: false,
        }
    }
}

impl Fiber for Component {
    fn component_name(&self) -> Option<&str> {
        self.name
    }
    fn is_suspense_boundary(&self) -> bool {
        self.boundary
    }
    fn actual_duration(&self) -> f64 {
        self.actual
    }
    fn child_list_changed(&self) -> bool {
        false
    }
    fn children_actual_duration(&self) -> f64 {
        0.0
    }
    fn previous_lanes(&self) -> Option<Lanes> {
        self.previous_lanes
    }
    fn diff_props(&self) -> Option<PropertyDiff> {
        self.diff.clone()
    }
}

fn dev(rec: &mut RecorderSink) -> PerformanceTrack<'_> {
    PerformanceTrack::new(Tracer::new(rec), TrackConfig::development())
}

/// Drives every kind of logger once.
fn full_lifecycle(track: &mut PerformanceTrack<'_>) {
    let app = Component::mounted("App", 4.0);
    track.mark_all_lanes_in_order();
    track.log_blocking_start(&UpdateTiming {
        event_time: 1.0,
        event_type: Some("click"),
        update_time: 2.0,
        render_start_time: 4.0,
        lanes: Lanes::SYNC,
        ..UpdateTiming::default()
    });
    track.log_component_render(&app, 4.0, 8.0, false, Lanes::SYNC);
    track.log_render_phase(4.0, 8.0, Lanes::SYNC);
    track.log_commit_phase(8.0, 9.0, None, false);
    track.log_component_effect(&app, 9.0, 9.5, 0.5, None);
    track.log_paint_yield_phase(9.5, 12.0, true);
    track.log_passive_commit_phase(12.0, 13.0, None);
    track.log_yield_time(13.0, 20.0);
}

#[test]
fn no_spans_without_a_tracking_sink() {
    let mut track = PerformanceTrack::new(Tracer::none(), TrackConfig::development());
    full_lifecycle(&mut track);
    assert!(!track.is_enabled());

    let mut rec = RecorderSink::new();
    rec.set_tracking(false);
    let mut track = dev(&mut rec);
    full_lifecycle(&mut track);
    drop(track);
    assert!(rec.spans().is_empty());

    rec.set_tracking(true);
    let mut track = dev(&mut rec);
    full_lifecycle(&mut track);
    drop(track);
    assert_eq!(
        rec.names(),
        [
            "Event: click",
            "Update",
            "App",
            "Render",
            "Commit",
            "App",
            "Waiting for Paint",
            "Remaining Effects",
            "Blocked",
        ]
    );
}

#[test]
fn tracking_toggled_between_passes() {
    let mut rec = RecorderSink::new();
    let switch = rec.tracking_switch();
    switch.set(false);
    let mut track = dev(&mut rec);

    track.mark_all_lanes_in_order();
    track.log_render_phase(0.0, 1.0, Lanes::SYNC);
    switch.set(true);
    track.log_commit_phase(1.0, 2.0, None, false);

    track.mark_all_lanes_in_order();
    track.log_render_phase(10.0, 11.0, Lanes::SYNC);
    switch.set(false);
    track.log_commit_phase(11.0, 12.0, None, false);

    track.mark_all_lanes_in_order();
    track.log_render_phase(20.0, 21.0, Lanes::SYNC);
    drop(track);

    let starts: Vec<_> = rec.spans().iter().map(|s| (s.name.as_str(), s.start)).collect();
    assert_eq!(starts, [("Render", 10.0), ("Commit", 11.0)]);
}

#[test]
fn phase_loggers_skip_empty_and_inverted_ranges() {
    let errors = [CapturedError::from("boom")];
    let mut rec = RecorderSink::new();
    let mut track = dev(&mut rec);
    for (start, end) in [(5.0, 5.0), (6.0, 5.0)] {
        track.log_render_phase(start, end, Lanes::DEFAULT);
        track.log_interrupted_render_phase(start, end, Lanes::DEFAULT);
        track.log_suspended_render_phase(start, end, Lanes::DEFAULT);
        track.log_suspended_with_delay_phase(start, end, Lanes::DEFAULT);
        track.log_recovered_render_phase(start, end, &errors, false);
        track.log_errored_render_phase(start, end);
        track.log_inconsistent_render(start, end);
        track.log_suspended_commit_phase(start, end, "Suspended on CSS");
        track.log_suspended_view_transition_phase(start, end, "Suspended on Images");
        track.log_commit_phase(start, end, None, false);
        track.log_commit_phase(start, end, Some(&errors[..]), false);
        track.log_paint_yield_phase(start, end, false);
        track.log_start_view_transition_yield_phase(start, end, false);
        track.log_animating_phase(start, end);
        track.log_passive_commit_phase(start, end, None);
    }
    drop(track);
    assert!(rec.spans().is_empty(), "got: {:?}", rec.names());
}

#[test]
fn yield_noise_floor() {
    let mut rec = RecorderSink::new();
    let mut track = dev(&mut rec);
    track.log_yield_time(100.0, 102.9);
    track.log_yield_time(100.0, 103.1);
    drop(track);
    let spans = rec.spans();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].name, "Blocked");
    assert_eq!(spans[0].category, Category::Component);
    assert_eq!(spans[0].details.color, Some(Color::PrimaryLight));
}

#[test]
fn render_self_time_colors() {
    let cases = [
        (0.4, false, Color::PrimaryLight),
        (0.5, false, Color::Primary),
        (10.0, false, Color::PrimaryDark),
        (100.0, false, Color::Error),
        (0.4, true, Color::TertiaryLight),
        (0.5, true, Color::Tertiary),
        (10.0, true, Color::TertiaryDark),
        (100.0, true, Color::Error),
    ];
    let mut rec = RecorderSink::new();
    let mut track = dev(&mut rec);
    for (actual, hydrated, _) in cases {
        track.log_component_render(
            &Component::mounted("Cell", actual),
            0.0,
            actual,
            hydrated,
            Lanes::DEFAULT,
        );
    }
    drop(track);
    let colors: Vec<_> = rec.spans().iter().map(|s| s.details.color).collect();
    let expected: Vec<_> = cases.iter().map(|c| Some(c.2)).collect();
    assert_eq!(colors, expected);
}

#[test]
fn blocking_start_with_nothing_recorded_emits_nothing() {
    let mut rec = RecorderSink::new();
    let mut track = dev(&mut rec);
    track.set_current_track_from_lanes(Lanes::TRANSITIONS);
    track.log_blocking_start(&UpdateTiming {
        update_time: 0.0,
        event_time: 0.0,
        event_type: Some("click"),
        render_start_time: 50.0,
        lanes: Lanes::SYNC,
        ..UpdateTiming::default()
    });
    assert_eq!(track.current_track(), Track::Blocking);
    drop(track);
    assert!(rec.spans().is_empty());
}

#[test]
fn spawned_update_is_a_cascading_update() {
    let mut rec = RecorderSink::new();
    let mut track = dev(&mut rec);
    track.log_blocking_start(&UpdateTiming {
        update_time: 10.0,
        render_start_time: 16.0,
        is_spawned_update: true,
        lanes: Lanes::SYNC,
        update_method_name: Some("setState"),
        update_component_name: Some("Counter"),
        ..UpdateTiming::default()
    });
    drop(track);

    let spans = rec.spans();
    assert_eq!(spans.len(), 1);
    let span = &spans[0];
    assert_eq!(span.name, "Cascading Update");
    assert_eq!(span.details.color, Some(Color::Error));
    assert_eq!(span.details.track, Some(Track::Blocking));
    assert_eq!(span.details.performance_issue, Some(&CASCADING_UPDATE_ISSUE));
    let rows: Vec<_> = span
        .details
        .properties
        .iter()
        .map(|p| (p.key.as_ref(), p.value.as_str()))
        .collect();
    assert_eq!(rows, [("Component name", "Counter"), ("Method name", "setState")]);
}

#[test]
fn production_update_has_no_origin_rows() {
    let mut rec = RecorderSink::new();
    let mut track = PerformanceTrack::with_annotator(
        Tracer::new(&mut rec),
        TrackConfig::production(),
        MinimalAnnotator,
    );
    let timing = UpdateTiming {
        update_time: 10.0,
        render_start_time: 16.0,
        lanes: Lanes::SYNC,
        update_method_name: Some("setState"),
        ..UpdateTiming::default()
    };
    track.log_blocking_start(&UpdateTiming {
        is_spawned_update: true,
        ..timing
    });
    track.log_blocking_start(&timing);
    track.log_blocking_start(&UpdateTiming {
        is_pinged_update: true,
        ..timing
    });
    drop(track);
    assert_eq!(
        rec.names(),
        ["Cascading Update", "Update Blocked", "Promise Resolved"]
    );
    for span in rec.spans() {
        assert!(span.details.properties.is_empty());
        assert!(span.details.performance_issue.is_none());
    }
}

#[test]
fn repeat_event_is_consecutive() {
    let mut rec = RecorderSink::new();
    let mut track = dev(&mut rec);
    track.log_blocking_start(&UpdateTiming {
        event_time: 5.0,
        event_type: Some("keydown"),
        event_is_repeat: true,
        update_time: 7.0,
        render_start_time: 9.0,
        lanes: Lanes::INPUT_CONTINUOUS,
        ..UpdateTiming::default()
    });
    drop(track);
    let spans = rec.spans();
    assert_eq!(spans[0].name, "Consecutive");
    assert_eq!(spans[0].details.color, Some(Color::SecondaryLight));
    assert_eq!((spans[0].start, spans[0].end), (5.0, 7.0));
    assert_eq!(spans[1].name, "Update");
    assert_eq!(spans[1].details.color, Some(Color::PrimaryLight));
}

#[test]
fn deep_equality_warning_once_per_subtree() {
    let parent = Component::needless("Page", 150.0);
    let child = Component::needless("Sidebar", 150.0);
    let sibling = Component::needless("Footer", 150.0);

    let mut rec = RecorderSink::new();
    let mut track = dev(&mut rec);

    let page = track.push_deep_equality();
    track.log_component_render(&parent, 0.0, 150.0, false, Lanes::DEFAULT);
    let sidebar = track.push_deep_equality();
    assert!(sidebar.was_suppressed());
    track.log_component_render(&child, 0.0, 150.0, false, Lanes::DEFAULT);
    track.pop_deep_equality(sidebar);
    track.pop_deep_equality(page);

    let footer = track.push_deep_equality();
    assert!(!footer.was_suppressed());
    track.log_component_render(&sibling, 150.0, 300.0, false, Lanes::DEFAULT);
    track.pop_deep_equality(footer);
    drop(track);

    let flagged: Vec<_> = rec
        .spans()
        .iter()
        .map(|s| (s.name.as_str(), s.details.deeply_equal_warning))
        .collect();
    assert_eq!(flagged, [("Page", true), ("Sidebar", false), ("Footer", true)]);

    let page = &rec.spans()[0];
    assert_eq!(page.details.color, Some(Color::Warning));
    assert_eq!(page.details.tooltip.as_deref(), Some(DEEP_EQUALITY_WARNING));
    assert_eq!(page.details.properties[0].key, "Changed Props");
}

#[test]
fn errored_component_details() {
    let errors = [CapturedError::from("Cannot read properties of undefined")];
    let feed = Component::mounted("Feed", 1.0);

    let mut rec = RecorderSink::new();
    let mut track = dev(&mut rec);
    track.log_component_errored(&feed, 0.0, 1.0, &errors);
    track.log_component_effect(&feed, 1.0, 2.0, 1.0, Some(&errors[..]));
    drop(track);

    let spans = rec.spans();
    assert!(spans.iter().all(|s| s.error));
    assert_eq!(
        spans[0].details.tooltip.as_deref(),
        Some("Error boundary caught an error")
    );
    assert_eq!(
        spans[1].details.tooltip.as_deref(),
        Some("A lifecycle or effect errored")
    );
    assert_eq!(spans[0].details.properties[0].value, errors[0].message);
}

#[test]
fn recovered_and_commit_variants() {
    let errors = [CapturedError::from("Hydration mismatch")];
    let mut rec = RecorderSink::new();
    let mut track = dev(&mut rec);
    track.set_current_track_from_lanes(Lanes::DEFAULT_HYDRATION);
    track.log_recovered_render_phase(0.0, 5.0, &errors, true);
    track.log_errored_render_phase(5.0, 6.0);
    track.log_inconsistent_render(6.0, 7.0);
    track.log_suspended_commit_phase(7.0, 8.0, "Suspended on CSS");
    track.log_commit_phase(8.0, 9.0, None, true);
    track.log_start_view_transition_yield_phase(9.0, 10.0, false);
    track.log_animating_phase(10.0, 11.0);
    drop(track);

    assert_eq!(
        rec.names(),
        [
            "Recovered",
            "Errored",
            "Teared Render",
            "Suspended on CSS",
            "Commit Interrupted View Transition",
            "Starting Animation",
            "Animating",
        ]
    );
    let spans = rec.spans();
    assert!(spans.iter().all(|s| s.details.track == Some(Track::Blocking)));
    assert_eq!(spans[0].details.color, Some(Color::PrimaryDark));
    assert_eq!(spans[0].details.tooltip.as_deref(), Some("Hydration Failed"));
    assert_eq!(spans[0].details.properties[0].key, "Recoverable Error");
    assert!(spans[1].error && spans[2].error && !spans[4].error);
    assert_eq!(spans[4].details.color, Some(Color::Error));
}

#[test]
fn select_track_is_pure() {
    let lanes = Lanes::TRANSITIONS | Lanes::IDLE;
    let before = select_track(lanes);

    let mut rec = RecorderSink::new();
    let mut track = dev(&mut rec);
    track.log_gesture_start(&UpdateTiming {
        update_time: 1.0,
        render_start_time: 2.0,
        lanes: Lanes::GESTURE,
        ..UpdateTiming::default()
    });
    track.log_blocking_start(&UpdateTiming {
        update_time: 3.0,
        render_start_time: 4.0,
        lanes: Lanes::SYNC,
        ..UpdateTiming::default()
    });
    drop(track);

    assert_eq!(select_track(lanes), before);
    assert_eq!(before, Track::Transition);
}

#[test]
fn component_trigger_spans() {
    let tab = Component::mounted("Tab", 1.0);
    let anonymous = Component::default();

    let mut rec = RecorderSink::new();
    let mut track = dev(&mut rec);
    track.log_component_mount(&tab, 0.0, 0.0);
    track.log_component_unmount(&tab, 1.0, 2.0);
    track.log_component_reappeared(&tab, 2.0, 3.0);
    track.log_component_disappeared(&tab, 3.0, 4.0);
    track.log_component_mount(&anonymous, 4.0, 5.0);
    track.log_component_unmount(&tab, 6.0, 5.0);
    drop(track);

    assert_eq!(rec.names(), ["Mount", "Unmount", "Reconnect", "Disconnect"]);
    for span in rec.spans() {
        assert_eq!(span.category, Category::Component);
        assert_eq!(span.details.track, Some(Track::Components));
        assert_eq!(span.details.color, Some(Color::Warning));
        assert_eq!(span.details.tooltip.as_deref(), Some(span.name.as_str()));
        assert!(!span.error);
    }
    assert_eq!(rec.spans()[0].duration(), 0.0);
}

#[test]
fn interrupted_and_prewarm_labels() {
    let mut rec = RecorderSink::new();
    let mut track = dev(&mut rec);
    track.set_current_track_from_lanes(Lanes::IDLE);
    track.log_interrupted_render_phase(0.0, 1.0, Lanes::OFFSCREEN);
    track.log_interrupted_render_phase(1.0, 2.0, Lanes::DEFAULT_HYDRATION);
    track.log_interrupted_render_phase(2.0, 3.0, Lanes::IDLE);
    track.log_suspended_render_phase(3.0, 4.0, Lanes::IDLE);
    track.log_suspended_with_delay_phase(4.0, 5.0, Lanes::IDLE);
    drop(track);

    assert_eq!(
        rec.names(),
        [
            "Prewarm",
            "Interrupted Hydration",
            "Interrupted Render",
            "Prewarm",
            "Suspended",
        ]
    );
    for span in rec.spans() {
        assert_eq!(span.category, Category::Scheduler);
        assert_eq!(span.details.track, Some(Track::Idle));
        assert!(!span.error);
    }
}

#[test]
fn paint_and_view_transition_waits() {
    let mut rec = RecorderSink::new();
    let mut track = dev(&mut rec);
    track.set_current_track_from_lanes(Lanes::TRANSITIONS);
    track.log_suspended_view_transition_phase(0.0, 2.0, "Suspended on Images");
    track.log_paint_yield_phase(2.0, 3.0, false);
    track.log_start_view_transition_yield_phase(3.0, 4.0, true);
    drop(track);

    let spans = rec.spans();
    let summary: Vec<_> = spans
        .iter()
        .map(|s| (s.name.as_str(), s.details.color))
        .collect();
    assert_eq!(
        summary,
        [
            ("Suspended on Images", Some(Color::SecondaryLight)),
            ("Waiting", Some(Color::SecondaryLight)),
            ("Interrupted View Transition", Some(Color::Error)),
        ]
    );
    assert!(spans.iter().all(|s| s.details.track == Some(Track::Transition)));
    assert_eq!((spans[0].start, spans[0].end), (0.0, 2.0));
}

#[test]
fn suspense_boundary_error_is_a_hydration_failure() {
    let errors = [CapturedError::from("Hydration mismatch")];
    let boundary = Component {
        boundary: true,
        ..Component::mounted("Suspense", 2.0)
    };

    let mut rec = RecorderSink::new();
    let mut track = dev(&mut rec);
    track.log_component_errored(&boundary, 0.0, 2.0, &errors);
    drop(track);

    let span = &rec.spans()[0];
    assert_eq!(span.name, "Suspense");
    assert!(span.error);
    assert_eq!(span.details.tooltip.as_deref(), Some("Hydration failed"));
}
