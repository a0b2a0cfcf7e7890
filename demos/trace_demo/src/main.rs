// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated update lifecycles that exercise the phase loggers.
//!
//! Runs a handful of synthetic updates (a click, a cascading update, a
//! transition, a hydration with a recoverable error and a failing commit)
//! through a [`PerformanceTrack`] bound to a
//! [`RecorderSink`](lanetrack_debug::recorder::RecorderSink), replays the
//! recording into a [`PrettyPrintSink`](lanetrack_debug::pretty::PrettyPrintSink)
//! and exports a Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use lanetrack_core::config::TrackConfig;
use lanetrack_core::fiber::{CapturedError, Fiber, PropertyDiff};
use lanetrack_core::lanes::Lanes;
use lanetrack_core::performance::{PerformanceTrack, UpdateTiming};
use lanetrack_core::trace::{Property, TraceSink, Tracer};

use lanetrack_debug::pretty::PrettyPrintSink;
use lanetrack_debug::recorder::RecorderSink;

/// A component in the simulated tree.
struct SimComponent {
    name: &'static str,
    actual: f64,
    children: f64,
    previous_lanes: Option<Lanes>,
    deep_equal_props: bool,
}

impl SimComponent {
    const fn mount(name: &'static str, actual: f64, children: f64) -> Self {
        Self {
            name,
            actual,
            children,
            previous_lanes: None,
            deep_equal_props: false,
        }
    }

    const fn rerender(name: &'static str, actual: f64, children: f64, deep_equal: bool) -> Self {
        Self {
            name,
            actual,
            children,
            previous_lanes: Some(Lanes::NONE),
            deep_equal_props: deep_equal,
        }
    }
}

impl Fiber for SimComponent {
    fn component_name(&self) -> Option<&str> {
        Some(self.name)
    }

    fn actual_duration(&self) -> f64 {
        self.actual
    }

    fn child_list_changed(&self) -> bool {
        true
    }

    fn children_actual_duration(&self) -> f64 {
        self.children
    }

    fn previous_lanes(&self) -> Option<Lanes> {
        self.previous_lanes
    }

    fn diff_props(&self) -> Option<PropertyDiff> {
        self.previous_lanes?;
        let note = if self.deep_equal_props {
            "Referentially unequal but deeply equal objects."
        } else {
            "1 => 2"
        };
        Some(PropertyDiff {
            entries: vec![Property::new("style", note), Property::new("items", note)],
            deep_equal: self.deep_equal_props,
        })
    }

    fn describe_props(&self, properties: &mut Vec<Property>) {
        properties.push(Property::new("title", format!("\"{}\"", self.name)));
    }
}

/// Renders a parent and one child. Each component is logged on entering its
/// subtree, before its children are visited.
fn render_tree(
    track: &mut PerformanceTrack<'_>,
    parent: &SimComponent,
    child: &SimComponent,
    start: f64,
    lanes: Lanes,
    hydrated: bool,
) -> f64 {
    let end = start + parent.actual;
    let outer = track.push_deep_equality();
    track.log_component_render(parent, start, end, hydrated, lanes);
    let inner = track.push_deep_equality();
    let child_start = end - child.actual;
    track.log_component_render(child, child_start, end, hydrated, lanes);
    track.pop_deep_equality(inner);
    track.pop_deep_equality(outer);
    end
}

fn simulate(track: &mut PerformanceTrack<'_>) {
    // 1. A click that renders synchronously.
    track.mark_all_lanes_in_order();
    track.log_blocking_start(&UpdateTiming {
        event_time: 100.0,
        event_type: Some("click"),
        update_time: 101.5,
        render_start_time: 103.0,
        lanes: Lanes::SYNC,
        update_method_name: Some("setState"),
        update_component_name: Some("Counter"),
        ..UpdateTiming::default()
    });
    let app = SimComponent::mount("App", 6.0, 4.0);
    let counter = SimComponent::mount("Counter", 4.0, 0.0);
    let end = render_tree(track, &app, &counter, 103.0, Lanes::SYNC, false);
    track.log_render_phase(103.0, end, Lanes::SYNC);
    track.log_component_mount(&counter, end, end + 0.2);
    track.log_commit_phase(end, end + 1.0, None, false);
    track.log_component_effect(&counter, end + 1.0, end + 1.4, 0.4, None);
    track.log_paint_yield_phase(end + 1.4, end + 4.0, true);
    track.log_passive_commit_phase(end + 4.0, end + 5.0, None);

    // 2. An effect schedules another update: a cascade.
    track.mark_all_lanes_in_order();
    track.log_blocking_start(&UpdateTiming {
        update_time: 114.0,
        render_start_time: 121.0,
        is_spawned_update: true,
        lanes: Lanes::SYNC,
        update_method_name: Some("setState"),
        update_component_name: Some("Layout"),
        ..UpdateTiming::default()
    });
    let layout = SimComponent::rerender("Layout", 160.0, 20.0, true);
    let sidebar = SimComponent::rerender("Sidebar", 20.0, 0.0, true);
    let end = render_tree(track, &layout, &sidebar, 121.0, Lanes::SYNC, false);
    track.log_render_phase(121.0, end, Lanes::SYNC);
    track.log_commit_phase(end, end + 2.0, None, false);
    track.log_yield_time(end + 2.0, end + 14.0);

    // 3. A transition that awaits an action and gets interrupted once.
    track.mark_all_lanes_in_order();
    track.log_transition_start(
        300.0,
        &UpdateTiming {
            event_time: 298.0,
            event_type: Some("submit"),
            update_time: 340.0,
            render_start_time: 352.0,
            lanes: Lanes::TRANSITIONS,
            ..UpdateTiming::default()
        },
    );
    track.log_interrupted_render_phase(352.0, 360.0, Lanes::TRANSITIONS);
    track.log_action_yield_time(360.0, 372.0);
    let results = SimComponent::rerender("Results", 30.0, 12.0, false);
    let row = SimComponent::mount("Row", 12.0, 0.0);
    let end = render_tree(track, &results, &row, 372.0, Lanes::TRANSITIONS, false);
    track.log_render_phase(372.0, end, Lanes::TRANSITIONS);
    track.log_suspended_commit_phase(end, end + 6.0, "Suspended on CSS");
    track.log_commit_phase(end + 6.0, end + 8.0, None, false);
    track.log_start_view_transition_yield_phase(end + 8.0, end + 9.0, false);
    track.log_animating_phase(end + 9.0, end + 250.0);

    // 4. Hydration that recovers from a mismatch, then a failing commit.
    track.mark_all_lanes_in_order();
    track.set_current_track_from_lanes(Lanes::DEFAULT_HYDRATION);
    let mismatch = [CapturedError::from("Hydration failed because the server HTML did not match.")];
    track.log_render_phase(700.0, 712.0, Lanes::DEFAULT_HYDRATION);
    track.log_recovered_render_phase(712.0, 730.0, &mismatch, true);
    let shell = SimComponent::mount("Shell", 9.0, 3.0);
    let nav = SimComponent::mount("Nav", 3.0, 0.0);
    let end = render_tree(track, &shell, &nav, 730.0, Lanes::DEFAULT_HYDRATION, true);
    let failure = [CapturedError::from("Cannot read properties of null (reading 'focus')")];
    track.log_component_errored(&nav, end, end + 0.5, &failure);
    track.log_commit_phase(end + 0.5, end + 2.0, Some(&failure), false);
}

fn main() {
    // -- record ------------------------------------------------------------
    let mut recorder = RecorderSink::new();
    {
        let mut track = PerformanceTrack::new(Tracer::new(&mut recorder), TrackConfig::development());
        simulate(&mut track);
    }

    // -- pretty-print ------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    for span in recorder.spans() {
        pretty.create_finished_span(&span.as_finished());
    }

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    lanetrack_debug::chrome::export(recorder.spans(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({} spans)", recorder.spans().len());
}
