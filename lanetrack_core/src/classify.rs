// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Duration-to-color classification.
//!
//! Each function is a monotonic step function over fixed thresholds. The
//! thresholds are exclusive upper bounds: a duration exactly on a threshold
//! falls into the next, more severe bucket. The last bucket is unbounded and
//! always [`Color::Error`].

use crate::lanes::Lanes;
use crate::trace::Color;

/// Render self-time thresholds, in milliseconds.
pub const RENDER_THRESHOLDS: [f64; 3] = [0.5, 10.0, 100.0];
/// Effect self-time thresholds, in milliseconds.
pub const EFFECT_THRESHOLDS: [f64; 3] = [1.0, 100.0, 500.0];
/// Yield thresholds, in milliseconds.
pub const YIELD_THRESHOLDS: [f64; 3] = [5.0, 10.0, 100.0];

/// Yields shorter than this are not worth a span.
pub const YIELD_NOISE_FLOOR: f64 = 3.0;

/// An update that waited longer than this before rendering is "blocked".
pub const BLOCKED_UPDATE_THRESHOLD: f64 = 5.0;

fn step(ms: f64, thresholds: [f64; 3], colors: [Color; 3]) -> Color {
    if ms < thresholds[0] {
        colors[0]
    } else if ms < thresholds[1] {
        colors[1]
    } else if ms < thresholds[2] {
        colors[2]
    } else {
        Color::Error
    }
}

/// Colors a component render by its self time.
///
/// Hydration work uses the tertiary family so the same duration reads as
/// less severe than foreground work.
#[must_use]
pub fn render_self_time(ms: f64, hydrated: bool) -> Color {
    let family = if hydrated {
        [Color::TertiaryLight, Color::Tertiary, Color::TertiaryDark]
    } else {
        [Color::PrimaryLight, Color::Primary, Color::PrimaryDark]
    };
    step(ms, RENDER_THRESHOLDS, family)
}

/// Colors a component effect by its self time.
#[must_use]
pub fn effect_time(ms: f64) -> Color {
    step(
        ms,
        EFFECT_THRESHOLDS,
        [Color::SecondaryLight, Color::Secondary, Color::SecondaryDark],
    )
}

/// Colors time spent yielded to the host.
#[must_use]
pub fn yield_time(ms: f64) -> Color {
    step(
        ms,
        YIELD_THRESHOLDS,
        [Color::PrimaryLight, Color::Primary, Color::PrimaryDark],
    )
}

/// Colors a render phase by the kind of lanes being rendered.
#[must_use]
pub fn render_phase(lanes: Lanes) -> Color {
    if lanes.is_hydration_or_offscreen_only() {
        Color::TertiaryDark
    } else {
        Color::PrimaryDark
    }
}

/// Colors the gap between scheduling an update and rendering it.
#[must_use]
pub fn update_gap(spawned: bool, lanes: Lanes) -> Color {
    if spawned {
        Color::Error
    } else if lanes.is_hydration_or_offscreen_only() {
        Color::TertiaryLight
    } else {
        Color::PrimaryLight
    }
}

/// Colors the gap between an input event and the update it caused.
#[must_use]
pub fn event_gap(repeat: bool) -> Color {
    if repeat {
        Color::SecondaryLight
    } else {
        Color::Warning
    }
}
