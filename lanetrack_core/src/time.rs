// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timestamp clamping for the update span chain.
//!
//! All timestamps are `f64` milliseconds on the host's high-resolution clock.
//! A value `<= 0.0` means the host never recorded that moment.
//!
//! The scheduler records the stages of an update independently, so they can
//! arrive missing or out of order. [`UpdateChain`] pulls every earlier stage
//! back so that
//!
//! ```text
//!   event <= transition start <= update <= render start
//! ```
//!
//! always holds. A missing stage collapses onto the next later one, which
//! turns its span into a zero-width range that loggers then skip.

/// Clamps `time` so that it never comes after `bound`.
///
/// Missing (`<= 0.0`) or NaN times collapse onto `bound`.
#[inline]
#[must_use]
pub fn clamp_before(time: f64, bound: f64) -> f64 {
    if time > 0.0 {
        if time > bound { bound } else { time }
    } else {
        bound
    }
}

/// Returns `true` when `start..end` covers a positive amount of time.
#[inline]
#[must_use]
pub fn has_extent(start: f64, end: f64) -> bool {
    end > start
}

/// Converts milliseconds to microseconds.
#[inline]
#[must_use]
pub fn ms_to_us(ms: f64) -> f64 {
    ms * 1000.0
}

/// Causally ordered timestamps for the origin of one update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdateChain {
    /// When the triggering event happened.
    pub event: f64,
    /// When an async transition started. Equals `update` for non-transitions.
    pub start: f64,
    /// When the update was scheduled.
    pub update: f64,
    /// When rendering began.
    pub render_start: f64,
}

impl UpdateChain {
    /// Clamps a blocking or gesture update.
    #[must_use]
    pub fn new(event: f64, update: f64, render_start: f64) -> Self {
        let update = clamp_before(update, render_start);
        let event = clamp_before(event, update);
        Self {
            event,
            start: update,
            update,
            render_start,
        }
    }

    /// Clamps a transition, which has an extra action stage between the event
    /// and the update.
    #[must_use]
    pub fn transition(event: f64, start: f64, update: f64, render_start: f64) -> Self {
        let update = clamp_before(update, render_start);
        let start = clamp_before(start, update);
        let event = clamp_before(event, start);
        Self {
            event,
            start,
            update,
            render_start,
        }
    }
}
