// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timeline tracks.
//!
//! A [`Track`] is one horizontal row of the timeline. Scheduler phases land on
//! the track chosen by [`select_track`] from the lanes being rendered;
//! per-component spans land on [`Track::Components`].

use core::fmt;

use crate::lanes::Lanes;

/// A named row of the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Track {
    /// Sync, continuous-input and default-priority work.
    #[default]
    Blocking,
    /// Gesture-driven work.
    Gesture,
    /// Transitions.
    Transition,
    /// Retries of suspended boundaries.
    Suspense,
    /// Idle, offscreen and deferred work.
    Idle,
    /// Anything not covered above, including the empty lane set.
    Other,
    /// Per-component render and effect spans.
    Components,
}

impl Track {
    /// Every track, lane-derived ones first in priority order.
    pub const ALL: [Self; 7] = [
        Self::Blocking,
        Self::Gesture,
        Self::Transition,
        Self::Suspense,
        Self::Idle,
        Self::Other,
        Self::Components,
    ];

    /// Returns the name shown in the timeline.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocking => "Blocking",
            Self::Gesture => "Gesture",
            Self::Transition => "Transition",
            Self::Suspense => "Suspense",
            Self::Idle => "Idle",
            Self::Other => "Other",
            Self::Components => "Components \u{269b}",
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the track for a set of lanes.
///
/// The group of the highest-priority lane present decides. Pure: the same
/// lanes always select the same track.
#[must_use]
pub const fn select_track(lanes: Lanes) -> Track {
    if lanes.intersects(Lanes::BLOCKING) {
        Track::Blocking
    } else if lanes.intersects(Lanes::GESTURE) {
        Track::Gesture
    } else if lanes.intersects(Lanes(Lanes::TRANSITION_HYDRATION.0 | Lanes::TRANSITIONS.0)) {
        Track::Transition
    } else if lanes.intersects(Lanes::RETRIES) {
        Track::Suspense
    } else if lanes.intersects(Lanes::IDLE_GROUP) {
        Track::Idle
    } else {
        Track::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn highest_group_wins() {
        assert_eq!(select_track(Lanes::SYNC | Lanes::IDLE), Track::Blocking);
        assert_eq!(select_track(Lanes::GESTURE | Lanes::TRANSITIONS), Track::Gesture);
        assert_eq!(select_track(Lanes(1 << 12) | Lanes::RETRIES), Track::Transition);
        assert_eq!(select_track(Lanes(1 << 23)), Track::Suspense);
        assert_eq!(select_track(Lanes::OFFSCREEN), Track::Idle);
        assert_eq!(select_track(Lanes::DEFERRED), Track::Idle);
    }

    #[test]
    fn hydration_lanes_follow_their_priority() {
        assert_eq!(select_track(Lanes::DEFAULT_HYDRATION), Track::Blocking);
        assert_eq!(select_track(Lanes::TRANSITION_HYDRATION), Track::Transition);
        assert_eq!(select_track(Lanes::SELECTIVE_HYDRATION), Track::Idle);
    }

    #[test]
    fn empty_lanes_are_other() {
        assert_eq!(select_track(Lanes::NONE), Track::Other);
        assert_eq!(select_track(Lanes(1 << 31)), Track::Other);
    }

    #[test]
    fn selection_is_pure() {
        let lanes = Lanes::DEFAULT | Lanes::TRANSITIONS;
        let first = select_track(lanes);
        let _ = select_track(Lanes::GESTURE);
        let _ = select_track(Lanes::IDLE);
        assert_eq!(select_track(lanes), first);
    }

    #[test]
    fn every_lane_track_is_reachable() {
        let reached = [
            select_track(Lanes::SYNC),
            select_track(Lanes::GESTURE),
            select_track(Lanes::TRANSITIONS),
            select_track(Lanes::RETRIES),
            select_track(Lanes::IDLE),
            select_track(Lanes::NONE),
        ];
        assert_eq!(reached, Track::ALL[..6]);
        assert!(!reached.contains(&Track::Components));
    }

    #[test]
    fn names() {
        assert_eq!(Track::Blocking.as_str(), "Blocking");
        assert_eq!(Track::Transition.to_string(), "Transition");
    }
}
