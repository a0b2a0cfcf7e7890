// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scheduler's priority-lane bitset.
//!
//! Each bit of [`Lanes`] is one class of pending update. Lower bits have
//! higher priority. The scheduler owns the bitset; this crate only reads it
//! to pick a track, a label, and a color family.
//!
//! # Layout
//!
//! ```text
//!   bit  0      SYNC_HYDRATION
//!   bit  1      SYNC
//!   bit  2      INPUT_CONTINUOUS_HYDRATION
//!   bit  3      INPUT_CONTINUOUS
//!   bit  4      DEFAULT_HYDRATION
//!   bit  5      DEFAULT
//!   bit  6      GESTURE
//!   bit  7      TRANSITION_HYDRATION
//!   bits 8..=21 TRANSITIONS
//!   bits 22..=25 RETRIES
//!   bit 26      SELECTIVE_HYDRATION
//!   bit 27      IDLE_HYDRATION
//!   bit 28      IDLE
//!   bit 29      OFFSCREEN
//!   bit 30      DEFERRED
//! ```

use core::fmt;
use core::ops::BitOr;

/// A set of scheduler priority lanes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Lanes(pub u32);

impl Lanes {
    /// The empty set.
    pub const NONE: Self = Self(0);

    /// Synchronous hydration.
    pub const SYNC_HYDRATION: Self = Self(1 << 0);
    /// Discrete, synchronous updates.
    pub const SYNC: Self = Self(1 << 1);
    /// Hydration for continuous input.
    pub const INPUT_CONTINUOUS_HYDRATION: Self = Self(1 << 2);
    /// Continuous input such as pointer moves.
    pub const INPUT_CONTINUOUS: Self = Self(1 << 3);
    /// Default-priority hydration.
    pub const DEFAULT_HYDRATION: Self = Self(1 << 4);
    /// Default-priority updates.
    pub const DEFAULT: Self = Self(1 << 5);
    /// Gesture-driven updates.
    pub const GESTURE: Self = Self(1 << 6);
    /// Hydration scheduled at transition priority.
    pub const TRANSITION_HYDRATION: Self = Self(1 << 7);
    /// All transition lanes.
    pub const TRANSITIONS: Self = Self(0b0000_0000_0011_1111_1111_1111_0000_0000);
    /// All retry lanes (suspended boundaries waiting to retry).
    pub const RETRIES: Self = Self(0b0000_0011_1100_0000_0000_0000_0000_0000);
    /// Hydration of a boundary the user interacted with.
    pub const SELECTIVE_HYDRATION: Self = Self(1 << 26);
    /// Idle-priority hydration.
    pub const IDLE_HYDRATION: Self = Self(1 << 27);
    /// Idle-priority updates.
    pub const IDLE: Self = Self(1 << 28);
    /// Work on hidden (offscreen) trees.
    pub const OFFSCREEN: Self = Self(1 << 29);
    /// Deferred values.
    pub const DEFERRED: Self = Self(1 << 30);

    /// Every hydration lane.
    pub const HYDRATION: Self = Self(
        Self::SYNC_HYDRATION.0
            | Self::INPUT_CONTINUOUS_HYDRATION.0
            | Self::DEFAULT_HYDRATION.0
            | Self::TRANSITION_HYDRATION.0
            | Self::SELECTIVE_HYDRATION.0
            | Self::IDLE_HYDRATION.0,
    );

    /// Lanes whose work shows up on the blocking track.
    pub const BLOCKING: Self = Self(
        Self::SYNC_HYDRATION.0
            | Self::SYNC.0
            | Self::INPUT_CONTINUOUS_HYDRATION.0
            | Self::INPUT_CONTINUOUS.0
            | Self::DEFAULT_HYDRATION.0
            | Self::DEFAULT.0,
    );

    /// Lanes whose work shows up on the idle track.
    pub const IDLE_GROUP: Self = Self(
        Self::SELECTIVE_HYDRATION.0
            | Self::IDLE_HYDRATION.0
            | Self::IDLE.0
            | Self::OFFSCREEN.0
            | Self::DEFERRED.0,
    );

    /// Returns `true` if no lane is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the two sets share at least one lane.
    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `true` if every lane in `self` is also in `other`.
    ///
    /// The empty set is a subset of everything.
    #[inline]
    #[must_use]
    pub const fn is_subset_of(self, other: Self) -> bool {
        self.0 & other.0 == self.0
    }

    /// Returns `true` if the set holds nothing but hydration work.
    #[inline]
    #[must_use]
    pub const fn is_hydration_only(self) -> bool {
        self.is_subset_of(Self::HYDRATION)
    }

    /// Returns `true` if the set holds nothing but offscreen work.
    #[inline]
    #[must_use]
    pub const fn is_offscreen_only(self) -> bool {
        self.is_subset_of(Self::OFFSCREEN)
    }

    /// Returns `true` if the set holds nothing but background work, meaning
    /// hydration or offscreen lanes.
    #[inline]
    #[must_use]
    pub const fn is_hydration_or_offscreen_only(self) -> bool {
        self.is_subset_of(Self(Self::HYDRATION.0 | Self::OFFSCREEN.0))
    }
}

impl BitOr for Lanes {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for Lanes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lanes({:#033b})", self.0)
    }
}
