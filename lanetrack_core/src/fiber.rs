// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What the reconciler tells us about a unit of work.
//!
//! The reconciler owns its tree; this crate never walks it. Per-component
//! loggers instead ask a [`Fiber`] for the handful of facts they need: the
//! display name, timings, the previous render's lanes, and (for the rich
//! annotator) a flattened prop diff.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::lanes::Lanes;
use crate::trace::Property;

/// Flattened result of diffing a component's previous and next props.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyDiff {
    /// One row per changed leaf, in traversal order.
    pub entries: Vec<Property>,
    /// `true` when every changed top-level prop was a new reference to a
    /// structurally identical value.
    pub deep_equal: bool,
}

/// A unit of work as seen by the per-component loggers.
pub trait Fiber {
    /// Human-readable component name, or `None` to skip this component.
    fn component_name(&self) -> Option<&str>;

    /// The component's key, if it has one.
    fn key(&self) -> Option<&str> {
        None
    }

    /// Whether this is a suspense boundary. Errors caught there are
    /// hydration failures rather than error-boundary catches.
    fn is_suspense_boundary(&self) -> bool {
        false
    }

    /// Time spent rendering this component and its subtree, in milliseconds.
    fn actual_duration(&self) -> f64;

    /// Whether the child list differs from the previous commit. When it does
    /// not, children were reused and their time is not part of
    /// [`actual_duration`](Self::actual_duration).
    ///
    /// Only consulted for updates. A mount has no previous commit, so its
    /// children are always treated as rendered with it.
    fn child_list_changed(&self) -> bool;

    /// Sum of the direct children's actual durations, in milliseconds.
    fn children_actual_duration(&self) -> f64;

    /// Lanes pending on the previous version of this component, or `None`
    /// when it is mounting.
    fn previous_lanes(&self) -> Option<Lanes>;

    /// Diffs the previous props against the current ones.
    ///
    /// Returns `None` when there is nothing to compare: a mount, or props
    /// that are the same reference as last time.
    fn diff_props(&self) -> Option<PropertyDiff>;

    /// Appends a flattened description of the current props.
    fn describe_props(&self, properties: &mut Vec<Property>) {
        _ = properties;
    }
}

/// Time spent in the component itself, excluding re-rendered children.
///
/// Children are subtracted on a mount, and on an update whose child list
/// changed since the last commit. The reconciler guarantees child identity is
/// stable otherwise.
#[must_use]
pub fn self_time<F: Fiber + ?Sized>(fiber: &F) -> f64 {
    let actual = fiber.actual_duration();
    if fiber.previous_lanes().is_none() || fiber.child_list_changed() {
        actual - fiber.children_actual_duration()
    } else {
        actual
    }
}

/// An error thrown by observed work and already caught by the host.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CapturedError {
    /// The error's message.
    pub message: String,
}

impl CapturedError {
    /// Captures the display form of any error value.
    #[must_use]
    pub fn new(error: &dyn fmt::Display) -> Self {
        use alloc::string::ToString;
        Self {
            message: error.to_string(),
        }
    }
}

impl From<&str> for CapturedError {
    fn from(message: &str) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for CapturedError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl fmt::Display for CapturedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
