// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime switches for a [`PerformanceTrack`](crate::performance::PerformanceTrack).
//!
//! Which annotator runs is a compile-time choice (the `trace-rich` feature);
//! everything here is decided by the host once, at construction.

/// Runtime configuration for the phase loggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TrackConfig {
    /// Whether the host clock supports user timing. When `false`, every
    /// logger is a no-op even with a tracking sink attached.
    pub timing_supported: bool,
    /// Whether cascading updates carry a
    /// [`PerformanceIssue`](crate::trace::PerformanceIssue).
    pub report_performance_issues: bool,
}

impl TrackConfig {
    /// Configuration for development builds: everything on.
    #[must_use]
    pub const fn development() -> Self {
        Self {
            timing_supported: true,
            report_performance_issues: true,
        }
    }

    /// Configuration for production builds: timing on, no issue reporting.
    #[must_use]
    pub const fn production() -> Self {
        Self {
            timing_supported: true,
            report_performance_issues: false,
        }
    }

    /// Returns a copy with timing support set to `supported`.
    #[must_use]
    pub const fn with_timing_supported(mut self, supported: bool) -> Self {
        self.timing_supported = supported;
        self
    }
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self::development()
    }
}
