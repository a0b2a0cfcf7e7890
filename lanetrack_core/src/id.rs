// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Span identification.
//!
//! [`SpanId`] is the handle a sink returns for every span it accepts. Sinks
//! assign these; core passes them back to the caller without interpreting
//! the value.

use core::fmt;

/// Identifies a span inside one sink.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SpanId(pub u64);

impl SpanId {
    /// Returned by sinks that do not track individual spans.
    pub const NONE: Self = Self(0);
}

impl fmt::Debug for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpanId({})", self.0)
    }
}
