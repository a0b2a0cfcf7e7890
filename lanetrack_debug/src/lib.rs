// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for lanetrack spans.
//!
//! This crate provides [`TraceSink`](lanetrack_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`recorder::RecorderSink`] — keeps every span in memory, with a switch
//!   to stop tracking. Doubles as the spy sink in tests.
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-span output.
//! - [`chrome::export`] — writes Chrome Trace Event Format JSON from
//!   recorded spans.

pub mod chrome;
pub mod pretty;
pub mod recorder;

#[cfg(test)]
mod scenarios;
