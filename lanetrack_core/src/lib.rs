// Copyright 2026 the Lanetrack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Span instrumentation for a priority-lane render scheduler.
//!
//! `lanetrack_core` turns the scheduler's phase transitions (update scheduled,
//! render started, interrupted, suspended, recovered, errored, commit, paint,
//! animation, yields) into finished, named, colored spans for a timeline
//! viewer. It is `no_std` compatible (with `alloc`) and costs a single branch
//! per call when nothing is listening.
//!
//! # Architecture
//!
//! ```text
//!   Scheduler work loop
//!       │  raw timestamps, lanes, fiber facts
//!       ▼
//!   PerformanceTrack::log_*() ──► clamp / classify / annotate
//!                                         │
//!                 ┌───────────────────────┘
//!                 ▼
//!   Tracer::finished_span() ──► TraceSink::create_finished_span()
//! ```
//!
//! **[`performance`]** — The [`PerformanceTrack`](performance::PerformanceTrack)
//! context. One method per scheduler phase; owns the current track and the
//! deep-equality cascade flag.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait, span payload types,
//! and the zero-overhead [`Tracer`](trace::Tracer) binding.
//!
//! **[`lanes`]** — The scheduler's priority-lane bitset and its predicates.
//!
//! **[`track`]** — Maps lanes to the named timeline track.
//!
//! **[`classify`]** — Duration-to-color step functions.
//!
//! **[`annotate`]** — Rich and minimal span annotators.
//!
//! **[`cascade`]** — Save/restore discipline for the deep-equality warning.
//!
//! **[`fiber`]** — What the reconciler must tell us about a unit of work.
//!
//! **[`time`]** — Timestamp clamping for the update span chain.
//!
//! **[`config`]** — Runtime switches for timing support and issue reporting.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site). Without it every logger compiles to nothing.
//! - `trace-rich` (disabled by default, implies `trace`): Makes
//!   [`RichAnnotator`](annotate::RichAnnotator) the default annotator, adding
//!   prop diffs, error messages and update origins to spans.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod annotate;
pub mod cascade;
pub mod classify;
pub mod config;
pub mod fiber;
pub mod id;
pub mod lanes;
pub mod performance;
pub mod time;
pub mod trace;
pub mod track;
