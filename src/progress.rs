//! # Progress Reporting
//!
//! A publish run is split into named phases, each with its own counters.
//! Phases update their [`PhaseProgress`] through a [`ProgressReporter`],
//! which stores the new value and immediately pushes the whole
//! [`ProgressMap`] to a [`ProgressSink`].
//!
//! The reporter does not enforce phase ordering. Callers move a phase from
//! `NOT_STARTED` to `IN_PROGRESS` to `FINISHED` themselves.
//!
//! Pushes are synchronous: a slow sink slows the publish down.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::report::ErrorDetail;

/// A named stage of a publish run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Packages,
    Distribution,
    Metadata,
    PublishHttp,
    PublishHttps,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Packages,
        Phase::Distribution,
        Phase::Metadata,
        Phase::PublishHttp,
        Phase::PublishHttps,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Packages => "packages",
            Phase::Distribution => "distribution",
            Phase::Metadata => "metadata",
            Phase::PublishHttp => "publish_http",
            Phase::PublishHttps => "publish_https",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseState {
    #[default]
    NotStarted,
    InProgress,
    Finished,
}

/// Counters for one phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseProgress {
    pub state: PhaseState,
    pub num_success: usize,
    pub num_error: usize,
    pub items_left: usize,
    pub items_total: usize,
    pub error_details: Vec<ErrorDetail>,
}

impl PhaseProgress {
    pub fn not_started() -> Self {
        Self::default()
    }

    /// A freshly started phase with `total` items to go
    pub fn in_progress(total: usize) -> Self {
        Self {
            state: PhaseState::InProgress,
            items_left: total,
            items_total: total,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self) {
        self.num_success += 1;
        self.items_left = self.items_left.saturating_sub(1);
    }

    pub fn record_error(&mut self, detail: ErrorDetail) {
        self.num_error += 1;
        self.items_left = self.items_left.saturating_sub(1);
        self.error_details.push(detail);
    }

    pub fn finish(&mut self) {
        self.state = PhaseState::Finished;
    }

    pub fn is_finished(&self) -> bool {
        self.state == PhaseState::Finished
    }
}

/// Progress of every phase, keyed by phase name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap(BTreeMap<Phase, PhaseProgress>);

impl Default for ProgressMap {
    fn default() -> Self {
        Self(
            Phase::ALL
                .iter()
                .map(|phase| (*phase, PhaseProgress::not_started()))
                .collect(),
        )
    }
}

impl ProgressMap {
    pub fn get(&self, phase: Phase) -> Option<&PhaseProgress> {
        self.0.get(&phase)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Phase, &PhaseProgress)> {
        self.0.iter().map(|(phase, progress)| (*phase, progress))
    }
}

/// Receiver of progress snapshots
pub trait ProgressSink {
    fn set_progress(&mut self, progress: &ProgressMap);
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressMap),
{
    fn set_progress(&mut self, progress: &ProgressMap) {
        self(progress)
    }
}

/// A sink that discards every snapshot
#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn set_progress(&mut self, _progress: &ProgressMap) {}
}

/// Holds the progress of a run and forwards every change to a sink
pub struct ProgressReporter<'a> {
    progress: ProgressMap,
    sink: &'a mut dyn ProgressSink,
}

impl<'a> ProgressReporter<'a> {
    /// A reporter with every phase `NOT_STARTED`
    pub fn new(sink: &'a mut dyn ProgressSink) -> Self {
        Self {
            progress: ProgressMap::default(),
            sink,
        }
    }

    /// Replace the progress of `phase` and push the full map to the sink
    pub fn update(&mut self, phase: Phase, progress: PhaseProgress) {
        self.progress.0.insert(phase, progress);
        self.sink.set_progress(&self.progress);
    }

    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    pub fn phase(&self, phase: Phase) -> Option<&PhaseProgress> {
        self.progress.get(phase)
    }
}

impl fmt::Debug for ProgressReporter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}
