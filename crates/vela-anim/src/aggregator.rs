//! Completion aggregation.
//!
//! A runner dispatches N merged entries and receives N independent
//! completion callbacks; the aggregator folds them into one terminal
//! [`PlayOutcome`]. Counters only increase, and once a resolution has been
//! produced every later callback is ignored.
//!
//! Sequential runs resolve on the first cancellation (remaining entries are
//! never dispatched) or when the final entry finishes. Parallel runs resolve
//! on the completion that brings a counter to N — all finished means
//! `Finished`, anything less at full completion means `Cancelled`.

use crate::outcome::PlayOutcome;
use crate::types::Playback;

/// Counts per-entry completions and resolves the overall outcome once.
#[derive(Debug)]
pub struct CompletionAggregator {
    mode: Playback,
    total: usize,
    finished: usize,
    cancelled: usize,
    resolved: bool,
}

impl CompletionAggregator {
    pub fn new(total: usize, mode: Playback) -> Self {
        Self {
            mode,
            total,
            finished: 0,
            cancelled: 0,
            resolved: false,
        }
    }

    pub fn finished(&self) -> usize {
        self.finished
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled
    }

    /// Record one finished entry; returns the overall outcome if this
    /// completion resolves it.
    pub fn entry_finished(&mut self) -> Option<PlayOutcome> {
        if self.resolved {
            return None;
        }
        self.finished += 1;
        let outcome = match self.mode {
            Playback::Sequential => (self.finished == self.total).then_some(PlayOutcome::Finished),
            Playback::Parallel => self.parallel_resolution(),
        };
        self.resolved = outcome.is_some();
        outcome
    }

    /// Record one cancelled entry; returns the overall outcome if this
    /// completion resolves it.
    pub fn entry_cancelled(&mut self) -> Option<PlayOutcome> {
        if self.resolved {
            return None;
        }
        self.cancelled += 1;
        let outcome = match self.mode {
            // Any cancellation ends a sequential run.
            Playback::Sequential => Some(PlayOutcome::Cancelled),
            Playback::Parallel => self.parallel_resolution(),
        };
        self.resolved = outcome.is_some();
        outcome
    }

    fn parallel_resolution(&self) -> Option<PlayOutcome> {
        if self.finished == self.total {
            Some(PlayOutcome::Finished)
        } else if self.finished + self.cancelled == self.total {
            // All entries completed but not all finished; a partially
            // cancelled run is a cancelled run.
            Some(PlayOutcome::Cancelled)
        } else {
            None
        }
    }
}
