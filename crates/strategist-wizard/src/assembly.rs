//! Report assembly state
//!
//! Holds the partial report of exactly one aggregation cycle. Events carry
//! the [`CycleId`] that produced them; anything tagged with another cycle is
//! discarded, so a cycle abandoned by navigating away can never write into
//! its successor's report.
//!
//! The first merge that completes the report freezes a
//! [`CompletionSnapshot`]; export and booking read that snapshot only.

use chrono::{DateTime, Utc};
use strategist_aggregation::{AggregationEvent, CycleId, EventKind};
use strategist_core::{AggregateFailure, AggregationOutcome, PartContent, PartKey, PartialReport};

/// Full report captured when the eighth part arrived
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSnapshot {
    pub cycle: CycleId,
    pub report: PartialReport,
    pub completed_at: DateTime<Utc>,
}

/// Effect of applying one event
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// Event belongs to another cycle; nothing changed
    Stale { event_cycle: CycleId },
    /// Part inserted; `completed` is true if this merge completed the report
    Merged {
        part: PartKey,
        content: PartContent,
        completed: bool,
    },
    /// Part already present; nothing changed
    Duplicate(PartKey),
    /// Terminal failure recorded
    AllFailed(AggregateFailure),
}

/// Cycle-tagged partial report
#[derive(Debug, Clone)]
pub struct ReportAssembly {
    cycle: CycleId,
    report: PartialReport,
    failure: Option<AggregateFailure>,
    snapshot: Option<CompletionSnapshot>,
}

impl ReportAssembly {
    /// Empty assembly bound to `cycle`
    #[must_use]
    pub fn new(cycle: CycleId) -> Self {
        Self {
            cycle,
            report: PartialReport::new(),
            failure: None,
            snapshot: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn cycle(&self) -> CycleId {
        self.cycle
    }

    #[inline]
    #[must_use]
    pub fn report(&self) -> &PartialReport {
        &self.report
    }

    #[inline]
    #[must_use]
    pub fn failure(&self) -> Option<&AggregateFailure> {
        self.failure.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.report.is_complete()
    }

    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Option<&CompletionSnapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn outcome(&self) -> AggregationOutcome {
        AggregationOutcome::classify(&self.report, self.failure.as_ref())
    }

    /// Apply an event if it belongs to this cycle
    pub fn apply(&mut self, event: AggregationEvent) -> Applied {
        if event.cycle != self.cycle {
            tracing::debug!(
                "Discarding event from cycle {} (current {})",
                event.cycle,
                self.cycle
            );
            return Applied::Stale {
                event_cycle: event.cycle,
            };
        }

        match event.kind {
            EventKind::PartArrived(content) => self.merge(content),
            EventKind::AllFailed(failure) => {
                self.failure = Some(failure.clone());
                Applied::AllFailed(failure)
            }
        }
    }

    /// Insert a part if absent
    pub fn merge(&mut self, content: PartContent) -> Applied {
        let part = content.key();
        if !self.report.merge(content.clone()).is_inserted() {
            return Applied::Duplicate(part);
        }

        let completed = self.report.is_complete() && self.snapshot.is_none();
        if completed {
            self.snapshot = Some(CompletionSnapshot {
                cycle: self.cycle,
                report: self.report.clone(),
                completed_at: Utc::now(),
            });
        }

        Applied::Merged {
            part,
            content,
            completed,
        }
    }
}
