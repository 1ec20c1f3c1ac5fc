//! Partial report
//!
//! Parts arrive out of order and at most once per cycle. The report is a
//! monotone map: an entry is inserted when its part first arrives and is never
//! removed or replaced. That makes [`PartialReport::merge`] idempotent and
//! commutative, so the final report does not depend on arrival order.

use crate::part::{
    BudgetShare, CustomerPersona, GamificationTitle, GoalRecommendation, KpiProjection,
    PartContent, PartKey, SwotAnalysis, TimelineMilestone,
};
use std::collections::BTreeMap;

/// Result of merging one part into the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Part was absent and is now present
    Inserted,
    /// Part was already present; the report is unchanged
    AlreadyPresent {
        /// Whether the rejected content equals what is stored
        equivalent: bool,
    },
}

impl MergeOutcome {
    #[inline]
    #[must_use]
    pub fn is_inserted(self) -> bool {
        matches!(self, Self::Inserted)
    }
}

/// Report accumulated from the parts that have arrived so far
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialReport {
    parts: BTreeMap<PartKey, PartContent>,
}

impl PartialReport {
    /// Empty report
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `content` if its part is absent
    pub fn merge(&mut self, content: PartContent) -> MergeOutcome {
        let key = content.key();
        match self.parts.get(&key) {
            Some(existing) => MergeOutcome::AlreadyPresent {
                equivalent: *existing == content,
            },
            None => {
                self.parts.insert(key, content);
                MergeOutcome::Inserted
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, key: PartKey) -> Option<&PartContent> {
        self.parts.get(&key)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, key: PartKey) -> bool {
        self.parts.contains_key(&key)
    }

    /// Number of parts present
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// True iff all eight parts are present
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.parts.len() == PartKey::COUNT
    }

    /// Parts not yet present, in request order
    #[must_use]
    pub fn missing(&self) -> Vec<PartKey> {
        PartKey::ALL
            .into_iter()
            .filter(|k| !self.parts.contains_key(k))
            .collect()
    }

    /// Present parts in key order
    pub fn iter(&self) -> impl Iterator<Item = (PartKey, &PartContent)> {
        self.parts.iter().map(|(k, v)| (*k, v))
    }

    #[must_use]
    pub fn executive_summary(&self) -> Option<&str> {
        match self.get(PartKey::ExecutiveSummary) {
            Some(PartContent::ExecutiveSummary(text)) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn goal_recommendations(&self) -> Option<&[GoalRecommendation]> {
        match self.get(PartKey::GoalRecommendations) {
            Some(PartContent::GoalRecommendations(v)) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn swot_analysis(&self) -> Option<&SwotAnalysis> {
        match self.get(PartKey::SwotAnalysis) {
            Some(PartContent::SwotAnalysis(v)) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn customer_persona(&self) -> Option<&CustomerPersona> {
        match self.get(PartKey::CustomerPersona) {
            Some(PartContent::CustomerPersona(v)) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn timeline(&self) -> Option<&[TimelineMilestone]> {
        match self.get(PartKey::Timeline) {
            Some(PartContent::Timeline(v)) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn kpi_projections(&self) -> Option<&[KpiProjection]> {
        match self.get(PartKey::KpiProjections) {
            Some(PartContent::KpiProjections(v)) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn budget_allocation(&self) -> Option<&[BudgetShare]> {
        match self.get(PartKey::BudgetAllocation) {
            Some(PartContent::BudgetAllocation(v)) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn gamification(&self) -> Option<&GamificationTitle> {
        match self.get(PartKey::Gamification) {
            Some(PartContent::Gamification(v)) => Some(v),
            _ => None,
        }
    }
}

/// Why a single part did not arrive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartFailure {
    pub part: PartKey,
    pub reason: String,
}

/// Terminal failure of a cycle in which no part arrived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateFailure {
    pub failures: Vec<PartFailure>,
}

impl AggregateFailure {
    /// Individual reasons joined with `"; "`
    #[must_use]
    pub fn combined_reasons(&self) -> String {
        self.failures
            .iter()
            .map(|f| f.reason.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl std::fmt::Display for AggregateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.combined_reasons())
    }
}

/// State of an aggregation cycle as seen from the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationOutcome {
    /// Nothing has arrived and the cycle has not settled
    Pending,
    /// Every part failed; terminal
    AllFailed(AggregateFailure),
    /// Some parts present; the rest may still arrive or may never
    Partial,
    /// All eight parts present
    Complete,
}

impl AggregationOutcome {
    /// Derive the outcome from the report and the cycle's terminal failure, if any
    #[must_use]
    pub fn classify(report: &PartialReport, failure: Option<&AggregateFailure>) -> Self {
        if report.is_complete() {
            Self::Complete
        } else if !report.is_empty() {
            Self::Partial
        } else if let Some(failure) = failure {
            Self::AllFailed(failure.clone())
        } else {
            Self::Pending
        }
    }
}
