//! Dashboard rendering contract
//!
//! The dashboard has one region per part. Each region starts in
//! [`RegionState::Loading`] and moves to [`RegionState::Ready`] when its part
//! arrives, independently of every other region. A region whose part never
//! arrives stays loading for the rest of the cycle.

use strategist_core::{AggregateFailure, PartContent, PartKey, PartialReport};

/// What a dashboard region shows
#[derive(Debug, Clone, PartialEq)]
pub enum RegionState {
    Loading,
    Ready(PartContent),
}

impl RegionState {
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Current state of every region, in request order
#[must_use]
pub fn regions(report: &PartialReport) -> Vec<(PartKey, RegionState)> {
    PartKey::ALL
        .into_iter()
        .map(|part| {
            let state = report
                .get(part)
                .map_or(RegionState::Loading, |c| RegionState::Ready(c.clone()));
            (part, state)
        })
        .collect()
}

/// Receives dashboard updates
///
/// Calls for one cycle come in this order: `cycle_started`, then any mix of
/// `region_ready` (at most once per part), then at most one of
/// `actions_enabled` or `all_failed`.
#[cfg_attr(test, mockall::automock)]
pub trait DashboardRenderer: Send {
    /// New cycle; every region is loading and actions are disabled
    fn cycle_started(&mut self) {}

    /// One region switched from loading to its content
    fn region_ready(&mut self, part: PartKey, content: &PartContent);

    /// Every part arrived; export and booking become available
    fn actions_enabled(&mut self) {}

    /// Nothing arrived; show the persistent error banner
    fn all_failed(&mut self, failure: &AggregateFailure);
}

/// Renderer that ignores every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl DashboardRenderer for NullRenderer {
    fn region_ready(&mut self, _part: PartKey, _content: &PartContent) {}

    fn all_failed(&mut self, _failure: &AggregateFailure) {}
}
