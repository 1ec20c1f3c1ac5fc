//! Wizard steps
//!
//! Six states, traversed one at a time. `next` stops at the dashboard and
//! `previous` never returns to the welcome screen once it has been left.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use strategist_core::Badge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    #[default]
    Welcome,
    BasicInfo,
    Goals,
    Platforms,
    Challenges,
    Dashboard,
}

impl WizardStep {
    pub const ALL: [Self; 6] = [
        Self::Welcome,
        Self::BasicInfo,
        Self::Goals,
        Self::Platforms,
        Self::Challenges,
        Self::Dashboard,
    ];

    /// Position in the sequence, 0 to 5
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Following step; the dashboard is terminal
    #[must_use]
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(Self::Dashboard)
    }

    /// Preceding step; no-op at or below basic info
    #[must_use]
    pub fn previous(self) -> Self {
        if self.index() <= Self::BasicInfo.index() {
            self
        } else {
            Self::ALL[self.index() - 1]
        }
    }

    /// Badge earned by submitting this step
    #[must_use]
    pub fn completion_badge(self) -> Option<Badge> {
        match self {
            Self::Welcome => Some(Badge::JourneyStarter),
            Self::BasicInfo => Some(Badge::InsightfulInformant),
            Self::Goals => Some(Badge::GoalSetter),
            Self::Platforms => Some(Badge::DigitalArchitect),
            Self::Challenges => Some(Badge::ChallengeTackler),
            Self::Dashboard => None,
        }
    }
}

impl Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Welcome => "welcome",
            Self::BasicInfo => "basic info",
            Self::Goals => "goals",
            Self::Platforms => "platforms",
            Self::Challenges => "challenges",
            Self::Dashboard => "dashboard",
        };
        f.write_str(name)
    }
}
