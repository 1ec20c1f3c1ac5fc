//! Gamification ledger
//!
//! Points only accumulate; badges are a set, so awarding a badge twice is a
//! no-op for the badge (its points are still credited, as every submission
//! earns points).

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Title shown before the generated one arrives
pub const DEFAULT_TITLE: &str = "Explorer";

/// Badges earned while completing the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Badge {
    JourneyStarter,
    InsightfulInformant,
    GoalSetter,
    DigitalArchitect,
    ChallengeTackler,
    MasterStrategist,
}

impl Badge {
    /// Display name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::JourneyStarter => "Journey Starter",
            Self::InsightfulInformant => "Insightful Informant",
            Self::GoalSetter => "Goal Setter",
            Self::DigitalArchitect => "Digital Architect",
            Self::ChallengeTackler => "Challenge Tackler",
            Self::MasterStrategist => "Master Strategist",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::JourneyStarter => "Began your personalized journey to success.",
            Self::InsightfulInformant => "Provided key insights about your business.",
            Self::GoalSetter => "Defined clear and ambitious goals for the future.",
            Self::DigitalArchitect => "Selected your core digital marketing platforms.",
            Self::ChallengeTackler => "Identified and faced your primary challenges.",
            Self::MasterStrategist => {
                "Defined a complex strategy by setting 3+ goals and tackling 3+ challenges."
            }
        }
    }

    /// Points credited alongside the badge
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            Self::JourneyStarter => 50,
            Self::InsightfulInformant => 100,
            Self::GoalSetter | Self::DigitalArchitect => 150,
            Self::ChallengeTackler => 200,
            Self::MasterStrategist => 250,
        }
    }
}

impl Display for Badge {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Points, badges and title accumulated over a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamificationLedger {
    points: u32,
    badges: IndexSet<Badge>,
    title: String,
}

impl GamificationLedger {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit the badge's points and add the badge if not already held
    ///
    /// Returns `true` if the badge is new.
    pub fn award(&mut self, badge: Badge) -> bool {
        self.points = self.points.saturating_add(badge.points());
        self.badges.insert(badge)
    }

    #[inline]
    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Held badges in award order
    #[inline]
    #[must_use]
    pub fn badges(&self) -> &IndexSet<Badge> {
        &self.badges
    }

    #[inline]
    #[must_use]
    pub fn has(&self, badge: Badge) -> bool {
        self.badges.contains(&badge)
    }

    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}

impl Default for GamificationLedger {
    fn default() -> Self {
        Self {
            points: 0,
            badges: IndexSet::new(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}
