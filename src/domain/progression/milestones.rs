//! Streak milestones unlocked by consecutive training sessions.

use serde::{Deserialize, Serialize};

/// Badge unlocked once the streak reaches `days()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StreakMilestone {
    Semente,
    Energia,
    Escudo,
    Mestre,
}

impl StreakMilestone {
    /// Milestones in unlock order.
    pub const ALL: [StreakMilestone; 4] = [
        StreakMilestone::Semente,
        StreakMilestone::Energia,
        StreakMilestone::Escudo,
        StreakMilestone::Mestre,
    ];

    /// Streak length required to unlock.
    pub fn days(&self) -> u32 {
        match self {
            StreakMilestone::Semente => 3,
            StreakMilestone::Energia => 7,
            StreakMilestone::Escudo => 15,
            StreakMilestone::Mestre => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StreakMilestone::Semente => "Semente",
            StreakMilestone::Energia => "Energia",
            StreakMilestone::Escudo => "Escudo",
            StreakMilestone::Mestre => "Mestre",
        }
    }

    pub fn is_unlocked(&self, streak: u32) -> bool {
        streak >= self.days()
    }
}

/// All milestones reached at this streak length.
pub fn reached_milestones(streak: u32) -> Vec<StreakMilestone> {
    StreakMilestone::ALL
        .into_iter()
        .filter(|m| m.is_unlocked(streak))
        .collect()
}

/// The next milestone still locked, if any.
pub fn next_milestone(streak: u32) -> Option<StreakMilestone> {
    StreakMilestone::ALL
        .into_iter()
        .find(|m| !m.is_unlocked(streak))
}

/// Visual intensity of the streak badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StreakTier {
    Spark,
    Charged,
    Blazing,
}

impl StreakTier {
    pub fn for_streak(streak: u32) -> Self {
        match streak {
            30.. => StreakTier::Blazing,
            7.. => StreakTier::Charged,
            _ => StreakTier::Spark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_reached_at_zero() {
        assert!(reached_milestones(0).is_empty());
        assert_eq!(next_milestone(0), Some(StreakMilestone::Semente));
    }

    #[test]
    fn milestones_unlock_at_thresholds() {
        assert_eq!(reached_milestones(3), vec![StreakMilestone::Semente]);
        assert_eq!(
            reached_milestones(15),
            vec![
                StreakMilestone::Semente,
                StreakMilestone::Energia,
                StreakMilestone::Escudo
            ]
        );
        assert_eq!(next_milestone(15), Some(StreakMilestone::Mestre));
    }

    #[test]
    fn no_next_milestone_after_mestre() {
        assert_eq!(reached_milestones(45).len(), 4);
        assert_eq!(next_milestone(30), None);
    }

    #[test]
    fn tier_follows_streak_length() {
        assert_eq!(StreakTier::for_streak(0), StreakTier::Spark);
        assert_eq!(StreakTier::for_streak(6), StreakTier::Spark);
        assert_eq!(StreakTier::for_streak(7), StreakTier::Charged);
        assert_eq!(StreakTier::for_streak(30), StreakTier::Blazing);
    }
}
