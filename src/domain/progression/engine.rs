//! ProgressionEngine - turns user events into new `UserStats` snapshots.
//!
//! Every operation takes the previous snapshot by reference and returns a
//! fresh one. Nothing is mutated in place and the engine keeps no state of
//! its own beyond immutable policy, so applying the same event to the same
//! snapshot always yields the same result.
//!
//! # Rewards
//!
//! | Event              | clarity | consistency | diversification | progress | education | streak |
//! |--------------------|---------|-------------|-----------------|----------|-----------|--------|
//! | training completed | +8      | +3          | recomputed      | +2       | +2        | +1     |
//! | challenge completed| -       | -           | -               | +3       | +5        | -      |
//! | alert `add`        | +1      | -           | -               | +2       | -         | -      |
//!
//! All increments are capped per sub-metric; the total is then recomputed.

use serde::{Deserialize, Serialize};

use super::errors::ProgressionError;
use super::score::{self, ConfidenceScore, SubMetric};
use super::stats::{FinancialsDelta, Investments, UserStats};
use crate::domain::alerts::AlertAction;
use crate::domain::foundation::Amount;

const TRAINING_CLARITY: u32 = 8;
const TRAINING_CONSISTENCY: u32 = 3;
const TRAINING_EDUCATION: u32 = 2;
const TRAINING_PROGRESS: u32 = 2;

const CHALLENGE_EDUCATION: u32 = 5;
const CHALLENGE_PROGRESS: u32 = 3;

const ALERT_ADD_PROGRESS: u32 = 2;
const ALERT_ADD_CLARITY: u32 = 1;

/// Diversification points per asset class held.
const DIVERSIFICATION_PER_CLASS: u32 = 10;

/// Amount moved into Tesouro by the `add` alert action.
pub const ALERT_TOP_UP: Amount = Amount::from_whole(500);

/// What to do with an alert action token the engine does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownAlertActionPolicy {
    /// Leave the stats untouched.
    #[default]
    Ignore,
    /// Fail with [`ProgressionError::UnrecognizedAlertAction`].
    Reject,
}

/// Applies domain events to `UserStats` snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressionEngine {
    unknown_action_policy: UnknownAlertActionPolicy,
}

impl ProgressionEngine {
    pub fn new(unknown_action_policy: UnknownAlertActionPolicy) -> Self {
        Self {
            unknown_action_policy,
        }
    }

    pub fn unknown_action_policy(&self) -> UnknownAlertActionPolicy {
        self.unknown_action_policy
    }

    /// Rewards a finished training session and merges the edited balances.
    ///
    /// Diversification is derived from the resulting portfolio, not
    /// accumulated: holding stocks and Tesouro is worth 10 points each.
    pub fn apply_training_completion(&self, prev: &UserStats, delta: &FinancialsDelta) -> UserStats {
        let accessible_money = delta.merged_accessible(prev.accessible_money());
        let investments = delta.merged_investments(prev.investments());

        let score = prev
            .confidence_score()
            .bumped(SubMetric::Clarity, TRAINING_CLARITY)
            .bumped(SubMetric::Consistency, TRAINING_CONSISTENCY)
            .bumped(SubMetric::Education, TRAINING_EDUCATION)
            .replaced(SubMetric::Diversification, diversification_for(&investments))
            .bumped(SubMetric::Progress, TRAINING_PROGRESS);

        prev.clone()
            .with_accessible_money(accessible_money)
            .with_investments(investments)
            .with_streak(prev.streak().saturating_add(1))
            .with_confidence_score(self.recompute_total(score))
    }

    /// Rewards a completed investment challenge. The reward is fixed,
    /// whichever asset was picked.
    pub fn apply_challenge_completion(&self, prev: &UserStats) -> UserStats {
        let score = prev
            .confidence_score()
            .bumped(SubMetric::Education, CHALLENGE_EDUCATION)
            .bumped(SubMetric::Progress, CHALLENGE_PROGRESS);

        prev.clone()
            .with_confidence_score(self.recompute_total(score))
    }

    /// Applies an alert action token.
    pub fn apply_alert_action(&self, prev: &UserStats, action: &str) -> Result<UserStats, ProgressionError> {
        self.apply_parsed_alert_action(prev, &AlertAction::parse(action))
    }

    /// Applies an already parsed alert action.
    ///
    /// Only `add` changes the stats. `ignore` and `skip` are recorded by the
    /// caller to hide the alert; they return `prev` unchanged.
    pub fn apply_parsed_alert_action(
        &self,
        prev: &UserStats,
        action: &AlertAction,
    ) -> Result<UserStats, ProgressionError> {
        match action {
            AlertAction::Add => {
                let investments = Investments {
                    tesouro: prev.investments().tesouro + ALERT_TOP_UP,
                    ..*prev.investments()
                };
                let score = prev
                    .confidence_score()
                    .bumped(SubMetric::Progress, ALERT_ADD_PROGRESS)
                    .bumped(SubMetric::Clarity, ALERT_ADD_CLARITY);

                Ok(prev
                    .clone()
                    .with_investments(investments)
                    .with_confidence_score(self.recompute_total(score)))
            }
            AlertAction::Ignore | AlertAction::Skip | AlertAction::Simulate | AlertAction::Options => {
                Ok(prev.clone())
            }
            AlertAction::Unrecognized(token) => match self.unknown_action_policy {
                UnknownAlertActionPolicy::Ignore => {
                    tracing::debug!(action = %token, "ignoring unrecognized alert action");
                    Ok(prev.clone())
                }
                UnknownAlertActionPolicy::Reject => {
                    Err(ProgressionError::UnrecognizedAlertAction(token.clone()))
                }
            },
        }
    }

    /// Derives `total` from the sub-metrics. Every operation above ends here.
    pub fn recompute_total(&self, score: ConfidenceScore) -> ConfidenceScore {
        score::recompute_total(score)
    }
}

fn diversification_for(investments: &Investments) -> u32 {
    let classes_held = [investments.stocks, investments.tesouro]
        .iter()
        .filter(|amount| amount.is_positive())
        .count() as u32;
    classes_held * DIVERSIFICATION_PER_CLASS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::progression::stats::InvestmentBucket;
    use proptest::prelude::*;

    fn amount(v: f64) -> Amount {
        Amount::try_new(v).unwrap()
    }

    fn engine() -> ProgressionEngine {
        ProgressionEngine::default()
    }

    fn stats_with_score(clarity: u32, consistency: u32, diversification: u32, progress: u32, education: u32) -> UserStats {
        UserStats::initial().with_confidence_score(ConfidenceScore::new(
            clarity,
            consistency,
            diversification,
            progress,
            education,
        ))
    }

    fn assert_total_consistent(stats: &UserStats) {
        let score = stats.confidence_score();
        let expected = (score.clarity().min(30)
            + score.consistency().min(25)
            + score.diversification().min(20)
            + score.progress().min(15)
            + score.education().min(10))
        .min(100);
        assert_eq!(score.total(), expected);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Training completion
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn first_training_from_zero() {
        let delta = FinancialsDelta::empty()
            .with_investment(InvestmentBucket::Stocks, amount(100.0))
            .with_investment(InvestmentBucket::Tesouro, amount(0.0));

        let next = engine().apply_training_completion(&UserStats::initial(), &delta);
        let score = next.confidence_score();

        assert_eq!(score.clarity(), 8);
        assert_eq!(score.consistency(), 3);
        assert_eq!(score.education(), 2);
        assert_eq!(score.diversification(), 10);
        assert_eq!(score.progress(), 2);
        assert_eq!(next.streak(), 1);
        assert_eq!(score.total(), 25);
        assert_eq!(next.investments().stocks, amount(100.0));
    }

    #[test]
    fn training_caps_clarity() {
        let prev = stats_with_score(29, 0, 0, 0, 0);
        let next = engine().apply_training_completion(&prev, &FinancialsDelta::empty());
        assert_eq!(next.confidence_score().clarity(), 30);
    }

    #[test]
    fn diversification_is_recomputed_not_carried() {
        let prev = stats_with_score(0, 0, 20, 0, 0).with_investments(Investments {
            stocks: amount(1000.0),
            tesouro: amount(1000.0),
            ..Default::default()
        });
        let delta = FinancialsDelta::empty()
            .with_investment(InvestmentBucket::Stocks, Amount::ZERO)
            .with_investment(InvestmentBucket::Tesouro, Amount::ZERO);

        let next = engine().apply_training_completion(&prev, &delta);
        assert_eq!(next.confidence_score().diversification(), 0);
    }

    #[test]
    fn diversification_falls_back_to_prior_holdings() {
        let prev = UserStats::initial().with_investments(Investments {
            tesouro: amount(300.0),
            ..Default::default()
        });
        let delta = FinancialsDelta::empty().with_investment(InvestmentBucket::Stocks, amount(50.0));

        let next = engine().apply_training_completion(&prev, &delta);
        assert_eq!(next.confidence_score().diversification(), 20);
        assert_eq!(next.investments().tesouro, amount(300.0));
    }

    #[test]
    fn training_does_not_touch_history() {
        let next = engine().apply_training_completion(&UserStats::initial(), &FinancialsDelta::empty());
        assert!(next.training_history().is_empty());
    }

    #[test]
    fn previous_snapshot_stays_valid() {
        let prev = UserStats::initial();
        let _next = engine().apply_training_completion(&prev, &FinancialsDelta::empty());
        assert_eq!(prev, UserStats::initial());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Challenge completion
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn two_challenges_from_zero() {
        let once = engine().apply_challenge_completion(&UserStats::initial());
        let twice = engine().apply_challenge_completion(&once);

        assert_eq!(twice.confidence_score().education(), 10);
        assert_eq!(twice.confidence_score().progress(), 6);
        assert_eq!(twice.confidence_score().total(), 16);
    }

    #[test]
    fn third_challenge_caps_education() {
        let mut stats = UserStats::initial();
        for _ in 0..3 {
            stats = engine().apply_challenge_completion(&stats);
        }
        assert_eq!(stats.confidence_score().education(), 10);
        assert_eq!(stats.confidence_score().progress(), 9);
    }

    #[test]
    fn challenge_leaves_money_and_streak_alone() {
        let prev = UserStats::initial().with_streak(4).with_investments(Investments {
            savings: amount(10.0),
            ..Default::default()
        });
        let next = engine().apply_challenge_completion(&prev);
        assert_eq!(next.streak(), 4);
        assert_eq!(next.investments(), prev.investments());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Alert actions
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn add_tops_up_tesouro_and_rewards() {
        let prev = stats_with_score(25, 0, 0, 10, 0).with_investments(Investments {
            tesouro: amount(1000.0),
            ..Default::default()
        });

        let next = engine().apply_alert_action(&prev, "add").unwrap();

        assert_eq!(next.investments().tesouro, amount(1500.0));
        assert_eq!(next.confidence_score().progress(), 12);
        assert_eq!(next.confidence_score().clarity(), 26);
        assert_total_consistent(&next);
    }

    #[test]
    fn add_twice_applies_twice() {
        let once = engine().apply_alert_action(&UserStats::initial(), "add").unwrap();
        let twice = engine().apply_alert_action(&once, "add").unwrap();
        assert_eq!(twice.investments().tesouro, amount(1000.0));
    }

    #[test]
    fn ignore_and_skip_return_prev() {
        let prev = stats_with_score(3, 4, 10, 5, 6).with_streak(2);
        assert_eq!(engine().apply_alert_action(&prev, "ignore").unwrap(), prev);
        assert_eq!(engine().apply_alert_action(&prev, "skip").unwrap(), prev);
        assert_eq!(engine().apply_alert_action(&prev, "simulate").unwrap(), prev);
    }

    #[test]
    fn unknown_action_is_ignored_by_default() {
        let prev = stats_with_score(1, 1, 1, 1, 1);
        assert_eq!(engine().apply_alert_action(&prev, "teleport").unwrap(), prev);
    }

    #[test]
    fn unknown_action_rejected_in_strict_mode() {
        let strict = ProgressionEngine::new(UnknownAlertActionPolicy::Reject);
        let result = strict.apply_alert_action(&UserStats::initial(), "teleport");
        assert_eq!(
            result,
            Err(ProgressionError::UnrecognizedAlertAction("teleport".to_string()))
        );
    }

    #[test]
    fn strict_mode_still_accepts_known_no_ops() {
        let strict = ProgressionEngine::new(UnknownAlertActionPolicy::Reject);
        assert!(strict.apply_alert_action(&UserStats::initial(), "options").is_ok());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Properties
    // ─────────────────────────────────────────────────────────────────────────

    fn arb_stats() -> impl Strategy<Value = UserStats> {
        (
            (0u32..60, 0u32..60, 0u32..60, 0u32..60, 0u32..60),
            (0u32..1_000_000, 0u32..1_000_000),
            0u32..500,
        )
            .prop_map(|((c, k, d, p, e), (stocks, tesouro), streak)| {
                UserStats::initial()
                    .with_confidence_score(ConfidenceScore::new(c, k, d, p, e))
                    .with_investments(Investments {
                        stocks: Amount::from_whole(stocks),
                        tesouro: Amount::from_whole(tesouro),
                        ..Default::default()
                    })
                    .with_streak(streak)
            })
    }

    fn arb_event() -> impl Strategy<Value = u8> {
        0u8..4
    }

    proptest! {
        #[test]
        fn total_is_bounded_and_consistent(start in arb_stats(), events in prop::collection::vec(arb_event(), 0..20)) {
            let engine = ProgressionEngine::default();
            let mut stats = start;
            for event in events {
                stats = match event {
                    0 => engine.apply_training_completion(&stats, &FinancialsDelta::empty()),
                    1 => engine.apply_challenge_completion(&stats),
                    2 => engine.apply_alert_action(&stats, "add").unwrap(),
                    _ => engine.apply_alert_action(&stats, "ignore").unwrap(),
                };
                prop_assert!(stats.confidence_score().total() <= 100);
                assert_total_consistent(&stats);
            }
        }

        #[test]
        fn training_never_decreases_rewarded_fields(prev in arb_stats()) {
            let next = ProgressionEngine::default().apply_training_completion(&prev, &FinancialsDelta::empty());
            let (a, b) = (prev.confidence_score(), next.confidence_score());
            prop_assert!(b.clarity() >= a.clarity().min(30));
            prop_assert!(b.consistency() >= a.consistency().min(25));
            prop_assert!(b.education() >= a.education().min(10));
            prop_assert!(b.progress() >= a.progress().min(15));
            prop_assert!(next.streak() > prev.streak());
        }

        #[test]
        fn applying_is_deterministic(prev in arb_stats()) {
            let engine = ProgressionEngine::default();
            let delta = FinancialsDelta::empty();
            prop_assert_eq!(
                engine.apply_training_completion(&prev, &delta),
                engine.apply_training_completion(&prev, &delta)
            );
        }
    }
}
