//! Investment challenge: allocate a surprise bonus.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ticket::{AdviceSlot, AdviceTicket};
use crate::domain::foundation::{Amount, DomainError, ErrorCode, StateMachine};

/// Bonus the user is asked to allocate.
pub const CHALLENGE_BONUS: Amount = Amount::from_whole(2000);

/// Steps of the investment challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChallengeStep {
    Intro,
    Scenario,
    Choice,
    Result,
    Reward,
}

impl StateMachine for ChallengeStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ChallengeStep::*;
        match self {
            Intro => vec![Scenario, Choice],
            Scenario => vec![Choice],
            Choice => vec![Result],
            Result => vec![Reward],
            Reward => vec![],
        }
    }
}

/// Risk shown next to each asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Baixo",
            RiskLevel::Medium => "Médio",
            RiskLevel::High => "Alto",
        }
    }
}

/// Assets offered by the challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeAsset {
    Selic,
    Fii,
    Stocks,
}

impl ChallengeAsset {
    pub const ALL: [ChallengeAsset; 3] = [
        ChallengeAsset::Selic,
        ChallengeAsset::Fii,
        ChallengeAsset::Stocks,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ChallengeAsset::Selic => "selic",
            ChallengeAsset::Fii => "fii",
            ChallengeAsset::Stocks => "stocks",
        }
    }

    /// Name shown to the user and sent with the feedback request.
    pub fn name(&self) -> &'static str {
        match self {
            ChallengeAsset::Selic => "Tesouro SELIC",
            ChallengeAsset::Fii => "Fundos Imob.",
            ChallengeAsset::Stocks => "Ações Blue Chips",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChallengeAsset::Selic => "Segurança absoluta e liquidez diária para sua base.",
            ChallengeAsset::Fii => "Renda mensal isenta de IR vindo de aluguéis.",
            ChallengeAsset::Stocks => "Sócio das maiores empresas do Brasil e do mundo.",
        }
    }

    pub fn risk(&self) -> RiskLevel {
        match self {
            ChallengeAsset::Selic => RiskLevel::Low,
            ChallengeAsset::Fii => RiskLevel::Medium,
            ChallengeAsset::Stocks => RiskLevel::High,
        }
    }

    /// Looks an asset up by its id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|asset| asset.id() == id)
    }
}

/// State of one challenge run.
///
/// The reward granted by the engine is the same whichever asset is picked;
/// the choice only shapes the feedback text.
#[derive(Debug, Clone)]
pub struct ChallengeWizard {
    step: ChallengeStep,
    chosen: Option<ChallengeAsset>,
    feedback: AdviceSlot,
    claimed: bool,
}

impl ChallengeWizard {
    pub fn new() -> Self {
        Self {
            step: ChallengeStep::Intro,
            chosen: None,
            feedback: AdviceSlot::new(Uuid::new_v4()),
            claimed: false,
        }
    }

    pub fn step(&self) -> ChallengeStep {
        self.step
    }

    pub fn bonus(&self) -> Amount {
        CHALLENGE_BONUS
    }

    pub fn chosen(&self) -> Option<ChallengeAsset> {
        self.chosen
    }

    pub fn is_feedback_pending(&self) -> bool {
        self.feedback.is_pending()
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.text()
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    /// Intro → Scenario.
    pub fn show_scenario(&mut self) -> Result<(), DomainError> {
        self.move_to(ChallengeStep::Scenario)
    }

    /// Intro or Scenario → Choice.
    pub fn proceed_to_choice(&mut self) -> Result<(), DomainError> {
        self.move_to(ChallengeStep::Choice)
    }

    /// Picks an asset and moves to `Result`, returning the ticket for the
    /// feedback text.
    pub fn choose(&mut self, asset: ChallengeAsset) -> Result<AdviceTicket, DomainError> {
        self.move_to(ChallengeStep::Result)?;
        self.chosen = Some(asset);
        Ok(self.feedback.issue())
    }

    /// Accepts feedback text. Returns false when the ticket is stale.
    pub fn resolve_feedback(&mut self, ticket: AdviceTicket, text: impl Into<String>) -> bool {
        if self.step != ChallengeStep::Result {
            return false;
        }
        self.feedback.resolve(ticket, text.into())
    }

    /// Result → Reward, once the feedback has arrived.
    pub fn advance_to_reward(&mut self) -> Result<(), DomainError> {
        if self.feedback.is_pending() {
            return Err(DomainError::new(
                ErrorCode::WizardIncomplete,
                "Challenge feedback is still loading",
            ));
        }
        self.move_to(ChallengeStep::Reward)
    }

    /// Claims the reward. Allowed once, on `Reward`.
    pub fn claim_reward(&mut self) -> Result<ChallengeAsset, DomainError> {
        let chosen = match (self.step, self.chosen) {
            (ChallengeStep::Reward, Some(asset)) => asset,
            _ => {
                return Err(DomainError::new(
                    ErrorCode::WizardIncomplete,
                    "Challenge has not reached the reward step",
                ))
            }
        };
        if self.claimed {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Challenge reward was already claimed",
            ));
        }
        self.claimed = true;
        Ok(chosen)
    }

    fn move_to(&mut self, target: ChallengeStep) -> Result<(), DomainError> {
        self.step = self
            .step
            .transition_to(target)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        Ok(())
    }
}

impl Default for ChallengeWizard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_result(asset: ChallengeAsset) -> (ChallengeWizard, AdviceTicket) {
        let mut wizard = ChallengeWizard::new();
        wizard.proceed_to_choice().unwrap();
        let ticket = wizard.choose(asset).unwrap();
        (wizard, ticket)
    }

    #[test]
    fn transitions_follow_challenge_flow() {
        use ChallengeStep::*;
        assert!(Intro.can_transition_to(&Scenario));
        assert!(Intro.can_transition_to(&Choice));
        assert!(Scenario.can_transition_to(&Choice));
        assert!(!Intro.can_transition_to(&Result));
        assert!(!Choice.can_transition_to(&Reward));
        assert!(Reward.is_terminal());
    }

    #[test]
    fn assets_match_catalogue() {
        assert_eq!(ChallengeAsset::Selic.name(), "Tesouro SELIC");
        assert_eq!(ChallengeAsset::Fii.risk().label(), "Médio");
        assert_eq!(ChallengeAsset::Stocks.risk(), RiskLevel::High);
        assert_eq!(ChallengeAsset::from_id("fii"), Some(ChallengeAsset::Fii));
        assert_eq!(ChallengeAsset::from_id("crypto"), None);
    }

    #[test]
    fn bonus_is_two_thousand() {
        assert_eq!(ChallengeWizard::new().bonus().to_pt_br(), "2.000");
    }

    #[test]
    fn choose_is_only_allowed_on_choice_step() {
        let mut wizard = ChallengeWizard::new();
        assert!(wizard.choose(ChallengeAsset::Selic).is_err());
        assert_eq!(wizard.chosen(), None);
    }

    #[test]
    fn reward_waits_for_feedback() {
        let (mut wizard, ticket) = at_result(ChallengeAsset::Stocks);
        assert_eq!(wizard.step(), ChallengeStep::Result);
        assert!(wizard.is_feedback_pending());
        assert_eq!(wizard.advance_to_reward().unwrap_err().code, ErrorCode::WizardIncomplete);

        assert!(wizard.resolve_feedback(ticket, "Decisão estratégica."));
        wizard.advance_to_reward().unwrap();
        assert_eq!(wizard.feedback(), Some("Decisão estratégica."));
    }

    #[test]
    fn late_feedback_after_reward_is_dropped() {
        let (mut wizard, ticket) = at_result(ChallengeAsset::Fii);
        assert!(wizard.resolve_feedback(ticket, "ok"));
        wizard.advance_to_reward().unwrap();
        assert!(!wizard.resolve_feedback(ticket, "late"));
        assert_eq!(wizard.feedback(), Some("ok"));
    }

    #[test]
    fn reward_is_claimed_once() {
        let (mut wizard, ticket) = at_result(ChallengeAsset::Selic);
        assert!(wizard.claim_reward().is_err());
        wizard.resolve_feedback(ticket, "ok");
        wizard.advance_to_reward().unwrap();

        assert_eq!(wizard.claim_reward().unwrap(), ChallengeAsset::Selic);
        assert!(wizard.is_claimed());
        assert!(wizard.claim_reward().is_err());
    }
}
