//! Training session wizard.
//!
//! Seven linear steps. Balances are edited on the two treasure map steps,
//! the `AiDiscovery` step waits for advice text, and `MissionComplete` hands
//! the collected edits to the progression engine exactly once.

use serde::{Deserialize, Serialize};

use super::ticket::{AdviceSlot, AdviceTicket};
use crate::domain::foundation::{
    Amount, DomainError, ErrorCode, StateMachine, TrainingSessionId,
};
use crate::domain::progression::{
    AccessibleBucket, AccessibleMoney, AccessibleMoneyDelta, FinancialsDelta, InvestmentBucket,
    Investments, InvestmentsDelta, UserStats, WealthSummary,
};

/// Steps of the training wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainingStep {
    Welcome,
    StartingPoint,
    TreasureMapA,
    TreasureMapB,
    PhotoSummary,
    AiDiscovery,
    MissionComplete,
}

impl TrainingStep {
    pub const ALL: [TrainingStep; 7] = [
        TrainingStep::Welcome,
        TrainingStep::StartingPoint,
        TrainingStep::TreasureMapA,
        TrainingStep::TreasureMapB,
        TrainingStep::PhotoSummary,
        TrainingStep::AiDiscovery,
        TrainingStep::MissionComplete,
    ];

    /// Zero-based position in the wizard.
    pub fn index(&self) -> usize {
        match self {
            TrainingStep::Welcome => 0,
            TrainingStep::StartingPoint => 1,
            TrainingStep::TreasureMapA => 2,
            TrainingStep::TreasureMapB => 3,
            TrainingStep::PhotoSummary => 4,
            TrainingStep::AiDiscovery => 5,
            TrainingStep::MissionComplete => 6,
        }
    }

    pub fn next(&self) -> Option<TrainingStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<TrainingStep> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl StateMachine for TrainingStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// One step forward or one step back. `MissionComplete` is final.
    fn valid_transitions(&self) -> Vec<Self> {
        if *self == TrainingStep::MissionComplete {
            return vec![];
        }
        self.next().into_iter().chain(self.previous()).collect()
    }
}

/// What the wizard hands over once the mission is complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingOutcome {
    pub session_id: TrainingSessionId,
    pub delta: FinancialsDelta,
}

/// State of one training run.
#[derive(Debug, Clone)]
pub struct TrainingWizard {
    id: TrainingSessionId,
    step: TrainingStep,
    delta: FinancialsDelta,
    discovery: AdviceSlot,
    finished: bool,
}

impl TrainingWizard {
    /// Starts at `Welcome` with every bucket explicitly zero.
    pub fn new() -> Self {
        let id = TrainingSessionId::new();
        Self {
            id,
            step: TrainingStep::Welcome,
            delta: FinancialsDelta {
                accessible_money: Some(AccessibleMoneyDelta::zeroed()),
                investments: Some(InvestmentsDelta::zeroed()),
            },
            discovery: AdviceSlot::new(*id.as_uuid()),
            finished: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> TrainingSessionId {
        self.id
    }

    pub fn step(&self) -> TrainingStep {
        self.step
    }

    pub fn delta(&self) -> &FinancialsDelta {
        &self.delta
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_discovery_pending(&self) -> bool {
        self.discovery.is_pending()
    }

    pub fn discovery_message(&self) -> Option<&str> {
        self.discovery.text()
    }

    /// `(index + 1) / 7 * 100`.
    pub fn progress_percent(&self) -> f64 {
        (self.step.index() + 1) as f64 / TrainingStep::ALL.len() as f64 * 100.0
    }

    /// Balances as currently entered in the form.
    pub fn accessible_money(&self) -> AccessibleMoney {
        self.delta.merged_accessible(&AccessibleMoney::default())
    }

    pub fn investments(&self) -> Investments {
        self.delta.merged_investments(&Investments::default())
    }

    pub fn summary(&self) -> WealthSummary {
        WealthSummary::new(&self.accessible_money(), &self.investments())
    }

    /// Stats view of the form, used to ask for the discovery message.
    pub fn preview_stats(&self) -> UserStats {
        UserStats::initial()
            .with_accessible_money(self.accessible_money())
            .with_investments(self.investments())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Sets a liquidity bucket. Only allowed on `TreasureMapA`.
    pub fn set_accessible(&mut self, bucket: AccessibleBucket, amount: Amount) -> Result<(), DomainError> {
        self.ensure_step(TrainingStep::TreasureMapA)?;
        self.delta = self.delta.with_accessible(bucket, amount);
        Ok(())
    }

    /// Sets an investment bucket. Only allowed on `TreasureMapB`.
    pub fn set_investment(&mut self, bucket: InvestmentBucket, amount: Amount) -> Result<(), DomainError> {
        self.ensure_step(TrainingStep::TreasureMapB)?;
        self.delta = self.delta.with_investment(bucket, amount);
        Ok(())
    }

    /// Parses raw form input and sets a liquidity bucket. Blank input is zero.
    pub fn enter_accessible(&mut self, bucket: AccessibleBucket, input: &str) -> Result<(), DomainError> {
        let amount = Amount::parse(bucket.label(), input)?;
        self.set_accessible(bucket, amount)
    }

    /// Parses raw form input and sets an investment bucket. Blank input is zero.
    pub fn enter_investment(&mut self, bucket: InvestmentBucket, input: &str) -> Result<(), DomainError> {
        let amount = Amount::parse(bucket.label(), input)?;
        self.set_investment(bucket, amount)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// False on the final step and while discovery text is pending.
    pub fn can_advance(&self) -> bool {
        self.step.next().is_some() && !self.discovery.is_pending()
    }

    /// Moves one step forward.
    ///
    /// Entering `AiDiscovery` happens immediately and returns the ticket the
    /// caller must present with the advice text.
    pub fn advance(&mut self) -> Result<Option<AdviceTicket>, DomainError> {
        if self.discovery.is_pending() {
            return Err(DomainError::new(
                ErrorCode::WizardIncomplete,
                "Discovery message is still loading",
            ));
        }
        let next = self.step.next().ok_or_else(|| {
            DomainError::new(ErrorCode::InvalidStateTransition, "Training is already at the last step")
        })?;
        self.move_to(next)?;

        if next == TrainingStep::AiDiscovery {
            return Ok(Some(self.discovery.issue()));
        }
        Ok(None)
    }

    /// Moves one step back. Leaving `AiDiscovery` discards its text and any
    /// pending request.
    pub fn go_back(&mut self) -> Result<(), DomainError> {
        let previous = self
            .step
            .previous()
            .filter(|_| !self.step.is_terminal())
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    format!("Cannot go back from {:?}", self.step),
                )
            })?;
        if self.step == TrainingStep::AiDiscovery {
            self.discovery.clear();
        }
        self.move_to(previous)
    }

    /// Accepts the discovery text for `ticket`. Returns false when the
    /// ticket is stale and the text was dropped.
    pub fn resolve_discovery(&mut self, ticket: AdviceTicket, message: impl Into<String>) -> bool {
        if self.step != TrainingStep::AiDiscovery {
            tracing::debug!(session_id = %self.id, "discarding discovery message for a step no longer shown");
            return false;
        }
        let accepted = self.discovery.resolve(ticket, message.into());
        if !accepted {
            tracing::debug!(session_id = %self.id, "discarding superseded discovery message");
        }
        accepted
    }

    /// Hands over the collected edits. Allowed once, on `MissionComplete`.
    pub fn finish(&mut self) -> Result<TrainingOutcome, DomainError> {
        self.ensure_step(TrainingStep::MissionComplete)
            .map_err(|_| DomainError::new(ErrorCode::WizardIncomplete, "Training mission is not complete"))?;
        if self.finished {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Training session was already finished",
            )
            .with_detail("session_id", self.id.to_string()));
        }

        self.finished = true;
        Ok(TrainingOutcome {
            session_id: self.id,
            delta: self.delta,
        })
    }

    fn move_to(&mut self, target: TrainingStep) -> Result<(), DomainError> {
        self.step = self
            .step
            .transition_to(target)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        Ok(())
    }

    fn ensure_step(&self, expected: TrainingStep) -> Result<(), DomainError> {
        if self.step != expected {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Expected step {:?}, wizard is at {:?}", expected, self.step),
            ));
        }
        Ok(())
    }
}

impl Default for TrainingWizard {
    fn default() -> Self {
        Self::new()
    }
}
