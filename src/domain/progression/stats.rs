//! UserStats aggregate and the financial buckets it tracks.

use serde::{Deserialize, Serialize};

use super::score::ConfidenceScore;
use crate::domain::foundation::{Amount, TrainingSessionId};

/// Liquidity buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessibleBucket {
    Bank1,
    Bank2,
    Physical,
}

impl AccessibleBucket {
    pub const ALL: [AccessibleBucket; 3] = [
        AccessibleBucket::Bank1,
        AccessibleBucket::Bank2,
        AccessibleBucket::Physical,
    ];

    /// Form label.
    pub fn label(&self) -> &'static str {
        match self {
            AccessibleBucket::Bank1 => "Banco Principal",
            AccessibleBucket::Bank2 => "Banco Secundário",
            AccessibleBucket::Physical => "Reserva Emergência",
        }
    }
}

/// Investment buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvestmentBucket {
    Savings,
    Tesouro,
    Stocks,
    Others,
}

impl InvestmentBucket {
    pub const ALL: [InvestmentBucket; 4] = [
        InvestmentBucket::Savings,
        InvestmentBucket::Tesouro,
        InvestmentBucket::Stocks,
        InvestmentBucket::Others,
    ];

    /// Form label.
    pub fn label(&self) -> &'static str {
        match self {
            InvestmentBucket::Savings => "Poupança",
            InvestmentBucket::Tesouro => "Tesouro Selic",
            InvestmentBucket::Stocks => "Renda Variável",
            InvestmentBucket::Others => "Outros (Cripto/Etc)",
        }
    }
}

/// Money the user can reach immediately.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibleMoney {
    pub bank1: Amount,
    pub bank2: Amount,
    pub physical: Amount,
}

impl AccessibleMoney {
    pub fn get(&self, bucket: AccessibleBucket) -> Amount {
        match bucket {
            AccessibleBucket::Bank1 => self.bank1,
            AccessibleBucket::Bank2 => self.bank2,
            AccessibleBucket::Physical => self.physical,
        }
    }

    pub fn total(&self) -> Amount {
        AccessibleBucket::ALL.iter().map(|b| self.get(*b)).sum()
    }
}

/// Money allocated to investments.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Investments {
    pub savings: Amount,
    pub tesouro: Amount,
    pub stocks: Amount,
    pub others: Amount,
}

impl Investments {
    pub fn get(&self, bucket: InvestmentBucket) -> Amount {
        match bucket {
            InvestmentBucket::Savings => self.savings,
            InvestmentBucket::Tesouro => self.tesouro,
            InvestmentBucket::Stocks => self.stocks,
            InvestmentBucket::Others => self.others,
        }
    }

    pub fn total(&self) -> Amount {
        InvestmentBucket::ALL.iter().map(|b| self.get(*b)).sum()
    }
}

/// Partial update of the liquidity buckets. `None` keeps the prior value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibleMoneyDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank1: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank2: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical: Option<Amount>,
}

impl AccessibleMoneyDelta {
    /// A delta that sets every bucket explicitly to zero.
    pub fn zeroed() -> Self {
        Self {
            bank1: Some(Amount::ZERO),
            bank2: Some(Amount::ZERO),
            physical: Some(Amount::ZERO),
        }
    }

    pub fn set(&mut self, bucket: AccessibleBucket, amount: Amount) {
        let slot = match bucket {
            AccessibleBucket::Bank1 => &mut self.bank1,
            AccessibleBucket::Bank2 => &mut self.bank2,
            AccessibleBucket::Physical => &mut self.physical,
        };
        *slot = Some(amount);
    }

    /// Shallow merge onto `base`.
    pub fn merge_into(&self, base: &AccessibleMoney) -> AccessibleMoney {
        AccessibleMoney {
            bank1: self.bank1.unwrap_or(base.bank1),
            bank2: self.bank2.unwrap_or(base.bank2),
            physical: self.physical.unwrap_or(base.physical),
        }
    }
}

/// Partial update of the investment buckets. `None` keeps the prior value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentsDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tesouro: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stocks: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub others: Option<Amount>,
}

impl InvestmentsDelta {
    /// A delta that sets every bucket explicitly to zero.
    pub fn zeroed() -> Self {
        Self {
            savings: Some(Amount::ZERO),
            tesouro: Some(Amount::ZERO),
            stocks: Some(Amount::ZERO),
            others: Some(Amount::ZERO),
        }
    }

    pub fn set(&mut self, bucket: InvestmentBucket, amount: Amount) {
        let slot = match bucket {
            InvestmentBucket::Savings => &mut self.savings,
            InvestmentBucket::Tesouro => &mut self.tesouro,
            InvestmentBucket::Stocks => &mut self.stocks,
            InvestmentBucket::Others => &mut self.others,
        };
        *slot = Some(amount);
    }

    /// Shallow merge onto `base`.
    pub fn merge_into(&self, base: &Investments) -> Investments {
        Investments {
            savings: self.savings.unwrap_or(base.savings),
            tesouro: self.tesouro.unwrap_or(base.tesouro),
            stocks: self.stocks.unwrap_or(base.stocks),
            others: self.others.unwrap_or(base.others),
        }
    }
}

/// Partial financial edits collected by the training wizard.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinancialsDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessible_money: Option<AccessibleMoneyDelta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investments: Option<InvestmentsDelta>,
}

impl FinancialsDelta {
    /// The empty delta: every bucket keeps its prior value.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder: set one liquidity bucket.
    pub fn with_accessible(mut self, bucket: AccessibleBucket, amount: Amount) -> Self {
        self.accessible_money
            .get_or_insert_with(AccessibleMoneyDelta::default)
            .set(bucket, amount);
        self
    }

    /// Builder: set one investment bucket.
    pub fn with_investment(mut self, bucket: InvestmentBucket, amount: Amount) -> Self {
        self.investments
            .get_or_insert_with(InvestmentsDelta::default)
            .set(bucket, amount);
        self
    }

    pub(crate) fn merged_accessible(&self, base: &AccessibleMoney) -> AccessibleMoney {
        self.accessible_money
            .map(|delta| delta.merge_into(base))
            .unwrap_or(*base)
    }

    pub(crate) fn merged_investments(&self, base: &Investments) -> Investments {
        self.investments
            .map(|delta| delta.merge_into(base))
            .unwrap_or(*base)
    }
}

/// Aggregate root of the progression model.
///
/// Values are replaced wholesale by engine operations; a snapshot stays
/// valid after a newer one has been produced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserStats {
    accessible_money: AccessibleMoney,
    investments: Investments,
    confidence_score: ConfidenceScore,
    streak: u32,
    training_history: Vec<TrainingSessionId>,
}

impl UserStats {
    /// All-zero stats for a new account or guest session.
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn accessible_money(&self) -> &AccessibleMoney {
        &self.accessible_money
    }

    pub fn investments(&self) -> &Investments {
        &self.investments
    }

    pub fn confidence_score(&self) -> &ConfidenceScore {
        &self.confidence_score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn training_history(&self) -> &[TrainingSessionId] {
        &self.training_history
    }

    /// Totals and split of the declared wealth.
    pub fn summary(&self) -> WealthSummary {
        WealthSummary::new(&self.accessible_money, &self.investments)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Functional updates
    // ─────────────────────────────────────────────────────────────────────────

    pub fn with_accessible_money(self, accessible_money: AccessibleMoney) -> Self {
        Self {
            accessible_money,
            ..self
        }
    }

    pub fn with_investments(self, investments: Investments) -> Self {
        Self {
            investments,
            ..self
        }
    }

    pub fn with_confidence_score(self, confidence_score: ConfidenceScore) -> Self {
        Self {
            confidence_score,
            ..self
        }
    }

    pub fn with_streak(self, streak: u32) -> Self {
        Self { streak, ..self }
    }

    /// Appends a finished training session to the history.
    pub fn with_training_recorded(mut self, session_id: TrainingSessionId) -> Self {
        self.training_history.push(session_id);
        self
    }
}

/// Declared wealth split into liquid and invested money.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WealthSummary {
    pub liquid: Amount,
    pub invested: Amount,
    pub total: Amount,
    /// Rounded share of liquid money, 0 when nothing is declared.
    pub liquid_percent: u8,
    /// Always `100 - liquid_percent`.
    pub invested_percent: u8,
}

impl WealthSummary {
    pub fn new(accessible: &AccessibleMoney, investments: &Investments) -> Self {
        let liquid = accessible.total();
        let invested = investments.total();
        let total = liquid + invested;

        let liquid_percent = if total.is_positive() {
            ((liquid.value() / total.value()) * 100.0).round().clamp(0.0, 100.0) as u8
        } else {
            0
        };

        Self {
            liquid,
            invested,
            total,
            liquid_percent,
            invested_percent: 100 - liquid_percent,
        }
    }
}
