//! Dashboard alerts and the action tokens they emit.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{AlertId, ValidationError};

/// Alert category, used for presentation grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertCategory {
    Security,
    Opportunity,
    Progress,
    Education,
}

/// An action the user took on an alert.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AlertAction {
    /// Top up the emergency reserve (Tesouro) by a fixed amount.
    Add,
    /// Dismiss the alert.
    Ignore,
    /// Postpone the alert.
    Skip,
    /// Open the allocation simulator.
    Simulate,
    /// Browse investment options.
    Options,
    /// A token this build does not know.
    Unrecognized(String),
}

impl AlertAction {
    /// Parses an action token. Never fails: unknown tokens are kept verbatim.
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "add" => AlertAction::Add,
            "ignore" => AlertAction::Ignore,
            "skip" => AlertAction::Skip,
            "simulate" => AlertAction::Simulate,
            "options" => AlertAction::Options,
            other => AlertAction::Unrecognized(other.to_string()),
        }
    }

    /// Wire token for this action.
    pub fn token(&self) -> &str {
        match self {
            AlertAction::Add => "add",
            AlertAction::Ignore => "ignore",
            AlertAction::Skip => "skip",
            AlertAction::Simulate => "simulate",
            AlertAction::Options => "options",
            AlertAction::Unrecognized(token) => token,
        }
    }

    /// Whether taking this action hides the alert afterwards.
    pub fn suppresses_alert(&self) -> bool {
        matches!(self, AlertAction::Add | AlertAction::Ignore | AlertAction::Skip)
    }
}

impl fmt::Display for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// A button on an alert card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertButton {
    pub label: String,
    pub value: String,
}

impl AlertButton {
    fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// A contextual suggestion shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialAlert {
    pub id: AlertId,
    pub category: AlertCategory,
    pub title: String,
    pub description: String,
    pub actions: Vec<AlertButton>,
}

/// Prefix that marks a description as AI-generated.
pub const AI_ADVICE_PREFIX: &str = "IA sugere:";

impl FinancialAlert {
    /// True when the description carries AI advice.
    pub fn is_ai_advice(&self) -> bool {
        self.description.contains(AI_ADVICE_PREFIX)
    }

    /// Description with the AI marker removed.
    pub fn display_description(&self) -> String {
        if self.is_ai_advice() {
            self.description
                .replace(AI_ADVICE_PREFIX, "")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            self.description.clone()
        }
    }
}

/// The built-in alerts.
///
/// `opportunity_advice` is `None` while the advice text is still loading.
pub fn default_alerts(opportunity_advice: Option<&str>) -> Result<Vec<FinancialAlert>, ValidationError> {
    let opportunity_description = match opportunity_advice {
        Some(advice) => format!("{} {}", AI_ADVICE_PREFIX, advice),
        None => "Calculando...".to_string(),
    };

    Ok(vec![
        FinancialAlert {
            id: AlertId::new("security-1")?,
            category: AlertCategory::Security,
            title: "Reserva em Alerta".to_string(),
            description: format!(
                "Você tem apenas 2 meses de reserva. {} Aloque R$ 500 este mês.",
                AI_ADVICE_PREFIX
            ),
            actions: vec![
                AlertButton::new("Adicionar Agora", "add"),
                AlertButton::new("Ignorar", "ignore"),
            ],
        },
        FinancialAlert {
            id: AlertId::new("opportunity-1")?,
            category: AlertCategory::Opportunity,
            title: "Oportunidade IA".to_string(),
            description: opportunity_description,
            actions: vec![
                AlertButton::new("Simular", "simulate"),
                AlertButton::new("Ver Opções", "options"),
            ],
        },
    ])
}
