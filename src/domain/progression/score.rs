//! Confidence score - five capped sub-metrics and their derived total.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound for the composite total.
pub const TOTAL_CAP: u32 = 100;

/// One of the five weighted components of the confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubMetric {
    Clarity,
    Consistency,
    Diversification,
    Progress,
    Education,
}

impl SubMetric {
    /// All sub-metrics in display order.
    pub const ALL: [SubMetric; 5] = [
        SubMetric::Clarity,
        SubMetric::Consistency,
        SubMetric::Diversification,
        SubMetric::Progress,
        SubMetric::Education,
    ];

    /// Maximum contribution of this sub-metric to the total.
    pub fn cap(&self) -> u32 {
        match self {
            SubMetric::Clarity => 30,
            SubMetric::Consistency => 25,
            SubMetric::Diversification => 20,
            SubMetric::Progress => 15,
            SubMetric::Education => 10,
        }
    }

    /// Portuguese label shown on the score card.
    pub fn label(&self) -> &'static str {
        match self {
            SubMetric::Clarity => "Clareza",
            SubMetric::Consistency => "Consistência",
            SubMetric::Diversification => "Diversificação",
            SubMetric::Progress => "Progresso",
            SubMetric::Education => "Educação",
        }
    }
}

impl fmt::Display for SubMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The composite confidence score.
///
/// # Invariants
///
/// - `total == min(100, Σ min(cap_i, metric_i))`
/// - `total` is only ever produced by [`recompute_total`]; a value read
///   from storage is discarded and derived again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "ConfidenceScoreRecord", into = "ConfidenceScoreRecord")]
pub struct ConfidenceScore {
    clarity: u32,
    consistency: u32,
    diversification: u32,
    progress: u32,
    education: u32,
    total: u32,
}

impl ConfidenceScore {
    /// Builds a score from raw sub-metrics and derives the total.
    pub fn new(
        clarity: u32,
        consistency: u32,
        diversification: u32,
        progress: u32,
        education: u32,
    ) -> Self {
        recompute_total(Self {
            clarity,
            consistency,
            diversification,
            progress,
            education,
            total: 0,
        })
    }

    pub fn clarity(&self) -> u32 {
        self.clarity
    }

    pub fn consistency(&self) -> u32 {
        self.consistency
    }

    pub fn diversification(&self) -> u32 {
        self.diversification
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn education(&self) -> u32 {
        self.education
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Returns the raw value of one sub-metric.
    pub fn get(&self, metric: SubMetric) -> u32 {
        match metric {
            SubMetric::Clarity => self.clarity,
            SubMetric::Consistency => self.consistency,
            SubMetric::Diversification => self.diversification,
            SubMetric::Progress => self.progress,
            SubMetric::Education => self.education,
        }
    }

    /// Adds `amount` to a sub-metric, capping it. Leaves `total` stale;
    /// callers finish with [`recompute_total`].
    pub(crate) fn bumped(mut self, metric: SubMetric, amount: u32) -> Self {
        let capped = self.get(metric).saturating_add(amount).min(metric.cap());
        self.set(metric, capped);
        self
    }

    /// Replaces a sub-metric outright, capping it. Leaves `total` stale.
    pub(crate) fn replaced(mut self, metric: SubMetric, value: u32) -> Self {
        self.set(metric, value.min(metric.cap()));
        self
    }

    fn set(&mut self, metric: SubMetric, value: u32) {
        match metric {
            SubMetric::Clarity => self.clarity = value,
            SubMetric::Consistency => self.consistency = value,
            SubMetric::Diversification => self.diversification = value,
            SubMetric::Progress => self.progress = value,
            SubMetric::Education => self.education = value,
        }
    }

    /// Fraction of the sub-metric's cap that has been reached (0.0 to 1.0).
    pub fn fill_ratio(&self, metric: SubMetric) -> f64 {
        f64::from(self.get(metric).min(metric.cap())) / f64::from(metric.cap())
    }
}

/// Derives `total` from the sub-metrics.
///
/// Each sub-metric is clamped to its own cap before summing, so a stored
/// value above its cap never inflates the total.
pub fn recompute_total(score: ConfidenceScore) -> ConfidenceScore {
    let sum: u32 = SubMetric::ALL
        .iter()
        .map(|metric| score.get(*metric).min(metric.cap()))
        .sum();

    ConfidenceScore {
        total: sum.min(TOTAL_CAP),
        ..score
    }
}

/// Storage shape of the score, mirroring the persisted record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ConfidenceScoreRecord {
    #[serde(default)]
    clarity: u32,
    #[serde(default)]
    consistency: u32,
    #[serde(default)]
    diversification: u32,
    #[serde(default)]
    progress: u32,
    #[serde(default)]
    education: u32,
    #[serde(default)]
    total: u32,
}

impl From<ConfidenceScoreRecord> for ConfidenceScore {
    fn from(record: ConfidenceScoreRecord) -> Self {
        ConfidenceScore::new(
            record.clarity,
            record.consistency,
            record.diversification,
            record.progress,
            record.education,
        )
    }
}

impl From<ConfidenceScore> for ConfidenceScoreRecord {
    fn from(score: ConfidenceScore) -> Self {
        Self {
            clarity: score.clarity,
            consistency: score.consistency,
            diversification: score.diversification,
            progress: score.progress,
            education: score.education,
            total: score.total,
        }
    }
}
