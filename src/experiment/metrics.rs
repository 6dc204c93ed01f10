//! Metric vector - the five quality scores attached to every response

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// One of the five quality metrics scored by the backend.
///
/// Selecting a metric for charts and statistics goes through this enum, so
/// every accessor is an exhaustive match rather than a string lookup.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MetricKey {
    /// Weighted overall score (default selection).
    #[default]
    Overall,
    /// Does the response cover what the prompt asked for.
    Completeness,
    /// Logical flow and readability.
    Coherence,
    /// Novelty of the response.
    Creativity,
    /// Topical relevance to the prompt.
    Relevance,
}

impl MetricKey {
    /// All metrics, in display order.
    pub const ALL: [Self; 5] = [
        Self::Overall,
        Self::Completeness,
        Self::Coherence,
        Self::Creativity,
        Self::Relevance,
    ];

    /// Wire/field name of the metric.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overall => "overall",
            Self::Completeness => "completeness",
            Self::Coherence => "coherence",
            Self::Creativity => "creativity",
            Self::Relevance => "relevance",
        }
    }

    /// Human-readable label for selectors and chart legends.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overall => "Overall Score",
            Self::Completeness => "Completeness",
            Self::Coherence => "Coherence",
            Self::Creativity => "Creativity",
            Self::Relevance => "Relevance",
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overall" => Ok(Self::Overall),
            "completeness" => Ok(Self::Completeness),
            "coherence" => Ok(Self::Coherence),
            "creativity" => Ok(Self::Creativity),
            "relevance" => Ok(Self::Relevance),
            other => Err(Error::InvalidInput(format!(
                "unknown metric '{other}' (expected one of: overall, completeness, coherence, creativity, relevance)"
            ))),
        }
    }
}

/// The five-dimensional quality score of a response, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricVector {
    /// Completeness score
    pub completeness: f64,
    /// Coherence score
    pub coherence: f64,
    /// Creativity score
    pub creativity: f64,
    /// Relevance score
    pub relevance: f64,
    /// Overall score
    pub overall: f64,
}

impl MetricVector {
    /// Read the selected metric.
    #[must_use]
    pub const fn get(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::Overall => self.overall,
            MetricKey::Completeness => self.completeness,
            MetricKey::Coherence => self.coherence,
            MetricKey::Creativity => self.creativity,
            MetricKey::Relevance => self.relevance,
        }
    }
}

/// Colour band a score falls into on result cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    /// `score >= 0.8`
    High,
    /// `0.6 <= score < 0.8`
    Medium,
    /// Everything below 0.6 (including NaN)
    Low,
}

impl ScoreBand {
    /// Classify a score.
    #[must_use]
    pub fn of(score: f64) -> Self {
        if score >= 0.8 {
            Self::High
        } else if score >= 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}
