use super::config::{LevelThresholds, ScoringConfigError};
use serde::{Deserialize, Serialize};

/// Qualitative exposure band derived from a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Level {
    pub const fn ordered() -> [Self; 4] {
        [Self::Low, Self::Moderate, Self::High, Self::VeryHigh]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Faible",
            Self::Moderate => "Modéré",
            Self::High => "Élevé",
            Self::VeryHigh => "Très élevé",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Moderate => "yellow",
            Self::High => "orange",
            Self::VeryHigh => "red",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Low => "check-circle",
            Self::Moderate => "alert-triangle",
            Self::High => "trending-up",
            Self::VeryHigh => "alert-triangle",
        }
    }

    /// Interpretation paragraph shown next to an exposure score.
    pub const fn interpretation(self) -> &'static str {
        match self {
            Self::Low => "Votre métier présente une exposition faible à l'IA. Les transformations sont limitées et progressives.",
            Self::Moderate => "Votre métier connaît une exposition modérée à l'IA. Certaines transformations sont en cours ou prévues.",
            Self::High => "Votre métier présente une exposition élevée à l'IA. Des transformations significatives sont en cours.",
            Self::VeryHigh => "Votre métier présente une exposition très élevée à l'IA. Les transformations sont majeures et touchent tous les aspects.",
        }
    }
}

/// Scale the classified score is expressed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreScale {
    /// 0-100 composite score.
    Percent,
    /// 0-5 Likert answer, projected onto 0-100 before banding.
    Likert,
}

impl ScoreScale {
    fn to_percent(self, score: f64) -> f64 {
        if !score.is_finite() {
            return 0.0;
        }
        match self {
            Self::Percent => score,
            Self::Likert => score / 5.0 * 100.0,
        }
    }
}

/// Level plus its display metadata, always recomputed from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub level: Level,
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

impl From<Level> for Classification {
    fn from(level: Level) -> Self {
        Self {
            level,
            label: level.label(),
            color: level.color(),
            icon: level.icon(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    thresholds: LevelThresholds,
}

impl Classifier {
    pub fn new(thresholds: LevelThresholds) -> Result<Self, ScoringConfigError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub const fn standard() -> Self {
        Self {
            thresholds: LevelThresholds::standard(),
        }
    }

    pub fn thresholds(&self) -> &LevelThresholds {
        &self.thresholds
    }

    /// Bands are closed on the lower bound: 25.0 is `Modéré`, 24.99 is `Faible`.
    /// Non-finite scores are treated as 0.
    pub fn classify(&self, score: f64, scale: ScoreScale) -> Level {
        let score = scale.to_percent(score);
        if score >= self.thresholds.very_high {
            Level::VeryHigh
        } else if score >= self.thresholds.high {
            Level::High
        } else if score >= self.thresholds.moderate {
            Level::Moderate
        } else {
            Level::Low
        }
    }

    pub fn classification(&self, score: f64, scale: ScoreScale) -> Classification {
        self.classify(score, scale).into()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::standard()
    }
}
