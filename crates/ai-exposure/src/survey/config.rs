use super::domain::ExposureDimension;
use serde::{Deserialize, Serialize};

/// Weights of the exposure dimensions, in percent of the global score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureWeights {
    pub automation: u8,
    pub skills: u8,
    pub activities: u8,
    pub conditions: u8,
}

impl ExposureWeights {
    pub const fn standard() -> Self {
        Self {
            automation: 35,
            skills: 25,
            activities: 23,
            conditions: 17,
        }
    }

    pub const fn weight(&self, dimension: ExposureDimension) -> u8 {
        match dimension {
            ExposureDimension::Automation => self.automation,
            ExposureDimension::Skills => self.skills,
            ExposureDimension::Activities => self.activities,
            ExposureDimension::Conditions => self.conditions,
        }
    }

    pub fn total(&self) -> u16 {
        ExposureDimension::ordered()
            .into_iter()
            .map(|dimension| u16::from(self.weight(dimension)))
            .sum()
    }
}

impl Default for ExposureWeights {
    fn default() -> Self {
        Self::standard()
    }
}

/// Lower bounds (inclusive) of each level above `Faible`, on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    pub moderate: f64,
    pub high: f64,
    pub very_high: f64,
}

impl LevelThresholds {
    pub const fn standard() -> Self {
        Self {
            moderate: 25.0,
            high: 50.0,
            very_high: 75.0,
        }
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let bounds = [self.moderate, self.high, self.very_high];
        ensure_increasing_percentages(&bounds, ScoringConfigError::ThresholdsNotIncreasing)
    }
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self::standard()
    }
}

/// Every constant of the scoring core, validated before any scorer uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ExposureWeights,
    pub level_thresholds: LevelThresholds,
    /// Heatmap band cutoffs in percent of a dimension's max.
    pub intensity_cutoffs: [f64; 4],
    /// Support coordinate assumed for the respondent on the scatter plot.
    pub assumed_user_support: f64,
    /// Split point of both scatter axes when assigning quadrants.
    pub quadrant_midpoint: f64,
}

impl ScoringConfig {
    pub const fn standard() -> Self {
        Self {
            weights: ExposureWeights::standard(),
            level_thresholds: LevelThresholds::standard(),
            intensity_cutoffs: [20.0, 40.0, 60.0, 80.0],
            assumed_user_support: 60.0,
            quadrant_midpoint: 50.0,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ScoringConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ScoringConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        for dimension in ExposureDimension::ordered() {
            if self.weights.weight(dimension) == 0 {
                return Err(ScoringConfigError::ZeroWeight(dimension));
            }
        }

        let total = self.weights.total();
        if total != 100 {
            return Err(ScoringConfigError::WeightSum(total));
        }

        self.level_thresholds.validate()?;
        ensure_increasing_percentages(
            &self.intensity_cutoffs,
            ScoringConfigError::CutoffsNotIncreasing,
        )?;

        for (name, value) in [
            ("assumed_user_support", self.assumed_user_support),
            ("quadrant_midpoint", self.quadrant_midpoint),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ScoringConfigError::CoordinateOutOfRange { name, value });
            }
        }

        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn ensure_increasing_percentages(
    bounds: &[f64],
    not_increasing: ScoringConfigError,
) -> Result<(), ScoringConfigError> {
    if let Some(value) = bounds
        .iter()
        .copied()
        .find(|value| !(value.is_finite() && *value > 0.0 && *value <= 100.0))
    {
        return Err(ScoringConfigError::BoundOutOfRange(value));
    }

    if bounds.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(not_increasing);
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("exposure weights must sum to 100, got {0}")]
    WeightSum(u16),
    #[error("exposure weight for {0:?} must be greater than zero")]
    ZeroWeight(ExposureDimension),
    #[error("level thresholds must be strictly increasing")]
    ThresholdsNotIncreasing,
    #[error("intensity cutoffs must be strictly increasing")]
    CutoffsNotIncreasing,
    #[error("bound {0} must lie in (0, 100]")]
    BoundOutOfRange(f64),
    #[error("{name} must lie in [0, 100], got {value}")]
    CoordinateOutOfRange { name: &'static str, value: f64 },
    #[error("scoring config is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
}
