use super::super::domain::ExposureDimension;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Column of the comparison heatmap: the exposure axes plus organisational support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceDimension {
    Automation,
    Skills,
    Activities,
    Conditions,
    Support,
}

impl ReferenceDimension {
    pub const MAX_SCORE: u8 = 20;

    pub const fn ordered() -> [Self; 5] {
        [
            Self::Automation,
            Self::Skills,
            Self::Activities,
            Self::Conditions,
            Self::Support,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Automation => ExposureDimension::Automation.short_label(),
            Self::Skills => ExposureDimension::Skills.short_label(),
            Self::Activities => ExposureDimension::Activities.short_label(),
            Self::Conditions => ExposureDimension::Conditions.short_label(),
            Self::Support => "Accompagnement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceScores {
    pub automation: u8,
    pub skills: u8,
    pub activities: u8,
    pub conditions: u8,
    pub support: u8,
}

impl ReferenceScores {
    pub const fn get(&self, dimension: ReferenceDimension) -> u8 {
        match dimension {
            ReferenceDimension::Automation => self.automation,
            ReferenceDimension::Skills => self.skills,
            ReferenceDimension::Activities => self.activities,
            ReferenceDimension::Conditions => self.conditions,
            ReferenceDimension::Support => self.support,
        }
    }
}

/// Read-only comparison point representing another job archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceProfile {
    pub job: String,
    pub scores: ReferenceScores,
    /// Exposure score out of 100.
    pub total: f64,
    /// Ease of being supported through the transition, out of 100.
    pub support_ease: f64,
}

/// Supplies the reference profiles the comparator ranks against.
pub trait ReferenceSource: Send + Sync {
    fn profiles(&self) -> &[ReferenceProfile];
}

/// In-memory reference data.
#[derive(Debug, Clone, Default)]
pub struct StaticReferenceSource {
    profiles: Vec<ReferenceProfile>,
}

impl StaticReferenceSource {
    pub fn new(profiles: Vec<ReferenceProfile>) -> Self {
        Self { profiles }
    }

    /// Five simulated job archetypes shipped with the survey.
    pub fn sample() -> Self {
        Self::new(vec![
            profile("Développeur informatique", [16, 20, 16, 12, 16], 80.0, 75.0),
            profile("Assistant comptable", [18, 16, 12, 14, 12], 72.0, 45.0),
            profile("Responsable RH", [8, 10, 12, 8, 12], 50.0, 65.0),
            profile("Chargé de clientèle", [12, 14, 10, 8, 6], 50.0, 35.0),
            profile("Technicien de maintenance", [4, 6, 6, 6, 8], 30.0, 55.0),
        ])
    }
}

impl ReferenceSource for StaticReferenceSource {
    fn profiles(&self) -> &[ReferenceProfile] {
        &self.profiles
    }
}

fn profile(job: &str, scores: [u8; 5], total: f64, support_ease: f64) -> ReferenceProfile {
    let [automation, skills, activities, conditions, support] = scores;
    ReferenceProfile {
        job: job.to_string(),
        scores: ReferenceScores {
            automation,
            skills,
            activities,
            conditions,
            support,
        },
        total,
        support_ease,
    }
}

/// Reference profiles imported once from a CSV export.
///
/// Expected header: `job,automation,skills,activities,conditions,support,total,support_ease`.
#[derive(Debug, Clone)]
pub struct CsvReferenceSource {
    profiles: Vec<ReferenceProfile>,
}

impl CsvReferenceSource {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut profiles = Vec::new();
        for (index, row) in csv_reader.deserialize::<ReferenceRow>().enumerate() {
            let row = row?;
            // Header is line 1.
            profiles.push(row.into_profile(index + 2)?);
        }

        if profiles.is_empty() {
            return Err(ReferenceError::Empty);
        }

        Ok(Self { profiles })
    }
}

impl ReferenceSource for CsvReferenceSource {
    fn profiles(&self) -> &[ReferenceProfile] {
        &self.profiles
    }
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    job: String,
    automation: u8,
    skills: u8,
    activities: u8,
    conditions: u8,
    support: u8,
    total: f64,
    support_ease: f64,
}

impl ReferenceRow {
    fn into_profile(self, line: usize) -> Result<ReferenceProfile, ReferenceError> {
        if self.job.is_empty() {
            return Err(ReferenceError::InvalidRow {
                line,
                reason: "job label is empty".to_string(),
            });
        }

        let scores = ReferenceScores {
            automation: self.automation,
            skills: self.skills,
            activities: self.activities,
            conditions: self.conditions,
            support: self.support,
        };
        if let Some(dimension) = ReferenceDimension::ordered()
            .into_iter()
            .find(|dimension| scores.get(*dimension) > ReferenceDimension::MAX_SCORE)
        {
            return Err(ReferenceError::InvalidRow {
                line,
                reason: format!(
                    "{} score {} exceeds {}",
                    dimension.label(),
                    scores.get(dimension),
                    ReferenceDimension::MAX_SCORE
                ),
            });
        }

        for (name, value) in [("total", self.total), ("support_ease", self.support_ease)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ReferenceError::InvalidRow {
                    line,
                    reason: format!("{name} {value} must lie in [0, 100]"),
                });
            }
        }

        Ok(ReferenceProfile {
            job: self.job,
            scores,
            total: self.total,
            support_ease: self.support_ease,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("malformed reference CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("reference row {line} is invalid: {reason}")]
    InvalidRow { line: usize, reason: String },
    #[error("reference data contains no profiles")]
    Empty,
}
