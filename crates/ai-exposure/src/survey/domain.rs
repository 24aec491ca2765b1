use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Axis of the weighted exposure index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureDimension {
    Automation,
    Skills,
    Activities,
    Conditions,
}

impl ExposureDimension {
    pub const MAX_SCORE: u8 = 20;

    pub const fn ordered() -> [Self; 4] {
        [
            Self::Automation,
            Self::Skills,
            Self::Activities,
            Self::Conditions,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Automation => "automation",
            Self::Skills => "skills",
            Self::Activities => "activities",
            Self::Conditions => "conditions",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Automation => "Automatisation des tâches",
            Self::Skills => "Transformation des compétences",
            Self::Activities => "Modification des activités",
            Self::Conditions => "Conditions de travail",
        }
    }

    /// Column header used by the comparison heatmap.
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::Automation => "Automatisation",
            Self::Skills => "Compétences",
            Self::Activities => "Activités",
            Self::Conditions => "Conditions",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|dimension| dimension.key() == key)
    }
}

/// Likert axis of the perception questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerceptionDimension {
    Understanding,
    Quality,
    Conditions,
    Skills,
    Implementation,
    Tasks,
}

impl PerceptionDimension {
    pub const MAX_SCORE: u8 = 5;

    pub const fn ordered() -> [Self; 6] {
        [
            Self::Understanding,
            Self::Quality,
            Self::Conditions,
            Self::Skills,
            Self::Implementation,
            Self::Tasks,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Understanding => "understanding",
            Self::Quality => "quality",
            Self::Conditions => "conditions",
            Self::Skills => "skills",
            Self::Implementation => "implementation",
            Self::Tasks => "tasks",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Understanding => "Compréhension des usages IA",
            Self::Quality => "Amélioration qualité/efficacité",
            Self::Conditions => "Amélioration conditions travail",
            Self::Skills => "Transformation compétences",
            Self::Implementation => "Facilité mise en œuvre",
            Self::Tasks => "Impact tâches quotidiennes",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|dimension| dimension.key() == key)
    }
}

/// Perceived time horizon of a threat to the respondent's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskHorizon {
    #[serde(rename = "none")]
    NoRisk,
    #[serde(rename = "short")]
    ShortTerm,
    #[serde(rename = "medium")]
    MediumTerm,
    #[serde(rename = "long")]
    LongTerm,
}

impl RiskHorizon {
    /// Neutral horizon used when no recognizable answer was captured.
    pub const DEFAULT: Self = Self::MediumTerm;

    pub const fn ordered() -> [Self; 4] {
        [
            Self::NoRisk,
            Self::ShortTerm,
            Self::MediumTerm,
            Self::LongTerm,
        ]
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::NoRisk => "none",
            Self::ShortTerm => "short",
            Self::MediumTerm => "medium",
            Self::LongTerm => "long",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NoRisk => "Aucun risque",
            Self::ShortTerm => "Court terme",
            Self::MediumTerm => "3-5 ans",
            Self::LongTerm => "Au-delà de 5 ans",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ordered()
            .into_iter()
            .find(|horizon| horizon.token().eq_ignore_ascii_case(token))
    }
}

impl Default for RiskHorizon {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Free-form answers as captured by the questionnaire UI.
///
/// Values arrive as strings, but numbers are tolerated and stringified so that
/// JSON clients sending `{"automation": 10}` are scored the same way as
/// `{"automation": "10"}`. Anything else is dropped and scored as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct AnswerSheet(BTreeMap<String, String>);

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, question_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(question_id, value);
        self
    }

    pub fn insert(&mut self, question_id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(question_id.into(), value.into());
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl From<BTreeMap<String, Value>> for AnswerSheet {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        raw.into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(text) => Some((key, text)),
                Value::Number(number) => Some((key, number.to_string())),
                _ => None,
            })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerSheet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Who answered the questionnaire, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectMetadata {
    pub job: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl SubjectMetadata {
    pub const UNSPECIFIED_JOB: &'static str = "Métier non spécifié";
    pub const UNSPECIFIED_DEPARTMENT: &'static str = "Département non spécifié";

    pub fn new(
        job: impl Into<String>,
        department: Option<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let job = job.into().trim().to_string();
        let department = department
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Self {
            job,
            department,
            submitted_at,
        }
    }

    pub fn display_job(&self) -> &str {
        if self.job.is_empty() {
            Self::UNSPECIFIED_JOB
        } else {
            &self.job
        }
    }

    pub fn display_department(&self) -> &str {
        self.department
            .as_deref()
            .unwrap_or(Self::UNSPECIFIED_DEPARTMENT)
    }
}

/// Raw score of one dimension, with its scale and optional weight in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore<D> {
    pub dimension: D,
    pub raw: u8,
    pub max: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u8>,
}

impl<D> DimensionScore<D> {
    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            f64::from(self.raw) / f64::from(self.max)
        }
    }
}
