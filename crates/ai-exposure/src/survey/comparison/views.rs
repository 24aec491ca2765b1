use super::super::classification::{Classification, Level};
use super::reference::ReferenceDimension;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RankingEntry {
    /// 1-based position, absent for a respondent who matched no reference job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    pub job: String,
    pub score: f64,
    pub is_user: bool,
    pub classification: Classification,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingTable {
    pub entries: Vec<RankingEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unranked_user: Option<RankingEntry>,
}

impl RankingTable {
    pub fn user_entry(&self) -> Option<&RankingEntry> {
        self.entries
            .iter()
            .find(|entry| entry.is_user)
            .or(self.unranked_user.as_ref())
    }
}

/// Five-step heat intensity of a dimension value relative to its max.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityBand {
    Minimal,
    Low,
    Medium,
    High,
    Critical,
}

impl IntensityBand {
    pub const fn color(self) -> &'static str {
        match self {
            Self::Minimal => "gray",
            Self::Low => "blue",
            Self::Medium => "yellow",
            Self::High => "orange",
            Self::Critical => "red",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapCell {
    pub dimension: ReferenceDimension,
    pub label: &'static str,
    pub value: u8,
    pub max: u8,
    pub intensity_pct: f64,
    pub band: IntensityBand,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapRow {
    pub job: String,
    pub is_user: bool,
    pub cells: Vec<HeatmapCell>,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    WellSupportedHighImpact,
    WellSupportedLowImpact,
    UnderSupportedHighImpact,
    UnderSupportedLowImpact,
}

impl Quadrant {
    pub const fn label(self) -> &'static str {
        match self {
            Self::WellSupportedHighImpact => "Bien accompagnés, très impactés",
            Self::WellSupportedLowImpact => "Bien accompagnés, peu impactés",
            Self::UnderSupportedHighImpact => "Peu accompagnés, très impactés",
            Self::UnderSupportedLowImpact => "Peu accompagnés, peu impactés",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint {
    pub job: String,
    /// First word of the job, used as the point caption.
    pub caption: String,
    /// Exposure score, vertical axis.
    pub impact: f64,
    /// Ease of support, horizontal axis.
    pub support: f64,
    pub is_user: bool,
    pub quadrant: Quadrant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTrack {
    LightMonitoring,
    AwarenessAndAdjustments,
    ReinforcedMonitoring,
}

impl RecommendationTrack {
    pub const fn for_level(level: Level) -> Self {
        match level {
            Level::Low => Self::LightMonitoring,
            Level::Moderate => Self::AwarenessAndAdjustments,
            Level::High | Level::VeryHigh => Self::ReinforcedMonitoring,
        }
    }

    pub const fn text(self) -> &'static str {
        match self {
            Self::LightMonitoring => "Suivi léger, formation continue",
            Self::AwarenessAndAdjustments => "Sensibilisation, ajustements",
            Self::ReinforcedMonitoring => "Suivi renforcé, plan de reconversion",
        }
    }
}

/// Organisational support levers listed alongside every recommendation.
pub const SUPPORT_ACTIONS: [&str; 4] = [
    "Formation continue aux outils IA sectoriels",
    "Accompagnement personnalisé par métier",
    "Création de communautés de pratique",
    "Mise en place d'un référent IA par service",
];

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub job: String,
    pub score: f64,
    pub classification: Classification,
    pub track: RecommendationTrack,
    pub text: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub ranking: RankingTable,
    pub heatmap: Vec<HeatmapRow>,
    pub scatter: Vec<ScatterPoint>,
    pub recommendation: Recommendation,
    pub reference_recommendations: Vec<Recommendation>,
    pub support_actions: Vec<&'static str>,
}
