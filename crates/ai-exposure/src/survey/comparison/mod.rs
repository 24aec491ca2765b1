//! Deterministic comparison of an exposure record against reference job profiles.
//!
//! Nothing here is statistical: the comparator ranks, buckets and labels the
//! reference data it is handed, substituting the respondent's score where
//! their job matches a reference label.

mod reference;
pub mod views;

pub use reference::{
    CsvReferenceSource, ReferenceDimension, ReferenceError, ReferenceProfile, ReferenceScores,
    ReferenceSource, StaticReferenceSource,
};
pub use views::{
    ComparisonReport, HeatmapCell, HeatmapRow, IntensityBand, Quadrant, RankingEntry,
    RankingTable, Recommendation, RecommendationTrack, ScatterPoint, SUPPORT_ACTIONS,
};

use super::classification::{Classifier, ScoreScale};
use super::config::{ScoringConfig, ScoringConfigError};
use super::exposure::ExposureRecord;

/// True when the first word of `user_job` appears in `reference_job`, ignoring case.
/// A blank job never matches.
pub fn job_matches(user_job: &str, reference_job: &str) -> bool {
    match user_job.split_whitespace().next() {
        Some(first_word) => reference_job
            .to_lowercase()
            .contains(&first_word.to_lowercase()),
        None => false,
    }
}

/// Buckets `value / max` against the four percentage cutoffs.
pub fn intensity_band(value: u8, max: u8, cutoffs: &[f64; 4]) -> IntensityBand {
    let intensity = intensity_pct(value, max);
    let [low, medium, high, critical] = *cutoffs;
    if intensity >= critical {
        IntensityBand::Critical
    } else if intensity >= high {
        IntensityBand::High
    } else if intensity >= medium {
        IntensityBand::Medium
    } else if intensity >= low {
        IntensityBand::Low
    } else {
        IntensityBand::Minimal
    }
}

fn intensity_pct(value: u8, max: u8) -> f64 {
    if max == 0 {
        0.0
    } else {
        f64::from(value) * 100.0 / f64::from(max)
    }
}

fn caption(job: &str) -> String {
    job.split_whitespace().next().unwrap_or_default().to_string()
}

pub struct Comparator<S> {
    source: S,
    classifier: Classifier,
    intensity_cutoffs: [f64; 4],
    assumed_user_support: f64,
    quadrant_midpoint: f64,
}

impl<S: ReferenceSource> Comparator<S> {
    pub fn new(source: S, config: &ScoringConfig) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        Ok(Self {
            source,
            classifier: Classifier::new(config.level_thresholds)?,
            intensity_cutoffs: config.intensity_cutoffs,
            assumed_user_support: config.assumed_user_support,
            quadrant_midpoint: config.quadrant_midpoint,
        })
    }

    pub fn standard(source: S) -> Self {
        let config = ScoringConfig::standard();
        Self {
            source,
            classifier: Classifier::standard(),
            intensity_cutoffs: config.intensity_cutoffs,
            assumed_user_support: config.assumed_user_support,
            quadrant_midpoint: config.quadrant_midpoint,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn compare(&self, record: &ExposureRecord) -> ComparisonReport {
        ComparisonReport {
            ranking: self.ranking(record),
            heatmap: self.heatmap(record),
            scatter: self.scatter(record),
            recommendation: self.recommendation(record),
            reference_recommendations: self.reference_recommendations(),
            support_actions: SUPPORT_ACTIONS.to_vec(),
        }
    }

    /// Index of the first reference profile whose label matches the respondent's job.
    pub fn matched_profile(&self, record: &ExposureRecord) -> Option<usize> {
        self.source
            .profiles()
            .iter()
            .position(|profile| job_matches(&record.subject.job, &profile.job))
    }

    /// Descending by score; equal scores keep the source order.
    pub fn ranking(&self, record: &ExposureRecord) -> RankingTable {
        let matched = self.matched_profile(record);

        let mut entries: Vec<RankingEntry> = self
            .source
            .profiles()
            .iter()
            .enumerate()
            .map(|(index, profile)| {
                let is_user = matched == Some(index);
                let score = if is_user {
                    record.global_score
                } else {
                    profile.total
                };
                self.entry(profile.job.clone(), score, is_user)
            })
            .collect();

        entries.sort_by(|left, right| right.score.total_cmp(&left.score));
        for (position, entry) in entries.iter_mut().enumerate() {
            entry.rank = Some(position + 1);
        }

        let unranked_user = match matched {
            Some(_) => None,
            None => Some(self.entry(
                record.subject.display_job().to_string(),
                record.global_score,
                true,
            )),
        };

        RankingTable {
            entries,
            unranked_user,
        }
    }

    /// One row per reference profile; the respondent's row shows their own total.
    pub fn heatmap(&self, record: &ExposureRecord) -> Vec<HeatmapRow> {
        let matched = self.matched_profile(record);

        self.source
            .profiles()
            .iter()
            .enumerate()
            .map(|(index, profile)| {
                let is_user = matched == Some(index);
                HeatmapRow {
                    job: profile.job.clone(),
                    is_user,
                    cells: self.heatmap_cells(profile),
                    total: if is_user {
                        record.global_score
                    } else {
                        profile.total
                    },
                }
            })
            .collect()
    }

    fn heatmap_cells(&self, profile: &ReferenceProfile) -> Vec<HeatmapCell> {
        ReferenceDimension::ordered()
            .into_iter()
            .map(|dimension| {
                let value = profile.scores.get(dimension);
                let max = ReferenceDimension::MAX_SCORE;
                let band = intensity_band(value, max, &self.intensity_cutoffs);
                HeatmapCell {
                    dimension,
                    label: dimension.label(),
                    value,
                    max,
                    intensity_pct: intensity_pct(value, max),
                    band,
                    color: band.color(),
                }
            })
            .collect()
    }

    /// Reference points followed by the respondent, placed at the assumed support coordinate.
    pub fn scatter(&self, record: &ExposureRecord) -> Vec<ScatterPoint> {
        let mut points: Vec<ScatterPoint> = self
            .source
            .profiles()
            .iter()
            .map(|profile| self.point(&profile.job, profile.total, profile.support_ease, false))
            .collect();

        points.push(self.point(
            record.subject.display_job(),
            record.global_score,
            self.assumed_user_support,
            true,
        ));
        points
    }

    pub fn recommendation(&self, record: &ExposureRecord) -> Recommendation {
        self.recommend(
            record.subject.display_job().to_string(),
            record.global_score,
        )
    }

    pub fn reference_recommendations(&self) -> Vec<Recommendation> {
        self.source
            .profiles()
            .iter()
            .map(|profile| self.recommend(profile.job.clone(), profile.total))
            .collect()
    }

    fn entry(&self, job: String, score: f64, is_user: bool) -> RankingEntry {
        RankingEntry {
            rank: None,
            job,
            score,
            is_user,
            classification: self.classifier.classification(score, ScoreScale::Percent),
        }
    }

    fn recommend(&self, job: String, score: f64) -> Recommendation {
        let classification = self.classifier.classification(score, ScoreScale::Percent);
        let track = RecommendationTrack::for_level(classification.level);
        Recommendation {
            job,
            score,
            classification,
            track,
            text: track.text(),
        }
    }

    fn point(&self, job: &str, impact: f64, support: f64, is_user: bool) -> ScatterPoint {
        let well_supported = support >= self.quadrant_midpoint;
        let high_impact = impact >= self.quadrant_midpoint;
        let quadrant = match (well_supported, high_impact) {
            (true, true) => Quadrant::WellSupportedHighImpact,
            (true, false) => Quadrant::WellSupportedLowImpact,
            (false, true) => Quadrant::UnderSupportedHighImpact,
            (false, false) => Quadrant::UnderSupportedLowImpact,
        };

        ScatterPoint {
            job: job.to_string(),
            caption: caption(job),
            impact,
            support,
            is_user,
            quadrant,
        }
    }
}
