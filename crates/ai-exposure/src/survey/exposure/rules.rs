use super::super::config::ExposureWeights;
use super::super::domain::{DimensionScore, ExposureDimension};
use super::ExposureAnswers;

/// Share of the global score contributed by one dimension: `raw / 20 * weight`.
pub(crate) fn contribution(raw: u8, weight: u8) -> f64 {
    let raw = raw.min(ExposureDimension::MAX_SCORE);
    f64::from(raw) / f64::from(ExposureDimension::MAX_SCORE) * f64::from(weight)
}

/// Rounds to two decimals, half away from zero.
pub(crate) fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn weigh_answers(
    answers: &ExposureAnswers,
    weights: &ExposureWeights,
) -> (Vec<DimensionScore<ExposureDimension>>, f64) {
    let dimensions: Vec<_> = ExposureDimension::ordered()
        .into_iter()
        .map(|dimension| DimensionScore {
            dimension,
            raw: answers.raw(dimension),
            max: ExposureDimension::MAX_SCORE,
            weight: Some(weights.weight(dimension)),
        })
        .collect();

    let total: f64 = dimensions
        .iter()
        .map(|score| contribution(score.raw, score.weight.unwrap_or_default()))
        .sum();

    (dimensions, round_to_cents(total).clamp(0.0, 100.0))
}
