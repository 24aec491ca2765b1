//! Boundary parsing of free-form answers into bounded integer scores.

use super::domain::AnswerSheet;
use tracing::debug;

/// Outcome of reading one scale answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScaleReading {
    Valid(u8),
    Missing,
    Unparseable,
    OutOfRange(i64),
}

impl ScaleReading {
    /// Score contributed by the reading; every defect collapses to 0.
    pub(crate) fn score(self) -> u8 {
        match self {
            ScaleReading::Valid(value) => value,
            ScaleReading::Missing | ScaleReading::Unparseable | ScaleReading::OutOfRange(_) => 0,
        }
    }
}

/// Reads an integer in `0..=max`. Decimal strings are truncated toward zero.
pub(crate) fn read_scale(raw: Option<&str>, max: u8) -> ScaleReading {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return ScaleReading::Missing;
    };

    let parsed = raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| value.trunc() as i64)
    });

    match parsed {
        None => ScaleReading::Unparseable,
        Some(value) if (0..=i64::from(max)).contains(&value) => ScaleReading::Valid(value as u8),
        Some(value) => ScaleReading::OutOfRange(value),
    }
}

/// Looks up `key` and scores it, logging whenever the answer is defaulted.
pub(crate) fn score_answer(answers: &AnswerSheet, key: &str, max: u8) -> u8 {
    let reading = read_scale(answers.get(key), max);
    match reading {
        ScaleReading::Valid(_) => {}
        ScaleReading::Missing => debug!(question = key, "missing answer scored as 0"),
        ScaleReading::Unparseable => debug!(
            question = key,
            raw = answers.get(key).unwrap_or_default(),
            "unparseable answer scored as 0"
        ),
        ScaleReading::OutOfRange(value) => {
            debug!(question = key, value, max, "out-of-range answer scored as 0")
        }
    }
    reading.score()
}
