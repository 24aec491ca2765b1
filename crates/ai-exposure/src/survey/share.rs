//! Shareable result links: a JSON payload, base64-encoded into a query parameter.
//!
//! Decoding is lenient about transport damage (padding, `+` turned into spaces,
//! percent-escapes, URL-safe alphabet, Latin-1 payloads produced by `btoa`) but
//! never trusts the carried global score: records are always rescored from the
//! raw per-dimension values.

use super::domain::{AnswerSheet, ExposureDimension, PerceptionDimension, SubjectMetadata};
use super::exposure::{ExposureAnswers, ExposureRecord, ExposureScorer};
use super::perception::{PerceptionRecord, PerceptionScorer};
use super::questions::RISK_QUESTION_ID;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub const EXPOSURE_PARAM: &str = "exposure";
pub const RESULTS_PARAM: &str = "results";

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureSharePayload {
    pub job: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub scores: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_score: Option<f64>,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptionSharePayload {
    pub job: String,
    pub scores: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,
    pub date: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("share token is empty")]
    Empty,
    #[error("share token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("share payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("share payload date '{0}' is not ISO 8601")]
    InvalidDate(String),
}

/// Query parameters a shared link may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SharedQuery {
    #[serde(default)]
    pub results: Option<String>,
    #[serde(default)]
    pub exposure: Option<String>,
}

/// What the host should display for an incoming link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", content = "record", rename_all = "snake_case")]
pub enum SharedView {
    Home,
    Perception(PerceptionRecord),
    Exposure(ExposureRecord),
}

pub fn encode_exposure(record: &ExposureRecord) -> String {
    let payload = ExposureSharePayload {
        job: record.subject.job.clone(),
        department: record.subject.department.clone(),
        scores: numeric_scores(
            record
                .dimensions
                .iter()
                .map(|score| (score.dimension.key(), score.raw)),
        ),
        global_score: Some(record.global_score),
        date: format_date(record.subject.submitted_at),
    };
    encode_payload(&payload)
}

pub fn encode_perception(record: &PerceptionRecord) -> String {
    let payload = PerceptionSharePayload {
        job: record.subject.job.clone(),
        scores: numeric_scores(
            record
                .dimensions
                .iter()
                .map(|score| (score.dimension.key(), score.raw)),
        ),
        risk: record.risk.submitted.clone(),
        date: format_date(record.subject.submitted_at),
    };
    encode_payload(&payload)
}

pub fn decode_exposure(token: &str, scorer: &ExposureScorer) -> Result<ExposureRecord, ShareError> {
    let payload: ExposureSharePayload = decode_payload(token)?;
    let submitted_at = parse_date(&payload.date)?;

    let answers = answer_sheet(
        &payload.scores,
        ExposureDimension::ordered().map(ExposureDimension::key),
    );
    let subject = SubjectMetadata::new(
        strip_placeholder(payload.job, SubjectMetadata::UNSPECIFIED_JOB),
        payload
            .department
            .map(|value| strip_placeholder(value, SubjectMetadata::UNSPECIFIED_DEPARTMENT)),
        submitted_at,
    );

    let record = scorer.score_answers(subject, &ExposureAnswers::from_sheet(&answers));
    if let Some(carried) = payload.global_score {
        if (carried - record.global_score).abs() > 0.005 {
            debug!(
                carried,
                recomputed = record.global_score,
                "shared global score differs from recomputed value"
            );
        }
    }
    Ok(record)
}

pub fn decode_perception(
    token: &str,
    scorer: &PerceptionScorer,
) -> Result<PerceptionRecord, ShareError> {
    let payload: PerceptionSharePayload = decode_payload(token)?;
    let submitted_at = parse_date(&payload.date)?;

    let mut answers = answer_sheet(
        &payload.scores,
        PerceptionDimension::ordered().map(PerceptionDimension::key),
    );
    if let Some(risk) = payload.risk {
        answers.insert(RISK_QUESTION_ID, risk);
    }

    let subject = SubjectMetadata::new(
        strip_placeholder(payload.job, SubjectMetadata::UNSPECIFIED_JOB),
        None,
        submitted_at,
    );
    Ok(scorer.score(subject, &answers))
}

/// Never fails: undecodable links are logged and fall back to the home view.
/// When both parameters decode, the exposure view wins.
pub fn resolve_shared_view(
    query: &SharedQuery,
    exposure: &ExposureScorer,
    perception: &PerceptionScorer,
) -> SharedView {
    let mut view = SharedView::Home;

    if let Some(token) = query.results.as_deref() {
        match decode_perception(token, perception) {
            Ok(record) => view = SharedView::Perception(record),
            Err(error) => {
                warn!(%error, param = RESULTS_PARAM, "ignoring undecodable shared results")
            }
        }
    }

    if let Some(token) = query.exposure.as_deref() {
        match decode_exposure(token, exposure) {
            Ok(record) => view = SharedView::Exposure(record),
            Err(error) => {
                warn!(%error, param = EXPOSURE_PARAM, "ignoring undecodable shared exposure")
            }
        }
    }

    view
}

/// `{base}?{param}={token}` with the base64 reserved characters percent-escaped.
pub fn share_url(base_url: &str, param: &str, token: &str) -> String {
    let mut escaped = String::with_capacity(token.len());
    for character in token.chars() {
        match character {
            '+' => escaped.push_str("%2B"),
            '/' => escaped.push_str("%2F"),
            '=' => escaped.push_str("%3D"),
            other => escaped.push(other),
        }
    }
    format!("{}?{param}={escaped}", base_url.trim_end_matches('/'))
}

fn encode_payload<T: Serialize>(payload: &T) -> String {
    // Serializing plain strings, numbers and maps cannot fail.
    let json = serde_json::to_vec(payload).unwrap_or_default();
    STANDARD.encode(json)
}

fn decode_payload<T: for<'de> Deserialize<'de>>(token: &str) -> Result<T, ShareError> {
    let token = normalize_token(token);
    if token.is_empty() {
        return Err(ShareError::Empty);
    }

    let bytes = match STANDARD_LENIENT.decode(&token) {
        Ok(bytes) => bytes,
        Err(standard_error) => URL_SAFE_LENIENT
            .decode(&token)
            .map_err(|_| standard_error)?,
    };

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        // `btoa` encodes each UTF-16 unit below 256 as one byte.
        Err(error) => error.into_bytes().into_iter().map(char::from).collect(),
    };

    Ok(serde_json::from_str(&text)?)
}

fn normalize_token(token: &str) -> String {
    token
        .trim()
        .replace("%2B", "+")
        .replace("%2b", "+")
        .replace("%2F", "/")
        .replace("%2f", "/")
        .replace("%3D", "=")
        .replace("%3d", "=")
        .replace(' ', "+")
}

fn numeric_scores<'a>(scores: impl Iterator<Item = (&'a str, u8)>) -> BTreeMap<String, Value> {
    scores
        .map(|(key, raw)| (key.to_string(), Value::from(raw)))
        .collect()
}

fn answer_sheet<'a>(
    scores: &BTreeMap<String, Value>,
    keys: impl IntoIterator<Item = &'a str>,
) -> AnswerSheet {
    keys.into_iter()
        .filter_map(|key| {
            let value = match scores.get(key)? {
                Value::Number(number) => number.to_string(),
                Value::String(text) => text.clone(),
                _ => return None,
            };
            Some((key, value))
        })
        .collect()
}

fn strip_placeholder(value: String, placeholder: &str) -> String {
    if value.trim() == placeholder {
        String::new()
    } else {
        value
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, ShareError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| ShareError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submitted_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn accepts_unpadded_and_url_safe_tokens() {
        let json = r#"{"job":"Dev","scores":{"automation":20},"date":"2025-03-14T09:30:00.000Z"}"#;
        let padded = STANDARD.encode(json);
        let unpadded = padded.trim_end_matches('=').to_string();
        let url_safe = padded.replace('+', "-").replace('/', "_");

        for token in [padded, unpadded, url_safe] {
            let record = decode_exposure(&token, &ExposureScorer::standard())
                .expect("token decodes");
            assert_eq!(record.raw(ExposureDimension::Automation), 20);
            assert_eq!(record.global_score, 35.0);
        }
    }

    #[test]
    fn decodes_latin1_payloads() {
        let json =
            r#"{"job":"Développeur","scores":{"skills":10},"date":"2025-03-14T09:30:00.000Z"}"#;
        let latin1: Vec<u8> = json.chars().map(|character| character as u8).collect();
        let token = STANDARD.encode(latin1);

        let record =
            decode_exposure(&token, &ExposureScorer::standard()).expect("latin-1 token decodes");
        assert_eq!(record.subject.job, "Développeur");
        assert_eq!(record.raw(ExposureDimension::Skills), 10);
    }

    #[test]
    fn share_url_escapes_reserved_characters() {
        let url = share_url("https://survey.example.org/", EXPOSURE_PARAM, "ab+c/d==");
        assert_eq!(url, "https://survey.example.org?exposure=ab%2Bc%2Fd%3D%3D");
        assert_eq!(normalize_token("ab%2Bc%2Fd%3D%3D"), "ab+c/d==");
        assert_eq!(normalize_token("ab c"), "ab+c");
    }

    #[test]
    fn placeholder_labels_are_not_carried_as_values() {
        let json =
            r#"{"job":"Métier non spécifié","department":"Département non spécifié","scores":{},"date":"2025-03-14T09:30:00Z"}"#;
        let record = decode_exposure(&STANDARD.encode(json), &ExposureScorer::standard())
            .expect("token decodes");
        assert_eq!(record.subject.job, "");
        assert!(record.subject.department.is_none());
        assert_eq!(record.subject.submitted_at, submitted_at());
    }

    #[test]
    fn rejects_invalid_dates() {
        let json = r#"{"job":"Dev","scores":{},"date":"yesterday"}"#;
        let err = decode_exposure(&STANDARD.encode(json), &ExposureScorer::standard())
            .expect_err("date is not ISO 8601");
        assert!(matches!(err, ShareError::InvalidDate(_)));
    }
}
