use crate::infra::{answer_sheet, build_service, parse_answer, ReferenceData, ServiceSources};
use ai_exposure::config::ShareConfig;
use ai_exposure::error::AppError;
use ai_exposure::survey::insights::DimensionContribution;
use ai_exposure::survey::share::{EXPOSURE_PARAM, RESULTS_PARAM};
use ai_exposure::survey::{
    AnswerSheet, ComparisonResult, ExposureResult, ExposureSubmission, PerceptionResult,
    PerceptionSubmission, SharedQuery, SharedResult, SurveyService,
};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub(crate) struct ExposureScoreArgs {
    /// Respondent job title
    #[arg(long, default_value = "")]
    pub(crate) job: String,
    /// Respondent department
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Answer as QUESTION=VALUE (repeatable), e.g. --answer automation=10
    #[arg(long = "answer", value_parser = parse_answer)]
    pub(crate) answers: Vec<(String, String)>,
    /// Print the full result as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PerceptionScoreArgs {
    /// Respondent job title
    #[arg(long, default_value = "")]
    pub(crate) job: String,
    /// Answer as QUESTION=VALUE (repeatable), e.g. --answer risk=short
    #[arg(long = "answer", value_parser = parse_answer)]
    pub(crate) answers: Vec<(String, String)>,
    /// Print the full result as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    #[command(flatten)]
    pub(crate) exposure: ExposureScoreArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ShareDecodeArgs {
    /// Value of the `results=` parameter of a shared link
    #[arg(long)]
    pub(crate) results: Option<String>,
    /// Value of the `exposure=` parameter of a shared link
    #[arg(long)]
    pub(crate) exposure: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Origin used for the generated share links (defaults to APP_SHARE_BASE_URL)
    #[arg(long)]
    pub(crate) share_base_url: Option<String>,
}

pub(crate) fn run_exposure_score(
    args: ExposureScoreArgs,
    sources: &ServiceSources,
) -> Result<(), AppError> {
    let service = build_service(sources, share_config(None)?)?;
    let json = args.json;
    let result = service.score_exposure(exposure_submission(args));

    if json {
        print_json(&result);
    } else {
        render_exposure(&result);
    }
    Ok(())
}

pub(crate) fn run_perception_score(
    args: PerceptionScoreArgs,
    sources: &ServiceSources,
) -> Result<(), AppError> {
    let service = build_service(sources, share_config(None)?)?;
    let result = service.score_perception(PerceptionSubmission {
        job: args.job,
        answers: answer_sheet(args.answers),
    });

    if args.json {
        print_json(&result);
    } else {
        render_perception(&result);
    }
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs, sources: &ServiceSources) -> Result<(), AppError> {
    let service = build_service(sources, share_config(None)?)?;
    let json = args.exposure.json;
    let result = service.compare(exposure_submission(args.exposure));

    if json {
        print_json(&result);
    } else {
        render_comparison(&result);
    }
    Ok(())
}

pub(crate) fn run_share_decode(
    args: ShareDecodeArgs,
    sources: &ServiceSources,
) -> Result<(), AppError> {
    let service = build_service(sources, share_config(None)?)?;
    let query = SharedQuery {
        results: args.results,
        exposure: args.exposure,
    };

    match service.resolve_shared(&query) {
        SharedResult::Home => println!("Link does not decode to a result; opening the home view"),
        SharedResult::Exposure(result) => render_exposure(&result),
        SharedResult::Perception(result) => render_perception(&result),
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs, sources: &ServiceSources) -> Result<(), AppError> {
    let service = build_service(sources, share_config(args.share_base_url)?)?;

    println!("AI exposure survey demo");
    let exposure = service.score_exposure(demo_exposure_submission());
    render_exposure(&exposure);

    let comparison = service.compare(demo_exposure_submission());
    render_comparison(&comparison);

    let perception = service.score_perception(demo_perception_submission());
    render_perception(&perception);

    render_share_round_trip(&service, &exposure, &perception);
    Ok(())
}

/// Share origin for printed links: an explicit override, else `APP_SHARE_BASE_URL`.
fn share_config(base_url: Option<String>) -> Result<ShareConfig, AppError> {
    let share = match base_url {
        Some(base_url) => ShareConfig::new(base_url)?,
        None => ShareConfig::from_env()?,
    };
    Ok(share)
}

fn exposure_submission(args: ExposureScoreArgs) -> ExposureSubmission {
    ExposureSubmission {
        job: args.job,
        department: args.department,
        answers: answer_sheet(args.answers),
    }
}

fn demo_exposure_submission() -> ExposureSubmission {
    ExposureSubmission {
        job: "Assistant comptable".to_string(),
        department: Some("Finance".to_string()),
        answers: AnswerSheet::new()
            .with("automation", "10")
            .with("skills", "5")
            .with("activities", "20")
            .with("conditions", "0"),
    }
}

fn demo_perception_submission() -> PerceptionSubmission {
    PerceptionSubmission {
        job: "Assistant comptable".to_string(),
        answers: AnswerSheet::new()
            .with("understanding", "4")
            .with("quality", "5")
            .with("conditions", "3")
            .with("skills", "2")
            .with("implementation", "1")
            .with("tasks", "4")
            .with("risk", "medium"),
    }
}

fn render_exposure(result: &ExposureResult) {
    let insights = &result.insights;
    println!("\nExposure score for {} ({})", insights.job, insights.department);
    println!(
        "  Global score: {:.2}/100 [{}]",
        result.record.global_score, result.classification.label
    );
    println!("  Contributions:");
    for entry in &insights.contributions {
        println!(
            "    - {}: {}/{} x {}% = {:.1} pts",
            entry.label, entry.raw, entry.max, entry.weight, entry.contribution
        );
    }

    println!("  Most impacted: {}", describe(&insights.most_impacted));
    println!("  Least impacted: {}", describe(&insights.least_impacted));
    println!("  {}", insights.interpretation);
    println!("  Share link: {}", result.share_url);
}

fn describe(entries: &[DimensionContribution]) -> String {
    entries
        .iter()
        .map(|entry| format!("{} ({}/{})", entry.label, entry.raw, entry.max))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_perception(result: &PerceptionResult) {
    let insights = &result.insights;
    println!("\nPerception profile for {}", insights.job);
    for point in &insights.radar {
        println!("    - {}: {}/{}", point.label, point.value, point.max);
    }

    match insights.confident_fallback {
        Some(sentence) => println!("  Confident: {sentence}"),
        None => println!(
            "  Confident: {}",
            insights
                .confident
                .iter()
                .map(|point| point.label)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
    match insights.uncertain_fallback {
        Some(sentence) => println!("  Uncertain: {sentence}"),
        None => println!(
            "  Uncertain: {}",
            insights
                .uncertain
                .iter()
                .map(|point| point.label)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
    println!("  Perceived risk horizon: {}", insights.risk_label);
    println!("  Share link: {}", result.share_url);
}

fn render_comparison(result: &ComparisonResult) {
    let report = &result.report;
    println!("\nComparison with reference jobs");
    for entry in &report.ranking.entries {
        let marker = if entry.is_user { " <- you" } else { "" };
        println!(
            "  {}. {} {:.2} [{}]{}",
            entry.rank.unwrap_or_default(),
            entry.job,
            entry.score,
            entry.classification.label,
            marker
        );
    }
    if let Some(user) = &report.ranking.unranked_user {
        println!(
            "  -. {} {:.2} [{}] <- you (no matching reference job)",
            user.job, user.score, user.classification.label
        );
    }

    println!("  Heatmap:");
    for row in &report.heatmap {
        let cells = row
            .cells
            .iter()
            .map(|cell| format!("{} {}/{} ({})", cell.label, cell.value, cell.max, cell.color))
            .collect::<Vec<_>>()
            .join(" | ");
        println!("    - {}: {}", row.job, cells);
    }

    println!("  Support vs impact:");
    for point in &report.scatter {
        println!(
            "    - {} impact {:.1}, support {:.1}: {}",
            point.caption,
            point.impact,
            point.support,
            point.quadrant.label()
        );
    }

    println!(
        "  Recommendation for {}: {}",
        report.recommendation.job, report.recommendation.text
    );
    println!("  Support actions:");
    for action in &report.support_actions {
        println!("    - {action}");
    }
}

fn render_share_round_trip(
    service: &SurveyService<ReferenceData>,
    exposure: &ExposureResult,
    perception: &PerceptionResult,
) {
    println!("\nShare link round trip");
    let query = SharedQuery {
        exposure: token_from(&exposure.share_url, EXPOSURE_PARAM),
        results: token_from(&perception.share_url, RESULTS_PARAM),
    };

    match service.resolve_shared(&query) {
        SharedResult::Exposure(shared) => println!(
            "  Both links present, exposure view wins: {:.2}/100 (original {:.2})",
            shared.record.global_score, exposure.record.global_score
        ),
        SharedResult::Perception(_) => println!("  Unexpected perception view"),
        SharedResult::Home => println!("  Links did not decode"),
    }
}

fn token_from(url: &str, param: &str) -> Option<String> {
    url.split_once(&format!("?{param}="))
        .map(|(_, token)| token.to_string())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("Result unavailable: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_read_from_share_urls() {
        assert_eq!(
            token_from("http://localhost:3000?exposure=abc%3D", EXPOSURE_PARAM),
            Some("abc%3D".to_string())
        );
        assert_eq!(token_from("http://localhost:3000", RESULTS_PARAM), None);
    }

    #[test]
    fn share_links_follow_the_configured_origin() {
        std::env::set_var("APP_SHARE_BASE_URL", "https://survey.example.org");
        let from_env = share_config(None);
        std::env::remove_var("APP_SHARE_BASE_URL");
        assert_eq!(
            from_env.expect("env origin").base_url(),
            "https://survey.example.org"
        );

        let explicit = share_config(Some("https://impact.example.fr/".to_string()))
            .expect("explicit origin");
        assert_eq!(explicit.base_url(), "https://impact.example.fr");

        let service = build_service(&ServiceSources::default(), explicit).expect("service builds");
        let result = service.score_exposure(demo_exposure_submission());
        assert!(result
            .share_url
            .starts_with("https://impact.example.fr?exposure="));
    }

    #[test]
    fn demo_runs_end_to_end_with_sample_references() {
        run_demo(DemoArgs::default(), &ServiceSources::default()).expect("demo runs");
    }

    #[test]
    fn demo_rejects_invalid_share_origins() {
        let args = DemoArgs {
            share_base_url: Some("ftp://example.org".to_string()),
        };
        assert!(matches!(
            run_demo(args, &ServiceSources::default()),
            Err(AppError::Config(_))
        ));
    }
}
