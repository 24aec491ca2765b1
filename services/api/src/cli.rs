use crate::demo::{
    run_compare, run_demo, run_exposure_score, run_perception_score, run_share_decode,
    CompareArgs, DemoArgs, ExposureScoreArgs, PerceptionScoreArgs, ShareDecodeArgs,
};
use crate::infra::ServiceSources;
use crate::server;
use ai_exposure::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "AI Exposure Survey",
    about = "Score AI-impact questionnaires, compare them against reference jobs and serve the survey API",
    version
)]
struct Cli {
    /// JSON file overriding weights, level thresholds and heatmap cutoffs
    #[arg(long, global = true)]
    scoring_config: Option<PathBuf>,
    /// CSV export of reference job profiles (defaults to the bundled sample)
    #[arg(long, global = true)]
    reference_csv: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score the weighted exposure questionnaire
    Exposure {
        #[command(subcommand)]
        command: ExposureCommand,
    },
    /// Score the perception questionnaire
    Perception {
        #[command(subcommand)]
        command: PerceptionCommand,
    },
    /// Place an exposure questionnaire among the reference jobs
    Compare(CompareArgs),
    /// Inspect shareable result links
    Share {
        #[command(subcommand)]
        command: ShareCommand,
    },
    /// Walk through scoring, comparison and sharing with a sample respondent
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ExposureCommand {
    /// Compute the weighted exposure index and its level
    Score(ExposureScoreArgs),
}

#[derive(Subcommand, Debug)]
enum PerceptionCommand {
    /// Compute the perception radar, highlights and risk horizon
    Score(PerceptionScoreArgs),
}

#[derive(Subcommand, Debug)]
enum ShareCommand {
    /// Decode a shared link and print the view it opens
    Decode(ShareDecodeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let sources = ServiceSources {
        scoring_config: cli.scoring_config,
        reference_csv: cli.reference_csv,
    };
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args, sources).await,
        Command::Exposure {
            command: ExposureCommand::Score(args),
        } => run_exposure_score(args, &sources),
        Command::Perception {
            command: PerceptionCommand::Score(args),
        } => run_perception_score(args, &sources),
        Command::Compare(args) => run_compare(args, &sources),
        Command::Share {
            command: ShareCommand::Decode(args),
        } => run_share_decode(args, &sources),
        Command::Demo(args) => run_demo(args, &sources),
    }
}
