use crate::commands::{
    self, BatchArgs, CatalogArgs, EvaluateArgs, TablesArgs, ValidateArgs,
};
use crate::demo::run_demo;
use clap::{Parser, Subcommand};
use crm_qualification::config::AppConfig;
use crm_qualification::error::AppError;
use crm_qualification::qualification::{EvaluationEngine, LabelMatching, StatusTransitionGuard};
use crm_qualification::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "lead-qualify",
    about = "Score CRM leads against their vertical's qualification criteria",
    version
)]
struct Cli {
    /// Calendar year used for company-age criteria (defaults to the current year)
    #[arg(long, global = true)]
    reference_year: Option<i32>,
    /// Ignore case, dash style and spacing when matching option labels
    #[arg(long, global = true)]
    normalize_labels: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a single JSON lead record and show the breakdown
    Evaluate(EvaluateArgs),
    /// Run the save-time status guard against a JSON lead record
    Validate(ValidateArgs),
    /// Score every lead in a CSV export
    Batch(BatchArgs),
    /// List the criterion tables
    Tables(TablesArgs),
    /// List vertical, sub-vertical and sub-service options
    Catalog(CatalogArgs),
    /// Walk a lead through create, refresh, and save with in-memory storage
    Demo,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(year) = cli.reference_year {
        config.qualification.reference_year = Some(year);
    }
    if cli.normalize_labels {
        config.qualification.label_matching = LabelMatching::Normalized;
    }
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, ?config.qualification, "configuration loaded");

    let evaluation = config.evaluation();
    let engine = EvaluationEngine::new(evaluation);

    match cli.command {
        Command::Evaluate(args) => commands::evaluate(&engine, args),
        Command::Validate(args) => commands::validate(&StatusTransitionGuard::new(engine), args),
        Command::Batch(args) => commands::batch(&engine, args),
        Command::Tables(args) => commands::tables(args),
        Command::Catalog(args) => commands::catalog(args),
        Command::Demo => run_demo(evaluation),
    }
}
