use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use gsal::app::{self, AppError, Analyzer, Question};
use gsal::config::Scenario;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The telemetry table to analyse (.json, .jsonl or .ndjson).
    data: PathBuf,

    /// Answer one question and exit. Without it, an interactive menu runs.
    #[arg(short, long, value_enum)]
    question: Option<Question>,

    /// JSON file overriding the default scenario.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Team label to analyse.
    #[arg(long)]
    team: Option<String>,

    /// Area name for the timing and heatmap questions.
    #[arg(long)]
    area: Option<String>,

    /// Write the heatmap JSON here instead of printing it.
    #[arg(long)]
    heatmap_out: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), AppError> {
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    if let Some(team) = args.team {
        scenario.team = team;
    }
    if let Some(area) = args.area {
        scenario.area = area;
    }
    log::debug!("scenario: {:?}", scenario);

    let state = app::load(args.data)?;
    let analyzer = Analyzer::new(state, scenario, args.heatmap_out);

    match args.question {
        Some(question) => {
            println!("\n\n{}\n", analyzer.answer(question)?);
            Ok(())
        }
        None => analyzer.menu(io::stdin().lock(), io::stdout()),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    log::info!("data: {:?} ; question: {:?} ; scenario: {:?}",
        args.data, args.question, args.scenario);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
