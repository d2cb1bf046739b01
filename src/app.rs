use crate::analysis::{AnalysisError, GameState};
use crate::config::{ConfigError, Scenario};
use crate::parsing::{self as par, LoadError};

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error("could not write output: {0}")]
    Io(#[from] io::Error),
    #[error("could not encode heatmap: {0}")]
    Json(#[from] serde_json::Error),
}

/// The three questions the tool answers.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    /// How often the team enters the choke point.
    A,
    /// When the team reaches the area with enough rifles or SMGs.
    B,
    /// Where the team defends the area at round start.
    C,
}

const MENU: &str = "Please select a question to answer:

  a. Is entering via the choke point a common strategy for the team on its attacking side?

  b. What is the average timer at which the team enters the area with at least the minimum number of rifles or SMGs?

  c. Heatmap data of where the team stands in the area at the beginning of each round.

  q. To exit.

  Enter (a | b | c | q):  ";

pub struct Analyzer {
    state: GameState,
    scenario: Scenario,
    heatmap_out: Option<PathBuf>,
}

/// Loads a table, printing progress every 10%.
pub fn load(fname: PathBuf) -> Result<GameState, LoadError> {
    println!("###############################");
    println!("# Beginning Load: {:?}", fname);

    let mut last_report = 0;
    let state = par::LoadWorker::new(fname.clone())?.wait(|done, total| {
        let perc_done = if total == 0 { 100 } else { (done * 100 / total).min(100) };
        // reads arrive in buffer-sized steps, so report on crossing each 10%
        let step = perc_done / 10 * 10;
        if step > last_report {
            println!("({:?}) {}%", fname.file_name().unwrap_or_default(), step);
            last_report = step;
        }
    })?;

    println!("# Loaded {} rows", state.len());
    Ok(state)
}

impl Analyzer {
    pub fn new(state: GameState, scenario: Scenario, heatmap_out: Option<PathBuf>) -> Self {
        Analyzer { state, scenario, heatmap_out }
    }

    pub fn answer(&self, question: Question) -> Result<String, AppError> {
        let sc = &self.scenario;
        log::info!("Answering question {:?} for {}", question, sc.team);

        match question {
            Question::A => {
                let rate = self.state.entry_rate(&sc.choke_point, sc.z_band, &sc.team, sc.attack_side)?;
                Ok(rate.to_string())
            }
            Question::B => Ok(self.state.weapon_entry_timing(&sc.timing_query())?.to_string()),
            Question::C => {
                let heatmap = self.state.defense_heatmap(&sc.heatmap_query())?;
                let json = serde_json::to_string_pretty(&heatmap)?;

                match &self.heatmap_out {
                    Some(path) => {
                        std::fs::write(path, json)?;
                        Ok(format!("***** Defense heatmap *****\n\n{} round-start positions over {} rounds written to {:?}",
                            heatmap.points.len(), heatmap.rounds, path))
                    }
                    None => Ok(json),
                }
            }
        }
    }

    /// Prompts until `q` or end of input. Unknown choices re-prompt; an
    /// analysis error is printed and the menu continues.
    pub fn menu<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<(), AppError> {
        let mut lines = input.lines();
        loop {
            write!(output, "{}", MENU)?;
            output.flush()?;

            let Some(line) = lines.next() else { break };
            let question = match line?.trim() {
                "a" => Question::A,
                "b" => Question::B,
                "c" => Question::C,
                "q" => break,
                _ => continue,
            };

            match self.answer(question) {
                Ok(text) => writeln!(output, "\n\n{}\n\n", text)?,
                Err(AppError::Analysis(err)) => {
                    log::warn!("question {:?} could not be answered: {}", question, err);
                    writeln!(output, "\n\nNo answer: {}\n\n", err)?;
                }
                Err(err) => return Err(err),
            }
        }

        writeln!(output, "\n\nGoodbye.\n")?;
        Ok(())
    }
}
