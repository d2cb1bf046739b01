////////////////////////////////////////////////////
//! # Parsing
//!
//! Loads a telemetry table off the calling thread.
//! This is kept completely separate from analysis and reporting.
//!
//! ## Mods
//!
//! [`table`] reads the supported file formats (JSON, JSON lines, Parquet)
//! into rows.
//!
//! ## Structures
//! [`LoadWorker`] takes a table file and reports progress while reading it.

pub mod table;

// INCLUDES
use crate::analysis::GameState;

use self::table::{ParquetTable, ProgressReader, TableFormat};

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid parquet table: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    /// `line` is the 1-based line, or the record number for Parquet.
    #[error("invalid row {line}: {source}")]
    Row { line: usize, source: serde_json::Error },
    #[error("unsupported table format: {0:?} (expected .json, .jsonl, .ndjson or .parquet)")]
    UnsupportedFormat(PathBuf),
    #[error("progress receiver hung up")]
    SendError,
}

impl From<mpsc::SendError<LoadProgressReport>> for LoadError {
    fn from(_value: mpsc::SendError<LoadProgressReport>) -> Self {
        LoadError::SendError
    }
}

#[derive(Default, Debug)]
pub enum LoadProgressReport {
    #[default]
    Waiting,
    /// Size of the table: bytes for JSON, rows for Parquet.
    Info(u64),
    /// Progress in the same unit as [`LoadProgressReport::Info`].
    Working(u64),
    Done(GameState),
    Error(LoadError)
}

pub struct LoadWorker {
    #[allow(dead_code)]
    handle: JoinHandle<()>,
    prog_recv: mpsc::Receiver<LoadProgressReport>,
}

impl LoadWorker {
    pub fn new(fpath: PathBuf) -> Result<Self, LoadError> {
        log::info!("Beginning load: {:?}", fpath);

        // Fail before spawning if the format is unknown.
        let format = TableFormat::from_path(&fpath)?;
        let (prog_send, prog_recv) = mpsc::channel::<LoadProgressReport>();

        let handle = thread::spawn(move || {
            use LoadProgressReport::*;
            let error_catch = || -> Result<(), LoadError> {
                let file = File::open(&fpath)?;

                let rows = match format {
                    TableFormat::Parquet => {
                        let parquet = ParquetTable::open(file)?;
                        prog_send.send(Info(parquet.num_rows()))?;
                        parquet.read_rows(|done| {
                            let _ = prog_send.send(Working(done));
                        })?
                    }
                    TableFormat::JsonArray | TableFormat::JsonLines => {
                        prog_send.send(Info(file.metadata()?.len()))?;
                        let reader = BufReader::new(ProgressReader::new(file, |bytes| {
                            let _ = prog_send.send(Working(bytes));
                        }));
                        if format == TableFormat::JsonArray {
                            table::read_json_array(reader)?
                        } else {
                            table::read_json_lines(reader)?
                        }
                    }
                };

                log::debug!("Loaded {} rows from {:?}", rows.len(), fpath);

                // deliberate lack of ?
                // we want the done() to be the last thing we could potentially send
                prog_send.send(Done(GameState::from(rows))).map_err(LoadError::from)
            };

            if let Err(err) = error_catch() {
                let _ = prog_send.send(Error(err));
            }
        });

        Ok(LoadWorker {
            handle,
            prog_recv
        })
    }

    /// Blocks for the next report. A worker that vanished without
    /// finishing reads as [`LoadError::SendError`].
    pub fn recv(&self) -> LoadProgressReport {
        self.prog_recv
            .recv()
            .unwrap_or_else(|_| LoadProgressReport::Error(LoadError::SendError))
    }

    /// Blocks until the table is loaded, handing each progress report to
    /// `on_progress` as `(done, total)`.
    pub fn wait<F: FnMut(u64, u64)>(self, mut on_progress: F) -> Result<GameState, LoadError> {
        let mut total = 0;
        loop {
            match self.recv() {
                LoadProgressReport::Info(size) => total = size,
                LoadProgressReport::Working(bytes) => on_progress(bytes, total),
                LoadProgressReport::Done(state) => return Ok(state),
                LoadProgressReport::Error(err) => return Err(err),
                LoadProgressReport::Waiting => {}
            }
        }
    }
}
