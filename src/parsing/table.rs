//! Readers for the on-disk telemetry table.

use std::fs::File;
use std::io::{self, BufRead, Read};
use std::path::Path;

use parquet::file::reader::{FileReader, SerializedFileReader};

use crate::types::frame::FrameRow;

use super::LoadError;

/// Parquet progress is reported once per this many rows.
const ROWS_PER_REPORT: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// One JSON array holding every row.
    JsonArray,
    /// One JSON object per line.
    JsonLines,
    /// Columnar Parquet file, `inventory` as a list of structs.
    Parquet,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(TableFormat::JsonArray),
            Some("jsonl") | Some("ndjson") => Ok(TableFormat::JsonLines),
            Some("parquet") => Ok(TableFormat::Parquet),
            _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Counts the raw bytes pulled through it and hands the running total to
/// `on_read` after every non-empty read.
pub struct ProgressReader<R, F> {
    inner: R,
    consumed: u64,
    on_read: F,
}

impl<R: Read, F: FnMut(u64)> ProgressReader<R, F> {
    pub fn new(inner: R, on_read: F) -> Self {
        ProgressReader { inner, consumed: 0, on_read }
    }
}

impl<R: Read, F: FnMut(u64)> Read for ProgressReader<R, F> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.consumed += n as u64;
            (self.on_read)(self.consumed);
        }
        Ok(n)
    }
}

pub fn read_json_array<R: Read>(reader: R) -> Result<Vec<FrameRow>, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Reads rows line by line. Blank lines are skipped; a bad row fails with
/// its 1-based line number.
pub fn read_json_lines<R: BufRead>(reader: R) -> Result<Vec<FrameRow>, LoadError> {
    let mut rows = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let row = serde_json::from_str::<FrameRow>(&line)
            .map_err(|source| LoadError::Row { line: i + 1, source })?;
        rows.push(row);
    }

    Ok(rows)
}

/// An opened Parquet table. Rows go through the record API and are then
/// deserialised the same way a JSON row is.
pub struct ParquetTable {
    reader: SerializedFileReader<File>,
}

impl ParquetTable {
    pub fn open(file: File) -> Result<Self, LoadError> {
        Ok(ParquetTable { reader: SerializedFileReader::new(file)? })
    }

    pub fn num_rows(&self) -> u64 {
        u64::try_from(self.reader.metadata().file_metadata().num_rows()).unwrap_or(0)
    }

    /// `progress` gets the rows read so far. A bad row fails with its
    /// 1-based record number.
    pub fn read_rows<F: FnMut(u64)>(&self, mut progress: F) -> Result<Vec<FrameRow>, LoadError> {
        let mut rows = Vec::new();

        for (i, record) in self.reader.get_row_iter(None)?.enumerate() {
            let row = serde_json::from_value::<FrameRow>(record?.to_json_value())
                .map_err(|source| LoadError::Row { line: i + 1, source })?;
            rows.push(row);

            if rows.len() % ROWS_PER_REPORT == 0 {
                progress(rows.len() as u64);
            }
        }

        if rows.len() % ROWS_PER_REPORT != 0 {
            progress(rows.len() as u64);
        }

        Ok(rows)
    }
}
