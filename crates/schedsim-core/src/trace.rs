//! Workload files for SchedSim.
//!
//! A workload file is JSONL: one `{"arrival": <seconds>, "burst": <seconds>}`
//! object per line. Blank lines and `#` comments are skipped. Loaded
//! processes are sorted by arrival and numbered in that order.

use schedsim_policies::Process;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to read workload file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON at line {line}: {source}")]
    JsonParse {
        line: usize,
        source: serde_json::Error,
    },
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
    #[error("Failed to serialize workload record: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// One line of a workload file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadRecord {
    /// Arrival time in seconds.
    pub arrival: f64,
    /// CPU burst in seconds.
    pub burst: f64,
}

impl WorkloadRecord {
    fn validate(&self, line: usize) -> Result<(), TraceError> {
        if !self.arrival.is_finite() || self.arrival < 0.0 {
            return Err(TraceError::InvalidRecord {
                line,
                reason: format!("arrival must be finite and >= 0, got {}", self.arrival),
            });
        }
        if !self.burst.is_finite() || self.burst < 0.0 {
            return Err(TraceError::InvalidRecord {
                line,
                reason: format!("burst must be finite and >= 0, got {}", self.burst),
            });
        }
        Ok(())
    }
}

/// Load a JSONL workload file.
pub fn load_workload(path: &Path) -> Result<Vec<Process>, TraceError> {
    let file = std::fs::File::open(path)?;
    parse_workload_jsonl(BufReader::new(file))
}

/// Parse a JSONL workload from any reader.
pub fn parse_workload_jsonl<R: Read>(reader: BufReader<R>) -> Result<Vec<Process>, TraceError> {
    let mut records = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let record: WorkloadRecord =
            serde_json::from_str(trimmed).map_err(|e| TraceError::JsonParse {
                line: line_num + 1,
                source: e,
            })?;
        record.validate(line_num + 1)?;
        records.push(record);
    }

    // Stable sort keeps file order for equal arrivals
    records.sort_by(|a, b| a.arrival.total_cmp(&b.arrival));
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(id, r)| Process::new(id as u64, r.arrival, r.burst))
        .collect())
}

/// Write processes as a JSONL workload.
pub fn write_workload_jsonl(processes: &[Process], path: &Path) -> Result<(), TraceError> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);

    for (i, p) in processes.iter().enumerate() {
        let record = WorkloadRecord {
            arrival: p.arrival_time,
            burst: p.burst_time,
        };
        // serde_json writes NaN as null, which would not load back.
        record.validate(i + 1)?;
        serde_json::to_writer(&mut writer, &record).map_err(TraceError::Serialize)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
