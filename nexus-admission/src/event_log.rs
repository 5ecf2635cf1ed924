//! Line-oriented ADD/REMOVE event log.
//!
//! ```text
//! ADD <id> <priority> <step_added>
//! REMOVE <id> <priority> <step_removed>
//! ```

use std::fmt;
use std::io::{self, BufRead, BufWriter, Write};
use std::str::FromStr;

use thiserror::Error;

use crate::request::{Request, Served};

/// One record in the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEntry {
    Add { id: u64, priority: i32, step: u64 },
    Remove { id: u64, priority: i32, step: u64 },
}

impl LogEntry {
    pub fn added(request: &Request) -> Self {
        LogEntry::Add {
            id: request.id(),
            priority: request.priority(),
            step: request.step_added(),
        }
    }

    pub fn removed(served: &Served) -> Self {
        LogEntry::Remove {
            id: served.request.id(),
            priority: served.request.priority(),
            step: served.step_removed,
        }
    }

    pub fn id(&self) -> u64 {
        match *self {
            LogEntry::Add { id, .. } | LogEntry::Remove { id, .. } => id,
        }
    }

    pub fn step(&self) -> u64 {
        match *self {
            LogEntry::Add { step, .. } | LogEntry::Remove { step, .. } => step,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::Add { id, priority, step } => write!(f, "ADD {} {} {}", id, priority, step),
            LogEntry::Remove { id, priority, step } => {
                write!(f, "REMOVE {} {} {}", id, priority, step)
            }
        }
    }
}

/// A log line that could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseEntryError {
    #[error("unknown record kind '{0}'")]
    UnknownKind(String),
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),
    #[error("field '{field}' is not an integer: '{value}'")]
    BadInteger { field: &'static str, value: String },
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseEntryError> {
    value.parse().map_err(|_| ParseEntryError::BadInteger {
        field,
        value: value.to_string(),
    })
}

impl FromStr for LogEntry {
    type Err = ParseEntryError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(ParseEntryError::FieldCount(fields.len()));
        }
        let id = parse_field("id", fields[1])?;
        let priority = parse_field("priority", fields[2])?;
        let step = parse_field("step", fields[3])?;
        match fields[0] {
            "ADD" => Ok(LogEntry::Add { id, priority, step }),
            "REMOVE" => Ok(LogEntry::Remove { id, priority, step }),
            other => Err(ParseEntryError::UnknownKind(other.to_string())),
        }
    }
}

/// Error reading a log back.
#[derive(Debug, Error)]
pub enum ReadLogError {
    #[error("reading log: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseEntryError,
    },
}

/// Parses every non-blank line of `reader`.
pub fn read_log<R: BufRead>(reader: R) -> Result<Vec<LogEntry>, ReadLogError> {
    let mut entries = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry = line
            .parse()
            .map_err(|source| ReadLogError::Parse { line: i + 1, source })?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Buffered writer of log records.
pub struct EventLog<W: Write> {
    out: BufWriter<W>,
    bytes: u64,
}

impl<W: Write> EventLog<W> {
    pub fn new(sink: W) -> Self {
        Self {
            out: BufWriter::new(sink),
            bytes: 0,
        }
    }

    /// Appends one record and its newline.
    pub fn record(&mut self, entry: &LogEntry) -> io::Result<()> {
        let line = format!("{}\n", entry);
        self.out.write_all(line.as_bytes())?;
        self.bytes += line.len() as u64;
        Ok(())
    }

    /// Bytes handed to the sink so far, including buffered ones.
    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}
