use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use crate::models::{DONE_SYMBOL, NOT_DONE_SYMBOL, Task, TaskDetail};

const FIELD_DELIMITER: char = '|';

/// The save file behind the task list.
///
/// One record per line, `|`-delimited, field count fixed by the type symbol:
/// `T|<done>|<desc>`, `D|<done>|<desc>|<due>`, `E|<done>|<desc>|<start>|<end>`.
/// Each write is a scoped open-write-close; the in-memory store remains the
/// source of truth for the running session and the file is a best-effort
/// mirror.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("save file unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
    #[error("failed to create save directory: {0}")]
    DirectoryError(String),
}

/// A save-file line that could not be decoded. Corrupt lines are skipped and
/// reported; one bad line never loses the rest of the list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("save file line {line}: {reason}")]
pub struct CorruptRecord {
    pub line: usize,
    pub reason: String,
}

/// Outcome of a load: the decoded tasks plus every line that was skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub tasks: Vec<Task>,
    pub skipped: Vec<CorruptRecord>,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the save directory and file on first run. Returns `true` when
    /// the file had to be created.
    pub fn ensure_exists(&self) -> Result<bool, StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| StorageError::DirectoryError(e.to_string()))?;
            }
        }
        if self.path.exists() {
            return Ok(false);
        }
        fs::File::create(&self.path)?;
        Ok(true)
    }

    /// Reads every record in the save file. Undecodable lines are collected
    /// in the report (and logged) rather than aborting the load.
    pub fn load(&self) -> Result<LoadReport, StorageError> {
        let contents = fs::read_to_string(&self.path)?;
        let mut report = LoadReport::default();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match decode_record(line) {
                Ok(task) => report.tasks.push(task),
                Err(reason) => {
                    let corrupt = CorruptRecord {
                        line: index + 1,
                        reason,
                    };
                    warn!("skipping corrupt record: {corrupt}");
                    report.skipped.push(corrupt);
                }
            }
        }
        Ok(report)
    }

    /// Rewrites the whole save file from `tasks`, in order. Needed after
    /// delete and mark/unmark, which an append-only file cannot express.
    pub fn store_all(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let mut contents = String::new();
        for task in tasks {
            contents.push_str(&encode_record(task));
            contents.push('\n');
        }
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Appends a single record; the cheap path for pure additions.
    pub fn append_one(&self, task: &Task) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", encode_record(task))?;
        Ok(())
    }
}

pub fn encode_record(task: &Task) -> String {
    let head = format!(
        "{}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{}",
        task.type_symbol(),
        task.status_symbol(),
        task.description
    );
    match &task.detail {
        TaskDetail::Todo => head,
        TaskDetail::Deadline { due } => format!("{head}{FIELD_DELIMITER}{due}"),
        TaskDetail::Event { start, end } => {
            format!("{head}{FIELD_DELIMITER}{start}{FIELD_DELIMITER}{end}")
        }
    }
}

/// Decodes one save-file line. The type symbol fixes the field count; the
/// split limit makes the last field absorb any extra delimiters.
pub fn decode_record(line: &str) -> Result<Task, String> {
    let (type_symbol, rest) = line
        .split_once(FIELD_DELIMITER)
        .ok_or_else(|| "record has no field delimiters".to_string())?;

    let field_count = match type_symbol {
        "T" => 2,
        "D" => 3,
        "E" => 4,
        other => return Err(format!("unknown task type symbol `{other}`")),
    };
    let fields: Vec<&str> = rest.splitn(field_count, FIELD_DELIMITER).collect();
    if fields.len() < field_count {
        return Err(format!(
            "expected {} fields for a `{type_symbol}` record, found {}",
            field_count + 1,
            fields.len() + 1
        ));
    }

    let done = match fields[0] {
        DONE_SYMBOL => true,
        NOT_DONE_SYMBOL => false,
        other => return Err(format!("unknown status symbol `{other}`")),
    };
    let description = fields[1];
    if description.is_empty() {
        return Err("task description is empty".to_string());
    }

    let mut task = match type_symbol {
        "T" => Task::todo(description),
        "D" => Task::deadline(description, fields[2]),
        _ => Task::event(description, fields[2], fields[3]),
    };
    task.done = done;
    Ok(task)
}
