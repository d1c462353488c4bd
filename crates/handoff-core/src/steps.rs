//! The ralph step list: an ordered JSON array of `{id, task, done, error?}`
//! records that an agent loop works through one step at a time.
//!
//! The file is rewritten whole on every change. Writes are atomic, but there
//! is no locking: two concurrent writers still race and the last one wins.

use crate::error::{HandoffError, Result};
use crate::io;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Printed by `next` when nothing is left to do.
pub const ALL_DONE: &str = "ALL_DONE";

/// One step. A missing or `null` `done` reads as false, and a `null` `error`
/// as no error.
///
/// The object is kept as read, so a rewrite only touches values that
/// changed: key order and fields this tool does not know about survive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct StepRecord {
    pub id: i64,
    pub task: String,
    pub done: bool,
    pub error: Option<String>,
    raw: Map<String, Value>,
}

impl StepRecord {
    pub fn new(id: i64, task: impl Into<String>) -> Self {
        Self {
            id,
            task: task.into(),
            done: false,
            error: None,
            raw: Map::new(),
        }
    }

    /// The recorded error, ignoring empty strings.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    /// A field as it appeared in the step file.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }
}

impl TryFrom<Map<String, Value>> for StepRecord {
    type Error = String;

    fn try_from(raw: Map<String, Value>) -> std::result::Result<Self, Self::Error> {
        let id = raw
            .get("id")
            .and_then(Value::as_i64)
            .ok_or("step is missing an integer `id`")?;
        let task = raw
            .get("task")
            .and_then(Value::as_str)
            .ok_or_else(|| format!("step {id} is missing a string `task`"))?
            .to_string();
        let done = match raw.get("done") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                return Err(format!("step {id}: `done` must be a boolean, got {other}"))
            }
        };
        let error = match raw.get("error") {
            None | Some(Value::Null) => None,
            Some(Value::String(e)) => Some(e.clone()),
            Some(other) => {
                return Err(format!("step {id}: `error` must be a string, got {other}"))
            }
        };
        Ok(Self {
            id,
            task,
            done,
            error,
            raw,
        })
    }
}

impl From<StepRecord> for Map<String, Value> {
    fn from(step: StepRecord) -> Self {
        let mut map = step.raw;
        if map.get("id").and_then(Value::as_i64) != Some(step.id) {
            map.insert("id".to_string(), step.id.into());
        }
        if map.get("task").and_then(Value::as_str) != Some(step.task.as_str()) {
            map.insert("task".to_string(), step.task.into());
        }
        if map.get("done").and_then(Value::as_bool).unwrap_or(false) != step.done {
            map.insert("done".to_string(), step.done.into());
        }
        match step.error {
            Some(e) => {
                if map.get("error").and_then(Value::as_str) != Some(e.as_str()) {
                    map.insert("error".to_string(), e.into());
                }
            }
            None => map.retain(|k, v| k != "error" || v.is_null()),
        }
        map
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepSummary {
    pub total: usize,
    pub done: usize,
    pub errors: usize,
}

// ---------------------------------------------------------------------------
// StepCommand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepCommand {
    Next,
    Status,
    MarkDone(i64),
}

impl std::str::FromStr for StepCommand {
    type Err = HandoffError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "next" => Ok(StepCommand::Next),
            "status" => Ok(StepCommand::Status),
            other => other
                .trim()
                .parse::<i64>()
                .map(StepCommand::MarkDone)
                .map_err(|_| HandoffError::InvalidStepId(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// StepList
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct StepList {
    path: PathBuf,
    steps: Vec<StepRecord>,
}

impl StepList {
    /// Read the step file. A missing file or malformed JSON is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let steps: Vec<StepRecord> = serde_json::from_str(&data)?;
        Ok(Self {
            path: path.to_path_buf(),
            steps,
        })
    }

    pub fn new(path: impl Into<PathBuf>, steps: Vec<StepRecord>) -> Self {
        Self {
            path: path.into(),
            steps,
        }
    }

    /// Rewrite the whole file, pretty-printed with two-space indentation.
    pub fn save(&self) -> Result<()> {
        let data = serde_json::to_string_pretty(&self.steps)?;
        io::atomic_write(&self.path, data.as_bytes())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Mark the first step with `id` done, recording `error` if non-empty.
    /// Returns false, changing nothing, when no step has that id.
    pub fn mark_done(&mut self, id: i64, error: Option<&str>) -> bool {
        let Some(step) = self.steps.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        step.done = true;
        if let Some(e) = error.filter(|e| !e.is_empty()) {
            step.error = Some(e.to_string());
        }
        true
    }

    /// First step, in list order, not yet done.
    pub fn next(&self) -> Option<&StepRecord> {
        self.steps.iter().find(|s| !s.done)
    }

    pub fn summary(&self) -> StepSummary {
        StepSummary {
            total: self.steps.len(),
            done: self.steps.iter().filter(|s| s.done).count(),
            errors: self.steps.iter().filter(|s| s.error().is_some()).count(),
        }
    }
}

/// Load, mark, and save. Returns false (file untouched) for an unknown id.
pub fn mark_done(path: &Path, id: i64, error: Option<&str>) -> Result<bool> {
    let mut list = StepList::load(path)?;
    if !list.mark_done(id, error) {
        tracing::warn!(id, path = %path.display(), "step not found");
        return Ok(false);
    }
    list.save()?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
