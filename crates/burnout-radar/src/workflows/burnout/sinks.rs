//! Optional write-only outputs. Nothing here is read back by the engine.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use super::domain::{Assessment, BurnoutRecord, RiskCategory};

/// Payload published to a hosting frame whenever a score is computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBroadcast {
    pub sleep_hours: f64,
    pub screen_hours: f64,
    pub task_count: i32,
    pub score: u8,
    pub category: RiskCategory,
}

impl From<&Assessment> for ScoreBroadcast {
    fn from(assessment: &Assessment) -> Self {
        Self {
            sleep_hours: assessment.inputs.sleep_hours,
            screen_hours: assessment.inputs.screen_hours,
            task_count: assessment.inputs.task_count,
            score: assessment.score,
            category: assessment.category,
        }
    }
}

pub trait ScoreBroadcaster: Send + Sync {
    fn broadcast(&self, payload: &ScoreBroadcast) -> Result<(), SinkError>;
}

/// Secondary, non-authoritative copy of each saved record.
pub trait RecordMirror: Send + Sync {
    fn mirror(&self, record: &BurnoutRecord) -> Result<(), SinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("sink io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("sink encoding failure: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

/// Writes the latest saved record for each user to `<dir>/<user>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileMirror {
    dir: PathBuf,
}

impl JsonFileMirror {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Target file for the record's user. Fails unless the name stays directly inside `dir`.
    pub fn path_for(&self, record: &BurnoutRecord) -> Result<PathBuf, SinkError> {
        let file_name = format!("{}.json", record.user_id);
        let mut components = Path::new(&file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.dir.join(&file_name)),
            _ => Err(SinkError::Unavailable(format!(
                "user identifier '{}' is not a safe file name",
                record.user_id
            ))),
        }
    }
}

impl RecordMirror for JsonFileMirror {
    fn mirror(&self, record: &BurnoutRecord) -> Result<(), SinkError> {
        let path = self.path_for(record)?;
        fs::create_dir_all(&self.dir)?;
        let file = fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, record)?;
        writer.flush()?;
        Ok(())
    }
}
