//! Submission collaborators receiving the finished aggregate.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::info;

use crate::wizard::FinishedAggregate;

const SUBMISSION_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Submission rejected: {0}")]
    Rejected(String),
}

/// Receives the finished aggregate. Retries and transport belong to the
/// implementation, never to the wizard.
pub trait Submitter {
    fn submit(&mut self, aggregate: &FinishedAggregate) -> Result<(), SubmissionError>;
}

/// Logs the aggregate as JSON instead of transmitting it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSubmitter;

impl Submitter for LoggingSubmitter {
    fn submit(&mut self, aggregate: &FinishedAggregate) -> Result<(), SubmissionError> {
        let json = serde_json::to_string(aggregate)?;
        info!(target: "setup_wizard::submission", aggregate = %json, "Complete form data");
        Ok(())
    }
}

/// Writes each aggregate to `<dir>/onboarding_<timestamp>.json`.
#[derive(Debug, Clone)]
pub struct DirectorySubmitter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySubmitter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far, oldest first.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn target_path(&self, aggregate: &FinishedAggregate) -> PathBuf {
        let stamp = aggregate
            .completed_at()
            .format(SUBMISSION_TIMESTAMP_FORMAT)
            .to_string();
        let mut path = self.dir.join(format!("onboarding_{stamp}.json"));
        let mut counter = 1;
        while path.exists() {
            path = self.dir.join(format!("onboarding_{stamp}_{counter}.json"));
            counter += 1;
        }
        path
    }
}

impl Submitter for DirectorySubmitter {
    fn submit(&mut self, aggregate: &FinishedAggregate) -> Result<(), SubmissionError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.target_path(aggregate);
        let json = serde_json::to_string_pretty(aggregate)?;
        let tmp = path.with_extension(format!("json.{TMP_SUFFIX}"));
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        info!(path = %path.display(), "Onboarding data written");
        self.written.push(path);
        Ok(())
    }
}

fn write_file(path: &Path, data: &str) -> Result<(), SubmissionError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
