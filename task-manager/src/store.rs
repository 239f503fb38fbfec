use crate::task::Task;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TASK_FILE: &str = "tasks.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot access task file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("task file {} is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// What to do when the task file exists but does not hold a valid task list.
#[derive(Debug, Default, Eq, PartialEq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CorruptFilePolicy {
    /// Surface the parse error to the caller.
    #[default]
    Fail,
    /// Log a warning and start from an empty task list.
    Empty,
}

/// Reads and writes the whole task list as a JSON array.
///
/// The store keeps no copy of the tasks between calls; every call opens and
/// closes the file on its own.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
    on_corrupt: CorruptFilePolicy,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            on_corrupt: CorruptFilePolicy::default(),
        }
    }

    pub fn with_corrupt_file_policy(mut self, policy: CorruptFilePolicy) -> Self {
        self.on_corrupt = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every task in file order.
    ///
    /// A missing file is not an error and yields an empty list. Anything else
    /// that goes wrong while reading is returned as-is, and malformed content
    /// is handled according to the configured [`CorruptFilePolicy`].
    pub fn load_all(&self) -> Result<Vec<Task>, StoreError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No task file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_slice::<Vec<Task>>(&contents) {
            Ok(tasks) => {
                debug!("Loaded {} tasks from {}", tasks.len(), self.path.display());
                Ok(tasks)
            }
            Err(source) => match self.on_corrupt {
                CorruptFilePolicy::Fail => Err(StoreError::Malformed {
                    path: self.path.clone(),
                    source,
                }),
                CorruptFilePolicy::Empty => {
                    warn!(
                        "Ignoring malformed task file {}: {}",
                        self.path.display(),
                        source
                    );
                    Ok(Vec::new())
                }
            },
        }
    }

    /// Overwrites the task file with `tasks`, in order.
    ///
    /// The write is not atomic: a crash midway can leave a truncated file.
    pub fn save_all(&self, tasks: &[Task]) -> Result<(), StoreError> {
        self.write_json(tasks).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("Saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }

    fn write_json(&self, tasks: &[Task]) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, tasks)?;
        writer.flush()
    }
}
