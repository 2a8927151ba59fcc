use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobError {
    #[error("cannot access {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output directory {} already exists", .0.display())]
    OutputExists(PathBuf),

    #[error("no input files found under {}", .0.display())]
    NoInput(PathBuf),

    /// The pipeline did not complete; nothing written is guaranteed.
    #[error("job failed: {0}")]
    Failed(String),
}

impl JobError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        JobError::Io { path: path.to_path_buf(), source }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            JobError::Failed(_) => 1,
            JobError::Io { .. } | JobError::OutputExists(_) | JobError::NoInput(_) => 3,
        }
    }
}

impl From<anyhow::Error> for JobError {
    fn from(err: anyhow::Error) -> Self {
        JobError::Failed(format!("{err:#}"))
    }
}
