use std::env;
use std::path::{Path, PathBuf};

/// Working-directory bookkeeping that survives across input lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    current_dir: PathBuf,
    previous_dir: Option<PathBuf>,
}

impl ShellState {
    pub fn new() -> Result<Self, std::io::Error> {
        Ok(Self::with_dir(env::current_dir()?))
    }

    pub fn with_dir(current_dir: PathBuf) -> Self {
        Self {
            current_dir,
            previous_dir: None,
        }
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn previous_dir(&self) -> Option<&Path> {
        self.previous_dir.as_deref()
    }

    /// Records a completed directory change.
    pub(crate) fn moved_to(&mut self, new_dir: PathBuf) {
        let old = std::mem::replace(&mut self.current_dir, new_dir);
        self.previous_dir = Some(old);
    }
}
