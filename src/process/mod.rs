use std::fmt;

pub mod executor;
pub mod pipe;
pub mod signal;
pub mod wait;

pub use executor::ProcessExecutor;
pub use signal::SignalBridge;

#[derive(Debug)]
pub enum ProcessError {
    CommandNotFound(String),
    EmptyCommand,
    Spawn {
        program: String,
        source: std::io::Error,
    },
    Pipe(std::io::Error),
    Wait(std::io::Error),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::CommandNotFound(cmd) => write!(f, "command not found: {}", cmd),
            ProcessError::EmptyCommand => write!(f, "empty command in pipeline"),
            ProcessError::Spawn { program, source } => write!(f, "{}: {}", program, source),
            ProcessError::Pipe(e) => write!(f, "pipe: {}", e),
            ProcessError::Wait(e) => write!(f, "wait: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Spawn { source, .. } => Some(source),
            ProcessError::Pipe(e) | ProcessError::Wait(e) => Some(e),
            _ => None,
        }
    }
}

impl ProcessError {
    pub(crate) fn spawn(program: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            ProcessError::CommandNotFound(program.to_string())
        } else {
            ProcessError::Spawn {
                program: program.to_string(),
                source,
            }
        }
    }
}
