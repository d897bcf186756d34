use std::collections::BTreeMap;
use std::path::PathBuf;

mod cd;
mod exit;

pub use cd::CdCommand;
pub use exit::ExitCommand;

use crate::core::state::ShellState;

/// What the read loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit(i32),
}

#[derive(Debug)]
pub enum CommandError {
    HomeNotSet,
    NoPreviousDirectory,
    ChangeDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    InvalidArguments(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::HomeNotSet => write!(f, "cd: HOME not set"),
            CommandError::NoPreviousDirectory => write!(f, "cd: no previous directory"),
            CommandError::ChangeDirectory { path, source } => {
                write!(f, "cd: {}: {}", path.display(), source)
            }
            CommandError::InvalidArguments(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::ChangeDirectory { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub trait Builtin {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Outcome, CommandError>;
}

#[derive(Clone)]
enum BuiltinType {
    Cd(CdCommand),
    Exit(ExitCommand),
}

impl Builtin for BuiltinType {
    fn execute(&self, args: &[String], state: &mut ShellState) -> Result<Outcome, CommandError> {
        match self {
            BuiltinType::Cd(cmd) => cmd.execute(args, state),
            BuiltinType::Exit(cmd) => cmd.execute(args, state),
        }
    }
}

/// Recognizes and runs the commands that live inside the interpreter.
#[derive(Clone)]
pub struct BuiltinDispatcher {
    commands: BTreeMap<&'static str, BuiltinType>,
}

impl Default for BuiltinDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinDispatcher {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", BuiltinType::Cd(CdCommand::new()));
        commands.insert("exit", BuiltinType::Exit(ExitCommand::new()));
        Self { commands }
    }

    /// Runs `argv` if its first word names a builtin, `None` otherwise.
    pub fn dispatch(
        &self,
        argv: &[String],
        state: &mut ShellState,
    ) -> Option<Result<Outcome, CommandError>> {
        let (name, args) = argv.split_first()?;
        let cmd = self.commands.get(name.as_str())?;
        log::debug!("builtin {} {:?}", name, args);
        Some(cmd.execute(args, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_non_builtin_falls_through() {
        let dispatcher = BuiltinDispatcher::new();
        let mut state = ShellState::with_dir(PathBuf::from("/"));
        assert!(dispatcher.dispatch(&argv(&["ls", "-la"]), &mut state).is_none());
        assert!(dispatcher.dispatch(&[], &mut state).is_none());
    }

    #[test]
    fn test_dispatch_exit() {
        let dispatcher = BuiltinDispatcher::new();
        let mut state = ShellState::with_dir(PathBuf::from("/"));
        let outcome = dispatcher.dispatch(&argv(&["exit"]), &mut state);
        assert!(matches!(outcome, Some(Ok(Outcome::Exit(0)))));
        assert_eq!(state, ShellState::with_dir(PathBuf::from("/")));
    }

    #[test]
    fn test_dispatch_cd_dash_without_history() {
        let dispatcher = BuiltinDispatcher::new();
        let mut state = ShellState::with_dir(PathBuf::from("/"));
        let outcome = dispatcher.dispatch(&argv(&["cd", "-"]), &mut state);
        assert!(matches!(outcome, Some(Err(CommandError::NoPreviousDirectory))));
        assert!(state.previous_dir().is_none());
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::HomeNotSet,
            CommandError::NoPreviousDirectory,
            CommandError::ChangeDirectory {
                path: PathBuf::from("/missing"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            },
            CommandError::InvalidArguments("exit: x: numeric argument required".to_string()),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
        assert_eq!(
            CommandError::NoPreviousDirectory.to_string(),
            "cd: no previous directory"
        );
    }
}
